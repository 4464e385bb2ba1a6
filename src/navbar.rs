// Navbar styling driven by scroll position: compact/expanded background and
// the nav link of the section currently under the marker line.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use crate::config::{NavbarConfig, SiteConfig};
use crate::error::Result;
use crate::utils;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NavbarState {
    /// Scrolled past the threshold: solid background and border.
    Compact,
    /// At the top of the page: translucent, no border.
    Expanded,
}

impl NavbarState {
    const COMPACT_CLASSES: [&'static str; 2] = ["bg-dark-800/90", "border-dark-400"];
    const EXPANDED_CLASSES: [&'static str; 2] = ["bg-dark-800/60", "border-transparent"];

    pub fn from_scroll(scroll_y: f64, threshold: f64) -> Self {
        if scroll_y > threshold {
            NavbarState::Compact
        } else {
            NavbarState::Expanded
        }
    }

    /// Classes to add and to remove for this state.
    pub fn classes(self) -> ([&'static str; 2], [&'static str; 2]) {
        match self {
            NavbarState::Compact => (Self::COMPACT_CLASSES, Self::EXPANDED_CLASSES),
            NavbarState::Expanded => (Self::EXPANDED_CLASSES, Self::COMPACT_CLASSES),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

/// Id of the first section containing `marker_y`.
pub fn active_section(marker_y: f64, sections: &[SectionBounds]) -> Option<&str> {
    sections
        .iter()
        .find(|section| section.contains(marker_y))
        .map(|section| section.id.as_str())
}

pub fn is_link_for(href: &str, section_id: &str) -> bool {
    href.strip_prefix('#') == Some(section_id)
}

pub fn apply_state(navbar: &Element, state: NavbarState) -> Result<()> {
    let (add, remove) = state.classes();
    let class_list = navbar.class_list();
    class_list.add_2(add[0], add[1])?;
    class_list.remove_2(remove[0], remove[1])?;
    Ok(())
}

pub fn highlight_link(links: &[Element], active: Option<&str>, class: &str) -> Result<()> {
    for link in links {
        link.class_list().remove_1(class)?;
        let matches = match (active, link.get_attribute("href")) {
            (Some(id), Some(href)) => is_link_for(&href, id),
            _ => false,
        };
        if matches {
            link.class_list().add_1(class)?;
        }
    }
    Ok(())
}

fn section_bounds(sections: &[HtmlElement]) -> Vec<SectionBounds> {
    sections
        .iter()
        .map(|section| SectionBounds {
            id: section.id(),
            top: section.offset_top() as f64,
            height: section.offset_height() as f64,
        })
        .collect()
}

fn on_scroll(
    scroll_y: f64,
    navbar: Option<&Element>,
    sections: &[HtmlElement],
    links: &[Element],
    config: &NavbarConfig,
) -> Result<()> {
    if let Some(navbar) = navbar {
        apply_state(navbar, NavbarState::from_scroll(scroll_y, config.compact_after))?;
    }
    if !sections.is_empty() && !links.is_empty() {
        // offsets move with layout, so they are read on every scroll
        let bounds = section_bounds(sections);
        let active = active_section(scroll_y + config.section_marker_offset, &bounds);
        highlight_link(links, active, &config.active_link_class)?;
    }
    Ok(())
}

pub fn attach(window: &Window, document: &Document, config: &SiteConfig) -> Result<bool> {
    let config = config.navbar.clone();
    let navbar = document.get_element_by_id(&config.navbar_id);
    let sections: Vec<HtmlElement> = utils::query_all(document, &config.section_selector)?
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect();
    let links = utils::query_all(document, &config.link_selector)?;

    if navbar.is_none() && (sections.is_empty() || links.is_empty()) {
        log::debug!("no #{} and no section links, navbar disabled", config.navbar_id);
        return Ok(false);
    }

    let window_for_scroll = window.clone();
    utils::listen(window, "scroll", move |_| {
        let scroll_y = window_for_scroll.scroll_y().unwrap_or(0.0);
        if let Err(e) = on_scroll(scroll_y, navbar.as_ref(), &sections, &links, &config) {
            log::warn!("navbar update failed: {}", e);
        }
    })?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: &str, top: f64, height: f64) -> SectionBounds {
        SectionBounds {
            id: id.to_owned(),
            top,
            height,
        }
    }

    #[test]
    fn compact_only_past_threshold() {
        assert_eq!(NavbarState::from_scroll(0.0, 50.0), NavbarState::Expanded);
        assert_eq!(NavbarState::from_scroll(50.0, 50.0), NavbarState::Expanded);
        assert_eq!(NavbarState::from_scroll(50.5, 50.0), NavbarState::Compact);
    }

    #[test]
    fn state_classes_are_mirror_images() {
        let (add, remove) = NavbarState::Compact.classes();
        assert_eq!(add, ["bg-dark-800/90", "border-dark-400"]);
        assert_eq!(NavbarState::Expanded.classes(), (remove, add));
    }

    #[test]
    fn active_section_is_the_one_under_the_marker() {
        let sections = vec![
            section("hero", 0.0, 600.0),
            section("services", 600.0, 800.0),
            section("contact", 1400.0, 500.0),
        ];
        assert_eq!(active_section(100.0, &sections), Some("hero"));
        assert_eq!(active_section(600.0, &sections), Some("services"));
        assert_eq!(active_section(1399.9, &sections), Some("services"));
        assert_eq!(active_section(1900.0, &sections), None);
    }

    #[test]
    fn link_matches_hash_href_only() {
        assert!(is_link_for("#services", "services"));
        assert!(!is_link_for("services", "services"));
        assert!(!is_link_for("#service", "services"));
        assert!(!is_link_for("/#services", "services"));
    }
}

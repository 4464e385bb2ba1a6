// Mobile menu: the hamburger toggles it, any menu link closes it.

use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::config::SiteConfig;
use crate::error::Result;
use crate::utils;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuState {
    Open,
    Closed,
}

impl Default for MenuState {
    fn default() -> Self {
        MenuState::Closed
    }
}

impl MenuState {
    pub fn toggled(self) -> Self {
        match self {
            MenuState::Open => MenuState::Closed,
            MenuState::Closed => MenuState::Open,
        }
    }

    pub fn is_open(self) -> bool {
        self == MenuState::Open
    }

    /// Inline style for each of the three hamburger bars, `None` clears it.
    /// Open turns the bars into an X.
    pub fn bar_styles(self) -> [(&'static str, Option<&'static str>); 3] {
        match self {
            MenuState::Open => [
                ("transform", Some("rotate(45deg) translate(4px, 4px)")),
                ("opacity", Some("0")),
                ("transform", Some("rotate(-45deg) translate(4px, -4px)")),
            ],
            MenuState::Closed => [("transform", None), ("opacity", None), ("transform", None)],
        }
    }
}

pub struct MobileMenu {
    toggle: Element,
    menu: Element,
    state: Cell<MenuState>,
}

impl MobileMenu {
    pub fn new(toggle: Element, menu: Element) -> Self {
        MobileMenu {
            toggle,
            menu,
            state: Cell::new(MenuState::Closed),
        }
    }

    fn state(&self) -> MenuState {
        self.state.get()
    }

    pub fn set_state(&self, state: MenuState) -> Result<()> {
        self.state.set(state);
        self.menu
            .class_list()
            .toggle_with_force("hidden", !state.is_open())?;

        let bars: Vec<HtmlElement> = utils::query_within(&self.toggle, "span")?
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
            .collect();
        for (bar, (property, value)) in bars.iter().zip(state.bar_styles().iter()) {
            let style = bar.style();
            match value {
                Some(value) => style.set_property(property, value)?,
                None => {
                    style.remove_property(property)?;
                }
            }
        }
        Ok(())
    }

    pub fn toggle(&self) -> Result<()> {
        self.set_state(self.state().toggled())
    }

    pub fn close(&self) -> Result<()> {
        self.set_state(MenuState::Closed)
    }
}

pub fn attach(document: &Document, config: &SiteConfig) -> Result<bool> {
    let config = &config.menu;
    let (toggle, menu) = match (
        document.get_element_by_id(&config.toggle_id),
        document.get_element_by_id(&config.menu_id),
    ) {
        (Some(toggle), Some(menu)) => (toggle, menu),
        _ => {
            log::debug!("no #{} / #{}, mobile menu disabled", config.toggle_id, config.menu_id);
            return Ok(false);
        }
    };

    let mobile_menu = Rc::new(MobileMenu::new(toggle.clone(), menu));
    {
        let mobile_menu = mobile_menu.clone();
        utils::listen(&toggle, "click", move |_| {
            if let Err(e) = mobile_menu.toggle() {
                log::warn!("menu toggle failed: {}", e);
            }
        })?;
    }
    for link in utils::query_all(document, &config.link_selector)? {
        let mobile_menu = mobile_menu.clone();
        utils::listen(&link, "click", move |_| {
            if let Err(e) = mobile_menu.close() {
                log::warn!("menu close failed: {}", e);
            }
        })?;
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed_and_toggles() {
        let state = MenuState::default();
        assert!(!state.is_open());
        assert_eq!(state.toggled(), MenuState::Open);
        assert_eq!(state.toggled().toggled(), MenuState::Closed);
    }

    #[test]
    fn closed_bars_have_no_inline_style() {
        assert!(MenuState::Closed.bar_styles().iter().all(|(_, v)| v.is_none()));
        let open = MenuState::Open.bar_styles();
        assert_eq!(open[1], ("opacity", Some("0")));
        assert_eq!(open[0].1, Some("rotate(45deg) translate(4px, 4px)"));
    }
}

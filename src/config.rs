//! Runtime configuration for the site behaviors.
//!
//! [`SiteConfig`] can be passed to `start` as a JSON string. Every field has a
//! default matching the production page, so a page only needs to override the
//! values it cares about:
//!
//! ```json
//! { "contact": { "endpoint": "https://example.com/hook" }, "log_level": "debug" }
//! ```
//!
//! Unknown keys are rejected so a typo does not silently fall back to a default.

use serde::Deserialize;

use crate::color::Color;
use crate::error::{Result, SiteError};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub particles: ParticleConfig,
    pub navbar: NavbarConfig,
    pub menu: MenuConfig,
    pub counters: CounterConfig,
    pub reveal: RevealConfig,
    pub contact: ContactConfig,
    /// Wrap every animation frame in `console.time` labels.
    pub profile_frames: bool,
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            particles: ParticleConfig::default(),
            navbar: NavbarConfig::default(),
            menu: MenuConfig::default(),
            counters: CounterConfig::default(),
            reveal: RevealConfig::default(),
            contact: ContactConfig::default(),
            profile_frames: false,
            log_level: "info".to_owned(),
        }
    }
}

impl SiteConfig {
    pub fn from_json(json: &str) -> Result<SiteConfig> {
        serde_json::from_str(json).map_err(SiteError::Config)
    }

    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParticleConfig {
    pub canvas_id: String,
    /// Viewport area (px²) that earns one particle.
    pub area_per_particle: f64,
    pub max_particles: usize,
    pub pointer_radius: f64,
    /// Fraction of the particle→pointer displacement applied per frame.
    pub pointer_pull: f64,
    pub link_distance: f64,
    pub link_max_opacity: f64,
    pub link_width: f64,
    /// RRGGBBAA, alpha is ignored.
    pub color: u32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        ParticleConfig {
            canvas_id: "particles-canvas".to_owned(),
            area_per_particle: 12_000.0,
            max_particles: 120,
            pointer_radius: 120.0,
            pointer_pull: 0.01,
            link_distance: 150.0,
            link_max_opacity: 0.15,
            link_width: 0.5,
            color: 0x00d4_ffff,
        }
    }
}

impl ParticleConfig {
    pub fn color(&self) -> Color {
        Color::from_u32(self.color)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavbarConfig {
    pub navbar_id: String,
    /// Scroll offset past which the navbar turns compact.
    pub compact_after: f64,
    /// Added to scrollY before testing which section is active.
    pub section_marker_offset: f64,
    pub link_selector: String,
    pub section_selector: String,
    pub active_link_class: String,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        NavbarConfig {
            navbar_id: "navbar".to_owned(),
            compact_after: 50.0,
            section_marker_offset: 100.0,
            link_selector: ".nav-link".to_owned(),
            section_selector: "section[id]".to_owned(),
            active_link_class: "text-dark-50".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MenuConfig {
    pub toggle_id: String,
    pub menu_id: String,
    pub link_selector: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        MenuConfig {
            toggle_id: "nav-toggle".to_owned(),
            menu_id: "mobile-menu".to_owned(),
            link_selector: ".mobile-link".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CounterConfig {
    pub selector: String,
    pub target_attribute: String,
    pub duration_ms: f64,
    pub tick_ms: f64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        CounterConfig {
            selector: "[data-target]".to_owned(),
            target_attribute: "data-target".to_owned(),
            duration_ms: 2000.0,
            tick_ms: 16.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    pub selector: String,
    pub visible_class: String,
    pub threshold: f64,
    pub root_margin: String,
    pub hero_id: String,
    pub hero_threshold: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        RevealConfig {
            selector: "[data-animate]".to_owned(),
            visible_class: "visible".to_owned(),
            threshold: 0.15,
            root_margin: "0px 0px -50px 0px".to_owned(),
            hero_id: "hero".to_owned(),
            hero_threshold: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    pub endpoint: String,
    pub form_id: String,
    pub submit_id: String,
    pub status_id: String,
    pub success_message: String,
    pub error_message: String,
    pub success_class: String,
    pub error_class: String,
    pub status_hide_after_ms: i32,
}

const CONTACT_ENDPOINT: &str = "https://script.google.com/macros/s/\
    AKfycbyEk98nRcPwfliDeF42aU7CjZ7NZfj3jcqRwT05UValWfBwRXRtGTWmwzytKtoFMZUA/exec";
const STATUS_BASE_CLASS: &str = "mt-4 px-4 py-3 rounded-lg text-sm";

impl Default for ContactConfig {
    fn default() -> Self {
        ContactConfig {
            endpoint: CONTACT_ENDPOINT.to_owned(),
            form_id: "contact-form".to_owned(),
            submit_id: "form-submit".to_owned(),
            status_id: "form-status".to_owned(),
            success_message: "Mensaje enviado correctamente. Nos pondremos en contacto pronto."
                .to_owned(),
            error_message: "Hubo un error al enviar. Intenta de nuevo o escríbenos por WhatsApp."
                .to_owned(),
            success_class: format!(
                "{} bg-green-500/10 border border-green-500/20 text-green-400",
                STATUS_BASE_CLASS
            ),
            error_class: format!(
                "{} bg-red-500/10 border border-red-500/20 text-red-400",
                STATUS_BASE_CLASS
            ),
            status_hide_after_ms: 6000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let config = SiteConfig::from_json("{}").unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.particles.max_particles, 120);
        assert_eq!(config.contact.status_hide_after_ms, 6000);
    }

    #[test]
    fn contact_defaults_are_whole_strings() {
        let contact = ContactConfig::default();
        assert!(contact.endpoint.starts_with("https://script.google.com/macros/s/AKfy"));
        assert!(contact.endpoint.ends_with("/exec"));
        assert!(!contact.endpoint.contains(char::is_whitespace));
        assert!(contact.error_class.starts_with("mt-4 px-4 py-3 rounded-lg text-sm bg-red"));
        assert!(contact.success_class.ends_with(" text-green-400"));
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = SiteConfig::from_json(
            r#"{ "particles": { "max_particles": 40 }, "log_level": "debug" }"#,
        )
        .unwrap();
        assert_eq!(config.particles.max_particles, 40);
        assert_eq!(config.particles.link_distance, 150.0);
        assert_eq!(config.log_level(), log::Level::Debug);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = SiteConfig::from_json(r#"{ "particels": {} }"#).unwrap_err();
        assert!(matches!(err, SiteError::Config(_)));
    }

    #[test]
    fn bad_log_level_falls_back_to_info() {
        let mut config = SiteConfig::default();
        config.log_level = "loud".to_owned();
        assert_eq!(config.log_level(), log::Level::Info);
    }
}

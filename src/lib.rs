mod utils;

pub mod animator;
pub mod color;
pub mod config;
pub mod contact;
pub mod contact_form;
pub mod counter;
pub mod error;
pub mod field;
pub mod frame_loop;
pub mod menu;
pub mod navbar;
pub mod particle;
pub mod renderer;
pub mod reveal;

use wasm_bindgen::prelude::*;
use web_sys::console;

use crate::config::SiteConfig;
use crate::error::Result;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    utils::init_logger(log::Level::Info);
}

/// Activates every behavior on the current page. `config_json` overrides
/// any subset of [`SiteConfig`]; components whose elements are missing are
/// skipped.
#[wasm_bindgen]
pub fn start(config_json: Option<String>) -> std::result::Result<(), JsValue> {
    initialize();
    let config = match config_json {
        Some(json) => SiteConfig::from_json(&json)?,
        None => SiteConfig::default(),
    };
    log::set_max_level(config.log_level().to_level_filter());
    boot(&config)?;
    Ok(())
}

fn boot(config: &SiteConfig) -> Result<()> {
    let window = utils::window()?;
    let document = utils::document()?;

    // Components are independent: one failing must not keep the others off.
    activate("particles", animator::attach(&window, &document, config));
    activate("navbar", navbar::attach(&window, &document, config));
    activate("mobile menu", menu::attach(&document, config));
    activate("reveal", reveal::attach(&document, config));
    activate("contact form", contact_form::attach(&document, config));
    log::info!("site behaviors started");
    Ok(())
}

fn activate(name: &str, result: Result<bool>) {
    match result {
        Ok(true) => log::debug!("{} active", name),
        Ok(false) => log::debug!("{} skipped", name),
        Err(e) => log::error!("{} failed to start: {}", name, e),
    }
}

pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, NodeList};

use crate::error::{Result, SiteError};

pub fn set_panic_hook() {
    // When the `console_error_panic_hook` feature is enabled, we can call the
    // `set_panic_hook` function at least once during initialization, and then
    // we will get better error messages if our code ever panics.
    //
    // For more details see
    // https://github.com/rustwasm/console_error_panic_hook#readme
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// Installing a second logger fails; the first one wins and that's fine
pub fn init_logger(level: log::Level) {
    if console_log::init_with_level(level).is_err() {
        log::set_max_level(level.to_level_filter());
    }
}

pub fn window() -> Result<web_sys::Window> {
    web_sys::window().ok_or(SiteError::MissingGlobal("window"))
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or(SiteError::MissingGlobal("document"))
}

/// Looks up an element by id and casts it, None if absent or of another type.
pub fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
}

fn elements_of(list: NodeList) -> Vec<Element> {
    let mut elements = Vec::with_capacity(list.length() as usize);
    for i in 0..list.length() {
        if let Some(el) = list.get(i).and_then(|node| node.dyn_into::<Element>().ok()) {
            elements.push(el);
        }
    }
    elements
}

/// All elements in the document matching `selector`, in document order.
pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>> {
    Ok(elements_of(document.query_selector_all(selector)?))
}

/// Same as `query_all`, scoped to the descendants of `root`.
pub fn query_within(root: &Element, selector: &str) -> Result<Vec<Element>> {
    Ok(elements_of(root.query_selector_all(selector)?))
}

/// Registers `handler` for the page lifetime.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<()>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Runs `callback` once after `delay_ms`.
pub fn set_timeout<F>(delay_ms: i32, callback: F) -> Result<()>
where
    F: FnOnce() + 'static,
{
    let callback = Closure::once_into_js(callback);
    window()?.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        delay_ms,
    )?;
    Ok(())
}

// requestAnimationFrame driver shared by the particle field and the counters.
//
// The closure has to reschedule itself, so it lives in an Rc<RefCell<Option<..>>>
// that the closure also holds. Returning `Frame::Stop` drops the closure.

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::error::{Result, SiteError};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Frame {
    Continue,
    Stop,
}

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn request_frame(slot: &FrameSlot) -> Result<()> {
    let window = web_sys::window().ok_or(SiteError::MissingGlobal("window"))?;
    let slot = slot.borrow();
    let callback = match slot.as_ref() {
        Some(callback) => callback,
        None => return Ok(()),
    };
    window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    Ok(())
}

/// Runs `tick` once per display frame until it returns `Frame::Stop`.
/// The first call happens synchronously.
pub fn run<F>(mut tick: F) -> Result<()>
where
    F: FnMut() -> Frame + 'static,
{
    if tick() == Frame::Stop {
        return Ok(());
    }

    let f: FrameSlot = Rc::new(RefCell::new(None));
    let g = f.clone();

    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        match tick() {
            Frame::Continue => {
                if let Err(e) = request_frame(&f) {
                    log::error!("could not schedule next frame: {}", e);
                    f.borrow_mut().take();
                }
            }
            // Breaks the self-reference; the closure is freed once this call returns.
            Frame::Stop => drop(f.borrow_mut().take()),
        }
    }) as Box<dyn FnMut()>));

    request_frame(&g)
}

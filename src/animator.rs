// Browser side of the particle background: sizes the canvas to the window,
// tracks pointer and viewport, and drives the field from the frame loop.

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, MouseEvent, Window};

use crate::config::SiteConfig;
use crate::error::Result;
use crate::field::{FieldContext, ParticleField, Viewport};
use crate::frame_loop::{self, Frame};
use crate::renderer::Renderer;
use crate::utils;
use crate::Timer;

pub struct Animator {
    field: ParticleField,
    context: Rc<RefCell<FieldContext>>,
    renderer: Renderer,
    profile_frames: bool,
}

impl Animator {
    pub fn frame(&mut self) {
        let _timer = if self.profile_frames {
            Some(Timer::new("particle frame"))
        } else {
            None
        };
        // copied out so handlers never see an outstanding borrow
        let ctx = *self.context.borrow();
        self.field.frame(&ctx, &mut self.renderer);
    }
}

fn window_viewport(window: &Window) -> Result<Viewport> {
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok(Viewport { width, height })
}

// Match the canvas backing store to the window and report the new viewport
fn fit_canvas(window: &Window, canvas: &HtmlCanvasElement) -> Result<Viewport> {
    let viewport = window_viewport(window)?;
    canvas.set_width(viewport.width as u32);
    canvas.set_height(viewport.height as u32);
    Ok(Viewport {
        width: canvas.width() as f64,
        height: canvas.height() as f64,
    })
}

/// Starts the particle background. Returns `Ok(false)` without touching the
/// page when the canvas or its 2d context is missing.
pub fn attach(window: &Window, document: &Document, config: &SiteConfig) -> Result<bool> {
    let canvas_id = &config.particles.canvas_id;
    let canvas = match utils::element_by_id::<HtmlCanvasElement>(document, canvas_id) {
        Some(canvas) => canvas,
        None => {
            log::debug!("no #{} canvas, particle field disabled", canvas_id);
            return Ok(false);
        }
    };
    let renderer = match Renderer::new(&canvas)? {
        Some(renderer) => renderer,
        None => {
            log::debug!("#{} has no 2d context, particle field disabled", canvas_id);
            return Ok(false);
        }
    };

    let viewport = fit_canvas(window, &canvas)?;
    let context = Rc::new(RefCell::new(FieldContext::new(viewport)));

    // Resize only touches the viewport; the particle count is fixed at load.
    {
        let context = context.clone();
        let window_for_resize = window.clone();
        utils::listen(window, "resize", move |_| match fit_canvas(&window_for_resize, &canvas) {
            Ok(viewport) => context.borrow_mut().viewport = viewport,
            Err(e) => log::warn!("canvas resize failed: {}", e),
        })?;
    }
    {
        let context = context.clone();
        utils::listen(document, "mousemove", move |event| {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                let pointer = [mouse.client_x() as f64, mouse.client_y() as f64];
                context.borrow_mut().pointer = Some(pointer);
            }
        })?;
    }

    let field = ParticleField::new(&mut rand::thread_rng(), viewport, config.particles.clone());
    log::info!(
        "particle field: {} particles on {}x{}",
        field.len(),
        viewport.width,
        viewport.height
    );

    let mut animator = Animator {
        field,
        context,
        renderer,
        profile_frames: config.profile_frames,
    };
    frame_loop::run(move || {
        animator.frame();
        Frame::Continue
    })?;
    Ok(true)
}

//! Browser host: `requestAnimationFrame` scheduling and DOM input wiring.
//!
//! The runner is shared between the frame callback and every DOM listener
//! through `Rc<RefCell<..>>`.  All of them run on the JS event loop, so a
//! failed `try_borrow_mut` only happens if a handler fires re-entrantly
//! from inside a callback; that event is dropped with a warning.
//!
//! Listener closures live for the lifetime of the page and are leaked with
//! `Closure::forget`.  The page provides the canvas element already sized;
//! this module never resizes it.

use std::cell::RefCell;
use std::rc::Rc;

use deo_core::glam::Vec2;
use deo_core::{CanvasRect, InputEvent, MouseButton};
use thiserror::Error;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Event, EventTarget, HtmlCanvasElement, KeyboardEvent, MouseEvent, Performance,
    WheelEvent, Window,
};

use crate::builder::{App, AppConfig};
use crate::error::{ConfigError, HostError};
use crate::host::{FrameHandle, FrameHost};
use crate::logging;
use crate::runner::Runner;
use crate::traits::DeoApp;

#[derive(Debug, Error)]
pub enum WebError {
    #[error("no global `window` object")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("window.performance is unavailable")]
    NoPerformance,
    #[error("no element with id `{0}`")]
    CanvasNotFound(String),
    #[error("element `{0}` is not a <canvas>")]
    NotACanvas(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("javascript error: {0}")]
    Js(String),
}

fn js_error(value: JsValue) -> WebError {
    WebError::Js(format!("{value:?}"))
}

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

// ── Host ───────────────────────────────────────────────────────────────────

pub struct WebHost {
    window: Window,
    performance: Performance,
    frame: FrameSlot,
}

impl WebHost {
    pub fn new(window: Window) -> Result<Self, WebError> {
        let performance = window.performance().ok_or(WebError::NoPerformance)?;
        Ok(Self {
            window,
            performance,
            frame: Rc::new(RefCell::new(None)),
        })
    }

    fn frame_slot(&self) -> FrameSlot {
        self.frame.clone()
    }
}

impl FrameHost for WebHost {
    fn now(&self) -> f64 {
        self.performance.now()
    }

    fn request_frame(&mut self) -> Result<FrameHandle, HostError> {
        let slot = self.frame.borrow();
        let callback = slot
            .as_ref()
            .ok_or_else(|| HostError::Unavailable("frame callback not installed".into()))?;
        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map(|id| FrameHandle(id as i64))
            .map_err(|e| HostError::RequestFrame(format!("{e:?}")))
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Err(e) = self.window.cancel_animation_frame(handle.0 as i32) {
            log::warn!("cancelAnimationFrame failed: {e:?}");
        }
    }
}

// ── Entry point ────────────────────────────────────────────────────────────

type Shared<A> = Rc<RefCell<Runner<A, WebHost>>>;

/// Bind to the configured canvas, attach listeners and start the loop.
/// Returns once the first frame is scheduled.
pub fn run<A: DeoApp + 'static>(app: App<A>) -> Result<(), WebError> {
    let config = app.config().clone();
    if logging::init(config.level_filter()).is_err() {
        log::debug!("logger already initialised");
    }

    let window = web_sys::window().ok_or(WebError::NoWindow)?;
    let document = window.document().ok_or(WebError::NoDocument)?;
    let canvas = document
        .get_element_by_id(&config.canvas_id)
        .ok_or_else(|| WebError::CanvasNotFound(config.canvas_id.clone()))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| WebError::NotACanvas(config.canvas_id.clone()))?;

    document.set_title(&config.title);

    let host = WebHost::new(window.clone())?;
    let slot = host.frame_slot();
    let runner: Shared<A> = Rc::new(RefCell::new(app.build(host)?));

    {
        let runner = runner.clone();
        let callback = Closure::wrap(Box::new(move |timestamp: f64| {
            match runner.try_borrow_mut() {
                Ok(mut runner) => {
                    runner.on_frame(timestamp);
                }
                Err(_) => log::warn!("frame callback re-entered; skipped"),
            }
        }) as Box<dyn FnMut(f64)>);
        *slot.borrow_mut() = Some(callback);
    }

    attach_canvas_listeners(&runner, &canvas, &window, &config)?;
    attach_page_listeners(&runner, &window, &document)?;

    with_runner(&runner, |r| {
        r.on_visibility_change(document.hidden());
        r.on_focus_change(document.has_focus().unwrap_or(true));
        r.start();
    });
    log::info!("`{}` running on #{}", config.title, config.canvas_id);
    Ok(())
}

fn with_runner<A: DeoApp>(runner: &Shared<A>, f: impl FnOnce(&mut Runner<A, WebHost>)) {
    match runner.try_borrow_mut() {
        Ok(mut runner) => f(&mut runner),
        Err(_) => log::warn!("event arrived while the runner was busy; dropped"),
    }
}

fn listen(
    target: &EventTarget,
    kind: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), WebError> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target
        .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
        .map_err(js_error)?;
    closure.forget();
    Ok(())
}

/// Content box of the canvas in client pixels: the bounding rect minus
/// borders and padding.
fn canvas_rect(window: &Window, canvas: &HtmlCanvasElement) -> CanvasRect {
    let bounds = canvas.get_bounding_client_rect();
    let style = window.get_computed_style(canvas).ok().flatten();
    let px = |property: &str| -> f64 {
        style
            .as_ref()
            .and_then(|s| s.get_property_value(property).ok())
            .and_then(|v| v.trim().trim_end_matches("px").parse().ok())
            .unwrap_or(0.0)
    };
    let left = px("border-left-width") + px("padding-left");
    let top = px("border-top-width") + px("padding-top");
    let right = px("border-right-width") + px("padding-right");
    let bottom = px("border-bottom-width") + px("padding-bottom");
    CanvasRect::new(
        (bounds.left() + left) as f32,
        (bounds.top() + top) as f32,
        (bounds.width() - left - right) as f32,
        (bounds.height() - top - bottom) as f32,
    )
}

fn attach_canvas_listeners<A: DeoApp + 'static>(
    runner: &Shared<A>,
    canvas: &HtmlCanvasElement,
    window: &Window,
    config: &AppConfig,
) -> Result<(), WebError> {
    let target: &EventTarget = canvas.as_ref();

    for (kind, event) in [
        ("pointerenter", InputEvent::PointerEnter),
        ("pointerleave", InputEvent::PointerLeave),
    ] {
        let runner = runner.clone();
        listen(target, kind, move |_| {
            let event = event.clone();
            with_runner(&runner, |r| r.handle_input(event));
        })?;
    }

    {
        let runner = runner.clone();
        let canvas = canvas.clone();
        let window = window.clone();
        let logical = config.canvas_size();
        listen(target, "pointermove", move |e| {
            let Some(e) = e.dyn_ref::<MouseEvent>() else { return };
            let event = InputEvent::PointerMove {
                client: Vec2::new(e.client_x() as f32, e.client_y() as f32),
                rect: canvas_rect(&window, &canvas),
                logical,
            };
            with_runner(&runner, |r| r.handle_input(event));
        })?;
    }

    for (kind, down) in [("pointerdown", true), ("pointerup", false)] {
        let runner = runner.clone();
        listen(target, kind, move |e| {
            let Some(e) = e.dyn_ref::<MouseEvent>() else { return };
            let button = MouseButton::from_id(e.button().max(0) as u16);
            with_runner(&runner, |r| r.handle_input(InputEvent::MouseButton { button, down }));
        })?;
    }

    {
        let runner = runner.clone();
        listen(target, "wheel", move |e| {
            e.prevent_default();
            let Some(e) = e.dyn_ref::<WheelEvent>() else { return };
            let delta_y = e.delta_y();
            with_runner(&runner, |r| r.handle_input(InputEvent::Wheel { delta_y }));
        })?;
    }

    if !config.show_context_menu {
        listen(target, "contextmenu", |e| e.prevent_default())?;
    }
    Ok(())
}

fn attach_page_listeners<A: DeoApp + 'static>(
    runner: &Shared<A>,
    window: &Window,
    document: &Document,
) -> Result<(), WebError> {
    let window_target: &EventTarget = window.as_ref();

    for (kind, down) in [("keydown", true), ("keyup", false)] {
        let runner = runner.clone();
        listen(window_target, kind, move |e| {
            let Some(e) = e.dyn_ref::<KeyboardEvent>() else { return };
            let event = InputEvent::Key { code: e.code(), down };
            with_runner(&runner, |r| r.handle_input(event));
        })?;
    }

    for (kind, focused) in [("focus", true), ("blur", false)] {
        let runner = runner.clone();
        listen(window_target, kind, move |_| {
            with_runner(&runner, |r| r.on_focus_change(focused));
        })?;
    }

    {
        let runner = runner.clone();
        let doc = document.clone();
        listen(document.as_ref(), "visibilitychange", move |_| {
            let hidden = doc.hidden();
            with_runner(&runner, |r| r.on_visibility_change(hidden));
        })?;
    }
    Ok(())
}

//! Runtime loop for small canvas games built on deolib.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use deo_app::{App, DeoApp, FrameContext, MouseButton};
//!
//! #[derive(Default)]
//! struct Clicker { clicks: u32 }
//!
//! impl DeoApp for Clicker {
//!     fn update(&mut self, ctx: &mut FrameContext) -> anyhow::Result<()> {
//!         if ctx.is_mouse_button_pressed(MouseButton::Left) {
//!             self.clicks += 1;
//!         }
//!         Ok(())
//!     }
//! }
//!
//! // in the wasm entry point
//! App::new(Clicker::default())
//!     .with_title("Clicker")
//!     .with_canvas("canvas")
//!     .run()?;
//! ```
//!
//! Outside the browser the same app runs on a [`ManualHost`] via
//! [`App::build`], which is how the tests drive it frame by frame.

pub mod builder;
pub mod context;
pub mod error;
pub mod host;
pub mod logging;
pub mod runner;
pub mod traits;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use builder::{App, AppConfig};
pub use context::FrameContext;
pub use error::{ConfigError, FrameError, HostError};
pub use host::{FrameHandle, FrameHost, ManualHost};
pub use runner::{ErrorHook, FrameOutcome, RunState, Runner};
pub use traits::{from_fn, DeoApp, FnApp};

// ── Re-export the most-used deo_core items ─────────────────────────────────
// Users can do `use deo_app::{Color, Time, Vec2};` without adding deo_core
// as a direct dependency.
pub use deo_core::{
    CanvasRect, Circle, Color, InputEvent, InputState, MouseButton, Rect, Sides, Time, TimeClock,
};
pub use deo_events::ListenerId;

pub use deo_core::glam::Vec2;

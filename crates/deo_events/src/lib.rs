//! Raw input vocabulary shared by the core, the GUI helpers and the hosts.
//!
//! Hosts (the browser glue in `deo_app::web`, or a test harness) translate
//! whatever the platform delivers into [`InputEvent`] values.  Nothing in
//! this crate holds state about *what is pressed*; that lives in
//! `deo_core::InputState`.

pub mod event;
pub mod listeners;

pub use event::{CanvasRect, InputEvent, MouseButton};
pub use listeners::{InputListeners, ListenerId};

//! deo_core: frame clock, input store and the small value types games use
//! every frame.

pub mod buffered;
pub mod collision;
pub mod color;
pub mod input;
pub mod time;

pub use buffered::{ButtonSet, DoubleBuffered};
pub use collision::{Circle, Rect, Sides};
pub use color::Color;
pub use input::{InputState, KeyboardState, MouseState};
pub use time::{ClockConfig, FpsDisplay, Time, TimeClock};

// re-export the event vocabulary so callers don't need a second dependency
pub use deo_events::{CanvasRect, InputEvent, MouseButton};

pub use glam;

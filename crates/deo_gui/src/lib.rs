pub mod button;
pub mod gui;

pub use button::{Button, ButtonState};
pub use gui::Gui;

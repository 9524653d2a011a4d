use glam::Vec2;

/// Mouse buttons as numbered by the DOM `MouseEvent.button` field.
///
/// Only the first three buttons are tracked by the input store; anything
/// else is carried as [`MouseButton::Other`] so listeners can still see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    Other(u16),
}

impl MouseButton {
    /// Map a DOM button number (`0` left, `1` middle, `2` right).
    pub fn from_id(id: u16) -> Self {
        match id {
            0 => MouseButton::Left,
            1 => MouseButton::Middle,
            2 => MouseButton::Right,
            n => MouseButton::Other(n),
        }
    }

    /// Slot in the tracked button array, `None` for untracked buttons.
    #[inline]
    pub fn index(self) -> Option<usize> {
        match self {
            MouseButton::Left => Some(0),
            MouseButton::Middle => Some(1),
            MouseButton::Right => Some(2),
            MouseButton::Other(_) => None,
        }
    }
}

impl From<u16> for MouseButton {
    fn from(id: u16) -> Self {
        Self::from_id(id)
    }
}

/// Content box of the canvas element in client (CSS) pixels, as reported
/// by `getBoundingClientRect` minus borders and padding.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CanvasRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl CanvasRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    #[inline]
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// A single raw input notification.
///
/// Coordinates are untransformed client pixels; the conversion into logical
/// canvas space happens in the input store, which needs the canvas geometry
/// carried by [`InputEvent::PointerMove`].
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerEnter,
    PointerLeave,
    PointerMove {
        client: Vec2,
        rect: CanvasRect,
        /// Logical canvas size the pointer is mapped into.
        logical: Vec2,
    },
    MouseButton {
        button: MouseButton,
        down: bool,
    },
    /// Keyboard event keyed by the platform code (`KeyboardEvent.code`).
    Key {
        code: String,
        down: bool,
    },
    /// Raw vertical wheel magnitude (`WheelEvent.deltaY`, positive when
    /// scrolling down).
    Wheel {
        delta_y: f64,
    },
}

impl InputEvent {
    pub fn key_down(code: impl Into<String>) -> Self {
        InputEvent::Key { code: code.into(), down: true }
    }

    pub fn key_up(code: impl Into<String>) -> Self {
        InputEvent::Key { code: code.into(), down: false }
    }

    pub fn button_down(button: MouseButton) -> Self {
        InputEvent::MouseButton { button, down: true }
    }

    pub fn button_up(button: MouseButton) -> Self {
        InputEvent::MouseButton { button, down: false }
    }

    /// Pointer move for a canvas displayed 1:1 at the client origin.
    /// Handy for tests and headless scripts.
    pub fn pointer_at(x: f32, y: f32, canvas_size: Vec2) -> Self {
        InputEvent::PointerMove {
            client: Vec2::new(x, y),
            rect: CanvasRect::new(0.0, 0.0, canvas_size.x, canvas_size.y),
            logical: canvas_size,
        }
    }
}

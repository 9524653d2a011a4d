use std::collections::HashMap;

use glam::Vec2;

use crate::buffered::DoubleBuffered;
use deo_events::{CanvasRect, InputEvent, MouseButton};

/// Pointer state in logical canvas coordinates.
#[derive(Debug, Clone)]
pub struct MouseState {
    /// latest position reported by the host, updated on every move event
    raw: Vec2,
    /// position latched at frame start; previous = last frame's latch
    position: DoubleBuffered<Vec2>,
    buttons: DoubleBuffered<[bool; 3]>,
    in_canvas: bool,
    wheel: i8,
}

impl Default for MouseState {
    fn default() -> Self {
        let off_canvas = Vec2::splat(-1.0);
        Self {
            raw: off_canvas,
            position: DoubleBuffered::new(off_canvas),
            buttons: DoubleBuffered::new([false; 3]),
            in_canvas: false,
            wheel: 0,
        }
    }
}

impl MouseState {
    pub fn is_down(&self, button: MouseButton) -> bool {
        button.index().map_or(false, |i| self.buttons.is_down(&i))
    }

    pub fn is_up(&self, button: MouseButton) -> bool {
        button.index().map_or(false, |i| self.buttons.is_up(&i))
    }

    pub fn is_pressed(&self, button: MouseButton) -> bool {
        button.index().map_or(false, |i| self.buttons.is_pressed(&i))
    }

    pub fn is_released(&self, button: MouseButton) -> bool {
        button.index().map_or(false, |i| self.buttons.is_released(&i))
    }

    /// Position latched for the current frame, rounded to whole pixels.
    pub fn position(&self) -> Vec2 {
        self.position.current().round()
    }

    /// Movement between the previous frame's latch and this one.
    pub fn delta(&self) -> Vec2 {
        *self.position.current() - *self.position.previous()
    }

    /// Unlatched position as of the last move event.
    pub fn raw_position(&self) -> Vec2 {
        self.raw
    }

    pub fn in_canvas(&self) -> bool {
        self.in_canvas
    }
}

/// Keyboard state keyed by platform key code (`"KeyA"`, `"ArrowLeft"`).
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    keys: DoubleBuffered<HashMap<String, bool>>,
}

impl KeyboardState {
    pub fn is_down(&self, code: &str) -> bool {
        self.keys.is_down(code)
    }

    pub fn is_up(&self, code: &str) -> bool {
        self.keys.is_up(code)
    }

    pub fn is_pressed(&self, code: &str) -> bool {
        self.keys.is_pressed(code)
    }

    pub fn is_released(&self, code: &str) -> bool {
        self.keys.is_released(code)
    }

    /// Number of key codes seen so far.
    pub fn tracked(&self) -> usize {
        self.keys.current().len()
    }
}

/// State of the keyboard and mouse for the frame in progress.
///
/// Hosts feed raw events through [`InputState::apply`] (or the individual
/// `record_*` helpers) whenever they arrive.  The runner brackets each user
/// callback with [`InputState::begin_frame`] and [`InputState::end_frame`];
/// the latter is the snapshot that makes `is_*_pressed`/`is_*_released`
/// compare against the previous *completed* frame.
///
/// A press and release that both land between two snapshots collapse into
/// the final state: edges are sampled once per frame, never queued.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    mouse: MouseState,
    keyboard: KeyboardState,
}

impl InputState {
    /// Creates a fresh, empty input state.
    pub fn new() -> Self {
        Default::default()
    }

    /// Route a raw event to the matching recorder.
    pub fn apply(&mut self, event: &InputEvent) {
        match event {
            InputEvent::PointerEnter => self.record_pointer_inside(true),
            InputEvent::PointerLeave => self.record_pointer_inside(false),
            InputEvent::PointerMove { client, rect, logical } => {
                self.record_mouse_move(*client, *rect, *logical)
            }
            InputEvent::MouseButton { button, down } => self.record_mouse_button(*button, *down),
            InputEvent::Key { code, down } => self.record_key(code, *down),
            // DOM deltaY is positive when scrolling down, which is -1 here
            InputEvent::Wheel { delta_y } => self.record_wheel(-*delta_y),
        }
    }

    // ── Recorders (called from event handlers) ─────────────────────────────

    /// Convert client coordinates into logical canvas coordinates.
    ///
    /// `rect` is the displayed content box and `logical` the size the game
    /// draws in.  Their ratio undoes CSS scaling of the canvas element; the
    /// backing-store resolution plays no part.
    pub fn record_mouse_move(&mut self, client: Vec2, rect: CanvasRect, logical: Vec2) {
        let shown = rect.size();
        let scale = Vec2::new(
            if shown.x > 0.0 && logical.x > 0.0 { logical.x / shown.x } else { 1.0 },
            if shown.y > 0.0 && logical.y > 0.0 { logical.y / shown.y } else { 1.0 },
        );
        self.mouse.raw = (client - rect.origin()) * scale;
    }

    pub fn record_pointer_inside(&mut self, inside: bool) {
        self.mouse.in_canvas = inside;
    }

    /// Ignored while the pointer is outside the canvas, so a drag released
    /// elsewhere on the page cannot produce a phantom click.
    pub fn record_mouse_button(&mut self, button: MouseButton, down: bool) {
        if !self.mouse.in_canvas {
            return;
        }
        if let Some(i) = button.index() {
            self.mouse.buttons.current_mut()[i] = down;
        }
    }

    pub fn record_key(&mut self, code: &str, down: bool) {
        if code.is_empty() {
            return;
        }
        match self.keyboard.keys.current_mut().get_mut(code) {
            Some(state) => *state = down,
            None => {
                self.keyboard.keys.current_mut().insert(code.to_string(), down);
            }
        }
    }

    /// Store the wheel direction: `+1` for scrolling up, `-1` for down,
    /// taken from the sign of `direction`.  Overwrites any value nobody
    /// consumed yet.
    pub fn record_wheel(&mut self, direction: f64) {
        self.mouse.wheel = if direction > 0.0 {
            1
        } else if direction < 0.0 {
            -1
        } else {
            0
        };
    }

    // ── Frame bracketing (called by the runner) ────────────────────────────

    /// Latch the pointer position for the frame about to run.
    pub fn begin_frame(&mut self) {
        let raw = self.mouse.raw;
        *self.mouse.position.current_mut() = raw;
    }

    /// Snapshot every signal into its previous slot.
    pub fn end_frame(&mut self) {
        self.mouse.buttons.advance();
        self.mouse.position.advance();
        self.keyboard.keys.advance();
    }

    // ── Queries ────────────────────────────────────────────────────────────

    pub fn mouse(&self) -> &MouseState {
        &self.mouse
    }

    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    /// Return and clear the pending wheel direction.  A second call in the
    /// same frame returns 0.
    pub fn consume_wheel(&mut self) -> i8 {
        std::mem::take(&mut self.mouse.wheel)
    }

    pub fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.mouse.is_down(button)
    }

    pub fn is_mouse_button_up(&self, button: MouseButton) -> bool {
        self.mouse.is_up(button)
    }

    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse.is_pressed(button)
    }

    pub fn is_mouse_button_released(&self, button: MouseButton) -> bool {
        self.mouse.is_released(button)
    }

    pub fn is_key_down(&self, code: &str) -> bool {
        self.keyboard.is_down(code)
    }

    pub fn is_key_up(&self, code: &str) -> bool {
        self.keyboard.is_up(code)
    }

    pub fn is_key_pressed(&self, code: &str) -> bool {
        self.keyboard.is_pressed(code)
    }

    pub fn is_key_released(&self, code: &str) -> bool {
        self.keyboard.is_released(code)
    }

    pub fn mouse_position(&self) -> Vec2 {
        self.mouse.position()
    }

    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse.delta()
    }

    pub fn is_mouse_in_canvas(&self) -> bool {
        self.mouse.in_canvas
    }
}

// simple unit tests for the input state implementation
#[cfg(test)]
mod tests {
    use super::*;

    const LEFT: MouseButton = MouseButton::Left;

    fn entered() -> InputState {
        let mut state = InputState::new();
        state.record_pointer_inside(true);
        state
    }

    #[test]
    fn key_tracking() {
        let mut state = InputState::new();
        assert!(!state.is_key_down("KeyA"));
        assert!(!state.is_key_up("KeyA"));
        state.record_key("KeyA", true);
        assert!(state.is_key_down("KeyA"));
        assert!(state.is_key_pressed("KeyA"));
        state.end_frame();
        assert!(!state.is_key_pressed("KeyA"));
        state.record_key("KeyA", false);
        assert!(state.is_key_up("KeyA"));
        assert!(state.is_key_released("KeyA"));
        state.end_frame();
        assert!(!state.is_key_released("KeyA"));
        assert_eq!(state.keyboard().tracked(), 1);
    }

    #[test]
    fn empty_key_code_is_ignored() {
        let mut state = InputState::new();
        state.record_key("", true);
        assert_eq!(state.keyboard().tracked(), 0);
    }

    #[test]
    fn unknown_ids_are_false() {
        let state = InputState::new();
        assert!(!state.is_key_down("NeverPressedKey"));
        assert!(!state.is_key_pressed("NeverPressedKey"));
        assert!(!state.is_mouse_button_pressed(MouseButton::from_id(99)));
        assert!(!state.is_mouse_button_released(MouseButton::from_id(99)));
        assert!(!state.is_mouse_button_up(MouseButton::Other(99)));
    }

    #[test]
    fn button_edges_over_frames() {
        // up, up, down, down, up
        let frames = [false, false, true, true, false];
        let mut state = entered();
        let mut pressed = Vec::new();
        let mut released = Vec::new();
        for down in frames {
            state.record_mouse_button(LEFT, down);
            pressed.push(state.is_mouse_button_pressed(LEFT));
            released.push(state.is_mouse_button_released(LEFT));
            state.end_frame();
        }
        assert_eq!(pressed, [false, false, true, false, false]);
        assert_eq!(released, [false, false, false, false, true]);
    }

    #[test]
    fn buttons_ignored_outside_canvas() {
        let mut state = InputState::new();
        state.record_mouse_button(LEFT, true);
        assert!(!state.is_mouse_button_down(LEFT));

        state.record_pointer_inside(true);
        state.record_mouse_button(LEFT, true);
        assert!(state.is_mouse_button_down(LEFT));

        // release happens after leaving: the button stays down
        state.record_pointer_inside(false);
        state.record_mouse_button(LEFT, false);
        assert!(state.is_mouse_button_down(LEFT));
    }

    #[test]
    fn press_and_release_within_one_frame_coalesce() {
        let mut state = entered();
        state.record_mouse_button(LEFT, true);
        state.record_mouse_button(LEFT, false);
        assert!(!state.is_mouse_button_pressed(LEFT));
        assert!(!state.is_mouse_button_released(LEFT));
    }

    #[test]
    fn wheel_is_consumed_once() {
        let mut state = InputState::new();
        state.record_wheel(1.0);
        assert_eq!(state.consume_wheel(), 1);
        assert_eq!(state.consume_wheel(), 0);

        state.record_wheel(-1.0);
        state.record_wheel(0.0);
        assert_eq!(state.consume_wheel(), 0);

        state.record_wheel(-3.0);
        assert_eq!(state.consume_wheel(), -1);
    }

    #[test]
    fn dom_wheel_delta_is_flipped_into_a_direction() {
        let mut state = InputState::new();
        // scrolling down
        state.apply(&InputEvent::Wheel { delta_y: 53.0 });
        assert_eq!(state.consume_wheel(), -1);
        state.apply(&InputEvent::Wheel { delta_y: -120.0 });
        assert_eq!(state.consume_wheel(), 1);
    }

    #[test]
    fn mouse_move_maps_into_logical_space() {
        let mut state = InputState::new();
        // 800x450 logical canvas displayed at 400x225 css px
        state.record_mouse_move(
            Vec2::new(110.0, 70.0),
            CanvasRect::new(10.0, 20.0, 400.0, 225.0),
            Vec2::new(800.0, 450.0),
        );
        assert_eq!(state.mouse().raw_position(), Vec2::new(200.0, 100.0));

        // degenerate geometry falls back to 1:1
        state.record_mouse_move(Vec2::new(5.0, 6.0), CanvasRect::default(), Vec2::ZERO);
        assert_eq!(state.mouse().raw_position(), Vec2::new(5.0, 6.0));
    }

    #[test]
    fn unscaled_canvas_on_high_dpi_maps_one_to_one() {
        // <canvas width=800 height=450> shown at its natural size on a dpr-2
        // screen: the backing store was never scaled, the mapping stays 1:1
        let mut state = InputState::new();
        let logical = Vec2::new(800.0, 450.0);
        state.apply(&InputEvent::PointerMove {
            client: Vec2::new(400.0, 225.0),
            rect: CanvasRect::new(0.0, 0.0, 800.0, 450.0),
            logical,
        });
        assert_eq!(state.mouse().raw_position(), Vec2::new(400.0, 225.0));
    }

    #[test]
    fn position_is_latched_per_frame() {
        let size = Vec2::new(800.0, 450.0);
        let mut state = InputState::new();
        state.apply(&InputEvent::pointer_at(10.4, 20.6, size));
        state.begin_frame();
        state.end_frame();

        state.apply(&InputEvent::pointer_at(15.0, 25.0, size));
        // not visible until the next frame starts
        assert_eq!(state.mouse_position(), Vec2::new(10.0, 21.0));
        state.begin_frame();
        assert_eq!(state.mouse_position(), Vec2::new(15.0, 25.0));
        let d = state.mouse_delta();
        assert!((d.x - 4.6).abs() < 1e-4 && (d.y - 4.4).abs() < 1e-4);
    }

    #[test]
    fn apply_routes_events() {
        let mut state = InputState::new();
        state.apply(&InputEvent::PointerEnter);
        assert!(state.is_mouse_in_canvas());
        state.apply(&InputEvent::button_down(MouseButton::Right));
        state.apply(&InputEvent::key_down("Space"));
        state.apply(&InputEvent::Wheel { delta_y: -1.0 });
        assert!(state.is_mouse_button_down(MouseButton::Right));
        assert!(state.is_key_down("Space"));
        assert_eq!(state.consume_wheel(), 1);
        state.apply(&InputEvent::PointerLeave);
        assert!(!state.is_mouse_in_canvas());
    }
}

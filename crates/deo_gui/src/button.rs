use deo_core::collision::{check_point_rect, Rect};
use deo_core::{InputState, MouseButton};

/// Visual state the button would be drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Normal,
    /// hovered
    Focused,
    Pressed,
    Disabled,
}

/// Immediate-mode push button.
///
/// Call [`Button::update`] once per frame with the frame's input; it returns
/// `true` on the frame a click completes.  A click is a left press that
/// starts inside the bounds followed by a release that also happens inside.
/// Drawing is left to the caller, who picks colours from [`Button::state`].
#[derive(Debug, Clone)]
pub struct Button {
    pub bounds: Rect,
    pub label: String,
    disabled: bool,
    pressed_inside: bool,
    clicked: bool,
    state: ButtonState,
}

impl Button {
    pub fn new(bounds: Rect, label: impl Into<String>) -> Self {
        Self {
            bounds,
            label: label.into(),
            disabled: false,
            pressed_inside: false,
            clicked: false,
            state: ButtonState::Normal,
        }
    }

    pub fn enable(&mut self) {
        self.disabled = false;
    }

    pub fn disable(&mut self) {
        self.disabled = true;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Whether the last `update` completed a click.
    pub fn clicked(&self) -> bool {
        self.clicked
    }

    /// Hit test against a point in canvas space.
    pub fn hit(&self, point: glam::Vec2) -> bool {
        check_point_rect(point, &self.bounds)
    }

    pub fn update(&mut self, input: &InputState) -> bool {
        let over = self.hit(input.mouse_position());
        let down = input.is_mouse_button_down(MouseButton::Left);

        self.clicked = false;
        if self.disabled {
            self.pressed_inside = false;
        } else {
            if input.is_mouse_button_pressed(MouseButton::Left) && over {
                self.pressed_inside = true;
            }
            if input.is_mouse_button_released(MouseButton::Left) {
                self.clicked = self.pressed_inside && over;
                self.pressed_inside = false;
            }
            if !down {
                self.pressed_inside = false;
            }
        }

        self.state = if self.disabled {
            ButtonState::Disabled
        } else if self.pressed_inside {
            ButtonState::Pressed
        } else if over {
            ButtonState::Focused
        } else {
            ButtonState::Normal
        };
        self.clicked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deo_core::glam::Vec2;
    use deo_core::InputEvent;

    const CANVAS: Vec2 = Vec2::new(800.0, 450.0);

    fn frame(input: &mut InputState, button: &mut Button, events: &[InputEvent]) -> bool {
        for e in events {
            input.apply(e);
        }
        input.begin_frame();
        let clicked = button.update(input);
        input.end_frame();
        clicked
    }

    fn setup() -> (InputState, Button) {
        let mut input = InputState::new();
        input.apply(&InputEvent::PointerEnter);
        (input, Button::new(Rect::new(10.0, 10.0, 100.0, 30.0), "Play"))
    }

    #[test]
    fn press_and_release_inside_clicks() {
        let (mut input, mut button) = setup();
        assert!(!frame(&mut input, &mut button, &[InputEvent::pointer_at(50.0, 20.0, CANVAS)]));
        assert_eq!(button.state(), ButtonState::Focused);

        assert!(!frame(&mut input, &mut button, &[InputEvent::button_down(MouseButton::Left)]));
        assert_eq!(button.state(), ButtonState::Pressed);

        assert!(frame(&mut input, &mut button, &[InputEvent::button_up(MouseButton::Left)]));
        assert!(button.clicked());
        assert!(!frame(&mut input, &mut button, &[]));
    }

    #[test]
    fn release_outside_cancels() {
        let (mut input, mut button) = setup();
        frame(&mut input, &mut button, &[
            InputEvent::pointer_at(50.0, 20.0, CANVAS),
            InputEvent::button_down(MouseButton::Left),
        ]);
        assert_eq!(button.state(), ButtonState::Pressed);
        let clicked = frame(&mut input, &mut button, &[
            InputEvent::pointer_at(400.0, 300.0, CANVAS),
            InputEvent::button_up(MouseButton::Left),
        ]);
        assert!(!clicked);
        assert_eq!(button.state(), ButtonState::Normal);
    }

    #[test]
    fn press_started_outside_does_not_click() {
        let (mut input, mut button) = setup();
        frame(&mut input, &mut button, &[
            InputEvent::pointer_at(400.0, 300.0, CANVAS),
            InputEvent::button_down(MouseButton::Left),
        ]);
        let clicked = frame(&mut input, &mut button, &[
            InputEvent::pointer_at(50.0, 20.0, CANVAS),
            InputEvent::button_up(MouseButton::Left),
        ]);
        assert!(!clicked);
    }

    #[test]
    fn disabled_button_never_clicks() {
        let (mut input, mut button) = setup();
        button.disable();
        frame(&mut input, &mut button, &[
            InputEvent::pointer_at(50.0, 20.0, CANVAS),
            InputEvent::button_down(MouseButton::Left),
        ]);
        assert_eq!(button.state(), ButtonState::Disabled);
        assert!(!frame(&mut input, &mut button, &[InputEvent::button_up(MouseButton::Left)]));

        button.enable();
        frame(&mut input, &mut button, &[]);
        assert_eq!(button.state(), ButtonState::Focused);
    }
}

//! Immediate-mode front end for [`Button`].
//!
//! Game code calls `gui.button(bounds, "Play", input)` every frame as if the
//! button were stateless; the cache keeps the widget alive between calls so
//! press/release tracking still works.

use std::collections::HashMap;

use deo_core::{InputState, Rect};

use crate::button::{Button, ButtonState};

/// Buttons are found by their floored top-left corner, then by label.
type Slot = (i32, i32);

fn slot(bounds: &Rect) -> Slot {
    (bounds.x.floor() as i32, bounds.y.floor() as i32)
}

#[derive(Debug, Default)]
pub struct Gui {
    buttons: HashMap<Slot, Vec<Button>>,
}

impl Gui {
    pub fn new() -> Self {
        Default::default()
    }

    /// Update the button at `bounds` labelled `label`, creating it on first
    /// use.  Returns `true` on the frame a click completes.
    pub fn button(&mut self, bounds: Rect, label: &str, input: &InputState) -> bool {
        let list = self.buttons.entry(slot(&bounds)).or_default();
        let index = match list.iter().position(|b| b.label == label) {
            Some(i) => i,
            None => {
                list.push(Button::new(bounds, label));
                list.len() - 1
            }
        };
        list[index].update(input)
    }

    /// State of a cached button, `None` if it was never drawn.
    pub fn state(&self, bounds: Rect, label: &str) -> Option<ButtonState> {
        self.get(bounds, label).map(Button::state)
    }

    pub fn get(&self, bounds: Rect, label: &str) -> Option<&Button> {
        self.buttons.get(&slot(&bounds))?.iter().find(|b| b.label == label)
    }

    pub fn get_mut(&mut self, bounds: Rect, label: &str) -> Option<&mut Button> {
        self.buttons
            .get_mut(&slot(&bounds))?
            .iter_mut()
            .find(|b| b.label == label)
    }

    /// Forget every cached button, e.g. when switching screens.
    pub fn clear(&mut self) {
        self.buttons.clear();
    }

    pub fn len(&self) -> usize {
        self.buttons.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deo_core::glam::Vec2;
    use deo_core::{InputEvent, MouseButton};

    const CANVAS: Vec2 = Vec2::new(800.0, 450.0);
    const PLAY: Rect = Rect::new(10.0, 10.0, 100.0, 30.0);

    fn frame(input: &mut InputState, gui: &mut Gui, events: &[InputEvent]) -> bool {
        for e in events {
            input.apply(e);
        }
        input.begin_frame();
        let clicked = gui.button(PLAY, "Play", input);
        input.end_frame();
        clicked
    }

    fn entered() -> InputState {
        let mut input = InputState::new();
        input.apply(&InputEvent::PointerEnter);
        input
    }

    #[test]
    fn click_survives_across_frames() {
        let mut input = entered();
        let mut gui = Gui::new();
        assert!(!frame(&mut input, &mut gui, &[InputEvent::pointer_at(50.0, 20.0, CANVAS)]));
        assert!(!frame(&mut input, &mut gui, &[InputEvent::button_down(MouseButton::Left)]));
        assert_eq!(gui.state(PLAY, "Play"), Some(ButtonState::Pressed));
        assert!(frame(&mut input, &mut gui, &[InputEvent::button_up(MouseButton::Left)]));
        assert_eq!(gui.len(), 1);
    }

    #[test]
    fn labels_at_the_same_corner_are_separate() {
        let input = InputState::new();
        let mut gui = Gui::new();
        gui.button(PLAY, "Play", &input);
        gui.button(PLAY, "Quit", &input);
        // sub-pixel offset lands in the same slot
        gui.button(Rect::new(10.7, 10.2, 100.0, 30.0), "Play", &input);
        assert_eq!(gui.len(), 2);
        assert!(gui.get(PLAY, "Quit").is_some());
        assert_eq!(gui.state(PLAY, "Options"), None);
    }

    #[test]
    fn disabled_through_get_mut() {
        let input = InputState::new();
        let mut gui = Gui::new();
        gui.button(PLAY, "Play", &input);
        gui.get_mut(PLAY, "Play").unwrap().disable();
        gui.button(PLAY, "Play", &input);
        assert_eq!(gui.state(PLAY, "Play"), Some(ButtonState::Disabled));
    }

    #[test]
    fn clear_drops_pending_presses() {
        let mut input = entered();
        let mut gui = Gui::new();
        frame(&mut input, &mut gui, &[InputEvent::pointer_at(50.0, 20.0, CANVAS)]);
        frame(&mut input, &mut gui, &[InputEvent::button_down(MouseButton::Left)]);

        gui.clear();
        assert!(gui.is_empty());
        // a fresh button never saw the press, so the release is not a click
        assert!(!frame(&mut input, &mut gui, &[InputEvent::button_up(MouseButton::Left)]));
    }
}

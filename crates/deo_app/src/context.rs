use deo_core::glam::Vec2;
use deo_core::{InputState, MouseButton, Rect, Time};

/// Per-frame context passed to every [`DeoApp`](crate::DeoApp) callback.
///
/// `FrameContext` bundles the clock snapshot and the input store so game
/// code can stay terse:
///
/// ```rust,ignore
/// fn update(&mut self, ctx: &mut FrameContext) -> anyhow::Result<()> {
///     self.ball.center += self.velocity * ctx.time.delta;
///     if ctx.is_mouse_button_pressed(MouseButton::Left) {
///         self.score += 1;
///     }
///     Ok(())
/// }
/// ```
pub struct FrameContext<'a> {
    /// Frame timing: delta, elapsed, frame number, FPS.
    pub time: Time,

    // mutable only so the wheel can be consumed; everything else is read
    input: &'a mut InputState,
    canvas_size: Vec2,
    displayed_fps: u32,
}

impl<'a> FrameContext<'a> {
    pub(crate) fn new(
        time: Time,
        input: &'a mut InputState,
        canvas_size: Vec2,
        displayed_fps: u32,
    ) -> Self {
        Self { time, input, canvas_size, displayed_fps }
    }

    /// Keyboard and mouse state for this frame.
    pub fn input(&self) -> &InputState {
        &*self.input
    }

    /// Pending wheel direction (`-1`, `0`, `+1`); reading it clears it.
    pub fn consume_wheel(&mut self) -> i8 {
        self.input.consume_wheel()
    }

    // ── Input shortcuts ────────────────────────────────────────────────────

    #[inline]
    pub fn is_key_down(&self, code: &str) -> bool {
        self.input.is_key_down(code)
    }

    #[inline]
    pub fn is_key_pressed(&self, code: &str) -> bool {
        self.input.is_key_pressed(code)
    }

    #[inline]
    pub fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.input.is_mouse_button_down(button)
    }

    #[inline]
    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.input.is_mouse_button_pressed(button)
    }

    /// Pointer position latched for this frame, in canvas pixels.
    #[inline]
    pub fn mouse_position(&self) -> Vec2 {
        self.input.mouse_position()
    }

    // ── Timing shortcuts ───────────────────────────────────────────────────

    #[inline]
    pub fn delta(&self) -> f32 {
        self.time.delta
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.time.fps
    }

    /// FPS value meant for an on-screen counter; refreshed on an interval
    /// rather than every frame.
    #[inline]
    pub fn displayed_fps(&self) -> u32 {
        self.displayed_fps
    }

    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.time.elapsed
    }

    // ── Canvas geometry ────────────────────────────────────────────────────

    /// Logical canvas width in pixels.
    #[inline]
    pub fn width(&self) -> f32 {
        self.canvas_size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.canvas_size.y
    }

    pub fn canvas_rect(&self) -> Rect {
        Rect::from_min_size(Vec2::ZERO, self.canvas_size)
    }

    pub fn canvas_center(&self) -> Vec2 {
        (self.canvas_size * 0.5).floor()
    }
}

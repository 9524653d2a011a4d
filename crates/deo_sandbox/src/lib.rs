//! "Ball timer": keep the pointer on a wandering ball for as long as you
//! can.  The timer runs while the pointer is over the ball and the best run
//! is kept until the reset button is clicked.
//!
//! Drawing is out of scope for deolib, so each frame produces a [`Hud`]
//! describing what would be drawn.  The native binary logs it; the browser
//! build just runs the loop.

use deo_app::{Circle, Color, DeoApp, FrameContext, Rect, Vec2};
use deo_core::collision::{check_point_circle, circle_bounds};
use deo_gui::{ButtonState, Gui};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const CANVAS_WIDTH: u32 = 800;
pub const CANVAS_HEIGHT: u32 = 450;

const BALL_RADIUS: f32 = 48.0;
/// Pixels per second along each axis.
const BALL_SPEED: Vec2 = Vec2::new(120.0, 60.0);
const MAX_TIMER: f32 = 99.99;

pub const RESET_BOUNDS: Rect = Rect::new(
    CANVAS_WIDTH as f32 - 135.0,
    CANVAS_HEIGHT as f32 - 45.0,
    120.0,
    30.0,
);
const RESET_LABEL: &str = "Reset best";

/// What the frame would put on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub background: Color,
    /// Centered timer text while hovering.
    pub timer_text: Option<String>,
    pub font_size: f32,
    pub ring: Color,
    pub best_text: String,
    pub fps: u32,
    pub reset: ButtonState,
}

impl Default for Hud {
    fn default() -> Self {
        Self {
            background: Color::COAL,
            timer_text: None,
            font_size: 0.0,
            ring: Color::RED,
            best_text: best_label(0.0),
            fps: 0,
            reset: ButtonState::Normal,
        }
    }
}

fn best_label(best: f32) -> String {
    format!("Best: {best:.2}s")
}

pub struct BallTimer {
    pub ball: Circle,
    velocity: Vec2,
    angle: f32,
    timer: f32,
    best: f32,
    gui: Gui,
    rng: StdRng,
    hud: Hud,
}

impl BallTimer {
    /// Deterministic wander, for scripted runs and tests.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    fn with_rng(rng: StdRng) -> Self {
        let center = Vec2::new(CANVAS_WIDTH as f32, CANVAS_HEIGHT as f32) * 0.5;
        Self {
            ball: Circle::new(center, BALL_RADIUS),
            velocity: BALL_SPEED,
            angle: 0.0,
            timer: 0.0,
            best: 0.0,
            gui: Gui::new(),
            rng,
            hud: Hud::default(),
        }
    }

    pub fn timer(&self) -> f32 {
        self.timer
    }

    pub fn best(&self) -> f32 {
        self.best
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    pub fn gui(&self) -> &Gui {
        &self.gui
    }

    fn wander(&mut self, ctx: &FrameContext) {
        self.angle += self.rng.gen_range(-0.1..0.1);
        let heading = Vec2::new(self.angle.sin(), self.angle.cos());
        self.ball.center += heading * self.velocity * ctx.delta();

        let edges = circle_bounds(&self.ball, &ctx.canvas_rect());
        if edges.horizontal() {
            self.velocity.x = -self.velocity.x;
        }
        if edges.vertical() {
            self.velocity.y = -self.velocity.y;
        }
    }
}

impl DeoApp for BallTimer {
    fn setup(&mut self, ctx: &mut FrameContext) -> anyhow::Result<()> {
        self.ball.center = ctx.canvas_center();
        log::info!("ball timer on a {}x{} canvas", ctx.width(), ctx.height());
        Ok(())
    }

    fn update(&mut self, ctx: &mut FrameContext) -> anyhow::Result<()> {
        self.wander(ctx);

        let hovering = ctx.input().is_mouse_in_canvas()
            && check_point_circle(ctx.mouse_position(), &self.ball);
        if hovering {
            self.timer = (self.timer + ctx.delta()).min(MAX_TIMER);
            self.hud.timer_text = Some(format!("{:.2}s", self.timer));
            self.hud.font_size = (self.timer * 30.0).min(ctx.width() * 0.2);
            self.hud.ring = Color::GREEN;
        } else {
            if self.timer > self.best {
                self.best = self.timer;
                log::info!("new best: {:.2}s", self.best);
            }
            self.timer = 0.0;
            self.hud.timer_text = None;
            self.hud.ring = Color::RED;
        }

        if self.gui.button(RESET_BOUNDS, RESET_LABEL, ctx.input()) {
            self.best = 0.0;
            log::info!("best time reset");
        }

        self.hud.best_text = best_label(self.best);
        self.hud.fps = ctx.displayed_fps();
        self.hud.reset = self.gui.state(RESET_BOUNDS, RESET_LABEL).unwrap_or_default();
        Ok(())
    }

    fn on_pause(&mut self) {
        log::debug!("paused with {:.2}s on the timer", self.timer);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() -> Result<(), wasm_bindgen::JsValue> {
    deo_app::App::new(BallTimer::from_entropy())
        .with_title("Basic example")
        .with_size(CANVAS_WIDTH, CANVAS_HEIGHT)
        .run()
        .map_err(|e| wasm_bindgen::JsValue::from_str(&e.to_string()))
}

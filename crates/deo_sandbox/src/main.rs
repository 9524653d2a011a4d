//! Headless run of the ball timer on synthetic time.
//!
//! `deo_sandbox [config.toml]` plays a scripted session: the pointer follows
//! the ball for two seconds, wanders off, comes back, and the tab is hidden
//! for a while in between.  Everything interesting shows up in the log.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use deo_app::{App, AppConfig, InputEvent, ManualHost, Runner};
    use deo_sandbox::{BallTimer, CANVAS_HEIGHT, CANVAS_WIDTH};

    const REFRESH_MS: f64 = 1000.0 / 60.0;

    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::load(&path).with_context(|| format!("loading {path}"))?,
        None => AppConfig {
            title: "Basic example".to_string(),
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            ..Default::default()
        },
    };
    deo_app::logging::init(config.level_filter())?;
    log::info!("starting `{}`", config.title);

    let canvas = config.canvas_size();
    let mut runner = App::new(BallTimer::seeded(42))
        .with_config(config)
        .build(ManualHost::new())?;
    runner.start();
    runner.handle_input(InputEvent::PointerEnter);

    let follow = |runner: &mut Runner<BallTimer, ManualHost>, frames: usize| {
        for _ in 0..frames {
            let c = runner.app().ball.center;
            runner.handle_input(InputEvent::pointer_at(c.x, c.y, canvas));
            runner.step(REFRESH_MS);
        }
    };

    follow(&mut runner, 120);
    runner.handle_input(InputEvent::pointer_at(10.0, 10.0, canvas));
    for _ in 0..30 {
        runner.step(REFRESH_MS);
    }

    // tab hidden for five seconds
    runner.on_visibility_change(true);
    runner.host_mut().advance(5000.0);
    runner.on_visibility_change(false);

    follow(&mut runner, 60);
    runner.handle_input(InputEvent::PointerLeave);
    runner.handle_input(InputEvent::pointer_at(-5.0, -5.0, canvas));
    runner.step(REFRESH_MS);

    let app = runner.app();
    log::info!(
        "{} frames, {} | fps {:.1} | ball at {}",
        runner.clock().frame_count(),
        app.hud().best_text,
        runner.clock().fps(),
        app.ball.center.round(),
    );
    if runner.failures() > 0 {
        log::warn!("{} frame(s) failed", runner.failures());
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}

//! Frame scheduler and visibility monitor.
//!
//! The runner is a small state machine:
//!
//! ```text
//!   Idle ──start()──▶ Running ◀──visible──▶ Paused
//!                       │  ▲       hidden
//!                       └──┘ on_frame()
//! ```
//!
//! Each `on_frame` ticks the clock, latches input, calls the app exactly
//! once, snapshots input and asks the host for the next frame.  Hiding the
//! page cancels the pending request; showing it again restarts delta
//! measurement from "now" so the hidden interval never reaches the game as
//! one giant step.  No catch-up frames are produced.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use deo_core::{FpsDisplay, InputEvent, InputState, Time, TimeClock};
use deo_events::{InputListeners, ListenerId};

use crate::builder::AppConfig;
use crate::context::FrameContext;
use crate::error::FrameError;
use crate::host::{FrameHandle, FrameHost, ManualHost};
use crate::traits::DeoApp;

/// Receives every contained callback failure.
pub type ErrorHook = Box<dyn FnMut(&FrameError)>;

/// Slack when comparing frame spacing against the target interval, so a
/// 60 Hz display hits a 30 fps target on every second refresh.
const FRAME_SKIP_TOLERANCE_MS: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Paused,
}

/// What a single `on_frame` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The callback ran and returned `Ok`.
    Completed,
    /// The callback ran and failed; the failure was reported.
    Failed,
    /// Too early for the target frame rate; callback not invoked.
    Skipped,
    /// The runner was not running (late callback after a cancel).
    Ignored,
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Setup,
    Update,
}

impl Phase {
    fn name(self) -> &'static str {
        match self {
            Phase::Setup => "setup",
            Phase::Update => "update",
        }
    }
}

pub struct Runner<A: DeoApp, H: FrameHost> {
    app: A,
    host: H,
    config: AppConfig,
    state: RunState,
    pending: Option<FrameHandle>,
    hidden: bool,
    focused: bool,
    clock: TimeClock,
    fps_display: FpsDisplay,
    input: InputState,
    listeners: InputListeners,
    error_hook: Option<ErrorHook>,
    last_invoked_ms: Option<f64>,
    failures: u64,
}

impl<A: DeoApp, H: FrameHost> Runner<A, H> {
    pub fn new(app: A, config: AppConfig, host: H) -> Self {
        let clock = TimeClock::with_config(host.now(), config.clock);
        let fps_display = FpsDisplay::new(config.fps_display_interval_ms);
        Self {
            app,
            host,
            config,
            state: RunState::Idle,
            pending: None,
            hidden: false,
            focused: true,
            clock,
            fps_display,
            input: InputState::new(),
            listeners: InputListeners::new(),
            error_hook: None,
            last_invoked_ms: None,
            failures: 0,
        }
    }

    pub fn set_error_hook(&mut self, hook: ErrorHook) {
        self.error_hook = Some(hook);
    }

    // ── Lifecycle ──────────────────────────────────────────────────────────

    /// Run `setup` and request the first frame.  If the page is already
    /// hidden the runner goes straight to `Paused`.
    pub fn start(&mut self) {
        if self.state != RunState::Idle {
            log::warn!("runner already started; ignoring start()");
            return;
        }

        let time = self.clock.time();
        if let Err(err) = self.invoke(Phase::Setup, time) {
            self.report(err);
        }

        self.clock.resume(self.host.now());
        if self.should_pause() {
            self.state = RunState::Paused;
            log::debug!("runner started while inactive; paused");
        } else {
            self.state = RunState::Running;
            log::debug!("runner started");
            self.schedule();
        }
    }

    /// Entry point for the host's frame callback.
    pub fn on_frame(&mut self, timestamp_ms: f64) -> FrameOutcome {
        // the request that brought us here has fired
        self.pending = None;
        if self.state != RunState::Running {
            return FrameOutcome::Ignored;
        }

        if let (Some(interval), Some(last)) =
            (self.config.target_frame_interval_ms(), self.last_invoked_ms)
        {
            if timestamp_ms - last + FRAME_SKIP_TOLERANCE_MS < interval {
                self.schedule();
                return FrameOutcome::Skipped;
            }
        }
        self.last_invoked_ms = Some(timestamp_ms);

        self.clock.tick(timestamp_ms);
        let time = self.clock.time();
        self.input.begin_frame();
        let result = self.invoke(Phase::Update, time);
        // snapshot even after a failure so edges don't stick for a frame
        self.input.end_frame();

        let outcome = match result {
            Ok(()) => FrameOutcome::Completed,
            Err(err) => {
                self.report(err);
                FrameOutcome::Failed
            }
        };

        if self.state == RunState::Running {
            self.schedule();
        }
        outcome
    }

    /// Page visibility changed (`document.hidden`).
    pub fn on_visibility_change(&mut self, hidden: bool) {
        self.hidden = hidden;
        self.sync_activity();
    }

    /// Window focus changed.  Only pauses when `pause_on_blur` is set.
    pub fn on_focus_change(&mut self, focused: bool) {
        self.focused = focused;
        self.sync_activity();
    }

    fn should_pause(&self) -> bool {
        self.hidden || (self.config.pause_on_blur && !self.focused)
    }

    fn sync_activity(&mut self) {
        match (self.state, self.should_pause()) {
            (RunState::Running, true) => self.pause(),
            (RunState::Paused, false) => self.resume(),
            _ => {}
        }
    }

    fn pause(&mut self) {
        self.state = RunState::Paused;
        if let Some(handle) = self.pending.take() {
            self.host.cancel_frame(handle);
        }
        log::debug!("paused after {} frames", self.clock.frame_count());
        self.app.on_pause();
    }

    fn resume(&mut self) {
        let now = self.host.now();
        self.clock.resume(now);
        self.last_invoked_ms = None;
        self.state = RunState::Running;
        log::debug!("resumed at {now:.1} ms");
        self.app.on_resume();
        self.schedule();
    }

    fn schedule(&mut self) {
        if self.pending.is_some() {
            return;
        }
        match self.host.request_frame() {
            Ok(handle) => self.pending = Some(handle),
            Err(err) => log::error!("{err}; frame loop stalled"),
        }
    }

    // ── Callback invocation ────────────────────────────────────────────────

    fn invoke(&mut self, phase: Phase, time: Time) -> Result<(), FrameError> {
        let shown = match phase {
            Phase::Update => self.fps_display.update(time.delta, time.fps),
            Phase::Setup => self.fps_display.shown(),
        };
        let app = &mut self.app;
        let mut ctx = FrameContext::new(time, &mut self.input, self.config.canvas_size(), shown);

        let result = panic::catch_unwind(AssertUnwindSafe(|| match phase {
            Phase::Setup => app.setup(&mut ctx),
            Phase::Update => app.update(&mut ctx),
        }));

        let frame = time.frame_count;
        match result {
            Ok(Ok(())) => Ok(()),
            Ok(Err(source)) => Err(FrameError::Callback { frame, phase: phase.name(), source }),
            Err(payload) => Err(FrameError::Panic {
                frame,
                phase: phase.name(),
                message: panic_message(payload.as_ref()),
            }),
        }
    }

    fn report(&mut self, err: FrameError) {
        self.failures += 1;
        log::error!("{err}");
        if let Some(hook) = self.error_hook.as_mut() {
            hook(&err);
        }
    }

    // ── Input ──────────────────────────────────────────────────────────────

    /// Feed a raw event: the input store sees it first, then every
    /// subscribed listener in subscription order.
    pub fn handle_input(&mut self, event: InputEvent) {
        self.input.apply(&event);
        self.listeners.dispatch(&event);
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&InputEvent) + 'static,
    {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    // ── Accessors ──────────────────────────────────────────────────────────

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn clock(&self) -> &TimeClock {
        &self.clock
    }

    /// Seconds since the runner was created, measured now.
    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed(self.host.now())
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn app(&self) -> &A {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut A {
        &mut self.app
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Number of contained callback failures so far.
    pub fn failures(&self) -> u64 {
        self.failures
    }
}

impl<A: DeoApp> Runner<A, ManualHost> {
    /// Fire the pending frame (if any) at the host's current time.
    pub fn pump(&mut self) -> Option<FrameOutcome> {
        self.host.take_pending()?;
        let now = self.host.now();
        Some(self.on_frame(now))
    }

    /// Advance synthetic time by `ms` and fire the pending frame.
    pub fn step(&mut self, ms: f64) -> Option<FrameOutcome> {
        self.host.advance(ms);
        self.pump()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::from_fn;

    fn idle_app_runner(config: AppConfig) -> Runner<impl DeoApp, ManualHost> {
        Runner::new(from_fn(|_ctx| Ok(())), config, ManualHost::new())
    }

    #[test]
    fn idle_until_started() {
        let mut runner = idle_app_runner(AppConfig::default());
        assert_eq!(runner.state(), RunState::Idle);
        assert_eq!(runner.step(16.0), None);
        assert_eq!(runner.on_frame(16.0), FrameOutcome::Ignored);

        runner.start();
        assert_eq!(runner.state(), RunState::Running);
        assert!(runner.pending_frame().is_some());
        assert_eq!(runner.step(16.0), Some(FrameOutcome::Completed));
        assert_eq!(runner.clock().frame_count(), 1);
    }

    #[test]
    fn hidden_at_start_stays_paused() {
        let mut runner = idle_app_runner(AppConfig::default());
        runner.on_visibility_change(true);
        runner.start();
        assert_eq!(runner.state(), RunState::Paused);
        assert_eq!(runner.host().requested(), 0);

        runner.on_visibility_change(false);
        assert_eq!(runner.state(), RunState::Running);
        assert_eq!(runner.host().requested(), 1);
    }

    #[test]
    fn hiding_cancels_pending_frame() {
        let mut runner = idle_app_runner(AppConfig::default());
        runner.start();
        runner.step(16.0);
        runner.on_visibility_change(true);
        assert_eq!(runner.state(), RunState::Paused);
        assert_eq!(runner.pending_frame(), None);
        assert_eq!(runner.host().cancelled(), 1);
        assert_eq!(runner.step(16.0), None);

        // a redundant notification changes nothing
        runner.on_visibility_change(true);
        assert_eq!(runner.host().cancelled(), 1);
    }

    #[test]
    fn target_fps_skips_early_ticks() {
        let config = AppConfig { target_fps: Some(30), ..Default::default() };
        let mut runner = idle_app_runner(config);
        runner.start();

        let refresh = 1000.0 / 60.0;
        let outcomes: Vec<_> = (0..6).filter_map(|_| runner.step(refresh)).collect();
        assert_eq!(
            outcomes,
            vec![
                FrameOutcome::Completed,
                FrameOutcome::Skipped,
                FrameOutcome::Completed,
                FrameOutcome::Skipped,
                FrameOutcome::Completed,
                FrameOutcome::Skipped,
            ]
        );
        // every tick still requested a successor
        assert!(runner.pending_frame().is_some());
        assert_eq!(runner.clock().frame_count(), 3);
        assert!((runner.clock().delta() - 1.0 / 30.0).abs() < 1e-4);
    }

    #[test]
    fn blur_only_pauses_when_configured() {
        let mut runner = idle_app_runner(AppConfig::default());
        runner.start();
        runner.on_focus_change(false);
        assert_eq!(runner.state(), RunState::Running);

        let config = AppConfig { pause_on_blur: true, ..Default::default() };
        let mut runner = idle_app_runner(config);
        runner.start();
        runner.on_focus_change(false);
        assert_eq!(runner.state(), RunState::Paused);

        // still hidden: regaining focus alone does not resume
        runner.on_visibility_change(true);
        runner.on_focus_change(true);
        assert_eq!(runner.state(), RunState::Paused);
        runner.on_visibility_change(false);
        assert_eq!(runner.state(), RunState::Running);
    }

    #[test]
    fn panic_payloads_become_messages() {
        assert_eq!(panic_message(&"boom"), "boom");
        assert_eq!(panic_message(&String::from("bang")), "bang");
        assert_eq!(panic_message(&7u8), "non-string panic payload");
    }
}

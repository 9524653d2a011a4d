//! Frame timing utilities.
//!
//! `Time` is produced once per frame by the runner and passed into every
//! callback via `FrameContext`.  All fields are read-only from game code;
//! the runner owns the `TimeClock` that produces snapshots.
//!
//! Timestamps are host milliseconds (the value `requestAnimationFrame`
//! hands to its callback, or `performance.now()`), so the clock itself never
//! reads a system timer and can be driven by synthetic time in tests.
//!
//! # Example
//! ```rust,ignore
//! fn update(&mut self, ctx: &mut FrameContext) -> anyhow::Result<()> {
//!     // move at 120 px/s regardless of frame rate
//!     self.ball.center.x += 120.0 * ctx.time.delta;
//!     Ok(())
//! }
//! ```

use std::collections::VecDeque;

use serde::Deserialize;

/// A snapshot of timing information for the current frame.
///
/// Since it is `Copy` you can store a copy locally if needed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Time {
    /// Seconds elapsed since the previous frame, after the outlier clamp.
    pub delta: f32,

    /// Total seconds elapsed since the clock was created.
    pub elapsed: f64,

    /// Number of frames completed before this one (0 on the first frame).
    pub frame_count: u64,

    /// Mean frames-per-second over the sample window.
    pub fps: f32,
}

/// Tuning for [`TimeClock`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Raw deltas above this many seconds are treated as outliers.
    pub max_delta: f32,
    /// Delta reported instead of an outlier.
    pub fallback_delta: f32,
    /// Number of instantaneous FPS samples averaged by [`TimeClock::fps`].
    pub fps_window: usize,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            max_delta: 0.1,
            fallback_delta: 1.0 / 60.0,
            fps_window: 60,
        }
    }
}

// ─── Clock (internal, lives in the runner) ─────────────────────────────────

/// Stateful timer that measures frame spacing and produces [`Time`]
/// snapshots.
///
/// A delta larger than `max_delta` (a backgrounded tab, a debugger pause)
/// is replaced by `fallback_delta` so a single stall cannot throw physics
/// across the screen.
#[derive(Debug, Clone)]
pub struct TimeClock {
    config: ClockConfig,
    start_ms: f64,
    last_tick_ms: f64,
    last_tick_elapsed: f64,
    delta: f32,
    frame_count: u64,
    samples: VecDeque<f32>,
    sample_sum: f64,
    fps: f32,
}

impl TimeClock {
    /// Create a clock whose epoch is `now_ms`.
    pub fn new(now_ms: f64) -> Self {
        Self::with_config(now_ms, ClockConfig::default())
    }

    pub fn with_config(now_ms: f64, config: ClockConfig) -> Self {
        let window = config.fps_window.max(1);
        Self {
            config: ClockConfig { fps_window: window, ..config },
            start_ms: now_ms,
            last_tick_ms: now_ms,
            last_tick_elapsed: 0.0,
            delta: 0.0,
            frame_count: 0,
            samples: VecDeque::with_capacity(window),
            sample_sum: 0.0,
            fps: 0.0,
        }
    }

    /// Advance by one frame and return the clamped delta in seconds.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let raw_ms = now_ms - self.last_tick_ms;
        self.last_tick_ms = now_ms;
        self.last_tick_elapsed = self.elapsed(now_ms);

        let raw = (raw_ms / 1000.0) as f32;
        self.delta = if raw > self.config.max_delta {
            log::debug!("frame delta {raw:.3}s over limit; using {:.4}s", self.config.fallback_delta);
            self.config.fallback_delta
        } else {
            raw.max(0.0)
        };

        // a duplicate timestamp has no meaningful rate; drop it
        if raw_ms > 0.0 {
            self.push_sample((1000.0 / raw_ms) as f32);
        }

        self.frame_count += 1;
        self.delta
    }

    fn push_sample(&mut self, fps: f32) {
        if !fps.is_finite() {
            return;
        }
        if self.samples.len() == self.config.fps_window {
            if let Some(old) = self.samples.pop_front() {
                self.sample_sum -= old as f64;
            }
        }
        self.samples.push_back(fps);
        self.sample_sum += fps as f64;
        self.fps = (self.sample_sum / self.samples.len() as f64).max(0.0) as f32;
    }

    /// Restart delta measurement from `now_ms` without touching elapsed
    /// time or the FPS window.  Called when the page becomes visible again.
    pub fn resume(&mut self, now_ms: f64) {
        self.last_tick_ms = now_ms;
    }

    /// Seconds since the clock was created.  Never negative.
    pub fn elapsed(&self, now_ms: f64) -> f64 {
        ((now_ms - self.start_ms) / 1000.0).max(0.0)
    }

    /// Last clamped delta in seconds.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Smoothed FPS; 0 until the first valid sample.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn last_tick_ms(&self) -> f64 {
        self.last_tick_ms
    }

    /// Number of samples currently in the FPS window.
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// Snapshot of the most recent tick.  `frame_count` counts the frames
    /// completed *before* that tick so the first frame reports 0.
    pub fn time(&self) -> Time {
        Time {
            delta: self.delta,
            elapsed: self.last_tick_elapsed,
            frame_count: self.frame_count.saturating_sub(1),
            fps: self.fps,
        }
    }
}

/// Throttled FPS readout.
///
/// The smoothed value still moves every frame; on screen that flickers, so
/// the displayed integer is refreshed only once per `update_interval_ms`.
#[derive(Debug, Clone)]
pub struct FpsDisplay {
    update_interval_ms: f32,
    accumulated_ms: f32,
    shown: u32,
}

impl FpsDisplay {
    pub fn new(update_interval_ms: f32) -> Self {
        Self {
            update_interval_ms: update_interval_ms.max(0.0),
            accumulated_ms: 0.0,
            shown: 0,
        }
    }

    /// Feed one frame; returns the value to display.
    pub fn update(&mut self, delta: f32, fps: f32) -> u32 {
        self.accumulated_ms += delta * 1000.0;
        if self.accumulated_ms >= self.update_interval_ms {
            self.shown = fps.max(0.0).round() as u32;
            self.accumulated_ms = 0.0;
        }
        self.shown
    }

    #[inline]
    pub fn shown(&self) -> u32 {
        self.shown
    }
}

impl Default for FpsDisplay {
    fn default() -> Self {
        Self::new(500.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    #[test]
    fn outlier_delta_is_replaced_by_fallback() {
        let mut clock = TimeClock::new(0.0);
        let dt = clock.tick(250.0);
        assert_eq!(dt, 1.0 / 60.0);
        assert_eq!(clock.delta(), 1.0 / 60.0);

        // exactly at the limit is not an outlier
        let dt = clock.tick(350.0);
        assert!((dt - 0.1).abs() < 1e-6);
    }

    #[test]
    fn fps_is_zero_before_first_tick() {
        let clock = TimeClock::new(0.0);
        assert_eq!(clock.fps(), 0.0);
        assert_eq!(clock.delta(), 0.0);
        assert_eq!(clock.time(), Time::default());
    }

    #[test]
    fn duplicate_timestamp_is_not_sampled() {
        let mut clock = TimeClock::new(0.0);
        assert_eq!(clock.tick(0.0), 0.0);
        assert_eq!(clock.sample_count(), 0);
        assert_eq!(clock.fps(), 0.0);

        // going backwards yields a zero delta, never a negative one
        clock.tick(20.0);
        assert_eq!(clock.tick(10.0), 0.0);
        assert!(clock.fps() >= 0.0);
        assert!(clock.fps().is_finite());
    }

    #[test]
    fn fps_is_mean_over_bounded_window() {
        let mut clock = TimeClock::with_config(
            0.0,
            ClockConfig { fps_window: 4, ..Default::default() },
        );
        let mut now = 0.0;
        for _ in 0..4 {
            now += 20.0; // 50 fps
            clock.tick(now);
        }
        assert!((clock.fps() - 50.0).abs() < 1e-3);

        for _ in 0..4 {
            now += 10.0; // 100 fps pushes the old samples out
            clock.tick(now);
        }
        assert_eq!(clock.sample_count(), 4);
        assert!((clock.fps() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn resume_avoids_huge_delta() {
        let mut clock = TimeClock::new(0.0);
        clock.tick(FRAME_MS);
        // tab hidden for ten seconds
        clock.resume(10_000.0);
        let dt = clock.tick(10_000.0 + FRAME_MS);
        assert!((dt - (FRAME_MS / 1000.0) as f32).abs() < 1e-4);
    }

    #[test]
    fn elapsed_and_snapshot() {
        let mut clock = TimeClock::new(1000.0);
        assert_eq!(clock.elapsed(500.0), 0.0);
        clock.tick(1500.0);
        let t = clock.time();
        assert_eq!(t.frame_count, 0);
        assert!((t.elapsed - 0.5).abs() < 1e-9);
        clock.tick(1516.0);
        assert_eq!(clock.time().frame_count, 1);
        assert!((clock.elapsed(3000.0) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn display_refreshes_on_interval() {
        let mut display = FpsDisplay::new(500.0);
        assert_eq!(display.update(0.1, 59.6), 0);
        for _ in 0..3 {
            display.update(0.1, 30.0);
        }
        assert_eq!(display.update(0.1, 60.4), 60);
        assert_eq!(display.update(0.1, 10.0), 60);
    }
}

use std::str::FromStr;

use deo_core::glam::Vec2;
use deo_core::ClockConfig;
use serde::Deserialize;

use crate::error::{ConfigError, FrameError};
use crate::host::FrameHost;
use crate::runner::{ErrorHook, Runner};
use crate::traits::DeoApp;

/// Canvas and frame-loop settings.
///
/// Every field has a default, so a TOML file only needs the keys it wants
/// to change:
///
/// ```toml
/// title = "Basic example"
/// width = 800
/// height = 450
/// target_fps = 30
///
/// [clock]
/// max_delta = 0.1
/// fps_window = 60
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    /// `id` of the existing `<canvas>` element the browser host binds to.
    pub canvas_id: String,
    /// Logical canvas size in pixels.
    pub width: u32,
    pub height: u32,
    /// Cap the callback rate below the display refresh rate.  `None` or `0`
    /// runs on every refresh.
    pub target_fps: Option<u32>,
    /// Also pause when the window loses focus, not only when hidden.
    pub pause_on_blur: bool,
    pub show_context_menu: bool,
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
    /// How often the displayed FPS value refreshes.
    pub fps_display_interval_ms: f32,
    pub clock: ClockConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "untitled".to_string(),
            canvas_id: "canvas".to_string(),
            width: 800,
            height: 450,
            target_fps: None,
            pause_on_blur: false,
            show_context_menu: false,
            log_level: "info".to_string(),
            fps_display_interval_ms: 500.0,
            clock: ClockConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file from disk.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &'static str, reason: &str| {
            Err(ConfigError::Invalid { field, reason: reason.to_string() })
        };
        if self.width == 0 || self.height == 0 {
            return invalid("width/height", "canvas size must be non-zero");
        }
        if !(self.clock.max_delta > 0.0) {
            return invalid("clock.max_delta", "must be positive");
        }
        if !(self.clock.fallback_delta > 0.0 && self.clock.fallback_delta.is_finite()) {
            return invalid("clock.fallback_delta", "must be a positive number of seconds");
        }
        if self.clock.fps_window == 0 {
            return invalid("clock.fps_window", "needs at least one sample");
        }
        if !(self.fps_display_interval_ms >= 0.0) {
            return invalid("fps_display_interval_ms", "must not be negative");
        }
        if log::LevelFilter::from_str(&self.log_level).is_err() {
            return invalid("log_level", "unknown level");
        }
        Ok(())
    }

    /// Minimum spacing between callbacks, if a target rate is set.
    pub fn target_frame_interval_ms(&self) -> Option<f64> {
        match self.target_fps {
            Some(fps) if fps > 0 => Some(1000.0 / fps as f64),
            _ => None,
        }
    }

    pub fn canvas_size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Parsed `log_level`, falling back to `Info`.
    pub fn level_filter(&self) -> log::LevelFilter {
        log::LevelFilter::from_str(&self.log_level).unwrap_or(log::LevelFilter::Info)
    }
}

/// Builder that wires an app, its config and an optional error hook into a
/// [`Runner`].
///
/// ```rust,ignore
/// App::new(MyGame::default())
///     .with_title("Basic example")
///     .with_size(800, 450)
///     .on_error(|err| overlay.show(err.to_string()))
///     .run()?;
/// ```
pub struct App<A: DeoApp> {
    config: AppConfig,
    app_state: A,
    error_hook: Option<ErrorHook>,
}

impl<A: DeoApp + 'static> App<A> {
    pub fn new(app_state: A) -> Self {
        Self {
            config: AppConfig::default(),
            app_state,
            error_hook: None,
        }
    }

    /// Replace the whole configuration (e.g. one loaded from TOML).
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.config.title = title.to_string();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    pub fn with_canvas(mut self, canvas_id: &str) -> Self {
        self.config.canvas_id = canvas_id.to_string();
        self
    }

    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.config.target_fps = Some(fps);
        self
    }

    pub fn with_pause_on_blur(mut self, pause: bool) -> Self {
        self.config.pause_on_blur = pause;
        self
    }

    /// Observe callback failures.  The hook runs after the failure has been
    /// logged; the loop continues either way.
    pub fn on_error<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&FrameError) + 'static,
    {
        self.error_hook = Some(Box::new(hook));
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Assemble a runner on top of an explicit host.  The runner is `Idle`
    /// until [`Runner::start`] is called.
    pub fn build<H: FrameHost>(self, host: H) -> Result<Runner<A, H>, ConfigError> {
        self.config.validate()?;
        let mut runner = Runner::new(self.app_state, self.config, host);
        if let Some(hook) = self.error_hook {
            runner.set_error_hook(hook);
        }
        Ok(runner)
    }

    /// Bind to the configured canvas and start the animation-frame loop.
    #[cfg(target_arch = "wasm32")]
    pub fn run(self) -> Result<(), crate::web::WebError> {
        crate::web::run(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_keys() {
        let config = AppConfig::from_toml_str(
            r#"
            title = "Basic example"
            target_fps = 30

            [clock]
            fps_window = 20
            "#,
        )
        .unwrap();
        assert_eq!(config.title, "Basic example");
        assert_eq!(config.width, 800);
        assert_eq!(config.clock.fps_window, 20);
        assert_eq!(config.clock.max_delta, 0.1);
        let interval = config.target_frame_interval_ms().unwrap();
        assert!((interval - 33.333).abs() < 1e-2);
    }

    #[test]
    fn zero_target_fps_means_uncapped() {
        let config = AppConfig { target_fps: Some(0), ..Default::default() };
        assert_eq!(config.target_frame_interval_ms(), None);
    }

    #[test]
    fn invalid_values_are_reported() {
        let err = AppConfig::from_toml_str("[clock]\nfps_window = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "clock.fps_window", .. }));

        let err = AppConfig::from_toml_str("log_level = \"loud\"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "log_level", .. }));

        let err = AppConfig::from_toml_str("width = \"wide\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn level_filter_parses_case_insensitively() {
        let config = AppConfig { log_level: "DEBUG".into(), ..Default::default() };
        assert_eq!(config.level_filter(), log::LevelFilter::Debug);
    }
}

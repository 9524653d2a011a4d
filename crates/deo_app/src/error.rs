use thiserror::Error;

/// Failure while reading or validating an [`AppConfig`](crate::AppConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config syntax: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// The host refused to schedule or cancel a frame.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("could not request an animation frame: {0}")]
    RequestFrame(String),
    #[error("host is unavailable: {0}")]
    Unavailable(String),
}

/// A user callback failed during a frame.  The loop keeps running; these
/// values are only reported (log + error hook).
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("frame {frame}: {phase} callback returned an error: {source:#}")]
    Callback {
        frame: u64,
        phase: &'static str,
        #[source]
        source: anyhow::Error,
    },
    #[error("frame {frame}: {phase} callback panicked: {message}")]
    Panic {
        frame: u64,
        phase: &'static str,
        message: String,
    },
}

impl FrameError {
    /// Frame number the failure happened on (0-based).
    pub fn frame(&self) -> u64 {
        match self {
            FrameError::Callback { frame, .. } | FrameError::Panic { frame, .. } => *frame,
        }
    }
}

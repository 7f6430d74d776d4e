use std::path::PathBuf;
use thiserror::Error;

/// Error type client hooks hand back to the engine.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Which part of a frame a client error surfaced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePhase {
    Start,
    Update,
    Render,
}

impl std::fmt::Display for FramePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FramePhase::Start => "start",
            FramePhase::Update => "update",
            FramePhase::Render => "render",
        };
        f.write_str(name)
    }
}

/// Errors that can stop the engine before or during the run loop.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to create window: {0}")]
    WindowCreation(String),

    #[error("failed to initialize graphics: {0}")]
    GraphicsInit(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to read config '{}'", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    ConfigParse(#[from] serde_json::Error),

    #[error("application {phase} failed")]
    Frame {
        phase: FramePhase,
        #[source]
        source: BoxError,
    },

    #[error("engine has already been run")]
    AlreadyRun,
}

impl EngineError {
    pub(crate) fn frame(phase: FramePhase, source: BoxError) -> Self {
        EngineError::Frame { phase, source }
    }

    /// Construction failures never started the loop.
    pub fn is_construction_failure(&self) -> bool {
        matches!(
            self,
            EngineError::WindowCreation(_) | EngineError::GraphicsInit(_)
        )
    }

    /// Process exit status for this failure. Construction and configuration
    /// failures get their own codes.
    pub fn exit_code(&self) -> u8 {
        match self {
            EngineError::WindowCreation(_) | EngineError::GraphicsInit(_) => 2,
            EngineError::Config(_) | EngineError::ConfigIo { .. } | EngineError::ConfigParse(_) => 3,
            EngineError::Frame { .. } | EngineError::AlreadyRun => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_failures_have_distinct_exit_code() {
        let window = EngineError::WindowCreation("no display".into());
        let graphics = EngineError::GraphicsInit("no adapter".into());
        let config = EngineError::Config("width is zero".into());
        let frame = EngineError::frame(FramePhase::Update, "boom".into());

        assert!(window.is_construction_failure());
        assert!(graphics.is_construction_failure());
        assert!(!frame.is_construction_failure());

        assert_eq!(window.exit_code(), 2);
        assert_eq!(graphics.exit_code(), 2);
        assert_eq!(config.exit_code(), 3);
        assert_eq!(frame.exit_code(), 1);
    }

    #[test]
    fn frame_error_keeps_source() {
        let err = EngineError::frame(FramePhase::Render, "surface lost".into());
        assert_eq!(err.to_string(), "application render failed");
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("surface lost"));
    }
}

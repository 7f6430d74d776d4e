//! Engine configuration
//!
//! Every field is optional in the JSON form; missing values fall back to the
//! defaults below.

use crate::error::EngineError;
use crate::time::{DEFAULT_FIXED_DELTA, DEFAULT_MAX_FRAME_TIME};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Window creation options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowProps {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl WindowProps {
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            width,
            height,
        }
    }
}

impl Default for WindowProps {
    fn default() -> Self {
        Self {
            title: "Marle Engine".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub window: WindowProps,
    /// Simulation step in seconds
    pub fixed_delta: f64,
    /// Upper bound on a single frame's measured time, in seconds
    pub max_frame_time: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window: WindowProps::default(),
            fixed_delta: DEFAULT_FIXED_DELTA,
            max_frame_time: DEFAULT_MAX_FRAME_TIME,
        }
    }
}

impl EngineConfig {
    pub fn with_window(mut self, window: WindowProps) -> Self {
        self.window = window;
        self
    }

    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| EngineError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), ?config, "loaded engine config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(EngineError::Config(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        validate_timing(self.fixed_delta, self.max_frame_time)
    }
}

/// Most fixed updates a single clamped frame may demand.
///
/// Beyond this the drain loop stalls rendering, and for tiny steps
/// `accumulator - fixed_delta` stops making progress in f64.
pub const MAX_STEPS_PER_FRAME: u32 = 10_000;

pub(crate) fn validate_timing(fixed_delta: f64, max_frame_time: f64) -> Result<(), EngineError> {
    if !fixed_delta.is_finite() || fixed_delta <= 0.0 {
        return Err(EngineError::Config(format!(
            "fixed_delta must be a positive number of seconds, got {fixed_delta}"
        )));
    }
    // A clamp below one step would starve the simulation forever
    if !max_frame_time.is_finite() || max_frame_time < fixed_delta {
        return Err(EngineError::Config(format!(
            "max_frame_time ({max_frame_time}) must be at least fixed_delta ({fixed_delta})"
        )));
    }
    let steps = max_frame_time / fixed_delta;
    if steps > f64::from(MAX_STEPS_PER_FRAME) {
        return Err(EngineError::Config(format!(
            "max_frame_time ({max_frame_time}) allows {steps:.0} updates per frame at \
             fixed_delta ({fixed_delta}), limit is {MAX_STEPS_PER_FRAME}"
        )));
    }
    Ok(())
}

// src/config.rs
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GestureError, Result};

/// A finger counts as extended when its joint angle exceeds this. Straight
/// fingers sit near 180 degrees; the slack absorbs joint stiffness and jitter.
pub const DEFAULT_EXTENSION_THRESHOLD_DEG: f64 = 160.0;

/// How far (normalized image units) the thumb tip must sit above the thumb MCP
/// to count as pointing up.
pub const DEFAULT_THUMB_UP_MIN_RISE: f64 = 0.15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub extension_threshold_deg: f64,
    pub thumb_up_min_rise: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            extension_threshold_deg: DEFAULT_EXTENSION_THRESHOLD_DEG,
            thumb_up_min_rise: DEFAULT_THUMB_UP_MIN_RISE,
        }
    }
}

impl ClassifierConfig {
    /// Loads a config from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let t = self.extension_threshold_deg;
        if !t.is_finite() || t <= 0.0 || t > 180.0 {
            return Err(GestureError::InvalidConfig(format!(
                "extension_threshold_deg must be in (0, 180], got {}",
                t
            )));
        }

        let rise = self.thumb_up_min_rise;
        if !rise.is_finite() || rise < 0.0 {
            return Err(GestureError::InvalidConfig(format!(
                "thumb_up_min_rise must be a non-negative number, got {}",
                rise
            )));
        }

        Ok(())
    }
}

//! Animation tuning with TOML preset support.
//!
//! Gesture handlers read these when they start an animation: how long a
//! programmatic move takes, how quickly a fling slows down, and which
//! flings are too weak to bother with.

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::AnimationError;

/// Animation parameters. Uses `#[serde(default)]` so partial TOML files
/// work.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Animation")]
#[serde(default)]
pub struct AnimationOptions {
    /// Animate view changes. When off, moves snap and flings are dropped.
    #[schemars(title = "Enable Animation")]
    pub enabled: bool,
    /// Duration of a programmatic move, in seconds.
    #[schemars(title = "Move Duration", range(min = 0.05, max = 5.0), extend("step" = 0.05))]
    pub translate_duration_secs: f64,
    /// Fling deceleration in model units per second squared. Zero lets a
    /// fling coast until something cancels it.
    #[schemars(title = "Fling Deceleration", range(min = 0.0, max = 10000.0), extend("step" = 10.0))]
    pub fling_deceleration: f64,
    /// Flings slower than this (units per second) are ignored.
    #[schemars(skip)]
    pub min_fling_speed: f64,
    /// Flings faster than this are capped.
    #[schemars(skip)]
    pub max_fling_speed: f64,
    /// Also hold flings at the bounds edge instead of only moves.
    #[schemars(title = "Bound Flings")]
    pub bound_momentum: bool,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            translate_duration_secs: 0.5,
            fling_deceleration: 1500.0,
            min_fling_speed: 50.0,
            max_fling_speed: 8000.0,
            bound_momentum: false,
        }
    }
}

impl AnimationOptions {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(AnimationOptions)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, AnimationError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, AnimationError> {
        toml::from_str(content)
            .map_err(|e| AnimationError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), AnimationError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| AnimationError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

//! Engine tuning knobs.
//!
//! Every field has a default matching the documented combat formulas, so an
//! empty JSON object (`{}`) is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::error::{ContentError, ContentResult};

/// Number of battle log entries kept by default.
pub const DEFAULT_LOG_CAPACITY: usize = 20;

/// Configuration for a [`CombatEngine`](crate::engine::CombatEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Most recent log entries retained in the battle log.
    pub log_capacity: usize,
    /// Extra damage per consecutive repeat of the same player ability.
    pub combo_bonus_per_stack: u32,
    /// Multiplier applied to the final value on a critical roll.
    pub critical_multiplier: f64,
    /// Energy the boss regains when it skips a turn to gather energy.
    pub boss_skip_regen: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_capacity: DEFAULT_LOG_CAPACITY,
            combo_bonus_per_stack: 5,
            critical_multiplier: 1.5,
            boss_skip_regen: 15,
        }
    }
}

impl EngineConfig {
    /// Parses and validates a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Parse`] for malformed JSON and
    /// [`ContentError::InvalidConfig`] when a value is unusable.
    pub fn from_json(json: &str) -> ContentResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is usable by the engine.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::InvalidConfig`] describing the first bad value.
    pub fn validate(&self) -> ContentResult<()> {
        if self.log_capacity == 0 {
            return Err(ContentError::InvalidConfig(
                "log_capacity must be at least 1".to_string(),
            ));
        }
        if !self.critical_multiplier.is_finite() || self.critical_multiplier < 1.0 {
            return Err(ContentError::InvalidConfig(format!(
                "critical_multiplier must be >= 1.0, found {}",
                self.critical_multiplier
            )));
        }
        Ok(())
    }
}

//! Error types for loading and validating combat content.
//!
//! Battle-domain failures (wrong turn, insufficient energy, no active battle)
//! are not errors: they are reported through a failed
//! [`ActionResult`](crate::resolver::ActionResult). The types here cover the
//! only fallible surface of the crate, which is turning authored content
//! (catalog and engine configuration JSON) into validated records.

use thiserror::Error;

/// Errors that can occur while loading or validating content.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The JSON document could not be parsed.
    #[error("failed to parse content: {0}")]
    Parse(#[from] serde_json::Error),

    /// A probability field is outside `[0, 1]`.
    #[error("{owner}: {field} must be within [0, 1], found {value}")]
    ProbabilityOutOfRange {
        /// Id of the record carrying the field.
        owner: String,
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A phase threshold is outside `(0, 1]`.
    #[error("boss {boss}: phase {phase} threshold must be within (0, 1], found {threshold}")]
    InvalidThreshold {
        /// Boss id.
        boss: String,
        /// Phase id.
        phase: String,
        /// The rejected threshold.
        threshold: f64,
    },

    /// A phase multiplier is negative or not finite.
    #[error("boss {boss}: phase {phase} has invalid {field} {value}")]
    InvalidMultiplier {
        /// Boss id.
        boss: String,
        /// Phase id.
        phase: String,
        /// Name of the offending multiplier.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Two records of the same kind share an id.
    #[error("duplicate {kind} id: {id}")]
    DuplicateId {
        /// Record kind (ability, phase, boss).
        kind: &'static str,
        /// The repeated id.
        id: String,
    },

    /// A boss was authored with zero max health.
    #[error("boss {0} must have non-zero max health")]
    ZeroMaxHealth(String),

    /// The engine configuration holds an unusable value.
    #[error("invalid engine config: {0}")]
    InvalidConfig(String),
}

/// Result type for content loading operations.
pub type ContentResult<T> = Result<T, ContentError>;

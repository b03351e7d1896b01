//! Error types for level loading and configuration.
//!
//! Only configuration problems surface as errors. Physics edge cases (zero or
//! negative delta-time, out-of-range clamp inputs) are absorbed by the
//! simulation, and lookups of entity ids that no longer exist are no-ops.

use thiserror::Error;

/// Errors raised while loading or validating level descriptors.
///
/// A level error is fatal to level initialization: the simulation never
/// substitutes a different level when the requested one is unavailable.
#[derive(Debug, Error)]
pub enum LevelError {
    /// The requested level id is not part of the loaded level set.
    #[error("level {id} not found in level set")]
    NotFound {
        /// The level id that was requested.
        id: u32,
    },

    /// The level JSON could not be parsed.
    #[error("failed to parse level data: {0}")]
    Parse(#[from] serde_json::Error),

    /// A level descriptor failed validation.
    #[error("level {level} is invalid: {reason}")]
    Invalid {
        /// Id of the offending level.
        level: u32,
        /// Human readable reason.
        reason: String,
    },

    /// The level set contains no levels at all.
    #[error("level set is empty")]
    EmptySet,
}

/// Errors raised while loading tunables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config JSON could not be parsed.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A tunable is outside its legal range.
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// Human readable reason.
        reason: String,
    },
}

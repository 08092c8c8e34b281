//! Error types for tween construction and configuration.

use serde::{Deserialize, Serialize};

/// Errors raised while building or registering playables.
///
/// Nothing here is produced from inside a tick: control operations on killed or
/// unknown handles report zero affected playables instead of failing.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum TweenError {
    /// Rejected timing, generator or plugin settings
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// The plugin cannot interpolate the supplied value kind
    #[error("Plugin mismatch in {plugin}: {reason}")]
    PluginMismatch { plugin: String, reason: String },

    /// Configuration parsing error
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },
}

impl TweenError {
    /// Shorthand for [`TweenError::InvalidConfiguration`].
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    pub fn mismatch(plugin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PluginMismatch {
            plugin: plugin.into(),
            reason: reason.into(),
        }
    }

    /// Check if the caller can fix this by adjusting input and retrying.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidConfiguration { .. } => "configuration",
            Self::PluginMismatch { .. } => "plugin",
            Self::Serialization { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for TweenError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}

/// Check that `value` is finite and strictly positive.
pub(crate) fn ensure_positive(what: &str, value: f32) -> crate::Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TweenError::invalid(format!(
            "{what} must be finite and positive, got {value}"
        )))
    }
}

/// Check that `value` is finite and not negative.
pub(crate) fn ensure_non_negative(what: &str, value: f32) -> crate::Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TweenError::invalid(format!(
            "{what} must be finite and non-negative, got {value}"
        )))
    }
}

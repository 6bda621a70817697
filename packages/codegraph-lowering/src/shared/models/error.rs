//! Error types for the codegraph-lowering crate
//!
//! Lowering itself never fails on data: unknown shapes degrade to the generic
//! fallback and gate rejections are a regular outcome. What remains are caller
//! contract violations (fatal, never retried) and configuration errors.

use thiserror::Error;

use crate::config::ConfigError;

/// Unified error type
#[derive(Debug, Error)]
pub enum LoweringError {
    /// A context was combined with an identifier from another lineage
    #[error("context misuse: expected an identifier under '{expected}', found '{found}'")]
    ContextMisuse { expected: String, found: String },

    /// The identity counter of a lineage cannot advance any further
    #[error("identity counter exhausted for namespace '{namespace}'")]
    CounterExhausted { namespace: String },

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Internal errors (bugs)
    #[error("internal error: {0}")]
    Internal(String),
}

impl LoweringError {
    pub fn context_misuse(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::ContextMisuse {
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Programming errors: surface immediately, never retry.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::ContextMisuse { .. } | Self::CounterExhausted { .. } | Self::Internal(_) => true,
            Self::Config(_) => false,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::ContextMisuse { .. } => "context_misuse",
            Self::CounterExhausted { .. } => "counter_exhausted",
            Self::Config(_) => "config",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result type alias
pub type LoweringResult<T> = std::result::Result<T, LoweringError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LoweringError::context_misuse("urn:a", "urn:b/1");
        let msg = err.to_string();
        assert!(msg.contains("urn:a"));
        assert!(msg.contains("urn:b/1"));
        assert_eq!(err.kind(), "context_misuse");
    }

    #[test]
    fn test_fatality() {
        assert!(LoweringError::context_misuse("a", "b").is_fatal());
        assert!(LoweringError::CounterExhausted {
            namespace: "urn:x".to_string()
        }
        .is_fatal());
        assert!(!LoweringError::Config(ConfigError::UnknownPreset("x".to_string())).is_fatal());
    }
}

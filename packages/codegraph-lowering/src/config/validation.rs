//! Configuration validation
//!
//! Code that needs to validate a section depends on `Validatable`, not on the
//! concrete section type.

use super::error::ConfigResult;
use super::section_configs::{CacheSettings, LoweringSettings, ParallelConfig, ProvenanceRules};

// ═══════════════════════════════════════════════════════════════════════════
// Validatable Trait
// ═══════════════════════════════════════════════════════════════════════════

/// Trait for validatable configuration objects
pub trait Validatable {
    /// Returns `Ok(())` if valid, `Err(ConfigError)` with details if invalid.
    fn validate(&self) -> ConfigResult<()>;

    /// Section name for logs and error messages
    fn config_name(&self) -> &'static str {
        "Config"
    }
}

/// Extension trait for validating optional overrides
pub trait ValidatableCollection {
    fn validate_all(&self) -> ConfigResult<()>;
}

impl<T: Validatable> ValidatableCollection for Vec<T> {
    fn validate_all(&self) -> ConfigResult<()> {
        for config in self {
            config.validate()?;
        }
        Ok(())
    }
}

impl<T: Validatable> ValidatableCollection for Option<T> {
    fn validate_all(&self) -> ConfigResult<()> {
        if let Some(config) = self {
            config.validate()?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Section implementations
// ═══════════════════════════════════════════════════════════════════════════

impl Validatable for LoweringSettings {
    fn validate(&self) -> ConfigResult<()> {
        LoweringSettings::validate(self)
    }

    fn config_name(&self) -> &'static str {
        "lowering"
    }
}

impl Validatable for CacheSettings {
    fn validate(&self) -> ConfigResult<()> {
        CacheSettings::validate(self)
    }

    fn config_name(&self) -> &'static str {
        "cache"
    }
}

impl Validatable for ParallelConfig {
    fn validate(&self) -> ConfigResult<()> {
        ParallelConfig::validate(self)
    }

    fn config_name(&self) -> &'static str {
        "parallel"
    }
}

impl Validatable for ProvenanceRules {
    fn validate(&self) -> ConfigResult<()> {
        ProvenanceRules::validate(self)
    }

    fn config_name(&self) -> &'static str {
        "provenance"
    }
}

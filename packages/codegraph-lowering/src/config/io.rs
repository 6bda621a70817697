//! Configuration I/O (YAML schema)
//!
//! Defines YAML schema types. Loading and export live in extraction_config.rs
//! next to the fields they fill.

use super::section_configs::{CacheSettings, LoweringSettings, ParallelConfig, ProvenanceRules};
use serde::{Deserialize, Serialize};

/// Supported schema versions
pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1)
    #[serde(default)]
    pub version: Option<u32>,

    /// Base preset
    pub preset: String,

    /// Error on overrides for disabled features
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict_mode: Option<bool>,

    /// Fine-grained overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<ConfigOverrides>,
}

/// Configuration overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lowering: Option<LoweringSettings>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache: Option<CacheSettings>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel: Option<ParallelConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provenance: Option<ProvenanceRules>,
}

impl ConfigOverrides {
    pub fn is_empty(&self) -> bool {
        self.lowering.is_none()
            && self.cache.is_none()
            && self.parallel.is_none()
            && self.provenance.is_none()
    }
}

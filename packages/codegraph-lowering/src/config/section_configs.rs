//! Section-specific configuration types
//!
//! Each configuration section has its own struct with preset defaults,
//! builder-style setters and validation.

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;
use crate::features::lowering::domain::ExtractionMode;
use crate::shared::constants::{cache, lowering, provenance, thread_pool};
use serde::{Deserialize, Serialize};

// ============================================================================
// Lowering
// ============================================================================

/// Lowering driver settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoweringSettings {
    /// Emit full expression substructure (false = existence flags only)
    pub full_mode: bool,

    /// Recursion depth before a subtree collapses to the fallback (1..=4096)
    pub max_depth: usize,

    /// Attach startLine / startColumn literals when metadata carries them
    pub include_locations: bool,

    /// Base namespace for per-unit identifiers (absolute IRI)
    pub base_namespace: String,
}

impl Default for LoweringSettings {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}

impl LoweringSettings {
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            full_mode: preset.extraction_mode() == ExtractionMode::Full,
            max_depth: preset.max_depth(),
            include_locations: preset.emits_locations(),
            base_namespace: lowering::DEFAULT_BASE_NAMESPACE.to_string(),
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_depth == 0 || self.max_depth > lowering::MAX_DEPTH_LIMIT {
            return Err(ConfigError::range_with_hint(
                "lowering.max_depth",
                self.max_depth,
                1,
                lowering::MAX_DEPTH_LIMIT,
                "Depth 1 keeps only the root node; raise it for nested expressions",
            ));
        }

        let ns = self.base_namespace.trim();
        if ns.is_empty() || !ns.contains(':') || ns.contains(char::is_whitespace) {
            return Err(ConfigError::invalid_value(
                "lowering.base_namespace",
                format!(
                    "'{}' is not an absolute IRI (expected e.g. '{}')",
                    self.base_namespace,
                    lowering::DEFAULT_BASE_NAMESPACE
                ),
            ));
        }

        Ok(())
    }

    pub fn full_mode(mut self, enabled: bool) -> Self {
        self.full_mode = enabled;
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn include_locations(mut self, enabled: bool) -> Self {
        self.include_locations = enabled;
        self
    }

    pub fn base_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.base_namespace = namespace.into();
        self
    }
}

// ============================================================================
// Structural cache
// ============================================================================

/// Structural cache settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheSettings {
    /// Share identifiers of structurally identical subtrees
    pub enabled: bool,

    /// Smallest subtree (in nodes) eligible for sharing
    pub min_subtree_nodes: usize,

    /// Entry cap per lineage; insertions stop once reached
    pub max_entries: usize,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}

impl CacheSettings {
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            enabled: preset.shares_subtrees(),
            min_subtree_nodes: cache::DEFAULT_MIN_SUBTREE_NODES,
            max_entries: cache::DEFAULT_MAX_ENTRIES,
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.min_subtree_nodes == 0 {
            return Err(ConfigError::range_with_hint(
                "cache.min_subtree_nodes",
                self.min_subtree_nodes,
                1,
                usize::MAX,
                "Use 1 to share terminals too, 2 (default) to share only compound subtrees",
            ));
        }
        if self.max_entries == 0 || self.max_entries > cache::MAX_ENTRIES_LIMIT {
            return Err(ConfigError::range_with_hint(
                "cache.max_entries",
                self.max_entries,
                1,
                cache::MAX_ENTRIES_LIMIT,
                "Disable the cache with cache.enabled=false instead of a zero cap",
            ));
        }
        Ok(())
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn min_subtree_nodes(mut self, nodes: usize) -> Self {
        self.min_subtree_nodes = nodes;
        self
    }

    pub fn max_entries(mut self, entries: usize) -> Self {
        self.max_entries = entries;
        self
    }
}

// ============================================================================
// Parallel
// ============================================================================

/// Orchestrator thread pool settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParallelConfig {
    /// Worker threads (0 = auto: 75% of available cores)
    pub num_workers: usize,

    /// Fan out over units with rayon (false = sequential)
    pub enable_rayon: bool,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}

impl ParallelConfig {
    pub fn from_preset(_preset: Preset) -> Self {
        Self {
            num_workers: 0,
            enable_rayon: true,
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.num_workers > thread_pool::MAX_WORKERS {
            return Err(ConfigError::range_with_hint(
                "parallel.num_workers",
                self.num_workers,
                0,
                thread_pool::MAX_WORKERS,
                "Use 0 for auto-detection",
            ));
        }
        Ok(())
    }

    /// Effective worker count
    pub fn resolved_workers(&self) -> usize {
        if self.num_workers > 0 {
            return self.num_workers;
        }
        let cpus = num_cpus::get();
        ((cpus as f64 * thread_pool::CPU_UTILIZATION_PERCENT) as usize).max(thread_pool::MIN_THREADS)
    }

    pub fn num_workers(mut self, workers: usize) -> Self {
        self.num_workers = workers;
        self
    }

    pub fn enable_rayon(mut self, enabled: bool) -> Self {
        self.enable_rayon = enabled;
        self
    }
}

// ============================================================================
// Provenance rules
// ============================================================================

/// Rules deciding whether a source unit is first-party or vendored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProvenanceRules {
    /// Path components that mark dependency code
    pub vendored_dirs: Vec<String>,
}

impl Default for ProvenanceRules {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}

impl ProvenanceRules {
    pub fn from_preset(_preset: Preset) -> Self {
        Self {
            vendored_dirs: provenance::DEFAULT_VENDORED_DIRS
                .iter()
                .map(|d| d.to_string())
                .collect(),
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        for dir in &self.vendored_dirs {
            if dir.trim().is_empty() || dir.contains('/') || dir.contains('\\') {
                return Err(ConfigError::invalid_value(
                    "provenance.vendored_dirs",
                    format!("'{}' must be a single path component", dir),
                ));
            }
        }
        Ok(())
    }

    pub fn vendored_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vendored_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    pub fn add_vendored_dir(mut self, dir: impl Into<String>) -> Self {
        self.vendored_dirs.push(dir.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowering_presets() {
        assert!(!LoweringSettings::from_preset(Preset::Fast).full_mode);
        assert!(LoweringSettings::from_preset(Preset::Balanced).full_mode);

        let thorough = LoweringSettings::from_preset(Preset::Thorough);
        assert!(thorough.full_mode);
        assert!(thorough.include_locations);
        assert_eq!(thorough.max_depth, 1024);
    }

    #[test]
    fn test_lowering_validation() {
        assert!(LoweringSettings::default().validate().is_ok());
        assert!(LoweringSettings::default().max_depth(0).validate().is_err());
        assert!(LoweringSettings::default()
            .max_depth(lowering::MAX_DEPTH_LIMIT + 1)
            .validate()
            .is_err());
        assert!(LoweringSettings::default()
            .base_namespace("not an iri")
            .validate()
            .is_err());
        assert!(LoweringSettings::default()
            .base_namespace("urn:codegraph")
            .validate()
            .is_ok());
    }

    #[test]
    fn test_cache_presets_and_validation() {
        assert!(!CacheSettings::from_preset(Preset::Balanced).enabled);
        assert!(CacheSettings::from_preset(Preset::Thorough).enabled);

        assert!(CacheSettings::default().min_subtree_nodes(0).validate().is_err());
        assert!(CacheSettings::default().max_entries(0).validate().is_err());
        assert!(CacheSettings::default().min_subtree_nodes(1).validate().is_ok());
    }

    #[test]
    fn test_parallel_resolved_workers() {
        assert_eq!(ParallelConfig::default().num_workers(3).resolved_workers(), 3);
        assert!(ParallelConfig::default().resolved_workers() >= 1);
        assert!(ParallelConfig::default()
            .num_workers(thread_pool::MAX_WORKERS + 1)
            .validate()
            .is_err());
    }

    #[test]
    fn test_provenance_rules() {
        let rules = ProvenanceRules::default();
        assert_eq!(rules.vendored_dirs, vec!["deps", "_build", "vendor"]);

        let custom = rules.add_vendored_dir("third_party");
        assert!(custom.validate().is_ok());
        assert_eq!(custom.vendored_dirs.len(), 4);

        assert!(ProvenanceRules::default()
            .vendored_dirs(["lib/deps"])
            .validate()
            .is_err());
    }
}

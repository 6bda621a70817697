//! Extraction configuration
//!
//! Main configuration struct with preset-based defaults, builder overrides,
//! YAML loading and environment overrides.

use super::{
    error::{ConfigError, ConfigResult},
    io::{ConfigExportV1, ConfigOverrides, SUPPORTED_VERSIONS},
    preset::Preset,
    provenance::{ConfigProvenance, ConfigSource, FieldValues},
    section_configs::*,
    validation::ValidatableCollection,
};
use crate::shared::constants::env;
use tracing::warn;

/// Extraction configuration (builder)
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Base preset
    pub(crate) preset: Preset,

    /// Strict mode: error on overrides for disabled features (default: false)
    /// - true: build() fails with ConfigError::DisabledFeatureOverride
    /// - false: build() warns and keeps going
    pub(crate) strict_mode: bool,

    /// Section overrides
    pub(crate) lowering: Option<LoweringSettings>,
    pub(crate) cache: Option<CacheSettings>,
    pub(crate) parallel: Option<ParallelConfig>,
    pub(crate) provenance_rules: Option<ProvenanceRules>,

    /// Provenance tracking (field-level)
    pub(crate) provenance: ConfigProvenance,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self::preset(Preset::default())
    }
}

impl ExtractionConfig {
    /// Level 1: Create from preset
    pub fn preset(preset: Preset) -> Self {
        Self {
            preset,
            strict_mode: false,
            lowering: None,
            cache: None,
            parallel: None,
            provenance_rules: None,
            provenance: ConfigProvenance::from_preset(preset),
        }
    }

    /// Enable strict mode (errors on disabled feature overrides)
    pub fn strict_mode(mut self, enabled: bool) -> Self {
        self.strict_mode = enabled;
        self
    }

    /// Level 2: Override lowering settings
    ///
    /// # Example
    /// ```ignore
    /// let config = ExtractionConfig::preset(Preset::Fast)
    ///     .lowering(|c| c.full_mode(true).max_depth(64))
    ///     .build()?;
    /// ```
    pub fn lowering<F>(mut self, f: F) -> Self
    where
        F: FnOnce(LoweringSettings) -> LoweringSettings,
    {
        let before = self.field_values();
        self.lowering = Some(f(self.effective_lowering()));
        self.track_override(&before, ConfigSource::Builder);
        self
    }

    /// Level 2: Override structural cache settings
    pub fn cache<F>(mut self, f: F) -> Self
    where
        F: FnOnce(CacheSettings) -> CacheSettings,
    {
        let before = self.field_values();
        self.cache = Some(f(self.effective_cache()));
        self.track_override(&before, ConfigSource::Builder);
        self
    }

    /// Level 2: Override thread pool settings
    pub fn parallel<F>(mut self, f: F) -> Self
    where
        F: FnOnce(ParallelConfig) -> ParallelConfig,
    {
        let before = self.field_values();
        self.parallel = Some(f(self.effective_parallel()));
        self.track_override(&before, ConfigSource::Builder);
        self
    }

    /// Level 2: Override vendored-source rules
    pub fn provenance_rules<F>(mut self, f: F) -> Self
    where
        F: FnOnce(ProvenanceRules) -> ProvenanceRules,
    {
        let before = self.field_values();
        self.provenance_rules = Some(f(self.effective_provenance_rules()));
        self.track_override(&before, ConfigSource::Builder);
        self
    }

    /// Attribute the fields an override actually changed
    fn track_override(&mut self, before: &FieldValues, source: ConfigSource) {
        let after = self.field_values();
        self.provenance.track_changes(before, &after, &source);
    }

    /// Every effective setting keyed by its `section.field` path
    pub(crate) fn field_values(&self) -> FieldValues {
        let lowering = self.effective_lowering();
        let cache = self.effective_cache();
        let parallel = self.effective_parallel();
        let rules = self.effective_provenance_rules();
        FieldValues::from([
            ("lowering.full_mode", lowering.full_mode.to_string()),
            ("lowering.max_depth", lowering.max_depth.to_string()),
            ("lowering.include_locations", lowering.include_locations.to_string()),
            ("lowering.base_namespace", lowering.base_namespace),
            ("cache.enabled", cache.enabled.to_string()),
            ("cache.min_subtree_nodes", cache.min_subtree_nodes.to_string()),
            ("cache.max_entries", cache.max_entries.to_string()),
            ("parallel.num_workers", parallel.num_workers.to_string()),
            ("parallel.enable_rayon", parallel.enable_rayon.to_string()),
            ("provenance.vendored_dirs", rules.vendored_dirs.join(",")),
        ])
    }

    /// Build and validate
    pub fn build(self) -> ConfigResult<ValidatedConfig> {
        // Step 1: Validate individual sections
        self.lowering.validate_all()?;
        self.cache.validate_all()?;
        self.parallel.validate_all()?;
        self.provenance_rules.validate_all()?;

        // Step 2: Overrides for disabled features
        self.validate_feature_overrides()?;

        // Step 3: Cross-section validation
        self.cross_validate()?;

        Ok(ValidatedConfig(self))
    }

    /// Overrides that have no effect under the effective settings
    fn validate_feature_overrides(&self) -> ConfigResult<()> {
        let lowering = self.effective_lowering();
        if lowering.full_mode {
            return Ok(());
        }

        if self.cache.as_ref().is_some_and(|c| c.enabled) {
            if self.strict_mode {
                return Err(ConfigError::DisabledFeatureOverride {
                    feature: "cache".to_string(),
                    hint: "The structural cache only applies to full mode. Remove the cache override or set lowering.full_mode=true".to_string(),
                });
            }
            warn!(
                preset = %self.preset,
                "Cache override ignored (lowering.full_mode=false). Enable strict_mode to error on this."
            );
        }

        if self.lowering.is_some() && lowering.include_locations {
            if self.strict_mode {
                return Err(ConfigError::DisabledFeatureOverride {
                    feature: "lowering.include_locations".to_string(),
                    hint: "Locations are only emitted in full mode. Set lowering.full_mode=true or include_locations=false".to_string(),
                });
            }
            warn!(
                preset = %self.preset,
                "include_locations ignored (lowering.full_mode=false)"
            );
        }

        Ok(())
    }

    /// Cross-section validation
    fn cross_validate(&self) -> ConfigResult<()> {
        let lowering = self.effective_lowering();
        let cache = self.effective_cache();

        if cache.enabled && cache.min_subtree_nodes > lowering.max_depth.saturating_mul(64) {
            return Err(ConfigError::Conflict {
                issue: format!(
                    "cache.min_subtree_nodes={} can never be reached by a tree cut off at lowering.max_depth={}",
                    cache.min_subtree_nodes, lowering.max_depth
                ),
                fix: "Lower cache.min_subtree_nodes or raise lowering.max_depth".to_string(),
            });
        }

        if cache.enabled && cache.min_subtree_nodes > lowering.max_depth {
            warn!(
                min_subtree_nodes = cache.min_subtree_nodes,
                max_depth = lowering.max_depth,
                "Only wide subtrees will be shared (min_subtree_nodes > max_depth)"
            );
        }

        Ok(())
    }

    /// Get effective lowering settings (preset or override)
    pub(crate) fn effective_lowering(&self) -> LoweringSettings {
        self.lowering
            .clone()
            .unwrap_or_else(|| LoweringSettings::from_preset(self.preset))
    }

    pub(crate) fn effective_cache(&self) -> CacheSettings {
        self.cache
            .clone()
            .unwrap_or_else(|| CacheSettings::from_preset(self.preset))
    }

    pub(crate) fn effective_parallel(&self) -> ParallelConfig {
        self.parallel
            .clone()
            .unwrap_or_else(|| ParallelConfig::from_preset(self.preset))
    }

    pub(crate) fn effective_provenance_rules(&self) -> ProvenanceRules {
        self.provenance_rules
            .clone()
            .unwrap_or_else(|| ProvenanceRules::from_preset(self.preset))
    }

    /// Get base preset
    pub fn get_preset(&self) -> Preset {
        self.preset
    }

    /// Get provenance
    pub fn provenance(&self) -> &ConfigProvenance {
        &self.provenance
    }

    // ═══════════════════════════════════════════════════════════════════════
    // YAML
    // ═══════════════════════════════════════════════════════════════════════

    /// Load from YAML file (v1 schema)
    pub fn from_yaml(path: &str) -> ConfigResult<ValidatedConfig> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content, path)
    }

    /// Load from YAML text; `origin` is recorded as the provenance path
    pub fn from_yaml_str(content: &str, origin: &str) -> ConfigResult<ValidatedConfig> {
        Self::parse_yaml(content, origin)?.build()
    }

    fn parse_yaml(content: &str, origin: &str) -> ConfigResult<Self> {
        let export: ConfigExportV1 = serde_yaml::from_str(content)?;

        // Version check
        let version = export.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let preset: Preset = export.preset.parse()?;
        let mut config = Self::preset(preset).strict_mode(export.strict_mode.unwrap_or(false));

        if let Some(overrides) = export.overrides {
            let before = config.field_values();
            config.lowering = overrides.lowering;
            config.cache = overrides.cache;
            config.parallel = overrides.parallel;
            config.provenance_rules = overrides.provenance;
            config.track_override(
                &before,
                ConfigSource::Yaml {
                    path: origin.to_string(),
                },
            );
        }

        Ok(config)
    }

    /// Export to YAML
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let overrides = ConfigOverrides {
            lowering: self.lowering.clone(),
            cache: self.cache.clone(),
            parallel: self.parallel.clone(),
            provenance: self.provenance_rules.clone(),
        };
        let export = ConfigExportV1 {
            version: Some(1),
            preset: self.get_preset().to_string(),
            strict_mode: self.strict_mode.then_some(true),
            overrides: (!overrides.is_empty()).then_some(overrides),
        };

        Ok(serde_yaml::to_string(&export)?)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Environment
    // ═══════════════════════════════════════════════════════════════════════

    /// Apply `CODEGRAPH_LOWERING__<SECTION>__<FIELD>` overrides from the process environment
    pub fn with_env(self) -> ConfigResult<Self> {
        self.with_env_vars(std::env::vars())
    }

    /// Apply overrides from an explicit variable list (variables without the prefix are ignored)
    pub fn with_env_vars<I, K, V>(mut self, vars: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut vars: Vec<(String, String)> = vars
            .into_iter()
            .filter(|(k, _)| k.as_ref().starts_with(env::PREFIX))
            .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
            .collect();
        vars.sort();

        for (var, value) in vars {
            self.apply_env_var(&var, value.trim())?;
        }
        Ok(self)
    }

    fn apply_env_var(&mut self, var: &str, value: &str) -> ConfigResult<()> {
        let key = var[env::PREFIX.len()..].to_ascii_lowercase();
        let (section, field) = key.split_once("__").ok_or_else(|| {
            ConfigError::unknown_field_with_suggestion(
                key.clone(),
                "env",
                valid_sections(),
            )
        })?;

        match (section, field) {
            ("lowering", "full_mode") => {
                let parsed = parse_bool(var, value)?;
                let mut cfg = self.effective_lowering();
                cfg.full_mode = parsed;
                self.lowering = Some(cfg);
            }
            ("lowering", "max_depth") => {
                let parsed = parse_usize(var, value)?;
                let mut cfg = self.effective_lowering();
                cfg.max_depth = parsed;
                self.lowering = Some(cfg);
            }
            ("lowering", "include_locations") => {
                let parsed = parse_bool(var, value)?;
                let mut cfg = self.effective_lowering();
                cfg.include_locations = parsed;
                self.lowering = Some(cfg);
            }
            ("cache", "enabled") => {
                let parsed = parse_bool(var, value)?;
                let mut cfg = self.effective_cache();
                cfg.enabled = parsed;
                self.cache = Some(cfg);
            }
            ("parallel", "num_workers") => {
                let parsed = parse_usize(var, value)?;
                let mut cfg = self.effective_parallel();
                cfg.num_workers = parsed;
                self.parallel = Some(cfg);
            }
            ("lowering" | "cache" | "parallel", _) => {
                return Err(ConfigError::unknown_field_with_suggestion(
                    field,
                    section,
                    env_fields(section),
                ));
            }
            _ => {
                return Err(ConfigError::unknown_field_with_suggestion(
                    section,
                    "env",
                    valid_sections(),
                ));
            }
        }

        self.provenance.track_field(
            &format!("{}.{}", section, field),
            ConfigSource::Env(var.to_string()),
        );
        Ok(())
    }

    /// Get a human-readable description of the configuration
    pub fn describe(&self) -> String {
        let lowering = self.effective_lowering();
        let cache = self.effective_cache();
        let mut features = vec![if lowering.full_mode { "full" } else { "flag-only" }.to_string()];
        if lowering.full_mode && cache.enabled {
            features.push("cache".to_string());
        }
        if lowering.full_mode && lowering.include_locations {
            features.push("locations".to_string());
        }
        features.push(format!("max_depth={}", lowering.max_depth));
        format!("{} [{}]", self.preset, features.join(", "))
    }
}

fn valid_sections() -> Vec<String> {
    ["lowering", "cache", "parallel"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn env_fields(section: &str) -> Vec<String> {
    let fields: &[&str] = match section {
        "lowering" => &["full_mode", "max_depth", "include_locations"],
        "cache" => &["enabled"],
        "parallel" => &["num_workers"],
        _ => &[],
    };
    fields.iter().map(|s| s.to_string()).collect()
}

fn parse_bool(var: &str, value: &str) -> ConfigResult<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            var: var.to_string(),
            value: value.to_string(),
            expected: "a boolean (true/false/1/0)".to_string(),
        }),
    }
}

fn parse_usize(var: &str, value: &str) -> ConfigResult<usize> {
    value.parse().map_err(|_| ConfigError::InvalidEnv {
        var: var.to_string(),
        value: value.to_string(),
        expected: "a non-negative integer".to_string(),
    })
}

/// Validated configuration (type-safe)
#[derive(Debug, Clone)]
pub struct ValidatedConfig(ExtractionConfig);

impl ValidatedConfig {
    /// Effective lowering settings
    pub fn lowering(&self) -> LoweringSettings {
        self.0.effective_lowering()
    }

    /// Effective cache settings
    pub fn cache(&self) -> CacheSettings {
        self.0.effective_cache()
    }

    /// Effective thread pool settings
    pub fn parallel(&self) -> ParallelConfig {
        self.0.effective_parallel()
    }

    /// Effective vendored-source rules
    pub fn provenance_rules(&self) -> ProvenanceRules {
        self.0.effective_provenance_rules()
    }

    /// Cache in effect: enabled and full mode on
    pub fn cache_active(&self) -> bool {
        self.lowering().full_mode && self.cache().enabled
    }

    pub fn preset(&self) -> Preset {
        self.0.preset
    }

    pub fn provenance(&self) -> &ConfigProvenance {
        &self.0.provenance
    }

    pub fn describe(&self) -> String {
        self.0.describe()
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        self.0.to_yaml()
    }

    /// Back to the builder for further overrides
    pub fn into_inner(self) -> ExtractionConfig {
        self.0
    }
}

impl Default for ValidatedConfig {
    fn default() -> Self {
        ValidatedConfig(ExtractionConfig::default())
    }
}

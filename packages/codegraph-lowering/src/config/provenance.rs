//! Configuration provenance
//!
//! Field-level record of where each effective setting came from. Section
//! overrides (builder closures, YAML sections) are diffed against the settings
//! they replace, so a field is attributed to an override only when its value
//! changed. Environment variables name their field directly. Untouched fields
//! report the preset.

use super::preset::Preset;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// `section.field` → rendered value of every tunable setting
pub type FieldValues = BTreeMap<&'static str, String>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigProvenance {
    preset: Preset,
    /// Overridden fields only, e.g. "cache.enabled" → Env("CODEGRAPH_LOWERING__CACHE__ENABLED")
    field_sources: BTreeMap<String, ConfigSource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    Preset(Preset),
    /// YAML file (path only, no line tracking)
    Yaml { path: String },
    /// Environment variable name
    Env(String),
    Builder,
}

impl ConfigProvenance {
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            preset,
            field_sources: BTreeMap::new(),
        }
    }

    /// Attribute one field to `source`
    pub(crate) fn track_field(&mut self, field_path: &str, source: ConfigSource) {
        self.field_sources.insert(field_path.to_string(), source);
    }

    /// Attribute every field whose value differs between `before` and `after`;
    /// returns how many were attributed
    pub(crate) fn track_changes(
        &mut self,
        before: &FieldValues,
        after: &FieldValues,
        source: &ConfigSource,
    ) -> usize {
        let mut changed = 0;
        for (field, value) in after {
            if before.get(field) != Some(value) {
                self.track_field(field, source.clone());
                changed += 1;
            }
        }
        changed
    }

    /// Source of an overridden field; `None` while the preset value stands
    pub fn get_source(&self, field_path: &str) -> Option<&ConfigSource> {
        self.field_sources.get(field_path)
    }

    /// Effective source of any field
    pub fn source_of(&self, field_path: &str) -> ConfigSource {
        self.get_source(field_path)
            .cloned()
            .unwrap_or(ConfigSource::Preset(self.preset))
    }

    pub fn preset(&self) -> Preset {
        self.preset
    }

    /// Overridden fields in path order
    pub fn overridden_fields(&self) -> impl Iterator<Item = (&str, &ConfigSource)> {
        self.field_sources.iter().map(|(field, source)| (field.as_str(), source))
    }

    /// Preset line followed by one line per overridden field
    pub fn summary(&self) -> String {
        let mut lines = vec![format!("preset: {}", self.preset)];
        lines.extend(
            self.overridden_fields()
                .map(|(field, source)| format!("  {} ← {}", field, source)),
        );
        lines.join("\n")
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preset(preset) => write!(f, "preset:{}", preset),
            Self::Yaml { path } => write!(f, "yaml:{}", path),
            Self::Env(var) => write!(f, "env:{}", var),
            Self::Builder => f.write_str("builder"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(full_mode: bool, max_depth: usize) -> FieldValues {
        FieldValues::from([
            ("lowering.full_mode", full_mode.to_string()),
            ("lowering.max_depth", max_depth.to_string()),
        ])
    }

    #[test]
    fn test_only_changed_fields_are_attributed() {
        let mut prov = ConfigProvenance::from_preset(Preset::Fast);
        let changed = prov.track_changes(&values(false, 128), &values(true, 128), &ConfigSource::Builder);

        assert_eq!(changed, 1);
        assert_eq!(prov.get_source("lowering.full_mode"), Some(&ConfigSource::Builder));
        assert_eq!(prov.get_source("lowering.max_depth"), None);
        assert_eq!(prov.source_of("lowering.max_depth"), ConfigSource::Preset(Preset::Fast));
    }

    #[test]
    fn test_later_override_wins() {
        let mut prov = ConfigProvenance::from_preset(Preset::Balanced);
        prov.track_field("cache.enabled", ConfigSource::Builder);
        prov.track_field(
            "cache.enabled",
            ConfigSource::Env("CODEGRAPH_LOWERING__CACHE__ENABLED".to_string()),
        );
        assert_eq!(
            prov.source_of("cache.enabled").to_string(),
            "env:CODEGRAPH_LOWERING__CACHE__ENABLED"
        );
    }

    #[test]
    fn test_summary_lists_fields_in_path_order() {
        let mut prov = ConfigProvenance::from_preset(Preset::Thorough);
        prov.track_field(
            "lowering.max_depth",
            ConfigSource::Yaml {
                path: "team.yaml".to_string(),
            },
        );
        prov.track_field("cache.enabled", ConfigSource::Builder);

        assert_eq!(
            prov.summary(),
            "preset: thorough\n  cache.enabled ← builder\n  lowering.max_depth ← yaml:team.yaml"
        );
    }
}

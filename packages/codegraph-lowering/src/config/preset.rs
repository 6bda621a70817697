//! Presets - complete starting points for a lowering run
//!
//! A preset fixes the extraction mode and the knobs that follow from it. The
//! section types take their defaults from here, so a preset never disagrees
//! with the settings it produces.

use super::error::ConfigError;
use crate::features::lowering::domain::ExtractionMode;
use crate::shared::constants::lowering::DEFAULT_MAX_DEPTH;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// CI and large dependency trees: existence flags, nothing lowered
    Fast,

    /// Full substructure, fresh resources for every subexpression
    #[default]
    Balanced,

    /// Full substructure, shared identical subexpressions, source positions
    Thorough,

    /// Balanced starting point meant to be overridden from YAML
    Custom,
}

impl Preset {
    pub const ALL: [Preset; 4] = [Self::Fast, Self::Balanced, Self::Thorough, Self::Custom];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Balanced => "balanced",
            Self::Thorough => "thorough",
            Self::Custom => "custom",
        }
    }

    /// Mode a first-party unit is lowered in
    pub fn extraction_mode(self) -> ExtractionMode {
        match self {
            Self::Fast => ExtractionMode::FlagOnly,
            Self::Balanced | Self::Thorough | Self::Custom => ExtractionMode::Full,
        }
    }

    /// Depth before a subtree collapses to the fallback class
    pub fn max_depth(self) -> usize {
        match self {
            Self::Fast => 128,
            Self::Balanced | Self::Custom => DEFAULT_MAX_DEPTH,
            Self::Thorough => 1024,
        }
    }

    /// Identical subexpressions within one call share a resource
    pub fn shares_subtrees(self) -> bool {
        self == Self::Thorough
    }

    /// `startLine` / `startColumn` on non-terminal resources
    pub fn emits_locations(self) -> bool {
        self == Self::Thorough
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    /// Case-insensitive preset name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownPreset(s.to_string()))
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

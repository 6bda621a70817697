//! Lowering outcomes

use crate::shared::models::{Iri, TripleSet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why the gate rejected a call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkipReason {
    /// Full-mode extraction disabled for this run
    FlagOnlyMode,
    /// Dependency / vendored unit, always flag-only
    VendoredSource,
    /// Absent input or an empty block
    EmptyInput,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FlagOnlyMode => "flag-only mode",
            Self::VendoredSource => "vendored source",
            Self::EmptyInput => "empty input",
        })
    }
}

/// Result of one lowering call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoweringOutcome {
    /// Gate rejected the call: no identity consumed, no statements
    Skipped(SkipReason),
    Produced {
        resource: Iri,
        statements: TripleSet,
    },
}

impl LoweringOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Self::Skipped(reason) => Some(*reason),
            Self::Produced { .. } => None,
        }
    }

    pub fn resource(&self) -> Option<&Iri> {
        match self {
            Self::Produced { resource, .. } => Some(resource),
            Self::Skipped(_) => None,
        }
    }

    pub fn statements(&self) -> Option<&TripleSet> {
        match self {
            Self::Produced { statements, .. } => Some(statements),
            Self::Skipped(_) => None,
        }
    }

    /// `(resource, statements)` when produced
    pub fn into_produced(self) -> Option<(Iri, TripleSet)> {
        match self {
            Self::Produced {
                resource,
                statements,
            } => Some((resource, statements)),
            Self::Skipped(_) => None,
        }
    }
}

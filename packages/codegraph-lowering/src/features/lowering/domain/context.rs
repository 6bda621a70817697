//! Lowering context - explicitly threaded identity state
//!
//! A `LoweringContext` is deliberately not `Clone`. Operations that advance
//! the identity counter take the context by value and hand back its
//! successor, so a superseded context cannot be used again.

use super::cache::StructuralCache;
use crate::config::ValidatedConfig;
use crate::shared::constants::lowering::DEFAULT_MAX_DEPTH;
use crate::shared::models::{Iri, LoweringResult};
use crate::shared::utils::id_generator::{IdGenerator, IdLineage};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path};

/// Depth of extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtractionMode {
    /// Existence flags only; the driver produces nothing
    FlagOnly,
    /// Complete expression substructure
    Full,
}

/// Classification table used for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassifyMode {
    Expression,
    Pattern,
}

impl ClassifyMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expression => "expression",
            Self::Pattern => "pattern",
        }
    }
}

/// Whether a source unit is the project's own code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceOrigin {
    FirstParty,
    /// Dependency / vendored code, always flag-only
    Vendored,
}

impl SourceOrigin {
    /// Vendored when any path component names a dependency directory
    pub fn classify<S: AsRef<str>>(path: &str, vendored_dirs: &[S]) -> Self {
        let vendored = Path::new(path).components().any(|c| match c {
            Component::Normal(part) => part
                .to_str()
                .is_some_and(|p| vendored_dirs.iter().any(|d| d.as_ref() == p)),
            _ => false,
        });
        if vendored {
            Self::Vendored
        } else {
            Self::FirstParty
        }
    }

    pub fn is_first_party(self) -> bool {
        matches!(self, Self::FirstParty)
    }
}

/// Per-lineage lowering limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoweringLimits {
    pub max_depth: usize,
    pub include_locations: bool,
}

impl Default for LoweringLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            include_locations: false,
        }
    }
}

/// Counters accumulated over one lineage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoweringStats {
    pub roots_produced: u64,
    pub roots_skipped: u64,
    pub nodes_lowered: u64,
    pub cache_hits: u64,
    pub truncated_subtrees: u64,
}

impl LoweringStats {
    pub fn absorb(&mut self, other: &LoweringStats) {
        self.roots_produced += other.roots_produced;
        self.roots_skipped += other.roots_skipped;
        self.nodes_lowered += other.nodes_lowered;
        self.cache_hits += other.cache_hits;
        self.truncated_subtrees += other.truncated_subtrees;
    }
}

/// Extraction context of one lineage
#[derive(Debug)]
pub struct LoweringContext {
    lineage: IdLineage,
    mode: ExtractionMode,
    origin: SourceOrigin,
    classify_mode: ClassifyMode,
    limits: LoweringLimits,
    cache: Option<StructuralCache>,
    stats: LoweringStats,
}

impl LoweringContext {
    /// Fresh lineage: full mode, first-party, expression table, no cache
    pub fn new(namespace: Iri) -> Self {
        Self {
            lineage: IdGenerator::lineage(namespace),
            mode: ExtractionMode::Full,
            origin: SourceOrigin::FirstParty,
            classify_mode: ClassifyMode::Expression,
            limits: LoweringLimits::default(),
            cache: None,
            stats: LoweringStats::default(),
        }
    }

    /// Fresh lineage configured from validated settings
    pub fn from_config(namespace: Iri, config: &ValidatedConfig, origin: SourceOrigin) -> Self {
        let lowering = config.lowering();
        let mode = if lowering.full_mode {
            ExtractionMode::Full
        } else {
            ExtractionMode::FlagOnly
        };
        let ctx = Self::new(namespace)
            .with_mode(mode)
            .with_origin(origin)
            .with_limits(LoweringLimits {
                max_depth: lowering.max_depth,
                include_locations: lowering.include_locations,
            });
        if config.cache_active() {
            ctx.with_cache(StructuralCache::from_settings(&config.cache()))
        } else {
            ctx
        }
    }

    pub fn with_mode(mut self, mode: ExtractionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_origin(mut self, origin: SourceOrigin) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_classify_mode(mut self, mode: ClassifyMode) -> Self {
        self.classify_mode = mode;
        self
    }

    pub fn with_limits(mut self, limits: LoweringLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_cache(mut self, cache: StructuralCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Draw the next root identifier; the receiver is consumed
    pub fn next_root(self) -> LoweringResult<(Iri, Self)> {
        let Self {
            lineage,
            mode,
            origin,
            classify_mode,
            limits,
            cache,
            stats,
        } = self;
        let (id, lineage) = IdGenerator::next_root(lineage)?;
        Ok((
            id,
            Self {
                lineage,
                mode,
                origin,
                classify_mode,
                limits,
                cache,
                stats,
            },
        ))
    }

    pub fn namespace(&self) -> &Iri {
        self.lineage.namespace()
    }

    /// True when `id` was (or could have been) issued by this lineage
    pub fn owns(&self, id: &Iri) -> bool {
        id.is_within(self.namespace()) && id != self.namespace()
    }

    pub fn mode(&self) -> ExtractionMode {
        self.mode
    }

    pub fn origin(&self) -> SourceOrigin {
        self.origin
    }

    pub fn classify_mode(&self) -> ClassifyMode {
        self.classify_mode
    }

    pub fn limits(&self) -> LoweringLimits {
        self.limits
    }

    /// Root identifiers drawn so far
    pub fn issued(&self) -> u64 {
        self.lineage.issued()
    }

    pub fn cache(&self) -> Option<&StructuralCache> {
        self.cache.as_ref()
    }

    pub fn stats(&self) -> &LoweringStats {
        &self.stats
    }

    pub(crate) fn cache_mut(&mut self) -> Option<&mut StructuralCache> {
        self.cache.as_mut()
    }

    pub(crate) fn stats_mut(&mut self) -> &mut LoweringStats {
        &mut self.stats
    }
}

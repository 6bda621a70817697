//! Lowering UseCase Implementation
//!
//! ```text
//! Pipeline / Adapters
//!        ↓
//! LoweringUseCase (this module)
//!        ↓
//! LoweringDriver (infrastructure)
//!        ↓
//! LoweringContext / LoweringOutcome (domain)
//! ```

use tracing::debug;

use crate::config::ValidatedConfig;
use crate::features::lowering::domain::{
    LoweringContext, LoweringOutcome, LoweringStats, SkipReason, SourceOrigin, SourceUnit,
    SyntaxLowering,
};
use crate::features::lowering::infrastructure::LoweringDriver;
use crate::shared::models::{Iri, LoweringResult, TripleSet};
use crate::shared::IdGenerator;

/// Lowered graph of one source unit
#[derive(Debug, Clone, PartialEq)]
pub struct UnitLowering {
    pub path: String,
    pub namespace: Iri,
    pub origin: SourceOrigin,
    /// Union of every produced root's statements
    pub statements: TripleSet,
    /// Root resources, in input order
    pub resources: Vec<Iri>,
    /// One entry per skipped root
    pub skipped: Vec<SkipReason>,
    pub stats: LoweringStats,
}

impl UnitLowering {
    pub fn statement_count(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

/// Lowering UseCase Trait (Port)
pub trait LoweringUseCase: Send + Sync {
    /// Lower every root of `unit`, threading one context lineage through them
    fn lower_unit(&self, unit: &SourceUnit) -> LoweringResult<UnitLowering>;

    /// Namespace the unit's root identifiers are drawn under
    fn namespace_for(&self, path: &str) -> Iri;
}

/// Lowering UseCase Implementation
#[derive(Debug, Clone)]
pub struct LoweringUseCaseImpl {
    config: ValidatedConfig,
    driver: LoweringDriver,
}

impl Default for LoweringUseCaseImpl {
    fn default() -> Self {
        Self::new(ValidatedConfig::default())
    }
}

impl LoweringUseCaseImpl {
    pub fn new(config: ValidatedConfig) -> Self {
        Self {
            config,
            driver: LoweringDriver::new(),
        }
    }

    pub fn config(&self) -> &ValidatedConfig {
        &self.config
    }

    pub fn origin_of(&self, path: &str) -> SourceOrigin {
        SourceOrigin::classify(path, &self.config.provenance_rules().vendored_dirs)
    }
}

impl LoweringUseCase for LoweringUseCaseImpl {
    fn lower_unit(&self, unit: &SourceUnit) -> LoweringResult<UnitLowering> {
        let origin = self.origin_of(&unit.path);
        let namespace = self.namespace_for(&unit.path);
        let mut ctx = LoweringContext::from_config(namespace.clone(), &self.config, origin);

        let mut statements = TripleSet::new();
        let mut resources = Vec::with_capacity(unit.roots.len());
        let mut skipped = Vec::new();

        let mut record = |outcome: LoweringOutcome| match outcome {
            LoweringOutcome::Produced {
                resource,
                statements: produced,
            } => {
                statements.merge(produced);
                resources.push(resource);
            }
            LoweringOutcome::Skipped(reason) => skipped.push(reason),
        };

        if unit.roots.is_empty() {
            let (outcome, next) = self.driver.lower(None, ctx)?;
            record(outcome);
            ctx = next;
        }
        for root in &unit.roots {
            let (outcome, next) = self.driver.lower(Some(root), ctx)?;
            record(outcome);
            ctx = next;
        }

        let stats = *ctx.stats();
        debug!(
            path = %unit.path,
            namespace = %namespace,
            produced = resources.len(),
            skipped = skipped.len(),
            statements = statements.len(),
            "unit lowered"
        );

        Ok(UnitLowering {
            path: unit.path.clone(),
            namespace,
            origin,
            statements,
            resources,
            skipped,
            stats,
        })
    }

    fn namespace_for(&self, path: &str) -> Iri {
        IdGenerator::unit_namespace(&self.config.lowering().base_namespace, path)
    }
}

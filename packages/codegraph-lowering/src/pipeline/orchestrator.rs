//! Lowering Orchestrator - fan out source units, fan in one graph
//!
//! Each unit gets its own context lineage and namespace, so units can be
//! lowered on any worker in any order. Roots inside a unit stay sequential.

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::info;

use crate::config::ValidatedConfig;
use crate::features::lowering::application::{LoweringUseCase, LoweringUseCaseImpl, UnitLowering};
use crate::features::lowering::domain::{LoweringStats, SourceOrigin, SourceUnit};
use crate::shared::constants::thread_pool;
use crate::shared::models::{Iri, LoweringError, LoweringResult, TripleSet};

/// Per-unit summary, in input order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitSummary {
    pub path: String,
    pub namespace: Iri,
    pub origin: SourceOrigin,
    pub roots_produced: usize,
    pub roots_skipped: usize,
    pub statements: usize,
}

impl From<&UnitLowering> for UnitSummary {
    fn from(unit: &UnitLowering) -> Self {
        Self {
            path: unit.path.clone(),
            namespace: unit.namespace.clone(),
            origin: unit.origin,
            roots_produced: unit.resources.len(),
            roots_skipped: unit.skipped.len(),
            statements: unit.statements.len(),
        }
    }
}

/// Aggregated counters of one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub units: usize,
    pub vendored_units: usize,
    /// Statements in the merged graph
    pub statements: usize,
    pub lowering: LoweringStats,
    pub workers: usize,
    #[serde(skip)]
    pub elapsed: Duration,
}

/// Result of one orchestrator run
#[derive(Debug, Clone)]
pub struct LoweringReport {
    /// Union of every unit's statements
    pub graph: TripleSet,
    pub units: Vec<UnitSummary>,
    pub stats: PipelineStats,
}

impl LoweringReport {
    pub fn unit(&self, path: &str) -> Option<&UnitSummary> {
        self.units.iter().find(|u| u.path == path)
    }
}

pub struct LoweringOrchestrator {
    usecase: Box<dyn LoweringUseCase>,
    config: ValidatedConfig,
}

impl LoweringOrchestrator {
    pub fn new(config: ValidatedConfig) -> Self {
        Self {
            usecase: Box::new(LoweringUseCaseImpl::new(config.clone())),
            config,
        }
    }

    /// Orchestrate a custom use case; `config` still drives the thread pool
    pub fn with_usecase(usecase: Box<dyn LoweringUseCase>, config: ValidatedConfig) -> Self {
        Self { usecase, config }
    }

    pub fn config(&self) -> &ValidatedConfig {
        &self.config
    }

    /// Lower every unit and merge the results into one graph
    pub fn run(&self, units: &[SourceUnit]) -> LoweringResult<LoweringReport> {
        let start = Instant::now();
        self.check_namespaces(units)?;

        let parallel = self.config.parallel();
        let workers = if cfg!(feature = "parallel") && parallel.enable_rayon && units.len() > 1 {
            parallel.resolved_workers()
        } else {
            1
        };
        info!(units = units.len(), workers, "lowering fan-out");

        let lowered: Vec<UnitLowering> = if workers > 1 {
            self.lower_parallel(units, workers)?
        } else {
            units
                .iter()
                .map(|unit| self.usecase.lower_unit(unit))
                .collect::<LoweringResult<_>>()?
        };

        let report = Self::fan_in(lowered, workers, start.elapsed());
        info!(
            units = report.stats.units,
            statements = report.stats.statements,
            produced = report.stats.lowering.roots_produced,
            skipped = report.stats.lowering.roots_skipped,
            cache_hits = report.stats.lowering.cache_hits,
            elapsed_ms = report.stats.elapsed.as_millis() as u64,
            "lowering fan-in"
        );
        Ok(report)
    }

    /// Dedicated pool so the caller's global rayon pool is left alone
    fn lower_parallel(&self, units: &[SourceUnit], workers: usize) -> LoweringResult<Vec<UnitLowering>> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .stack_size(thread_pool::STACK_SIZE)
            .thread_name(|i| format!("codegraph-lowering-{}", i))
            .build()
            .map_err(|e| LoweringError::internal(format!("failed to build lowering pool: {}", e)))?;

        pool.install(|| {
            units
                .par_iter()
                .map(|unit| self.usecase.lower_unit(unit))
                .collect::<LoweringResult<Vec<_>>>()
        })
    }

    /// Two units drawing from one namespace would share identifiers
    fn check_namespaces(&self, units: &[SourceUnit]) -> LoweringResult<()> {
        let mut seen: FxHashMap<Iri, &str> = FxHashMap::default();
        for unit in units {
            let namespace = self.usecase.namespace_for(&unit.path);
            if let Some(first) = seen.insert(namespace.clone(), &unit.path) {
                return Err(LoweringError::context_misuse(
                    format!("a fresh namespace for {}", unit.path),
                    format!("{} already used by {}", namespace, first),
                ));
            }
        }
        Ok(())
    }

    fn fan_in(lowered: Vec<UnitLowering>, workers: usize, elapsed: Duration) -> LoweringReport {
        let mut graph = TripleSet::new();
        let mut units = Vec::with_capacity(lowered.len());
        let mut stats = PipelineStats {
            units: lowered.len(),
            workers,
            ..PipelineStats::default()
        };

        for unit in lowered {
            units.push(UnitSummary::from(&unit));
            stats.lowering.absorb(&unit.stats);
            if unit.origin == SourceOrigin::Vendored {
                stats.vendored_units += 1;
            }
            graph.merge(unit.statements);
        }
        stats.statements = graph.len();
        stats.elapsed = elapsed;

        LoweringReport {
            graph,
            units,
            stats,
        }
    }
}

impl Default for LoweringOrchestrator {
    fn default() -> Self {
        Self::new(ValidatedConfig::default())
    }
}

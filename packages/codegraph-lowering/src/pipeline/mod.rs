//! Pipeline - multi-unit lowering on a rayon pool

pub mod orchestrator;

pub use orchestrator::{LoweringOrchestrator, LoweringReport, PipelineStats, UnitSummary};

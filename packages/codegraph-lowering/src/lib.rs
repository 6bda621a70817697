/*
 * Codegraph Lowering - Syntax tree → semantic graph engine
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (SyntaxNode, Iri, TripleSet, errors)
 * - features/    : Vertical slices (lowering → control_flow collaborators)
 * - pipeline/    : Multi-unit orchestration on a rayon pool
 * - config/      : Presets, builder overrides, YAML v1, env overrides
 *
 * Identity:
 * - Roots: `{namespace}/{n}`, children: `{parent}/{role}`
 * - A skipped node never consumes an identifier
 */

#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::needless_lifetimes)] // Explicit lifetimes for clarity

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and utilities
pub mod shared;

/// Feature modules (lowering, control flow collaborators)
pub mod features;

/// Pipeline orchestration
pub mod pipeline;

/// Configuration system
pub mod config;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{ConfigError, ExtractionConfig, Preset, ValidatedConfig};

pub use features::control_flow::{BranchExtractor, BranchKind, GuardExtractor};
pub use features::lowering::{
    ClassifyMode, ExtractionMode, LoweringContext, LoweringDriver, LoweringOutcome,
    LoweringStats, LoweringUseCase, LoweringUseCaseImpl, ShapeTag, SkipReason, SourceOrigin,
    SourceUnit, SyntaxLowering, UnitLowering,
};

pub use pipeline::{LoweringOrchestrator, LoweringReport};

pub use shared::models::{Iri, Literal, LoweringError, LoweringResult, Object, SyntaxNode, Triple, TripleSet};

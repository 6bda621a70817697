//! Lowering feature module
//!
//! Turns a parsed syntax tree into a flat set of semantic graph statements.
//!
//! # Architecture (Hexagonal)
//!
//! ```text
//! External Callers (Pipeline, collaborators)
//!           ↓
//! application/ (LoweringUseCase) ← Entry Point
//!           ↓
//! domain/ (context, shapes, vocabulary, SyntaxLowering port)
//!           ↑
//! infrastructure/ (classifier, builders, gate, driver)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use codegraph_lowering::features::lowering::{LoweringContext, LoweringDriver, SyntaxLowering};
//!
//! let ctx = LoweringContext::new(Iri::new("urn:unit"));
//! let (outcome, ctx) = LoweringDriver::new().lower(Some(&tree), ctx)?;
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{LoweringUseCase, LoweringUseCaseImpl, UnitLowering};

pub use domain::{
    BuildContext, Built, CacheKey, CachedSubtree, ChildRequest, ClassifyMode, ExtractionMode,
    LoweringContext, LoweringLimits, LoweringOutcome, LoweringStats, ShapeTag, SkipReason, Slot,
    SourceOrigin, SourceUnit, StructuralCache, SyntaxLowering,
};

pub use infrastructure::{classify, BuilderRegistry, LoweringDriver, ModeGate};

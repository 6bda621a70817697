//! Lowering Application Layer (UseCase)
//!
//! External callers (pipeline, adapters) → `LoweringUseCase` → driver.
//! One call lowers every root of one source unit through a single lineage.

mod lowering_usecase;

pub use lowering_usecase::{LoweringUseCase, LoweringUseCaseImpl, UnitLowering};

//! Control flow collaborators
//!
//! Guard and branch extractors consume the `SyntaxLowering` port as an
//! optional dependency. Without it (or when the gate rejects the call) they
//! fall back to flag-only facts.

pub mod branch;
pub mod guard;

pub use branch::{BranchExtraction, BranchExtractor, BranchKind, BranchShape};
pub use guard::{GuardExtraction, GuardExtractor, GUARD_ROLE};

//! Shared module - Common types and utilities
//!
//! Types shared by every feature: the syntax tree input model, the graph
//! statement model, error types and identifier generation.

pub mod constants;
pub mod models;
pub mod utils;

// Re-exports for convenience
pub use models::*;
pub use utils::id_generator::{IdGenerator, IdLineage};

//! Utility modules shared across features
//!
//! - `id_generator`: root / relative resource identifiers and unit namespaces
//! - `stack`: on-demand stack growth for the recursive descent

pub mod id_generator;
pub mod stack;

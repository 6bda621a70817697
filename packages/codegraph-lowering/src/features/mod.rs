//! Feature modules - each feature follows Hexagonal Architecture
//!
//! - lowering/     - syntax tree → semantic graph statements
//! - control_flow/ - guard and branch extraction on top of the lowering port

pub mod control_flow;
pub mod lowering;

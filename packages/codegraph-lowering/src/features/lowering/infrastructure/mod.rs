//! Lowering infrastructure: classifier, builders, gate, cache keys and driver

pub mod builders;
pub mod classifier;
pub mod driver;
pub mod fingerprint;
pub mod gate;

pub use builders::BuilderRegistry;
pub use classifier::classify;
pub use driver::LoweringDriver;
pub use fingerprint::structural_key;
pub use gate::ModeGate;

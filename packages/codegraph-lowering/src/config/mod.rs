//! Configuration system
//!
//! Three levels, each overriding the previous:
//! 1. `Preset` - complete defaults (fast / balanced / thorough / custom)
//! 2. Builder overrides - `ExtractionConfig::preset(..).lowering(|c| ..)`
//! 3. YAML v1 files and `CODEGRAPH_LOWERING__<SECTION>__<FIELD>` environment variables
//!
//! Every override is recorded in `ConfigProvenance`.
//!
//! ```ignore
//! let config = ExtractionConfig::preset(Preset::Balanced)
//!     .cache(|c| c.enabled(true))
//!     .with_env()?
//!     .build()?;
//! ```

pub mod error;
pub mod extraction_config;
pub mod io;
pub mod preset;
pub mod provenance;
pub mod section_configs;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use extraction_config::{ExtractionConfig, ValidatedConfig};
pub use io::{ConfigExportV1, ConfigOverrides};
pub use preset::Preset;
pub use provenance::{ConfigProvenance, ConfigSource};
pub use section_configs::{CacheSettings, LoweringSettings, ParallelConfig, ProvenanceRules};
pub use validation::{Validatable, ValidatableCollection};

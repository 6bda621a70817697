//! Centralized configuration constants
//!
//! Defaults and tunable limits used across config, lowering and the pipeline.

/// Thread pool configuration
pub mod thread_pool {
    /// Percentage of available CPU cores to use for the rayon pool
    pub const CPU_UTILIZATION_PERCENT: f64 = 0.75;

    /// Minimum number of threads (always use at least 1)
    pub const MIN_THREADS: usize = 1;

    /// Upper bound accepted for `parallel.num_workers`
    pub const MAX_WORKERS: usize = 256;

    /// Worker stack size; recursion depth follows `lowering.max_depth`
    pub const STACK_SIZE: usize = 16 * 1024 * 1024;
}

/// Lowering limits
pub mod lowering {
    /// Default recursion depth before a subtree collapses to the fallback class
    pub const DEFAULT_MAX_DEPTH: usize = 256;

    /// Hard ceiling for `lowering.max_depth`
    pub const MAX_DEPTH_LIMIT: usize = 4096;

    /// Default base namespace for unit resources
    pub const DEFAULT_BASE_NAMESPACE: &str = "https://codegraph.dev/unit";

    /// Hex characters of the path digest appended to unit namespaces
    pub const NAMESPACE_DIGEST_LEN: usize = 12;
}

/// Structural cache limits
pub mod cache {
    /// Subtrees smaller than this are never shared (terminals stay distinct)
    pub const DEFAULT_MIN_SUBTREE_NODES: usize = 2;

    /// Larger subtrees are lowered afresh instead of fingerprinted and copied
    pub const MAX_SHARED_SUBTREE_NODES: usize = 256;

    /// Default cap on cache entries per lineage
    pub const DEFAULT_MAX_ENTRIES: usize = 65_536;

    /// Hard ceiling for `cache.max_entries`
    pub const MAX_ENTRIES_LIMIT: usize = 4_194_304;
}

/// Source provenance
pub mod provenance {
    /// Path components marking dependency / vendored code
    pub const DEFAULT_VENDORED_DIRS: &[&str] = &["deps", "_build", "vendor"];
}

/// Environment overrides
pub mod env {
    /// Prefix of override variables: `CODEGRAPH_LOWERING__<SECTION>__<FIELD>`
    pub const PREFIX: &str = "CODEGRAPH_LOWERING__";
}

//! Stack growth for deep recursion
//!
//! The driver descends one native frame per tree level, and `lowering.max_depth`
//! admits trees deeper than a default thread stack holds. Each recursive step
//! runs through [`ensure_sufficient_stack`], which moves onto a freshly
//! allocated segment when the remaining stack drops below the red zone.

/// Remaining stack below which a new segment is allocated (128KB)
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated segment (1MB)
const STACK_PER_SEGMENT: usize = 1024 * 1024;

#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_SEGMENT, f)
}

/// WASM manages its own stack
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

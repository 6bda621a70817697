//! Structural cache - normalized subtree key → previously produced resource
//!
//! Owned by one context lineage; never shared between lineages. Entries only
//! live for one top-level lowering call: the driver clears the cache on entry.

use crate::config::CacheSettings;
use crate::shared::constants::cache::MAX_SHARED_SUBTREE_NODES;
use crate::shared::models::{Iri, Triple};
use rustc_hash::FxHashMap;
use std::fmt;

/// Digest of a normalized subtree plus the slot it was lowered in
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey([u8; 32]);

impl CacheKey {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CacheKey(")?;
        for b in &self.0[..8] {
            write!(f, "{:02x}", b)?;
        }
        write!(f, "…)")
    }
}

/// Output of an earlier lowering of an identical subtree
#[derive(Debug, Clone)]
pub struct CachedSubtree {
    pub resource: Iri,
    pub statements: Vec<Triple>,
}

#[derive(Debug, Clone)]
pub struct StructuralCache {
    entries: FxHashMap<CacheKey, CachedSubtree>,
    min_subtree_nodes: usize,
    max_subtree_nodes: usize,
    max_entries: usize,
}

impl StructuralCache {
    pub fn new(min_subtree_nodes: usize, max_entries: usize) -> Self {
        Self {
            entries: FxHashMap::default(),
            min_subtree_nodes: min_subtree_nodes.max(1),
            max_subtree_nodes: MAX_SHARED_SUBTREE_NODES,
            max_entries,
        }
    }

    pub fn from_settings(settings: &CacheSettings) -> Self {
        Self::new(settings.min_subtree_nodes, settings.max_entries)
    }

    /// Subtrees outside `[min_subtree_nodes, max_subtree_nodes]` are never shared
    pub fn is_eligible(&self, subtree_nodes: usize) -> bool {
        (self.min_subtree_nodes..=self.max_subtree_nodes).contains(&subtree_nodes)
    }

    /// Largest subtree worth fingerprinting
    pub fn max_subtree_nodes(&self) -> usize {
        self.max_subtree_nodes
    }

    pub fn get(&self, key: &CacheKey) -> Option<&CachedSubtree> {
        self.entries.get(key)
    }

    /// Record a produced subtree. First writer wins; nothing is stored past the cap.
    pub fn insert(&mut self, key: CacheKey, resource: Iri, statements: Vec<Triple>) -> bool {
        if self.is_full() || self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(
            key,
            CachedSubtree {
                resource,
                statements,
            },
        );
        true
    }

    /// Forget every entry; settings are kept
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.max_entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(b: u8) -> CacheKey {
        CacheKey::from_bytes([b; 32])
    }

    #[test]
    fn test_first_writer_wins() {
        let mut cache = StructuralCache::new(2, 10);
        assert!(cache.insert(key(1), Iri::new("urn:a/1"), Vec::new()));
        assert!(!cache.insert(key(1), Iri::new("urn:a/2"), Vec::new()));
        assert_eq!(cache.get(&key(1)).unwrap().resource.as_str(), "urn:a/1");
    }

    #[test]
    fn test_cap_stops_insertions() {
        let mut cache = StructuralCache::new(2, 1);
        assert!(cache.insert(key(1), Iri::new("urn:a/1"), Vec::new()));
        assert!(cache.is_full());
        assert!(!cache.insert(key(2), Iri::new("urn:a/2"), Vec::new()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_eligibility_threshold() {
        let cache = StructuralCache::from_settings(&CacheSettings::default());
        assert!(!cache.is_eligible(1));
        assert!(cache.is_eligible(2));
        assert!(cache.is_eligible(MAX_SHARED_SUBTREE_NODES));
        assert!(!cache.is_eligible(MAX_SHARED_SUBTREE_NODES + 1));
    }

    #[test]
    fn test_clear_keeps_settings() {
        let mut cache = StructuralCache::new(3, 1);
        cache.insert(key(1), Iri::new("urn:a/1"), Vec::new());
        assert!(cache.is_full());
        cache.clear();
        assert!(cache.is_empty());
        assert!(!cache.is_eligible(2));
        assert!(cache.insert(key(2), Iri::new("urn:a/2"), Vec::new()));
    }
}

//! ID generation utilities
//!
//! Two identifier forms:
//! - root:     `{namespace}/{counter}`, drawn from an explicitly threaded lineage
//! - relative: `{parent}/{role}`, a pure function of the parent and its role
//!
//! There is no process-wide counter. A lineage is consumed by `next_root` and
//! the successor is returned, so two calls can never draw from the same state.

use crate::shared::constants::lowering::NAMESPACE_DIGEST_LEN;
use crate::shared::models::{Iri, LoweringError, LoweringResult};

/// Identity state of one top-level lowering lineage
#[derive(Debug, PartialEq, Eq)]
pub struct IdLineage {
    namespace: Iri,
    counter: u64,
}

impl IdLineage {
    pub fn namespace(&self) -> &Iri {
        &self.namespace
    }

    /// Number of root identifiers drawn so far
    pub fn issued(&self) -> u64 {
        self.counter
    }
}

/// ID Generator for root and relative resource identifiers
pub struct IdGenerator;

impl IdGenerator {
    /// Fresh lineage with nothing issued
    pub fn lineage(namespace: Iri) -> IdLineage {
        IdLineage {
            namespace,
            counter: 0,
        }
    }

    /// Advance the lineage and return `{namespace}/{counter}`
    pub fn next_root(lineage: IdLineage) -> LoweringResult<(Iri, IdLineage)> {
        let counter = lineage
            .counter
            .checked_add(1)
            .ok_or_else(|| LoweringError::CounterExhausted {
                namespace: lineage.namespace.to_string(),
            })?;
        let id = lineage.namespace.join(&counter.to_string());
        Ok((
            id,
            IdLineage {
                namespace: lineage.namespace,
                counter,
            },
        ))
    }

    /// `{parent}/{role}`
    pub fn relative(parent: &Iri, role: &str) -> Iri {
        parent.join(role)
    }

    /// Namespace of one source unit: `{base}/{slug}-{digest}`
    ///
    /// The slug keeps identifiers readable; the digest of the full path keeps
    /// units whose slugs coincide (`a/b.ex` vs `a_b.ex`) apart.
    pub fn unit_namespace(base: &str, unit_path: &str) -> Iri {
        let slug: String = unit_path
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        let slug = slug.trim_matches('_');
        let digest = blake3::hash(unit_path.as_bytes()).to_hex();
        Iri::new(format!(
            "{}/{}-{}",
            base.trim_end_matches('/'),
            slug,
            &digest.as_str()[..NAMESPACE_DIGEST_LEN]
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_root_is_sequential() {
        let lineage = IdGenerator::lineage(Iri::new("urn:unit"));
        let (first, lineage) = IdGenerator::next_root(lineage).unwrap();
        let (second, lineage) = IdGenerator::next_root(lineage).unwrap();

        assert_eq!(first.as_str(), "urn:unit/1");
        assert_eq!(second.as_str(), "urn:unit/2");
        assert_eq!(lineage.issued(), 2);
    }

    #[test]
    fn test_independent_lineages_do_not_interfere() {
        let a = IdGenerator::lineage(Iri::new("urn:a"));
        let b = IdGenerator::lineage(Iri::new("urn:b"));
        let (a1, _) = IdGenerator::next_root(a).unwrap();
        let (b1, _) = IdGenerator::next_root(b).unwrap();
        assert_ne!(a1, b1);
    }

    #[test]
    fn test_counter_exhaustion() {
        let lineage = IdLineage {
            namespace: Iri::new("urn:full"),
            counter: u64::MAX,
        };
        let err = IdGenerator::next_root(lineage).unwrap_err();
        assert!(matches!(err, LoweringError::CounterExhausted { .. }));
    }

    #[test]
    fn test_relative_is_pure() {
        let parent = Iri::new("urn:unit/1");
        assert_eq!(
            IdGenerator::relative(&parent, "left"),
            IdGenerator::relative(&parent, "left")
        );
        assert_eq!(IdGenerator::relative(&parent, "0").as_str(), "urn:unit/1/0");
    }

    #[test]
    fn test_unit_namespace_disambiguates_slugs() {
        let a = IdGenerator::unit_namespace("https://x.dev/unit/", "a/b.ex");
        let b = IdGenerator::unit_namespace("https://x.dev/unit", "a_b.ex");
        assert!(a.as_str().starts_with("https://x.dev/unit/a_b.ex-"));
        assert!(b.as_str().starts_with("https://x.dev/unit/a_b.ex-"));
        assert_ne!(a, b);
        assert_eq!(a, IdGenerator::unit_namespace("https://x.dev/unit", "a/b.ex"));
    }
}

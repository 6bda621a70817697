//! Property-based tests for the lowering engine
//!
//! Invariants that must hold for ALL generated trees:
//! - Totality: classification and lowering never fail on data
//! - Determinism: identical trees + fresh contexts → identical statements
//! - Uniqueness: every produced resource carries exactly one is-a
//! - Isolation: independent namespaces never share identifiers
//! - Gating: flag-only contexts always skip
//! - Closure: every linked resource is described in the same statement set

mod common;

use codegraph_lowering::features::lowering::domain::StructuralCache;
use codegraph_lowering::features::lowering::infrastructure::classify;
use codegraph_lowering::{
    ClassifyMode, ExtractionMode, LoweringDriver, Object, SkipReason, SyntaxLowering, SyntaxNode,
};
use common::*;
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

const NAMES: &[&str] = &[
    "x", "_", "_acc", "user", "__MODULE__", "foo", "if", "case", "cond", "fn", "for", "with",
    "try", "receive", "raise", "throw", "%{}", "{}", "<<>>", "__block__", "__aliases__",
];
const OPERATORS: &[&str] = &[
    "+", "-", "==", "<", "and", "||", "not", "<>", "++", "in", "=", "|>", "..", "|", "::", "&",
    "^", "@", "->", "<-", "when", "\\\\", "%",
];
const ATOMS: &[&str] = &["ok", "error", "true", "false", "nil", "do", "else", "after"];

fn leaf() -> impl Strategy<Value = SyntaxNode> {
    prop_oneof![
        any::<i64>().prop_map(SyntaxNode::int),
        (-1.0e6f64..1.0e6).prop_map(SyntaxNode::float),
        "[a-z]{0,6}".prop_map(SyntaxNode::string),
        prop::sample::select(ATOMS).prop_map(SyntaxNode::atom),
        prop::sample::select(NAMES).prop_map(SyntaxNode::var),
    ]
}

fn tree() -> impl Strategy<Value = SyntaxNode> {
    leaf().prop_recursive(5, 64, 4, |inner| {
        prop_oneof![
            (prop::sample::select(OPERATORS), inner.clone(), inner.clone())
                .prop_map(|(op, l, r)| SyntaxNode::op(op, l, r)),
            (prop::sample::select(OPERATORS), inner.clone())
                .prop_map(|(op, x)| SyntaxNode::unary(op, x)),
            (prop::sample::select(NAMES), prop::collection::vec(inner.clone(), 0..4))
                .prop_map(|(name, args)| SyntaxNode::call(name, args)),
            prop::collection::vec(inner.clone(), 0..4).prop_map(SyntaxNode::list),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| SyntaxNode::pair(a, b)),
            (prop::sample::select(ATOMS), inner.clone())
                .prop_map(|(key, value)| SyntaxNode::keyword(vec![(key, value)])),
            (prop::collection::vec(inner.clone(), 1..3), inner.clone())
                .prop_map(|(heads, body)| SyntaxNode::clause(heads, body)),
            (inner.clone(), prop::sample::select(NAMES), prop::collection::vec(inner, 0..3))
                .prop_map(|(target, fun, args)| SyntaxNode::remote_call(target, fun, args)),
        ]
    })
}

fn mode() -> impl Strategy<Value = ClassifyMode> {
    prop_oneof![Just(ClassifyMode::Expression), Just(ClassifyMode::Pattern)]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_classification_is_total(node in tree()) {
        let expression = classify(&node, ClassifyMode::Expression);
        let pattern = classify(&node, ClassifyMode::Pattern);
        // forced-only shapes are never produced by the classifier
        prop_assert!(!expression.is_forced_only());
        prop_assert!(!pattern.is_forced_only());
        prop_assert!(!expression.is_pattern());
    }

    #[test]
    fn prop_lowering_is_total_and_single_typed(node in tree(), mode in mode()) {
        let ctx = fresh_context("urn:prop").with_classify_mode(mode);
        let (outcome, _) = LoweringDriver::new().lower(Some(&node), ctx).unwrap();
        let (root, statements) = match outcome.into_produced() {
            Some(produced) => produced,
            // only an empty block is rejected in full mode
            None => {
                prop_assert!(node.is_empty_block());
                return Ok(());
            }
        };

        prop_assert_eq!(types_of(&statements, &root).len(), 1);
        assert_single_typed(&statements);
        assert_within(&statements, &root);
    }

    #[test]
    fn prop_lowering_is_deterministic(node in tree(), mode in mode()) {
        let driver = LoweringDriver::new();
        let first = driver.lower(Some(&node), fresh_context("urn:det").with_classify_mode(mode)).unwrap();
        let second = driver.lower(Some(&node), fresh_context("urn:det").with_classify_mode(mode)).unwrap();
        prop_assert_eq!(&first.0, &second.0);
        prop_assert_eq!(first.1.issued(), second.1.issued());
        prop_assert_eq!(first.1.stats(), second.1.stats());
    }

    #[test]
    fn prop_namespaces_are_isolated(node in tree()) {
        prop_assume!(!node.is_empty_block());
        let (_, a, _) = produce(&node, fresh_context("urn:unit-a"));
        let (_, b, _) = produce(&node, fresh_context("urn:unit-b"));
        let a_subjects = a.subjects();
        prop_assert!(b.subjects().iter().all(|s| !a_subjects.contains(s)));
    }

    #[test]
    fn prop_flag_only_always_skips(node in tree()) {
        let ctx = fresh_context("urn:flags").with_mode(ExtractionMode::FlagOnly);
        let (outcome, ctx) = LoweringDriver::new().lower(Some(&node), ctx).unwrap();
        prop_assert!(outcome.is_skipped());
        prop_assert_ne!(outcome.skip_reason(), None::<SkipReason>);
        prop_assert_eq!(ctx.issued(), 0);
    }

    #[test]
    fn prop_links_are_closed_with_and_without_cache(node in tree(), cached in any::<bool>()) {
        prop_assume!(!node.is_empty_block());
        let ctx = fresh_context("urn:closed");
        let ctx = if cached { ctx.with_cache(StructuralCache::new(2, 1024)) } else { ctx };
        let (_, statements, _) = produce(&node, ctx);

        let subjects = statements.subjects();
        for triple in statements.iter() {
            if let Object::Resource(target) = &triple.object {
                if target.is_within(&codegraph_lowering::Iri::new("urn:closed")) {
                    prop_assert!(subjects.contains(target), "dangling link to {}", target);
                }
            }
        }
        assert_single_typed(&statements);
    }
}

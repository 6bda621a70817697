//! Functions, clauses, guards and blocks

use super::{form_args, Emitter};
use crate::features::lowering::domain::vocabulary::{edge, prop};
use crate::features::lowering::domain::{ClassifyMode, ShapeTag, Slot};
use crate::shared::models::SyntaxNode;

/// `fn a -> x; b -> y end`
pub(super) fn anonymous_function<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    let clauses = form_args(node);
    out.count(prop::CLAUSE_COUNT, clauses.len());
    out.ordinal(
        clauses,
        edge::HAS_CLAUSE,
        Slot::Forced(ShapeTag::Clause, ClassifyMode::Pattern),
    );
}

/// `heads -> body`
///
/// In pattern mode the heads are patterns, optionally guarded by a trailing
/// `when`. In expression mode (`cond`, `receive ... after`) they are tests.
pub(super) fn clause<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    let [heads, body] = form_args(node) else {
        return;
    };
    let heads = heads.as_list().unwrap_or(&[]);

    match out.mode() {
        ClassifyMode::Pattern => {
            let (patterns, guard) = split_guard(heads);
            out.count(prop::PATTERN_COUNT, patterns.len());
            out.indexed(
                patterns,
                "pattern",
                edge::HAS_PATTERN,
                Slot::Classify(ClassifyMode::Pattern),
            );
            if let Some(guard) = guard {
                out.expr(guard, "guard", edge::HAS_GUARD_CONDITION);
            }
        }
        ClassifyMode::Expression => match heads {
            [single] => out.expr(single, "condition", edge::HAS_TEST),
            _ => out.indexed(
                heads,
                "condition",
                edge::HAS_TEST,
                Slot::Classify(ClassifyMode::Expression),
            ),
        },
    }

    out.expr(body, "body", edge::HAS_BODY);
}

/// `a, b when cond` outside a clause head
pub(super) fn guard<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    let Some((condition, patterns)) = form_args(node).split_last() else {
        return;
    };
    out.indexed(
        patterns,
        "pattern",
        edge::HAS_PATTERN,
        Slot::Classify(ClassifyMode::Pattern),
    );
    out.expr(condition, "condition", edge::HAS_GUARD_CONDITION);
}

/// `arg \\ default`
pub(super) fn default_argument<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    if let [pattern, default] = form_args(node) {
        out.pattern(pattern, "pattern", edge::HAS_PATTERN);
        out.expr(default, "default", edge::HAS_DEFAULT);
    }
}

pub(super) fn block<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    let statements = form_args(node);
    out.count(prop::STATEMENT_COUNT, statements.len());
    out.indexed(
        statements,
        "statement",
        edge::HAS_STATEMENT,
        Slot::Classify(ClassifyMode::Expression),
    );
}

/// `[when(p1, p2, g)]` → `([p1, p2], Some(g))`
fn split_guard(heads: &[SyntaxNode]) -> (&[SyntaxNode], Option<&SyntaxNode>) {
    if let [only] = heads {
        let guarded = only
            .as_form()
            .filter(|form| form.name() == Some("when"))
            .and_then(|form| form.arg_list())
            .and_then(<[SyntaxNode]>::split_last);
        if let Some((guard, patterns)) = guarded {
            if !patterns.is_empty() {
                return (patterns, Some(guard));
            }
        }
    }
    (heads, None)
}

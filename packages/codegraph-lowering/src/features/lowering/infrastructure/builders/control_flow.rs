//! Conditionals, branching and message receipt

use super::{form_args, Emitter};
use crate::features::lowering::domain::vocabulary::{edge, prop};
use crate::features::lowering::domain::{ClassifyMode, ShapeTag, Slot};
use crate::features::lowering::infrastructure::classifier::{clause_list, do_clauses, is_named};
use crate::shared::models::SyntaxNode;

const PATTERN_CLAUSE: Slot = Slot::Forced(ShapeTag::Clause, ClassifyMode::Pattern);
const TEST_CLAUSE: Slot = Slot::Forced(ShapeTag::Clause, ClassifyMode::Expression);

/// `if` / `unless`: `condition`, `then`, optional `else`
pub(super) fn conditional<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    let [condition, branches] = form_args(node) else {
        return;
    };
    out.expr(condition, "condition", edge::HAS_TEST);
    if let Some(then) = branches.keyword_get("do") {
        out.expr(then, "then", edge::HAS_THEN_BRANCH);
    }
    if let Some(otherwise) = branches.keyword_get("else") {
        out.expr(otherwise, "else", edge::HAS_ELSE_BRANCH);
    }
}

/// `cond do ... end`: one test clause per ordinal
pub(super) fn cond<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    let clauses = form_args(node).first().and_then(do_clauses).unwrap_or(&[]);
    out.count(prop::CLAUSE_COUNT, clauses.len());
    out.ordinal(clauses, edge::HAS_CLAUSE, TEST_CLAUSE);
}

/// `case subject do ... end`
pub(super) fn case<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    let [subject, branches] = form_args(node) else {
        return;
    };
    out.expr(subject, "subject", edge::HAS_SUBJECT);
    let clauses = do_clauses(branches).unwrap_or(&[]);
    out.count(prop::CLAUSE_COUNT, clauses.len());
    out.ordinal(clauses, edge::HAS_CLAUSE, PATTERN_CLAUSE);
}

/// `with p <- v, ..., do: body, else: clauses`
pub(super) fn with<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    let Some((options, steps)) = form_args(node).split_last() else {
        return;
    };

    for (i, step) in steps.iter().enumerate() {
        let slot = if is_named(step, "<-") {
            Slot::Forced(ShapeTag::WithClause, ClassifyMode::Pattern)
        } else {
            Slot::Classify(ClassifyMode::Expression)
        };
        out.child(step, format!("step/{}", i), edge::HAS_CLAUSE, slot);
    }

    if let Some(body) = options.keyword_get("do") {
        out.expr(body, "body", edge::HAS_BODY);
    }
    if let Some(fallbacks) = options.keyword_get("else").and_then(clause_list) {
        out.indexed(fallbacks, "else", edge::HAS_ELSE_CLAUSE, PATTERN_CLAUSE);
    }
}

/// `pattern <- value` inside `with`
pub(super) fn with_clause<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    if let [pattern, value] = form_args(node) {
        out.pattern(pattern, "pattern", edge::HAS_PATTERN);
        out.expr(value, "value", edge::HAS_VALUE);
    }
}

/// `receive do ... after t -> ... end`
pub(super) fn receive<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    let Some(options) = form_args(node).first() else {
        return;
    };
    let clauses = do_clauses(options).unwrap_or(&[]);
    out.count(prop::CLAUSE_COUNT, clauses.len());
    out.ordinal(clauses, edge::HAS_CLAUSE, PATTERN_CLAUSE);

    if let Some(after) = options.keyword_get("after").and_then(clause_list) {
        out.indexed(after, "after", edge::HAS_AFTER_CLAUSE, TEST_CLAUSE);
    }
}

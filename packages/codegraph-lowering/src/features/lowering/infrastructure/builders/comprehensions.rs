//! `for` comprehensions and their generators

use super::{form_args, Emitter};
use crate::features::lowering::domain::vocabulary::{edge, prop};
use crate::features::lowering::domain::{ClassifyMode, ShapeTag, Slot};
use crate::features::lowering::infrastructure::classifier::{clause_list, is_named};
use crate::shared::models::SyntaxNode;

/// `for x <- xs, filter, into: c, uniq: true, reduce: acc do ... end`
pub(super) fn comprehension<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    let Some((options, qualifiers)) = form_args(node).split_last() else {
        return;
    };

    let (mut generators, mut filters) = (0usize, 0usize);
    for qualifier in qualifiers {
        if is_named(qualifier, "<-") {
            out.expr(qualifier, &format!("generator/{}", generators), edge::HAS_GENERATOR);
            generators += 1;
        } else {
            out.expr(qualifier, &format!("filter/{}", filters), edge::HAS_FILTER);
            filters += 1;
        }
    }

    if let Some(into) = options.keyword_get("into") {
        out.expr(into, "into", edge::HAS_COLLECTABLE);
    }
    if let Some(SyntaxNode::Atom(flag)) = options.keyword_get("uniq") {
        out.literal(prop::IS_UNIQUE, flag == "true");
    }
    let reduce = options.keyword_get("reduce");
    if let Some(initial) = reduce {
        out.expr(initial, "reduce", edge::HAS_INITIAL_ACCUMULATOR);
    }

    let Some(body) = options.keyword_get("do") else {
        return;
    };
    match reduce.and(clause_list(body)) {
        // `acc -> ...` clauses over the accumulator
        Some(clauses) => out.indexed(
            clauses,
            "body",
            edge::HAS_BODY,
            Slot::Forced(ShapeTag::Clause, ClassifyMode::Pattern),
        ),
        None => out.expr(body, "body", edge::HAS_BODY),
    }
}

/// `pattern <- enumerable`
pub(super) fn generator<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    if let [pattern, enumerable] = form_args(node) {
        out.pattern(pattern, "pattern", edge::HAS_PATTERN);
        out.expr(enumerable, "enumerable", edge::HAS_ENUMERABLE);
    }
}

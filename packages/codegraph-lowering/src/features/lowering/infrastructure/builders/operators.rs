//! Operator builders

use super::{form_args, form_name, Emitter};
use crate::features::lowering::domain::vocabulary::{edge, prop};
use crate::shared::models::SyntaxNode;

/// Every two-operand operator: symbol plus `left`/`right`
pub(super) fn binary<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    symbol(node, out);
    if let [left, right] = form_args(node) {
        out.inherit(left, "left", edge::LEFT_OPERAND);
        out.inherit(right, "right", edge::RIGHT_OPERAND);
    }
}

pub(super) fn unary<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    symbol(node, out);
    if let [operand] = form_args(node) {
        out.inherit(operand, "operand", edge::HAS_OPERAND);
    }
}

/// `pattern = value`: the left side binds
pub(super) fn match_operator<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    symbol(node, out);
    if let [left, right] = form_args(node) {
        out.pattern(left, "left", edge::LEFT_OPERAND);
        out.expr(right, "right", edge::RIGHT_OPERAND);
    }
}

pub(super) fn pipe<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    symbol(node, out);
    if let [left, right] = form_args(node) {
        out.expr(left, "left", edge::LEFT_OPERAND);
        out.expr(right, "right", edge::RIGHT_OPERAND);
    }
}

/// `first..last` and `first..last//step`; bare `..` has no bounds
pub(super) fn range<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    symbol(node, out);
    match form_args(node) {
        [first, last] => {
            out.inherit(first, "first", edge::HAS_FIRST);
            out.inherit(last, "last", edge::HAS_LAST);
        }
        [first, last, step] => {
            out.inherit(first, "first", edge::HAS_FIRST);
            out.inherit(last, "last", edge::HAS_LAST);
            out.expr(step, "step", edge::HAS_STEP);
        }
        _ => {}
    }
}

/// `&fun/2`, `&Mod.fun/2` or `&(&1 + 1)`
pub(super) fn capture<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    let [inner] = form_args(node) else {
        return;
    };

    let function_ref = inner
        .as_form()
        .and_then(|form| form.named_with_arity("/", 2))
        .and_then(|parts| match &parts[1] {
            SyntaxNode::Integer(arity) => Some((&parts[0], *arity)),
            _ => None,
        });

    match function_ref {
        Some((function, arity)) => {
            out.literal(prop::CAPTURE_ARITY, arity);
            out.expr(function, "function", edge::HAS_CAPTURED_FUNCTION);
        }
        None => out.expr(inner, "body", edge::HAS_BODY),
    }
}

/// `&1`, `&2`, ...
pub(super) fn capture_placeholder(node: &SyntaxNode, out: &mut Emitter) {
    if let [SyntaxNode::Integer(index)] = form_args(node) {
        out.literal(prop::PLACEHOLDER_INDEX, *index);
    }
}

fn symbol(node: &SyntaxNode, out: &mut Emitter) {
    if let Some(name) = form_name(node) {
        out.literal(prop::OPERATOR_SYMBOL, name);
    }
}

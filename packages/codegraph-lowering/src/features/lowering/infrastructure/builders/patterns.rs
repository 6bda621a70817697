//! Pattern-only builders
//!
//! Aggregate patterns (tuple, list, map, struct, binary) reuse the collection
//! builders with the mode inherited.

use super::{form_args, form_name, Emitter};
use crate::features::lowering::domain::vocabulary::{edge, prop};
use crate::shared::models::{Literal, SyntaxNode};

pub(super) fn literal(node: &SyntaxNode, out: &mut Emitter) {
    match node {
        SyntaxNode::Integer(v) => out.literal(prop::VALUE, *v),
        SyntaxNode::Float(v) => out.literal(prop::VALUE, Literal::float(*v)),
        SyntaxNode::String(s) => out.literal(prop::VALUE, s.as_str()),
        SyntaxNode::Atom(a) if a == "true" || a == "false" => out.literal(prop::VALUE, a == "true"),
        SyntaxNode::Atom(a) => out.literal(prop::ATOM_NAME, a.as_str()),
        _ => {}
    }
}

/// Name bound by a successful match
pub(super) fn variable(node: &SyntaxNode, out: &mut Emitter) {
    if let Some(name) = node.reference_name() {
        out.literal(prop::NAME, name);
        out.literal(prop::INTRODUCES_BINDING, true);
    }
}

/// `^x` matches against the current value instead of rebinding
pub(super) fn pin<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    let [pinned] = form_args(node) else {
        return;
    };
    if let Some(name) = pinned.reference_name() {
        out.literal(prop::NAME, name);
    }
    out.expr(pinned, "variable", edge::HAS_PINNED_VARIABLE);
}

/// `left = right` inside a pattern: both sides bind
pub(super) fn match_pattern<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    if let Some(op) = form_name(node) {
        out.literal(prop::OPERATOR_SYMBOL, op);
    }
    if let [left, right] = form_args(node) {
        out.pattern(left, "left", edge::LEFT_OPERAND);
        out.pattern(right, "right", edge::RIGHT_OPERAND);
    }
}

#[cfg(test)]
mod tests {
    use crate::features::lowering::domain::vocabulary::{prop, term};
    use crate::features::lowering::domain::{BuildContext, Built, ClassifyMode, ShapeTag, Slot};
    use crate::features::lowering::infrastructure::builders::BuilderRegistry;
    use crate::shared::models::{Iri, Literal, Object, SyntaxNode};

    fn build(shape: ShapeTag, node: &SyntaxNode) -> Built<'_> {
        BuilderRegistry::build(
            shape,
            node,
            &Iri::new("urn:p/1"),
            BuildContext {
                mode: ClassifyMode::Pattern,
            },
        )
    }

    #[test]
    fn test_variable_pattern_introduces_binding() {
        let node = SyntaxNode::var("x");
        let built = build(ShapeTag::VariablePattern, &node);
        let id = Iri::new("urn:p/1");
        let pred = term(prop::INTRODUCES_BINDING);
        let flags: Vec<_> = built.statements.objects(&id, &pred).cloned().collect();
        assert_eq!(flags, vec![Object::Literal(Literal::Boolean(true))]);
    }

    #[test]
    fn test_pin_reads_in_expression_mode() {
        let node = SyntaxNode::unary("^", SyntaxNode::var("expected"));
        let built = build(ShapeTag::PinPattern, &node);
        assert_eq!(built.children.len(), 1);
        assert_eq!(built.children[0].slot, Slot::Classify(ClassifyMode::Expression));
    }

    #[test]
    fn test_match_pattern_both_sides_bind() {
        let node = SyntaxNode::op(
            "=",
            SyntaxNode::pair(SyntaxNode::atom("ok"), SyntaxNode::var("v")),
            SyntaxNode::var("result"),
        );
        let built = build(ShapeTag::MatchPattern, &node);
        assert!(built
            .children
            .iter()
            .all(|c| c.slot == Slot::Classify(ClassifyMode::Pattern)));
    }
}

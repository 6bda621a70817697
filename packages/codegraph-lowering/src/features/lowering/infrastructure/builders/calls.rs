//! Invocation builders

use super::{form_args, form_name, Emitter};
use crate::features::lowering::domain::vocabulary::{edge, prop};
use crate::features::lowering::domain::{ClassifyMode, Slot};
use crate::features::lowering::infrastructure::classifier::dot_args;
use crate::shared::models::SyntaxNode;

/// `foo(a, b)`
pub(super) fn local<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    if let Some(name) = form_name(node) {
        out.literal(prop::FUNCTION_NAME, name);
    }
    arguments(form_args(node), out);
}

/// `Mod.fun(a, b)` and `expr.fun(a)`
pub(super) fn remote<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    if let Some([target, SyntaxNode::Atom(fun)]) = dot_head(node) {
        out.literal(prop::FUNCTION_NAME, fun.as_str());
        out.expr(target, "target", edge::HAS_TARGET);
    }
    arguments(form_args(node), out);
}

/// `fun.(a, b)`
pub(super) fn anonymous<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    if let Some([function]) = dot_head(node) {
        out.expr(function, "function", edge::HAS_FUNCTION);
    }
    arguments(form_args(node), out);
}

/// `container[key]`
pub(super) fn access<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    if let [container, key] = form_args(node) {
        out.expr(container, "container", edge::HAS_CONTAINER);
        out.expr(key, "key", edge::HAS_KEY);
    }
}

/// `map.field`
pub(super) fn field<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    if let Some([target, SyntaxNode::Atom(name)]) = dot_head(node) {
        out.literal(prop::FIELD_NAME, name.as_str());
        out.expr(target, "target", edge::HAS_TARGET);
    }
}

fn dot_head(node: &SyntaxNode) -> Option<&[SyntaxNode]> {
    node.as_form()?.head_node().and_then(dot_args)
}

fn arguments<'a>(args: &'a [SyntaxNode], out: &mut Emitter<'a>) {
    out.count(prop::ARITY, args.len());
    out.indexed(
        args,
        "arg",
        edge::HAS_ARGUMENT,
        Slot::Classify(ClassifyMode::Expression),
    );
}

#[cfg(test)]
mod tests {
    use crate::features::lowering::domain::vocabulary::{prop, term};
    use crate::features::lowering::domain::{BuildContext, Built, ClassifyMode, ShapeTag};
    use crate::features::lowering::infrastructure::builders::BuilderRegistry;
    use crate::shared::models::{Iri, Literal, Meta, Object, SyntaxNode};

    fn build(shape: ShapeTag, node: &SyntaxNode) -> Built<'_> {
        BuilderRegistry::build(
            shape,
            node,
            &Iri::new("urn:k/1"),
            BuildContext {
                mode: ClassifyMode::Pattern,
            },
        )
    }

    #[test]
    fn test_remote_call_target_then_args() {
        let node = SyntaxNode::remote_call(
            SyntaxNode::alias(&["Enum"]),
            "map",
            vec![SyntaxNode::var("xs"), SyntaxNode::var("f")],
        );
        let built = build(ShapeTag::RemoteCall, &node);
        let roles: Vec<_> = built.children.iter().map(|c| c.role.as_str()).collect();
        assert_eq!(roles, vec!["target", "arg/0", "arg/1"]);

        let id = Iri::new("urn:k/1");
        let arity = term(prop::ARITY);
        let name = term(prop::FUNCTION_NAME);
        assert!(built
            .statements
            .objects(&id, &arity)
            .any(|o| o == &Object::Literal(Literal::Integer(2))));
        assert!(built
            .statements
            .objects(&id, &name)
            .any(|o| o == &Object::Literal(Literal::from("map"))));
    }

    #[test]
    fn test_call_arguments_are_expressions_even_in_patterns() {
        let node = SyntaxNode::call("is_integer", vec![SyntaxNode::var("x")]);
        let built = build(ShapeTag::LocalCall, &node);
        assert_eq!(built.children[0].slot.mode(), ClassifyMode::Expression);
    }

    #[test]
    fn test_field_access() {
        let node = SyntaxNode::remote_call(SyntaxNode::var("user"), "name", vec![])
            .with_meta(Meta::no_parens());
        let built = build(ShapeTag::FieldAccess, &node);
        assert_eq!(built.children.len(), 1);
        assert_eq!(built.children[0].role, "target");
    }
}

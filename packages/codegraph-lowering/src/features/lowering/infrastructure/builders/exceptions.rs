//! Exception handling builders

use super::{form_args, form_name, Emitter};
use crate::features::lowering::domain::vocabulary::{edge, prop};
use crate::features::lowering::domain::{ClassifyMode, ShapeTag, Slot};
use crate::features::lowering::infrastructure::classifier::clause_list;
use crate::shared::models::SyntaxNode;

const HANDLER: Slot = Slot::Forced(ShapeTag::Clause, ClassifyMode::Pattern);

/// `try do ... rescue ... catch ... else ... after ... end`
pub(super) fn try_expression<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    let Some(options) = form_args(node).first() else {
        return;
    };
    if let Some(body) = options.keyword_get("do") {
        out.expr(body, "body", edge::HAS_BODY);
    }
    for (key, predicate) in [
        ("rescue", edge::HAS_RESCUE_CLAUSE),
        ("catch", edge::HAS_CATCH_CLAUSE),
        ("else", edge::HAS_ELSE_CLAUSE),
    ] {
        if let Some(clauses) = options.keyword_get(key).and_then(clause_list) {
            out.indexed(clauses, key, predicate, HANDLER);
        }
    }
    if let Some(after) = options.keyword_get("after") {
        out.expr(after, "after", edge::HAS_AFTER_BLOCK);
    }
}

/// `raise e`, `raise E, msg`, `reraise e, st`, `reraise E, msg, st`
pub(super) fn raise<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    let name = form_name(node).unwrap_or("raise");
    out.literal(prop::FUNCTION_NAME, name);

    let args = form_args(node);
    let (exception, message, stacktrace) = match (name, args) {
        ("reraise", [e, st]) => (Some(e), None, Some(st)),
        ("reraise", [e, msg, st]) => (Some(e), Some(msg), Some(st)),
        (_, [e]) => (Some(e), None, None),
        (_, [e, msg]) => (Some(e), Some(msg), None),
        _ => (None, None, None),
    };
    if let Some(exception) = exception {
        out.expr(exception, "exception", edge::HAS_EXCEPTION);
    }
    if let Some(message) = message {
        out.expr(message, "message", edge::HAS_MESSAGE);
    }
    if let Some(stacktrace) = stacktrace {
        out.expr(stacktrace, "stacktrace", edge::HAS_STACKTRACE);
    }
}

pub(super) fn throw<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    if let [value] = form_args(node) {
        out.expr(value, "value", edge::HAS_VALUE);
    }
}

/// `e in [ArgumentError, KeyError]` in a rescue head
pub(super) fn exception_pattern<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    if let [binding, types] = form_args(node) {
        out.pattern(binding, "binding", edge::HAS_BINDING);
        out.expr(types, "exceptionType", edge::HAS_EXCEPTION_TYPE);
    }
}

#[cfg(test)]
mod tests {
    use crate::features::lowering::domain::{BuildContext, Built, ClassifyMode, ShapeTag};
    use crate::features::lowering::infrastructure::builders::BuilderRegistry;
    use crate::shared::models::{Iri, SyntaxNode};

    fn roles(shape: ShapeTag, node: &SyntaxNode) -> Vec<String> {
        let built: Built<'_> = BuilderRegistry::build(
            shape,
            node,
            &Iri::new("urn:e/1"),
            BuildContext {
                mode: ClassifyMode::Expression,
            },
        );
        built.children.iter().map(|c| c.role.clone()).collect()
    }

    #[test]
    fn test_try_sections_in_order() {
        let rescue = SyntaxNode::clause(
            vec![SyntaxNode::op(
                "in",
                SyntaxNode::var("e"),
                SyntaxNode::alias(&["RuntimeError"]),
            )],
            SyntaxNode::var("e"),
        );
        let node = SyntaxNode::call(
            "try",
            vec![SyntaxNode::keyword(vec![
                ("do", SyntaxNode::call("work", vec![])),
                ("rescue", SyntaxNode::list(vec![rescue])),
                ("after", SyntaxNode::call("cleanup", vec![])),
            ])],
        );
        assert_eq!(
            roles(ShapeTag::TryExpression, &node),
            vec!["body", "rescue/0", "after"]
        );
    }

    #[test]
    fn test_reraise_stacktrace() {
        let node = SyntaxNode::call(
            "reraise",
            vec![SyntaxNode::var("e"), SyntaxNode::var("st")],
        );
        assert_eq!(
            roles(ShapeTag::RaiseExpression, &node),
            vec!["exception", "stacktrace"]
        );
    }

    #[test]
    fn test_raise_with_message() {
        let node = SyntaxNode::call(
            "raise",
            vec![SyntaxNode::alias(&["ArgumentError"]), SyntaxNode::string("bad")],
        );
        assert_eq!(
            roles(ShapeTag::RaiseExpression, &node),
            vec!["exception", "message"]
        );
    }
}

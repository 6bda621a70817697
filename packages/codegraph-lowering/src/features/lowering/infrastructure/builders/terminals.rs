//! Terminals and names: value attached as a literal, no children

use super::{form_args, Emitter};
use crate::features::lowering::domain::vocabulary::{edge, prop};
use crate::shared::models::{FormArgs, Literal, SyntaxNode};

pub(super) fn integer(node: &SyntaxNode, out: &mut Emitter) {
    if let SyntaxNode::Integer(v) = node {
        out.literal(prop::VALUE, *v);
    }
}

pub(super) fn float(node: &SyntaxNode, out: &mut Emitter) {
    if let SyntaxNode::Float(v) = node {
        out.literal(prop::VALUE, Literal::float(*v));
    }
}

pub(super) fn string(node: &SyntaxNode, out: &mut Emitter) {
    if let SyntaxNode::String(s) = node {
        out.literal(prop::VALUE, s.as_str());
    }
}

pub(super) fn boolean(node: &SyntaxNode, out: &mut Emitter) {
    if let Some(atom) = node.as_atom() {
        out.literal(prop::VALUE, atom == "true");
    }
}

pub(super) fn atom(node: &SyntaxNode, out: &mut Emitter) {
    if let Some(atom) = node.as_atom() {
        out.literal(prop::ATOM_NAME, atom);
    }
}

pub(super) fn wildcard(node: &SyntaxNode, out: &mut Emitter) {
    if let Some(name) = node.reference_name() {
        out.literal(prop::NAME, name);
    }
}

/// Bound name used as a value; the context atom hints at scope resolution
pub(super) fn variable(node: &SyntaxNode, out: &mut Emitter) {
    let Some(form) = node.as_form() else {
        return;
    };
    if let Some(name) = form.name() {
        out.literal(prop::NAME, name);
    }
    if let FormArgs::Context(ctx) = &form.args {
        out.literal(prop::VARIABLE_CONTEXT, ctx.as_str());
    }
}

/// `Foo.Bar` → moduleName "Foo.Bar"
pub(super) fn module_alias(node: &SyntaxNode, out: &mut Emitter) {
    let segments: Vec<&str> = form_args(node)
        .iter()
        .filter_map(SyntaxNode::as_atom)
        .collect();
    if !segments.is_empty() {
        out.literal(prop::MODULE_NAME, segments.join("."));
    }
}

/// `@name` reads, `@name value` defines
pub(super) fn module_attribute<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    let Some(inner) = form_args(node).first().and_then(SyntaxNode::as_form) else {
        return;
    };
    if let Some(name) = inner.name() {
        out.literal(prop::ATTRIBUTE_NAME, name);
    }
    if let Some(value) = inner.arg_list().and_then(<[SyntaxNode]>::first) {
        out.expr(value, "value", edge::HAS_VALUE);
    }
}

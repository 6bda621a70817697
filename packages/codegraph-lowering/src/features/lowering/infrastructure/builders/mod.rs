//! Builder Registry - one pure builder per `ShapeTag`
//!
//! A builder turns a classified node into its own statements plus an ordered
//! list of child requests. Builders never recurse; the driver does.

mod calls;
mod collections;
mod comprehensions;
mod control_flow;
mod exceptions;
mod functions;
mod operators;
mod patterns;
mod terminals;

use crate::features::lowering::domain::vocabulary::{self, term};
use crate::features::lowering::domain::{
    BuildContext, Built, ChildRequest, ClassifyMode, ShapeTag, Slot,
};
use crate::shared::models::{Form, Iri, Literal, SyntaxNode};

pub struct BuilderRegistry;

impl BuilderRegistry {
    /// Build `node` as `shape` at `resource`
    pub fn build<'a>(
        shape: ShapeTag,
        node: &'a SyntaxNode,
        resource: &Iri,
        cx: BuildContext,
    ) -> Built<'a> {
        let mut out = Emitter::new(resource, shape, cx);

        match shape {
            // Terminals & names
            ShapeTag::IntegerLiteral => terminals::integer(node, &mut out),
            ShapeTag::FloatLiteral => terminals::float(node, &mut out),
            ShapeTag::StringLiteral => terminals::string(node, &mut out),
            ShapeTag::BooleanLiteral => terminals::boolean(node, &mut out),
            ShapeTag::NilLiteral => {}
            ShapeTag::AtomLiteral => terminals::atom(node, &mut out),
            ShapeTag::WildcardPattern => terminals::wildcard(node, &mut out),
            ShapeTag::Variable => terminals::variable(node, &mut out),
            ShapeTag::ModuleAlias => terminals::module_alias(node, &mut out),
            ShapeTag::ModuleAttribute => terminals::module_attribute(node, &mut out),

            // Collections
            ShapeTag::ListLiteral | ShapeTag::ListPattern => collections::list(node, &mut out),
            ShapeTag::KeywordList => collections::keyword(node, &mut out),
            ShapeTag::TupleLiteral | ShapeTag::TuplePattern => collections::tuple(node, &mut out),
            ShapeTag::MapLiteral | ShapeTag::MapPattern => collections::map(node, &mut out),
            ShapeTag::MapUpdate => collections::map_update(node, &mut out),
            ShapeTag::MapEntry => collections::map_entry(node, &mut out),
            ShapeTag::StructLiteral | ShapeTag::StructPattern => {
                collections::structure(node, &mut out)
            }
            ShapeTag::BinaryLiteral | ShapeTag::BinaryPattern => collections::binary(node, &mut out),
            ShapeTag::BinarySegment => collections::binary_segment(node, &mut out),
            ShapeTag::SigilLiteral => collections::sigil(node, &mut out),
            ShapeTag::ConsOperator => collections::cons(node, &mut out),

            // Operators
            ShapeTag::ArithmeticOperator
            | ShapeTag::ComparisonOperator
            | ShapeTag::LogicalOperator
            | ShapeTag::StringConcatOperator
            | ShapeTag::ListOperator
            | ShapeTag::MembershipOperator => operators::binary(node, &mut out),
            ShapeTag::UnaryOperator => operators::unary(node, &mut out),
            ShapeTag::MatchOperator => operators::match_operator(node, &mut out),
            ShapeTag::PipeOperator => operators::pipe(node, &mut out),
            ShapeTag::RangeExpression => operators::range(node, &mut out),
            ShapeTag::CaptureOperator => operators::capture(node, &mut out),
            ShapeTag::CapturePlaceholder => operators::capture_placeholder(node, &mut out),

            // Calls
            ShapeTag::LocalCall => calls::local(node, &mut out),
            ShapeTag::RemoteCall => calls::remote(node, &mut out),
            ShapeTag::AnonymousCall => calls::anonymous(node, &mut out),
            ShapeTag::AccessExpression => calls::access(node, &mut out),
            ShapeTag::FieldAccess => calls::field(node, &mut out),

            // Functions & clauses
            ShapeTag::AnonymousFunction => functions::anonymous_function(node, &mut out),
            ShapeTag::Clause => functions::clause(node, &mut out),
            ShapeTag::Guard => functions::guard(node, &mut out),
            ShapeTag::DefaultArgument => functions::default_argument(node, &mut out),
            ShapeTag::Block => functions::block(node, &mut out),

            // Control flow
            ShapeTag::IfExpression | ShapeTag::UnlessExpression => {
                control_flow::conditional(node, &mut out)
            }
            ShapeTag::CondExpression => control_flow::cond(node, &mut out),
            ShapeTag::CaseExpression => control_flow::case(node, &mut out),
            ShapeTag::WithExpression => control_flow::with(node, &mut out),
            ShapeTag::WithClause => control_flow::with_clause(node, &mut out),
            ShapeTag::ReceiveExpression => control_flow::receive(node, &mut out),

            // Exceptions
            ShapeTag::TryExpression => exceptions::try_expression(node, &mut out),
            ShapeTag::RaiseExpression => exceptions::raise(node, &mut out),
            ShapeTag::ThrowExpression => exceptions::throw(node, &mut out),
            ShapeTag::ExceptionPattern => exceptions::exception_pattern(node, &mut out),

            // Comprehensions
            ShapeTag::Comprehension => comprehensions::comprehension(node, &mut out),
            ShapeTag::Generator => comprehensions::generator(node, &mut out),

            // Patterns
            ShapeTag::LiteralPattern => patterns::literal(node, &mut out),
            ShapeTag::VariablePattern => patterns::variable(node, &mut out),
            ShapeTag::PinPattern => patterns::pin(node, &mut out),
            ShapeTag::MatchPattern => patterns::match_pattern(node, &mut out),

            // is-a only
            ShapeTag::Unrecognized => {}
        }

        out.finish()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Emitter
// ═══════════════════════════════════════════════════════════════════════════

/// Accumulates one builder's output
pub(crate) struct Emitter<'a> {
    resource: Iri,
    mode: ClassifyMode,
    built: Built<'a>,
}

impl<'a> Emitter<'a> {
    fn new(resource: &Iri, shape: ShapeTag, cx: BuildContext) -> Self {
        let mut built = Built::default();
        built
            .statements
            .add_resource(resource, vocabulary::is_a(), &vocabulary::class(shape));
        Self {
            resource: resource.clone(),
            mode: cx.mode,
            built,
        }
    }

    /// Table the node was classified with
    pub(crate) fn mode(&self) -> ClassifyMode {
        self.mode
    }

    pub(crate) fn literal(&mut self, property: &'static str, value: impl Into<Literal>) {
        self.built
            .statements
            .add_literal(&self.resource, term(property), value);
    }

    pub(crate) fn count(&mut self, property: &'static str, n: usize) {
        self.literal(property, n as i64);
    }

    pub(crate) fn child(
        &mut self,
        node: &'a SyntaxNode,
        role: impl Into<String>,
        edge: &'static str,
        slot: Slot,
    ) {
        self.built.children.push(ChildRequest {
            node,
            role: role.into(),
            predicate: term(edge),
            slot,
        });
    }

    /// Child in expression mode
    pub(crate) fn expr(&mut self, node: &'a SyntaxNode, role: &str, edge: &'static str) {
        self.child(node, role, edge, Slot::Classify(ClassifyMode::Expression));
    }

    /// Child in pattern mode
    pub(crate) fn pattern(&mut self, node: &'a SyntaxNode, role: &str, edge: &'static str) {
        self.child(node, role, edge, Slot::Classify(ClassifyMode::Pattern));
    }

    /// Child in the current node's mode
    pub(crate) fn inherit(&mut self, node: &'a SyntaxNode, role: &str, edge: &'static str) {
        let mode = self.mode;
        self.child(node, role, edge, Slot::Classify(mode));
    }

    /// Children at `{label}/{i}`
    pub(crate) fn indexed(
        &mut self,
        nodes: &'a [SyntaxNode],
        label: &str,
        edge: &'static str,
        slot: Slot,
    ) {
        for (i, node) in nodes.iter().enumerate() {
            self.child(node, format!("{}/{}", label, i), edge, slot);
        }
    }

    /// Children at bare ordinals `0`, `1`, ...
    pub(crate) fn ordinal(&mut self, nodes: &'a [SyntaxNode], edge: &'static str, slot: Slot) {
        for (i, node) in nodes.iter().enumerate() {
            self.child(node, i.to_string(), edge, slot);
        }
    }

    fn finish(self) -> Built<'a> {
        self.built
    }
}

/// Arguments of a form node, empty for anything else
pub(crate) fn form_args(node: &SyntaxNode) -> &[SyntaxNode] {
    node.as_form().and_then(Form::arg_list).unwrap_or(&[])
}

pub(crate) fn form_name(node: &SyntaxNode) -> Option<&str> {
    node.as_form().and_then(Form::name)
}

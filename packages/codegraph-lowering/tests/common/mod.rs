//! Shared fixtures and assertions for the integration tests

#![allow(dead_code)]

use codegraph_lowering::features::lowering::domain::vocabulary::{self, term};
use codegraph_lowering::shared::models::{Form, FormArgs, FormHead, Meta};
use codegraph_lowering::{
    ClassifyMode, Iri, Literal, LoweringContext, LoweringDriver, Object, ShapeTag, SyntaxLowering,
    SyntaxNode, TripleSet,
};
use std::collections::BTreeMap;

// ============================================================================
// Fixtures
// ============================================================================

pub fn int(value: i64) -> SyntaxNode {
    SyntaxNode::int(value)
}

pub fn var(name: &str) -> SyntaxNode {
    SyntaxNode::var(name)
}

/// `depth` nested unary minus around `0`
pub fn negation_chain(depth: usize) -> SyntaxNode {
    (0..depth).fold(int(0), |node, _| SyntaxNode::unary("-", node))
}

pub fn do_block(body: SyntaxNode) -> SyntaxNode {
    SyntaxNode::keyword(vec![("do", body)])
}

pub fn clauses(clauses: Vec<SyntaxNode>) -> SyntaxNode {
    do_block(SyntaxNode::list(clauses))
}

/// `cond do x == 0 -> 0; x == 1 -> 1; ... end`
pub fn cond_with(n: usize) -> SyntaxNode {
    let items = (0..n)
        .map(|i| {
            SyntaxNode::clause(
                vec![SyntaxNode::op("==", var("x"), int(i as i64))],
                int(i as i64),
            )
        })
        .collect();
    SyntaxNode::call("cond", vec![clauses(items)])
}

/// `fun.(args)`
pub fn anonymous_call(fun: SyntaxNode, args: Vec<SyntaxNode>) -> SyntaxNode {
    SyntaxNode::Form(Form {
        head: FormHead::Node(Box::new(SyntaxNode::call(".", vec![fun]))),
        meta: Meta::default(),
        args: FormArgs::List(args),
    })
}

/// A form whose head is neither a name nor a `.` form
pub fn malformed() -> SyntaxNode {
    SyntaxNode::Form(Form {
        head: FormHead::Node(Box::new(int(3))),
        meta: Meta::default(),
        args: FormArgs::List(vec![]),
    })
}

/// Minimal example of every classifiable shape, with the table it is read under
pub fn minimal_examples() -> Vec<(ShapeTag, ClassifyMode, SyntaxNode)> {
    use ClassifyMode::{Expression as E, Pattern as P};

    let struct_of = |fields: Vec<SyntaxNode>| {
        SyntaxNode::call(
            "%",
            vec![SyntaxNode::alias(&["User"]), SyntaxNode::call("%{}", fields)],
        )
    };
    let entry = || SyntaxNode::pair(SyntaxNode::atom("a"), int(1));

    vec![
        // Terminals & names
        (ShapeTag::IntegerLiteral, E, int(42)),
        (ShapeTag::FloatLiteral, E, SyntaxNode::float(1.5)),
        (ShapeTag::StringLiteral, E, SyntaxNode::string("hi")),
        (ShapeTag::BooleanLiteral, E, SyntaxNode::boolean(true)),
        (ShapeTag::NilLiteral, E, SyntaxNode::nil()),
        (ShapeTag::AtomLiteral, E, SyntaxNode::atom("ok")),
        (ShapeTag::WildcardPattern, E, var("_")),
        (ShapeTag::Variable, E, var("x")),
        (ShapeTag::ModuleAlias, E, SyntaxNode::alias(&["Foo", "Bar"])),
        (ShapeTag::ModuleAttribute, E, SyntaxNode::unary("@", var("timeout"))),
        // Collections
        (ShapeTag::ListLiteral, E, SyntaxNode::list(vec![int(1), int(2)])),
        (ShapeTag::KeywordList, E, SyntaxNode::keyword(vec![("a", int(1))])),
        (ShapeTag::TupleLiteral, E, SyntaxNode::pair(int(1), int(2))),
        (ShapeTag::MapLiteral, E, SyntaxNode::call("%{}", vec![entry()])),
        (
            ShapeTag::MapUpdate,
            E,
            SyntaxNode::call(
                "%{}",
                vec![SyntaxNode::op("|", var("m"), SyntaxNode::list(vec![entry()]))],
            ),
        ),
        (ShapeTag::StructLiteral, E, struct_of(vec![entry()])),
        (ShapeTag::BinaryLiteral, E, SyntaxNode::call("<<>>", vec![int(1)])),
        (ShapeTag::BinarySegment, E, SyntaxNode::op("::", var("x"), var("binary"))),
        (
            ShapeTag::SigilLiteral,
            E,
            SyntaxNode::call(
                "sigil_r",
                vec![
                    SyntaxNode::call("<<>>", vec![SyntaxNode::string("a+")]),
                    SyntaxNode::list(vec![]),
                ],
            ),
        ),
        (ShapeTag::ConsOperator, E, SyntaxNode::op("|", var("h"), var("t"))),
        // Operators
        (ShapeTag::ArithmeticOperator, E, SyntaxNode::op("+", int(1), int(2))),
        (ShapeTag::ComparisonOperator, E, SyntaxNode::op(">", int(1), int(2))),
        (ShapeTag::LogicalOperator, E, SyntaxNode::op("and", var("a"), var("b"))),
        (ShapeTag::UnaryOperator, E, SyntaxNode::unary("not", var("a"))),
        (ShapeTag::StringConcatOperator, E, SyntaxNode::op("<>", var("a"), var("b"))),
        (ShapeTag::ListOperator, E, SyntaxNode::op("++", var("a"), var("b"))),
        (ShapeTag::MembershipOperator, E, SyntaxNode::op("in", var("a"), var("b"))),
        (ShapeTag::MatchOperator, E, SyntaxNode::op("=", var("a"), int(1))),
        (ShapeTag::PipeOperator, E, SyntaxNode::op("|>", var("a"), SyntaxNode::call("f", vec![]))),
        (ShapeTag::RangeExpression, E, SyntaxNode::op("..", int(1), int(10))),
        (
            ShapeTag::CaptureOperator,
            E,
            SyntaxNode::unary("&", SyntaxNode::op("/", var("foo"), int(1))),
        ),
        (ShapeTag::CapturePlaceholder, E, SyntaxNode::unary("&", int(1))),
        // Calls
        (ShapeTag::LocalCall, E, SyntaxNode::call("foo", vec![int(1)])),
        (
            ShapeTag::RemoteCall,
            E,
            SyntaxNode::remote_call(SyntaxNode::alias(&["Enum"]), "count", vec![var("xs")]),
        ),
        (ShapeTag::AnonymousCall, E, anonymous_call(var("f"), vec![int(1)])),
        (
            ShapeTag::AccessExpression,
            E,
            SyntaxNode::remote_call(
                SyntaxNode::atom("Access"),
                "get",
                vec![var("m"), SyntaxNode::atom("k")],
            ),
        ),
        (
            ShapeTag::FieldAccess,
            E,
            SyntaxNode::remote_call(var("user"), "name", vec![]).with_meta(Meta::no_parens()),
        ),
        // Functions & blocks
        (
            ShapeTag::AnonymousFunction,
            E,
            SyntaxNode::call("fn", vec![SyntaxNode::clause(vec![var("x")], var("x"))]),
        ),
        (ShapeTag::Clause, E, SyntaxNode::clause(vec![var("x")], var("x"))),
        (
            ShapeTag::Guard,
            E,
            SyntaxNode::op("when", var("x"), SyntaxNode::call("is_integer", vec![var("x")])),
        ),
        (ShapeTag::DefaultArgument, E, SyntaxNode::op("\\\\", var("x"), int(1))),
        (ShapeTag::Block, E, SyntaxNode::block(vec![int(1), int(2)])),
        // Control flow
        (
            ShapeTag::IfExpression,
            E,
            SyntaxNode::call("if", vec![var("ok"), do_block(int(1))]),
        ),
        (
            ShapeTag::UnlessExpression,
            E,
            SyntaxNode::call("unless", vec![var("ok"), do_block(int(1))]),
        ),
        (ShapeTag::CondExpression, E, cond_with(1)),
        (
            ShapeTag::CaseExpression,
            E,
            SyntaxNode::call(
                "case",
                vec![var("x"), clauses(vec![SyntaxNode::clause(vec![var("_")], int(0))])],
            ),
        ),
        (
            ShapeTag::WithExpression,
            E,
            SyntaxNode::call(
                "with",
                vec![
                    SyntaxNode::op(
                        "<-",
                        SyntaxNode::pair(SyntaxNode::atom("ok"), var("v")),
                        SyntaxNode::call("fetch", vec![]),
                    ),
                    do_block(var("v")),
                ],
            ),
        ),
        (
            ShapeTag::ReceiveExpression,
            E,
            SyntaxNode::call(
                "receive",
                vec![clauses(vec![SyntaxNode::clause(vec![var("msg")], var("msg"))])],
            ),
        ),
        (
            ShapeTag::TryExpression,
            E,
            SyntaxNode::call(
                "try",
                vec![SyntaxNode::keyword(vec![
                    ("do", SyntaxNode::call("risky", vec![])),
                    (
                        "rescue",
                        SyntaxNode::list(vec![SyntaxNode::clause(vec![var("e")], var("e"))]),
                    ),
                ])],
            ),
        ),
        (ShapeTag::RaiseExpression, E, SyntaxNode::call("raise", vec![SyntaxNode::string("boom")])),
        (ShapeTag::ThrowExpression, E, SyntaxNode::unary("throw", SyntaxNode::atom("done"))),
        (
            ShapeTag::Comprehension,
            E,
            SyntaxNode::call(
                "for",
                vec![SyntaxNode::op("<-", var("x"), var("xs")), do_block(var("x"))],
            ),
        ),
        (ShapeTag::Generator, E, SyntaxNode::op("<-", var("x"), var("xs"))),
        // Pattern table
        (
            ShapeTag::ExceptionPattern,
            P,
            SyntaxNode::op("in", var("e"), SyntaxNode::alias(&["RuntimeError"])),
        ),
        (ShapeTag::LiteralPattern, P, int(1)),
        (ShapeTag::VariablePattern, P, var("x")),
        (ShapeTag::PinPattern, P, SyntaxNode::unary("^", var("x"))),
        (ShapeTag::TuplePattern, P, SyntaxNode::pair(SyntaxNode::atom("ok"), var("v"))),
        (ShapeTag::ListPattern, P, SyntaxNode::list(vec![var("a")])),
        (ShapeTag::MapPattern, P, SyntaxNode::call("%{}", vec![entry()])),
        (ShapeTag::StructPattern, P, struct_of(vec![])),
        (ShapeTag::BinaryPattern, P, SyntaxNode::call("<<>>", vec![var("b")])),
        (ShapeTag::MatchPattern, P, SyntaxNode::op("=", var("a"), var("b"))),
        // Fallback
        (ShapeTag::Unrecognized, E, malformed()),
    ]
}

// ============================================================================
// Lowering helpers
// ============================================================================

pub fn fresh_context(namespace: &str) -> LoweringContext {
    LoweringContext::new(Iri::new(namespace))
}

/// Lower one root and return `(resource, statements, successor)`, panicking on a skip
pub fn produce(node: &SyntaxNode, ctx: LoweringContext) -> (Iri, TripleSet, LoweringContext) {
    let (outcome, ctx) = LoweringDriver::new()
        .lower(Some(node), ctx)
        .expect("lowering failed");
    let (resource, statements) = outcome
        .into_produced()
        .expect("expected a produced outcome");
    (resource, statements, ctx)
}

/// Class terms stated for `resource`
pub fn types_of(statements: &TripleSet, resource: &Iri) -> Vec<Iri> {
    let is_a = vocabulary::is_a();
    statements
        .objects(resource, &is_a)
        .filter_map(Object::as_resource)
        .cloned()
        .collect()
}

pub fn literal(statements: &TripleSet, resource: &Iri, property: &'static str) -> Option<Literal> {
    let predicate = term(property);
    let found = statements
        .objects(resource, &predicate)
        .find_map(Object::as_literal)
        .cloned();
    found
}

pub fn linked(statements: &TripleSet, resource: &Iri, edge: &'static str) -> Vec<Iri> {
    let predicate = term(edge);
    statements
        .objects(resource, &predicate)
        .filter_map(Object::as_resource)
        .cloned()
        .collect()
}

/// Number of is-a statements per subject
pub fn is_a_counts(statements: &TripleSet) -> BTreeMap<Iri, usize> {
    let is_a = vocabulary::is_a();
    let mut counts = BTreeMap::new();
    for triple in statements.with_predicate(&is_a) {
        *counts.entry(triple.subject.clone()).or_insert(0) += 1;
    }
    counts
}

// ============================================================================
// Assertions
// ============================================================================

/// Every subject of `statements` carries exactly one is-a
pub fn assert_single_typed(statements: &TripleSet) {
    let counts = is_a_counts(statements);
    for subject in statements.subjects() {
        assert_eq!(
            counts.get(subject).copied().unwrap_or(0),
            1,
            "resource {} should carry exactly one is-a",
            subject
        );
    }
}

/// Every subject of `statements` lives under `namespace`
pub fn assert_within(statements: &TripleSet, namespace: &Iri) {
    for subject in statements.subjects() {
        assert!(
            subject.is_within(namespace),
            "{} escaped namespace {}",
            subject,
            namespace
        );
    }
}

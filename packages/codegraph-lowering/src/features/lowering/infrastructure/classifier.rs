//! Shape Classifier - syntax node → `ShapeTag`
//!
//! Total: every node maps to a tag, `Unrecognized` as the fallback.
//!
//! Order within the expression table:
//! 1. bound-name references (`Context` args): wildcard before variable
//! 2. forms with a node head: access, anonymous call, field access, remote call
//! 3. special forms, matched by name *and* argument structure
//! 4. operators, by name and arity
//! 5. local invocation
//!
//! Pattern mode consults the pattern table first and falls through to the
//! expression table for everything else (`|`, `::`, `<>`, aliases, ...).

use crate::features::lowering::domain::{ClassifyMode, ShapeTag};
use crate::shared::models::{Form, FormHead, SyntaxNode};

pub(crate) const ARITHMETIC_OPS: &[&str] = &["+", "-", "*", "/", "**"];
pub(crate) const COMPARISON_OPS: &[&str] =
    &["==", "!=", "===", "!==", "<", ">", "<=", ">=", "=~"];
pub(crate) const LOGICAL_OPS: &[&str] = &["and", "or", "&&", "||"];
pub(crate) const UNARY_OPS: &[&str] = &["not", "!", "-", "+"];
pub(crate) const LIST_OPS: &[&str] = &["++", "--"];

/// Classify `node` under `mode`
pub fn classify(node: &SyntaxNode, mode: ClassifyMode) -> ShapeTag {
    if mode == ClassifyMode::Pattern {
        if let Some(shape) = classify_pattern(node) {
            return shape;
        }
    }
    classify_expression(node)
}

// ═══════════════════════════════════════════════════════════════════════════
// Pattern table
// ═══════════════════════════════════════════════════════════════════════════

fn classify_pattern(node: &SyntaxNode) -> Option<ShapeTag> {
    match node {
        SyntaxNode::Integer(_)
        | SyntaxNode::Float(_)
        | SyntaxNode::String(_)
        | SyntaxNode::Atom(_) => Some(ShapeTag::LiteralPattern),
        SyntaxNode::List(_) => Some(ShapeTag::ListPattern),
        SyntaxNode::Pair(_, _) => Some(ShapeTag::TuplePattern),
        SyntaxNode::Form(form) => classify_pattern_form(form),
    }
}

fn classify_pattern_form(form: &Form) -> Option<ShapeTag> {
    let name = form.name()?;

    if form.is_reference() {
        return Some(if is_wildcard(name) {
            ShapeTag::WildcardPattern
        } else {
            ShapeTag::VariablePattern
        });
    }

    let args = form.arg_list()?;
    match (name, args.len()) {
        ("^", 1) => Some(ShapeTag::PinPattern),
        ("=", 2) => Some(ShapeTag::MatchPattern),
        ("in", 2) => Some(ShapeTag::ExceptionPattern),
        ("{}", _) => Some(ShapeTag::TuplePattern),
        ("%{}", _) if !is_map_update(args) => Some(ShapeTag::MapPattern),
        ("%", 2) if is_named(&args[1], "%{}") => Some(ShapeTag::StructPattern),
        ("<<>>", _) => Some(ShapeTag::BinaryPattern),
        _ => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Expression table
// ═══════════════════════════════════════════════════════════════════════════

fn classify_expression(node: &SyntaxNode) -> ShapeTag {
    match node {
        SyntaxNode::Integer(_) => ShapeTag::IntegerLiteral,
        SyntaxNode::Float(_) => ShapeTag::FloatLiteral,
        SyntaxNode::String(_) => ShapeTag::StringLiteral,
        SyntaxNode::Atom(atom) => match atom.as_str() {
            "true" | "false" => ShapeTag::BooleanLiteral,
            "nil" => ShapeTag::NilLiteral,
            _ => ShapeTag::AtomLiteral,
        },
        SyntaxNode::List(items) => {
            if !items.is_empty() && node.keyword_entries().is_some() {
                ShapeTag::KeywordList
            } else {
                ShapeTag::ListLiteral
            }
        }
        SyntaxNode::Pair(_, _) => ShapeTag::TupleLiteral,
        SyntaxNode::Form(form) => classify_form(form),
    }
}

fn classify_form(form: &Form) -> ShapeTag {
    match (&form.head, form.arg_list()) {
        // bound-name reference; a node head with a context is malformed
        (FormHead::Name(name), None) => {
            if is_wildcard(name) {
                ShapeTag::WildcardPattern
            } else {
                ShapeTag::Variable
            }
        }
        (FormHead::Node(_), None) => ShapeTag::Unrecognized,
        (FormHead::Node(head), Some(args)) => classify_dot_call(head, form, args),
        (FormHead::Name(name), Some(args)) => classify_named(name, args),
    }
}

fn classify_dot_call(head: &SyntaxNode, form: &Form, args: &[SyntaxNode]) -> ShapeTag {
    let Some(dot) = dot_args(head) else {
        return ShapeTag::Unrecognized;
    };

    match dot {
        [SyntaxNode::Atom(module), SyntaxNode::Atom(fun)]
            if module == "Access" && fun == "get" && args.len() == 2 =>
        {
            ShapeTag::AccessExpression
        }
        [_fun] => ShapeTag::AnonymousCall,
        [_target, SyntaxNode::Atom(_)] if form.meta.no_parens && args.is_empty() => {
            ShapeTag::FieldAccess
        }
        [_target, SyntaxNode::Atom(_)] => ShapeTag::RemoteCall,
        _ => ShapeTag::Unrecognized,
    }
}

fn classify_named(name: &str, args: &[SyntaxNode]) -> ShapeTag {
    let arity = args.len();

    if let Some(shape) = classify_special_form(name, args) {
        return shape;
    }

    match (name, arity) {
        ("=", 2) => ShapeTag::MatchOperator,
        ("|>", 2) => ShapeTag::PipeOperator,
        ("..", 0 | 2) | ("..//", 3) => ShapeTag::RangeExpression,
        ("<>", 2) => ShapeTag::StringConcatOperator,
        ("in", 2) => ShapeTag::MembershipOperator,
        ("|", 2) => ShapeTag::ConsOperator,
        ("::", 2) => ShapeTag::BinarySegment,
        ("&", 1) => {
            if matches!(args[0], SyntaxNode::Integer(_)) {
                ShapeTag::CapturePlaceholder
            } else {
                ShapeTag::CaptureOperator
            }
        }
        (op, 2) if ARITHMETIC_OPS.contains(&op) => ShapeTag::ArithmeticOperator,
        (op, 2) if COMPARISON_OPS.contains(&op) => ShapeTag::ComparisonOperator,
        (op, 2) if LOGICAL_OPS.contains(&op) => ShapeTag::LogicalOperator,
        (op, 2) if LIST_OPS.contains(&op) => ShapeTag::ListOperator,
        (op, 1) if UNARY_OPS.contains(&op) => ShapeTag::UnaryOperator,
        _ => ShapeTag::LocalCall,
    }
}

/// Special forms; `None` when the name matches but the structure does not
fn classify_special_form(name: &str, args: &[SyntaxNode]) -> Option<ShapeTag> {
    let arity = args.len();
    let shape = match name {
        "__block__" => ShapeTag::Block,
        "__aliases__" if arity > 0 && args.iter().all(|a| a.as_atom().is_some()) => {
            ShapeTag::ModuleAlias
        }
        "{}" => ShapeTag::TupleLiteral,
        "%{}" if is_map_update(args) => ShapeTag::MapUpdate,
        "%{}" => ShapeTag::MapLiteral,
        "%" if arity == 2 && is_named(&args[1], "%{}") => ShapeTag::StructLiteral,
        "<<>>" => ShapeTag::BinaryLiteral,
        s if arity == 2 && s.len() > "sigil_".len() && s.starts_with("sigil_") => {
            ShapeTag::SigilLiteral
        }
        "@" if arity == 1 && args[0].as_form().and_then(Form::name).is_some() => {
            ShapeTag::ModuleAttribute
        }
        "fn" if arity > 0 && args.iter().all(is_clause) => ShapeTag::AnonymousFunction,
        "->" if arity == 2 && args[0].as_list().is_some() => ShapeTag::Clause,
        "when" if arity >= 2 => ShapeTag::Guard,
        "\\\\" if arity == 2 => ShapeTag::DefaultArgument,
        "if" if arity == 2 && has_do(&args[1]) => ShapeTag::IfExpression,
        "unless" if arity == 2 && has_do(&args[1]) => ShapeTag::UnlessExpression,
        "cond" if arity == 1 && do_clauses(&args[0]).is_some() => ShapeTag::CondExpression,
        "case" if arity == 2 && do_clauses(&args[1]).is_some() => ShapeTag::CaseExpression,
        "with" if arity >= 1 && has_do(&args[arity - 1]) => ShapeTag::WithExpression,
        "receive"
            if arity == 1
                && (args[0].keyword_get("do").is_some()
                    || args[0].keyword_get("after").is_some()) =>
        {
            ShapeTag::ReceiveExpression
        }
        "try" if arity == 1 && has_do(&args[0]) => ShapeTag::TryExpression,
        "for" if arity >= 1 && has_do(&args[arity - 1]) => ShapeTag::Comprehension,
        "raise" if (1..=2).contains(&arity) => ShapeTag::RaiseExpression,
        "reraise" if (2..=3).contains(&arity) => ShapeTag::RaiseExpression,
        "throw" if arity == 1 => ShapeTag::ThrowExpression,
        "<-" if arity == 2 => ShapeTag::Generator,
        _ => return None,
    };
    Some(shape)
}

// ═══════════════════════════════════════════════════════════════════════════
// Structural helpers (shared with the builders)
// ═══════════════════════════════════════════════════════════════════════════

/// `_` and `_name`, but not `__MODULE__`-style specials
pub(crate) fn is_wildcard(name: &str) -> bool {
    name == "_" || (name.starts_with('_') && !name.starts_with("__"))
}

pub(crate) fn is_named(node: &SyntaxNode, name: &str) -> bool {
    node.as_form()
        .is_some_and(|form| form.name() == Some(name) && !form.is_reference())
}

/// `heads -> body`
pub(crate) fn is_clause(node: &SyntaxNode) -> bool {
    node.as_form()
        .and_then(|form| form.named_with_arity("->", 2))
        .is_some_and(|args| args[0].as_list().is_some())
}

/// Non-empty list made only of clauses
pub(crate) fn clause_list(node: &SyntaxNode) -> Option<&[SyntaxNode]> {
    node.as_list()
        .filter(|items| !items.is_empty() && items.iter().all(is_clause))
}

/// Clauses stored under `do:`
pub(crate) fn do_clauses(node: &SyntaxNode) -> Option<&[SyntaxNode]> {
    node.keyword_get("do").and_then(clause_list)
}

pub(crate) fn has_do(node: &SyntaxNode) -> bool {
    node.keyword_get("do").is_some()
}

/// Arguments of a `.` head form
pub(crate) fn dot_args(head: &SyntaxNode) -> Option<&[SyntaxNode]> {
    let form = head.as_form()?;
    if form.name() == Some(".") {
        form.arg_list()
    } else {
        None
    }
}

/// `%{base | k => v}`: a single `|` whose right side is a list
pub(crate) fn is_map_update(args: &[SyntaxNode]) -> bool {
    match args {
        [only] => only
            .as_form()
            .and_then(|form| form.named_with_arity("|", 2))
            .is_some_and(|parts| parts[1].as_list().is_some()),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::Meta;

    fn expr(node: &SyntaxNode) -> ShapeTag {
        classify(node, ClassifyMode::Expression)
    }

    fn pat(node: &SyntaxNode) -> ShapeTag {
        classify(node, ClassifyMode::Pattern)
    }

    #[test]
    fn test_terminals() {
        assert_eq!(expr(&SyntaxNode::int(42)), ShapeTag::IntegerLiteral);
        assert_eq!(expr(&SyntaxNode::float(1.5)), ShapeTag::FloatLiteral);
        assert_eq!(expr(&SyntaxNode::string("hi")), ShapeTag::StringLiteral);
        assert_eq!(expr(&SyntaxNode::boolean(true)), ShapeTag::BooleanLiteral);
        assert_eq!(expr(&SyntaxNode::nil()), ShapeTag::NilLiteral);
        assert_eq!(expr(&SyntaxNode::atom("ok")), ShapeTag::AtomLiteral);
    }

    #[test]
    fn test_reference_vs_zero_arity_call() {
        assert_eq!(expr(&SyntaxNode::var("foo")), ShapeTag::Variable);
        assert_eq!(expr(&SyntaxNode::call("foo", vec![])), ShapeTag::LocalCall);
    }

    #[test]
    fn test_variable_duality() {
        let x = SyntaxNode::var("x");
        assert_eq!(expr(&x), ShapeTag::Variable);
        assert_eq!(pat(&x), ShapeTag::VariablePattern);
    }

    #[test]
    fn test_wildcard_before_variable() {
        assert_eq!(pat(&SyntaxNode::var("_")), ShapeTag::WildcardPattern);
        assert_eq!(pat(&SyntaxNode::var("_acc")), ShapeTag::WildcardPattern);
        assert_eq!(expr(&SyntaxNode::var("_")), ShapeTag::WildcardPattern);
        assert_eq!(pat(&SyntaxNode::var("__MODULE__")), ShapeTag::VariablePattern);
    }

    #[test]
    fn test_operators_by_name_and_arity() {
        let a = || SyntaxNode::int(1);
        assert_eq!(expr(&SyntaxNode::op("-", a(), a())), ShapeTag::ArithmeticOperator);
        assert_eq!(expr(&SyntaxNode::unary("-", a())), ShapeTag::UnaryOperator);
        assert_eq!(expr(&SyntaxNode::op("==", a(), a())), ShapeTag::ComparisonOperator);
        assert_eq!(expr(&SyntaxNode::op("&&", a(), a())), ShapeTag::LogicalOperator);
        assert_eq!(expr(&SyntaxNode::op("<>", a(), a())), ShapeTag::StringConcatOperator);
        assert_eq!(expr(&SyntaxNode::op("++", a(), a())), ShapeTag::ListOperator);
        assert_eq!(expr(&SyntaxNode::op("in", a(), a())), ShapeTag::MembershipOperator);
        assert_eq!(expr(&SyntaxNode::op("|>", a(), a())), ShapeTag::PipeOperator);
        assert_eq!(expr(&SyntaxNode::op("=", a(), a())), ShapeTag::MatchOperator);
        assert_eq!(expr(&SyntaxNode::op("..", a(), a())), ShapeTag::RangeExpression);
        // three-argument `+` is just a call
        assert_eq!(expr(&SyntaxNode::call("+", vec![a(), a(), a()])), ShapeTag::LocalCall);
    }

    #[test]
    fn test_special_forms_need_structure() {
        let cond = SyntaxNode::op("==", SyntaxNode::var("x"), SyntaxNode::int(1));
        let good_if = SyntaxNode::call(
            "if",
            vec![cond.clone(), SyntaxNode::keyword(vec![("do", SyntaxNode::int(1))])],
        );
        assert_eq!(expr(&good_if), ShapeTag::IfExpression);

        let bad_if = SyntaxNode::call("if", vec![cond, SyntaxNode::int(1)]);
        assert_eq!(expr(&bad_if), ShapeTag::LocalCall);

        let clause = SyntaxNode::clause(vec![SyntaxNode::boolean(true)], SyntaxNode::int(1));
        let cond_form = SyntaxNode::call(
            "cond",
            vec![SyntaxNode::keyword(vec![("do", SyntaxNode::list(vec![clause]))])],
        );
        assert_eq!(expr(&cond_form), ShapeTag::CondExpression);
    }

    #[test]
    fn test_dot_calls() {
        let remote = SyntaxNode::remote_call(SyntaxNode::alias(&["Enum"]), "map", vec![]);
        assert_eq!(expr(&remote), ShapeTag::RemoteCall);

        let field = SyntaxNode::remote_call(SyntaxNode::var("user"), "name", vec![])
            .with_meta(Meta::no_parens());
        assert_eq!(expr(&field), ShapeTag::FieldAccess);

        let access = SyntaxNode::remote_call(
            SyntaxNode::atom("Access"),
            "get",
            vec![SyntaxNode::var("m"), SyntaxNode::atom("k")],
        );
        assert_eq!(expr(&access), ShapeTag::AccessExpression);

        let anon = SyntaxNode::Form(Form {
            head: FormHead::Node(Box::new(SyntaxNode::call(".", vec![SyntaxNode::var("f")]))),
            meta: Meta::default(),
            args: crate::shared::models::FormArgs::List(vec![SyntaxNode::int(1)]),
        });
        assert_eq!(expr(&anon), ShapeTag::AnonymousCall);
    }

    #[test]
    fn test_pattern_table() {
        assert_eq!(pat(&SyntaxNode::int(1)), ShapeTag::LiteralPattern);
        assert_eq!(pat(&SyntaxNode::pair(SyntaxNode::atom("ok"), SyntaxNode::var("v"))), ShapeTag::TuplePattern);
        assert_eq!(pat(&SyntaxNode::list(vec![])), ShapeTag::ListPattern);
        assert_eq!(pat(&SyntaxNode::unary("^", SyntaxNode::var("x"))), ShapeTag::PinPattern);
        assert_eq!(
            pat(&SyntaxNode::op("in", SyntaxNode::var("e"), SyntaxNode::alias(&["RuntimeError"]))),
            ShapeTag::ExceptionPattern
        );
        assert_eq!(pat(&SyntaxNode::call("%{}", vec![])), ShapeTag::MapPattern);
        // falls through to the expression table
        assert_eq!(
            pat(&SyntaxNode::op("|", SyntaxNode::var("h"), SyntaxNode::var("t"))),
            ShapeTag::ConsOperator
        );
        assert_eq!(pat(&SyntaxNode::alias(&["Foo"])), ShapeTag::ModuleAlias);
    }

    #[test]
    fn test_forced_only_shapes_never_classified() {
        let entry = SyntaxNode::pair(SyntaxNode::atom("a"), SyntaxNode::int(1));
        assert_ne!(expr(&entry), ShapeTag::MapEntry);
        let step = SyntaxNode::op("<-", SyntaxNode::var("x"), SyntaxNode::var("y"));
        assert_eq!(expr(&step), ShapeTag::Generator);
    }

    #[test]
    fn test_malformed_falls_back() {
        let odd = SyntaxNode::Form(Form {
            head: FormHead::Node(Box::new(SyntaxNode::int(3))),
            meta: Meta::default(),
            args: crate::shared::models::FormArgs::List(vec![]),
        });
        assert_eq!(expr(&odd), ShapeTag::Unrecognized);
        assert_eq!(pat(&odd), ShapeTag::Unrecognized);
    }
}

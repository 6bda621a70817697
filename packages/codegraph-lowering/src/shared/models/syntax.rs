//! Syntax tree input model
//!
//! Read-only trees handed over by the parser collaborator. Interior nodes use
//! the 3-part quoted form `{head, meta, args}`; everything else is a terminal,
//! a list, or a literal 2-tuple.
//!
//! ```text
//! 1 + x          Form("+", [Integer(1), Form("x", Context("nil"))])
//! foo()          Form("foo", List([]))          -- zero-argument invocation
//! foo            Form("foo", Context("nil"))    -- bound-name reference
//! {a, b}         Pair(a, b)
//! [do: x]        List([Pair(Atom("do"), x)])
//! ```

use serde::{Deserialize, Serialize};

/// Source position metadata attached to interior nodes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
    /// `map.field` style access written without parentheses
    #[serde(default)]
    pub no_parens: bool,
}

impl Meta {
    pub fn at(line: u32, column: u32) -> Self {
        Self {
            line: Some(line),
            column: Some(column),
            no_parens: false,
        }
    }

    pub fn no_parens() -> Self {
        Self {
            no_parens: true,
            ..Self::default()
        }
    }
}

/// Head of a 3-part form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormHead {
    /// Operator, special form, local function or bound name
    Name(String),
    /// Nested form, e.g. the `.` of a remote call
    Node(Box<SyntaxNode>),
}

/// Third element of a 3-part form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormArgs {
    /// Arguments of an invocation, operator or special form
    List(Vec<SyntaxNode>),
    /// Context atom of a bound-name reference
    Context(String),
}

/// 3-part interior node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Form {
    pub head: FormHead,
    #[serde(default)]
    pub meta: Meta,
    pub args: FormArgs,
}

impl Form {
    pub fn name(&self) -> Option<&str> {
        match &self.head {
            FormHead::Name(name) => Some(name),
            FormHead::Node(_) => None,
        }
    }

    pub fn head_node(&self) -> Option<&SyntaxNode> {
        match &self.head {
            FormHead::Node(node) => Some(node),
            FormHead::Name(_) => None,
        }
    }

    /// Argument list, `None` for bound-name references
    pub fn arg_list(&self) -> Option<&[SyntaxNode]> {
        match &self.args {
            FormArgs::List(args) => Some(args),
            FormArgs::Context(_) => None,
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self.args, FormArgs::Context(_))
    }

    /// Named form with exactly `arity` arguments
    pub fn named_with_arity(&self, name: &str, arity: usize) -> Option<&[SyntaxNode]> {
        match (self.name(), self.arg_list()) {
            (Some(n), Some(args)) if n == name && args.len() == arity => Some(args),
            _ => None,
        }
    }

    fn detach_children(&mut self, pending: &mut Vec<SyntaxNode>) {
        if let FormArgs::List(args) = &mut self.args {
            pending.append(args);
        }
        if let FormHead::Node(head) = &mut self.head {
            pending.push(std::mem::replace(head.as_mut(), SyntaxNode::Integer(0)));
        }
    }
}

/// Nested forms are dismantled with an explicit stack; derived drop glue would
/// take one native frame per nesting level.
impl Drop for Form {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            match &mut node {
                SyntaxNode::Form(form) => form.detach_children(&mut pending),
                SyntaxNode::List(items) => pending.append(items),
                SyntaxNode::Pair(first, second) => {
                    pending.push(std::mem::replace(first.as_mut(), SyntaxNode::Integer(0)));
                    pending.push(std::mem::replace(second.as_mut(), SyntaxNode::Integer(0)));
                }
                _ => {}
            }
        }
    }
}

/// One syntactic construct
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyntaxNode {
    Integer(i64),
    Float(f64),
    String(String),
    /// Bare symbol; `true`, `false` and `nil` are the sentinel atoms
    Atom(String),
    List(Vec<SyntaxNode>),
    /// Literal 2-tuple
    Pair(Box<SyntaxNode>, Box<SyntaxNode>),
    Form(Form),
}

impl SyntaxNode {
    // ═══════════════════════════════════════════════════════════════════════
    // Constructors
    // ═══════════════════════════════════════════════════════════════════════

    pub fn int(value: i64) -> Self {
        Self::Integer(value)
    }

    pub fn float(value: f64) -> Self {
        Self::Float(value)
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    pub fn atom(name: impl Into<String>) -> Self {
        Self::Atom(name.into())
    }

    pub fn boolean(value: bool) -> Self {
        Self::Atom(if value { "true" } else { "false" }.to_string())
    }

    pub fn nil() -> Self {
        Self::Atom("nil".to_string())
    }

    pub fn list(items: Vec<SyntaxNode>) -> Self {
        Self::List(items)
    }

    pub fn pair(first: SyntaxNode, second: SyntaxNode) -> Self {
        Self::Pair(Box::new(first), Box::new(second))
    }

    /// Bound-name reference
    pub fn var(name: impl Into<String>) -> Self {
        Self::Form(Form {
            head: FormHead::Name(name.into()),
            meta: Meta::default(),
            args: FormArgs::Context("nil".to_string()),
        })
    }

    /// Named form with an argument list (invocation, operator, special form)
    pub fn call(name: impl Into<String>, args: Vec<SyntaxNode>) -> Self {
        Self::Form(Form {
            head: FormHead::Name(name.into()),
            meta: Meta::default(),
            args: FormArgs::List(args),
        })
    }

    pub fn op(name: impl Into<String>, left: SyntaxNode, right: SyntaxNode) -> Self {
        Self::call(name, vec![left, right])
    }

    pub fn unary(name: impl Into<String>, operand: SyntaxNode) -> Self {
        Self::call(name, vec![operand])
    }

    /// `Target.fun(args)`
    pub fn remote_call(target: SyntaxNode, fun: impl Into<String>, args: Vec<SyntaxNode>) -> Self {
        Self::Form(Form {
            head: FormHead::Node(Box::new(Self::call(
                ".",
                vec![target, Self::atom(fun)],
            ))),
            meta: Meta::default(),
            args: FormArgs::List(args),
        })
    }

    /// `Foo.Bar`
    pub fn alias(segments: &[&str]) -> Self {
        Self::call(
            "__aliases__",
            segments.iter().map(|s| Self::atom(*s)).collect(),
        )
    }

    /// `[key: value, ...]`
    pub fn keyword(entries: Vec<(&str, SyntaxNode)>) -> Self {
        Self::List(
            entries
                .into_iter()
                .map(|(key, value)| Self::pair(Self::atom(key), value))
                .collect(),
        )
    }

    pub fn block(statements: Vec<SyntaxNode>) -> Self {
        Self::call("__block__", statements)
    }

    /// `heads -> body`
    pub fn clause(heads: Vec<SyntaxNode>, body: SyntaxNode) -> Self {
        Self::call("->", vec![Self::List(heads), body])
    }

    /// Replace the metadata of a form (terminals carry none)
    pub fn with_meta(mut self, meta: Meta) -> Self {
        if let Self::Form(form) = &mut self {
            form.meta = meta;
        }
        self
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Accessors
    // ═══════════════════════════════════════════════════════════════════════

    pub fn as_form(&self) -> Option<&Form> {
        match self {
            Self::Form(form) => Some(form),
            _ => None,
        }
    }

    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Self::Atom(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[SyntaxNode]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn meta(&self) -> Option<&Meta> {
        self.as_form().map(|form| &form.meta)
    }

    /// Name of a bound-name reference (`x`, `_acc`)
    pub fn reference_name(&self) -> Option<&str> {
        self.as_form()
            .filter(|form| form.is_reference())
            .and_then(Form::name)
    }

    /// Keyword list entries, `None` unless every item is an `atom: value` pair
    pub fn keyword_entries(&self) -> Option<Vec<(&str, &SyntaxNode)>> {
        let items = self.as_list()?;
        items
            .iter()
            .map(|item| match item {
                Self::Pair(key, value) => key.as_atom().map(|k| (k, value.as_ref())),
                _ => None,
            })
            .collect()
    }

    /// Value stored under `key` in a keyword list
    pub fn keyword_get(&self, key: &str) -> Option<&SyntaxNode> {
        self.keyword_entries()?
            .into_iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    /// Absent input for the lowering gate: an empty block
    pub fn is_empty_block(&self) -> bool {
        self.as_form()
            .and_then(|form| form.named_with_arity("__block__", 0))
            .is_some()
    }

    /// Number of nodes in this subtree (including self)
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            match node {
                Self::Integer(_) | Self::Float(_) | Self::String(_) | Self::Atom(_) => {}
                Self::List(items) => stack.extend(items),
                Self::Pair(a, b) => {
                    stack.push(a);
                    stack.push(b);
                }
                Self::Form(form) => {
                    if let FormHead::Node(head) = &form.head {
                        stack.push(head);
                    }
                    if let FormArgs::List(args) = &form.args {
                        stack.extend(args);
                    }
                }
            }
        }
        count
    }
}

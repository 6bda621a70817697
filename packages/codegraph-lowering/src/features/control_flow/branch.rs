//! Branch extraction
//!
//! Shape-independent facts (`branchKind`, `branchCount`) are always emitted.
//! Branch conditions are lowered through the port when one is available and
//! the gate admits them; otherwise a `hasCondition` flag stands in.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::features::lowering::domain::vocabulary::{edge, prop, term};
use crate::features::lowering::domain::{
    ClassifyMode, LoweringContext, LoweringOutcome, ShapeTag, SyntaxLowering,
};
use crate::features::lowering::infrastructure::classifier::{
    self, clause_list, do_clauses, is_named,
};
use crate::shared::models::{Iri, LoweringResult, SyntaxNode, TripleSet};

/// Branching construct kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchKind {
    If,
    Unless,
    Cond,
    Case,
    With,
    Receive,
    Try,
}

impl BranchKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::If => "if",
            Self::Unless => "unless",
            Self::Cond => "cond",
            Self::Case => "case",
            Self::With => "with",
            Self::Receive => "receive",
            Self::Try => "try",
        }
    }

    fn from_shape(shape: ShapeTag) -> Option<Self> {
        Some(match shape {
            ShapeTag::IfExpression => Self::If,
            ShapeTag::UnlessExpression => Self::Unless,
            ShapeTag::CondExpression => Self::Cond,
            ShapeTag::CaseExpression => Self::Case,
            ShapeTag::WithExpression => Self::With,
            ShapeTag::ReceiveExpression => Self::Receive,
            ShapeTag::TryExpression => Self::Try,
            _ => return None,
        })
    }
}

impl fmt::Display for BranchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Branch structure read off one construct
#[derive(Debug, Clone, PartialEq)]
pub struct BranchShape<'a> {
    pub kind: BranchKind,
    /// Number of alternative paths
    pub count: usize,
    /// Expressions deciding between the paths
    pub conditions: Vec<&'a SyntaxNode>,
}

impl<'a> BranchShape<'a> {
    /// `None` for anything that is not a branching construct
    pub fn of(node: &'a SyntaxNode) -> Option<Self> {
        let kind = BranchKind::from_shape(classifier::classify(node, ClassifyMode::Expression))?;
        let args = node.as_form().and_then(|form| form.arg_list()).unwrap_or(&[]);
        let section = |options: &'a SyntaxNode, key: &str| {
            options
                .keyword_get(key)
                .and_then(clause_list)
                .unwrap_or(&[])
        };

        let (count, conditions) = match (kind, args) {
            (BranchKind::If | BranchKind::Unless, [condition, options]) => {
                let count = 1 + usize::from(options.keyword_get("else").is_some());
                (count, vec![condition])
            }
            (BranchKind::Cond, [options]) => {
                let clauses = do_clauses(options).unwrap_or(&[]);
                let tests = clauses.iter().filter_map(clause_head).collect();
                (clauses.len(), tests)
            }
            (BranchKind::Case, [subject, options]) => {
                (do_clauses(options).map_or(0, <[_]>::len), vec![subject])
            }
            (BranchKind::With, [steps @ .., options]) => {
                // unmatched steps fall through unless `else` handles them
                let fallbacks = section(options, "else").len();
                let has_match = steps.iter().any(|s| is_named(s, "<-"));
                let count = 1 + if fallbacks > 0 { fallbacks } else { usize::from(has_match) };
                (count, steps.iter().collect())
            }
            (BranchKind::Receive, [options]) => {
                let count = do_clauses(options).map_or(0, <[_]>::len) + section(options, "after").len();
                (count, Vec::new())
            }
            (BranchKind::Try, [options]) => {
                let handlers: usize = ["rescue", "catch", "else"]
                    .into_iter()
                    .map(|key| section(options, key).len())
                    .sum();
                (1 + handlers, Vec::new())
            }
            _ => (0, Vec::new()),
        };

        Some(Self {
            kind,
            count,
            conditions,
        })
    }
}

/// Single head of a `cond` clause
fn clause_head(clause: &SyntaxNode) -> Option<&SyntaxNode> {
    let form = clause.as_form()?;
    let [heads, _body] = form.arg_list()? else {
        return None;
    };
    match heads.as_list()? {
        [only] => Some(only),
        _ => None,
    }
}

/// Statements produced for one branching construct
#[derive(Debug, Clone, PartialEq)]
pub struct BranchExtraction {
    pub kind: BranchKind,
    pub statements: TripleSet,
    /// Lowered condition resources, empty on the flag-only path
    pub conditions: Vec<Iri>,
}

pub struct BranchExtractor<'d> {
    lowering: Option<&'d dyn SyntaxLowering>,
}

impl<'d> BranchExtractor<'d> {
    pub fn new(lowering: Option<&'d dyn SyntaxLowering>) -> Self {
        Self { lowering }
    }

    pub fn flag_only() -> Self {
        Self { lowering: None }
    }

    /// Record the branch facts of `node` on `owner`
    ///
    /// Returns `None` (and the context unchanged) when `node` does not branch.
    pub fn extract(
        &self,
        owner: &Iri,
        node: &SyntaxNode,
        mut ctx: LoweringContext,
    ) -> LoweringResult<(Option<BranchExtraction>, LoweringContext)> {
        let Some(shape) = BranchShape::of(node) else {
            return Ok((None, ctx));
        };

        let mut statements = TripleSet::new();
        statements.add_literal(owner, term(prop::BRANCH_KIND), shape.kind.as_str());
        statements.add_literal(owner, term(prop::BRANCH_COUNT), shape.count as i64);

        let mut conditions = Vec::new();
        if let Some(lowering) = self.lowering {
            for (i, condition) in shape.conditions.iter().copied().enumerate() {
                let role = format!("conditionExpression/{}", i);
                let (outcome, next) = lowering.lower_at(Some(condition), owner, &role, ctx)?;
                ctx = next;
                match outcome {
                    LoweringOutcome::Produced {
                        resource,
                        statements: produced,
                    } => {
                        statements.merge(produced);
                        statements.add_resource(
                            owner,
                            term(edge::HAS_CONDITION_EXPRESSION),
                            &resource,
                        );
                        conditions.push(resource);
                    }
                    LoweringOutcome::Skipped(reason) => {
                        debug!(owner = %owner, %reason, "branch condition kept as flag");
                    }
                }
            }
        }

        if conditions.is_empty() && !shape.conditions.is_empty() {
            statements.add_literal(owner, term(prop::HAS_CONDITION), true);
        }

        Ok((
            Some(BranchExtraction {
                kind: shape.kind,
                statements,
                conditions,
            }),
            ctx,
        ))
    }
}

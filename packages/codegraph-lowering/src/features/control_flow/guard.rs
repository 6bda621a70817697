//! Guard extraction
//!
//! Attaches the guard of a clause (or a function head) to its owner resource.
//! With a lowering port available the guard expression is lowered in full and
//! linked; otherwise only the presence flag is recorded.

use tracing::debug;

use crate::features::lowering::domain::vocabulary::{edge, prop, term};
use crate::features::lowering::domain::{LoweringContext, LoweringOutcome, SyntaxLowering};
use crate::shared::models::{Iri, LoweringResult, SyntaxNode, TripleSet};

/// Role of the lowered guard under its owner
pub const GUARD_ROLE: &str = "guardExpression";

/// Statements produced for one guard
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuardExtraction {
    pub statements: TripleSet,
    /// Lowered guard expression, `None` on the flag-only path
    pub guard: Option<Iri>,
}

impl GuardExtraction {
    pub fn is_lowered(&self) -> bool {
        self.guard.is_some()
    }
}

pub struct GuardExtractor<'d> {
    lowering: Option<&'d dyn SyntaxLowering>,
}

impl<'d> GuardExtractor<'d> {
    pub fn new(lowering: Option<&'d dyn SyntaxLowering>) -> Self {
        Self { lowering }
    }

    /// Flag-only extractor
    pub fn flag_only() -> Self {
        Self { lowering: None }
    }

    /// Guard of `node`: the last argument of a `when` form, looking through
    /// a clause head (`x when x > 0 -> ...`)
    pub fn guard_of(node: &SyntaxNode) -> Option<&SyntaxNode> {
        let form = node.as_form()?;
        match form.name()? {
            "when" => form.arg_list().filter(|args| args.len() >= 2)?.last(),
            "->" => {
                let [heads, _body] = form.arg_list()? else {
                    return None;
                };
                match heads.as_list()? {
                    [only] => Self::guard_of(only),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// Record the guard of `node` (if any) on `owner`
    pub fn extract(
        &self,
        owner: &Iri,
        node: &SyntaxNode,
        ctx: LoweringContext,
    ) -> LoweringResult<(GuardExtraction, LoweringContext)> {
        match Self::guard_of(node) {
            Some(guard) => self.extract_guard(owner, guard, ctx),
            None => Ok((GuardExtraction::default(), ctx)),
        }
    }

    /// Record an already located guard expression on `owner`
    pub fn extract_guard(
        &self,
        owner: &Iri,
        guard: &SyntaxNode,
        ctx: LoweringContext,
    ) -> LoweringResult<(GuardExtraction, LoweringContext)> {
        let mut extraction = GuardExtraction::default();

        let ctx = match self.lowering {
            Some(lowering) => {
                let (outcome, ctx) = lowering.lower_at(Some(guard), owner, GUARD_ROLE, ctx)?;
                match outcome {
                    LoweringOutcome::Produced {
                        resource,
                        statements,
                    } => {
                        extraction.statements.merge(statements);
                        extraction.statements.add_resource(
                            owner,
                            term(edge::HAS_GUARD_EXPRESSION),
                            &resource,
                        );
                        extraction.guard = Some(resource);
                    }
                    LoweringOutcome::Skipped(reason) => {
                        debug!(owner = %owner, %reason, "guard kept as flag");
                    }
                }
                ctx
            }
            None => ctx,
        };

        if extraction.guard.is_none() {
            extraction
                .statements
                .add_literal(owner, term(prop::HAS_GUARD), true);
        }
        Ok((extraction, ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::lowering::domain::ExtractionMode;
    use crate::features::lowering::infrastructure::LoweringDriver;
    use crate::shared::models::{Literal, Object};

    fn guarded_clause() -> SyntaxNode {
        SyntaxNode::clause(
            vec![SyntaxNode::op(
                "when",
                SyntaxNode::var("x"),
                SyntaxNode::call("is_integer", vec![SyntaxNode::var("x")]),
            )],
            SyntaxNode::var("x"),
        )
    }

    #[test]
    fn test_guard_of_clause_and_when() {
        let clause = guarded_clause();
        let guard = GuardExtractor::guard_of(&clause).unwrap();
        assert_eq!(guard.as_form().and_then(|f| f.name()), Some("is_integer"));
        assert!(GuardExtractor::guard_of(&SyntaxNode::var("x")).is_none());
    }

    #[test]
    fn test_lowered_guard_is_linked() {
        let driver = LoweringDriver::new();
        let owner = Iri::new("urn:g/1/0");
        let ctx = LoweringContext::new(Iri::new("urn:g"));

        let (extraction, _) = GuardExtractor::new(Some(&driver))
            .extract(&owner, &guarded_clause(), ctx)
            .unwrap();

        let resource = extraction.guard.clone().unwrap();
        assert_eq!(resource, owner.join(GUARD_ROLE));
        let link = term(edge::HAS_GUARD_EXPRESSION);
        assert_eq!(
            extraction.statements.objects(&owner, &link).collect::<Vec<_>>(),
            vec![&Object::Resource(resource)]
        );
    }

    #[test]
    fn test_flag_only_fallback_without_port() {
        let owner = Iri::new("urn:g/1/0");
        let ctx = LoweringContext::new(Iri::new("urn:g"));
        let (extraction, _) = GuardExtractor::flag_only()
            .extract(&owner, &guarded_clause(), ctx)
            .unwrap();

        assert!(!extraction.is_lowered());
        let flag = term(prop::HAS_GUARD);
        assert_eq!(
            extraction.statements.objects(&owner, &flag).collect::<Vec<_>>(),
            vec![&Object::Literal(Literal::Boolean(true))]
        );
        assert_eq!(extraction.statements.len(), 1);
    }

    #[test]
    fn test_flag_only_fallback_when_gate_rejects() {
        let driver = LoweringDriver::new();
        let owner = Iri::new("urn:g/1/0");
        let ctx = LoweringContext::new(Iri::new("urn:g")).with_mode(ExtractionMode::FlagOnly);
        let (extraction, _) = GuardExtractor::new(Some(&driver))
            .extract(&owner, &guarded_clause(), ctx)
            .unwrap();
        assert!(!extraction.is_lowered());
        assert_eq!(extraction.statements.len(), 1);
    }

    #[test]
    fn test_foreign_owner_is_fatal() {
        let driver = LoweringDriver::new();
        let ctx = LoweringContext::new(Iri::new("urn:g"));
        let err = GuardExtractor::new(Some(&driver))
            .extract(&Iri::new("urn:elsewhere/1"), &guarded_clause(), ctx)
            .unwrap_err();
        assert!(err.is_fatal());
    }
}

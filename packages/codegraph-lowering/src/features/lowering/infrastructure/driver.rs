//! Lowering Driver - recursive syntax tree → statement set
//!
//! Gate-check → Classify → Assign-Identity → Invoke-Builder →
//! Recurse-Children → Merge → Return.
//!
//! The driver never fails on malformed input; the only errors it propagates
//! are context contract violations. Every level appends to one flat
//! accumulator that becomes the call's `TripleSet` at the end, and each
//! recursive step runs under `ensure_sufficient_stack`, so any depth up to
//! `lowering.max_depth` is safe on an ordinary thread.

use tracing::{debug, trace};

use super::builders::BuilderRegistry;
use super::classifier::classify;
use super::fingerprint::structural_key;
use super::gate::ModeGate;
use crate::features::lowering::domain::vocabulary::{prop, term};
use crate::features::lowering::domain::{
    BuildContext, Built, ChildRequest, LoweringContext, LoweringOutcome, ShapeTag, SkipReason,
    Slot, SyntaxLowering,
};
use crate::shared::models::{
    Iri, LoweringError, LoweringResult, Object, SyntaxNode, Triple, TripleSet,
};
use crate::shared::utils::stack::ensure_sufficient_stack;
use crate::shared::IdGenerator;

/// Stateless lowering driver; all state travels in the `LoweringContext`
#[derive(Debug, Clone, Copy, Default)]
pub struct LoweringDriver;

impl LoweringDriver {
    pub fn new() -> Self {
        Self
    }

    /// Gate the call; on rejection the context comes back untouched
    fn admit<'n>(
        ctx: &LoweringContext,
        node: Option<&'n SyntaxNode>,
    ) -> Result<&'n SyntaxNode, SkipReason> {
        match (ModeGate::check(ctx, node), node) {
            (None, Some(node)) => Ok(node),
            (reason, _) => Err(reason.unwrap_or(SkipReason::EmptyInput)),
        }
    }

    /// One top-level descent. Cache entries never outlive it.
    fn descend(&self, node: &SyntaxNode, resource: &Iri, ctx: &mut LoweringContext) -> TripleSet {
        if let Some(cache) = ctx.cache_mut() {
            cache.clear();
        }
        let slot = Slot::Classify(ctx.classify_mode());
        let mut out = Vec::new();
        ensure_sufficient_stack(|| self.lower_node(node, resource, slot, 0, ctx, &mut out));
        if let Some(cache) = ctx.cache_mut() {
            cache.clear();
        }
        out.into_iter().collect()
    }

    fn lower_node(
        &self,
        node: &SyntaxNode,
        resource: &Iri,
        slot: Slot,
        depth: usize,
        ctx: &mut LoweringContext,
        out: &mut Vec<Triple>,
    ) {
        ctx.stats_mut().nodes_lowered += 1;
        let limits = ctx.limits();
        let cx = BuildContext { mode: slot.mode() };

        if depth >= limits.max_depth {
            ctx.stats_mut().truncated_subtrees += 1;
            debug!(resource = %resource, depth, "depth limit reached, subtree truncated");
            out.extend(BuilderRegistry::build(ShapeTag::Unrecognized, node, resource, cx).statements);
            return;
        }

        let shape = match slot {
            Slot::Classify(mode) => classify(node, mode),
            Slot::Forced(shape, _) => shape,
        };
        trace!(resource = %resource, shape = %shape, mode = slot.mode().as_str(), "lowering node");

        let Built {
            mut statements,
            children,
        } = BuilderRegistry::build(shape, node, resource, cx);

        if limits.include_locations && !shape.is_terminal() && shape != ShapeTag::Unrecognized {
            if let Some(meta) = node.meta() {
                if let Some(line) = meta.line {
                    statements.add_literal(resource, term(prop::START_LINE), i64::from(line));
                }
                if let Some(column) = meta.column {
                    statements.add_literal(resource, term(prop::START_COLUMN), i64::from(column));
                }
            }
        }
        out.extend(statements);

        for child in children {
            let child_id = self.lower_child(&child, resource, depth + 1, ctx, out);
            out.push(Triple::new(
                resource.clone(),
                child.predicate,
                Object::Resource(child_id),
            ));
        }
    }

    /// Resolve one child slot, through the structural cache when present
    fn lower_child(
        &self,
        child: &ChildRequest<'_>,
        parent: &Iri,
        depth: usize,
        ctx: &mut LoweringContext,
        out: &mut Vec<Triple>,
    ) -> Iri {
        let max_depth = ctx.limits().max_depth;
        let key = ctx.cache().and_then(|cache| {
            let (key, size) = structural_key(child.node, child.slot, cache.max_subtree_nodes())?;
            // a subtree that may be truncated differs with its depth
            (cache.is_eligible(size) && depth + size < max_depth).then_some(key)
        });

        if let Some(key) = &key {
            if let Some(hit) = ctx.cache().and_then(|cache| cache.get(key)) {
                let reused = hit.resource.clone();
                out.extend(hit.statements.iter().cloned());
                ctx.stats_mut().cache_hits += 1;
                debug!(parent = %parent, role = %child.role, reused = %reused, "structural cache hit");
                return reused;
            }
        }

        let id = IdGenerator::relative(parent, &child.role);
        let start = out.len();
        ensure_sufficient_stack(|| self.lower_node(child.node, &id, child.slot, depth, ctx, out));

        if let (Some(key), Some(cache)) = (key, ctx.cache_mut()) {
            if !cache.is_full() {
                cache.insert(key, id.clone(), out[start..].to_vec());
            }
        }
        id
    }
}

impl SyntaxLowering for LoweringDriver {
    fn lower(
        &self,
        node: Option<&SyntaxNode>,
        mut ctx: LoweringContext,
    ) -> LoweringResult<(LoweringOutcome, LoweringContext)> {
        let node = match Self::admit(&ctx, node) {
            Ok(node) => node,
            Err(reason) => {
                debug!(namespace = %ctx.namespace(), %reason, "lowering skipped");
                ctx.stats_mut().roots_skipped += 1;
                return Ok((LoweringOutcome::Skipped(reason), ctx));
            }
        };

        let (resource, mut ctx) = ctx.next_root()?;
        let statements = self.descend(node, &resource, &mut ctx);
        ctx.stats_mut().roots_produced += 1;

        Ok((
            LoweringOutcome::Produced {
                resource,
                statements,
            },
            ctx,
        ))
    }

    fn lower_at(
        &self,
        node: Option<&SyntaxNode>,
        parent: &Iri,
        role: &str,
        mut ctx: LoweringContext,
    ) -> LoweringResult<(LoweringOutcome, LoweringContext)> {
        if !ctx.owns(parent) {
            return Err(LoweringError::context_misuse(
                ctx.namespace().as_str(),
                parent.as_str(),
            ));
        }

        let node = match Self::admit(&ctx, node) {
            Ok(node) => node,
            Err(reason) => {
                debug!(parent = %parent, role, %reason, "lowering skipped");
                return Ok((LoweringOutcome::Skipped(reason), ctx));
            }
        };

        let resource = IdGenerator::relative(parent, role);
        let statements = self.descend(node, &resource, &mut ctx);

        Ok((
            LoweringOutcome::Produced {
                resource,
                statements,
            },
            ctx,
        ))
    }
}

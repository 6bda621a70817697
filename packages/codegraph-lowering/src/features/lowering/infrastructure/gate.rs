//! Mode/Provenance Gate

use crate::features::lowering::domain::{ExtractionMode, LoweringContext, SkipReason, SourceOrigin};
use crate::shared::models::SyntaxNode;

pub struct ModeGate;

impl ModeGate {
    /// Vendored units are flag-only whatever the configuration says
    pub fn effective_mode(full_mode_enabled: bool, origin: SourceOrigin) -> ExtractionMode {
        if full_mode_enabled && origin.is_first_party() {
            ExtractionMode::Full
        } else {
            ExtractionMode::FlagOnly
        }
    }

    /// `Some(reason)` when the driver must not produce anything
    pub fn check(ctx: &LoweringContext, node: Option<&SyntaxNode>) -> Option<SkipReason> {
        if ctx.origin() == SourceOrigin::Vendored {
            return Some(SkipReason::VendoredSource);
        }
        if ctx.mode() == ExtractionMode::FlagOnly {
            return Some(SkipReason::FlagOnlyMode);
        }
        match node {
            None => Some(SkipReason::EmptyInput),
            Some(n) if n.is_empty_block() => Some(SkipReason::EmptyInput),
            Some(_) => None,
        }
    }

    pub fn allows(ctx: &LoweringContext, node: Option<&SyntaxNode>) -> bool {
        Self::check(ctx, node).is_none()
    }
}

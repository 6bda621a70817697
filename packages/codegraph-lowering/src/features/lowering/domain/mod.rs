//! Lowering Domain - ports and value types for syntax tree → graph lowering

pub mod cache;
pub mod context;
pub mod outcome;
pub mod shape;
pub mod vocabulary;

pub use cache::{CacheKey, CachedSubtree, StructuralCache};
pub use context::{
    ClassifyMode, ExtractionMode, LoweringContext, LoweringLimits, LoweringStats, SourceOrigin,
};
pub use outcome::{LoweringOutcome, SkipReason};
pub use shape::ShapeTag;

use crate::shared::models::{Iri, LoweringResult, SyntaxNode, TripleSet};
use serde::{Deserialize, Serialize};

/// Syntax Lowering Trait (Port)
///
/// Held by collaborators (guard / branch extractors) as `Option<&dyn SyntaxLowering>`.
pub trait SyntaxLowering: Send + Sync {
    /// Lower a top-level tree at the next root identifier of `ctx`
    fn lower(
        &self,
        node: Option<&SyntaxNode>,
        ctx: LoweringContext,
    ) -> LoweringResult<(LoweringOutcome, LoweringContext)>;

    /// Lower a subtree at `{parent}/{role}`; `parent` must belong to `ctx`'s lineage
    fn lower_at(
        &self,
        node: Option<&SyntaxNode>,
        parent: &Iri,
        role: &str,
        ctx: LoweringContext,
    ) -> LoweringResult<(LoweringOutcome, LoweringContext)>;
}

/// How a child slot is classified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Run the classifier with this table
    Classify(ClassifyMode),
    /// Skip classification; the parent already knows the shape
    Forced(ShapeTag, ClassifyMode),
}

impl Slot {
    pub fn mode(self) -> ClassifyMode {
        match self {
            Slot::Classify(mode) | Slot::Forced(_, mode) => mode,
        }
    }
}

/// One child requiring recursive lowering
#[derive(Debug, Clone)]
pub struct ChildRequest<'a> {
    pub node: &'a SyntaxNode,
    /// Path segment of the child's relative identifier
    pub role: String,
    /// Edge from the parent resource to the child resource
    pub predicate: Iri,
    pub slot: Slot,
}

/// Builder output: own statements plus ordered child requests
#[derive(Debug, Clone, Default)]
pub struct Built<'a> {
    pub statements: TripleSet,
    pub children: Vec<ChildRequest<'a>>,
}

/// Read-only view a builder gets of the lowering call
#[derive(Debug, Clone, Copy)]
pub struct BuildContext {
    /// Table the node was classified with
    pub mode: ClassifyMode,
}

/// One parsed source file handed to the use case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceUnit {
    /// Project-relative path
    pub path: String,
    /// Top-level trees, lowered in order through one lineage
    pub roots: Vec<SyntaxNode>,
}

impl SourceUnit {
    pub fn new(path: impl Into<String>, roots: Vec<SyntaxNode>) -> Self {
        Self {
            path: path.into(),
            roots,
        }
    }
}

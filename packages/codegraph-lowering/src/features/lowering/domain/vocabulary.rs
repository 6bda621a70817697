//! Graph vocabulary - class and property terms
//!
//! Terms are interned: every call to [`term`] with the same local name hands
//! out a clone of the same `Arc<str>`.

use super::shape::ShapeTag;
use crate::shared::models::Iri;
use dashmap::DashMap;
use std::sync::LazyLock;

/// Namespace of all class and property terms
pub const NAMESPACE: &str = "https://w3id.org/codegraph/syntax#";

/// The is-a predicate
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

/// Literal-valued properties
pub mod prop {
    pub const VALUE: &str = "value";
    pub const ATOM_NAME: &str = "atomName";
    pub const NAME: &str = "name";
    pub const VARIABLE_CONTEXT: &str = "variableContext";
    pub const INTRODUCES_BINDING: &str = "introducesBinding";
    pub const OPERATOR_SYMBOL: &str = "operatorSymbol";
    pub const FUNCTION_NAME: &str = "functionName";
    pub const ARITY: &str = "arity";
    pub const FIELD_NAME: &str = "fieldName";
    pub const MODULE_NAME: &str = "moduleName";
    pub const ATTRIBUTE_NAME: &str = "attributeName";
    pub const SIGIL_NAME: &str = "sigilName";
    pub const SIGIL_MODIFIERS: &str = "sigilModifiers";
    pub const ELEMENT_COUNT: &str = "elementCount";
    pub const ENTRY_COUNT: &str = "entryCount";
    pub const CLAUSE_COUNT: &str = "clauseCount";
    pub const STATEMENT_COUNT: &str = "statementCount";
    pub const PATTERN_COUNT: &str = "patternCount";
    pub const CAPTURE_ARITY: &str = "captureArity";
    pub const PLACEHOLDER_INDEX: &str = "placeholderIndex";
    pub const IS_UNIQUE: &str = "isUnique";
    pub const START_LINE: &str = "startLine";
    pub const START_COLUMN: &str = "startColumn";

    // Collaborator facts
    pub const HAS_GUARD: &str = "hasGuard";
    pub const HAS_CONDITION: &str = "hasCondition";
    pub const BRANCH_KIND: &str = "branchKind";
    pub const BRANCH_COUNT: &str = "branchCount";
}

/// Object-valued properties (edges to child resources)
pub mod edge {
    pub const HAS_ELEMENT: &str = "hasElement";
    pub const HAS_ENTRY: &str = "hasEntry";
    pub const HAS_KEY: &str = "hasKey";
    pub const HAS_VALUE: &str = "hasValue";
    pub const HAS_BASE: &str = "hasBase";
    pub const HAS_STRUCT_TYPE: &str = "hasStructType";
    pub const HAS_SEGMENT: &str = "hasSegment";
    pub const HAS_TYPE_SPEC: &str = "hasTypeSpec";
    pub const HAS_PART: &str = "hasPart";
    pub const HAS_HEAD: &str = "hasHead";
    pub const HAS_TAIL: &str = "hasTail";
    pub const LEFT_OPERAND: &str = "leftOperand";
    pub const RIGHT_OPERAND: &str = "rightOperand";
    pub const HAS_OPERAND: &str = "hasOperand";
    pub const HAS_FIRST: &str = "hasFirst";
    pub const HAS_LAST: &str = "hasLast";
    pub const HAS_STEP: &str = "hasStep";
    pub const HAS_CAPTURED_FUNCTION: &str = "hasCapturedFunction";
    pub const HAS_BODY: &str = "hasBody";
    pub const HAS_ARGUMENT: &str = "hasArgument";
    pub const HAS_TARGET: &str = "hasTarget";
    pub const HAS_FUNCTION: &str = "hasFunction";
    pub const HAS_CONTAINER: &str = "hasContainer";
    pub const HAS_CLAUSE: &str = "hasClause";
    pub const HAS_PATTERN: &str = "hasPattern";
    pub const HAS_GUARD_CONDITION: &str = "hasGuardCondition";
    pub const HAS_TEST: &str = "hasTest";
    pub const HAS_DEFAULT: &str = "hasDefault";
    pub const HAS_STATEMENT: &str = "hasStatement";
    pub const HAS_THEN_BRANCH: &str = "hasThenBranch";
    pub const HAS_ELSE_BRANCH: &str = "hasElseBranch";
    pub const HAS_SUBJECT: &str = "hasSubject";
    pub const HAS_ELSE_CLAUSE: &str = "hasElseClause";
    pub const HAS_AFTER_CLAUSE: &str = "hasAfterClause";
    pub const HAS_RESCUE_CLAUSE: &str = "hasRescueClause";
    pub const HAS_CATCH_CLAUSE: &str = "hasCatchClause";
    pub const HAS_AFTER_BLOCK: &str = "hasAfterBlock";
    pub const HAS_EXCEPTION: &str = "hasException";
    pub const HAS_MESSAGE: &str = "hasMessage";
    pub const HAS_STACKTRACE: &str = "hasStacktrace";
    pub const HAS_EXCEPTION_TYPE: &str = "hasExceptionType";
    pub const HAS_BINDING: &str = "hasBinding";
    pub const HAS_GENERATOR: &str = "hasGenerator";
    pub const HAS_FILTER: &str = "hasFilter";
    pub const HAS_COLLECTABLE: &str = "hasCollectable";
    pub const HAS_INITIAL_ACCUMULATOR: &str = "hasInitialAccumulator";
    pub const HAS_ENUMERABLE: &str = "hasEnumerable";
    pub const HAS_PINNED_VARIABLE: &str = "hasPinnedVariable";

    // Collaborator edges
    pub const HAS_GUARD_EXPRESSION: &str = "hasGuardExpression";
    pub const HAS_CONDITION_EXPRESSION: &str = "hasConditionExpression";
}

static TERMS: LazyLock<DashMap<&'static str, Iri>> = LazyLock::new(DashMap::new);
static RDF_TYPE_IRI: LazyLock<Iri> = LazyLock::new(|| Iri::new(RDF_TYPE));

/// Vocabulary term for a local name (concurrent-safe, interned)
#[inline]
pub fn term(local: &'static str) -> Iri {
    // Fast path: already interned
    if let Some(entry) = TERMS.get(local) {
        return entry.value().clone();
    }

    TERMS
        .entry(local)
        .or_insert_with(|| Iri::new(format!("{}{}", NAMESPACE, local)))
        .value()
        .clone()
}

/// `rdf:type`
#[inline]
pub fn is_a() -> Iri {
    RDF_TYPE_IRI.clone()
}

/// Class term of a shape
#[inline]
pub fn class(shape: ShapeTag) -> Iri {
    term(shape.class_name())
}

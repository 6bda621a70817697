//! Shape tags - closed set of recognized syntax shapes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete classification of one syntax node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShapeTag {
    // Terminals
    IntegerLiteral,
    FloatLiteral,
    StringLiteral,
    BooleanLiteral,
    NilLiteral,
    AtomLiteral,
    WildcardPattern,

    // Collections
    ListLiteral,
    KeywordList,
    TupleLiteral,
    MapLiteral,
    MapUpdate,
    /// Only produced as a forced slot of map, struct and keyword builders
    MapEntry,
    StructLiteral,
    BinaryLiteral,
    BinarySegment,
    SigilLiteral,
    ConsOperator,

    // Names
    Variable,
    ModuleAlias,
    ModuleAttribute,

    // Operators
    ArithmeticOperator,
    ComparisonOperator,
    LogicalOperator,
    UnaryOperator,
    StringConcatOperator,
    ListOperator,
    MembershipOperator,
    MatchOperator,
    PipeOperator,
    RangeExpression,
    CaptureOperator,
    CapturePlaceholder,

    // Calls
    LocalCall,
    RemoteCall,
    AnonymousCall,
    AccessExpression,
    FieldAccess,

    // Functions & clauses
    AnonymousFunction,
    Clause,
    Guard,
    DefaultArgument,
    Block,

    // Control flow
    IfExpression,
    UnlessExpression,
    CondExpression,
    CaseExpression,
    WithExpression,
    /// Only produced as a forced slot of `with` steps
    WithClause,
    ReceiveExpression,

    // Exceptions
    TryExpression,
    RaiseExpression,
    ThrowExpression,
    ExceptionPattern,

    // Comprehensions
    Comprehension,
    Generator,

    // Patterns
    LiteralPattern,
    VariablePattern,
    PinPattern,
    TuplePattern,
    ListPattern,
    MapPattern,
    StructPattern,
    BinaryPattern,
    MatchPattern,

    /// Generic fallback; never an error
    Unrecognized,
}

impl ShapeTag {
    pub const ALL: &'static [ShapeTag] = &[
        Self::IntegerLiteral,
        Self::FloatLiteral,
        Self::StringLiteral,
        Self::BooleanLiteral,
        Self::NilLiteral,
        Self::AtomLiteral,
        Self::WildcardPattern,
        Self::ListLiteral,
        Self::KeywordList,
        Self::TupleLiteral,
        Self::MapLiteral,
        Self::MapUpdate,
        Self::MapEntry,
        Self::StructLiteral,
        Self::BinaryLiteral,
        Self::BinarySegment,
        Self::SigilLiteral,
        Self::ConsOperator,
        Self::Variable,
        Self::ModuleAlias,
        Self::ModuleAttribute,
        Self::ArithmeticOperator,
        Self::ComparisonOperator,
        Self::LogicalOperator,
        Self::UnaryOperator,
        Self::StringConcatOperator,
        Self::ListOperator,
        Self::MembershipOperator,
        Self::MatchOperator,
        Self::PipeOperator,
        Self::RangeExpression,
        Self::CaptureOperator,
        Self::CapturePlaceholder,
        Self::LocalCall,
        Self::RemoteCall,
        Self::AnonymousCall,
        Self::AccessExpression,
        Self::FieldAccess,
        Self::AnonymousFunction,
        Self::Clause,
        Self::Guard,
        Self::DefaultArgument,
        Self::Block,
        Self::IfExpression,
        Self::UnlessExpression,
        Self::CondExpression,
        Self::CaseExpression,
        Self::WithExpression,
        Self::WithClause,
        Self::ReceiveExpression,
        Self::TryExpression,
        Self::RaiseExpression,
        Self::ThrowExpression,
        Self::ExceptionPattern,
        Self::Comprehension,
        Self::Generator,
        Self::LiteralPattern,
        Self::VariablePattern,
        Self::PinPattern,
        Self::TuplePattern,
        Self::ListPattern,
        Self::MapPattern,
        Self::StructPattern,
        Self::BinaryPattern,
        Self::MatchPattern,
        Self::Unrecognized,
    ];

    /// Local name of the vocabulary class for this shape
    pub fn class_name(self) -> &'static str {
        match self {
            Self::IntegerLiteral => "IntegerLiteral",
            Self::FloatLiteral => "FloatLiteral",
            Self::StringLiteral => "StringLiteral",
            Self::BooleanLiteral => "BooleanLiteral",
            Self::NilLiteral => "NilLiteral",
            Self::AtomLiteral => "AtomLiteral",
            Self::WildcardPattern => "WildcardPattern",
            Self::ListLiteral => "ListLiteral",
            Self::KeywordList => "KeywordList",
            Self::TupleLiteral => "TupleLiteral",
            Self::MapLiteral => "MapLiteral",
            Self::MapUpdate => "MapUpdateExpression",
            Self::MapEntry => "MapEntry",
            Self::StructLiteral => "StructLiteral",
            Self::BinaryLiteral => "BinaryLiteral",
            Self::BinarySegment => "BinarySegment",
            Self::SigilLiteral => "SigilLiteral",
            Self::ConsOperator => "ConsOperator",
            Self::Variable => "Variable",
            Self::ModuleAlias => "ModuleReference",
            Self::ModuleAttribute => "ModuleAttributeReference",
            Self::ArithmeticOperator => "ArithmeticOperator",
            Self::ComparisonOperator => "ComparisonOperator",
            Self::LogicalOperator => "LogicalOperator",
            Self::UnaryOperator => "UnaryOperator",
            Self::StringConcatOperator => "StringConcatOperator",
            Self::ListOperator => "ListOperator",
            Self::MembershipOperator => "MembershipOperator",
            Self::MatchOperator => "MatchOperator",
            Self::PipeOperator => "PipeOperator",
            Self::RangeExpression => "RangeExpression",
            Self::CaptureOperator => "CaptureOperator",
            Self::CapturePlaceholder => "CapturePlaceholder",
            Self::LocalCall => "LocalCall",
            Self::RemoteCall => "RemoteCall",
            Self::AnonymousCall => "AnonymousFunctionCall",
            Self::AccessExpression => "AccessExpression",
            Self::FieldAccess => "FieldAccess",
            Self::AnonymousFunction => "AnonymousFunction",
            Self::Clause => "Clause",
            Self::Guard => "Guard",
            Self::DefaultArgument => "DefaultArgument",
            Self::Block => "BlockExpression",
            Self::IfExpression => "IfExpression",
            Self::UnlessExpression => "UnlessExpression",
            Self::CondExpression => "CondExpression",
            Self::CaseExpression => "CaseExpression",
            Self::WithExpression => "WithExpression",
            Self::WithClause => "WithClause",
            Self::ReceiveExpression => "ReceiveExpression",
            Self::TryExpression => "TryExpression",
            Self::RaiseExpression => "RaiseExpression",
            Self::ThrowExpression => "ThrowExpression",
            Self::ExceptionPattern => "ExceptionPattern",
            Self::Comprehension => "Comprehension",
            Self::Generator => "Generator",
            Self::LiteralPattern => "LiteralPattern",
            Self::VariablePattern => "VariablePattern",
            Self::PinPattern => "PinPattern",
            Self::TuplePattern => "TuplePattern",
            Self::ListPattern => "ListPattern",
            Self::MapPattern => "MapPattern",
            Self::StructPattern => "StructPattern",
            Self::BinaryPattern => "BinaryPattern",
            Self::MatchPattern => "MatchPattern",
            Self::Unrecognized => "Expression",
        }
    }

    /// Shapes that carry their value as a literal and request no children
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::IntegerLiteral
                | Self::FloatLiteral
                | Self::StringLiteral
                | Self::BooleanLiteral
                | Self::NilLiteral
                | Self::AtomLiteral
                | Self::WildcardPattern
                | Self::LiteralPattern
                | Self::VariablePattern
                | Self::Variable
                | Self::ModuleAlias
                | Self::CapturePlaceholder
        )
    }

    /// Shapes only reachable in pattern mode
    pub fn is_pattern(self) -> bool {
        matches!(
            self,
            Self::LiteralPattern
                | Self::VariablePattern
                | Self::PinPattern
                | Self::TuplePattern
                | Self::ListPattern
                | Self::MapPattern
                | Self::StructPattern
                | Self::BinaryPattern
                | Self::MatchPattern
                | Self::ExceptionPattern
        )
    }

    /// Never returned by the classifier, only requested through a forced slot
    pub fn is_forced_only(self) -> bool {
        matches!(self, Self::MapEntry | Self::WithClause)
    }
}

impl fmt::Display for ShapeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_is_complete_and_unique() {
        let unique: HashSet<_> = ShapeTag::ALL.iter().collect();
        assert_eq!(unique.len(), ShapeTag::ALL.len());
        assert_eq!(ShapeTag::ALL.len(), 66);
    }

    #[test]
    fn test_class_names_are_unique() {
        let names: HashSet<_> = ShapeTag::ALL.iter().map(|s| s.class_name()).collect();
        assert_eq!(names.len(), ShapeTag::ALL.len());
    }

    #[test]
    fn test_fallback_class() {
        assert_eq!(ShapeTag::Unrecognized.class_name(), "Expression");
        assert!(!ShapeTag::Unrecognized.is_terminal());
    }
}

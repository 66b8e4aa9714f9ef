//! Expressions and statements.
//!
//! Every expression kind has its own payload struct; `Expression` is the
//! closed sum over them. Nested expressions are boxed, lists of statements
//! are plain vectors.

use crate::declaration::{
    FunctionDeclaration, FunctionDefinition, StructDeclaration, UnionDeclaration,
};
use crate::operators::{BinaryOperation, UnaryOperation};
use crate::source::SourcePosition;
use crate::type_reference::TypeReference;

/// How an expression uses the storage it names.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum AccessType {
    #[default]
    Read,
    Write,
    ReadWrite,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum CastType {
    Numeric,
    BitCast,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum InstantiateExpressionType {
    /// Members not listed keep their default values.
    Default,
    /// Every member must be listed.
    Explicit,
}

/// An expression with an optional anchor in the source text.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Statement {
    pub expression: Expression,
    pub source_position: Option<SourcePosition>,
}

impl Statement {
    pub fn new(expression: Expression) -> Self {
        Statement {
            expression,
            source_position: None,
        }
    }

    #[must_use]
    pub fn with_source_position(mut self, source_position: SourcePosition) -> Self {
        self.source_position = Some(source_position);
        self
    }
}

impl From<Expression> for Statement {
    fn from(expression: Expression) -> Self {
        Statement::new(expression)
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct AccessExpression {
    pub expression: Box<Expression>,
    pub member_name: String,
    pub access_type: AccessType,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct AccessArrayExpression {
    pub expression: Box<Expression>,
    pub index: Box<Expression>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct AssertExpression {
    pub message: Option<String>,
    pub statement: Box<Statement>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct AssignmentExpression {
    pub left_hand_side: Box<Expression>,
    pub right_hand_side: Box<Expression>,
    /// Set for compound assignments such as `+=`.
    pub additional_operation: Option<BinaryOperation>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct BinaryExpression {
    pub left_hand_side: Box<Expression>,
    pub right_hand_side: Box<Expression>,
    pub operation: BinaryOperation,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockExpression {
    pub statements: Vec<Statement>,
}

/// `break` or `break N`.
///
/// `loop_count` is the number of enclosing loops (or switches) to leave. Zero
/// is written as a bare `break` and behaves like one.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct BreakExpression {
    pub loop_count: u32,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct CallExpression {
    pub expression: Box<Expression>,
    pub arguments: Vec<Expression>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct CastExpression {
    pub source: Box<Expression>,
    pub destination_type: TypeReference,
    pub cast_type: CastType,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct CommentExpression {
    pub comment: String,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct CompileTimeExpression {
    pub expression: Box<Expression>,
}

/// A literal. `data` is the literal text without its type suffix or quotes.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstantExpression {
    pub type_reference: TypeReference,
    pub data: String,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstantArrayExpression {
    pub array_data: Vec<Statement>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct DeferExpression {
    pub expression_to_defer: Box<Expression>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct DereferenceAndAccessExpression {
    pub expression: Box<Expression>,
    pub member_name: String,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ForLoopExpression {
    pub variable_name: String,
    pub range_begin: Box<Expression>,
    pub range_end: Box<Expression>,
    /// `LessThan` for ascending loops, `GreaterThan` for `reverse` loops.
    pub range_comparison_operation: BinaryOperation,
    pub step_by: Option<Box<Expression>>,
    pub then_statements: Vec<Statement>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionExpression {
    pub declaration: FunctionDeclaration,
    pub definition: FunctionDefinition,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceCallExpression {
    pub left_hand_side: Box<Expression>,
    pub arguments: Vec<Statement>,
}

/// Guard of one branch of an if series.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum IfCondition {
    Condition(Statement),
    /// The trailing `else` branch.
    Else,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionStatementPair {
    pub condition: IfCondition,
    pub then_statements: Vec<Statement>,
    pub block_source_position: Option<SourcePosition>,
}

/// `if a {} else if b {} else {}` flattened into one series.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct IfExpression {
    pub series: Vec<ConditionStatementPair>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct InstantiateMemberValuePair {
    pub member_name: String,
    pub value: Statement,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct InstantiateExpression {
    pub instantiate_type: InstantiateExpressionType,
    pub members: Vec<InstantiateMemberValuePair>,
}

/// Text that could not be understood, kept so nothing typed is lost.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct InvalidExpression {
    pub value: String,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ParenthesisExpression {
    pub expression: Box<Expression>,
}

/// Compiler intrinsic such as `@size_of(T)`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ReflectionExpression {
    pub name: String,
    pub arguments: Vec<Expression>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ReturnExpression {
    pub expression: Option<Box<Expression>>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct StructExpression {
    pub declaration: StructDeclaration,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum SwitchCaseValue {
    Case(Expression),
    Default,
}

/// One `case value:` (or `default:`) label and the statements that follow it.
///
/// A case with no statements falls through to the next one.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct SwitchCaseExpressionPair {
    pub case_value: SwitchCaseValue,
    pub statements: Vec<Statement>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct SwitchExpression {
    pub value: Box<Expression>,
    pub cases: Vec<SwitchCaseExpressionPair>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct TernaryConditionExpression {
    pub condition: Box<Expression>,
    pub then_statement: Box<Statement>,
    pub else_statement: Box<Statement>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeExpression {
    pub type_reference: TypeReference,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct UnaryExpression {
    pub expression: Box<Expression>,
    pub operation: UnaryOperation,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct UnionExpression {
    pub declaration: UnionDeclaration,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct VariableDeclarationExpression {
    pub name: String,
    pub is_mutable: bool,
    pub right_hand_side: Box<Expression>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct VariableDeclarationWithTypeExpression {
    pub name: String,
    pub is_mutable: bool,
    pub type_reference: TypeReference,
    pub right_hand_side: Box<Statement>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct VariableExpression {
    pub name: String,
    pub access_type: AccessType,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct WhileLoopExpression {
    pub condition: Box<Statement>,
    pub then_statements: Vec<Statement>,
}

/// An expression.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Expression {
    Access(AccessExpression),
    AccessArray(AccessArrayExpression),
    Assert(AssertExpression),
    Assignment(AssignmentExpression),
    Binary(BinaryExpression),
    Block(BlockExpression),
    Break(BreakExpression),
    Call(CallExpression),
    Cast(CastExpression),
    Comment(CommentExpression),
    CompileTime(CompileTimeExpression),
    Constant(ConstantExpression),
    ConstantArray(ConstantArrayExpression),
    Continue,
    Defer(DeferExpression),
    DereferenceAndAccess(DereferenceAndAccessExpression),
    ForLoop(ForLoopExpression),
    Function(FunctionExpression),
    InstanceCall(InstanceCallExpression),
    If(IfExpression),
    Instantiate(InstantiateExpression),
    Invalid(InvalidExpression),
    NullPointer,
    Parenthesis(ParenthesisExpression),
    Reflection(ReflectionExpression),
    Return(ReturnExpression),
    Struct(StructExpression),
    Switch(SwitchExpression),
    TernaryCondition(TernaryConditionExpression),
    Type(TypeExpression),
    Unary(UnaryExpression),
    Union(UnionExpression),
    VariableDeclaration(VariableDeclarationExpression),
    VariableDeclarationWithType(VariableDeclarationWithTypeExpression),
    Variable(VariableExpression),
    WhileLoop(WhileLoopExpression),
}

// Builders. They only shape values; nothing here validates semantics.
impl Expression {
    pub fn access(
        expression: Expression,
        member_name: impl Into<String>,
        access_type: AccessType,
    ) -> Self {
        Expression::Access(AccessExpression {
            expression: Box::new(expression),
            member_name: member_name.into(),
            access_type,
        })
    }

    pub fn access_array(expression: Expression, index: Expression) -> Self {
        Expression::AccessArray(AccessArrayExpression {
            expression: Box::new(expression),
            index: Box::new(index),
        })
    }

    pub fn assignment(
        left_hand_side: Expression,
        right_hand_side: Expression,
        additional_operation: Option<BinaryOperation>,
    ) -> Self {
        Expression::Assignment(AssignmentExpression {
            left_hand_side: Box::new(left_hand_side),
            right_hand_side: Box::new(right_hand_side),
            additional_operation,
        })
    }

    pub fn binary(
        left_hand_side: Expression,
        right_hand_side: Expression,
        operation: BinaryOperation,
    ) -> Self {
        Expression::Binary(BinaryExpression {
            left_hand_side: Box::new(left_hand_side),
            right_hand_side: Box::new(right_hand_side),
            operation,
        })
    }

    pub fn block(statements: Vec<Statement>) -> Self {
        Expression::Block(BlockExpression { statements })
    }

    pub fn call(expression: Expression, arguments: Vec<Expression>) -> Self {
        Expression::Call(CallExpression {
            expression: Box::new(expression),
            arguments,
        })
    }

    pub fn cast(source: Expression, destination_type: TypeReference, cast_type: CastType) -> Self {
        Expression::Cast(CastExpression {
            source: Box::new(source),
            destination_type,
            cast_type,
        })
    }

    pub fn comment(comment: impl Into<String>) -> Self {
        Expression::Comment(CommentExpression {
            comment: comment.into(),
        })
    }

    pub fn constant(type_reference: TypeReference, data: impl Into<String>) -> Self {
        Expression::Constant(ConstantExpression {
            type_reference,
            data: data.into(),
        })
    }

    pub fn instantiate(
        instantiate_type: InstantiateExpressionType,
        members: Vec<InstantiateMemberValuePair>,
    ) -> Self {
        Expression::Instantiate(InstantiateExpression {
            instantiate_type,
            members,
        })
    }

    pub fn parenthesis(expression: Expression) -> Self {
        Expression::Parenthesis(ParenthesisExpression {
            expression: Box::new(expression),
        })
    }

    pub fn return_value(expression: Option<Expression>) -> Self {
        Expression::Return(ReturnExpression {
            expression: expression.map(Box::new),
        })
    }

    pub fn unary(expression: Expression, operation: UnaryOperation) -> Self {
        Expression::Unary(UnaryExpression {
            expression: Box::new(expression),
            operation,
        })
    }

    pub fn variable(name: impl Into<String>, access_type: AccessType) -> Self {
        Expression::Variable(VariableExpression {
            name: name.into(),
            access_type,
        })
    }

    pub fn variable_declaration(
        name: impl Into<String>,
        is_mutable: bool,
        right_hand_side: Expression,
    ) -> Self {
        Expression::VariableDeclaration(VariableDeclarationExpression {
            name: name.into(),
            is_mutable,
            right_hand_side: Box::new(right_hand_side),
        })
    }

    pub fn variable_declaration_with_type(
        name: impl Into<String>,
        is_mutable: bool,
        type_reference: TypeReference,
        right_hand_side: Expression,
    ) -> Self {
        Expression::VariableDeclarationWithType(VariableDeclarationWithTypeExpression {
            name: name.into(),
            is_mutable,
            type_reference,
            right_hand_side: Box::new(Statement::new(right_hand_side)),
        })
    }

    /// Name of the variable this expression declares, if it declares one.
    pub fn declared_variable_name(&self) -> Option<&str> {
        match self {
            Expression::VariableDeclaration(value) => Some(&value.name),
            Expression::VariableDeclarationWithType(value) => Some(&value.name),
            _ => None,
        }
    }
}

//! H IR - Intermediate Representation Types
//!
//! This crate contains the semantic model of an H module:
//! - Modules, imports and declarations
//! - Type references (fundamentals, integers, pointers, arrays, function
//!   pointers, by-name custom references, constructor parameters)
//! - Expressions and statements
//! - Type utilities (builders, builtin name resolution, display names)
//! - A read-only visitor plus mutable type walkers
//!
//! # Design Philosophy
//!
//! - **Plain values**: every IR node is an owned value tree. A `Module` owns
//!   its declarations, which own their expressions.
//! - **By-name references**: `CustomTypeReference` and imports name other
//!   modules instead of pointing at them. They are resolved lazily by the
//!   analysis layer because the referenced module may not be loaded yet.
//! - **Sum types for markers**: "else" branches, "default" switch cases and
//!   auto-incremented enum values are explicit variants, never nullable fields.
//!
//! All types derive `Clone`, `Eq`, `PartialEq`, `Hash` and `Debug`; equality is
//! structural.

mod declaration;
pub mod examples;
mod expression;
mod operators;
mod source;
mod type_reference;
pub mod types;
pub mod visitor;

pub use declaration::{
    AliasTypeDeclaration, ConstructorParameter, Declaration, DeclarationKind, EnumDeclaration,
    EnumValue, EnumValueInitializer, Function, FunctionCondition, FunctionConstructor,
    FunctionDeclaration, FunctionDefinition, GlobalVariableDeclaration, Import, IndexedComment,
    Linkage, Module, StructDeclaration, TypeConstructor, UnionDeclaration,
};
pub use expression::{
    AccessArrayExpression, AccessExpression, AccessType, AssertExpression, AssignmentExpression,
    BinaryExpression, BlockExpression, BreakExpression, CallExpression, CastExpression, CastType,
    CommentExpression, CompileTimeExpression, ConditionStatementPair, ConstantArrayExpression,
    ConstantExpression, DeferExpression, DereferenceAndAccessExpression, Expression,
    ForLoopExpression, FunctionExpression, IfCondition, IfExpression, InstanceCallExpression,
    InstantiateExpression, InstantiateExpressionType, InstantiateMemberValuePair,
    InvalidExpression, ParenthesisExpression, ReflectionExpression, ReturnExpression, Statement,
    StructExpression, SwitchCaseExpressionPair, SwitchCaseValue, SwitchExpression,
    TernaryConditionExpression, TypeExpression, UnaryExpression, UnionExpression,
    VariableDeclarationExpression, VariableDeclarationWithTypeExpression, VariableExpression,
    WhileLoopExpression,
};
pub use operators::{BinaryOperation, UnaryOperation};
pub use source::SourcePosition;
pub use type_reference::{
    BuiltinTypeReference, ConstantArrayType, CustomTypeReference, FunctionPointerType,
    FunctionType, FundamentalType, IntegerType, ModuleReference, ParameterType, PointerType,
    TypeInstance, TypeReference,
};

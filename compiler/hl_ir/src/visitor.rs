//! IR Visitor Pattern
//!
//! Read-only traversal of a module through the [`Visitor`] trait, plus
//! mutable walkers that rewrite every [`TypeReference`] reachable from a
//! module, declaration or expression.
//!
//! # Design
//!
//! Default `visit_*` implementations call the matching `walk_*` function,
//! which visits the children. Override a `visit_*` method to act on a node
//! and call `walk_*` from it to keep descending.
//!
//! # Example
//!
//! ```text
//! struct CountCalls {
//!     count: usize,
//! }
//!
//! impl<'ir> Visitor<'ir> for CountCalls {
//!     fn visit_expression(&mut self, expression: &'ir Expression) {
//!         if let Expression::Call(_) = expression {
//!             self.count += 1;
//!         }
//!         walk_expression(self, expression);
//!     }
//! }
//! ```

use hl_stack::ensure_sufficient_stack;

use crate::declaration::{
    Declaration, DeclarationKind, EnumValueInitializer, FunctionDeclaration, Import, Module,
    StructDeclaration, UnionDeclaration,
};
use crate::expression::{Expression, IfCondition, Statement, SwitchCaseValue};
use crate::type_reference::TypeReference;

/// IR visitor.
///
/// The visitor may mutate its own state; the IR stays immutable.
pub trait Visitor<'ir> {
    fn visit_module(&mut self, module: &'ir Module) {
        walk_module(self, module);
    }

    fn visit_import(&mut self, import: &'ir Import) {
        let _ = import;
    }

    fn visit_declaration(&mut self, declaration: &'ir Declaration) {
        walk_declaration(self, declaration);
    }

    fn visit_statement(&mut self, statement: &'ir Statement) {
        walk_statement(self, statement);
    }

    fn visit_expression(&mut self, expression: &'ir Expression) {
        walk_expression(self, expression);
    }

    fn visit_type_reference(&mut self, type_reference: &'ir TypeReference) {
        walk_type_reference(self, type_reference);
    }
}

pub fn walk_module<'ir, V: Visitor<'ir> + ?Sized>(visitor: &mut V, module: &'ir Module) {
    for import in &module.imports {
        visitor.visit_import(import);
    }
    for declaration in &module.declarations {
        visitor.visit_declaration(declaration);
    }
}

pub fn walk_declaration<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    declaration: &'ir Declaration,
) {
    match &declaration.kind {
        DeclarationKind::Alias(value) => walk_types(visitor, &value.type_reference),
        DeclarationKind::Enum(value) => {
            for enum_value in &value.values {
                if let EnumValueInitializer::Explicit(statement) = &enum_value.value {
                    visitor.visit_statement(statement);
                }
            }
        }
        DeclarationKind::Function(value) => {
            walk_function_declaration(visitor, &value.declaration);
            if let Some(definition) = &value.definition {
                walk_statements(visitor, &definition.statements);
            }
        }
        DeclarationKind::FunctionConstructor(value) => {
            for parameter in &value.parameters {
                visitor.visit_type_reference(&parameter.type_reference);
            }
            walk_statements(visitor, &value.statements);
        }
        DeclarationKind::GlobalVariable(value) => {
            if let Some(type_reference) = &value.type_reference {
                visitor.visit_type_reference(type_reference);
            }
            visitor.visit_statement(&value.initial_value);
        }
        DeclarationKind::Struct(value) => walk_struct(visitor, value),
        DeclarationKind::TypeConstructor(value) => {
            for parameter in &value.parameters {
                visitor.visit_type_reference(&parameter.type_reference);
            }
            walk_statements(visitor, &value.statements);
        }
        DeclarationKind::Union(value) => walk_union(visitor, value),
    }
}

pub fn walk_function_declaration<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    declaration: &'ir FunctionDeclaration,
) {
    walk_types(visitor, &declaration.function_type.input_parameter_types);
    walk_types(visitor, &declaration.function_type.output_parameter_types);
    for condition in declaration
        .preconditions
        .iter()
        .chain(&declaration.postconditions)
    {
        visitor.visit_statement(&condition.condition);
    }
}

pub fn walk_struct<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    declaration: &'ir StructDeclaration,
) {
    walk_types(visitor, &declaration.member_types);
    walk_statements(visitor, &declaration.member_default_values);
}

pub fn walk_union<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    declaration: &'ir UnionDeclaration,
) {
    walk_types(visitor, &declaration.member_types);
}

pub fn walk_statement<'ir, V: Visitor<'ir> + ?Sized>(visitor: &mut V, statement: &'ir Statement) {
    visitor.visit_expression(&statement.expression);
}

fn walk_statements<'ir, V: Visitor<'ir> + ?Sized>(visitor: &mut V, statements: &'ir [Statement]) {
    for statement in statements {
        visitor.visit_statement(statement);
    }
}

fn walk_types<'ir, V: Visitor<'ir> + ?Sized>(visitor: &mut V, types: &'ir [TypeReference]) {
    for type_reference in types {
        visitor.visit_type_reference(type_reference);
    }
}

pub fn walk_expression<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    expression: &'ir Expression,
) {
    ensure_sufficient_stack(|| match expression {
        Expression::Access(value) => visitor.visit_expression(&value.expression),
        Expression::AccessArray(value) => {
            visitor.visit_expression(&value.expression);
            visitor.visit_expression(&value.index);
        }
        Expression::Assert(value) => visitor.visit_statement(&value.statement),
        Expression::Assignment(value) => {
            visitor.visit_expression(&value.left_hand_side);
            visitor.visit_expression(&value.right_hand_side);
        }
        Expression::Binary(value) => {
            visitor.visit_expression(&value.left_hand_side);
            visitor.visit_expression(&value.right_hand_side);
        }
        Expression::Block(value) => walk_statements(visitor, &value.statements),
        Expression::Call(value) => {
            visitor.visit_expression(&value.expression);
            for argument in &value.arguments {
                visitor.visit_expression(argument);
            }
        }
        Expression::Cast(value) => {
            visitor.visit_expression(&value.source);
            visitor.visit_type_reference(&value.destination_type);
        }
        Expression::CompileTime(value) => visitor.visit_expression(&value.expression),
        Expression::Constant(value) => visitor.visit_type_reference(&value.type_reference),
        Expression::ConstantArray(value) => walk_statements(visitor, &value.array_data),
        Expression::Defer(value) => visitor.visit_expression(&value.expression_to_defer),
        Expression::DereferenceAndAccess(value) => visitor.visit_expression(&value.expression),
        Expression::ForLoop(value) => {
            visitor.visit_expression(&value.range_begin);
            visitor.visit_expression(&value.range_end);
            if let Some(step_by) = &value.step_by {
                visitor.visit_expression(step_by);
            }
            walk_statements(visitor, &value.then_statements);
        }
        Expression::Function(value) => {
            walk_function_declaration(visitor, &value.declaration);
            walk_statements(visitor, &value.definition.statements);
        }
        Expression::InstanceCall(value) => {
            visitor.visit_expression(&value.left_hand_side);
            walk_statements(visitor, &value.arguments);
        }
        Expression::If(value) => {
            for pair in &value.series {
                if let IfCondition::Condition(condition) = &pair.condition {
                    visitor.visit_statement(condition);
                }
                walk_statements(visitor, &pair.then_statements);
            }
        }
        Expression::Instantiate(value) => {
            for member in &value.members {
                visitor.visit_statement(&member.value);
            }
        }
        Expression::Parenthesis(value) => visitor.visit_expression(&value.expression),
        Expression::Reflection(value) => {
            for argument in &value.arguments {
                visitor.visit_expression(argument);
            }
        }
        Expression::Return(value) => {
            if let Some(expression) = &value.expression {
                visitor.visit_expression(expression);
            }
        }
        Expression::Struct(value) => walk_struct(visitor, &value.declaration),
        Expression::Switch(value) => {
            visitor.visit_expression(&value.value);
            for case in &value.cases {
                if let SwitchCaseValue::Case(case_value) = &case.case_value {
                    visitor.visit_expression(case_value);
                }
                walk_statements(visitor, &case.statements);
            }
        }
        Expression::TernaryCondition(value) => {
            visitor.visit_expression(&value.condition);
            visitor.visit_statement(&value.then_statement);
            visitor.visit_statement(&value.else_statement);
        }
        Expression::Type(value) => visitor.visit_type_reference(&value.type_reference),
        Expression::Unary(value) => visitor.visit_expression(&value.expression),
        Expression::Union(value) => walk_union(visitor, &value.declaration),
        Expression::VariableDeclaration(value) => {
            visitor.visit_expression(&value.right_hand_side);
        }
        Expression::VariableDeclarationWithType(value) => {
            visitor.visit_type_reference(&value.type_reference);
            visitor.visit_statement(&value.right_hand_side);
        }
        Expression::WhileLoop(value) => {
            visitor.visit_statement(&value.condition);
            walk_statements(visitor, &value.then_statements);
        }
        Expression::Break(_)
        | Expression::Comment(_)
        | Expression::Continue
        | Expression::Invalid(_)
        | Expression::NullPointer
        | Expression::Variable(_) => {}
    });
}

pub fn walk_type_reference<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    type_reference: &'ir TypeReference,
) {
    ensure_sufficient_stack(|| match type_reference {
        TypeReference::ConstantArray(value) => walk_types(visitor, &value.value_type),
        TypeReference::FunctionPointer(value) => {
            walk_types(visitor, &value.function_type.input_parameter_types);
            walk_types(visitor, &value.function_type.output_parameter_types);
        }
        TypeReference::Pointer(value) => walk_types(visitor, &value.element_type),
        TypeReference::TypeInstance(value) => walk_statements(visitor, &value.arguments),
        TypeReference::Builtin(_)
        | TypeReference::Custom(_)
        | TypeReference::Fundamental(_)
        | TypeReference::Integer(_)
        | TypeReference::NullPointer
        | TypeReference::Parameter(_) => {}
    });
}

struct ExpressionCallback<F> {
    callback: F,
}

impl<'ir, F: FnMut(&'ir Expression)> Visitor<'ir> for ExpressionCallback<F> {
    fn visit_expression(&mut self, expression: &'ir Expression) {
        (self.callback)(expression);
        walk_expression(self, expression);
    }
}

/// Calls `callback` on every expression of `module`, parents before children.
pub fn visit_expressions<'ir>(module: &'ir Module, callback: impl FnMut(&'ir Expression)) {
    ExpressionCallback { callback }.visit_module(module);
}

/// Calls `callback` on `type_reference` and then on every type nested in it.
pub fn visit_types(
    type_reference: &mut TypeReference,
    callback: &mut dyn FnMut(&mut TypeReference),
) {
    ensure_sufficient_stack(|| {
        callback(type_reference);
        match type_reference {
            TypeReference::ConstantArray(value) => {
                visit_type_list(&mut value.value_type, callback);
            }
            TypeReference::FunctionPointer(value) => {
                visit_type_list(&mut value.function_type.input_parameter_types, callback);
                visit_type_list(&mut value.function_type.output_parameter_types, callback);
            }
            TypeReference::Pointer(value) => visit_type_list(&mut value.element_type, callback),
            TypeReference::TypeInstance(value) => {
                visit_statement_list(&mut value.arguments, callback);
            }
            TypeReference::Builtin(_)
            | TypeReference::Custom(_)
            | TypeReference::Fundamental(_)
            | TypeReference::Integer(_)
            | TypeReference::NullPointer
            | TypeReference::Parameter(_) => {}
        }
    });
}

fn visit_type_list(types: &mut [TypeReference], callback: &mut dyn FnMut(&mut TypeReference)) {
    for type_reference in types {
        visit_types(type_reference, callback);
    }
}

fn visit_statement_list(
    statements: &mut [Statement],
    callback: &mut dyn FnMut(&mut TypeReference),
) {
    for statement in statements {
        visit_types_of_expression(&mut statement.expression, callback);
    }
}

fn visit_types_of_function_declaration(
    declaration: &mut FunctionDeclaration,
    callback: &mut dyn FnMut(&mut TypeReference),
) {
    visit_type_list(&mut declaration.function_type.input_parameter_types, callback);
    visit_type_list(&mut declaration.function_type.output_parameter_types, callback);
    for condition in declaration
        .preconditions
        .iter_mut()
        .chain(declaration.postconditions.iter_mut())
    {
        visit_types_of_expression(&mut condition.condition.expression, callback);
    }
}

fn visit_types_of_struct(
    declaration: &mut StructDeclaration,
    callback: &mut dyn FnMut(&mut TypeReference),
) {
    visit_type_list(&mut declaration.member_types, callback);
    visit_statement_list(&mut declaration.member_default_values, callback);
}

/// Calls `callback` on every type reference reachable from `expression`.
pub fn visit_types_of_expression(
    expression: &mut Expression,
    callback: &mut dyn FnMut(&mut TypeReference),
) {
    ensure_sufficient_stack(|| match expression {
        Expression::Access(value) => visit_types_of_expression(&mut value.expression, callback),
        Expression::AccessArray(value) => {
            visit_types_of_expression(&mut value.expression, callback);
            visit_types_of_expression(&mut value.index, callback);
        }
        Expression::Assert(value) => {
            visit_types_of_expression(&mut value.statement.expression, callback);
        }
        Expression::Assignment(value) => {
            visit_types_of_expression(&mut value.left_hand_side, callback);
            visit_types_of_expression(&mut value.right_hand_side, callback);
        }
        Expression::Binary(value) => {
            visit_types_of_expression(&mut value.left_hand_side, callback);
            visit_types_of_expression(&mut value.right_hand_side, callback);
        }
        Expression::Block(value) => visit_statement_list(&mut value.statements, callback),
        Expression::Call(value) => {
            visit_types_of_expression(&mut value.expression, callback);
            for argument in &mut value.arguments {
                visit_types_of_expression(argument, callback);
            }
        }
        Expression::Cast(value) => {
            visit_types_of_expression(&mut value.source, callback);
            visit_types(&mut value.destination_type, callback);
        }
        Expression::CompileTime(value) => {
            visit_types_of_expression(&mut value.expression, callback);
        }
        Expression::Constant(value) => visit_types(&mut value.type_reference, callback),
        Expression::ConstantArray(value) => {
            visit_statement_list(&mut value.array_data, callback);
        }
        Expression::Defer(value) => {
            visit_types_of_expression(&mut value.expression_to_defer, callback);
        }
        Expression::DereferenceAndAccess(value) => {
            visit_types_of_expression(&mut value.expression, callback);
        }
        Expression::ForLoop(value) => {
            visit_types_of_expression(&mut value.range_begin, callback);
            visit_types_of_expression(&mut value.range_end, callback);
            if let Some(step_by) = &mut value.step_by {
                visit_types_of_expression(step_by, callback);
            }
            visit_statement_list(&mut value.then_statements, callback);
        }
        Expression::Function(value) => {
            visit_types_of_function_declaration(&mut value.declaration, callback);
            visit_statement_list(&mut value.definition.statements, callback);
        }
        Expression::InstanceCall(value) => {
            visit_types_of_expression(&mut value.left_hand_side, callback);
            visit_statement_list(&mut value.arguments, callback);
        }
        Expression::If(value) => {
            for pair in &mut value.series {
                if let IfCondition::Condition(condition) = &mut pair.condition {
                    visit_types_of_expression(&mut condition.expression, callback);
                }
                visit_statement_list(&mut pair.then_statements, callback);
            }
        }
        Expression::Instantiate(value) => {
            for member in &mut value.members {
                visit_types_of_expression(&mut member.value.expression, callback);
            }
        }
        Expression::Parenthesis(value) => {
            visit_types_of_expression(&mut value.expression, callback);
        }
        Expression::Reflection(value) => {
            for argument in &mut value.arguments {
                visit_types_of_expression(argument, callback);
            }
        }
        Expression::Return(value) => {
            if let Some(expression) = &mut value.expression {
                visit_types_of_expression(expression, callback);
            }
        }
        Expression::Struct(value) => visit_types_of_struct(&mut value.declaration, callback),
        Expression::Switch(value) => {
            visit_types_of_expression(&mut value.value, callback);
            for case in &mut value.cases {
                if let SwitchCaseValue::Case(case_value) = &mut case.case_value {
                    visit_types_of_expression(case_value, callback);
                }
                visit_statement_list(&mut case.statements, callback);
            }
        }
        Expression::TernaryCondition(value) => {
            visit_types_of_expression(&mut value.condition, callback);
            visit_types_of_expression(&mut value.then_statement.expression, callback);
            visit_types_of_expression(&mut value.else_statement.expression, callback);
        }
        Expression::Type(value) => visit_types(&mut value.type_reference, callback),
        Expression::Unary(value) => visit_types_of_expression(&mut value.expression, callback),
        Expression::Union(value) => {
            visit_type_list(&mut value.declaration.member_types, callback);
        }
        Expression::VariableDeclaration(value) => {
            visit_types_of_expression(&mut value.right_hand_side, callback);
        }
        Expression::VariableDeclarationWithType(value) => {
            visit_types(&mut value.type_reference, callback);
            visit_types_of_expression(&mut value.right_hand_side.expression, callback);
        }
        Expression::WhileLoop(value) => {
            visit_types_of_expression(&mut value.condition.expression, callback);
            visit_statement_list(&mut value.then_statements, callback);
        }
        Expression::Break(_)
        | Expression::Comment(_)
        | Expression::Continue
        | Expression::Invalid(_)
        | Expression::NullPointer
        | Expression::Variable(_) => {}
    });
}

/// Calls `callback` on every type reference reachable from `declaration`.
pub fn visit_types_of_declaration(
    declaration: &mut Declaration,
    callback: &mut dyn FnMut(&mut TypeReference),
) {
    match &mut declaration.kind {
        DeclarationKind::Alias(value) => visit_type_list(&mut value.type_reference, callback),
        DeclarationKind::Enum(value) => {
            for enum_value in &mut value.values {
                if let EnumValueInitializer::Explicit(statement) = &mut enum_value.value {
                    visit_types_of_expression(&mut statement.expression, callback);
                }
            }
        }
        DeclarationKind::Function(value) => {
            visit_types_of_function_declaration(&mut value.declaration, callback);
            if let Some(definition) = &mut value.definition {
                visit_statement_list(&mut definition.statements, callback);
            }
        }
        DeclarationKind::FunctionConstructor(value) => {
            for parameter in &mut value.parameters {
                visit_types(&mut parameter.type_reference, callback);
            }
            visit_statement_list(&mut value.statements, callback);
        }
        DeclarationKind::GlobalVariable(value) => {
            if let Some(type_reference) = &mut value.type_reference {
                visit_types(type_reference, callback);
            }
            visit_types_of_expression(&mut value.initial_value.expression, callback);
        }
        DeclarationKind::Struct(value) => visit_types_of_struct(value, callback),
        DeclarationKind::TypeConstructor(value) => {
            for parameter in &mut value.parameters {
                visit_types(&mut parameter.type_reference, callback);
            }
            visit_statement_list(&mut value.statements, callback);
        }
        DeclarationKind::Union(value) => visit_type_list(&mut value.member_types, callback),
    }
}

/// Calls `callback` on every type reference reachable from `module`.
pub fn visit_types_of_module(module: &mut Module, callback: &mut dyn FnMut(&mut TypeReference)) {
    for declaration in &mut module.declarations {
        visit_types_of_declaration(declaration, callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::AccessType;
    use crate::types::{create_custom_type_reference, create_integer_type, create_pointer_type};
    use crate::examples;
    use pretty_assertions::assert_eq;

    struct TypeNames(Vec<String>);

    impl<'ir> Visitor<'ir> for TypeNames {
        fn visit_type_reference(&mut self, type_reference: &'ir TypeReference) {
            self.0.push(type_reference.to_string());
            walk_type_reference(self, type_reference);
        }
    }

    #[test]
    fn test_visit_expressions_in_order() {
        let module = examples::create_add_example();
        let mut kinds = Vec::new();
        visit_expressions(&module, |expression| {
            kinds.push(match expression {
                Expression::Return(_) => "return",
                Expression::Binary(_) => "binary",
                Expression::Variable(_) => "variable",
                _ => "other",
            });
        });
        assert_eq!(kinds, vec!["return", "binary", "variable", "variable"]);
    }

    #[test]
    fn test_visitor_sees_nested_types() {
        let module = examples::create_add_example();
        let mut names = TypeNames(Vec::new());
        names.visit_module(&module);
        assert_eq!(names.0, vec!["Int32", "Int32", "Int32"]);
    }

    #[test]
    fn test_visit_types_rewrites_nested_references() {
        let mut expression = Expression::cast(
            Expression::variable("value", AccessType::Read),
            create_pointer_type(vec![create_custom_type_reference("Old", "Node")], false),
            crate::CastType::BitCast,
        );

        visit_types_of_expression(&mut expression, &mut |type_reference| {
            if let TypeReference::Custom(value) = type_reference {
                value.module_reference.name = "New".to_owned();
            }
        });

        let Expression::Cast(cast) = &expression else {
            panic!("expected a cast");
        };
        assert_eq!(
            cast.destination_type,
            create_pointer_type(vec![create_custom_type_reference("New", "Node")], false)
        );
    }

    #[test]
    fn test_visit_types_of_module_counts_every_type() {
        let mut module = examples::create_add_example();
        let mut count = 0;
        visit_types_of_module(&mut module, &mut |type_reference| {
            if *type_reference == create_integer_type(32, true) {
                count += 1;
            }
        });
        assert_eq!(count, 3);
    }
}

//! Target type of instantiate expressions.
//!
//! `{ a: 1, b: 2 }` does not name its type; the type comes from where the
//! expression is written: the annotation of the variable, global or struct
//! member it initializes, the output of the enclosing function, the left
//! hand side of an assignment, the parameter of a call argument, or the
//! member of an outer instantiate expression.

use hl_ir::{CustomTypeReference, DeclarationKind, Module, TypeReference};
use hl_parse_tree::{
    get_first_ancestor_with_name, get_node_at_position, get_terminal_value, Node, NodeAt,
};

use crate::context::{Context, Scope};
use crate::resolver::ModuleResolver;
use crate::tree::get_function_value_that_contains_node_position;

/// Nodes that give a type to an instantiate expression written below them.
const INSTANTIATE_CONTEXTS: [&str; 7] = [
    "Expression_instantiate_member",
    "Expression_variable_declaration_with_type",
    "Global_variable",
    "Struct_member",
    "Expression_return",
    "Expression_assignment",
    "Expression_call_arguments",
];

impl Context<'_> {
    pub(crate) fn instantiate_type(&self, scope: Scope<'_>) -> Option<CustomTypeReference> {
        let root = scope.root?;
        let context = get_first_ancestor_with_name(root, scope.position, &INSTANTIATE_CONTEXTS)?;

        match context.node.label() {
            "Expression_instantiate_member" => self.member_instantiate_type(scope, &context),
            "Expression_variable_declaration_with_type" => {
                declared_type(scope.module, context.node, "Expression_variable_declaration_type")
            }
            "Global_variable" => declared_type(scope.module, context.node, "Global_variable_type"),
            "Struct_member" => declared_type(scope.module, context.node, "Struct_member_type"),
            "Expression_return" => {
                let function = get_function_value_that_contains_node_position(
                    scope.module,
                    root,
                    scope.position,
                )?;
                let output = function.declaration.function_type.output_parameter_types.first()?;
                output.as_custom().cloned()
            }
            "Expression_assignment" => {
                let target = context.node.find_child("Generic_expression")?;
                let expression = hl_convert::parse_tree_to_expression(target, scope.module).ok()?;
                self.expression_type(scope.at(&context.position), &expression)?
                    .into_value_type()?
                    .as_custom()
                    .cloned()
            }
            "Expression_call_arguments" => self.argument_instantiate_type(scope, &context),
            _ => None,
        }
    }

    /// `{ member: { ... } }`: the type of `member` in the outer expression.
    fn member_instantiate_type(
        &self,
        scope: Scope<'_>,
        member: &NodeAt<'_>,
    ) -> Option<CustomTypeReference> {
        let member_name = member
            .node
            .find_child("Expression_instantiate_member_name")
            .and_then(get_terminal_value)?;

        let outer = get_first_ancestor_with_name(
            scope.root?,
            &member.position,
            &["Expression_instantiate"],
        )?;
        let outer_type = self.instantiate_type(scope.at(&outer.position))?;
        let found = self.underlying_declaration(&outer_type)?;

        let (names, types) = match &found.declaration().kind {
            DeclarationKind::Struct(value) => (&value.member_names, &value.member_types),
            DeclarationKind::Union(value) => (&value.member_names, &value.member_types),
            _ => return None,
        };
        let index = names.iter().position(|name| name == member_name)?;
        types.get(index)?.as_custom().cloned()
    }

    /// `f({ ... })`: the type of the matching input parameter of `f`.
    fn argument_instantiate_type(
        &self,
        scope: Scope<'_>,
        arguments: &NodeAt<'_>,
    ) -> Option<CustomTypeReference> {
        let child_index = *scope.position.get(arguments.position.len())?;
        let argument_index = arguments
            .node
            .children
            .iter()
            .take(child_index)
            .filter(|child| child.is("Generic_expression_or_instantiate"))
            .count();

        let call_position = &arguments.position[..arguments.position.len().saturating_sub(1)];
        let call = get_node_at_position(scope.root?, call_position)?;
        let callee = call.find_child("Generic_expression")?;
        let callee = hl_convert::parse_tree_to_expression(callee, scope.module).ok()?;

        let callee_type = self
            .expression_type(scope.at(call_position), &callee)?
            .into_value_type()?;
        let TypeReference::FunctionPointer(function) = self.underlying_type(&callee_type)?
        else {
            return None;
        };
        function
            .function_type
            .input_parameter_types
            .get(argument_index)?
            .as_custom()
            .cloned()
    }
}

/// First custom type of the annotation held by the `wrapper` child of
/// `node`.
fn declared_type(module: &Module, node: &Node, wrapper: &str) -> Option<CustomTypeReference> {
    let type_node = node.find_child(wrapper)?.find_child("Type")?;
    match hl_convert::parse_tree_to_types(type_node, module) {
        Ok(types) => types
            .into_iter()
            .find_map(|type_reference| type_reference.as_custom().cloned()),
        Err(error) => {
            tracing::debug!(%error, "unreadable type annotation");
            None
        }
    }
}

/// The type the instantiate expression at `position` creates, when its
/// surroundings give it one.
pub fn find_instantiate_custom_type_reference_from_node(
    module: &Module,
    root: &Node,
    position: &[usize],
    resolver: &dyn ModuleResolver,
) -> Option<CustomTypeReference> {
    let scope = Scope {
        module,
        root: Some(root),
        position,
    };
    Context::new(Some(module), resolver).instantiate_type(scope)
}

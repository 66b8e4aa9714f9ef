//! What a name refers to at a position of a function body.

use hl_ir::{Declaration, Function, Import, Module, TypeReference};
use hl_parse_tree::{
    find_descendant_position_if, get_ancestor_with_name, get_node_at_position, Node, NodeAt,
};

use crate::context::{Context, Scope};
use crate::resolver::ModuleResolver;
use crate::scope::{find_binding, Binding, BindingKind};
use crate::tree::{find_declaration_name_node, find_import_alias_node};

/// The definition a variable name resolves to.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum VariableInfo<'m> {
    FunctionInput {
        function: &'m Function,
        index: usize,
    },
    /// Only visible inside postconditions.
    FunctionOutput {
        function: &'m Function,
        index: usize,
    },
    /// Parameter of a function expression, at the position of its
    /// `Function_parameter` node.
    FunctionExpressionInput {
        parameter_position: Vec<usize>,
        index: usize,
    },
    VariableDeclaration {
        statement_position: Vec<usize>,
    },
    ForLoopVariable {
        statement_position: Vec<usize>,
    },
    Declaration {
        module: &'m Module,
        declaration: &'m Declaration,
    },
    ImportAlias {
        module: &'m Module,
        import: &'m Import,
    },
}

/// Resolves `name` at `position` of the body of `function`.
///
/// Locals shadow module declarations, which shadow import aliases. A
/// `function` without a definition has no body to look in.
pub fn find_variable_info<'m>(
    module: &'m Module,
    function: &'m Function,
    root: &Node,
    position: &[usize],
    name: &str,
) -> Option<VariableInfo<'m>> {
    function.definition.as_ref()?;

    if let Some(binding) = find_binding(root, position, name) {
        return Some(binding_info(function, binding));
    }
    if let Some(declaration) = module.find_declaration(name) {
        return Some(VariableInfo::Declaration {
            module,
            declaration,
        });
    }
    module
        .find_import_by_alias(name)
        .map(|import| VariableInfo::ImportAlias { module, import })
}

fn binding_info<'m>(function: &'m Function, binding: Binding<'_>) -> VariableInfo<'m> {
    match binding.kind {
        BindingKind::Input { index } => VariableInfo::FunctionInput { function, index },
        BindingKind::Output { index } => VariableInfo::FunctionOutput { function, index },
        BindingKind::LambdaInput { index } => VariableInfo::FunctionExpressionInput {
            parameter_position: binding.declaration_position,
            index,
        },
        BindingKind::Variable => VariableInfo::VariableDeclaration {
            statement_position: binding.declaration_position,
        },
        BindingKind::ForLoopVariable => VariableInfo::ForLoopVariable {
            statement_position: binding.declaration_position,
        },
    }
}

/// Type of the value `name` refers to at `position` of the body of
/// `function`.
///
/// Looks through the enclosing scopes, then the values declared by the
/// module. Names whose type depends on themselves (`var value = value;`)
/// have no type.
pub fn find_variable_type(
    module: &Module,
    function: &Function,
    root: &Node,
    position: &[usize],
    name: &str,
    resolver: &dyn ModuleResolver,
) -> Option<TypeReference> {
    function.definition.as_ref()?;

    let context = Context::new(Some(module), resolver);
    let scope = Scope {
        module,
        root: Some(root),
        position,
    };
    if let Some(binding) = find_binding(root, position, name) {
        return context.binding_type(scope, &binding);
    }

    let declaration = module.find_declaration(name)?;
    context
        .declaration_type(module, declaration)?
        .into_value_type()
}

/// The name node of the definition described by `info`.
pub fn find_variable_name_node_from_variable_info<'a>(
    root: &'a Node,
    info: &VariableInfo<'_>,
) -> Option<NodeAt<'a>> {
    match info {
        VariableInfo::FunctionInput { function, index } => parameter_name_node(
            root,
            function,
            "Function_input_parameters",
            *index,
        ),
        VariableInfo::FunctionOutput { function, index } => parameter_name_node(
            root,
            function,
            "Function_output_parameters",
            *index,
        ),
        VariableInfo::FunctionExpressionInput {
            parameter_position, ..
        } => descendant_with_label(root, parameter_position, "Function_parameter_name"),
        VariableInfo::VariableDeclaration { statement_position } => {
            descendant_with_label(root, statement_position, "Variable_name")
        }
        VariableInfo::ForLoopVariable { statement_position } => {
            descendant_with_label(root, statement_position, "Expression_for_loop_variable")
        }
        VariableInfo::Declaration { declaration, .. } => {
            find_declaration_name_node(root, &declaration.name)
        }
        VariableInfo::ImportAlias { import, .. } => find_import_alias_node(root, &import.alias),
    }
}

/// First node labelled `label` below the node at `position`.
fn descendant_with_label<'a>(
    root: &'a Node,
    position: &[usize],
    label: &str,
) -> Option<NodeAt<'a>> {
    let node = get_node_at_position(root, position)?;
    let relative = find_descendant_position_if(node, |node| node.is(label))?;
    let mut absolute = position.to_vec();
    absolute.extend(relative);
    Some(NodeAt {
        node: get_node_at_position(root, &absolute)?,
        position: absolute,
    })
}

fn parameter_name_node<'a>(
    root: &'a Node,
    function: &Function,
    list_label: &str,
    index: usize,
) -> Option<NodeAt<'a>> {
    let name = find_declaration_name_node(root, &function.declaration.name)?;
    let declaration = get_ancestor_with_name(root, &name.position, "Function_declaration")?;
    let list_index = declaration.node.find_child_index(list_label)?;
    let list = &declaration.node.children[list_index];

    let (parameter_index, parameter) = list
        .children
        .iter()
        .enumerate()
        .filter(|(_, child)| child.is("Function_parameter"))
        .nth(index)?;
    let name_index = parameter.find_child_index("Function_parameter_name")?;

    let mut position = declaration.position;
    position.extend([list_index, parameter_index, name_index]);
    Some(NodeAt {
        node: &parameter.children[name_index],
        position,
    })
}

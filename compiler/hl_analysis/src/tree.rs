//! Lookups of named nodes in a module's parse tree.

use hl_ir::{Function, Module};
use hl_parse_tree::{
    find_descendant_position_if, get_ancestor_with_name, get_node_at_position, get_terminal_value,
    Node, NodeAt,
};

/// Wrapper labels holding the name of a module-level declaration.
const DECLARATION_NAME_LABELS: [&str; 8] = [
    "Alias_name",
    "Enum_name",
    "Function_name",
    "Function_constructor_name",
    "Global_variable_name",
    "Struct_name",
    "Type_constructor_name",
    "Union_name",
];

/// Name declared by the module head, `None` while the head is incomplete.
pub fn get_module_name_from_tree(root: &Node) -> Option<&str> {
    let declaration = root
        .find_child("Module_head")?
        .find_child("Module_declaration")?;
    get_terminal_value(declaration.find_child("Module_name")?)
}

/// The name node of the module-level declaration called `name`.
pub fn find_declaration_name_node<'a>(root: &'a Node, name: &str) -> Option<NodeAt<'a>> {
    let body_index = root.find_child_index("Module_body")?;
    let body = &root.children[body_index];
    body.children
        .iter()
        .enumerate()
        .filter(|(_, declaration)| declaration.is("Declaration"))
        .find_map(|(declaration_index, declaration)| {
            let relative = find_descendant_position_if(declaration, |node| {
                DECLARATION_NAME_LABELS.iter().any(|label| node.is(label))
            })?;
            let node = get_node_at_position(declaration, &relative)?;
            if get_terminal_value(node) != Some(name) {
                return None;
            }
            let mut position = vec![body_index, declaration_index];
            position.extend(relative);
            Some(NodeAt { node, position })
        })
}

/// The `Import_alias` node of the import named `alias`.
pub fn find_import_alias_node<'a>(root: &'a Node, alias: &str) -> Option<NodeAt<'a>> {
    let head_index = root.find_child_index("Module_head")?;
    let head = &root.children[head_index];
    let imports_index = head.find_child_index("Imports")?;
    let imports = &head.children[imports_index];
    imports
        .children
        .iter()
        .enumerate()
        .find_map(|(import_index, import)| {
            let alias_index = import.find_child_index("Import_alias")?;
            let node = &import.children[alias_index];
            (get_terminal_value(node) == Some(alias)).then(|| NodeAt {
                node,
                position: vec![head_index, imports_index, import_index, alias_index],
            })
        })
}

/// The function of `module` whose tree contains `position`.
pub fn get_function_value_that_contains_node_position<'m>(
    module: &'m Module,
    root: &Node,
    position: &[usize],
) -> Option<&'m Function> {
    let function = get_ancestor_with_name(root, position, "Function")?;
    let name = function
        .node
        .find_child("Function_declaration")?
        .find_child("Function_name")
        .and_then(get_terminal_value)?;
    module.find_function(name)
}

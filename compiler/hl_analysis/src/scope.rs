//! Lexical scopes of a parse tree.
//!
//! The walk follows the path from the root to the query position and
//! collects every binding visible there, outermost first:
//!
//! - the input parameters of the enclosing function, plus its outputs when
//!   the position is inside a postcondition;
//! - the variables declared by the statements before the path in each
//!   enclosing statement list (a declaration is not visible in its own
//!   initializer);
//! - the variable of each enclosing `for` loop, inside the loop body.
//!
//! Later bindings shadow earlier ones with the same name. The walk only
//! reads labels, so it works on trees that do not convert as a whole.

use hl_parse_tree::{get_ancestor_with_name, get_terminal_value, Node};

#[cfg(test)]
mod tests;

/// Labels of the nodes whose children form a statement list.
const STATEMENT_CONTAINERS: [&str; 6] = [
    "Statements",
    "Expression_block_statements",
    "Expression_for_loop_statements",
    "Expression_if_statements",
    "Expression_switch_case_statements",
    "Expression_while_loop_statements",
];

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum BindingKind {
    Input { index: usize },
    Output { index: usize },
    /// Parameter of a function expression.
    LambdaInput { index: usize },
    Variable,
    ForLoopVariable,
}

/// A name introduced by a parameter list or a statement.
#[derive(Clone, Debug)]
pub(crate) struct Binding<'t> {
    pub(crate) name: &'t str,
    pub(crate) kind: BindingKind,
    /// `Type` node of an explicit type annotation.
    pub(crate) type_node: Option<&'t Node>,
    /// Expression the type is inferred from when there is no annotation.
    pub(crate) value: Option<&'t Node>,
    /// Position of the name wrapper node.
    pub(crate) name_position: Vec<usize>,
    /// Position of the declaring statement or parameter.
    pub(crate) declaration_position: Vec<usize>,
}

/// Every binding visible at `position`, outermost first.
pub(crate) fn visible_bindings<'t>(root: &'t Node, position: &[usize]) -> Vec<Binding<'t>> {
    let mut walker = ScopeWalker {
        position,
        in_postcondition: get_ancestor_with_name(root, position, "Function_postcondition")
            .is_some(),
        bindings: Vec::new(),
    };

    let mut node = root;
    for (depth, &index) in position.iter().enumerate() {
        walker.visit(node, &position[..depth], index);
        match node.children.get(index) {
            Some(child) => node = child,
            None => break,
        }
    }
    walker.bindings
}

/// The binding `name` refers to at `position`.
pub(crate) fn find_binding<'t>(
    root: &'t Node,
    position: &[usize],
    name: &str,
) -> Option<Binding<'t>> {
    visible_bindings(root, position)
        .into_iter()
        .rev()
        .find(|binding| binding.name == name)
}

struct ScopeWalker<'t, 'p> {
    position: &'p [usize],
    in_postcondition: bool,
    bindings: Vec<Binding<'t>>,
}

impl<'t> ScopeWalker<'t, '_> {
    /// Collects what `node`, at `node_position`, makes visible to its child
    /// at `index`.
    fn visit(&mut self, node: &'t Node, node_position: &[usize], index: usize) {
        match node.label() {
            "Function" => {
                self.bindings.clear();
                self.visit_function(node, node_position, false);
            }
            "Expression_function" => {
                self.bindings.clear();
                self.visit_function(node, node_position, true);
            }
            "Expression_for_loop" => self.visit_for_loop(node, node_position, index),
            label if STATEMENT_CONTAINERS.contains(&label) => {
                self.visit_statements(node, node_position, index);
            }
            _ => {}
        }
    }

    fn visit_function(&mut self, node: &'t Node, node_position: &[usize], is_lambda: bool) {
        let label = if is_lambda {
            "Expression_function_declaration"
        } else {
            "Function_declaration"
        };
        let Some(declaration_index) = node.find_child_index(label) else {
            return;
        };
        let declaration = &node.children[declaration_index];
        let declaration_position = child_position(node_position, declaration_index);

        let inputs: fn(usize) -> BindingKind = if is_lambda {
            |index| BindingKind::LambdaInput { index }
        } else {
            |index| BindingKind::Input { index }
        };
        self.visit_parameters(
            declaration,
            &declaration_position,
            "Function_input_parameters",
            inputs,
        );
        if self.in_postcondition && !is_lambda {
            self.visit_parameters(
                declaration,
                &declaration_position,
                "Function_output_parameters",
                |index| BindingKind::Output { index },
            );
        }
    }

    fn visit_parameters(
        &mut self,
        declaration: &'t Node,
        declaration_position: &[usize],
        label: &str,
        kind: fn(usize) -> BindingKind,
    ) {
        let Some(list_index) = declaration.find_child_index(label) else {
            return;
        };
        let list = &declaration.children[list_index];
        let list_position = child_position(declaration_position, list_index);

        let parameters = list
            .children
            .iter()
            .enumerate()
            .filter(|(_, child)| child.is("Function_parameter") && !child.has_token("..."));
        for (parameter_index, (child_index, parameter)) in parameters.enumerate() {
            let Some(name_index) = parameter.find_child_index("Function_parameter_name") else {
                continue;
            };
            let Some(name) = get_terminal_value(&parameter.children[name_index]) else {
                continue;
            };
            let parameter_position = child_position(&list_position, child_index);
            self.bindings.push(Binding {
                name,
                kind: kind(parameter_index),
                type_node: parameter
                    .find_child("Function_parameter_type")
                    .and_then(|node| node.find_child("Type")),
                value: None,
                name_position: child_position(&parameter_position, name_index),
                declaration_position: parameter_position,
            });
        }
    }

    fn visit_statements(
        &mut self,
        container: &'t Node,
        container_position: &[usize],
        index: usize,
    ) {
        for (statement_index, statement) in container.children.iter().enumerate().take(index + 1) {
            if !statement.is("Statement") {
                continue;
            }
            let statement_position = child_position(container_position, statement_index);
            let Some(binding) = variable_declaration(statement, statement_position) else {
                continue;
            };
            // Only the name itself sees the statement being declared.
            if statement_index == index && !self.position.starts_with(&binding.name_position) {
                continue;
            }
            self.bindings.push(binding);
        }
    }

    fn visit_for_loop(&mut self, node: &'t Node, node_position: &[usize], index: usize) {
        let Some(head_index) = node.find_child_index("Expression_for_loop_head") else {
            return;
        };
        let head = &node.children[head_index];
        let Some(variable_index) = head.find_child_index("Expression_for_loop_variable") else {
            return;
        };
        let mut name_position = node_position.to_vec();
        name_position.extend([head_index, variable_index]);

        let into_body = node
            .children
            .get(index)
            .is_some_and(|child| child.is("Expression_for_loop_statements"));
        if !into_body && !self.position.starts_with(&name_position) {
            return;
        }
        let Some(name) = get_terminal_value(&head.children[variable_index]) else {
            return;
        };

        // `Statement > Generic_expression > Expression_for_loop`
        let declaration_position = node_position[..node_position.len().saturating_sub(2)].to_vec();
        self.bindings.push(Binding {
            name,
            kind: BindingKind::ForLoopVariable,
            type_node: None,
            value: head
                .find_child("Expression_for_loop_range_begin")
                .and_then(|node| node.find_child("Generic_expression")),
            name_position,
            declaration_position,
        });
    }
}

/// The variable declared by `statement`, if it declares one.
fn variable_declaration(statement: &Node, statement_position: Vec<usize>) -> Option<Binding<'_>> {
    let expression_index = statement.find_child_index("Generic_expression")?;
    let expression = &statement.children[expression_index];
    let declaration_index = expression.children.iter().position(|child| {
        child.is("Expression_variable_declaration")
            || child.is("Expression_variable_declaration_with_type")
    })?;
    let declaration = &expression.children[declaration_index];
    let name_index = declaration.find_child_index("Variable_name")?;
    let name = get_terminal_value(&declaration.children[name_index])?;

    let type_node = declaration
        .find_child("Expression_variable_declaration_type")
        .and_then(|node| node.find_child("Type"));
    let mut name_position = statement_position.clone();
    name_position.extend([expression_index, declaration_index, name_index]);
    Some(Binding {
        name,
        kind: BindingKind::Variable,
        type_node,
        // Annotated declarations hold a `Generic_expression_or_instantiate`.
        value: declaration.find_child("Generic_expression"),
        name_position,
        declaration_position: statement_position,
    })
}

fn child_position(position: &[usize], index: usize) -> Vec<usize> {
    let mut child = Vec::with_capacity(position.len() + 1);
    child.extend_from_slice(position);
    child.push(index);
    child
}

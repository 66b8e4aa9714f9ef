#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use hl_convert::module_to_parse_tree;
use hl_ir::examples;
use hl_parse_tree::{
    find_descendant_position_if, find_descendants_if, get_node_at_position, Grammar,
};
use pretty_assertions::assert_eq;

use crate::tree::find_declaration_name_node;

fn write(module: &hl_ir::Module) -> Node {
    module_to_parse_tree(module, &Grammar::default_grammar()).unwrap()
}

fn leaf_position(root: &Node, text: &str) -> Vec<usize> {
    find_descendant_position_if(root, |node| node.is_leaf() && node.label() == text)
        .unwrap_or_else(|| panic!("no leaf {text:?}"))
}

fn names(root: &Node, position: &[usize]) -> Vec<(String, BindingKind)> {
    visible_bindings(root, position)
        .into_iter()
        .map(|binding| (binding.name.to_owned(), binding.kind))
        .collect()
}

fn parameter(name: &str) -> Node {
    Node::new(
        "Function_parameter",
        0,
        vec![
            Node::new("Function_parameter_name", 0, vec![Node::leaf(name)]),
            Node::leaf(":"),
            Node::new(
                "Function_parameter_type",
                0,
                vec![Node::new("Type", 0, vec![Node::leaf("Int32")])],
            ),
        ],
    )
}

fn statement(expression: Node) -> Node {
    Node::new(
        "Statement",
        0,
        vec![Node::new("Generic_expression", 0, vec![expression]), Node::leaf(";")],
    )
}

fn block(statements: Vec<Node>) -> Node {
    Node::new(
        "Block",
        0,
        vec![Node::leaf("{"), Node::new("Statements", 0, statements), Node::leaf("}")],
    )
}

/// `function f(outer: Int32) -> () { function (x: Int32) -> () { // inside }; }`
fn function_with_lambda() -> Node {
    let signature = |parameters: Vec<Node>| {
        vec![
            Node::leaf("("),
            Node::new("Function_input_parameters", 0, parameters),
            Node::leaf(")"),
            Node::leaf("->"),
            Node::leaf("("),
            Node::new("Function_output_parameters", 0, Vec::new()),
            Node::leaf(")"),
        ]
    };

    let mut lambda_declaration = vec![Node::leaf("function")];
    lambda_declaration.extend(signature(vec![parameter("x")]));
    let lambda = Node::new(
        "Expression_function",
        0,
        vec![
            Node::new("Expression_function_declaration", 0, lambda_declaration),
            Node::new(
                "Expression_function_definition",
                0,
                vec![block(vec![statement(Node::new(
                    "Expression_comment",
                    0,
                    vec![Node::leaf("// inside")],
                ))])],
            ),
        ],
    );

    let mut declaration = vec![
        Node::leaf("function"),
        Node::new("Function_name", 0, vec![Node::leaf("f")]),
    ];
    declaration.extend(signature(vec![parameter("outer")]));
    Node::new(
        "Function",
        0,
        vec![
            Node::new("Function_declaration", 0, declaration),
            Node::new("Function_definition", 0, vec![block(vec![statement(lambda)])]),
        ],
    )
}

#[test]
fn test_only_inputs_are_visible_before_the_first_declaration() {
    let root = write(&examples::create_variables_scopes());
    let position = leaf_position(&root, "// scope before");

    assert_eq!(
        names(&root, &position),
        vec![("count".to_owned(), BindingKind::Input { index: 0 })]
    );
}

#[test]
fn test_for_loop_scope_sees_its_variable_and_body() {
    let root = write(&examples::create_variables_scopes());
    let position = leaf_position(&root, "// scope for");

    assert_eq!(
        names(&root, &position),
        vec![
            ("count".to_owned(), BindingKind::Input { index: 0 }),
            ("value".to_owned(), BindingKind::Variable),
            ("index".to_owned(), BindingKind::ForLoopVariable),
            ("value".to_owned(), BindingKind::Variable),
        ]
    );

    let index = find_binding(&root, &position, "index").unwrap();
    assert!(index.type_node.is_none());
    assert!(index.value.unwrap().is("Generic_expression"));
    assert_eq!(
        get_node_at_position(&root, &index.declaration_position)
            .unwrap()
            .label(),
        "Statement"
    );
}

#[test]
fn test_block_declarations_end_with_the_block() {
    let root = write(&examples::create_variables_scopes());

    let innermost = leaf_position(&root, "// scope innermost");
    assert_eq!(visible_bindings(&root, &innermost).len(), 4);
    let value = find_binding(&root, &innermost, "value").unwrap();
    assert!(value.type_node.unwrap().is("Type"));

    let after = leaf_position(&root, "// scope after innermost");
    assert_eq!(visible_bindings(&root, &after).len(), 3);
    assert!(find_binding(&root, &after, "value").unwrap().type_node.is_none());
}

#[test]
fn test_declaration_is_not_visible_in_its_initializer() {
    let root = write(&examples::create_variables_scopes());
    let name = find_declaration_name_node(&root, "self_reference").unwrap();
    let function = get_ancestor_with_name(&root, &name.position, "Function").unwrap();

    let variables: Vec<Vec<usize>> = find_descendants_if(function.node, |node| {
        node.is("Variable_name")
    })
    .into_iter()
    .map(|found| {
        let mut position = function.position.clone();
        position.extend(found.position);
        position
    })
    .collect();
    let [declared, initializer] = variables.as_slice() else {
        panic!("expected two variable names, got {variables:?}");
    };

    assert!(find_binding(&root, initializer, "value").is_none());
    let binding = find_binding(&root, declared, "value").unwrap();
    assert_eq!(&binding.name_position, declared);
}

#[test]
fn test_outputs_are_only_visible_in_postconditions() {
    let root = write(&examples::create_function_contracts());

    let postcondition = find_descendant_position_if(&root, |node| {
        node.is("Function_postcondition")
    })
    .unwrap();
    assert_eq!(
        names(&root, &postcondition.iter().copied().chain([3]).collect::<Vec<_>>()),
        vec![
            ("x".to_owned(), BindingKind::Input { index: 0 }),
            ("result".to_owned(), BindingKind::Output { index: 0 }),
        ]
    );

    let body = leaf_position(&root, "return");
    assert_eq!(
        names(&root, &body),
        vec![("x".to_owned(), BindingKind::Input { index: 0 })]
    );
}

#[test]
fn test_function_expressions_do_not_capture() {
    let root = function_with_lambda();
    let inside = leaf_position(&root, "// inside");

    let bindings = visible_bindings(&root, &inside);
    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings[0].name, "x");
    assert_eq!(bindings[0].kind, BindingKind::LambdaInput { index: 0 });
    assert_eq!(
        get_node_at_position(&root, &bindings[0].name_position)
            .unwrap()
            .label(),
        "Function_parameter_name"
    );
}

#[test]
fn test_out_of_range_position_stops_the_walk() {
    let root = write(&examples::create_add_example());
    let mut position = leaf_position(&root, "return");
    position.extend([7, 7, 7]);

    let names: Vec<&str> = visible_bindings(&root, &position)
        .iter()
        .map(|binding| binding.name)
        .collect();
    assert_eq!(names, vec!["lhs", "rhs"]);
}

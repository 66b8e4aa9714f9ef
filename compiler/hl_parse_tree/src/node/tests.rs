#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;

/// `Module -> Module_head Module_body` with a two-statement body.
fn sample_tree() -> Node {
    let statement = |name: &str| {
        Node::new(
            "Statement",
            0,
            vec![
                Node::new(
                    "Expression_variable",
                    0,
                    vec![Node::new("Variable_name", 0, vec![Node::leaf(name)])],
                ),
                Node::leaf(";"),
            ],
        )
    };

    Node::new(
        "Module",
        0,
        vec![
            Node::new(
                "Module_head",
                0,
                vec![Node::leaf("module"), Node::leaf("Sample"), Node::leaf(";")],
            ),
            Node::new(
                "Module_body",
                2,
                vec![
                    Node::new("Block", 0, vec![statement("first"), statement("second")]),
                    Node::new("Export", 0, Vec::new()),
                ],
            ),
        ],
    )
}

#[test]
fn test_node_at_position() {
    let root = sample_tree();
    assert_eq!(get_node_at_position(&root, &[]).map(Node::label), Some("Module"));
    assert_eq!(
        get_node_at_position(&root, &[1, 0, 1, 0, 0, 0]).map(Node::label),
        Some("second")
    );
    assert_eq!(get_node_at_position(&root, &[1, 5]), None);
    assert!(is_valid_position(&root, &[0, 2]));
    assert!(!is_valid_position(&root, &[0, 3]));
}

#[test]
fn test_parent_and_ancestors() {
    let root = sample_tree();
    let leaf = [1, 0, 1, 0, 0, 0];

    assert_eq!(get_parent_position(&leaf), Some(&leaf[..5]));
    assert_eq!(get_parent_position(&[]), None);

    let statement = get_ancestor_with_name(&root, &leaf, "Statement").unwrap();
    assert_eq!(statement.position, vec![1, 0, 1]);

    let first = get_first_ancestor_with_name(&root, &leaf, &["Block", "Module_body"]).unwrap();
    assert_eq!(first.node.label(), "Block");
    assert_eq!(first.position, vec![1, 0]);

    // Strict ancestors only.
    assert_eq!(get_ancestor_with_name(&root, &[1, 0, 1], "Statement"), None);
    assert_eq!(get_ancestor_with_name(&root, &leaf, "Enum"), None);
}

#[test]
fn test_find_descendants() {
    let root = sample_tree();

    assert_eq!(
        find_descendant_position_if(&root, |node| node.is("Variable_name")),
        Some(vec![1, 0, 0, 0, 0])
    );
    assert_eq!(find_descendant_position_if(&root, |node| node.is("Module")), None);

    let names: Vec<(Vec<usize>, &str)> = find_descendants_if(&root, |node| node.is("Variable_name"))
        .into_iter()
        .map(|found| (found.position, get_terminal_value(found.node).unwrap()))
        .collect();
    assert_eq!(
        names,
        vec![(vec![1, 0, 0, 0, 0], "first"), (vec![1, 0, 1, 0, 0], "second")]
    );
}

#[test]
fn test_common_root() {
    assert_eq!(find_node_common_root(&[1, 0, 2, 4], &[1, 0, 3]), vec![1, 0]);
    assert_eq!(find_node_common_root(&[0], &[1]), Vec::<usize>::new());
    assert_eq!(find_node_common_root(&[2, 1], &[2, 1]), vec![2, 1]);
}

#[test]
fn test_leaves_skip_empty_non_terminals() {
    let root = sample_tree();
    let leaves: Vec<&str> = iter_leaves(&root).map(Node::label).collect();
    assert_eq!(leaves, vec!["module", "Sample", ";", "first", ";", "second", ";"]);

    let export = get_node_at_position(&root, &[1, 1]).unwrap();
    assert_eq!(get_terminal_value(export), None);
    assert!(!export.is_leaf());
}

#[test]
fn test_child_lookup() {
    let root = sample_tree();
    let block = get_node_at_position(&root, &[1, 0]).unwrap();

    assert_eq!(block.children_with_label("Statement").count(), 2);
    assert_eq!(root.find_child_index("Module_body"), Some(1));
    assert!(root.find_child("Statement").is_none());
    assert!(block.children[0].has_token(";"));
    // A leaf never matches a label, even with the same text.
    assert!(!Node::leaf("Statement").is("Statement"));
}

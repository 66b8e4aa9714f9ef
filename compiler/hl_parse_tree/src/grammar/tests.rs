#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;

fn rule(lhs: &str, rhs: &[&str], flags: ProductionRuleFlags) -> ProductionRule {
    ProductionRule {
        lhs: lhs.to_owned(),
        rhs: rhs.iter().map(|label| (*label).to_owned()).collect(),
        flags,
    }
}

const ARRAY: ProductionRuleFlags =
    ProductionRuleFlags::IS_ARRAY.union(ProductionRuleFlags::IS_ARRAY_SET);
const ARRAY_SET: ProductionRuleFlags = ProductionRuleFlags::IS_ARRAY_SET;
const NONE: ProductionRuleFlags = ProductionRuleFlags::empty();

fn small_description() -> Vec<&'static str> {
    vec![
        "Start -> Items",
        "Items -> Item , $0_or_more",
        "Item -> identifier | number | Group",
        "Group -> ( Names )",
        "Names -> identifier $1_or_more",
        "Or -> a $single_or b",
    ]
}

#[test]
fn test_create_production_rules() {
    let rules = create_production_rules(&small_description());

    assert_eq!(
        rules,
        vec![
            rule("Start", &["Items"], NONE),
            rule("Items", &[], ARRAY_SET),
            rule("Items", &["Item"], ARRAY_SET),
            rule("Items", &["Item", ",", "Item"], ARRAY),
            rule("Item", &["identifier"], NONE),
            rule("Item", &["number"], NONE),
            rule("Item", &["Group"], NONE),
            rule("Group", &["(", "Names", ")"], NONE),
            rule("Names", &["identifier"], ARRAY_SET),
            rule("Names", &["identifier", "identifier"], ARRAY),
            rule("Or", &["a", "|", "b"], NONE),
        ]
    );
}

#[test]
fn test_empty_alternatives_and_malformed_lines() {
    let rules = create_production_rules(&["Export -> | export", "", "not a rule"]);
    assert_eq!(
        rules,
        vec![rule("Export", &[], NONE), rule("Export", &["export"], NONE)]
    );
}

#[test]
fn test_rule_queries() {
    let rules = create_production_rules(&small_description());

    assert_eq!(find_production_rules(&rules, "Item"), 4..7);
    assert_eq!(find_production_rules(&rules, "Missing"), 0..0);

    let non_terminals = get_non_terminals(&rules);
    assert_eq!(non_terminals, vec!["Start", "Items", "Item", "Group", "Names", "Or"]);
    assert_eq!(
        get_terminals(&rules, &non_terminals),
        vec!["$", "(", ")", ",", "a", "b", "identifier", "number", "|"]
    );

    let array_infos = create_array_infos(&rules);
    assert_eq!(array_infos.len(), 2);
    assert_eq!(
        array_infos["Items"],
        ArrayInfo {
            element_label: "Item".to_owned(),
            separator_label: Some(",".to_owned()),
        }
    );
    assert_eq!(array_infos["Names"].separator_label, None);
}

#[test]
fn test_classify_terminal() {
    assert_eq!(classify_terminal("// note"), "comment");
    assert_eq!(classify_terminal("\"text\"c"), "string");
    assert_eq!(classify_terminal("true"), "boolean");
    assert_eq!(classify_terminal("12u8"), "number");
    assert_eq!(classify_terminal("-3"), "number");
    assert_eq!(classify_terminal("-"), "identifier");
    assert_eq!(classify_terminal("value_1"), "identifier");
}

fn item(value: &str, grammar: &Grammar) -> Node {
    let children = vec![Node::leaf(value)];
    let index = grammar.choose_production_rule("Item", &children).unwrap();
    Node::new("Item", index, children)
}

#[test]
fn test_choose_production_rule_for_arrays() {
    let grammar = Grammar::from_description(&small_description());

    assert_eq!(grammar.choose_production_rule("Items", &[]), Some(1));
    assert_eq!(
        grammar.choose_production_rule("Items", &[item("a", &grammar)]),
        Some(2)
    );
    let three = vec![
        item("a", &grammar),
        Node::leaf(","),
        item("1", &grammar),
        Node::leaf(","),
        item("c", &grammar),
    ];
    assert_eq!(grammar.choose_production_rule("Items", &three), Some(3));

    // Missing separator.
    let unseparated = vec![item("a", &grammar), item("b", &grammar)];
    assert_eq!(grammar.choose_production_rule("Items", &unseparated), None);

    let names = vec![Node::leaf("x"), Node::leaf("y"), Node::leaf("z")];
    assert_eq!(grammar.choose_production_rule("Names", &names), Some(9));
    assert_eq!(grammar.choose_production_rule("Names", &[]), None);
}

#[test]
fn test_leaves_match_text_or_class() {
    let grammar = Grammar::from_description(&small_description());

    assert_eq!(
        grammar.choose_production_rule("Item", &[Node::leaf("42")]),
        Some(5)
    );
    let or = [Node::leaf("a"), Node::leaf("|"), Node::leaf("b")];
    assert_eq!(grammar.choose_production_rule("Or", &or), Some(10));
    // A leaf never stands for a non-terminal of the same name.
    assert_eq!(grammar.choose_production_rule("Item", &[Node::leaf("Group")]), Some(4));
    assert_eq!(
        grammar.choose_production_rule("Start", &[Node::leaf("Items")]),
        None
    );
}

#[test]
fn test_find_nonconforming_node() {
    let grammar = Grammar::from_description(&small_description());
    let items = vec![item("a", &grammar)];
    let index = grammar.choose_production_rule("Items", &items).unwrap();
    let mut root = Node::new("Start", 0, vec![Node::new("Items", index, items)]);

    assert_eq!(grammar.find_nonconforming_node(&root), None);

    root.children[0].children[0].production_rule_index = Some(7);
    assert_eq!(grammar.find_nonconforming_node(&root), Some(vec![0, 0]));
}

#[test]
fn test_default_grammar_is_closed() {
    let grammar = Grammar::default_grammar();

    // Labels that look like non-terminals must be defined.
    let undefined: Vec<&str> = grammar
        .production_rules()
        .iter()
        .flat_map(|rule| rule.rhs.iter())
        .map(String::as_str)
        .filter(|label| label.starts_with(|c: char| c.is_ascii_uppercase()))
        .filter(|label| *label != "Constant_array" && !grammar.is_non_terminal(label))
        .collect();
    assert_eq!(undefined, Vec::<&str>::new());

    assert_eq!(grammar.non_terminals().first().map(String::as_str), Some("Module"));
    assert!(grammar.terminals().iter().any(|terminal| terminal == "$"));
    assert!(grammar.terminals().iter().any(|terminal| terminal == "|"));
    assert_eq!(grammar.rule_indices("Generic_expression").len(), 34);
    assert_eq!(
        grammar.array_info("Function_input_parameters"),
        Some(&ArrayInfo {
            element_label: "Function_parameter".to_owned(),
            separator_label: Some(",".to_owned()),
        })
    );
}

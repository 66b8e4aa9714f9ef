#![allow(clippy::unwrap_used, clippy::expect_used)]

use hl_convert::{module_to_parse_tree, parse_tree_to_module, ConvertError};
use hl_ir::examples;
use hl_ir::{
    AccessType, Declaration, DeclarationKind, Expression, InvalidExpression, Module, Statement,
};
use hl_parse_tree::{Grammar, Node};
use pretty_assertions::assert_eq;

fn two_declarations() -> Module {
    let mut module = examples::create_add_example();
    let alias = examples::create_alias_example().declarations.remove(0);
    module.declarations.insert(0, alias);
    module
}

fn write(module: &Module) -> Node {
    module_to_parse_tree(module, &Grammar::default_grammar()).unwrap()
}

fn child_mut<'n>(node: &'n mut Node, label: &str) -> &'n mut Node {
    node.children.iter_mut().find(|child| child.is(label)).unwrap()
}

/// First `Generic_expression` of the first statement of the last function.
fn first_statement_expression(root: &mut Node) -> &mut Node {
    let body = child_mut(root, "Module_body");
    let declaration = body.children.last_mut().unwrap();
    let function = child_mut(declaration, "Function");
    let definition = child_mut(function, "Function_definition");
    let block = child_mut(definition, "Block");
    let statements = child_mut(block, "Statements");
    let statement = child_mut(statements, "Statement");
    child_mut(statement, "Generic_expression")
}

#[test]
fn test_malformed_declaration_is_isolated() {
    let module = two_declarations();
    let mut tree = write(&module);

    let body = child_mut(&mut tree, "Module_body");
    let alias = child_mut(&mut body.children[0], "Alias");
    alias.children.retain(|child| !child.is("Alias_name"));

    let output = parse_tree_to_module(&tree).unwrap();
    assert_eq!(output.module.declarations, module.declarations[1..].to_vec());
    assert_eq!(
        output.errors,
        vec![ConvertError::InDeclaration {
            index: 0,
            error: Box::new(ConvertError::MissingChild {
                parent: "Alias".to_owned(),
                expected: "Alias_name",
            }),
        }]
    );
}

#[test]
fn test_invalid_constant_is_reported() {
    let module = examples::create_hello_world();
    let mut tree = write(&module);

    // `return 0;` becomes `return 0x;`.
    let body = child_mut(&mut tree, "Module_body");
    let declaration = &mut body.children[0];
    let function = child_mut(declaration, "Function");
    let definition = child_mut(function, "Function_definition");
    let block = child_mut(definition, "Block");
    let statements = child_mut(block, "Statements");
    let statement = statements.children.last_mut().unwrap();
    let constant = hl_parse_tree::find_descendant_position_if(statement, |node| {
        node.is("Expression_constant")
    })
    .unwrap();
    let mut node = statement;
    for index in constant {
        node = &mut node.children[index];
    }
    node.children[0] = Node::leaf("0x");

    let output = parse_tree_to_module(&tree).unwrap();
    assert!(output.module.declarations.is_empty());
    assert_eq!(
        output.errors,
        vec![ConvertError::InDeclaration {
            index: 0,
            error: Box::new(ConvertError::InvalidConstant("0x".to_owned())),
        }]
    );
}

#[test]
fn test_unknown_expression_is_kept_as_text() {
    let mut tree = write(&examples::create_add_example());
    let expression = first_statement_expression(&mut tree);
    expression.children = vec![Node::new(
        "Expression_unfinished",
        0,
        vec![Node::leaf("lhs"), Node::leaf("+")],
    )];

    let output = parse_tree_to_module(&tree).unwrap();
    assert!(!output.has_errors());
    let DeclarationKind::Function(function) = &output.module.declarations[0].kind else {
        panic!("add is a function");
    };
    assert_eq!(
        function.definition.as_ref().unwrap().statements,
        vec![Statement::new(Expression::Invalid(InvalidExpression {
            value: "lhs +".to_owned(),
        }))]
    );
}

#[test]
fn test_missing_module_head() {
    assert_eq!(
        parse_tree_to_module(&Node::leaf("module")).unwrap_err(),
        ConvertError::MissingModuleHead
    );
    assert_eq!(
        parse_tree_to_module(&Node::new("Module", 0, Vec::new())).unwrap_err(),
        ConvertError::MissingModuleHead
    );
}

#[test]
fn test_missing_body_reads_as_empty_module() {
    let mut tree = write(&examples::create_hello_world());
    tree.children.retain(|child| !child.is("Module_body"));

    let output = parse_tree_to_module(&tree).unwrap();
    assert_eq!(output.module.name, "Hello_world");
    assert!(output.module.declarations.is_empty());
    // Nothing references the import anymore.
    assert!(output.module.imports[0].usages.is_empty());
}

#[test]
fn test_access_types_are_recomputed_on_read() {
    let mut module = examples::create_using_structs();
    let mut reset = 0;
    for declaration in &mut module.declarations {
        let DeclarationKind::Function(function) = &mut declaration.kind else {
            continue;
        };
        for statement in &mut function.definition.as_mut().unwrap().statements {
            if let Expression::Assignment(assignment) = &mut statement.expression {
                if let Expression::Access(access) = assignment.left_hand_side.as_mut() {
                    access.access_type = AccessType::Read;
                    reset += 1;
                }
            }
        }
    }
    assert!(reset > 0);

    let output = parse_tree_to_module(&write(&module)).unwrap();
    assert_eq!(output.module, examples::create_using_structs());
}

#[test]
fn test_invalid_expression_is_unrenderable() {
    let mut module = examples::create_add_example();
    let DeclarationKind::Function(function) = &mut module.declarations[0].kind else {
        panic!("add is a function");
    };
    function.definition.as_mut().unwrap().statements = vec![Statement::new(
        Expression::Invalid(InvalidExpression {
            value: "lhs +".to_owned(),
        }),
    )];

    assert_eq!(
        module_to_parse_tree(&module, &Grammar::default_grammar()).unwrap_err(),
        ConvertError::Unrenderable("invalid expression")
    );
}

#[test]
fn test_grammar_without_rule_is_reported() {
    let grammar = Grammar::from_description(&["Module -> Module_head Module_body"]);
    let error = module_to_parse_tree(&examples::create_alias_example(), &grammar).unwrap_err();
    assert!(matches!(error, ConvertError::MissingProductionRule { .. }), "{error}");
}

#[test]
fn test_export_flag_sets_linkage() {
    let mut module = examples::create_add_example();
    module.declarations[0].is_export = false;
    let output = parse_tree_to_module(&write(&module)).unwrap();

    let Declaration {
        is_export, kind, ..
    } = &output.module.declarations[0];
    assert!(!is_export);
    let DeclarationKind::Function(function) = kind else {
        panic!("add is a function");
    };
    assert_eq!(function.declaration.linkage, hl_ir::Linkage::Private);
}

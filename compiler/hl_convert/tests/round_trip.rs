#![allow(clippy::unwrap_used, clippy::expect_used)]

use hl_convert::{
    module_to_parse_tree, parse_tree_to_expression, parse_tree_to_module, parse_tree_to_types,
};
use hl_ir::examples;
use hl_ir::types::create_integer_type;
use hl_ir::{
    AccessType, Declaration, DeclarationKind, EnumDeclaration, EnumValue, EnumValueInitializer,
    Expression, Function, FunctionDeclaration, FunctionDefinition, GlobalVariableDeclaration,
    IndexedComment, Linkage, Module, SourcePosition, Statement, StructDeclaration, TypeReference,
};
use hl_parse_tree::{
    find_descendant_position_if, get_node_at_position, iter_leaves, Grammar, Node,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn write(module: &Module) -> Node {
    module_to_parse_tree(module, &Grammar::default_grammar()).unwrap()
}

fn round_trip(module: &Module) -> Module {
    let output = parse_tree_to_module(&write(module)).unwrap();
    assert!(!output.has_errors(), "{:?}", output.errors);
    output.module
}

fn leaves(node: &Node) -> Vec<&str> {
    iter_leaves(node).map(Node::label).collect()
}

#[test]
fn test_examples_round_trip() {
    for module in examples::all() {
        assert_eq!(round_trip(&module), module, "module {}", module.name);
    }
}

#[test]
fn test_examples_conform_to_the_grammar() {
    let grammar = Grammar::default_grammar();
    for module in examples::all() {
        let tree = module_to_parse_tree(&module, &grammar).unwrap();
        assert_eq!(grammar.find_nonconforming_node(&tree), None, "module {}", module.name);
    }
}

#[test]
fn test_hello_world_tokens() {
    let tree = write(&examples::create_hello_world());
    assert_eq!(
        leaves(&tree),
        vec![
            "module", "Hello_world", ";", "import", "C.stdio", "as", "stdio", ";", "export",
            "function", "main", "(", ")", "->", "(", "result", ":", "Int32", ")", "{", "stdio",
            ".", "puts", "(", "\"Hello world!\"c", ")", ";", "return", "0", ";", "}",
        ]
    );
}

#[test]
fn test_alias_example_tokens() {
    let tree = write(&examples::create_alias_example());
    assert_eq!(
        leaves(&tree),
        vec!["module", "alias_example", ";", "export", "using", "My_alias", "=", "Float32", ";"]
    );
}

#[test]
fn test_comment_lines_are_separate_tokens() {
    let tree = write(&examples::create_all_statements());
    let tokens = leaves(&tree);
    assert_eq!(
        &tokens[..4],
        &["// Exercises every statement kind.", "// Second line.", "module", "All_statements"]
    );
}

#[test]
fn test_source_positions_round_trip() {
    let mut module = examples::create_hello_world();
    let DeclarationKind::Function(function) = &mut module.declarations[0].kind else {
        panic!("main is a function");
    };
    function.declaration.source_location = Some(SourcePosition::new(5, 1));
    let definition = function.definition.as_mut().unwrap();
    definition.source_location = Some(SourcePosition::new(6, 1));
    for (line, statement) in (7..).zip(&mut definition.statements) {
        statement.source_position = Some(SourcePosition::new(line, 5));
    }

    assert_eq!(round_trip(&module), module);
}

#[test]
fn test_module_names_are_taken_from_the_tree() {
    let module = examples::create_using_structs();
    let renamed = Module {
        name: "Renamed".to_owned(),
        ..module.clone()
    };
    let output = parse_tree_to_module(&write(&renamed)).unwrap();

    // Bare type names resolve against the module being read.
    assert_eq!(output.module.name, "Renamed");
    assert_ne!(output.module, module);
}

#[test]
fn test_subtrees_read_in_module_context() {
    let module = examples::create_using_structs();
    let tree = write(&module);

    let type_position =
        find_descendant_position_if(&tree, |node| node.is("Expression_variable_declaration_type"))
            .unwrap();
    let type_node = get_node_at_position(&tree, &type_position).unwrap();
    assert_eq!(
        parse_tree_to_types(&type_node.children[0], &module).unwrap(),
        vec![hl_ir::types::create_custom_type_reference("Structs", "My_struct")]
    );

    let add = write(&examples::create_add_example());
    let statement_position =
        find_descendant_position_if(&add, |node| node.is("Statement")).unwrap();
    let statement = get_node_at_position(&add, &statement_position).unwrap();
    let DeclarationKind::Function(function) = &examples::create_add_example().declarations[0].kind
    else {
        panic!("add is a function");
    };
    assert_eq!(
        parse_tree_to_expression(statement, &module).unwrap(),
        function.definition.as_ref().unwrap().statements[0].expression
    );
}

fn identifier() -> impl Strategy<Value = String> {
    "v_[a-z0-9_]{0,8}"
}

fn comment() -> impl Strategy<Value = Option<String>> {
    proptest::option::of(
        proptest::collection::vec("[A-Za-z0-9 ,.]{0,16}", 1..4).prop_map(|lines| lines.join("\n")),
    )
}

fn integer_constant() -> impl Strategy<Value = (TypeReference, Expression)> {
    (1u32..=64, any::<bool>(), "[0-9]{1,6}").prop_map(|(number_of_bits, is_signed, data)| {
        let type_reference = create_integer_type(number_of_bits, is_signed);
        (type_reference.clone(), Expression::constant(type_reference, data))
    })
}

fn global_variable() -> impl Strategy<Value = Declaration> {
    (identifier(), integer_constant(), any::<bool>(), any::<bool>(), comment()).prop_map(
        |(name, (type_reference, value), is_mutable, is_export, comment)| {
            Declaration::new(
                is_export,
                DeclarationKind::GlobalVariable(GlobalVariableDeclaration {
                    name,
                    type_reference: Some(type_reference),
                    initial_value: Statement::new(value),
                    is_mutable,
                    comment,
                    source_location: None,
                }),
            )
        },
    )
}

fn struct_declaration() -> impl Strategy<Value = Declaration> {
    (
        "S_[a-z0-9]{0,6}",
        proptest::collection::vec((identifier(), integer_constant(), comment()), 0..4),
        comment(),
        any::<bool>(),
    )
        .prop_map(|(name, members, comment, is_export)| {
            let mut member_names = Vec::new();
            let mut member_types = Vec::new();
            let mut member_default_values = Vec::new();
            let mut member_comments = Vec::new();
            for (index, (member_name, (type_reference, value), member_comment)) in
                members.into_iter().enumerate()
            {
                member_names.push(member_name);
                member_types.push(type_reference);
                member_default_values.push(Statement::new(value));
                if let Some(comment) = member_comment {
                    member_comments.push(IndexedComment { index, comment });
                }
            }
            let mut declaration = StructDeclaration::new(
                name,
                member_names,
                member_types,
                member_default_values,
            );
            declaration.comment = comment;
            declaration.member_comments = member_comments;
            Declaration::new(is_export, DeclarationKind::Struct(declaration))
        })
}

fn enum_declaration() -> impl Strategy<Value = Declaration> {
    let value = (
        "V_[a-z0-9]{0,6}",
        proptest::option::of("[0-9]{1,4}"),
        comment(),
    )
        .prop_map(|(name, explicit, comment)| EnumValue {
            name,
            value: explicit.map_or(EnumValueInitializer::AutoIncrement, |data| {
                EnumValueInitializer::Explicit(Statement::new(Expression::constant(
                    create_integer_type(32, true),
                    data,
                )))
            }),
            comment,
            source_location: None,
        });

    (
        "E_[a-z0-9]{0,6}",
        proptest::collection::vec(value, 1..5),
        comment(),
        any::<bool>(),
    )
        .prop_map(|(name, values, comment, is_export)| {
            Declaration::new(
                is_export,
                DeclarationKind::Enum(EnumDeclaration {
                    name,
                    values,
                    comment,
                    source_location: None,
                }),
            )
        })
}

fn statement() -> impl Strategy<Value = Statement> {
    prop_oneof![
        (identifier(), any::<bool>(), integer_constant()).prop_map(
            |(name, is_mutable, (_, value))| Expression::variable_declaration(
                name, is_mutable, value
            )
        ),
        (identifier(), integer_constant()).prop_map(|(name, (_, value))| Expression::call(
            Expression::variable(name, AccessType::Read),
            vec![value]
        )),
        proptest::option::of(integer_constant())
            .prop_map(|value| Expression::return_value(value.map(|(_, value)| value))),
    ]
    .prop_map(Statement::new)
}

fn function_declaration() -> impl Strategy<Value = Declaration> {
    let parameters = || {
        proptest::collection::vec(
            (identifier(), integer_constant()).prop_map(|(name, (type_reference, _))| {
                (name, type_reference)
            }),
            0..3,
        )
    };

    (
        "f_[a-z0-9]{0,6}",
        parameters(),
        parameters(),
        proptest::option::of(proptest::collection::vec(statement(), 0..5)),
        any::<bool>(),
    )
        .prop_map(|(name, inputs, outputs, body, is_export)| {
            let definition =
                body.map(|statements| FunctionDefinition::new(name.clone(), statements));
            Declaration::new(
                is_export,
                DeclarationKind::Function(Function {
                    declaration: FunctionDeclaration::new(
                        name,
                        inputs,
                        outputs,
                        Linkage::from_export(is_export),
                    ),
                    definition,
                }),
            )
        })
}

fn declaration() -> impl Strategy<Value = Declaration> {
    prop_oneof![
        global_variable(),
        struct_declaration(),
        enum_declaration(),
        function_declaration(),
    ]
}

proptest! {
    #[test]
    fn prop_modules_round_trip(
        name in "[A-Z][a-z_]{0,10}",
        comment in comment(),
        declarations in proptest::collection::vec(declaration(), 0..6),
    ) {
        let module = Module {
            name,
            imports: Vec::new(),
            declarations,
            comment,
        };
        prop_assert_eq!(round_trip(&module), module);
    }
}

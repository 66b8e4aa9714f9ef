#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{float32, int32, no_modules, write, Fixture};
use hl_analysis::{
    find_instantiate_custom_type_reference_from_node, get_declaration_member_types,
    get_declaration_members, get_expression_type_2, get_global_variable_type,
    get_underlying_type, get_underlying_type_declaration, is_enum_type,
    is_enum_value_expression, ExpressionType, Member, ParseTreeStore,
};
use hl_ir::examples;
use hl_ir::types::{
    create_boolean_type, create_constant_array_type, create_custom_type_reference,
    create_fundamental_type,
};
use hl_ir::{
    AccessType, AliasTypeDeclaration, BinaryOperation, ConstantArrayExpression,
    CustomTypeReference, Declaration, DeclarationKind, EnumDeclaration, EnumValue,
    EnumValueInitializer, Expression, Function, FunctionDeclaration, FunctionDefinition,
    FundamentalType, GlobalVariableDeclaration, Import, InstantiateExpressionType,
    InstantiateMemberValuePair, Linkage, Module, Statement, StructDeclaration, TypeExpression,
    TypeReference,
};
use pretty_assertions::assert_eq;

fn read(name: &str) -> Expression {
    Expression::variable(name, AccessType::Read)
}

fn access(expression: Expression, member: &str) -> Expression {
    Expression::access(expression, member, AccessType::Read)
}

fn instantiate(members: Vec<(&str, Expression)>) -> Expression {
    Expression::instantiate(
        InstantiateExpressionType::Default,
        members
            .into_iter()
            .map(|(member_name, value)| InstantiateMemberValuePair {
                member_name: member_name.to_owned(),
                value: Statement::new(value),
            })
            .collect(),
    )
}

fn parameters(values: Vec<(&str, TypeReference)>) -> Vec<(String, TypeReference)> {
    values
        .into_iter()
        .map(|(name, type_reference)| (name.to_owned(), type_reference))
        .collect()
}

fn function(
    name: &str,
    inputs: Vec<(&str, TypeReference)>,
    outputs: Vec<(&str, TypeReference)>,
    body: Vec<Expression>,
) -> Declaration {
    Declaration::new(
        true,
        DeclarationKind::Function(Function {
            declaration: FunctionDeclaration::new(
                name,
                parameters(inputs),
                parameters(outputs),
                Linkage::External,
            ),
            definition: Some(FunctionDefinition::new(
                name,
                body.into_iter().map(Statement::new).collect(),
            )),
        }),
    )
}

/// An untyped global, typed from `initial_value`.
fn global(name: &str, initial_value: Expression) -> Declaration {
    Declaration::new(
        false,
        DeclarationKind::GlobalVariable(GlobalVariableDeclaration {
            name: name.to_owned(),
            type_reference: None,
            initial_value: Statement::new(initial_value),
            is_mutable: false,
            comment: None,
            source_location: None,
        }),
    )
}

fn alias(name: &str, target: TypeReference) -> Declaration {
    Declaration::new(
        true,
        DeclarationKind::Alias(AliasTypeDeclaration {
            name: name.to_owned(),
            type_reference: vec![target],
            comment: None,
            source_location: None,
        }),
    )
}

impl Fixture {
    fn expression_type(
        &self,
        position: Option<&[usize]>,
        expression: &Expression,
    ) -> Option<ExpressionType> {
        get_expression_type_2(&self.root, position, expression, &ParseTreeStore::new())
    }
}

/// Structs nested in structs, with instantiate expressions in every
/// position that gives them a type.
fn create_nesting() -> Module {
    let inner = || create_custom_type_reference("Nesting", "Inner");
    let outer = || create_custom_type_reference("Nesting", "Outer");

    Module {
        name: "Nesting".to_owned(),
        imports: Vec::new(),
        declarations: vec![
            Declaration::new(
                true,
                DeclarationKind::Struct(StructDeclaration::new(
                    "Inner",
                    vec!["a".to_owned()],
                    vec![int32()],
                    vec![Statement::new(Expression::constant(int32(), "0"))],
                )),
            ),
            Declaration::new(
                true,
                DeclarationKind::Struct(StructDeclaration::new(
                    "Outer",
                    vec!["inner".to_owned()],
                    vec![inner()],
                    vec![Statement::new(instantiate(Vec::new()))],
                )),
            ),
            function(
                "create",
                Vec::new(),
                vec![("result", outer())],
                vec![Expression::return_value(Some(instantiate(vec![(
                    "inner",
                    instantiate(vec![("a", Expression::constant(int32(), "1"))]),
                )])))],
            ),
            function("consume", vec![("value", inner())], Vec::new(), Vec::new()),
            function(
                "update",
                Vec::new(),
                Vec::new(),
                vec![
                    Expression::call(
                        read("consume"),
                        vec![instantiate(vec![("a", Expression::constant(int32(), "1"))])],
                    ),
                    Expression::variable_declaration_with_type(
                        "value",
                        true,
                        outer(),
                        instantiate(Vec::new()),
                    ),
                    Expression::assignment(
                        Expression::access(read("value"), "inner", AccessType::Write),
                        instantiate(vec![("a", Expression::constant(int32(), "2"))]),
                        None,
                    ),
                ],
            ),
        ],
        comment: None,
    }
}

#[test]
fn test_members_through_alias_chain() {
    let fixture = Fixture::new(examples::create_using_alias_chains());
    let position = fixture.last_statement("use_alias_chain");

    for expression in [access(read("instance"), "a"), access(read("value"), "a"), read("member")] {
        assert_eq!(
            fixture.expression_type(Some(&position), &expression),
            Some(ExpressionType::value(int32())),
            "{expression:?}"
        );
    }
}

#[test]
fn test_alias_cycle_has_no_underlying_type() {
    let module = examples::create_using_alias_chains();
    let cycle = create_custom_type_reference("Alias_chains", "Cycle_0");
    assert_eq!(get_underlying_type(&module, &cycle, &no_modules), None);

    let chain = create_custom_type_reference("Alias_chains", "My_alias_1");
    assert_eq!(
        get_underlying_type(&module, &chain, &no_modules),
        Some(create_custom_type_reference("Alias_chains", "My_struct"))
    );

    let found = get_underlying_type_declaration(
        &module,
        &CustomTypeReference::new("Alias_chains", "My_alias_0"),
        &no_modules,
    )
    .unwrap();
    assert_eq!(found.module.name, "Alias_chains");
    assert_eq!(found.declaration().name, "My_struct");

    let alias = module.find_declaration("My_alias_1").unwrap();
    assert_eq!(
        get_declaration_members(&module, alias, &no_modules),
        vec![Member {
            index: 0,
            name: "a".to_owned()
        }]
    );
    let cycle = module.find_declaration("Cycle_1").unwrap();
    assert!(get_declaration_members(&module, cycle, &no_modules).is_empty());
}

#[test]
fn test_struct_and_union_members() {
    let structs = Fixture::new(examples::create_using_structs());
    let position = structs.last_statement("use_structs");
    let my_struct = create_custom_type_reference("Structs", "My_struct");

    assert_eq!(
        structs.expression_type(Some(&position), &access(read("nested"), "b")),
        Some(ExpressionType::value(my_struct.clone()))
    );
    assert_eq!(
        structs.expression_type(Some(&position), &read("nested_b_a")),
        Some(ExpressionType::value(int32()))
    );
    assert_eq!(
        structs.expression_type(Some(&position), &access(read("my_struct"), "missing")),
        Some(ExpressionType::named_type(my_struct))
    );

    let unions = Fixture::new(examples::create_using_unions());
    let position = unions.last_statement("use_unions");
    assert_eq!(
        unions.expression_type(Some(&position), &access(access(read("instance_1"), "b"), "a")),
        Some(ExpressionType::value(float32()))
    );
    // The last statement declares `nested_a`; only its name sees it.
    assert_eq!(unions.expression_type(Some(&position), &read("nested_a")), None);
    assert_eq!(
        unions.expression_type(Some(&unions.leaf("nested_a")), &read("nested_a")),
        Some(ExpressionType::value(float32()))
    );
    assert_eq!(
        unions.expression_type(Some(&position), &read("b")),
        Some(ExpressionType::value(int32()))
    );

    let nested = unions.module.find_declaration("My_union_2").unwrap();
    let member_types = get_declaration_member_types(&unions.module, nested, &no_modules);
    assert_eq!(member_types.len(), 2);
    assert_eq!(member_types[1].name, "b");
    assert_eq!(
        member_types[1].type_reference,
        create_custom_type_reference("Unions", "My_union")
    );
}

#[test]
fn test_enum_names_and_values() {
    let fixture = Fixture::new(examples::create_using_enums());
    let position = fixture.last_statement("use_enums");
    let my_enum = create_custom_type_reference("Enums", "My_enum");

    let enum_type = fixture.expression_type(Some(&position), &read("My_enum")).unwrap();
    assert_eq!(enum_type, ExpressionType::named_type(my_enum.clone()));
    assert!(!is_enum_value_expression(&fixture.module, &enum_type, &no_modules));

    let value = fixture
        .expression_type(Some(&position), &access(read("My_enum"), "Value_10"))
        .unwrap();
    assert_eq!(value, ExpressionType::value(my_enum.clone()));
    assert!(is_enum_value_expression(&fixture.module, &value, &no_modules));

    assert_eq!(
        fixture.expression_type(Some(&position), &read("my_value")),
        Some(ExpressionType::value(my_enum.clone()))
    );
    assert!(is_enum_type(&fixture.module, &[my_enum], &no_modules));
    assert!(!is_enum_type(&fixture.module, &[int32()], &no_modules));
}

#[test]
fn test_imported_enum_through_alias() {
    let precision = Module {
        name: "Module_A".to_owned(),
        imports: Vec::new(),
        declarations: vec![Declaration::new(
            true,
            DeclarationKind::Enum(EnumDeclaration {
                name: "Precision".to_owned(),
                values: vec![EnumValue {
                    name: "Low".to_owned(),
                    value: EnumValueInitializer::AutoIncrement,
                    comment: None,
                    source_location: None,
                }],
                comment: None,
                source_location: None,
            }),
        )],
        comment: None,
    };
    let user = Module {
        name: "Module_B".to_owned(),
        imports: vec![Import::new("Module_A", "my_import")],
        declarations: Vec::new(),
        comment: None,
    };

    let store = ParseTreeStore::new();
    assert_eq!(store.insert(write(&precision)), Some("Module_A".to_owned()));
    let root = write(&user);
    let precision_type = create_custom_type_reference("Module_A", "Precision");

    let named = access(read("my_import"), "Precision");
    assert_eq!(
        get_expression_type_2(&root, None, &named, &store),
        Some(ExpressionType::named_type(precision_type.clone()))
    );
    assert_eq!(
        get_expression_type_2(&root, None, &access(named.clone(), "Low"), &store),
        Some(ExpressionType::value(precision_type.clone()))
    );
    assert_eq!(
        get_expression_type_2(&root, None, &access(named, "High"), &store),
        Some(ExpressionType::named_type(precision_type))
    );

    store.remove("Module_A");
    assert_eq!(
        get_expression_type_2(&root, None, &access(read("my_import"), "Precision"), &store),
        None
    );
}

#[test]
fn test_calls_yield_outputs() {
    let fixture = Fixture::new(examples::create_all_statements());
    let position = fixture.last_statement("use_everything");

    assert_eq!(
        fixture.expression_type(Some(&position), &Expression::call(read("callback"), vec![])),
        Some(ExpressionType::value(create_boolean_type()))
    );
    assert_eq!(
        fixture.expression_type(
            Some(&position),
            &Expression::call(access(read("stdio"), "puts"), vec![]),
        ),
        None
    );
    assert_eq!(
        fixture.expression_type(Some(&position), &Expression::call(read("log"), vec![])),
        Some(ExpressionType::values(Vec::new()))
    );
    assert_eq!(
        fixture.expression_type(Some(&position), &Expression::call(read("Vector"), vec![])),
        None
    );

    let add = Fixture::new(examples::create_add_example());
    let call = Expression::call(
        read("add"),
        vec![Expression::constant(int32(), "1"), Expression::constant(int32(), "2")],
    );
    assert_eq!(add.expression_type(None, &call), Some(ExpressionType::value(int32())));
}

#[test]
fn test_literals_and_operators() {
    let fixture = Fixture::new(examples::create_all_statements());
    let position = fixture.last_statement("use_everything");
    let cases = [
        (
            Expression::binary(read("sum"), read("casted"), BinaryOperation::LessThan),
            Some(ExpressionType::value(create_boolean_type())),
        ),
        (
            Expression::binary(read("casted"), read("sum"), BinaryOperation::Add),
            Some(ExpressionType::value(float32())),
        ),
        (
            Expression::binary(read("missing"), read("sum"), BinaryOperation::Add),
            Some(ExpressionType::value(int32())),
        ),
        (
            Expression::ConstantArray(ConstantArrayExpression {
                array_data: Vec::new(),
            }),
            Some(ExpressionType::value(create_constant_array_type(Vec::new(), 0))),
        ),
        (
            Expression::Type(TypeExpression {
                type_reference: float32(),
            }),
            Some(ExpressionType::named_type(float32())),
        ),
        (
            Expression::access_array(read("values"), read("index")),
            Some(ExpressionType::value(int32())),
        ),
        (Expression::NullPointer, Some(ExpressionType::value(TypeReference::NullPointer))),
        (Expression::comment("text"), None),
        (read("missing"), None),
    ];

    for (expression, expected) in cases {
        assert_eq!(
            fixture.expression_type(Some(&position), &expression),
            expected,
            "{expression:?}"
        );
    }
}

#[test]
fn test_globals_are_typed_from_their_initializer() {
    let module = examples::create_all_statements();
    let DeclarationKind::GlobalVariable(pi) = &module.find_declaration("pi").unwrap().kind else {
        panic!("pi is a global variable");
    };
    assert_eq!(
        get_global_variable_type(&module, pi, &no_modules),
        Some(ExpressionType::value(float32()))
    );

    let fixture = Fixture::new(module);
    assert_eq!(
        fixture.expression_type(None, &read("counter")),
        Some(ExpressionType::value(int32()))
    );
}

#[test]
fn test_mutually_recursive_globals_have_no_type() {
    let module = Module {
        name: "Recursive".to_owned(),
        imports: Vec::new(),
        declarations: vec![
            global("first", read("second")),
            global("second", read("first")),
            global(
                "third",
                Expression::constant(create_fundamental_type(FundamentalType::Float64), "1.0"),
            ),
        ],
        comment: None,
    };

    let fixture = Fixture::new(module);
    assert_eq!(fixture.expression_type(None, &read("first")), None);
    assert_eq!(
        fixture.expression_type(None, &read("third")),
        Some(ExpressionType::value(create_fundamental_type(
            FundamentalType::Float64
        )))
    );
}

#[test]
fn test_cyclic_imports_have_no_type() {
    // Module_A: `import Module_B as b; var x = b.y; using T = b.U;`
    let module_a = Module {
        name: "Module_A".to_owned(),
        imports: vec![Import::new("Module_B", "b")],
        declarations: vec![
            global("x", access(read("b"), "y")),
            alias("T", create_custom_type_reference("Module_B", "U")),
        ],
        comment: None,
    };
    // Module_B: `import Module_A as a; var y = a.x; using U = a.T;`
    let module_b = Module {
        name: "Module_B".to_owned(),
        imports: vec![Import::new("Module_A", "a")],
        declarations: vec![
            global("y", access(read("a"), "x")),
            alias("U", create_custom_type_reference("Module_A", "T")),
        ],
        comment: None,
    };

    let store = ParseTreeStore::new();
    store.insert(write(&module_a)).unwrap();
    store.insert(write(&module_b)).unwrap();
    let root = store.get("Module_A").unwrap();

    for expression in [
        read("x"),
        access(read("b"), "y"),
        access(read("T"), "m"),
        access(access(read("b"), "U"), "m"),
    ] {
        assert_eq!(
            get_expression_type_2(&root, None, &expression, &store),
            None,
            "{expression:?}"
        );
    }

    // The cycle does not hide the declarations themselves.
    assert_eq!(
        get_expression_type_2(&root, None, &read("T"), &store),
        Some(ExpressionType::named_type(create_custom_type_reference(
            "Module_A", "T"
        )))
    );
    assert_eq!(
        get_expression_type_2(&root, None, &access(read("b"), "U"), &store),
        Some(ExpressionType::named_type(create_custom_type_reference(
            "Module_B", "U"
        )))
    );
}

#[test]
fn test_instantiate_takes_the_type_of_its_context() {
    let fixture = Fixture::new(create_nesting());
    let inner = create_custom_type_reference("Nesting", "Inner");
    let outer = create_custom_type_reference("Nesting", "Outer");

    let found: Vec<Option<TypeReference>> = fixture
        .nodes("Expression_instantiate")
        .iter()
        .map(|position| {
            find_instantiate_custom_type_reference_from_node(
                &fixture.module,
                &fixture.root,
                position,
                &no_modules,
            )
            .map(TypeReference::Custom)
        })
        .collect();

    // Struct member default, return, outer member, call argument,
    // annotated declaration, assignment.
    assert_eq!(
        found,
        vec![
            Some(inner.clone()),
            Some(outer.clone()),
            Some(inner.clone()),
            Some(inner.clone()),
            Some(outer),
            Some(inner.clone()),
        ]
    );

    let position = &fixture.nodes("Expression_instantiate")[3];
    assert_eq!(
        fixture.expression_type(Some(position), &instantiate(Vec::new())),
        Some(ExpressionType::value(inner))
    );
    assert_eq!(fixture.expression_type(None, &instantiate(Vec::new())), None);
}

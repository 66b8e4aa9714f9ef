//! Example modules.
//!
//! Hand-built modules covering the language surface. The convertor and
//! analysis tests round-trip and query them.

use crate::declaration::{
    AliasTypeDeclaration, ConstructorParameter, Declaration, DeclarationKind, EnumDeclaration,
    EnumValue, EnumValueInitializer, Function, FunctionCondition, FunctionConstructor,
    FunctionDeclaration, FunctionDefinition, GlobalVariableDeclaration, Import, IndexedComment,
    Linkage, Module, StructDeclaration, TypeConstructor, UnionDeclaration,
};
use crate::expression::{
    AccessType, AssertExpression, BreakExpression, CastType, CompileTimeExpression,
    ConditionStatementPair, ConstantArrayExpression, DeferExpression,
    DereferenceAndAccessExpression, Expression, ForLoopExpression, FunctionExpression,
    IfCondition, IfExpression, InstanceCallExpression, InstantiateExpressionType,
    InstantiateMemberValuePair, ReflectionExpression, Statement, StructExpression,
    SwitchCaseExpressionPair, SwitchCaseValue, SwitchExpression, TernaryConditionExpression,
    TypeExpression, WhileLoopExpression,
};
use crate::operators::{BinaryOperation, UnaryOperation};
use crate::type_reference::{
    BuiltinTypeReference, CustomTypeReference, FunctionPointerType, FunctionType,
    FundamentalType, TypeInstance, TypeReference,
};
use crate::types::{
    create_boolean_type, create_c_string_type, create_constant_array_type,
    create_custom_type_reference, create_fundamental_type, create_integer_type,
    create_parameter_type, create_pointer_type, create_string_type, TYPE_BUILTIN_NAME,
};

fn int32() -> TypeReference {
    create_integer_type(32, true)
}

fn float32() -> TypeReference {
    create_fundamental_type(FundamentalType::Float32)
}

fn read(name: &str) -> Expression {
    Expression::variable(name, AccessType::Read)
}

fn int32_constant(data: &str) -> Expression {
    Expression::constant(int32(), data)
}

fn statements(expressions: Vec<Expression>) -> Vec<Statement> {
    expressions.into_iter().map(Statement::new).collect()
}

fn module(name: &str, imports: Vec<Import>, declarations: Vec<Declaration>) -> Module {
    Module {
        name: name.to_owned(),
        imports,
        declarations,
        comment: None,
    }
}

fn parameters(values: &[(&str, TypeReference)]) -> Vec<(String, TypeReference)> {
    values
        .iter()
        .map(|(name, type_reference)| ((*name).to_owned(), type_reference.clone()))
        .collect()
}

fn function(
    name: &str,
    is_export: bool,
    input_parameters: &[(&str, TypeReference)],
    output_parameters: &[(&str, TypeReference)],
    body: Vec<Expression>,
) -> Declaration {
    Declaration::new(
        is_export,
        DeclarationKind::Function(Function {
            declaration: FunctionDeclaration::new(
                name,
                parameters(input_parameters),
                parameters(output_parameters),
                Linkage::from_export(is_export),
            ),
            definition: Some(FunctionDefinition::new(name, statements(body))),
        }),
    )
}

fn member_value(member_name: &str, value: Expression) -> InstantiateMemberValuePair {
    InstantiateMemberValuePair {
        member_name: member_name.to_owned(),
        value: Statement::new(value),
    }
}

fn default_instance() -> Expression {
    Expression::instantiate(InstantiateExpressionType::Default, Vec::new())
}

fn if_series(series: Vec<(Option<Expression>, Vec<Expression>)>) -> Expression {
    Expression::If(IfExpression {
        series: series
            .into_iter()
            .map(|(condition, body)| ConditionStatementPair {
                condition: condition.map_or(IfCondition::Else, |value| {
                    IfCondition::Condition(Statement::new(value))
                }),
                then_statements: statements(body),
                block_source_position: None,
            })
            .collect(),
    })
}

/// `module Hello_world;` calling `puts` from `C.stdio`.
pub fn create_hello_world() -> Module {
    let mut stdio = Import::new("C.stdio", "stdio");
    stdio.usages = vec!["puts".to_owned()];

    module(
        "Hello_world",
        vec![stdio],
        vec![function(
            "main",
            true,
            &[],
            &[("result", int32())],
            vec![
                Expression::call(
                    Expression::access(read("stdio"), "puts", AccessType::Read),
                    vec![Expression::constant(create_c_string_type(), "Hello world!")],
                ),
                Expression::return_value(Some(int32_constant("0"))),
            ],
        )],
    )
}

pub fn create_alias_example() -> Module {
    module(
        "alias_example",
        Vec::new(),
        vec![Declaration::new(
            true,
            DeclarationKind::Alias(AliasTypeDeclaration {
                name: "My_alias".to_owned(),
                type_reference: vec![float32()],
                comment: None,
                source_location: None,
            }),
        )],
    )
}

/// `add(lhs: Int32, rhs: Int32) -> (result: Int32)`.
pub fn create_add_example() -> Module {
    module(
        "Add",
        Vec::new(),
        vec![function(
            "add",
            true,
            &[("lhs", int32()), ("rhs", int32())],
            &[("result", int32())],
            vec![Expression::return_value(Some(Expression::binary(
                read("lhs"),
                read("rhs"),
                BinaryOperation::Add,
            )))],
        )],
    )
}

pub fn create_using_structs() -> Module {
    let my_struct = || create_custom_type_reference("Structs", "My_struct");

    let mut first = StructDeclaration::new(
        "My_struct",
        vec!["a".to_owned(), "b".to_owned()],
        vec![int32(), int32()],
        statements(vec![int32_constant("1"), int32_constant("2")]),
    );
    first.comment = Some("Two integers.".to_owned());
    first.member_comments = vec![IndexedComment {
        index: 1,
        comment: "Second member.".to_owned(),
    }];

    let second = StructDeclaration::new(
        "My_struct_2",
        vec!["a".to_owned(), "b".to_owned(), "c".to_owned()],
        vec![my_struct(), my_struct(), my_struct()],
        statements(vec![
            default_instance(),
            Expression::instantiate(
                InstantiateExpressionType::Default,
                vec![member_value("a", int32_constant("2"))],
            ),
            Expression::instantiate(
                InstantiateExpressionType::Default,
                vec![
                    member_value("a", int32_constant("3")),
                    member_value("b", int32_constant("4")),
                ],
            ),
        ]),
    );

    let mut packed = StructDeclaration::new(
        "Packed_bytes",
        vec!["first".to_owned(), "second".to_owned()],
        vec![create_integer_type(8, false), create_integer_type(8, false)],
        statements(vec![
            Expression::constant(create_integer_type(8, false), "0"),
            Expression::constant(create_integer_type(8, false), "0"),
        ]),
    );
    packed.is_packed = true;

    let mut literal = StructDeclaration::new(
        "Literal_point",
        vec!["x".to_owned()],
        vec![float32()],
        statements(vec![Expression::constant(float32(), "0.0")]),
    );
    literal.is_literal = true;

    module(
        "Structs",
        Vec::new(),
        vec![
            Declaration::new(true, DeclarationKind::Struct(first)),
            Declaration::new(true, DeclarationKind::Struct(second)),
            Declaration::new(false, DeclarationKind::Struct(packed)),
            Declaration::new(false, DeclarationKind::Struct(literal)),
            function(
                "use_structs",
                true,
                &[("my_struct", my_struct())],
                &[],
                vec![
                    Expression::variable_declaration(
                        "a",
                        false,
                        Expression::access(read("my_struct"), "a", AccessType::Read),
                    ),
                    Expression::variable_declaration_with_type(
                        "instance_0",
                        false,
                        my_struct(),
                        default_instance(),
                    ),
                    Expression::variable_declaration_with_type(
                        "instance_1",
                        false,
                        my_struct(),
                        Expression::instantiate(
                            InstantiateExpressionType::Explicit,
                            vec![
                                member_value("a", int32_constant("10")),
                                member_value("b", int32_constant("11")),
                            ],
                        ),
                    ),
                    Expression::variable_declaration_with_type(
                        "nested",
                        false,
                        create_custom_type_reference("Structs", "My_struct_2"),
                        default_instance(),
                    ),
                    Expression::variable_declaration(
                        "nested_b_a",
                        false,
                        Expression::access(
                            Expression::access(read("nested"), "b", AccessType::Read),
                            "a",
                            AccessType::Read,
                        ),
                    ),
                    Expression::variable_declaration_with_type(
                        "instance_2",
                        true,
                        my_struct(),
                        default_instance(),
                    ),
                    Expression::assignment(
                        Expression::access(read("instance_2"), "a", AccessType::Write),
                        int32_constant("0"),
                        None,
                    ),
                ],
            ),
        ],
    )
}

pub fn create_using_unions() -> Module {
    let float64 = create_fundamental_type(FundamentalType::Float64);
    let my_union = || create_custom_type_reference("Unions", "My_union");

    let mut union_declaration = UnionDeclaration::new(
        "My_union",
        vec!["a".to_owned(), "b".to_owned()],
        vec![float32(), int32()],
    );
    union_declaration.member_comments = vec![IndexedComment {
        index: 0,
        comment: "Floating point view.".to_owned(),
    }];

    let nested = UnionDeclaration::new(
        "My_union_2",
        vec!["a".to_owned(), "b".to_owned()],
        vec![float64.clone(), my_union()],
    );

    module(
        "Unions",
        Vec::new(),
        vec![
            Declaration::new(true, DeclarationKind::Union(union_declaration)),
            Declaration::new(true, DeclarationKind::Union(nested)),
            function(
                "use_unions",
                true,
                &[("value", my_union())],
                &[],
                vec![
                    Expression::variable_declaration_with_type(
                        "instance_0",
                        false,
                        my_union(),
                        Expression::instantiate(
                            InstantiateExpressionType::Default,
                            vec![member_value("b", int32_constant("2"))],
                        ),
                    ),
                    Expression::variable_declaration(
                        "b",
                        false,
                        Expression::access(read("instance_0"), "b", AccessType::Read),
                    ),
                    Expression::variable_declaration_with_type(
                        "instance_1",
                        false,
                        create_custom_type_reference("Unions", "My_union_2"),
                        Expression::instantiate(
                            InstantiateExpressionType::Default,
                            vec![member_value("a", Expression::constant(float64, "1.5"))],
                        ),
                    ),
                    Expression::variable_declaration(
                        "nested_a",
                        false,
                        Expression::access(
                            Expression::access(read("instance_1"), "b", AccessType::Read),
                            "a",
                            AccessType::Read,
                        ),
                    ),
                ],
            ),
        ],
    )
}

pub fn create_using_enums() -> Module {
    let my_enum = || create_custom_type_reference("Enums", "My_enum");
    let enum_value = |name: &str| Expression::access(read("My_enum"), name, AccessType::Read);
    let value = |name: &str, initializer: Option<&str>, comment: Option<&str>| EnumValue {
        name: name.to_owned(),
        value: initializer.map_or(EnumValueInitializer::AutoIncrement, |data| {
            EnumValueInitializer::Explicit(Statement::new(int32_constant(data)))
        }),
        comment: comment.map(str::to_owned),
        source_location: None,
    };
    let case = |case_value: Option<Expression>, body: Vec<Expression>| SwitchCaseExpressionPair {
        case_value: case_value.map_or(SwitchCaseValue::Default, SwitchCaseValue::Case),
        statements: statements(body),
    };

    let enum_declaration = EnumDeclaration {
        name: "My_enum".to_owned(),
        values: vec![
            value("Value_0", Some("0"), None),
            value("Value_1", None, Some("Follows Value_0.")),
            value("Value_2", None, None),
            value("Value_10", Some("10"), None),
            value("Value_11", None, None),
        ],
        comment: Some("Enum used by the switch below.".to_owned()),
        source_location: None,
    };

    module(
        "Enums",
        Vec::new(),
        vec![
            Declaration::new(true, DeclarationKind::Enum(enum_declaration)),
            function(
                "use_enums",
                true,
                &[("enum_argument", my_enum())],
                &[("result", int32())],
                vec![
                    Expression::variable_declaration("my_value", false, enum_value("Value_1")),
                    Expression::Switch(SwitchExpression {
                        value: Box::new(read("enum_argument")),
                        cases: vec![
                            case(Some(enum_value("Value_0")), Vec::new()),
                            case(Some(enum_value("Value_1")), Vec::new()),
                            case(
                                Some(enum_value("Value_2")),
                                vec![Expression::return_value(Some(int32_constant("0")))],
                            ),
                            case(
                                Some(enum_value("Value_10")),
                                vec![Expression::Break(BreakExpression { loop_count: 0 })],
                            ),
                            case(
                                None,
                                vec![Expression::return_value(Some(int32_constant("1")))],
                            ),
                        ],
                    }),
                    if_series(vec![(
                        Some(Expression::binary(
                            read("enum_argument"),
                            enum_value("Value_11"),
                            BinaryOperation::Has,
                        )),
                        vec![Expression::return_value(Some(int32_constant("3")))],
                    )]),
                    Expression::return_value(Some(int32_constant("2"))),
                ],
            ),
        ],
    )
}

/// Aliases pointing at aliases, plus a cycle that must not be followed forever.
pub fn create_using_alias_chains() -> Module {
    let alias = |name: &str, target: &str| {
        Declaration::new(
            true,
            DeclarationKind::Alias(AliasTypeDeclaration {
                name: name.to_owned(),
                type_reference: vec![create_custom_type_reference("Alias_chains", target)],
                comment: None,
                source_location: None,
            }),
        )
    };

    module(
        "Alias_chains",
        Vec::new(),
        vec![
            Declaration::new(
                true,
                DeclarationKind::Struct(StructDeclaration::new(
                    "My_struct",
                    vec!["a".to_owned()],
                    vec![int32()],
                    statements(vec![int32_constant("0")]),
                )),
            ),
            alias("My_alias_0", "My_struct"),
            alias("My_alias_1", "My_alias_0"),
            alias("Cycle_0", "Cycle_1"),
            alias("Cycle_1", "Cycle_0"),
            function(
                "use_alias_chain",
                true,
                &[(
                    "value",
                    create_custom_type_reference("Alias_chains", "My_alias_1"),
                )],
                &[("result", int32())],
                vec![
                    Expression::variable_declaration_with_type(
                        "instance",
                        false,
                        create_custom_type_reference("Alias_chains", "My_alias_1"),
                        default_instance(),
                    ),
                    Expression::variable_declaration(
                        "member",
                        false,
                        Expression::access(read("instance"), "a", AccessType::Read),
                    ),
                    Expression::return_value(Some(Expression::access(
                        read("value"),
                        "a",
                        AccessType::Read,
                    ))),
                ],
            ),
        ],
    )
}

/// Same-named variables in nested scopes of every kind.
pub fn create_variables_scopes() -> Module {
    let float_constant = Expression::constant(float32(), "1.0");

    let for_loop = Expression::ForLoop(ForLoopExpression {
        variable_name: "index".to_owned(),
        range_begin: Box::new(int32_constant("0")),
        range_end: Box::new(read("count")),
        range_comparison_operation: BinaryOperation::LessThan,
        step_by: None,
        then_statements: statements(vec![
            Expression::variable_declaration("value", false, float_constant.clone()),
            Expression::comment("scope for"),
        ]),
    });

    let while_loop = Expression::WhileLoop(WhileLoopExpression {
        condition: Box::new(Statement::new(Expression::binary(
            read("value"),
            read("count"),
            BinaryOperation::LessThan,
        ))),
        then_statements: statements(vec![
            Expression::variable_declaration(
                "value",
                false,
                Expression::constant(create_boolean_type(), "true"),
            ),
            Expression::comment("scope while"),
        ]),
    });

    let if_expression = if_series(vec![
        (
            Some(Expression::binary(
                read("value"),
                int32_constant("0"),
                BinaryOperation::Equal,
            )),
            vec![
                Expression::variable_declaration(
                    "value",
                    false,
                    Expression::constant(create_integer_type(64, false), "1"),
                ),
                Expression::comment("scope if"),
            ],
        ),
        (
            None,
            vec![
                Expression::variable_declaration(
                    "value",
                    false,
                    Expression::constant(create_integer_type(8, true), "1"),
                ),
                Expression::comment("scope else"),
            ],
        ),
    ]);

    let switch_expression = Expression::Switch(SwitchExpression {
        value: Box::new(read("count")),
        cases: vec![SwitchCaseExpressionPair {
            case_value: SwitchCaseValue::Case(int32_constant("0")),
            statements: statements(vec![
                Expression::variable_declaration(
                    "value",
                    false,
                    Expression::constant(create_string_type(), "zero"),
                ),
                Expression::comment("scope switch"),
            ]),
        }],
    });

    let block = Expression::block(statements(vec![
        Expression::variable_declaration("value", false, float_constant),
        Expression::block(statements(vec![
            Expression::variable_declaration_with_type(
                "value",
                false,
                create_boolean_type(),
                Expression::constant(create_boolean_type(), "false"),
            ),
            Expression::comment("scope innermost"),
        ])),
        Expression::comment("scope after innermost"),
    ]));

    module(
        "Variables_scopes",
        Vec::new(),
        vec![
            function(
                "scopes",
                true,
                &[("count", int32())],
                &[("result", int32())],
                vec![
                    Expression::comment("scope before"),
                    Expression::variable_declaration("value", true, int32_constant("0")),
                    block,
                    for_loop,
                    while_loop,
                    if_expression,
                    switch_expression,
                    Expression::comment("scope end"),
                    Expression::return_value(Some(read("value"))),
                ],
            ),
            function(
                "self_reference",
                false,
                &[],
                &[],
                vec![Expression::variable_declaration("value", false, read("value"))],
            ),
        ],
    )
}

pub fn create_function_contracts() -> Module {
    let condition = |description: &str, name: &str, data: &str, operation| FunctionCondition {
        description: description.to_owned(),
        condition: Statement::new(Expression::binary(read(name), int32_constant(data), operation)),
    };

    let mut declaration = FunctionDeclaration::new(
        "run",
        parameters(&[("x", int32())]),
        parameters(&[("result", int32())]),
        Linkage::External,
    );
    declaration.preconditions = vec![
        condition("x >= 0", "x", "0", BinaryOperation::GreaterThanOrEqualTo),
        condition("x <= 8", "x", "8", BinaryOperation::LessThanOrEqualTo),
    ];
    declaration.postconditions = vec![
        condition("result >= 0", "result", "0", BinaryOperation::GreaterThanOrEqualTo),
        condition("result <= 64", "result", "64", BinaryOperation::LessThanOrEqualTo),
    ];

    module(
        "Contracts",
        Vec::new(),
        vec![Declaration::new(
            true,
            DeclarationKind::Function(Function {
                declaration,
                definition: Some(FunctionDefinition::new(
                    "run",
                    statements(vec![Expression::return_value(Some(Expression::binary(
                        read("x"),
                        read("x"),
                        BinaryOperation::Multiply,
                    )))]),
                )),
            }),
        )],
    )
}

fn create_dynamic_array_constructor() -> Declaration {
    let uint64 = create_integer_type(64, false);
    let mut layout = StructDeclaration::new(
        "",
        vec!["data".to_owned(), "length".to_owned()],
        vec![
            create_pointer_type(vec![create_parameter_type("element_type")], true),
            uint64.clone(),
        ],
        statements(vec![Expression::NullPointer, Expression::constant(uint64, "0")]),
    );
    layout.member_comments = vec![IndexedComment {
        index: 0,
        comment: "Owned buffer.".to_owned(),
    }];

    Declaration::new(
        true,
        DeclarationKind::TypeConstructor(TypeConstructor {
            name: "Dynamic_array".to_owned(),
            parameters: vec![type_parameter("element_type")],
            statements: statements(vec![Expression::return_value(Some(Expression::Struct(
                StructExpression {
                    declaration: layout,
                },
            )))]),
            comment: Some("Growable array of element_type.".to_owned()),
            source_location: None,
        }),
    )
}

fn type_parameter(name: &str) -> ConstructorParameter {
    ConstructorParameter {
        name: name.to_owned(),
        type_reference: TypeReference::Builtin(BuiltinTypeReference {
            value: TYPE_BUILTIN_NAME.to_owned(),
        }),
    }
}

fn create_to_string_constructor() -> Declaration {
    let is_enum = Expression::Reflection(ReflectionExpression {
        name: "is_enum".to_owned(),
        arguments: vec![read("value_type")],
    });

    let declaration = FunctionDeclaration::new(
        "",
        parameters(&[("value", create_parameter_type("value_type"))]),
        parameters(&[("result", create_string_type())]),
        Linkage::External,
    );

    let body = Expression::CompileTime(CompileTimeExpression {
        expression: Box::new(if_series(vec![
            (
                Some(is_enum),
                vec![Expression::return_value(Some(Expression::constant(
                    create_string_type(),
                    "enum",
                )))],
            ),
            (
                None,
                vec![Expression::return_value(Some(Expression::constant(
                    create_string_type(),
                    "other",
                )))],
            ),
        ])),
    });

    Declaration::new(
        true,
        DeclarationKind::FunctionConstructor(FunctionConstructor {
            name: "to_string".to_owned(),
            parameters: vec![type_parameter("value_type")],
            statements: statements(vec![Expression::return_value(Some(Expression::Function(
                FunctionExpression {
                    declaration,
                    definition: FunctionDefinition::new("", statements(vec![body])),
                },
            )))]),
            comment: None,
            source_location: None,
        }),
    )
}

fn unary(name: &str, operation: UnaryOperation) -> Expression {
    let access_type = match operation {
        UnaryOperation::PreIncrement | UnaryOperation::PreDecrement => AccessType::ReadWrite,
        _ => AccessType::Read,
    };
    Expression::unary(Expression::variable(name, access_type), operation)
}

fn create_use_everything() -> Declaration {
    let uint64 = create_integer_type(64, false);
    let vector = || create_custom_type_reference("All_statements", "Vector");
    let callback = create_custom_type_reference("All_statements", "Callback");

    let for_ascending = Expression::ForLoop(ForLoopExpression {
        variable_name: "i".to_owned(),
        range_begin: Box::new(int32_constant("0")),
        range_end: Box::new(int32_constant("10")),
        range_comparison_operation: BinaryOperation::LessThan,
        step_by: Some(Box::new(int32_constant("2"))),
        then_statements: statements(vec![Expression::assignment(
            Expression::variable("sum", AccessType::ReadWrite),
            read("i"),
            Some(BinaryOperation::Add),
        )]),
    });

    let for_descending = Expression::ForLoop(ForLoopExpression {
        variable_name: "j".to_owned(),
        range_begin: Box::new(int32_constant("10")),
        range_end: Box::new(int32_constant("0")),
        range_comparison_operation: BinaryOperation::GreaterThan,
        step_by: None,
        then_statements: statements(vec![
            if_series(vec![
                (
                    Some(Expression::binary(
                        read("j"),
                        int32_constant("5"),
                        BinaryOperation::Equal,
                    )),
                    vec![Expression::Break(BreakExpression { loop_count: 0 })],
                ),
                (
                    Some(Expression::binary(
                        read("j"),
                        int32_constant("6"),
                        BinaryOperation::NotEqual,
                    )),
                    vec![Expression::Continue],
                ),
                (
                    None,
                    vec![Expression::assignment(
                        Expression::variable("sum", AccessType::ReadWrite),
                        int32_constant("1"),
                        Some(BinaryOperation::Subtract),
                    )],
                ),
            ]),
            Expression::WhileLoop(WhileLoopExpression {
                condition: Box::new(Statement::new(Expression::constant(
                    create_boolean_type(),
                    "true",
                ))),
                then_statements: statements(vec![Expression::Break(BreakExpression {
                    loop_count: 2,
                })]),
            }),
        ]),
    });

    let while_loop = Expression::WhileLoop(WhileLoopExpression {
        condition: Box::new(Statement::new(Expression::binary(
            read("index"),
            read("count"),
            BinaryOperation::LessThan,
        ))),
        then_statements: statements(vec![
            Expression::assignment(
                Expression::access_array(read("values"), read("index")),
                read("sum"),
                None,
            ),
            Expression::assignment(
                Expression::variable("index", AccessType::Write),
                Expression::binary(
                    read("index"),
                    Expression::constant(uint64.clone(), "1"),
                    BinaryOperation::Add,
                ),
                None,
            ),
        ]),
    });

    let switch_expression = Expression::Switch(SwitchExpression {
        value: Box::new(read("sum")),
        cases: vec![
            SwitchCaseExpressionPair {
                case_value: SwitchCaseValue::Case(int32_constant("0")),
                statements: Vec::new(),
            },
            SwitchCaseExpressionPair {
                case_value: SwitchCaseValue::Case(int32_constant("1")),
                statements: statements(vec![Expression::return_value(Some(int32_constant(
                    "1",
                )))]),
            },
            SwitchCaseExpressionPair {
                case_value: SwitchCaseValue::Default,
                statements: statements(vec![
                    Expression::assignment(
                        Expression::variable("sum", AccessType::Write),
                        int32_constant("2"),
                        None,
                    ),
                    Expression::Break(BreakExpression { loop_count: 0 }),
                ]),
            },
        ],
    });

    let binary_operations = [
        BinaryOperation::Subtract,
        BinaryOperation::Divide,
        BinaryOperation::Modulus,
        BinaryOperation::BitwiseAnd,
        BinaryOperation::BitwiseOr,
        BinaryOperation::BitwiseXor,
        BinaryOperation::BitShiftLeft,
        BinaryOperation::BitShiftRight,
    ];
    let binary_declarations = binary_operations.iter().enumerate().map(|(index, operation)| {
        Expression::variable_declaration(
            format!("binary_{index}"),
            false,
            Expression::binary(read("sum"), int32_constant("3"), *operation),
        )
    });

    let constants = [
        ("constant_i64", create_integer_type(64, true), "1"),
        ("constant_u8", create_integer_type(8, false), "2"),
        ("constant_f16", create_fundamental_type(FundamentalType::Float16), "1.5"),
        ("constant_f64", create_fundamental_type(FundamentalType::Float64), "0.25"),
        ("constant_cc", create_fundamental_type(FundamentalType::CChar), "65"),
        ("constant_ci", create_fundamental_type(FundamentalType::CInt), "3"),
        ("constant_cull", create_fundamental_type(FundamentalType::CUlonglong), "4"),
        ("constant_cb", create_fundamental_type(FundamentalType::CBool), "1"),
        ("constant_string", create_string_type(), "text"),
    ];
    let constant_declarations = constants.into_iter().map(|(name, type_reference, data)| {
        Expression::variable_declaration(name, false, Expression::constant(type_reference, data))
    });

    let mut body = vec![
        Expression::comment("Declarations."),
        Expression::variable_declaration("sum", true, int32_constant("0")),
        Expression::variable_declaration_with_type(
            "index",
            true,
            uint64.clone(),
            Expression::constant(uint64.clone(), "0"),
        ),
        for_ascending,
        for_descending,
        while_loop,
        switch_expression,
        Expression::block(statements(vec![Expression::variable_declaration(
            "inner",
            false,
            Expression::binary(read("sum"), int32_constant("2"), BinaryOperation::Multiply),
        )])),
        Expression::Defer(DeferExpression {
            expression_to_defer: Box::new(Expression::call(
                Expression::access(read("stdio"), "puts", AccessType::Read),
                vec![Expression::constant(create_c_string_type(), "done")],
            )),
        }),
        Expression::Assert(AssertExpression {
            message: Some("sum is positive".to_owned()),
            statement: Box::new(Statement::new(Expression::binary(
                read("sum"),
                int32_constant("0"),
                BinaryOperation::GreaterThanOrEqualTo,
            ))),
        }),
        Expression::Assert(AssertExpression {
            message: None,
            statement: Box::new(Statement::new(Expression::binary(
                Expression::binary(read("sum"), int32_constant("0"), BinaryOperation::LessThan),
                Expression::constant(create_boolean_type(), "false"),
                BinaryOperation::LogicalOr,
            ))),
        }),
        Expression::variable_declaration(
            "casted",
            false,
            Expression::cast(read("sum"), float32(), CastType::Numeric),
        ),
        Expression::variable_declaration(
            "bits",
            false,
            Expression::cast(read("pi"), create_integer_type(32, false), CastType::BitCast),
        ),
        Expression::variable_declaration(
            "sign",
            false,
            Expression::TernaryCondition(TernaryConditionExpression {
                condition: Box::new(Expression::binary(
                    read("sum"),
                    int32_constant("0"),
                    BinaryOperation::GreaterThan,
                )),
                then_statement: Box::new(Statement::new(int32_constant("1"))),
                else_statement: Box::new(Statement::new(Expression::unary(
                    int32_constant("1"),
                    UnaryOperation::Minus,
                ))),
            }),
        ),
        Expression::variable_declaration("address", false, unary("sum", UnaryOperation::AddressOf)),
        Expression::variable_declaration(
            "pointee",
            false,
            unary("address", UnaryOperation::Indirection),
        ),
        Expression::variable_declaration(
            "negated",
            false,
            Expression::unary(
                Expression::constant(create_boolean_type(), "true"),
                UnaryOperation::Not,
            ),
        ),
        Expression::variable_declaration(
            "inverted",
            false,
            unary("sum", UnaryOperation::BitwiseNot),
        ),
        unary("index", UnaryOperation::PreIncrement),
        unary("index", UnaryOperation::PostIncrement),
        unary("index", UnaryOperation::PreDecrement),
        unary("index", UnaryOperation::PostDecrement),
        Expression::variable_declaration_with_type(
            "point",
            true,
            vector(),
            Expression::instantiate(
                InstantiateExpressionType::Default,
                vec![member_value("x", Expression::constant(float32(), "1.0"))],
            ),
        ),
        Expression::variable_declaration_with_type(
            "origin",
            false,
            vector(),
            Expression::instantiate(
                InstantiateExpressionType::Explicit,
                vec![
                    member_value("x", Expression::constant(float32(), "0.0")),
                    member_value("y", Expression::constant(float32(), "0.0")),
                ],
            ),
        ),
        Expression::variable_declaration(
            "point_pointer",
            false,
            unary("point", UnaryOperation::AddressOf),
        ),
        Expression::variable_declaration(
            "point_x",
            false,
            Expression::DereferenceAndAccess(DereferenceAndAccessExpression {
                expression: Box::new(read("point_pointer")),
                member_name: "x".to_owned(),
            }),
        ),
        Expression::variable_declaration(
            "array",
            false,
            Expression::ConstantArray(ConstantArrayExpression {
                array_data: statements(vec![
                    int32_constant("1"),
                    int32_constant("2"),
                    int32_constant("3"),
                ]),
            }),
        ),
        Expression::variable_declaration(
            "first",
            false,
            Expression::access_array(read("array"), int32_constant("0")),
        ),
        Expression::variable_declaration_with_type(
            "fixed",
            false,
            create_constant_array_type(vec![int32()], 3),
            Expression::ConstantArray(ConstantArrayExpression {
                array_data: Vec::new(),
            }),
        ),
        Expression::variable_declaration_with_type(
            "nothing",
            false,
            create_pointer_type(vec![int32()], false),
            Expression::NullPointer,
        ),
        Expression::variable_declaration_with_type(
            "file",
            false,
            create_pointer_type(vec![create_custom_type_reference("C.stdio", "File")], true),
            Expression::NullPointer,
        ),
        Expression::variable_declaration(
            "size",
            false,
            Expression::Reflection(ReflectionExpression {
                name: "size_of".to_owned(),
                arguments: vec![Expression::Type(TypeExpression {
                    type_reference: vector(),
                })],
            }),
        ),
        Expression::variable_declaration_with_type(
            "dynamic",
            false,
            TypeReference::TypeInstance(TypeInstance {
                type_constructor: CustomTypeReference::new("All_statements", "Dynamic_array"),
                arguments: statements(vec![Expression::Type(TypeExpression {
                    type_reference: int32(),
                })]),
            }),
            default_instance(),
        ),
        Expression::variable_declaration(
            "int_to_string",
            false,
            Expression::InstanceCall(InstanceCallExpression {
                left_hand_side: Box::new(read("to_string")),
                arguments: statements(vec![Expression::Type(TypeExpression {
                    type_reference: int32(),
                })]),
            }),
        ),
        Expression::variable_declaration(
            "parenthesized",
            false,
            Expression::binary(
                Expression::parenthesis(Expression::binary(
                    read("sum"),
                    int32_constant("1"),
                    BinaryOperation::Add,
                )),
                int32_constant("2"),
                BinaryOperation::Multiply,
            ),
        ),
        Expression::variable_declaration(
            "both",
            false,
            Expression::binary(
                Expression::binary(
                    read("sum"),
                    int32_constant("1"),
                    BinaryOperation::LessThanOrEqualTo,
                ),
                Expression::constant(create_boolean_type(), "true"),
                BinaryOperation::LogicalAnd,
            ),
        ),
        Expression::call(read("callback"), vec![read("sum")]),
        Expression::assignment(
            Expression::variable("counter", AccessType::ReadWrite),
            int32_constant("1"),
            Some(BinaryOperation::Add),
        ),
    ];
    body.extend(binary_declarations);
    body.extend(constant_declarations);
    body.push(Expression::return_value(Some(read("sum"))));

    function(
        "use_everything",
        true,
        &[
            ("values", create_pointer_type(vec![int32()], true)),
            ("count", uint64),
            ("callback", callback),
        ],
        &[("result", int32())],
        body,
    )
}

/// One module exercising every declaration, statement and expression kind
/// the convertor can render.
pub fn create_all_statements() -> Module {
    let mut stdio = Import::new("C.stdio", "stdio");
    stdio.usages = vec!["File".to_owned(), "printf".to_owned(), "puts".to_owned()];

    let counter = Declaration::new(
        true,
        DeclarationKind::GlobalVariable(GlobalVariableDeclaration {
            name: "counter".to_owned(),
            type_reference: Some(int32()),
            initial_value: Statement::new(int32_constant("0")),
            is_mutable: true,
            comment: Some("Number of calls.".to_owned()),
            source_location: None,
        }),
    );
    let pi = Declaration::new(
        false,
        DeclarationKind::GlobalVariable(GlobalVariableDeclaration {
            name: "pi".to_owned(),
            type_reference: None,
            initial_value: Statement::new(Expression::constant(float32(), "3.14")),
            is_mutable: false,
            comment: None,
            source_location: None,
        }),
    );

    let mut vector = StructDeclaration::new(
        "Vector",
        vec!["x".to_owned(), "y".to_owned()],
        vec![float32(), float32()],
        statements(vec![
            Expression::constant(float32(), "0.0"),
            Expression::constant(float32(), "0.0"),
        ]),
    );
    vector.member_comments = vec![IndexedComment {
        index: 0,
        comment: "Horizontal.".to_owned(),
    }];

    let number = UnionDeclaration::new(
        "Number",
        vec!["integer".to_owned(), "real".to_owned()],
        vec![
            create_integer_type(64, true),
            create_fundamental_type(FundamentalType::Float64),
        ],
    );

    let callback = Declaration::new(
        true,
        DeclarationKind::Alias(AliasTypeDeclaration {
            name: "Callback".to_owned(),
            type_reference: vec![TypeReference::FunctionPointer(FunctionPointerType {
                function_type: FunctionType {
                    input_parameter_types: vec![int32()],
                    output_parameter_types: vec![create_boolean_type()],
                    is_variadic: false,
                },
                input_parameter_names: vec!["value".to_owned()],
                output_parameter_names: vec!["accepted".to_owned()],
            })],
            comment: None,
            source_location: None,
        }),
    );

    let nothing = Declaration::new(
        false,
        DeclarationKind::Alias(AliasTypeDeclaration {
            name: "Nothing".to_owned(),
            type_reference: Vec::new(),
            comment: None,
            source_location: None,
        }),
    );

    let mut printf = FunctionDeclaration::new(
        "print_formatted",
        parameters(&[("format", create_c_string_type())]),
        parameters(&[("result", create_fundamental_type(FundamentalType::CInt))]),
        Linkage::Private,
    );
    printf.function_type.is_variadic = true;
    printf.comment = Some("Forwards to C.".to_owned());
    let printf = Declaration::new(
        false,
        DeclarationKind::Function(Function {
            declaration: printf,
            definition: None,
        }),
    );

    let call_printf = function(
        "log",
        false,
        &[],
        &[],
        vec![
            Expression::call(
                Expression::access(read("stdio"), "printf", AccessType::Read),
                vec![Expression::constant(create_c_string_type(), "log")],
            ),
            Expression::return_value(None),
        ],
    );

    Module {
        name: "All_statements".to_owned(),
        imports: vec![stdio],
        declarations: vec![
            counter,
            pi,
            Declaration::new(true, DeclarationKind::Struct(vector)),
            Declaration::new(true, DeclarationKind::Union(number)),
            callback,
            nothing,
            create_dynamic_array_constructor(),
            create_to_string_constructor(),
            printf,
            call_printf,
            create_use_everything(),
        ],
        comment: Some("Exercises every statement kind.\nSecond line.".to_owned()),
    }
}

/// Every example module.
pub fn all() -> Vec<Module> {
    vec![
        create_hello_world(),
        create_alias_example(),
        create_add_example(),
        create_using_structs(),
        create_using_unions(),
        create_using_enums(),
        create_using_alias_chains(),
        create_variables_scopes(),
        create_function_contracts(),
        create_all_statements(),
    ]
}

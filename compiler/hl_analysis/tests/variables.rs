#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{float32, int32, no_modules, Fixture};
use hl_analysis::{
    find_variable_info, find_variable_name_node_from_variable_info, find_variable_type,
    VariableInfo,
};
use hl_ir::examples;
use hl_ir::types::{
    create_boolean_type, create_constant_array_type, create_custom_type_reference,
    create_fundamental_type, create_integer_type, create_pointer_type, create_string_type,
};
use hl_ir::{DeclarationKind, FundamentalType, TypeReference};
use hl_parse_tree::{find_descendant_position_if, get_node_at_position, get_terminal_value};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

impl Fixture {
    fn variable_type(
        &self,
        function: &str,
        position: &[usize],
        name: &str,
    ) -> Option<TypeReference> {
        let function = self.module.find_function(function).unwrap();
        find_variable_type(&self.module, function, &self.root, position, name, &no_modules)
    }

    fn variable_info(
        &self,
        function: &str,
        position: &[usize],
        name: &str,
    ) -> Option<VariableInfo<'_>> {
        let function = self.module.find_function(function).unwrap();
        find_variable_info(&self.module, function, &self.root, position, name)
    }
}

#[test]
fn test_add_parameter_type() {
    let fixture = Fixture::new(examples::create_add_example());
    let position = fixture.leaf("return");

    assert_eq!(fixture.variable_type("add", &position, "lhs"), Some(int32()));
    assert_eq!(fixture.variable_type("add", &position, "rhs"), Some(int32()));
    assert_eq!(fixture.variable_type("add", &position, "result"), None);
}

#[test]
fn test_nested_scopes_shadow_outer_declarations() {
    let fixture = Fixture::new(examples::create_variables_scopes());
    let cases = [
        ("// scope before", "value", None),
        ("// scope before", "count", Some(int32())),
        ("// scope innermost", "value", Some(create_boolean_type())),
        ("// scope after innermost", "value", Some(float32())),
        ("// scope for", "value", Some(float32())),
        ("// scope for", "index", Some(int32())),
        ("// scope while", "value", Some(create_boolean_type())),
        ("// scope if", "value", Some(create_integer_type(64, false))),
        ("// scope else", "value", Some(create_integer_type(8, true))),
        ("// scope switch", "value", Some(create_string_type())),
        ("// scope end", "value", Some(int32())),
        ("// scope end", "index", None),
    ];

    for (comment, name, expected) in cases {
        let position = fixture.leaf(comment);
        assert_eq!(
            fixture.variable_type("scopes", &position, name),
            expected,
            "{name} at {comment}"
        );
    }
}

#[test]
fn test_self_referencing_declaration_has_no_type() {
    let fixture = Fixture::new(examples::create_variables_scopes());
    let body = fixture.body("self_reference");

    // `Statement > Generic_expression > Expression_variable_declaration > Generic_expression`
    let mut initializer = body.clone();
    initializer.extend([0, 0, 0, 3]);
    assert!(get_node_at_position(&fixture.root, &initializer)
        .unwrap()
        .is("Generic_expression"));
    assert_eq!(fixture.variable_type("self_reference", &initializer, "value"), None);

    let mut after = body;
    after.push(1);
    assert_eq!(fixture.variable_type("self_reference", &after, "value"), None);
    assert!(matches!(
        fixture.variable_info("self_reference", &after, "value"),
        Some(VariableInfo::VariableDeclaration { .. })
    ));
}

#[test]
fn test_results_are_typed_inside_postconditions_only() {
    let fixture = Fixture::new(examples::create_function_contracts());
    let mut postcondition = find_descendant_position_if(&fixture.root, |node| {
        node.is("Function_postcondition")
    })
    .unwrap();
    postcondition.push(3);

    assert_eq!(fixture.variable_type("run", &postcondition, "result"), Some(int32()));
    assert_eq!(fixture.variable_type("run", &postcondition, "x"), Some(int32()));

    let body = fixture.last_statement("run");
    assert_eq!(fixture.variable_type("run", &body, "result"), None);
}

#[test]
fn test_every_local_of_use_everything() {
    let fixture = Fixture::new(examples::create_all_statements());
    let position = fixture.last_statement("use_everything");
    let vector = create_custom_type_reference("All_statements", "Vector");

    let cases = [
        ("sum", Some(int32())),
        ("index", Some(create_integer_type(64, false))),
        ("casted", Some(float32())),
        ("bits", Some(create_integer_type(32, false))),
        ("sign", Some(int32())),
        ("address", Some(create_pointer_type(vec![int32()], false))),
        ("pointee", Some(int32())),
        ("negated", Some(create_boolean_type())),
        ("inverted", Some(int32())),
        ("point", Some(vector.clone())),
        ("point_pointer", Some(create_pointer_type(vec![vector], false))),
        ("point_x", Some(float32())),
        ("array", Some(create_constant_array_type(vec![int32()], 3))),
        ("first", Some(int32())),
        ("fixed", Some(create_constant_array_type(vec![int32()], 3))),
        ("nothing", Some(create_pointer_type(vec![int32()], false))),
        (
            "file",
            Some(create_pointer_type(
                vec![create_custom_type_reference("C.stdio", "File")],
                true,
            )),
        ),
        ("size", None),
        ("int_to_string", None),
        ("parenthesized", Some(int32())),
        ("both", Some(create_boolean_type())),
        ("binary_0", Some(int32())),
        ("constant_f64", Some(create_fundamental_type(FundamentalType::Float64))),
        ("constant_string", Some(create_string_type())),
        ("inner", None),
        ("values", Some(create_pointer_type(vec![int32()], true))),
        (
            "callback",
            Some(create_custom_type_reference("All_statements", "Callback")),
        ),
        ("counter", Some(int32())),
        ("pi", Some(float32())),
        ("Vector", None),
        ("missing", None),
    ];

    for (name, expected) in cases {
        assert_eq!(
            fixture.variable_type("use_everything", &position, name),
            expected,
            "{name}"
        );
    }
}

#[test]
fn test_parameter_info_points_at_the_parameter_name() {
    let fixture = Fixture::new(examples::create_add_example());
    let position = fixture.leaf("return");

    let info = fixture.variable_info("add", &position, "rhs").unwrap();
    let VariableInfo::FunctionInput { function, index } = &info else {
        panic!("unexpected {info:?}");
    };
    assert_eq!(function.declaration.name, "add");
    assert_eq!(*index, 1);

    let name = find_variable_name_node_from_variable_info(&fixture.root, &info).unwrap();
    assert!(name.node.is("Function_parameter_name"));
    assert_eq!(get_terminal_value(name.node), Some("rhs"));
    assert_eq!(get_node_at_position(&fixture.root, &name.position), Some(name.node));
}

#[test]
fn test_output_info_inside_postcondition() {
    let fixture = Fixture::new(examples::create_function_contracts());
    let mut postcondition = find_descendant_position_if(&fixture.root, |node| {
        node.is("Function_postcondition")
    })
    .unwrap();
    postcondition.push(3);

    let info = fixture.variable_info("run", &postcondition, "result").unwrap();
    assert!(matches!(info, VariableInfo::FunctionOutput { index: 0, .. }));

    let name = find_variable_name_node_from_variable_info(&fixture.root, &info).unwrap();
    assert_eq!(get_terminal_value(name.node), Some("result"));
    let list_position = &name.position[..name.position.len() - 2];
    let parameters = get_node_at_position(&fixture.root, list_position).unwrap();
    assert!(parameters.is("Function_output_parameters"));
}

#[test]
fn test_local_info_points_at_the_innermost_declaration() {
    let fixture = Fixture::new(examples::create_variables_scopes());
    let position = fixture.leaf("// scope innermost");

    let info = fixture.variable_info("scopes", &position, "value").unwrap();
    assert!(matches!(info, VariableInfo::VariableDeclaration { .. }));

    let name = find_variable_name_node_from_variable_info(&fixture.root, &info).unwrap();
    assert!(name.node.is("Variable_name"));
    let declaration =
        get_node_at_position(&fixture.root, &name.position[..name.position.len() - 1]).unwrap();
    assert!(declaration.is("Expression_variable_declaration_with_type"));
    assert!(position.starts_with(&name.position[..name.position.len() - 5]));
}

#[test]
fn test_for_loop_variable_info() {
    let fixture = Fixture::new(examples::create_variables_scopes());
    let position = fixture.leaf("// scope for");

    let info = fixture.variable_info("scopes", &position, "index").unwrap();
    assert!(matches!(info, VariableInfo::ForLoopVariable { .. }));

    let name = find_variable_name_node_from_variable_info(&fixture.root, &info).unwrap();
    assert!(name.node.is("Expression_for_loop_variable"));
    assert_eq!(get_terminal_value(name.node), Some("index"));
}

#[test]
fn test_module_level_info() {
    let fixture = Fixture::new(examples::create_all_statements());
    let position = fixture.last_statement("use_everything");

    let info = fixture
        .variable_info("use_everything", &position, "counter")
        .unwrap();
    let VariableInfo::Declaration { declaration, .. } = &info else {
        panic!("unexpected {info:?}");
    };
    assert!(matches!(declaration.kind, DeclarationKind::GlobalVariable(_)));
    let name = find_variable_name_node_from_variable_info(&fixture.root, &info).unwrap();
    assert!(name.node.is("Global_variable_name"));

    let info = fixture
        .variable_info("use_everything", &position, "stdio")
        .unwrap();
    assert!(matches!(
        info,
        VariableInfo::ImportAlias { import, .. } if import.module_name == "C.stdio"
    ));
    let name = find_variable_name_node_from_variable_info(&fixture.root, &info).unwrap();
    assert!(name.node.is("Import_alias"));

    assert_eq!(fixture.variable_info("use_everything", &position, "missing"), None);
}

#[test]
fn test_function_without_definition_has_no_scope() {
    let fixture = Fixture::new(examples::create_all_statements());
    let position = fixture.leaf("print_formatted");

    assert_eq!(fixture.variable_info("print_formatted", &position, "format"), None);
    assert_eq!(fixture.variable_type("print_formatted", &position, "format"), None);
}

proptest! {
    #[test]
    fn test_any_position_is_answered(
        position in proptest::collection::vec(0usize..12, 0..24),
        name in prop::sample::select(vec!["value", "count", "index", "result", "scopes"]),
    ) {
        let fixture = Fixture::new(examples::create_variables_scopes());
        let found = fixture.variable_type("scopes", &position, name);
        if name == "scopes" {
            prop_assert!(matches!(found, Some(TypeReference::FunctionPointer(_))));
        }
    }
}

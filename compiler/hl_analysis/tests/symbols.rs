#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{float32, int32, Fixture};
use hl_analysis::{
    create_module_alias_symbol, get_symbol, init_tracing, ParseTreeStore, Symbol, SymbolKind,
};
use hl_ir::examples;
use hl_ir::types::{
    create_boolean_type, create_custom_type_reference,
    create_function_pointer_type_from_declaration,
};
use hl_parse_tree::get_terminal_value;
use pretty_assertions::assert_eq;

impl Fixture {
    fn symbol(&self, position: Option<&[usize]>, name: &str) -> Option<Symbol> {
        init_tracing();
        get_symbol(&self.root, position, name, &ParseTreeStore::new())
    }
}

#[test]
fn test_local_symbol_is_the_innermost_declaration() {
    let fixture = Fixture::new(examples::create_variables_scopes());
    let position = fixture.leaf("// scope innermost");

    let symbol = fixture.symbol(Some(&position), "value").unwrap();
    assert_eq!(symbol.kind, SymbolKind::Value);
    assert_eq!(symbol.types, vec![create_boolean_type()]);
    let name = fixture.node_at(&symbol.node_position);
    assert!(name.is("Variable_name"));
    assert_eq!(get_terminal_value(name), Some("value"));

    let index = fixture
        .symbol(Some(&fixture.leaf("// scope for")), "index")
        .unwrap();
    assert_eq!(index.types, vec![int32()]);
    assert!(fixture
        .node_at(&index.node_position)
        .is("Expression_for_loop_variable"));
}

#[test]
fn test_parameter_symbol() {
    let fixture = Fixture::new(examples::create_using_structs());
    let position = fixture.last_statement("use_structs");

    let parameter = fixture.symbol(Some(&position), "my_struct").unwrap();
    let my_struct = create_custom_type_reference("Structs", "My_struct");
    assert_eq!(parameter.types, vec![my_struct.clone()]);
    assert!(fixture
        .node_at(&parameter.node_position)
        .is("Function_parameter_name"));

    let local = fixture.symbol(Some(&position), "instance_1").unwrap();
    assert_eq!(local.kind, SymbolKind::Value);
    assert_eq!(local.types, vec![my_struct]);
}

#[test]
fn test_type_symbols() {
    let fixture = Fixture::new(examples::create_using_enums());

    let symbol = fixture.symbol(None, "My_enum").unwrap();
    assert_eq!(symbol.kind, SymbolKind::Type);
    assert_eq!(symbol.types, vec![create_custom_type_reference("Enums", "My_enum")]);
    assert!(fixture.node_at(&symbol.node_position).is("Enum_name"));

    let function = fixture.module.find_function("use_enums").unwrap();
    let symbol = fixture.symbol(None, "use_enums").unwrap();
    assert_eq!(symbol.kind, SymbolKind::Value);
    assert_eq!(
        symbol.types,
        vec![create_function_pointer_type_from_declaration(
            &function.declaration
        )]
    );
    assert!(fixture.node_at(&symbol.node_position).is("Function_name"));
}

#[test]
fn test_module_level_symbols() {
    let fixture = Fixture::new(examples::create_all_statements());
    let position = fixture.last_statement("use_everything");

    let pi = fixture.symbol(Some(&position), "pi").unwrap();
    assert_eq!(pi.kind, SymbolKind::Value);
    assert_eq!(pi.types, vec![float32()]);
    assert!(fixture.node_at(&pi.node_position).is("Global_variable_name"));

    let stdio = fixture.symbol(None, "stdio").unwrap();
    assert!(fixture.node_at(&stdio.node_position).is("Import_alias"));
    assert_eq!(
        stdio,
        create_module_alias_symbol("C.stdio", "stdio", stdio.node_position.clone())
    );

    assert_eq!(fixture.symbol(Some(&position), "missing"), None);
}

#[test]
fn test_locals_are_not_visible_without_a_position() {
    let fixture = Fixture::new(examples::create_variables_scopes());
    assert_eq!(fixture.symbol(None, "value"), None);
    assert_eq!(fixture.symbol(None, "count"), None);
}

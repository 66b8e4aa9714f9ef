//! Name and type queries over H parse trees.
//!
//! The queries back editor features (hover, go-to-definition, completion),
//! so they run on trees of files being edited:
//!
//! - Local scopes are read from the parse tree, not from the IR, so that a
//!   function body that does not convert still answers queries.
//! - Nothing panics or errors on invalid input. An unknown name, an
//!   unreadable subtree or a self-referential definition is `None`.
//! - Other modules are reached by name through a `ModuleResolver` or a
//!   `ParseTreeResolver` supplied by the host.
//!
//! # Queries
//!
//! - [`find_variable_info`] / [`find_variable_type`]: what a name in a
//!   function body refers to, and its type.
//! - [`get_expression_type_2`]: type of any expression at a position.
//! - [`get_symbol`]: symbol information for a name at a position.

mod context;
mod declarations;
mod expression_type;
mod instantiate;
mod resolver;
mod scope;
mod symbol;
mod tree;
mod variables;

pub use declarations::{
    get_custom_type_reference_declaration, get_declaration_member_types, get_declaration_members,
    get_global_variable_type, get_underlying_type, get_underlying_type_declaration, is_enum_type,
    is_enum_value_expression, Member, MemberType, ModuleDeclaration,
};
pub use expression_type::{get_expression_type, get_expression_type_2, ExpressionType};
pub use instantiate::find_instantiate_custom_type_reference_from_node;
pub use resolver::{ModuleRef, ModuleResolver, ParseTreeModules, ParseTreeResolver, ParseTreeStore};
pub use symbol::{
    create_module_alias_symbol, create_type_symbol, create_value_symbol, get_symbol, Symbol,
    SymbolKind,
};
pub use tree::{
    find_declaration_name_node, find_import_alias_node,
    get_function_value_that_contains_node_position, get_module_name_from_tree,
};
pub use variables::{
    find_variable_info, find_variable_name_node_from_variable_info, find_variable_type,
    VariableInfo,
};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call once at startup; later calls do nothing. Output is only installed
/// when `RUST_LOG` is set, e.g. `RUST_LOG=hl_analysis=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

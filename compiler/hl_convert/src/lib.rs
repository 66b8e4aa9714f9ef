//! H parse tree ↔ IR conversion.
//!
//! - `module_to_parse_tree`: renders a `Module` as a concrete tree whose
//!   every node carries the grammar rule deriving it, ready for the external
//!   formatter.
//! - `parse_tree_to_module`: rebuilds a `Module` from a tree produced by the
//!   external parser. Each declaration is converted on its own; a malformed
//!   one is left out and its error reported next to the module.
//! - `parse_tree_to_expression`, `parse_tree_to_types`: read a single
//!   subtree in the context of its module, for analyses that cannot rely on
//!   the whole tree converting.
//! - IR maintenance passes used after conversion and edits: import usages
//!   and custom type reference renames.
//!
//! Converting a module to a tree and back yields the same module.

mod error;
mod literal;
mod reader;
mod usages;
mod writer;

use hl_ir::{Expression, Module, TypeReference};
use hl_parse_tree::{Grammar, Node};

pub use error::{ConvertError, ConvertResult};
pub use usages::{
    update_custom_type_references_import_module_name, update_custom_type_references_module_name,
    update_import_module_usages,
};

/// Type name the tree uses for the type of `null`.
pub(crate) const NULL_POINTER_TYPE_NAME: &str = "Null_pointer_type";

/// A module read from a parse tree, plus the errors of the declarations
/// that could not be read.
#[derive(Clone, Debug)]
pub struct ConvertOutput {
    pub module: Module,
    pub errors: Vec<ConvertError>,
}

impl ConvertOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Renders `module` as a parse tree of `grammar`.
///
/// # Errors
///
/// Fails on IR with no concrete syntax (invalid expressions, multi-type
/// aliases, ...) and when `grammar` has no rule for an emitted node.
#[tracing::instrument(level = "debug", skip_all, fields(module = %module.name))]
pub fn module_to_parse_tree(module: &Module, grammar: &Grammar) -> ConvertResult<Node> {
    writer::TreeWriter::new(grammar, module).write_module()
}

/// Reads the module of a parse tree.
///
/// # Errors
///
/// Only a tree without a module head fails as a whole; see `ConvertOutput`
/// for per-declaration errors.
#[tracing::instrument(level = "debug", skip_all)]
pub fn parse_tree_to_module(root: &Node) -> ConvertResult<ConvertOutput> {
    let output = reader::read_module(root)?;
    tracing::debug!(
        module = %output.module.name,
        declarations = output.module.declarations.len(),
        errors = output.errors.len(),
        "read module"
    );
    Ok(output)
}

/// Reads an expression subtree of a tree whose module is `module`: a
/// `Statement`, a `Generic_expression` wrapper or any `Expression_*` node.
/// Custom type names resolve against the module name and its imports.
pub fn parse_tree_to_expression(node: &Node, module: &Module) -> ConvertResult<Expression> {
    reader::read_expression_node(module, node)
}

/// Reads a `Type` node of a tree whose module is `module`; `void` reads as
/// the empty list.
pub fn parse_tree_to_types(node: &Node, module: &Module) -> ConvertResult<Vec<TypeReference>> {
    reader::read_types_node(module, node)
}

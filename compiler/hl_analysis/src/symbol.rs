//! Symbols for hover and go-to-definition.

use hl_ir::types::create_custom_type_reference;
use hl_ir::{DeclarationKind, TypeReference};
use hl_parse_tree::Node;

use crate::context::{Context, Scope};
use crate::resolver::{read_module, ParseTreeModules, ParseTreeResolver};
use crate::scope::find_binding;
use crate::tree::{find_declaration_name_node, find_import_alias_node};

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum SymbolKind {
    /// A local, parameter, global variable or function.
    Value,
    /// A struct, union, enum, alias or type constructor.
    Type,
    /// An import alias.
    ModuleAlias { module_name: String },
}

/// What a name refers to, where it is defined and what type it has.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    /// Type of a value, or the type a type symbol names. Empty when the
    /// type cannot be inferred.
    pub types: Vec<TypeReference>,
    /// Position of the node holding the name in its definition.
    pub node_position: Vec<usize>,
}

pub fn create_value_symbol(
    name: impl Into<String>,
    types: Vec<TypeReference>,
    node_position: Vec<usize>,
) -> Symbol {
    Symbol {
        name: name.into(),
        kind: SymbolKind::Value,
        types,
        node_position,
    }
}

pub fn create_type_symbol(
    name: impl Into<String>,
    types: Vec<TypeReference>,
    node_position: Vec<usize>,
) -> Symbol {
    Symbol {
        name: name.into(),
        kind: SymbolKind::Type,
        types,
        node_position,
    }
}

pub fn create_module_alias_symbol(
    module_name: impl Into<String>,
    alias: impl Into<String>,
    node_position: Vec<usize>,
) -> Symbol {
    Symbol {
        name: alias.into(),
        kind: SymbolKind::ModuleAlias {
            module_name: module_name.into(),
        },
        types: Vec::new(),
        node_position,
    }
}

/// The symbol `name` refers to at `scope_position` of `root`.
///
/// Without a position only module-level names and import aliases are
/// visible. Other modules are read through `resolver` when a global's type
/// depends on them.
#[tracing::instrument(level = "debug", skip(root, scope_position, resolver))]
pub fn get_symbol(
    root: &Node,
    scope_position: Option<&[usize]>,
    name: &str,
    resolver: &dyn ParseTreeResolver,
) -> Option<Symbol> {
    let module = read_module(root)?;
    let modules = ParseTreeModules::new(resolver);
    let context = Context::new(Some(&module), &modules);
    let position = scope_position.unwrap_or(&[]);
    let scope = Scope {
        module: &module,
        root: Some(root),
        position,
    };

    if let Some(binding) = find_binding(root, position, name) {
        let types = context.binding_type(scope, &binding).into_iter().collect();
        return Some(create_value_symbol(name, types, binding.name_position));
    }

    if let Some(declaration) = module.find_declaration(name) {
        let node_position = find_declaration_name_node(root, name)
            .map(|found| found.position)
            .unwrap_or_default();
        return Some(match &declaration.kind {
            DeclarationKind::Function(_) | DeclarationKind::GlobalVariable(_) => {
                let types = context
                    .declaration_type(&module, declaration)
                    .map(|value| value.types)
                    .unwrap_or_default();
                create_value_symbol(name, types, node_position)
            }
            _ => create_type_symbol(
                name,
                vec![create_custom_type_reference(&module.name, name)],
                node_position,
            ),
        });
    }

    let import = module.find_import_by_alias(name)?;
    let node_position = find_import_alias_node(root, name)?.position;
    Some(create_module_alias_symbol(
        &import.module_name,
        name,
        node_position,
    ))
}

//! Shared fixtures: a module, the parse tree written from it and lookups of
//! positions in that tree.

#![allow(dead_code, reason = "each test binary uses a subset")]

use std::sync::Arc;

use hl_analysis::find_declaration_name_node;
use hl_convert::module_to_parse_tree;
use hl_ir::types::{create_fundamental_type, create_integer_type};
use hl_ir::{FundamentalType, Module, TypeReference};
use hl_parse_tree::{
    find_descendant_position_if, find_descendants_if, get_ancestor_with_name,
    get_node_at_position, Grammar, Node,
};

pub struct Fixture {
    pub module: Module,
    pub root: Node,
}

impl Fixture {
    pub fn new(module: Module) -> Self {
        let root = write(&module);
        Fixture { module, root }
    }

    /// Position of the first leaf whose text is `text`.
    pub fn leaf(&self, text: &str) -> Vec<usize> {
        find_descendant_position_if(&self.root, |node| node.is_leaf() && node.label() == text)
            .unwrap_or_else(|| panic!("no leaf {text:?}"))
    }

    /// Positions of every node labelled `label`, in pre-order.
    pub fn nodes(&self, label: &str) -> Vec<Vec<usize>> {
        find_descendants_if(&self.root, |node| node.is(label))
            .into_iter()
            .map(|found| found.position)
            .collect()
    }

    /// Position of the `Statements` node of `function`.
    pub fn body(&self, function: &str) -> Vec<usize> {
        let name = find_declaration_name_node(&self.root, function).unwrap();
        let function = get_ancestor_with_name(&self.root, &name.position, "Function").unwrap();
        let relative =
            find_descendant_position_if(function.node, |node| node.is("Statements")).unwrap();
        let mut position = function.position;
        position.extend(relative);
        position
    }

    /// Position of the last statement of `function`.
    pub fn last_statement(&self, function: &str) -> Vec<usize> {
        let mut position = self.body(function);
        let statements = get_node_at_position(&self.root, &position).unwrap();
        position.push(statements.children.len() - 1);
        position
    }

    pub fn node_at(&self, position: &[usize]) -> &Node {
        get_node_at_position(&self.root, position)
            .unwrap_or_else(|| panic!("no node at {position:?}"))
    }
}

pub fn write(module: &Module) -> Node {
    module_to_parse_tree(module, &Grammar::default_grammar()).unwrap()
}

pub fn no_modules(_: &str) -> Option<Arc<Module>> {
    None
}

pub fn int32() -> TypeReference {
    create_integer_type(32, true)
}

pub fn float32() -> TypeReference {
    create_fundamental_type(FundamentalType::Float32)
}

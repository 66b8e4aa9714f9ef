//! IR → parse tree.
//!
//! Every emitted node gets the index of the production rule deriving it,
//! chosen by the grammar from the node's label and children. Array nodes
//! are flat: their children are the elements with separators in between.

mod declarations;
mod expressions;
mod types;

use hl_ir::{Module, SourcePosition};
use hl_parse_tree::{Grammar, Node};

use crate::error::{ConvertError, ConvertResult};
use crate::literal::comment_to_words;

pub(crate) struct TreeWriter<'a> {
    grammar: &'a Grammar,
    module: &'a Module,
}

impl<'a> TreeWriter<'a> {
    pub(crate) fn new(grammar: &'a Grammar, module: &'a Module) -> Self {
        TreeWriter { grammar, module }
    }

    pub(crate) fn write_module(&self) -> ConvertResult<Node> {
        let module = self.module;

        let module_declaration = self.node(
            "Module_declaration",
            vec![
                self.comment_or_empty(module.comment.as_deref())?,
                leaf("module"),
                self.name("Module_name", &module.name)?,
                leaf(";"),
            ],
        )?;

        let imports = module
            .imports
            .iter()
            .map(|import| {
                self.node(
                    "Import",
                    vec![
                        leaf("import"),
                        self.name("Import_name", &import.module_name)?,
                        leaf("as"),
                        self.name("Import_alias", &import.alias)?,
                        leaf(";"),
                    ],
                )
            })
            .collect::<ConvertResult<Vec<_>>>()?;

        let head = self.node(
            "Module_head",
            vec![module_declaration, self.node("Imports", imports)?],
        )?;

        let declarations = module
            .declarations
            .iter()
            .map(|declaration| self.write_declaration(declaration))
            .collect::<ConvertResult<Vec<_>>>()?;

        self.node("Module", vec![head, self.node("Module_body", declarations)?])
    }

    fn node(&self, label: &str, children: Vec<Node>) -> ConvertResult<Node> {
        match self.grammar.choose_production_rule(label, &children) {
            Some(index) => Ok(Node::new(label, index, children)),
            None => Err(ConvertError::MissingProductionRule {
                label: label.to_owned(),
                children: children.iter().map(|child| child.label().to_owned()).collect(),
            }),
        }
    }

    fn positioned_node(
        &self,
        label: &str,
        children: Vec<Node>,
        source_location: Option<SourcePosition>,
    ) -> ConvertResult<Node> {
        Ok(self.node(label, children)?.with_source_location(source_location))
    }

    /// Wrapper node around one identifier leaf.
    fn name(&self, label: &str, name: &str) -> ConvertResult<Node> {
        self.node(label, vec![leaf(name)])
    }

    fn comment_or_empty(&self, comment: Option<&str>) -> ConvertResult<Node> {
        let children = match comment {
            Some(comment) => {
                let lines = comment_to_words(comment).into_iter().map(Node::leaf).collect();
                vec![self.node("Comment", lines)?]
            }
            None => Vec::new(),
        };
        self.node("Comment_or_empty", children)
    }

    /// Elements separated by `separator` leaves.
    fn separated(
        &self,
        label: &str,
        elements: Vec<Node>,
        separator: &str,
    ) -> ConvertResult<Node> {
        let mut children = Vec::with_capacity(elements.len() * 2);
        for (index, element) in elements.into_iter().enumerate() {
            if index > 0 {
                children.push(leaf(separator));
            }
            children.push(element);
        }
        self.node(label, children)
    }
}

fn leaf(value: &str) -> Node {
    Node::leaf(value)
}

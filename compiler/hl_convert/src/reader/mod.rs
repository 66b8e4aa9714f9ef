//! Parse tree → IR.
//!
//! The reader trusts labels, not rule indices: a node is read by looking its
//! children up by label, so trees from other producers convert as long as
//! they use the default grammar's vocabulary. Declarations are read one at a
//! time and a malformed one is reported and skipped.

mod declarations;
mod expressions;
mod types;

use hl_ir::{Expression, Import, Module, TypeReference};
use hl_parse_tree::{get_terminal_value, Node};

use crate::error::{ConvertError, ConvertResult};
use crate::literal::words_to_comment;
use crate::usages::update_import_module_usages;
use crate::ConvertOutput;

/// Context of the declaration being read.
#[derive(Copy, Clone)]
pub(crate) struct TreeReader<'a> {
    module_name: &'a str,
    imports: &'a [Import],
    /// Parameter names of the enclosing type or function constructor.
    type_parameters: &'a [String],
}

impl<'a> TreeReader<'a> {
    fn new(module_name: &'a str, imports: &'a [Import]) -> Self {
        TreeReader {
            module_name,
            imports,
            type_parameters: &[],
        }
    }

    fn with_type_parameters<'b>(&self, type_parameters: &'b [String]) -> TreeReader<'b>
    where
        'a: 'b,
    {
        TreeReader {
            module_name: self.module_name,
            imports: self.imports,
            type_parameters,
        }
    }
}

pub(crate) fn read_module(root: &Node) -> ConvertResult<ConvertOutput> {
    if !root.is("Module") {
        return Err(ConvertError::MissingModuleHead);
    }
    let head = root
        .find_child("Module_head")
        .ok_or(ConvertError::MissingModuleHead)?;
    let module_declaration = child(head, "Module_declaration")?;

    let name = terminal(module_declaration, "Module_name")?.to_owned();
    let comment = read_comment(module_declaration);
    let imports: Vec<Import> = head
        .find_child("Imports")
        .into_iter()
        .flat_map(|imports| imports.children_with_label("Import"))
        .filter_map(|import| match read_import(import) {
            Ok(import) => Some(import),
            Err(error) => {
                tracing::warn!(%error, "skipping malformed import");
                None
            }
        })
        .collect();

    let mut declarations = Vec::new();
    let mut errors = Vec::new();
    {
        let reader = TreeReader::new(&name, &imports);
        let body = root.find_child("Module_body");
        for (index, node) in body
            .into_iter()
            .flat_map(|body| body.children_with_label("Declaration"))
            .enumerate()
        {
            match reader.read_declaration(node) {
                Ok(declaration) => declarations.push(declaration),
                Err(error) => {
                    tracing::warn!(index, %error, "skipping malformed declaration");
                    errors.push(ConvertError::InDeclaration {
                        index,
                        error: Box::new(error),
                    });
                }
            }
        }
    }

    let mut module = Module {
        name,
        imports,
        declarations,
        comment,
    };
    update_import_module_usages(&mut module);

    Ok(ConvertOutput { module, errors })
}

/// Reads one expression subtree of the tree whose module is `module`.
pub(crate) fn read_expression_node(module: &Module, node: &Node) -> ConvertResult<Expression> {
    TreeReader::new(&module.name, &module.imports).read_subtree_expression(node)
}

/// Reads a `Type` node of the tree whose module is `module`.
pub(crate) fn read_types_node(module: &Module, node: &Node) -> ConvertResult<Vec<TypeReference>> {
    TreeReader::new(&module.name, &module.imports).read_types(node)
}

fn read_import(node: &Node) -> ConvertResult<Import> {
    Ok(Import::new(
        terminal(node, "Import_name")?,
        terminal(node, "Import_alias")?,
    ))
}

/// The non-leaf child labelled `label`.
fn child<'n>(node: &'n Node, label: &'static str) -> ConvertResult<&'n Node> {
    node.find_child(label)
        .ok_or_else(|| ConvertError::missing_child(node.label(), label))
}

/// The `index`-th non-leaf child labelled `label`.
fn nth_child<'n>(node: &'n Node, label: &'static str, index: usize) -> ConvertResult<&'n Node> {
    node.children_with_label(label)
        .nth(index)
        .ok_or_else(|| ConvertError::missing_child(node.label(), label))
}

/// Token of the single-identifier wrapper child labelled `label`.
fn terminal<'n>(node: &'n Node, label: &'static str) -> ConvertResult<&'n str> {
    get_terminal_value(child(node, label)?)
        .ok_or_else(|| ConvertError::missing_child(label, "token"))
}

/// Text of a quoted name token, without its quotes.
fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|value| value.strip_suffix('"'))
        .unwrap_or(value)
}

fn read_comment(node: &Node) -> Option<String> {
    let comment = node.find_child("Comment_or_empty")?.find_child("Comment")?;
    Some(words_to_comment(comment.children.iter().map(Node::label)))
}

//! Tree nodes and positions.
//!
//! A position is the path of child indices from the root to a node; the
//! root is the empty path. Positions are plain slices so callers can build
//! them with `Vec::push` while descending.

use hl_ir::SourcePosition;

#[cfg(test)]
mod tests;

/// Token text or grammar label, with an optional anchor in the source text.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Word {
    pub value: String,
    pub source_location: Option<SourcePosition>,
}

impl Word {
    pub fn new(value: impl Into<String>) -> Self {
        Word {
            value: value.into(),
            source_location: None,
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Node {
    pub word: Word,
    /// `None` marks a leaf token.
    pub production_rule_index: Option<usize>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn leaf(value: impl Into<String>) -> Self {
        Node {
            word: Word::new(value),
            production_rule_index: None,
            children: Vec::new(),
        }
    }

    pub fn new(
        label: impl Into<String>,
        production_rule_index: usize,
        children: Vec<Node>,
    ) -> Self {
        Node {
            word: Word::new(label),
            production_rule_index: Some(production_rule_index),
            children,
        }
    }

    #[must_use]
    pub fn with_source_location(mut self, source_location: Option<SourcePosition>) -> Self {
        self.word.source_location = source_location;
        self
    }

    /// Grammar label of a non-leaf, token text of a leaf.
    #[inline]
    pub fn label(&self) -> &str {
        &self.word.value
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.production_rule_index.is_none()
    }

    /// Whether this is a non-leaf labelled `label`.
    #[inline]
    pub fn is(&self, label: &str) -> bool {
        !self.is_leaf() && self.word.value == label
    }

    #[inline]
    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    pub fn find_child(&self, label: &str) -> Option<&Node> {
        self.children.iter().find(|child| child.is(label))
    }

    pub fn find_child_index(&self, label: &str) -> Option<usize> {
        self.children.iter().position(|child| child.is(label))
    }

    pub fn children_with_label<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a Node> {
        self.children.iter().filter(move |child| child.is(label))
    }

    /// Whether one of the direct children is the token `value`.
    pub fn has_token(&self, value: &str) -> bool {
        self.children
            .iter()
            .any(|child| child.is_leaf() && child.word.value == value)
    }
}

/// A node together with its position in the tree it was found in.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct NodeAt<'a> {
    pub node: &'a Node,
    pub position: Vec<usize>,
}

pub fn get_node_at_position<'a>(root: &'a Node, position: &[usize]) -> Option<&'a Node> {
    position
        .iter()
        .try_fold(root, |node, &index| node.children.get(index))
}

pub fn is_valid_position(root: &Node, position: &[usize]) -> bool {
    get_node_at_position(root, position).is_some()
}

/// Position of the parent, `None` for the root.
pub fn get_parent_position(position: &[usize]) -> Option<&[usize]> {
    position.split_last().map(|(_, parent)| parent)
}

/// Nearest strict ancestor of `position` labelled `name`.
pub fn get_ancestor_with_name<'a>(
    root: &'a Node,
    position: &[usize],
    name: &str,
) -> Option<NodeAt<'a>> {
    get_first_ancestor_with_name(root, position, &[name])
}

/// Nearest strict ancestor of `position` labelled with any of `names`.
pub fn get_first_ancestor_with_name<'a>(
    root: &'a Node,
    position: &[usize],
    names: &[&str],
) -> Option<NodeAt<'a>> {
    (0..position.len()).rev().find_map(|length| {
        let ancestor_position = &position[..length];
        let node = get_node_at_position(root, ancestor_position)?;
        names.iter().any(|name| node.is(name)).then(|| NodeAt {
            node,
            position: ancestor_position.to_vec(),
        })
    })
}

/// Position, relative to `node`, of the first descendant in pre-order that
/// satisfies `predicate`. `node` itself is not considered.
pub fn find_descendant_position_if(
    node: &Node,
    mut predicate: impl FnMut(&Node) -> bool,
) -> Option<Vec<usize>> {
    let mut stack: Vec<(&Node, Vec<usize>)> = children_in_reverse(node, &[]);
    while let Some((current, position)) = stack.pop() {
        if predicate(current) {
            return Some(position);
        }
        stack.extend(children_in_reverse(current, &position));
    }
    None
}

/// Every descendant of `node` satisfying `predicate`, in pre-order, with
/// positions relative to `node`.
pub fn find_descendants_if(
    node: &Node,
    mut predicate: impl FnMut(&Node) -> bool,
) -> Vec<NodeAt<'_>> {
    let mut found = Vec::new();
    let mut stack: Vec<(&Node, Vec<usize>)> = children_in_reverse(node, &[]);
    while let Some((current, position)) = stack.pop() {
        stack.extend(children_in_reverse(current, &position));
        if predicate(current) {
            found.push(NodeAt {
                node: current,
                position,
            });
        }
    }
    found
}

fn children_in_reverse<'a>(node: &'a Node, position: &[usize]) -> Vec<(&'a Node, Vec<usize>)> {
    node.children
        .iter()
        .enumerate()
        .rev()
        .map(|(index, child)| {
            let mut child_position = Vec::with_capacity(position.len() + 1);
            child_position.extend_from_slice(position);
            child_position.push(index);
            (child, child_position)
        })
        .collect()
}

/// Longest common prefix of two positions.
pub fn find_node_common_root(lhs: &[usize], rhs: &[usize]) -> Vec<usize> {
    lhs.iter()
        .zip(rhs)
        .take_while(|(lhs, rhs)| lhs == rhs)
        .map(|(index, _)| *index)
        .collect()
}

/// Pre-order iterator over the leaves below a node.
pub struct Leaves<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if node.is_leaf() {
                return Some(node);
            }
            self.stack.extend(node.children.iter().rev());
        }
        None
    }
}

pub fn iter_leaves(node: &Node) -> Leaves<'_> {
    Leaves { stack: vec![node] }
}

/// Text of the first leaf below `node`, which is the name for the
/// single-identifier wrapper nodes (`Variable_name`, `Struct_name`, ...).
pub fn get_terminal_value(node: &Node) -> Option<&str> {
    iter_leaves(node).next().map(|leaf| leaf.word.value.as_str())
}

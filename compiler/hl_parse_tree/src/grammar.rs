//! Grammar production rules.
//!
//! A `Grammar` is an immutable value built from a textual description. The
//! convertor uses it to find the production rule deriving each node it emits;
//! tests use it to check that a tree conforms to the grammar. Several grammars
//! can coexist.

use std::ops::Range;

use bitflags::bitflags;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::node::Node;

mod description;
#[cfg(test)]
mod tests;

pub use description::default_description;

const ALTERNATIVE: &str = "|";
const ZERO_OR_MORE: &str = "$0_or_more";
const ONE_OR_MORE: &str = "$1_or_more";
const SINGLE_OR: &str = "$single_or";
const END_OF_INPUT: &str = "$";

bitflags! {
    /// Marks the rules generated from an array description.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ProductionRuleFlags: u8 {
        /// The rule derives two or more elements.
        const IS_ARRAY = 1 << 0;
        /// The rule is one of the rules generated for an array.
        const IS_ARRAY_SET = 1 << 1;
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ProductionRule {
    pub lhs: String,
    pub rhs: Vec<String>,
    pub flags: ProductionRuleFlags,
}

impl ProductionRule {
    fn new(lhs: &str, rhs: Vec<String>, flags: ProductionRuleFlags) -> Self {
        ProductionRule {
            lhs: lhs.to_owned(),
            rhs,
            flags,
        }
    }
}

/// Element and separator labels of an array rule.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ArrayInfo {
    pub element_label: String,
    pub separator_label: Option<String>,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum ArrayMarker {
    ZeroOrMore,
    OneOrMore,
}

/// Expands a description into production rules.
///
/// `|` alternatives become separate rules with the same lhs. An array
/// description `A -> element [separator] $0_or_more` becomes the rules
/// `A -> `, `A -> element` and `A -> element [separator] element`, the
/// last one flagged `IS_ARRAY`; `$1_or_more` omits the empty rule.
pub fn create_production_rules<S: AsRef<str>>(description: &[S]) -> Vec<ProductionRule> {
    let mut production_rules = Vec::new();

    for line in description {
        let mut words = line.as_ref().split_whitespace();
        let (Some(lhs), Some("->")) = (words.next(), words.next()) else {
            continue;
        };

        let mut rhs = Vec::new();
        let mut marker = None;
        for word in words {
            match word {
                ALTERNATIVE => {
                    push_rules(&mut production_rules, lhs, std::mem::take(&mut rhs), marker);
                    marker = None;
                }
                ZERO_OR_MORE => marker = Some(ArrayMarker::ZeroOrMore),
                ONE_OR_MORE => marker = Some(ArrayMarker::OneOrMore),
                SINGLE_OR => rhs.push(ALTERNATIVE.to_owned()),
                _ => rhs.push(word.to_owned()),
            }
        }
        push_rules(&mut production_rules, lhs, rhs, marker);
    }

    production_rules
}

fn push_rules(
    production_rules: &mut Vec<ProductionRule>,
    lhs: &str,
    rhs: Vec<String>,
    marker: Option<ArrayMarker>,
) {
    let Some(marker) = marker else {
        production_rules.push(ProductionRule::new(lhs, rhs, ProductionRuleFlags::empty()));
        return;
    };

    let Some(element) = rhs.first().cloned() else {
        production_rules.push(ProductionRule::new(lhs, rhs, ProductionRuleFlags::empty()));
        return;
    };

    if marker == ArrayMarker::ZeroOrMore {
        production_rules.push(ProductionRule::new(
            lhs,
            Vec::new(),
            ProductionRuleFlags::IS_ARRAY_SET,
        ));
    }
    production_rules.push(ProductionRule::new(
        lhs,
        vec![element.clone()],
        ProductionRuleFlags::IS_ARRAY_SET,
    ));

    let repeated = match rhs.get(1) {
        Some(separator) => vec![element.clone(), separator.clone(), element],
        None => vec![element.clone(), element],
    };
    production_rules.push(ProductionRule::new(
        lhs,
        repeated,
        ProductionRuleFlags::IS_ARRAY | ProductionRuleFlags::IS_ARRAY_SET,
    ));
}

/// Indices of the rules derived from `lhs`. Rules of one lhs are contiguous
/// when they come from consecutive description lines.
pub fn find_production_rules(production_rules: &[ProductionRule], lhs: &str) -> Range<usize> {
    let Some(start) = production_rules.iter().position(|rule| rule.lhs == lhs) else {
        return 0..0;
    };
    let length = production_rules[start..]
        .iter()
        .take_while(|rule| rule.lhs == lhs)
        .count();
    start..start + length
}

/// Every lhs, in order of first appearance.
pub fn get_non_terminals(production_rules: &[ProductionRule]) -> Vec<String> {
    let mut seen = FxHashSet::default();
    production_rules
        .iter()
        .filter(|rule| seen.insert(rule.lhs.as_str()))
        .map(|rule| rule.lhs.clone())
        .collect()
}

/// Every rhs label that is not a non-terminal, plus the end marker `$`,
/// sorted.
pub fn get_terminals(production_rules: &[ProductionRule], non_terminals: &[String]) -> Vec<String> {
    let non_terminals: FxHashSet<&str> = non_terminals.iter().map(String::as_str).collect();
    let mut terminals: Vec<String> = production_rules
        .iter()
        .flat_map(|rule| rule.rhs.iter())
        .filter(|label| !non_terminals.contains(label.as_str()))
        .cloned()
        .chain(std::iter::once(END_OF_INPUT.to_owned()))
        .collect();
    terminals.sort();
    terminals.dedup();
    terminals
}

pub fn create_array_infos(production_rules: &[ProductionRule]) -> FxHashMap<String, ArrayInfo> {
    production_rules
        .iter()
        .filter(|rule| rule.flags.contains(ProductionRuleFlags::IS_ARRAY))
        .filter_map(|rule| {
            let element_label = rule.rhs.first()?.clone();
            let separator_label = (rule.rhs.len() == 3).then(|| rule.rhs[1].clone());
            Some((
                rule.lhs.clone(),
                ArrayInfo {
                    element_label,
                    separator_label,
                },
            ))
        })
        .collect()
}

/// Token class of a leaf: `comment`, `string`, `boolean`, `number` or
/// `identifier`. Keywords and punctuation are matched by their text before
/// the class is consulted.
pub fn classify_terminal(value: &str) -> &'static str {
    let mut characters = value.chars();
    let first = characters.next();
    if value.starts_with("//") {
        "comment"
    } else if first == Some('"') {
        "string"
    } else if value == "true" || value == "false" {
        "boolean"
    } else if first.is_some_and(|c| c.is_ascii_digit())
        || (first == Some('-') && characters.next().is_some_and(|c| c.is_ascii_digit()))
    {
        "number"
    } else {
        "identifier"
    }
}

#[derive(Clone, Debug)]
pub struct Grammar {
    production_rules: Vec<ProductionRule>,
    non_terminals: Vec<String>,
    terminals: Vec<String>,
    array_infos: FxHashMap<String, ArrayInfo>,
    rule_indices: FxHashMap<String, SmallVec<[usize; 4]>>,
}

impl Grammar {
    pub fn from_description<S: AsRef<str>>(description: &[S]) -> Self {
        let production_rules = create_production_rules(description);
        let non_terminals = get_non_terminals(&production_rules);
        let terminals = get_terminals(&production_rules, &non_terminals);
        let array_infos = create_array_infos(&production_rules);

        let mut rule_indices: FxHashMap<String, SmallVec<[usize; 4]>> = FxHashMap::default();
        for (index, rule) in production_rules.iter().enumerate() {
            rule_indices.entry(rule.lhs.clone()).or_default().push(index);
        }

        Grammar {
            production_rules,
            non_terminals,
            terminals,
            array_infos,
            rule_indices,
        }
    }

    /// The grammar of `default_description`.
    pub fn default_grammar() -> Self {
        Self::from_description(default_description())
    }

    #[inline]
    pub fn production_rules(&self) -> &[ProductionRule] {
        &self.production_rules
    }

    #[inline]
    pub fn production_rule(&self, index: usize) -> Option<&ProductionRule> {
        self.production_rules.get(index)
    }

    pub fn non_terminals(&self) -> &[String] {
        &self.non_terminals
    }

    pub fn terminals(&self) -> &[String] {
        &self.terminals
    }

    pub fn array_info(&self, lhs: &str) -> Option<&ArrayInfo> {
        self.array_infos.get(lhs)
    }

    /// Indices of every rule deriving `lhs`.
    pub fn rule_indices(&self, lhs: &str) -> &[usize] {
        self.rule_indices.get(lhs).map_or(&[], |indices| indices.as_slice())
    }

    pub fn is_non_terminal(&self, label: &str) -> bool {
        self.rule_indices.contains_key(label)
    }

    /// The rule deriving a `label` node with `children`, if any.
    pub fn choose_production_rule(&self, label: &str, children: &[Node]) -> Option<usize> {
        self.rule_indices(label)
            .iter()
            .copied()
            .find(|&index| self.matches_production_rule(index, children))
    }

    pub fn matches_production_rule(&self, index: usize, children: &[Node]) -> bool {
        let Some(rule) = self.production_rules.get(index) else {
            return false;
        };

        if !rule.flags.contains(ProductionRuleFlags::IS_ARRAY) {
            return rule.rhs.len() == children.len()
                && rule
                    .rhs
                    .iter()
                    .zip(children)
                    .all(|(label, child)| self.matches_label(label, child));
        }

        let Some(info) = self.array_infos.get(&rule.lhs) else {
            return false;
        };
        if children.len() < 2 {
            return false;
        }
        match &info.separator_label {
            Some(separator) => {
                children.len() % 2 == 1
                    && children.iter().enumerate().all(|(index, child)| {
                        let label = if index % 2 == 0 {
                            &info.element_label
                        } else {
                            separator
                        };
                        self.matches_label(label, child)
                    })
            }
            None => children
                .iter()
                .all(|child| self.matches_label(&info.element_label, child)),
        }
    }

    fn matches_label(&self, label: &str, node: &Node) -> bool {
        if node.is_leaf() {
            !self.is_non_terminal(label)
                && (node.label() == label || classify_terminal(node.label()) == label)
        } else {
            node.label() == label
        }
    }

    /// Position of the first node, in pre-order, whose rule index does not
    /// derive its label and children.
    pub fn find_nonconforming_node(&self, root: &Node) -> Option<Vec<usize>> {
        let mut stack: Vec<(&Node, Vec<usize>)> = vec![(root, Vec::new())];
        while let Some((node, position)) = stack.pop() {
            let Some(index) = node.production_rule_index else {
                continue;
            };
            let derives_node = self
                .production_rules
                .get(index)
                .is_some_and(|rule| rule.lhs == node.label())
                && self.matches_production_rule(index, &node.children);
            if !derives_node {
                return Some(position);
            }
            for (child_index, child) in node.children.iter().enumerate().rev() {
                let mut child_position = position.clone();
                child_position.push(child_index);
                stack.push((child, child_position));
            }
        }
        None
    }
}

//! H parse tree.
//!
//! The concrete tree produced by the external parser, as far as the semantic
//! core needs it:
//! - `Node`/`Word`: a labelled tree whose leaves are tokens
//! - positions: child-index paths from the root, plus the navigation
//!   helpers the convertor and the analysis engine use
//! - `Grammar`: production rules built from a textual description, used to
//!   label emitted nodes with the rule that derives them
//!
//! Non-leaf nodes carry their grammar label in `word.value` and the index of
//! the production rule that derived them. Leaves carry the token text and no
//! rule index.

pub mod grammar;
mod node;

pub use grammar::{
    classify_terminal, create_array_infos, create_production_rules, find_production_rules,
    get_non_terminals, get_terminals, ArrayInfo, Grammar, ProductionRule, ProductionRuleFlags,
};
pub use node::{
    find_descendant_position_if, find_descendants_if, find_node_common_root,
    get_ancestor_with_name, get_first_ancestor_with_name, get_node_at_position,
    get_parent_position, get_terminal_value, is_valid_position, iter_leaves, Leaves, Node,
    NodeAt, Word,
};

//! Conversion errors.

use thiserror::Error;

/// Conversion error types.
#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum ConvertError {
    /// A node lacks a child its production rule always has.
    #[error("`{parent}` node has no `{expected}` child")]
    MissingChild {
        parent: String,
        expected: &'static str,
    },
    /// A node carries a label the reader cannot handle at that place.
    #[error("expected `{expected}`, found `{found}`")]
    UnexpectedLabel {
        expected: &'static str,
        found: String,
    },
    /// A literal leaf whose text or suffix is not a valid constant.
    #[error("invalid constant `{0}`")]
    InvalidConstant(String),
    /// The grammar has no rule deriving an emitted node.
    #[error("no production rule derives `{label}` from [{}]", .children.join(" "))]
    MissingProductionRule {
        label: String,
        children: Vec<String>,
    },
    /// An IR value the concrete syntax has no form for.
    #[error("{0} cannot be written as a parse tree")]
    Unrenderable(&'static str),
    /// The tree root is not a `Module` with a `Module_head`.
    #[error("parse tree has no module head")]
    MissingModuleHead,
    /// Failure while reading one declaration of the module body.
    #[error("declaration {index}: {error}")]
    InDeclaration {
        index: usize,
        error: Box<ConvertError>,
    },
}

impl ConvertError {
    pub(crate) fn missing_child(parent: &str, expected: &'static str) -> Self {
        Self::MissingChild {
            parent: parent.to_owned(),
            expected,
        }
    }

    pub(crate) fn unexpected_label(expected: &'static str, found: &str) -> Self {
        Self::UnexpectedLabel {
            expected,
            found: found.to_owned(),
        }
    }
}

pub type ConvertResult<T> = Result<T, ConvertError>;

//! Binary and Unary Operations
//!
//! All operation kinds used in expressions, with their source-level symbols.

/// Binary operations.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOperation {
    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulus,

    // Comparison
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqualTo,
    GreaterThan,
    GreaterThanOrEqualTo,

    // Logical
    LogicalAnd,
    LogicalOr,

    // Bitwise
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    BitShiftLeft,
    BitShiftRight,

    /// Flag test on enum values.
    Has,
}

impl BinaryOperation {
    pub const ALL: [BinaryOperation; 19] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Modulus,
        Self::Equal,
        Self::NotEqual,
        Self::LessThan,
        Self::LessThanOrEqualTo,
        Self::GreaterThan,
        Self::GreaterThanOrEqualTo,
        Self::LogicalAnd,
        Self::LogicalOr,
        Self::BitwiseAnd,
        Self::BitwiseOr,
        Self::BitwiseXor,
        Self::BitShiftLeft,
        Self::BitShiftRight,
        Self::Has,
    ];

    /// Returns the source-level symbol for this operation.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulus => "%",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::LessThan => "<",
            Self::LessThanOrEqualTo => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqualTo => ">=",
            Self::LogicalAnd => "&&",
            Self::LogicalOr => "||",
            Self::BitwiseAnd => "&",
            Self::BitwiseOr => "|",
            Self::BitwiseXor => "^",
            Self::BitShiftLeft => "<<",
            Self::BitShiftRight => ">>",
            Self::Has => "has",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|operation| operation.as_symbol() == symbol)
    }

    /// Symbol of the compound assignment using this operation (`+=`, `<<=`, ...).
    ///
    /// Comparison, logical and `has` operations have no compound form.
    pub const fn assignment_symbol(self) -> Option<&'static str> {
        match self {
            Self::Add => Some("+="),
            Self::Subtract => Some("-="),
            Self::Multiply => Some("*="),
            Self::Divide => Some("/="),
            Self::Modulus => Some("%="),
            Self::BitwiseAnd => Some("&="),
            Self::BitwiseOr => Some("|="),
            Self::BitwiseXor => Some("^="),
            Self::BitShiftLeft => Some("<<="),
            Self::BitShiftRight => Some(">>="),
            _ => None,
        }
    }

    pub fn from_assignment_symbol(symbol: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|operation| operation.assignment_symbol() == Some(symbol))
    }

    /// Whether the operation always yields `Bool`, whatever its operand types.
    pub const fn yields_boolean(self) -> bool {
        matches!(
            self,
            Self::Equal
                | Self::NotEqual
                | Self::LessThan
                | Self::LessThanOrEqualTo
                | Self::GreaterThan
                | Self::GreaterThanOrEqualTo
                | Self::LogicalAnd
                | Self::LogicalOr
                | Self::Has
        )
    }
}

/// Unary operations.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum UnaryOperation {
    Not,
    BitwiseNot,
    Minus,
    PreIncrement,
    PostIncrement,
    PreDecrement,
    PostDecrement,
    /// Pointer dereference (`*value`).
    Indirection,
    /// Take the address of a value (`&value`).
    AddressOf,
}

impl UnaryOperation {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Not => "!",
            Self::BitwiseNot => "~",
            Self::Minus => "-",
            Self::PreIncrement | Self::PostIncrement => "++",
            Self::PreDecrement | Self::PostDecrement => "--",
            Self::Indirection => "*",
            Self::AddressOf => "&",
        }
    }

    /// Postfix operations are written after their operand.
    pub const fn is_postfix(self) -> bool {
        matches!(self, Self::PostIncrement | Self::PostDecrement)
    }

    pub fn from_prefix_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "!" => Some(Self::Not),
            "~" => Some(Self::BitwiseNot),
            "-" => Some(Self::Minus),
            "++" => Some(Self::PreIncrement),
            "--" => Some(Self::PreDecrement),
            "*" => Some(Self::Indirection),
            "&" => Some(Self::AddressOf),
            _ => None,
        }
    }

    pub fn from_postfix_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "++" => Some(Self::PostIncrement),
            "--" => Some(Self::PostDecrement),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_binary_symbols_are_unique() {
        for operation in BinaryOperation::ALL {
            assert_eq!(
                BinaryOperation::from_symbol(operation.as_symbol()),
                Some(operation)
            );
        }
    }

    #[test]
    fn test_assignment_symbols() {
        assert_eq!(
            BinaryOperation::from_assignment_symbol("<<="),
            Some(BinaryOperation::BitShiftLeft)
        );
        assert_eq!(BinaryOperation::from_assignment_symbol("=="), None);
        assert_eq!(BinaryOperation::Equal.assignment_symbol(), None);
    }

    #[test]
    fn test_unary_prefix_and_postfix() {
        assert_eq!(
            UnaryOperation::from_prefix_symbol("++"),
            Some(UnaryOperation::PreIncrement)
        );
        assert_eq!(
            UnaryOperation::from_postfix_symbol("++"),
            Some(UnaryOperation::PostIncrement)
        );
        assert!(UnaryOperation::PostDecrement.is_postfix());
        assert!(!UnaryOperation::AddressOf.is_postfix());
    }
}

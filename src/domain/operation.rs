// ============================================================================
// Operation
// Tag selecting the operator algorithm
// ============================================================================

use crate::numeric::NumericError;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Arithmetic operation applied pairwise along a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    /// Remainder
    Mod,
}

impl Operation {
    /// Every supported operation, in tag order
    pub const ALL: [Operation; 5] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
        Operation::Mod,
    ];

    /// Textual tag accepted by [`FromStr`].
    pub const fn as_str(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
            Operation::Mod => "mod",
        }
    }

    /// Whether operand order can be swapped without changing the result.
    pub const fn is_commutative(&self) -> bool {
        matches!(self, Operation::Add | Operation::Multiply)
    }
}

impl FromStr for Operation {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Operation::Add),
            "subtract" => Ok(Operation::Subtract),
            "multiply" => Ok(Operation::Multiply),
            "divide" => Ok(Operation::Divide),
            "mod" => Ok(Operation::Mod),
            other => Err(NumericError::UnsupportedOperation(other.to_string())),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

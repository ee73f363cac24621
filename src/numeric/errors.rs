// ============================================================================
// Numeric Errors
// Error types for decomposition, operator evaluation and chain reduction
// ============================================================================

use std::fmt;

/// Errors that can occur while decomposing operands or reducing a chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Mantissa or scale left the representable range
    Overflow,
    /// NaN or infinity reached a step that needs a finite value
    NonFinite,
    /// Operand literal could not be parsed
    InvalidOperand(String),
    /// Operation tag is not one of add/subtract/multiply/divide/mod
    UnsupportedOperation(String),
    /// Divide kept re-expressing itself past the configured depth
    DivisionRetryLimit { depth: u8 },
    /// An uninitialized chain was given no operand to seed from
    EmptyChain,
    /// Engine configuration rejected by validation
    InvalidConfig(String),
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::Overflow => {
                write!(f, "arithmetic overflow: mantissa or scale out of range")
            },
            NumericError::NonFinite => write!(f, "non-finite value cannot be decomposed"),
            NumericError::InvalidOperand(raw) => write!(f, "invalid operand: {:?}", raw),
            NumericError::UnsupportedOperation(tag) => {
                write!(f, "unsupported operation: {:?}", tag)
            },
            NumericError::DivisionRetryLimit { depth } => write!(
                f,
                "division retry limit exceeded after {} re-expressions",
                depth
            ),
            NumericError::EmptyChain => write!(f, "chain has no operand to seed from"),
            NumericError::InvalidConfig(reason) => write!(f, "invalid configuration: {}", reason),
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;

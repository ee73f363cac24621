// ============================================================================
// Numeric Module
// Exact decimal representation of binary floating-point operands
// ============================================================================
//
// This module provides:
// - DecimalValue: mantissa / 10^decimals pair and the f64 decomposer
// - ScaledFloat: the same split in f64 for values past the i128 range
// - Normalizer: plain fixed-point rendering, never scientific notation
// - NumericError: Error types shared by the whole crate
//
// Design principles:
// - Arithmetic on mantissas happens in i128; f64 only once that overflows
// - All fallible steps return Result (no panics)
// - Conversion back to f64 goes through correctly rounded parsing

mod decimal_value;
mod errors;
pub mod normalizer;
mod scaled_float;

pub use decimal_value::{pow10, DecimalValue, MAX_DECIMALS};
pub use errors::{NumericError, NumericResult};
pub use normalizer::to_plain_string;
pub use scaled_float::{pow10_f64, ScaledFloat};

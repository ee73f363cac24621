// ============================================================================
// Domain Models Module
// Operands, operation tags, chain state and engine configuration
// ============================================================================

pub mod accumulator;
pub mod config;
pub mod operand;
pub mod operation;

pub use accumulator::{ChainAccumulator, ChainId};
pub use config::{EngineConfig, SubtractMode, DEFAULT_DIVIDE_DEPTH, MAX_DIVIDE_DEPTH};
pub use operand::{Operand, PERCENT_MARKER};
pub use operation::Operation;

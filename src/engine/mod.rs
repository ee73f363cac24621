// ============================================================================
// Engine Module
// Operator algorithms, percent resolution and the chain reducer
// ============================================================================

mod chain;
mod operator_engine;
mod percent;
mod scaled;

pub mod factory;

pub use chain::{compute_chain, compute_chain_tagged, Chain};
pub use factory::{create_from_config, ChainBuilder};
pub use operator_engine::OperatorEngine;

// ============================================================================
// Decimal Chain Library
// Exact decimal arithmetic on f64 operands through integer mantissas
// ============================================================================

//! # Decimal Chain
//!
//! Elementary decimal arithmetic without binary rounding noise.
//!
//! Every operand is decomposed into an integer mantissa and a power-of-ten
//! scale, the operation runs on the integers, and the exact result is
//! converted back to the nearest `f64` once.
//!
//! ## Features
//!
//! - **Exact add/subtract/multiply/divide/mod** for operands with a bounded
//!   number of significant decimal digits
//! - **Percent operands** (`"50%"`) resolved through the engine's own divide
//! - **Fluent chains** that left-fold operand sequences with a persistent
//!   accumulator owned by the caller
//! - **Event hooks** for logging and auditing each fold step
//!
//! ## Example
//!
//! ```rust
//! use decimal_chain::prelude::*;
//!
//! // 0.1 + 0.2 without the trailing ...04
//! assert_eq!(compute_chain([0.1, 0.2], Operation::Add).unwrap(), 0.3);
//!
//! // Percent literals
//! let ops = Operand::parse_all(["50%", "200"]).unwrap();
//! assert_eq!(compute_chain(&ops, Operation::Multiply).unwrap(), 100.0);
//!
//! // A chain keeps its running value between calls
//! let mut chain = Chain::default();
//! chain.add([1.1, 2.2]).unwrap();
//! assert_eq!(chain.multiply([3]).unwrap(), 9.9);
//! ```

pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod numeric;
pub mod utils;

pub use engine::{compute_chain, compute_chain_tagged};

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        ChainAccumulator, ChainId, EngineConfig, Operand, Operation, SubtractMode,
    };
    pub use crate::engine::{
        compute_chain, compute_chain_tagged, create_from_config, Chain, ChainBuilder,
        OperatorEngine,
    };
    pub use crate::interfaces::{
        ChainEvent, EventHandler, LoggingEventHandler, NoOpEventHandler, RecordingEventHandler,
    };
    pub use crate::numeric::{DecimalValue, NumericError, NumericResult};
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use std::sync::Arc;

    #[test]
    fn test_end_to_end_chain() {
        let recorder = Arc::new(RecordingEventHandler::new());
        let mut chain = ChainBuilder::new()
            .with_event_handler(recorder.clone())
            .build()
            .unwrap();

        // Seed and fold
        assert_eq!(chain.add([0.1, 0.2, 0.3]).unwrap(), 0.6);

        // Fold a percent operand onto the running value
        let tenth = "10%".parse::<Operand>().unwrap();
        assert_eq!(chain.multiply([tenth]).unwrap(), 0.06);

        // Restart from a new base
        assert_eq!(chain.divide([1.21, 1.1]).unwrap(), 1.1);

        let events = recorder.take();
        assert!(events
            .iter()
            .any(|e| matches!(e, ChainEvent::Seeded { .. })));
        assert!(events
            .iter()
            .any(|e| matches!(e, ChainEvent::Reseeded { .. })));
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, ChainEvent::Completed { .. }))
                .count(),
            3
        );
    }

    #[test]
    fn test_classic_float_noise_cases() {
        let cases: [(f64, f64, Operation, f64); 6] = [
            (0.1, 0.2, Operation::Add, 0.3),
            (0.7, 0.1, Operation::Add, 0.8),
            (1.1, 3.0, Operation::Multiply, 3.3),
            (0.57, 100.0, Operation::Multiply, 57.0),
            (1.21, 1.1, Operation::Divide, 1.1),
            (0.3, 0.2, Operation::Subtract, 0.1),
        ];

        for (lhs, rhs, operation, expected) in cases {
            assert_eq!(
                compute_chain([lhs, rhs], operation).unwrap(),
                expected,
                "{lhs} {operation} {rhs}"
            );
        }
    }

    #[test]
    fn test_decimal_boundary() {
        let engine = OperatorEngine::default();
        let value = engine.decompose(&Operand::from(19.99)).unwrap();
        assert_eq!(value.to_decimal().unwrap().to_string(), "19.99");
    }
}

// ============================================================================
// Chain Reducer
// Left-folds operand sequences through the operator engine
// ============================================================================

use super::operator_engine::OperatorEngine;
use crate::domain::{ChainAccumulator, ChainId, Operand, Operation};
use crate::interfaces::{ChainEvent, EventHandler, NoOpEventHandler};
use crate::numeric::{NumericError, NumericResult};
use chrono::Utc;
use smallvec::SmallVec;
use std::sync::Arc;

/// Operand sequences up to this length stay on the stack
const INLINE_OPERANDS: usize = 8;

/// A fluent arithmetic chain with its own accumulator.
///
/// The first call seeds the accumulator from its first operand. Later
/// calls with more than one operand reseed from their first operand;
/// single-operand calls fold onto the running value.
///
/// # Example
/// ```
/// use decimal_chain::prelude::*;
///
/// let mut chain = Chain::default();
/// assert_eq!(chain.add([0.1, 0.2]).unwrap(), 0.3);
/// assert_eq!(chain.multiply([3.0]).unwrap(), 0.9);
/// // Two operands restart from a new base
/// assert_eq!(chain.add([1.0, 0.25]).unwrap(), 1.25);
/// ```
pub struct Chain {
    id: ChainId,
    engine: OperatorEngine,
    accumulator: ChainAccumulator,
    event_handler: Arc<dyn EventHandler>,
}

impl Chain {
    /// Create an uninitialized chain
    pub fn new(engine: OperatorEngine, event_handler: Arc<dyn EventHandler>) -> Self {
        Self {
            id: ChainId::new(),
            engine,
            accumulator: ChainAccumulator::new(),
            event_handler,
        }
    }

    pub fn id(&self) -> ChainId {
        self.id
    }

    pub fn engine(&self) -> &OperatorEngine {
        &self.engine
    }

    pub fn accumulator(&self) -> &ChainAccumulator {
        &self.accumulator
    }

    /// Current value, `None` before the first call.
    pub fn value(&self) -> NumericResult<Option<f64>> {
        self.accumulator
            .value()
            .map(|operand| self.engine.resolve(&operand))
            .transpose()
    }

    /// Forget the running value; the next call seeds again.
    pub fn reset(&mut self) {
        self.accumulator.clear();
    }

    /// Seed the accumulator without folding, replacing any running value.
    pub fn seed(&mut self, operand: impl Into<Operand>) {
        let seed = operand.into();
        let event = match self.accumulator.seed(seed) {
            Some(previous) => {
                tracing::debug!(chain_id = %self.id, %seed, %previous, "chain reseeded");
                ChainEvent::Reseeded {
                    chain_id: self.id,
                    previous: Some(previous),
                    seed,
                    timestamp: Utc::now(),
                }
            },
            None => {
                tracing::debug!(chain_id = %self.id, %seed, "chain seeded");
                ChainEvent::Seeded {
                    chain_id: self.id,
                    seed,
                    timestamp: Utc::now(),
                }
            },
        };
        self.event_handler.on_event(event);
    }

    /// Reduce `operands` with `operation` and return the new running value.
    ///
    /// # Errors
    /// - `EmptyChain` if the chain is uninitialized and `operands` is empty
    /// - any error of [`OperatorEngine::evaluate`]; the accumulator then
    ///   keeps its seed but none of the partial fold
    pub fn compute<I, T>(&mut self, operands: I, operation: Operation) -> NumericResult<f64>
    where
        I: IntoIterator<Item = T>,
        T: Into<Operand>,
    {
        let operands: SmallVec<[Operand; INLINE_OPERANDS]> =
            operands.into_iter().map(Into::into).collect();

        let mut events = Vec::new();
        let outcome = self.reduce(&operands, operation, &mut events);
        self.event_handler.on_events(events);
        outcome
    }

    /// Same as [`compute`](Self::compute) with a textual operation tag.
    ///
    /// # Errors
    /// Returns `UnsupportedOperation` for tags other than
    /// `add`, `subtract`, `multiply`, `divide` and `mod`.
    pub fn compute_tagged<I, T>(&mut self, operands: I, tag: &str) -> NumericResult<f64>
    where
        I: IntoIterator<Item = T>,
        T: Into<Operand>,
    {
        let operation = tag.parse::<Operation>()?;
        self.compute(operands, operation)
    }

    fn reduce(
        &mut self,
        operands: &[Operand],
        operation: Operation,
        events: &mut Vec<ChainEvent>,
    ) -> NumericResult<f64> {
        let mut rest = operands;

        if !self.accumulator.is_initialized() {
            let (seed, tail) = rest.split_first().ok_or(NumericError::EmptyChain)?;
            self.accumulator.seed(*seed);
            tracing::debug!(chain_id = %self.id, %seed, "chain seeded");
            events.push(ChainEvent::Seeded {
                chain_id: self.id,
                seed: *seed,
                timestamp: Utc::now(),
            });
            rest = tail;
        } else if let [seed, tail @ ..] = rest {
            if !tail.is_empty() {
                let previous = self.accumulator.seed(*seed);
                tracing::debug!(chain_id = %self.id, %seed, ?previous, "chain reseeded");
                events.push(ChainEvent::Reseeded {
                    chain_id: self.id,
                    previous,
                    seed: *seed,
                    timestamp: Utc::now(),
                });
                rest = tail;
            }
        }

        let mut current = self.accumulator.value().ok_or(NumericError::EmptyChain)?;

        for next in rest {
            let result = self.engine.evaluate(&current, next, operation)?;
            events.push(ChainEvent::Folded {
                chain_id: self.id,
                operation,
                lhs: current,
                rhs: *next,
                result,
                timestamp: Utc::now(),
            });
            current = Operand::Number(result);
        }

        let result = self.engine.resolve(&current)?;
        self.accumulator.store(result);

        tracing::debug!(chain_id = %self.id, %operation, result, "chain reduced");
        events.push(ChainEvent::Completed {
            chain_id: self.id,
            operation,
            result,
            timestamp: Utc::now(),
        });

        Ok(result)
    }

    // ========================================================================
    // Fluent Operations
    // ========================================================================

    pub fn add<I, T>(&mut self, operands: I) -> NumericResult<f64>
    where
        I: IntoIterator<Item = T>,
        T: Into<Operand>,
    {
        self.compute(operands, Operation::Add)
    }

    pub fn subtract<I, T>(&mut self, operands: I) -> NumericResult<f64>
    where
        I: IntoIterator<Item = T>,
        T: Into<Operand>,
    {
        self.compute(operands, Operation::Subtract)
    }

    pub fn multiply<I, T>(&mut self, operands: I) -> NumericResult<f64>
    where
        I: IntoIterator<Item = T>,
        T: Into<Operand>,
    {
        self.compute(operands, Operation::Multiply)
    }

    pub fn divide<I, T>(&mut self, operands: I) -> NumericResult<f64>
    where
        I: IntoIterator<Item = T>,
        T: Into<Operand>,
    {
        self.compute(operands, Operation::Divide)
    }

    /// Remainder; named to avoid clashing with the `mod` keyword
    pub fn modulo<I, T>(&mut self, operands: I) -> NumericResult<f64>
    where
        I: IntoIterator<Item = T>,
        T: Into<Operand>,
    {
        self.compute(operands, Operation::Mod)
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::new(OperatorEngine::default(), Arc::new(NoOpEventHandler))
    }
}

impl std::fmt::Debug for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chain")
            .field("id", &self.id)
            .field("engine", &self.engine)
            .field("accumulator", &self.accumulator)
            .finish()
    }
}

// ============================================================================
// One-shot Entry Points
// ============================================================================

/// Reduce `operands` with `operation` on a fresh chain.
///
/// # Example
/// ```
/// use decimal_chain::prelude::*;
///
/// assert_eq!(compute_chain([0.1, 0.2], Operation::Add).unwrap(), 0.3);
///
/// let ops = Operand::parse_all(["50%", "200"]).unwrap();
/// assert_eq!(compute_chain(&ops, Operation::Multiply).unwrap(), 100.0);
/// ```
pub fn compute_chain<I, T>(operands: I, operation: Operation) -> NumericResult<f64>
where
    I: IntoIterator<Item = T>,
    T: Into<Operand>,
{
    Chain::default().compute(operands, operation)
}

/// [`compute_chain`] with a textual operation tag.
///
/// # Errors
/// Returns `UnsupportedOperation` for unknown tags.
pub fn compute_chain_tagged<I, T>(operands: I, tag: &str) -> NumericResult<f64>
where
    I: IntoIterator<Item = T>,
    T: Into<Operand>,
{
    Chain::default().compute_tagged(operands, tag)
}

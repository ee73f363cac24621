// ============================================================================
// Event Handler Interface
// Defines the contract for observing chain reductions
// ============================================================================

use crate::domain::{ChainId, Operand, Operation};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Events emitted while a chain reduces its operands
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ChainEvent {
    /// First operand became the base of an uninitialized chain
    Seeded {
        chain_id: ChainId,
        seed: Operand,
        timestamp: DateTime<Utc>,
    },

    /// A new seed replaced the existing base
    Reseeded {
        chain_id: ChainId,
        previous: Option<Operand>,
        seed: Operand,
        timestamp: DateTime<Utc>,
    },

    /// One binary step of the left fold
    Folded {
        chain_id: ChainId,
        operation: Operation,
        lhs: Operand,
        rhs: Operand,
        result: f64,
        timestamp: DateTime<Utc>,
    },

    /// Reduction finished
    Completed {
        chain_id: ChainId,
        operation: Operation,
        result: f64,
        timestamp: DateTime<Utc>,
    },
}

impl ChainEvent {
    pub fn chain_id(&self) -> ChainId {
        match self {
            ChainEvent::Seeded { chain_id, .. }
            | ChainEvent::Reseeded { chain_id, .. }
            | ChainEvent::Folded { chain_id, .. }
            | ChainEvent::Completed { chain_id, .. } => *chain_id,
        }
    }
}

/// Event handler trait for processing chain events
/// Implementations can handle logging, auditing, metrics, etc.
pub trait EventHandler: Send + Sync {
    /// Handle a chain event
    fn on_event(&self, event: ChainEvent);

    /// Batch event handler (optional optimization)
    fn on_events(&self, events: Vec<ChainEvent>) {
        for event in events {
            self.on_event(event);
        }
    }
}

/// No-op event handler
pub struct NoOpEventHandler;

impl EventHandler for NoOpEventHandler {
    fn on_event(&self, _event: ChainEvent) {
        // Do nothing
    }
}

/// Logging event handler
pub struct LoggingEventHandler;

impl EventHandler for LoggingEventHandler {
    fn on_event(&self, event: ChainEvent) {
        tracing::debug!("Chain event: {:?}", event);
    }
}

/// Keeps every event in memory, in arrival order
#[derive(Default)]
pub struct RecordingEventHandler {
    events: Mutex<Vec<ChainEvent>>,
}

impl RecordingEventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded events
    pub fn events(&self) -> Vec<ChainEvent> {
        self.events.lock().clone()
    }

    /// Drain recorded events
    pub fn take(&self) -> Vec<ChainEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventHandler for RecordingEventHandler {
    fn on_event(&self, event: ChainEvent) {
        self.events.lock().push(event);
    }

    fn on_events(&self, events: Vec<ChainEvent>) {
        self.events.lock().extend(events);
    }
}

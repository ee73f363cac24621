// ============================================================================
// Chain Accumulator
// Per-chain running value and its identity
// ============================================================================

use super::operand::Operand;
use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChainId(Uuid);

impl ChainId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ChainId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Running value of one chain.
///
/// Starts uninitialized. The first seed marks it initialized; afterwards
/// it is only reseeded or overwritten with fold results.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChainAccumulator {
    value: Option<Operand>,
    initialized: bool,
}

impl ChainAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    #[inline]
    pub fn value(&self) -> Option<Operand> {
        self.value
    }

    /// Replace the base value and mark the accumulator initialized.
    /// Returns the previous value.
    pub fn seed(&mut self, operand: Operand) -> Option<Operand> {
        self.initialized = true;
        self.value.replace(operand)
    }

    /// Store a folded result.
    pub fn store(&mut self, value: f64) {
        self.value = Some(Operand::Number(value));
    }

    /// Back to the uninitialized state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let mut acc = ChainAccumulator::new();
        assert!(!acc.is_initialized());
        assert_eq!(acc.value(), None);

        assert_eq!(acc.seed(Operand::Percent(50.0)), None);
        assert!(acc.is_initialized());
        assert_eq!(acc.value(), Some(Operand::Percent(50.0)));

        acc.store(0.3);
        assert_eq!(acc.value(), Some(Operand::Number(0.3)));

        assert_eq!(acc.seed(Operand::Number(1.0)), Some(Operand::Number(0.3)));

        acc.clear();
        assert!(!acc.is_initialized());
        assert_eq!(acc.value(), None);
    }

    #[test]
    fn test_chain_ids_are_unique() {
        assert_ne!(ChainId::new(), ChainId::new());
        let uuid = Uuid::new_v4();
        assert_eq!(ChainId::from_uuid(uuid).as_uuid(), &uuid);
    }
}

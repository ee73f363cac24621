// ============================================================================
// Chain Factory
// Creates chains with validated engine configuration
// ============================================================================

use crate::domain::{EngineConfig, Operand, SubtractMode};
use crate::engine::{Chain, OperatorEngine};
use crate::interfaces::{EventHandler, NoOpEventHandler};
use crate::numeric::NumericResult;
use std::sync::Arc;

// ============================================================================
// Factory Functions
// ============================================================================

/// Creates an uninitialized chain from configuration
///
/// # Example
/// ```
/// use decimal_chain::prelude::*;
/// use std::sync::Arc;
///
/// let mut chain = create_from_config(EngineConfig::corrected(), Arc::new(NoOpEventHandler)).unwrap();
/// assert_eq!(chain.subtract([1.0, 0.5]).unwrap(), 0.5);
/// ```
pub fn create_from_config(
    config: EngineConfig,
    event_handler: Arc<dyn EventHandler>,
) -> NumericResult<Chain> {
    let engine = OperatorEngine::new(config)?;
    Ok(Chain::new(engine, event_handler))
}

// ============================================================================
// Builder Pattern for Advanced Configuration
// ============================================================================

/// Builder for creating chains with fluent API
///
/// # Example
/// ```
/// use decimal_chain::prelude::*;
/// use std::sync::Arc;
///
/// let mut chain = ChainBuilder::new()
///     .corrected_subtract()
///     .with_max_divide_depth(2)
///     .with_event_handler(Arc::new(LoggingEventHandler))
///     .with_seed(10)
///     .build()
///     .unwrap();
///
/// assert_eq!(chain.divide([4]).unwrap(), 2.5);
/// ```
pub struct ChainBuilder {
    config: EngineConfig,
    event_handler: Arc<dyn EventHandler>,
    seed: Option<Operand>,
}

impl ChainBuilder {
    /// Create a new builder with the legacy configuration
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            event_handler: Arc::new(NoOpEventHandler),
            seed: None,
        }
    }

    // ========================================================================
    // Subtract Configuration
    // ========================================================================

    /// Keep the historical misaligned-scale subtract (default)
    pub fn legacy_subtract(mut self) -> Self {
        self.config.subtract_mode = SubtractMode::Legacy;
        self
    }

    /// Subtract aligned mantissas for every scale combination
    pub fn corrected_subtract(mut self) -> Self {
        self.config.subtract_mode = SubtractMode::Corrected;
        self
    }

    // ========================================================================
    // Additional Configuration
    // ========================================================================

    /// Set how often divide may fall back to multiply
    pub fn with_max_divide_depth(mut self, depth: u8) -> Self {
        self.config.max_divide_depth = depth;
        self
    }

    /// Replace the whole engine configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the event handler
    pub fn with_event_handler(mut self, event_handler: Arc<dyn EventHandler>) -> Self {
        self.event_handler = event_handler;
        self
    }

    /// Start the chain from an initial value
    pub fn with_seed(mut self, seed: impl Into<Operand>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    /// Build the chain
    pub fn build(self) -> NumericResult<Chain> {
        let mut chain = create_from_config(self.config, self.event_handler)?;
        if let Some(seed) = self.seed {
            chain.seed(seed);
        }
        Ok(chain)
    }
}

impl Default for ChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::{ChainEvent, RecordingEventHandler};
    use crate::numeric::NumericError;

    #[test]
    fn test_create_from_config() {
        let chain = create_from_config(EngineConfig::corrected(), Arc::new(NoOpEventHandler)).unwrap();
        assert_eq!(chain.engine().config().subtract_mode, SubtractMode::Corrected);
        assert!(!chain.accumulator().is_initialized());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = ChainBuilder::new().with_max_divide_depth(u8::MAX).build();
        assert!(matches!(result, Err(NumericError::InvalidConfig(_))));
    }

    #[test]
    fn test_builder_defaults_to_legacy() {
        let mut chain = ChainBuilder::default().build().unwrap();
        assert_eq!(chain.subtract([1.0, 0.5]).unwrap(), 1.5);
    }

    #[test]
    fn test_builder_seed_folds_single_operands() {
        let recorder = Arc::new(RecordingEventHandler::new());
        let mut chain = ChainBuilder::new()
            .with_event_handler(recorder.clone())
            .with_seed("50%".parse::<Operand>().unwrap())
            .build()
            .unwrap();

        assert_eq!(chain.value().unwrap(), Some(0.5));
        assert_eq!(chain.multiply([3]).unwrap(), 1.5);

        let events = recorder.events();
        assert!(matches!(events[0], ChainEvent::Seeded { .. }));
        assert!(matches!(events.last(), Some(ChainEvent::Completed { .. })));
    }

    #[test]
    fn test_with_config_overrides() {
        let chain = ChainBuilder::new()
            .corrected_subtract()
            .with_config(EngineConfig::legacy().with_max_divide_depth(1))
            .build()
            .unwrap();
        assert_eq!(chain.engine().config().subtract_mode, SubtractMode::Legacy);
        assert_eq!(chain.engine().config().max_divide_depth, 1);
    }
}

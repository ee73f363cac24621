// ============================================================================
// Engine Configuration
// Behavioural switches for the operator engine
// ============================================================================

use crate::numeric::{NumericError, NumericResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Upper bound accepted for [`EngineConfig::max_divide_depth`]
pub const MAX_DIVIDE_DEPTH: u8 = 16;

/// Default number of times a divide may re-express itself as a multiply
pub const DEFAULT_DIVIDE_DEPTH: u8 = 4;

// ============================================================================
// Subtract Mode
// ============================================================================

/// How subtract combines operands whose scales differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SubtractMode {
    /// Historical behaviour: when scales differ the aligned mantissas are
    /// added, exactly like add. Only equal scales really subtract.
    /// `1 - 0.5` therefore yields `1.5`.
    #[default]
    Legacy,

    /// Aligned mantissas are always subtracted. `1 - 0.5` yields `0.5`.
    Corrected,
}

// ============================================================================
// Engine Configuration
// ============================================================================

/// Configuration for an [`OperatorEngine`](crate::engine::OperatorEngine)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    /// Treatment of misaligned scales in subtract
    pub subtract_mode: SubtractMode,

    /// How many times divide may fall back to multiply before failing.
    /// Zero makes every non-integral division fail with
    /// `DivisionRetryLimit`, percent operands included.
    pub max_divide_depth: u8,
}

impl EngineConfig {
    /// Create a new configuration with the given subtract mode
    pub fn new(subtract_mode: SubtractMode) -> Self {
        Self {
            subtract_mode,
            max_divide_depth: DEFAULT_DIVIDE_DEPTH,
        }
    }

    /// Builder method: Set subtract mode
    pub fn with_subtract_mode(mut self, mode: SubtractMode) -> Self {
        self.subtract_mode = mode;
        self
    }

    /// Builder method: Set divide retry depth
    pub fn with_max_divide_depth(mut self, depth: u8) -> Self {
        self.max_divide_depth = depth;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> NumericResult<()> {
        if self.max_divide_depth > MAX_DIVIDE_DEPTH {
            return Err(NumericError::InvalidConfig(format!(
                "max_divide_depth must be at most {}, got {}",
                MAX_DIVIDE_DEPTH, self.max_divide_depth
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl EngineConfig {
    /// Reproduces historical results, including subtract's misaligned branch
    pub fn legacy() -> Self {
        Self::new(SubtractMode::Legacy)
    }

    /// Mathematically correct subtraction for every scale combination
    pub fn corrected() -> Self {
        Self::new(SubtractMode::Corrected)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::legacy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.subtract_mode, SubtractMode::Legacy);
        assert_eq!(config.max_divide_depth, DEFAULT_DIVIDE_DEPTH);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        assert_eq!(EngineConfig::corrected().subtract_mode, SubtractMode::Corrected);
        assert_eq!(EngineConfig::legacy(), EngineConfig::default());
    }

    #[test]
    fn test_builder_methods() {
        let config = EngineConfig::legacy()
            .with_subtract_mode(SubtractMode::Corrected)
            .with_max_divide_depth(0);
        assert_eq!(config.subtract_mode, SubtractMode::Corrected);
        assert_eq!(config.max_divide_depth, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_deep_retry() {
        let config = EngineConfig::default().with_max_divide_depth(MAX_DIVIDE_DEPTH + 1);
        assert!(matches!(
            config.validate(),
            Err(NumericError::InvalidConfig(_))
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let config = EngineConfig::corrected().with_max_divide_depth(2);
        let json = serde_json::to_string(&config).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}

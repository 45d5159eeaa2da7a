//! Construction parameters for a [`SkipList`](crate::SkipList).
//!
//! ## Parameters
//!
//! | Field         | Default          | Valid range          |
//! |---------------|------------------|----------------------|
//! | `max_height`  | 32               | at least 1           |
//! | `probability` | 0.25             | open interval (0, 1) |
//! | `seed`        | [`DEFAULT_SEED`] | any                  |
//! | `capacity`    | 0                | any                  |
//!
//! Parameters are fixed for the lifetime of the index. Invalid values are
//! rejected when the index is built, never clamped.
//!
//! ## Example
//!
//! ```
//! use skip_index::{SkipList, SkipListConfig};
//!
//! let config = SkipListConfig::new(16, 0.5).with_seed(7).with_capacity(1_000);
//! let list: SkipList<u64> = SkipList::new(config).unwrap();
//!
//! assert_eq!(list.max_height(), 16);
//! assert!(list.capacity() >= 1_000);
//! ```

use crate::error::ConfigError;

/// Default upper bound on node height
pub const DEFAULT_MAX_HEIGHT: usize = 32;

/// Default per-level promotion probability
pub const DEFAULT_PROBABILITY: f64 = 0.25;

/// Seed used when the caller does not pick one
pub const DEFAULT_SEED: u64 = 0x5EED_1DE7;

/// Construction parameters for a skip list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkipListConfig {
    /// Upper bound on any node's height
    pub max_height: usize,

    /// Chance that a tower grows one more level
    pub probability: f64,

    /// Seed for the index-owned random source
    pub seed: u64,

    /// Node slots to pre-allocate in the arena
    pub capacity: usize,
}

impl Default for SkipListConfig {
    fn default() -> Self {
        Self {
            max_height: DEFAULT_MAX_HEIGHT,
            probability: DEFAULT_PROBABILITY,
            seed: DEFAULT_SEED,
            capacity: 0,
        }
    }
}

impl SkipListConfig {
    /// Create a config with the given height bound and probability.
    ///
    /// Nothing is checked here; see [`validate`](Self::validate).
    pub fn new(max_height: usize, probability: f64) -> Self {
        Self {
            max_height,
            probability,
            ..Self::default()
        }
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of pre-allocated node slots
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Check the parameters.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::ZeroMaxHeight`] if `max_height` is 0
    /// * [`ConfigError::ProbabilityOutOfRange`] unless `0 < probability < 1`
    ///   (NaN is rejected too)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_height == 0 {
            return Err(ConfigError::ZeroMaxHeight);
        }
        if !(self.probability > 0.0 && self.probability < 1.0) {
            return Err(ConfigError::ProbabilityOutOfRange(self.probability));
        }
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

//! Error types for the skip index.
//!
//! Ordinary outcomes ("already present", "not present") are reported
//! through `bool` or `Result` returns and never panic. Only bad
//! construction parameters are fatal, and they are rejected before any
//! index exists.

use thiserror::Error;

/// Construction parameters rejected by [`SkipListConfig::validate`].
///
/// [`SkipListConfig::validate`]: crate::config::SkipListConfig::validate
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    /// A maximum height of zero leaves no level for the nodes to live on
    #[error("max_height must be at least 1")]
    ZeroMaxHeight,

    /// Promotion probability outside the open interval (0, 1)
    #[error("probability {0} is outside the open interval (0, 1)")]
    ProbabilityOutOfRange(f64),
}

/// Errors returned by the fallible index operations.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum IndexError {
    /// Insert of a key that is already present; the index is unchanged
    #[error("key already present")]
    DuplicateKey,

    /// Remove of a key that is not present; the index is unchanged
    #[error("key not found")]
    KeyNotFound,

    /// The index could not be constructed
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
}

/// A structural invariant that [`SkipList::validate`] found broken.
///
/// [`SkipList::validate`]: crate::index::SkipList::validate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// Two neighbours on a level are equal or out of order
    #[error("level {level} is not in strictly increasing key order")]
    Unordered { level: usize },

    /// A node on a level is absent from a lower level
    #[error("node at level {level} is missing from level {missing}")]
    NotNested { level: usize, missing: usize },

    /// Live height differs from the tallest tower
    #[error("height is {height} but the tallest node has height {tallest}")]
    HeightMismatch { height: usize, tallest: usize },

    /// The head links a level that should be empty
    #[error("head still links level {level}, at or above height {height}")]
    StaleLevel { level: usize, height: usize },

    /// Node count differs from what level 0 links
    #[error("len is {len} but level 0 links {linked} nodes")]
    LenMismatch { len: usize, linked: usize },

    /// A tower taller than the configured bound
    #[error("node of height {height} exceeds max_height {max_height}")]
    TowerTooTall { height: usize, max_height: usize },
}

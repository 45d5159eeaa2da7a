//! # Skip Index
//!
//! An in-memory ordered set of unique keys built as a skip list.
//!
//! ## Architecture
//!
//! - **Config**: construction parameters, validated before an index exists
//! - **Index**: slab-backed skip list with a seeded height sampler
//! - **Errors**: duplicate / missing keys and rejected configurations
//!
//! ## Design Principles
//!
//! 1. **Determinism**: the same seed and operation sequence give the same shape
//! 2. **Arena Storage**: nodes live in a slab, links are slab keys
//! 3. **Single-Threaded**: no locks or atomics; callers bring their own exclusion
//! 4. **No Partial Mutation**: a node is allocated before any link is rewired
//!
//! ## Example
//!
//! ```
//! use skip_index::{SkipList, SkipListConfig};
//!
//! let config = SkipListConfig::new(32, 0.25).with_seed(42);
//! let mut list = SkipList::new(config).unwrap();
//!
//! assert!(list.insert(3));
//! assert!(list.insert(1));
//! assert!(!list.insert(3));
//!
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Construction parameters and their validation
pub mod config;

/// Error types
pub mod error;

/// Skip list, node storage and height sampler
pub mod index;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use config::SkipListConfig;
pub use error::{ConfigError, IndexError, InvariantViolation};
pub use index::{HeightSampler, Iter, SkipList};

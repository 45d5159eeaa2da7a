//! The skip list index and its parts.
//!
//! ## Components
//!
//! - [`HeightSampler`]: draws each tower's height from a seeded source
//! - `Node`: arena node holding a key and its forward links
//! - [`SkipList`]: search, insert and remove over the node arena
//!
//! Dependency order is sampler → node storage → index operations.

mod node;
mod sampler;
mod skiplist;

pub use sampler::HeightSampler;
pub use skiplist::{Iter, SkipList};

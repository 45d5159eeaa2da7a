//! Arena node for the skip list.
//!
//! ## Design
//!
//! Every node lives in a `Slab` owned by the index. A forward link is the
//! slab key of the next node at that level (`None` at the end of the
//! level), so links never own anything and never dangle past a removal:
//! the index unlinks a node at every level before its slot is freed.
//!
//! ## Tower
//!
//! ```text
//! level 2:  head ------------------> [17] ----------> None
//! level 1:  head --------> [9] ----> [17] --> [23] -> None
//! level 0:  head -> [4] -> [9] ----> [17] --> [23] -> None
//! ```
//!
//! A node's height is the length of its `forward` array, fixed at creation.

use smallvec::{smallvec, SmallVec};

/// Links stored inline before spilling to the heap.
///
/// With the default probability of 0.25 nearly every tower fits.
pub(crate) const INLINE_LINKS: usize = 4;

/// A forward link: slab key of the next node, or `None` for end of level
pub(crate) type Link = Option<usize>;

/// Forward links of one node, indexed by level
pub(crate) type Tower = SmallVec<[Link; INLINE_LINKS]>;

/// A key plus its tower of forward links.
#[derive(Debug, Clone)]
pub(crate) struct Node<K> {
    pub key: K,
    pub forward: Tower,
}

impl<K> Node<K> {
    /// Create an unlinked node of the given height
    #[inline]
    pub fn new(key: K, height: usize) -> Self {
        Self {
            key,
            forward: smallvec![None; height],
        }
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.forward.len()
    }
}

/// A place in the index that owns forward links: the head sentinel or a
/// real node.
///
/// The head compares below every key, so it is the predecessor of
/// anything on a level with no smaller node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Position {
    Head,
    Node(usize),
}

// ============================================================================
// Unit Tests
// ============================================================================

//! Skip list: the ordered unique-key index.
//!
//! ## Architecture
//!
//! - **Slab**: arena owning every node; links are slab keys
//! - **Head**: the sentinel's link array, `max_height` long, kept on the index
//! - **Sampler**: index-owned random source that picks each tower's height
//!
//! ## Positioning
//!
//! Every operation starts with the same walk: from the head at the top
//! live level, move right while the next key is smaller than the target,
//! otherwise drop a level. The last position visited on each level is the
//! target's predecessor there; together they form the frontier that
//! insert splices after and remove unlinks from.
//!
//! ## Complexity
//!
//! | Operation | Expected | Worst case |
//! |-----------|----------|------------|
//! | contains  | O(log n) | O(n)       |
//! | insert    | O(log n) | O(n)       |
//! | remove    | O(log n) | O(n)       |
//! | len       | O(1)     | O(1)       |
//!
//! The worst case needs an adversarial run of coin flips and is accepted.
//!
//! ## Example
//!
//! ```
//! use skip_index::{SkipList, SkipListConfig};
//!
//! let mut list = SkipList::new(SkipListConfig::new(32, 0.25)).unwrap();
//!
//! for key in 0..10u32 {
//!     assert!(list.insert(key));
//! }
//! assert!(!list.insert(7));
//!
//! assert_eq!(list.len(), 10);
//! assert!(list.contains(&5));
//! assert!(list.remove(&5));
//! assert!(!list.contains(&5));
//! assert_eq!(list.len(), 9);
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::iter::FusedIterator;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};
use slab::Slab;
use smallvec::{smallvec, SmallVec};

use crate::config::SkipListConfig;
use crate::error::{IndexError, InvariantViolation};
use crate::index::node::{Link, Node, Position};
use crate::index::HeightSampler;

/// Predecessor per level, bottom level first
type Frontier = SmallVec<[Position; 16]>;

/// An ordered set of unique keys with expected O(log n) operations.
///
/// Single-threaded: callers that share an index across threads must
/// provide their own exclusion.
#[derive(Clone)]
pub struct SkipList<K, R = ChaCha8Rng> {
    /// Node arena
    nodes: Slab<Node<K>>,

    /// Head sentinel links, one per possible level
    head: Vec<Link>,

    /// Number of live levels; the tallest node's height, or 1 when empty
    height: usize,

    sampler: HeightSampler<R>,
}

impl<K: Ord> SkipList<K, ChaCha8Rng> {
    /// Create an empty index whose sampler is seeded from `config.seed`.
    ///
    /// # Errors
    ///
    /// [`IndexError::InvalidConfiguration`] if the config fails validation.
    ///
    /// # Example
    ///
    /// ```
    /// use skip_index::{ConfigError, IndexError, SkipList, SkipListConfig};
    ///
    /// let err = SkipList::<u32>::new(SkipListConfig::new(0, 0.25)).unwrap_err();
    /// assert_eq!(err, IndexError::InvalidConfiguration(ConfigError::ZeroMaxHeight));
    /// ```
    pub fn new(config: SkipListConfig) -> Result<Self, IndexError> {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(config.seed))
    }
}

impl<K: Ord> Default for SkipList<K, ChaCha8Rng> {
    fn default() -> Self {
        Self::new(SkipListConfig::default()).expect("default configuration is valid")
    }
}

impl<K: Ord, R: Rng> SkipList<K, R> {
    /// Create an empty index drawing heights from a caller-supplied source.
    ///
    /// `config.seed` is ignored; the caller seeds `rng`.
    pub fn with_rng(config: SkipListConfig, rng: R) -> Result<Self, IndexError> {
        let sampler = HeightSampler::new(config.max_height, config.probability, rng)?;

        Ok(Self {
            nodes: Slab::with_capacity(config.capacity),
            head: vec![None; config.max_height],
            height: 1,
            sampler,
        })
    }

    // ========================================================================
    // Size and Parameters
    // ========================================================================

    /// Number of keys in the index
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of live levels (at least 1)
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn max_height(&self) -> usize {
        self.head.len()
    }

    #[inline]
    pub fn probability(&self) -> f64 {
        self.sampler.probability()
    }

    /// Node slots available without reallocating the arena
    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    // ========================================================================
    // Positioning
    // ========================================================================

    #[inline]
    fn key_at<Q: ?Sized>(&self, slot: usize) -> &Q
    where
        K: Borrow<Q>,
    {
        self.nodes[slot].key.borrow()
    }

    #[inline]
    fn next(&self, pos: Position, level: usize) -> Link {
        match pos {
            Position::Head => self.head[level],
            Position::Node(slot) => self.nodes[slot].forward[level],
        }
    }

    #[inline]
    fn set_next(&mut self, pos: Position, level: usize, link: Link) {
        match pos {
            Position::Head => self.head[level] = link,
            Position::Node(slot) => self.nodes[slot].forward[level] = link,
        }
    }

    /// Walk from the top live level down to level 0, calling `record` with
    /// the last position before `key` on each level. Returns the level-0
    /// predecessor.
    fn walk<Q>(&self, key: &Q, mut record: impl FnMut(usize, Position)) -> Position
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut pos = Position::Head;
        for level in (0..self.height).rev() {
            while let Some(next) = self.next(pos, level) {
                if key.cmp(self.key_at(next)).is_gt() {
                    pos = Position::Node(next);
                } else {
                    break;
                }
            }
            record(level, pos);
        }
        pos
    }

    /// Predecessor frontier for `key`, one entry per live level
    fn predecessors<Q>(&self, key: &Q) -> Frontier
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut frontier: Frontier = smallvec![Position::Head; self.height];
        self.walk(key, |level, pos| frontier[level] = pos);
        frontier
    }

    /// Slot of the level-0 successor of `pred` if it holds `key`
    #[inline]
    fn matching_successor<Q>(&self, pred: Position, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.next(pred, 0)
            .filter(|&slot| key.cmp(self.key_at(slot)).is_eq())
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Check whether `key` is present
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Get the stored key equal to `key`
    pub fn get<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let pred = self.walk(key, |_, _| {});
        self.matching_successor(pred, key)
            .map(|slot| &self.nodes[slot].key)
    }

    /// Smallest key, if any
    #[inline]
    pub fn first(&self) -> Option<&K> {
        self.head[0].map(|slot| &self.nodes[slot].key)
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Insert `key`, returning `false` if it was already present.
    #[inline]
    pub fn insert(&mut self, key: K) -> bool {
        self.try_insert(key).is_ok()
    }

    /// Insert `key`.
    ///
    /// # Errors
    ///
    /// [`IndexError::DuplicateKey`] if an equal key is present. The index
    /// is left untouched and no height is drawn.
    pub fn try_insert(&mut self, key: K) -> Result<(), IndexError> {
        let mut frontier = self.predecessors(&key);
        if self.matching_successor(frontier[0], &key).is_some() {
            return Err(IndexError::DuplicateKey);
        }

        let height = self.sampler.sample();
        if height > self.height {
            // No node occupies the new levels yet, so the head precedes
            frontier.resize(height, Position::Head);
        }

        // Allocate the fully linked tower before any existing link changes
        let mut node = Node::new(key, height);
        for (level, &pred) in frontier.iter().enumerate().take(height) {
            node.forward[level] = self.next(pred, level);
        }
        let slot = self.nodes.insert(node);

        for (level, &pred) in frontier.iter().enumerate().take(height) {
            self.set_next(pred, level, Some(slot));
        }
        self.height = self.height.max(height);

        Ok(())
    }

    /// Remove `key`, returning `false` if it was not present.
    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.try_remove(key).is_ok()
    }

    /// Remove `key` and hand back the stored key.
    ///
    /// Unlinks the node from every level it occupies, frees its slot, then
    /// drops empty top levels until `height` matches the tallest survivor.
    ///
    /// # Errors
    ///
    /// [`IndexError::KeyNotFound`] if no equal key is present; the index
    /// is left untouched.
    pub fn try_remove<Q>(&mut self, key: &Q) -> Result<K, IndexError>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let frontier = self.predecessors(key);
        let target = self
            .matching_successor(frontier[0], key)
            .ok_or(IndexError::KeyNotFound)?;

        for (level, &pred) in frontier.iter().enumerate() {
            if self.next(pred, level) == Some(target) {
                let after = self.nodes[target].forward[level];
                self.set_next(pred, level, after);
            }
        }

        let node = self.nodes.remove(target);

        while self.height > 1 && self.head[self.height - 1].is_none() {
            self.height -= 1;
        }

        Ok(node.key)
    }

    /// Remove every key. The sampler keeps its position in the stream.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head.fill(None);
        self.height = 1;
    }

    // ========================================================================
    // Traversal
    // ========================================================================

    /// Keys in ascending order
    #[inline]
    pub fn iter(&self) -> Iter<'_, K> {
        self.level_keys(0)
    }

    /// Keys linked at `level`, in ascending order.
    ///
    /// Empty for levels at or above [`max_height`](Self::max_height).
    pub fn level_keys(&self, level: usize) -> Iter<'_, K> {
        Iter {
            nodes: &self.nodes,
            next: self.head.get(level).copied().flatten(),
            level,
        }
    }

    /// Number of keys linked at `level`
    pub fn level_len(&self, level: usize) -> usize {
        self.level_keys(level).count()
    }

    // ========================================================================
    // Verification
    // ========================================================================

    /// Check the structural invariants.
    ///
    /// - every level is in strictly increasing key order
    /// - a node on level L is on every level below L
    /// - `height` equals the tallest node (1 when empty)
    /// - the head links nothing at or above `height`
    /// - level 0 links exactly `len` nodes
    ///
    /// Runs in O(n · height); meant for tests and debugging.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let max_height = self.max_height();

        let mut tallest = 0;
        for (_, node) in self.nodes.iter() {
            if node.height() > max_height {
                return Err(InvariantViolation::TowerTooTall {
                    height: node.height(),
                    max_height,
                });
            }
            tallest = tallest.max(node.height());
        }
        if self.height != tallest.max(1) {
            return Err(InvariantViolation::HeightMismatch {
                height: self.height,
                tallest,
            });
        }

        if let Some(level) = (self.height..max_height).find(|&l| self.head[l].is_some()) {
            return Err(InvariantViolation::StaleLevel {
                level,
                height: self.height,
            });
        }

        let mut below = self.level_slots(0)?;
        if below.len() != self.len() {
            return Err(InvariantViolation::LenMismatch {
                len: self.len(),
                linked: below.len(),
            });
        }

        for level in 1..self.height {
            let above = self.level_slots(level)?;
            // Both levels are sorted, so `above` must be a subsequence of `below`
            let mut lower = below.iter();
            for slot in &above {
                if !lower.any(|s| s == slot) {
                    return Err(InvariantViolation::NotNested {
                        level,
                        missing: level - 1,
                    });
                }
            }
            below = above;
        }

        Ok(())
    }

    /// Slots linked at `level`, checking order and tower heights on the way
    fn level_slots(&self, level: usize) -> Result<Vec<usize>, InvariantViolation> {
        let mut slots: Vec<usize> = Vec::new();
        let mut next = self.head[level];

        while let Some(slot) = next {
            let node = self.nodes.get(slot).ok_or(InvariantViolation::LenMismatch {
                len: self.len(),
                linked: slots.len() + 1,
            })?;
            // A node reached at a level its tower does not cover
            if node.height() <= level {
                return Err(InvariantViolation::NotNested {
                    level,
                    missing: level,
                });
            }
            if let Some(&prev) = slots.last() {
                if self.nodes[prev].key >= node.key {
                    return Err(InvariantViolation::Unordered { level });
                }
            }
            slots.push(slot);
            next = node.forward[level];
        }

        Ok(slots)
    }

    /// SHA-256 over the index shape: parameters, live height, size and
    /// the height of every tower in key order.
    ///
    /// Keys are not hashed. Two indexes built from the same seed and the
    /// same operation sequence have equal roots.
    pub fn shape_root(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update((self.max_height() as u64).to_le_bytes());
        hasher.update((self.height as u64).to_le_bytes());
        hasher.update((self.len() as u64).to_le_bytes());

        let mut next = self.head[0];
        while let Some(slot) = next {
            let node = &self.nodes[slot];
            hasher.update((node.height() as u64).to_le_bytes());
            next = node.forward[0];
        }

        let mut root = [0u8; 32];
        root.copy_from_slice(&hasher.finalize());
        root
    }

    /// [`shape_root`](Self::shape_root) as lowercase hex
    pub fn shape_root_hex(&self) -> String {
        hex::encode(self.shape_root())
    }
}

impl<K: fmt::Debug, R> fmt::Debug for SkipList<K, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys = Iter {
            nodes: &self.nodes,
            next: self.head[0],
            level: 0,
        };
        f.debug_set().entries(keys).finish()
    }
}

impl<K: Ord, R: Rng> Extend<K> for SkipList<K, R> {
    /// Insert every key; duplicates are skipped
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for SkipList<K, ChaCha8Rng> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut list = Self::default();
        list.extend(iter);
        list
    }
}

impl<'a, K: Ord, R: Rng> IntoIterator for &'a SkipList<K, R> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ascending iterator over the keys linked at one level.
#[derive(Debug)]
pub struct Iter<'a, K> {
    nodes: &'a Slab<Node<K>>,
    next: Link,
    level: usize,
}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            next: self.next,
            level: self.level,
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.nodes[self.next?];
        self.next = node.forward[self.level];
        Some(&node.key)
    }
}

impl<K> FusedIterator for Iter<'_, K> {}

// ============================================================================
// Unit Tests
// ============================================================================

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use super::node::BTreeNode;
use super::stats::BTreeStats;
use crate::error::{IndexError, Result};

/// Minimum degree used by [`BTreeOptions::default`].
pub const DEFAULT_MIN_DEGREE: usize = 16;

/// Configuration knobs for the B-tree.
#[derive(Clone, Debug)]
pub struct BTreeOptions {
    /// Minimum degree `t`: every non-root node holds between `t-1` and
    /// `2t-1` keys. Must be at least 2.
    pub min_degree: usize,
}

impl Default for BTreeOptions {
    fn default() -> Self {
        Self {
            min_degree: DEFAULT_MIN_DEGREE,
        }
    }
}

/// An in-memory B-tree index over a totally ordered key type.
///
/// Supports insertion and exact-key lookup in O(log N). Duplicate keys are
/// accepted and placed immediately left of existing equal keys; deletion and
/// range scans are not part of this index.
#[derive(Debug)]
pub struct BTree<K> {
    pub(super) root: Option<Box<BTreeNode<K>>>,
    pub(super) min_degree: usize,
    pub(super) len: usize,
    pub(super) stats: Arc<BTreeStats>,
}

impl<K: Ord> BTree<K> {
    /// Create an empty tree with the given minimum degree.
    ///
    /// Rejects `min_degree < 2`; a degree of 1 cannot satisfy the node
    /// occupancy bounds and is never silently clamped.
    pub fn new(min_degree: usize) -> Result<Self> {
        if min_degree < 2 {
            return Err(IndexError::InvalidArgument(format!(
                "min_degree must be at least 2, got {min_degree}"
            )));
        }
        Ok(Self {
            root: None,
            min_degree,
            len: 0,
            stats: Arc::new(BTreeStats::default()),
        })
    }

    /// Create an empty tree from [`BTreeOptions`].
    pub fn with_options(options: BTreeOptions) -> Result<Self> {
        Self::new(options.min_degree)
    }

    /// The minimum degree `t` fixed at construction.
    pub fn min_degree(&self) -> usize {
        self.min_degree
    }

    /// Number of keys stored, duplicates counted.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels from the root down to the leaves; 0 for an empty
    /// tree, 1 when the root itself is a leaf.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            height += 1;
            current = node.children().first().map(|child| child.as_ref());
        }
        height
    }

    /// Access the live statistics counters for this tree.
    pub fn stats(&self) -> Arc<BTreeStats> {
        Arc::clone(&self.stats)
    }

    /// Insert `key` into the tree.
    ///
    /// A full root is split before the descent starts, which is the only way
    /// the tree gains height; every full child on the path down is split
    /// before being entered, so the insertion completes in one pass.
    pub fn insert(&mut self, key: K) {
        let root_is_full = self
            .root
            .as_ref()
            .is_some_and(|root| root.is_full(self.min_degree));

        match self.root.take() {
            None => {
                let mut leaf = BTreeNode::new(true, self.min_degree);
                leaf.keys.push(key);
                self.root = Some(Box::new(leaf));
            }
            Some(old_root) if root_is_full => {
                trace!(len = self.len, "index.insert.split_root");
                let mut new_root = BTreeNode::new(false, self.min_degree);
                new_root.children.push(old_root);
                new_root.split_child(0, self.min_degree, &self.stats);
                self.stats.record_root_split();
                new_root.insert_non_full(key, self.min_degree, &self.stats);
                self.root = Some(Box::new(new_root));
            }
            Some(mut root) => {
                root.insert_non_full(key, self.min_degree, &self.stats);
                self.root = Some(root);
            }
        }

        self.len += 1;
        self.stats.record_insert();
    }

    /// Exact-key lookup.
    ///
    /// Returns a handle to the node holding the first match together with
    /// the key's slot index, or `None` when the key is absent. Read-only;
    /// an empty tree simply reports `None`.
    pub fn search(&self, key: &K) -> Option<(&BTreeNode<K>, usize)> {
        let mut visits = 0;
        let hit = self
            .root
            .as_deref()
            .and_then(|root| root.search_counted(key, &mut visits));
        self.stats.record_search(visits);
        hit
    }

    /// Whether the tree contains `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    /// Iterate the stored keys in non-decreasing order, duplicates included.
    pub fn iter(&self) -> BTreeIter<'_, K> {
        let mut entries = Vec::with_capacity(self.len);
        if let Some(root) = self.root.as_deref() {
            root.collect_keys(&mut entries);
        }
        BTreeIter { entries, index: 0 }
    }

    /// Drop all keys, returning the tree to its empty state.
    pub fn clear(&mut self) {
        debug!(len = self.len, "index.clear");
        self.root = None;
        self.len = 0;
    }

    /// Walk the whole tree and check every structural invariant: key order
    /// within and across nodes, node occupancy bounds, the child/key count
    /// link, and equal leaf depth.
    pub fn validate(&self) -> Result<()> {
        let Some(root) = self.root.as_deref() else {
            return Ok(());
        };
        if root.keys().is_empty() {
            return Err(IndexError::InvariantViolation(
                "non-empty tree has a root without keys".into(),
            ));
        }
        let mut leaf_depth = None;
        self.validate_node(root, true, None, None, 1, &mut leaf_depth)
    }

    fn validate_node(
        &self,
        node: &BTreeNode<K>,
        is_root: bool,
        lower: Option<&K>,
        upper: Option<&K>,
        depth: usize,
        leaf_depth: &mut Option<usize>,
    ) -> Result<()> {
        let t = self.min_degree;
        let max_keys = 2 * t - 1;

        if node.keys.len() > max_keys {
            return Err(IndexError::InvariantViolation(format!(
                "node holds {} keys, maximum is {max_keys}",
                node.keys.len()
            )));
        }
        if !is_root && node.keys.len() < t - 1 {
            return Err(IndexError::InvariantViolation(format!(
                "non-root node holds {} keys, minimum is {}",
                node.keys.len(),
                t - 1
            )));
        }
        if node.keys.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(IndexError::InvariantViolation(
                "node keys are not in ascending order".into(),
            ));
        }
        // Duplicates may sit on either side of an equal separator after a
        // run of equal keys has been split, so the subtree bounds are
        // inclusive at both ends.
        if let (Some(lower), Some(first)) = (lower, node.keys.first()) {
            if first < lower {
                return Err(IndexError::InvariantViolation(
                    "node key below the separator range of its parent".into(),
                ));
            }
        }
        if let (Some(upper), Some(last)) = (upper, node.keys.last()) {
            if last > upper {
                return Err(IndexError::InvariantViolation(
                    "node key above the separator range of its parent".into(),
                ));
            }
        }

        if node.is_leaf {
            if !node.children.is_empty() {
                return Err(IndexError::InvariantViolation(
                    "leaf node has children".into(),
                ));
            }
            match *leaf_depth {
                None => *leaf_depth = Some(depth),
                Some(expected) if expected != depth => {
                    return Err(IndexError::InvariantViolation(format!(
                        "leaf at depth {depth}, expected all leaves at depth {expected}"
                    )));
                }
                Some(_) => {}
            }
            return Ok(());
        }

        if node.children.len() != node.keys.len() + 1 {
            return Err(IndexError::InvariantViolation(format!(
                "internal node has {} children for {} keys",
                node.children.len(),
                node.keys.len()
            )));
        }
        for (idx, child) in node.children.iter().enumerate() {
            let child_lower = if idx == 0 { lower } else { Some(&node.keys[idx - 1]) };
            let child_upper = if idx == node.keys.len() {
                upper
            } else {
                Some(&node.keys[idx])
            };
            self.validate_node(child, false, child_lower, child_upper, depth + 1, leaf_depth)?;
        }
        Ok(())
    }
}

impl<K: Ord> Default for BTree<K> {
    fn default() -> Self {
        Self {
            root: None,
            min_degree: DEFAULT_MIN_DEGREE,
            len: 0,
            stats: Arc::new(BTreeStats::default()),
        }
    }
}

/// In-order iterator over the keys of a [`BTree`].
pub struct BTreeIter<'a, K> {
    entries: Vec<&'a K>,
    index: usize,
}

impl<'a, K> Iterator for BTreeIter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index < self.entries.len() {
            let item = self.entries[self.index];
            self.index += 1;
            Some(item)
        } else {
            None
        }
    }
}

impl<'a, K: Ord> IntoIterator for &'a BTree<K> {
    type Item = &'a K;
    type IntoIter = BTreeIter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Renders keys level by level, indented by depth. Diagnostic output only,
/// not a stable format.
impl<K: fmt::Debug> fmt::Display for BTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(root) = self.root.as_deref() else {
            return writeln!(f, "(empty)");
        };
        let mut queue = VecDeque::new();
        queue.push_back((root, 0usize));
        while let Some((node, depth)) = queue.pop_front() {
            writeln!(f, "{:indent$}{:?}", "", node.keys(), indent = depth * 2)?;
            for child in node.children() {
                queue.push_back((child.as_ref(), depth + 1));
            }
        }
        Ok(())
    }
}

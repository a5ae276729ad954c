use tracing::trace;

use super::stats::BTreeStats;

/// A single node of the B-tree: a sorted run of keys plus, for internal
/// nodes, the child subtrees partitioning the key space around them.
///
/// Nodes are exclusively owned by their parent through boxed links; the
/// structure is acyclic by construction, so no shared ownership is needed.
#[derive(Debug, Clone)]
pub struct BTreeNode<K> {
    pub(super) keys: Vec<K>,
    #[allow(clippy::vec_box)]
    pub(super) children: Vec<Box<BTreeNode<K>>>,
    pub(super) is_leaf: bool,
}

impl<K> BTreeNode<K> {
    pub(super) fn new(is_leaf: bool, min_degree: usize) -> Self {
        Self {
            keys: Vec::with_capacity(2 * min_degree - 1),
            children: if is_leaf {
                Vec::new()
            } else {
                Vec::with_capacity(2 * min_degree)
            },
            is_leaf,
        }
    }

    pub(super) fn is_full(&self, min_degree: usize) -> bool {
        self.keys.len() >= 2 * min_degree - 1
    }

    /// The keys held by this node, in ascending order.
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// The child subtrees of this node; empty for a leaf.
    pub fn children(&self) -> &[Box<BTreeNode<K>>] {
        &self.children
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        self.is_leaf
    }
}

impl<K: Ord> BTreeNode<K> {
    /// First slot whose key is `>= key`. Insertions use the same slot, which
    /// places a duplicate immediately left of existing equal keys.
    fn lower_bound(&self, key: &K) -> usize {
        self.keys.partition_point(|k| k < key)
    }

    /// Search the subtree rooted at this node.
    ///
    /// Returns the node containing the key together with the key's slot
    /// index, or `None` when no match exists anywhere below this node.
    pub fn search(&self, key: &K) -> Option<(&BTreeNode<K>, usize)> {
        let mut visits = 0;
        self.search_counted(key, &mut visits)
    }

    pub(super) fn search_counted<'a>(
        &'a self,
        key: &K,
        visits: &mut u64,
    ) -> Option<(&'a BTreeNode<K>, usize)> {
        *visits += 1;
        let idx = self.lower_bound(key);
        if idx < self.keys.len() && self.keys[idx] == *key {
            return Some((self, idx));
        }
        if self.is_leaf {
            return None;
        }
        self.children[idx].search_counted(key, visits)
    }

    /// Split the full child at `idx`, promoting its median key into `self`.
    ///
    /// Precondition: `children[idx]` holds exactly `2t-1` keys and `self`
    /// has room for one more. Touches only this parent/child pair and never
    /// recurses; this is the sole rebalancing mechanism in the tree.
    pub(super) fn split_child(&mut self, idx: usize, min_degree: usize, stats: &BTreeStats) {
        let full = &mut self.children[idx];
        debug_assert!(full.is_full(min_degree), "split_child requires a full child");

        let mut right = BTreeNode::new(full.is_leaf, min_degree);
        right.keys = full.keys.split_off(min_degree);
        let median = full.keys.remove(min_degree - 1);
        if !full.is_leaf {
            right.children = full.children.split_off(min_degree);
        }

        if full.is_leaf {
            stats.record_leaf_split();
        } else {
            stats.record_internal_split();
        }
        trace!(child = idx, "index.split_child");

        self.keys.insert(idx, median);
        self.children.insert(idx + 1, Box::new(right));
    }

    /// Insert `key` into the subtree rooted at this node.
    ///
    /// Precondition: `self` is not full. A full child is split before the
    /// descent enters it, so the recursion only ever proceeds into nodes
    /// with room to grow and the whole insertion is a single top-down pass.
    pub(super) fn insert_non_full(&mut self, key: K, min_degree: usize, stats: &BTreeStats) {
        debug_assert!(!self.is_full(min_degree), "insert_non_full requires spare capacity");

        if self.is_leaf {
            let idx = self.lower_bound(&key);
            self.keys.insert(idx, key);
            return;
        }

        let mut idx = self.lower_bound(&key);
        if self.children[idx].is_full(min_degree) {
            self.split_child(idx, min_degree, stats);
            // A key equal to the freshly promoted median belongs to the
            // left half, so only a strictly greater key advances.
            if key > self.keys[idx] {
                idx += 1;
            }
        }
        self.children[idx].insert_non_full(key, min_degree, stats);
    }

    pub(super) fn collect_keys<'a>(&'a self, out: &mut Vec<&'a K>) {
        for i in 0..self.keys.len() {
            if !self.is_leaf {
                self.children[i].collect_keys(out);
            }
            out.push(&self.keys[i]);
        }
        if !self.is_leaf && !self.children.is_empty() {
            self.children[self.children.len() - 1].collect_keys(out);
        }
    }
}

//! An in-memory ordered index: a balanced multiway search tree (B-tree)
//! supporting key insertion and exact-key lookup in O(log N).
//!
//! The index accepts duplicate keys (a lookup returns the first match) and
//! deliberately implements no deletion, range scans, or persistence. See
//! [`BTree`] for the API surface.

#![warn(missing_docs)]

pub mod data_generator;
pub mod error;
pub mod index;
pub mod logging;

pub use error::{IndexError, Result};
pub use index::{BTree, BTreeIter, BTreeNode, BTreeOptions, BTreeStats, BTreeStatsSnapshot};

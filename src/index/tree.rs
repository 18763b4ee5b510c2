//! Ordered index implementation
//!
//! B+-tree keyed by column value, mapping each key to its row ids.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{Result, TabulaError};

use super::node::{Entry, Node};
use super::{KeyComparator, Lexicographic, RowId, MIN_ORDER};

/// Ordered multiway index from keys to row ids
///
/// ## Guarantees
/// - Every inserted `(key, row_id)` pair stays retrievable through `search`
/// - Row ids under one key keep their insertion order
/// - The tree is valid and balanced after every `insert`; there is no
///   separate build phase
///
/// Keys cannot be removed. A column index is rebuilt or dropped whole.
pub struct OrderedIndex<K = String, C = Lexicographic> {
    /// Root node (an empty leaf for an empty index)
    root: Box<Node<K>>,

    /// Max children per node
    order: usize,

    /// Total order over keys, fixed at construction
    comparator: C,

    /// Distinct keys stored
    key_count: usize,

    /// Row ids stored across all keys
    row_count: usize,
}

/// Shape summary of an index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexStats {
    /// Edges from the root to any leaf (0 for a single leaf)
    pub height: usize,
    pub node_count: usize,
    pub leaf_count: usize,
    pub key_count: usize,
    pub row_count: usize,
}

impl<K: Clone + Ord> OrderedIndex<K, Lexicographic> {
    /// Create an empty index ordered by the key type's `Ord`
    ///
    /// Fails with `InvalidOrder` when `order < 3`.
    pub fn new(order: usize) -> Result<Self> {
        Self::with_comparator(order, Lexicographic)
    }
}

impl<K: Clone, C: KeyComparator<K>> OrderedIndex<K, C> {
    /// Create an empty index using a custom key order
    pub fn with_comparator(order: usize, comparator: C) -> Result<Self> {
        if order < MIN_ORDER {
            return Err(TabulaError::InvalidOrder(order));
        }

        Ok(Self {
            root: Box::new(Node::new_leaf()),
            order,
            comparator,
            key_count: 0,
            row_count: 0,
        })
    }

    /// Insert a row id under `key`
    ///
    /// An existing key gets `row_id` appended to its list, even if the same
    /// id is already there.
    pub fn insert(&mut self, key: K, row_id: RowId) {
        let outcome = self.root.insert(key, row_id, self.order, &self.comparator);

        if outcome.new_key {
            self.key_count += 1;
        }
        self.row_count += 1;

        // Root overflowed: grow the tree by one level
        if let Some(split) = outcome.split {
            let old_root = std::mem::replace(&mut self.root, Box::new(Node::new_leaf()));
            self.root = Box::new(Node::Internal {
                separators: vec![split.separator],
                children: vec![old_root, split.right],
            });
            tracing::trace!(height = self.height(), "index root split");
        }
    }

    /// Look up the row ids stored under `key`
    ///
    /// Returns `None` when the key was never inserted.
    pub fn search(&self, key: &K) -> Option<&[RowId]> {
        let mut node = self.root.as_ref();

        loop {
            match node {
                Node::Internal {
                    separators,
                    children,
                } => {
                    let idx = Node::child_index(separators, key, &self.comparator);
                    node = children[idx].as_ref();
                }
                Node::Leaf { entries } => {
                    return node
                        .find_entry_slot(key, &self.comparator)
                        .ok()
                        .map(|i| entries[i].row_ids.as_slice());
                }
            }
        }
    }

    /// Check whether `key` has been inserted
    pub fn contains(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.key_count
    }

    pub fn is_empty(&self) -> bool {
        self.key_count == 0
    }

    /// Number of row ids across all keys
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Branching factor this index was built with
    pub fn order(&self) -> usize {
        self.order
    }

    /// Edges from the root to the leaves
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut node = self.root.as_ref();
        while let Node::Internal { children, .. } = node {
            height += 1;
            node = children[0].as_ref();
        }
        height
    }

    /// Keys held directly by the root node
    pub fn root_keys(&self) -> Vec<&K> {
        (0..self.root.len()).map(|i| self.root.key_at(i)).collect()
    }

    /// All entries in key order
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            stack: vec![self.root.as_ref()],
            current: Default::default(),
        }
    }

    /// All distinct keys in key order
    pub fn keys(&self) -> Vec<&K> {
        self.iter().map(|e| &e.key).collect()
    }

    /// Walk the tree and summarize its shape
    pub fn stats(&self) -> IndexStats {
        let mut stats = IndexStats {
            height: self.height(),
            key_count: self.key_count,
            row_count: self.row_count,
            ..IndexStats::default()
        };

        let mut stack = vec![self.root.as_ref()];
        while let Some(node) = stack.pop() {
            stats.node_count += 1;
            if node.is_leaf() {
                stats.leaf_count += 1;
            } else if let Node::Internal { children, .. } = node {
                stack.extend(children.iter().map(|c| c.as_ref()));
            }
        }
        stats
    }

    /// Verify ordering, balance and capacity of the whole tree
    ///
    /// Any failure means the tree was corrupted by a bug and is reported as
    /// `StructuralInvariantViolation`.
    pub fn check_invariants(&self) -> Result<()> {
        let mut walk = InvariantWalk {
            order: self.order,
            comparator: &self.comparator,
            leaf_depth: None,
            keys_seen: 0,
            rows_seen: 0,
        };
        walk.visit(self.root.as_ref(), None, None, 0, true)?;

        if walk.keys_seen != self.key_count {
            return Err(violation(format!(
                "key count {} but {} keys in leaves",
                self.key_count, walk.keys_seen
            )));
        }
        if walk.rows_seen != self.row_count {
            return Err(violation(format!(
                "row count {} but {} row ids in leaves",
                self.row_count, walk.rows_seen
            )));
        }
        Ok(())
    }
}

impl<K: fmt::Debug, C> fmt::Debug for OrderedIndex<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedIndex")
            .field("order", &self.order)
            .field("key_count", &self.key_count)
            .field("row_count", &self.row_count)
            .field("root", &self.root)
            .finish()
    }
}

/// In-order iterator over index entries
pub struct Iter<'a, K> {
    /// Nodes still to visit, next on top
    stack: Vec<&'a Node<K>>,
    current: std::slice::Iter<'a, Entry<K>>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a Entry<K>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.current.next() {
                return Some(entry);
            }

            match self.stack.pop()? {
                Node::Leaf { entries } => self.current = entries.iter(),
                Node::Internal { children, .. } => {
                    self.stack.extend(children.iter().rev().map(|c| c.as_ref()))
                }
            }
        }
    }
}

// =============================================================================
// Invariant Checking
// =============================================================================

struct InvariantWalk<'a, C> {
    order: usize,
    comparator: &'a C,
    leaf_depth: Option<usize>,
    keys_seen: usize,
    rows_seen: usize,
}

impl<C> InvariantWalk<'_, C> {
    /// Check `node` whose keys must satisfy `lower <= k < upper`
    fn visit<K>(
        &mut self,
        node: &Node<K>,
        lower: Option<&K>,
        upper: Option<&K>,
        depth: usize,
        is_root: bool,
    ) -> Result<()>
    where
        K: Clone,
        C: KeyComparator<K>,
    {
        let len = node.len();
        let min_keys = (self.order + 1) / 2 - 1;

        if len > self.order - 1 {
            return Err(violation(format!(
                "node at depth {} holds {} keys (max {})",
                depth,
                len,
                self.order - 1
            )));
        }
        if !is_root && len < min_keys {
            return Err(violation(format!(
                "node at depth {} holds {} keys (min {})",
                depth, len, min_keys
            )));
        }

        for i in 0..len {
            let key = node.key_at(i);
            if i > 0 && self.comparator.compare(node.key_at(i - 1), key) != Ordering::Less {
                return Err(violation(format!(
                    "keys out of order at depth {} position {}",
                    depth, i
                )));
            }
            if let Some(lo) = lower {
                if self.comparator.compare(key, lo) == Ordering::Less {
                    return Err(violation(format!(
                        "key below its lower separator at depth {}",
                        depth
                    )));
                }
            }
            if let Some(hi) = upper {
                if self.comparator.compare(key, hi) != Ordering::Less {
                    return Err(violation(format!(
                        "key not below its upper separator at depth {}",
                        depth
                    )));
                }
            }
        }

        match node {
            Node::Leaf { entries } => {
                if entries.iter().any(|e| e.row_ids.is_empty()) {
                    return Err(violation(format!(
                        "leaf entry without row ids at depth {}",
                        depth
                    )));
                }
                match self.leaf_depth {
                    None => self.leaf_depth = Some(depth),
                    Some(expected) if expected != depth => {
                        return Err(violation(format!(
                            "leaf at depth {} but another at depth {}",
                            depth, expected
                        )));
                    }
                    Some(_) => {}
                }
                self.keys_seen += entries.len();
                self.rows_seen += entries.iter().map(|e| e.row_ids.len()).sum::<usize>();
                Ok(())
            }
            Node::Internal {
                separators,
                children,
            } => {
                if children.len() != separators.len() + 1 {
                    return Err(violation(format!(
                        "internal node at depth {} has {} separators but {} children",
                        depth,
                        separators.len(),
                        children.len()
                    )));
                }
                if separators.is_empty() {
                    return Err(violation(format!(
                        "internal node at depth {} has no separators",
                        depth
                    )));
                }

                for (i, child) in children.iter().enumerate() {
                    let child_lower = if i == 0 { lower } else { Some(&separators[i - 1]) };
                    let child_upper = separators.get(i).or(upper);
                    self.visit(child.as_ref(), child_lower, child_upper, depth + 1, false)?;
                }
                Ok(())
            }
        }
    }
}

fn violation(message: String) -> TabulaError {
    TabulaError::StructuralInvariantViolation(message)
}

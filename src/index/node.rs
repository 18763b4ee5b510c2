//! Tree nodes
//!
//! A node is either a leaf holding sorted `(key, row ids)` entries, or an
//! internal node holding sorted separator keys and one more child than
//! separators. Children are owned through `Box`; there are no parent links.
//!
//! ## Routing
//! ```text
//!          [ s0 | s1 ]
//!         /     |     \
//!   k < s0  s0<=k<s1  s1 <= k
//! ```
//! A key equal to a separator routes to the right child. Leaf splits copy
//! the first key of the new right leaf upward, so that rule always lands on
//! the leaf that owns the key.

use std::cmp::Ordering;

use super::{KeyComparator, RowId};

/// A key and every row id inserted under it, in insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K> {
    pub key: K,
    pub row_ids: Vec<RowId>,
}

impl<K> Entry<K> {
    fn new(key: K, row_id: RowId) -> Self {
        Self {
            key,
            row_ids: vec![row_id],
        }
    }
}

/// A node of the ordered index
#[derive(Debug)]
pub(crate) enum Node<K> {
    Leaf {
        entries: Vec<Entry<K>>,
    },
    Internal {
        /// Routing-only copies of keys; row ids live in the leaves
        separators: Vec<K>,
        /// Always `separators.len() + 1` children
        children: Vec<Box<Node<K>>>,
    },
}

/// Result of splitting an overfull node
pub(crate) struct Split<K> {
    /// Key promoted to the parent
    pub separator: K,
    /// New right sibling
    pub right: Box<Node<K>>,
}

/// What an insert did to the subtree it was applied to
pub(crate) struct InsertOutcome<K> {
    /// True when the key was not present before
    pub new_key: bool,
    /// Set when the subtree root overflowed and was split
    pub split: Option<Split<K>>,
}

impl<K: Clone> Node<K> {
    /// Create an empty leaf
    pub fn new_leaf() -> Self {
        Node::Leaf {
            entries: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Number of keys (entries or separators) held by this node
    pub fn len(&self) -> usize {
        match self {
            Node::Leaf { entries } => entries.len(),
            Node::Internal { separators, .. } => separators.len(),
        }
    }

    /// Key at position `i` within this node
    pub fn key_at(&self, i: usize) -> &K {
        match self {
            Node::Leaf { entries } => &entries[i].key,
            Node::Internal { separators, .. } => &separators[i],
        }
    }

    /// True once the node holds the maximum `order - 1` keys
    pub fn is_full(&self, order: usize) -> bool {
        self.len() == order - 1
    }

    /// Binary search for `key` among this node's keys
    ///
    /// `Ok(i)` is an exact match at `i`; `Err(i)` is the position that keeps
    /// the keys sorted if `key` were inserted there.
    pub fn find_entry_slot<C>(&self, key: &K, cmp: &C) -> Result<usize, usize>
    where
        C: KeyComparator<K>,
    {
        match self {
            Node::Leaf { entries } => entries.binary_search_by(|e| cmp.compare(&e.key, key)),
            Node::Internal { separators, .. } => {
                separators.binary_search_by(|s| cmp.compare(s, key))
            }
        }
    }

    /// Index of the child whose key range contains `key` (ties go right)
    pub fn child_index<C>(separators: &[K], key: &K, cmp: &C) -> usize
    where
        C: KeyComparator<K>,
    {
        separators.partition_point(|s| cmp.compare(s, key) != Ordering::Greater)
    }

    /// Insert `(key, row_id)` into this subtree
    ///
    /// A node that reaches `order` keys is split before returning, so the
    /// caller only ever sees nodes within capacity plus an optional
    /// separator to absorb.
    pub fn insert<C>(&mut self, key: K, row_id: RowId, order: usize, cmp: &C) -> InsertOutcome<K>
    where
        C: KeyComparator<K>,
    {
        // A full node that gains a key overflows and must split
        let was_full = self.is_full(order);

        match self {
            Node::Leaf { entries } => {
                match entries.binary_search_by(|e| cmp.compare(&e.key, &key)) {
                    Ok(i) => {
                        entries[i].row_ids.push(row_id);
                        return InsertOutcome {
                            new_key: false,
                            split: None,
                        };
                    }
                    Err(i) => entries.insert(i, Entry::new(key, row_id)),
                }

                let split = if was_full {
                    Some(Self::split_leaf(entries))
                } else {
                    None
                };
                InsertOutcome {
                    new_key: true,
                    split,
                }
            }
            Node::Internal {
                separators,
                children,
            } => {
                let idx = Self::child_index(separators, &key, cmp);
                let mut outcome = children[idx].insert(key, row_id, order, cmp);

                if let Some(child_split) = outcome.split.take() {
                    separators.insert(idx, child_split.separator);
                    children.insert(idx + 1, child_split.right);

                    if was_full {
                        outcome.split = Some(Self::split_internal(separators, children));
                    }
                }
                outcome
            }
        }
    }

    /// Move the upper half of an overfull leaf into a new sibling
    ///
    /// The left half keeps `len / 2` entries. The separator is a copy of
    /// the right half's first key; that entry and its row ids stay in the
    /// right leaf.
    fn split_leaf(entries: &mut Vec<Entry<K>>) -> Split<K> {
        let mid = entries.len() / 2;
        let right_entries = entries.split_off(mid);
        let separator = right_entries[0].key.clone();

        Split {
            separator,
            right: Box::new(Node::Leaf {
                entries: right_entries,
            }),
        }
    }

    /// Move the upper half of an overfull internal node into a new sibling
    ///
    /// The median separator moves up; it is not kept on either side.
    fn split_internal(separators: &mut Vec<K>, children: &mut Vec<Box<Node<K>>>) -> Split<K> {
        let mid = separators.len() / 2;
        let right_separators = separators.split_off(mid + 1);
        let right_children = children.split_off(mid + 1);
        let separator = separators.remove(mid);

        Split {
            separator,
            right: Box::new(Node::Internal {
                separators: right_separators,
                children: right_children,
            }),
        }
    }
}

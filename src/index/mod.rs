//! Index Module
//!
//! In-memory ordered index over column values.
//!
//! ## Responsibilities
//! - Map each distinct key to the row ids holding it, in insertion order
//! - Point lookups in O(log n) node visits
//! - Stay sorted and balanced after every insert
//!
//! ## Data Structure Choice
//! A B+-tree of configurable order:
//! - Row ids live only in leaves; internal nodes hold routing copies of keys
//! - Overfull nodes split at the median and push a separator up
//! - Height only grows when the root splits, so all leaves share one depth
//!
//! ```text
//!                 [ c ]
//!               /       \
//!          [ b ]         [ d ]
//!         /     \       /     \
//!     [a:0]  [b:1]   [c:2]  [d:3, e:4]
//! ```
//!
//! There is no key deletion; a column index is only ever dropped whole.

mod compare;
mod node;
mod tree;

pub use compare::{FnComparator, KeyComparator, Lexicographic};
pub use node::Entry;
pub use tree::{IndexStats, Iter, OrderedIndex};

/// Position of a row in the table's row storage at index build time
pub type RowId = usize;

/// Smallest usable branching factor
pub const MIN_ORDER: usize = 3;

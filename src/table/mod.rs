//! Table Module
//!
//! The single loaded table and the indexes built over its columns.
//!
//! ## Responsibilities
//! - Read a delimited text file into a header and rows
//! - Resolve column names to positions
//! - Build and drop per-column ordered indexes
//! - Answer equality selects by index lookup or full scan
//!
//! ## File Format
//! ```text
//! name,id,grade        <- header
//! Alice,a1234,HD       <- row 0
//! Bob,a7654,D          <- row 1
//! ```
//! No quoting and no type inference: every value is a string.

mod registry;
mod store;

pub use registry::ColumnIndexRegistry;
pub use store::Table;

/// One row of values, positioned like the header
pub type Row = Vec<String>;

/// How a select found its rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPath {
    /// Looked up through the column's ordered index
    IndexLookup,

    /// Compared the column in every row
    FullScan,
}

/// Result of a select: the table header plus the matching rows
///
/// Rows are borrowed from the table and listed in ascending row id order
/// on both access paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<'a> {
    pub header: &'a [String],
    pub rows: Vec<&'a Row>,
    pub access: AccessPath,
}

impl Selection<'_> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

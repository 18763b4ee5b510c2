//! Column index registry
//!
//! Maps column names of the loaded table to their ordered indexes.

use std::collections::HashMap;

use crate::error::{Result, TabulaError};
use crate::index::{IndexStats, OrderedIndex};

use super::Table;

/// Indexes built over columns of one table
///
/// Each index is a snapshot of the rows at build time. The registry is
/// created empty with its table and dropped with it.
#[derive(Debug, Default)]
pub struct ColumnIndexRegistry {
    indexes: HashMap<String, OrderedIndex>,
}

impl ColumnIndexRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index over `column` of `table` and register it
    ///
    /// Every row is fed in row id order, so each key's row ids come out
    /// ascending.
    pub fn create_index(&mut self, table: &Table, column: &str, order: usize) -> Result<IndexStats> {
        let position = table.require_column(column)?;
        if self.indexes.contains_key(column) {
            return Err(TabulaError::IndexAlreadyExists(column.to_string()));
        }

        let index = build_index(table, position, order)?;
        let stats = index.stats();
        self.indexes.insert(column.to_string(), index);

        Ok(stats)
    }

    /// Remove the index on `column`
    pub fn drop_index(&mut self, table: &Table, column: &str) -> Result<()> {
        table.require_column(column)?;
        self.indexes
            .remove(column)
            .map(|_| ())
            .ok_or_else(|| TabulaError::IndexNotFound(column.to_string()))
    }

    /// Index on `column`, if one exists
    pub fn get(&self, column: &str) -> Option<&OrderedIndex> {
        self.indexes.get(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.indexes.contains_key(column)
    }

    /// Names of indexed columns, sorted
    pub fn indexed_columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = self.indexes.keys().map(String::as_str).collect();
        columns.sort_unstable();
        columns
    }

    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }
}

/// Scan `table` once, inserting the value at `position` of every row
fn build_index(table: &Table, position: usize, order: usize) -> Result<OrderedIndex> {
    let mut index = OrderedIndex::new(order)?;
    for (value, row_id) in table.column_values(position) {
        index.insert(value.to_string(), row_id);
    }
    Ok(index)
}

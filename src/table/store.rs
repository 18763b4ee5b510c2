//! Row storage
//!
//! Header, column positions and rows of one loaded table.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Result, TabulaError};
use crate::index::RowId;

use super::Row;

/// A loaded table
///
/// Rows are kept exactly as read: no type inference and no check that a
/// row has as many fields as the header.
#[derive(Debug, Clone)]
pub struct Table {
    name: String,

    /// Column names in file order
    header: Vec<String>,

    /// Column name → position in `header` (first occurrence wins)
    columns: HashMap<String, usize>,

    /// Rows in file order; a row's position is its row id
    rows: Vec<Row>,
}

impl Table {
    /// Load a table from a delimited text file
    ///
    /// The first line is the header, every following non-blank line a row.
    pub fn load(name: &str, path: &Path, delimiter: char) -> Result<Self> {
        if !path.is_file() {
            return Err(TabulaError::FileNotFound(path.to_path_buf()));
        }

        let file = File::open(path)?;
        Self::from_reader(name, BufReader::new(file), delimiter)
    }

    /// Load a table from any buffered source
    pub fn from_reader<R: BufRead>(name: &str, reader: R, delimiter: char) -> Result<Self> {
        let mut lines = reader.lines();

        let header = match lines.next() {
            Some(line) => split_fields(&line?, delimiter),
            None => Vec::new(),
        };

        let mut rows = Vec::new();
        for line in lines {
            let line = line?;
            if line.trim_end().is_empty() {
                continue;
            }
            rows.push(split_fields(&line, delimiter));
        }

        Ok(Self::new(name, header, rows))
    }

    /// Build a table from already split header and rows
    pub fn new(name: &str, header: Vec<String>, rows: Vec<Row>) -> Self {
        let mut columns = HashMap::with_capacity(header.len());
        for (position, column) in header.iter().enumerate() {
            columns.entry(column.clone()).or_insert(position);
        }

        Self {
            name: name.to_string(),
            header,
            columns,
            rows,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Position of `column` in the header
    pub fn column_position(&self, column: &str) -> Option<usize> {
        self.columns.get(column).copied()
    }

    /// Position of `column`, or `ColumnNotFound`
    pub fn require_column(&self, column: &str) -> Result<usize> {
        self.column_position(column)
            .ok_or_else(|| TabulaError::ColumnNotFound(column.to_string()))
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, row_id: RowId) -> Option<&Row> {
        self.rows.get(row_id)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Value of the column at `position` in row `row_id`
    ///
    /// `None` for a missing row or a row too short to have that column.
    pub fn value(&self, row_id: RowId, position: usize) -> Option<&str> {
        self.rows.get(row_id)?.get(position).map(String::as_str)
    }

    /// Row ids whose column at `position` equals `value`, in storage order
    pub fn scan(&self, position: usize, value: &str) -> Vec<RowId> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.get(position).is_some_and(|v| v == value))
            .map(|(row_id, _)| row_id)
            .collect()
    }

    /// `(value, row id)` pairs for the column at `position`, in row id order
    ///
    /// Rows too short to have the column are skipped.
    pub fn column_values(&self, position: usize) -> impl Iterator<Item = (&str, RowId)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter_map(move |(row_id, row)| row.get(position).map(|v| (v.as_str(), row_id)))
    }
}

/// Split one line into fields, dropping trailing whitespace first
fn split_fields(line: &str, delimiter: char) -> Vec<String> {
    line.trim_end().split(delimiter).map(str::to_string).collect()
}

//! Error types for Tabula
//!
//! Provides a unified error type for all operations.
//!
//! A lookup that finds nothing is not an error: `OrderedIndex::search`
//! returns `None` and `Database::select_rows` returns an empty selection.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using TabulaError
pub type Result<T> = std::result::Result<T, TabulaError>;

/// Unified error type for Tabula operations
#[derive(Debug, Error)]
pub enum TabulaError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    // -------------------------------------------------------------------------
    // Index Errors
    // -------------------------------------------------------------------------
    #[error("Invalid index order {0}: a node needs at least 3 children")]
    InvalidOrder(usize),

    #[error("Index structure corrupted: {0}")]
    StructuralInvariantViolation(String),

    // -------------------------------------------------------------------------
    // Table Errors
    // -------------------------------------------------------------------------
    #[error("No table loaded")]
    NoTableLoaded,

    #[error("Table {0} does not exist")]
    TableNotFound(String),

    #[error("Column {0} does not exist")]
    ColumnNotFound(String),

    #[error("Index already exists on {0}")]
    IndexAlreadyExists(String),

    #[error("No index exists on {0}")]
    IndexNotFound(String),

    // -------------------------------------------------------------------------
    // Command Errors
    // -------------------------------------------------------------------------
    #[error("Command error: {0}")]
    Command(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

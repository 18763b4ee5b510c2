//! # Tabula
//!
//! A minimal single-table store answering equality selects, with:
//! - Delimited text file loading (one table at a time)
//! - Per-column ordered indexes built on demand
//! - Index lookups with a full-scan fallback
//! - A line-oriented command shell
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Shell / CLI                             │
//! │          (load, select, create_index, drop_index)           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Database                               │
//! │               (Option<loaded table>)                        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌────────────────┐
//!   │    Table    │          │ Index Registry │
//!   │ (rows, hdr) │          │ (column→tree)  │
//!   └─────────────┘          └───────┬────────┘
//!                                    │
//!                                    ▼
//!                            ┌───────────────┐
//!                            │ OrderedIndex  │
//!                            │   (B+-tree)   │
//!                            └───────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod index;
pub mod table;
pub mod shell;
pub mod database;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{TabulaError, Result};
pub use config::Config;
pub use database::Database;
pub use index::OrderedIndex;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of Tabula
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

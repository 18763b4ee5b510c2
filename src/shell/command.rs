//! Command definitions
//!
//! Represents commands typed at the shell or read from a script.

use std::path::PathBuf;

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Load a table from a file, replacing the loaded one
    Load { table: String, path: PathBuf },

    /// Select rows whose column equals a value
    Select {
        table: String,
        column: String,
        value: String,
    },

    /// Build an index over a column
    CreateIndex { column: String },

    /// Remove the index on a column
    DropIndex { column: String },

    /// List indexed columns
    Indexes,

    /// Print command usage
    Help,

    /// End the session
    Quit,
}

impl Command {
    /// Keyword the command is spelled with
    pub fn name(&self) -> &'static str {
        match self {
            Command::Load { .. } => "load",
            Command::Select { .. } => "select",
            Command::CreateIndex { .. } => "create_index",
            Command::DropIndex { .. } => "drop_index",
            Command::Indexes => "indexes",
            Command::Help => "help",
            Command::Quit => "quit",
        }
    }
}

//! Command output
//!
//! What a command produced, rendered for the terminal.

use std::fmt;

use crate::index::IndexStats;
use crate::table::{AccessPath, Row};

/// Usage text printed by `help`
pub const HELP_TEXT: &str = "\
commands:
  load <table> <file>               load a table, replacing the current one
  select <table> <column> <value>   rows whose column equals value
  create_index <column>             build an index over a column
  drop_index <column>               remove the index on a column
  indexes                           list indexed columns
  help                              show this text
  quit                              leave";

/// Result of executing a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Loaded {
        table: String,
        columns: usize,
        rows: usize,
    },
    Selected {
        header: Vec<String>,
        rows: Vec<Row>,
        access: AccessPath,
    },
    IndexCreated {
        column: String,
        stats: IndexStats,
    },
    IndexDropped {
        column: String,
    },
    Indexes(Vec<String>),
    Help,
    Quit,
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Loaded {
                table,
                columns,
                rows,
            } => write!(f, "loaded {} ({} columns, {} rows)", table, columns, rows),
            Output::Selected { header, rows, .. } => {
                write!(f, "{}", header.join(","))?;
                for row in rows {
                    write!(f, "\n{}", row.join(","))?;
                }
                write!(f, "\n({} rows)", rows.len())
            }
            Output::IndexCreated { column, stats } => write!(
                f,
                "created index on {} ({} keys, height {})",
                column, stats.key_count, stats.height
            ),
            Output::IndexDropped { column } => write!(f, "dropped index on {}", column),
            Output::Indexes(columns) if columns.is_empty() => write!(f, "no indexes"),
            Output::Indexes(columns) => write!(f, "{}", columns.join("\n")),
            Output::Help => write!(f, "{}", HELP_TEXT),
            Output::Quit => Ok(()),
        }
    }
}

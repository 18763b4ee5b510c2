//! Shell Module
//!
//! The line-oriented command surface over a `Database`.
//!
//! ```text
//! > load students students.csv
//! loaded students (3 columns, 2 rows)
//! > create_index grade
//! created index on grade (2 keys, height 0)
//! > select students grade HD
//! name,id,grade
//! Alice,a1234,HD
//! (1 rows)
//! ```

mod command;
mod output;
mod parser;

pub use command::Command;
pub use output::{Output, HELP_TEXT};
pub use parser::parse_command;

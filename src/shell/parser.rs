//! Command parser
//!
//! Turns one line of text into a `Command`.
//!
//! ## Grammar
//! ```text
//! load <table> <file>
//! select <table> <column> <value>
//! create_index <column>
//! drop_index <column>
//! indexes | help | quit | exit
//! ```
//! Keywords are case-insensitive and `-` may stand in for `_`. The last
//! argument of `load` and `select` runs to the end of the line, so file
//! names and values may contain spaces; wrap a value in double quotes to
//! keep leading/trailing spaces or to select the empty string.

use crate::error::{Result, TabulaError};

use super::Command;

/// Parse one line
///
/// Returns `Ok(None)` for blank lines and `#` comments.
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (keyword, rest) = next_token(line);
    let keyword = keyword.to_ascii_lowercase().replace('-', "_");

    let command = match keyword.as_str() {
        "load" => {
            let (table, path) = next_token(rest);
            require("load", table, "<table>")?;
            require("load", path, "<file>")?;
            Command::Load {
                table: table.to_string(),
                path: path.into(),
            }
        }
        "select" => {
            let (table, rest) = next_token(rest);
            let (column, value) = next_token(rest);
            require("select", table, "<table>")?;
            require("select", column, "<column>")?;
            require("select", value, "<value>")?;
            Command::Select {
                table: table.to_string(),
                column: column.to_string(),
                value: unquote(value).to_string(),
            }
        }
        "create_index" => Command::CreateIndex {
            column: single_argument("create_index", rest)?,
        },
        "drop_index" => Command::DropIndex {
            column: single_argument("drop_index", rest)?,
        },
        "indexes" => no_arguments(Command::Indexes, rest)?,
        "help" => no_arguments(Command::Help, rest)?,
        "quit" | "exit" => no_arguments(Command::Quit, rest)?,
        other => {
            return Err(TabulaError::Command(format!(
                "unknown command '{}' (try 'help')",
                other
            )))
        }
    };

    Ok(Some(command))
}

/// Split off the first whitespace-delimited token
fn next_token(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(end) => (&input[..end], input[end..].trim()),
        None => (input, ""),
    }
}

fn require(command: &str, argument: &str, name: &str) -> Result<()> {
    if argument.is_empty() {
        return Err(TabulaError::Command(format!(
            "{} is missing {}",
            command, name
        )));
    }
    Ok(())
}

fn single_argument(command: &str, rest: &str) -> Result<String> {
    let (argument, extra) = next_token(rest);
    require(command, argument, "<column>")?;
    if !extra.is_empty() {
        return Err(TabulaError::Command(format!(
            "{} takes one argument, got extra '{}'",
            command, extra
        )));
    }
    Ok(argument.to_string())
}

fn no_arguments(command: Command, rest: &str) -> Result<Command> {
    if !rest.is_empty() {
        return Err(TabulaError::Command(format!(
            "{} takes no arguments",
            command.name()
        )));
    }
    Ok(command)
}

/// Strip one pair of surrounding double quotes
fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

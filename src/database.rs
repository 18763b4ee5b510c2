//! Database Module
//!
//! Holds the one loaded table and coordinates it with its column indexes.
//!
//! ## Responsibilities
//! - Load a table, discarding the previous table and all of its indexes
//! - Create and drop column indexes on demand
//! - Route selects through an index when one exists, else scan
//! - Execute parsed shell commands

use std::path::Path;

use crate::config::Config;
use crate::error::{Result, TabulaError};
use crate::index::IndexStats;
use crate::shell::{Command, Output};
use crate::table::{AccessPath, ColumnIndexRegistry, Selection, Table};

/// A table together with the indexes built over it
#[derive(Debug)]
struct LoadedTable {
    table: Table,
    indexes: ColumnIndexRegistry,
}

/// The single-table database
///
/// ## Lifecycle
/// ```text
///   empty ──load──▶ loaded ──load──▶ loaded (new table, no indexes)
///                     │  ▲
///          create_index / drop_index
/// ```
///
/// All operations run to completion on the caller's thread. Index builds
/// take `&mut self`, so no select can observe a half-built index.
#[derive(Debug, Default)]
pub struct Database {
    config: Config,

    /// `None` until a table is loaded
    current: Option<LoadedTable>,
}

impl Database {
    /// Create an empty database
    ///
    /// Fails when the configuration is invalid (e.g. index order below 3).
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            current: None,
        })
    }

    /// Load `table_name` from a delimited file
    ///
    /// On success the previous table and its indexes are dropped. On
    /// failure the previous table stays loaded.
    pub fn load_table(&mut self, table_name: &str, path: &Path) -> Result<&Table> {
        tracing::info!("loading {} from {}", table_name, path.display());
        let table = Table::load(table_name, path, self.config.delimiter)?;
        Ok(self.install(table))
    }

    /// Replace the loaded table with one built elsewhere
    pub fn load(&mut self, table: Table) -> &Table {
        self.install(table)
    }

    fn install(&mut self, table: Table) -> &Table {
        if let Some(previous) = self.current.take() {
            tracing::debug!(
                "dropping table {} with {} indexes",
                previous.table.name(),
                previous.indexes.len()
            );
        }

        tracing::info!(
            "loaded {}: {} columns, {} rows",
            table.name(),
            table.header().len(),
            table.row_count()
        );

        let loaded = self.current.insert(LoadedTable {
            table,
            indexes: ColumnIndexRegistry::new(),
        });
        &loaded.table
    }

    /// Name of the loaded table
    pub fn table_name(&self) -> Option<&str> {
        self.current.as_ref().map(|loaded| loaded.table.name())
    }

    /// The loaded table
    pub fn table(&self) -> Option<&Table> {
        self.current.as_ref().map(|loaded| &loaded.table)
    }

    /// Select rows of `table_name` whose `column_name` equals `value`
    ///
    /// Uses the column's index if there is one, otherwise scans every row.
    /// Both paths return the same rows in ascending row id order.
    pub fn select_rows(
        &self,
        table_name: &str,
        column_name: &str,
        value: &str,
    ) -> Result<Selection<'_>> {
        let loaded = self.loaded()?;
        let table = &loaded.table;
        if table.name() != table_name {
            return Err(TabulaError::TableNotFound(table_name.to_string()));
        }
        let position = table.require_column(column_name)?;

        let (row_ids, access) = match loaded.indexes.get(column_name) {
            Some(index) => {
                let row_ids = index
                    .search(&value.to_string())
                    .map(<[usize]>::to_vec)
                    .unwrap_or_default();
                (row_ids, AccessPath::IndexLookup)
            }
            None => (table.scan(position, value), AccessPath::FullScan),
        };

        tracing::debug!(
            column = column_name,
            ?access,
            matches = row_ids.len(),
            "select"
        );

        Ok(Selection {
            header: table.header(),
            rows: row_ids.into_iter().filter_map(|id| table.row(id)).collect(),
            access,
        })
    }

    /// Build an index over `column_name` of the loaded table
    pub fn create_index(&mut self, column_name: &str) -> Result<IndexStats> {
        let order = self.config.index_order;
        let loaded = self.loaded_mut()?;

        let stats = loaded
            .indexes
            .create_index(&loaded.table, column_name, order)?;

        tracing::info!(
            "created index on {}: {} keys, {} rows, height {}, {} nodes",
            column_name,
            stats.key_count,
            stats.row_count,
            stats.height,
            stats.node_count
        );
        Ok(stats)
    }

    /// Drop the index on `column_name`
    pub fn drop_index(&mut self, column_name: &str) -> Result<()> {
        let loaded = self.loaded_mut()?;
        loaded.indexes.drop_index(&loaded.table, column_name)?;

        tracing::info!("dropped index on {}", column_name);
        Ok(())
    }

    /// Indexed columns of the loaded table, sorted (empty if none loaded)
    pub fn indexed_columns(&self) -> Vec<&str> {
        self.current
            .as_ref()
            .map(|loaded| loaded.indexes.indexed_columns())
            .unwrap_or_default()
    }

    /// The index registry of the loaded table
    pub fn indexes(&self) -> Option<&ColumnIndexRegistry> {
        self.current.as_ref().map(|loaded| &loaded.indexes)
    }

    /// Execute a command
    ///
    /// Routes commands to appropriate handlers
    pub fn execute(&mut self, command: Command) -> Result<Output> {
        match command {
            Command::Load { table, path } => {
                let loaded = self.load_table(&table, &path)?;
                Ok(Output::Loaded {
                    table: loaded.name().to_string(),
                    columns: loaded.header().len(),
                    rows: loaded.row_count(),
                })
            }
            Command::Select {
                table,
                column,
                value,
            } => {
                let selection = self.select_rows(&table, &column, &value)?;
                Ok(Output::Selected {
                    header: selection.header.to_vec(),
                    rows: selection.rows.into_iter().cloned().collect(),
                    access: selection.access,
                })
            }
            Command::CreateIndex { column } => {
                let stats = self.create_index(&column)?;
                Ok(Output::IndexCreated { column, stats })
            }
            Command::DropIndex { column } => {
                self.drop_index(&column)?;
                Ok(Output::IndexDropped { column })
            }
            Command::Indexes => Ok(Output::Indexes(
                self.indexed_columns()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            )),
            Command::Help => Ok(Output::Help),
            Command::Quit => Ok(Output::Quit),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn loaded(&self) -> Result<&LoadedTable> {
        self.current.as_ref().ok_or(TabulaError::NoTableLoaded)
    }

    fn loaded_mut(&mut self) -> Result<&mut LoadedTable> {
        self.current.as_mut().ok_or(TabulaError::NoTableLoaded)
    }
}

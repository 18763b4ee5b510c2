//! Configuration for Tabula
//!
//! Centralized configuration with sensible defaults.

use crate::error::{Result, TabulaError};
use crate::index::MIN_ORDER;

/// Default branching factor for new column indexes
pub const DEFAULT_INDEX_ORDER: usize = 4;

/// Default field delimiter for table files
pub const DEFAULT_DELIMITER: char = ',';

/// Main configuration for a Tabula database
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Index Configuration
    // -------------------------------------------------------------------------
    /// Branching factor used for every index created by `create_index`
    /// (max children per node; a node holds at most `index_order - 1` keys)
    pub index_order: usize,

    // -------------------------------------------------------------------------
    // Loader Configuration
    // -------------------------------------------------------------------------
    /// Field delimiter used when splitting header and row lines
    pub delimiter: char,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index_order: DEFAULT_INDEX_ORDER,
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the configuration before a database is built from it
    pub fn validate(&self) -> Result<()> {
        if self.index_order < MIN_ORDER {
            return Err(TabulaError::InvalidOrder(self.index_order));
        }
        if self.delimiter == '\n' || self.delimiter == '\r' {
            return Err(TabulaError::Config(
                "delimiter cannot be a line terminator".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the branching factor for new indexes
    pub fn index_order(mut self, order: usize) -> Self {
        self.config.index_order = order;
        self
    }

    /// Set the field delimiter for table files
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.config.delimiter = delimiter;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

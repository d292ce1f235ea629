//! Executor module for csvql queries.
//!
//! The executor runs a parsed clause list against any table provider that
//! implements the [`TableSource`] trait.

mod helpers;
mod local;

pub use helpers::{resolve_columns, Predicate};
pub use local::Executor;

use std::collections::HashMap;

use crate::error::{QueryError, QueryResult};
use crate::table::Table;

/// Trait for anything that can hand the executor a table by name.
///
/// A fresh table is loaded for every execution; implementations should not
/// cache between calls.
pub trait TableSource {
    /// Load a table with its headers upper-cased.
    ///
    /// # Errors
    /// * `QueryError::NotFound` - no backing source for `name`
    /// * `QueryError::MalformedSource` - the source has no header row or is unreadable
    fn load(&self, name: &str) -> QueryResult<Table>;
}

impl<T: TableSource + ?Sized> TableSource for &T {
    fn load(&self, name: &str) -> QueryResult<Table> {
        (**self).load(name)
    }
}

/// In-memory table source for testing and embedding
#[derive(Debug, Default, Clone)]
pub struct InMemorySource {
    tables: HashMap<String, Table>,
}

impl InMemorySource {
    /// Create a new empty in-memory source
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table. Headers are upper-cased.
    pub fn add_table(&mut self, name: &str, headers: &[&str], rows: &[&[&str]]) {
        let headers = headers.iter().map(|h| h.to_string()).collect();
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect();
        self.tables
            .insert(name.to_string(), Table::new(name, headers, rows));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }
}

impl TableSource for InMemorySource {
    fn load(&self, name: &str) -> QueryResult<Table> {
        let table = self
            .tables
            .get(name)
            .ok_or_else(|| QueryError::NotFound(name.to_string()))?;
        if table.headers.is_empty() {
            return Err(QueryError::malformed(name, "source has no header row"));
        }
        Ok(table.clone())
    }
}

//! CSV-backed table source.
//!
//! A table named `users` is the file `users.csv` under the data directory. The
//! first record is the header row; every record must have the same width.

use std::io::ErrorKind;
use std::path::PathBuf;

use csvql_core::{QueryError, QueryResult, Table, TableSource};

#[derive(Debug, Clone)]
pub struct CsvDirectory {
    base: PathBuf,
}

impl CsvDirectory {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Path backing a table name.
    pub fn table_path(&self, name: &str) -> PathBuf {
        self.base.join(format!("{}.csv", name))
    }
}

impl TableSource for CsvDirectory {
    fn load(&self, name: &str) -> QueryResult<Table> {
        let path = self.table_path(name);
        let source_name = path.display().to_string();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(&path)
            .map_err(|e| match e.kind() {
                csv::ErrorKind::Io(io) if io.kind() == ErrorKind::NotFound => {
                    QueryError::NotFound(source_name.clone())
                }
                _ => QueryError::malformed(&source_name, e.to_string()),
            })?;

        let mut records = reader.records();
        let headers: Vec<String> = match records.next() {
            Some(record) => record
                .map_err(|e| QueryError::malformed(&source_name, e.to_string()))?
                .iter()
                .map(str::to_string)
                .collect(),
            None => return Err(QueryError::malformed(&source_name, "source has no header row")),
        };

        let rows = records
            .map(|record| {
                record
                    .map(|r| r.iter().map(str::to_string).collect())
                    .map_err(|e| QueryError::malformed(&source_name, e.to_string()))
            })
            .collect::<QueryResult<Vec<Vec<String>>>>()?;

        tracing::debug!(path = %source_name, rows = rows.len(), "loaded csv table");
        Ok(Table::new(name, headers, rows))
    }
}

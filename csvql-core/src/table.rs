//! In-memory table and result set types.

use serde::Serialize;

/// A loaded table. Headers are upper-cased on construction; cells are kept
/// exactly as read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            headers: headers.into_iter().map(|h| h.to_uppercase()).collect(),
            rows,
        }
    }

    /// Position of a header, matched exactly against the upper-cased headers.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Output of one query: the selected headers followed by the selected rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ResultSet {
    /// Header row first, then data rows.
    pub fn lines(&self) -> impl Iterator<Item = &[String]> {
        std::iter::once(self.columns.as_slice()).chain(self.rows.iter().map(Vec::as_slice))
    }

    pub fn into_rows(self) -> Vec<Vec<String>> {
        let mut out = Vec::with_capacity(self.rows.len() + 1);
        out.push(self.columns);
        out.extend(self.rows);
        out
    }
}

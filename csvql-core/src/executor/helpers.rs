//! Column resolution and row filtering used by the executor.

use crate::ast::{SelectColumns, WhereClause};
use crate::error::{QueryError, QueryResult};
use crate::table::Table;

/// Map a SELECT column list to header positions.
///
/// `*` expands to every header in order. Named columns are matched exactly
/// against the (already upper-cased) headers and the first miss is reported.
/// An empty list names the empty column, which no table has.
pub fn resolve_columns(columns: &SelectColumns, table: &Table) -> QueryResult<Vec<usize>> {
    match columns {
        SelectColumns::All => Ok((0..table.headers.len()).collect()),
        SelectColumns::Named(names) if names.is_empty() => {
            Err(QueryError::UnknownColumn(String::new()))
        }
        SelectColumns::Named(names) => names
            .iter()
            .map(|name| {
                table
                    .column_index(name)
                    .ok_or_else(|| QueryError::UnknownColumn(name.clone()))
            })
            .collect(),
    }
}

/// A WHERE clause bound to a concrete table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate<'a> {
    pub column: usize,
    pub value: &'a str,
}

impl<'a> Predicate<'a> {
    /// Check the operator and resolve the column once, before any row is scanned.
    pub fn bind(clause: &'a WhereClause, table: &Table) -> QueryResult<Self> {
        if !clause.is_equality() {
            return Err(QueryError::UnsupportedOperator(clause.operator.clone()));
        }
        let column = table
            .column_index(&clause.left_column)
            .ok_or_else(|| QueryError::UnknownColumn(clause.left_column.clone()))?;
        Ok(Self {
            column,
            value: &clause.right_literal,
        })
    }

    /// Exact string equality, no coercion.
    pub fn matches(&self, row: &[String]) -> bool {
        row.get(self.column).map(String::as_str) == Some(self.value)
    }
}

pub(crate) fn project(row: &[String], indices: &[usize]) -> Vec<String> {
    indices
        .iter()
        .map(|&i| row.get(i).cloned().unwrap_or_default())
        .collect()
}

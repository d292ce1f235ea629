//! Clause-level representation of a parsed query.
//!
//! A query is an ordered list of clauses. Duplicate or out-of-order clauses are
//! kept as written; the executor resolves them with last-one-wins.

use serde::{Serialize, Serializer};

use crate::error::{QueryError, QueryResult};

/// A parsed query, clauses in source order.
pub type Query = Vec<ClauseNode>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum ClauseNode {
    Select(SelectClause),
    From(FromClause),
    Where(WhereClause),
    Limit(LimitClause),
}

impl ClauseNode {
    /// Keyword that introduced this clause.
    pub fn keyword(&self) -> &'static str {
        match self {
            ClauseNode::Select(_) => "SELECT",
            ClauseNode::From(_) => "FROM",
            ClauseNode::Where(_) => "WHERE",
            ClauseNode::Limit(_) => "LIMIT",
        }
    }
}

/// Column list of a SELECT clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectColumns {
    /// `SELECT *`
    All,
    /// Upper-cased column names in the order written
    Named(Vec<String>),
}

impl Serialize for SelectColumns {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            SelectColumns::All => serializer.serialize_str("*"),
            SelectColumns::Named(columns) => columns.serialize(serializer),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectClause {
    pub columns: SelectColumns,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FromClause {
    /// Table name as written, words joined by a single space
    pub table_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WhereClause {
    /// Upper-cased column name
    pub left_column: String,
    /// Operator text; only `=` survives execution
    pub operator: String,
    /// Right-hand value with enclosing single quotes removed
    pub right_literal: String,
}

impl WhereClause {
    pub const EQUALS: &'static str = "=";

    pub fn is_equality(&self) -> bool {
        self.operator == Self::EQUALS
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LimitClause {
    /// Count as written in the query
    pub count: String,
}

impl LimitClause {
    /// Interpret the count as a non-negative row limit.
    pub fn row_limit(&self) -> QueryResult<usize> {
        let value: i64 = self
            .count
            .parse()
            .map_err(|_| QueryError::InvalidLimit(self.count.clone()))?;
        usize::try_from(value).map_err(|_| QueryError::InvalidLimit(self.count.clone()))
    }
}

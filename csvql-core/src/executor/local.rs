//! Executes parsed csvql queries against a [`TableSource`].

use crate::ast::*;
use crate::error::{QueryError, QueryResult};
use crate::parser;
use crate::table::{ResultSet, Table};

use super::helpers::{project, resolve_columns, Predicate};
use super::TableSource;

/// Clause values collected from one left-to-right scan. Later clauses of the
/// same kind replace earlier ones.
struct ClauseScan<'a> {
    columns: Option<&'a SelectColumns>,
    table: Option<Table>,
    predicate: Option<&'a WhereClause>,
    limit: Option<usize>,
}

impl<'a> ClauseScan<'a> {
    /// Every FROM loads its table when it is reached, so a failing source
    /// stops the scan even if a later FROM would succeed.
    fn collect<S: TableSource>(clauses: &'a [ClauseNode], source: &S) -> QueryResult<Self> {
        let mut scan = Self {
            columns: None,
            table: None,
            predicate: None,
            limit: None,
        };
        for clause in clauses {
            match clause {
                ClauseNode::Select(select) => scan.columns = Some(&select.columns),
                ClauseNode::From(from) => {
                    let table = source.load(&from.table_name)?;
                    tracing::debug!(
                        table = %table.name,
                        rows = table.row_count(),
                        columns = table.headers.len(),
                        "table loaded"
                    );
                    scan.table = Some(table);
                }
                ClauseNode::Where(where_clause) => scan.predicate = Some(where_clause),
                ClauseNode::Limit(limit) => scan.limit = Some(limit.row_limit()?),
            }
        }
        Ok(scan)
    }
}

/// Query executor.
///
/// Owns nothing but its table source; every FROM loads its table anew.
pub struct Executor<S: TableSource> {
    source: S,
}

impl<S: TableSource> Executor<S> {
    /// Create a new executor with the given table source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Parse and execute a query string.
    pub fn execute(&self, query: &str) -> QueryResult<ResultSet> {
        let clauses = parser::parse(query)?;
        self.execute_clauses(&clauses)
    }

    /// Execute an already parsed clause list.
    pub fn execute_clauses(&self, clauses: &[ClauseNode]) -> QueryResult<ResultSet> {
        let scan = ClauseScan::collect(clauses, &self.source)?;
        let table = scan.table.ok_or(QueryError::MissingFrom)?;

        let indices = resolve_columns(scan.columns.unwrap_or(&SelectColumns::All), &table)?;
        let predicate = scan
            .predicate
            .map(|clause| Predicate::bind(clause, &table))
            .transpose()?;

        let columns = project(&table.headers, &indices);
        let mut rows = Vec::new();
        for row in &table.rows {
            if scan.limit.is_some_and(|limit| rows.len() >= limit) {
                break;
            }
            if predicate.as_ref().is_some_and(|p| !p.matches(row)) {
                continue;
            }
            rows.push(project(row, &indices));
        }

        tracing::debug!(matched = rows.len(), "query executed");
        Ok(ResultSet { columns, rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::InMemorySource;

    fn users() -> Executor<InMemorySource> {
        let mut source = InMemorySource::new();
        source.add_table(
            "users",
            &["name", "age", "city"],
            &[
                &["Alice", "30", "Oslo"],
                &["Bob", "25", "Lima"],
                &["Carol", "25", "Oslo"],
                &["Dave", "41", "Oslo"],
            ],
        );
        Executor::new(source)
    }

    fn rows(result: &ResultSet) -> Vec<Vec<&str>> {
        result
            .rows
            .iter()
            .map(|r| r.iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn test_select_star() {
        let result = users().execute("SELECT * FROM users").unwrap();
        assert_eq!(result.columns, vec!["NAME", "AGE", "CITY"]);
        assert_eq!(result.rows.len(), 4);
    }

    #[test]
    fn test_select_order_follows_query() {
        let result = users().execute("SELECT city, name FROM users").unwrap();
        assert_eq!(result.columns, vec!["CITY", "NAME"]);
        assert_eq!(rows(&result)[0], vec!["Oslo", "Alice"]);
    }

    #[test]
    fn test_where_equality() {
        let result = users()
            .execute("SELECT name FROM users WHERE age = '25'")
            .unwrap();
        assert_eq!(rows(&result), vec![vec!["Bob"], vec!["Carol"]]);
    }

    #[test]
    fn test_where_is_not_numeric() {
        let result = users()
            .execute("SELECT name FROM users WHERE age = 25.0")
            .unwrap();
        assert!(result.rows.is_empty());
    }

    #[test]
    fn test_limit_counts_matching_rows() {
        let result = users()
            .execute("SELECT name FROM users WHERE city = Oslo LIMIT 2")
            .unwrap();
        assert_eq!(rows(&result), vec![vec!["Alice"], vec!["Carol"]]);
    }

    #[test]
    fn test_limit_zero_keeps_header() {
        let result = users().execute("SELECT * FROM users LIMIT 0").unwrap();
        assert_eq!(result.columns.len(), 3);
        assert!(result.rows.is_empty());
    }

    #[test]
    fn test_limit_larger_than_table() {
        let result = users().execute("SELECT * FROM users LIMIT 100").unwrap();
        assert_eq!(result.rows.len(), 4);
    }

    #[test]
    fn test_missing_from() {
        assert_eq!(
            users().execute("SELECT name"),
            Err(QueryError::MissingFrom)
        );
    }

    #[test]
    fn test_missing_table() {
        assert_eq!(
            users().execute("SELECT * FROM orders"),
            Err(QueryError::NotFound("orders".to_string()))
        );
    }

    #[test]
    fn test_unknown_select_column() {
        assert_eq!(
            users().execute("SELECT foo FROM users"),
            Err(QueryError::UnknownColumn("FOO".to_string()))
        );
    }

    #[test]
    fn test_where_errors_ignore_limit() {
        assert_eq!(
            users().execute("SELECT * FROM users WHERE zip = 1 LIMIT 0"),
            Err(QueryError::UnknownColumn("ZIP".to_string()))
        );
        assert_eq!(
            users().execute("SELECT * FROM users WHERE age > 1 LIMIT 0"),
            Err(QueryError::UnsupportedOperator(">".to_string()))
        );
    }

    #[test]
    fn test_invalid_limit() {
        assert_eq!(
            users().execute("SELECT * FROM users LIMIT -3"),
            Err(QueryError::InvalidLimit("-3".to_string()))
        );
        assert_eq!(
            users().execute("SELECT * FROM users LIMIT many"),
            Err(QueryError::InvalidLimit("many".to_string()))
        );
    }

    #[test]
    fn test_last_clause_wins() {
        let mut source = InMemorySource::new();
        source.add_table("a", &["x"], &[&["1"], &["2"]]);
        source.add_table("b", &["y"], &[&["3"], &["4"], &["5"]]);
        let executor = Executor::new(source);

        let result = executor
            .execute("SELECT x FROM a SELECT y FROM b LIMIT 1 LIMIT 2")
            .unwrap();
        assert_eq!(result.columns, vec!["Y"]);
        assert_eq!(rows(&result), vec![vec!["3"], vec!["4"]]);
    }

    #[test]
    fn test_select_defaults_to_all_columns() {
        let result = users().execute("FROM users LIMIT 1").unwrap();
        assert_eq!(result.columns, vec!["NAME", "AGE", "CITY"]);
        assert_eq!(rows(&result), vec![vec!["Alice", "30", "Oslo"]]);
    }

    #[test]
    fn test_repeat_execution_is_identical() {
        let executor = users();
        let first = executor.execute("SELECT name FROM users WHERE city = 'Oslo'").unwrap();
        let second = executor.execute("SELECT name FROM users WHERE city = 'Oslo'").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_every_from_is_loaded() {
        assert_eq!(
            users().execute("SELECT * FROM missing FROM users"),
            Err(QueryError::NotFound("missing".to_string()))
        );

        let result = users().execute("SELECT * FROM users FROM users LIMIT 1").unwrap();
        assert_eq!(result.rows.len(), 1);
    }

    #[test]
    fn test_load_error_precedes_later_limit_error() {
        assert_eq!(
            users().execute("SELECT * FROM missing LIMIT -1"),
            Err(QueryError::NotFound("missing".to_string()))
        );
        assert_eq!(
            users().execute("LIMIT -1 SELECT * FROM missing"),
            Err(QueryError::InvalidLimit("-1".to_string()))
        );
    }

    #[test]
    fn test_empty_select_list_is_unknown_column() {
        assert_eq!(
            users().execute("SELECT FROM users"),
            Err(QueryError::UnknownColumn(String::new()))
        );
    }

    #[test]
    fn test_empty_from_is_a_load_failure() {
        assert_eq!(
            users().execute("SELECT * FROM"),
            Err(QueryError::NotFound(String::new()))
        );
    }
}

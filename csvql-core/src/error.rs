//! Error types for csvql-core.
//!
//! Every failure is terminal for the query that raised it. Variants carry the
//! offending value so the message can be shown to the user as-is.

use thiserror::Error;

/// Query error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Syntax error near '{token}': {reason}")]
    Syntax { token: String, reason: String },

    #[error("Unexpected token: {0}")]
    UnexpectedToken(String),

    #[error("Source not found: {0}")]
    NotFound(String),

    #[error("Malformed source '{source_name}': {reason}")]
    MalformedSource { source_name: String, reason: String },

    #[error("No FROM clause found")]
    MissingFrom,

    #[error("Column {0} not found in table")]
    UnknownColumn(String),

    #[error("Invalid LIMIT value: {0}")]
    InvalidLimit(String),

    #[error("Unsupported operator '{0}': only equality (=) is supported in WHERE clause")]
    UnsupportedOperator(String),
}

impl QueryError {
    pub(crate) fn syntax(token: impl Into<String>, reason: impl Into<String>) -> Self {
        QueryError::Syntax {
            token: token.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        QueryError::MalformedSource {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;

impl serde::Serialize for QueryError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

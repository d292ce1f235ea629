//! csvql Core - Storage-independent tokenizer, parser and executor for a small
//! SQL subset (`SELECT`, `FROM`, `WHERE`, `LIMIT`).
//!
//! This crate does no file I/O. Tables come from a [`TableSource`]
//! implementation supplied by the caller.
//!
//! # Main Components
//!
//! - **Lexer**: splits query text into tokens
//! - **Parser**: turns tokens into an ordered list of clauses
//! - **Executor**: runs a clause list against a `TableSource`
//!
//! # Example
//!
//! ```rust
//! use csvql_core::{Executor, InMemorySource};
//!
//! let mut source = InMemorySource::new();
//! source.add_table("users", &["name", "age"], &[&["Alice", "30"], &["Bob", "25"]]);
//!
//! let executor = Executor::new(source);
//! let result = executor.execute("SELECT * FROM users WHERE AGE = '25'").unwrap();
//! assert_eq!(result.columns, vec!["NAME", "AGE"]);
//! assert_eq!(result.rows, vec![vec!["Bob", "25"]]);
//! ```

pub mod ast;
pub mod error;
pub mod executor;
pub mod lexer;
pub mod parser;
pub mod table;

pub use ast::{
    ClauseNode, FromClause, LimitClause, Query, SelectClause, SelectColumns, WhereClause,
};
pub use error::{QueryError, QueryResult};
pub use executor::{Executor, InMemorySource, Predicate, TableSource};
pub use lexer::{tokenize, Lexer, Token};
pub use parser::{parse, Parser};
pub use table::{ResultSet, Table};

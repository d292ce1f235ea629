//! Clause parser for the csvql query language.
//!
//! One forward pass over the token list. Each clause keyword consumes the
//! tokens that belong to it; nothing checks clause order or repetition.

use crate::ast::*;
use crate::error::{QueryError, QueryResult};
use crate::lexer::{self, Token};


/// Clause keywords, in the order they usually appear.
pub const KEYWORDS: [&str; 4] = ["SELECT", "FROM", "WHERE", "LIMIT"];

fn is_clause_keyword(token: &Token) -> bool {
    KEYWORDS.iter().any(|kw| token.is_keyword(kw))
}

/// Tokenize and parse a query string.
pub fn parse(input: &str) -> QueryResult<Query> {
    Parser::new(lexer::tokenize(input)).parse()
}

pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    fn remaining(&self) -> usize {
        self.tokens.len() - self.position
    }

    pub fn parse(mut self) -> QueryResult<Query> {
        let mut clauses = Vec::new();

        while let Some(token) = self.current_token() {
            let keyword = match token {
                Token::Word(word) => word.to_uppercase(),
                other => return Err(QueryError::UnexpectedToken(other.text().to_uppercase())),
            };
            let clause = match keyword.as_str() {
                "SELECT" => self.parse_select()?,
                "FROM" => self.parse_from()?,
                "WHERE" => self.parse_where()?,
                "LIMIT" => self.parse_limit()?,
                _ => return Err(QueryError::UnexpectedToken(keyword)),
            };
            tracing::trace!(clause = clause.keyword(), "parsed clause");
            clauses.push(clause);
        }

        Ok(clauses)
    }

    fn parse_select(&mut self) -> QueryResult<ClauseNode> {
        self.advance(); // SELECT

        let mut columns = Vec::new();
        while let Some(token) = self.current_token() {
            if token.is_keyword("FROM") {
                break;
            }
            if *token != Token::Comma {
                columns.push(token.text().to_uppercase());
            }
            self.advance();
        }

        let columns = if columns.len() == 1 && columns[0] == "*" {
            SelectColumns::All
        } else {
            SelectColumns::Named(columns)
        };

        Ok(ClauseNode::Select(SelectClause { columns }))
    }

    fn parse_from(&mut self) -> QueryResult<ClauseNode> {
        self.advance(); // FROM

        let mut words = Vec::new();
        while let Some(token) = self.current_token() {
            if is_clause_keyword(token) {
                break;
            }
            words.push(token.text().to_string());
            self.advance();
        }

        Ok(ClauseNode::From(FromClause {
            table_name: words.join(" "),
        }))
    }

    fn parse_where(&mut self) -> QueryResult<ClauseNode> {
        self.advance(); // WHERE

        if self.remaining() < 3 {
            let near = self
                .current_token()
                .map(|t| t.text().to_string())
                .unwrap_or_else(|| "WHERE".to_string());
            return Err(QueryError::syntax(
                near,
                "WHERE clause requires a column, an operator and a value",
            ));
        }

        let left_column = self.tokens[self.position].text().to_uppercase();
        let operator = self.tokens[self.position + 1].text().to_string();
        let right_literal = self.tokens[self.position + 2]
            .text()
            .trim_matches('\'')
            .to_string();
        self.position += 3;

        Ok(ClauseNode::Where(WhereClause {
            left_column,
            operator,
            right_literal,
        }))
    }

    fn parse_limit(&mut self) -> QueryResult<ClauseNode> {
        self.advance(); // LIMIT

        let count = match self.current_token() {
            Some(token) => token.text().to_string(),
            None => {
                return Err(QueryError::syntax(
                    "LIMIT",
                    "LIMIT clause requires a value",
                ))
            }
        };
        self.advance();

        Ok(ClauseNode::Limit(LimitClause { count }))
    }
}

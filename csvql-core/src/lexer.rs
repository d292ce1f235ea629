//! Tokenizer for the csvql query language.
//!
//! The scan never fails. Single quotes toggle a quoted region and stay in the
//! token text; an unterminated quote runs to the end of the input.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Token {
    /// Bare word: keyword, column, table name or operator text
    Word(String),
    /// Word containing at least one single quote, quotes preserved
    Literal(String),
    Comma,
    Equals,
}

impl Token {
    /// Source text of the token.
    pub fn text(&self) -> &str {
        match self {
            Token::Word(s) | Token::Literal(s) => s,
            Token::Comma => ",",
            Token::Equals => "=",
        }
    }

    /// True if this is a bare word equal to `keyword`, ignoring case.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        matches!(self, Token::Word(w) if w.eq_ignore_ascii_case(keyword))
    }
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    current_char: Option<char>,
    in_quotes: bool,
    quoted: bool,
    buffer: String,
    tokens: Vec<Token>,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        let chars: Vec<char> = input.chars().collect();
        let current_char = chars.first().copied();

        Self {
            input: chars,
            position: 0,
            current_char,
            in_quotes: false,
            quoted: false,
            buffer: String::new(),
            tokens: Vec::new(),
        }
    }

    fn advance(&mut self) {
        self.position += 1;
        self.current_char = self.input.get(self.position).copied();
    }

    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.buffer);
        let token = if self.quoted {
            Token::Literal(text)
        } else {
            Token::Word(text)
        };
        self.quoted = false;
        self.tokens.push(token);
    }

    fn emit_symbol(&mut self, token: Token) {
        self.flush();
        self.tokens.push(token);
    }

    pub fn tokenize(mut self) -> Vec<Token> {
        while let Some(ch) = self.current_char {
            match ch {
                '\'' => {
                    self.in_quotes = !self.in_quotes;
                    self.quoted = true;
                    self.buffer.push(ch);
                }
                c if self.in_quotes => self.buffer.push(c),
                c if c.is_whitespace() => self.flush(),
                ',' => self.emit_symbol(Token::Comma),
                '=' => self.emit_symbol(Token::Equals),
                c => self.buffer.push(c),
            }
            self.advance();
        }
        self.flush();

        tracing::trace!(count = self.tokens.len(), "tokenized query");
        self.tokens
    }
}

/// Split query text into tokens.
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).tokenize()
}

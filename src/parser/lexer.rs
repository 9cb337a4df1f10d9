//! Lexer (tokenizer) for mini-C source code
//!
//! Converts raw source text into a flat [`Token`] sequence consumed by the
//! parser. Classification is done by inspecting the current character plus at
//! most one character of lookahead; nothing is ever re-scanned.
//!
//! Comments are not discarded: each `//` or `/* */` span becomes a single
//! [`TokenKind::Comment`] token and the parser skips them where a declaration
//! or statement may begin. Whitespace never produces a token.

use super::ast::SourceLocation;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Reserved words. Anything else matching the identifier shape is an identifier.
pub const KEYWORDS: [&str; 11] = [
    "int", "char", "float", "double", "void", "if", "else", "while", "for", "return", "printf",
];

/// Two-character operators, matched greedily before their one-character prefixes
const TWO_CHAR_OPERATORS: [&str; 6] = ["==", "!=", "<=", ">=", "++", "--"];

/// Token classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Number,
    Operator,
    Punctuation,
    Comment,
}

impl TokenKind {
    pub const ALL: [TokenKind; 6] = [
        TokenKind::Keyword,
        TokenKind::Identifier,
        TokenKind::Number,
        TokenKind::Operator,
        TokenKind::Punctuation,
        TokenKind::Comment,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Number => "NUMBER",
            TokenKind::Operator => "OPERATOR",
            TokenKind::Punctuation => "PUNCTUATION",
            TokenKind::Comment => "COMMENT",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified lexeme.
///
/// `location` is where the first character of the lexeme sits in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            text: text.into(),
            location,
        }
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn column(&self) -> usize {
        self.location.column
    }

    /// True if this token has the given kind and exact text
    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.text)
    }
}

/// What went wrong while scanning
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("Unexpected character '{0}'")]
    UnexpectedCharacter(char),

    #[error("Unclosed multi-line comment")]
    UnclosedComment,
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lexer error at {location}: {kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub location: SourceLocation,
}

impl LexError {
    pub fn new(kind: LexErrorKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }
}

/// Tokenize a whole source string.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

/// Lexer for mini-C source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();

            let Some(ch) = self.peek() else {
                break;
            };

            tokens.push(self.next_token(ch)?);
        }

        debug!(tokens = tokens.len(), lines = self.line, "tokenized source");
        Ok(tokens)
    }

    /// Scan one token starting at the current (non-whitespace) character
    fn next_token(&mut self, ch: char) -> Result<Token, LexError> {
        let loc = self.current_location();

        match ch {
            '/' if self.peek_ahead(1) == Some('/') => Ok(self.line_comment(loc)),
            '/' if self.peek_ahead(1) == Some('*') => self.block_comment(loc),

            'a'..='z' | 'A'..='Z' | '_' => Ok(self.identifier_or_keyword(loc)),

            '0'..='9' => Ok(self.number(loc)),

            '+' | '-' | '*' | '/' | '%' | '=' | '<' | '>' | '!' => Ok(self.operator(loc)),

            ';' | ',' | '(' | ')' | '{' | '}' | '[' | ']' => {
                self.advance();
                Ok(Token::new(TokenKind::Punctuation, ch, loc))
            }

            _ => Err(LexError::new(LexErrorKind::UnexpectedCharacter(ch), loc)),
        }
    }

    /// `// ...` up to, not including, the next newline
    fn line_comment(&mut self, loc: SourceLocation) -> Token {
        let mut text = String::new();

        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            text.push(ch);
            self.advance();
        }

        Token::new(TokenKind::Comment, text, loc)
    }

    /// `/* ... */`, newlines included
    fn block_comment(&mut self, loc: SourceLocation) -> Result<Token, LexError> {
        let mut text = String::from("/*");
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance();
                self.advance();
                text.push_str("*/");
                return Ok(Token::new(TokenKind::Comment, text, loc));
            }
            if let Some(ch) = self.advance() {
                text.push(ch);
            }
        }

        Err(LexError::new(LexErrorKind::UnclosedComment, loc))
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, loc: SourceLocation) -> Token {
        let ident = self.take_while(|ch| ch.is_ascii_alphanumeric() || ch == '_');

        let kind = if KEYWORDS.contains(&ident.as_str()) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };

        Token::new(kind, ident, loc)
    }

    /// Digits and dots, absorbed greedily. `1.2.3` is a single token.
    fn number(&mut self, loc: SourceLocation) -> Token {
        let digits = self.take_while(|ch| ch.is_ascii_digit() || ch == '.');
        Token::new(TokenKind::Number, digits, loc)
    }

    fn operator(&mut self, loc: SourceLocation) -> Token {
        let mut op = String::new();
        if let Some(first) = self.advance() {
            op.push(first);
        }

        if let Some(next) = self.peek() {
            op.push(next);
            if TWO_CHAR_OPERATORS.contains(&op.as_str()) {
                self.advance();
            } else {
                op.pop();
            }
        }

        Token::new(TokenKind::Operator, op, loc)
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut out = String::new();
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            out.push(ch);
            self.advance();
        }
        out
    }

    /// Skip spaces, tabs, carriage returns and newlines
    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\r' | '\n') = self.peek() {
            self.advance();
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

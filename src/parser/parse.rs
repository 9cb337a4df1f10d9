//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, cursor helpers, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, cursor helpers, and coordination
//! - `declarations`: function and variable declarations
//! - `statements`: `if`, `while`, `for`, `return`, blocks, expression statements
//! - `expressions`: the precedence chain from assignment down to primaries
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared cursor.
//!
//! The cursor never moves backwards. Once the tokens run out, errors are
//! located at the last real token.

use crate::parser::ast::*;
use crate::parser::lexer::{Token, TokenKind};
use thiserror::Error;
use tracing::debug;

/// What the parser expected and did not get
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("{expected}, found {found}")]
    Expected { expected: String, found: String },

    #[error("Invalid assignment target")]
    InvalidAssignmentTarget,

    #[error("Unexpected end of input {context}")]
    UnexpectedEof { context: String },

    #[error("Expected expression, found {found}")]
    ExpectedExpression { found: String },
}

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Parse error at {location}: {kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub location: SourceLocation,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }
}

/// Parse a token sequence into a `PROGRAM` tree.
pub fn parse(tokens: &[Token]) -> Result<SyntaxNode, ParseError> {
    Parser::new(tokens).parse_program()
}

/// Recursive descent parser for the mini-C grammar
pub struct Parser<'a> {
    pub(crate) tokens: &'a [Token],
    pub(crate) position: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Parse the entire program (top-level declarations)
    pub fn parse_program(&mut self) -> Result<SyntaxNode, ParseError> {
        let mut program = SyntaxNode::new(NodeKind::Program);

        loop {
            self.skip_comments();
            if self.is_at_end() {
                break;
            }

            let decl = self.parse_declaration()?;
            program.push(decl);
        }

        debug!(
            declarations = program.children.len(),
            nodes = program.node_count(),
            "parsed program"
        );
        Ok(program)
    }

    // ===== Helper methods =====

    pub(crate) fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.position)
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub(crate) fn advance(&mut self) -> Option<&'a Token> {
        let token = self.peek()?;
        self.position += 1;
        Some(token)
    }

    pub(crate) fn check(&self, kind: TokenKind, text: &str) -> bool {
        self.peek().is_some_and(|t| t.is(kind, text))
    }

    pub(crate) fn check_kind(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    pub(crate) fn check_punct(&self, text: &str) -> bool {
        self.check(TokenKind::Punctuation, text)
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind, text: &str) -> bool {
        if self.check(kind, text) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn match_punct(&mut self, text: &str) -> bool {
        self.match_token(TokenKind::Punctuation, text)
    }

    /// Consume the current token if it is an operator in `ops`
    pub(crate) fn match_operator(&mut self, ops: &[&str]) -> Option<&'a Token> {
        let token = self.peek()?;
        if token.kind == TokenKind::Operator && ops.contains(&token.text.as_str()) {
            self.advance()
        } else {
            None
        }
    }

    /// Consume the current token if it is one of the given keywords
    pub(crate) fn match_keyword(&mut self, keywords: &[&str]) -> Option<&'a Token> {
        let token = self.peek()?;
        if token.kind == TokenKind::Keyword && keywords.contains(&token.text.as_str()) {
            self.advance()
        } else {
            None
        }
    }

    pub(crate) fn skip_comments(&mut self) {
        while self.check_kind(TokenKind::Comment) {
            self.advance();
        }
    }

    /// Location of the current token, or of the last token once exhausted
    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek()
            .or_else(|| self.tokens.last())
            .map(|t| t.location)
            .unwrap_or(SourceLocation::new(1, 1))
    }

    /// Human-readable description of the current token for error messages
    pub(crate) fn found(&self) -> String {
        match self.peek() {
            Some(token) => token.to_string(),
            None => "end of input".to_string(),
        }
    }

    pub(crate) fn unexpected_eof(&self, context: &str) -> ParseError {
        ParseError::new(
            ParseErrorKind::UnexpectedEof {
                context: context.to_string(),
            },
            self.current_location(),
        )
    }

    pub(crate) fn expect_token(
        &mut self,
        kind: TokenKind,
        text: &str,
        message: &str,
    ) -> Result<&'a Token, ParseError> {
        if self.check(kind, text) {
            if let Some(token) = self.advance() {
                return Ok(token);
            }
        }
        Err(ParseError::new(
            ParseErrorKind::Expected {
                expected: message.to_string(),
                found: self.found(),
            },
            self.current_location(),
        ))
    }

    pub(crate) fn expect_lparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(TokenKind::Punctuation, "(", &format!("Expected '(' {ctx}"))?;
        Ok(())
    }

    pub(crate) fn expect_rparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(TokenKind::Punctuation, ")", &format!("Expected ')' {ctx}"))?;
        Ok(())
    }

    pub(crate) fn expect_rbrace(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(TokenKind::Punctuation, "}", &format!("Expected '}}' {ctx}"))?;
        Ok(())
    }

    pub(crate) fn expect_semicolon(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(TokenKind::Punctuation, ";", &format!("Expected ';' {ctx}"))?;
        Ok(())
    }

    pub(crate) fn expect_identifier(&mut self, ctx: &str) -> Result<&'a Token, ParseError> {
        match self.peek() {
            Some(token) if token.kind == TokenKind::Identifier => {
                self.advance();
                Ok(token)
            }
            _ => Err(ParseError::new(
                ParseErrorKind::Expected {
                    expected: format!("Expected identifier {ctx}"),
                    found: self.found(),
                },
                self.current_location(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;

    fn parse_source(source: &str) -> Result<SyntaxNode, ParseError> {
        parse(&tokenize(source).unwrap())
    }

    #[test]
    fn test_empty_program() {
        let program = parse_source("").unwrap();
        assert_eq!(program, SyntaxNode::new(NodeKind::Program));
    }

    #[test]
    fn test_comments_only_program() {
        let program = parse_source("// nothing here\n/* or here */").unwrap();
        assert!(program.children.is_empty());
    }

    #[test]
    fn test_parse_simple_function() {
        let program = parse_source("int main(){return 0;}").unwrap();

        let expected = SyntaxNode::new(NodeKind::Program).with_child(
            SyntaxNode::leaf(NodeKind::FunctionDeclaration, "main")
                .with_child(SyntaxNode::leaf(NodeKind::Type, "int"))
                .with_child(SyntaxNode::new(NodeKind::Parameters))
                .with_child(
                    SyntaxNode::new(NodeKind::Block).with_child(
                        SyntaxNode::new(NodeKind::ReturnStatement)
                            .with_child(SyntaxNode::leaf(NodeKind::Literal, "0")),
                    ),
                ),
        );
        assert_eq!(program, expected);
    }

    #[test]
    fn test_expected_token_error_at_end_of_input() {
        let err = parse_source("int x = 1").unwrap_err();

        assert_eq!(
            err.kind,
            ParseErrorKind::Expected {
                expected: "Expected ';' after variable declaration".to_string(),
                found: "end of input".to_string(),
            }
        );
        // Synthetic end-of-input reuses the last real token's position
        assert_eq!(err.location, SourceLocation::new(1, 9));
    }

    #[test]
    fn test_error_display() {
        let err = parse_source("int x = 1 }").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Parse error at line 1, column 11: Expected ';' after variable declaration, \
             found PUNCTUATION '}'"
        );
    }

    #[test]
    fn test_error_determinism() {
        let first = parse_source("while (x) { x = ; }").unwrap_err();
        let second = parse_source("while (x) { x = ; }").unwrap_err();
        assert_eq!(first, second);
    }

    #[test]
    fn test_idempotence() {
        let source = "int f(int a) { for (int i = 0; i < a; i = i + 1) a = a - 1; return a; }";
        assert_eq!(parse_source(source).unwrap(), parse_source(source).unwrap());
    }
}

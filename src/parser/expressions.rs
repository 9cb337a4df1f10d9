//! Expression parsing implementation
//!
//! Expressions are parsed with a chain of rules ordered from the loosest to
//! the tightest binding, each rule calling the next for its operands:
//!
//! ```text
//! assignment ::= equality ( "=" assignment )?
//! equality   ::= comparison ( ( "==" | "!=" ) comparison )*
//! comparison ::= term ( ( ">" | ">=" | "<" | "<=" ) term )*
//! term       ::= factor ( ( "+" | "-" ) factor )*
//! factor     ::= unary ( ( "*" | "/" | "%" ) unary )*
//! unary      ::= ( "!" | "-" ) unary | primary
//! primary    ::= NUMBER | IDENTIFIER | "(" assignment ")"
//! ```
//!
//! Binary levels are left-associative; assignment is right-associative and
//! only accepts a bare identifier on its left.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, ParseErrorKind, Parser};

const EQUALITY_OPS: [&str; 2] = ["==", "!="];
const COMPARISON_OPS: [&str; 4] = [">", ">=", "<", "<="];
const TERM_OPS: [&str; 2] = ["+", "-"];
const FACTOR_OPS: [&str; 3] = ["*", "/", "%"];
const UNARY_OPS: [&str; 2] = ["!", "-"];

impl<'a> Parser<'a> {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<SyntaxNode, ParseError> {
        self.parse_assignment()
    }

    /// Parse assignment (right-associative)
    fn parse_assignment(&mut self) -> Result<SyntaxNode, ParseError> {
        let expr = self.parse_equality()?;

        let Some(eq) = self.match_operator(&["="]) else {
            return Ok(expr);
        };

        let rhs = self.parse_assignment()?;

        if expr.kind != NodeKind::Identifier {
            return Err(ParseError::new(
                ParseErrorKind::InvalidAssignmentTarget,
                eq.location,
            ));
        }

        Ok(SyntaxNode {
            kind: NodeKind::Assignment,
            value: expr.value,
            children: vec![rhs],
        })
    }

    /// Parse equality (== !=)
    fn parse_equality(&mut self) -> Result<SyntaxNode, ParseError> {
        self.parse_binary_level(&EQUALITY_OPS, Self::parse_comparison)
    }

    /// Parse comparison (> >= < <=)
    fn parse_comparison(&mut self) -> Result<SyntaxNode, ParseError> {
        self.parse_binary_level(&COMPARISON_OPS, Self::parse_term)
    }

    /// Parse additive (+ -)
    fn parse_term(&mut self) -> Result<SyntaxNode, ParseError> {
        self.parse_binary_level(&TERM_OPS, Self::parse_factor)
    }

    /// Parse multiplicative (* / %)
    fn parse_factor(&mut self) -> Result<SyntaxNode, ParseError> {
        self.parse_binary_level(&FACTOR_OPS, Self::parse_unary)
    }

    /// Fold `operand (op operand)*` left-to-right into `BINARY` nodes
    fn parse_binary_level(
        &mut self,
        ops: &[&str],
        operand: fn(&mut Self) -> Result<SyntaxNode, ParseError>,
    ) -> Result<SyntaxNode, ParseError> {
        let mut left = operand(self)?;

        while let Some(op) = self.match_operator(ops) {
            let right = operand(self)?;
            left = SyntaxNode::leaf(NodeKind::Binary, &op.text)
                .with_child(left)
                .with_child(right);
        }

        Ok(left)
    }

    /// Parse prefix unary operators
    fn parse_unary(&mut self) -> Result<SyntaxNode, ParseError> {
        if let Some(op) = self.match_operator(&UNARY_OPS) {
            let operand = self.parse_unary()?;
            return Ok(SyntaxNode::leaf(NodeKind::Unary, &op.text).with_child(operand));
        }

        self.parse_primary()
    }

    /// Parse primary expressions (literals, identifiers, parenthesized)
    fn parse_primary(&mut self) -> Result<SyntaxNode, ParseError> {
        if let Some(token) = self.peek() {
            match token.kind {
                TokenKind::Number => {
                    self.advance();
                    return Ok(SyntaxNode::leaf(NodeKind::Literal, &token.text));
                }
                TokenKind::Identifier => {
                    self.advance();
                    return Ok(SyntaxNode::leaf(NodeKind::Identifier, &token.text));
                }
                _ => {}
            }
        }

        if self.match_punct("(") {
            let inner = self.parse_expression()?;
            self.expect_rparen("after expression")?;
            return Ok(SyntaxNode::new(NodeKind::Grouping).with_child(inner));
        }

        Err(ParseError::new(
            ParseErrorKind::ExpectedExpression { found: self.found() },
            self.current_location(),
        ))
    }
}

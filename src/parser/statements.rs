//! Statement parsing implementation
//!
//! This module handles parsing of all statement forms:
//!
//! - Control flow: `if`/`else`, `while`, `for`
//! - Jump statements: `return`
//! - Compound statements: `{ ... }`
//! - Expression statements: assignments and bare expressions
//!
//! # Grammar
//!
//! ```text
//! statement ::= if_stmt | while_stmt | for_stmt | return_stmt | block | expr_stmt
//! for_stmt  ::= "for" "(" for_init for_cond ";" for_incr ")" statement
//! for_init  ::= ";" | ("int" | "float" | "char") identifier ("=" expr)? ";" | expr ";"
//! ```
//!
//! An expression statement is represented by the expression node itself.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};
use tracing::trace;

/// Types allowed in a `for` initializer declaration
const FOR_INIT_TYPES: [&str; 3] = ["int", "float", "char"];

impl<'a> Parser<'a> {
    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<SyntaxNode, ParseError> {
        self.skip_comments();

        let Some(token) = self.peek() else {
            return Err(self.unexpected_eof("where a statement was expected"));
        };
        trace!(token = %token, line = token.line(), "statement");

        if self.match_token(TokenKind::Keyword, "if") {
            return self.parse_if_statement();
        }

        if self.match_token(TokenKind::Keyword, "while") {
            return self.parse_while_statement();
        }

        if self.match_token(TokenKind::Keyword, "for") {
            return self.parse_for_statement();
        }

        if self.match_token(TokenKind::Keyword, "return") {
            return self.parse_return_statement();
        }

        if self.match_punct("{") {
            return self.parse_block();
        }

        // Otherwise, it's an expression statement
        let expr = self.parse_expression()?;
        self.expect_semicolon("after expression")?;
        Ok(expr)
    }

    /// Parse block contents after the opening `{`
    pub(crate) fn parse_block(&mut self) -> Result<SyntaxNode, ParseError> {
        let mut block = SyntaxNode::new(NodeKind::Block);

        loop {
            self.skip_comments();
            if self.check_punct("}") || self.is_at_end() {
                break;
            }
            block.push(self.parse_declaration()?);
        }

        self.expect_rbrace("after block")?;
        Ok(block)
    }

    /// Parse return statement
    fn parse_return_statement(&mut self) -> Result<SyntaxNode, ParseError> {
        let mut node = SyntaxNode::new(NodeKind::ReturnStatement);

        if !self.check_punct(";") {
            node.push(self.parse_expression()?);
        }

        self.expect_semicolon("after return statement")?;
        Ok(node)
    }

    /// Parse if statement
    fn parse_if_statement(&mut self) -> Result<SyntaxNode, ParseError> {
        self.expect_lparen("after 'if'")?;
        let condition = self.parse_expression()?;
        self.expect_rparen("after if condition")?;

        let then_branch = self.parse_statement()?;

        let mut node = SyntaxNode::new(NodeKind::IfStatement)
            .with_child(condition)
            .with_child(then_branch);

        if self.match_token(TokenKind::Keyword, "else") {
            node.push(self.parse_statement()?);
        }

        Ok(node)
    }

    /// Parse while statement
    fn parse_while_statement(&mut self) -> Result<SyntaxNode, ParseError> {
        self.expect_lparen("after 'while'")?;
        let condition = self.parse_expression()?;
        self.expect_rparen("after while condition")?;

        let body = self.parse_statement()?;

        Ok(SyntaxNode::new(NodeKind::WhileStatement)
            .with_child(condition)
            .with_child(body))
    }

    /// Parse for statement
    fn parse_for_statement(&mut self) -> Result<SyntaxNode, ParseError> {
        self.expect_lparen("after 'for'")?;

        // Init (optional)
        let mut init = SyntaxNode::new(NodeKind::ForInit);
        if !self.match_punct(";") {
            if let Some(type_token) = self.match_keyword(&FOR_INIT_TYPES) {
                let name_token = self.expect_identifier("after type")?;
                init.push(self.parse_variable_declaration(type_token, name_token)?);
                // The declaration leaves the shared separator to us
                self.expect_semicolon("after variable declaration")?;
            } else {
                init.push(self.parse_expression()?);
                self.expect_semicolon("after for initialization")?;
            }
        }

        // Condition (optional)
        let mut condition = SyntaxNode::new(NodeKind::ForCondition);
        if !self.check_punct(";") {
            condition.push(self.parse_expression()?);
        }
        self.expect_semicolon("after for condition")?;

        // Increment (optional)
        let mut increment = SyntaxNode::new(NodeKind::ForIncrement);
        if !self.check_punct(")") {
            increment.push(self.parse_expression()?);
        }
        self.expect_rparen("after for clauses")?;

        let body = self.parse_statement()?;

        Ok(SyntaxNode::new(NodeKind::ForStatement)
            .with_child(init)
            .with_child(condition)
            .with_child(increment)
            .with_child(body))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::lexer::tokenize;
    use crate::parser::parse::{parse, ParseError, ParseErrorKind};

    fn parse_source(source: &str) -> Result<SyntaxNode, ParseError> {
        parse(&tokenize(source).unwrap())
    }

    fn first_stmt(source: &str) -> SyntaxNode {
        parse_source(source).unwrap().children.remove(0)
    }

    fn ident(name: &str) -> SyntaxNode {
        SyntaxNode::leaf(NodeKind::Identifier, name)
    }

    fn lit(text: &str) -> SyntaxNode {
        SyntaxNode::leaf(NodeKind::Literal, text)
    }

    fn binary(op: &str, left: SyntaxNode, right: SyntaxNode) -> SyntaxNode {
        SyntaxNode::leaf(NodeKind::Binary, op)
            .with_child(left)
            .with_child(right)
    }

    #[test]
    fn test_if_statement() {
        let stmt = first_stmt("if (x > 5) { x = x + 1; }");

        let expected = SyntaxNode::new(NodeKind::IfStatement)
            .with_child(binary(">", ident("x"), lit("5")))
            .with_child(
                SyntaxNode::new(NodeKind::Block).with_child(
                    SyntaxNode::leaf(NodeKind::Assignment, "x")
                        .with_child(binary("+", ident("x"), lit("1"))),
                ),
            );
        assert_eq!(stmt, expected);
    }

    #[test]
    fn test_if_else_without_braces() {
        let stmt = first_stmt("if (a) return 1; else return 0;");

        assert_eq!(stmt.kind, NodeKind::IfStatement);
        assert_eq!(stmt.children.len(), 3);
        assert_eq!(stmt.children[1].kind, NodeKind::ReturnStatement);
        assert_eq!(stmt.children[2].children, vec![lit("0")]);
    }

    #[test]
    fn test_dangling_else_binds_to_inner_if() {
        let stmt = first_stmt("if (a) if (b) x = 1; else x = 2;");

        assert_eq!(stmt.children.len(), 2);
        assert_eq!(stmt.children[1].kind, NodeKind::IfStatement);
        assert_eq!(stmt.children[1].children.len(), 3);
    }

    #[test]
    fn test_while_statement() {
        let stmt = first_stmt("while (n != 0) n = n - 1;");

        let expected = SyntaxNode::new(NodeKind::WhileStatement)
            .with_child(binary("!=", ident("n"), lit("0")))
            .with_child(
                SyntaxNode::leaf(NodeKind::Assignment, "n")
                    .with_child(binary("-", ident("n"), lit("1"))),
            );
        assert_eq!(stmt, expected);
    }

    #[test]
    fn test_for_with_declaration_init() {
        let stmt = first_stmt("for (int i = 0; i < 5; i = i + 1) { x = x + i; }");

        assert_eq!(stmt.kind, NodeKind::ForStatement);
        assert_eq!(stmt.children.len(), 4);

        let init = &stmt.children[0];
        assert_eq!(init.kind, NodeKind::ForInit);
        assert_eq!(
            init.children,
            vec![SyntaxNode::leaf(NodeKind::VariableDeclaration, "i")
                .with_child(SyntaxNode::leaf(NodeKind::Type, "int"))
                .with_child(SyntaxNode::new(NodeKind::Initialization).with_child(lit("0")))]
        );

        assert_eq!(
            stmt.children[1],
            SyntaxNode::new(NodeKind::ForCondition).with_child(binary("<", ident("i"), lit("5")))
        );
        assert_eq!(stmt.children[2].kind, NodeKind::ForIncrement);
        assert_eq!(stmt.children[2].children[0].kind, NodeKind::Assignment);
        assert_eq!(stmt.children[3].kind, NodeKind::Block);
    }

    #[test]
    fn test_for_with_expression_init() {
        let stmt = first_stmt("for (i = 0; i < 3; i = i + 1) x = x + i;");

        assert_eq!(
            stmt.children[0],
            SyntaxNode::new(NodeKind::ForInit)
                .with_child(SyntaxNode::leaf(NodeKind::Assignment, "i").with_child(lit("0")))
        );
        assert_eq!(stmt.children[3].kind, NodeKind::Assignment);
    }

    #[test]
    fn test_for_with_empty_clauses() {
        let stmt = first_stmt("for (;;) { }");

        assert_eq!(stmt.children[0], SyntaxNode::new(NodeKind::ForInit));
        assert_eq!(stmt.children[1], SyntaxNode::new(NodeKind::ForCondition));
        assert_eq!(stmt.children[2], SyntaxNode::new(NodeKind::ForIncrement));
        assert_eq!(stmt.children[3], SyntaxNode::new(NodeKind::Block));
    }

    #[test]
    fn test_for_init_rejects_double() {
        let err = parse_source("for (double d = 0; d < 1; d = d + 1) {}").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::ExpectedExpression {
                found: "KEYWORD 'double'".to_string()
            }
        );
    }

    #[test]
    fn test_return_without_value() {
        let stmt = first_stmt("return;");
        assert_eq!(stmt, SyntaxNode::new(NodeKind::ReturnStatement));
    }

    #[test]
    fn test_expression_statement_is_not_wrapped() {
        let stmt = first_stmt("a + b;");
        assert_eq!(stmt, binary("+", ident("a"), ident("b")));
    }

    #[test]
    fn test_comments_inside_block() {
        let stmt = first_stmt("{ // first\n x = 1; /* before close */ }");
        assert_eq!(stmt.kind, NodeKind::Block);
        assert_eq!(stmt.children.len(), 1);
    }

    #[test]
    fn test_missing_closing_brace() {
        let err = parse_source("int main() { return 0;").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::Expected {
                expected: "Expected '}' after block".to_string(),
                found: "end of input".to_string(),
            }
        );
    }

    #[test]
    fn test_statement_missing_at_end() {
        let err = parse_source("while (x) // nothing follows").unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::UnexpectedEof { .. }));
    }

    #[test]
    fn test_missing_paren_after_if() {
        let err = parse_source("if x > 1) {}").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::Expected {
                expected: "Expected '(' after 'if'".to_string(),
                found: "IDENTIFIER 'x'".to_string(),
            }
        );
        assert_eq!(err.location, SourceLocation::new(1, 4));
    }
}

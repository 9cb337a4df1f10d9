//! Declaration parsing implementation
//!
//! This module handles declarations, which may appear at top level and inside
//! blocks:
//!
//! - Function declarations: `type name(...) { ... }`
//! - Variable declarations: `type name [= expr];`
//!
//! # Grammar
//!
//! ```text
//! declaration  ::= type_kw identifier ( function_rest | variable_rest ) | statement
//! function_rest ::= "(" <any tokens up to the matching ")"> block?
//! variable_rest ::= ( "=" expression )? ";"
//! type_kw      ::= "int" | "char" | "float" | "double" | "void"
//! ```
//!
//! Parameter lists are skipped rather than parsed, so `PARAMETERS` is always
//! empty in the tree.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::{Token, TokenKind};
use crate::parser::parse::{ParseError, Parser};
use tracing::trace;

/// Keywords that open a declaration
pub(crate) const TYPE_KEYWORDS: [&str; 5] = ["int", "char", "float", "double", "void"];

impl<'a> Parser<'a> {
    /// Parse a declaration, or fall through to a statement
    pub(crate) fn parse_declaration(&mut self) -> Result<SyntaxNode, ParseError> {
        self.skip_comments();

        let Some(type_token) = self.match_keyword(&TYPE_KEYWORDS) else {
            return self.parse_statement();
        };

        let name_token = self.expect_identifier("after type")?;

        if self.match_punct("(") {
            return self.parse_function_declaration(type_token, name_token);
        }

        let decl = self.parse_variable_declaration(type_token, name_token)?;
        self.expect_semicolon("after variable declaration")?;
        Ok(decl)
    }

    /// Parse the rest of a function declaration after its opening `(`
    fn parse_function_declaration(
        &mut self,
        type_token: &'a Token,
        name_token: &'a Token,
    ) -> Result<SyntaxNode, ParseError> {
        trace!(name = %name_token.text, "function declaration");

        let mut func = SyntaxNode::leaf(NodeKind::FunctionDeclaration, &name_token.text)
            .with_child(SyntaxNode::leaf(NodeKind::Type, &type_token.text));

        self.skip_parameter_list()?;
        func.push(SyntaxNode::new(NodeKind::Parameters));

        if self.match_punct("{") {
            let body = self.parse_block()?;
            func.push(body);
        }

        Ok(func)
    }

    /// Discard everything up to and including the `)` matching the already
    /// consumed `(`
    fn skip_parameter_list(&mut self) -> Result<(), ParseError> {
        let mut depth = 1usize;

        while depth > 0 {
            let Some(token) = self.advance() else {
                return Err(self.unexpected_eof("while parsing function parameters"));
            };

            if token.is(TokenKind::Punctuation, "(") {
                depth += 1;
            } else if token.is(TokenKind::Punctuation, ")") {
                depth -= 1;
            }
        }

        Ok(())
    }

    /// Parse the optional initializer of a variable declaration.
    ///
    /// The terminating `;` is left for the caller: a top-level declaration
    /// consumes it itself, a `for` initializer shares it with the loop header.
    pub(crate) fn parse_variable_declaration(
        &mut self,
        type_token: &'a Token,
        name_token: &'a Token,
    ) -> Result<SyntaxNode, ParseError> {
        trace!(name = %name_token.text, "variable declaration");

        let mut var = SyntaxNode::leaf(NodeKind::VariableDeclaration, &name_token.text)
            .with_child(SyntaxNode::leaf(NodeKind::Type, &type_token.text));

        if self.match_operator(&["="]).is_some() {
            let init = self.parse_expression()?;
            var.push(SyntaxNode::new(NodeKind::Initialization).with_child(init));
        }

        Ok(var)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::lexer::tokenize;
    use crate::parser::parse::{parse, ParseErrorKind};

    fn first_decl(source: &str) -> SyntaxNode {
        let mut program = parse(&tokenize(source).unwrap()).unwrap();
        program.children.remove(0)
    }

    #[test]
    fn test_variable_with_initializer() {
        let decl = first_decl("int x = 10;");

        let expected = SyntaxNode::leaf(NodeKind::VariableDeclaration, "x")
            .with_child(SyntaxNode::leaf(NodeKind::Type, "int"))
            .with_child(
                SyntaxNode::new(NodeKind::Initialization)
                    .with_child(SyntaxNode::leaf(NodeKind::Literal, "10")),
            );
        assert_eq!(decl, expected);
    }

    #[test]
    fn test_variable_without_initializer() {
        let decl = first_decl("double ratio;");
        assert_eq!(decl.kind, NodeKind::VariableDeclaration);
        assert_eq!(decl.value_str(), "ratio");
        assert_eq!(decl.children, vec![SyntaxNode::leaf(NodeKind::Type, "double")]);
    }

    #[test]
    fn test_parameters_are_skipped() {
        let decl = first_decl("float area(float w, float h) { return w * h; }");

        assert_eq!(decl.kind, NodeKind::FunctionDeclaration);
        assert_eq!(decl.value_str(), "area");
        assert_eq!(decl.children.len(), 3);
        assert_eq!(decl.children[1], SyntaxNode::new(NodeKind::Parameters));
        assert_eq!(decl.children[2].kind, NodeKind::Block);
    }

    #[test]
    fn test_nested_parens_in_parameters() {
        let decl = first_decl("void f(int (x), char y) {}");
        assert_eq!(decl.children.len(), 3);
        assert!(decl.children[2].children.is_empty());
    }

    #[test]
    fn test_function_without_body() {
        let program = parse(&tokenize("void tick() int n;").unwrap()).unwrap();

        assert_eq!(program.children.len(), 2);
        assert_eq!(program.children[0].children.len(), 2);
        assert_eq!(program.children[1].kind, NodeKind::VariableDeclaration);
    }

    #[test]
    fn test_unterminated_parameter_list() {
        let err = parse(&tokenize("int main(int argc").unwrap()).unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::UnexpectedEof {
                context: "while parsing function parameters".to_string()
            }
        );
    }

    #[test]
    fn test_type_without_identifier() {
        let err = parse(&tokenize("int 5;").unwrap()).unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::Expected {
                expected: "Expected identifier after type".to_string(),
                found: "NUMBER '5'".to_string(),
            }
        );
        assert_eq!(err.location, SourceLocation::new(1, 5));
    }

    #[test]
    fn test_declaration_inside_block() {
        let decl = first_decl("void f() { char c = 1; }");
        let block = &decl.children[2];
        assert_eq!(block.children[0].kind, NodeKind::VariableDeclaration);
        assert_eq!(block.children[0].value_str(), "c");
    }
}

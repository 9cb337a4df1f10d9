//! Lex → parse → analyze pipeline used by the CLI and the explorer

use crate::analysis::ComplexityReport;
use crate::parser::{parse, tokenize, LexError, ParseError, SourceLocation, SyntaxNode, Token};
use thiserror::Error;
use tracing::debug;

/// Failure of either front-end stage
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl CompileError {
    pub fn location(&self) -> SourceLocation {
        match self {
            CompileError::Lex(e) => e.location,
            CompileError::Parse(e) => e.location,
        }
    }

    /// `LexicalError` / `SyntaxError`, for headings
    pub fn stage(&self) -> &'static str {
        match self {
            CompileError::Lex(_) => "LexicalError",
            CompileError::Parse(_) => "SyntaxError",
        }
    }
}

/// Everything produced by a successful run of the front end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compilation {
    pub tokens: Vec<Token>,
    pub tree: SyntaxNode,
    pub report: ComplexityReport,
}

/// Tokenize, parse and summarise `source`.
pub fn compile(source: &str) -> Result<Compilation, CompileError> {
    let tokens = tokenize(source)?;
    let tree = parse(&tokens)?;
    let report = ComplexityReport::analyze(&tokens, &tree);

    debug!(
        tokens = tokens.len(),
        nodes = report.node_count,
        "compilation finished"
    );

    Ok(Compilation {
        tokens,
        tree,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{LexErrorKind, NodeKind, ParseErrorKind};

    #[test]
    fn test_compile_success() {
        let compilation = compile("int main() { return 0; }").unwrap();
        assert_eq!(compilation.tokens.len(), 9);
        assert_eq!(compilation.tree.kind, NodeKind::Program);
        assert_eq!(compilation.report.functions, 1);
    }

    #[test]
    fn test_lex_error_is_surfaced() {
        let err = compile("int x = 1 @ 2;").unwrap_err();
        assert_eq!(err.stage(), "LexicalError");
        assert_eq!(err.location(), SourceLocation::new(1, 11));
        assert!(matches!(
            err,
            CompileError::Lex(LexError {
                kind: LexErrorKind::UnexpectedCharacter('@'),
                ..
            })
        ));
    }

    #[test]
    fn test_parse_error_is_surfaced() {
        let err = compile("1 = 2;").unwrap_err();
        assert_eq!(err.stage(), "SyntaxError");
        assert!(matches!(
            err,
            CompileError::Parse(ParseError {
                kind: ParseErrorKind::InvalidAssignmentTarget,
                ..
            })
        ));
        assert_eq!(
            err.to_string(),
            "Parse error at line 1, column 3: Invalid assignment target"
        );
    }
}

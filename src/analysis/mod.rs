//! Structural summary of a parsed program
//!
//! [`ComplexityReport`] walks the token sequence and the syntax tree once and
//! records counts that the explorer and the `--report` flag display: tokens
//! per kind, tree size and depth, declarations, branches and loops.
//!
//! The time-complexity estimate is derived purely from the deepest loop
//! nesting (`O(1)`, `O(n)`, `O(n^k)`). The grammar only has scalar
//! variables, so space is always reported as `O(1)`.

use crate::parser::ast::{NodeKind, SyntaxNode};
use crate::parser::lexer::{Token, TokenKind};
use rustc_hash::FxHashMap;
use std::fmt;

/// Counts gathered from one successful compilation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplexityReport {
    pub token_counts: FxHashMap<TokenKind, usize>,
    pub node_count: usize,
    pub tree_depth: usize,
    pub functions: usize,
    pub variables: usize,
    pub branches: usize,
    pub loops: usize,
    pub returns: usize,
    pub max_loop_nesting: usize,
}

impl ComplexityReport {
    pub fn analyze(tokens: &[Token], tree: &SyntaxNode) -> Self {
        let mut report = ComplexityReport {
            node_count: tree.node_count(),
            tree_depth: tree.depth(),
            ..Default::default()
        };

        for token in tokens {
            *report.token_counts.entry(token.kind).or_insert(0) += 1;
        }

        report.visit(tree, 0);
        report
    }

    fn visit(&mut self, node: &SyntaxNode, loop_depth: usize) {
        match node.kind {
            NodeKind::FunctionDeclaration => self.functions += 1,
            NodeKind::VariableDeclaration => self.variables += 1,
            NodeKind::IfStatement => self.branches += 1,
            NodeKind::ReturnStatement => self.returns += 1,
            _ => {}
        }

        let loop_depth = if node.kind.is_loop() {
            self.loops += 1;
            loop_depth + 1
        } else {
            loop_depth
        };
        self.max_loop_nesting = self.max_loop_nesting.max(loop_depth);

        for child in &node.children {
            self.visit(child, loop_depth);
        }
    }

    pub fn token_count(&self, kind: TokenKind) -> usize {
        self.token_counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn total_tokens(&self) -> usize {
        self.token_counts.values().sum()
    }

    pub fn time_complexity(&self) -> String {
        match self.max_loop_nesting {
            0 => "O(1)".to_string(),
            1 => "O(n)".to_string(),
            k => format!("O(n^{k})"),
        }
    }

    pub fn space_complexity(&self) -> String {
        "O(1)".to_string()
    }

    /// One line per observation, in display order
    pub fn details(&self) -> Vec<String> {
        let mut details = vec![
            format!(
                "{} tokens ({} comments)",
                self.total_tokens(),
                self.token_count(TokenKind::Comment)
            ),
            format!(
                "{} syntax nodes, tree depth {}",
                self.node_count, self.tree_depth
            ),
            format!(
                "{} function(s), {} variable declaration(s)",
                self.functions, self.variables
            ),
        ];

        if self.loops > 0 {
            details.push(format!(
                "{} loop(s), nested at most {} deep",
                self.loops, self.max_loop_nesting
            ));
        } else {
            details.push("No loops: straight-line control flow".to_string());
        }

        if self.branches > 0 {
            details.push(format!("{} conditional branch(es)", self.branches));
        }

        details.push(format!(
            "{} scalar variable(s); no arrays or dynamic allocation",
            self.variables
        ));
        details
    }
}

impl fmt::Display for ComplexityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Time complexity:  {}", self.time_complexity())?;
        writeln!(f, "Space complexity: {}", self.space_complexity())?;
        for detail in self.details() {
            writeln!(f, "- {detail}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse, tokenize};

    fn report_for(source: &str) -> ComplexityReport {
        let tokens = tokenize(source).unwrap();
        let tree = parse(&tokens).unwrap();
        ComplexityReport::analyze(&tokens, &tree)
    }

    #[test]
    fn test_straight_line_program() {
        let report = report_for("int x = 1; int y = x + 2;");

        assert_eq!(report.variables, 2);
        assert_eq!(report.loops, 0);
        assert_eq!(report.time_complexity(), "O(1)");
        assert_eq!(report.token_count(TokenKind::Keyword), 2);
        assert_eq!(report.total_tokens(), 12);
    }

    #[test]
    fn test_nested_loops() {
        let report = report_for(
            "void f() {\n\
               for (int i = 0; i < 10; i = i + 1) {\n\
                 while (i > 0) { i = i - 1; }\n\
               }\n\
               while (1) { return; }\n\
             }",
        );

        assert_eq!(report.functions, 1);
        assert_eq!(report.loops, 3);
        assert_eq!(report.max_loop_nesting, 2);
        assert_eq!(report.returns, 1);
        assert_eq!(report.time_complexity(), "O(n^2)");
    }

    #[test]
    fn test_comment_and_branch_details() {
        let report = report_for("// header\nint main() { if (1) return 1; }");

        assert_eq!(report.token_count(TokenKind::Comment), 1);
        assert_eq!(report.branches, 1);
        assert!(report
            .details()
            .iter()
            .any(|d| d == "1 conditional branch(es)"));
        assert!(report.to_string().starts_with("Time complexity:  O(1)\n"));
    }
}

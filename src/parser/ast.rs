// Syntax tree definitions for the mini-C front end

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Tag of a syntax tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Program,
    FunctionDeclaration,
    Parameters,
    VariableDeclaration,
    Type,
    Initialization,
    IfStatement,
    WhileStatement,
    ForStatement,
    ForInit,
    ForCondition,
    ForIncrement,
    ReturnStatement,
    Block,
    Assignment,
    Binary,
    Unary,
    Literal,
    Identifier,
    Grouping,
}

impl NodeKind {
    /// Canonical upper-case name, e.g. `FUNCTION_DECLARATION`.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Program => "PROGRAM",
            NodeKind::FunctionDeclaration => "FUNCTION_DECLARATION",
            NodeKind::Parameters => "PARAMETERS",
            NodeKind::VariableDeclaration => "VARIABLE_DECLARATION",
            NodeKind::Type => "TYPE",
            NodeKind::Initialization => "INITIALIZATION",
            NodeKind::IfStatement => "IF_STATEMENT",
            NodeKind::WhileStatement => "WHILE_STATEMENT",
            NodeKind::ForStatement => "FOR_STATEMENT",
            NodeKind::ForInit => "FOR_INIT",
            NodeKind::ForCondition => "FOR_CONDITION",
            NodeKind::ForIncrement => "FOR_INCREMENT",
            NodeKind::ReturnStatement => "RETURN_STATEMENT",
            NodeKind::Block => "BLOCK",
            NodeKind::Assignment => "ASSIGNMENT",
            NodeKind::Binary => "BINARY",
            NodeKind::Unary => "UNARY",
            NodeKind::Literal => "LITERAL",
            NodeKind::Identifier => "IDENTIFIER",
            NodeKind::Grouping => "GROUPING",
        }
    }

    /// Loop statements, used by the complexity report
    pub fn is_loop(self) -> bool {
        matches!(self, NodeKind::WhileStatement | NodeKind::ForStatement)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of the syntax tree.
///
/// Every node exclusively owns its children, so a tree is dropped as a unit
/// by whoever holds the root and no node can appear under two parents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub value: Option<String>,
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    /// Node with no payload and no children
    pub fn new(kind: NodeKind) -> Self {
        SyntaxNode {
            kind,
            value: None,
            children: Vec::new(),
        }
    }

    /// Leaf node carrying a value (identifier name, literal text, type name)
    pub fn leaf(kind: NodeKind, value: impl Into<String>) -> Self {
        SyntaxNode {
            kind,
            value: Some(value.into()),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: SyntaxNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn push(&mut self, child: SyntaxNode) {
        self.children.push(child);
    }

    /// The payload, or `""` when the node carries none
    pub fn value_str(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }

    /// `KIND: value`, or just `KIND` for nodes without a payload
    pub fn label(&self) -> String {
        match &self.value {
            Some(value) => format!("{}: {}", self.kind, value),
            None => self.kind.to_string(),
        }
    }

    /// Total number of nodes in this subtree, including `self`
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SyntaxNode::node_count).sum::<usize>()
    }

    /// Depth of the deepest leaf; a lone node has depth 1
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(SyntaxNode::depth)
            .max()
            .unwrap_or(0)
    }

    fn write_outline(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        writeln!(f, "{}{}", "  ".repeat(depth), self.label())?;
        for child in &self.children {
            child.write_outline(f, depth + 1)?;
        }
        Ok(())
    }
}

/// Indented outline, two spaces per level
impl fmt::Display for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_outline(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_rendering() {
        let tree = SyntaxNode::new(NodeKind::Program).with_child(
            SyntaxNode::leaf(NodeKind::VariableDeclaration, "x")
                .with_child(SyntaxNode::leaf(NodeKind::Type, "int")),
        );

        assert_eq!(
            tree.to_string(),
            "PROGRAM\n  VARIABLE_DECLARATION: x\n    TYPE: int\n"
        );
    }

    #[test]
    fn test_counts() {
        let tree = SyntaxNode::new(NodeKind::Program)
            .with_child(SyntaxNode::leaf(NodeKind::Literal, "1"))
            .with_child(
                SyntaxNode::new(NodeKind::Grouping)
                    .with_child(SyntaxNode::leaf(NodeKind::Identifier, "y")),
            );

        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.depth(), 3);
        assert_eq!(SyntaxNode::new(NodeKind::Parameters).depth(), 1);
    }
}

//! Syntax tree pane with collapsible nodes
//!
//! The tree is flattened into [`TreeRow`]s in preorder. Every node gets an id
//! equal to its preorder index in the *full* tree, so ids stay stable while
//! nodes above or around them are collapsed and expanded.

use super::{pane_block, scroll_into_view};
use crate::compiler::CompileError;
use crate::parser::ast::{NodeKind, SyntaxNode};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Padding, Paragraph, Wrap},
    Frame,
};
use rustc_hash::FxHashSet;

/// One visible line of the outline
#[derive(Debug, Clone, Copy)]
pub struct TreeRow<'a> {
    pub id: usize,
    pub depth: usize,
    pub node: &'a SyntaxNode,
    pub collapsed: bool,
}

impl TreeRow<'_> {
    pub fn has_children(&self) -> bool {
        !self.node.children.is_empty()
    }
}

/// Collapse state, selection and scroll position of the tree pane
#[derive(Debug, Default)]
pub struct TreeView {
    collapsed: FxHashSet<usize>,
    pub cursor: usize,
    pub scroll: usize,
}

impl TreeView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_collapsed(&self, id: usize) -> bool {
        self.collapsed.contains(&id)
    }

    /// Visible rows, skipping the descendants of collapsed nodes
    pub fn rows<'a>(&self, tree: &'a SyntaxNode) -> Vec<TreeRow<'a>> {
        let mut rows = Vec::new();
        let mut next_id = 0;
        self.collect_rows(tree, 0, &mut next_id, &mut rows);
        rows
    }

    fn collect_rows<'a>(
        &self,
        node: &'a SyntaxNode,
        depth: usize,
        next_id: &mut usize,
        rows: &mut Vec<TreeRow<'a>>,
    ) {
        let id = *next_id;
        *next_id += 1;
        let collapsed = self.is_collapsed(id);
        rows.push(TreeRow {
            id,
            depth,
            node,
            collapsed,
        });

        if collapsed {
            // Hidden descendants still consume their ids
            *next_id += node.node_count() - 1;
            return;
        }
        for child in &node.children {
            self.collect_rows(child, depth + 1, next_id, rows);
        }
    }

    /// Toggle the node under the cursor. Leaves are left alone.
    pub fn toggle(&mut self, tree: &SyntaxNode) -> bool {
        let target = self
            .rows(tree)
            .get(self.cursor)
            .filter(|row| row.has_children())
            .map(|row| row.id);

        match target {
            Some(id) => {
                if !self.collapsed.remove(&id) {
                    self.collapsed.insert(id);
                }
                true
            }
            None => false,
        }
    }

    pub fn expand_all(&mut self) {
        self.collapsed.clear();
    }

    /// Collapse every inner node below the root, leaving the top level visible
    pub fn collapse_all(&mut self, tree: &SyntaxNode) {
        self.collapsed.clear();
        let mut next_id = 0;
        collect_inner_ids(tree, &mut next_id, &mut self.collapsed);
        self.collapsed.remove(&0);
        self.cursor = self.cursor.min(self.rows(tree).len().saturating_sub(1));
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self, tree: &SyntaxNode) {
        let last = self.rows(tree).len().saturating_sub(1);
        self.cursor = (self.cursor + 1).min(last);
    }

    /// Forget all state, for a freshly compiled tree
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn collect_inner_ids(node: &SyntaxNode, next_id: &mut usize, ids: &mut FxHashSet<usize>) {
    let id = *next_id;
    *next_id += 1;
    if !node.children.is_empty() {
        ids.insert(id);
    }
    for child in &node.children {
        collect_inner_ids(child, next_id, ids);
    }
}

fn kind_style(kind: NodeKind) -> Style {
    match kind {
        NodeKind::Program | NodeKind::FunctionDeclaration => Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
        NodeKind::VariableDeclaration | NodeKind::Type | NodeKind::Parameters => {
            Style::default().fg(DEFAULT_THEME.type_name)
        }
        NodeKind::IfStatement
        | NodeKind::WhileStatement
        | NodeKind::ForStatement
        | NodeKind::ReturnStatement => Style::default().fg(DEFAULT_THEME.keyword),
        NodeKind::Literal => Style::default().fg(DEFAULT_THEME.number),
        NodeKind::Identifier | NodeKind::Assignment => {
            Style::default().fg(DEFAULT_THEME.identifier)
        }
        NodeKind::Binary | NodeKind::Unary => {
            Style::default().fg(DEFAULT_THEME.operator)
        }
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Render the syntax tree pane, or the compile error when there is no tree
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    tree: Option<&SyntaxNode>,
    error: Option<&CompileError>,
    view: &mut TreeView,
    is_focused: bool,
) {
    let block = pane_block(" Syntax Tree ", is_focused).padding(Padding::new(1, 0, 0, 0));

    let Some(tree) = tree else {
        let text = match error {
            Some(err) => vec![
                Line::from(Span::styled(
                    err.stage(),
                    Style::default()
                        .fg(DEFAULT_THEME.error)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    err.to_string(),
                    Style::default().fg(DEFAULT_THEME.error),
                )),
            ],
            None => vec![Line::from("(no tree)")],
        };
        let paragraph = Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
        return;
    };

    let rows = view.rows(tree);
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    view.cursor = view.cursor.min(rows.len().saturating_sub(1));
    scroll_into_view(view.cursor, &mut view.scroll, visible_height);

    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .skip(view.scroll)
        .take(visible_height)
        .map(|(idx, row)| {
            let marker = if !row.has_children() {
                "  "
            } else if row.collapsed {
                "▸ "
            } else {
                "▾ "
            };

            let mut spans = vec![
                Span::raw("  ".repeat(row.depth)),
                Span::styled(marker, Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(row.node.kind.as_str(), kind_style(row.node.kind)),
            ];
            if let Some(value) = &row.node.value {
                spans.push(Span::styled(
                    format!(": {value}"),
                    Style::default().fg(DEFAULT_THEME.fg),
                ));
            }
            if row.collapsed {
                spans.push(Span::styled(
                    format!("  (+{})", row.node.node_count() - 1),
                    Style::default().fg(DEFAULT_THEME.comment),
                ));
            }

            let mut line = Line::from(spans);
            if idx == view.cursor && is_focused {
                line = line.style(Style::default().bg(DEFAULT_THEME.current_line_bg));
            }
            line
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse, tokenize};

    fn tree_for(source: &str) -> SyntaxNode {
        parse(&tokenize(source).unwrap()).unwrap()
    }

    fn labels(view: &TreeView, tree: &SyntaxNode) -> Vec<String> {
        view.rows(tree).iter().map(|r| r.node.label()).collect()
    }

    #[test]
    fn test_rows_are_preorder() {
        let tree = tree_for("int x = 1 + 2;");
        let view = TreeView::new();
        let rows = view.rows(&tree);

        assert_eq!(
            labels(&view, &tree),
            [
                "PROGRAM",
                "VARIABLE_DECLARATION: x",
                "TYPE: int",
                "INITIALIZATION",
                "BINARY: +",
                "LITERAL: 1",
                "LITERAL: 2",
            ]
        );
        assert_eq!(
            rows.iter().map(|r| r.depth).collect::<Vec<_>>(),
            [0, 1, 2, 2, 3, 4, 4]
        );
        assert!(rows.iter().enumerate().all(|(i, r)| r.id == i));
    }

    #[test]
    fn test_toggle_hides_and_restores_children() {
        let tree = tree_for("int x = 1 + 2; int y;");
        let mut view = TreeView::new();
        view.cursor = 1;

        assert!(view.toggle(&tree));
        let rows = view.rows(&tree);
        assert_eq!(rows.len(), 4);
        assert!(rows[1].collapsed);
        // The next declaration keeps the id it had in the full tree
        assert_eq!(rows[2].node.label(), "VARIABLE_DECLARATION: y");
        assert_eq!(rows[2].id, 7);

        assert!(view.toggle(&tree));
        assert_eq!(view.rows(&tree).len(), 9);
    }

    #[test]
    fn test_toggle_on_leaf_does_nothing() {
        let tree = tree_for("x;");
        let mut view = TreeView::new();
        view.cursor = 1;

        assert!(!view.toggle(&tree));
        assert_eq!(view.rows(&tree).len(), 2);
    }

    #[test]
    fn test_collapse_and_expand_all() {
        let tree = tree_for("int main() { return 0; } int g = 2;");
        let mut view = TreeView::new();
        view.cursor = 5;

        view.collapse_all(&tree);
        assert_eq!(
            labels(&view, &tree),
            [
                "PROGRAM",
                "FUNCTION_DECLARATION: main",
                "VARIABLE_DECLARATION: g"
            ]
        );
        assert_eq!(view.cursor, 2);

        view.expand_all();
        assert_eq!(view.rows(&tree).len(), tree.node_count());
    }

    #[test]
    fn test_cursor_movement_is_bounded() {
        let tree = tree_for("x;");
        let mut view = TreeView::new();

        view.move_up();
        assert_eq!(view.cursor, 0);
        for _ in 0..5 {
            view.move_down(&tree);
        }
        assert_eq!(view.cursor, 1);
    }
}

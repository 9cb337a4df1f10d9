//! TUI pane rendering modules
//!
//! This module provides the rendering logic for all visual panes in the TUI,
//! organized by responsibility for maintainability.
//!
//! # Pane Modules
//!
//! - [`source`]: Source code display with syntax highlighting and a marked line
//! - [`tokens`]: Token list with kind colouring and a selection cursor
//! - [`tree`]: Collapsible syntax tree outline and its view state
//! - [`report`]: Complexity summary, or the compile error when there is none
//! - [`status`]: Status bar with keybindings and compile state
//!
//! # Architecture
//!
//! Each pane module exports a primary `render_*_pane()` function. Scrolling
//! helpers shared by the list-like panes live here.

pub mod report;
pub mod source;
pub mod status;
pub mod tokens;
pub mod tree;

// Re-export render functions for convenience
pub use report::render_report_pane;
pub use source::render_source_pane;
pub use status::render_status_bar;
pub use tokens::render_tokens_pane;
pub use tree::{render_tree_pane, TreeRow, TreeView};

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

/// Bordered block with the focus colour applied
pub(crate) fn pane_block(title: &str, is_focused: bool) -> Block<'_> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Move `offset` the least amount needed for row `cursor` to be visible in a
/// window of `height` rows.
pub(crate) fn scroll_into_view(cursor: usize, offset: &mut usize, height: usize) {
    let height = height.max(1);
    if cursor < *offset {
        *offset = cursor;
    } else if cursor >= *offset + height {
        *offset = cursor + 1 - height;
    }
}

/// Clamp scroll offset only if content exceeds visible area
pub(crate) fn clamp_scroll(offset: &mut usize, total: usize, height: usize) {
    if total > height {
        *offset = (*offset).min(total - height);
    } else {
        *offset = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_into_view() {
        let mut offset = 0;
        scroll_into_view(3, &mut offset, 5);
        assert_eq!(offset, 0);

        scroll_into_view(7, &mut offset, 5);
        assert_eq!(offset, 3);

        scroll_into_view(1, &mut offset, 5);
        assert_eq!(offset, 1);
    }

    #[test]
    fn test_clamp_scroll() {
        let mut offset = 40;
        clamp_scroll(&mut offset, 10, 4);
        assert_eq!(offset, 6);

        clamp_scroll(&mut offset, 3, 4);
        assert_eq!(offset, 0);
    }
}

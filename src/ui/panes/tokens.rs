//! Token list pane rendering

use super::{pane_block, scroll_into_view};
use crate::parser::lexer::Token;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Padding, Paragraph},
    Frame,
};

/// Token text on one line; comments may span several
pub(crate) fn escape_text(text: &str) -> String {
    text.replace('\n', "\\n").replace('\t', "\\t")
}

/// Render the tokens pane
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[Token],
    cursor: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let title = format!(" Tokens ({}) ", tokens.len());
    let block = pane_block(&title, is_focused).padding(Padding::new(1, 0, 0, 0));

    if tokens.is_empty() {
        let paragraph = Paragraph::new("(no tokens)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    scroll_into_view(cursor, scroll_offset, visible_height);

    let lines: Vec<Line> = tokens
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, token)| {
            let selected = idx == cursor;
            let kind_style = Style::default().fg(DEFAULT_THEME.token_color(token.kind));

            let mut line = Line::from(vec![
                Span::styled(
                    format!("{:>4} ", idx),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(
                    format!("{:<12}", token.kind.as_str()),
                    kind_style.add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("{:<20}", escape_text(&token.text)), kind_style),
                Span::styled(
                    format!(" {}:{}", token.line(), token.column()),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
            ]);
            if selected {
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

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("/* a\n\tb */"), "/* a\\n\\tb */");
        assert_eq!(escape_text("x"), "x");
    }
}

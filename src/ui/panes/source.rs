//! Source code pane rendering with syntax highlighting
//!
//! This module renders the source code pane, which displays the program being
//! explored with line numbers and a highlighted line.
//!
//! # Features
//!
//! - Syntax highlighting for keywords, type names, numbers and comments,
//!   including `/* */` comments that span several lines
//! - Highlighted line for the selected token, or an error marker for the line
//!   a compile error points at
//! - Manual scrolling when focused, automatic follow otherwise
//!
//! # Rendering
//!
//! The pane uses a simple character-by-character scanner to apply styles so it
//! can still colour source that fails to tokenize.

use super::{clamp_scroll, pane_block, scroll_into_view};
use crate::parser::lexer::KEYWORDS;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const TYPE_NAMES: [&str; 5] = ["int", "char", "float", "double", "void"];

/// Simple syntax highlighting for one source line.
///
/// `in_comment` carries an open `/* */` comment from one line to the next.
fn highlight_source_line(line: &str, in_comment: &mut bool) -> Line<'static> {
    let mut spans = Vec::new();
    let chars: Vec<char> = line.chars().collect();
    let mut current_word = String::new();
    let mut i = 0;

    let comment_style = Style::default().fg(DEFAULT_THEME.comment);

    while i < chars.len() {
        if *in_comment {
            let start = i;
            while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                i += 1;
            }
            if i < chars.len() {
                i += 2;
                *in_comment = false;
            }
            spans.push(Span::styled(
                chars[start..i].iter().collect::<String>(),
                comment_style,
            ));
            continue;
        }

        let c = chars[i];

        if c.is_ascii_alphanumeric() || c == '_' || (c == '.' && starts_number(&current_word)) {
            current_word.push(c);
            i += 1;
            continue;
        }

        if !current_word.is_empty() {
            spans.push(word_span(std::mem::take(&mut current_word)));
        }

        // Handle comments
        if c == '/' && chars.get(i + 1) == Some(&'/') {
            spans.push(Span::styled(
                chars[i..].iter().collect::<String>(),
                comment_style,
            ));
            break;
        }
        if c == '/' && chars.get(i + 1) == Some(&'*') {
            *in_comment = true;
            spans.push(Span::styled("/*", comment_style));
            i += 2;
            continue;
        }

        let style = match c {
            '{' | '}' | '(' | ')' | '[' | ']' => Style::default().fg(DEFAULT_THEME.primary),
            '+' | '-' | '*' | '/' | '%' | '=' | '<' | '>' | '!' => {
                Style::default().fg(DEFAULT_THEME.operator)
            }
            _ => Style::default().fg(DEFAULT_THEME.fg),
        };
        spans.push(Span::styled(c.to_string(), style));
        i += 1;
    }

    if !current_word.is_empty() {
        spans.push(word_span(current_word));
    }

    Line::from(spans)
}

fn starts_number(word: &str) -> bool {
    word.chars().next().is_some_and(|c| c.is_ascii_digit())
}

fn word_span(word: String) -> Span<'static> {
    let style = if TYPE_NAMES.contains(&word.as_str()) {
        Style::default().fg(DEFAULT_THEME.type_name)
    } else if KEYWORDS.contains(&word.as_str()) {
        Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD)
    } else if starts_number(&word) {
        Style::default().fg(DEFAULT_THEME.number)
    } else {
        Style::default().fg(DEFAULT_THEME.fg)
    };
    Span::styled(word, style)
}

/// Render the source code pane.
///
/// `marked_line` is 1-based. When `follow` is set the scroll offset is
/// adjusted so that the marked line stays visible.
#[allow(clippy::too_many_arguments)]
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    marked_line: Option<usize>,
    is_error: bool,
    is_focused: bool,
    follow: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Source Code ", is_focused);

    let lines: Vec<&str> = source_code.lines().collect();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1

    if let (true, Some(line)) = (follow, marked_line) {
        scroll_into_view(line.saturating_sub(1), scroll_offset, visible_height);
    }
    clamp_scroll(scroll_offset, lines.len(), visible_height);

    // Comment state has to be carried through the lines scrolled past
    let mut in_comment = false;
    for line in lines.iter().take(*scroll_offset) {
        highlight_source_line(line, &mut in_comment);
    }

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_marked = marked_line == Some(line_num);
            let mut content = highlight_source_line(line, &mut in_comment);

            let num_style = if is_marked && is_error {
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD)
            } else if is_marked {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment) // Line numbers
            };

            if is_marked {
                let bg = if is_error {
                    DEFAULT_THEME.error
                } else {
                    DEFAULT_THEME.current_line_bg
                };
                for span in &mut content.spans {
                    span.style = span.style.bg(bg);
                    if is_error {
                        span.style = span.style.fg(ratatui::style::Color::White);
                    }
                }
            }

            let mut spans = vec![Span::styled(format!("{:4} ", line_num), num_style)];
            spans.extend(content.spans);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(line: &Line) -> Vec<String> {
        line.spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn test_highlight_splits_words_and_symbols() {
        let mut in_comment = false;
        let line = highlight_source_line("int x = 3.5;", &mut in_comment);

        assert_eq!(texts(&line), ["int", " ", "x", " ", "=", " ", "3.5", ";"]);
        assert_eq!(line.spans[0].style.fg, Some(DEFAULT_THEME.type_name));
        assert_eq!(line.spans[6].style.fg, Some(DEFAULT_THEME.number));
    }

    #[test]
    fn test_block_comment_carries_across_lines() {
        let mut in_comment = false;
        let first = highlight_source_line("x = 1; /* start", &mut in_comment);
        assert!(in_comment);
        assert_eq!(first.spans.last().map(|s| s.content.as_ref()), Some(" start"));

        let second = highlight_source_line("still */ y", &mut in_comment);
        assert!(!in_comment);
        assert_eq!(texts(&second)[0], "still */");
        assert_eq!(second.spans[0].style.fg, Some(DEFAULT_THEME.comment));
    }

    #[test]
    fn test_line_comment_runs_to_end() {
        let mut in_comment = false;
        let line = highlight_source_line("return; // done", &mut in_comment);
        assert_eq!(texts(&line).last().map(String::as_str), Some("// done"));
        assert!(!in_comment);
    }
}

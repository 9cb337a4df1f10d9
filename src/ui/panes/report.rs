//! Analysis pane: complexity report for the compiled program

use super::{clamp_scroll, pane_block};
use crate::analysis::ComplexityReport;
use crate::compiler::CompileError;
use crate::parser::lexer::TokenKind;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Padding, Paragraph, Wrap},
    Frame,
};

fn report_lines(report: &ComplexityReport) -> Vec<Line<'static>> {
    let label_style = Style::default().fg(DEFAULT_THEME.comment);
    let value_style = Style::default()
        .fg(DEFAULT_THEME.secondary)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Time  ", label_style),
            Span::styled(report.time_complexity(), value_style),
        ]),
        Line::from(vec![
            Span::styled("Space ", label_style),
            Span::styled(report.space_complexity(), value_style),
        ]),
        Line::default(),
    ];

    for detail in report.details() {
        lines.push(Line::from(vec![
            Span::styled("• ", label_style),
            Span::styled(detail, Style::default().fg(DEFAULT_THEME.fg)),
        ]));
    }

    lines.push(Line::default());
    for kind in TokenKind::ALL {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<12}", kind.as_str()),
                Style::default().fg(DEFAULT_THEME.token_color(kind)),
            ),
            Span::styled(
                report.token_count(kind).to_string(),
                Style::default().fg(DEFAULT_THEME.fg),
            ),
        ]));
    }
    lines
}

/// Render the analysis pane
pub fn render_report_pane(
    frame: &mut Frame,
    area: Rect,
    report: Option<&ComplexityReport>,
    error: Option<&CompileError>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Analysis ", is_focused).padding(Padding::new(1, 0, 0, 0));

    let lines = match (report, error) {
        (Some(report), _) => report_lines(report),
        (None, Some(err)) => vec![Line::from(Span::styled(
            format!("No analysis: {} at {}", err.stage(), err.location()),
            Style::default().fg(DEFAULT_THEME.error),
        ))],
        (None, None) => vec![Line::from(Span::styled(
            "(no analysis)",
            Style::default().fg(DEFAULT_THEME.comment),
        ))],
    };

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    clamp_scroll(scroll_offset, lines.len(), visible_height);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((*scroll_offset as u16, 0));
    frame.render_widget(paragraph, area);
}

//! Main TUI application state and logic

use crate::analysis::ComplexityReport;
use crate::compiler::CompileError;
use crate::parser::{parse, tokenize, SyntaxNode, Token};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

use super::panes::TreeView;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tokens,
    Tree,
    Report,
}

impl FocusedPane {
    /// Move focus to the next pane (source -> tokens -> tree -> report)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Report,
            FocusedPane::Report => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Report,
            FocusedPane::Tokens => FocusedPane::Source,
            FocusedPane::Tree => FocusedPane::Tokens,
            FocusedPane::Report => FocusedPane::Tree,
        }
    }
}

/// The main application state
pub struct App {
    /// File the source was read from, used by reload
    pub path: Option<PathBuf>,

    /// The source code being explored
    pub source_code: String,

    /// Output of the last compilation. Tokens survive a parse error.
    pub tokens: Vec<Token>,
    pub tree: Option<SyntaxNode>,
    pub report: Option<ComplexityReport>,
    pub error: Option<CompileError>,

    /// Collapse state and cursor of the syntax tree pane
    pub tree_view: TreeView,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub token_scroll: usize,
    pub report_scroll: usize,

    /// Selected token index
    pub token_cursor: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create a new app and compile `source_code`
    pub fn new(source_code: String, path: Option<PathBuf>) -> Self {
        let mut app = App {
            path,
            source_code,
            tokens: Vec::new(),
            tree: None,
            report: None,
            error: None,
            tree_view: TreeView::new(),
            focused_pane: FocusedPane::Tokens,
            source_scroll: 0,
            token_scroll: 0,
            report_scroll: 0,
            token_cursor: 0,
            should_quit: false,
            status_message: String::new(),
        };
        app.load();
        app
    }

    /// Run both stages on the current source, keeping whatever succeeded
    fn load(&mut self) {
        self.tree = None;
        self.report = None;
        self.error = None;
        self.tree_view.reset();
        self.token_cursor = 0;
        self.token_scroll = 0;
        self.report_scroll = 0;

        match tokenize(&self.source_code) {
            Ok(tokens) => self.tokens = tokens,
            Err(e) => {
                self.tokens.clear();
                self.error = Some(e.into());
            }
        }

        if self.error.is_none() {
            match parse(&self.tokens) {
                Ok(tree) => {
                    self.report = Some(ComplexityReport::analyze(&self.tokens, &tree));
                    self.tree = Some(tree);
                }
                Err(e) => self.error = Some(e.into()),
            }
        }

        self.status_message = match (&self.error, &self.report) {
            (Some(err), _) => err.to_string(),
            (None, Some(report)) => format!(
                "Compiled: {} tokens, {} nodes",
                report.total_tokens(),
                report.node_count
            ),
            (None, None) => String::new(),
        };
        debug!(error = self.error.is_some(), "explorer loaded source");
    }

    /// Re-read the file from disk and recompile
    pub fn reload(&mut self) {
        let Some(path) = self.path.clone() else {
            self.status_message = "Nothing to reload".to_string();
            return;
        };

        match fs::read_to_string(&path) {
            Ok(source) => {
                self.source_code = source;
                self.load();
            }
            Err(e) => {
                self.status_message = format!("Cannot reload {}: {}", path.display(), e);
            }
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// 1-based source line to mark, and whether it is an error line
    pub fn marked_line(&self) -> Option<(usize, bool)> {
        if let Some(err) = &self.error {
            return Some((err.location().line, true));
        }
        self.tokens
            .get(self.token_cursor)
            .map(|token| (token.line(), false))
    }

    fn file_label(&self) -> String {
        self.path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "<input>".to_string())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Create layout: 4 panes in 2 columns, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        // Split into 2 columns
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(pane_area);

        // Left column: Source (top) | Tokens (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(columns[0]);

        // Right column: Tree (top) | Analysis (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(columns[1]);

        let marked = self.marked_line();
        super::panes::render_source_pane(
            frame,
            left_rows[0],
            &self.source_code,
            marked.map(|(line, _)| line),
            marked.is_some_and(|(_, is_error)| is_error),
            self.focused_pane == FocusedPane::Source,
            self.focused_pane != FocusedPane::Source,
            &mut self.source_scroll,
        );

        super::panes::render_tokens_pane(
            frame,
            left_rows[1],
            &self.tokens,
            self.token_cursor,
            self.focused_pane == FocusedPane::Tokens,
            &mut self.token_scroll,
        );

        super::panes::render_tree_pane(
            frame,
            right_rows[0],
            self.tree.as_ref(),
            self.error.as_ref(),
            &mut self.tree_view,
            self.focused_pane == FocusedPane::Tree,
        );

        super::panes::render_report_pane(
            frame,
            right_rows[1],
            self.report.as_ref(),
            self.error.as_ref(),
            self.focused_pane == FocusedPane::Report,
            &mut self.report_scroll,
        );

        // Render status bar
        super::panes::render_status_bar(
            frame,
            status_area,
            &self.status_message,
            &self.file_label(),
            self.error.as_ref(),
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    self.source_scroll = self.source_scroll.saturating_sub(1);
                }
                FocusedPane::Tokens => {
                    self.token_cursor = self.token_cursor.saturating_sub(1);
                }
                FocusedPane::Tree => self.tree_view.move_up(),
                FocusedPane::Report => {
                    self.report_scroll = self.report_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    self.source_scroll = self.source_scroll.saturating_add(1);
                }
                FocusedPane::Tokens => {
                    if self.token_cursor + 1 < self.tokens.len() {
                        self.token_cursor += 1;
                    }
                }
                FocusedPane::Tree => {
                    if let Some(tree) = &self.tree {
                        self.tree_view.move_down(tree);
                    }
                }
                FocusedPane::Report => {
                    self.report_scroll = self.report_scroll.saturating_add(1);
                }
            },
            KeyCode::Enter | KeyCode::Char(' ') => {
                if self.focused_pane == FocusedPane::Tree {
                    if let Some(tree) = &self.tree {
                        self.tree_view.toggle(tree);
                    }
                }
            }
            KeyCode::Char('e') => {
                self.tree_view.expand_all();
                self.status_message = "Expanded all nodes".to_string();
            }
            KeyCode::Char('c') => {
                if let Some(tree) = &self.tree {
                    self.tree_view.collapse_all(tree);
                    self.status_message = "Collapsed all nodes".to_string();
                }
            }
            KeyCode::Char('r') => self.reload(),
            _ => {}
        }
    }
}

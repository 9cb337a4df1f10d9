// minic: mini-C front end with a terminal syntax explorer

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use minic::ui::App;
use minic::{compile, Token};

/// Tokenize and parse a mini-C source file.
///
/// With none of the print flags the interactive explorer is opened.
#[derive(Debug, Parser)]
#[command(name = "minic", version, about = "Mini-C lexer, parser and syntax explorer")]
struct Cli {
    /// Source file to process
    file: PathBuf,

    /// Print the token table
    #[arg(long)]
    tokens: bool,

    /// Print the syntax tree outline
    #[arg(long)]
    tree: bool,

    /// Print the complexity report
    #[arg(long)]
    report: bool,

    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn directive_for_verbosity(v: u8) -> &'static str {
    match v {
        0 => "minic=warn",
        1 => "minic=debug",
        _ => "minic=trace",
    }
}

fn format_token(token: &Token) -> String {
    format!(
        "{:<12} {:<20} {}:{}",
        token.kind.as_str(),
        token.text.replace('\n', "\\n"),
        token.line(),
        token.column()
    )
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(cli.verbose))),
        )
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    if !cli.file.exists() {
        eprintln!("Error: File '{}' not found", cli.file.display());
        return ExitCode::FAILURE;
    }

    let source = match fs::read_to_string(&cli.file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: Cannot read '{}': {}", cli.file.display(), e);
            return ExitCode::FAILURE;
        }
    };
    debug!(path = %cli.file.display(), bytes = source.len(), "read source file");

    if !(cli.tokens || cli.tree || cli.report) {
        return match run_explorer(source, cli.file) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let compilation = match compile(&source) {
        Ok(compilation) => compilation,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if cli.tokens {
        for token in &compilation.tokens {
            println!("{}", format_token(token));
        }
    }
    if cli.tree {
        print!("{}", compilation.tree);
    }
    if cli.report {
        print!("{}", compilation.report);
    }

    ExitCode::SUCCESS
}

fn run_explorer(source: String, path: PathBuf) -> io::Result<()> {
    let mut app = App::new(source, Some(path));

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_directive_defaults() {
        assert_eq!(directive_for_verbosity(0), "minic=warn");
        assert_eq!(directive_for_verbosity(1), "minic=debug");
        assert_eq!(directive_for_verbosity(3), "minic=trace");
    }

    #[test]
    fn test_format_token_escapes_newlines() {
        let tokens = minic::tokenize("/* a\nb */").unwrap();
        assert_eq!(
            format_token(&tokens[0]),
            format!("{:<12} {:<20} 1:1", "COMMENT", "/* a\\nb */")
        );
    }
}

//! # Introduction
//!
//! minic is the front end of a compiler for a small C-like language. It turns
//! source text into classified, position-tagged tokens and those tokens into a
//! syntax tree, and can summarise the result and show all of it in a terminal
//! explorer built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → Syntax tree → Report → TUI
//! ```
//!
//! 1. [`parser`]: [`tokenize`] and [`parse`], plus the token and tree types.
//! 2. [`analysis`]: [`ComplexityReport`], counts and an estimated complexity
//!    derived from the tree.
//! 3. [`compiler`]: [`compile`] runs the stages above in order and merges
//!    their errors into [`CompileError`].
//! 4. [`ui`]: ratatui-based explorer; not part of the stable library API.
//!
//! ## Supported language
//!
//! Types: `int`, `char`, `float`, `double`, `void` (scalars only).
//! Statements: variable and function declarations, `if/else`, `while`,
//! `for`, `return`, blocks and expression statements.
//! Expressions: assignment, equality, comparison, `+ - * / %`, prefix `!`/`-`,
//! parentheses. Function bodies are parsed; parameter lists are skipped.
//!
//! ```
//! let tokens = minic::tokenize("int x = 5;").unwrap();
//! let tree = minic::parse(&tokens).unwrap();
//! assert_eq!(tree.children[0].label(), "VARIABLE_DECLARATION: x");
//! ```

pub mod analysis;
pub mod compiler;
pub mod parser;
pub mod ui;

pub use analysis::ComplexityReport;
pub use compiler::{compile, Compilation, CompileError};
pub use parser::{
    parse, tokenize, LexError, LexErrorKind, NodeKind, ParseError, ParseErrorKind,
    SourceLocation, SyntaxNode, Token, TokenKind,
};

//! Mini-C source code parser
//!
//! This module transforms source text into a syntax tree:
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parser entry point, cursor and error types (tokens → tree)
//! - `declarations`, `statements`, `expressions`: the grammar rules
//! - [`ast`]: syntax tree definitions
//!
//! # Supported language
//!
//! - Types: `int`, `char`, `float`, `double`, `void` (scalars only)
//! - Declarations: functions (parameter lists are skipped) and variables
//! - Statements: `if`/`else`, `while`, `for`, `return`, blocks, expression statements
//! - Expressions: assignment, `== != < <= > >=`, `+ - * / %`, prefix `! -`, grouping
//! - `//` and `/* */` comments are kept as tokens
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with one token of lookahead and a
//! precedence chain for binary operators. No external parser generator.

pub mod ast;
pub mod lexer;
pub mod parse;

mod declarations;
mod expressions;
mod statements;

pub use ast::{NodeKind, SourceLocation, SyntaxNode};
pub use lexer::{tokenize, LexError, LexErrorKind, Token, TokenKind};
pub use parse::{parse, ParseError, ParseErrorKind, Parser};

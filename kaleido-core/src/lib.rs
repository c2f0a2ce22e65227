//! Core front end for the Kaleido language.
//!
//! This crate provides the lexer and parser pipeline:
//!
//!   source text
//!     -> lexer   (tokens, total, never fails)
//!     -> parser  (AST items + diagnostics)
//!
//! Code generation is deliberately not part of this crate; the
//! [`backend`] module defines the contract a code generator has to
//! satisfy to consume the parsed items. Higher-level tools (CLI, REPL,
//! embedders) should depend on this crate rather than reimplementing
//! the pipeline.
//!
//! Nothing here holds state across invocations: each call to
//! [`lex`] or [`parse`] owns its own buffers, so both are safe to call
//! repeatedly and from independent threads.

// ---------------------------------------------------------------------
// Error handling and diagnostics
// ---------------------------------------------------------------------

pub mod error;

// ---------------------------------------------------------------------
// Front end: lookahead, lexing, parsing
// ---------------------------------------------------------------------

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod stream;

// ---------------------------------------------------------------------
// Backend seam (interface only, no implementation here)
// ---------------------------------------------------------------------

pub mod backend;

// ---------------------------------------------------------------------
// Public API re-exports
// ---------------------------------------------------------------------

pub use ast::{Expr, Function, Item, Prototype};
pub use error::{CodegenError, ParseError};
pub use lexer::{Token, lex};
pub use parser::{ParseResult, parse, parse_source};

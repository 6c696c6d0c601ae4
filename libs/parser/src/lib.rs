//! # Rule Script Parser
//!
//! Parser for the integer rule-scripting language used to compute runner
//! status, time, points and ranking scores.
//! Produces an arena-allocated AST that the evaluator walks.
//!
//! ## Architecture
//!
//! ```text
//! Source Text → strip comments → Splitter (statements) → Parser → Program
//!                                            Cursor (expressions) ┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use rulescript_parser::parse;
//!
//! let program = parse("a = 1; while (a < 50) a = a * 2; return a;").unwrap();
//! assert_eq!(
//!     program.to_string(),
//!     "(seq (= a 1) (while (< a 50) (= a (* a 2))) (return a))"
//! );
//! ```
//!
//! ## Pipeline Integration
//!
//! ```text
//! rulescript-parser → rulescript-eval
//! ```

pub mod ast;
pub mod error;
pub mod parser;
pub mod scanner;
pub mod splitter;

// Re-export public API
pub use ast::{BinaryOp, Node, NodeId, Program, UnaryOp};
pub use error::{ErrorCategory, Message, ScriptError};

use config::constants::MAX_NESTING_DEPTH;

// =============================================================================
// PUBLIC API
// =============================================================================

/// Parse rule script source into a [`Program`].
///
/// This is the main entry point for the parser.
///
/// ## Parameters
///
/// - `source`: Script source text
///
/// ## Returns
///
/// The program, or the first syntax error
///
/// ## Example
///
/// ```rust
/// use rulescript_parser::{parse, ErrorCategory};
///
/// assert!(parse("x = max(a, 3)").is_ok());
///
/// let error = parse("x = (1 + 2").unwrap_err();
/// assert_eq!(error.category(), ErrorCategory::Syntax);
/// ```
pub fn parse(source: &str) -> Result<Program, ScriptError> {
    parse_with_depth(source, MAX_NESTING_DEPTH)
}

/// Parse with an explicit nesting limit.
pub fn parse_with_depth(source: &str, max_depth: usize) -> Result<Program, ScriptError> {
    parser::Parser::new(max_depth).parse(source)
}

// =============================================================================
// TESTS
// =============================================================================

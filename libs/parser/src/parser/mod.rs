//! # Rule Script Parser
//!
//! Lexer-less recursive descent parser. It works on slices of the source text
//! directly: the [`Splitter`](crate::splitter::Splitter) cuts blocks into
//! statements, and expressions are read with a [`Cursor`](crate::scanner::Cursor)
//! using precedence climbing.
//!
//! ## Module Structure
//!
//! - `statements` - Blocks, statement dispatch, `else` re-attachment
//! - `control_flow` - `if`, `while`, `for`, `break`, `return`
//! - `expressions` - Expression entry point on a text fragment
//! - `operators` - Binary precedence climbing and assignment
//! - `primaries` - Prefix operators, literals, parentheses, `max`/`min`
//! - `postfix` - Indexing, `.size()`, `.sort()`, postfix `++`/`--`
//!
//! ## Example
//!
//! ```rust
//! use rulescript_parser::parser::Parser;
//!
//! let program = Parser::new(64).parse("x = 1; return x + 1;").unwrap();
//! assert_eq!(program.to_string(), "(seq (= x 1) (return (+ x 1)))");
//! ```

mod control_flow;
mod expressions;
mod operators;
mod postfix;
mod primaries;
mod statements;

use crate::ast::{Arena, Program};
use crate::error::{templates, ScriptError};
use crate::scanner::strip_comments;
use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use stacker::maybe_grow;
use tracing::debug;

// =============================================================================
// PARSER
// =============================================================================

/// Recursive descent parser building one [`Program`].
///
/// A parser is consumed by [`Parser::parse`]; build a new one per script.
pub struct Parser {
    /// Nodes built so far.
    arena: Arena,
    /// Number of loops enclosing the statement being parsed.
    loop_depth: usize,
    /// Current recursion depth.
    depth: usize,
    /// Recursion depth at which parsing fails.
    max_depth: usize,
}

impl Parser {
    /// Create a parser.
    ///
    /// ## Parameters
    ///
    /// - `max_depth`: Deepest statement/expression nesting accepted before
    ///   parsing fails with a syntax error
    pub fn new(max_depth: usize) -> Self {
        Self {
            arena: Arena::new(),
            loop_depth: 0,
            depth: 0,
            max_depth,
        }
    }

    /// Parse a whole script.
    ///
    /// `//` comments are stripped line by line before anything else.
    ///
    /// ## Returns
    ///
    /// The program, or the first syntax error found
    pub fn parse(mut self, source: &str) -> Result<Program, ScriptError> {
        let text = strip_comments(source);
        let root = self.parse_block(&text)?;

        debug!(nodes = self.arena.len(), "parsed program");
        Ok(Program::new(self.arena, root))
    }

    /// Run one recursive parse step, enforcing the nesting limit.
    ///
    /// The stack is grown on demand so deep but legal scripts do not overflow.
    fn nested<T>(
        &mut self,
        fragment: &str,
        step: impl FnOnce(&mut Self) -> Result<T, ScriptError>,
    ) -> Result<T, ScriptError> {
        if self.depth >= self.max_depth {
            return Err(ScriptError::syntax(
                templates::NESTING_TOO_DEEP,
                [self.max_depth.to_string(), fragment.trim().to_string()],
            ));
        }

        self.depth += 1;
        let result = maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || step(self));
        self.depth -= 1;
        result
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;

    #[test]
    fn test_parse_strips_comments() {
        let program = Parser::new(64)
            .parse("a = 1; // set a\n// return 5;\nreturn a;")
            .unwrap();
        assert_eq!(program.to_string(), "(seq (= a 1) (return a))");
    }

    #[test]
    fn test_parse_empty_source() {
        let program = Parser::new(64).parse("  // nothing\n").unwrap();
        assert_eq!(program.to_string(), "(seq)");
    }

    #[test]
    fn test_nesting_limit() {
        let source = format!("{}1{}", "(".repeat(40), ")".repeat(40));
        let err = Parser::new(16).parse(&source).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Syntax);
        assert_eq!(err.message().template(), templates::NESTING_TOO_DEEP);
        assert_eq!(err.message().args()[0], "16");
    }

    #[test]
    fn test_nesting_within_limit() {
        let source = format!("{}1{}", "(".repeat(20), ")".repeat(20));
        assert!(Parser::new(64).parse(&source).is_ok());
    }
}

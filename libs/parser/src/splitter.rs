//! # Statement Splitter
//!
//! Divides a blob of script text on a separator while treating bracketed
//! content as atomic. Three fixed configurations cover every use:
//!
//! | Splitter | Separator | Atomic brackets | Extra rule |
//! |----------|-----------|-----------------|------------|
//! | [`Splitter::STATEMENTS`] | `;` | `()` `[]` `{}` | a top-level `}` also ends a statement |
//! | [`Splitter::ARGUMENTS`] | `,` | `()` `[]` | |
//! | [`Splitter::FOR_HEADER`] | `;` | `()` `[]` | |
//!
//! ## Example
//!
//! ```rust
//! use rulescript_parser::splitter::Splitter;
//!
//! let parts = Splitter::STATEMENTS.split("a = 1; if (a) { b = 2; } c = 3").unwrap();
//! assert_eq!(parts, vec!["a = 1", "if (a) { b = 2; }", "c = 3"]);
//! ```

use crate::error::{templates, ScriptError};
use tracing::trace;

// =============================================================================
// SPLITTER
// =============================================================================

/// Separator plus the bracket pairs whose content must not be split.
#[derive(Debug, Clone, Copy)]
pub struct Splitter {
    separator: char,
    brackets: &'static [(char, char)],
    split_after_block: bool,
    keep_empty: bool,
}

impl Splitter {
    /// Top-level statements of a program or block.
    pub const STATEMENTS: Splitter = Splitter {
        separator: ';',
        brackets: &[('(', ')'), ('[', ']'), ('{', '}')],
        split_after_block: true,
        keep_empty: false,
    };

    /// Comma-separated call arguments.
    pub const ARGUMENTS: Splitter = Splitter {
        separator: ',',
        brackets: &[('(', ')'), ('[', ']')],
        split_after_block: false,
        keep_empty: true,
    };

    /// The three clauses of a `for (init; cond; update)` header.
    pub const FOR_HEADER: Splitter = Splitter {
        separator: ';',
        brackets: &[('(', ')'), ('[', ']')],
        split_after_block: false,
        keep_empty: true,
    };

    fn closer_for(&self, open: char) -> Option<char> {
        self.brackets
            .iter()
            .find(|(o, _)| *o == open)
            .map(|(_, c)| *c)
    }

    fn is_closer(&self, c: char) -> bool {
        self.brackets.iter().any(|(_, close)| *close == c)
    }

    /// Split `text` into trimmed pieces.
    ///
    /// Blank input yields no pieces. Blank pieces are dropped for statements
    /// and kept for arguments and `for` headers, where they matter for arity.
    pub fn split<'a>(&self, text: &'a str) -> Result<Vec<&'a str>, ScriptError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut pieces = Vec::new();
        let mut expected: Vec<(char, char)> = Vec::new();
        let mut start = 0;

        for (at, c) in text.char_indices() {
            if let Some(close) = self.closer_for(c) {
                expected.push((c, close));
            } else if self.is_closer(c) {
                match expected.pop() {
                    Some((_, close)) if close == c => {
                        if c == '}' && self.split_after_block && expected.is_empty() {
                            self.push_piece(&mut pieces, &text[start..=at]);
                            start = at + 1;
                        }
                    }
                    _ => {
                        return Err(ScriptError::syntax(
                            templates::UNMATCHED_DELIMITER,
                            [c.to_string(), text.trim().to_string()],
                        ));
                    }
                }
            } else if c == self.separator && expected.is_empty() {
                self.push_piece(&mut pieces, &text[start..at]);
                start = at + 1;
            }
        }

        if let Some((open, _)) = expected.first() {
            return Err(ScriptError::syntax(
                templates::UNMATCHED_DELIMITER,
                [open.to_string(), text.trim().to_string()],
            ));
        }

        let tail = &text[start..];
        if self.keep_empty || !tail.trim().is_empty() {
            self.push_piece(&mut pieces, tail);
        }

        trace!(pieces = pieces.len(), separator = %self.separator, "split");
        Ok(pieces)
    }

    fn push_piece<'a>(&self, pieces: &mut Vec<&'a str>, piece: &'a str) {
        let piece = piece.trim();
        if self.keep_empty || !piece.is_empty() {
            pieces.push(piece);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

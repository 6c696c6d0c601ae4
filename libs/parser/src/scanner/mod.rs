//! # Scanner
//!
//! Scanning primitives for the lexer-less parser: whitespace skipping, word
//! and number reading, balanced-delimiter matching and operator recognition.
//! Everything works directly on the source text through a [`Cursor`]; there is
//! no token stream.
//!
//! ## Example
//!
//! ```rust
//! use rulescript_parser::scanner::{Cursor, Word};
//!
//! let mut cursor = Cursor::new("  total[2]");
//! cursor.skip_whitespace();
//! assert_eq!(cursor.read_word().unwrap(), Some(Word::Ident("total")));
//! assert_eq!(cursor.take_delimited('[', ']').unwrap(), "2");
//! ```

mod cursor;
mod operator;

pub use cursor::Cursor;
pub use operator::{is_word_char, Keyword, Operator, MAX_PRECEDENCE};

use crate::error::{templates, ScriptError};

// =============================================================================
// COMMENTS
// =============================================================================

/// Strip a trailing `//` comment from every line.
///
/// ## Example
///
/// ```rust
/// use rulescript_parser::scanner::strip_comments;
///
/// assert_eq!(strip_comments("a = 1; // one\nb = 2;"), "a = 1; \nb = 2;");
/// ```
pub fn strip_comments(source: &str) -> String {
    source
        .lines()
        .map(|line| match line.find("//") {
            Some(at) => &line[..at],
            None => line,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// WORDS
// =============================================================================

/// A maximal run of word characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Word<'a> {
    /// Purely numeric word.
    Number(i32),
    /// Identifier or keyword.
    Ident(&'a str),
}

/// Leading statement keyword of `text`, with the text after it.
///
/// ## Example
///
/// ```rust
/// use rulescript_parser::scanner::{leading_keyword, Keyword};
///
/// assert_eq!(leading_keyword("else x = 1"), Some((Keyword::Else, " x = 1")));
/// assert_eq!(leading_keyword("elsewhere = 1"), None);
/// ```
pub fn leading_keyword(text: &str) -> Option<(Keyword, &str)> {
    let text = text.trim_start();
    let len = text.find(|c: char| !is_word_char(c)).unwrap_or(text.len());
    Keyword::from_word(&text[..len]).map(|kw| (kw, &text[len..]))
}

// =============================================================================
// CURSOR PRIMITIVES
// =============================================================================

impl<'a> Cursor<'a> {
    /// Skip whitespace.
    pub fn skip_whitespace(&mut self) {
        self.advance_while(char::is_whitespace);
    }

    /// Read a maximal run of word characters.
    ///
    /// ## Returns
    ///
    /// `None` if the cursor is not on a word character. A word starting with a
    /// digit must be purely numeric and fit in an `i32`. `-2147483648` is
    /// folded by the prefix parser before it gets here.
    pub fn read_word(&mut self) -> Result<Option<Word<'a>>, ScriptError> {
        let start = self.offset();
        self.advance_while(is_word_char);
        let word = self.since(start);

        if word.is_empty() {
            return Ok(None);
        }
        if !word.starts_with(|c: char| c.is_ascii_digit()) {
            return Ok(Some(Word::Ident(word)));
        }
        if !word.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ScriptError::syntax(templates::INVALID_NUMBER, [word]));
        }
        word.parse::<i32>()
            .map(|n| Some(Word::Number(n)))
            .map_err(|_| ScriptError::syntax(templates::INVALID_NUMBER, [word]))
    }

    /// Consume a balanced `open ... close` pair starting at the cursor.
    ///
    /// ## Returns
    ///
    /// The text between the delimiters. Fails with an unmatched-delimiter
    /// error if input ends before the nesting count returns to zero.
    pub fn take_delimited(&mut self, open: char, close: char) -> Result<&'a str, ScriptError> {
        let start = self.offset();
        if self.peek() != Some(open) {
            return Err(ScriptError::syntax(
                templates::UNMATCHED_DELIMITER,
                [open.to_string(), self.rest().to_string()],
            ));
        }
        self.advance();
        let inner_start = self.offset();

        let mut depth = 1usize;
        while let Some(c) = self.peek() {
            if c == open {
                depth += 1;
            } else if c == close {
                depth -= 1;
                if depth == 0 {
                    let inner = self.since(inner_start);
                    self.advance();
                    return Ok(inner);
                }
            }
            self.advance();
        }

        Err(ScriptError::syntax(
            templates::UNMATCHED_DELIMITER,
            [open.to_string(), self.source()[start..].to_string()],
        ))
    }

    /// Peek at the operator starting at the cursor.
    pub fn peek_operator(&self) -> Option<Operator> {
        Operator::match_prefix(self.rest()).map(|(op, _)| op)
    }

    /// Consume `op` if it starts at the cursor.
    pub fn eat_operator(&mut self, op: Operator) -> bool {
        match Operator::match_prefix(self.rest()) {
            Some((found, len)) if found == op => {
                self.advance_by(self.rest()[..len].chars().count());
                true
            }
            _ => false,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_comments_per_line() {
        let source = "a = 1; // first\n// whole line\nreturn a; // done";
        assert_eq!(strip_comments(source), "a = 1; \n\nreturn a; ");
    }

    #[test]
    fn test_read_word_identifier() {
        let mut cursor = Cursor::new("Points_2+1");
        assert_eq!(cursor.read_word().unwrap(), Some(Word::Ident("Points_2")));
        assert_eq!(cursor.rest(), "+1");
    }

    #[test]
    fn test_read_word_number() {
        let mut cursor = Cursor::new("120)");
        assert_eq!(cursor.read_word().unwrap(), Some(Word::Number(120)));
    }

    #[test]
    fn test_read_word_rejects_mixed_number() {
        let mut cursor = Cursor::new("1abc");
        let err = cursor.read_word().unwrap_err();
        assert_eq!(err.message().args(), ["1abc"]);
    }

    #[test]
    fn test_read_word_rejects_overflow() {
        let mut cursor = Cursor::new("99999999999");
        assert!(cursor.read_word().is_err());
    }

    #[test]
    fn test_read_word_none_on_symbol() {
        let mut cursor = Cursor::new("(x)");
        assert_eq!(cursor.read_word().unwrap(), None);
        assert_eq!(cursor.offset(), 0);
    }

    #[test]
    fn test_take_delimited_nested() {
        let mut cursor = Cursor::new("(a * (b + c)) + 1");
        assert_eq!(cursor.take_delimited('(', ')').unwrap(), "a * (b + c)");
        assert_eq!(cursor.rest(), " + 1");
    }

    #[test]
    fn test_take_delimited_unmatched() {
        let mut cursor = Cursor::new("{ a = 1;");
        let err = cursor.take_delimited('{', '}').unwrap_err();
        assert_eq!(err.message().template(), templates::UNMATCHED_DELIMITER);
        assert_eq!(err.message().args()[0], "{");
    }

    #[test]
    fn test_eat_operator() {
        let mut cursor = Cursor::new("++x");
        assert!(!cursor.eat_operator(Operator::Plus));
        assert!(cursor.eat_operator(Operator::Increment));
        assert_eq!(cursor.rest(), "x");
    }

    #[test]
    fn test_leading_keyword_requires_whole_word() {
        assert_eq!(leading_keyword("  if(x) y"), Some((Keyword::If, "(x) y")));
        assert_eq!(leading_keyword("iffy"), None);
        assert_eq!(leading_keyword("break"), Some((Keyword::Break, "")));
    }
}

//! # Character Cursor
//!
//! Peekable character cursor over one piece of script text.
//! Tracks the byte offset as it advances so callers can slice fragments
//! for error messages.
//!
//! ## Example
//!
//! ```rust
//! use rulescript_parser::scanner::Cursor;
//!
//! let mut cursor = Cursor::new("abc");
//! assert_eq!(cursor.peek(), Some('a'));
//! cursor.advance();
//! assert_eq!(cursor.rest(), "bc");
//! ```

// =============================================================================
// CURSOR
// =============================================================================

/// Character cursor with byte-offset tracking.
///
/// ## Example
///
/// ```rust
/// use rulescript_parser::scanner::Cursor;
///
/// let mut cursor = Cursor::new("a[1]");
/// assert_eq!(cursor.advance(), Some('a'));
/// assert_eq!(cursor.offset(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    /// Source text.
    source: &'a str,
    /// Current byte offset.
    byte: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the start of `source`.
    pub fn new(source: &'a str) -> Self {
        Self { source, byte: 0 }
    }

    /// The full text this cursor walks.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Current byte offset.
    pub fn offset(&self) -> usize {
        self.byte
    }

    /// Check if at end of input.
    pub fn is_eof(&self) -> bool {
        self.byte >= self.source.len()
    }

    /// Unconsumed remainder.
    pub fn rest(&self) -> &'a str {
        &self.source[self.byte..]
    }

    /// Text consumed since `start`.
    pub fn since(&self, start: usize) -> &'a str {
        &self.source[start..self.byte]
    }

    /// Peek at current character without consuming it.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use rulescript_parser::scanner::Cursor;
    ///
    /// let cursor = Cursor::new("abc");
    /// assert_eq!(cursor.peek(), Some('a'));
    /// assert_eq!(cursor.peek(), Some('a')); // Still 'a'
    /// ```
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Advance to next character.
    ///
    /// ## Returns
    ///
    /// Character that was consumed, or None if at end of input
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.byte += c.len_utf8();
        Some(c)
    }

    /// Advance over `n` characters (or to end of input).
    pub fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            if self.advance().is_none() {
                break;
            }
        }
    }

    /// Advance while predicate is true.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use rulescript_parser::scanner::Cursor;
    ///
    /// let mut cursor = Cursor::new("abc123");
    /// cursor.advance_while(|c| c.is_alphabetic());
    /// assert_eq!(cursor.peek(), Some('1'));
    /// ```
    pub fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !predicate(c) {
                break;
            }
            self.advance();
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

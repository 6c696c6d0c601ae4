//! # Expression Parsing
//!
//! Entry point for parsing a fragment of text as one expression.
//!
//! ## Operator Precedence
//!
//! | Level | Operators | Associativity |
//! |-------|-----------|---------------|
//! | 0 | `=` | Right |
//! | 0 | `&&` `\|\|` `and` `or` | Left |
//! | 1 | `==` `!=` `<` `>` `<=` `>=` | Left |
//! | 2 | `+` `-` | Left |
//! | 3 | `*` `/` `%` | Left |
//! | prefix | `-` `+` `!` `++` `--` | Right |
//! | postfix | `[]` `.size()` `.sort()` `++` `--` | Left |

use super::Parser;
use crate::ast::NodeId;
use crate::error::{templates, ScriptError};
use crate::scanner::Cursor;

impl Parser {
    /// Parse all of `text` as a single expression.
    ///
    /// ## Parameters
    ///
    /// - `text`: The expression source
    /// - `after`: What precedes `text`, named in the error when it is blank
    pub(super) fn parse_expression_text(
        &mut self,
        text: &str,
        after: &str,
    ) -> Result<NodeId, ScriptError> {
        if text.trim().is_empty() {
            return Err(ScriptError::syntax(templates::EXPECTED_EXPRESSION, [after]));
        }

        self.nested(text, |parser| {
            let mut cursor = Cursor::new(text);
            let node = parser.parse_level(&mut cursor, 0)?;
            cursor.skip_whitespace();
            if !cursor.is_eof() {
                return Err(ScriptError::syntax(templates::UNEXPECTED_TEXT, [cursor.rest()]));
            }
            Ok(node)
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

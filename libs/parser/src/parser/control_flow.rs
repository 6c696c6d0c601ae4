//! # Control Flow Parsing
//!
//! Parses control flow statements.
//!
//! ## Responsibilities
//!
//! - If: `if (x > 0) { ... }` (the `else` is attached by the block parser)
//! - While loops: `while (i < 10) i++`
//! - For loops: `for (i = 0; i < n; i++) { ... }`
//! - `break` (only inside a loop) and `return expr`

use super::Parser;
use crate::ast::{Node, NodeId, UnaryOp};
use crate::error::{templates, ScriptError};
use crate::scanner::{Cursor, Keyword};
use crate::splitter::Splitter;

impl Parser {
    /// Split `keyword (header) body` into header and body text.
    fn parse_header<'t>(
        &self,
        keyword: Keyword,
        rest: &'t str,
    ) -> Result<(&'t str, &'t str), ScriptError> {
        let mut cursor = Cursor::new(rest);
        cursor.skip_whitespace();
        if cursor.peek() != Some('(') {
            return Err(ScriptError::syntax(
                templates::EXPECTED_PAREN_AFTER,
                [keyword.as_str()],
            ));
        }
        let header = cursor.take_delimited('(', ')')?;
        Ok((header, cursor.rest()))
    }

    /// Parse a loop body with the loop counted as open.
    fn parse_loop_body(&mut self, text: &str) -> Result<NodeId, ScriptError> {
        self.loop_depth += 1;
        let body = self.parse_statement(text);
        self.loop_depth -= 1;
        body
    }

    /// Parse if statement.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// if = "if" "(" expression ")" statement
    /// ```
    pub(super) fn parse_if(&mut self, rest: &str) -> Result<NodeId, ScriptError> {
        let (header, body) = self.parse_header(Keyword::If, rest)?;
        let condition = self.parse_expression_text(header, "if (")?;
        let then_branch = self.parse_statement(body)?;

        Ok(self.arena.alloc(Node::Conditional {
            condition,
            then_branch,
            else_branch: None,
        }))
    }

    /// Parse while loop.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// while = "while" "(" expression ")" statement
    /// ```
    pub(super) fn parse_while(&mut self, rest: &str) -> Result<NodeId, ScriptError> {
        let (header, body) = self.parse_header(Keyword::While, rest)?;
        let condition = self.parse_expression_text(header, "while (")?;
        let body = self.parse_loop_body(body)?;

        Ok(self.arena.alloc(Node::While { condition, body }))
    }

    /// Parse for loop.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// for = "for" "(" expression? ";" expression? ";" expression? ")" statement
    /// ```
    ///
    /// Absent init and update clauses become no-ops. An absent condition is
    /// always true.
    pub(super) fn parse_for(&mut self, rest: &str) -> Result<NodeId, ScriptError> {
        let (header, body) = self.parse_header(Keyword::For, rest)?;
        let clauses = Splitter::FOR_HEADER.split(header)?;
        let &[init, condition, update] = clauses.as_slice() else {
            return Err(ScriptError::syntax(
                templates::FOR_HEADER,
                [clauses.len().to_string()],
            ));
        };

        let init = self.parse_optional_clause(init)?;
        let condition = if condition.is_empty() {
            self.arena.alloc(Node::Number(1))
        } else {
            self.parse_expression_text(condition, "for (")?
        };
        let update = self.parse_optional_clause(update)?;
        let body = self.parse_loop_body(body)?;

        Ok(self.arena.alloc(Node::For {
            init,
            condition,
            update,
            body,
        }))
    }

    fn parse_optional_clause(&mut self, clause: &str) -> Result<NodeId, ScriptError> {
        if clause.is_empty() {
            Ok(self.arena.alloc(Node::Empty))
        } else {
            self.parse_expression_text(clause, "for (")
        }
    }

    pub(super) fn parse_break(&mut self, rest: &str) -> Result<NodeId, ScriptError> {
        let rest = rest.trim();
        if !rest.is_empty() {
            return Err(ScriptError::syntax(templates::UNEXPECTED_TEXT, [rest]));
        }
        if self.loop_depth == 0 {
            return Err(ScriptError::syntax(
                templates::BREAK_OUTSIDE_LOOP,
                Vec::<String>::new(),
            ));
        }
        Ok(self.arena.alloc(Node::Break))
    }

    /// Parse return statement. The value is mandatory.
    pub(super) fn parse_return(&mut self, rest: &str) -> Result<NodeId, ScriptError> {
        let operand = self.parse_expression_text(rest, "return")?;
        Ok(self.arena.alloc(Node::Unary {
            op: UnaryOp::Return,
            operand,
        }))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::error::templates;
    use crate::parser::Parser;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> String {
        Parser::new(64).parse(source).unwrap().to_string()
    }

    fn template_of(source: &str) -> &'static str {
        Parser::new(64).parse(source).unwrap_err().message().template()
    }

    #[test]
    fn test_if_without_else() {
        assert_eq!(parse("if (a > 1) b = 2"), "(seq (if (> a 1) (= b 2)))");
    }

    #[test]
    fn test_while_loop() {
        assert_eq!(
            parse("while (i < 3) { i++; }"),
            "(seq (while (< i 3) (seq (post++ i))))"
        );
    }

    #[test]
    fn test_for_loop() {
        assert_eq!(
            parse("for (i = 0; i < n; i++) s = s + x[i];"),
            "(seq (for (= i 0) (< i n) (post++ i) (= s (+ s x[i]))))"
        );
    }

    #[test]
    fn test_for_absent_clauses() {
        assert_eq!(parse("for (;;) break;"), "(seq (for () 1 () break))");
    }

    #[test]
    fn test_for_wrong_clause_count() {
        assert_eq!(template_of("for (i = 0; i < 3) i++;"), templates::FOR_HEADER);
        assert_eq!(template_of("for () i++;"), templates::FOR_HEADER);
    }

    #[test]
    fn test_missing_paren() {
        let err = Parser::new(64).parse("while i < 3 i++").unwrap_err();
        assert_eq!(err.message().template(), templates::EXPECTED_PAREN_AFTER);
        assert_eq!(err.message().args(), ["while"]);
    }

    #[test]
    fn test_empty_condition() {
        assert_eq!(template_of("if () a = 1"), templates::EXPECTED_EXPRESSION);
    }

    #[test]
    fn test_break_outside_loop() {
        assert_eq!(template_of("a = 1; break;"), templates::BREAK_OUTSIDE_LOOP);
        assert_eq!(template_of("if (a) break;"), templates::BREAK_OUTSIDE_LOOP);
    }

    #[test]
    fn test_break_inside_nested_if() {
        assert_eq!(
            parse("while (1) { if (a) break; }"),
            "(seq (while 1 (seq (if a break))))"
        );
    }

    #[test]
    fn test_break_with_trailing_text() {
        assert_eq!(template_of("while (1) break 2;"), templates::UNEXPECTED_TEXT);
    }

    #[test]
    fn test_return_requires_value() {
        assert_eq!(template_of("return;"), templates::EXPECTED_EXPRESSION);
        assert_eq!(parse("return(a)"), "(seq (return a))");
    }
}

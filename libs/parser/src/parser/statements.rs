//! # Statement Parsing
//!
//! Splits a block into statements and dispatches each one on its leading
//! keyword.
//!
//! ## Grammar
//!
//! ```text
//! block     = statement (";" statement)*
//! statement = "{" block "}" | if | while | for | "break" | "return" expr
//!           | expression | ""
//! ```
//!
//! A statement starting with `else` is not parsed on its own: it becomes the
//! false branch of the innermost open `if` in the previous statement.

use super::Parser;
use crate::ast::{Node, NodeId};
use crate::error::{templates, ScriptError};
use crate::scanner::{leading_keyword, Cursor, Keyword};
use crate::splitter::Splitter;

impl Parser {
    /// Parse a sequence of statements.
    ///
    /// ## Example
    ///
    /// ```text
    /// a = 1; if (a) b = 2; else b = 3; return b
    /// ```
    pub(super) fn parse_block(&mut self, text: &str) -> Result<NodeId, ScriptError> {
        let pieces = Splitter::STATEMENTS.split(text)?;
        let mut children: Vec<NodeId> = Vec::with_capacity(pieces.len());

        for piece in pieces {
            if let Some((Keyword::Else, rest)) = leading_keyword(piece) {
                let (target, loops) = children
                    .last()
                    .and_then(|&previous| self.open_conditional(previous))
                    .ok_or_else(|| ScriptError::syntax(templates::DANGLING_ELSE, [piece]))?;

                // The branch sits inside every loop crossed to reach `target`.
                self.loop_depth += loops;
                let branch = self.parse_statement(rest);
                self.loop_depth -= loops;
                let branch = branch?;

                if let Node::Conditional { else_branch, .. } = self.arena.get_mut(target) {
                    *else_branch = Some(branch);
                }
                continue;
            }

            children.push(self.parse_statement(piece)?);
        }

        Ok(self.arena.alloc(Node::Sequence(children)))
    }

    /// Innermost `if` under `id` that can still take an `else`, with the
    /// number of loops between `id` and it.
    ///
    /// Follows un-braced true branches, loop bodies and false-branch chains.
    /// A braced block closes everything inside it.
    fn open_conditional(&self, id: NodeId) -> Option<(NodeId, usize)> {
        match self.arena.get(id) {
            Node::Conditional {
                then_branch,
                else_branch: None,
                ..
            } => self.open_conditional(*then_branch).or(Some((id, 0))),
            Node::Conditional {
                else_branch: Some(else_branch),
                ..
            } => self.open_conditional(*else_branch),
            Node::While { body, .. } | Node::For { body, .. } => self
                .open_conditional(*body)
                .map(|(target, loops)| (target, loops + 1)),
            _ => None,
        }
    }

    /// Parse one statement.
    pub(super) fn parse_statement(&mut self, text: &str) -> Result<NodeId, ScriptError> {
        let text = text.trim();
        self.nested(text, |parser| parser.parse_statement_inner(text))
    }

    fn parse_statement_inner(&mut self, text: &str) -> Result<NodeId, ScriptError> {
        if text.is_empty() {
            return Ok(self.arena.alloc(Node::Empty));
        }

        if text.starts_with('{') {
            let mut cursor = Cursor::new(text);
            let inner = cursor.take_delimited('{', '}')?;
            cursor.skip_whitespace();
            if !cursor.is_eof() {
                return Err(ScriptError::syntax(templates::UNEXPECTED_TEXT, [cursor.rest()]));
            }
            return self.parse_block(inner);
        }

        match leading_keyword(text) {
            Some((Keyword::If, rest)) => self.parse_if(rest),
            Some((Keyword::While, rest)) => self.parse_while(rest),
            Some((Keyword::For, rest)) => self.parse_for(rest),
            Some((Keyword::Break, rest)) => self.parse_break(rest),
            Some((Keyword::Return, rest)) => self.parse_return(rest),
            Some((Keyword::Else, _)) => Err(ScriptError::syntax(templates::DANGLING_ELSE, [text])),
            None => self.parse_expression_text(text, text),
        }
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

    #[test]
    fn test_block_statement() {
        assert_eq!(parse("{ a = 1; b = 2; } c = 3"), "(seq (seq (= a 1) (= b 2)) (= c 3))");
    }

    #[test]
    fn test_empty_statements_dropped() {
        assert_eq!(parse(";;a;;"), "(seq a)");
    }

    #[test]
    fn test_else_attaches_to_previous_if() {
        assert_eq!(
            parse("if (x) y = 1; else y = 2;"),
            "(seq (if x (= y 1) (= y 2)))"
        );
    }

    #[test]
    fn test_else_if_chain() {
        assert_eq!(
            parse("if (a) { r = 1; } else if (b) { r = 2; } else { r = 3; }"),
            "(seq (if a (seq (= r 1)) (if b (seq (= r 2)) (seq (= r 3)))))"
        );
    }

    #[test]
    fn test_dangling_else_binds_innermost() {
        assert_eq!(
            parse("if (a) if (b) x = 1; else x = 2;"),
            "(seq (if a (if b (= x 1) (= x 2))))"
        );
    }

    #[test]
    fn test_second_else_binds_outer() {
        assert_eq!(
            parse("if (a) if (b) x = 1; else x = 2; else x = 3;"),
            "(seq (if a (if b (= x 1) (= x 2)) (= x 3)))"
        );
    }

    #[test]
    fn test_braced_if_closes_inner() {
        assert_eq!(
            parse("if (a) { if (b) x = 1; } else x = 2;"),
            "(seq (if a (seq (if b (= x 1))) (= x 2)))"
        );
    }

    #[test]
    fn test_else_reaches_into_loop_body() {
        assert_eq!(
            parse("while (a) if (b) { x = 1; } else { break; }"),
            "(seq (while a (if b (seq (= x 1)) (seq break))))"
        );
    }

    #[test]
    fn test_else_without_if() {
        let err = Parser::new(64).parse("a = 1; else a = 2;").unwrap_err();
        assert_eq!(err.message().template(), templates::DANGLING_ELSE);
    }

    #[test]
    fn test_else_first_statement() {
        assert!(Parser::new(64).parse("else { a = 1; }").is_err());
    }

    #[test]
    fn test_trailing_text_after_block() {
        let err = Parser::new(64).parse("x = {a}[1]").unwrap_err();
        assert_eq!(err.message().template(), templates::BLOCK_IN_EXPRESSION);
    }
}

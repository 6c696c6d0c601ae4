//! # Primary Expression Parsing
//!
//! Prefix operators and the atoms they apply to.
//!
//! ## Responsibilities
//!
//! - Prefix operators: `-x`, `+x`, `!x`, `++x`, `--x`
//! - Number literals: `42`
//! - Parenthesized expressions: `(1 + 2)`
//! - Two-argument calls: `max(a, b)`, `min(a, b)`
//! - Names, handed on to the postfix parser
//!
//! Statement keywords and brace blocks are rejected here.

use super::Parser;
use crate::ast::{BinaryOp, Node, NodeId, UnaryOp};
use crate::error::{templates, ScriptError};
use crate::scanner::{is_word_char, Cursor, Keyword, Operator, Word};
use crate::splitter::Splitter;

/// Magnitude of `i32::MIN`, which is only a valid literal after a `-`.
const MIN_MAGNITUDE: &str = "2147483648";

/// Consume `-2147483648` as one literal.
fn eat_min_literal(cursor: &mut Cursor<'_>) -> bool {
    let mut ahead = cursor.clone();
    ahead.advance();
    ahead.skip_whitespace();
    let start = ahead.offset();
    ahead.advance_while(is_word_char);
    if ahead.since(start) != MIN_MAGNITUDE {
        return false;
    }
    *cursor = ahead;
    true
}

impl Parser {
    /// Parse a prefix expression.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// unary = ("-" | "+" | "!") unary | ("++" | "--") postfix | postfix
    /// ```
    pub(super) fn parse_unary(&mut self, cursor: &mut Cursor<'_>) -> Result<NodeId, ScriptError> {
        cursor.skip_whitespace();
        let start = cursor.offset();

        let op = match cursor.peek_operator() {
            Some(op @ (Operator::Increment | Operator::Decrement)) => {
                cursor.eat_operator(op);
                let operand = self.parse_postfix(cursor)?;
                if !self.arena.get(operand).is_lvalue() {
                    return Err(ScriptError::syntax(
                        templates::NOT_ASSIGNABLE,
                        [cursor.since(start).trim()],
                    ));
                }
                let op = if op == Operator::Increment {
                    UnaryOp::PreIncrement
                } else {
                    UnaryOp::PreDecrement
                };
                return Ok(self.arena.alloc(Node::Unary { op, operand }));
            }
            Some(Operator::Minus) => {
                if eat_min_literal(cursor) {
                    return Ok(self.arena.alloc(Node::Number(i32::MIN)));
                }
                Some(UnaryOp::Negate)
            }
            Some(Operator::Bang) => Some(UnaryOp::Not),
            Some(Operator::Plus) => None,
            _ => return self.parse_postfix(cursor),
        };

        cursor.advance();
        let operand = self.nested(cursor.rest(), |parser| parser.parse_unary(cursor))?;
        match op {
            Some(op) => Ok(self.arena.alloc(Node::Unary { op, operand })),
            None => Ok(operand),
        }
    }

    /// Parse an atom.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// primary = number | "(" expression ")" | ("max" | "min") "(" expr "," expr ")"
    ///         | reference
    /// ```
    pub(super) fn parse_primary(&mut self, cursor: &mut Cursor<'_>) -> Result<NodeId, ScriptError> {
        cursor.skip_whitespace();
        match cursor.peek() {
            None => {
                return Err(ScriptError::syntax(
                    templates::EXPECTED_EXPRESSION,
                    [cursor.source().trim()],
                ));
            }
            Some('(') => {
                let inner = cursor.take_delimited('(', ')')?;
                return self.parse_expression_text(inner, "(");
            }
            Some('{') => {
                return Err(ScriptError::syntax(
                    templates::BLOCK_IN_EXPRESSION,
                    [cursor.rest().trim()],
                ));
            }
            Some(_) => {}
        }

        let start = cursor.offset();
        match cursor.read_word()? {
            Some(Word::Number(n)) => Ok(self.arena.alloc(Node::Number(n))),
            Some(Word::Ident(word)) => {
                if let Some(keyword) = Keyword::from_word(word) {
                    return Err(ScriptError::syntax(
                        templates::UNEXPECTED_KEYWORD,
                        [keyword.as_str()],
                    ));
                }
                let extremum = match word {
                    "max" => Some(BinaryOp::Max),
                    "min" => Some(BinaryOp::Min),
                    _ => None,
                };
                cursor.skip_whitespace();
                match extremum {
                    Some(op) if cursor.peek() == Some('(') => self.parse_extremum(cursor, op, word),
                    _ => self.parse_reference(cursor, word, start),
                }
            }
            None => Err(ScriptError::syntax(
                templates::UNEXPECTED_TEXT,
                [cursor.rest().trim()],
            )),
        }
    }

    /// Parse the argument list of `max` or `min`.
    fn parse_extremum(
        &mut self,
        cursor: &mut Cursor<'_>,
        op: BinaryOp,
        word: &str,
    ) -> Result<NodeId, ScriptError> {
        let inner = cursor.take_delimited('(', ')')?;
        let args = Splitter::ARGUMENTS.split(inner)?;
        let &[left, right] = args.as_slice() else {
            return Err(ScriptError::syntax(
                templates::WRONG_ARGUMENT_COUNT,
                [word.to_string(), "2".to_string(), args.len().to_string()],
            ));
        };

        let after = format!("{word}(");
        let left = self.parse_expression_text(left, &after)?;
        let right = self.parse_expression_text(right, &after)?;
        Ok(self.arena.alloc(Node::Binary { op, left, right }))
    }
}

// =============================================================================
// TESTS
// =============================================================================

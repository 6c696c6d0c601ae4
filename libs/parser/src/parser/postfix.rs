//! # Postfix Expression Parsing
//!
//! Parses what may follow an atom: index access, method calls and postfix
//! increments.
//!
//! ## Responsibilities
//!
//! - Index access: `arr[0]`, `matrix[i][j]`
//! - Methods: `arr.size()`, `matrix[i].size()`, `arr.sort()`
//! - Postfix increments: `i++`, `a[2]--`

use super::Parser;
use crate::ast::{Node, NodeId, UnaryOp};
use crate::error::{templates, ScriptError};
use crate::scanner::{Cursor, Operator, Word};

impl Parser {
    /// Parse an atom and an optional postfix `++`/`--`.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// postfix = primary ("++" | "--")?
    /// ```
    pub(super) fn parse_postfix(&mut self, cursor: &mut Cursor<'_>) -> Result<NodeId, ScriptError> {
        cursor.skip_whitespace();
        let start = cursor.offset();
        let operand = self.parse_primary(cursor)?;

        cursor.skip_whitespace();
        let (token, op) = match cursor.peek_operator() {
            Some(Operator::Increment) => (Operator::Increment, UnaryOp::PostIncrement),
            Some(Operator::Decrement) => (Operator::Decrement, UnaryOp::PostDecrement),
            _ => return Ok(operand),
        };

        if !self.arena.get(operand).is_lvalue() {
            return Err(ScriptError::syntax(
                templates::NOT_ASSIGNABLE,
                [cursor.since(start).trim()],
            ));
        }
        cursor.eat_operator(token);
        Ok(self.arena.alloc(Node::Unary { op, operand }))
    }

    /// Parse a name with up to two indices and an optional method call.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// reference = identifier ("[" expression "]" ("[" expression "]")?)?
    ///             ("." ("size" | "sort") "(" ")")?
    /// ```
    ///
    /// ## Parameters
    ///
    /// - `name`: The identifier, already consumed
    /// - `start`: Offset of the identifier, for error fragments
    pub(super) fn parse_reference(
        &mut self,
        cursor: &mut Cursor<'_>,
        name: &str,
        start: usize,
    ) -> Result<NodeId, ScriptError> {
        let mut indices = Vec::with_capacity(2);
        while indices.len() < 2 {
            cursor.skip_whitespace();
            if cursor.peek() != Some('[') {
                break;
            }
            let inner = cursor.take_delimited('[', ']')?;
            indices.push(self.parse_expression_text(inner, &format!("{name}["))?);
        }

        let reference = match (indices.first(), indices.get(1)) {
            (None, _) => Node::Name(name.to_string()),
            (Some(&index), column) => Node::Index {
                name: name.to_string(),
                index,
                column: column.copied(),
            },
        };
        let reference = self.arena.alloc(reference);

        cursor.skip_whitespace();
        let target_end = cursor.offset();
        if cursor.peek() != Some('.') {
            return Ok(reference);
        }
        cursor.advance();
        cursor.skip_whitespace();

        let method = match cursor.read_word()? {
            Some(Word::Ident(method)) => method,
            Some(Word::Number(_)) | None => {
                return Err(ScriptError::syntax(
                    templates::UNKNOWN_METHOD,
                    [cursor.rest().trim()],
                ));
            }
        };

        cursor.skip_whitespace();
        if cursor.peek() != Some('(') {
            return Err(ScriptError::syntax(templates::EXPECTED_PAREN_AFTER, [method]));
        }
        if !cursor.take_delimited('(', ')')?.trim().is_empty() {
            return Err(ScriptError::syntax(templates::METHOD_ARGUMENTS, [method]));
        }

        let op = match (method, indices.len()) {
            ("size", 0) => UnaryOp::Size,
            ("size", 1) => UnaryOp::RowSize,
            ("sort", 0) => UnaryOp::Sort,
            ("size" | "sort", _) => {
                let target = cursor.source()[start..target_end].trim();
                return Err(ScriptError::syntax(templates::METHOD_TARGET, [method, target]));
            }
            _ => return Err(ScriptError::syntax(templates::UNKNOWN_METHOD, [method])),
        };
        Ok(self.arena.alloc(Node::Unary {
            op,
            operand: reference,
        }))
    }
}

// =============================================================================
// TESTS
// =============================================================================

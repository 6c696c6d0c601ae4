//! # Operator Parsing
//!
//! Binary operators by precedence climbing. Each level parses the next higher
//! level for its operands, so a chain like `16-8+4` folds to the left.
//! Assignment is the exception: its right side is a full expression.
//!
//! ## Example
//!
//! ```rust
//! let program = rulescript_parser::parse("a = b = 16 - 8 + 4").unwrap();
//! assert_eq!(program.to_string(), "(seq (= a (= b (+ (- 16 8) 4))))");
//! ```

use super::Parser;
use crate::ast::{BinaryOp, Node, NodeId};
use crate::error::{templates, ScriptError};
use crate::scanner::{Cursor, Operator, MAX_PRECEDENCE};

/// Node operator for a binary operator token.
fn binary_op(op: Operator) -> Option<BinaryOp> {
    let op = match op {
        Operator::Assign => BinaryOp::Assign,
        Operator::And => BinaryOp::And,
        Operator::Or => BinaryOp::Or,
        Operator::Equal => BinaryOp::Equal,
        Operator::NotEqual => BinaryOp::NotEqual,
        Operator::Less => BinaryOp::Less,
        Operator::Greater => BinaryOp::Greater,
        Operator::LessEqual => BinaryOp::LessEqual,
        Operator::GreaterEqual => BinaryOp::GreaterEqual,
        Operator::Plus => BinaryOp::Add,
        Operator::Minus => BinaryOp::Subtract,
        Operator::Star => BinaryOp::Multiply,
        Operator::Slash => BinaryOp::Divide,
        Operator::Percent => BinaryOp::Remainder,
        Operator::Bang | Operator::Increment | Operator::Decrement => return None,
    };
    Some(op)
}

impl Parser {
    /// Parse operators of precedence `level` and above.
    ///
    /// ## Parameters
    ///
    /// - `cursor`: Positioned at the start of the operand
    /// - `level`: Lowest precedence to consume
    pub(super) fn parse_level(
        &mut self,
        cursor: &mut Cursor<'_>,
        level: u8,
    ) -> Result<NodeId, ScriptError> {
        if level > MAX_PRECEDENCE {
            return self.parse_unary(cursor);
        }

        cursor.skip_whitespace();
        let start = cursor.offset();
        let mut left = self.parse_level(cursor, level + 1)?;

        loop {
            cursor.skip_whitespace();
            let operator_at = cursor.offset();
            let Some(op) = cursor
                .peek_operator()
                .filter(|op| op.precedence() == Some(level))
            else {
                break;
            };
            let Some(binary) = binary_op(op) else {
                break;
            };
            cursor.eat_operator(op);

            if binary == BinaryOp::Assign {
                if !self.arena.get(left).is_lvalue() {
                    let target = cursor.source()[start..operator_at].trim();
                    return Err(ScriptError::syntax(templates::NOT_ASSIGNABLE, [target]));
                }
                let right = self.parse_level(cursor, 0)?;
                left = self.arena.alloc(Node::Binary {
                    op: binary,
                    left,
                    right,
                });
                break;
            }

            let right = self.parse_level(cursor, level + 1)?;
            left = self.arena.alloc(Node::Binary {
                op: binary,
                left,
                right,
            });
        }

        Ok(left)
    }
}

// =============================================================================
// TESTS
// =============================================================================

//! Operators, references and assignment.

use super::{Evaluator, Outcome};
use rulescript_parser::error::templates;
use rulescript_parser::{BinaryOp, Node, NodeId, ScriptError, UnaryOp};

impl<'p> Evaluator<'p, '_> {
    /// `name[i]` or `name[i][j]` as an rvalue.
    pub(super) fn eval_index(
        &mut self,
        name: &str,
        index: NodeId,
        column: Option<NodeId>,
    ) -> Result<Outcome, ScriptError> {
        let row = self.value(index)?;
        let value = match column {
            Some(column) => {
                let column = self.value(column)?;
                self.env.read_cell(name, row, column)?
            }
            None => self.env.read_element(name, row)?,
        };
        Ok(Outcome::value(value))
    }

    pub(super) fn eval_unary(
        &mut self,
        id: NodeId,
        op: UnaryOp,
        operand: NodeId,
    ) -> Result<Outcome, ScriptError> {
        let program = self.program;
        match op {
            UnaryOp::Negate => Ok(Outcome::value(self.value(operand)?.wrapping_neg())),
            UnaryOp::Not => Ok(Outcome::value(i32::from(self.value(operand)? == 0))),
            UnaryOp::PreIncrement => self.step(operand, 1).map(|(_, new)| Outcome::value(new)),
            UnaryOp::PreDecrement => self.step(operand, -1).map(|(_, new)| Outcome::value(new)),
            UnaryOp::PostIncrement => self.step(operand, 1).map(|(old, _)| Outcome::value(old)),
            UnaryOp::PostDecrement => self.step(operand, -1).map(|(old, _)| Outcome::value(old)),
            UnaryOp::Size => {
                let name = self.reference_name(id, operand, "size")?;
                self.env.size(name).map(Outcome::value)
            }
            UnaryOp::RowSize => match program.node(operand) {
                Node::Index {
                    name,
                    index,
                    column: None,
                } => {
                    let row = self.value(*index)?;
                    self.env.row_size(name, row).map(Outcome::value)
                }
                _ => Err(self.bad_target(id, "size")),
            },
            UnaryOp::Sort => {
                let name = self.reference_name(id, operand, "sort")?;
                self.env.sort(name)?;
                Ok(Outcome::silent(0))
            }
            UnaryOp::Return => {
                let value = self.value(operand)?;
                self.ctx.set_return(value);
                Ok(Outcome::value(value))
            }
        }
    }

    /// Add `delta` to an lvalue. Returns `(old, new)`.
    fn step(&mut self, target: NodeId, delta: i32) -> Result<(i32, i32), ScriptError> {
        let program = self.program;
        match program.node(target) {
            Node::Name(name) => self.env.increment(name, delta),
            Node::Index {
                name,
                index,
                column: None,
            } => {
                let at = self.value(*index)?;
                self.env.increment_element(name, at, delta)
            }
            _ => Err(ScriptError::syntax(
                templates::NOT_ASSIGNABLE,
                [program.render(target)],
            )),
        }
    }

    /// The bare name a method is called on.
    fn reference_name(
        &self,
        id: NodeId,
        operand: NodeId,
        method: &str,
    ) -> Result<&'p str, ScriptError> {
        let program: &'p _ = self.program;
        match program.node(operand) {
            Node::Name(name) => Ok(name),
            _ => Err(self.bad_target(id, method)),
        }
    }

    fn bad_target(&self, id: NodeId, method: &str) -> ScriptError {
        ScriptError::syntax(templates::METHOD_TARGET, [method.to_string(), self.program.render(id)])
    }

    pub(super) fn eval_binary(
        &mut self,
        id: NodeId,
        op: BinaryOp,
        left: NodeId,
        right: NodeId,
    ) -> Result<Outcome, ScriptError> {
        if op == BinaryOp::Assign {
            return self.assign(left, right);
        }

        let l = self.value(left)?;
        let r = self.value(right)?;
        let value = match op {
            BinaryOp::Add => l.wrapping_add(r),
            BinaryOp::Subtract => l.wrapping_sub(r),
            BinaryOp::Multiply => l.wrapping_mul(r),
            BinaryOp::Divide | BinaryOp::Remainder if r == 0 => {
                return Err(ScriptError::arithmetic(
                    templates::DIVISION_BY_ZERO,
                    [self.program.render(id)],
                ));
            }
            BinaryOp::Divide => l.wrapping_div(r),
            BinaryOp::Remainder => l.wrapping_rem(r),
            BinaryOp::Equal => i32::from(l == r),
            BinaryOp::NotEqual => i32::from(l != r),
            BinaryOp::Less => i32::from(l < r),
            BinaryOp::Greater => i32::from(l > r),
            BinaryOp::LessEqual => i32::from(l <= r),
            BinaryOp::GreaterEqual => i32::from(l >= r),
            BinaryOp::And => i32::from(l != 0 && r != 0),
            BinaryOp::Or => i32::from(l != 0 || r != 0),
            BinaryOp::Max => l.max(r),
            BinaryOp::Min => l.min(r),
            BinaryOp::Assign => unreachable!("assignment returns before operands are evaluated"),
        };
        Ok(Outcome::value(value))
    }

    /// `target = source`. Never yields a usable value.
    fn assign(&mut self, target: NodeId, source: NodeId) -> Result<Outcome, ScriptError> {
        let program = self.program;
        match (program.node(target), program.node(source)) {
            (Node::Name(name), Node::Name(from)) => {
                let first = self.env.copy(name, from)?;
                Ok(Outcome::silent(first))
            }
            (Node::Name(name), _) => {
                let value = self.value(source)?;
                self.env.assign(name, value)?;
                Ok(Outcome::silent(value))
            }
            (
                Node::Index {
                    name,
                    index,
                    column: None,
                },
                _,
            ) => {
                let at = self.value(*index)?;
                let value = self.value(source)?;
                self.env.assign_element(name, at, value)?;
                Ok(Outcome::silent(value))
            }
            _ => Err(ScriptError::syntax(
                templates::NOT_ASSIGNABLE,
                [program.render(target)],
            )),
        }
    }
}

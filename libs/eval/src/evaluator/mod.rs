//! # Tree-Walking Evaluator
//!
//! Walks a [`Program`] against an [`Environment`] and produces one integer.
//!
//! Every node yields an [`Outcome`]: an integer plus whether it counts as the
//! node's usable value. Assignments, `break`, `sort()` and conditionals or
//! loops whose body never ran yield a value that is not usable, so a sequence
//! reports the last statement that meant to produce one.

mod control_flow;
mod expressions;

use crate::context::EvalContext;
use crate::environment::Environment;
use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use rulescript_parser::{Node, NodeId, Program, ScriptError};
use stacker::maybe_grow;

// =============================================================================
// OUTCOME
// =============================================================================

/// Result of evaluating one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Outcome {
    pub(crate) value: i32,
    pub(crate) usable: bool,
}

impl Outcome {
    /// A value the enclosing sequence may report.
    pub(crate) fn value(value: i32) -> Self {
        Self { value, usable: true }
    }

    /// A value the enclosing sequence skips over.
    pub(crate) fn silent(value: i32) -> Self {
        Self {
            value,
            usable: false,
        }
    }
}

// =============================================================================
// EVALUATOR
// =============================================================================

/// One evaluation of one program.
pub(crate) struct Evaluator<'p, 'e> {
    program: &'p Program,
    env: &'e mut Environment,
    ctx: EvalContext,
}

impl<'p, 'e> Evaluator<'p, 'e> {
    pub(crate) fn new(program: &'p Program, env: &'e mut Environment, ctx: EvalContext) -> Self {
        Self { program, env, ctx }
    }

    /// Evaluate the whole program.
    ///
    /// ## Returns
    ///
    /// The `return` value if one ran, else the last usable value, else 0
    pub(crate) fn run(mut self) -> Result<i32, ScriptError> {
        let outcome = self.eval(self.program.root())?;
        Ok(match self.ctx.returned() {
            Some(value) => value,
            None if outcome.usable => outcome.value,
            None => 0,
        })
    }

    /// Evaluate one node, growing the stack for deep trees.
    fn eval(&mut self, id: NodeId) -> Result<Outcome, ScriptError> {
        maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            self.eval_node(id)
        })
    }

    /// Evaluate one node for its integer, usable or not.
    fn value(&mut self, id: NodeId) -> Result<i32, ScriptError> {
        self.eval(id).map(|outcome| outcome.value)
    }

    fn eval_node(&mut self, id: NodeId) -> Result<Outcome, ScriptError> {
        let program = self.program;
        match program.node(id) {
            Node::Empty => Ok(Outcome::silent(0)),
            Node::Number(n) => Ok(Outcome::value(*n)),
            Node::Name(name) => self.env.read(name).map(Outcome::value),
            Node::Index {
                name,
                index,
                column,
            } => self.eval_index(name, *index, *column),
            Node::Unary { op, operand } => self.eval_unary(id, *op, *operand),
            Node::Binary { op, left, right } => self.eval_binary(id, *op, *left, *right),
            Node::Conditional {
                condition,
                then_branch,
                else_branch,
            } => self.eval_conditional(*condition, *then_branch, *else_branch),
            Node::While { condition, body } => self.eval_loop(*condition, *body, None),
            Node::For {
                init,
                condition,
                update,
                body,
            } => {
                self.eval(*init)?;
                self.eval_loop(*condition, *body, Some(*update))
            }
            Node::Sequence(children) => self.eval_sequence(children),
            Node::Break => {
                self.ctx.set_break();
                Ok(Outcome::silent(0))
            }
        }
    }
}

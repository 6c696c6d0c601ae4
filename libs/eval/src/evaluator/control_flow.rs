//! Sequences, conditionals and loops.

use super::{Evaluator, Outcome};
use rulescript_parser::error::templates;
use rulescript_parser::{NodeId, ScriptError};
use tracing::{debug, trace};

impl Evaluator<'_, '_> {
    /// Run statements in order until one of them returns or breaks.
    ///
    /// Yields the last usable value, or a silent 0 if there is none.
    pub(super) fn eval_sequence(&mut self, children: &[NodeId]) -> Result<Outcome, ScriptError> {
        let mut last = Outcome::silent(0);
        for &child in children {
            if self.ctx.should_stop() {
                break;
            }
            let outcome = self.eval(child)?;
            if outcome.usable {
                last = outcome;
            }
        }
        Ok(last)
    }

    pub(super) fn eval_conditional(
        &mut self,
        condition: NodeId,
        then_branch: NodeId,
        else_branch: Option<NodeId>,
    ) -> Result<Outcome, ScriptError> {
        if self.value(condition)? != 0 {
            self.eval(then_branch)
        } else if let Some(else_branch) = else_branch {
            self.eval(else_branch)
        } else {
            Ok(Outcome::silent(0))
        }
    }

    /// Shared `while`/`for` loop.
    ///
    /// Runs while the condition is nonzero and no `return` is pending. A
    /// `break` ends this loop only. Running the body more often than the
    /// iteration ceiling allows is a stalled loop.
    pub(super) fn eval_loop(
        &mut self,
        condition: NodeId,
        body: NodeId,
        update: Option<NodeId>,
    ) -> Result<Outcome, ScriptError> {
        let ceiling = self.ctx.max_loop_iterations();
        let mut last = Outcome::silent(0);
        let mut iterations = 0usize;

        while self.ctx.returned().is_none() && self.value(condition)? != 0 {
            if iterations == ceiling {
                debug!(ceiling, "stalled loop");
                return Err(ScriptError::runaway(
                    templates::STALLED_LOOP,
                    [ceiling.to_string()],
                ));
            }
            iterations += 1;

            let outcome = self.eval(body)?;
            if outcome.usable {
                last = outcome;
            }
            if self.ctx.take_break() || self.ctx.returned().is_some() {
                break;
            }
            if let Some(update) = update {
                self.eval(update)?;
            }
        }

        trace!(iterations, "loop finished");
        Ok(last)
    }
}

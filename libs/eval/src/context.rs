//! Execution signals threaded through one evaluation.
//!
//! `return` and `break` do not unwind through Rust errors; they raise a flag
//! here that every sequence and loop checks before running its next step.

use config::constants::EvalConfig;

/// Per-evaluation control state.
///
/// # Examples
/// ```
/// use config::constants::EvalConfig;
/// use rulescript_eval::context::EvalContext;
///
/// let mut ctx = EvalContext::new(&EvalConfig::default());
/// assert!(!ctx.should_stop());
/// ctx.set_return(7);
/// assert!(ctx.should_stop());
/// assert_eq!(ctx.returned(), Some(7));
/// ```
#[derive(Debug, Clone)]
pub struct EvalContext {
    /// Value of the `return` that stopped the script, if any.
    returned: Option<i32>,
    /// A `break` is unwinding to its loop.
    breaking: bool,
    max_loop_iterations: usize,
}

impl EvalContext {
    pub fn new(config: &EvalConfig) -> Self {
        Self {
            returned: None,
            breaking: false,
            max_loop_iterations: config.max_loop_iterations,
        }
    }

    /// Stop the whole script with `value`.
    pub fn set_return(&mut self, value: i32) {
        self.returned = Some(value);
    }

    pub fn returned(&self) -> Option<i32> {
        self.returned
    }

    pub fn set_break(&mut self) {
        self.breaking = true;
    }

    /// Consume a pending `break`. Called by the loop it belongs to.
    pub fn take_break(&mut self) -> bool {
        std::mem::take(&mut self.breaking)
    }

    /// Whether the current sequence must skip its remaining statements.
    pub fn should_stop(&self) -> bool {
        self.returned.is_some() || self.breaking
    }

    pub fn max_loop_iterations(&self) -> usize {
        self.max_loop_iterations
    }
}

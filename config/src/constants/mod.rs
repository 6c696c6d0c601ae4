//! Limits shared by the rulescript parser and evaluator.
//!
//! Each public item documents its purpose with a minimal usage example so that
//! downstream crates stay declarative and avoid scattering literals.

use std::fmt;

// =============================================================================
// EXECUTION LIMITS
// =============================================================================

/// Maximum number of iterations a single `while`/`for` loop may run before
/// evaluation fails with a stalled-loop error.
///
/// # Examples
/// ```
/// use config::constants::MAX_LOOP_ITERATIONS;
/// assert_eq!(MAX_LOOP_ITERATIONS, 1000);
/// ```
pub const MAX_LOOP_ITERATIONS: usize = 1000;

/// Maximum bracket/statement nesting depth accepted by the parser.
///
/// # Examples
/// ```
/// use config::constants::MAX_NESTING_DEPTH;
/// assert!(MAX_NESTING_DEPTH >= 64);
/// ```
pub const MAX_NESTING_DEPTH: usize = 256;

/// Largest element count a script variable may grow to through indexed
/// assignment. Writing past it is an out-of-range error.
///
/// # Examples
/// ```
/// use config::constants::MAX_VARIABLE_LEN;
/// assert!(MAX_VARIABLE_LEN > 1000);
/// ```
pub const MAX_VARIABLE_LEN: usize = 1 << 16;

// =============================================================================
// STACK LIMITS
// =============================================================================

/// Bytes of stack space reserved when growing recursion limits using the
/// `stacker` crate.
///
/// # Examples
/// ```
/// use config::constants::STACKER_STACK_SIZE_BYTES;
/// assert!(STACKER_STACK_SIZE_BYTES >= 1024);
/// ```
pub const STACKER_STACK_SIZE_BYTES: usize = 8 * 1024 * 1024;

/// Remaining-stack threshold below which recursive parse and evaluation
/// steps grow the stack.
///
/// # Examples
/// ```
/// use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
/// assert!(STACKER_RED_ZONE_BYTES < STACKER_STACK_SIZE_BYTES);
/// ```
pub const STACKER_RED_ZONE_BYTES: usize = 128 * 1024;

// =============================================================================
// EVAL CONFIG
// =============================================================================

/// Immutable snapshot of the limits applied to one evaluation session.
///
/// # Examples
/// ```
/// use config::constants::EvalConfig;
/// let config = EvalConfig::default();
/// assert!(config.max_loop_iterations > 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalConfig {
    /// Iteration ceiling applied to every loop.
    pub max_loop_iterations: usize,
    /// Nesting ceiling applied while parsing.
    pub max_nesting_depth: usize,
}

impl EvalConfig {
    /// Builds a configuration, rejecting limits that would make every
    /// non-trivial script fail.
    ///
    /// # Examples
    /// ```
    /// use config::constants::EvalConfig;
    /// let cfg = EvalConfig::new(50, 32).expect("valid config");
    /// assert_eq!(cfg.max_loop_iterations, 50);
    /// ```
    pub fn new(max_loop_iterations: usize, max_nesting_depth: usize) -> Result<Self, ConfigError> {
        if max_loop_iterations == 0 {
            return Err(ConfigError::InvalidLoopCeiling(max_loop_iterations));
        }
        if max_nesting_depth < 4 {
            return Err(ConfigError::InvalidNestingDepth(max_nesting_depth));
        }
        Ok(Self {
            max_loop_iterations,
            max_nesting_depth,
        })
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            max_loop_iterations: MAX_LOOP_ITERATIONS,
            max_nesting_depth: MAX_NESTING_DEPTH,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Raised when the loop ceiling is zero.
    InvalidLoopCeiling(usize),
    /// Raised when the nesting depth cannot hold a single `if` inside a loop.
    InvalidNestingDepth(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidLoopCeiling(value) => {
                write!(f, "max_loop_iterations must be positive: {value}")
            }
            ConfigError::InvalidNestingDepth(value) => {
                write!(f, "max_nesting_depth must be >= 4: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

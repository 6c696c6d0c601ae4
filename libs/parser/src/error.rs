//! # Script Errors
//!
//! Error taxonomy shared by the parser and the evaluator.
//!
//! Every error carries a [`Message`]: a template with `#` placeholders plus the
//! values to substitute. Hosts that localize key their translations on the
//! template (see [`templates`]); everyone else just formats the error.
//!
//! ## Example
//!
//! ```rust
//! use rulescript_parser::error::{templates, ErrorCategory, ScriptError};
//!
//! let error = ScriptError::shape(templates::INDEX_OUT_OF_RANGE, ["3", "tt"]);
//! assert_eq!(error.category(), ErrorCategory::Shape);
//! assert_eq!(error.message().to_string(), "index 3 is out of range for 'tt'");
//! ```

use std::fmt;
use thiserror::Error;

// =============================================================================
// MESSAGE
// =============================================================================

/// Parameterized, not yet localized error text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    template: &'static str,
    args: Vec<String>,
}

impl Message {
    /// Create a message from a template and its substitution values.
    ///
    /// ## Parameters
    ///
    /// - `template`: Text with one `#` per substitution value
    /// - `args`: Values substituted left to right
    pub fn new<I, S>(template: &'static str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            template,
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// The untranslated template.
    pub fn template(&self) -> &'static str {
        self.template
    }

    /// Substitution values in placeholder order.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Render against another template, typically a translation of
    /// [`Message::template`].
    ///
    /// Placeholders without a value are left as `#`.
    pub fn render_with(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len() + 16);
        let mut args = self.args.iter();
        for c in template.chars() {
            if c == '#' {
                match args.next() {
                    Some(arg) => out.push_str(arg),
                    None => out.push('#'),
                }
            } else {
                out.push(c);
            }
        }
        out
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_with(self.template))
    }
}

// =============================================================================
// SCRIPT ERROR
// =============================================================================

/// Coarse error class, for hosts that route errors without matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Malformed program text.
    Syntax,
    /// Unknown or illegally modified identifier.
    Name,
    /// Index, arity or dimension mismatch.
    Shape,
    /// Division or remainder by zero.
    Arithmetic,
    /// Loop iteration ceiling exceeded.
    Runaway,
}

/// Errors raised while parsing or evaluating a script.
///
/// All variants are recoverable: the host reports them next to the failing
/// rule and carries on with the next evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    /// Malformed program text, detected during parse.
    #[error("syntax error: {0}")]
    Syntax(Message),

    /// Unknown identifier, or an attempt to modify a symbol.
    #[error("name error: {0}")]
    Name(Message),

    /// Index, arity or dimension mismatch.
    #[error("shape error: {0}")]
    Shape(Message),

    /// Division or remainder by zero.
    #[error("arithmetic error: {0}")]
    Arithmetic(Message),

    /// A loop exceeded the iteration ceiling.
    #[error("runaway execution: {0}")]
    Runaway(Message),
}

impl ScriptError {
    /// Create a syntax error.
    pub fn syntax<I, S>(template: &'static str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Syntax(Message::new(template, args))
    }

    /// Create a name error.
    pub fn name<I, S>(template: &'static str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Name(Message::new(template, args))
    }

    /// Create a shape error.
    pub fn shape<I, S>(template: &'static str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Shape(Message::new(template, args))
    }

    /// Create an arithmetic error.
    pub fn arithmetic<I, S>(template: &'static str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Arithmetic(Message::new(template, args))
    }

    /// Create a runaway-execution error.
    pub fn runaway<I, S>(template: &'static str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Runaway(Message::new(template, args))
    }

    /// The parameterized message.
    pub fn message(&self) -> &Message {
        match self {
            Self::Syntax(m)
            | Self::Name(m)
            | Self::Shape(m)
            | Self::Arithmetic(m)
            | Self::Runaway(m) => m,
        }
    }

    /// The error class.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Syntax(_) => ErrorCategory::Syntax,
            Self::Name(_) => ErrorCategory::Name,
            Self::Shape(_) => ErrorCategory::Shape,
            Self::Arithmetic(_) => ErrorCategory::Arithmetic,
            Self::Runaway(_) => ErrorCategory::Runaway,
        }
    }
}

// =============================================================================
// TEMPLATES
// =============================================================================

/// Message templates. Each `#` is replaced by one substitution value.
pub mod templates {
    // Syntax
    pub const UNMATCHED_DELIMITER: &str = "unmatched '#' in '#'";
    pub const INVALID_NUMBER: &str = "invalid number '#'";
    pub const UNEXPECTED_KEYWORD: &str = "'#' cannot be used in an expression";
    pub const EXPECTED_PAREN_AFTER: &str = "expected '(' after '#'";
    pub const DANGLING_ELSE: &str = "'else' without a matching 'if': '#'";
    pub const NOT_ASSIGNABLE: &str = "cannot assign to '#'";
    pub const WRONG_ARGUMENT_COUNT: &str = "'#' expects # arguments, got #";
    pub const FOR_HEADER: &str = "'for' needs three clauses separated by ';', got #";
    pub const BREAK_OUTSIDE_LOOP: &str = "'break' outside of a loop";
    pub const UNEXPECTED_TEXT: &str = "unexpected '#'";
    pub const EXPECTED_EXPRESSION: &str = "expected an expression after '#'";
    pub const BLOCK_IN_EXPRESSION: &str = "a block cannot be used as a value: '#'";
    pub const UNKNOWN_METHOD: &str = "unknown method '#'";
    pub const METHOD_ARGUMENTS: &str = "'#()' takes no arguments";
    pub const METHOD_TARGET: &str = "'.#()' cannot be applied to '#'";
    pub const NESTING_TOO_DEEP: &str = "nesting deeper than # levels in '#'";
    pub const MALFORMED_TREE: &str = "node # is missing or referenced twice";

    // Name
    pub const UNKNOWN_NAME: &str = "unknown symbol or variable '#'";
    pub const ASSIGN_TO_SYMBOL: &str = "'#' is a symbol and cannot be modified";
    pub const UNSET_SYMBOL: &str = "symbol '#' has no value";
    pub const UNDECLARED_SYMBOL: &str = "symbol '#' is not declared";
    pub const INVALID_SYMBOL_NAME: &str = "'#' is not a valid symbol name";

    // Shape
    pub const NOT_A_VECTOR: &str = "'#' is not a vector";
    pub const NOT_A_MATRIX: &str = "'#' is not a matrix";
    pub const MATRIX_NEEDS_TWO_INDICES: &str = "matrix '#' needs two indices";
    pub const INDEX_OUT_OF_RANGE: &str = "index # is out of range for '#'";
    pub const NEEDS_INDEX: &str = "'#' holds several values and needs an index";
    pub const SIZE_OF_SCALAR: &str = "'#' has no size";
    pub const SORT_NOT_ALLOWED: &str = "'#' cannot be sorted";
    pub const COPY_MATRIX: &str = "matrix '#' cannot be copied";
    pub const WRONG_SHAPE: &str = "symbol '#' is declared as #, got #";

    // Arithmetic
    pub const DIVISION_BY_ZERO: &str = "division by zero in '#'";

    // Runaway
    pub const STALLED_LOOP: &str = "stalled loop: more than # iterations";
}

// =============================================================================
// TESTS
// =============================================================================

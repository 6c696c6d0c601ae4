//! # Evaluation Session
//!
//! The host-facing entry point. A [`Session`] owns the symbol table and the
//! limits for one rule set; hosts declare symbols once, attach values, then
//! evaluate any number of parsed programs against them.
//!
//! ## Example
//!
//! ```rust
//! use rulescript_eval::{Session, Shape, SymbolDecl};
//!
//! let mut session = Session::new();
//! session
//!     .declare_symbols([
//!         SymbolDecl::new("tt", "Leg times", Shape::Vector),
//!         SymbolDecl::new("bonus", "Bonus points", Shape::Scalar),
//!     ])
//!     .unwrap();
//! session.set_symbol("tt", vec![4, 5, 6]).unwrap();
//! session.set_symbol("bonus", 4).unwrap();
//!
//! let program = session
//!     .parse("s = 0; for (i = 0; i < tt.size(); i++) s = s + tt[i]; s + bonus")
//!     .unwrap();
//! assert_eq!(session.evaluate(&program).unwrap(), 19);
//! ```

use crate::context::EvalContext;
use crate::dump::{self, DumpRow};
use crate::environment::{Environment, SymbolDecl, SymbolInfo};
use crate::evaluator::Evaluator;
use crate::value::{Shape, Value};
use config::constants::EvalConfig;
use rulescript_parser::{parse_with_depth, Program, ScriptError};
use tracing::debug;

/// Symbols, limits and scratch variables for one rule set.
#[derive(Debug, Clone, Default)]
pub struct Session {
    config: EvalConfig,
    environment: Environment,
}

impl Session {
    /// A session with default limits and no symbols.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EvalConfig) -> Self {
        Self {
            config,
            environment: Environment::new(),
        }
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Parse a script under this session's nesting limit.
    pub fn parse(&self, source: &str) -> Result<Program, ScriptError> {
        parse_with_depth(source, self.config.max_nesting_depth)
    }

    // =========================================================================
    // SYMBOLS
    // =========================================================================

    /// Replace all declarations with `decls`, in order.
    ///
    /// Previous declarations, values and variables are dropped first. Stops at
    /// the first invalid name; declarations before it stay in place.
    pub fn declare_symbols<I>(&mut self, decls: I) -> Result<(), ScriptError>
    where
        I: IntoIterator<Item = SymbolDecl>,
    {
        self.environment.clear_symbols();
        let mut count = 0usize;
        for decl in decls {
            self.environment.declare(decl)?;
            count += 1;
        }
        debug!(count, "declared symbols");
        Ok(())
    }

    /// Declare one more symbol, keeping the existing ones.
    pub fn declare_symbol(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        shape: Shape,
    ) -> Result<(), ScriptError> {
        self.environment.declare(SymbolDecl::new(name, description, shape))
    }

    pub fn clear_symbols(&mut self) {
        self.environment.clear_symbols();
    }

    /// Attach a value to a declared symbol.
    ///
    /// ## Errors
    ///
    /// - Name error if `name` was never declared
    /// - Shape error if the value's shape differs from the declaration
    pub fn set_symbol(&mut self, name: &str, value: impl Into<Value>) -> Result<(), ScriptError> {
        self.environment.set_value(name, value.into())
    }

    pub fn unset_symbol(&mut self, name: &str) -> Result<(), ScriptError> {
        self.environment.unset_value(name)
    }

    /// Detach every symbol value, keeping the declarations.
    pub fn clear_symbol_values(&mut self) {
        self.environment.clear_values();
    }

    pub fn symbols(&self) -> Vec<SymbolInfo> {
        self.environment.symbols()
    }

    pub fn symbol_description(&self, name: &str) -> Option<&str> {
        self.environment.description(name)
    }

    // =========================================================================
    // EVALUATION
    // =========================================================================

    /// Evaluate a parsed program to one integer.
    ///
    /// Variables left over from the previous evaluation are cleared first, so
    /// the result depends only on the program and the symbol values. The
    /// variables this run creates stay readable until the next call.
    ///
    /// ## Returns
    ///
    /// The value of the first `return` executed, else the value of the last
    /// statement that produced one, else 0
    #[tracing::instrument(level = "debug", skip_all, fields(nodes = program.len()))]
    pub fn evaluate(&mut self, program: &Program) -> Result<i32, ScriptError> {
        self.environment.clear_variables();
        let ctx = EvalContext::new(&self.config);
        match Evaluator::new(program, &mut self.environment, ctx).run() {
            Ok(value) => {
                debug!(value, "evaluation finished");
                Ok(value)
            }
            Err(error) => {
                debug!(error = %error, "evaluation failed");
                Err(error)
            }
        }
    }

    /// Parse and evaluate in one step.
    pub fn evaluate_source(&mut self, source: &str) -> Result<i32, ScriptError> {
        let program = self.parse(source)?;
        self.evaluate(&program)
    }

    // =========================================================================
    // INSPECTION
    // =========================================================================

    /// Variable contents after the last evaluation.
    pub fn variable(&self, name: &str) -> Option<&[i32]> {
        self.environment.variable(name)
    }

    pub fn dump_variables(&self) -> Vec<DumpRow> {
        dump::variable_rows(&self.environment)
    }

    pub fn dump_symbols(&self) -> Vec<DumpRow> {
        dump::symbol_rows(&self.environment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulescript_parser::ErrorCategory;

    #[test]
    fn test_declare_symbols_clears_previous_state() {
        let mut session = Session::new();
        session.declare_symbol("old", "", Shape::Scalar).unwrap();
        session.set_symbol("old", 3).unwrap();

        session
            .declare_symbols([SymbolDecl::new("fresh", "", Shape::Scalar)])
            .unwrap();

        let names: Vec<String> = session.symbols().into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["fresh"]);
        let error = session.evaluate_source("old").unwrap_err();
        assert_eq!(error.category(), ErrorCategory::Name);
    }

    #[test]
    fn test_variables_cleared_between_evaluations() {
        let mut session = Session::new();
        assert_eq!(session.evaluate_source("a = 5; a").unwrap(), 5);
        assert_eq!(session.variable("a"), Some(&[5][..]));

        let error = session.evaluate_source("a").unwrap_err();
        assert_eq!(error.category(), ErrorCategory::Name);
        assert_eq!(session.variable("a"), None);
    }

    #[test]
    fn test_unset_and_clear_values() {
        let mut session = Session::new();
        session.declare_symbol("x", "", Shape::Scalar).unwrap();
        session.set_symbol("x", 2).unwrap();
        assert_eq!(session.evaluate_source("x * 3").unwrap(), 6);

        session.unset_symbol("x").unwrap();
        assert!(session.evaluate_source("x").is_err());

        session.set_symbol("x", 2).unwrap();
        session.clear_symbol_values();
        assert!(session.evaluate_source("x").is_err());
        assert_eq!(session.symbols().len(), 1);
    }

    #[test]
    fn test_config_limits_apply() {
        let mut session = Session::with_config(EvalConfig::new(10, 8).unwrap());
        let error = session.evaluate_source("i = 0; while (1) i++").unwrap_err();
        assert_eq!(error.category(), ErrorCategory::Runaway);

        let error = session.parse("((((((((((1))))))))))").unwrap_err();
        assert_eq!(error.category(), ErrorCategory::Syntax);
    }

    #[test]
    fn test_symbol_description() {
        let mut session = Session::new();
        session.declare_symbol("tt", "Leg times", Shape::Vector).unwrap();
        assert_eq!(session.symbol_description("tt"), Some("Leg times"));
        assert_eq!(session.symbol_description("nope"), None);
    }
}

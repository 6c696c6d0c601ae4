//! # Debug Dump
//!
//! Human-readable rows describing the variable and symbol tables, for a
//! developer view next to the rule editor. Building rows never changes the
//! environment.
//!
//! ## Example
//!
//! ```rust
//! use rulescript_eval::Session;
//!
//! let mut session = Session::new();
//! session.evaluate_source("a[2] = 5; n = 1").unwrap();
//! let rows: Vec<String> = session.dump_variables().iter().map(|r| r.to_string()).collect();
//! assert_eq!(rows, ["a = [0, 0, 5]", "n = 1"]);
//! ```

use crate::environment::Environment;
use crate::value::{write_list, Shape};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of a debug dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DumpRow {
    pub name: String,
    pub shape: Shape,
    /// Rendered value, or `None` for a symbol with no value attached.
    pub value: Option<String>,
    /// Symbol description. Empty for variables.
    pub description: String,
}

impl fmt::Display for DumpRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{} = {}", self.name, value)?,
            None => write!(f, "{} (unset)", self.name)?,
        }
        if !self.description.is_empty() {
            write!(f, "  // {}", self.description)?;
        }
        Ok(())
    }
}

struct List<'a>(&'a [i32]);

impl fmt::Display for List<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, self.0)
    }
}

/// Rows for script variables, in name order. Single values print bare.
pub(crate) fn variable_rows(env: &Environment) -> Vec<DumpRow> {
    env.variables()
        .map(|(name, items)| {
            let (shape, value) = match items {
                [single] => (Shape::Scalar, single.to_string()),
                _ => (Shape::Vector, List(items).to_string()),
            };
            DumpRow {
                name: name.to_string(),
                shape,
                value: Some(value),
                description: String::new(),
            }
        })
        .collect()
}

/// Rows for declared symbols, in declaration order.
pub(crate) fn symbol_rows(env: &Environment) -> Vec<DumpRow> {
    env.declared()
        .map(|symbol| DumpRow {
            name: symbol.name.clone(),
            shape: symbol.shape,
            value: symbol.value.as_ref().map(ToString::to_string),
            description: symbol.description.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::SymbolDecl;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_symbol_rows() {
        let mut env = Environment::new();
        env.declare(SymbolDecl::new("pts", "Points per control", Shape::Vector)).unwrap();
        env.declare(SymbolDecl::new("limit", "", Shape::Scalar)).unwrap();
        env.set_value("pts", vec![10, 20].into()).unwrap();

        let rows: Vec<String> = symbol_rows(&env).iter().map(ToString::to_string).collect();
        assert_eq!(rows, ["pts = [10, 20]  // Points per control", "limit (unset)"]);
    }

    #[test]
    fn test_empty_variable_table() {
        assert!(variable_rows(&Environment::new()).is_empty());
    }
}

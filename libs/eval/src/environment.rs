//! # Evaluation Environment
//!
//! Two disjoint name tables:
//!
//! - **Symbols**: declared by the host in a fixed order, each with a
//!   description and a shape. Values are attached per evaluation. Read-only
//!   to scripts.
//! - **Variables**: created by a script on first assignment and stored as a
//!   1-D vector (a scalar is a vector of length 1). Cleared before every
//!   evaluation.
//!
//! Names resolve against symbols first, then variables.
//!
//! ## Example
//!
//! ```rust
//! use rulescript_eval::environment::{Environment, SymbolDecl};
//! use rulescript_eval::value::Shape;
//!
//! let mut env = Environment::new();
//! env.declare(SymbolDecl::new("legs", "Leg times in seconds", Shape::Vector)).unwrap();
//! env.set_value("legs", vec![300, 280].into()).unwrap();
//! assert_eq!(env.symbols()[0].name, "legs");
//! ```

use crate::value::{Shape, Value};
use config::constants::MAX_VARIABLE_LEN;
use rulescript_parser::error::{templates, ScriptError};
use rulescript_parser::scanner::{is_word_char, Keyword};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

// =============================================================================
// DECLARATIONS
// =============================================================================

/// A symbol declaration as supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolDecl {
    pub name: String,
    pub description: String,
    pub shape: Shape,
}

impl SymbolDecl {
    pub fn new(name: impl Into<String>, description: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            shape,
        }
    }
}

/// What an editor UI shows for one declared symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolInfo {
    pub name: String,
    pub description: String,
    pub is_vector: bool,
    pub is_matrix: bool,
}

/// A declared symbol and its current value.
#[derive(Debug, Clone)]
pub(crate) struct Symbol {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) shape: Shape,
    pub(crate) value: Option<Value>,
}

impl Symbol {
    fn value(&self) -> Result<&Value, ScriptError> {
        self.value
            .as_ref()
            .ok_or_else(|| ScriptError::name(templates::UNSET_SYMBOL, [self.name.as_str()]))
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn is_valid_symbol_name(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(is_word_char)
        && Keyword::from_word(name).is_none()
        && !matches!(name, "and" | "or" | "max" | "min")
}

fn out_of_range(index: i32, name: &str) -> ScriptError {
    ScriptError::shape(templates::INDEX_OUT_OF_RANGE, [index.to_string(), name.to_string()])
}

/// Checked conversion of a script index into a slot of a `len`-long vector.
fn slot(name: &str, index: i32, len: usize) -> Result<usize, ScriptError> {
    usize::try_from(index)
        .ok()
        .filter(|&slot| slot < len)
        .ok_or_else(|| out_of_range(index, name))
}

fn unknown(name: &str) -> ScriptError {
    ScriptError::name(templates::UNKNOWN_NAME, [name])
}

fn needs_index(name: &str) -> ScriptError {
    ScriptError::shape(templates::NEEDS_INDEX, [name])
}

fn as_count(len: usize) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Symbol table plus variable table of one session.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    /// Declaration order.
    symbols: Vec<Symbol>,
    /// Name to position in `symbols`.
    index: HashMap<String, usize>,
    variables: BTreeMap<String, Vec<i32>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // HOST SIDE
    // =========================================================================

    /// Declare a symbol.
    ///
    /// Declaring a name again replaces its description and shape and drops
    /// its value.
    pub fn declare(&mut self, decl: SymbolDecl) -> Result<(), ScriptError> {
        if !is_valid_symbol_name(&decl.name) {
            return Err(ScriptError::name(templates::INVALID_SYMBOL_NAME, [decl.name]));
        }

        let symbol = Symbol {
            name: decl.name,
            description: decl.description,
            shape: decl.shape,
            value: None,
        };
        match self.index.get(&symbol.name) {
            Some(&at) => self.symbols[at] = symbol,
            None => {
                self.index.insert(symbol.name.clone(), self.symbols.len());
                self.symbols.push(symbol);
            }
        }
        Ok(())
    }

    /// Forget every declaration, value and variable.
    pub fn clear_symbols(&mut self) {
        self.symbols.clear();
        self.index.clear();
        self.variables.clear();
    }

    /// Attach a value to a declared symbol. The shape must match the
    /// declaration.
    pub fn set_value(&mut self, name: &str, value: Value) -> Result<(), ScriptError> {
        let symbol = self.symbol_mut(name)?;
        if value.shape() != symbol.shape {
            return Err(ScriptError::shape(
                templates::WRONG_SHAPE,
                [name.to_string(), symbol.shape.to_string(), value.shape().to_string()],
            ));
        }
        symbol.value = Some(value);
        Ok(())
    }

    /// Detach the value of a declared symbol.
    pub fn unset_value(&mut self, name: &str) -> Result<(), ScriptError> {
        self.symbol_mut(name)?.value = None;
        Ok(())
    }

    /// Detach every symbol value, keeping the declarations.
    pub fn clear_values(&mut self) {
        for symbol in &mut self.symbols {
            symbol.value = None;
        }
    }

    pub fn clear_variables(&mut self) {
        self.variables.clear();
    }

    /// Declared symbols in declaration order.
    pub fn symbols(&self) -> Vec<SymbolInfo> {
        self.symbols
            .iter()
            .map(|symbol| SymbolInfo {
                name: symbol.name.clone(),
                description: symbol.description.clone(),
                is_vector: symbol.shape.is_vector(),
                is_matrix: symbol.shape.is_matrix(),
            })
            .collect()
    }

    pub fn description(&self, name: &str) -> Option<&str> {
        self.symbol(name).map(|symbol| symbol.description.as_str())
    }

    /// Current contents of a script variable.
    pub fn variable(&self, name: &str) -> Option<&[i32]> {
        self.variables.get(name).map(Vec::as_slice)
    }

    /// Script variables in name order.
    pub fn variables(&self) -> impl Iterator<Item = (&str, &[i32])> {
        self.variables
            .iter()
            .map(|(name, items)| (name.as_str(), items.as_slice()))
    }

    pub(crate) fn declared(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    fn symbol(&self, name: &str) -> Option<&Symbol> {
        self.index.get(name).map(|&at| &self.symbols[at])
    }

    fn symbol_mut(&mut self, name: &str) -> Result<&mut Symbol, ScriptError> {
        match self.index.get(name) {
            Some(&at) => Ok(&mut self.symbols[at]),
            None => Err(ScriptError::name(templates::UNDECLARED_SYMBOL, [name])),
        }
    }

    // =========================================================================
    // SCRIPT SIDE: READS
    // =========================================================================

    fn variable_or_unknown(&self, name: &str) -> Result<&[i32], ScriptError> {
        self.variable(name).ok_or_else(|| unknown(name))
    }

    /// Value of a bare name.
    pub(crate) fn read(&self, name: &str) -> Result<i32, ScriptError> {
        if let Some(symbol) = self.symbol(name) {
            return match symbol.value()? {
                Value::Scalar(n) => Ok(*n),
                Value::Vector(_) | Value::Matrix(_) => Err(needs_index(name)),
            };
        }
        match self.variable_or_unknown(name)? {
            [n] => Ok(*n),
            _ => Err(needs_index(name)),
        }
    }

    /// Value of `name[index]`.
    pub(crate) fn read_element(&self, name: &str, index: i32) -> Result<i32, ScriptError> {
        let items = match self.symbol(name) {
            Some(symbol) => match symbol.value()? {
                Value::Vector(items) => items.as_slice(),
                Value::Scalar(_) => {
                    return Err(ScriptError::shape(templates::NOT_A_VECTOR, [name]));
                }
                Value::Matrix(_) => {
                    return Err(ScriptError::shape(templates::MATRIX_NEEDS_TWO_INDICES, [name]));
                }
            },
            None => self.variable_or_unknown(name)?,
        };
        Ok(items[slot(name, index, items.len())?])
    }

    /// Value of `name[row][column]`. Only matrix symbols have two indices.
    pub(crate) fn read_cell(&self, name: &str, row: i32, column: i32) -> Result<i32, ScriptError> {
        let rows = self.matrix(name)?;
        let cells = &rows[slot(name, row, rows.len())?];
        Ok(cells[slot(name, column, cells.len())?])
    }

    fn matrix(&self, name: &str) -> Result<&[Vec<i32>], ScriptError> {
        match self.symbol(name) {
            Some(symbol) => match symbol.value()? {
                Value::Matrix(rows) => Ok(rows.as_slice()),
                Value::Scalar(_) | Value::Vector(_) => {
                    Err(ScriptError::shape(templates::NOT_A_MATRIX, [name]))
                }
            },
            None => {
                self.variable_or_unknown(name)?;
                Err(ScriptError::shape(templates::NOT_A_MATRIX, [name]))
            }
        }
    }

    /// `name.size()`: element count, or row count of a matrix.
    pub(crate) fn size(&self, name: &str) -> Result<i32, ScriptError> {
        let len = match self.symbol(name) {
            Some(symbol) => match symbol.value()? {
                Value::Vector(items) => items.len(),
                Value::Matrix(rows) => rows.len(),
                Value::Scalar(_) => {
                    return Err(ScriptError::shape(templates::SIZE_OF_SCALAR, [name]));
                }
            },
            None => self.variable_or_unknown(name)?.len(),
        };
        Ok(as_count(len))
    }

    /// `name[row].size()`: length of one matrix row.
    pub(crate) fn row_size(&self, name: &str, row: i32) -> Result<i32, ScriptError> {
        let rows = self.matrix(name)?;
        Ok(as_count(rows[slot(name, row, rows.len())?].len()))
    }

    // =========================================================================
    // SCRIPT SIDE: WRITES
    // =========================================================================

    fn ensure_writable(&self, name: &str) -> Result<(), ScriptError> {
        if self.symbol(name).is_some() {
            return Err(ScriptError::name(templates::ASSIGN_TO_SYMBOL, [name]));
        }
        Ok(())
    }

    fn variable_mut(&mut self, name: &str) -> Result<&mut Vec<i32>, ScriptError> {
        self.ensure_writable(name)?;
        self.variables.get_mut(name).ok_or_else(|| unknown(name))
    }

    /// `name = value`: (re)creates the variable as a single value.
    pub(crate) fn assign(&mut self, name: &str, value: i32) -> Result<(), ScriptError> {
        self.ensure_writable(name)?;
        self.variables.insert(name.to_string(), vec![value]);
        Ok(())
    }

    /// `name[index] = value`: grows the variable with zeros as needed.
    pub(crate) fn assign_element(
        &mut self,
        name: &str,
        index: i32,
        value: i32,
    ) -> Result<(), ScriptError> {
        self.ensure_writable(name)?;
        let at = slot(name, index, MAX_VARIABLE_LEN)?;
        let items = self.variables.entry(name.to_string()).or_default();
        if items.len() <= at {
            items.resize(at + 1, 0);
        }
        items[at] = value;
        Ok(())
    }

    /// `target = source` with `source` a bare name: copies the whole vector.
    ///
    /// ## Returns
    ///
    /// The first copied element, or 0 for an empty vector
    pub(crate) fn copy(&mut self, target: &str, source: &str) -> Result<i32, ScriptError> {
        self.ensure_writable(target)?;
        let items = match self.symbol(source) {
            Some(symbol) => match symbol.value()? {
                Value::Scalar(n) => vec![*n],
                Value::Vector(items) => items.clone(),
                Value::Matrix(_) => {
                    return Err(ScriptError::shape(templates::COPY_MATRIX, [source]));
                }
            },
            None => self.variable_or_unknown(source)?.to_vec(),
        };
        let first = items.first().copied().unwrap_or(0);
        self.variables.insert(target.to_string(), items);
        Ok(first)
    }

    /// Add `delta` to a single-valued variable.
    ///
    /// ## Returns
    ///
    /// `(old, new)`
    pub(crate) fn increment(&mut self, name: &str, delta: i32) -> Result<(i32, i32), ScriptError> {
        match self.variable_mut(name)?.as_mut_slice() {
            [value] => {
                let old = *value;
                *value = old.wrapping_add(delta);
                Ok((old, *value))
            }
            _ => Err(needs_index(name)),
        }
    }

    /// Add `delta` to one element of a variable.
    pub(crate) fn increment_element(
        &mut self,
        name: &str,
        index: i32,
        delta: i32,
    ) -> Result<(i32, i32), ScriptError> {
        let items = self.variable_mut(name)?;
        let at = slot(name, index, items.len())?;
        let old = items[at];
        items[at] = old.wrapping_add(delta);
        Ok((old, items[at]))
    }

    /// `name.sort()`: ascending, in place. Symbols cannot be sorted.
    pub(crate) fn sort(&mut self, name: &str) -> Result<(), ScriptError> {
        if self.symbol(name).is_some() {
            return Err(ScriptError::shape(templates::SORT_NOT_ALLOWED, [name]));
        }
        self.variables
            .get_mut(name)
            .ok_or_else(|| unknown(name))?
            .sort_unstable();
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rulescript_parser::ErrorCategory;

    fn env_with(name: &str, shape: Shape, value: Value) -> Environment {
        let mut env = Environment::new();
        env.declare(SymbolDecl::new(name, "test symbol", shape)).unwrap();
        env.set_value(name, value).unwrap();
        env
    }

    #[test]
    fn test_declare_keeps_order_and_replaces() {
        let mut env = Environment::new();
        env.declare(SymbolDecl::new("b", "first", Shape::Scalar)).unwrap();
        env.declare(SymbolDecl::new("a", "second", Shape::Vector)).unwrap();
        env.set_value("b", 5.into()).unwrap();
        env.declare(SymbolDecl::new("b", "again", Shape::Vector)).unwrap();

        let names: Vec<_> = env.symbols().into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(env.description("b"), Some("again"));
        assert_eq!(env.read("b").unwrap_err().category(), ErrorCategory::Name);
    }

    #[test]
    fn test_declare_rejects_bad_names() {
        let mut env = Environment::new();
        for name in ["", "1x", "a-b", "while", "and", "max"] {
            let err = env.declare(SymbolDecl::new(name, "", Shape::Scalar)).unwrap_err();
            assert_eq!(err.message().template(), templates::INVALID_SYMBOL_NAME);
        }
        assert!(env.declare(SymbolDecl::new("_time2", "", Shape::Scalar)).is_ok());
    }

    #[test]
    fn test_set_value_checks_shape() {
        let mut env = Environment::new();
        env.declare(SymbolDecl::new("pts", "", Shape::Vector)).unwrap();
        let err = env.set_value("pts", 3.into()).unwrap_err();
        assert_eq!(err.message().args(), ["pts", "a vector", "a scalar"]);
        let err = env.set_value("nope", 3.into()).unwrap_err();
        assert_eq!(err.message().template(), templates::UNDECLARED_SYMBOL);
    }

    #[test]
    fn test_unset_value() {
        let mut env = env_with("t", Shape::Scalar, 7.into());
        assert_eq!(env.read("t").unwrap(), 7);
        env.unset_value("t").unwrap();
        assert_eq!(env.read("t").unwrap_err().message().template(), templates::UNSET_SYMBOL);
    }

    #[test]
    fn test_vector_symbol_reads() {
        let env = env_with("tt", Shape::Vector, vec![4, 5, 6].into());
        assert_eq!(env.read_element("tt", 2).unwrap(), 6);
        assert_eq!(env.size("tt").unwrap(), 3);

        let err = env.read_element("tt", 3).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Shape);
        assert_eq!(err.message().args(), ["3", "tt"]);

        assert_eq!(env.read("tt").unwrap_err().message().template(), templates::NEEDS_INDEX);
        assert!(env.read_element("tt", -1).is_err());
    }

    #[test]
    fn test_matrix_symbol_reads() {
        let env = env_with("m", Shape::Matrix, vec![vec![1, 2], vec![3]].into());
        assert_eq!(env.read_cell("m", 0, 1).unwrap(), 2);
        assert_eq!(env.size("m").unwrap(), 2);
        assert_eq!(env.row_size("m", 1).unwrap(), 1);
        assert_eq!(env.read_cell("m", 1, 1).unwrap_err().message().args(), ["1", "m"]);
        assert_eq!(
            env.read_element("m", 0).unwrap_err().message().template(),
            templates::MATRIX_NEEDS_TWO_INDICES
        );
    }

    #[test]
    fn test_scalar_symbol_misuse() {
        let env = env_with("s", Shape::Scalar, 1.into());
        let template = |error: ScriptError| error.message().template();
        assert_eq!(template(env.read_element("s", 0).unwrap_err()), templates::NOT_A_VECTOR);
        assert_eq!(template(env.size("s").unwrap_err()), templates::SIZE_OF_SCALAR);
        assert_eq!(template(env.read_cell("s", 0, 0).unwrap_err()), templates::NOT_A_MATRIX);
    }

    #[test]
    fn test_assign_element_grows_with_zeros() {
        let mut env = Environment::new();
        env.assign_element("a", 3, 12).unwrap();
        assert_eq!(env.variable("a"), Some(&[0, 0, 0, 12][..]));
        assert_eq!(env.size("a").unwrap(), 4);
    }

    #[test]
    fn test_assign_element_limits() {
        let mut env = Environment::new();
        assert!(env.assign_element("a", -1, 1).is_err());
        assert!(env.assign_element("a", MAX_VARIABLE_LEN as i32, 1).is_err());
    }

    #[test]
    fn test_symbols_are_read_only() {
        let mut env = env_with("tt", Shape::Vector, vec![1].into());
        assert_eq!(env.assign("tt", 1).unwrap_err().category(), ErrorCategory::Name);
        assert_eq!(env.assign_element("tt", 0, 1).unwrap_err().category(), ErrorCategory::Name);
        assert_eq!(env.increment("tt", 1).unwrap_err().category(), ErrorCategory::Name);
        assert_eq!(env.sort("tt").unwrap_err().category(), ErrorCategory::Shape);
    }

    #[test]
    fn test_copy_vector_and_reject_matrix() {
        let mut env = env_with("tt", Shape::Vector, vec![3, 1, 2].into());
        assert_eq!(env.copy("v", "tt").unwrap(), 3);
        env.sort("v").unwrap();
        assert_eq!(env.variable("v"), Some(&[1, 2, 3][..]));

        env.declare(SymbolDecl::new("m", "", Shape::Matrix)).unwrap();
        env.set_value("m", vec![vec![1]].into()).unwrap();
        assert_eq!(env.copy("w", "m").unwrap_err().message().template(), templates::COPY_MATRIX);
    }

    #[test]
    fn test_increment() {
        let mut env = Environment::new();
        env.assign("n", 1).unwrap();
        assert_eq!(env.increment("n", 1).unwrap(), (1, 2));
        let error = env.increment("missing", 1).unwrap_err();
        assert_eq!(error.message().template(), templates::UNKNOWN_NAME);

        env.assign_element("v", 1, 5).unwrap();
        assert_eq!(env.increment_element("v", 1, -1).unwrap(), (5, 4));
        assert_eq!(env.increment("v", 1).unwrap_err().message().template(), templates::NEEDS_INDEX);
    }

    #[test]
    fn test_clear_symbols_drops_everything() {
        let mut env = env_with("t", Shape::Scalar, 1.into());
        env.assign("x", 2).unwrap();
        env.clear_symbols();
        assert!(env.symbols().is_empty());
        assert_eq!(env.variable("x"), None);
        assert_eq!(env.read("t").unwrap_err().message().template(), templates::UNKNOWN_NAME);
    }
}

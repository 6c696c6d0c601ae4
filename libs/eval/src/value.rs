//! # Symbol Values
//!
//! The three shapes a host can hand to a script: a single integer, a vector
//! of integers or a matrix (vector of rows, rows may differ in length).
//!
//! ## Example
//!
//! ```rust
//! use rulescript_eval::value::{Shape, Value};
//!
//! let times: Value = vec![310, 295, 402].into();
//! assert_eq!(times.shape(), Shape::Vector);
//! assert_eq!(times.to_string(), "[310, 295, 402]");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// SHAPE
// =============================================================================

/// Declared shape of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    Scalar,
    Vector,
    Matrix,
}

impl Shape {
    /// Shape from the vector/matrix flags hosts declare symbols with.
    ///
    /// The matrix flag wins over the vector flag.
    pub fn from_flags(is_vector: bool, is_matrix: bool) -> Self {
        match (is_vector, is_matrix) {
            (_, true) => Self::Matrix,
            (true, false) => Self::Vector,
            (false, false) => Self::Scalar,
        }
    }

    /// True for vectors and matrices (a matrix is a vector of rows).
    pub fn is_vector(&self) -> bool {
        !matches!(self, Self::Scalar)
    }

    /// True for matrices only.
    pub fn is_matrix(&self) -> bool {
        matches!(self, Self::Matrix)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Scalar => "a scalar",
            Self::Vector => "a vector",
            Self::Matrix => "a matrix",
        })
    }
}

// =============================================================================
// VALUE
// =============================================================================

/// A symbol value supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    Scalar(i32),
    Vector(Vec<i32>),
    Matrix(Vec<Vec<i32>>),
}

impl Value {
    /// Shape of this value.
    pub fn shape(&self) -> Shape {
        match self {
            Value::Scalar(_) => Shape::Scalar,
            Value::Vector(_) => Shape::Vector,
            Value::Matrix(_) => Shape::Matrix,
        }
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Scalar(n)
    }
}

impl From<Vec<i32>> for Value {
    fn from(items: Vec<i32>) -> Self {
        Value::Vector(items)
    }
}

impl From<&[i32]> for Value {
    fn from(items: &[i32]) -> Self {
        Value::Vector(items.to_vec())
    }
}

impl From<Vec<Vec<i32>>> for Value {
    fn from(rows: Vec<Vec<i32>>) -> Self {
        Value::Matrix(rows)
    }
}

/// Write `[a, b, c]`.
pub(crate) fn write_list(f: &mut fmt::Formatter<'_>, items: &[i32]) -> fmt::Result {
    write!(f, "[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    write!(f, "]")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(n) => write!(f, "{n}"),
            Value::Vector(items) => write_list(f, items),
            Value::Matrix(rows) => {
                write!(f, "[")?;
                for (i, row) in rows.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write_list(f, row)?;
                }
                write!(f, "]")
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

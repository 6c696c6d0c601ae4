//! # Rule Script Evaluator
//!
//! Tree-walking interpreter for programs produced by `rulescript-parser`.
//! A [`Session`] holds the host's declared symbols (read-only inputs such as
//! leg times or punch counts) and evaluates each program to one integer.
//!
//! ## Architecture
//!
//! ```text
//! Session ─┬─ Environment (symbols + variables)
//!          └─ evaluate(Program) → Evaluator → EvalContext (return / break / ceiling)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use rulescript_eval::{ErrorCategory, Session, Shape};
//!
//! let mut session = Session::new();
//! session.declare_symbol("punches", "Punches on the card", Shape::Scalar).unwrap();
//! session.set_symbol("punches", 12).unwrap();
//!
//! assert_eq!(session.evaluate_source("if (punches < 10) 0; else punches * 2").unwrap(), 24);
//!
//! let error = session.evaluate_source("punches = 3").unwrap_err();
//! assert_eq!(error.category(), ErrorCategory::Name);
//! ```
//!
//! ## Pipeline Integration
//!
//! ```text
//! rulescript-parser → rulescript-eval → host
//! ```

pub mod context;
pub mod dump;
pub mod environment;
mod evaluator;
pub mod session;
pub mod value;

// Re-export public API
pub use config::constants::EvalConfig;
pub use dump::DumpRow;
pub use environment::{SymbolDecl, SymbolInfo};
pub use rulescript_parser::error::templates;
pub use rulescript_parser::{parse, ErrorCategory, Message, Program, ScriptError};
pub use session::Session;
pub use value::{Shape, Value};

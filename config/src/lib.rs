//! # Config Crate
//!
//! Centralized limits and tunables for the rulescript parser and evaluator.
//! Every bound that protects the host from a user-authored script lives here
//! so the parser and evaluator agree on the same numbers.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{EvalConfig, MAX_LOOP_ITERATIONS};
//!
//! let cfg = EvalConfig::default();
//! assert_eq!(cfg.max_loop_iterations, MAX_LOOP_ITERATIONS);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All limits defined once, used everywhere
//! - **Validated Overrides**: Hosts may tighten limits through `EvalConfig::new`

pub mod constants;

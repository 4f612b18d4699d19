#![deny(missing_docs)]
//! Parallel short-circuiting evaluation of quantified predicate queries.
//!
//! Given an immutable table of rows and an ordered set of opaque predicates,
//! the engine answers two nested-quantifier questions:
//!
//! - [`evaluate_all`]: does *every* predicate have at least one satisfying
//!   row?
//! - [`evaluate_any`]: does *some* predicate have at least one satisfying
//!   row?
//!
//! Each call partitions the predicate indices into contiguous batches, spawns
//! one scoped worker thread per batch, and joins them all before returning.
//! Workers short-circuit at two levels: the inner row scan stops at the first
//! satisfying row, and the outer predicate scan stops once a shared
//! [`signal::EarlyExitSignal`] shows the overall answer is already decided.
//! The signal uses relaxed atomics and is only a hint to skip starting new
//! work; correctness never depends on how quickly other workers observe it.
//!
//! [`workload`] produces reproducible synthetic `(rows, predicates)` pairs
//! with controlled expected outcomes, used by the `parsat-bench` driver to
//! time the four AND/OR × true/false scenarios.

pub mod evaluate;
pub mod partition;
pub mod predicate;
pub mod signal;
pub mod workload;

pub use evaluate::{evaluate_all, evaluate_any, EvalOptions};
pub use predicate::{Predicate, PredicateError, SpinCost};

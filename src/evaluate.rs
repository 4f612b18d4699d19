//! The concurrent quantifier evaluation engine.
//!
//! Both entry points follow the same shape: partition the predicate indices
//! into contiguous batches, spawn one scoped worker thread per non-empty
//! batch, join them all, and read the final decision off the shared
//! [`EarlyExitSignal`]. Within a worker, predicates are examined in ascending
//! index order and rows in ascending table order; across workers there is no
//! ordering guarantee and none is needed, because the signal only ever moves
//! one way per call.
//!
//! Short-circuiting happens at exactly two points: the inner row scan stops
//! at the first satisfying row, and a worker consults the signal before
//! starting each predicate, stopping its batch once the overall answer is
//! already decided elsewhere. A worker never concludes "no match" for a
//! predicate without a full row scan. Cancellation is cooperative and
//! best-effort only: a worker may finish extra checks after the answer is
//! decided, which is acceptable by contract.

use std::{num::NonZeroUsize, thread};

use tracing::{debug, trace};

use crate::{
    partition,
    predicate::{Predicate, PredicateError},
    signal::EarlyExitSignal,
};

const LOG_TARGET: &str = "parsat";

/// Options controlling one evaluate call.
#[derive(Debug, Clone)]
pub struct EvalOptions {
    workers: usize,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            workers: default_workers(),
        }
    }
}

impl EvalOptions {
    /// Options with the default worker count: the platform's available
    /// hardware parallelism, with a floor of 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the worker count; clamped to at least 1.
    pub fn workers(self, workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    /// Worker count one evaluate call will spawn.
    pub fn worker_count(&self) -> usize {
        self.workers
    }
}

fn default_workers() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// True iff every predicate has at least one satisfying row.
///
/// An empty predicate set is vacuously true; a non-empty predicate set over
/// an empty table is false. The result is identical for every worker count.
/// The first predicate fault aborts the call: all in-flight workers are
/// joined and the fault is returned instead of a boolean.
pub fn evaluate_all<R: Sync>(
    predicates: &[Predicate<R>],
    rows: &[R],
    options: &EvalOptions,
) -> Result<bool, PredicateError> {
    let signal = EarlyExitSignal::for_all();
    debug!(
        target: LOG_TARGET,
        quantifier = "all",
        predicates = predicates.len(),
        rows = rows.len(),
        workers = options.worker_count(),
        "evaluate start"
    );
    run_workers(predicates, rows, options, &signal, scan_batch_all)?;
    Ok(signal.get())
}

/// True iff some predicate has at least one satisfying row.
///
/// Mirrors [`evaluate_all`] with the signal polarity reversed; empty
/// predicate sets and empty tables both yield false. Fault semantics are the
/// same.
pub fn evaluate_any<R: Sync>(
    predicates: &[Predicate<R>],
    rows: &[R],
    options: &EvalOptions,
) -> Result<bool, PredicateError> {
    let signal = EarlyExitSignal::for_any();
    debug!(
        target: LOG_TARGET,
        quantifier = "any",
        predicates = predicates.len(),
        rows = rows.len(),
        workers = options.worker_count(),
        "evaluate start"
    );
    run_workers(predicates, rows, options, &signal, scan_batch_any)?;
    Ok(signal.get())
}

/// Spawn one scoped worker per non-empty batch and join them all.
///
/// Returns the first fault observed across workers, after every worker has
/// been joined. Worker panics are resumed on the calling thread.
fn run_workers<R: Sync>(
    predicates: &[Predicate<R>],
    rows: &[R],
    options: &EvalOptions,
    signal: &EarlyExitSignal,
    scan: fn(&[Predicate<R>], &[R], &EarlyExitSignal) -> Result<(), PredicateError>,
) -> Result<(), PredicateError> {
    let batches = partition::batches(predicates.len(), options.worker_count());

    thread::scope(|scope| {
        let handles: Vec<_> = batches
            .into_iter()
            .filter(|batch| !batch.is_empty())
            .map(|batch| {
                let batch = &predicates[batch];
                scope.spawn(move || scan(batch, rows, signal))
            })
            .collect();

        let mut first_fault = None;
        for handle in handles {
            match handle.join() {
                Ok(Ok(())) => {}
                Ok(Err(fault)) => {
                    if first_fault.is_none() {
                        first_fault = Some(fault);
                    }
                }
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        first_fault.map_or(Ok(()), Err)
    })
}

fn scan_batch_all<R>(
    batch: &[Predicate<R>],
    rows: &[R],
    signal: &EarlyExitSignal,
) -> Result<(), PredicateError> {
    for predicate in batch {
        // Once some worker proved a predicate unsatisfied, the overall
        // answer can never become true again.
        if !signal.get() {
            trace!(target: LOG_TARGET, "negative decision observed, stopping batch");
            return Ok(());
        }

        let mut found = false;
        for row in rows {
            if predicate.evaluate(row)? {
                found = true;
                break;
            }
        }
        if !found {
            trace!(target: LOG_TARGET, "predicate unsatisfied, deciding false");
            signal.decide(false);
            return Ok(());
        }
    }
    Ok(())
}

fn scan_batch_any<R>(
    batch: &[Predicate<R>],
    rows: &[R],
    signal: &EarlyExitSignal,
) -> Result<(), PredicateError> {
    for predicate in batch {
        if signal.get() {
            trace!(target: LOG_TARGET, "positive decision observed, stopping batch");
            return Ok(());
        }

        for row in rows {
            if predicate.evaluate(row)? {
                trace!(target: LOG_TARGET, "satisfying row found, deciding true");
                signal.decide(true);
                return Ok(());
            }
        }
    }
    Ok(())
}

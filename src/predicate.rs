//! Opaque row predicates and their simulated invocation cost.
//!
//! A [`Predicate`] is a capability: given a row it yields a boolean, or a
//! fault. The engine treats predicates as black boxes with no cost model
//! beyond "possibly expensive". [`SpinCost`] exists so synthetic workloads
//! can give them a realistic, tunable per-invocation latency.

use std::{
    fmt,
    sync::Arc,
    time::{Duration, Instant},
};

use thiserror::Error;

/// Fault raised by a predicate invocation.
///
/// The engine recovers nothing locally: the first fault observed aborts the
/// whole evaluate call after all in-flight workers are joined.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("predicate fault: {message}")]
pub struct PredicateError {
    message: String,
}

impl PredicateError {
    /// Build a fault from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

type EvalFn<R> = dyn Fn(&R) -> Result<bool, PredicateError> + Send + Sync;

/// An opaque boolean function of one row.
///
/// Predicates are invoked possibly many times and concurrently from multiple
/// worker threads, so the wrapped closure must be `Send + Sync` and must not
/// mutate shared captured state. For a given row the result is assumed
/// deterministic; invocation latency is unspecified.
pub struct Predicate<R> {
    eval: Arc<EvalFn<R>>,
}

impl<R> Clone for Predicate<R> {
    fn clone(&self) -> Self {
        Self {
            eval: Arc::clone(&self.eval),
        }
    }
}

impl<R> fmt::Debug for Predicate<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate").finish_non_exhaustive()
    }
}

impl<R> Predicate<R> {
    /// Wrap an infallible closure.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        Self::try_from_fn(move |row| Ok(f(row)))
    }

    /// Wrap a fallible closure.
    pub fn try_from_fn<F>(f: F) -> Self
    where
        F: Fn(&R) -> Result<bool, PredicateError> + Send + Sync + 'static,
    {
        Self { eval: Arc::new(f) }
    }

    /// Predicate that ignores its row and always yields `value`.
    pub fn constant(value: bool) -> Self {
        Self::from_fn(move |_| value)
    }

    /// Predicate that faults on every invocation; exercises the abort path.
    pub fn failing(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::try_from_fn(move |_| Err(PredicateError::new(message.clone())))
    }

    /// Invoke the predicate on one row.
    pub fn evaluate(&self, row: &R) -> Result<bool, PredicateError> {
        (self.eval)(row)
    }
}

impl<R> Predicate<R>
where
    R: PartialEq + Send + Sync + 'static,
{
    /// Equality match against a fixed target value.
    pub fn equals(target: R) -> Self {
        Self::from_fn(move |row| *row == target)
    }
}

/// Busy-wait latency applied before each simulated predicate check.
///
/// The spin occupies the worker thread for the configured duration rather
/// than yielding it, mimicking a CPU-bound check. A zero duration disables
/// the spin entirely so tests can run fast without touching evaluator logic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpinCost {
    delay: Duration,
}

impl SpinCost {
    /// Cost that spins for `delay` on every [`apply`](Self::apply).
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Cost that does nothing.
    pub const fn disabled() -> Self {
        Self {
            delay: Duration::ZERO,
        }
    }

    /// Whether [`apply`](Self::apply) is a no-op.
    pub fn is_disabled(&self) -> bool {
        self.delay.is_zero()
    }

    /// Busy-wait until the configured delay has elapsed.
    pub fn apply(&self) {
        if self.delay.is_zero() {
            return;
        }
        let begin = Instant::now();
        while begin.elapsed() < self.delay {
            std::hint::spin_loop();
        }
    }
}

impl Default for SpinCost {
    /// Two microseconds per invocation, the benchmark's simulated check cost.
    fn default() -> Self {
        Self::new(Duration::from_micros(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_ignores_its_row() {
        let always = Predicate::<i64>::constant(true);
        let never = Predicate::<i64>::constant(false);

        assert_eq!(always.evaluate(&7), Ok(true));
        assert_eq!(never.evaluate(&7), Ok(false));
    }

    #[test]
    fn equals_matches_only_its_target() {
        let predicate = Predicate::equals(42i64);

        assert_eq!(predicate.evaluate(&42), Ok(true));
        assert_eq!(predicate.evaluate(&41), Ok(false));
    }

    #[test]
    fn failing_reports_its_message() {
        let predicate = Predicate::<i64>::failing("backend offline");

        assert_eq!(
            predicate.evaluate(&0),
            Err(PredicateError::new("backend offline"))
        );
    }

    #[test]
    fn disabled_spin_is_a_noop() {
        let cost = SpinCost::disabled();

        assert!(cost.is_disabled());
        cost.apply();
    }

    #[test]
    fn spin_waits_at_least_the_requested_delay() {
        let cost = SpinCost::new(Duration::from_micros(50));
        let begin = Instant::now();
        cost.apply();

        assert!(begin.elapsed() >= Duration::from_micros(50));
    }
}

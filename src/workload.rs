//! Reproducible synthetic workload generation.
//!
//! Produces `(rows, predicates)` pairs with a controlled expected outcome for
//! the four AND/OR × true/false benchmark scenarios. All randomness flows
//! through an explicit [`fastrand::Rng`] seeded fresh at the start of every
//! top-level [`generate`] call, so identical specs reproduce identical
//! workloads bit for bit. No process-wide generator state exists.

use std::str::FromStr;

use thiserror::Error;

use crate::predicate::{Predicate, SpinCost};

/// Row type used by generated workloads: a plain integer id.
pub type Row = i64;

/// Default seed for workload generation.
pub const DEFAULT_SEED: u64 = 3;

/// Default parallelism hint. A fixed constant, never detected from the
/// executing machine, so identical specs generate identical workloads on
/// any host.
pub const DEFAULT_PARALLELISM: usize = 8;

const DEFAULT_QUERY_LEN: usize = 512;
const DEFAULT_ROW_COUNT: usize = 8192;

// Truth-pattern fill probabilities for the mixed generators. The
// expected-false conjunction is almost all satisfiable predicates with one
// guaranteed miss; the expected-true disjunction is the reverse.
const CONJUNCTION_FALSE_TRUE_RATIO: f64 = 0.95;
const DISJUNCTION_TRUE_TRUE_RATIO: f64 = 0.05;

/// Logical operation combining the predicates of a generated query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Universal: every predicate must be satisfied by some row.
    Conjunction,
    /// Existential: some predicate must be satisfied by some row.
    Disjunction,
}

impl FromStr for Operation {
    type Err = WorkloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "and" | "all" | "conjunction" => Ok(Operation::Conjunction),
            "or" | "any" | "disjunction" => Ok(Operation::Disjunction),
            _ => Err(WorkloadError::UnsupportedOperation(s.to_owned())),
        }
    }
}

/// Errors raised at generation time, before any evaluation begins.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkloadError {
    /// The requested query is longer than the table it must match against.
    #[error("invalid configuration: query length {query_len} exceeds row count {row_count}")]
    InvalidConfiguration {
        /// Requested predicate count.
        query_len: usize,
        /// Requested table size.
        row_count: usize,
    },
    /// The requested logical operator is not recognized.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}

/// Parameters of one generation call. Everything is explicit; nothing is
/// read from the environment or detected from the executing machine.
#[derive(Clone, Debug)]
pub struct WorkloadSpec {
    /// Logical operation of the generated query.
    pub operation: Operation,
    /// Whether the query should evaluate to true on its table.
    pub expected: bool,
    /// Number of predicates. Must not exceed `row_count`.
    pub query_len: usize,
    /// Number of rows in the table.
    pub row_count: usize,
    /// Deterministic seed; the generator reseeds from it on every call.
    pub seed: u64,
    /// Parallelism hint used to spread equality targets across the table.
    /// An explicit parameter so workloads never depend on the core count of
    /// the machine that generated them.
    pub parallelism: usize,
    /// Override for the truth-pattern fill probability of the mixed
    /// generators; `None` uses the per-scenario default.
    pub probability: Option<f64>,
    /// Simulated per-invocation predicate latency.
    pub spin: SpinCost,
}

impl WorkloadSpec {
    /// Spec for `operation`/`expected` with default sizes, seed, and cost.
    pub fn new(operation: Operation, expected: bool) -> Self {
        Self {
            operation,
            expected,
            query_len: DEFAULT_QUERY_LEN,
            row_count: DEFAULT_ROW_COUNT,
            seed: DEFAULT_SEED,
            parallelism: DEFAULT_PARALLELISM,
            probability: None,
            spin: SpinCost::default(),
        }
    }

    /// Set the predicate count.
    pub fn query_len(self, query_len: usize) -> Self {
        Self { query_len, ..self }
    }

    /// Set the table size.
    pub fn row_count(self, row_count: usize) -> Self {
        Self { row_count, ..self }
    }

    /// Set the seed.
    pub fn seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }

    /// Set the parallelism hint; clamped to at least 1.
    pub fn parallelism(self, parallelism: usize) -> Self {
        Self {
            parallelism: parallelism.max(1),
            ..self
        }
    }

    /// Override the truth-pattern fill probability.
    pub fn probability(self, probability: f64) -> Self {
        Self {
            probability: Some(probability),
            ..self
        }
    }

    /// Set the simulated predicate latency.
    pub fn spin(self, spin: SpinCost) -> Self {
        Self { spin, ..self }
    }
}

/// A generated table and query.
#[derive(Debug)]
pub struct Workload {
    /// The immutable row table.
    pub rows: Vec<Row>,
    /// The ordered predicate set.
    pub predicates: Vec<Predicate<Row>>,
    /// Which predicate slots were generated satisfiable.
    pub truth_pattern: Vec<bool>,
}

/// Generate a workload from `spec`.
///
/// Rejects specs whose query is longer than their table. The expected
/// outcome is reliable for tables of at least a few dozen rows; degenerate
/// tiny tables may not contain a witness for every stepped-range predicate.
pub fn generate(spec: &WorkloadSpec) -> Result<Workload, WorkloadError> {
    if spec.query_len > spec.row_count {
        return Err(WorkloadError::InvalidConfiguration {
            query_len: spec.query_len,
            row_count: spec.row_count,
        });
    }

    let mut rng = fastrand::Rng::with_seed(spec.seed);
    Ok(match (spec.operation, spec.expected) {
        (Operation::Conjunction, true) => stepped_range_instance(spec, &mut rng),
        (Operation::Conjunction, false) => {
            let ratio = spec.probability.unwrap_or(CONJUNCTION_FALSE_TRUE_RATIO);
            mixed_instance(spec, &mut rng, false, ratio)
        }
        (Operation::Disjunction, true) => {
            let ratio = spec.probability.unwrap_or(DISJUNCTION_TRUE_TRUE_RATIO);
            mixed_instance(spec, &mut rng, true, ratio)
        }
        (Operation::Disjunction, false) => never_matching_instance(spec, &mut rng),
    })
}

/// Fill `len` boolean slots with `P(true) = probability`, guaranteeing at
/// least one occurrence of `ensure` in any non-empty pattern.
///
/// The first `len - 1` slots are drawn freely; the final slot is drawn only
/// if `ensure` already appeared, otherwise it is forced. This holds even at
/// probability extremes (e.g. probability 0 while ensuring `true`).
fn fill_truth_pattern(
    rng: &mut fastrand::Rng,
    probability: f64,
    len: usize,
    ensure: bool,
) -> Vec<bool> {
    if len == 0 {
        return Vec::new();
    }

    let mut pattern = Vec::with_capacity(len);
    let mut ensured = false;
    for _ in 0..len - 1 {
        let slot = rng.f64() < probability;
        ensured |= slot == ensure;
        pattern.push(slot);
    }
    pattern.push(if ensured {
        rng.f64() < probability
    } else {
        ensure
    });
    pattern
}

/// Mixed equality instance: satisfiable slots match a value guaranteed to be
/// present in the table, unsatisfiable slots match the absent value `-1`.
fn mixed_instance(
    spec: &WorkloadSpec,
    rng: &mut fastrand::Rng,
    ensure: bool,
    probability: f64,
) -> Workload {
    let truth_pattern = fill_truth_pattern(rng, probability, spec.query_len, ensure);
    let rows: Vec<Row> = (0..spec.row_count as Row).collect();

    let offset = (spec.row_count / spec.parallelism.max(1)) as Row;
    let predicates = truth_pattern
        .iter()
        .map(|&satisfiable| {
            let target = if satisfiable {
                // Clamp the witness into the table; the offset draw can
                // otherwise land past the last row of a small table.
                (offset + rng.i64(1..=20)).min(spec.row_count as Row - 1)
            } else {
                -1
            };
            let spin = spec.spin;
            Predicate::from_fn(move |row: &Row| {
                spin.apply();
                *row == target
            })
        })
        .collect();

    Workload {
        rows,
        predicates,
        truth_pattern,
    }
}

/// Conjunction instance in which every predicate is a stepped-range match
/// (`start ≤ v ≤ end` and `v` divisible by `step`) over a shuffled table.
fn stepped_range_instance(spec: &WorkloadSpec, rng: &mut fastrand::Rng) -> Workload {
    let rows = shuffled_rows(spec.row_count, rng);
    let margin = (spec.row_count as Row - 1).max(0) / 20;

    let predicates = (0..spec.query_len)
        .map(|_| {
            let start = rng.i64(0..=margin);
            let end = spec.row_count as Row - rng.i64(0..=margin);
            let step = rng.i64(2..=5);
            let spin = spec.spin;
            Predicate::from_fn(move |row: &Row| {
                spin.apply();
                *row >= start && *row <= end && *row % step == 0
            })
        })
        .collect();

    Workload {
        rows,
        predicates,
        truth_pattern: vec![true; spec.query_len],
    }
}

/// Disjunction instance in which no predicate matches any row.
fn never_matching_instance(spec: &WorkloadSpec, rng: &mut fastrand::Rng) -> Workload {
    let rows = shuffled_rows(spec.row_count, rng);

    let predicates = (0..spec.query_len)
        .map(|_| {
            let spin = spec.spin;
            Predicate::from_fn(move |row: &Row| {
                spin.apply();
                *row == -1
            })
        })
        .collect();

    Workload {
        rows,
        predicates,
        truth_pattern: vec![false; spec.query_len],
    }
}

fn shuffled_rows(count: usize, rng: &mut fastrand::Rng) -> Vec<Row> {
    let mut rows: Vec<Row> = (0..count as Row).collect();
    rng.shuffle(&mut rows);
    rows
}

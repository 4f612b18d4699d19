//! Benchmark driver for the quantifier evaluation engine.
//!
//! Runs the four scenarios (AND/OR × expected-true/expected-false), timing
//! one evaluate call each and printing one line per scenario: the elapsed
//! time on a pass, a wrong-result marker when the answer disagrees with the
//! expectation, or a fault marker when generation or evaluation fails. A
//! fault in one scenario never stops the remaining ones; this is the only
//! boundary in the system that catches faults.

use std::time::{Duration, Instant};

use clap::Parser;
use parsat::{
    evaluate::{evaluate_all, evaluate_any, EvalOptions},
    predicate::SpinCost,
    workload::{self, Operation, WorkloadSpec},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Quantified predicate evaluation benchmark")]
struct Args {
    /// Rows per generated table.
    #[arg(long, default_value_t = 8192)]
    rows: usize,

    /// Predicates per generated query.
    #[arg(long, default_value_t = 512)]
    query_len: usize,

    /// Worker threads per evaluate call; defaults to hardware parallelism.
    #[arg(long)]
    workers: Option<usize>,

    /// Parallelism hint for workload generation. Independent of `--workers`
    /// so generated workloads never depend on the executing machine.
    #[arg(long, default_value_t = workload::DEFAULT_PARALLELISM)]
    parallelism: usize,

    /// Seed for workload generation.
    #[arg(long, default_value_t = workload::DEFAULT_SEED)]
    seed: u64,

    /// Simulated predicate latency in nanoseconds; 0 disables the spin.
    #[arg(long, default_value_t = 2_000)]
    spin_nanos: u64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut options = EvalOptions::new();
    if let Some(workers) = args.workers {
        options = options.workers(workers);
    }

    run_scenario("true  = evaluate_all(...)", Operation::Conjunction, true, &args, &options);
    run_scenario("true  = evaluate_any(...)", Operation::Disjunction, true, &args, &options);
    println!();
    run_scenario("false = evaluate_all(...)", Operation::Conjunction, false, &args, &options);
    run_scenario("false = evaluate_any(...)", Operation::Disjunction, false, &args, &options);
}

fn run_scenario(
    label: &str,
    operation: Operation,
    expected: bool,
    args: &Args,
    options: &EvalOptions,
) {
    let spec = WorkloadSpec::new(operation, expected)
        .query_len(args.query_len)
        .row_count(args.rows)
        .seed(args.seed)
        .parallelism(args.parallelism)
        .spin(SpinCost::new(Duration::from_nanos(args.spin_nanos)));

    let workload = match workload::generate(&spec) {
        Ok(workload) => workload,
        Err(fault) => {
            println!("{label}      --- fault: {fault} ---");
            return;
        }
    };

    let begin = Instant::now();
    let outcome = match operation {
        Operation::Conjunction => evaluate_all(&workload.predicates, &workload.rows, options),
        Operation::Disjunction => evaluate_any(&workload.predicates, &workload.rows, options),
    };
    let elapsed = begin.elapsed();

    match outcome {
        Ok(answer) if answer == expected => {
            println!("{label}      {:7}ms", elapsed.as_millis());
        }
        Ok(_) => println!("{label}      --- wrong result ---"),
        Err(fault) => println!("{label}      --- fault: {fault} ---"),
    }
}

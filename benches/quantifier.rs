use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use parsat::{
    evaluate_all, evaluate_any,
    workload::{self, Operation, WorkloadSpec},
    EvalOptions, SpinCost,
};

fn bench_quantifiers(c: &mut Criterion) {
    let spin = SpinCost::new(Duration::from_nanos(500));

    let mut group = c.benchmark_group("evaluate_all");
    for workers in [1usize, 2, 4, 8] {
        let spec = WorkloadSpec::new(Operation::Conjunction, true)
            .query_len(128)
            .row_count(2048)
            .parallelism(workers)
            .spin(spin);
        let workload = workload::generate(&spec).unwrap();
        let options = EvalOptions::new().workers(workers);

        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, _| {
            b.iter(|| evaluate_all(&workload.predicates, &workload.rows, &options).unwrap())
        });
    }
    group.finish();

    let mut group = c.benchmark_group("evaluate_any");
    for workers in [1usize, 2, 4, 8] {
        let spec = WorkloadSpec::new(Operation::Disjunction, false)
            .query_len(128)
            .row_count(2048)
            .parallelism(workers)
            .spin(spin);
        let workload = workload::generate(&spec).unwrap();
        let options = EvalOptions::new().workers(workers);

        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, _| {
            b.iter(|| evaluate_any(&workload.predicates, &workload.rows, &options).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_quantifiers);
criterion_main!(benches);

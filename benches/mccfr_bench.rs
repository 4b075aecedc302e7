//! Benchmarks for the AS-MCCFR trainer.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use as_mccfr::games::kuhn::KuhnEngine;
use as_mccfr::mccfr::{TrainParams, Trainer};

fn kuhn_epoch_benchmark(c: &mut Criterion) {
    let params = TrainParams::default().with_seed(42);
    let mut trainer = Trainer::new(KuhnEngine::new(), params);

    c.bench_function("kuhn_single_epoch", |b| {
        b.iter(|| {
            trainer.run_epoch().unwrap();
            black_box(trainer.epoch())
        })
    });
}

fn kuhn_1000_epochs_benchmark(c: &mut Criterion) {
    c.bench_function("kuhn_1000_epochs", |b| {
        b.iter(|| {
            let params = TrainParams::default().with_seed(42);
            let mut trainer = Trainer::new(KuhnEngine::new(), params);
            trainer.train(black_box(1000)).unwrap();
            black_box(trainer.num_info_sets())
        })
    });
}

criterion_group!(benches, kuhn_epoch_benchmark, kuhn_1000_epochs_benchmark);
criterion_main!(benches);

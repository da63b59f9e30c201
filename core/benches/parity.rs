use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use keyflip_core::*;

fn bench_checksum(c: &mut Criterion) {
    let mut group = c.benchmark_group("checksum");
    for config in [BoardConfig::mini(), BoardConfig::classic(), BoardConfig::grand()] {
        let setup = RandomSetupGenerator::new(0xC0FFEE).generate(config);
        group.bench_function(format!("{0}x{0}", config.side), |b| {
            b.iter(|| black_box(setup.board().checksum()))
        });
    }
    group.finish();
}

fn bench_corrective_flip(c: &mut Criterion) {
    let setup = RandomSetupGenerator::new(0xC0FFEE).generate(BoardConfig::classic());
    c.bench_function("corrective_flip", |b| {
        b.iter(|| black_box(setup.board().corrective_flip(black_box(42))))
    });
}

fn bench_oracle_round(c: &mut Criterion) {
    c.bench_function("oracle_round", |b| {
        b.iter(|| {
            let setup = RandomSetupGenerator::new(7).generate(BoardConfig::classic());
            let mut session = GameSession::new(setup);
            session.confirm_phase().unwrap();
            let flip = session.solve_flip().unwrap();
            session.select_cell(flip).unwrap();
            session.confirm_phase().unwrap();
            let guess = session.solve_guess().unwrap();
            session.select_cell(guess).unwrap();
            black_box(session.confirm_phase().unwrap())
        })
    });
}

criterion_group!(benches, bench_checksum, bench_corrective_flip, bench_oracle_round);
criterion_main!(benches);

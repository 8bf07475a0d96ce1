//! Criterion benchmarks for the tape engine
//!
//! Run with: cargo bench -p genloss-effects
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use genloss_core::RandomSource;
use genloss_effects::{DropoutScheduler, FilterBank, FilterDesign, GenLoss, GenLossParams};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5
        })
        .collect()
}

fn bench_engine(c: &mut Criterion, name: &str, params: GenLossParams) {
    let mut group = c.benchmark_group(name);

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);
        let mut engine = GenLoss::new(SAMPLE_RATE);
        engine.reset(SAMPLE_RATE, block_size);

        group.bench_with_input(
            BenchmarkId::from_parameter(block_size),
            &block_size,
            |b, _| {
                let mut left = vec![0.0; block_size];
                let mut right = vec![0.0; block_size];
                b.iter(|| {
                    engine.set_params(black_box(&params));
                    engine.process(
                        &[black_box(&input), black_box(&input)],
                        &mut [&mut left, &mut right],
                        block_size,
                    );
                    black_box(left[0])
                })
            },
        );
    }

    group.finish();
}

fn bench_default(c: &mut Criterion) {
    bench_engine(c, "GenLoss/default", GenLossParams::default());
}

fn bench_heavy(c: &mut Criterion) {
    bench_engine(
        c,
        "GenLoss/heavy",
        GenLossParams {
            wow_depth: 1.0,
            flutter_depth: 1.0,
            dropout_rate: 30.0,
            saturation: 100.0,
            noise_db: -30.0,
            hum_db: -30.0,
            model_hs_db: 12.0,
            tilt_db: 6.0,
            ..GenLossParams::default()
        },
    );
}

fn bench_retune(c: &mut Criterion) {
    // Tone change every block forces a filter redesign
    let input = generate_test_signal(256);
    let mut engine = GenLoss::new(SAMPLE_RATE);
    let mut left = vec![0.0; 256];
    let mut right = vec![0.0; 256];
    let mut cutoff = 2.0;

    c.bench_function("GenLoss/retune_256", |b| {
        b.iter(|| {
            cutoff = if cutoff >= 20.0 { 2.0 } else { cutoff + 0.5 };
            engine.set_params(&GenLossParams {
                model_lp_khz: cutoff,
                ..GenLossParams::default()
            });
            engine.process(&[&input, &input], &mut [&mut left, &mut right], 256);
            black_box(left[0])
        })
    });
}

fn bench_filter_bank(c: &mut Criterion) {
    let input = generate_test_signal(1024);
    let mut bank = FilterBank::new();
    bank.apply(&FilterDesign::new(9000.0, 3.0, -2.0, SAMPLE_RATE));

    c.bench_function("FilterBank/1024", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for &x in &input {
                acc += bank.process(black_box(x));
            }
            black_box(acc)
        })
    });
}

fn bench_dropout(c: &mut Criterion) {
    let mut dropouts = DropoutScheduler::new(SAMPLE_RATE);
    dropouts.set_rate(30.0);
    let mut rng = RandomSource::default();

    c.bench_function("DropoutScheduler/1024", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for _ in 0..1024 {
                acc += dropouts.advance(&mut rng);
            }
            black_box(acc)
        })
    });
}

criterion_group!(
    benches,
    bench_default,
    bench_heavy,
    bench_retune,
    bench_filter_bank,
    bench_dropout
);
criterion_main!(benches);

//! Benchmarks for the validation engine hot path.
//!
//! Run with: cargo bench
//!
//! A session is fed once per detector tick (tens of times per second),
//! so a single submit has an enormous real-time margin; these benchmarks
//! exist to catch accidental regressions, not to chase deadlines.

use std::hint::black_box;
use std::time::{Duration, Instant};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use fretdrill::engine::{DrillSession, NoteMatcher, PitchSample};
use fretdrill::music::Tuning;
use fretdrill::tab::{Drill, FrettedNote, TabSequence};
use fretdrill::DEFAULT_PITCH_TOLERANCE_CENTS;

/// A climb across all six strings, three frets each.
fn long_sequence() -> TabSequence {
    let mut builder = TabSequence::builder();
    for string in (1..=6u8).rev() {
        for fret in 0..3u8 {
            builder = builder.note(string, fret);
        }
    }
    builder.build().unwrap()
}

fn bench_matcher(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/matcher");
    let matcher = NoteMatcher::new(Tuning::STANDARD, DEFAULT_PITCH_TOLERANCE_CENTS);
    let tuning = Tuning::STANDARD;

    let single = TabSequence::builder().note(3, 2).build().unwrap();
    let double = TabSequence::builder()
        .chord(&[(3, 2), (2, 1)])
        .build()
        .unwrap();

    let in_tune = tuning.fret_frequency(FrettedNote { string: 3, fret: 2 });
    let far_off = in_tune * 2.0;

    group.bench_function("single_hit", |b| {
        let step = &single.steps()[0];
        b.iter(|| matcher.match_step(black_box(in_tune), black_box(step)))
    });
    group.bench_function("single_miss", |b| {
        let step = &single.steps()[0];
        b.iter(|| matcher.match_step(black_box(far_off), black_box(step)))
    });
    group.bench_function("double_stop_miss", |b| {
        // Worst case: every candidate is evaluated
        let step = &double.steps()[0];
        b.iter(|| matcher.match_step(black_box(far_off), black_box(step)))
    });

    group.finish();
}

fn bench_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/session");
    let tuning = Tuning::STANDARD;

    // A miss is the common case: the detector ticks many times per step.
    let miss = PitchSample {
        frequency: 1_000.0,
        clarity: 0.9,
        onset: false,
    };
    let mut session = DrillSession::new(Drill::new("bench", "Bench", long_sequence()));
    let t0 = Instant::now();
    group.bench_function("submit_miss", |b| {
        b.iter(|| session.submit_sample(black_box(Some(miss)), black_box(t0)))
    });

    // Full sweep: validate all 18 steps from a fresh session.
    for &ticks_apart in &[100u64, 1_000] {
        group.bench_with_input(
            BenchmarkId::new("full_sweep_ms_apart", ticks_apart),
            &ticks_apart,
            |b, &ticks_apart| {
                let sequence = long_sequence();
                let samples: Vec<PitchSample> = sequence
                    .steps()
                    .iter()
                    .map(|step| PitchSample {
                        frequency: tuning.fret_frequency(step.notes()[0]),
                        clarity: 0.9,
                        onset: false,
                    })
                    .collect();

                b.iter(|| {
                    let mut session =
                        DrillSession::new(Drill::new("bench", "Bench", sequence.clone()));
                    for (tick, sample) in samples.iter().enumerate() {
                        let now = t0 + Duration::from_millis(tick as u64 * ticks_apart);
                        session.submit_sample(Some(*sample), now);
                    }
                    black_box(session.is_complete())
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_matcher, bench_session);
criterion_main!(benches);

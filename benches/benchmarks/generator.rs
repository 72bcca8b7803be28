use std::hint::black_box;

use criterion::{criterion_group, Criterion};

use chordlsys::prelude::*;

// ---------------------------------------------------------------------------------------------

fn create_generator() -> ChordLindenmayer {
    let mut generator = ChordLindenmayer::new();
    generator.set_axiom("S(0,4,7) R48 O0.25 A");
    generator.add_rule("A", "W [ T7 B ] Q5 A");
    generator.add_rule("B", "K W D/ WC2 V+");
    generator.set_iteration_count(5);
    generator
}

// ---------------------------------------------------------------------------------------------

pub fn generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("Generator");
    group.bench_function("Generate", |b| {
        b.iter_batched(
            create_generator,
            |mut generator| {
                black_box(generator.generate().map(|score| score.len()).ok());
            },
            criterion::BatchSize::SmallInput,
        )
    });
    group.finish();
}

pub fn voicings(c: &mut Criterion) {
    let mut group = c.benchmark_group("Generator");
    let chord = PitchClassSet::from([0.0, 4.0, 7.0, 10.0]);
    group.bench_function("Voicings", |b| {
        b.iter(|| {
            let mut cache = VoicingCache::new();
            black_box(cache.voicings(&chord, 60.0).map(|voicings| voicings.len()).ok());
        })
    });
    group.finish();
}

pub fn merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("Generator");
    let mut generator = create_generator();
    generator.set_options(GeneratorOptions {
        merge_overlapping: false,
        ..Default::default()
    });
    let score = generator.generate().cloned().unwrap_or_default();
    group.bench_function("Merge", |b| {
        b.iter_batched(
            || score.clone(),
            |mut score| black_box(score.merge_overlapping()),
            criterion::BatchSize::SmallInput,
        )
    });
    group.finish();
}

// ---------------------------------------------------------------------------------------------

criterion_group! {
    name = generator;
    config = Criterion::default();
    targets = generate, voicings, merge
}

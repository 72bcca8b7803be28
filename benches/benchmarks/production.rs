use std::hint::black_box;

use criterion::{criterion_group, Criterion};

use chordlsys::prelude::*;

// ---------------------------------------------------------------------------------------------

fn create_rules() -> RuleTable {
    RuleTable::from_iter([
        ("A", "[ T5 B W ] Q2 A V+ W"),
        ("B", "K A D/ WC ]"),
    ])
}

// ---------------------------------------------------------------------------------------------

pub fn produce_tokens(c: &mut Criterion) {
    let mut group = c.benchmark_group("Production");
    let rules = create_rules();
    for generations in [4, 8] {
        group.bench_function(format!("Produce {}", generations), |b| {
            b.iter(|| black_box(produce("S(0,4,7) A", &rules, generations)))
        });
    }
    group.finish();
}

pub fn parse_commands(c: &mut Criterion) {
    let mut group = c.benchmark_group("Production");
    let production = produce("S(0,4,7) A", &create_rules(), 6);
    group.bench_function("Parse", |b| {
        b.iter(|| {
            for token in production.split_whitespace() {
                black_box(Command::parse(token));
            }
        })
    });
    group.finish();
}

// ---------------------------------------------------------------------------------------------

criterion_group! {
    name = production;
    config = Criterion::default();
    targets = produce_tokens, parse_commands
}

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use repeat_diff::{DriftTable, extract_changes, tokenize};

fn sample_source(functions: usize, marker: &str) -> String {
    (0..functions)
        .map(|i| format!("fn handler_{i}() {{\n    register(\"{marker}{i}\");\n}}\n\n"))
        .collect()
}

fn benchmark_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");
    let previous = sample_source(200, "Foo");
    let mut current = previous.clone();
    current.insert_str(previous.len() / 2, "fn inserted() {\n    register(\"Bar\");\n}\n\n");

    group.bench_function("tokenize", |b| {
        b.iter(|| tokenize(black_box(&previous)));
    });

    group.bench_function("extract_changes", |b| {
        let prev_tokens = tokenize(&previous);
        let curr_tokens = tokenize(&current);
        b.iter(|| extract_changes(black_box(&prev_tokens), black_box(&curr_tokens)));
    });

    group.bench_function("drift_table", |b| {
        let prev_tokens = tokenize(&previous);
        let curr_tokens = tokenize(&current);
        b.iter(|| DriftTable::compute(black_box(&prev_tokens), black_box(&curr_tokens)));
    });

    group.finish();
}

criterion_group!(benches, benchmark_extract);
criterion_main!(benches);

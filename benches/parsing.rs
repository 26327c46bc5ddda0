use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glucosense::parser;

fn sweep_text(lines: usize) -> String {
    (0..lines)
        .map(|i| format!("{:.4} {:.2}", 2.45 - i as f64 * 1e-4, -9.5 - i as f64 * 0.01))
        .collect::<Vec<_>>()
        .join("\n")
}

fn paired_text(groups: usize) -> String {
    (0..groups)
        .map(|i| format!("trace {i}: ({:.4}, {:.2})", 2.45 - i as f64 * 1e-4, -9.5 - i as f64 * 0.01))
        .collect::<Vec<_>>()
        .join("\n")
}

fn bench_strict_parse(c: &mut Criterion) {
    let text = sweep_text(500);
    c.bench_function("strict_parse_500_lines", |b| {
        b.iter(|| parser::parse(black_box(&text)).expect("valid input"))
    });
}

fn bench_extract_pairs(c: &mut Criterion) {
    let text = paired_text(500);
    c.bench_function("extract_500_pairs", |b| {
        b.iter(|| parser::extract_pairs(black_box(&text)))
    });
}

criterion_group!(benches, bench_strict_parse, bench_extract_pairs);
criterion_main!(benches);

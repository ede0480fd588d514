use std::hint::black_box;

use blockwise_syntax::{ScanStep, forward_unit, scan_step};
use criterion::{Criterion, criterion_group, criterion_main};

fn sample_source(methods: usize) -> String {
    let mut src = String::new();
    for i in 0..methods {
        src.push_str("_pragma(classify_level=basic)\n");
        src.push_str(&format!("_method demo.run_{i}(a, b)\n"));
        src.push_str("  _if a _then\n    write(\"hit\")\n  _else\n    run(b, [1,2,3])\n  _endif\n");
        src.push_str("_endmethod\n$\n");
    }
    src
}

fn bench_single_step(c: &mut Criterion) {
    let src = sample_source(50);
    c.bench_function("scan_step/method_header", |b| {
        let at = src.find("_method").unwrap();
        b.iter(|| scan_step(black_box(&src), black_box(at)));
    });
}

fn bench_full_walk(c: &mut Criterion) {
    let src = sample_source(50);
    c.bench_function("forward_unit/full_walk", |b| {
        b.iter(|| {
            let mut at = 0;
            loop {
                match scan_step(black_box(&src), at) {
                    Ok(ScanStep::Advanced(next)) if next > at => at = next,
                    _ => break,
                }
            }
            at
        });
    });
}

fn bench_repeat(c: &mut Criterion) {
    let src = sample_source(10);
    c.bench_function("forward_unit/repeat_32", |b| {
        b.iter(|| forward_unit(black_box(&src), 0, 32));
    });
}

criterion_group!(benches, bench_single_step, bench_full_walk, bench_repeat);
criterion_main!(benches);

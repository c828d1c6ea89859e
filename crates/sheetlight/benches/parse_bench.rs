use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use sheetlight::Dialect;
use std::hint::black_box;

fn make_table(rows: usize, columns: usize) -> String {
    let mut s = String::new();
    for r in 0..rows {
        for c in 0..columns {
            if c > 0 {
                s.push(',');
            }
            match c % 4 {
                0 => s.push_str(&(r * columns + c).to_string()),
                1 => s.push_str(&format!("\"name {r}, {c}\"")),
                2 => s.push_str(if r % 2 == 0 { "true" } else { "null" }),
                _ => s.push_str(&format!("{}.5", r + c)),
            }
        }
        s.push_str("\r\n");
    }
    s
}

fn make_json_cells(rows: usize) -> String {
    let mut s = String::new();
    for r in 0..rows {
        s.push_str(&format!("{r},{{\"k\":[{r},\"v,{r}\"]}},[1,2,3]\r\n"));
    }
    s
}

fn cases() -> Vec<(&'static str, String)> {
    vec![
        ("small", "a,b\r\nc,d\r\n".to_string()),
        ("table_1k_x8", make_table(1000, 8)),
        ("json_cells_1k", make_json_cells(1000)),
    ]
}

pub fn parse_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for (name, text) in cases() {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_function(format!("strict::{name}"), |b| {
            let d = Dialect::default().with_memoize(false);
            b.iter_batched(
                || text.clone(),
                |s| black_box(sheetlight::parse_with(&s, &d).unwrap()),
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("lenient::{name}"), |b| {
            let d = Dialect::default().with_memoize(false).with_strict_mode(false);
            b.iter_batched(
                || text.clone(),
                |s| black_box(sheetlight::parse_with(&s, &d).unwrap()),
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("memoized::{name}"), |b| {
            let d = Dialect::default();
            b.iter(|| black_box(sheetlight::parse_with(&text, &d).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(benches, parse_benchmarks);
criterion_main!(benches);

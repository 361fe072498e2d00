//! Benchmark: parse a synthetic protocol with many domains, each carrying
//! types with properties, commands with parameters/returns, and events.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pdl2json::parse;
use std::fmt::Write;

fn synthetic_protocol(domains: usize) -> String {
    let mut src = String::from("version\n  major 1\n  minor 0\n");
    for d in 0..domains {
        let _ = write!(src, "\n# Synthetic domain {d}.\ndomain Domain{d}\n");
        for t in 0..5 {
            let _ = write!(
                src,
                "  type Type{t} extends object\n    properties\n      integer size\n      optional string label\n"
            );
        }
        for c in 0..10 {
            let _ = write!(
                src,
                "  command command{c}\n    parameters\n      optional integer depth\n      array of Type0 nodes\n    returns\n      Type1 result\n"
            );
        }
        for e in 0..3 {
            let _ = write!(src, "  event event{e}\n    parameters\n      string reason\n");
        }
    }
    src
}

fn bench_parse(c: &mut Criterion) {
    let src = synthetic_protocol(20);
    c.bench_function("parse_pdl_20_domains", |b| {
        b.iter(|| parse(black_box(&src), "bench.pdl").expect("parse"))
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);

use cilly_parser::lexer::tokenize;
use cilly_parser::parser::Parser;
use cilly_source::Source;
use criterion::{criterion_group, criterion_main, Criterion, Throughput};

fn expr(source: &str) {
    let source = Source::new(source);
    let tokens = tokenize(&source).unwrap();
    let _ast = Parser::new(tokens).parse_expr().unwrap();
}

fn program(source: &str) {
    let _ast = cilly_parser::parse_source(source).unwrap();
}

fn long_expr(c: &mut Criterion) {
    let mut group = c.benchmark_group("long-expr");

    let mut source = "1".to_string();
    for _i in 0..1000 {
        source.push_str(" + 1");
    }
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("long-expr", |b| b.iter(|| expr(&source)));
}

fn stress_precedence(c: &mut Criterion) {
    let mut group = c.benchmark_group("stress-precedence");

    let mut source = "1".to_string();
    for _i in 0..200 {
        source.push_str(" == 2 < 3 + 5 * 5 ^ 2 or -4");
    }
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("stress-precedence", |b| b.iter(|| expr(&source)));
}

fn many_functions(c: &mut Criterion) {
    let mut group = c.benchmark_group("many-functions");

    let mut source = String::new();
    for i in 0..200 {
        source.push_str(&format!(
            "fun f{i}(n) {{ if (n < 2) return n; else return f{i}(n - 1) + f{i}(n - 2); }}\nvar g{i} = f{i}({i});\ng{i}(1);\n",
            i = i
        ));
    }
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("many-functions", |b| b.iter(|| program(&source)));
}

fn sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample");

    let source = include_str!("../../cilly/tests/fixtures/sample.cilly");
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("sample", |b| b.iter(|| program(source)));
}

criterion_group!(benches, long_expr, stress_precedence, many_functions, sample);
criterion_main!(benches);

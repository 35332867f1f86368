//! Request building and response header parsing benchmarks
//!
//! Run with: cargo bench --bench parser

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use httpfetch::http::{parse_response_header, Method, RequestHeader, Url};
use std::time::Duration;

const SMALL_RESPONSE: &[u8] =
    b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 5\r\n\r\nhello";

fn response_with_fields(fields: usize) -> Vec<u8> {
    let mut raw = b"HTTP/1.1 200 OK\r\n".to_vec();
    for i in 0..fields {
        raw.extend_from_slice(format!("X-Filler-{}: some value here\r\n", i).as_bytes());
    }
    raw.extend_from_slice(b"Date: Mon, 19 Oct 2026 10:00:00 GMT\r\n");
    raw.extend_from_slice(b"Content-Length: 0\r\n\r\n");
    raw
}

fn bench_parse_header(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_response_header");

    group.bench_function("small", |b| {
        b.iter(|| {
            let header = parse_response_header(black_box(SMALL_RESPONSE)).unwrap();
            black_box(header);
        });
    });

    for fields in [8, 32, 128] {
        let raw = response_with_fields(fields);
        group.throughput(Throughput::Bytes(raw.len() as u64));
        group.bench_with_input(BenchmarkId::new("fields", fields), &raw, |b, raw| {
            b.iter(|| {
                let header = parse_response_header(black_box(raw)).unwrap();
                black_box(header);
            });
        });
    }

    group.finish();
}

fn bench_build_request(c: &mut Criterion) {
    let mut group = c.benchmark_group("request_header");

    group.bench_function("parse_url", |b| {
        b.iter(|| {
            let url = Url::parse(black_box("http://example.com:8080/a/b/c")).unwrap();
            black_box(url);
        });
    });

    group.bench_function("build_and_close", |b| {
        b.iter(|| {
            let mut header = RequestHeader::new(Method::Get, black_box("example.com/a/b")).unwrap();
            header.add_field("Content-Type", "text/html").unwrap();
            header.add_field("Accept", "*/*").unwrap();
            header.close().unwrap();
            black_box(header);
        });
    });

    group.finish();
}

criterion_group! {
    name = parsing;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(5));
    targets =
        bench_parse_header,
        bench_build_request
}

criterion_main!(parsing);

use criterion::{criterion_group, criterion_main};

mod http;

criterion_group!(
    benches,
    at::bench_send_command,
    at::bench_drain,
    http::bench_parse_completion,
    http::bench_get
);
criterion_main!(benches);

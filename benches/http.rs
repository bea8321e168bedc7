use criterion::Criterion;
use libmodem::http::parse_completion;
use libmodem::{Modem, Sim7600};

use crate::at::{Scripted, Ticks};

fn sim7600(line: &[u8]) -> &'static [u8] {
    if line.starts_with(b"AT+HTTPACTION") {
        b"\r\nOK\r\n\r\n+HTTPACTION: 0,200,11\r\n"
    } else if line.starts_with(b"AT+HTTPREAD") {
        b"\r\n+HTTPREAD: DATA,11\r\nHello World\r\n\r\nOK\r\n"
    } else {
        b"\r\nOK\r\n"
    }
}

pub fn bench_parse_completion(c: &mut Criterion) {
    c.bench_function("http_parse_completion", |b| {
        b.iter(|| parse_completion(std::hint::black_box("+HTTPACTION: 0,200,1024")))
    });
}

pub fn bench_get(c: &mut Criterion) {
    let mut modem: Modem<Sim7600, _, _> = Modem::new(Scripted::new(sim7600), Ticks::default());

    c.bench_function("http_get", |b| {
        b.iter(|| modem.http_get::<64>(std::hint::black_box("http://example.com/hello")))
    });
}

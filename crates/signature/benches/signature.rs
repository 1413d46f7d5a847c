use criterion::{black_box, criterion_group, criterion_main, Criterion};
use http::Request;

use myra_signature::{signing_string, RequestBody, RequestSigner};

const DATE: &str = "2024-01-15T10:30:00Z";

fn bench_signing_string(c: &mut Criterion) {
    let body = br#"{"name":"www","value":"192.0.2.1","recordType":"A","ttl":300}"#;

    c.bench_function("signing_string", |b| {
        b.iter(|| {
            signing_string(
                black_box(body),
                black_box("post"),
                black_box("/en/rapi/dnsRecords/example.com"),
                "application/json",
                DATE,
            )
        })
    });
}

fn bench_signature(c: &mut Criterion) {
    let body = vec![b'x'; 16 * 1024];

    c.bench_function("signature_16k_body", |b| {
        b.iter(|| {
            let mut req = Request::post("https://api.myracloud.com/en/rapi/dnsRecords/example.com")
                .body(RequestBody::from(body.clone()))
                .expect("should build request");
            RequestSigner::new("secret", "key", &mut req)
                .signature(black_box(DATE))
                .expect("should sign")
        })
    });
}

criterion_group!(benches, bench_signing_string, bench_signature);
criterion_main!(benches);

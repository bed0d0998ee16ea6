use criterion::{criterion_group, criterion_main, Criterion};

use mailcat::compose;
use mailcat::model::attachment::Attachment;
use mailcat::model::envelope::Envelope;

fn bench_compose_body_only(c: &mut Criterion) {
    let envelope = Envelope {
        from: "bench@example.com".to_string(),
        to: "dest@example.com".to_string(),
        subject: "benchmark".to_string(),
        html_body: "<p>hello</p>".repeat(100),
        attachments: vec![],
    };

    c.bench_function("compose_body_only", |b| {
        b.iter(|| compose::compose_with_boundary(&envelope, "=_bench"))
    });
}

fn bench_compose_with_attachment(c: &mut Criterion) {
    let payload = vec![0xA5u8; 64 * 1024];
    let envelope = Envelope {
        from: "bench@example.com".to_string(),
        to: "dest@example.com".to_string(),
        subject: "benchmark".to_string(),
        html_body: "<p>hello</p>".to_string(),
        attachments: vec![Attachment::from_bytes("blob.bin", &payload)],
    };

    c.bench_function("compose_64k_attachment", |b| {
        b.iter(|| compose::compose_with_boundary(&envelope, "=_bench"))
    });
}

criterion_group!(benches, bench_compose_body_only, bench_compose_with_attachment);
criterion_main!(benches);

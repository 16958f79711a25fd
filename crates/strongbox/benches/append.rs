//! Append cost against file size. The time per append should stay flat as
//! the file grows.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use strongbox_testkit::TestFixture;

fn append_vs_file_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("append_1k");
    group.throughput(Throughput::Bytes(1024));

    for existing_kib in [1usize, 64, 1024] {
        let fixture = TestFixture::new();
        let alice = fixture.user("alice");
        alice
            .store_file("bench", &vec![0u8; existing_kib * 1024])
            .unwrap_or_else(|e| panic!("store: {e}"));
        let chunk = vec![1u8; 1024];

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{existing_kib}KiB")),
            &chunk,
            |b, chunk| {
                b.iter(|| {
                    alice
                        .append_to_file(black_box("bench"), black_box(chunk))
                        .unwrap_or_else(|e| panic!("append: {e}"))
                })
            },
        );
    }
    group.finish();
}

fn load_vs_chunk_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");

    for chunks in [1usize, 16, 256] {
        let fixture = TestFixture::new();
        let alice = fixture.user("alice");
        alice
            .store_file("bench", b"x")
            .unwrap_or_else(|e| panic!("store: {e}"));
        for _ in 1..chunks {
            alice
                .append_to_file("bench", &[2u8; 64])
                .unwrap_or_else(|e| panic!("append: {e}"));
        }

        group.bench_function(BenchmarkId::from_parameter(chunks), |b| {
            b.iter(|| alice.load_file(black_box("bench")))
        });
    }
    group.finish();
}

criterion_group!(benches, append_vs_file_size, load_vs_chunk_count);
criterion_main!(benches);

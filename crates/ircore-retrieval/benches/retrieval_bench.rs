use criterion::{criterion_group, criterion_main, Criterion};

use ircore_retrieval::fusion::rrf;

fn id_list(n: usize, prefix: &str) -> Vec<String> {
    (0..n).map(|i| format!("{prefix}{i}")).collect()
}

fn bench_rrf_fusion_1k(c: &mut Criterion) {
    let fts = id_list(1000, "f");
    let vector = id_list(1000, "v");

    c.bench_function("rrf_fuse_2_lists_1k_each", |b| {
        b.iter(|| {
            rrf::fuse(&[("fts", &fts), ("vector", &vector)], 60.0);
        });
    });
}

criterion_group!(benches, bench_rrf_fusion_1k);
criterion_main!(benches);

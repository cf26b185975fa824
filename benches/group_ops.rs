use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use zkalgebra::curve::{bls12_381, bn254, PointCodec};
use zkalgebra::Field;

fn bench_group_law(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let mut group = c.benchmark_group("Group Law");
    group.measurement_time(Duration::from_secs(5));

    let p = bn254::G1::random(&mut rng);
    let q = bn254::G1::random(&mut rng);
    let q_affine = q.to_affine();

    group.bench_function("bn254/add", |bench| bench.iter(|| black_box(p) + black_box(q)));
    group.bench_function("bn254/mixed_add", |bench| {
        bench.iter(|| black_box(p).mixed_add(black_box(&q_affine)))
    });
    group.bench_function("bn254/dbl", |bench| bench.iter(|| black_box(p).dbl()));

    let p = bls12_381::G1::random(&mut rng);
    let q = bls12_381::G1::random(&mut rng);
    group.bench_function("bls12_381/add", |bench| bench.iter(|| black_box(p) + black_box(q)));
    group.bench_function("bls12_381/dbl", |bench| bench.iter(|| black_box(p).dbl()));

    group.finish();
}

fn bench_scalar_mul(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(2);
    let mut group = c.benchmark_group("Scalar Multiplication");
    group.sample_size(20);

    let g = bn254::G1::one();
    let k = bn254::Fr::random(&mut rng);
    group.bench_function("bn254/mul", |bench| bench.iter(|| black_box(g) * black_box(k)));

    let p = bls12_381::G1::random(&mut rng);
    group.bench_function("bls12_381/is_in_safe_subgroup", |bench| {
        bench.iter(|| black_box(p).is_in_safe_subgroup())
    });

    group.finish();
}

fn bench_normalization(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(3);
    let mut group = c.benchmark_group("Normalization");

    for size in [16usize, 256, 1024] {
        let points: Vec<bn254::G1> = (0..size)
            .map(|_| bn254::G1::random(&mut rng).dbl())
            .collect();

        group.bench_with_input(BenchmarkId::new("to_affine", size), &points, |bench, points| {
            bench.iter(|| points.iter().map(|p| p.to_affine()).collect::<Vec<_>>())
        });
        group.bench_with_input(BenchmarkId::new("batch_normalize", size), &points, |bench, points| {
            bench.iter(|| {
                let mut batch = points.clone();
                bn254::G1::batch_normalize(&mut batch).unwrap();
                batch
            })
        });
    }

    group.finish();
}

fn bench_codec(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(4);
    let mut group = c.benchmark_group("Point Codec");

    let p = bls12_381::G1::random(&mut rng);
    let compressed = p.encode_compressed();
    let uncompressed = p.encode_uncompressed();

    group.bench_function("encode_compressed", |bench| bench.iter(|| black_box(p).encode_compressed()));
    group.bench_function("decode_compressed", |bench| {
        bench.iter(|| bls12_381::G1::decode_compressed(black_box(&compressed)))
    });
    group.bench_function("decode_uncompressed", |bench| {
        bench.iter(|| bls12_381::G1::decode_uncompressed(black_box(&uncompressed)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_group_law,
    bench_scalar_mul,
    bench_normalization,
    bench_codec,
);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hitshape::{
    broad::{Broadphase, Grid, Sweep},
    Aabb, Fp, Polygon, PolygonOptions, Vec2,
};

/// Deterministic scatter of small boxes over a square field.
fn scatter(count: usize, field: Fp) -> Vec<Aabb> {
    let mut seed: u32 = 0x9E37_79B9;
    let mut next = move || {
        // xorshift32
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        seed as Fp / u32::MAX as Fp
    };
    (0..count)
        .map(|_| {
            let (x, y) = (next() * field, next() * field);
            let (w, h) = (1.0 + next() * 4.0, 1.0 + next() * 4.0);
            Aabb::new(x, y, x + w, y + h)
        })
        .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut boxes = scatter(1000, 200.0);

    let mut sweep = Sweep::default();
    c.bench_function("sweep 1000", |b| b.iter(|| sweep.query(black_box(&mut boxes[..])).count()));
    let mut grid = Grid::new(8.0);
    c.bench_function("grid 1000", |b| b.iter(|| grid.query(black_box(&mut boxes[..])).count()));

    let normals = (0..8)
        .map(|i| {
            let a = i as Fp * std::f64::consts::FRAC_PI_4 as Fp;
            Vec2::new(a.cos(), a.sin())
        })
        .collect::<Vec<_>>();
    let mut poly = Polygon::from_normals(&normals, Vec2::new(10.0, 10.0), PolygonOptions::default()).unwrap();
    c.bench_function("global vertices hit", |b| b.iter(|| black_box(poly.global_vertices()[0])));
    c.bench_function("global vertices miss", |b| b.iter(|| {
        poly.transform.angle += 0.01;
        black_box(poly.global_vertices()[0])
    }));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vorowkt::{cell_record, extract_faces, BoundingBox, CellScratch, FaceStyle, VoronoiCell};

// A box cell clipped by a few dozen planes around its generator.
fn clipped_cell() -> VoronoiCell {
    let center = [50.0, 50.0, 50.0];
    let mut cell = VoronoiCell::new(0, center, &BoundingBox::new([0.0; 3], [100.0; 3]));
    let mut scratch = CellScratch::default();

    let n = 40;
    let golden = std::f64::consts::PI * (3.0 - 5f64.sqrt());
    for i in 0..n {
        let y = 1.0 - 2.0 * (i as f64 + 0.5) / n as f64;
        let r = (1.0 - y * y).sqrt();
        let theta = golden * i as f64;
        let normal = [r * theta.cos(), y, r * theta.sin()];
        let point = [center[0] + 20.0 * normal[0], center[1] + 20.0 * normal[1], center[2] + 20.0 * normal[2]];
        cell.clip(&point, &normal, i + 1, &mut scratch);
    }
    cell
}

fn benchmark_extract_faces(c: &mut Criterion) {
    let cell = clipped_cell();
    c.bench_function("extract_faces", |b| b.iter(|| extract_faces(black_box(&cell))));
}

fn benchmark_cell_record(c: &mut Criterion) {
    let cell = clipped_cell();
    c.bench_function("cell_record_triangles", |b| b.iter(|| cell_record(black_box(&cell), FaceStyle::Triangles)));
    c.bench_function("cell_record_polygons", |b| b.iter(|| cell_record(black_box(&cell), FaceStyle::Polygons)));
}

criterion_group!(benches, benchmark_extract_faces, benchmark_cell_record);
criterion_main!(benches);

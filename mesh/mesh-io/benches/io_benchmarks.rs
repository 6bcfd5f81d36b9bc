//! Benchmarks for mesh-io operations.
//!
//! Run with: cargo bench -p mesh-io
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p mesh-io -- --save-baseline main
//! 2. After changes: cargo bench -p mesh-io -- --baseline main

#![allow(missing_docs, clippy::expect_used)]

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use mesh_io::{SaveFormat, load_mesh, save_mesh};
use mesh_primitives::{CylinderParams, solid_cylinder};
use mesh_types::Mesh;
use tempfile::tempdir;

const FORMATS: [(SaveFormat, &str); 5] = [
    (SaveFormat::StlBinary, "stl_binary.stl"),
    (SaveFormat::StlAscii, "stl_ascii.stl"),
    (SaveFormat::PlyBinary, "ply_binary.ply"),
    (SaveFormat::PlyAscii, "ply_ascii.ply"),
    (SaveFormat::Obj, "obj.obj"),
];

/// A closed cylinder of `n` triangles.
fn create_cylinder(n: usize) -> Mesh<f64> {
    solid_cylinder(&CylinderParams::default().with_n(n)).expect("valid cylinder")
}

fn bench_io(c: &mut Criterion) {
    let mut group = c.benchmark_group("IO");

    let cylinder = create_cylinder(10_000); // 2500-point rings
    let temp_dir = tempdir().expect("failed to create temp dir");

    group.throughput(Throughput::Elements(cylinder.ntriangles() as u64));

    for (format, name) in FORMATS {
        let path = temp_dir.path().join(name);
        save_mesh(&cylinder, &path, format).expect("failed to save");

        group.bench_function(format!("load_{name}"), |b| {
            b.iter(|| load_mesh::<f64>(black_box(&path)));
        });
        group.bench_function(format!("save_{name}"), |b| {
            b.iter(|| save_mesh(black_box(&cylinder), black_box(&path), format));
        });
    }

    group.finish();
}

fn bench_precision(c: &mut Criterion) {
    let mut group = c.benchmark_group("Precision");

    let cylinder = create_cylinder(10_000);
    let temp_dir = tempdir().expect("failed to create temp dir");
    let path = temp_dir.path().join("cylinder.stl");
    save_mesh(&cylinder, &path, SaveFormat::StlBinary).expect("failed to save");

    group.bench_function("load_stl_f32", |b| {
        b.iter(|| load_mesh::<f32>(black_box(&path)));
    });
    group.bench_function("load_stl_f64", |b| {
        b.iter(|| load_mesh::<f64>(black_box(&path)));
    });

    group.finish();
}

criterion_group!(benches, bench_io, bench_precision);
criterion_main!(benches);

//! Cross-format round trips of generated meshes.
//!
//! Every save encoding is exercised through [`save_mesh`] and read back with
//! the extension-dispatching [`load_mesh`]. Text encodings print at the mesh
//! precision and must restore it exactly; binary encodings store `f32`.

#![allow(clippy::unwrap_used)]

use approx::assert_relative_eq;
use mesh_io::{MeshFormat, SaveFormat, load_mesh, save_mesh};
use mesh_primitives::{
    ConeParams, CubeParams, CylinderParams, EllipseParams, FrustumParams, TrapezoidParams,
    ellipse, hollow_cylinder, solid_cone, solid_cube, solid_frustum, trapezoid,
};
use mesh_types::{Aabb, Mesh};
use tempfile::tempdir;

const ALL_FORMATS: [SaveFormat; 5] = [
    SaveFormat::StlBinary,
    SaveFormat::StlAscii,
    SaveFormat::PlyBinary,
    SaveFormat::PlyAscii,
    SaveFormat::Obj,
];

/// A handful of generated meshes with awkward, non-dyadic coordinates.
fn sample_meshes() -> Vec<(&'static str, Mesh<f64>)> {
    vec![
        (
            "trapezoid",
            trapezoid(&TrapezoidParams::default().with_length(0.3).with_width(1.7).with_ratio(0.35))
                .unwrap(),
        ),
        (
            "ellipse",
            ellipse(&EllipseParams::default().with_length(2.2).with_width(0.7).with_n(24)).unwrap(),
        ),
        (
            "hollow_cylinder",
            hollow_cylinder(&CylinderParams::default().with_height(3.1).with_n(18)).unwrap(),
        ),
        (
            "solid_frustum",
            solid_frustum(&FrustumParams::default().with_ratio(0.6).with_n(12)).unwrap(),
        ),
        ("solid_cone", solid_cone(&ConeParams::default().with_n(10)).unwrap()),
        (
            "solid_cube",
            solid_cube(&CubeParams::default().with_length(0.1).with_height(7.0)).unwrap(),
        ),
    ]
}

fn path_for(dir: &std::path::Path, name: &str, format: SaveFormat) -> std::path::PathBuf {
    dir.join(format!("{name}_{format:?}.{}", format.mesh_format().extension()))
}

fn assert_close(loaded: &Mesh<f64>, original: &Mesh<f64>, epsilon: f64) {
    assert_eq!(loaded.ntriangles(), original.ntriangles());
    for (a, b) in loaded.vertices().iter().zip(original.vertices()) {
        assert_relative_eq!(a, b, epsilon = epsilon);
    }
}

#[test]
fn every_format_preserves_triangles_in_order() {
    let dir = tempdir().unwrap();
    for (name, mesh) in sample_meshes() {
        for format in ALL_FORMATS {
            let path = path_for(dir.path(), name, format);
            save_mesh(&mesh, &path, format).unwrap();
            let loaded: Mesh<f64> = load_mesh(&path).unwrap();
            assert_close(&loaded, &mesh, 1e-6);
            assert!(!loaded.has_normals(), "{name} {format:?}");
        }
    }
}

#[test]
fn text_formats_are_exact_in_double_precision() {
    let dir = tempdir().unwrap();
    for (name, mesh) in sample_meshes() {
        for format in [SaveFormat::StlAscii, SaveFormat::Obj] {
            let path = path_for(dir.path(), name, format);
            save_mesh(&mesh, &path, format).unwrap();
            let loaded: Mesh<f64> = load_mesh(&path).unwrap();
            assert_eq!(loaded, mesh, "{name} {format:?}");
        }
    }
}

#[test]
fn single_precision_is_exact_in_every_format() {
    let dir = tempdir().unwrap();
    for (name, mesh) in sample_meshes() {
        let single: Mesh<f32> = mesh.convert();
        for format in ALL_FORMATS {
            let path = path_for(dir.path(), name, format);
            save_mesh(&single, &path, format).unwrap();
            let loaded: Mesh<f32> = load_mesh(&path).unwrap();
            assert_eq!(loaded, single, "{name} {format:?}");
        }
    }
}

#[test]
fn bounds_survive_format_conversion() {
    let dir = tempdir().unwrap();
    let mesh = solid_frustum(&FrustumParams::default().with_length(2.0).with_height(4.0)).unwrap();
    let expected = Aabb::from_mesh(&mesh).unwrap();

    // STL -> PLY -> OBJ chain
    let stl = dir.path().join("chain.stl");
    save_mesh(&mesh, &stl, SaveFormat::StlBinary).unwrap();
    let ply = dir.path().join("chain.ply");
    save_mesh(&load_mesh::<f64>(&stl).unwrap(), &ply, SaveFormat::PlyAscii).unwrap();
    let obj = dir.path().join("chain.obj");
    save_mesh(&load_mesh::<f64>(&ply).unwrap(), &obj, SaveFormat::Obj).unwrap();

    let bounds = Aabb::from_mesh(&load_mesh::<f64>(&obj).unwrap()).unwrap();
    assert_relative_eq!(bounds.min, expected.min, epsilon = 1e-6);
    assert_relative_eq!(bounds.max, expected.max, epsilon = 1e-6);
}

#[test]
fn empty_mesh_roundtrip() {
    let dir = tempdir().unwrap();
    for format in ALL_FORMATS {
        let path = path_for(dir.path(), "empty", format);
        save_mesh(&Mesh::<f64>::new(), &path, format).unwrap();
        let loaded: Mesh<f64> = load_mesh(&path).unwrap();
        assert!(loaded.is_empty(), "{format:?}");
    }
}

#[test]
fn msh_file_is_dispatched_by_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("square.MSH");
    std::fs::write(
        &path,
        "$MeshFormat\n2.2 0 8\n$EndMeshFormat\n\
         $Nodes\n4\n1 0 0 0\n2 2 0 0\n3 2 2 0\n4 0 2 0\n$EndNodes\n\
         $Elements\n1\n1 3 2 0 1 1 2 3 4\n$EndElements\n",
    )
    .unwrap();

    assert_eq!(MeshFormat::from_path(&path), Some(MeshFormat::Msh));
    let mesh: Mesh<f32> = load_mesh(&path).unwrap();
    assert_eq!(mesh.ntriangles(), 2);
    assert_relative_eq!(mesh.area(), 4.0);
}

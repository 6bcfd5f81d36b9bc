//! Assemble a small plant from primitives and check the merged scene.

#![allow(clippy::unwrap_used)]

use approx::assert_relative_eq;
use mesh_primitives::{CylinderParams, EllipseParams, ellipse, solid_cylinder};
use mesh_scene::{Attribute, Scene, SceneError};
use mesh_transform::MeshTransform;
use mesh_types::{Aabb, Mesh, Vector3};

#[derive(Debug, Clone, PartialEq)]
struct Optics {
    reflectance: f64,
    transmittance: f64,
}

type PlantScene = Scene<f64, [u8; 3], Optics>;

fn stem() -> Mesh<f64> {
    let mut mesh =
        solid_cylinder(&CylinderParams::default().with_length(0.1).with_width(0.1).with_height(2.0))
            .unwrap();
    mesh.translate(&Vector3::new(0.0, 0.0, 1.0));
    mesh
}

fn leaf(height: f64, angle: f64) -> Mesh<f64> {
    let mut mesh = ellipse(&EllipseParams::default().with_length(0.6).with_width(0.2)).unwrap();
    mesh.translate(&Vector3::new(0.35, 0.0, 0.0));
    mesh.rotate_z(angle);
    mesh.translate(&Vector3::new(0.0, 0.0, height));
    mesh
}

fn leaf_optics() -> Optics {
    Optics {
        reflectance: 0.1,
        transmittance: 0.05,
    }
}

#[test]
fn leaves_share_one_table_after_merge() {
    let mut stem_scene = PlantScene::new();
    stem_scene
        .add(stem(), Some([90, 60, 20]), Some(Optics { reflectance: 0.3, transmittance: 0.0 }))
        .unwrap();

    let leaves: Vec<PlantScene> = (0..3)
        .map(|i| {
            let mut scene = PlantScene::new();
            let k = f64::from(i);
            scene
                .add(leaf(0.5 + 0.5 * k, 2.0 * k), Some([20, 140, 30]), Some(leaf_optics()))
                .unwrap();
            scene
        })
        .collect();

    let mut all = vec![stem_scene.clone()];
    all.extend(leaves);
    let plant = Scene::merge(&all).unwrap();

    let stem_triangles = stem_scene.ntriangles();
    assert_eq!(plant.ntriangles(), stem_triangles + 3 * 20);
    assert_eq!(plant.colors().len(), plant.ntriangles());
    assert_eq!(plant.materials().len(), 4);

    // Every leaf triangle points at its own leaf entry
    for (t, &id) in plant.material_ids().iter().enumerate() {
        let expected = if t < stem_triangles { 0 } else { 1 + (t - stem_triangles) / 20 };
        assert_eq!(id, expected);
    }
    assert_eq!(plant.material_of(plant.ntriangles() - 1), Some(&leaf_optics()));

    let bounds = Aabb::from_mesh(plant.mesh()).unwrap();
    assert_relative_eq!(bounds.min.z, 0.0, epsilon = 1e-12);
    assert_relative_eq!(bounds.max.z, 2.0, epsilon = 1e-12);
}

#[test]
fn incremental_and_merged_scenes_agree() {
    let mut incremental = PlantScene::new();
    incremental.add(stem(), Some([1, 1, 1]), Some(leaf_optics())).unwrap();
    incremental.add(leaf(1.0, 0.0), Some([2, 2, 2]), Some(leaf_optics())).unwrap();

    let mut a = PlantScene::new();
    a.add(stem(), Some([1, 1, 1]), Some(leaf_optics())).unwrap();
    let mut b = PlantScene::new();
    b.add(leaf(1.0, 0.0), Some([2, 2, 2]), Some(leaf_optics())).unwrap();

    assert_eq!(Scene::merge([&a, &b]).unwrap(), incremental);
}

#[test]
fn uncolored_leaf_cannot_join_colored_stem() {
    let mut colored = PlantScene::new();
    colored.add(stem(), Some([1, 1, 1]), None).unwrap();
    let plain = PlantScene::from_mesh(leaf(1.0, 0.0));

    let err = Scene::merge([&colored, &plain]).unwrap_err();
    assert_eq!(
        err,
        SceneError::MixedAttribute {
            attribute: Attribute::Colors,
            scene: 1,
        }
    );
}

#[test]
fn into_parts_returns_aligned_arrays() {
    let mut scene = PlantScene::new();
    scene.add(leaf(0.0, 0.0), Some([0, 255, 0]), Some(leaf_optics())).unwrap();
    let (mesh, colors, ids, materials) = scene.into_parts();
    assert_eq!(mesh.ntriangles(), colors.len());
    assert_eq!(ids.len(), colors.len());
    assert_eq!(materials, vec![leaf_optics()]);
}

// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Lofted cylinder construction tests

use anyhow::Result;
use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};
use paramesh::geometry::mesh_utils::validate_mesh;
use paramesh::geometry::{
    analytics::analyze, BaseCylinder, Circle, CylinderConfig, Ellipse, LocalFrame,
    RandomModulation, SineWaveModulation,
};

#[test]
fn test_circle_to_ellipse_with_sine_waves() -> Result<()> {
    let mut cylinder = BaseCylinder::new(
        LocalFrame::world(),
        Circle::new(10.0),
        Ellipse::new(20.0, 10.0, 0.0),
        20.0,
    )
    .with_config(CylinderConfig { voxel_size: 1.0 })?;
    cylinder.set_surface_modulation(SineWaveModulation::new(30, 2), 1.0)?;

    let (n_sub_u, n_sub_v) = cylinder.subdivisions();
    let mesh = cylinder.construct();

    println!(
        "Loft: {}x{} subdivisions, {} vertices, {} triangles",
        n_sub_u,
        n_sub_v,
        mesh.vertex_count(),
        mesh.triangle_count()
    );

    assert_eq!(mesh.vertex_count(), 2 + n_sub_u * (n_sub_v + 1));
    assert_eq!(mesh.triangle_count(), 2 * n_sub_u * (n_sub_v + 1));

    let validation = validate_mesh(&mesh);
    assert!(validation.is_closed);
    assert!(validation.is_manifold);
    assert!(validation.is_consistently_oriented);

    // The elliptic top reaches further out than the circular bottom
    let bbox = mesh.bounding_box();
    assert!(bbox.max.x > 20.0);
    assert_relative_eq!(bbox.min.z, -10.0, epsilon = 1e-9);
    assert_relative_eq!(bbox.max.z, 10.0, epsilon = 1e-9);

    Ok(())
}

#[test]
fn test_cylinder_along_frame_axis() -> Result<()> {
    // Local Z along world X, local X along world Y
    let frame = LocalFrame::new(Point3::origin(), Vector3::x(), Vector3::y());
    let mesh = BaseCylinder::circular(frame, 2.0, 6.0).construct();

    let bbox = mesh.bounding_box();
    assert_relative_eq!(bbox.min.x, -3.0, epsilon = 1e-9);
    assert_relative_eq!(bbox.max.x, 3.0, epsilon = 1e-9);
    assert_relative_eq!(bbox.max.y, 2.0, epsilon = 1e-9);

    for vertex in &mesh.vertices {
        let radial = (vertex.position.y.powi(2) + vertex.position.z.powi(2)).sqrt();
        assert!(radial <= 2.0 + 1e-9);
    }

    Ok(())
}

#[test]
fn test_volume_approaches_cylinder() -> Result<()> {
    let (r, h) = (5.0, 10.0);
    let mesh = BaseCylinder::circular(LocalFrame::world(), r, h)
        .with_config(CylinderConfig { voxel_size: 0.1 })?
        .construct();
    let stats = analyze(&mesh);

    let expected = std::f64::consts::PI * r * r * h;
    assert!(
        (stats.volume - expected).abs() < expected * 0.01,
        "Volume {} not close to {}",
        stats.volume,
        expected
    );
    assert!(stats.is_watertight);

    Ok(())
}

#[test]
fn test_seeded_random_is_reproducible() -> Result<()> {
    let build = |seed| -> Result<Vec<Point3<f64>>> {
        let mut cylinder = BaseCylinder::circular(LocalFrame::world(), 3.0, 3.0);
        cylinder.set_surface_modulation(RandomModulation::with_seed(1.0, seed), 0.5)?;
        Ok(cylinder
            .construct()
            .vertices
            .iter()
            .map(|v| v.position)
            .collect())
    };

    assert_eq!(build(7)?, build(7)?);
    assert_ne!(build(7)?, build(8)?);

    Ok(())
}

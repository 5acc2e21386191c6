// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh comparison for export round-trips and regression checks

use crate::geometry::analytics::signed_volume;
use crate::geometry::Mesh;
use serde::{Deserialize, Serialize};

/// Result of mesh comparison
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeshComparison {
    pub vertex_count_match: bool,
    pub triangle_count_match: bool,
    pub bbox_match: bool,
    pub volume_match: bool,
    pub vertex_count_diff: i64,
    pub triangle_count_diff: i64,
    pub volume_diff: f64,
    pub tolerance: f64,
    pub passed: bool,
}

/// Compare two meshes for equivalence.
///
/// Vertex counts are reported but do not affect `passed`, since formats such
/// as STL do not preserve vertex sharing.
pub fn compare_meshes(mesh_a: &Mesh, mesh_b: &Mesh, tolerance: f64) -> MeshComparison {
    let vertex_count_diff = mesh_a.vertex_count() as i64 - mesh_b.vertex_count() as i64;
    let triangle_count_diff = mesh_a.triangle_count() as i64 - mesh_b.triangle_count() as i64;
    let bbox_match = mesh_a
        .bounding_box()
        .approx_eq(&mesh_b.bounding_box(), tolerance);

    let volume_a = signed_volume(mesh_a);
    let volume_diff = volume_a - signed_volume(mesh_b);
    // Volume scales with size, so compare relative to the larger mesh
    let volume_match = volume_diff.abs() <= tolerance * volume_a.abs().max(1.0);

    MeshComparison {
        vertex_count_match: vertex_count_diff == 0,
        triangle_count_match: triangle_count_diff == 0,
        bbox_match,
        volume_match,
        vertex_count_diff,
        triangle_count_diff,
        volume_diff,
        tolerance,
        passed: triangle_count_diff == 0 && bbox_match && volume_match,
    }
}

/// Compare triangle count with percentage tolerance
pub fn compare_triangle_count_with_tolerance(
    mesh_a: &Mesh,
    mesh_b: &Mesh,
    tolerance_percent: f64,
) -> bool {
    let count_a = mesh_a.triangle_count() as f64;
    let count_b = mesh_b.triangle_count() as f64;

    if count_a == 0.0 && count_b == 0.0 {
        return true;
    }

    let percent_diff = (count_a - count_b).abs() / count_a.max(count_b) * 100.0;
    percent_diff <= tolerance_percent
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{BaseBox, BaseCylinder, BoxConfig, BoxModulations, LocalFrame};
    use nalgebra::Vector3;

    fn cube(edge: f64) -> Mesh {
        let config = BoxConfig {
            size: Vector3::new(edge, edge, edge),
            subdiv_u: 4,
            subdiv_v: 4,
            ..Default::default()
        };
        BaseBox::new(config)
            .construct(&BoxModulations::default())
            .unwrap()
    }

    #[test]
    fn test_compare_identical_meshes() {
        let comparison = compare_meshes(&cube(10.0), &cube(10.0), 0.001);
        assert!(comparison.passed);
        assert!(comparison.vertex_count_match);
        assert!(comparison.triangle_count_match);
        assert!(comparison.bbox_match);
        assert!(comparison.volume_match);
    }

    #[test]
    fn test_compare_different_sizes() {
        let comparison = compare_meshes(&cube(10.0), &cube(20.0), 0.001);
        assert!(!comparison.bbox_match);
        assert!(!comparison.volume_match);
        assert!(!comparison.passed);
    }

    #[test]
    fn test_triangle_count_tolerance() {
        let fine = BaseCylinder::circular(LocalFrame::world(), 4.0, 4.0).construct();
        let coarse = cube(4.0);

        assert!(!compare_triangle_count_with_tolerance(&fine, &coarse, 0.0));
        assert!(compare_triangle_count_with_tolerance(&fine, &coarse, 100.0));
    }
}

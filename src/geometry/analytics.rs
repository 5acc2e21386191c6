// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry analytics and statistics

use super::mesh_utils::{is_closed, is_consistently_oriented};
use super::{BoundingBox, Mesh, Triangle};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Geometry statistics and analytics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryStats {
    /// Enclosed volume, positive when triangles face outward
    pub signed_volume: f64,
    /// Absolute enclosed volume
    pub volume: f64,
    pub surface_area: f64,
    pub bbox: BoundingBox,
    /// Average vertex position
    pub centroid: Point3<f64>,
    pub vertex_count: usize,
    pub triangle_count: usize,
    /// Every edge shared by exactly two triangles
    pub is_watertight: bool,
    pub is_oriented: bool,
}

impl GeometryStats {
    pub fn empty() -> Self {
        Self {
            signed_volume: 0.0,
            volume: 0.0,
            surface_area: 0.0,
            bbox: BoundingBox::empty(),
            centroid: Point3::origin(),
            vertex_count: 0,
            triangle_count: 0,
            is_watertight: false,
            is_oriented: false,
        }
    }

    /// Pretty print statistics
    pub fn print(&self) {
        let size = if self.bbox.is_empty() {
            Vector3::zeros()
        } else {
            self.bbox.size()
        };

        println!("╔══════════════════════════════════════════════════════════╗");
        println!("║              GEOMETRY ANALYTICS                          ║");
        println!("╠══════════════════════════════════════════════════════════╣");
        println!("║ Volume:          {:>12.4}                            ║", self.volume);
        println!("║ Surface Area:    {:>12.4}                            ║", self.surface_area);
        println!(
            "║ Centroid:        ({:>8.2}, {:>8.2}, {:>8.2})         ║",
            self.centroid.x, self.centroid.y, self.centroid.z
        );
        println!("║                                                          ║");
        println!("║ Bounding Box:                                            ║");
        println!(
            "║   Min: ({:>8.2}, {:>8.2}, {:>8.2})                     ║",
            self.bbox.min.x, self.bbox.min.y, self.bbox.min.z
        );
        println!(
            "║   Max: ({:>8.2}, {:>8.2}, {:>8.2})                     ║",
            self.bbox.max.x, self.bbox.max.y, self.bbox.max.z
        );
        println!(
            "║   Size: {:>8.2} × {:>8.2} × {:>8.2}                    ║",
            size.x, size.y, size.z
        );
        println!("║                                                          ║");
        println!("║ Vertices:        {:>10}                              ║", self.vertex_count);
        println!("║ Triangles:       {:>10}                              ║", self.triangle_count);
        println!(
            "║ Watertight:      {:>10}                              ║",
            if self.is_watertight { "Yes" } else { "No" }
        );
        println!(
            "║ Oriented:        {:>10}                              ║",
            if self.is_oriented { "Yes" } else { "No" }
        );
        println!("╚══════════════════════════════════════════════════════════╝");
    }
}

/// Analyze mesh geometry and compute statistics
pub fn analyze(mesh: &Mesh) -> GeometryStats {
    if mesh.vertices.is_empty() || mesh.triangles.is_empty() {
        return GeometryStats::empty();
    }

    let signed_volume = signed_volume(mesh);

    GeometryStats {
        signed_volume,
        volume: signed_volume.abs(),
        surface_area: surface_area(mesh),
        bbox: mesh.bounding_box(),
        centroid: centroid(mesh),
        vertex_count: mesh.vertex_count(),
        triangle_count: mesh.triangle_count(),
        is_watertight: is_closed(mesh),
        is_oriented: is_consistently_oriented(mesh),
    }
}

fn corners(mesh: &Mesh, triangle: &Triangle) -> [Point3<f64>; 3] {
    triangle.indices.map(|i| mesh.vertices[i].position)
}

/// Sum of signed tetrahedron volumes against the origin
pub fn signed_volume(mesh: &Mesh) -> f64 {
    mesh.triangles
        .iter()
        .map(|triangle| {
            let [v0, v1, v2] = corners(mesh, triangle);
            v0.coords.dot(&v1.coords.cross(&v2.coords)) / 6.0
        })
        .sum()
}

pub fn surface_area(mesh: &Mesh) -> f64 {
    mesh.triangles
        .iter()
        .map(|triangle| {
            let [v0, v1, v2] = corners(mesh, triangle);
            (v1 - v0).cross(&(v2 - v0)).norm() / 2.0
        })
        .sum()
}

fn centroid(mesh: &Mesh) -> Point3<f64> {
    let sum: Vector3<f64> = mesh.vertices.iter().map(|v| v.position.coords).sum();
    Point3::from(sum / mesh.vertices.len() as f64)
}

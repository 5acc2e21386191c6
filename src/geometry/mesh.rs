// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Indexed mesh buffer and the sink contract used by the builders

use super::BoundingBox;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Append-only indexed vertex/face buffer.
///
/// Builders only ever hold the indices returned by [`MeshSink::add_vertex`];
/// connectivity is expressed through those handles, never raw coordinates.
pub trait MeshSink {
    /// Append a vertex and return its index
    fn add_vertex(&mut self, position: Point3<f64>) -> usize;

    /// Append a triangle referencing existing vertex indices
    fn add_triangle(&mut self, a: usize, b: usize, c: usize);

    /// Append a quad `a b c d` (counter-clockwise seen from its front side)
    fn add_quad(&mut self, a: usize, b: usize, c: usize, d: usize) {
        self.add_triangle(a, b, c);
        self.add_triangle(a, c, d);
    }
}

/// Vertex with position and normal
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Point3<f64>,
    pub normal: Vector3<f64>,
}

impl Vertex {
    pub fn new(position: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self { position, normal }
    }
}

/// Triangle defined by three vertex indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triangle {
    pub indices: [usize; 3],
}

impl Triangle {
    pub fn new(indices: [usize; 3]) -> Self {
        Self { indices }
    }
}

/// Triangular mesh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Add a vertex with an explicit normal and return its index
    pub fn push_vertex(&mut self, vertex: Vertex) -> usize {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    /// Add a triangle
    pub fn push_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Position of the vertex at `index`
    pub fn position(&self, index: usize) -> Point3<f64> {
        self.vertices[index].position
    }

    /// Compute bounding box
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_vertices(&self.vertices)
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Append another mesh, offsetting its indices
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.vertices.len();
        self.vertices.extend_from_slice(&other.vertices);

        for triangle in &other.triangles {
            self.triangles.push(Triangle::new([
                triangle.indices[0] + offset,
                triangle.indices[1] + offset,
                triangle.indices[2] + offset,
            ]));
        }
    }

    /// Remove orphaned vertices (vertices not referenced by any triangle)
    /// Returns the number of vertices removed
    pub fn remove_orphaned_vertices(&mut self) -> usize {
        if self.triangles.is_empty() {
            let removed = self.vertices.len();
            self.vertices.clear();
            return removed;
        }

        let mut used_vertices = vec![false; self.vertices.len()];
        for triangle in &self.triangles {
            for &idx in &triangle.indices {
                used_vertices[idx] = true;
            }
        }

        // old_index -> new_index, order preserved
        let mut new_indices = vec![0; self.vertices.len()];
        let mut new_vertices = Vec::with_capacity(self.vertices.len());

        for (old_idx, &used) in used_vertices.iter().enumerate() {
            if used {
                new_indices[old_idx] = new_vertices.len();
                new_vertices.push(self.vertices[old_idx]);
            }
        }

        for triangle in &mut self.triangles {
            for idx in &mut triangle.indices {
                *idx = new_indices[*idx];
            }
        }

        let removed = self.vertices.len() - new_vertices.len();
        self.vertices = new_vertices;
        removed
    }

    /// Recompute vertex normals from triangle geometry
    /// Face normals are area-weighted and averaged at shared vertices
    pub fn recompute_normals(&mut self) {
        if self.vertices.is_empty() || self.triangles.is_empty() {
            return;
        }

        let mut normal_sums: Vec<Vector3<f64>> = vec![Vector3::zeros(); self.vertices.len()];

        for triangle in &self.triangles {
            let v0 = self.vertices[triangle.indices[0]].position;
            let v1 = self.vertices[triangle.indices[1]].position;
            let v2 = self.vertices[triangle.indices[2]].position;

            // Unnormalized cross product is already area weighted
            let face_normal = (v1 - v0).cross(&(v2 - v0));
            if face_normal.norm() > 1e-12 {
                for &idx in &triangle.indices {
                    normal_sums[idx] += face_normal;
                }
            }
        }

        for (vertex, sum) in self.vertices.iter_mut().zip(normal_sums) {
            vertex.normal = sum
                .try_normalize(1e-12)
                .unwrap_or_else(|| Vector3::new(0.0, 0.0, 1.0));
        }
    }

    /// Unit normal of a triangle from its winding, `None` when degenerate
    pub fn triangle_normal(&self, triangle: &Triangle) -> Option<Vector3<f64>> {
        let v0 = self.vertices[triangle.indices[0]].position;
        let v1 = self.vertices[triangle.indices[1]].position;
        let v2 = self.vertices[triangle.indices[2]].position;
        (v1 - v0).cross(&(v2 - v0)).try_normalize(1e-12)
    }
}

impl MeshSink for Mesh {
    fn add_vertex(&mut self, position: Point3<f64>) -> usize {
        self.push_vertex(Vertex::new(position, Vector3::zeros()))
    }

    fn add_triangle(&mut self, a: usize, b: usize, c: usize) {
        self.push_triangle(Triangle::new([a, b, c]));
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad() -> Mesh {
        let mut mesh = Mesh::new();
        let a = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        let b = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        let c = mesh.add_vertex(Point3::new(1.0, 1.0, 0.0));
        let d = mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
        mesh.add_quad(a, b, c, d);
        mesh
    }

    #[test]
    fn test_add_vertex_returns_sequential_indices() {
        let mut mesh = Mesh::new();
        assert_eq!(mesh.add_vertex(Point3::origin()), 0);
        assert_eq!(mesh.add_vertex(Point3::new(1.0, 0.0, 0.0)), 1);
        assert_eq!(mesh.vertex_count(), 2);
    }

    #[test]
    fn test_quad_is_split_into_two_triangles() {
        let mesh = unit_quad();
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.triangles[0].indices, [0, 1, 2]);
        assert_eq!(mesh.triangles[1].indices, [0, 2, 3]);

        for triangle in &mesh.triangles {
            let normal = mesh.triangle_normal(triangle).unwrap();
            assert!((normal - Vector3::z()).norm() < 1e-12);
        }
    }

    #[test]
    fn test_recompute_normals() {
        let mut mesh = unit_quad();
        mesh.recompute_normals();

        assert!(mesh
            .vertices
            .iter()
            .all(|v| (v.normal - Vector3::z()).norm() < 1e-12));
    }

    #[test]
    fn test_remove_orphaned_vertices() {
        let mut mesh = unit_quad();
        mesh.add_vertex(Point3::new(5.0, 5.0, 5.0));
        let e = mesh.add_vertex(Point3::new(2.0, 0.0, 0.0));
        mesh.add_triangle(1, e, 2);

        let removed = mesh.remove_orphaned_vertices();

        assert_eq!(removed, 1);
        assert_eq!(mesh.vertex_count(), 5);
        assert_eq!(mesh.triangles[2].indices, [1, 4, 2]);
        assert_eq!(mesh.position(4), Point3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_merge_offsets_indices() {
        let mut mesh = unit_quad();
        let other = unit_quad();
        mesh.merge(&other);

        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangles[2].indices, [4, 5, 6]);
    }
}

// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Topology checks for generated meshes

use super::{Mesh, Triangle};
use std::collections::{HashMap, HashSet};

/// Undirected edge, smaller index first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub v0: usize,
    pub v1: usize,
}

impl Edge {
    pub fn new(v0: usize, v1: usize) -> Self {
        if v0 < v1 {
            Self { v0, v1 }
        } else {
            Self { v0: v1, v1: v0 }
        }
    }
}

fn directed_edges(triangle: &Triangle) -> [(usize, usize); 3] {
    let [a, b, c] = triangle.indices;
    [(a, b), (b, c), (c, a)]
}

/// Number of triangles using each undirected edge
pub fn build_edge_counts(mesh: &Mesh) -> HashMap<Edge, u32> {
    let mut edge_counts: HashMap<Edge, u32> = HashMap::new();

    for triangle in &mesh.triangles {
        for (a, b) in directed_edges(triangle) {
            *edge_counts.entry(Edge::new(a, b)).or_insert(0) += 1;
        }
    }

    edge_counts
}

/// Each edge shared by at most 2 triangles
pub fn is_manifold(mesh: &Mesh) -> bool {
    build_edge_counts(mesh).values().all(|&count| count <= 2)
}

/// Each edge shared by exactly 2 triangles
pub fn is_closed(mesh: &Mesh) -> bool {
    build_edge_counts(mesh).values().all(|&count| count == 2)
}

/// Neighbouring triangles traverse their shared edge in opposite directions.
///
/// Holds for any mesh whose faces are all wound the same way relative to
/// the surface, which is what the builders guarantee.
pub fn is_consistently_oriented(mesh: &Mesh) -> bool {
    let mut seen = HashSet::new();
    mesh.triangles
        .iter()
        .flat_map(directed_edges)
        .all(|edge| seen.insert(edge))
}

/// Edges used by exactly one triangle
pub fn find_boundary_edges(mesh: &Mesh) -> HashSet<Edge> {
    build_edge_counts(mesh)
        .into_iter()
        .filter(|&(_, count)| count == 1)
        .map(|(edge, _)| edge)
        .collect()
}

/// Every triangle references valid vertices and has non-zero area
pub fn has_valid_triangles(mesh: &Mesh) -> bool {
    mesh.triangles.iter().all(|triangle| {
        triangle.indices.iter().all(|&i| i < mesh.vertices.len())
            && mesh.triangle_normal(triangle).is_some()
    })
}

/// Summary of the topology checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshValidation {
    pub is_manifold: bool,
    pub is_closed: bool,
    pub is_consistently_oriented: bool,
    pub has_valid_triangles: bool,
    pub edge_count: usize,
    pub boundary_edge_count: usize,
}

pub fn validate_mesh(mesh: &Mesh) -> MeshValidation {
    let edge_counts = build_edge_counts(mesh);
    let boundary_edge_count = edge_counts.values().filter(|&&count| count == 1).count();

    MeshValidation {
        is_manifold: edge_counts.values().all(|&count| count <= 2),
        is_closed: edge_counts.values().all(|&count| count == 2),
        is_consistently_oriented: is_consistently_oriented(mesh),
        has_valid_triangles: has_valid_triangles(mesh),
        edge_count: edge_counts.len(),
        boundary_edge_count,
    }
}

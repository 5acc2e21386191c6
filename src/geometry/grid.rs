// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Subdivided face grids with shared-edge stitching
//!
//! A [`Grid`] samples a [`Face`] on a regular `U × V` lattice and records the
//! mesh index of every sample. Grids of adjacent faces are joined by copying
//! boundary indices from one grid into the other, so the seam vertices are
//! shared instead of duplicated. Every replacement has to happen before any
//! grid is constructed.

use super::{Face, MeshSink, SurfaceModulation};
use crate::error::{Error, Result};
use log::trace;
use std::fmt;

/// Traversal direction of an edge relative to its face normal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

impl Winding {
    pub fn flipped(self) -> Self {
        match self {
            Winding::Clockwise => Winding::CounterClockwise,
            Winding::CounterClockwise => Winding::Clockwise,
        }
    }
}

/// One of the four boundaries of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeSide {
    Top,
    Bottom,
    Left,
    Right,
}

impl fmt::Display for EdgeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EdgeSide::Top => "top",
            EdgeSide::Bottom => "bottom",
            EdgeSide::Left => "left",
            EdgeSide::Right => "right",
        };
        f.write_str(name)
    }
}

/// Ordered run of boundary vertex indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeSequence {
    indices: Vec<usize>,
    winding: Winding,
}

impl EdgeSequence {
    pub fn new(indices: Vec<usize>, winding: Winding) -> Self {
        Self { indices, winding }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn winding(&self) -> Winding {
        self.winding
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Same edge walked the other way
    pub fn reversed(&self) -> Self {
        let mut indices = self.indices.clone();
        indices.reverse();
        Self {
            indices,
            winding: self.winding.flipped(),
        }
    }
}

/// `U × V` lattice of vertex indices over a face.
///
/// `u` runs from the left edge to the right edge, `v` from the bottom edge to
/// the top edge.
#[derive(Debug, Clone)]
pub struct Grid {
    u_count: usize,
    v_count: usize,
    indices: Vec<usize>,
}

impl Grid {
    /// Sample `face` and push every lattice point into `sink`.
    ///
    /// Each point is displaced along the face normal by
    /// `modulation.offset(u, v)`, with `u` and `v` normalized to `[0, 1]`.
    /// Subdivision counts below 2 are raised to 2.
    pub fn new<S, M>(
        face: &Face,
        sink: &mut S,
        subdiv_u: usize,
        subdiv_v: usize,
        modulation: &M,
    ) -> Self
    where
        S: MeshSink + ?Sized,
        M: SurfaceModulation + ?Sized,
    {
        let u_count = subdiv_u.max(2);
        let v_count = subdiv_v.max(2);
        let normal = face.normal();

        let mut indices = Vec::with_capacity(u_count * v_count);
        for u in 0..u_count {
            let tu = u as f64 / (u_count - 1) as f64;
            for v in 0..v_count {
                let tv = v as f64 / (v_count - 1) as f64;
                let point = face.point_at(tu, tv) + normal * modulation.offset(tu, tv);
                indices.push(sink.add_vertex(point));
            }
        }

        trace!("grid {}x{} sampled", u_count, v_count);

        Self {
            u_count,
            v_count,
            indices,
        }
    }

    /// `(U, V)` lattice dimensions
    pub fn dims(&self) -> (usize, usize) {
        (self.u_count, self.v_count)
    }

    /// Mesh index stored at lattice position `(u, v)`
    pub fn index(&self, u: usize, v: usize) -> usize {
        self.indices[self.slot(u, v)]
    }

    fn slot(&self, u: usize, v: usize) -> usize {
        u * self.v_count + v
    }

    /// Bottom boundary, bottom-right to bottom-left
    pub fn bottom_edge(&self) -> EdgeSequence {
        let indices = (0..self.u_count).rev().map(|u| self.index(u, 0)).collect();
        EdgeSequence::new(indices, Winding::Clockwise)
    }

    /// Right boundary, bottom-right to top-right
    pub fn right_edge(&self) -> EdgeSequence {
        let u = self.u_count - 1;
        let indices = (0..self.v_count).map(|v| self.index(u, v)).collect();
        EdgeSequence::new(indices, Winding::CounterClockwise)
    }

    /// Top boundary, top-left to top-right
    pub fn top_edge(&self) -> EdgeSequence {
        let v = self.v_count - 1;
        let indices = (0..self.u_count).map(|u| self.index(u, v)).collect();
        EdgeSequence::new(indices, Winding::Clockwise)
    }

    /// Left boundary, bottom-left to top-left
    pub fn left_edge(&self) -> EdgeSequence {
        let indices = (0..self.v_count).map(|v| self.index(0, v)).collect();
        EdgeSequence::new(indices, Winding::Clockwise)
    }

    /// Current sequence of the given boundary
    pub fn edge(&self, side: EdgeSide) -> EdgeSequence {
        match side {
            EdgeSide::Top => self.top_edge(),
            EdgeSide::Bottom => self.bottom_edge(),
            EdgeSide::Left => self.left_edge(),
            EdgeSide::Right => self.right_edge(),
        }
    }

    /// Lattice positions of a boundary in counter-clockwise order
    fn ccw_slots(&self, side: EdgeSide) -> Vec<usize> {
        let (last_u, last_v) = (self.u_count - 1, self.v_count - 1);
        match side {
            EdgeSide::Top => (0..self.u_count)
                .rev()
                .map(|u| self.slot(u, last_v))
                .collect(),
            EdgeSide::Bottom => (0..self.u_count).map(|u| self.slot(u, 0)).collect(),
            EdgeSide::Right => (0..self.v_count).map(|v| self.slot(last_u, v)).collect(),
            EdgeSide::Left => (0..self.v_count)
                .rev()
                .map(|v| self.slot(0, v))
                .collect(),
        }
    }

    /// Overwrite a boundary with the indices of a neighbouring grid's edge.
    ///
    /// The neighbour walks a shared seam in the opposite direction, so the
    /// sequence must be clockwise in its own face; it is written into this
    /// grid counter-clockwise. Nothing is written when the call fails.
    pub fn replace_edge(&mut self, side: EdgeSide, edge: &EdgeSequence) -> Result<()> {
        let slots = self.ccw_slots(side);
        if slots.len() != edge.len() {
            return Err(Error::EdgeLengthMismatch {
                side,
                expected: slots.len(),
                actual: edge.len(),
            });
        }
        if edge.winding() != Winding::Clockwise {
            return Err(Error::WindingMismatch { side });
        }

        for (slot, &index) in slots.into_iter().zip(edge.indices()) {
            self.indices[slot] = index;
        }

        trace!("replaced {} edge ({} indices)", side, edge.len());
        Ok(())
    }

    pub fn replace_top_edge(&mut self, edge: &EdgeSequence) -> Result<()> {
        self.replace_edge(EdgeSide::Top, edge)
    }

    pub fn replace_bottom_edge(&mut self, edge: &EdgeSequence) -> Result<()> {
        self.replace_edge(EdgeSide::Bottom, edge)
    }

    pub fn replace_left_edge(&mut self, edge: &EdgeSequence) -> Result<()> {
        self.replace_edge(EdgeSide::Left, edge)
    }

    pub fn replace_right_edge(&mut self, edge: &EdgeSequence) -> Result<()> {
        self.replace_edge(EdgeSide::Right, edge)
    }

    /// Emit one quad per cell, facing along the face normal
    pub fn construct<S: MeshSink + ?Sized>(&self, sink: &mut S) {
        for u in 0..self.u_count - 1 {
            for v in 0..self.v_count - 1 {
                sink.add_quad(
                    self.index(u + 1, v),
                    self.index(u + 1, v + 1),
                    self.index(u, v + 1),
                    self.index(u, v),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::modulation::from_fn;
    use crate::geometry::{Mesh, NoopModulation};
    use approx::assert_relative_eq;
    use nalgebra::{Point3, Vector3};

    /// Square in the XY plane spanning `x ∈ [x0, x0 + 2]`, `y ∈ [-1, 1]`
    fn square(x0: f64) -> Face {
        Face::new(
            Point3::new(x0 + 2.0, -1.0, 0.0),
            Point3::new(x0, -1.0, 0.0),
            Point3::new(x0, 1.0, 0.0),
            Point3::new(x0 + 2.0, 1.0, 0.0),
        )
    }

    #[test]
    fn test_three_by_three_grid() {
        let mut mesh = Mesh::new();
        let grid = Grid::new(&square(-1.0), &mut mesh, 3, 3, &NoopModulation);

        assert_eq!(grid.dims(), (3, 3));
        assert_eq!(mesh.vertex_count(), 9);

        assert_eq!(mesh.position(grid.index(0, 0)), Point3::new(-1.0, -1.0, 0.0));
        assert_eq!(mesh.position(grid.index(2, 0)), Point3::new(1.0, -1.0, 0.0));
        assert_eq!(mesh.position(grid.index(2, 2)), Point3::new(1.0, 1.0, 0.0));
        assert_relative_eq!(mesh.position(grid.index(1, 1)), Point3::origin(), epsilon = 1e-12);

        grid.construct(&mut mesh);
        assert_eq!(mesh.triangle_count(), 8);
        for triangle in &mesh.triangles {
            let normal = mesh.triangle_normal(triangle).unwrap();
            assert_relative_eq!(normal, Vector3::z(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_subdivisions_are_raised_to_two() {
        let mut mesh = Mesh::new();
        let grid = Grid::new(&square(0.0), &mut mesh, 0, 1, &NoopModulation);
        assert_eq!(grid.dims(), (2, 2));
        assert_eq!(mesh.vertex_count(), 4);
    }

    #[test]
    fn test_modulation_displaces_along_normal() {
        let mut mesh = Mesh::new();
        let lift = from_fn(|u, v| u + v);
        let grid = Grid::new(&square(-1.0), &mut mesh, 3, 3, &lift);

        assert_relative_eq!(mesh.position(grid.index(0, 0)).z, 0.0);
        assert_relative_eq!(mesh.position(grid.index(1, 1)).z, 1.0);
        assert_relative_eq!(mesh.position(grid.index(2, 2)).z, 2.0);
    }

    #[test]
    fn test_edge_orientation() {
        let mut mesh = Mesh::new();
        let grid = Grid::new(&square(-1.0), &mut mesh, 3, 4, &NoopModulation);

        let bottom = grid.bottom_edge();
        assert_eq!(bottom.indices(), &[grid.index(2, 0), grid.index(1, 0), grid.index(0, 0)]);
        assert_eq!(bottom.winding(), Winding::Clockwise);

        let right = grid.right_edge();
        assert_eq!(right.len(), 4);
        assert_eq!(right.indices()[0], grid.index(2, 0));
        assert_eq!(right.indices()[3], grid.index(2, 3));
        assert_eq!(right.winding(), Winding::CounterClockwise);

        let top = grid.top_edge();
        assert_eq!(top.indices(), &[grid.index(0, 3), grid.index(1, 3), grid.index(2, 3)]);

        let left = grid.left_edge();
        assert_eq!(left.indices()[0], grid.index(0, 0));
        assert_eq!(left.indices()[3], grid.index(0, 3));
        assert_eq!(grid.edge(EdgeSide::Left), left);
    }

    #[test]
    fn test_reversed_edge() {
        let edge = EdgeSequence::new(vec![1, 2, 3], Winding::CounterClockwise);
        let reversed = edge.reversed();
        assert_eq!(reversed.indices(), &[3, 2, 1]);
        assert_eq!(reversed.winding(), Winding::Clockwise);
        assert_eq!(reversed.reversed(), edge);
    }

    #[test]
    fn test_stitched_neighbours_share_seam() {
        let mut mesh = Mesh::new();
        let mut left = Grid::new(&square(-2.0), &mut mesh, 3, 3, &NoopModulation);
        let right = Grid::new(&square(0.0), &mut mesh, 3, 3, &NoopModulation);

        left.replace_right_edge(&right.left_edge()).unwrap();
        assert_eq!(left.right_edge().indices(), right.left_edge().indices());

        left.construct(&mut mesh);
        right.construct(&mut mesh);
        assert_eq!(mesh.remove_orphaned_vertices(), 3);
        assert_eq!(mesh.vertex_count(), 15);
    }

    #[test]
    fn test_replace_top_writes_counter_clockwise() {
        let mut mesh = Mesh::new();
        let mut grid = Grid::new(&square(0.0), &mut mesh, 3, 2, &NoopModulation);
        let edge = EdgeSequence::new(vec![100, 101, 102], Winding::Clockwise);

        grid.replace_top_edge(&edge).unwrap();

        assert_eq!(grid.index(2, 1), 100);
        assert_eq!(grid.index(0, 1), 102);
        assert_eq!(grid.top_edge().indices(), &[102, 101, 100]);
        assert_eq!(grid.top_edge().reversed().indices(), edge.indices());
    }

    #[test]
    fn test_length_mismatch_leaves_grid_untouched() {
        let mut mesh = Mesh::new();
        let mut grid = Grid::new(&square(0.0), &mut mesh, 3, 3, &NoopModulation);
        let before = grid.top_edge();

        let edge = EdgeSequence::new(vec![7, 8], Winding::Clockwise);
        let err = grid.replace_top_edge(&edge).unwrap_err();

        assert!(matches!(
            err,
            Error::EdgeLengthMismatch {
                side: EdgeSide::Top,
                expected: 3,
                actual: 2
            }
        ));
        assert_eq!(grid.top_edge(), before);
    }

    #[test]
    fn test_counter_clockwise_source_is_rejected() {
        let mut mesh = Mesh::new();
        let mut grid = Grid::new(&square(0.0), &mut mesh, 3, 3, &NoopModulation);
        let other = Grid::new(&square(2.0), &mut mesh, 3, 3, &NoopModulation);
        let before = grid.left_edge();

        let err = grid.replace_left_edge(&other.right_edge()).unwrap_err();
        assert!(matches!(err, Error::WindingMismatch { side: EdgeSide::Left }));
        assert_eq!(grid.left_edge(), before);

        grid.replace_left_edge(&other.right_edge().reversed()).unwrap();
    }
}

// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Closed box built from six stitched face grids

use super::{Face, Grid, Mesh, NoopModulation, SurfaceModulation};
use crate::error::Result;
use log::debug;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Box dimensions and grid resolution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxConfig {
    /// Edge lengths along X, Y and Z
    pub size: Vector3<f64>,
    pub center: Point3<f64>,
    /// Samples along the horizontal direction of every face
    pub subdiv_u: usize,
    /// Samples along the vertical direction of the side faces
    pub subdiv_v: usize,
}

impl Default for BoxConfig {
    fn default() -> Self {
        Self {
            size: Vector3::new(2.0, 2.0, 2.0),
            center: Point3::origin(),
            subdiv_u: 10,
            subdiv_v: 10,
        }
    }
}

/// One modulation per box face
#[derive(Clone, Copy)]
pub struct BoxModulations<'a> {
    pub front: &'a dyn SurfaceModulation,
    pub back: &'a dyn SurfaceModulation,
    pub top: &'a dyn SurfaceModulation,
    pub bottom: &'a dyn SurfaceModulation,
    pub left: &'a dyn SurfaceModulation,
    pub right: &'a dyn SurfaceModulation,
}

impl<'a> BoxModulations<'a> {
    /// Same modulation on all six faces
    pub fn uniform(modulation: &'a dyn SurfaceModulation) -> Self {
        Self {
            front: modulation,
            back: modulation,
            top: modulation,
            bottom: modulation,
            left: modulation,
            right: modulation,
        }
    }
}

impl Default for BoxModulations<'static> {
    fn default() -> Self {
        Self::uniform(&NoopModulation)
    }
}

/// Corners of the `[-1, 1]³` cube
const CORNERS: [[f64; 3]; 8] = [
    [1.0, -1.0, -1.0],
    [-1.0, -1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [1.0, 1.0, -1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

/// Corner indices per face as (bottom-right, bottom-left, top-left, top-right)
const FRONT: [usize; 4] = [0, 1, 2, 3];
const BACK: [usize; 4] = [4, 5, 6, 7];
const RIGHT: [usize; 4] = [5, 0, 3, 6];
const LEFT: [usize; 4] = [1, 4, 7, 2];
const TOP: [usize; 4] = [7, 6, 3, 2];
const BOTTOM: [usize; 4] = [1, 0, 5, 4];

/// Box whose six faces are subdivided and modulated independently
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseBox {
    config: BoxConfig,
}

impl BaseBox {
    pub fn new(config: BoxConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BoxConfig {
        &self.config
    }

    fn face(&self, corners: [usize; 4]) -> Face {
        let half = self.config.size / 2.0;
        let [br, bl, tl, tr] = corners.map(|i| {
            let [x, y, z] = CORNERS[i];
            self.config.center + Vector3::new(x * half.x, y * half.y, z * half.z)
        });
        Face::new(br, bl, tl, tr)
    }

    /// Create the six face grids in `mesh` and stitch their seams.
    ///
    /// Returned as front, back, right, left, top, bottom.
    fn stitched_grids(&self, mesh: &mut Mesh, modulations: &BoxModulations<'_>) -> Result<[Grid; 6]> {
        let (su, sv) = (self.config.subdiv_u.max(2), self.config.subdiv_v.max(2));

        let mut front = Grid::new(&self.face(FRONT), mesh, su, sv, modulations.front);
        let mut back = Grid::new(&self.face(BACK), mesh, su, sv, modulations.back);
        let mut right = Grid::new(&self.face(RIGHT), mesh, su, sv, modulations.right);
        let mut left = Grid::new(&self.face(LEFT), mesh, su, sv, modulations.left);
        let mut top = Grid::new(&self.face(TOP), mesh, su, su, modulations.top);
        let mut bottom = Grid::new(&self.face(BOTTOM), mesh, su, su, modulations.bottom);

        // Vertical seams around the sides
        front.replace_right_edge(&right.left_edge())?;
        left.replace_right_edge(&front.left_edge())?;
        back.replace_right_edge(&left.left_edge())?;
        right.replace_right_edge(&back.left_edge())?;

        // Caps take over the already stitched side boundaries
        top.replace_top_edge(&front.top_edge())?;
        top.replace_right_edge(&left.top_edge())?;
        top.replace_bottom_edge(&back.top_edge())?;
        top.replace_left_edge(&right.top_edge())?;

        bottom.replace_top_edge(&back.bottom_edge())?;
        bottom.replace_right_edge(&left.bottom_edge())?;
        bottom.replace_bottom_edge(&front.bottom_edge())?;
        bottom.replace_left_edge(&right.bottom_edge())?;

        Ok([front, back, right, left, top, bottom])
    }

    /// Build the watertight mesh.
    ///
    /// Vertices along every seam are shared between the two faces that meet
    /// there. Vertex normals are recomputed from the final triangles.
    pub fn construct(&self, modulations: &BoxModulations<'_>) -> Result<Mesh> {
        let (su, sv) = (self.config.subdiv_u.max(2), self.config.subdiv_v.max(2));
        let mut mesh = Mesh::with_capacity(4 * su * sv + 2 * su * su, 4 * (su * sv + su * su));

        let grids = self.stitched_grids(&mut mesh, modulations)?;
        for grid in &grids {
            grid.construct(&mut mesh);
        }

        let removed = mesh.remove_orphaned_vertices();
        mesh.recompute_normals();

        debug!(
            "box {}x{}: {} vertices, {} triangles ({} seam duplicates dropped)",
            su,
            sv,
            mesh.vertex_count(),
            mesh.triangle_count(),
            removed
        );

        Ok(mesh)
    }
}

// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Lofted solids between two closed contours
//!
//! A [`BaseCylinder`] places a bottom and a top contour half the height below
//! and above its frame, then sweeps a ring of vertices from one to the other.
//! Both ends are closed with triangle fans around the contour centres. Ring
//! density follows the configured voxel size, so the mesh is never coarser
//! than the voxelizer that will consume it.

use super::{
    Circle, LocalFrame, Mesh, MeshSink, NoopModulation, NormalizedContour2d, OrientedContour,
    SurfaceModulation,
};
use crate::error::{Error, Result};
use crate::utils::math::{lerp_point, nlerp, wrap_unit};
use log::debug;
use nalgebra::distance;
use serde::{Deserialize, Serialize};

/// Resolution settings for swept solids
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CylinderConfig {
    /// Target edge length, in the same unit as the geometry
    pub voxel_size: f64,
}

impl Default for CylinderConfig {
    fn default() -> Self {
        Self { voxel_size: 0.5 }
    }
}

impl CylinderConfig {
    pub fn validate(&self) -> Result<()> {
        if self.voxel_size > 0.0 {
            Ok(())
        } else {
            Err(Error::InvalidVoxelSize(self.voxel_size))
        }
    }
}

/// Solid swept from a bottom contour to a top contour along the frame's Z axis
pub struct BaseCylinder {
    frame: LocalFrame,
    bottom: Box<dyn NormalizedContour2d>,
    top: Box<dyn NormalizedContour2d>,
    height: f64,
    config: CylinderConfig,
    modulation: Box<dyn SurfaceModulation>,
    amplitude: f64,
}

impl BaseCylinder {
    pub fn new<B, T>(frame: LocalFrame, bottom: B, top: T, height: f64) -> Self
    where
        B: NormalizedContour2d + 'static,
        T: NormalizedContour2d + 'static,
    {
        Self {
            frame,
            bottom: Box::new(bottom),
            top: Box::new(top),
            height,
            config: CylinderConfig::default(),
            modulation: Box::new(NoopModulation),
            amplitude: 0.0,
        }
    }

    /// Straight circular cylinder
    pub fn circular(frame: LocalFrame, radius: f64, height: f64) -> Self {
        Self::new(frame, Circle::new(radius), Circle::new(radius), height)
    }

    pub fn with_config(mut self, config: CylinderConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Displace the surface along its normal by `modulation(u, v) * amplitude`
    pub fn set_surface_modulation<M>(&mut self, modulation: M, amplitude: f64) -> Result<()>
    where
        M: SurfaceModulation + 'static,
    {
        if amplitude < 0.0 {
            return Err(Error::NegativeAmplitude(amplitude));
        }
        self.modulation = Box::new(modulation);
        self.amplitude = amplitude;
        Ok(())
    }

    pub fn frame(&self) -> &LocalFrame {
        &self.frame
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn config(&self) -> &CylinderConfig {
        &self.config
    }

    fn bottom_contour(&self) -> OrientedContour<'_> {
        OrientedContour::new(self.frame.translated_z(-self.height / 2.0), self.bottom.as_ref())
    }

    fn top_contour(&self) -> OrientedContour<'_> {
        OrientedContour::new(self.frame.translated_z(self.height / 2.0), self.top.as_ref())
    }

    /// Ring vertex count and number of ring-to-ring bands
    pub fn subdivisions(&self) -> (usize, usize) {
        let voxel = self.config.voxel_size;
        let perimeter = self.bottom.length().max(self.top.length());

        let n_sub_u = ((perimeter / voxel).floor() as usize).max(2) + 2;
        let n_sub_v = ((self.height / voxel).floor() as usize).max(2) + 2;
        (n_sub_u, n_sub_v)
    }

    /// Top contour parameter closest to the start of the bottom contour.
    ///
    /// Sampling the bottom contour at `t - offset` keeps each ring column
    /// aligned, so differently parametrized contours do not twist the sides.
    pub fn seam_offset(&self) -> f64 {
        let (n_sub_u, _) = self.subdivisions();
        let bottom_start = self.bottom_contour().point_at(0.0);
        let top = self.top_contour();

        let mut best = (0.0, f64::MAX);
        for n in 0..n_sub_u {
            let t = n as f64 / n_sub_u as f64;
            let dist = distance(&bottom_start, &top.point_at(t));
            if dist < best.1 {
                best = (t, dist);
            }
        }
        best.0
    }

    /// Build a fresh mesh.
    ///
    /// Layout: the top and bottom centre vertices come first, followed by
    /// `n_sub_v + 1` rings of `n_sub_u` vertices from bottom to top.
    pub fn construct(&self) -> Mesh {
        let (n_sub_u, n_sub_v) = self.subdivisions();
        let offset = self.seam_offset();
        let bottom = self.bottom_contour();
        let top = self.top_contour();

        debug!(
            "cylinder: {} x {} subdivisions, seam offset {:.4}",
            n_sub_u, n_sub_v, offset
        );

        let mut mesh = Mesh::with_capacity(
            2 + n_sub_u * (n_sub_v + 1),
            2 * n_sub_u + 2 * n_sub_u * n_sub_v,
        );

        let top_center = mesh.add_vertex(top.frame().position());
        let bottom_center = mesh.add_vertex(bottom.frame().position());

        let rings: Vec<Vec<usize>> = (0..=n_sub_v)
            .map(|v| {
                let fv = v as f64 / n_sub_v as f64;
                self.add_ring(&mut mesh, &bottom, &top, fv, n_sub_u, offset)
            })
            .collect();

        let first = &rings[0];
        let last = &rings[n_sub_v];
        for u in 0..n_sub_u {
            let next = (u + 1) % n_sub_u;
            mesh.add_triangle(first[next], first[u], bottom_center);
            mesh.add_triangle(last[u], last[next], top_center);
        }

        for pair in rings.windows(2) {
            let (prev, cur) = (&pair[0], &pair[1]);
            for u in 0..n_sub_u {
                let next = (u + 1) % n_sub_u;
                mesh.add_quad(prev[u], prev[next], cur[next], cur[u]);
            }
        }

        mesh.recompute_normals();
        mesh
    }

    fn add_ring(
        &self,
        mesh: &mut Mesh,
        bottom: &OrientedContour<'_>,
        top: &OrientedContour<'_>,
        fv: f64,
        n_sub_u: usize,
        offset: f64,
    ) -> Vec<usize> {
        (0..n_sub_u)
            .map(|u| {
                let t_top = u as f64 / n_sub_u as f64;
                let (bottom_point, bottom_normal) = bottom.point_and_normal_at(wrap_unit(t_top - offset));
                let (top_point, top_normal) = top.point_and_normal_at(t_top);

                let point = lerp_point(&bottom_point, &top_point, fv);
                let normal = nlerp(&bottom_normal, &top_normal, fv);
                let lift = self.modulation.offset(t_top, fv) * self.amplitude;

                mesh.add_vertex(point + normal * lift)
            })
            .collect()
    }
}

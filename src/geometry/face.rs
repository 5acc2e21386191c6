// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Planar quadrilateral faces

use super::MeshSink;
use crate::utils::math::lerp_point;
use nalgebra::{Point3, Vector3};

/// Quad given by four corners in consistent winding.
///
/// Corners are passed bottom-right, bottom-left, top-left, top-right. The
/// normal is `(BR - BL) × (TR - BR)`, so traversing BL → BR → TR → TL is
/// counter-clockwise when seen from the front.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    bottom_right: Point3<f64>,
    bottom_left: Point3<f64>,
    top_left: Point3<f64>,
    top_right: Point3<f64>,
    normal: Vector3<f64>,
}

impl Face {
    pub fn new(
        bottom_right: Point3<f64>,
        bottom_left: Point3<f64>,
        top_left: Point3<f64>,
        top_right: Point3<f64>,
    ) -> Self {
        let u = bottom_right - bottom_left;
        let v = top_right - bottom_right;

        Self {
            bottom_right,
            bottom_left,
            top_left,
            top_right,
            normal: u.cross(&v).normalize(),
        }
    }

    pub fn bottom_right(&self) -> Point3<f64> {
        self.bottom_right
    }

    pub fn bottom_left(&self) -> Point3<f64> {
        self.bottom_left
    }

    pub fn top_left(&self) -> Point3<f64> {
        self.top_left
    }

    pub fn top_right(&self) -> Point3<f64> {
        self.top_right
    }

    pub fn normal(&self) -> Vector3<f64> {
        self.normal
    }

    /// Bilinear interpolation: `u` runs left to right, `v` bottom to top
    pub fn point_at(&self, u: f64, v: f64) -> Point3<f64> {
        let bottom = lerp_point(&self.bottom_left, &self.bottom_right, u);
        let top = lerp_point(&self.top_left, &self.top_right, u);
        lerp_point(&bottom, &top, v)
    }

    /// Emit the face as a single quad, pushed `distance` along the normal
    pub fn add_to<S: MeshSink + ?Sized>(&self, sink: &mut S, distance: f64) {
        let shift = self.normal * distance;
        let bl = sink.add_vertex(self.bottom_left + shift);
        let br = sink.add_vertex(self.bottom_right + shift);
        let tr = sink.add_vertex(self.top_right + shift);
        let tl = sink.add_vertex(self.top_left + shift);
        sink.add_quad(bl, br, tr, tl);
    }
}

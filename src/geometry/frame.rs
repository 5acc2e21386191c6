// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Local reference frames

use nalgebra::{Point2, Point3, Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// Orthonormal coordinate frame: an origin plus local X/Y/Z axes.
///
/// Frames are values. Transformations return new frames and never mutate
/// the receiver. The basis is right-handed (`z × x = y`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocalFrame {
    position: Point3<f64>,
    x: Vector3<f64>,
    y: Vector3<f64>,
    z: Vector3<f64>,
}

impl LocalFrame {
    /// Frame at `position` with the given Z and X directions.
    ///
    /// Both directions are normalized and Y is derived as `z × x`. `x_dir`
    /// must be perpendicular to `z_dir`; this is not checked and a skewed
    /// input yields a non-orthonormal frame.
    pub fn new(position: Point3<f64>, z_dir: Vector3<f64>, x_dir: Vector3<f64>) -> Self {
        let z = z_dir.normalize();
        let x = x_dir.normalize();
        Self {
            position,
            x,
            y: z.cross(&x),
            z,
        }
    }

    /// Frame at `position` aligned with the world axes
    pub fn at(position: Point3<f64>) -> Self {
        Self {
            position,
            x: Vector3::x(),
            y: Vector3::y(),
            z: Vector3::z(),
        }
    }

    /// World frame: origin with world X/Y/Z
    pub fn world() -> Self {
        Self::at(Point3::origin())
    }

    /// Same basis as `frame`, moved to `position`
    pub fn with_position(frame: &LocalFrame, position: Point3<f64>) -> Self {
        Self { position, ..*frame }
    }

    /// Copy moved by `distance` along the local Z axis
    pub fn translated_z(&self, distance: f64) -> Self {
        Self::with_position(self, self.position + self.z * distance)
    }

    pub fn position(&self) -> Point3<f64> {
        self.position
    }

    pub fn x(&self) -> Vector3<f64> {
        self.x
    }

    pub fn y(&self) -> Vector3<f64> {
        self.y
    }

    pub fn z(&self) -> Vector3<f64> {
        self.z
    }

    /// Local point to world coordinates
    pub fn to_world(&self, local: &Point3<f64>) -> Point3<f64> {
        self.position + self.x * local.x + self.y * local.y + self.z * local.z
    }

    /// Local 2D point (Z = 0) to world coordinates
    pub fn to_world_2d(&self, local: &Point2<f64>) -> Point3<f64> {
        self.position + self.x * local.x + self.y * local.y
    }

    /// Local direction to a normalized world direction
    pub fn dir_to_world(&self, dir: &Vector3<f64>) -> Vector3<f64> {
        (self.x * dir.x + self.y * dir.y + self.z * dir.z).normalize()
    }

    /// Local 2D direction (Z = 0) to a normalized world direction
    pub fn dir_to_world_2d(&self, dir: &Vector2<f64>) -> Vector3<f64> {
        (self.x * dir.x + self.y * dir.y).normalize()
    }
}

impl Default for LocalFrame {
    fn default() -> Self {
        Self::world()
    }
}

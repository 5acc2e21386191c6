// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Implicit signed-distance primitives
//!
//! These are the fields handed to a voxelizer: negative inside, zero on the
//! surface, positive outside. A field that can be voxelized on its own also
//! reports its [`BoundingBox`]; unbounded fields such as the gyroid have to
//! be wrapped in [`Bounded`] first.

use super::BoundingBox;
use crate::error::{Error, Result};
use log::debug;
use nalgebra::{Point3, Vector3};
use std::f64::consts::TAU;

/// Scalar field over 3D space
pub trait Implicit {
    fn signed_distance(&self, point: &Point3<f64>) -> f64;
}

/// Implicit field with a finite region of interest
pub trait BoundedImplicit: Implicit {
    fn bounds(&self) -> BoundingBox;
}

impl<T: Implicit + ?Sized> Implicit for &T {
    fn signed_distance(&self, point: &Point3<f64>) -> f64 {
        (**self).signed_distance(point)
    }
}

impl<T: Implicit + ?Sized> Implicit for Box<T> {
    fn signed_distance(&self, point: &Point3<f64>) -> f64 {
        (**self).signed_distance(point)
    }
}

impl<T: BoundedImplicit + ?Sized> BoundedImplicit for &T {
    fn bounds(&self) -> BoundingBox {
        (**self).bounds()
    }
}

impl<T: BoundedImplicit + ?Sized> BoundedImplicit for Box<T> {
    fn bounds(&self) -> BoundingBox {
        (**self).bounds()
    }
}

/// Sphere of radius `r` centered on the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImplicitSphere {
    radius: f64,
}

impl ImplicitSphere {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Implicit for ImplicitSphere {
    fn signed_distance(&self, point: &Point3<f64>) -> f64 {
        point.coords.norm() - self.radius
    }
}

impl BoundedImplicit for ImplicitSphere {
    fn bounds(&self) -> BoundingBox {
        BoundingBox::centered_cube(self.radius)
    }
}

/// Gyroid sheet with period `unit_size` and wall thickness `thickness`.
///
/// The value is the gyroid level-set function shifted by half the thickness,
/// which is only an approximation of the true distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImplicitGyroid {
    unit_size: f64,
    thickness: f64,
}

impl ImplicitGyroid {
    pub fn new(unit_size: f64, thickness: f64) -> Self {
        Self {
            unit_size,
            thickness,
        }
    }

    pub fn unit_size(&self) -> f64 {
        self.unit_size
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }
}

impl Implicit for ImplicitGyroid {
    fn signed_distance(&self, point: &Point3<f64>) -> f64 {
        let k = TAU / self.unit_size;
        let (sx, cx) = (k * point.x).sin_cos();
        let (sy, cy) = (k * point.y).sin_cos();
        let (sz, cz) = (k * point.z).sin_cos();

        (sx * cy + sy * cz + sz * cx).abs() - self.thickness / 2.0
    }
}

/// Restricts any field to an explicit region
#[derive(Debug, Clone, Copy)]
pub struct Bounded<T> {
    pub inner: T,
    pub bounds: BoundingBox,
}

impl<T: Implicit> Bounded<T> {
    pub fn new(inner: T, bounds: BoundingBox) -> Self {
        Self { inner, bounds }
    }
}

impl<T: Implicit> Implicit for Bounded<T> {
    fn signed_distance(&self, point: &Point3<f64>) -> f64 {
        self.inner.signed_distance(point)
    }
}

impl<T: Implicit> BoundedImplicit for Bounded<T> {
    fn bounds(&self) -> BoundingBox {
        self.bounds
    }
}

/// Field values on a regular lattice, X varying fastest
#[derive(Debug, Clone)]
pub struct SampleGrid {
    pub origin: Point3<f64>,
    pub spacing: f64,
    pub dims: [usize; 3],
    pub values: Vec<f64>,
}

impl SampleGrid {
    fn offset(&self, i: usize, j: usize, k: usize) -> usize {
        (k * self.dims[1] + j) * self.dims[0] + i
    }

    pub fn value(&self, i: usize, j: usize, k: usize) -> f64 {
        self.values[self.offset(i, j, k)]
    }

    /// World position of lattice point `(i, j, k)`
    pub fn point(&self, i: usize, j: usize, k: usize) -> Point3<f64> {
        self.origin + Vector3::new(i as f64, j as f64, k as f64) * self.spacing
    }

    /// Samples strictly inside the surface
    pub fn inside_count(&self) -> usize {
        self.values.iter().filter(|&&v| v < 0.0).count()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Largest lattice [`sample_grid`] will allocate
pub const MAX_SAMPLES: usize = 1 << 28;

/// Evaluate `field` on a lattice covering its bounds
pub fn sample_grid<F: BoundedImplicit + ?Sized>(field: &F, spacing: f64) -> Result<SampleGrid> {
    if spacing <= 0.0 || spacing.is_nan() {
        return Err(Error::InvalidSpacing(spacing));
    }

    let bounds = field.bounds();
    let size = if bounds.is_empty() {
        Vector3::zeros()
    } else {
        bounds.size()
    };
    let too_large = || Error::LatticeTooLarge {
        spacing,
        limit: MAX_SAMPLES,
    };

    let mut dims = [0; 3];
    for (dim, extent) in dims.iter_mut().zip([size.x, size.y, size.z]) {
        let steps = (extent / spacing + 1e-9).floor();
        if steps.is_nan() || steps >= MAX_SAMPLES as f64 {
            return Err(too_large());
        }
        *dim = steps as usize + 1;
    }
    let count = dims
        .iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .filter(|&n| n <= MAX_SAMPLES)
        .ok_or_else(too_large)?;

    let mut grid = SampleGrid {
        origin: bounds.min,
        spacing,
        dims,
        values: Vec::with_capacity(count),
    };

    for k in 0..dims[2] {
        for j in 0..dims[1] {
            for i in 0..dims[0] {
                let value = field.signed_distance(&grid.point(i, j, k));
                grid.values.push(value);
            }
        }
    }

    debug!(
        "sampled {}x{}x{} lattice, {} inside",
        dims[0],
        dims[1],
        dims[2],
        grid.inside_count()
    );

    Ok(grid)
}

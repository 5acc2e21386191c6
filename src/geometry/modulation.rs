// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Scalar surface modulation functions
//!
//! A modulation maps normalized surface coordinates `(u, v) ∈ [0, 1]²` to a
//! scalar offset. Grids displace their vertices along the face normal by this
//! value; swept solids scale it by an amplitude and displace along the
//! interpolated contour normal.

use image::GrayImage;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;
use std::sync::Arc;

/// Scalar offset over a parametric surface
pub trait SurfaceModulation {
    fn offset(&self, u: f64, v: f64) -> f64;
}

impl<T: SurfaceModulation + ?Sized> SurfaceModulation for &T {
    fn offset(&self, u: f64, v: f64) -> f64 {
        (**self).offset(u, v)
    }
}

impl<T: SurfaceModulation + ?Sized> SurfaceModulation for Box<T> {
    fn offset(&self, u: f64, v: f64) -> f64 {
        (**self).offset(u, v)
    }
}

impl<T: SurfaceModulation + ?Sized> SurfaceModulation for Rc<T> {
    fn offset(&self, u: f64, v: f64) -> f64 {
        (**self).offset(u, v)
    }
}

impl<T: SurfaceModulation + ?Sized> SurfaceModulation for Arc<T> {
    fn offset(&self, u: f64, v: f64) -> f64 {
        (**self).offset(u, v)
    }
}

/// Modulation backed by a closure, see [`from_fn`]
#[derive(Clone, Copy)]
pub struct FnModulation<F>(F);

/// Wrap `f(u, v)` as a [`SurfaceModulation`]
pub fn from_fn<F>(f: F) -> FnModulation<F>
where
    F: Fn(f64, f64) -> f64,
{
    FnModulation(f)
}

impl<F> SurfaceModulation for FnModulation<F>
where
    F: Fn(f64, f64) -> f64,
{
    fn offset(&self, u: f64, v: f64) -> f64 {
        (self.0)(u, v)
    }
}

/// Flat surface
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopModulation;

impl SurfaceModulation for NoopModulation {
    fn offset(&self, _u: f64, _v: f64) -> f64 {
        0.0
    }
}

/// Uniform noise in `[0, amplitude)`.
///
/// Every call draws the next sample, so the same `(u, v)` yields different
/// offsets. The sequence is reproducible for a fixed seed.
#[derive(Debug)]
pub struct RandomModulation {
    amplitude: f64,
    rng: RefCell<StdRng>,
}

impl RandomModulation {
    pub const DEFAULT_SEED: u64 = 0;

    pub fn new(amplitude: f64) -> Self {
        Self::with_seed(amplitude, Self::DEFAULT_SEED)
    }

    pub fn with_seed(amplitude: f64, seed: u64) -> Self {
        Self {
            amplitude,
            rng: RefCell::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Seeded from process entropy, not reproducible
    pub fn from_entropy(amplitude: f64) -> Self {
        Self {
            amplitude,
            rng: RefCell::new(StdRng::from_entropy()),
        }
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }
}

impl SurfaceModulation for RandomModulation {
    fn offset(&self, _u: f64, _v: f64) -> f64 {
        self.rng.borrow_mut().gen::<f64>() * self.amplitude
    }
}

/// Gaussian bump centered on `(0.5, 0.5)` with peak height 1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussModulation {
    pub sigma_u: f64,
    pub sigma_v: f64,
}

impl GaussModulation {
    pub fn new(sigma_u: f64, sigma_v: f64) -> Self {
        Self { sigma_u, sigma_v }
    }
}

impl Default for GaussModulation {
    fn default() -> Self {
        Self::new(0.15, 0.15)
    }
}

impl SurfaceModulation for GaussModulation {
    fn offset(&self, u: f64, v: f64) -> f64 {
        let exp_u = (u - 0.5).powi(2) / (2.0 * self.sigma_u.powi(2));
        let exp_v = (v - 0.5).powi(2) / (2.0 * self.sigma_v.powi(2));
        (-(exp_u + exp_v)).exp()
    }
}

/// Sine waves along U and V, mapped into `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SineWaveModulation {
    pub repeat_u: u32,
    pub repeat_v: u32,
}

impl SineWaveModulation {
    pub fn new(repeat_u: u32, repeat_v: u32) -> Self {
        Self { repeat_u, repeat_v }
    }
}

impl Default for SineWaveModulation {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl SurfaceModulation for SineWaveModulation {
    fn offset(&self, u: f64, v: f64) -> f64 {
        let u_angle = u * TAU * self.repeat_u as f64;
        let v_angle = v * TAU * self.repeat_v as f64;
        (u_angle.sin() + 1.0) * 0.25 + (v_angle.sin() + 1.0) * 0.25
    }
}

/// Wraps another modulation with optional U/V flips, a scale and an offset
pub struct TransformModulation<M> {
    inner: M,
    scale: f64,
    offset: f64,
    flip_u: bool,
    flip_v: bool,
}

impl<M: SurfaceModulation> TransformModulation<M> {
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            scale: 1.0,
            offset: 0.0,
            flip_u: false,
            flip_v: false,
        }
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn offset_by(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    pub fn flip_u(mut self, flip: bool) -> Self {
        self.flip_u = flip;
        self
    }

    pub fn flip_v(mut self, flip: bool) -> Self {
        self.flip_v = flip;
        self
    }
}

impl<M: SurfaceModulation> SurfaceModulation for TransformModulation<M> {
    fn offset(&self, u: f64, v: f64) -> f64 {
        let u = if self.flip_u { 1.0 - u } else { u };
        let v = if self.flip_v { 1.0 - v } else { v };
        self.inner.offset(u, v) * self.scale + self.offset
    }
}

/// 2D scalar field sampled at integer texel coordinates
pub trait Raster {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Scalar value at texel `(x, y)`, both in range
    fn value_at(&self, x: u32, y: u32) -> f64;
}

impl Raster for GrayImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn value_at(&self, x: u32, y: u32) -> f64 {
        self.get_pixel(x, y).0[0] as f64 / 255.0
    }
}

/// Row-major raster of precomputed scalar values
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarRaster {
    width: u32,
    height: u32,
    values: Vec<f64>,
}

impl ScalarRaster {
    /// `values.len()` must equal `width * height`
    pub fn new(width: u32, height: u32, values: Vec<f64>) -> Option<Self> {
        (values.len() == (width as usize) * (height as usize)).then_some(Self {
            width,
            height,
            values,
        })
    }

    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> f64) -> Self {
        let values = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self {
            width,
            height,
            values,
        }
    }
}

impl Raster for ScalarRaster {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn value_at(&self, x: u32, y: u32) -> f64 {
        self.values[y as usize * self.width as usize + x as usize]
    }
}

/// Height field read from a raster, nearest texel, mirrored along U
pub struct ImageModulation<R> {
    raster: R,
}

impl<R: Raster> ImageModulation<R> {
    pub fn new(raster: R) -> Self {
        Self { raster }
    }

    pub fn raster(&self) -> &R {
        &self.raster
    }
}

impl<R: Raster> SurfaceModulation for ImageModulation<R> {
    fn offset(&self, u: f64, v: f64) -> f64 {
        let width = self.raster.width();
        let height = self.raster.height();
        if width == 0 || height == 0 {
            return 0.0;
        }

        let x = width as f64 - (u * width as f64).round();
        let y = (v * height as f64).round();

        let x = x.clamp(0.0, (width - 1) as f64) as u32;
        let y = y.clamp(0.0, (height - 1) as f64) as u32;
        self.raster.value_at(x, y)
    }
}

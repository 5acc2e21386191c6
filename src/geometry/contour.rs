// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Closed 2D contours and their placement in space

use super::LocalFrame;
use crate::error::{Error, Result};
use nalgebra::{Point2, Point3, Vector2, Vector3};
use std::f64::consts::TAU;

/// Closed 2D curve parametrized over `t ∈ [0, 1]`.
///
/// The curve is centered on the local origin and wound counter-clockwise.
/// `t = 0` and `t = 1` map to the same point. Out-of-range parameters are
/// clamped.
pub trait NormalizedContour2d {
    /// Position and outward unit normal at `t`
    fn point_and_normal_at(&self, t: f64) -> (Point2<f64>, Vector2<f64>);

    /// Total perimeter length
    fn length(&self) -> f64;
}

impl<T: NormalizedContour2d + ?Sized> NormalizedContour2d for Box<T> {
    fn point_and_normal_at(&self, t: f64) -> (Point2<f64>, Vector2<f64>) {
        (**self).point_and_normal_at(t)
    }

    fn length(&self) -> f64 {
        (**self).length()
    }
}

/// Circle of radius `r`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    radius: f64,
}

impl Circle {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl NormalizedContour2d for Circle {
    fn point_and_normal_at(&self, t: f64) -> (Point2<f64>, Vector2<f64>) {
        let angle = t.clamp(0.0, 1.0) * TAU;
        let direction = Vector2::new(angle.cos(), angle.sin());
        (Point2::from(direction * self.radius), direction)
    }

    fn length(&self) -> f64 {
        TAU * self.radius
    }
}

/// Ellipse with semi-axes `a` (along the rotated X) and `b`, rotated by `phi`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    a: f64,
    b: f64,
    cos_phi: f64,
    sin_phi: f64,
}

impl Ellipse {
    /// Ellipse from semi-axis lengths and a rotation angle in radians
    pub fn new(a: f64, b: f64, angle: f64) -> Self {
        Self {
            a,
            b,
            cos_phi: angle.cos(),
            sin_phi: angle.sin(),
        }
    }

    /// Ellipse from the direction and length of axis A and the length of
    /// the perpendicular axis B
    pub fn from_axis(axis_a: Vector2<f64>, b: f64) -> Result<Self> {
        let a = axis_a.norm();
        if a == 0.0 {
            return Err(Error::DegenerateAxis);
        }

        Ok(Self {
            a,
            b,
            cos_phi: axis_a.x / a,
            sin_phi: axis_a.y / a,
        })
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    fn rotate(&self, x: f64, y: f64) -> Vector2<f64> {
        Vector2::new(
            x * self.cos_phi - y * self.sin_phi,
            x * self.sin_phi + y * self.cos_phi,
        )
    }
}

impl NormalizedContour2d for Ellipse {
    fn point_and_normal_at(&self, t: f64) -> (Point2<f64>, Vector2<f64>) {
        let theta = t.clamp(0.0, 1.0) * TAU;
        let (sin, cos) = theta.sin_cos();

        let point = self.rotate(self.a * cos, self.b * sin);
        let tangent = self.rotate(-self.a * sin, self.b * cos);

        // Clockwise perpendicular of a CCW tangent points outward
        let normal = Vector2::new(tangent.y, -tangent.x).normalize();

        (Point2::from(point), normal)
    }

    /// Ramanujan's approximation of the perimeter
    fn length(&self) -> f64 {
        let (a, b) = (self.a, self.b);
        std::f64::consts::PI * (3.0 * (a + b) - ((3.0 * a + b) * (a + 3.0 * b)).sqrt())
    }
}

/// A 2D contour placed in space by a [`LocalFrame`]
pub struct OrientedContour<'a> {
    frame: LocalFrame,
    contour: &'a dyn NormalizedContour2d,
}

impl<'a> OrientedContour<'a> {
    pub fn new(frame: LocalFrame, contour: &'a dyn NormalizedContour2d) -> Self {
        Self { frame, contour }
    }

    /// World-space position and outward normal at `t`
    pub fn point_and_normal_at(&self, t: f64) -> (Point3<f64>, Vector3<f64>) {
        let (point, normal) = self.contour.point_and_normal_at(t);
        (
            self.frame.to_world_2d(&point),
            self.frame.dir_to_world_2d(&normal),
        )
    }

    pub fn point_at(&self, t: f64) -> Point3<f64> {
        self.point_and_normal_at(t).0
    }

    pub fn length(&self) -> f64 {
        self.contour.length()
    }

    pub fn frame(&self) -> &LocalFrame {
        &self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SAMPLES: usize = 64;

    fn samples() -> impl Iterator<Item = f64> {
        (0..=SAMPLES).map(|i| i as f64 / SAMPLES as f64)
    }

    #[test]
    fn test_circle_is_closed() {
        let circle = Circle::new(10.0);
        let (p0, n0) = circle.point_and_normal_at(0.0);
        let (p1, n1) = circle.point_and_normal_at(1.0);
        assert_relative_eq!(p0, p1, epsilon = 1e-9);
        assert_relative_eq!(n0, n1, epsilon = 1e-9);
    }

    #[test]
    fn test_circle_points_and_normals() {
        let circle = Circle::new(3.0);
        for t in samples() {
            let (p, n) = circle.point_and_normal_at(t);
            assert_relative_eq!(p.coords.norm(), 3.0, epsilon = 1e-12);
            assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-12);
            assert_relative_eq!(n, p.coords / 3.0, epsilon = 1e-12);
        }
        assert_relative_eq!(circle.length(), TAU * 3.0);
    }

    #[test]
    fn test_parameter_is_clamped() {
        let circle = Circle::new(1.0);
        assert_eq!(circle.point_and_normal_at(-0.5), circle.point_and_normal_at(0.0));
        assert_eq!(circle.point_and_normal_at(1.7), circle.point_and_normal_at(1.0));
    }

    #[test]
    fn test_ellipse_normals_are_unit_and_outward() {
        let ellipse = Ellipse::new(20.0, 10.0, 0.3);
        for t in samples() {
            let (p, n) = ellipse.point_and_normal_at(t);
            assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-12);
            // Convex curve around the origin: outward normal faces away from it
            assert!(n.dot(&p.coords) > 0.0, "normal points inward at t={t}");
        }
    }

    #[test]
    fn test_ellipse_is_closed() {
        let ellipse = Ellipse::new(7.0, 2.0, 1.1);
        let (p0, _) = ellipse.point_and_normal_at(0.0);
        let (p1, _) = ellipse.point_and_normal_at(1.0);
        assert_relative_eq!(p0, p1, epsilon = 1e-9);
    }

    #[test]
    fn test_ellipse_axes() {
        let ellipse = Ellipse::new(20.0, 10.0, 0.0);
        let (p, n) = ellipse.point_and_normal_at(0.0);
        assert_relative_eq!(p, Point2::new(20.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(n, Vector2::new(1.0, 0.0), epsilon = 1e-12);

        let (p, n) = ellipse.point_and_normal_at(0.25);
        assert_relative_eq!(p, Point2::new(0.0, 10.0), epsilon = 1e-9);
        assert_relative_eq!(n, Vector2::new(0.0, 1.0), epsilon = 1e-9);
    }

    #[test]
    fn test_ellipse_length_matches_circle() {
        let r = 4.5;
        let ellipse = Ellipse::new(r, r, 0.7);
        assert_relative_eq!(ellipse.length(), TAU * r, epsilon = 1e-9);
    }

    #[test]
    fn test_ellipse_from_axis() {
        let ellipse = Ellipse::from_axis(Vector2::new(0.0, 5.0), 2.0).unwrap();
        assert_relative_eq!(ellipse.a(), 5.0);
        let (p, _) = ellipse.point_and_normal_at(0.0);
        assert_relative_eq!(p, Point2::new(0.0, 5.0), epsilon = 1e-12);

        assert!(matches!(
            Ellipse::from_axis(Vector2::zeros(), 2.0),
            Err(Error::DegenerateAxis)
        ));
    }

    #[test]
    fn test_oriented_contour_in_frame() {
        let circle = Circle::new(2.0);
        let frame = LocalFrame::at(Point3::new(0.0, 0.0, 10.0));
        let contour = OrientedContour::new(frame, &circle);

        let (p, n) = contour.point_and_normal_at(0.25);
        assert_relative_eq!(p, Point3::new(0.0, 2.0, 10.0), epsilon = 1e-12);
        assert_relative_eq!(n, Vector3::y(), epsilon = 1e-12);
        assert_relative_eq!(contour.length(), circle.length());
    }
}

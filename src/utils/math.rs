// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities

use nalgebra::{Point3, Vector3};

/// Linear interpolation between two points
pub fn lerp_point(a: &Point3<f64>, b: &Point3<f64>, t: f64) -> Point3<f64> {
    a + (b - a) * t
}

/// Linear interpolation between two directions, renormalized
pub fn nlerp(a: &Vector3<f64>, b: &Vector3<f64>, t: f64) -> Vector3<f64> {
    (a + (b - a) * t).normalize()
}

/// Wrap a normalized parameter into `[0, 1)`
pub fn wrap_unit(t: f64) -> f64 {
    t.rem_euclid(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lerp_point() {
        let p = lerp_point(&Point3::new(0.0, 0.0, 0.0), &Point3::new(2.0, 4.0, -6.0), 0.5);
        assert_eq!(p, Point3::new(1.0, 2.0, -3.0));
    }

    #[test]
    fn test_nlerp_is_unit() {
        let n = nlerp(&Vector3::x(), &Vector3::y(), 0.5);
        assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(n.x, n.y, epsilon = 1e-12);
    }

    #[test]
    fn test_wrap_unit() {
        assert_eq!(wrap_unit(-0.25), 0.75);
        assert_eq!(wrap_unit(0.25), 0.25);
        assert_eq!(wrap_unit(1.0), 0.0);
    }
}

//! 2D affine matrices
//!
//! A matrix is stored as six coefficients `[a, b, tx, c, d, ty]`:
//! ```text
//! x' = a*x + b*y + tx
//! y' = c*x + d*y + ty
//! ```

use crate::error::{TransformError, TransformResult};

/// Determinants smaller than this are treated as zero.
const SINGULAR_EPSILON: f64 = 1e-12;

/// 2D affine transformation matrix (6 coefficients)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineMatrix {
    coeffs: [f64; 6],
}

impl Default for AffineMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl AffineMatrix {
    pub fn identity() -> Self {
        Self {
            coeffs: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        }
    }

    pub fn from_coeffs(coeffs: [f64; 6]) -> Self {
        Self { coeffs }
    }

    pub fn coeffs(&self) -> &[f64; 6] {
        &self.coeffs
    }

    /// Rotation by `angle_degrees` combined with a uniform `scale`, both about
    /// `(center_x, center_y)`.
    ///
    /// Follows the usual `getRotationMatrix2D` layout. In image coordinates
    /// (y growing downward) a positive angle turns content counter-clockwise.
    pub fn rotation_about(center_x: f64, center_y: f64, angle_degrees: f64, scale: f64) -> Self {
        let (sin, cos) = angle_degrees.to_radians().sin_cos();
        let alpha = scale * cos;
        let beta = scale * sin;

        Self {
            coeffs: [
                alpha,
                beta,
                (1.0 - alpha) * center_x - beta * center_y,
                -beta,
                alpha,
                beta * center_x + (1.0 - alpha) * center_y,
            ],
        }
    }

    pub fn determinant(&self) -> f64 {
        let [a, b, _, c, d, _] = self.coeffs;
        a * d - b * c
    }

    /// Compute the inverse transformation
    pub fn inverse(&self) -> TransformResult<Self> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < SINGULAR_EPSILON {
            return Err(TransformError::SingularMatrix);
        }

        let [a, b, tx, c, d, ty] = self.coeffs;
        let ia = d / det;
        let ib = -b / det;
        let ic = -c / det;
        let id = a / det;

        Ok(Self {
            coeffs: [ia, ib, -(ia * tx + ib * ty), ic, id, -(ic * tx + id * ty)],
        })
    }

    /// Compose two transformations: the result applies `other` first, then `self`.
    pub fn compose(&self, other: &Self) -> Self {
        let [a1, b1, tx1, c1, d1, ty1] = self.coeffs;
        let [a2, b2, tx2, c2, d2, ty2] = other.coeffs;

        Self {
            coeffs: [
                a1 * a2 + b1 * c2,
                a1 * b2 + b1 * d2,
                a1 * tx2 + b1 * ty2 + tx1,
                c1 * a2 + d1 * c2,
                c1 * b2 + d1 * d2,
                c1 * tx2 + d1 * ty2 + ty1,
            ],
        }
    }

    #[inline]
    pub fn transform_point(&self, x: f64, y: f64) -> (f64, f64) {
        let [a, b, tx, c, d, ty] = self.coeffs;
        (a * x + b * y + tx, c * x + d * y + ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: (f64, f64), expected: (f64, f64)) {
        assert!(
            (actual.0 - expected.0).abs() < 1e-9 && (actual.1 - expected.1).abs() < 1e-9,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    #[test]
    fn test_identity_leaves_points_alone() {
        let m = AffineMatrix::identity();
        assert_close(m.transform_point(3.5, -2.0), (3.5, -2.0));
    }

    #[test]
    fn test_rotation_keeps_center_fixed() {
        let m = AffineMatrix::rotation_about(100.0, 50.0, 37.0, 1.8);
        assert_close(m.transform_point(100.0, 50.0), (100.0, 50.0));
    }

    #[test]
    fn test_positive_angle_turns_counter_clockwise_on_screen() {
        // A point to the right of the centre ends up above it (smaller y).
        let m = AffineMatrix::rotation_about(0.0, 0.0, 90.0, 1.0);
        assert_close(m.transform_point(1.0, 0.0), (0.0, -1.0));
    }

    #[test]
    fn test_scale_moves_points_away_from_center() {
        let m = AffineMatrix::rotation_about(10.0, 10.0, 0.0, 2.0);
        assert_close(m.transform_point(12.0, 9.0), (14.0, 8.0));
    }

    #[test]
    fn test_inverse_round_trip() {
        let m = AffineMatrix::rotation_about(64.0, 32.0, -23.5, 1.4);
        let inv = m.inverse().unwrap();
        let (x, y) = m.transform_point(7.0, 19.0);
        assert_close(inv.transform_point(x, y), (7.0, 19.0));
        assert_close(m.compose(&inv).transform_point(5.0, 6.0), (5.0, 6.0));
    }

    #[test]
    fn test_compose_applies_right_hand_side_first() {
        let shift = AffineMatrix::from_coeffs([1.0, 0.0, 5.0, 0.0, 1.0, 0.0]);
        let double = AffineMatrix::from_coeffs([2.0, 0.0, 0.0, 0.0, 2.0, 0.0]);
        // shift then double: (1 + 5) * 2
        assert_close(double.compose(&shift).transform_point(1.0, 1.0), (12.0, 2.0));
        // double then shift: 1 * 2 + 5
        assert_close(shift.compose(&double).transform_point(1.0, 1.0), (7.0, 2.0));
    }

    #[test]
    fn test_singular_matrix_has_no_inverse() {
        let m = AffineMatrix::rotation_about(0.0, 0.0, 45.0, 0.0);
        assert!(matches!(m.inverse(), Err(TransformError::SingularMatrix)));
    }
}

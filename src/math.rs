//! Vector and matrix primitives for the gyro space transforms
//!
//! Vectors are plain `nalgebra::Vector3<f32>`. Matrices are `Matrix4<f32>`
//! read as row-major grids applied to row vectors: `out_j = Σ v_i·m[i][j] + m[3][j]`.

use log::warn;
use nalgebra::{ComplexField, Matrix4, Vector3};

use crate::error::GyroSpaceError;

/// Threshold below which a magnitude or component counts as zero
pub const EPSILON: f32 = 1e-5;

/// Default "up" direction used whenever a gravity vector is unusable
pub const DEFAULT_UP: Vector3<f32> = Vector3::new(0.0, 1.0, 0.0);

/// Extension trait for Vector3 operations
pub trait Vector3Ext {
    /// Normalize the vector, returning the zero vector if its magnitude is below [`EPSILON`]
    ///
    /// The degenerate case is reported through the `log` facade, never raised.
    fn safe_normalize(&self) -> Vector3<f32>;

    /// Normalize the vector, reporting a degenerate or non-finite input as an error
    fn try_normalize_checked(&self) -> Result<Vector3<f32>, GyroSpaceError>;

    /// True iff every component's absolute value is below [`EPSILON`]
    fn is_near_zero(&self) -> bool;

    /// True iff every component is finite
    fn is_all_finite(&self) -> bool;
}

impl Vector3Ext for Vector3<f32> {
    fn safe_normalize(&self) -> Vector3<f32> {
        match self.try_normalize_checked() {
            Ok(unit) => unit,
            Err(_) => {
                warn!("attempted to normalize a near-zero vector {:?}", self.as_slice());
                Vector3::zeros()
            }
        }
    }

    fn try_normalize_checked(&self) -> Result<Vector3<f32>, GyroSpaceError> {
        if !self.is_all_finite() {
            return Err(GyroSpaceError::NonFiniteSample);
        }

        let mut v = *self;
        let mut magnitude = v.norm();
        // Finite components can still overflow the sum of squares
        if !magnitude.is_finite() {
            v /= v.amax();
            magnitude = v.norm();
        }
        if magnitude < EPSILON {
            return Err(GyroSpaceError::DegenerateVector);
        }
        Ok(v / magnitude)
    }

    fn is_near_zero(&self) -> bool {
        self.iter().all(|c| ComplexField::abs(*c) < EPSILON)
    }

    fn is_all_finite(&self) -> bool {
        self.iter().all(|c| c.is_finite())
    }
}

/// Component-wise `a + (b - a) * t`. `t` is not clamped.
pub fn lerp(a: Vector3<f32>, b: Vector3<f32>, t: f32) -> Vector3<f32> {
    a + (b - a) * t
}

/// Reflects `v` against the plane with the given unit `normal`
pub fn reflect(v: Vector3<f32>, normal: Vector3<f32>) -> Vector3<f32> {
    v - normal * (2.0 * v.dot(&normal))
}

/// 4×4 identity transform
pub fn identity_matrix() -> Matrix4<f32> {
    Matrix4::identity()
}

/// Transforms `v` as a homogeneous point (w = 1) by a row-major matrix.
///
/// Only x/y/z of the result are returned; w is discarded.
pub fn multiply_matrix_vector(m: &Matrix4<f32>, v: Vector3<f32>) -> Vector3<f32> {
    Vector3::new(
        m[(0, 0)] * v.x + m[(1, 0)] * v.y + m[(2, 0)] * v.z + m[(3, 0)],
        m[(0, 1)] * v.x + m[(1, 1)] * v.y + m[(2, 1)] * v.z + m[(3, 1)],
        m[(0, 2)] * v.x + m[(1, 2)] * v.y + m[(2, 2)] * v.z + m[(3, 2)],
    )
}

/// Builds a rotation that carries "up" (0, 1, 0) onto the Y/Z direction of `gravity`
///
/// Row 0 leaves X untouched. Rows 1 and 2 rotate the Y/Z plane using the
/// normalized `(y, z)` components of the gravity vector. The input is
/// re-normalized here; a degenerate gravity falls back to [`DEFAULT_UP`], and a
/// gravity with no Y/Z component yields the identity.
pub fn matrix_from_gravity(gravity: Vector3<f32>) -> Matrix4<f32> {
    let g = match gravity.try_normalize_checked() {
        Ok(g) => g,
        Err(_) => {
            warn!("degenerate gravity for view matrix, using default up");
            DEFAULT_UP
        }
    };

    let plane = ComplexField::sqrt(g.y * g.y + g.z * g.z);
    if plane < EPSILON {
        return identity_matrix();
    }
    let c = g.y / plane;
    let s = g.z / plane;

    rotation_about_x(c, s)
}

/// Row-vector rotation about X from the cosine and sine of the angle
#[rustfmt::skip]
fn rotation_about_x(c: f32, s: f32) -> Matrix4<f32> {
    Matrix4::new(
        1.0, 0.0, 0.0, 0.0,
        0.0,   c,   s, 0.0,
        0.0,  -s,   c, 0.0,
        0.0, 0.0, 0.0, 1.0,
    )
}

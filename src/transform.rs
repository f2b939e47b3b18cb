//! Local, Player and World space transforms
//!
//! These are pure functions over one tick of gyro input. Inputs and outputs
//! are (yaw, pitch, roll) triples carried in a `Vector3` as (x, y, z). The
//! tilt blend used by Player and World space is passed in already smoothed;
//! [`crate::OrientationContext`] owns the smoothing state.

use log::warn;
use nalgebra::{ComplexField, Matrix4, Vector3};

use crate::math::{
    DEFAULT_UP, Vector3Ext, identity_matrix, matrix_from_gravity, multiply_matrix_vector,
};
use crate::types::Sensitivity;

/// Instantaneous tilt factor: 1 when upright, 0 when flat
///
/// Computed as `|gravity.y|^exponent` and clamped to `[0, 1]`.
pub fn tilt_factor(gravity: Vector3<f32>, exponent: f32) -> f32 {
    let factor = ComplexField::powf(ComplexField::abs(gravity.y), exponent);
    if factor.is_finite() {
        factor.clamp(0.0, 1.0)
    } else {
        1.0
    }
}

/// First-order exponential smoothing step: `s + weight * (target - s)`
///
/// The result is clamped to `[0, 1]` so the smoothed factor can never leave
/// the blend range even with an out-of-range weight.
pub fn smooth_tilt(current: f32, target: f32, weight: f32) -> f32 {
    (current + weight * (target - current)).clamp(0.0, 1.0)
}

/// Returns a unit gravity vector, substituting the default up for unusable input
pub(crate) fn sanitize_gravity(gravity: Vector3<f32>) -> Vector3<f32> {
    match gravity.try_normalize_checked() {
        Ok(g) => g,
        Err(err) => {
            warn!("invalid gravity vector ({}), substituting default up", err);
            DEFAULT_UP
        }
    }
}

/// Passes `delta` through when every component is finite, otherwise zero
///
/// Finite but huge inputs can overflow during scaling or projection. The
/// camera gets no movement for that tick rather than an infinite one.
fn finite_or_zero(delta: Vector3<f32>, space: &str) -> Vector3<f32> {
    if delta.is_all_finite() {
        delta
    } else {
        warn!("{} space delta overflowed ({:?}), substituting zero", space, delta.as_slice());
        Vector3::zeros()
    }
}

/// Transforms gyro input into Local space
///
/// Each axis is scaled by its sensitivity. Rolling a handheld controller held
/// at an angle also reads as yaw, so `coupling_factor` (in `[0, 1]`, 0
/// disables it) feeds yaw back into the roll term that is subtracted from
/// yaw. The output roll is sign-inverted to stop perceived lean drift.
///
/// # Example
/// ```
/// use gyro_space::{Sensitivity, transform_local};
///
/// let out = transform_local(2.0, 1.0, 0.0, Sensitivity::default(), 0.0);
/// assert_eq!((out.x, out.y, out.z), (2.0, 1.0, 0.0));
/// ```
pub fn transform_local(
    yaw: f32,
    pitch: f32,
    roll: f32,
    sensitivity: Sensitivity,
    coupling_factor: f32,
) -> Vector3<f32> {
    let adjusted_roll = roll * sensitivity.roll - yaw * coupling_factor;

    let raw = Vector3::new(
        yaw * sensitivity.yaw - adjusted_roll,
        pitch * sensitivity.pitch,
        roll * sensitivity.roll,
    );

    let mut local = multiply_matrix_vector(&identity_matrix(), raw);
    local.z = -local.z;
    finite_or_zero(local, "local")
}

/// Transforms gyro input into Player space
///
/// `blend` is the smoothed tilt factor: at 1 (upright) yaw input drives yaw
/// output, at 0 (flat) roll input drives yaw output instead. Roll is flipped
/// before the view matrix is applied. With `ground_in_tilt` the view matrix is
/// built from `gravity`, otherwise it is the identity.
pub fn transform_player(
    yaw: f32,
    pitch: f32,
    roll: f32,
    gravity: Vector3<f32>,
    sensitivity: Sensitivity,
    blend: f32,
    ground_in_tilt: bool,
) -> Vector3<f32> {
    let gravity = sanitize_gravity(gravity);
    let blend = blend.clamp(0.0, 1.0);

    let scaled_yaw = yaw * sensitivity.yaw;
    let scaled_roll = roll * sensitivity.roll;

    let adjusted = Vector3::new(
        blend * scaled_yaw + (1.0 - blend) * scaled_roll,
        pitch * sensitivity.pitch,
        -(blend * scaled_roll + (1.0 - blend) * scaled_yaw),
    );

    let view: Matrix4<f32> = if ground_in_tilt {
        matrix_from_gravity(gravity)
    } else {
        identity_matrix()
    };
    finite_or_zero(multiply_matrix_vector(&view, adjusted), "player")
}

/// Transforms gyro input into World space
///
/// The blended input is projected onto gravity and onto the world X and Z
/// axes with their gravity-parallel parts removed, so output stays locked to
/// true up/down whatever the controller's tilt. An axis that vanishes (world
/// axis parallel to gravity) is left unnormalized and contributes nothing.
pub fn transform_world(
    yaw: f32,
    pitch: f32,
    roll: f32,
    gravity: Vector3<f32>,
    sensitivity: Sensitivity,
    blend: f32,
) -> Vector3<f32> {
    let gravity = sanitize_gravity(gravity);
    let blend = blend.clamp(0.0, 1.0);

    let scaled_yaw = yaw * sensitivity.yaw;
    let scaled_roll = roll * sensitivity.roll;

    let raw = Vector3::new(
        pitch * sensitivity.pitch,
        -scaled_yaw,
        -(blend * scaled_roll + (1.0 - blend) * scaled_yaw),
    );

    let pitch_axis = gravity_perpendicular(Vector3::x(), gravity);
    let roll_axis = gravity_perpendicular(Vector3::z(), gravity);

    let world = Vector3::new(
        -raw.dot(&gravity),
        raw.dot(&pitch_axis),
        raw.dot(&roll_axis),
    );
    finite_or_zero(world, "world")
}

/// `axis` with its component along `gravity` removed, normalized when non-degenerate
fn gravity_perpendicular(axis: Vector3<f32>, gravity: Vector3<f32>) -> Vector3<f32> {
    let perpendicular = axis - gravity * gravity.dot(&axis);
    if perpendicular.is_near_zero() {
        perpendicular
    } else {
        perpendicular.safe_normalize()
    }
}

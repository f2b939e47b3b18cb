//! Orientation context tying the gravity estimate to the space transforms

use log::debug;
use nalgebra::Vector3;

use crate::error::GyroSpaceError;
use crate::gravity::GravityEstimator;
use crate::transform::{
    sanitize_gravity, smooth_tilt, tilt_factor, transform_local, transform_player,
    transform_world,
};
use crate::types::{GyroSpace, GyroSpaceSettings, Sensitivity};

/// Per-device orientation state
///
/// Holds the gravity estimate and the smoothed tilt factor that Player,
/// World and dynamic transforms share. The tilt factor starts at 1.0
/// (upright), always lies in `[0, 1]`, and advances one smoothing step for
/// each Player, World or dynamic transform call.
///
/// All mutation goes through `&mut self`. Callers feeding samples from
/// several threads wrap the context in their own lock.
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use gyro_space::{OrientationContext, Sensitivity};
///
/// let mut context = OrientationContext::new();
///
/// // Each input tick: fuse the motion sensors, then transform the gyro delta
/// let accelerometer = Vector3::new(0.0, 1.0, 0.0);
/// let gyro_rotation = Vector3::new(0.0, 0.01, 0.0);
/// context.update_gravity(accelerometer, gyro_rotation, 0.05).unwrap();
///
/// let delta = context.transform_dynamic(1.5, 0.2, 0.0, Sensitivity::default(), 0.075);
/// assert!(delta.x > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct OrientationContext {
    settings: GyroSpaceSettings,
    gravity: GravityEstimator,
    smoothed_tilt: f32,
}

impl OrientationContext {
    /// Create a context with default settings
    pub fn new() -> Self {
        Self::with_settings(GyroSpaceSettings::default())
    }

    /// Create a context with the specified settings
    pub fn with_settings(settings: GyroSpaceSettings) -> Self {
        Self {
            settings,
            gravity: GravityEstimator::new(),
            smoothed_tilt: 1.0,
        }
    }

    /// Reset gravity and tilt smoothing, keeping the settings
    pub fn reset(&mut self) {
        self.gravity.reset();
        self.smoothed_tilt = 1.0;
    }

    /// Update settings
    pub fn set_settings(&mut self, settings: GyroSpaceSettings) {
        self.settings = settings;
    }

    /// Get current settings
    pub fn settings(&self) -> GyroSpaceSettings {
        self.settings
    }

    /// Fuse one accelerometer sample and gyro rotation into the gravity estimate
    ///
    /// See [`GravityEstimator::update`]. On error the estimate is unchanged or
    /// reset to the default up vector, as described there.
    pub fn update_gravity(
        &mut self,
        accelerometer: Vector3<f32>,
        gyro_rotation: Vector3<f32>,
        fusion_factor: f32,
    ) -> Result<(), GyroSpaceError> {
        self.gravity.update(accelerometer, gyro_rotation, fusion_factor)
    }

    /// Same as [`Self::update_gravity`] with the configured fusion factor
    pub fn update_gravity_default(
        &mut self,
        accelerometer: Vector3<f32>,
        gyro_rotation: Vector3<f32>,
    ) -> Result<(), GyroSpaceError> {
        self.update_gravity(accelerometer, gyro_rotation, self.settings.fusion_factor)
    }

    /// Manually override the gravity estimate
    pub fn set_gravity(&mut self, x: f32, y: f32, z: f32) -> Result<(), GyroSpaceError> {
        self.gravity.set(x, y, z)
    }

    /// Current gravity estimate
    pub fn gravity(&self) -> Vector3<f32> {
        self.gravity.gravity()
    }

    /// Force the gravity estimate back to (0, 1, 0)
    pub fn reset_gravity(&mut self) {
        self.gravity.reset();
    }

    /// Current smoothed tilt factor in `[0, 1]`
    pub fn smoothed_tilt(&self) -> f32 {
        self.smoothed_tilt
    }

    /// Local space transform; does not touch the tilt state
    pub fn transform_local(
        &self,
        yaw: f32,
        pitch: f32,
        roll: f32,
        sensitivity: Sensitivity,
        coupling_factor: f32,
    ) -> Vector3<f32> {
        transform_local(yaw, pitch, roll, sensitivity, coupling_factor)
    }

    /// Player space transform against an explicit gravity vector
    pub fn transform_player(
        &mut self,
        yaw: f32,
        pitch: f32,
        roll: f32,
        gravity: Vector3<f32>,
        sensitivity: Sensitivity,
    ) -> Vector3<f32> {
        let gravity = sanitize_gravity(gravity);
        let blend = self.advance_tilt(gravity);
        transform_player(
            yaw,
            pitch,
            roll,
            gravity,
            sensitivity,
            blend,
            self.settings.transform.ground_player_in_tilt,
        )
    }

    /// World space transform against an explicit gravity vector
    pub fn transform_world(
        &mut self,
        yaw: f32,
        pitch: f32,
        roll: f32,
        gravity: Vector3<f32>,
        sensitivity: Sensitivity,
    ) -> Vector3<f32> {
        let gravity = sanitize_gravity(gravity);
        let blend = self.advance_tilt(gravity);
        transform_world(yaw, pitch, roll, gravity, sensitivity, blend)
    }

    /// Picks the frame from the controller's attitude
    ///
    /// Reads the gravity estimate, advances the tilt smoothing once and blends
    /// yaw and roll by it. The blended triple goes through Local space with
    /// `coupling_factor`, then through Player space when `gravity.y` is above
    /// the upright threshold and World space otherwise. Sensitivities are
    /// applied once, in the blend.
    pub fn transform_dynamic(
        &mut self,
        yaw: f32,
        pitch: f32,
        roll: f32,
        sensitivity: Sensitivity,
        coupling_factor: f32,
    ) -> Vector3<f32> {
        let gravity = self.gravity.gravity();
        let blend = self.advance_tilt(gravity);

        let scaled_yaw = yaw * sensitivity.yaw;
        let scaled_roll = roll * sensitivity.roll;

        let dynamic_yaw = blend * scaled_yaw + (1.0 - blend) * scaled_roll;
        let dynamic_pitch = pitch * sensitivity.pitch;
        let dynamic_roll = blend * scaled_roll + (1.0 - blend) * scaled_yaw;

        let local = transform_local(
            dynamic_yaw,
            dynamic_pitch,
            dynamic_roll,
            Sensitivity::default(),
            coupling_factor,
        );

        if gravity.y > self.settings.transform.upright_threshold {
            transform_player(
                local.x,
                local.y,
                local.z,
                gravity,
                Sensitivity::default(),
                blend,
                self.settings.transform.ground_player_in_tilt,
            )
        } else {
            transform_world(
                local.x,
                local.y,
                local.z,
                gravity,
                Sensitivity::default(),
                blend,
            )
        }
    }

    /// Transform into an explicitly selected frame using the configured
    /// sensitivity, coupling factor and the current gravity estimate
    pub fn transform(&mut self, space: GyroSpace, yaw: f32, pitch: f32, roll: f32) -> Vector3<f32> {
        let sensitivity = self.settings.sensitivity;
        let gravity = self.gravity.gravity();
        match space {
            GyroSpace::Local => self.transform_local(
                yaw,
                pitch,
                roll,
                sensitivity,
                self.settings.transform.coupling_factor,
            ),
            GyroSpace::Player => self.transform_player(yaw, pitch, roll, gravity, sensitivity),
            GyroSpace::World => self.transform_world(yaw, pitch, roll, gravity, sensitivity),
        }
    }

    /// One exponential smoothing step of the tilt factor toward `gravity`'s tilt
    fn advance_tilt(&mut self, gravity: Vector3<f32>) -> f32 {
        let transform = &self.settings.transform;
        let target = tilt_factor(gravity, transform.tilt_exponent);
        let previous = self.smoothed_tilt;
        self.smoothed_tilt = smooth_tilt(previous, target, transform.tilt_smoothing);
        if !self.smoothed_tilt.is_finite() {
            self.smoothed_tilt = previous;
        }
        debug!("tilt factor {:.3} -> {:.3} (target {:.3})", previous, self.smoothed_tilt, target);
        self.smoothed_tilt
    }
}

impl Default for OrientationContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::DEFAULT_UP;

    #[test]
    fn test_new_context() {
        let context = OrientationContext::new();
        assert_eq!(context.gravity(), DEFAULT_UP);
        assert_eq!(context.smoothed_tilt(), 1.0);
    }

    #[test]
    fn test_tilt_smoothing_converges_monotonically() {
        let mut context = OrientationContext::new();
        context.set_gravity(0.0, 0.0, 1.0).unwrap();

        let mut previous = context.smoothed_tilt();
        for step in 0..100 {
            context.transform_dynamic(1.0, 0.0, 0.0, Sensitivity::default(), 0.0);
            let current = context.smoothed_tilt();
            assert!(current < previous, "step {}: {} !< {}", step, current, previous);
            assert!((0.0..=1.0).contains(&current));
            previous = current;
        }
        assert!(previous < 1e-3);

        // First step follows s += 0.1 * (target - s) exactly
        let mut context = OrientationContext::new();
        context.set_gravity(0.0, 0.0, 1.0).unwrap();
        context.transform_dynamic(0.0, 0.0, 0.0, Sensitivity::default(), 0.0);
        assert!((context.smoothed_tilt() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_local_does_not_advance_tilt() {
        let mut context = OrientationContext::new();
        context.set_gravity(0.0, 0.0, 1.0).unwrap();
        context.transform(GyroSpace::Local, 1.0, 1.0, 1.0);
        assert_eq!(context.smoothed_tilt(), 1.0);
        context.transform(GyroSpace::World, 1.0, 1.0, 1.0);
        assert!((context.smoothed_tilt() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_dynamic_upright_uses_player_space() {
        let mut context = OrientationContext::new();
        let out = context.transform_dynamic(1.0, 0.5, 0.0, Sensitivity::default(), 0.0);
        // Upright: blend stays at 1, local passes yaw/pitch, player keeps them
        assert!((out - Vector3::new(1.0, 0.5, 0.0)).norm() < 1e-5);
    }

    #[test]
    fn test_dynamic_flat_uses_world_space() {
        let mut context = OrientationContext::new();
        context.set_gravity(0.0, 0.0, 1.0).unwrap();
        let blend = 0.9;
        let out = context.transform_dynamic(1.0, 0.0, 0.0, Sensitivity::default(), 0.0);

        let local = transform_local(blend, 0.0, 1.0 - blend, Sensitivity::default(), 0.0);
        let expected = transform_world(
            local.x,
            local.y,
            local.z,
            Vector3::z(),
            Sensitivity::default(),
            blend,
        );
        assert!((out - expected).norm() < 1e-5);
    }

    #[test]
    fn test_dynamic_coupling_upright() {
        let mut context = OrientationContext::new();
        let out = context.transform_dynamic(1.0, 0.5, 0.0, Sensitivity::default(), 0.25);
        // adjusted roll = 0 - 1 * 0.25, so yaw picks up the coupling
        assert!((out - Vector3::new(1.25, 0.5, 0.0)).norm() < 1e-5, "{:?}", out);

        let mut uncoupled = OrientationContext::new();
        let out = uncoupled.transform_dynamic(1.0, 0.5, 0.0, Sensitivity::default(), 0.0);
        assert!((out - Vector3::new(1.0, 0.5, 0.0)).norm() < 1e-5);
    }

    #[test]
    fn test_dynamic_coupling_flat() {
        let mut context = OrientationContext::new();
        context.set_gravity(0.0, 0.0, 1.0).unwrap();
        let out = context.transform_dynamic(1.0, 0.0, 0.0, Sensitivity::default(), 0.25);

        // blend 0.9: local (1.025, 0, -0.1), world yaw = 0.9 * -0.1 + 0.1 * 1.025
        assert!((out - Vector3::new(0.0125, 0.0, 0.0)).norm() < 1e-5, "{:?}", out);

        let local = transform_local(0.9, 0.0, 0.1, Sensitivity::default(), 0.25);
        let expected = transform_world(
            local.x,
            local.y,
            local.z,
            Vector3::z(),
            Sensitivity::default(),
            0.9,
        );
        assert!((out - expected).norm() < 1e-5);
    }

    #[test]
    fn test_dynamic_player_grounded_in_tilt() {
        let settings = GyroSpaceSettings {
            transform: crate::types::TransformSettings {
                ground_player_in_tilt: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let gravity = Vector3::new(0.0, 0.8, 0.6);

        let mut context = OrientationContext::with_settings(settings);
        context.set_gravity(gravity.x, gravity.y, gravity.z).unwrap();
        let out = context.transform_dynamic(0.0, 1.0, 0.0, Sensitivity::default(), 0.075);
        // Upright enough for player space; pitch rides the gravity matrix's up row
        assert!((out - gravity).norm() < 1e-5, "{:?}", out);

        let mut ungrounded = OrientationContext::new();
        ungrounded.set_gravity(gravity.x, gravity.y, gravity.z).unwrap();
        let out = ungrounded.transform_dynamic(0.0, 1.0, 0.0, Sensitivity::default(), 0.075);
        assert!((out - Vector3::new(0.0, 1.0, 0.0)).norm() < 1e-5, "{:?}", out);
    }

    #[test]
    fn test_dynamic_overflow_yields_zero() {
        let mut context = OrientationContext::new();
        let out = context.transform_dynamic(3.0e38, 3.0e38, 3.0e38, Sensitivity::uniform(2.0), 0.5);
        assert_eq!(out, Vector3::zeros());
        assert_eq!(context.smoothed_tilt(), 1.0);
    }

    #[test]
    fn test_dynamic_zero_input() {
        let mut context = OrientationContext::new();
        context.set_gravity(0.3, 0.2, 0.9).unwrap();
        let out = context.transform_dynamic(0.0, 0.0, 0.0, Sensitivity::uniform(2.0), 0.5);
        assert!(out.norm() < 1e-6);
    }

    #[test]
    fn test_transform_uses_settings() {
        let settings = GyroSpaceSettings {
            sensitivity: Sensitivity::new(2.0, 3.0, 4.0),
            ..Default::default()
        };
        let mut context = OrientationContext::with_settings(settings);
        let out = context.transform(GyroSpace::Player, 1.0, 1.0, 0.0);
        assert!((out - Vector3::new(2.0, 3.0, 0.0)).norm() < 1e-5);
    }

    #[test]
    fn test_update_gravity_default_uses_configured_factor() {
        let settings = GyroSpaceSettings {
            fusion_factor: 1.0,
            ..Default::default()
        };
        let mut context = OrientationContext::with_settings(settings);
        context
            .update_gravity_default(Vector3::new(0.0, 0.0, -2.0), Vector3::zeros())
            .unwrap();
        assert!((context.gravity() - Vector3::new(0.0, 0.0, -1.0)).norm() < 1e-6);
    }

    #[test]
    fn test_reset() {
        let mut context = OrientationContext::new();
        context.set_gravity(1.0, 0.0, 0.0).unwrap();
        context.transform_dynamic(1.0, 0.0, 0.0, Sensitivity::default(), 0.0);
        context.reset();
        assert_eq!(context.gravity(), DEFAULT_UP);
        assert_eq!(context.smoothed_tilt(), 1.0);
    }
}

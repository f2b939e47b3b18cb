//! Gravity direction estimation from accelerometer and gyroscope samples

use log::{debug, warn};
use nalgebra::Vector3;

use crate::error::GyroSpaceError;
use crate::math::{DEFAULT_UP, Vector3Ext, lerp};

/// Running estimate of which way is "up" relative to the device
///
/// The accelerometer is low-drift but noisy and picks up linear acceleration;
/// integrating the gyroscope is smooth but drifts. Each update rotates the
/// estimate by the gyro delta and then pulls it toward the accelerometer
/// direction by a fusion factor, which bounds the error well enough to tell
/// an upright controller from a flat one.
///
/// The estimate is always a finite unit vector or exactly [`DEFAULT_UP`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityEstimator {
    gravity: Vector3<f32>,
}

impl GravityEstimator {
    /// Create an estimator holding the default up vector
    pub fn new() -> Self {
        Self { gravity: DEFAULT_UP }
    }

    /// Fuse one accelerometer sample and one gyro rotation into the estimate
    ///
    /// # Arguments
    /// * `accelerometer` - Raw accelerometer reading, any scale
    /// * `gyro_rotation` - Rotation since the last update, small-angle
    /// * `fusion_factor` - Blend weight toward the accelerometer in `[0, 1]`
    ///
    /// # Errors
    /// The estimate is left unchanged when `fusion_factor` is outside `[0, 1]`
    /// or any input component is non-finite. A blend that collapses to a
    /// near-zero vector resets the estimate to the default and reports
    /// [`GyroSpaceError::DegenerateVector`].
    ///
    /// # Example
    /// ```
    /// use nalgebra::Vector3;
    /// use gyro_space::GravityEstimator;
    ///
    /// let mut estimator = GravityEstimator::new();
    /// estimator
    ///     .update(Vector3::new(0.0, 0.0, 9.81), Vector3::zeros(), 0.1)
    ///     .unwrap();
    /// assert!(estimator.gravity().z > 0.0);
    /// ```
    pub fn update(
        &mut self,
        accelerometer: Vector3<f32>,
        gyro_rotation: Vector3<f32>,
        fusion_factor: f32,
    ) -> Result<(), GyroSpaceError> {
        if !(0.0..=1.0).contains(&fusion_factor) {
            warn!("fusion factor {} outside [0, 1], gravity update skipped", fusion_factor);
            return Err(GyroSpaceError::InvalidFusionFactor(fusion_factor));
        }
        if !accelerometer.is_all_finite() || !gyro_rotation.is_all_finite() {
            warn!("non-finite sensor sample, gravity update skipped");
            return Err(GyroSpaceError::NonFiniteSample);
        }

        let accelerometer_normalized = accelerometer.safe_normalize();

        // First-order rotation: g + ω × g
        let rotated = self.gravity + gyro_rotation.cross(&self.gravity);

        let blended = lerp(rotated, accelerometer_normalized, fusion_factor);
        match blended.try_normalize_checked() {
            Ok(gravity) => {
                self.gravity = gravity;
                Ok(())
            }
            Err(GyroSpaceError::DegenerateVector) => {
                warn!("gravity blend is degenerate, resetting to default up");
                self.gravity = DEFAULT_UP;
                Err(GyroSpaceError::DegenerateVector)
            }
            Err(_) => {
                warn!("gravity blend overflowed, resetting to default up");
                self.gravity = DEFAULT_UP;
                Err(GyroSpaceError::NonFiniteGravity)
            }
        }
    }

    /// Manually override the estimate
    ///
    /// A non-finite component resets to [`DEFAULT_UP`]. A vector shorter than
    /// [`crate::EPSILON`] is implausible and the previous estimate is retained.
    pub fn set(&mut self, x: f32, y: f32, z: f32) -> Result<(), GyroSpaceError> {
        let candidate = Vector3::new(x, y, z);
        if !candidate.is_all_finite() {
            warn!("gravity vector contains non-finite values, resetting to default up");
            self.gravity = DEFAULT_UP;
            return Err(GyroSpaceError::NonFiniteGravity);
        }

        self.gravity = match candidate.try_normalize_checked() {
            Ok(gravity) => gravity,
            Err(err) => {
                warn!("gravity vector magnitude too small, retaining previous value");
                return Err(err);
            }
        };
        debug!("gravity set to {:?}", self.gravity.as_slice());
        Ok(())
    }

    /// Current estimate
    pub fn gravity(&self) -> Vector3<f32> {
        self.gravity
    }

    /// Force the estimate back to the default up vector
    pub fn reset(&mut self) {
        debug!("gravity reset to default up");
        self.gravity = DEFAULT_UP;
    }
}

impl Default for GravityEstimator {
    fn default() -> Self {
        Self::new()
    }
}

//! Core types and settings for the gyro space transforms

use crate::error::GyroSpaceError;

/// Reference frame a gyro delta is expressed in
///
/// # Frames
/// - **Local**: fixed to the controller body, ignores tilt
/// - **Player**: blends yaw and roll by how upright the controller is held
/// - **World**: locked to the estimated gravity direction
///
/// # Example
/// ```
/// use gyro_space::GyroSpace;
///
/// // Numeric selectors used by input glue: 1 = Local, 2 = Player, 3 = World
/// assert_eq!(GyroSpace::try_from(2), Ok(GyroSpace::Player));
/// assert!(GyroSpace::try_from(7).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GyroSpace {
    /// Device body frame
    Local,
    /// Holder-relative frame
    #[default]
    Player,
    /// Gravity-relative frame
    World,
}

impl TryFrom<u8> for GyroSpace {
    type Error = GyroSpaceError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(GyroSpace::Local),
            2 => Ok(GyroSpace::Player),
            3 => Ok(GyroSpace::World),
            other => Err(GyroSpaceError::InvalidSpace(other)),
        }
    }
}

/// Per-axis sensitivity multipliers
///
/// Units are the caller's: sensitivities only need to be compatible with
/// whatever the gyro deltas are measured in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sensitivity {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl Sensitivity {
    /// Creates sensitivities for yaw, pitch and roll
    pub const fn new(yaw: f32, pitch: f32, roll: f32) -> Self {
        Self { yaw, pitch, roll }
    }

    /// Same multiplier on every axis
    pub const fn uniform(value: f32) -> Self {
        Self::new(value, value, value)
    }
}

impl Default for Sensitivity {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}

/// Tuning for the tilt blend and dynamic frame selection
///
/// # Example
/// ```
/// use gyro_space::TransformSettings;
///
/// let settings = TransformSettings {
///     tilt_smoothing: 0.2,          // React faster to tilt changes
///     ground_player_in_tilt: true,  // Rotate player space by the gravity estimate
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformSettings {
    /// Exponent applied to `|gravity.y|` to form the tilt factor (typically 0.75)
    ///
    /// Values below 1 flatten the response to small tilts and sharpen it
    /// near the upright/flat transitions.
    pub tilt_exponent: f32,
    /// Weight of each new tilt measurement in the smoothed factor (typically 0.1)
    pub tilt_smoothing: f32,
    /// `gravity.y` above which dynamic orientation uses player space (typically 0.5)
    pub upright_threshold: f32,
    /// Default yaw/roll coupling compensation in `[0, 1]`; 0 disables it
    pub coupling_factor: f32,
    /// Whether player space applies the gravity-aligned view matrix
    ///
    /// When false the identity matrix is used and the raw gyro axes are kept.
    pub ground_player_in_tilt: bool,
}

impl Default for TransformSettings {
    fn default() -> Self {
        Self {
            tilt_exponent: 0.75,
            tilt_smoothing: 0.1,
            upright_threshold: 0.5,
            coupling_factor: 0.075,
            ground_player_in_tilt: false,
        }
    }
}

/// Complete configuration of an orientation context
///
/// # Example
/// ```
/// use gyro_space::{GyroSpaceSettings, OrientationContext, Sensitivity};
///
/// let settings = GyroSpaceSettings {
///     sensitivity: Sensitivity::new(1.5, 1.0, 0.5),
///     fusion_factor: 0.02,      // Trust the gyro more between accel corrections
///     ..Default::default()
/// };
/// let context = OrientationContext::with_settings(settings);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GyroSpaceSettings {
    /// Tilt blend and frame selection tuning
    pub transform: TransformSettings,
    /// Sensitivities used by [`crate::OrientationContext::transform`]
    pub sensitivity: Sensitivity,
    /// Blend weight toward the accelerometer in `[0, 1]` (suggest 0.02 to 0.10)
    ///
    /// Low values favour gyro-integrated continuity, high values favour
    /// accelerometer correction.
    pub fusion_factor: f32,
}

impl Default for GyroSpaceSettings {
    fn default() -> Self {
        Self {
            transform: TransformSettings::default(),
            sensitivity: Sensitivity::default(),
            fusion_factor: 0.05,
        }
    }
}

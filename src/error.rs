//! Diagnostics reported by the gravity estimator and frame selection

use thiserror::Error;

/// Reasons an input was rejected or substituted.
///
/// None of these abort processing: the numeric fallback has already been
/// applied by the time the error is returned, so callers may ignore it or
/// forward it to telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GyroSpaceError {
    /// Fusion factor outside `[0, 1]`; the estimate is unchanged
    #[error("fusion factor {0} is outside [0, 1]")]
    InvalidFusionFactor(f32),
    /// A sensor sample contained NaN or infinity; the estimate is unchanged
    #[error("sensor sample contains non-finite components")]
    NonFiniteSample,
    /// A gravity vector contained NaN or infinity; the default up vector was used
    #[error("gravity vector contains non-finite components")]
    NonFiniteGravity,
    /// A direction was required but the vector was near zero
    #[error("vector magnitude is below epsilon")]
    DegenerateVector,
    /// Numeric frame selector that maps to no gyro space
    #[error("invalid gyro space selector {0}")]
    InvalidSpace(u8),
}

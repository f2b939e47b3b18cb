#![no_std]

//! [![github]](https://github.com/wboayue/gyro-space)&ensp;[![crates-io]](https://crates.io/crates/gyro-space)&ensp;[![license]](https://opensource.org/licenses/MIT)
//!
//! [github]: https://img.shields.io/badge/github-8da0cb?style=for-the-badge&labelColor=555555&logo=github
//! [crates-io]: https://img.shields.io/badge/crates.io-fc8d62?style=for-the-badge&labelColor=555555&logo=rust
//! [license]: https://img.shields.io/badge/License-MIT-blue.svg?style=for-the-badge&labelColor=555555
//!
//! Gyro Space - gyro aiming transforms for handheld motion controllers
//!
//! Based on the gyro space work by Jibb Smart (JoyShockMapper, GamepadMotionHelpers).
//!
//! This library turns raw gyroscope deltas into camera yaw/pitch/roll deltas
//! in one of three reference frames, and keeps a lightweight estimate of the
//! controller's gravity direction to choose and blend between them.
//!
//! # Features
//!
//! - Local space with yaw/roll coupling compensation
//! - Player space blending yaw and roll by how upright the controller is held
//! - World space locked to the estimated gravity direction
//! - Dynamic orientation that picks the frame from the controller's attitude
//! - Complementary gravity estimate fusing accelerometer and gyroscope
//! - Smoothed tilt factor to avoid judder near the upright/flat boundary
//! - `#![no_std]` compatible for embedded systems
//!
//! # Quick Start
//!
//! ```rust
//! use nalgebra::Vector3;
//! use gyro_space::{GyroSpace, OrientationContext};
//!
//! let mut context = OrientationContext::new();
//!
//! // Sensor readings for one tick
//! let accelerometer = Vector3::new(0.0, 1.0, 0.0);  // g
//! let gyro_rotation = Vector3::new(0.0, 0.0, 0.0);  // rad this tick
//!
//! // Update the gravity estimate with the configured fusion factor
//! context.update_gravity_default(accelerometer, gyro_rotation).unwrap();
//!
//! // Transform a gyro delta (yaw, pitch, roll) into player space
//! let delta = context.transform(GyroSpace::Player, 10.0, 5.0, 3.0);
//! println!("camera delta: {} {} {}", delta.x, delta.y, delta.z);
//! ```

mod context;
pub mod error;
mod gravity;
pub mod math;
pub mod transform;
mod types;

// Re-export all public types and functions
pub use context::OrientationContext;
pub use error::GyroSpaceError;
pub use gravity::GravityEstimator;
pub use math::{DEFAULT_UP, EPSILON, Vector3Ext};
pub use transform::{tilt_factor, transform_local, transform_player, transform_world};
pub use types::*;

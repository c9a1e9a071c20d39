// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Sensing
//!
//! Turns raw ADC readings into physical inputs for the flow estimator.
//!
//! ## Modules
//!
//! - [`edge`] - Sample window and rising-edge frequency detector for the vortex sensor.
//! - [`temperature`] - Internal temperature sensor conversion.

pub mod edge;
pub mod temperature;

pub use edge::{DetectorConfig, EdgeDetector, EdgeEvent, SampleWindow, WINDOW_LEN};
pub use temperature::TempSensorCalibration;

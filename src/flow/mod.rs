// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Flow Computation
//!
//! Turns a shedding frequency and a fluid temperature into volumetric flow.
//!
//! ## Modules
//!
//! - [`estimator`] - Viscosity/density correlations and the Strouhal/Reynolds iteration.

pub mod estimator;

pub use estimator::{FlowConfig, FlowEstimator, FlowReading, FlowState};

/// Reasons a flow value could not be produced this iteration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlowFault {
    /// Fewer than two rising edges in the sample window.
    NoSignal,
    /// Viscosity correlation left its valid range.
    Viscosity,
    /// Strouhal number is zero, negative, or not finite.
    Strouhal,
    /// Reynolds feedback produced a non-finite value.
    Reynolds,
}

impl FlowFault {
    /// Short label for console and LCD output.
    pub fn as_str(self) -> &'static str {
        match self {
            FlowFault::NoSignal => "no signal",
            FlowFault::Viscosity => "viscosity",
            FlowFault::Strouhal => "strouhal",
            FlowFault::Reynolds => "reynolds",
        }
    }
}

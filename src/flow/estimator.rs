// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Vortex flow estimator.
//!
//! Each call to [`FlowEstimator::update`] runs the correlation chain once:
//!
//! 1. temperature to Kelvin
//! 2. dynamic viscosity (water, Vogel-type correlation)
//! 3. density (water, rational-polynomial correlation)
//! 4. Strouhal number from the *previous* Reynolds number, running-averaged
//! 5. flow velocity from shedding frequency and bluff body width
//! 6. Reynolds number, stored for the next call
//! 7. volumetric flow for the pipe bore
//!
//! Scaling matches the serial output: temperature is °C × 100, frequency Hz × 100, viscosity
//! × 10⁶, Strouhal × 10⁴, velocity and flow × 100. Arithmetic is `f32`; frequency and flow are
//! truncated to `u32` on the way out.
//!
//! Works in `no_std` and does not allocate memory.

use micromath::F32Ext;

use crate::flow::FlowFault;

/// 0 °C in Kelvin × 100.
pub const KELVIN_OFFSET_X100: i32 = 27315;

/// Meter geometry and iteration tuning.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FlowConfig {
    /// Bluff body width (in).
    pub bluff_body_width_in: f32,
    /// Pipe inner diameter (in).
    pub pipe_diameter_in: f32,
    /// Pipe inner diameter (m).
    pub pipe_diameter_m: f32,
    /// Reynolds number used before the first estimate and after a Strouhal/Reynolds fault.
    pub initial_reynolds: f32,
    /// Iterations averaged before the Strouhal accumulator is folded back into one sample.
    pub smoothing_window: u16,
    /// Optional clamp on the Reynolds feedback, `(min, max)`.
    pub reynolds_limits: Option<(f32, f32)>,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            bluff_body_width_in: 0.5,
            pipe_diameter_in: 2.900,
            pipe_diameter_m: 0.07366,
            initial_reynolds: 1_500_000.0,
            smoothing_window: 1000,
            reynolds_limits: None,
        }
    }
}

impl FlowConfig {
    pub fn with_geometry(mut self, bluff_body_width_in: f32, pipe_diameter_in: f32) -> Self {
        self.bluff_body_width_in = bluff_body_width_in;
        self.pipe_diameter_in = pipe_diameter_in;
        self.pipe_diameter_m = pipe_diameter_in * 0.0254;
        self
    }

    pub fn with_initial_reynolds(mut self, reynolds: f32) -> Self {
        self.initial_reynolds = reynolds;
        self
    }

    pub fn with_smoothing_window(mut self, iterations: u16) -> Self {
        self.smoothing_window = iterations;
        self
    }

    /// Clamp the Reynolds number fed back into the Strouhal correlation.
    pub fn with_reynolds_limits(mut self, min: f32, max: f32) -> Self {
        self.reynolds_limits = Some((min, max));
        self
    }
}

/// Intermediate and final quantities of one successful iteration.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FlowReading {
    /// × 10⁶
    pub viscosity: f32,
    /// kg/m³
    pub density: f32,
    /// Averaged Strouhal number × 10⁴
    pub strouhal: f32,
    /// × 100
    pub velocity: f32,
    pub reynolds: f32,
    /// GPM × 100
    pub flow: f32,
}

/// Everything the estimator carries from one loop pass to the next.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowState {
    /// Hz × 100
    pub frequency: u32,
    /// °C × 100
    pub temperature: i32,
    pub strouhal_accumulator: f32,
    pub iterations: u16,
    /// Feeds step 4 of the next iteration.
    pub reynolds: f32,
    /// GPM × 100
    pub flow_rate: u32,
    pub reading: FlowReading,
    /// Set when the last update failed, cleared by the next good one.
    pub fault: Option<FlowFault>,
}

impl FlowState {
    pub fn new(initial_reynolds: f32) -> Self {
        Self {
            frequency: 0,
            temperature: 2300,
            strouhal_accumulator: 0.0,
            iterations: 0,
            reynolds: initial_reynolds,
            flow_rate: 0,
            reading: FlowReading::default(),
            fault: None,
        }
    }
}

/// Dynamic viscosity × 10⁶ at `temperature` (°C × 100).
pub fn viscosity(temperature: i32) -> Result<f32, FlowFault> {
    let kelvin = (temperature + KELVIN_OFFSET_X100) as f32;
    let denom = kelvin - 14000.0;
    if denom <= 0.0 {
        return Err(FlowFault::Viscosity);
    }

    let mu = 24.0 * F32Ext::powf(10.0, 24780.0 / denom);
    if !mu.is_finite() || mu <= 0.0 {
        return Err(FlowFault::Viscosity);
    }
    Ok(mu)
}

/// Density (kg/m³) at `temperature` (°C × 100).
///
/// The correlation is applied to the scaled temperature as-is, as calibrated.
pub fn density(temperature: i32) -> f32 {
    let t = temperature as f32;
    let dt = t * 0.01 - 3.9863;
    1000.0 * (1.0 - ((t + 28894.14) / (508929.2 * (t + 6812.963))) * (dt * dt))
}

/// Instantaneous Strouhal number × 10⁴ for a Reynolds number.
pub fn strouhal(reynolds: f32) -> Result<f32, FlowFault> {
    if !reynolds.is_finite() || reynolds <= 0.0 {
        return Err(FlowFault::Strouhal);
    }

    let st = 2684.0 - 10356.0 / F32Ext::sqrt(reynolds);
    if !st.is_finite() || st <= 0.0 {
        return Err(FlowFault::Strouhal);
    }
    Ok(st)
}

pub struct FlowEstimator {
    config: FlowConfig,
    state: FlowState,
}

impl FlowEstimator {
    pub fn new(config: FlowConfig) -> Self {
        Self {
            state: FlowState::new(config.initial_reynolds),
            config,
        }
    }

    #[inline]
    pub fn state(&self) -> &FlowState {
        &self.state
    }

    #[inline]
    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    /// Run one iteration and commit it.
    ///
    /// `frequency` is the edge detector result (Hz × 100). On failure nothing but the fault,
    /// the temperature and (for `NoSignal`) the frequency is updated, so the Strouhal average is
    /// not polluted.
    pub fn update(
        &mut self,
        frequency: Result<u32, FlowFault>,
        temperature: i32,
    ) -> Result<FlowReading, FlowFault> {
        let result = frequency.and_then(|f| self.next_state(f, temperature));

        match result {
            Ok(next) => {
                self.state = next;
                Ok(self.state.reading)
            }
            Err(fault) => {
                self.state.temperature = temperature;
                self.state.fault = Some(fault);
                match fault {
                    FlowFault::NoSignal => self.state.frequency = 0,
                    FlowFault::Strouhal | FlowFault::Reynolds => {
                        self.state.reynolds = self.config.initial_reynolds;
                    }
                    FlowFault::Viscosity => {}
                }
                Err(fault)
            }
        }
    }

    /// Compute the state one iteration ahead without committing it.
    pub fn next_state(&self, frequency: u32, temperature: i32) -> Result<FlowState, FlowFault> {
        let cfg = &self.config;
        let prev = &self.state;

        let viscosity = viscosity(temperature)?;
        let density = density(temperature);

        let st = strouhal(prev.reynolds)?;
        let mut iterations = prev.iterations.saturating_add(1);
        let mut accumulator = prev.strouhal_accumulator + st;
        let st_const = accumulator / f32::from(iterations);
        if !st_const.is_finite() || st_const <= 0.0 {
            return Err(FlowFault::Strouhal);
        }
        if iterations > cfg.smoothing_window {
            accumulator = st_const;
            iterations = 1;
        }

        let velocity = 10000.0 * frequency as f32 * cfg.bluff_body_width_in / st_const;

        let mut reynolds =
            1_000_000.0 * density * (velocity / 3937.0) * cfg.pipe_diameter_m / viscosity;
        if !reynolds.is_finite() {
            return Err(FlowFault::Reynolds);
        }
        if let Some((min, max)) = cfg.reynolds_limits {
            reynolds = reynolds.clamp(min, max);
        }

        let flow = 2.45 * cfg.pipe_diameter_in * cfg.pipe_diameter_in * velocity / 12.0;

        Ok(FlowState {
            frequency,
            temperature,
            strouhal_accumulator: accumulator,
            iterations,
            reynolds,
            flow_rate: flow as u32,
            reading: FlowReading {
                viscosity,
                density,
                strouhal: st_const,
                velocity,
                reynolds,
                flow,
            },
            fault: None,
        })
    }
}

impl Default for FlowEstimator {
    fn default() -> Self {
        Self::new(FlowConfig::default())
    }
}

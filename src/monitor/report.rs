// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Periodic status report on the debug console.
//!
//! NORMAL mode prints digit-packed decimals with two fractional digits:
//!
//! ```text
//! NORMAL
//! Flow (GPM): 12.82
//! Temp (C): 23.00
//! Freq (Hz): 4.00
//! ```
//!
//! DEBUG mode prints the same fields as raw hex words plus the intermediate quantities.

use crate::flow::FlowState;
use crate::monitor::{ByteSink, DisplayMode, DisplayTick};

/// Largest value [`pack_decimal`] can pack into eight nibbles.
pub const PACK_LIMIT: u32 = 99_999_999;

/// Fractional digits of every × 100 quantity.
const DECIMALS: u8 = 2;

/// Pack the decimal digits of `value` into nibbles so that its hex rendering reads as decimal
/// (`23` becomes `0x23`). Values above [`PACK_LIMIT`] are returned unchanged.
pub fn pack_decimal(value: u32) -> u32 {
    if value > PACK_LIMIT {
        return value;
    }
    let mut rest = value;
    let mut packed = 0u32;
    for i in 0..8 {
        packed |= (rest % 10) << (i * 4);
        rest /= 10;
    }
    packed
}

/// Extra output in DEBUG reports, ahead of the status fields.
pub trait Diagnostics {
    fn dump<W: ByteSink>(&mut self, out: &mut W);
}

/// No extra DEBUG output.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoDiagnostics;

impl Diagnostics for NoDiagnostics {
    fn dump<W: ByteSink>(&mut self, _out: &mut W) {}
}

#[derive(Default)]
pub struct StatusReporter<D: Diagnostics = NoDiagnostics> {
    diagnostics: D,
}

impl<D: Diagnostics> StatusReporter<D> {
    pub fn new(diagnostics: D) -> Self {
        Self { diagnostics }
    }

    /// Called once per loop pass. Clears the tick flag whether or not anything is printed, and
    /// returns whether the tick was due.
    pub fn poll<W: ByteSink>(
        &mut self,
        tick: &DisplayTick,
        mode: DisplayMode,
        state: &FlowState,
        loops: u32,
        out: &mut W,
    ) -> bool {
        if !tick.take() {
            return false;
        }

        match mode {
            DisplayMode::Quiet => {}
            DisplayMode::Normal => {
                out.write_str("\r\n\r\nNORMAL ");
                self.status_normal(state, out);
            }
            DisplayMode::Debug => {
                out.write_str("\r\n\r\nDEBUG ");
                self.diagnostics.dump(out);
                self.status_debug(state, loops, out);
            }
        }
        true
    }

    fn status_normal<W: ByteSink>(&self, state: &FlowState, out: &mut W) {
        out.write_str("\r\nFlow (GPM): ");
        match state.fault {
            Some(fault) => write_fault(fault.as_str(), out),
            None => out.write_packed_decimal(pack_decimal(state.flow_rate), DECIMALS),
        }

        out.write_str("\r\nTemp (C): ");
        if state.temperature < 0 {
            out.write_byte(b'-');
        }
        out.write_packed_decimal(pack_decimal(state.temperature.unsigned_abs()), DECIMALS);

        out.write_str("\r\nFreq (Hz): ");
        out.write_packed_decimal(pack_decimal(state.frequency), DECIMALS);
    }

    fn status_debug<W: ByteSink>(&self, state: &FlowState, loops: u32, out: &mut W) {
        out.write_str("\r\nFlow (GPM): ");
        match state.fault {
            Some(fault) => write_fault(fault.as_str(), out),
            None => write_word(state.flow_rate, out),
        }
        out.write_str("\r\nTemp (C): ");
        write_word(state.temperature as u32, out);
        out.write_str("\r\nFreq (Hz): ");
        write_word(state.frequency, out);

        let r = &state.reading;
        out.write_str("\r\nVelocity: ");
        write_word(r.velocity as u32, out);
        out.write_str("\r\nViscosity (x10^-6): ");
        write_word(r.viscosity as u32, out);
        out.write_str("\r\nDensity: ");
        write_word(r.density as u32, out);
        out.write_str("\r\nSt: ");
        write_word(r.strouhal as u32, out);
        out.write_str("\r\nRe: ");
        write_word(state.reynolds as u32, out);
        out.write_str("\r\nLoops: ");
        out.write_u32(loops);
    }
}

fn write_word<W: ByteSink>(n: u32, out: &mut W) {
    out.write_str("0x");
    out.write_hex_u32(n);
}

fn write_fault<W: ByteSink>(reason: &str, out: &mut W) {
    out.write_str("FAULT (");
    out.write_str(reason);
    out.write_byte(b')');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::{FlowEstimator, FlowFault};
    use crate::monitor::console::fake::FakeConsole;

    struct Marker;

    impl Diagnostics for Marker {
        fn dump<W: ByteSink>(&mut self, out: &mut W) {
            out.write_str("<regs>");
        }
    }

    fn state(flow: u32, temperature: i32, frequency: u32) -> FlowState {
        FlowState {
            flow_rate: flow,
            temperature,
            frequency,
            ..FlowState::new(1_500_000.0)
        }
    }

    fn report(mode: DisplayMode, state: &FlowState) -> String {
        let tick = DisplayTick::new(1);
        tick.raise();
        let mut out = FakeConsole::default();
        assert!(StatusReporter::new(Marker).poll(&tick, mode, state, 7, &mut out));
        out.take_output()
    }

    #[test]
    fn pack_decimal_packs_digits() {
        assert_eq!(pack_decimal(0), 0);
        assert_eq!(pack_decimal(23), 0x23);
        assert_eq!(pack_decimal(1282), 0x1282);
        assert_eq!(pack_decimal(PACK_LIMIT), 0x9999_9999);
    }

    #[test]
    fn pack_decimal_passes_large_values() {
        assert_eq!(pack_decimal(100_000_000), 100_000_000);
        assert_eq!(pack_decimal(u32::MAX), u32::MAX);
    }

    #[test]
    fn normal_report() {
        let text = report(DisplayMode::Normal, &state(1282, 2300, 400));
        assert_eq!(
            text,
            "\r\n\r\nNORMAL \r\nFlow (GPM): 12.82\r\nTemp (C): 23.00\r\nFreq (Hz): 4.00"
        );
    }

    #[test]
    fn normal_report_negative_temperature() {
        let text = report(DisplayMode::Normal, &state(0, -150, 0));
        assert!(text.contains("Temp (C): -1.50"));
    }

    #[test]
    fn debug_report_is_hex_with_diagnostics() {
        let text = report(DisplayMode::Debug, &state(1282, 2300, 400));
        assert!(text.starts_with("\r\n\r\nDEBUG <regs>"));
        assert!(text.contains("\r\nFlow (GPM): 0x00000502"));
        assert!(text.contains("\r\nTemp (C): 0x000008FC"));
        assert!(text.contains("\r\nFreq (Hz): 0x00000190"));
        assert!(text.contains("\r\nRe: 0x0016E360"));
        assert!(text.ends_with("\r\nLoops: 7"));
    }

    #[test]
    fn debug_report_after_update() {
        let mut est = FlowEstimator::default();
        est.update(Ok(400), 2300).unwrap();
        let text = report(DisplayMode::Debug, est.state());
        assert!(text.contains("\r\nDensity: 0x000003E5"));
    }

    #[test]
    fn quiet_clears_flag_silently() {
        let tick = DisplayTick::new(1);
        tick.raise();
        let mut out = FakeConsole::default();
        let mut reporter: StatusReporter = StatusReporter::default();
        assert!(reporter.poll(&tick, DisplayMode::Quiet, &state(1, 1, 1), 0, &mut out));
        assert!(out.output.is_empty());
        assert!(!tick.is_ready());
    }

    #[test]
    fn idle_without_tick() {
        let tick = DisplayTick::new(1);
        let mut out = FakeConsole::default();
        let mut reporter: StatusReporter = StatusReporter::default();
        assert!(!reporter.poll(&tick, DisplayMode::Normal, &state(1, 1, 1), 0, &mut out));
        assert!(out.output.is_empty());
    }

    #[test]
    fn fault_replaces_flow() {
        let mut s = state(1282, 2300, 0);
        s.fault = Some(FlowFault::NoSignal);
        let text = report(DisplayMode::Normal, &s);
        assert!(text.contains("Flow (GPM): FAULT (no signal)"));
        assert!(text.contains("Freq (Hz): 0.00"));

        let text = report(DisplayMode::Debug, &s);
        assert!(text.contains("Flow (GPM): FAULT (no signal)"));
    }
}

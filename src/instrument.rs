// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! The instrument context driven by the superloop.
//!
//! `Instrument` owns all state that survives between loop passes (flow state, display mode, LED,
//! input line) so that `main` only has to feed it samples, a temperature, and its peripherals.
//!
//! Typical usage pattern:
//!
//! ```ignore
//! instrument.start(&mut usart);
//!
//! loop {
//!     window.fill_with(&mut read_sensor);
//!     instrument.run_once(window.as_slice(), temperature, &TICK, &mut usart, &mut lcd);
//! }
//! ```

use crate::flow::{FlowEstimator, FlowState};
use crate::monitor::{
    lcd, ByteSink, Console, Diagnostics, DisplayMode, DisplayModeController, DisplaySink,
    DisplayTick, NoDiagnostics, StatusLed, StatusReporter,
};
use crate::protocol::LineAccumulator;
use crate::sensing::EdgeDetector;

pub struct Instrument<L: StatusLed, D: Diagnostics = NoDiagnostics> {
    detector: EdgeDetector,
    estimator: FlowEstimator,
    line: LineAccumulator,
    modes: DisplayModeController<L>,
    reporter: StatusReporter<D>,
    loops: u32,
}

impl<L: StatusLed> Instrument<L> {
    /// Reference-board configuration without a diagnostics dump.
    pub fn new(led: L) -> Self {
        Self::with_parts(
            EdgeDetector::default(),
            FlowEstimator::default(),
            led,
            NoDiagnostics,
        )
    }
}

impl<L: StatusLed, D: Diagnostics> Instrument<L, D> {
    pub fn with_parts(
        detector: EdgeDetector,
        estimator: FlowEstimator,
        led: L,
        diagnostics: D,
    ) -> Self {
        Self {
            detector,
            estimator,
            line: LineAccumulator::new(),
            modes: DisplayModeController::new(led),
            reporter: StatusReporter::new(diagnostics),
            loops: 0,
        }
    }

    /// Print the command menu. Call once before the first loop pass.
    pub fn start<W: ByteSink>(&self, out: &mut W) {
        self.modes.show_menu(out);
    }

    /// One superloop pass: estimate flow, service the console, report if the tick is due.
    pub fn run_once<C: Console, S: DisplaySink>(
        &mut self,
        samples: &[u16],
        temperature: i32,
        tick: &DisplayTick,
        console: &mut C,
        lcd: &mut S,
    ) {
        self.loops = self.loops.wrapping_add(1);

        // A fault stays in the flow state for the reporter.
        let frequency = self.detector.frequency(samples);
        let _ = self.estimator.update(frequency, temperature);

        while let Some(byte) = console.poll_byte() {
            if let Some(line) = self.line.push(byte, self.modes.mode(), console) {
                self.modes.dispatch(line, console);
            }
        }

        let state = self.estimator.state();
        if self
            .reporter
            .poll(tick, self.modes.mode(), state, self.loops, console)
        {
            lcd::refresh(state, lcd);
        }
    }

    #[inline]
    pub fn flow(&self) -> &FlowState {
        self.estimator.state()
    }

    #[inline]
    pub fn mode(&self) -> DisplayMode {
        self.modes.mode()
    }

    #[inline]
    pub fn led_on(&self) -> bool {
        self.modes.led_on()
    }

    #[inline]
    pub fn loops(&self) -> u32 {
        self.loops
    }
}

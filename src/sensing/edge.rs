// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Vortex-shedding frequency from a window of raw sensor samples.
//!
//! The sensor signal is treated as a square-ish wave. A sample counts as "high" when it exceeds a
//! fraction of the running maximum; every low-to-high transition is a rising edge. The dominant
//! period is the mean spacing between consecutive edges, converted to a frequency with the sample
//! period of the ADC.
//!
//! Example:
//! ```ignore
//! let detector = EdgeDetector::new(DetectorConfig::default());
//! let freq_x100 = detector.frequency(window.as_slice())?;
//! ```

use crate::flow::FlowFault;

/// Samples per window on the reference board.
pub const WINDOW_LEN: usize = 25;

/// Fixed-capacity sample buffer, read with modulo wraparound.
#[derive(Clone, Debug)]
pub struct SampleWindow<const N: usize = WINDOW_LEN> {
    samples: [u16; N],
}

impl<const N: usize> SampleWindow<N> {
    pub const fn new() -> Self {
        Self { samples: [0; N] }
    }

    pub const fn from_samples(samples: [u16; N]) -> Self {
        Self { samples }
    }

    /// Refresh every slot from the given reader (one ADC conversion per slot).
    pub fn fill_with<F: FnMut() -> u16>(&mut self, mut read: F) {
        for s in self.samples.iter_mut() {
            *s = read();
        }
    }

    /// Sample at `i mod N`.
    #[inline]
    pub fn at(&self, i: usize) -> u16 {
        self.samples[i % N]
    }

    #[inline]
    pub fn as_slice(&self) -> &[u16] {
        &self.samples
    }
}

impl<const N: usize> Default for SampleWindow<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Edge detector tuning.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DetectorConfig {
    /// Fraction of the running maximum a sample must exceed to count as high.
    pub threshold_ratio: f32,
    /// Number of (wrapped) indices scanned per estimate.
    pub scan_len: usize,
    /// Time between samples (s).
    pub sample_period_s: f32,
    /// Output scale; 100 gives frequency in Hz × 100.
    pub scale: f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            threshold_ratio: 0.9,
            scan_len: 1000,
            sample_period_s: 0.0001,
            scale: 100.0,
        }
    }
}

impl DetectorConfig {
    pub fn with_scan_len(mut self, scan_len: usize) -> Self {
        self.scan_len = scan_len;
        self
    }

    pub fn with_sample_period(mut self, sample_period_s: f32) -> Self {
        self.sample_period_s = sample_period_s;
        self
    }
}

/// One rising edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EdgeEvent {
    /// Scan index of the edge.
    pub index: usize,
    /// Samples since the previous edge, `None` for the first edge of a scan.
    pub period_since_previous: Option<usize>,
}

/// Result of one scan.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PeriodEstimate {
    pub edges: usize,
    /// Mean edge spacing in samples.
    pub average_period: f32,
}

/// Iterator over the rising edges of a wrapped scan.
pub struct Edges<'a> {
    samples: &'a [u16],
    ratio: f32,
    index: usize,
    end: usize,
    max: u16,
    high: bool,
    /// Set by the first sub-threshold sample. A scan that opens on the baseline or mid-pulse
    /// has not seen a rising edge yet.
    armed: bool,
    last_edge: Option<usize>,
}

impl Iterator for Edges<'_> {
    type Item = EdgeEvent;

    fn next(&mut self) -> Option<EdgeEvent> {
        if self.samples.is_empty() {
            return None;
        }
        while self.index < self.end {
            let i = self.index;
            self.index += 1;

            let sample = self.samples[i % self.samples.len()];
            if f32::from(sample) > self.ratio * f32::from(self.max) {
                let rising = self.armed && !self.high;
                self.high = true;
                if sample > self.max {
                    self.max = sample;
                }
                if rising {
                    let event = EdgeEvent {
                        index: i,
                        period_since_previous: self.last_edge.map(|prev| i - prev),
                    };
                    self.last_edge = Some(i);
                    return Some(event);
                }
            } else {
                self.high = false;
                self.armed = true;
            }
        }
        None
    }
}

pub struct EdgeDetector {
    config: DetectorConfig,
}

impl EdgeDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Rising edges across one scan of `samples`. Edge state starts fresh on every call.
    pub fn edges<'a>(&self, samples: &'a [u16]) -> Edges<'a> {
        Edges {
            samples,
            ratio: self.config.threshold_ratio,
            index: 0,
            end: self.config.scan_len,
            max: 0,
            high: false,
            armed: false,
            last_edge: None,
        }
    }

    /// Mean period over one scan. Needs at least two edges.
    pub fn estimate_period(&self, samples: &[u16]) -> Result<PeriodEstimate, FlowFault> {
        let mut edges = 0usize;
        let mut total = 0usize;
        for edge in self.edges(samples) {
            edges += 1;
            total += edge.period_since_previous.unwrap_or(0);
        }

        if edges < 2 || total == 0 {
            return Err(FlowFault::NoSignal);
        }

        Ok(PeriodEstimate {
            edges,
            average_period: total as f32 / (edges - 1) as f32,
        })
    }

    /// Shedding frequency in Hz × `scale` (Hz × 100 by default), truncated.
    pub fn frequency(&self, samples: &[u16]) -> Result<u32, FlowFault> {
        let estimate = self.estimate_period(samples)?;
        let period_s = self.config.sample_period_s * estimate.average_period;
        let frequency = self.config.scale / period_s;
        if !frequency.is_finite() || frequency <= 0.0 {
            return Err(FlowFault::NoSignal);
        }
        Ok(frequency as u32)
    }
}

impl Default for EdgeDetector {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}

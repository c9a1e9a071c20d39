// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Text frames for the external SPI character LCD.
//!
//! Three fixed-format lines are pushed every report tick, independent of the console mode:
//! `Flow(GPM) 12.82`, `Freq(Hz) 399.59`, `Temp(C) 23.40`.

use crate::flow::FlowState;
use crate::monitor::{pack_decimal, ByteSink};

/// Characters per LCD line.
pub const FRAME_LEN: usize = 16;

/// Receiver of complete LCD frames (one SPI transaction each).
pub trait DisplaySink {
    fn send_frame(&mut self, frame: &[u8]);
}

/// One line of LCD text. Bytes beyond [`FRAME_LEN`] are dropped.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    buf: [u8; FRAME_LEN],
    len: usize,
}

impl Frame {
    pub const fn new() -> Self {
        Self {
            buf: [0; FRAME_LEN],
            len: 0,
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl ByteSink for Frame {
    fn write_byte(&mut self, b: u8) {
        if self.len < FRAME_LEN {
            self.buf[self.len] = b;
            self.len += 1;
        }
    }
}

/// Build a `<label> <value>` frame with a two-decimal value.
fn labelled(label: &str, value: u32) -> Frame {
    let mut frame = Frame::new();
    frame.write_str(label);
    frame.write_byte(b' ');
    frame.write_packed_decimal(pack_decimal(value), 2);
    frame
}

/// The flow, frequency, and temperature frames for `state`.
pub fn frames(state: &FlowState) -> [Frame; 3] {
    let flow = match state.fault {
        Some(_) => {
            let mut f = Frame::new();
            f.write_str("Flow(GPM) FAULT");
            f
        }
        None => labelled("Flow(GPM)", state.flow_rate),
    };

    let mut temp = Frame::new();
    temp.write_str("Temp(C) ");
    if state.temperature < 0 {
        temp.write_byte(b'-');
    }
    temp.write_packed_decimal(pack_decimal(state.temperature.unsigned_abs()), 2);

    [flow, labelled("Freq(Hz)", state.frequency), temp]
}

/// Push all frames for `state` to the display.
pub fn refresh<S: DisplaySink>(state: &FlowState, lcd: &mut S) {
    for frame in frames(state).iter() {
        lcd.send_frame(frame.as_bytes());
    }
}

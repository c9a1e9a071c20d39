// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Basic ADC support for STM32F7 using direct PAC register access.
//!
//! Thin wrapper around ADC1 with blocking single-channel reads, plus the internal temperature
//! sensor on channel 18. Signal channels use a 56-cycle sample time so one conversion fits well
//! inside a sampling tick; only the temperature sensor gets the 480-cycle time it needs.
//!
//! Example:
//! ```ignore
//! let adc = Adc::adc1(dp.ADC1);
//! adc.enable_temp_sensor();
//! let value = adc.read(3);
//! ```

use stm32f7xx_hal::pac;

use crate::monitor::tick::TICK_PERIOD_US;

/// Internal temperature sensor channel on ADC1.
pub const TEMP_SENSOR_CHANNEL: u8 = 18;

/// Longest sample time (480 cycles), needed by the temperature sensor.
const SMP_480: u32 = 0b111;

/// Sample time for external signal channels (56 cycles).
const SMP_56: u32 = 0b011;
const SMP_56_CYCLES: u32 = 56;

/// Successive-approximation cycles at 12-bit resolution.
const CONVERSION_CYCLES: u32 = 12;

/// ADCCLK with the reset-default 16 MHz PCLK2 and the /4 prescaler set in `configure_common`.
pub const ADC_CLOCK_HZ: u32 = 16_000_000 / 4;

/// One signal-channel conversion, start to EOC.
pub const SIGNAL_CONVERSION_NS: u32 =
    (SMP_56_CYCLES + CONVERSION_CYCLES) * (1_000_000_000 / ADC_CLOCK_HZ);

// Tick-paced sampling only holds its period if a conversion finishes inside one tick.
const _: () = assert!(SIGNAL_CONVERSION_NS < TICK_PERIOD_US * 1_000);

// ADC_CCR bits
const CCR_VBATE: u32 = 1 << 22;
const CCR_TSVREFE: u32 = 1 << 23;

/// Generic ADC wrapper over a PAC ADCx peripheral.
pub struct Adc<ADC> {
    adc: ADC,
}

fn configure_common() {
    let common = unsafe { &*pac::ADC_COMMON::ptr() };

    // ADC prescaler: PCLK2 / 4
    common.ccr.modify(|_, w| w.adcpre().div4());
}

fn init_basic_adc(adc: &pac::adc1::RegisterBlock) {
    // Power off to configure
    adc.cr2.modify(|_, w| w.adon().clear_bit());

    // 12-bit, right-aligned, software trigger
    adc.cr1.modify(|_, w| w.res().bits(0b00));
    adc.cr2.modify(|_, w| {
        w.cont().clear_bit();
        w.align().right();
        w.exten().disabled();
        w
    });

    // Default minimal sample times
    adc.smpr1.modify(|_, w| unsafe { w.bits(0) });
    adc.smpr2.modify(|_, w| unsafe { w.bits(0) });

    // Power on
    adc.cr2.modify(|_, w| w.adon().set_bit());
}

/// Sample-time code for `channel`: long for the internal sensor, short for signal inputs.
const fn sample_time(channel: u8) -> u32 {
    if channel == TEMP_SENSOR_CHANNEL {
        SMP_480
    } else {
        SMP_56
    }
}

/// Program the sample time for `channel`.
fn set_sample_time(adc: &pac::adc1::RegisterBlock, channel: u8) {
    let smp = sample_time(channel);
    // SMPR2 holds channels 0..=9, SMPR1 channels 10..=18, three bits each.
    if channel <= 9 {
        let shift = 3 * u32::from(channel);
        adc.smpr2
            .modify(|r, w| unsafe { w.bits((r.bits() & !(0b111 << shift)) | (smp << shift)) });
    } else if channel <= 18 {
        let shift = 3 * u32::from(channel - 10);
        adc.smpr1
            .modify(|r, w| unsafe { w.bits((r.bits() & !(0b111 << shift)) | (smp << shift)) });
    }
}

/// Read a single channel from the given ADC peripheral.
fn read_channel(adc: &pac::adc1::RegisterBlock, channel: u8) -> u16 {
    set_sample_time(adc, channel);

    // Sequence length = 1 conversion
    adc.sqr1.modify(|_, w| w.l().bits(0));

    // Set channel
    adc.sqr3
        .modify(|_, w| unsafe { w.sq1().bits(channel & 0x1F) });

    // Start
    adc.cr2.modify(|_, w| w.swstart().set_bit());

    // Wait for completion
    while adc.sr.read().eoc().bit_is_clear() {}

    adc.dr.read().data().bits() as u16
}

impl Adc<pac::ADC1> {
    /// Create and initialize ADC1.
    pub fn adc1(adc1: pac::ADC1) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb2enr.modify(|_, w| w.adc1en().set_bit());

        configure_common();
        init_basic_adc(&adc1);

        Self { adc: adc1 }
    }

    /// Route the internal temperature sensor to channel 18.
    ///
    /// VBAT shares the channel on the F7, so it is switched off here. Allow ~10 µs before the
    /// first conversion.
    pub fn enable_temp_sensor(&self) {
        let common = unsafe { &*pac::ADC_COMMON::ptr() };
        common
            .ccr
            .modify(|r, w| unsafe { w.bits(r.bits() & !CCR_VBATE | CCR_TSVREFE) });
    }

    /// Read a single channel.
    #[inline]
    pub fn read(&self, channel: u8) -> u16 {
        read_channel(&self.adc, channel)
    }

    /// Raw 12-bit temperature sensor conversion.
    #[inline]
    pub fn read_temperature(&self) -> u16 {
        self.read(TEMP_SENSOR_CHANNEL)
    }
}

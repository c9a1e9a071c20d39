// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Fluid temperature from the MCU's internal temperature sensor.
//!
//! T = (V_sense − V_25) / slope + 25 °C, reported as °C × 100 to match the flow estimator.

/// Sensor constants, in microvolts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TempSensorCalibration {
    /// ADC reference voltage.
    pub vref_uv: u32,
    /// Full-scale ADC count (4095 for 12-bit).
    pub full_scale: u32,
    /// Sensor output at 25 °C.
    pub v25_uv: i32,
    /// Average slope per °C.
    pub slope_uv_per_c: i32,
}

impl TempSensorCalibration {
    /// STM32F7 datasheet typical values, 3.3 V reference, 12-bit conversion.
    pub const STM32F7: Self = Self {
        vref_uv: 3_300_000,
        full_scale: 4095,
        v25_uv: 760_000,
        slope_uv_per_c: 2_500,
    };

    /// Raw ADC count to microvolts.
    #[inline]
    pub fn to_microvolts(&self, raw: u16) -> i32 {
        (u64::from(raw) * u64::from(self.vref_uv) / u64::from(self.full_scale)) as i32
    }

    /// Raw ADC count to °C × 100.
    pub fn celsius_x100(&self, raw: u16) -> i32 {
        let delta_uv = self.to_microvolts(raw) - self.v25_uv;
        2500 + delta_uv * 100 / self.slope_uv_per_c
    }
}

impl Default for TempSensorCalibration {
    fn default() -> Self {
        Self::STM32F7
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn v25_reads_25_degrees() {
        let cal = TempSensorCalibration::STM32F7;
        // 760 mV on a 3.3 V / 4095 scale
        let raw = (760_000u32 * 4095 / 3_300_000) as u16;
        let t = cal.celsius_x100(raw);
        assert!((2450..=2550).contains(&t), "got {t}");
    }

    #[test]
    fn slope_is_2_5_mv_per_degree() {
        let cal = TempSensorCalibration {
            vref_uv: 4_095_000,
            full_scale: 4095,
            ..TempSensorCalibration::STM32F7
        };
        // 1 mV per count: 760 counts is 25 °C, +25 counts is +10 °C.
        assert_eq!(cal.celsius_x100(760), 2500);
        assert_eq!(cal.celsius_x100(785), 3500);
        assert_eq!(cal.celsius_x100(735), 1500);
    }
}

// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

#![cfg_attr(target_os = "none", no_main)]
#![cfg_attr(target_os = "none", no_std)]

#[cfg(target_os = "none")]
mod firmware {
    use core::sync::atomic::{AtomicU32, Ordering};

    use cortex_m::peripheral::syst::SystClkSource;
    use cortex_m_rt::{entry, exception};
    use panic_halt as _;

    use hal::{
        pac,
        prelude::*,
        serial::{Config, Serial},
        spi::{Mode, Phase, Polarity, Spi},
    };
    use stm32f7xx_hal as hal;

    use flowmeter::flow::FlowEstimator;
    use flowmeter::hw::{pins::SENSOR_CHANNEL, Adc, BoardPins, ChipSelect, Lcd, Led, SpiBus, Usart};
    use flowmeter::monitor::tick::{REPORT_INTERVAL_TICKS, TICK_PERIOD_US};
    use flowmeter::monitor::DisplayTick;
    use flowmeter::sensing::{EdgeDetector, SampleWindow, TempSensorCalibration};
    use flowmeter::Instrument;

    /// Report pacing, shared with the SysTick handler.
    static DISPLAY_TICK: DisplayTick = DisplayTick::new(REPORT_INTERVAL_TICKS);

    /// Free-running tick count used to pace sensor sampling.
    static SAMPLE_TICKS: AtomicU32 = AtomicU32::new(0);

    #[exception]
    fn SysTick() {
        SAMPLE_TICKS.fetch_add(1, Ordering::Relaxed);
        DISPLAY_TICK.on_tick();
    }

    /// Spin until the next SysTick so samples land one tick period apart.
    fn wait_tick() {
        let start = SAMPLE_TICKS.load(Ordering::Relaxed);
        while SAMPLE_TICKS.load(Ordering::Relaxed) == start {
            cortex_m::asm::nop();
        }
    }

    #[cfg(feature = "reg-dump")]
    fn diagnostics() -> flowmeter::hw::RegisterDump {
        flowmeter::hw::RegisterDump::default()
    }

    #[cfg(not(feature = "reg-dump"))]
    fn diagnostics() -> flowmeter::monitor::NoDiagnostics {
        flowmeter::monitor::NoDiagnostics
    }

    #[entry]
    fn main() -> ! {
        // Peripherals
        let dp = pac::Peripherals::take().unwrap();
        let mut cp = cortex_m::Peripherals::take().unwrap();

        // Clocks
        let rcc = dp.RCC.constrain();
        let clocks = rcc.cfgr.freeze();
        let mut apb2 = rcc.apb2;

        // GPIO
        let pins = BoardPins::new(dp.GPIOA, dp.GPIOD, dp.GPIOE);
        let _sensor = pins.sensor.vortex;

        // USART1 (DBG)
        let usart_cfg = Config {
            baud_rate: 115_200.bps(),
            ..Default::default()
        };
        let serial = Serial::new(
            dp.USART1,
            (pins.usart1.tx, pins.usart1.rx),
            &clocks,
            usart_cfg,
        );
        let mut usart = Usart::new(serial);

        // SPI4 (LCD)
        let spi_mode = Mode {
            polarity: Polarity::IdleLow,
            phase: Phase::CaptureOnFirstTransition,
        };
        let spi4_raw = Spi::new(dp.SPI4, (pins.spi4.sck, pins.spi4.miso, pins.spi4.mosi));
        let spi4_enabled = spi4_raw.enable::<u8>(spi_mode, 100.kHz(), &clocks, &mut apb2);
        let mut lcd = Lcd::new(
            SpiBus::new(spi4_enabled),
            ChipSelect::active_low(pins.spi4.lcd_cs),
        );

        // ADC1: vortex sensor + internal temperature sensor
        let adc = Adc::adc1(dp.ADC1);
        adc.enable_temp_sensor();
        let calibration = TempSensorCalibration::STM32F7;

        // SysTick at TICK_PERIOD_US
        let reload = clocks.sysclk().raw() / 1_000_000 * TICK_PERIOD_US - 1;
        cp.SYST.set_clock_source(SystClkSource::Core);
        cp.SYST.set_reload(reload);
        cp.SYST.clear_current();
        cp.SYST.enable_counter();
        cp.SYST.enable_interrupt();

        // Green LED, lit at startup
        let led = Led::active_low(pins.leds.green);

        let mut instrument = Instrument::with_parts(
            EdgeDetector::default(),
            FlowEstimator::default(),
            led,
            diagnostics(),
        );
        let mut window: SampleWindow = SampleWindow::new();

        instrument.start(&mut usart);

        loop {
            window.fill_with(|| {
                wait_tick();
                adc.read(SENSOR_CHANNEL)
            });
            let temperature = calibration.celsius_x100(adc.read_temperature());

            instrument.run_once(
                window.as_slice(),
                temperature,
                &DISPLAY_TICK,
                &mut usart,
                &mut lcd,
            );
        }
    }
}

#[cfg(not(target_os = "none"))]
fn main() {
    eprintln!("flowmeter: firmware image, build with --target thumbv7em-none-eabihf");
}

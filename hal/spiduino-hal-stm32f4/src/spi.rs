//! SPI controllers of the STM32F4
//!
//! `Stm32Spi` wraps embassy's blocking SPI driver for SPI1, SPI2 or SPI3.
//! Embassy owns framing, master mode, pin muxing and the polled byte
//! exchange. On top of it this module adds clock gating between `end` and
//! `begin`, and reconfiguration to an exact baud-rate divider.

use embassy_stm32::gpio::Pin;
use embassy_stm32::mode::Blocking;
use embassy_stm32::peripherals::{SPI1, SPI2, SPI3};
use embassy_stm32::spi::{self, Config, Instance, MisoPin, MosiPin, SckPin, Spi};
use embassy_stm32::time::Hertz;
use embassy_stm32::Peri;
use spiduino_hal::gpio::{AltPin, Port};
use spiduino_hal::spi::{FirstBit, Phase, Polarity, RegisterConfig, SpiPeripheral, SpiPinMap};

use crate::rcc::{self, BusClocks};

/// Physical SPI controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiInstance {
    Spi1,
    Spi2,
    Spi3,
}

impl SpiInstance {
    /// Pin map this board wires to the controller
    pub const fn pin_map(self) -> SpiPinMap {
        match self {
            SpiInstance::Spi1 => SPI1_PINS,
            SpiInstance::Spi2 => SPI2_PINS,
            SpiInstance::Spi3 => SPI3_PINS,
        }
    }
}

/// SPI1: PA5 / PA6 / PA7, NSS PA4
pub const SPI1_PINS: SpiPinMap = SpiPinMap {
    sck: AltPin::new(Port::A, 5, 5),
    miso: AltPin::new(Port::A, 6, 5),
    mosi: AltPin::new(Port::A, 7, 5),
    nss: AltPin::new(Port::A, 4, 5),
};

/// SPI2, the board's default bus: PD3 / PB14 / PC3, NSS PA15
pub const SPI2_PINS: SpiPinMap = SpiPinMap {
    sck: AltPin::new(Port::D, 3, 5),
    miso: AltPin::new(Port::B, 14, 5),
    mosi: AltPin::new(Port::C, 3, 5),
    nss: AltPin::new(Port::A, 15, 5),
};

/// SPI3: PC10 / PC11 / PC12, NSS PA15
pub const SPI3_PINS: SpiPinMap = SpiPinMap {
    sck: AltPin::new(Port::C, 10, 6),
    miso: AltPin::new(Port::C, 11, 6),
    mosi: AltPin::new(Port::C, 12, 6),
    nss: AltPin::new(Port::A, 15, 6),
};

/// Pin-map entry for an embassy pin, `board` when its port is out of range
///
/// SPI1-3 signals only exist on ports A-I, so the fallback is never taken in
/// practice.
fn alt_pin(pin: &impl Pin, af: u8, board: AltPin) -> AltPin {
    match Port::from_index(pin.port()) {
        Some(port) => AltPin::new(port, pin.pin(), af),
        None => board,
    }
}

/// embassy configuration for a set of register fields
///
/// Every divider output `F / D` is a rate embassy maps back to exactly that
/// BR value when its kernel clock is `F`.
fn embassy_config(config: &RegisterConfig, base_clock_hz: u32) -> Config {
    let mut spi_config = Config::default();
    spi_config.mode = spi::Mode {
        polarity: match config.polarity {
            Polarity::IdleLow => spi::Polarity::IdleLow,
            Polarity::IdleHigh => spi::Polarity::IdleHigh,
        },
        phase: match config.phase {
            Phase::CaptureOnFirstTransition => spi::Phase::CaptureOnFirstTransition,
            Phase::CaptureOnSecondTransition => spi::Phase::CaptureOnSecondTransition,
        },
    };
    spi_config.bit_order = match config.first_bit {
        FirstBit::Msb => spi::BitOrder::MsbFirst,
        FirstBit::Lsb => spi::BitOrder::LsbFirst,
    };
    spi_config.frequency = Hertz(config.divider.output_hz(base_clock_hz).max(1));
    spi_config
}

/// One SPI controller with its pin map and clock
///
/// `clocks` must describe the same clock tree that was handed to
/// `embassy_stm32::init`, or embassy will pick a different divider.
pub struct Stm32Spi<'d> {
    spi: Spi<'d, Blocking>,
    instance: SpiInstance,
    pins: SpiPinMap,
    base_clock_hz: u32,
}

impl<'d> Stm32Spi<'d> {
    pub fn spi1(
        peri: Peri<'d, SPI1>,
        sck: Peri<'d, impl SckPin<SPI1>>,
        miso: Peri<'d, impl MisoPin<SPI1>>,
        mosi: Peri<'d, impl MosiPin<SPI1>>,
        clocks: BusClocks,
    ) -> Self {
        Self::new(SpiInstance::Spi1, peri, sck, miso, mosi, clocks)
    }

    /// The board's default bus
    pub fn spi2(
        peri: Peri<'d, SPI2>,
        sck: Peri<'d, impl SckPin<SPI2>>,
        miso: Peri<'d, impl MisoPin<SPI2>>,
        mosi: Peri<'d, impl MosiPin<SPI2>>,
        clocks: BusClocks,
    ) -> Self {
        Self::new(SpiInstance::Spi2, peri, sck, miso, mosi, clocks)
    }

    pub fn spi3(
        peri: Peri<'d, SPI3>,
        sck: Peri<'d, impl SckPin<SPI3>>,
        miso: Peri<'d, impl MisoPin<SPI3>>,
        mosi: Peri<'d, impl MosiPin<SPI3>>,
        clocks: BusClocks,
    ) -> Self {
        Self::new(SpiInstance::Spi3, peri, sck, miso, mosi, clocks)
    }

    fn new<T: Instance>(
        instance: SpiInstance,
        peri: Peri<'d, T>,
        sck: Peri<'d, impl SckPin<T>>,
        miso: Peri<'d, impl MisoPin<T>>,
        mosi: Peri<'d, impl MosiPin<T>>,
        clocks: BusClocks,
    ) -> Self {
        let board = instance.pin_map();
        let pins = SpiPinMap {
            sck: alt_pin(&*sck, sck.af_num(), board.sck),
            miso: alt_pin(&*miso, miso.af_num(), board.miso),
            mosi: alt_pin(&*mosi, mosi.af_num(), board.mosi),
            nss: board.nss,
        };

        // Embassy orders the data pins MOSI before MISO
        let spi = Spi::new_blocking(peri, sck, mosi, miso, Config::default());

        Self {
            spi,
            instance,
            pins,
            base_clock_hz: clocks.for_instance(instance),
        }
    }

    pub fn instance(&self) -> SpiInstance {
        self.instance
    }
}

impl SpiPeripheral for Stm32Spi<'_> {
    fn pin_map(&self) -> SpiPinMap {
        self.pins
    }

    fn base_clock_hz(&self) -> u32 {
        self.base_clock_hz
    }

    fn enable(&mut self) {
        rcc::set_spi_clock(self.instance, true);
    }

    fn disable(&mut self) {
        // Blocking transfers return only after the last frame came back
        rcc::set_spi_clock(self.instance, false);
    }

    fn configure(&mut self, config: &RegisterConfig) {
        let spi_config = embassy_config(config, self.base_clock_hz);
        if self.spi.set_config(&spi_config).is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("{}: rejected {}", self.instance, config);
        }
    }

    fn exchange(&mut self, byte: u8) -> u8 {
        let mut word = [byte];
        match self.spi.blocking_transfer_in_place(&mut word) {
            Ok(()) => word[0],
            Err(_err) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("{}: exchange failed: {}", self.instance, _err);
                0
            }
        }
    }
}

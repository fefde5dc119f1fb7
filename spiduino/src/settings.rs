//! SPI settings translation
//!
//! Turns the Arduino view of a bus configuration (clock in Hz, bit order,
//! SPI mode) into the register fields of the controller: first-bit select,
//! clock phase, clock polarity and one of the eight baud-rate dividers.
//!
//! # Divider selection
//!
//! The divider is chosen with a fixed comparison ladder against the
//! peripheral clock `F` and the requested rate `R`:
//!
//! ```text
//! F/2   < R ? /2
//! F/4   < R ? /4
//!   ...
//! F/128 < R ? /128
//!             /256
//! ```
//!
//! so the result is the fastest rate strictly *below* the request, or /2 when
//! even that undershoots. A request exactly equal to a reachable rate skips it
//! and lands one step slower. Arduino sketches have been tuned against this
//! behaviour, so it is reproduced as-is.

use spiduino_hal::spi::{ClockDivider, FirstBit, Phase, Polarity, RegisterConfig};

use crate::config::DEFAULT_CLOCK_HZ;
use crate::consts::{LSBFIRST, SPI_MODE0, SPI_MODE1, SPI_MODE2};

/// Order in which bits of a word are shifted out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum BitOrder {
    LsbFirst = 0,
    MsbFirst = 1,
}

impl BitOrder {
    /// Bit order from an Arduino `LSBFIRST`/`MSBFIRST` value
    ///
    /// Only `LSBFIRST` selects LSB-first; anything else is MSB-first.
    pub const fn from_raw(raw: u8) -> Self {
        if raw == LSBFIRST {
            BitOrder::LsbFirst
        } else {
            BitOrder::MsbFirst
        }
    }

    /// First-bit register field for this order
    pub const fn first_bit(self) -> FirstBit {
        match self {
            BitOrder::LsbFirst => FirstBit::Lsb,
            BitOrder::MsbFirst => FirstBit::Msb,
        }
    }
}

impl From<FirstBit> for BitOrder {
    fn from(first_bit: FirstBit) -> Self {
        match first_bit {
            FirstBit::Lsb => BitOrder::LsbFirst,
            FirstBit::Msb => BitOrder::MsbFirst,
        }
    }
}

/// SPI data mode (combined polarity and phase)
///
/// Discriminants are the Arduino `SPI_MODEx` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum DataMode {
    /// Mode 0: CPOL=0, CPHA=0
    Mode0 = 0x00,
    /// Mode 1: CPOL=0, CPHA=1
    Mode1 = 0x04,
    /// Mode 2: CPOL=1, CPHA=0
    Mode2 = 0x08,
    /// Mode 3: CPOL=1, CPHA=1
    Mode3 = 0x0C,
}

impl DataMode {
    /// Mode from an Arduino `SPI_MODEx` value
    ///
    /// Unknown values fall through to mode 3.
    pub const fn from_raw(raw: u8) -> Self {
        match raw {
            SPI_MODE0 => DataMode::Mode0,
            SPI_MODE1 => DataMode::Mode1,
            SPI_MODE2 => DataMode::Mode2,
            _ => DataMode::Mode3,
        }
    }

    /// Mode from its number (0-3)
    ///
    /// Unknown numbers fall through to mode 3.
    pub const fn from_number(number: u8) -> Self {
        match number {
            0 => DataMode::Mode0,
            1 => DataMode::Mode1,
            2 => DataMode::Mode2,
            _ => DataMode::Mode3,
        }
    }

    /// Arduino `SPI_MODEx` value
    pub const fn raw(self) -> u8 {
        self as u8
    }

    pub const fn phase(self) -> Phase {
        match self {
            DataMode::Mode0 | DataMode::Mode2 => Phase::CaptureOnFirstTransition,
            DataMode::Mode1 | DataMode::Mode3 => Phase::CaptureOnSecondTransition,
        }
    }

    pub const fn polarity(self) -> Polarity {
        match self {
            DataMode::Mode0 | DataMode::Mode1 => Polarity::IdleLow,
            DataMode::Mode2 | DataMode::Mode3 => Polarity::IdleHigh,
        }
    }
}

impl From<DataMode> for (Polarity, Phase) {
    fn from(mode: DataMode) -> Self {
        (mode.polarity(), mode.phase())
    }
}

/// Pick the baud-rate divider for `clock_hz` from a `base_clock_hz` source
///
/// See the module docs for the comparison ladder.
pub fn select_divider(base_clock_hz: u32, clock_hz: u32) -> ClockDivider {
    ClockDivider::ALL[..7]
        .iter()
        .copied()
        .find(|div| base_clock_hz / div.divisor() < clock_hz)
        .unwrap_or(ClockDivider::Div256)
}

/// A bus configuration, ready to be applied by `begin_transaction`
///
/// Immutable once built; the driver takes it by value. The requested rate is
/// kept as-is and turned into a divider against the peripheral clock of the
/// controller the settings are applied to, so the same value means the same
/// bus speed on every board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiSettings {
    clock_hz: u32,
    first_bit: FirstBit,
    phase: Phase,
    polarity: Polarity,
}

impl SpiSettings {
    pub fn new(clock_hz: u32, bit_order: BitOrder, mode: DataMode) -> Self {
        Self::init(clock_hz, bit_order, mode)
    }

    fn init(clock_hz: u32, bit_order: BitOrder, mode: DataMode) -> Self {
        Self {
            clock_hz,
            first_bit: bit_order.first_bit(),
            phase: mode.phase(),
            polarity: mode.polarity(),
        }
    }

    /// Requested SCK frequency
    pub fn clock_hz(&self) -> u32 {
        self.clock_hz
    }

    pub fn first_bit(&self) -> FirstBit {
        self.first_bit
    }

    pub fn bit_order(&self) -> BitOrder {
        self.first_bit.into()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Divider these settings select on a controller fed by `base_clock_hz`
    pub fn divider(&self, base_clock_hz: u32) -> ClockDivider {
        select_divider(base_clock_hz, self.clock_hz)
    }

    /// SCK frequency these settings produce from `base_clock_hz`
    pub fn actual_clock_hz(&self, base_clock_hz: u32) -> u32 {
        self.divider(base_clock_hz).output_hz(base_clock_hz)
    }

    /// Register fields to write into a controller fed by `base_clock_hz`
    pub fn register_config(&self, base_clock_hz: u32) -> RegisterConfig {
        RegisterConfig {
            first_bit: self.first_bit,
            phase: self.phase,
            polarity: self.polarity,
            divider: self.divider(base_clock_hz),
        }
    }
}

impl Default for SpiSettings {
    /// 4 MHz, MSB first, mode 0
    fn default() -> Self {
        Self::new(DEFAULT_CLOCK_HZ, BitOrder::MsbFirst, DataMode::Mode0)
    }
}

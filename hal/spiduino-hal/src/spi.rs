//! SPI peripheral abstractions
//!
//! Register-field types shared by the settings translator and the chip HALs,
//! plus the [`SpiPeripheral`] trait a chip implements for one SPI controller.
//!
//! The numeric values of the field types are the STM32 SPI_CR1 bit patterns,
//! so a configuration can be written to the control register directly.

use crate::gpio::AltPin;

/// SPI clock polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Polarity {
    /// Clock idles low (CPOL=0)
    IdleLow,
    /// Clock idles high (CPOL=1)
    IdleHigh,
}

impl Polarity {
    /// CR1.CPOL bit pattern
    pub const fn bits(self) -> u16 {
        match self {
            Polarity::IdleLow => 0x0000,
            Polarity::IdleHigh => 0x0002,
        }
    }
}

/// SPI clock phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Data captured on first clock transition (CPHA=0)
    CaptureOnFirstTransition,
    /// Data captured on second clock transition (CPHA=1)
    CaptureOnSecondTransition,
}

impl Phase {
    /// CR1.CPHA bit pattern
    pub const fn bits(self) -> u16 {
        match self {
            Phase::CaptureOnFirstTransition => 0x0000,
            Phase::CaptureOnSecondTransition => 0x0001,
        }
    }
}

/// First bit shifted out on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FirstBit {
    Msb,
    Lsb,
}

impl FirstBit {
    /// CR1.LSBFIRST bit pattern
    pub const fn bits(self) -> u16 {
        match self {
            FirstBit::Msb => 0x0000,
            FirstBit::Lsb => 0x0080,
        }
    }
}

/// Baud-rate prescaler applied to the peripheral clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ClockDivider {
    Div2 = 0x00,
    Div4 = 0x08,
    Div8 = 0x10,
    Div16 = 0x18,
    Div32 = 0x20,
    Div64 = 0x28,
    Div128 = 0x30,
    Div256 = 0x38,
}

impl ClockDivider {
    /// All dividers, fastest first
    pub const ALL: [ClockDivider; 8] = [
        ClockDivider::Div2,
        ClockDivider::Div4,
        ClockDivider::Div8,
        ClockDivider::Div16,
        ClockDivider::Div32,
        ClockDivider::Div64,
        ClockDivider::Div128,
        ClockDivider::Div256,
    ];

    /// CR1.BR bit pattern (bits 5:3)
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// The 3-bit BR field value (0 = /2 ... 7 = /256)
    pub const fn field(self) -> u8 {
        (self as u8) >> 3
    }

    /// Division factor applied to the peripheral clock
    pub const fn divisor(self) -> u32 {
        2 << self.field()
    }

    /// Divider from a CR1.BR bit pattern
    ///
    /// Bits outside the BR field are ignored, so every input maps to a divider.
    pub const fn from_bits(bits: u8) -> Self {
        match (bits >> 3) & 0x07 {
            0 => ClockDivider::Div2,
            1 => ClockDivider::Div4,
            2 => ClockDivider::Div8,
            3 => ClockDivider::Div16,
            4 => ClockDivider::Div32,
            5 => ClockDivider::Div64,
            6 => ClockDivider::Div128,
            _ => ClockDivider::Div256,
        }
    }

    /// Resulting SCK frequency for a given peripheral clock
    pub const fn output_hz(self, base_clock_hz: u32) -> u32 {
        base_clock_hz / self.divisor()
    }
}

/// Live communication parameters of an SPI controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterConfig {
    pub first_bit: FirstBit,
    pub phase: Phase,
    pub polarity: Polarity,
    pub divider: ClockDivider,
}

impl RegisterConfig {
    /// Communication bits of CR1 (CPHA, CPOL, BR, LSBFIRST)
    ///
    /// Master mode, enable and slave-select management are left to the chip HAL.
    pub const fn cr1_bits(&self) -> u16 {
        self.phase.bits()
            | self.polarity.bits()
            | self.divider.bits() as u16
            | self.first_bit.bits()
    }
}

/// Pins wired to one SPI controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpiPinMap {
    /// Serial clock
    pub sck: AltPin,
    /// Master in, slave out
    pub miso: AltPin,
    /// Master out, slave in
    pub mosi: AltPin,
    /// Hardware slave select (unused in software-NSS master mode)
    pub nss: AltPin,
}

/// One SPI controller in master mode
///
/// Register writes are assumed to succeed, so none of these report failure.
pub trait SpiPeripheral {
    /// Board wiring of this controller
    fn pin_map(&self) -> SpiPinMap;

    /// Frequency of the clock feeding the baud-rate prescaler
    fn base_clock_hz(&self) -> u32;

    /// Gate the peripheral clock on
    fn enable(&mut self);

    /// Gate the peripheral clock off
    fn disable(&mut self);

    /// Make `config` the live communication parameters
    ///
    /// Frame size, master mode and slave-select handling stay with the chip HAL.
    fn configure(&mut self, config: &RegisterConfig);

    /// Blocking full-duplex exchange of one byte
    ///
    /// Waits until the hardware reports completion, with no timeout.
    fn exchange(&mut self, byte: u8) -> u8;
}

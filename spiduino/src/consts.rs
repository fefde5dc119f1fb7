//! Arduino SPI constants
//!
//! Sketches written against the Arduino `SPI` library pass these raw values
//! around; they keep their numeric meaning here. The clock dividers are the
//! CR1.BR bit patterns of the STM32 SPI controller.

use spiduino_hal::spi::ClockDivider;

use crate::driver::TransferMode;

pub const LSBFIRST: u8 = 0;
pub const MSBFIRST: u8 = 1;

pub const SPI_CLOCK_DIV2: u8 = ClockDivider::Div2.bits();
pub const SPI_CLOCK_DIV4: u8 = ClockDivider::Div4.bits();
pub const SPI_CLOCK_DIV8: u8 = ClockDivider::Div8.bits();
pub const SPI_CLOCK_DIV16: u8 = ClockDivider::Div16.bits();
pub const SPI_CLOCK_DIV32: u8 = ClockDivider::Div32.bits();
pub const SPI_CLOCK_DIV64: u8 = ClockDivider::Div64.bits();
pub const SPI_CLOCK_DIV128: u8 = ClockDivider::Div128.bits();
pub const SPI_CLOCK_DIV256: u8 = ClockDivider::Div256.bits();

pub const SPI_MODE0: u8 = 0x00;
pub const SPI_MODE1: u8 = 0x04;
pub const SPI_MODE2: u8 = 0x08;
pub const SPI_MODE3: u8 = 0x0C;

/// Keep chip select asserted after the transfer
pub const SPI_CONTINUE: TransferMode = TransferMode::Continue;
/// Release chip select after the transfer
pub const SPI_LAST: TransferMode = TransferMode::Last;

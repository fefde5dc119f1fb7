//! Arduino-style SPI for spiduino boards
//!
//! This crate carries the board-agnostic half of the Arduino `SPI` library:
//!
//! - [`SpiSettings`] - clock rate, bit order and mode translated into
//!   register fields, including the baud-rate divider ladder
//! - [`SpiClass`] - begin/end lifecycle, transactions and blocking
//!   byte/word/buffer transfers over any [`spiduino_hal::SpiPeripheral`]
//! - [`consts`] - the `SPI_CLOCK_DIVx`, `SPI_MODEx`, `LSBFIRST`/`MSBFIRST`
//!   and `SPI_CONTINUE`/`SPI_LAST` values sketches are written against
//! - [`config::SpiBusConfig`] - loadable bus description for firmware
//!
//! There is no global `SPI` object: the firmware builds a [`SpiClass`] from
//! its chip HAL once and passes it to whoever talks on the bus.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

#[macro_use]
mod fmt;

pub mod config;
pub mod consts;
pub mod driver;
pub mod settings;

#[cfg(test)]
mod testing;

pub use driver::{SpiClass, SpiState, TransferMode};
pub use settings::{select_divider, BitOrder, DataMode, SpiSettings};
pub use spiduino_hal::spi::ClockDivider;

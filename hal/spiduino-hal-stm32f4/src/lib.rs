//! STM32F4-specific HAL for spiduino
//!
//! This crate implements the `spiduino-hal` traits for STM32F4 chips on top
//! of `embassy-stm32`:
//!
//! - [`spi::Stm32Spi`] - SPI1, SPI2 (board default) and SPI3 on embassy's
//!   blocking SPI driver
//! - [`gpio::Stm32Gpio`] - runtime-numbered pins (chip selects) on the PAC
//! - [`rcc::BusClocks`] - APB frequencies feeding the SPI prescalers
//!
//! # Features
//!
//! - `stm32f405rg`, `stm32f407vg`, `stm32f429zi` - chip selection
//! - `defmt` - Enable debug formatting support
//!
//! # Usage
//!
//! ```ignore
//! let p = embassy_stm32::init(Default::default());
//! let spi = Stm32Spi::spi2(p.SPI2, p.PD3, p.PB14, p.PC3, BusClocks::RESET);
//! let mut bus = spiduino::SpiClass::new(spi, Stm32Gpio::new());
//! bus.begin();
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod rcc;
pub mod spi;

pub use gpio::Stm32Gpio;
pub use rcc::BusClocks;
pub use spi::{SpiInstance, Stm32Spi, SPI1_PINS, SPI2_PINS, SPI3_PINS};

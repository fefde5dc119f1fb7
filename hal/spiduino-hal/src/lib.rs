//! spiduino Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the spiduino driver is
//! written against. Chip-specific HALs (STM32F4, host mocks, etc.) implement
//! them, so the Arduino-style driver logic stays board-agnostic and can be
//! tested on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (spiduino-firmware, etc.)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  spiduino (settings + SpiClass driver)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  spiduino-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ spiduino-hal- │
//!             │    stm32f4    │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::GpioController`] - Pin muxing and chip-select output
//! - [`spi::SpiPeripheral`] - One SPI controller: clock gating, register
//!   configuration and blocking byte exchange

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use gpio::{AltPin, GpioController, PinId, Port};
pub use spi::{ClockDivider, FirstBit, Phase, Polarity, RegisterConfig, SpiPeripheral, SpiPinMap};

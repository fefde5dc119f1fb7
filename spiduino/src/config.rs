//! Bus configuration
//!
//! Defaults shared by the settings translator and the driver, plus
//! [`SpiBusConfig`], the loadable description of one SPI bus in firmware
//! configuration. Raw fields keep the Arduino constant values so a config
//! file can say `mode = 8` the same way a sketch says `SPI_MODE2`.

use heapless::String;
use spiduino_hal::gpio::{parse_pin_string, PinId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::consts::{MSBFIRST, SPI_MODE0};
use crate::settings::{BitOrder, DataMode, SpiSettings};

/// SCK rate used by default settings (4 MHz)
pub const DEFAULT_CLOCK_HZ: u32 = 4_000_000;

/// Maximum length of a pin name ("PA15")
pub const MAX_PIN_NAME_LEN: usize = 8;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Pin name is not of the form "P<port><pin>"
    InvalidPin,
    /// Pin name does not fit in [`MAX_PIN_NAME_LEN`]
    NameTooLong,
}

/// One SPI bus as described in firmware configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpiBusConfig {
    /// Requested SCK rate in Hz
    pub clock_hz: u32,
    /// Arduino bit order (`LSBFIRST` = 0, `MSBFIRST` = 1)
    pub bit_order: u8,
    /// Arduino data mode (`SPI_MODE0`..`SPI_MODE3`)
    pub mode: u8,
    /// Chip-select pin name, e.g. "PA15"
    pub select_pin: Option<String<MAX_PIN_NAME_LEN>>,
}

impl Default for SpiBusConfig {
    fn default() -> Self {
        Self {
            clock_hz: DEFAULT_CLOCK_HZ,
            bit_order: MSBFIRST,
            mode: SPI_MODE0,
            select_pin: None,
        }
    }
}

impl SpiBusConfig {
    /// Set the chip-select pin by name
    pub fn with_select_pin(mut self, name: &str) -> Result<Self, ConfigError> {
        parse_pin_string(name).ok_or(ConfigError::InvalidPin)?;
        let mut pin = String::new();
        pin.push_str(name.trim())
            .map_err(|_| ConfigError::NameTooLong)?;
        self.select_pin = Some(pin);
        Ok(self)
    }

    pub fn bit_order(&self) -> BitOrder {
        BitOrder::from_raw(self.bit_order)
    }

    pub fn data_mode(&self) -> DataMode {
        DataMode::from_raw(self.mode)
    }

    pub fn settings(&self) -> SpiSettings {
        SpiSettings::new(self.clock_hz, self.bit_order(), self.data_mode())
    }

    /// Resolve the chip-select pin, if one is configured
    pub fn select_pin(&self) -> Result<Option<PinId>, ConfigError> {
        match &self.select_pin {
            Some(name) => parse_pin_string(name)
                .map(Some)
                .ok_or(ConfigError::InvalidPin),
            None => Ok(None),
        }
    }
}

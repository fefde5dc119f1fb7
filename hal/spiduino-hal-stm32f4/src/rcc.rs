//! Clock gating for STM32F4 peripherals
//!
//! Only the enable bits spiduino needs: GPIO ports on AHB1, SPI1 on
//! APB2, SPI2/SPI3 on APB1. Clock tree setup stays with `embassy_stm32::init`.

use embassy_stm32::pac;
use spiduino_hal::gpio::Port;

use crate::spi::SpiInstance;

/// APB clock frequencies feeding the SPI prescalers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusClocks {
    /// APB1 peripheral clock (SPI2, SPI3)
    pub pclk1_hz: u32,
    /// APB2 peripheral clock (SPI1)
    pub pclk2_hz: u32,
}

impl BusClocks {
    /// Reset state: 16 MHz HSI, AHB/APB prescalers at 1
    pub const RESET: Self = Self {
        pclk1_hz: 16_000_000,
        pclk2_hz: 16_000_000,
    };

    /// Clock feeding the given SPI controller
    pub const fn for_instance(&self, instance: SpiInstance) -> u32 {
        match instance {
            SpiInstance::Spi1 => self.pclk2_hz,
            SpiInstance::Spi2 | SpiInstance::Spi3 => self.pclk1_hz,
        }
    }
}

impl Default for BusClocks {
    fn default() -> Self {
        Self::RESET
    }
}

pub(crate) fn enable_gpio_port(port: Port) {
    pac::RCC.ahb1enr().modify(|w| match port {
        Port::A => w.set_gpioaen(true),
        Port::B => w.set_gpioben(true),
        Port::C => w.set_gpiocen(true),
        Port::D => w.set_gpioden(true),
        Port::E => w.set_gpioeen(true),
        Port::F => w.set_gpiofen(true),
        Port::G => w.set_gpiogen(true),
        Port::H => w.set_gpiohen(true),
        Port::I => w.set_gpioien(true),
    });
}

pub(crate) fn set_spi_clock(instance: SpiInstance, enabled: bool) {
    match instance {
        SpiInstance::Spi1 => pac::RCC.apb2enr().modify(|w| w.set_spi1en(enabled)),
        SpiInstance::Spi2 => pac::RCC.apb1enr().modify(|w| w.set_spi2en(enabled)),
        SpiInstance::Spi3 => pac::RCC.apb1enr().modify(|w| w.set_spi3en(enabled)),
    }
}

//! GPIO muxing for STM32F4
//!
//! Implements [`GpioController`] directly on the port registers. Port clocks
//! are enabled lazily the first time a pin of that port is configured.

use embassy_stm32::pac;
use embassy_stm32::pac::gpio::{vals, Gpio};
use spiduino_hal::gpio::{AltPin, GpioController, PinId, Port};

use crate::rcc;

fn block(port: Port) -> Gpio {
    match port {
        Port::A => pac::GPIOA,
        Port::B => pac::GPIOB,
        Port::C => pac::GPIOC,
        Port::D => pac::GPIOD,
        Port::E => pac::GPIOE,
        Port::F => pac::GPIOF,
        Port::G => pac::GPIOG,
        Port::H => pac::GPIOH,
        Port::I => pac::GPIOI,
    }
}

/// GPIO ports A-I
pub struct Stm32Gpio {
    /// Bitmask of ports whose AHB1 clock has been enabled
    clocked: u16,
}

impl Default for Stm32Gpio {
    fn default() -> Self {
        Self::new()
    }
}

impl Stm32Gpio {
    pub fn new() -> Self {
        Self { clocked: 0 }
    }

    fn port(&mut self, port: Port) -> Gpio {
        let mask = 1 << port.index();
        if self.clocked & mask == 0 {
            rcc::enable_gpio_port(port);
            self.clocked |= mask;
        }
        block(port)
    }
}

impl GpioController for Stm32Gpio {
    fn configure_alternate(&mut self, pin: AltPin) {
        let n = pin.pin.pin as usize;
        let regs = self.port(pin.pin.port);

        regs.afr(n / 8).modify(|w| w.set_afr(n % 8, pin.af));
        regs.otyper().modify(|w| w.set_ot(n, vals::Ot::PUSH_PULL));
        regs.ospeedr()
            .modify(|w| w.set_ospeedr(n, vals::Ospeedr::VERY_HIGH_SPEED));
        regs.pupdr().modify(|w| w.set_pupdr(n, vals::Pupdr::FLOATING));
        regs.moder().modify(|w| w.set_moder(n, vals::Moder::ALTERNATE));
    }

    fn configure_output(&mut self, pin: PinId) {
        let n = pin.pin as usize;
        let regs = self.port(pin.port);

        regs.otyper().modify(|w| w.set_ot(n, vals::Ot::PUSH_PULL));
        regs.ospeedr()
            .modify(|w| w.set_ospeedr(n, vals::Ospeedr::VERY_HIGH_SPEED));
        regs.pupdr().modify(|w| w.set_pupdr(n, vals::Pupdr::FLOATING));
        regs.moder().modify(|w| w.set_moder(n, vals::Moder::OUTPUT));
    }

    fn release(&mut self, pin: PinId) {
        let n = pin.pin as usize;
        let regs = self.port(pin.port);

        // Reset values: analog mode except the debug pins, which we never use
        regs.moder().modify(|w| w.set_moder(n, vals::Moder::ANALOG));
        regs.pupdr().modify(|w| w.set_pupdr(n, vals::Pupdr::FLOATING));
        regs.ospeedr()
            .modify(|w| w.set_ospeedr(n, vals::Ospeedr::LOW_SPEED));
        regs.afr(n / 8).modify(|w| w.set_afr(n % 8, 0));
    }

    fn set_high(&mut self, pin: PinId) {
        self.port(pin.port)
            .bsrr()
            .write(|w| w.set_bs(pin.pin as usize, true));
    }

    fn set_low(&mut self, pin: PinId) {
        self.port(pin.port)
            .bsrr()
            .write(|w| w.set_br(pin.pin as usize, true));
    }

    fn is_set_high(&self, pin: PinId) -> bool {
        block(pin.port).odr().read().odr(pin.pin as usize) == vals::Odr::HIGH
    }
}

//! GPIO pin abstractions
//!
//! Pins are addressed by port and number, the way board pin maps and
//! Arduino-style sketches name them ("PA15", "PD3"). Chip-specific HALs
//! implement [`GpioController`] on top of their port registers.

/// GPIO port letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Port {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
}

impl Port {
    /// Zero-based port index (A = 0)
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Port from its zero-based index, `None` past port I
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Port::A),
            1 => Some(Port::B),
            2 => Some(Port::C),
            3 => Some(Port::D),
            4 => Some(Port::E),
            5 => Some(Port::F),
            6 => Some(Port::G),
            7 => Some(Port::H),
            8 => Some(Port::I),
            _ => None,
        }
    }

    /// Port from its letter, `None` for ports this family does not have
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Port::A),
            'B' => Some(Port::B),
            'C' => Some(Port::C),
            'D' => Some(Port::D),
            'E' => Some(Port::E),
            'F' => Some(Port::F),
            'G' => Some(Port::G),
            'H' => Some(Port::H),
            'I' => Some(Port::I),
            _ => None,
        }
    }
}

/// A single GPIO line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PinId {
    pub port: Port,
    /// Pin number within the port (0-15)
    pub pin: u8,
}

impl PinId {
    /// Create a pin identifier
    ///
    /// The pin number is masked to the 16 lines of a port.
    pub const fn new(port: Port, pin: u8) -> Self {
        Self {
            port,
            pin: pin & 0x0F,
        }
    }

    /// Single-bit mask of this pin within its port registers
    pub const fn mask(self) -> u16 {
        1 << (self.pin & 0x0F)
    }
}

/// A pin muxed to a peripheral alternate function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AltPin {
    pub pin: PinId,
    /// Alternate function number (AF0-AF15)
    pub af: u8,
}

impl AltPin {
    pub const fn new(port: Port, pin: u8, af: u8) -> Self {
        Self {
            pin: PinId::new(port, pin),
            af: af & 0x0F,
        }
    }
}

/// Parse a pin name from config
///
/// Supports formats:
/// - "PA0" -> Port A, pin 0
/// - "pd3" -> Port D, pin 3 (case-insensitive, surrounding whitespace ignored)
pub fn parse_pin_string(s: &str) -> Option<PinId> {
    let s = s.trim();
    let rest = s.strip_prefix('P').or_else(|| s.strip_prefix('p'))?;

    let mut chars = rest.chars();
    let port = Port::from_char(chars.next()?)?;

    let pin_str = chars.as_str();
    if pin_str.is_empty() || !pin_str.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let pin: u8 = pin_str.parse().ok()?;
    if pin > 15 {
        return None;
    }

    Some(PinId::new(port, pin))
}

/// GPIO controller
///
/// Owns the GPIO ports of a chip and configures individual lines on request.
/// Implementations are responsible for enabling the port clock before
/// touching a port's registers.
pub trait GpioController {
    /// Mux a pin to a peripheral alternate function (push-pull, high speed)
    fn configure_alternate(&mut self, pin: AltPin);

    /// Configure a pin as a push-pull output
    fn configure_output(&mut self, pin: PinId);

    /// Return a pin to its reset configuration
    fn release(&mut self, pin: PinId);

    /// Drive an output pin high (logic 1)
    fn set_high(&mut self, pin: PinId);

    /// Drive an output pin low (logic 0)
    fn set_low(&mut self, pin: PinId);

    /// Drive an output pin to a specific state
    fn set_state(&mut self, pin: PinId, high: bool) {
        if high {
            self.set_high(pin);
        } else {
            self.set_low(pin);
        }
    }

    /// Check if an output pin is currently driven high
    fn is_set_high(&self, pin: PinId) -> bool;

    /// Check if an output pin is currently driven low
    fn is_set_low(&self, pin: PinId) -> bool {
        !self.is_set_high(pin)
    }
}

//! Host-side doubles for the HAL traits

use heapless::{Deque, Vec};
use spiduino_hal::gpio::{AltPin, GpioController, PinId, Port};
use spiduino_hal::spi::{RegisterConfig, SpiPeripheral, SpiPinMap};

/// Board wiring used by the mocks (SPI2 on PD3/PB14/PC3, NSS PA15)
pub const MOCK_PIN_MAP: SpiPinMap = SpiPinMap {
    sck: AltPin::new(Port::D, 3, 5),
    miso: AltPin::new(Port::B, 14, 5),
    mosi: AltPin::new(Port::C, 3, 5),
    nss: AltPin::new(Port::A, 15, 5),
};

pub const MOCK_PCLK_HZ: u32 = 42_000_000;

/// Mock SPI controller
///
/// Records every byte sent and answers from a scripted queue, falling back to
/// the bitwise complement of the sent byte.
pub struct MockSpi {
    pub base_clock_hz: u32,
    pub clock_enabled: bool,
    pub enable_count: u32,
    pub configured: Option<RegisterConfig>,
    pub configure_count: u32,
    pub sent: Vec<u8, 64>,
    pub responses: Deque<u8, 64>,
}

impl Default for MockSpi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSpi {
    pub fn new() -> Self {
        Self {
            base_clock_hz: MOCK_PCLK_HZ,
            clock_enabled: false,
            enable_count: 0,
            configured: None,
            configure_count: 0,
            sent: Vec::new(),
            responses: Deque::new(),
        }
    }

    pub fn with_base_clock(base_clock_hz: u32) -> Self {
        Self {
            base_clock_hz,
            ..Self::new()
        }
    }

    pub fn with_responses(responses: &[u8]) -> Self {
        let mut spi = Self::new();
        for &byte in responses {
            spi.responses.push_back(byte).unwrap();
        }
        spi
    }
}

impl SpiPeripheral for MockSpi {
    fn pin_map(&self) -> SpiPinMap {
        MOCK_PIN_MAP
    }

    fn base_clock_hz(&self) -> u32 {
        self.base_clock_hz
    }

    fn enable(&mut self) {
        self.clock_enabled = true;
        self.enable_count += 1;
    }

    fn disable(&mut self) {
        self.clock_enabled = false;
    }

    fn configure(&mut self, config: &RegisterConfig) {
        self.configured = Some(*config);
        self.configure_count += 1;
    }

    fn exchange(&mut self, byte: u8) -> u8 {
        assert!(self.clock_enabled, "exchange with peripheral clock gated");
        self.sent.push(byte).unwrap();
        self.responses.pop_front().unwrap_or(!byte)
    }
}

/// Mock GPIO ports
pub struct MockGpio {
    pub alternate: Vec<AltPin, 8>,
    pub outputs: [u16; 9],
    pub levels: [u16; 9],
    pub released: Vec<PinId, 8>,
}

impl Default for MockGpio {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGpio {
    pub fn new() -> Self {
        Self {
            alternate: Vec::new(),
            outputs: [0; 9],
            levels: [0; 9],
            released: Vec::new(),
        }
    }

    pub fn is_output(&self, pin: PinId) -> bool {
        self.outputs[pin.port.index()] & pin.mask() != 0
    }
}

impl GpioController for MockGpio {
    fn configure_alternate(&mut self, pin: AltPin) {
        if !self.alternate.contains(&pin) {
            self.alternate.push(pin).unwrap();
        }
    }

    fn configure_output(&mut self, pin: PinId) {
        self.outputs[pin.port.index()] |= pin.mask();
    }

    fn release(&mut self, pin: PinId) {
        self.outputs[pin.port.index()] &= !pin.mask();
        self.levels[pin.port.index()] &= !pin.mask();
        self.released.push(pin).unwrap();
    }

    fn set_high(&mut self, pin: PinId) {
        self.levels[pin.port.index()] |= pin.mask();
    }

    fn set_low(&mut self, pin: PinId) {
        self.levels[pin.port.index()] &= !pin.mask();
    }

    fn is_set_high(&self, pin: PinId) -> bool {
        self.levels[pin.port.index()] & pin.mask() != 0
    }
}

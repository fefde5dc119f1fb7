//! Arduino-style SPI driver
//!
//! [`SpiClass`] owns one SPI controller and the GPIO ports it is wired to,
//! and exposes the familiar Arduino surface:
//!
//! ```ignore
//! let mut spi = SpiClass::new(peripheral, gpio);
//! spi.begin_with_select(cs);
//!
//! spi.begin_transaction(SpiSettings::new(1_000_000, BitOrder::MsbFirst, DataMode::Mode0));
//! spi.transfer_with_select(cs, 0x9F, SPI_CONTINUE);
//! let id = spi.transfer16(0x0000);
//! spi.transfer_with_select(cs, 0x00, SPI_LAST);
//! spi.end_transaction();
//! ```
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized ──begin──▶ Idle ──begin_transaction──▶ TransactionActive
//!                           ▲  ◀──────end_transaction────────┘
//!                           │
//!                 begin     │        end
//!  Disabled ◀───────────────┴──────────────
//! ```
//!
//! Transfers only reach the hardware once the peripheral has been brought up
//! by `begin` or `begin_transaction`. There is no locking: every operation
//! takes `&mut self`, so sharing a bus between callers is up to the owner.

use core::convert::Infallible;

use embedded_hal::spi::{ErrorType, SpiBus};
use spiduino_hal::gpio::{GpioController, PinId};
use spiduino_hal::spi::{ClockDivider, RegisterConfig, SpiPeripheral};

use crate::settings::{BitOrder, DataMode, SpiSettings};

/// Chip-select handling after a [`SpiClass::transfer_with_select`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum TransferMode {
    /// Leave chip select asserted (low) for a chained transfer
    Continue = 0,
    /// Release chip select (high) after this byte
    Last = 1,
}

impl TransferMode {
    /// Mode from an Arduino `SPI_CONTINUE`/`SPI_LAST` value
    ///
    /// Only `SPI_LAST` releases chip select.
    pub const fn from_raw(raw: u8) -> Self {
        if raw == TransferMode::Last as u8 {
            TransferMode::Last
        } else {
            TransferMode::Continue
        }
    }
}

/// Driver lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiState {
    /// Constructed, peripheral never brought up
    Uninitialized,
    /// Clocked and configured, no transaction open
    Idle,
    /// Settings of the current transaction are live
    TransactionActive,
    /// Peripheral clock gated off by `end`
    Disabled,
}

impl SpiState {
    /// Whether the peripheral is clocked and configured
    pub fn is_powered(self) -> bool {
        matches!(self, SpiState::Idle | SpiState::TransactionActive)
    }
}

/// Arduino `SPIClass` for one SPI controller
pub struct SpiClass<P, G> {
    peripheral: P,
    gpio: G,
    /// Live register configuration
    config: RegisterConfig,
    state: SpiState,
}

impl<P: SpiPeripheral, G: GpioController> SpiClass<P, G> {
    /// Wrap a controller; nothing is touched until `begin`
    pub fn new(peripheral: P, gpio: G) -> Self {
        let config = SpiSettings::default().register_config(peripheral.base_clock_hz());
        Self {
            peripheral,
            gpio,
            config,
            state: SpiState::Uninitialized,
        }
    }

    pub fn state(&self) -> SpiState {
        self.state
    }

    /// Register configuration currently applied (or to be applied) to the hardware
    pub fn register_config(&self) -> RegisterConfig {
        self.config
    }

    pub fn base_clock_hz(&self) -> u32 {
        self.peripheral.base_clock_hz()
    }

    /// Current SCK frequency
    pub fn clock_hz(&self) -> u32 {
        self.config.divider.output_hz(self.peripheral.base_clock_hz())
    }

    /// Give back the controller and GPIO ports
    pub fn into_parts(self) -> (P, G) {
        (self.peripheral, self.gpio)
    }

    fn power_up(&mut self) {
        self.peripheral.enable();

        let pins = self.peripheral.pin_map();
        self.gpio.configure_alternate(pins.sck);
        self.gpio.configure_alternate(pins.miso);
        self.gpio.configure_alternate(pins.mosi);
    }

    /// Write the live configuration, bringing the peripheral up if needed
    fn apply(&mut self) {
        if !self.state.is_powered() {
            self.power_up();
            self.state = SpiState::Idle;
        }
        self.peripheral.configure(&self.config);
    }

    /// Clock the peripheral, mux its pins and apply default settings
    ///
    /// Calling again re-applies everything.
    pub fn begin(&mut self) {
        self.power_up();
        self.config = SpiSettings::default().register_config(self.peripheral.base_clock_hz());
        self.peripheral.configure(&self.config);
        self.state = SpiState::Idle;

        debug!("spi: begin, {} Hz", self.clock_hz());
    }

    /// Like [`begin`](Self::begin), also driving `select_pin` as a
    /// deasserted (high) chip-select output
    pub fn begin_with_select(&mut self, select_pin: PinId) {
        self.begin();
        self.gpio.set_high(select_pin);
        self.gpio.configure_output(select_pin);
    }

    /// Make `settings` live on the bus
    ///
    /// The divider is picked against this controller's peripheral clock. A
    /// peripheral that was never started (or was ended) is brought up first.
    pub fn begin_transaction(&mut self, settings: SpiSettings) {
        self.config = settings.register_config(self.peripheral.base_clock_hz());
        self.apply();
        self.state = SpiState::TransactionActive;

        trace!("spi: transaction {}", self.config);
    }

    /// Close the current transaction; the hardware keeps its settings
    pub fn end_transaction(&mut self) {
        if self.state == SpiState::TransactionActive {
            self.state = SpiState::Idle;
        }
    }

    /// Gate the peripheral clock off
    pub fn end(&mut self) {
        self.peripheral.disable();
        self.state = SpiState::Disabled;

        debug!("spi: end");
    }

    /// Like [`end`](Self::end), also releasing the chip-select pin
    pub fn end_with_select(&mut self, select_pin: PinId) {
        self.end();
        self.gpio.release(select_pin);
    }

    fn exchange(&mut self, byte: u8) -> Option<u8> {
        if self.state.is_powered() {
            Some(self.peripheral.exchange(byte))
        } else {
            warn!("spi: transfer while {}, ignored", self.state);
            None
        }
    }

    /// Exchange one byte, returning the byte clocked in meanwhile
    ///
    /// Blocks until the controller finishes. Returns 0 without touching the
    /// bus if the peripheral is not up.
    pub fn transfer(&mut self, data: u8) -> u8 {
        self.exchange(data).unwrap_or(0)
    }

    /// Exchange a 16-bit word as two bytes
    ///
    /// MSB-first sends the high byte first, LSB-first the low byte first; the
    /// received word is assembled in the same order.
    pub fn transfer16(&mut self, data: u16) -> u16 {
        let [hi, lo] = data.to_be_bytes();
        match BitOrder::from(self.config.first_bit) {
            BitOrder::MsbFirst => {
                let rx_hi = self.transfer(hi);
                let rx_lo = self.transfer(lo);
                u16::from_be_bytes([rx_hi, rx_lo])
            }
            BitOrder::LsbFirst => {
                let rx_lo = self.transfer(lo);
                let rx_hi = self.transfer(hi);
                u16::from_be_bytes([rx_hi, rx_lo])
            }
        }
    }

    /// Exchange every byte of `buf`, overwriting each with the byte received
    pub fn transfer_in_place(&mut self, buf: &mut [u8]) {
        if !self.state.is_powered() {
            warn!("spi: buffer transfer while {}, ignored", self.state);
            return;
        }
        for byte in buf.iter_mut() {
            *byte = self.peripheral.exchange(*byte);
        }
    }

    /// Assert `select_pin`, exchange one byte, and release the pin again
    /// unless `mode` is [`TransferMode::Continue`]
    pub fn transfer_with_select(&mut self, select_pin: PinId, data: u8, mode: TransferMode) -> u8 {
        self.gpio.set_low(select_pin);
        let received = self.transfer(data);
        if mode == TransferMode::Last {
            self.gpio.set_high(select_pin);
        }
        received
    }

    /// Send `words`, discarding what comes back
    pub fn write(&mut self, words: &[u8]) {
        for &word in words {
            if self.exchange(word).is_none() {
                return;
            }
        }
    }

    /// Fill `words` with received bytes, sending 0x00
    pub fn read(&mut self, words: &mut [u8]) {
        words.fill(0);
        self.transfer_in_place(words);
    }

    /// Send `write` while receiving into `read`
    ///
    /// The longer of the two sets the length: a short `write` is padded with
    /// 0x00, bytes received past the end of `read` are dropped.
    pub fn transfer_into(&mut self, read: &mut [u8], write: &[u8]) {
        let len = read.len().max(write.len());
        for i in 0..len {
            let tx = write.get(i).copied().unwrap_or(0);
            let Some(rx) = self.exchange(tx) else {
                return;
            };
            if let Some(slot) = read.get_mut(i) {
                *slot = rx;
            }
        }
    }

    /// Legacy: change the bit order outside a transaction
    pub fn set_bit_order(&mut self, bit_order: BitOrder) {
        self.config.first_bit = bit_order.first_bit();
        self.apply();

        trace!("spi: bit order {}", self.config.first_bit);
    }

    /// Legacy: change the clock divider outside a transaction
    pub fn set_clock_divider(&mut self, divider: ClockDivider) {
        self.config.divider = divider;
        self.apply();

        trace!("spi: divider {}", self.config.divider);
    }

    /// Legacy: change the data mode outside a transaction
    pub fn set_data_mode(&mut self, mode: DataMode) {
        self.config.phase = mode.phase();
        self.config.polarity = mode.polarity();
        self.apply();

        trace!("spi: mode {}", mode);
    }
}

impl<P, G> ErrorType for SpiClass<P, G> {
    type Error = Infallible;
}

/// Byte-wide embedded-hal bus on top of the Arduino primitives
///
/// Inherent `transfer(u8)` shadows the trait method in method-call syntax;
/// call `SpiBus::transfer(&mut spi, ..)` to reach this one.
impl<P: SpiPeripheral, G: GpioController> SpiBus<u8> for SpiClass<P, G> {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        SpiClass::read(self, words);
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        SpiClass::write(self, words);
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        self.transfer_into(read, write);
        Ok(())
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        SpiClass::transfer_in_place(self, words);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        // Every exchange already waited for its byte to come back
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{SPI_CONTINUE, SPI_LAST};
    use crate::testing::{MockGpio, MockSpi, MOCK_PCLK_HZ, MOCK_PIN_MAP};
    use spiduino_hal::gpio::Port;
    use spiduino_hal::spi::{FirstBit, Phase, Polarity};

    const CS: PinId = PinId::new(Port::A, 15);

    fn driver(spi: MockSpi) -> SpiClass<MockSpi, MockGpio> {
        SpiClass::new(spi, MockGpio::new())
    }

    fn begun() -> SpiClass<MockSpi, MockGpio> {
        let mut spi = driver(MockSpi::new());
        spi.begin();
        spi
    }

    #[test]
    fn test_new_touches_nothing() {
        let spi = SpiClass::new(MockSpi::default(), MockGpio::default());
        assert_eq!(spi.state(), SpiState::Uninitialized);

        let (peripheral, gpio) = spi.into_parts();
        assert!(!peripheral.clock_enabled);
        assert!(peripheral.configured.is_none());
        assert!(gpio.alternate.is_empty());
    }

    #[test]
    fn test_begin_clocks_muxes_and_configures_defaults() {
        let spi = begun();
        assert_eq!(spi.state(), SpiState::Idle);

        let expected = SpiSettings::new(4_000_000, BitOrder::MsbFirst, DataMode::Mode0)
            .register_config(MOCK_PCLK_HZ);
        assert_eq!(spi.register_config(), expected);

        let (peripheral, gpio) = spi.into_parts();
        assert!(peripheral.clock_enabled);
        assert_eq!(peripheral.configured, Some(expected));
        assert!(gpio.alternate.contains(&MOCK_PIN_MAP.sck));
        assert!(gpio.alternate.contains(&MOCK_PIN_MAP.miso));
        assert!(gpio.alternate.contains(&MOCK_PIN_MAP.mosi));
        assert!(!gpio.alternate.contains(&MOCK_PIN_MAP.nss));
    }

    #[test]
    fn test_default_settings_match_begin() {
        let mut spi = begun();
        let after_begin = spi.register_config();

        spi.begin_transaction(SpiSettings::default());
        assert_eq!(spi.register_config(), after_begin);
        // 42 MHz / 8 = 5.25 MHz would run faster than the 4 MHz asked for
        assert_eq!(spi.register_config().divider, ClockDivider::Div16);
        assert_eq!(spi.clock_hz(), 2_625_000);
    }

    #[test]
    fn test_transaction_divider_follows_peripheral_clock() {
        let settings = SpiSettings::new(4_000_000, BitOrder::MsbFirst, DataMode::Mode0);

        let mut fast = driver(MockSpi::new());
        fast.begin_transaction(settings);
        let mut slow = driver(MockSpi::with_base_clock(16_000_000));
        slow.begin_transaction(settings);

        assert_eq!(fast.register_config().divider, ClockDivider::Div16);
        assert_eq!(slow.register_config().divider, ClockDivider::Div8);
        assert_eq!(slow.clock_hz(), 2_000_000);
    }

    #[test]
    fn test_begin_again_reapplies_defaults() {
        let mut spi = begun();
        spi.set_data_mode(DataMode::Mode3);
        spi.begin();

        assert_eq!(spi.register_config().phase, Phase::CaptureOnFirstTransition);
        assert_eq!(spi.register_config().polarity, Polarity::IdleLow);
        let (peripheral, _) = spi.into_parts();
        assert_eq!(peripheral.enable_count, 2);
    }

    #[test]
    fn test_begin_with_select_drives_pin_high() {
        let mut spi = driver(MockSpi::new());
        spi.begin_with_select(CS);

        let (_, gpio) = spi.into_parts();
        assert!(gpio.is_output(CS));
        assert!(gpio.is_set_high(CS));
    }

    #[test]
    fn test_transaction_lifecycle() {
        let mut spi = begun();
        let settings = SpiSettings::new(1_000_000, BitOrder::LsbFirst, DataMode::Mode2);

        spi.begin_transaction(settings);
        assert_eq!(spi.state(), SpiState::TransactionActive);
        assert_eq!(spi.register_config(), settings.register_config(MOCK_PCLK_HZ));

        spi.end_transaction();
        assert_eq!(spi.state(), SpiState::Idle);
        // Hardware keeps the transaction settings
        assert_eq!(spi.register_config(), settings.register_config(MOCK_PCLK_HZ));

        spi.end();
        assert_eq!(spi.state(), SpiState::Disabled);
        let (peripheral, _) = spi.into_parts();
        assert!(!peripheral.clock_enabled);
        assert_eq!(peripheral.configured, Some(settings.register_config(MOCK_PCLK_HZ)));
    }

    #[test]
    fn test_end_transaction_outside_transaction_is_noop() {
        let mut spi = driver(MockSpi::new());
        spi.end_transaction();
        assert_eq!(spi.state(), SpiState::Uninitialized);

        let mut spi = begun();
        spi.end();
        spi.end_transaction();
        assert_eq!(spi.state(), SpiState::Disabled);
    }

    #[test]
    fn test_begin_transaction_without_begin_powers_up() {
        let mut spi = driver(MockSpi::new());
        let settings = SpiSettings::new(8_000_000, BitOrder::MsbFirst, DataMode::Mode1);
        spi.begin_transaction(settings);

        assert_eq!(spi.state(), SpiState::TransactionActive);
        assert_eq!(spi.transfer(0x12), !0x12);

        let (peripheral, gpio) = spi.into_parts();
        assert!(peripheral.clock_enabled);
        assert_eq!(peripheral.configured, Some(settings.register_config(MOCK_PCLK_HZ)));
        assert_eq!(gpio.alternate.len(), 3);
    }

    #[test]
    fn test_begin_transaction_after_end_powers_up_again() {
        let mut spi = begun();
        spi.end();
        spi.begin_transaction(SpiSettings::default());

        assert_eq!(spi.state(), SpiState::TransactionActive);
        let (peripheral, _) = spi.into_parts();
        assert!(peripheral.clock_enabled);
        assert_eq!(peripheral.enable_count, 2);
    }

    #[test]
    fn test_end_with_select_releases_pin() {
        let mut spi = driver(MockSpi::new());
        spi.begin_with_select(CS);
        spi.end_with_select(CS);

        let (peripheral, gpio) = spi.into_parts();
        assert!(!peripheral.clock_enabled);
        assert!(!gpio.is_output(CS));
        assert_eq!(gpio.released.as_slice(), &[CS]);
    }

    #[test]
    fn test_transfer_returns_received_byte() {
        let mut spi = driver(MockSpi::with_responses(&[0xA5, 0x5A]));
        spi.begin();

        assert_eq!(spi.transfer(0x01), 0xA5);
        assert_eq!(spi.transfer(0x02), 0x5A);
        let (peripheral, _) = spi.into_parts();
        assert_eq!(peripheral.sent.as_slice(), &[0x01, 0x02]);
    }

    #[test]
    fn test_transfer_before_begin_is_ignored() {
        let mut spi = driver(MockSpi::new());
        assert_eq!(spi.transfer(0x55), 0);
        assert_eq!(spi.transfer16(0x1234), 0);

        let mut buf = [1, 2, 3];
        spi.transfer_in_place(&mut buf);
        assert_eq!(buf, [1, 2, 3]);

        let (peripheral, _) = spi.into_parts();
        assert!(peripheral.sent.is_empty());
    }

    #[test]
    fn test_transfer_after_end_is_ignored() {
        let mut spi = begun();
        spi.end();
        assert_eq!(spi.transfer(0x55), 0);

        let (peripheral, _) = spi.into_parts();
        assert!(peripheral.sent.is_empty());
    }

    #[test]
    fn test_transfer16_msb_first() {
        let mut spi = driver(MockSpi::with_responses(&[0xAB, 0xCD]));
        spi.begin();

        assert_eq!(spi.transfer16(0x1234), 0xABCD);
        let (peripheral, _) = spi.into_parts();
        assert_eq!(peripheral.sent.as_slice(), &[0x12, 0x34]);
    }

    #[test]
    fn test_transfer16_lsb_first() {
        let mut spi = driver(MockSpi::with_responses(&[0xCD, 0xAB]));
        spi.begin();
        spi.set_bit_order(BitOrder::LsbFirst);

        assert_eq!(spi.transfer16(0x1234), 0xABCD);
        let (peripheral, _) = spi.into_parts();
        assert_eq!(peripheral.sent.as_slice(), &[0x34, 0x12]);
    }

    #[test]
    fn test_transfer_in_place_overwrites_buffer() {
        let mut spi = driver(MockSpi::with_responses(&[10, 20, 30, 40]));
        spi.begin();

        let mut buf = [1, 2, 3, 4];
        spi.transfer_in_place(&mut buf);
        assert_eq!(buf, [10, 20, 30, 40]);

        let (peripheral, _) = spi.into_parts();
        assert_eq!(peripheral.sent.as_slice(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_transfer_in_place_count_matches_len() {
        let mut spi = begun();
        let mut buf = [0u8; 7];
        spi.transfer_in_place(&mut buf[..5]);

        assert_eq!(buf, [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0, 0]);
        let (peripheral, _) = spi.into_parts();
        assert_eq!(peripheral.sent.len(), 5);
    }

    #[test]
    fn test_transfer_with_select_last_releases_pin() {
        let mut spi = driver(MockSpi::with_responses(&[0x42]));
        spi.begin_with_select(CS);

        assert_eq!(spi.transfer_with_select(CS, 0x9F, SPI_LAST), 0x42);
        let (_, gpio) = spi.into_parts();
        assert!(gpio.is_set_high(CS));
    }

    #[test]
    fn test_transfer_with_select_continue_keeps_pin_asserted() {
        let mut spi = begun();
        spi.begin_with_select(CS);

        spi.transfer_with_select(CS, 0x9F, SPI_CONTINUE);
        spi.transfer_with_select(CS, 0x00, SPI_CONTINUE);
        assert!(spi.gpio.is_set_low(CS));

        spi.transfer_with_select(CS, 0x00, SPI_LAST);
        assert!(spi.gpio.is_set_high(CS));

        let (peripheral, _) = spi.into_parts();
        assert_eq!(peripheral.sent.as_slice(), &[0x9F, 0x00, 0x00]);
    }

    #[test]
    fn test_transfer_mode_from_raw() {
        assert_eq!(TransferMode::from_raw(0), TransferMode::Continue);
        assert_eq!(TransferMode::from_raw(1), TransferMode::Last);
        assert_eq!(TransferMode::from_raw(9), TransferMode::Continue);
    }

    #[test]
    fn test_legacy_setters_change_one_field() {
        let mut spi = begun();
        let before = spi.register_config();

        spi.set_bit_order(BitOrder::LsbFirst);
        let after = spi.register_config();
        assert_eq!(after.first_bit, FirstBit::Lsb);
        assert_eq!((after.phase, after.polarity, after.divider), (before.phase, before.polarity, before.divider));

        spi.set_clock_divider(ClockDivider::Div128);
        assert_eq!(spi.register_config().divider, ClockDivider::Div128);
        assert_eq!(spi.register_config().first_bit, FirstBit::Lsb);
        assert_eq!(spi.clock_hz(), MOCK_PCLK_HZ / 128);

        spi.set_data_mode(DataMode::Mode2);
        let config = spi.register_config();
        assert_eq!(config.phase, Phase::CaptureOnFirstTransition);
        assert_eq!(config.polarity, Polarity::IdleHigh);
        assert_eq!(config.divider, ClockDivider::Div128);

        // begin + three setters
        let (peripheral, _) = spi.into_parts();
        assert_eq!(peripheral.configure_count, 4);
        assert_eq!(peripheral.configured, Some(config));
        assert_eq!(peripheral.enable_count, 1);
    }

    #[test]
    fn test_legacy_setter_before_begin_powers_up() {
        let mut spi = driver(MockSpi::new());
        spi.set_clock_divider(ClockDivider::from_bits(crate::consts::SPI_CLOCK_DIV32));

        assert_eq!(spi.state(), SpiState::Idle);
        assert_eq!(spi.transfer(0x0F), 0xF0);
        let (peripheral, _) = spi.into_parts();
        assert_eq!(peripheral.configured.map(|c| c.divider), Some(ClockDivider::Div32));
    }

    #[test]
    fn test_write_read_and_transfer_into() {
        let mut spi = driver(MockSpi::with_responses(&[9, 9, 1, 2, 3, 7, 8, 6]));
        spi.begin();

        spi.write(&[0xAA, 0xBB]);

        let mut rx = [0xEE; 3];
        spi.read(&mut rx);
        assert_eq!(rx, [1, 2, 3]);

        let mut rx = [0u8; 2];
        spi.transfer_into(&mut rx, &[0x10, 0x20, 0x30]);
        assert_eq!(rx, [7, 8]);

        let (peripheral, _) = spi.into_parts();
        assert_eq!(
            peripheral.sent.as_slice(),
            &[0xAA, 0xBB, 0x00, 0x00, 0x00, 0x10, 0x20, 0x30]
        );
    }

    #[test]
    fn test_transfer_into_pads_short_write() {
        let mut spi = begun();
        let mut rx = [0u8; 3];
        spi.transfer_into(&mut rx, &[0x0F]);

        assert_eq!(rx, [0xF0, 0xFF, 0xFF]);
        let (peripheral, _) = spi.into_parts();
        assert_eq!(peripheral.sent.as_slice(), &[0x0F, 0x00, 0x00]);
    }

    #[test]
    fn test_embedded_hal_bus() {
        fn exercise<B: SpiBus<u8>>(bus: &mut B) -> [u8; 2] {
            let mut buf = [0x01, 0x02];
            bus.transfer_in_place(&mut buf).ok();
            bus.flush().ok();
            buf
        }

        let mut spi = begun();
        assert_eq!(exercise(&mut spi), [0xFE, 0xFD]);

        let mut rx = [0u8; 1];
        SpiBus::transfer(&mut spi, &mut rx, &[0x80]).unwrap();
        assert_eq!(rx, [0x7F]);
    }
}

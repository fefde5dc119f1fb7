//! spiduino demo firmware
//!
//! Brings up the board's default SPI bus (SPI2 on PD3/PB14/PC3) the Arduino
//! way and polls the JEDEC ID of a serial flash selected by PA15 once a
//! second.
//!
//! This is the single place the default bus is constructed; everything that
//! talks SPI receives `&mut` access to it from here.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

use spiduino::config::SpiBusConfig;
use spiduino::consts::{MSBFIRST, SPI_CONTINUE, SPI_LAST, SPI_MODE0};
use spiduino::SpiClass;
use spiduino_hal::gpio::{GpioController, PinId};
use spiduino_hal::spi::SpiPeripheral;
use spiduino_hal_stm32f4::{BusClocks, SpiInstance, Stm32Gpio, Stm32Spi};

/// JEDEC "read identification" command
const CMD_READ_ID: u8 = 0x9F;

/// Bus parameters for the on-board flash
fn bus_config() -> SpiBusConfig {
    let config = SpiBusConfig {
        clock_hz: 8_000_000,
        bit_order: MSBFIRST,
        mode: SPI_MODE0,
        select_pin: None,
    };
    match config.clone().with_select_pin("PA15") {
        Ok(config) => config,
        Err(e) => {
            warn!("Invalid select pin ({}), running without chip select", e);
            config
        }
    }
}

/// Read manufacturer, memory type and capacity bytes
fn read_jedec_id<P, G>(spi: &mut SpiClass<P, G>, cs: Option<PinId>) -> [u8; 3]
where
    P: SpiPeripheral,
    G: GpioController,
{
    let mut id = [0u8; 3];
    match cs {
        Some(cs) => {
            spi.transfer_with_select(cs, CMD_READ_ID, SPI_CONTINUE);
            id[0] = spi.transfer_with_select(cs, 0x00, SPI_CONTINUE);
            id[1] = spi.transfer_with_select(cs, 0x00, SPI_CONTINUE);
            id[2] = spi.transfer_with_select(cs, 0x00, SPI_LAST);
        }
        None => {
            spi.transfer(CMD_READ_ID);
            spi.read(&mut id);
        }
    }
    id
}

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("spiduino firmware starting...");

    // Default RCC config leaves the chip on its reset clocks
    let p = embassy_stm32::init(Default::default());
    info!("Peripherals initialized");

    let config = bus_config();
    let cs = match config.select_pin() {
        Ok(cs) => cs,
        Err(e) => {
            warn!("Invalid select pin ({}), running without chip select", e);
            None
        }
    };

    let mut spi = SpiClass::new(
        Stm32Spi::spi2(p.SPI2, p.PD3, p.PB14, p.PC3, BusClocks::RESET),
        Stm32Gpio::new(),
    );
    match cs {
        Some(cs) => spi.begin_with_select(cs),
        None => spi.begin(),
    }

    let settings = config.settings();
    info!(
        "{} ready: requested {} Hz, running {} Hz",
        SpiInstance::Spi2,
        settings.clock_hz(),
        settings.actual_clock_hz(spi.base_clock_hz())
    );

    loop {
        spi.begin_transaction(settings);
        let id = read_jedec_id(&mut spi, cs);
        spi.end_transaction();

        info!("JEDEC id: {:02x}", id);
        Timer::after_secs(1).await;
    }
}

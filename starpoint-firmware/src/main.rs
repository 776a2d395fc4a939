//! Starpoint - Celestial Pointer Firmware
//!
//! Main firmware binary for RP2040-based pointer boards. Pick a body on
//! the touch panel, ask the coordinate host where it is, swing the
//! indicator there and hold.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::spi::{Config as SpiConfig, Spi};
use embassy_rp::uart::{BufferedInterruptHandler, Uart};
use embassy_time::Delay;
use embedded_hal_bus::spi::ExclusiveDevice;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use starpoint_core::config::parse_config;
use starpoint_core::{Catalog, Controller, Parts, PointerConfig};
use starpoint_drivers::servo::{PwmServo, ServoConfig};
use starpoint_drivers::stepper::StepDirStepper;
use starpoint_drivers::touch::Xpt2046;

use crate::board::{rp_config, HostRx, HostTx, LogSurface};

/// Embedded configuration (compiled into firmware)
/// Edit pointer.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../pointer.toml");

/// PWM clock divider: 125 MHz / 64 = 1.953 MHz
const SERVO_PWM_DIVIDER: u8 = 64;

/// PWM wrap for a 20 ms servo frame at the divided clock
const SERVO_PWM_TOP: u16 = 39_062;

/// XPT2046 SPI clock; the controller tops out around 2 MHz
const TOUCH_SPI_HZ: u32 = 1_000_000;

mod board;
mod channels;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Starpoint firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    // Host link on UART0 (GPIO0 TX, GPIO1 RX)
    let uart_config = rp_config(&config.link.uart());

    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized at {} baud", config.link.baudrate);

    // Azimuth stepper (SKR Pico X: STEP=GPIO11, DIR=GPIO10, ENABLE=GPIO12)
    let stepper = match StepDirStepper::new(
        Output::new(p.PIN_11, Level::Low),
        Output::new(p.PIN_10, Level::Low),
        Output::new(p.PIN_12, Level::High),
        Delay,
        true,
    ) {
        Ok(stepper) => stepper,
        Err(e) => defmt::panic!("Stepper init failed: {:?}", e),
    };

    info!(
        "Stepper initialized: {} steps/rev",
        config.azimuth.steps_per_revolution
    );

    // Elevation servos on PWM slice 7 (GPIO14 primary, GPIO15 companion)
    let mut pwm_config = PwmConfig::default();
    pwm_config.divider = SERVO_PWM_DIVIDER.into();
    pwm_config.top = SERVO_PWM_TOP;
    let pwm = Pwm::new_output_ab(p.PWM_SLICE7, p.PIN_14, p.PIN_15, pwm_config);
    let (primary, companion) = pwm.split();

    let servo_config = ServoConfig::from(&config.elevation);
    let servo = match primary {
        Some(channel) => PwmServo::new(channel, servo_config),
        None => defmt::panic!("PWM channel A unavailable"),
    };
    let companion = companion.map(|channel| PwmServo::new(channel, servo_config));

    info!("Servos initialized");

    // Touch panel on SPI1 (CLK=GPIO26, MOSI=GPIO27, MISO=GPIO28, CS=GPIO22)
    let mut spi_config = SpiConfig::default();
    spi_config.frequency = TOUCH_SPI_HZ;
    let spi = Spi::new_blocking(p.SPI1, p.PIN_26, p.PIN_27, p.PIN_28, spi_config);
    let cs = Output::new(p.PIN_22, Level::High);
    let touch_spi = match ExclusiveDevice::new(spi, cs, Delay) {
        Ok(device) => device,
        Err(_) => defmt::panic!("Touch SPI init failed"),
    };
    let panel = Xpt2046::new(touch_spi);

    info!("Touch panel initialized");

    let parts = Parts {
        panel,
        stepper,
        servo,
        companion,
        tx: HostTx::new(tx),
        rx: HostRx,
        display: LogSurface::new(),
    };
    let mut controller = Controller::new(parts, &config, Catalog::solar_system());

    spawner.spawn(tasks::link_rx_task(rx)).unwrap();

    info!("Tasks spawned, entering controller loop");

    tasks::run_controller(&mut controller, config.ui.settle_ms).await
}

/// Parse the embedded configuration
///
/// `build.rs` has already checked the file, so a failure here means the
/// on-device parser and the build-time check disagree.
fn load_config() -> PointerConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using stock configuration");
            PointerConfig::default()
        }
    }
}

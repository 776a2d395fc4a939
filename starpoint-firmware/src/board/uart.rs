//! Host UART adapters
//!
//! Transmit writes straight to the buffered UART. Receive never touches
//! the peripheral: the receive task owns it and the controller drains
//! [`RX_PIPE`] instead, so a poll never waits for bytes.

use core::convert::Infallible;

use embassy_rp::uart::{self, BufferedUartTx, Error as UartError};
use embassy_sync::pipe::TryReadError;
use embedded_io::Write;

use starpoint_hal::{DataBits, Parity, StopBits, UartConfig, UartRx, UartTx};

use crate::channels::RX_PIPE;

/// Translate line settings to the RP2040 UART config
pub fn rp_config(line: &UartConfig) -> uart::Config {
    let mut config = uart::Config::default();
    config.baudrate = line.baudrate;
    config.data_bits = match line.data_bits {
        DataBits::Seven => uart::DataBits::DataBits7,
        DataBits::Eight => uart::DataBits::DataBits8,
    };
    config.parity = match line.parity {
        Parity::None => uart::Parity::ParityNone,
        Parity::Even => uart::Parity::ParityEven,
        Parity::Odd => uart::Parity::ParityOdd,
    };
    config.stop_bits = match line.stop_bits {
        StopBits::One => uart::StopBits::STOP1,
        StopBits::Two => uart::StopBits::STOP2,
    };
    config
}

/// Transmit half of the host link
pub struct HostTx {
    tx: BufferedUartTx,
}

impl HostTx {
    pub fn new(tx: BufferedUartTx) -> Self {
        Self { tx }
    }
}

impl UartTx for HostTx {
    type Error = UartError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), UartError> {
        Write::write_all(&mut self.tx, data)
    }

    fn flush(&mut self) -> Result<(), UartError> {
        Write::flush(&mut self.tx)
    }
}

/// Receive half of the host link, reading from the pipe
pub struct HostRx;

impl UartRx for HostRx {
    type Error = Infallible;

    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, Infallible> {
        if buf.is_empty() {
            return Ok(0);
        }
        match RX_PIPE.try_read(buf) {
            Ok(n) => Ok(n),
            Err(TryReadError::Empty) => Ok(0),
        }
    }
}

//! XPT2046 resistive touch controller
//!
//! Each channel is one 3-byte SPI transfer: the control byte, then a
//! 12-bit result left-aligned across the two following bytes. Readings are
//! reduced to 10 bits so they share a scale with the calibration bounds.

use embedded_hal::spi::SpiDevice;

use starpoint_core::traits::{TouchError, TouchPanel, TouchSample};

/// Control bytes: start bit, channel, 12-bit differential, power-down between
const CMD_X: u8 = 0xD0;
const CMD_Y: u8 = 0x90;
const CMD_Z1: u8 = 0xB0;
const CMD_Z2: u8 = 0xC0;

/// Full-scale 10-bit reading
const FULL_SCALE: i16 = 1023;

/// XPT2046 on an SPI device with its own chip select
pub struct Xpt2046<SPI> {
    spi: SPI,
}

impl<SPI: SpiDevice> Xpt2046<SPI> {
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    pub fn release(self) -> SPI {
        self.spi
    }

    /// One channel, as a 10-bit value
    fn read_channel(&mut self, cmd: u8) -> Result<i16, TouchError> {
        let write = [cmd, 0, 0];
        let mut read = [0u8; 3];
        self.spi
            .transfer(&mut read, &write)
            .map_err(|_| TouchError::BusError)?;
        let raw12 = ((u16::from(read[1]) << 8) | u16::from(read[2])) >> 3;
        Ok((raw12 >> 2) as i16)
    }
}

impl<SPI: SpiDevice> TouchPanel for Xpt2046<SPI> {
    fn read_raw(&mut self) -> Result<TouchSample, TouchError> {
        let z1 = self.read_channel(CMD_Z1)?;
        let z2 = self.read_channel(CMD_Z2)?;
        let x = self.read_channel(CMD_X)?;
        let y = self.read_channel(CMD_Y)?;
        let pressure = FULL_SCALE.saturating_sub(z2.saturating_sub(z1)).max(0);
        Ok(TouchSample::new(x, y, pressure))
    }
}

//! Resistive touch panel trait

/// One raw reading from the panel's ADC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchSample {
    /// Raw X axis reading
    pub raw_x: i16,
    /// Raw Y axis reading
    pub raw_y: i16,
    /// Contact pressure; low when the panel is not touched
    pub pressure: i16,
}

impl TouchSample {
    pub const fn new(raw_x: i16, raw_y: i16, pressure: i16) -> Self {
        Self {
            raw_x,
            raw_y,
            pressure,
        }
    }
}

/// Errors that can occur while reading the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchError {
    /// SPI transfer failed
    BusError,
}

/// Trait for touch panels
pub trait TouchPanel {
    /// Take one raw sample
    ///
    /// Always returns a sample; whether it is a touch is decided by the
    /// pressure filter, not by the panel.
    fn read_raw(&mut self) -> Result<TouchSample, TouchError>;
}

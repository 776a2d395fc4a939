//! Configuration type definitions
//!
//! These types represent the pointer configuration. Every default matches
//! the stock hardware: a 320x240 resistive panel, a 1/16 microstepped
//! 200-step azimuth motor, a pair of 180° hobby servos and a 9600 baud
//! link to the coordinate host.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use starpoint_hal::UartConfig;
use starpoint_protocol::AngleParsing;

/// Touch panel calibration
///
/// The panel is mounted rotated relative to the display, so with
/// `swap_axes` set the raw Y reading drives screen X and the raw X reading
/// drives screen Y.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct TouchCalibration {
    /// Pressure must be strictly above this to count as a touch
    pub min_pressure: i16,
    /// Pressure must be strictly below this to count as a touch
    pub max_pressure: i16,
    /// Raw X reading at the panel's first edge
    pub raw_x_min: i16,
    /// Raw X reading at the panel's far edge
    pub raw_x_max: i16,
    /// Raw Y reading at the panel's first edge
    pub raw_y_min: i16,
    /// Raw Y reading at the panel's far edge
    pub raw_y_max: i16,
    /// Logical screen width in pixels
    pub screen_width: u16,
    /// Logical screen height in pixels
    pub screen_height: u16,
    /// Raw Y drives screen X (rotated panel)
    pub swap_axes: bool,
}

impl Default for TouchCalibration {
    fn default() -> Self {
        Self {
            min_pressure: 40,
            max_pressure: 1000,
            raw_x_min: 150,
            raw_x_max: 880,
            raw_y_min: 130,
            raw_y_max: 900,
            screen_width: 320,
            screen_height: 240,
            swap_axes: true,
        }
    }
}

/// How the azimuth delta is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AzimuthPath {
    /// Move the raw difference `target - current`
    #[default]
    Direct,
    /// Take the shorter arc through 0°/360°
    Shortest,
}

/// Azimuth stepper configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct AzimuthConfig {
    /// Microsteps per full turn of the output shaft
    pub steps_per_revolution: u32,
    /// STEP high time per pulse (µs)
    pub pulse_high_us: u32,
    /// STEP low time per pulse (µs)
    pub pulse_low_us: u32,
    /// Swap the DIR pin polarity
    pub invert_direction: bool,
    /// Delta selection policy
    pub path: AzimuthPath,
    /// Azimuth of the neutral position (degrees)
    pub home_deg: f32,
}

impl AzimuthConfig {
    /// Pulses per degree of azimuth
    pub fn steps_per_degree(&self) -> f32 {
        self.steps_per_revolution as f32 / 360.0
    }
}

impl Default for AzimuthConfig {
    fn default() -> Self {
        Self {
            steps_per_revolution: 3200,
            pulse_high_us: 800,
            pulse_low_us: 800,
            invert_direction: false,
            path: AzimuthPath::Direct,
            home_deg: 0.0,
        }
    }
}

/// Elevation servo configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ElevationConfig {
    /// Lowest commandable angle (degrees)
    pub min_deg: f32,
    /// Highest commandable angle (degrees)
    pub max_deg: f32,
    /// Angle commanded at power-on (level)
    pub initial_deg: f32,
    /// Angle of the neutral position used when homing
    pub home_deg: f32,
    /// Drive the mirrored companion servo
    pub mirror_companion: bool,
    /// Servo pulse width at `min_deg` (µs)
    pub servo_min_pulse_us: u16,
    /// Servo pulse width at `max_deg` (µs)
    pub servo_max_pulse_us: u16,
}

impl Default for ElevationConfig {
    fn default() -> Self {
        Self {
            min_deg: 0.0,
            max_deg: 180.0,
            initial_deg: 90.0,
            home_deg: 0.0,
            mirror_companion: true,
            servo_min_pulse_us: 500,
            servo_max_pulse_us: 2500,
        }
    }
}

/// Serial link configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct LinkConfig {
    /// Baud rate (8N1)
    pub baudrate: u32,
    /// How coordinate fields are parsed
    pub angle_parsing: AngleParsing,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            baudrate: 9600,
            angle_parsing: AngleParsing::Lenient,
        }
    }
}

impl LinkConfig {
    /// Line settings for the host UART
    pub fn uart(&self) -> UartConfig {
        UartConfig::with_baudrate(self.baudrate)
    }
}

/// UI configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct UiConfig {
    /// Quiet time after an accepted touch before sampling again (ms)
    pub settle_ms: u32,
    /// Return to the neutral position before requesting a new target
    pub home_on_select: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            settle_ms: 200,
            home_on_select: true,
        }
    }
}

/// Complete pointer configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct PointerConfig {
    pub touch: TouchCalibration,
    pub azimuth: AzimuthConfig,
    pub elevation: ElevationConfig,
    pub link: LinkConfig,
    pub ui: UiConfig,
}

impl PointerConfig {
    /// Create a configuration with stock defaults
    pub fn new() -> Self {
        Self::default()
    }
}

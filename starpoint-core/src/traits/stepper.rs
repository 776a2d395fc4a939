//! Stepper motor driver trait
//!
//! This trait abstracts over step/direction drivers (A4988, DRV8825,
//! TMC2209 in standalone mode, etc.). The azimuth axis has no position
//! sensor, so the driver only needs to emit pulses; the motion controller
//! counts them.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Motor rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Increasing azimuth
    Forward,
    /// Decreasing azimuth
    Reverse,
}

impl Direction {
    /// Get the opposite direction
    pub fn opposite(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }
}

/// Errors that can occur with stepper operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepperError {
    /// A control pin could not be driven
    PinError,
    /// Pulse requested while the driver is disabled
    NotEnabled,
}

/// Trait for pulse-driven stepper drivers
pub trait PulseStepper {
    /// Set the rotation direction for subsequent pulses
    fn set_direction(&mut self, dir: Direction) -> Result<(), StepperError>;

    /// Enable or disable the driver outputs
    ///
    /// When disabled, the motor is free to rotate and does not hold position.
    fn enable(&mut self, enabled: bool) -> Result<(), StepperError>;

    /// Issue one step pulse
    ///
    /// Holds STEP high for `high_us` then low for `low_us`, blocking for the
    /// whole period.
    fn pulse(&mut self, high_us: u32, low_us: u32) -> Result<(), StepperError>;
}

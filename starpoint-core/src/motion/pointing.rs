//! Pointing state and motion reports
//!
//! These types describe where the indicator is believed to be and what each
//! move command did. The azimuth axis is open-loop: its position is whatever
//! the pulse count says it is.

use crate::traits::Direction;

/// Axis identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// Continuous-rotation stepper
    Azimuth,
    /// Bounded-range servo pair
    Elevation,
}

/// Whether a motion command is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionPhase {
    #[default]
    Idle,
    Moving(Axis),
}

impl MotionPhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, MotionPhase::Idle)
    }
}

/// Believed and requested indicator position, in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PointingState {
    pub(crate) current_azimuth: f32,
    pub(crate) current_elevation: f32,
    pub(crate) target_azimuth: f32,
    pub(crate) target_elevation: f32,
    pub(crate) has_target: bool,
}

impl PointingState {
    /// Power-on state: azimuth 0, elevation at `neutral_elevation`
    pub const fn new(neutral_elevation: f32) -> Self {
        Self {
            current_azimuth: 0.0,
            current_elevation: neutral_elevation,
            target_azimuth: 0.0,
            target_elevation: neutral_elevation,
            has_target: false,
        }
    }

    pub fn current_azimuth(&self) -> f32 {
        self.current_azimuth
    }

    /// Last commanded elevation (after normalization and clamping)
    pub fn current_elevation(&self) -> f32 {
        self.current_elevation
    }

    pub fn target_azimuth(&self) -> f32 {
        self.target_azimuth
    }

    /// Last requested elevation, before normalization
    pub fn target_elevation(&self) -> f32 {
        self.target_elevation
    }

    /// Check whether any target has been received since power-on
    pub fn has_target(&self) -> bool {
        self.has_target
    }
}

/// Result of an azimuth move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AzimuthMove {
    /// Pulses issued
    pub steps: u32,
    /// Logical direction (before any pin inversion)
    pub direction: Direction,
}

/// Result of an elevation move
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ElevationMove {
    /// Commanded angle after normalization and clamping
    pub angle: f32,
    /// False when the angle equals the previous command and nothing was sent
    pub written: bool,
}

/// Result of moving both axes
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PointingMove {
    pub azimuth: AzimuthMove,
    pub elevation: ElevationMove,
}

//! Touch sampling
//!
//! Turns raw panel readings into logical screen points. A reading counts as
//! a touch only when its pressure lies strictly inside the calibrated band;
//! that rejects both "not touched" (too low) and noise spikes (too high).
//! Accepted readings are linearly remapped and clamped, never rejected for
//! being off-panel.

use crate::config::TouchCalibration;
use crate::traits::{TouchError, TouchPanel, TouchSample};

/// A position on the logical screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScreenPoint {
    /// Horizontal position, `0..screen_width`
    pub x: u16,
    /// Vertical position, `0..screen_height`
    pub y: u16,
}

impl ScreenPoint {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Integer linear remap of `value` from one range to another
///
/// Truncates toward zero and does not clamp; values outside the input range
/// map outside the output range. A degenerate input range maps everything
/// to `out_min`.
pub fn map_range(value: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    if in_max == in_min {
        return out_min;
    }
    (value - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

fn clamp_to(value: i32, extent: u16) -> u16 {
    value.clamp(0, i32::from(extent.saturating_sub(1))) as u16
}

impl TouchCalibration {
    /// Check whether a pressure reading is a real touch
    pub fn accepts_pressure(&self, pressure: i16) -> bool {
        pressure > self.min_pressure && pressure < self.max_pressure
    }

    /// Map a raw sample to the screen, clamping to the screen edges
    pub fn to_screen(&self, sample: &TouchSample) -> ScreenPoint {
        let (from_x, from_y) = if self.swap_axes {
            (
                (sample.raw_y, self.raw_y_min, self.raw_y_max),
                (sample.raw_x, self.raw_x_min, self.raw_x_max),
            )
        } else {
            (
                (sample.raw_x, self.raw_x_min, self.raw_x_max),
                (sample.raw_y, self.raw_y_min, self.raw_y_max),
            )
        };

        let x = map_range(
            i32::from(from_x.0),
            i32::from(from_x.1),
            i32::from(from_x.2),
            0,
            i32::from(self.screen_width),
        );
        let y = map_range(
            i32::from(from_y.0),
            i32::from(from_y.1),
            i32::from(from_y.2),
            0,
            i32::from(self.screen_height),
        );

        ScreenPoint::new(
            clamp_to(x, self.screen_width),
            clamp_to(y, self.screen_height),
        )
    }

    /// Filter and map one raw sample
    pub fn qualify(&self, sample: &TouchSample) -> Option<ScreenPoint> {
        if !self.accepts_pressure(sample.pressure) {
            return None;
        }
        Some(self.to_screen(sample))
    }
}

/// Reads the panel and qualifies samples
pub struct TouchSampler<P> {
    panel: P,
    calibration: TouchCalibration,
}

impl<P: TouchPanel> TouchSampler<P> {
    pub fn new(panel: P, calibration: TouchCalibration) -> Self {
        Self { panel, calibration }
    }

    pub fn calibration(&self) -> &TouchCalibration {
        &self.calibration
    }

    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }

    /// Read one sample; `Ok(None)` when it is not a touch
    ///
    /// The caller must wait the settle delay after an accepted sample before
    /// calling again, or one press will register several times.
    pub fn sample(&mut self) -> Result<Option<ScreenPoint>, TouchError> {
        let raw = self.panel.read_raw()?;
        Ok(self.calibration.qualify(&raw))
    }
}

//! PWM hobby servo
//!
//! A 50 Hz channel where the pulse width sets the horn angle. The PWM
//! channel must already run at the servo frame rate; this driver only sets
//! the duty cycle.

use embedded_hal::pwm::SetDutyCycle;

use starpoint_core::config::ElevationConfig;
use starpoint_core::traits::{AngleServo, ServoError};

/// Servo pulse geometry
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServoConfig {
    /// Frame period (µs); 20 000 for 50 Hz
    pub period_us: u16,
    /// Pulse width at `min_deg` (µs)
    pub min_pulse_us: u16,
    /// Pulse width at `max_deg` (µs)
    pub max_pulse_us: u16,
    pub min_deg: f32,
    pub max_deg: f32,
}

impl Default for ServoConfig {
    fn default() -> Self {
        Self {
            period_us: 20_000,
            min_pulse_us: 500,
            max_pulse_us: 2500,
            min_deg: 0.0,
            max_deg: 180.0,
        }
    }
}

impl From<&ElevationConfig> for ServoConfig {
    fn from(cfg: &ElevationConfig) -> Self {
        Self {
            min_pulse_us: cfg.servo_min_pulse_us,
            max_pulse_us: cfg.servo_max_pulse_us,
            min_deg: cfg.min_deg,
            max_deg: cfg.max_deg,
            ..Self::default()
        }
    }
}

impl ServoConfig {
    /// Pulse width for `degrees`, or `None` outside the range
    pub fn pulse_us(&self, degrees: f32) -> Option<u16> {
        if !(degrees >= self.min_deg && degrees <= self.max_deg) {
            return None;
        }
        let span_deg = self.max_deg - self.min_deg;
        if span_deg <= 0.0 {
            return Some(self.min_pulse_us);
        }
        let span_us = f32::from(self.max_pulse_us) - f32::from(self.min_pulse_us);
        let pulse = f32::from(self.min_pulse_us) + (degrees - self.min_deg) / span_deg * span_us;
        Some((pulse + 0.5) as u16)
    }
}

/// Servo on one PWM channel
pub struct PwmServo<C> {
    channel: C,
    config: ServoConfig,
    last_pulse_us: Option<u16>,
}

impl<C: SetDutyCycle> PwmServo<C> {
    /// Wrap a channel; the output stays idle until the first `set_angle`
    pub fn new(channel: C, config: ServoConfig) -> Self {
        Self {
            channel,
            config,
            last_pulse_us: None,
        }
    }

    /// Pulse width most recently written
    pub fn last_pulse_us(&self) -> Option<u16> {
        self.last_pulse_us
    }
}

impl<C: SetDutyCycle> AngleServo for PwmServo<C> {
    fn set_angle(&mut self, degrees: f32) -> Result<(), ServoError> {
        let pulse = self.config.pulse_us(degrees).ok_or(ServoError::OutOfRange)?;
        self.channel
            .set_duty_cycle_fraction(pulse, self.config.period_us)
            .map_err(|_| ServoError::PwmError)?;
        self.last_pulse_us = Some(pulse);
        Ok(())
    }
}

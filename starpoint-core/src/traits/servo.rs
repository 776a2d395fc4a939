//! Hobby servo trait

/// Errors that can occur with servo operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServoError {
    /// PWM channel rejected the duty cycle
    PwmError,
    /// Angle outside the servo's mechanical range
    OutOfRange,
}

/// Trait for position servos
///
/// The servo's own controller handles the transition; `set_angle` only
/// commands the final position and returns immediately.
pub trait AngleServo {
    /// Command an absolute angle in degrees
    fn set_angle(&mut self, degrees: f32) -> Result<(), ServoError>;
}

//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod servo;
pub mod stepper;
pub mod touch;

pub use servo::{AngleServo, ServoError};
pub use stepper::{Direction, PulseStepper, StepperError};
pub use touch::{TouchError, TouchPanel, TouchSample};

//! Motion control
//!
//! Pointing state and the dual-axis controller that turns target angles
//! into stepper pulses and servo writes.

pub mod controller;
pub mod pointing;

pub use controller::{
    azimuth_delta, normalize_elevation, step_count, MotionController, MotionError,
};
pub use pointing::{
    Axis, AzimuthMove, ElevationMove, MotionPhase, PointingMove, PointingState,
};

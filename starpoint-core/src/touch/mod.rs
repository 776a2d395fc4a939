//! Touch input
//!
//! Pressure filtering and calibration of raw panel samples.

pub mod sampler;

pub use sampler::{map_range, ScreenPoint, TouchSampler};

//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in starpoint-core on top of `embedded-hal` 1.0:
//!
//! - Stepper drivers (STEP/DIR/ENABLE: A4988, DRV8825, TMC standalone)
//! - Hobby servos on a 50 Hz PWM channel
//! - XPT2046 resistive touch controller over SPI

#![no_std]
#![deny(unsafe_code)]

pub mod servo;
pub mod stepper;
pub mod touch;

//! Board-agnostic core logic for the celestial pointer
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (stepper, servo, touch panel)
//! - Object catalog and page arithmetic
//! - Touch sampling and calibration
//! - UI paging state machine
//! - Dual-axis motion control
//! - Serial link to the coordinate host
//! - The controller loop tying it all together
//! - Configuration type definitions and parser

#![no_std]
#![deny(unsafe_code)]

pub mod catalog;
pub mod config;
pub mod controller;
pub mod link;
pub mod motion;
pub mod touch;
pub mod traits;
pub mod ui;

pub use catalog::{Catalog, CatalogEntry};
pub use config::PointerConfig;
pub use controller::{Controller, Cycle, LineOutcome, Parts, Status, TouchOutcome};

//! Starpoint Hardware Abstraction Layer
//!
//! This crate defines the serial transport traits that chip-specific code
//! implements. The controller loop in `starpoint-core` only ever talks to
//! the coordinate host through these traits, so the same loop runs against
//! an RP2040 UART on the board and against an in-memory loopback on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (starpoint-firmware)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  starpoint-core (controller loop)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  starpoint-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication

#![no_std]
#![deny(unsafe_code)]

pub mod uart;

// Re-export key traits at crate root for convenience
pub use uart::{DataBits, Parity, StopBits, UartConfig, UartRx, UartTx};

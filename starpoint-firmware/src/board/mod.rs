//! Board glue
//!
//! Adapts embassy-rp peripherals to the starpoint traits.

pub mod display;
pub mod uart;

pub use display::LogSurface;
pub use uart::{rp_config, HostRx, HostTx};

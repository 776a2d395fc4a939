//! Configuration types
//!
//! Board-agnostic configuration structures, parsed at boot from the TOML
//! file embedded in the firmware image.

pub mod toml;
pub mod types;

pub use self::toml::{parse_config, ParseError};
pub use types::*;

//! User interface state
//!
//! Page navigation and slot selection driven by qualified touches.

pub mod session;

pub use session::{Quadrant, UiAction, UiSession};

//! Display abstraction and screen rendering for Starpoint
//!
//! This crate provides:
//! - `DisplaySurface` trait, the three drawing primitives the UI needs
//! - Geometry and colour types shared by every surface implementation
//! - The fixed screen layout (slot buttons, page buttons, status line)
//! - `Renderer`, which turns page and status views into draw calls
//!
//! # Architecture
//!
//! Panel drivers implement `DisplaySurface` with their hardware-specific
//! code. The controller never draws directly; it hands a `PageView` or a
//! `StatusLine` to the renderer whenever the page or the pointing state
//! changes. Drawing is assumed to always succeed, so the surface methods
//! have no error path.

#![no_std]
#![deny(unsafe_code)]

pub mod layout;
pub mod renderer;
pub mod surface;

// Re-export key types
pub use layout::{SCREEN_HEIGHT, SCREEN_WIDTH};
pub use renderer::{PageView, Renderer, StatusLine};
pub use surface::{Color, DisplaySurface, Point, Rect, TextSize};

//! Logging display surface
//!
//! Stands in for a panel driver: text draws go to the defmt log, fills
//! are traced. Swapping in a real panel only needs another
//! `DisplaySurface` impl.

use defmt::*;

use starpoint_display::{Color, DisplaySurface, Point, Rect, TextSize};

/// Display surface that logs what would be drawn
#[derive(Default)]
pub struct LogSurface {
    frames: u32,
}

impl LogSurface {
    pub const fn new() -> Self {
        Self { frames: 0 }
    }
}

impl DisplaySurface for LogSurface {
    fn clear(&mut self, color: Color) {
        self.frames = self.frames.wrapping_add(1);
        trace!("screen: clear #{} to {:04x}", self.frames, color.0);
    }

    fn draw_region(&mut self, rect: Rect, color: Color) {
        trace!(
            "screen: fill {}x{} at ({}, {}) with {:04x}",
            rect.width,
            rect.height,
            rect.x,
            rect.y,
            color.0
        );
    }

    fn draw_text(&mut self, position: Point, text: &str, _size: TextSize, _color: Color) {
        debug!("screen: ({}, {}) {}", position.x, position.y, text);
    }
}

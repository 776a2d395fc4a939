//! Fixed screen layout
//!
//! Coordinates are in the display's own pixel frame. The touch panel is
//! mounted rotated relative to the display, so touch quadrants are decided
//! in the touch frame by the core, not from these rectangles.
//!
//! ```text
//! ┌────────────────────┬────────────────────┐
//! │    left slot       │    right slot      │  0..104
//! ├────────────────────┴────────────────────┤
//! │ status line                             │  112..136
//! ├─────────────┬─────────────┬─────────────┤
//! │    prev     │   n / 12    │    next     │  144..232
//! └─────────────┴─────────────┴─────────────┘
//! ```

use crate::surface::{Color, Rect, TextSize};

/// Display width in pixels
pub const SCREEN_WIDTH: u16 = 320;

/// Display height in pixels
pub const SCREEN_HEIGHT: u16 = 240;

pub const LEFT_SLOT: Rect = Rect::new(8, 8, 148, 96);
pub const RIGHT_SLOT: Rect = Rect::new(164, 8, 148, 96);
pub const STATUS_LINE: Rect = Rect::new(0, 112, SCREEN_WIDTH, 24);
pub const PREV_BUTTON: Rect = Rect::new(8, 144, 112, 88);
pub const PAGE_LABEL: Rect = Rect::new(120, 144, 80, 88);
pub const NEXT_BUTTON: Rect = Rect::new(200, 144, 112, 88);

pub const BACKGROUND: Color = Color::BLACK;
pub const SLOT_FILL: Color = Color::NAVY;
pub const BUTTON_FILL: Color = Color::DARK_GREY;
pub const BUTTON_DISABLED: Color = Color::rgb(40, 40, 40);
pub const TEXT: Color = Color::WHITE;
pub const STATUS_OK: Color = Color::GREEN;
pub const STATUS_BUSY: Color = Color::YELLOW;
pub const STATUS_ERROR: Color = Color::RED;

pub const SLOT_TEXT: TextSize = TextSize(2);
pub const BUTTON_TEXT: TextSize = TextSize(3);
pub const STATUS_TEXT: TextSize = TextSize(2);
pub const PAGE_TEXT: TextSize = TextSize(2);

/// Top-left position that centres `chars` characters of `size` in `rect`
///
/// Text wider than the rectangle is left-aligned to the rectangle edge.
pub fn centered(rect: Rect, chars: usize, size: TextSize) -> crate::surface::Point {
    let text_width = (chars as u16).saturating_mul(size.char_width());
    let x = rect.x + rect.width.saturating_sub(text_width) / 2;
    let y = rect.y + rect.height.saturating_sub(size.char_height()) / 2;
    crate::surface::Point::new(x, y)
}

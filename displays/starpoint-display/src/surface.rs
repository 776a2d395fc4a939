//! Display surface trait
//!
//! Defines the drawing interface the UI renders through.

/// A pixel position (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Check if a point lies inside the rectangle
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && point.x < self.x.saturating_add(self.width)
            && point.y < self.y.saturating_add(self.height)
    }
}

/// RGB565 colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color(pub u16);

impl Color {
    pub const BLACK: Color = Color(0x0000);
    pub const WHITE: Color = Color(0xFFFF);
    pub const RED: Color = Color(0xF800);
    pub const GREEN: Color = Color(0x07E0);
    pub const NAVY: Color = Color(0x000F);
    pub const DARK_GREY: Color = Color(0x7BEF);
    pub const YELLOW: Color = Color(0xFFE0);

    /// Pack 8-bit channels into RGB565
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color((((r as u16) & 0xF8) << 8) | (((g as u16) & 0xFC) << 3) | ((b as u16) >> 3))
    }
}

/// Text scale factor; size 1 is a 6x8 pixel character cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextSize(pub u8);

impl TextSize {
    /// Width of one character cell at this size
    pub const fn char_width(&self) -> u16 {
        6 * self.0 as u16
    }

    /// Height of one character cell at this size
    pub const fn char_height(&self) -> u16 {
        8 * self.0 as u16
    }
}

/// Display surface trait
///
/// The controller's only view of the screen. Implementations wrap a panel
/// driver (or, on the host, record the calls). Drawing never fails from the
/// caller's point of view.
pub trait DisplaySurface {
    /// Fill the entire screen with one colour
    fn clear(&mut self, color: Color);

    /// Fill a rectangle
    fn draw_region(&mut self, rect: Rect, color: Color);

    /// Draw text with its top-left corner at `position`
    fn draw_text(&mut self, position: Point, text: &str, size: TextSize, color: Color);
}

impl<T: DisplaySurface + ?Sized> DisplaySurface for &mut T {
    fn clear(&mut self, color: Color) {
        (**self).clear(color)
    }

    fn draw_region(&mut self, rect: Rect, color: Color) {
        (**self).draw_region(rect, color)
    }

    fn draw_text(&mut self, position: Point, text: &str, size: TextSize, color: Color) {
        (**self).draw_text(position, text, size, color)
    }
}

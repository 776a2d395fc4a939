//! Screen rendering
//!
//! Builds screens for the catalog pages and the status line.
//!
//! A page redraw repaints everything; a status change repaints only the
//! status strip so the slot buttons do not flicker while coordinates arrive.

use core::fmt::Write;

use heapless::String;

use crate::layout::{self, centered};
use crate::surface::{DisplaySurface, Rect, TextSize};

/// What the catalog page shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PageView<'a> {
    /// Zero-based page number
    pub page: usize,
    /// Total number of pages
    pub page_count: usize,
    /// Object name in the left slot, if the slot exists
    pub left: Option<&'a str>,
    /// Object name in the right slot, if the slot exists
    pub right: Option<&'a str>,
}

impl<'a> PageView<'a> {
    /// Check if a previous page exists
    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    /// Check if a next page exists
    pub fn has_next(&self) -> bool {
        self.page + 1 < self.page_count
    }
}

/// Status strip content
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusLine<'a> {
    /// Nothing selected yet
    Ready,
    /// Waiting for the host to answer a request
    Requesting { name: &'a str, body_id: &'a str },
    /// Indicator is holding on a target
    Pointing { azimuth: f32, elevation: f32 },
    /// The host reported a failure
    Error { message: &'a str },
}

/// Scratch capacity for formatted status text
const STATUS_CAPACITY: usize = 48;

/// Screen renderer
pub struct Renderer {
    scratch: String<STATUS_CAPACITY>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Create a new renderer
    pub const fn new() -> Self {
        Self {
            scratch: String::new(),
        }
    }

    /// Render the boot splash
    pub fn render_boot<D: DisplaySurface>(&mut self, surface: &mut D) {
        surface.clear(layout::BACKGROUND);
        let full = Rect::new(0, 0, layout::SCREEN_WIDTH, layout::SCREEN_HEIGHT);
        let title = "STARPOINT";
        surface.draw_text(
            centered(full, title.chars().count(), TextSize(3)),
            title,
            TextSize(3),
            layout::TEXT,
        );
    }

    /// Render a full catalog page with its status line
    pub fn render_page<D: DisplaySurface>(
        &mut self,
        surface: &mut D,
        view: &PageView<'_>,
        status: &StatusLine<'_>,
    ) {
        surface.clear(layout::BACKGROUND);

        self.draw_slot(surface, layout::LEFT_SLOT, view.left);
        self.draw_slot(surface, layout::RIGHT_SLOT, view.right);

        draw_button(surface, layout::PREV_BUTTON, "<", view.has_prev());
        draw_button(surface, layout::NEXT_BUTTON, ">", view.has_next());

        self.scratch.clear();
        let _ = write!(self.scratch, "{}/{}", view.page + 1, view.page_count);
        surface.draw_text(
            centered(layout::PAGE_LABEL, self.scratch.chars().count(), layout::PAGE_TEXT),
            &self.scratch,
            layout::PAGE_TEXT,
            layout::TEXT,
        );

        self.render_status(surface, status);
    }

    /// Repaint only the status strip
    pub fn render_status<D: DisplaySurface>(&mut self, surface: &mut D, status: &StatusLine<'_>) {
        surface.draw_region(layout::STATUS_LINE, layout::BACKGROUND);

        self.scratch.clear();
        // Overlong text is cut at the scratch capacity
        let color = match status {
            StatusLine::Ready => {
                let _ = self.scratch.push_str("Ready");
                layout::TEXT
            }
            StatusLine::Requesting { name, body_id } => {
                let _ = write!(self.scratch, "Requesting {} (#{})", name, body_id);
                layout::STATUS_BUSY
            }
            StatusLine::Pointing { azimuth, elevation } => {
                let _ = write!(self.scratch, "Az {:.2} El {:.2}", azimuth, elevation);
                layout::STATUS_OK
            }
            StatusLine::Error { message } => {
                let _ = write!(self.scratch, "Error: {}", message);
                layout::STATUS_ERROR
            }
        };

        let max_chars =
            (layout::STATUS_LINE.width / layout::STATUS_TEXT.char_width()) as usize;
        let text = truncate(&self.scratch, max_chars);
        surface.draw_text(
            centered(layout::STATUS_LINE, text.chars().count(), layout::STATUS_TEXT),
            text,
            layout::STATUS_TEXT,
            color,
        );
    }

    fn draw_slot<D: DisplaySurface>(&mut self, surface: &mut D, rect: Rect, name: Option<&str>) {
        // Missing slots (odd catalog length) are left blank
        let Some(name) = name else {
            return;
        };
        surface.draw_region(rect, layout::SLOT_FILL);
        let max_chars = (rect.width / layout::SLOT_TEXT.char_width()) as usize;
        let text = truncate(name, max_chars);
        surface.draw_text(
            centered(rect, text.chars().count(), layout::SLOT_TEXT),
            text,
            layout::SLOT_TEXT,
            layout::TEXT,
        );
    }
}

fn draw_button<D: DisplaySurface>(surface: &mut D, rect: Rect, label: &str, enabled: bool) {
    let fill = if enabled {
        layout::BUTTON_FILL
    } else {
        layout::BUTTON_DISABLED
    };
    surface.draw_region(rect, fill);
    surface.draw_text(
        centered(rect, label.chars().count(), layout::BUTTON_TEXT),
        label,
        layout::BUTTON_TEXT,
        layout::TEXT,
    );
}

/// Cut `text` to at most `max_chars` characters on a char boundary
fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Color, Point};
    use heapless::Vec;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Clear(Color),
        Region(Rect, Color),
        Text(Point, String<64>, Color),
    }

    #[derive(Default)]
    struct RecordingSurface {
        ops: Vec<Op, 32>,
    }

    impl RecordingSurface {
        fn texts(&self) -> impl Iterator<Item = &str> {
            self.ops.iter().filter_map(|op| match op {
                Op::Text(_, text, _) => Some(text.as_str()),
                _ => None,
            })
        }

        fn has_text(&self, needle: &str) -> bool {
            self.texts().any(|t| t == needle)
        }
    }

    impl DisplaySurface for RecordingSurface {
        fn clear(&mut self, color: Color) {
            self.ops.push(Op::Clear(color)).unwrap();
        }

        fn draw_region(&mut self, rect: Rect, color: Color) {
            self.ops.push(Op::Region(rect, color)).unwrap();
        }

        fn draw_text(&mut self, position: Point, text: &str, _size: TextSize, color: Color) {
            let mut owned = String::new();
            owned.push_str(text).unwrap();
            self.ops.push(Op::Text(position, owned, color)).unwrap();
        }
    }

    fn first_page() -> PageView<'static> {
        PageView {
            page: 0,
            page_count: 12,
            left: Some("Sun"),
            right: Some("Mercury"),
        }
    }

    #[test]
    fn test_render_boot() {
        let mut surface = RecordingSurface::default();
        Renderer::new().render_boot(&mut surface);
        assert_eq!(surface.ops[0], Op::Clear(layout::BACKGROUND));
        assert!(surface.has_text("STARPOINT"));
    }

    #[test]
    fn test_render_page_draws_slots_and_indicator() {
        let mut surface = RecordingSurface::default();
        let mut renderer = Renderer::new();
        renderer.render_page(&mut surface, &first_page(), &StatusLine::Ready);

        assert_eq!(surface.ops[0], Op::Clear(layout::BACKGROUND));
        assert!(surface.has_text("Sun"));
        assert!(surface.has_text("Mercury"));
        assert!(surface.has_text("1/12"));
        assert!(surface.has_text("Ready"));
        assert!(surface
            .ops
            .contains(&Op::Region(layout::LEFT_SLOT, layout::SLOT_FILL)));
    }

    #[test]
    fn test_prev_disabled_on_first_page() {
        let mut surface = RecordingSurface::default();
        Renderer::new().render_page(&mut surface, &first_page(), &StatusLine::Ready);

        assert!(surface
            .ops
            .contains(&Op::Region(layout::PREV_BUTTON, layout::BUTTON_DISABLED)));
        assert!(surface
            .ops
            .contains(&Op::Region(layout::NEXT_BUTTON, layout::BUTTON_FILL)));
    }

    #[test]
    fn test_missing_right_slot_left_blank() {
        let view = PageView {
            page: 2,
            page_count: 3,
            left: Some("Triton"),
            right: None,
        };
        let mut surface = RecordingSurface::default();
        Renderer::new().render_page(&mut surface, &view, &StatusLine::Ready);

        assert!(!surface
            .ops
            .iter()
            .any(|op| matches!(op, Op::Region(rect, _) if *rect == layout::RIGHT_SLOT)));
        assert!(surface
            .ops
            .contains(&Op::Region(layout::NEXT_BUTTON, layout::BUTTON_DISABLED)));
    }

    #[test]
    fn test_status_pointing_format() {
        let mut surface = RecordingSurface::default();
        Renderer::new().render_status(
            &mut surface,
            &StatusLine::Pointing {
                azimuth: 157.23,
                elevation: 42.15,
            },
        );
        assert_eq!(
            surface.ops[0],
            Op::Region(layout::STATUS_LINE, layout::BACKGROUND)
        );
        assert!(surface.has_text("Az 157.23 El 42.15"));
    }

    #[test]
    fn test_status_requesting_and_error() {
        let mut surface = RecordingSurface::default();
        let mut renderer = Renderer::new();
        renderer.render_status(
            &mut surface,
            &StatusLine::Requesting {
                name: "Jupiter",
                body_id: "599",
            },
        );
        assert!(surface.has_text("Requesting Jupiter (#599)"));

        renderer.render_status(&mut surface, &StatusLine::Error { message: "not found" });
        assert!(surface.has_text("Error: not found"));
        assert!(surface
            .ops
            .iter()
            .any(|op| matches!(op, Op::Text(_, _, c) if *c == layout::STATUS_ERROR)));
    }

    #[test]
    fn test_long_status_is_truncated_to_strip() {
        let mut surface = RecordingSurface::default();
        Renderer::new().render_status(
            &mut surface,
            &StatusLine::Error {
                message: "the ephemeris service did not answer within the window",
            },
        );
        let max = (layout::STATUS_LINE.width / layout::STATUS_TEXT.char_width()) as usize;
        assert!(surface.texts().all(|t| t.chars().count() <= max));
    }

    fn text_position(surface: &RecordingSurface, needle: &str) -> Option<Point> {
        surface.ops.iter().find_map(|op| match op {
            Op::Text(at, text, _) if text.as_str() == needle => Some(*at),
            _ => None,
        })
    }

    #[test]
    fn test_non_ascii_text_centred_by_chars() {
        let view = PageView {
            page: 9,
            page_count: 12,
            left: Some("Éris"),
            right: Some("Eris"),
        };
        let mut surface = RecordingSurface::default();
        let mut renderer = Renderer::new();
        renderer.render_page(&mut surface, &view, &StatusLine::Ready);

        assert_eq!(
            text_position(&surface, "Éris"),
            Some(centered(layout::LEFT_SLOT, 4, layout::SLOT_TEXT))
        );
        let left = text_position(&surface, "Éris").unwrap();
        let right = text_position(&surface, "Eris").unwrap();
        assert_eq!(left.x - layout::LEFT_SLOT.x, right.x - layout::RIGHT_SLOT.x);

        renderer.render_status(&mut surface, &StatusLine::Error { message: "Ío → ∅" });
        assert_eq!(
            text_position(&surface, "Error: Ío → ∅"),
            Some(centered(layout::STATUS_LINE, 13, layout::STATUS_TEXT))
        );
    }

    #[test]
    fn test_truncate_on_char_boundary() {
        assert_eq!(truncate("Ganymede", 4), "Gany");
        assert_eq!(truncate("Io", 4), "Io");
        assert_eq!(truncate("αβγ", 2), "αβ");
    }
}

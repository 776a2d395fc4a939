//! UI paging state machine
//!
//! The screen is split into four quadrants. The top half holds the two
//! object slots of the current page; the bottom half holds the page
//! buttons.
//!
//! | Quadrant     | Effect                                     |
//! |--------------|--------------------------------------------|
//! | top-left     | select the left slot, if it exists         |
//! | top-right    | select the right slot, if it exists        |
//! | bottom-left  | previous page, unless on the first page    |
//! | bottom-right | next page, unless on the last page         |
//!
//! "Top" is `y >= height / 2` because the touch frame is rotated relative
//! to the display. Points on a dividing line belong to the top and right
//! quadrants.

use crate::catalog::Catalog;
use crate::touch::ScreenPoint;

/// Screen quadrant of a touch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    /// Classify a point on a `width` x `height` screen
    pub fn of(point: ScreenPoint, width: u16, height: u16) -> Self {
        let left = point.x < width / 2;
        let top = point.y >= height / 2;
        match (top, left) {
            (true, true) => Quadrant::TopLeft,
            (true, false) => Quadrant::TopRight,
            (false, true) => Quadrant::BottomLeft,
            (false, false) => Quadrant::BottomRight,
        }
    }
}

/// Result of one accepted touch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiAction {
    /// An object slot was tapped; carries the catalog index
    Select { index: usize },
    /// The page changed; the screen needs a redraw
    PageChanged { page: usize },
    /// Tap on an empty slot or a disabled page button
    Ignored,
}

/// Paging state for the lifetime of the process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UiSession {
    current_page: usize,
    last_touch_ms: Option<u64>,
    width: u16,
    height: u16,
}

impl Default for UiSession {
    fn default() -> Self {
        Self::new(320, 240)
    }
}

impl UiSession {
    /// Start on page 0 of a `width` x `height` touch frame
    pub const fn new(width: u16, height: u16) -> Self {
        Self {
            current_page: 0,
            last_touch_ms: None,
            width,
            height,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Time of the last accepted touch, if any
    pub fn last_touch_ms(&self) -> Option<u64> {
        self.last_touch_ms
    }

    /// Check whether the settle delay after the last touch has passed
    pub fn is_settled(&self, now_ms: u64, settle_ms: u32) -> bool {
        match self.last_touch_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= u64::from(settle_ms),
        }
    }

    /// Apply one accepted touch
    ///
    /// Every call counts as an accepted touch for settle timing, including
    /// taps that are ignored.
    pub fn handle_touch(&mut self, point: ScreenPoint, catalog: &Catalog, now_ms: u64) -> UiAction {
        self.last_touch_ms = Some(now_ms);

        match Quadrant::of(point, self.width, self.height) {
            Quadrant::TopLeft => self.select(Catalog::left_slot(self.current_page), catalog),
            Quadrant::TopRight => self.select(Catalog::right_slot(self.current_page), catalog),
            Quadrant::BottomLeft => {
                if self.current_page == 0 {
                    return UiAction::Ignored;
                }
                self.current_page -= 1;
                UiAction::PageChanged {
                    page: self.current_page,
                }
            }
            Quadrant::BottomRight => {
                if self.current_page >= catalog.max_page() {
                    return UiAction::Ignored;
                }
                self.current_page += 1;
                UiAction::PageChanged {
                    page: self.current_page,
                }
            }
        }
    }

    fn select(&self, index: usize, catalog: &Catalog) -> UiAction {
        if index < catalog.len() {
            UiAction::Select { index }
        } else {
            UiAction::Ignored
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogEntry;
    use proptest::prelude::*;

    const TOP_LEFT: ScreenPoint = ScreenPoint::new(40, 200);
    const TOP_RIGHT: ScreenPoint = ScreenPoint::new(280, 200);
    const BOTTOM_LEFT: ScreenPoint = ScreenPoint::new(40, 20);
    const BOTTOM_RIGHT: ScreenPoint = ScreenPoint::new(280, 20);

    #[test]
    fn test_quadrant_boundaries() {
        assert_eq!(Quadrant::of(ScreenPoint::new(160, 120), 320, 240), Quadrant::TopRight);
        assert_eq!(Quadrant::of(ScreenPoint::new(159, 120), 320, 240), Quadrant::TopLeft);
        assert_eq!(Quadrant::of(ScreenPoint::new(160, 119), 320, 240), Quadrant::BottomRight);
        assert_eq!(Quadrant::of(ScreenPoint::new(0, 0), 320, 240), Quadrant::BottomLeft);
    }

    #[test]
    fn test_select_slots_on_first_page() {
        let catalog = Catalog::solar_system();
        let mut ui = UiSession::default();
        assert_eq!(ui.handle_touch(TOP_LEFT, &catalog, 0), UiAction::Select { index: 0 });
        assert_eq!(ui.handle_touch(TOP_RIGHT, &catalog, 0), UiAction::Select { index: 1 });
    }

    #[test]
    fn test_mid_panel_touch_selects_right_slot() {
        let catalog = Catalog::solar_system();
        let mut ui = UiSession::default();
        let action = ui.handle_touch(ScreenPoint::new(160, 120), &catalog, 0);
        assert_eq!(action, UiAction::Select { index: 1 });
    }

    #[test]
    fn test_prev_on_first_page_is_noop() {
        let catalog = Catalog::solar_system();
        let mut ui = UiSession::default();
        assert_eq!(ui.handle_touch(BOTTOM_LEFT, &catalog, 0), UiAction::Ignored);
        assert_eq!(ui.current_page(), 0);
    }

    #[test]
    fn test_paging_to_last_page_and_back() {
        let catalog = Catalog::solar_system();
        let mut ui = UiSession::default();
        for expected in 1..=11 {
            assert_eq!(
                ui.handle_touch(BOTTOM_RIGHT, &catalog, 0),
                UiAction::PageChanged { page: expected }
            );
        }
        assert_eq!(ui.handle_touch(BOTTOM_RIGHT, &catalog, 0), UiAction::Ignored);
        assert_eq!(ui.current_page(), 11);

        assert_eq!(ui.handle_touch(TOP_RIGHT, &catalog, 0), UiAction::Select { index: 23 });

        assert_eq!(
            ui.handle_touch(BOTTOM_LEFT, &catalog, 0),
            UiAction::PageChanged { page: 10 }
        );
    }

    #[test]
    fn test_missing_slot_on_odd_catalog_is_ignored() {
        static ODD: [CatalogEntry; 3] = [
            CatalogEntry::new("Sun", "10"),
            CatalogEntry::new("Moon", "301"),
            CatalogEntry::new("Mars", "499"),
        ];
        let catalog = Catalog::new(&ODD);
        let mut ui = UiSession::default();
        ui.handle_touch(BOTTOM_RIGHT, &catalog, 0);
        assert_eq!(ui.handle_touch(TOP_LEFT, &catalog, 0), UiAction::Select { index: 2 });
        assert_eq!(ui.handle_touch(TOP_RIGHT, &catalog, 0), UiAction::Ignored);
    }

    #[test]
    fn test_settle_timing() {
        let catalog = Catalog::solar_system();
        let mut ui = UiSession::default();
        assert!(ui.is_settled(0, 200));

        ui.handle_touch(BOTTOM_LEFT, &catalog, 1_000);
        assert_eq!(ui.last_touch_ms(), Some(1_000));
        assert!(!ui.is_settled(1_199, 200));
        assert!(ui.is_settled(1_200, 200));
    }

    proptest! {
        #[test]
        fn prop_page_stays_in_bounds(touches in proptest::collection::vec((0u16..320, 0u16..240), 0..64)) {
            let catalog = Catalog::solar_system();
            let mut ui = UiSession::default();
            for (x, y) in touches {
                match ui.handle_touch(ScreenPoint::new(x, y), &catalog, 0) {
                    UiAction::Select { index } => prop_assert!(index < catalog.len()),
                    UiAction::PageChanged { page } => prop_assert_eq!(page, ui.current_page()),
                    UiAction::Ignored => {}
                }
                prop_assert!(ui.current_page() <= 11);
            }
        }
    }
}

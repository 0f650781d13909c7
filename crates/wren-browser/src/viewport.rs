//! The visible window onto a laid-out page.

use wren_layout::{DisplayList, PlacedItem};

/// Default viewport width in pixels.
pub const DEFAULT_WIDTH: f32 = 800.0;

/// Default viewport height in pixels.
pub const DEFAULT_HEIGHT: f32 = 600.0;

/// Distance moved by one scroll step.
pub const SCROLL_STEP: f32 = 100.0;

/// Viewport size and vertical scroll offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
    /// Page y coordinate shown at the top edge. Never negative.
    pub scroll: f32,
}

impl Viewport {
    /// A viewport scrolled to the top of the page.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            scroll: 0.0,
        }
    }

    /// Scroll one step down the page.
    pub fn scroll_down(&mut self) {
        self.scroll += SCROLL_STEP;
    }

    /// Scroll one step up, stopping at the top of the page.
    pub fn scroll_up(&mut self) {
        self.scroll = (self.scroll - SCROLL_STEP).max(0.0);
    }

    /// Jump to an absolute offset, clamped at the top of the page.
    pub fn scroll_to(&mut self, scroll: f32) {
        self.scroll = scroll.max(0.0);
    }

    /// Pull the scroll offset back so the viewport does not run past the
    /// bottom of `display_list`.
    pub fn clamp_to(&mut self, display_list: &DisplayList) {
        let max_scroll = (display_list.document_height() - self.height).max(0.0);
        self.scroll = self.scroll.min(max_scroll);
    }

    /// Items of `display_list` that intersect this viewport.
    pub fn visible_items<'a>(
        &self,
        display_list: &'a DisplayList,
    ) -> impl Iterator<Item = &'a PlacedItem> + use<'a> {
        display_list.visible(self.scroll, self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_up_stops_at_top() {
        let mut viewport = Viewport::default();
        viewport.scroll_up();
        assert_eq!(viewport.scroll, 0.0);

        viewport.scroll_down();
        viewport.scroll_down();
        assert_eq!(viewport.scroll, 200.0);

        viewport.scroll_to(50.0);
        viewport.scroll_up();
        assert_eq!(viewport.scroll, 0.0);
    }

    #[test]
    fn test_clamp_to_stops_at_document_bottom() {
        use wren_html::tokenize;
        use wren_layout::{ApproximateFontProvider, FontCache, LayoutConfig, layout};

        // Ten lines, 20px apart; the last ends at 21 + 9 * 20 + 16 = 217.
        let html: String = (0..10).map(|n| format!("w{n}<br>")).collect();
        let mut fonts = FontCache::new(ApproximateFontProvider);
        let list = layout(&tokenize(&html), &LayoutConfig::default(), &mut fonts).unwrap();

        let mut viewport = Viewport::new(800.0, 100.0);
        viewport.scroll_to(1000.0);
        viewport.clamp_to(&list);
        assert_eq!(viewport.scroll, 117.0);
        assert!(viewport.visible_items(&list).any(|item| item.word == "w9"));

        // A page shorter than the viewport never scrolls.
        let mut tall = Viewport::new(800.0, 600.0);
        tall.scroll_down();
        tall.clamp_to(&list);
        assert_eq!(tall.scroll, 0.0);
    }

    #[test]
    fn test_scroll_to_clamps_negative() {
        let mut viewport = Viewport::default();
        viewport.scroll_to(-30.0);
        assert_eq!(viewport.scroll, 0.0);
    }
}

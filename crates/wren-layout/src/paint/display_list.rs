use serde::Serialize;

use crate::font::FontHandle;

/// A word with its final position and font.
///
/// `(x, y)` is the top-left corner the word is drawn from, in page
/// coordinates.
#[derive(Debug, Clone, Serialize)]
pub struct PlacedItem {
    /// Left edge.
    pub x: f32,
    /// Top edge: the line's baseline minus this font's ascent.
    pub y: f32,
    /// The word, never containing whitespace.
    pub word: String,
    /// The font to draw with.
    pub font: FontHandle,
}

impl PlacedItem {
    /// Vertical extent of the word: ascent plus descent of its font.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.font.ascent() + self.font.descent()
    }

    /// Bottom edge of the word.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height()
    }
}

/// Placed words in the order their lines were flushed: top to bottom, and
/// left to right within a line.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct DisplayList {
    items: Vec<PlacedItem>,
}

impl DisplayList {
    /// Create an empty display list.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub(crate) fn push(&mut self, item: PlacedItem) {
        self.items.push(item);
    }

    /// All items in order.
    #[must_use]
    pub fn items(&self) -> &[PlacedItem] {
        &self.items
    }

    /// Number of placed words.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing was placed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the items in order.
    pub fn iter(&self) -> std::slice::Iter<'_, PlacedItem> {
        self.items.iter()
    }

    /// The items a viewport scrolled to `scroll` and `height` pixels tall
    /// should draw: those whose vertical span `[y, bottom)` intersects
    /// `[scroll, scroll + height)`.
    pub fn visible(&self, scroll: f32, height: f32) -> impl Iterator<Item = &PlacedItem> {
        let end = scroll + height;
        self.items
            .iter()
            .filter(move |item| item.y < end && item.bottom() > scroll)
    }

    /// Lowest bottom edge of any item, or `0.0` for an empty list.
    #[must_use]
    pub fn document_height(&self) -> f32 {
        self.items.iter().map(PlacedItem::bottom).fold(0.0, f32::max)
    }
}

impl<'a> IntoIterator for &'a DisplayList {
    type Item = &'a PlacedItem;
    type IntoIter = std::slice::Iter<'a, PlacedItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::font::ApproximateFontMetrics;
    use crate::style::FontKey;

    fn item(y: f32) -> PlacedItem {
        // 16px approximate font: 16px tall.
        PlacedItem {
            x: 13.0,
            y,
            word: "w".to_string(),
            font: FontHandle::new(
                FontKey::INITIAL,
                Rc::new(ApproximateFontMetrics::new(FontKey::INITIAL)),
            ),
        }
    }

    fn list(ys: &[f32]) -> DisplayList {
        let mut list = DisplayList::new();
        for &y in ys {
            list.push(item(y));
        }
        list
    }

    #[test]
    fn test_visible_clips_to_viewport() {
        let list = list(&[0.0, 100.0, 590.0, 600.0, 700.0]);
        let ys: Vec<f32> = list.visible(0.0, 600.0).map(|item| item.y).collect();
        assert_eq!(ys, vec![0.0, 100.0, 590.0]);
    }

    #[test]
    fn test_visible_keeps_partially_scrolled_items() {
        let list = list(&[90.0, 84.0, 110.0]);
        // Viewport starts at 100: [90, 106) overlaps, [84, 100) does not.
        let ys: Vec<f32> = list.visible(100.0, 600.0).map(|item| item.y).collect();
        assert_eq!(ys, vec![90.0, 110.0]);
    }

    #[test]
    fn test_document_height() {
        assert_eq!(DisplayList::new().document_height(), 0.0);
        assert_eq!(list(&[10.0, 50.0]).document_height(), 66.0);
    }
}

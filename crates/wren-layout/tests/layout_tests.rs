//! Integration tests for the text layout engine.
//!
//! All tests use the approximate font provider: at 16px every character is
//! 8px wide, ascent is 12px and descent 4px. With the default 13px margin
//! and 18px top, the first line's baseline sits at 18 + 1.25 * 12 = 33.

use quickcheck_macros::quickcheck;
use serde_json::json;
use wren_html::tokenize;
use wren_layout::{
    ApproximateFontProvider, DisplayList, FontCache, FontError, FontKey, FontSlant, FontWeight,
    LayoutConfig, LayoutError, layout,
};

fn layout_str(document: &str) -> DisplayList {
    layout_with_width(document, 800.0)
}

fn layout_with_width(document: &str, page_width: f32) -> DisplayList {
    let mut fonts = FontCache::new(ApproximateFontProvider);
    layout(
        &tokenize(document),
        &LayoutConfig::with_page_width(page_width),
        &mut fonts,
    )
    .expect("approximate fonts never fail for positive sizes")
}

fn words(list: &DisplayList) -> Vec<&str> {
    list.iter().map(|item| item.word.as_str()).collect()
}

fn positions(list: &DisplayList) -> Vec<(f32, f32)> {
    list.iter().map(|item| (item.x, item.y)).collect()
}

#[test]
fn test_bold_word_between_normal_words() {
    let list = layout_str("Hi <b>there</b>!");
    assert_eq!(words(&list), vec!["Hi", "there", "!"]);

    let bold = FontKey::new(16, FontWeight::Bold, FontSlant::Roman);
    let keys: Vec<FontKey> = list.iter().map(|item| item.font.key()).collect();
    assert_eq!(keys, vec![FontKey::INITIAL, bold, FontKey::INITIAL]);

    // "Hi" is 16px + 8px space; bold "there" is 5 * 9px + 9px space.
    assert_eq!(positions(&list), vec![(13.0, 21.0), (37.0, 21.0), (91.0, 21.0)]);
}

#[test]
fn test_mixed_sizes_share_a_baseline() {
    let list = layout_str("<small>a</small>A");
    assert_eq!(words(&list), vec!["a", "A"]);
    assert_eq!(list.items()[0].font.key().size, 14);
    assert_eq!(list.items()[1].font.key().size, 16);

    // Baseline from the 16px ascent: 33. The 14px word has a 10.5px ascent.
    assert_eq!(positions(&list), vec![(13.0, 22.5), (27.0, 21.0)]);
    let baselines: Vec<f32> = list
        .iter()
        .map(|item| item.y + item.font.ascent())
        .collect();
    assert_eq!(baselines, vec![33.0, 33.0]);
}

#[test]
fn test_line_break_forces_new_line() {
    let list = layout_str("a<br>b");
    // Next line top: 33 + 1.25 * 4 = 38; baseline 38 + 15 = 53.
    assert_eq!(positions(&list), vec![(13.0, 21.0), (13.0, 41.0)]);
}

#[test]
fn test_empty_document() {
    let mut fonts = FontCache::new(ApproximateFontProvider);
    let list = layout(&tokenize(""), &LayoutConfig::default(), &mut fonts).unwrap();
    assert!(list.is_empty());
    assert!(fonts.is_empty());
}

#[test]
fn test_paragraph_end_adds_gap() {
    let list = layout_str("a</p>b");
    // 38 + 18 gap = 56; baseline 56 + 15 = 71.
    assert_eq!(positions(&list), vec![(13.0, 21.0), (13.0, 59.0)]);
}

#[test]
fn test_paragraph_gap_applies_without_pending_words() {
    let list = layout_str("</p>a");
    assert_eq!(positions(&list), vec![(13.0, 39.0)]);
}

#[test]
fn test_repeated_breaks_do_not_stack() {
    assert_eq!(
        positions(&layout_str("a<br><br><br>b")),
        positions(&layout_str("a<br>b"))
    );
}

#[test]
fn test_words_wrap_at_right_margin() {
    // Limit is 100 - 13 = 87. Each word is 32px plus an 8px space.
    let list = layout_with_width("aaaa bbbb cccc", 100.0);
    assert_eq!(
        positions(&list),
        vec![(13.0, 21.0), (53.0, 21.0), (13.0, 41.0)]
    );
}

#[test]
fn test_word_wider_than_page_is_not_split() {
    let list = layout_with_width("abcdefghij x", 50.0);
    assert_eq!(words(&list), vec!["abcdefghij", "x"]);
    assert_eq!(positions(&list), vec![(13.0, 21.0), (13.0, 41.0)]);
}

#[test]
fn test_nested_bold_closes_on_inner_end() {
    let list = layout_str("<b>x<b>y</b>z</b>");
    let weights: Vec<FontWeight> = list.iter().map(|item| item.font.key().weight).collect();
    assert_eq!(
        weights,
        vec![FontWeight::Bold, FontWeight::Bold, FontWeight::Normal]
    );
}

#[test]
fn test_unknown_tags_are_ignored() {
    assert_eq!(
        positions(&layout_str("<html><p>a <span>b</span>")),
        positions(&layout_str("a b"))
    );
}

#[test]
fn test_whitespace_is_collapsed_between_tokens() {
    let list = layout_str("one\n\n  two\tthree");
    assert_eq!(words(&list), vec!["one", "two", "three"]);
}

#[test]
fn test_font_failure_aborts_layout() {
    let document = "ok <small><small><small><small><small><small><small><small>gone";
    let mut fonts = FontCache::new(ApproximateFontProvider);
    let result = layout(&tokenize(document), &LayoutConfig::default(), &mut fonts);
    assert!(matches!(
        result,
        Err(LayoutError::Font(FontError::InvalidSize { size: 0 }))
    ));
}

#[test]
fn test_fonts_are_shared_within_and_across_passes() {
    let tokens = tokenize("one <i>two</i> three <i>four</i>");
    let mut fonts = FontCache::new(ApproximateFontProvider);
    let first = layout(&tokens, &LayoutConfig::default(), &mut fonts).unwrap();
    let second = layout(&tokens, &LayoutConfig::default(), &mut fonts).unwrap();
    assert_eq!(fonts.len(), 2);

    let items = first.items();
    assert!(items[0].font.same_font(&items[2].font));
    assert!(items[1].font.same_font(&items[3].font));
    assert!(!items[0].font.same_font(&items[1].font));

    for (a, b) in first.iter().zip(second.iter()) {
        assert!(a.font.same_font(&b.font));
    }
}

#[test]
fn test_placed_items_serialize() {
    let list = layout_str("<i>Hi</i>");
    assert_eq!(
        serde_json::to_value(&list).unwrap(),
        json!([{
            "x": 13.0,
            "y": 21.0,
            "word": "Hi",
            "font": { "size": 16, "weight": "normal", "slant": "italic" }
        }])
    );
}

/// Build a document from generated (opcode, text) pairs using only the
/// directives that keep every font at 16px.
fn same_size_document(ops: &[(u8, String)]) -> String {
    let mut document = String::new();
    for (op, text) in ops {
        let tag = match op % 8 {
            0 => "<b>",
            1 => "</b>",
            2 => "<i>",
            3 => "</i>",
            4 => "<br>",
            5 => "</p>",
            _ => "",
        };
        document.push_str(tag);
        document.extend(text.chars().filter(|c| *c != '<' && *c != '>'));
        document.push(' ');
    }
    document
}

#[quickcheck]
fn prop_plain_text_uses_initial_font(text: String) -> bool {
    let text: String = text.chars().filter(|c| *c != '<' && *c != '>').collect();
    layout_str(&text)
        .iter()
        .all(|item| item.font.key() == FontKey::INITIAL)
}

#[quickcheck]
fn prop_lines_are_monotonic(ops: Vec<(u8, String)>) -> bool {
    let list = layout_with_width(&same_size_document(&ops), 200.0);
    list.items().windows(2).all(|pair| {
        let (a, b) = (&pair[0], &pair[1]);
        if a.y == b.y {
            b.x > a.x
        } else {
            // New line: strictly below the previous baseline.
            b.y > a.y + a.font.ascent()
        }
    })
}

#[quickcheck]
fn prop_words_fit_or_start_a_line(ops: Vec<(u8, String)>) -> bool {
    let config = LayoutConfig::with_page_width(200.0);
    let list = layout_with_width(&same_size_document(&ops), config.page_width);
    list.items().windows(2).all(|pair| {
        let (a, b) = (&pair[0], &pair[1]);
        if b.y == a.y {
            return b.x + b.font.measure(&b.word) <= config.line_limit();
        }
        // Wrapped or explicitly broken: back at the left margin.
        b.x == config.h_step
    })
}

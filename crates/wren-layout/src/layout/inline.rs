use std::mem;

use wren_html::{Directive, Token};

use super::{LayoutConfig, LayoutError};
use crate::font::{FontCache, FontHandle};
use crate::paint::{DisplayList, PlacedItem};
use crate::style::{FontKey, FontSlant, FontWeight};

/// Extra room reserved above and below the tallest font on a line, as a
/// multiple of its ascent and descent.
pub const LINE_SPACING: f32 = 1.25;

/// A word waiting on the current line for its baseline to be known.
#[derive(Debug, Clone)]
struct LineEntry {
    x: f32,
    word: String,
    font: FontHandle,
}

/// The layout state machine.
///
/// Owns the style state and the line buffer for one pass. Feed it tokens in
/// document order with [`token`](Self::token), then call
/// [`finish`](Self::finish) to flush the last line.
pub struct InlineLayout<'a> {
    config: LayoutConfig,
    fonts: &'a mut FontCache,
    style: FontKey,
    line: Vec<LineEntry>,
    cursor_x: f32,
    cursor_y: f32,
    display_list: DisplayList,
}

impl<'a> InlineLayout<'a> {
    /// Start a pass at the top-left corner of the page in the initial style.
    pub fn new(config: LayoutConfig, fonts: &'a mut FontCache) -> Self {
        Self {
            config,
            fonts,
            style: FontKey::INITIAL,
            line: Vec::new(),
            cursor_x: config.h_step,
            cursor_y: config.v_step,
            display_list: DisplayList::new(),
        }
    }

    /// The current style.
    #[must_use]
    pub const fn style(&self) -> FontKey {
        self.style
    }

    /// The current `(x, y)` cursor. `y` is the top of the line being built.
    #[must_use]
    pub const fn cursor(&self) -> (f32, f32) {
        (self.cursor_x, self.cursor_y)
    }

    /// Process one token.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Font`] if a word's font cannot be resolved.
    pub fn token(&mut self, token: &Token) -> Result<(), LayoutError> {
        match token {
            Token::Text { content } => self.text(content)?,
            Token::Tag { .. } => {
                if let Some(directive) = token.directive() {
                    self.directive(directive);
                }
            }
        }
        Ok(())
    }

    /// Flush the last line and hand over the finished display list.
    #[must_use]
    pub fn finish(mut self) -> DisplayList {
        self.flush();
        self.display_list
    }

    /// Apply a style or break directive.
    ///
    /// Closing directives set fixed values instead of restoring what was in
    /// effect before the matching opener.
    pub fn directive(&mut self, directive: Directive) {
        match directive {
            Directive::Bold => self.style.weight = FontWeight::Bold,
            Directive::EndBold => self.style.weight = FontWeight::Normal,
            Directive::Italic => self.style.slant = FontSlant::Italic,
            Directive::EndItalic => self.style.slant = FontSlant::Roman,
            Directive::Small => self.style.size -= 2,
            Directive::EndSmall => self.style.size += 2,
            Directive::Big => self.style.size += 4,
            Directive::EndBig => self.style.size -= 4,
            Directive::LineBreak => self.flush(),
            Directive::EndParagraph => {
                self.flush();
                self.cursor_y += self.config.v_step;
            }
        }
    }

    /// Split `text` on whitespace and place each word, wrapping to a new line
    /// whenever a word would cross the right margin.
    ///
    /// Words are never broken; a word wider than the page sits alone on its
    /// line and overflows.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Font`] if the current style's font cannot be
    /// resolved.
    pub fn text(&mut self, text: &str) -> Result<(), LayoutError> {
        let mut words = text.split_whitespace().peekable();
        if words.peek().is_none() {
            return Ok(());
        }

        let font = self.fonts.get_font(self.style)?;
        let space = font.measure(" ");
        for word in words {
            let width = font.measure(word);
            if self.cursor_x + width > self.config.line_limit() {
                self.flush();
            }
            self.line.push(LineEntry {
                x: self.cursor_x,
                word: word.to_string(),
                font: font.clone(),
            });
            self.cursor_x += width + space;
        }
        Ok(())
    }

    /// Finish the current line.
    ///
    /// All words share one baseline, placed `LINE_SPACING` times the largest
    /// ascent below the line top; each word's top is the baseline minus its
    /// own ascent. The next line starts `LINE_SPACING` times the largest
    /// descent below the baseline. An empty line is left untouched.
    pub fn flush(&mut self) {
        if self.line.is_empty() {
            return;
        }

        let line = mem::take(&mut self.line);
        let max_ascent = line
            .iter()
            .map(|entry| entry.font.ascent())
            .fold(f32::MIN, f32::max);
        let max_descent = line
            .iter()
            .map(|entry| entry.font.descent())
            .fold(f32::MIN, f32::max);

        let baseline = LINE_SPACING.mul_add(max_ascent, self.cursor_y);
        for LineEntry { x, word, font } in line {
            let y = baseline - font.ascent();
            self.display_list.push(PlacedItem { x, y, word, font });
        }

        self.cursor_x = self.config.h_step;
        self.cursor_y = LINE_SPACING.mul_add(max_descent, baseline);
    }
}

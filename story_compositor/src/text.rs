//! Greedy word-wrap for scene captions.

use image::{Rgb, RgbImage};

use crate::font::Font;

/// Break `text` into lines no wider than `max_width` under `font`.
///
/// Words are accumulated onto the current line while the joined line still
/// fits; the word that would overflow starts the next line. A single word
/// wider than `max_width` gets a line to itself rather than being split.
/// Runs of whitespace collapse to one space.
pub fn wrap_words<F: Font + ?Sized>(font: &F, text: &str, max_width: u32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line  = String::new();

    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }
        let candidate = format!("{} {}", line, word);
        if font.text_width(&candidate) > max_width {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        } else {
            line = candidate;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Wrap and draw `text` starting at `(x, y)`, one `font.line_height()`
/// per line. Returns the number of lines drawn.
pub fn draw_wrapped_text<F: Font + ?Sized>(
    img:       &mut RgbImage,
    font:      &F,
    text:      &str,
    x:         u32,
    y:         u32,
    max_width: u32,
    color:     Rgb<u8>,
) -> usize {
    let lines = wrap_words(font, text, max_width);
    let mut ly = y;
    for line in &lines {
        font.draw(img, line, x, ly, color);
        ly = ly.saturating_add(font.line_height());
    }
    lines.len()
}

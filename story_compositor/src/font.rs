//! Text measurement and drawing.
//!
//! [`Font`] is the seam between word-wrapping and glyph rendering; the
//! shipped implementation is [`BitmapFont`], a 3×5 pixel font scaled up by
//! an integer factor.

use image::{Rgb, RgbImage};

/// Something that can measure and draw a single line of text.
pub trait Font {
    /// Rendered width of `text` in pixels.
    fn text_width(&self, text: &str) -> u32;

    /// Vertical distance between consecutive wrapped lines.
    fn line_height(&self) -> u32;

    /// Draw `text` with its top-left corner at `(x, y)`, clipped to `img`.
    fn draw(&self, img: &mut RgbImage, text: &str, x: u32, y: u32, color: Rgb<u8>);
}

// ════════════════════════════════════════════════════════════════════════════
// BitmapFont
// ════════════════════════════════════════════════════════════════════════════

const GLYPH_W: u32 = 3;
const GLYPH_H: u32 = 5;
/// Glyph width plus one column of spacing.
const ADVANCE: u32 = GLYPH_W + 1;

/// Scaled 3×5 bitmap font. Every character has the same advance, so
/// `text_width` is exact.
#[derive(Clone, Copy, Debug)]
pub struct BitmapFont {
    scale:       u32,
    line_height: u32,
}

impl BitmapFont {
    /// `scale` pixels per glyph bit. Line height defaults to seven scaled
    /// rows plus two pixels of leading (scale 4 → 30 px).
    pub fn new(scale: u32) -> Self {
        let scale = scale.max(1);
        BitmapFont { scale, line_height: scale * 7 + 2 }
    }

    pub fn with_line_height(mut self, line_height: u32) -> Self {
        self.line_height = line_height;
        self
    }
}

impl Default for BitmapFont {
    fn default() -> Self { BitmapFont::new(4) }
}

impl Font for BitmapFont {
    fn text_width(&self, text: &str) -> u32 {
        text.chars().count() as u32 * ADVANCE * self.scale
    }

    fn line_height(&self) -> u32 { self.line_height }

    fn draw(&self, img: &mut RgbImage, text: &str, x: u32, y: u32, color: Rgb<u8>) {
        let (w, h) = img.dimensions();
        let s = self.scale;
        let mut cx = x;
        for ch in text.chars() {
            if cx >= w { break; }
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..GLYPH_W {
                    if bits & (1 << (GLYPH_W - 1 - col)) == 0 { continue; }
                    let px = cx + col * s;
                    let py = y + row as u32 * s;
                    for dy in 0..s {
                        for dx in 0..s {
                            if px + dx < w && py + dy < h {
                                img.put_pixel(px + dx, py + dy, color);
                            }
                        }
                    }
                }
            }
            cx += ADVANCE * s;
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// 3×5 glyph table: 5 rows, 3 bits each, MSB = leftmost column
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; GLYPH_H as usize] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        ';' => [0b000, 0b010, 0b000, 0b010, 0b100],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '?' => [0b111, 0b001, 0b010, 0b000, 0b010],
        '|' => [0b010, 0b010, 0b010, 0b010, 0b010],
        '(' => [0b001, 0b010, 0b010, 0b010, 0b001],
        ')' => [0b100, 0b010, 0b010, 0b010, 0b100],
        '\'' | '’' => [0b010, 0b010, 0b000, 0b000, 0b000],
        '"' | '“' | '”' => [0b101, 0b101, 0b000, 0b000, 0b000],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_is_fixed_advance() {
        let f = BitmapFont::new(2);
        assert_eq!(f.text_width(""), 0);
        assert_eq!(f.text_width("abc"), 3 * 4 * 2);
        assert_eq!(f.text_width("a b"), f.text_width("abc"));
    }

    #[test]
    fn default_line_height_is_thirty() {
        assert_eq!(BitmapFont::default().line_height(), 30);
        assert_eq!(BitmapFont::new(1).with_line_height(9).line_height(), 9);
    }

    #[test]
    fn draw_sets_scaled_pixels() {
        let mut img = RgbImage::new(8, 12);
        let white = Rgb([255, 255, 255]);
        BitmapFont::new(2).draw(&mut img, "1", 0, 0, white);
        // '1' top row is 0b010 → middle column block (x 2..4, y 0..2).
        assert_eq!(img.get_pixel(2, 0), &white);
        assert_eq!(img.get_pixel(3, 1), &white);
        assert_eq!(img.get_pixel(0, 0), &Rgb([0, 0, 0]));
        assert_eq!(img.get_pixel(4, 0), &Rgb([0, 0, 0]));
    }

    #[test]
    fn draw_clips_at_edges() {
        let mut img = RgbImage::new(5, 5);
        BitmapFont::new(3).draw(&mut img, "WWW", 2, 2, Rgb([1, 2, 3]));
        assert_eq!(img.get_pixel(2, 2), &Rgb([1, 2, 3]));
    }

    #[test]
    fn unknown_char_draws_centre_dot() {
        let mut img = RgbImage::new(4, 5);
        BitmapFont::new(1).draw(&mut img, "~", 0, 0, Rgb([9, 9, 9]));
        let lit: Vec<_> = img
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0 != [0, 0, 0])
            .map(|(x, y, _)| (x, y))
            .collect();
        assert_eq!(lit, vec![(1, 2)]);
    }

    #[test]
    fn space_draws_nothing() {
        let mut img = RgbImage::new(16, 16);
        BitmapFont::new(2).draw(&mut img, "  ", 0, 0, Rgb([255, 0, 0]));
        assert!(img.pixels().all(|p| p.0 == [0, 0, 0]));
    }
}

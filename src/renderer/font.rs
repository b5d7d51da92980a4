//! 3x5 bitmap font for the score overlay

use image::{Rgba, RgbaImage};

use super::Color;

pub const GLYPH_W: u32 = 3;
pub const GLYPH_H: u32 = 5;
/// Horizontal advance per character (glyph plus one column of spacing)
pub const ADVANCE: u32 = GLYPH_W + 1;

#[rustfmt::skip]
const DIGITS: [[u8; 15]; 10] = [
    [1,1,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // 0
    [0,1,0, 1,1,0, 0,1,0, 0,1,0, 1,1,1], // 1
    [1,1,1, 0,0,1, 1,1,1, 1,0,0, 1,1,1], // 2
    [1,1,1, 0,0,1, 0,1,1, 0,0,1, 1,1,1], // 3
    [1,0,1, 1,0,1, 1,1,1, 0,0,1, 0,0,1], // 4
    [1,1,1, 1,0,0, 1,1,1, 0,0,1, 1,1,1], // 5
    [1,1,1, 1,0,0, 1,1,1, 1,0,1, 1,1,1], // 6
    [1,1,1, 0,0,1, 0,1,0, 0,1,0, 0,1,0], // 7
    [1,1,1, 1,0,1, 1,1,1, 1,0,1, 1,1,1], // 8
    [1,1,1, 1,0,1, 1,1,1, 0,0,1, 1,1,1], // 9
];

fn glyph(ch: char) -> Option<&'static [u8; 15]> {
    ch.to_digit(10).map(|d| &DIGITS[d as usize])
}

/// Rasterize `text`; characters without a glyph render as blanks
pub fn rasterize(text: &str, color: Color) -> RgbaImage {
    let chars = text.chars().count().max(1) as u32;
    let mut image = RgbaImage::new(chars * ADVANCE - 1, GLYPH_H);
    let ink = Rgba([color.r, color.g, color.b, color.a]);

    for (i, ch) in text.chars().enumerate() {
        let Some(bits) = glyph(ch) else { continue };
        let x0 = i as u32 * ADVANCE;
        for row in 0..GLYPH_H {
            for col in 0..GLYPH_W {
                if bits[(row * GLYPH_W + col) as usize] == 1 {
                    image.put_pixel(x0 + col, row, ink);
                }
            }
        }
    }

    image
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rasterize_size() {
        assert_eq!(rasterize("7", Color::WHITE).dimensions(), (3, 5));
        assert_eq!(rasterize("120", Color::WHITE).dimensions(), (11, 5));
        assert_eq!(rasterize("", Color::WHITE).dimensions(), (3, 5));
    }

    #[test]
    fn test_one_has_single_top_pixel() {
        let image = rasterize("1", Color::WHITE);
        let top: Vec<u8> = (0..3).map(|x| image.get_pixel(x, 0).0[3]).collect();
        assert_eq!(top, vec![0, 255, 0]);
    }

    #[test]
    fn test_unknown_chars_are_blank() {
        let image = rasterize("?", Color::WHITE);
        assert!(image.pixels().all(|p| p.0[3] == 0));
    }
}

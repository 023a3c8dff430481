//! Raster primitives: fit-to-width, mask thresholding, mask-select blend,
//! and alpha "over" compositing.

use image::imageops::{self, FilterType};
use image::{GrayImage, ImageBuffer, Luma, Pixel, RgbImage, RgbaImage};

/// Per-pixel foreground probability in `[0, 1]`, as returned by the
/// segmentation oracle.
pub type ProbabilityMap = ImageBuffer<Luma<f32>, Vec<f32>>;

/// Binary foreground mask: 255 = person, 0 = background.
pub type Mask = GrayImage;

// ════════════════════════════════════════════════════════════════════════════
// Resizing
// ════════════════════════════════════════════════════════════════════════════

/// Resize to `(w, h)`, or clone unchanged if already that size.
fn resize_to<P>(img: &ImageBuffer<P, Vec<P::Subpixel>>, w: u32, h: u32, filter: FilterType)
    -> ImageBuffer<P, Vec<P::Subpixel>>
where
    P: Pixel + 'static,
    P::Subpixel: 'static,
{
    if img.dimensions() == (w, h) {
        img.clone()
    } else {
        imageops::resize(img, w, h, filter)
    }
}

/// Scale `img` to `width` pixels wide, preserving aspect ratio.
///
/// `new_height = round(height * width / img.width)`, never less than 1.
pub fn fit_to_width(img: &RgbImage, width: u32) -> RgbImage {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 || width == 0 {
        return img.clone();
    }
    let scale = width as f64 / w as f64;
    let new_h = ((h as f64 * scale).round() as u32).max(1);
    resize_to(img, width, new_h, FilterType::Triangle)
}

// ════════════════════════════════════════════════════════════════════════════
// Mask select
// ════════════════════════════════════════════════════════════════════════════

/// Binarise a probability map: values strictly above `threshold` are
/// foreground.
pub fn threshold_mask(map: &ProbabilityMap, threshold: f32) -> Mask {
    GrayImage::from_fn(map.width(), map.height(), |x, y| {
        if map.get_pixel(x, y).0[0] > threshold { Luma([255]) } else { Luma([0]) }
    })
}

/// Cut the person out of `frame` and paste them onto `bg`.
///
/// `frame` and `mask` are resized to `bg`'s dimensions first (the mask
/// after thresholding, with nearest-neighbour so it stays binary). Each
/// output pixel is taken verbatim from `frame` where the mask is set and
/// from `bg` elsewhere. An empty mask or frame yields `bg` unchanged.
pub fn blend_background(
    bg:        &RgbImage,
    frame:     &RgbImage,
    mask:      &ProbabilityMap,
    threshold: f32,
) -> RgbImage {
    let (w, h) = bg.dimensions();
    if mask.width() == 0 || mask.height() == 0 || frame.width() == 0 || frame.height() == 0 {
        return bg.clone();
    }

    let frame = resize_to(frame, w, h, FilterType::Triangle);
    let mask  = resize_to(&threshold_mask(mask, threshold), w, h, FilterType::Nearest);

    RgbImage::from_fn(w, h, |x, y| {
        if mask.get_pixel(x, y).0[0] != 0 {
            *frame.get_pixel(x, y)
        } else {
            *bg.get_pixel(x, y)
        }
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Alpha overlay
// ════════════════════════════════════════════════════════════════════════════

/// Composite `sprite` onto `dest` with its top-left corner at `(x, y)`,
/// using `out = a·src + (1 − a)·dest` per colour channel.
///
/// Returns false, leaving `dest` untouched, if any part of the sprite would
/// fall outside `dest`.
pub fn overlay_image(dest: &mut RgbImage, sprite: &RgbaImage, x: u32, y: u32) -> bool {
    let (sw, sh) = sprite.dimensions();
    let (dw, dh) = dest.dimensions();
    if x as u64 + sw as u64 > dw as u64 || y as u64 + sh as u64 > dh as u64 {
        return false;
    }

    for (sx, sy, src) in sprite.enumerate_pixels() {
        let a = src.0[3] as f32 / 255.0;
        if a == 0.0 { continue; }
        let dst = dest.get_pixel_mut(x + sx, y + sy);
        for c in 0..3 {
            let v = a * src.0[c] as f32 + (1.0 - a) * dst.0[c] as f32;
            dst.0[c] = v.round().clamp(0.0, 255.0) as u8;
        }
    }
    true
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, Rgba};

    fn solid(w: u32, h: u32, c: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(w, h, Rgb(c))
    }

    fn checker(w: u32, h: u32) -> RgbImage {
        RgbImage::from_fn(w, h, |x, y| Rgb([(x * 40) as u8, (y * 40) as u8, 200]))
    }

    fn prob(w: u32, h: u32, v: f32) -> ProbabilityMap {
        ProbabilityMap::from_pixel(w, h, Luma([v]))
    }

    // ── fit_to_width ─────────────────────────────────────────────────────
    #[test]
    fn fit_preserves_aspect_ratio() {
        let out = fit_to_width(&solid(640, 480, [1, 2, 3]), 1280);
        assert_eq!(out.dimensions(), (1280, 960));
    }

    #[test]
    fn fit_rounds_height() {
        // 333 * (1280 / 1000) = 426.24 → 426
        let out = fit_to_width(&solid(1000, 333, [0, 0, 0]), 1280);
        assert_eq!(out.dimensions(), (1280, 426));
        // 3 * (4 / 3) = 4.0; 5 * (4 / 3) = 6.67 → 7
        let out = fit_to_width(&solid(3, 5, [0, 0, 0]), 4);
        assert_eq!(out.dimensions(), (4, 7));
    }

    #[test]
    fn fit_same_width_is_identity() {
        let img = checker(8, 3);
        assert_eq!(fit_to_width(&img, 8), img);
    }

    // ── threshold ────────────────────────────────────────────────────────
    #[test]
    fn threshold_is_strictly_greater() {
        let mut map = prob(3, 1, 0.0);
        map.put_pixel(0, 0, Luma([0.1]));
        map.put_pixel(1, 0, Luma([0.11]));
        map.put_pixel(2, 0, Luma([1.0]));
        let m = threshold_mask(&map, 0.1);
        assert_eq!(m.as_raw(), &vec![0, 255, 255]);
    }

    // ── blend ────────────────────────────────────────────────────────────
    #[test]
    fn all_foreground_selects_camera() {
        let bg    = solid(2, 2, [10, 20, 30]);
        let frame = checker(2, 2);
        let out = blend_background(&bg, &frame, &prob(2, 2, 1.0), 0.1);
        assert_eq!(out, frame);
    }

    #[test]
    fn all_background_selects_background() {
        let bg    = fit_to_width(&checker(2, 2), 4);
        let frame = solid(2, 2, [255, 0, 0]);
        let out = blend_background(&bg, &frame, &prob(2, 2, 0.05), 0.1);
        assert_eq!(out, bg);
    }

    #[test]
    fn split_mask_selects_exactly() {
        let bg    = solid(2, 2, [0, 0, 0]);
        let frame = solid(2, 2, [255, 255, 255]);
        let mut map = prob(2, 2, 0.0);
        map.put_pixel(1, 0, Luma([0.9]));
        map.put_pixel(0, 1, Luma([0.9]));
        let out = blend_background(&bg, &frame, &map, 0.1);
        assert_eq!(out.get_pixel(0, 0), &Rgb([0, 0, 0]));
        assert_eq!(out.get_pixel(1, 0), &Rgb([255, 255, 255]));
        assert_eq!(out.get_pixel(0, 1), &Rgb([255, 255, 255]));
        assert_eq!(out.get_pixel(1, 1), &Rgb([0, 0, 0]));
    }

    #[test]
    fn smaller_mask_is_scaled_without_feathering() {
        let bg    = solid(4, 4, [0, 0, 0]);
        let frame = solid(4, 4, [200, 200, 200]);
        let mut map = prob(2, 2, 0.0);
        map.put_pixel(0, 0, Luma([1.0]));
        let out = blend_background(&bg, &frame, &map, 0.1);
        for p in out.pixels() {
            assert!(p.0 == [0, 0, 0] || p.0 == [200, 200, 200]);
        }
        assert_eq!(out.get_pixel(0, 0), &Rgb([200, 200, 200]));
        assert_eq!(out.get_pixel(3, 3), &Rgb([0, 0, 0]));
    }

    #[test]
    fn empty_mask_keeps_background() {
        let bg = checker(3, 3);
        let out = blend_background(&bg, &checker(3, 3), &ProbabilityMap::new(0, 0), 0.1);
        assert_eq!(out, bg);
    }

    // ── overlay ──────────────────────────────────────────────────────────
    #[test]
    fn opaque_sprite_replaces_region() {
        let mut dest = solid(6, 6, [1, 1, 1]);
        let sprite = RgbaImage::from_pixel(2, 3, Rgba([9, 8, 7, 255]));
        assert!(overlay_image(&mut dest, &sprite, 3, 2));
        for (x, y, p) in dest.enumerate_pixels() {
            let inside = (3..5).contains(&x) && (2..5).contains(&y);
            assert_eq!(p.0, if inside { [9, 8, 7] } else { [1, 1, 1] });
        }
    }

    #[test]
    fn transparent_sprite_leaves_dest() {
        let mut dest = checker(5, 5);
        let before = dest.clone();
        let sprite = RgbaImage::from_pixel(3, 3, Rgba([255, 0, 0, 0]));
        assert!(overlay_image(&mut dest, &sprite, 1, 1));
        assert_eq!(dest, before);
    }

    #[test]
    fn half_alpha_blends() {
        let mut dest = solid(1, 1, [0, 0, 200]);
        let sprite = RgbaImage::from_pixel(1, 1, Rgba([255, 0, 0, 128]));
        overlay_image(&mut dest, &sprite, 0, 0);
        let a = 128.0_f32 / 255.0;
        assert_eq!(dest.get_pixel(0, 0).0, [
            (a * 255.0).round() as u8,
            0,
            ((1.0 - a) * 200.0).round() as u8,
        ]);
    }

    #[test]
    fn out_of_bounds_sprite_is_skipped() {
        let mut dest = checker(4, 4);
        let before = dest.clone();
        let sprite = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        assert!(!overlay_image(&mut dest, &sprite, 3, 0));
        assert!(!overlay_image(&mut dest, &sprite, 0, 3));
        assert_eq!(dest, before);
        // Exactly touching the edge is fine.
        assert!(overlay_image(&mut dest, &sprite, 2, 2));
    }
}

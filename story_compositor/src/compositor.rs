//! The per-frame pipeline: fit, mask-select, overlay, caption, banner.

use std::time::Duration;

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage, RgbaImage};

use crate::blend::{blend_background, fit_to_width, overlay_image, ProbabilityMap};
use crate::font::{BitmapFont, Font};
use crate::text::draw_wrapped_text;

// ════════════════════════════════════════════════════════════════════════════
// CompositorConfig
// ════════════════════════════════════════════════════════════════════════════

/// Layout knobs. Defaults reproduce the 1280-wide demo layout.
#[derive(Clone, Debug)]
pub struct CompositorConfig {
    /// Output width; the background is scaled to this, keeping its aspect.
    pub display_width:  u32,
    /// Probabilities strictly above this are foreground.
    pub mask_threshold: f32,
    /// Overlay sprites are resized to `sprite_size × sprite_size`.
    pub sprite_size:    u32,
    pub sprite_anchor:  (u32, u32),
    /// Left margin of the caption; right margin is the same.
    pub text_margin:    u32,
    /// Caption top sits this far above the bottom edge.
    pub text_bottom:    u32,
    pub text_color:     Rgb<u8>,
    pub banner_anchor:  (u32, u32),
    pub banner_color:   Rgb<u8>,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        CompositorConfig {
            display_width:  1280,
            mask_threshold: 0.1,
            sprite_size:    200,
            sprite_anchor:  (30, 30),
            text_margin:    30,
            text_bottom:    110,
            text_color:     Rgb([255, 255, 255]),
            banner_anchor:  (30, 50),
            banner_color:   Rgb([255, 255, 0]),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// InstructionBanner
// ════════════════════════════════════════════════════════════════════════════

/// Fixed help text shown only during the first moments of a run.
#[derive(Clone, Debug)]
pub struct InstructionBanner {
    pub text:     String,
    pub duration: Duration,
}

impl InstructionBanner {
    pub fn new(text: &str, duration: Duration) -> Self {
        InstructionBanner { text: text.to_string(), duration }
    }

    /// Banner text if the program has been running for at most `duration`.
    pub fn at(&self, elapsed: Duration) -> Option<&str> {
        if elapsed <= self.duration { Some(&self.text) } else { None }
    }
}

impl Default for InstructionBanner {
    fn default() -> Self {
        InstructionBanner::new(
            "Open Palm = Next | Index Up = Back | Victory = Skip",
            Duration::from_secs(5),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Compositor
// ════════════════════════════════════════════════════════════════════════════

/// Everything that goes into one displayed frame.
pub struct FrameInputs<'a> {
    pub background: &'a RgbImage,
    pub camera:     &'a RgbImage,
    pub mask:       &'a ProbabilityMap,
    pub overlay:    Option<&'a RgbaImage>,
    pub text:       &'a str,
    pub banner:     Option<&'a str>,
}

pub struct Compositor<F: Font = BitmapFont> {
    config: CompositorConfig,
    font:   F,
}

impl Compositor<BitmapFont> {
    pub fn new(config: CompositorConfig) -> Self {
        Compositor { config, font: BitmapFont::default() }
    }
}

impl<F: Font> Compositor<F> {
    pub fn with_font(config: CompositorConfig, font: F) -> Self {
        Compositor { config, font }
    }

    /// Run the full pipeline and return the display image.
    pub fn compose(&self, input: &FrameInputs<'_>) -> RgbImage {
        let cfg = &self.config;

        // 1. Fit background to the display width.
        let bg = fit_to_width(input.background, cfg.display_width);

        // 2. Hard mask select between camera subject and scene.
        let mut out = blend_background(&bg, input.camera, input.mask, cfg.mask_threshold);

        // 3. Sprite, skipped if it doesn't fit at the anchor.
        if let Some(sprite) = input.overlay {
            let sprite = if sprite.dimensions() == (cfg.sprite_size, cfg.sprite_size) {
                sprite.clone()
            } else {
                imageops::resize(sprite, cfg.sprite_size, cfg.sprite_size, FilterType::Triangle)
            };
            let (ax, ay) = cfg.sprite_anchor;
            overlay_image(&mut out, &sprite, ax, ay);
        }

        // 4. Caption near the bottom.
        let (w, h) = out.dimensions();
        draw_wrapped_text(
            &mut out,
            &self.font,
            input.text,
            cfg.text_margin,
            h.saturating_sub(cfg.text_bottom),
            w.saturating_sub(cfg.text_margin * 2),
            cfg.text_color,
        );

        // 5. Start-up banner.
        if let Some(banner) = input.banner {
            let (bx, by) = cfg.banner_anchor;
            self.font.draw(&mut out, banner, bx, by, cfg.banner_color);
        }

        out
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgba};

    /// Draws nothing; lets tests compare raw pixels.
    struct Invisible;
    impl Font for Invisible {
        fn text_width(&self, text: &str) -> u32 { text.len() as u32 }
        fn line_height(&self) -> u32 { 1 }
        fn draw(&self, _: &mut RgbImage, _: &str, _: u32, _: u32, _: Rgb<u8>) {}
    }

    fn tiny_config(width: u32) -> CompositorConfig {
        CompositorConfig {
            display_width: width,
            sprite_size:   2,
            sprite_anchor: (1, 1),
            text_margin:   0,
            text_bottom:   1,
            ..CompositorConfig::default()
        }
    }

    fn gradient(w: u32, h: u32) -> RgbImage {
        RgbImage::from_fn(w, h, |x, y| Rgb([x as u8 * 50, y as u8 * 50, 7]))
    }

    #[test]
    fn output_has_display_width_and_background_aspect() {
        let comp = Compositor::with_font(tiny_config(8), Invisible);
        let bg = gradient(4, 2);
        let cam = gradient(3, 3);
        let mask = ProbabilityMap::from_pixel(3, 3, Luma([0.0]));
        let out = comp.compose(&FrameInputs {
            background: &bg, camera: &cam, mask: &mask,
            overlay: None, text: "", banner: None,
        });
        assert_eq!(out.dimensions(), (8, 4));
    }

    #[test]
    fn foreground_mask_shows_camera() {
        let comp = Compositor::with_font(tiny_config(2), Invisible);
        let bg   = RgbImage::from_pixel(2, 2, Rgb([0, 0, 0]));
        let cam  = gradient(2, 2);
        let mask = ProbabilityMap::from_pixel(2, 2, Luma([0.8]));
        let out = comp.compose(&FrameInputs {
            background: &bg, camera: &cam, mask: &mask,
            overlay: None, text: "ignored", banner: None,
        });
        assert_eq!(out, cam);
    }

    #[test]
    fn sprite_drawn_at_anchor_with_resize() {
        let comp = Compositor::with_font(tiny_config(4), Invisible);
        let bg   = RgbImage::from_pixel(4, 4, Rgb([0, 0, 0]));
        let mask = ProbabilityMap::from_pixel(4, 4, Luma([0.0]));
        let sprite = RgbaImage::from_pixel(6, 6, Rgba([10, 20, 30, 255]));
        let out = comp.compose(&FrameInputs {
            background: &bg, camera: &bg, mask: &mask,
            overlay: Some(&sprite), text: "", banner: None,
        });
        assert_eq!(out.get_pixel(1, 1), &Rgb([10, 20, 30]));
        assert_eq!(out.get_pixel(2, 2), &Rgb([10, 20, 30]));
        assert_eq!(out.get_pixel(0, 0), &Rgb([0, 0, 0]));
        assert_eq!(out.get_pixel(3, 3), &Rgb([0, 0, 0]));
    }

    #[test]
    fn sprite_too_big_for_frame_is_skipped() {
        let cfg = CompositorConfig { sprite_size: 4, ..tiny_config(4) };
        let comp = Compositor::with_font(cfg, Invisible);
        let bg   = gradient(4, 4);
        let mask = ProbabilityMap::from_pixel(4, 4, Luma([0.0]));
        let sprite = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
        let out = comp.compose(&FrameInputs {
            background: &bg, camera: &bg, mask: &mask,
            overlay: Some(&sprite), text: "", banner: None,
        });
        assert_eq!(out, bg);
    }

    #[test]
    fn caption_and_banner_are_drawn() {
        let comp = Compositor::new(CompositorConfig {
            display_width: 200,
            ..CompositorConfig::default()
        });
        let bg   = RgbImage::from_pixel(200, 200, Rgb([0, 0, 0]));
        let mask = ProbabilityMap::from_pixel(1, 1, Luma([0.0]));
        let plain = comp.compose(&FrameInputs {
            background: &bg, camera: &bg, mask: &mask,
            overlay: None, text: "", banner: None,
        });
        assert_eq!(plain, bg);

        let with_text = comp.compose(&FrameInputs {
            background: &bg, camera: &bg, mask: &mask,
            overlay: None, text: "HI", banner: Some("GO"),
        });
        let white  = with_text.pixels().filter(|p| p.0 == [255, 255, 255]).count();
        let yellow = with_text.pixels().filter(|p| p.0 == [255, 255, 0]).count();
        assert!(white > 0);
        assert!(yellow > 0);
    }

    #[test]
    fn banner_expires() {
        let banner = InstructionBanner::default();
        assert!(banner.at(Duration::from_secs(0)).is_some());
        assert!(banner.at(Duration::from_millis(4999)).is_some());
        assert!(banner.at(Duration::from_millis(5001)).is_none());
    }
}

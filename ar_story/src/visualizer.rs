//! Window output and keyboard input using `minifb`.
//!
//! The window shows whatever image the frame loop hands it, scaled to fit
//! while keeping its aspect ratio. Keys map to story commands; the number
//! keys stand in for hand poses and are forwarded to the simulated oracle.

use std::sync::mpsc::Sender;
use std::time::Duration;

use image::RgbImage;
use minifb::{Key, KeyRepeat, ScaleMode, Window, WindowOptions};
use story_scenes::{GestureLabel, StoryCommand};

// ════════════════════════════════════════════════════════════════════════════
// KeyAction
// ════════════════════════════════════════════════════════════════════════════

/// What a key press asks the frame loop to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Story(StoryCommand),
    Quit,
}

/// Fixed keyboard map: `N` next, `S` skip, `B` back, `R` reset, `Q` quit.
pub fn key_action(key: Key) -> Option<KeyAction> {
    match key {
        Key::Q => Some(KeyAction::Quit),
        Key::N => Some(KeyAction::Story(StoryCommand::Advance)),
        Key::S => Some(KeyAction::Story(StoryCommand::Skip)),
        Key::B => Some(KeyAction::Story(StoryCommand::Retreat)),
        Key::R => Some(KeyAction::Story(StoryCommand::Reset)),
        _      => None,
    }
}

/// Simulated hand pose for the number keys currently held, first match wins.
pub fn held_pose(is_down: impl Fn(Key) -> bool) -> GestureLabel {
    if is_down(Key::Key1) {
        GestureLabel::OpenPalm
    } else if is_down(Key::Key2) {
        GestureLabel::Victory
    } else if is_down(Key::Key3) {
        GestureLabel::IndexUp
    } else {
        GestureLabel::None
    }
}

/// Pack an RGB image into minifb's `0x00RRGGBB` buffer.
pub fn to_argb(img: &RgbImage, buf: &mut Vec<u32>) {
    buf.clear();
    buf.extend(img.pixels().map(|p| {
        let [r, g, b] = p.0;
        ((r as u32) << 16) | ((g as u32) << 8) | b as u32
    }));
}

/// The title to set, if it differs from the one shown.
pub fn title_change<'a>(shown: &str, wanted: &'a str) -> Option<&'a str> {
    if shown == wanted { None } else { Some(wanted) }
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window:  Window,
    buf:     Vec<u32>,
    buf_w:   usize,
    buf_h:   usize,
    pose_tx: Sender<GestureLabel>,
    pose:    GestureLabel,
    title:   String,
}

impl Visualizer {
    pub fn new(
        title:   &str,
        width:   usize,
        height:  usize,
        pose_tx: Sender<GestureLabel>,
    ) -> Result<Self, minifb::Error> {
        let mut window = Window::new(
            title,
            width, height,
            WindowOptions {
                resize: true,
                scale_mode: ScaleMode::AspectRatioStretch,
                ..WindowOptions::default()
            },
        )?;

        window.limit_update_rate(Some(Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            buf: vec![0; width * height],
            buf_w: width,
            buf_h: height,
            pose_tx,
            pose: GestureLabel::None,
            title: title.to_string(),
        })
    }

    /// Returns false when the window should close.
    pub fn is_open(&self) -> bool { self.window.is_open() }

    /// Key presses since the last update, plus forwarding of the held pose.
    pub fn poll_input(&mut self) -> Vec<KeyAction> {
        let pose = held_pose(|k| self.window.is_key_down(k));
        if pose != self.pose {
            self.pose = pose;
            let _ = self.pose_tx.send(pose);
        }

        self.window
            .get_keys_pressed(KeyRepeat::No)
            .into_iter()
            .filter_map(key_action)
            .collect()
    }

    fn retitle(&mut self, title: &str) {
        if let Some(t) = title_change(&self.title, title) {
            self.window.set_title(t);
            self.title = t.to_string();
        }
    }

    /// Show a new frame, updating the title if it changed.
    pub fn present(&mut self, img: &RgbImage, title: &str) -> Result<(), minifb::Error> {
        self.retitle(title);
        to_argb(img, &mut self.buf);
        self.buf_w = img.width() as usize;
        self.buf_h = img.height() as usize;
        self.window.update_with_buffer(&self.buf, self.buf_w, self.buf_h)
    }

    /// Pump window events and redraw the last frame when there is nothing
    /// new to show. The title still follows `title`.
    pub fn idle(&mut self, title: &str) -> Result<(), minifb::Error> {
        self.retitle(title);
        self.window.update_with_buffer(&self.buf, self.buf_w, self.buf_h)
    }
}

//! Top-level application state and the frame loop.
//!
//! `AppState` owns the `StorySequencer`, the gesture cooldown, the asset
//! cache and the compositor. It consumes one [`Perception`] per displayed
//! frame and turns gestures and key presses into story navigation.

use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use image::RgbImage;
use log::{debug, info, warn};
use story_compositor::{AssetCache, Compositor, CompositorConfig, FrameInputs, InstructionBanner};
use story_scenes::{GestureLabel, SceneStore, StoryCommand, StorySequencer};

use crate::error::AppError;
use crate::gesture::{classify, GestureDebouncer, HandLandmarks};
use crate::perception::{latest, spawn_perception, Perception, SimCamera, SimOracle};
use crate::visualizer::{KeyAction, Visualizer};

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub story_path:    PathBuf,
    /// Use this still image as the camera feed instead of the procedural one.
    pub camera_image:  Option<PathBuf>,
    pub display_width: u32,
    pub cooldown:      Duration,
    /// Flip the camera horizontally (selfie view).
    pub mirror:        bool,
    pub banner:        InstructionBanner,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            story_path:    PathBuf::from("stories/story_config.json"),
            camera_image:  None,
            display_width: 1280,
            cooldown:      Duration::from_millis(1500),
            mirror:        true,
            banner:        InstructionBanner::default(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    story:      StorySequencer,
    debouncer:  GestureDebouncer,
    assets:     AssetCache,
    compositor: Compositor,
    banner:     InstructionBanner,

    /// Last label seen, for the status line.
    seen:       GestureLabel,
    pub status: String,
}

impl AppState {
    pub fn new(scenes: SceneStore, cfg: &AppConfig) -> Self {
        let compositor = Compositor::new(CompositorConfig {
            display_width: cfg.display_width,
            ..CompositorConfig::default()
        });
        let mut app = AppState {
            story:      StorySequencer::new(scenes),
            debouncer:  GestureDebouncer::new(cfg.cooldown),
            assets:     AssetCache::new(),
            compositor,
            banner:     cfg.banner.clone(),
            seen:       GestureLabel::None,
            status:     String::new(),
        };
        app.update_status("ready");
        app
    }

    pub fn story(&self) -> &StorySequencer { &self.story }

    fn update_status(&mut self, action: &str) {
        let end = if self.story.is_at_end() { " (end)" } else { "" };
        self.status = format!(
            "AR Story | scene {}/{}{} | hint: {} | seen: {} | {}",
            self.story.position() + 1,
            self.story.len(),
            end,
            self.story.expected_gesture(),
            self.seen,
            action,
        );
    }

    /// Build the display image for the current scene.
    ///
    /// `None` if the scene's background can't be loaded; the caller then
    /// keeps showing the previous frame.
    pub fn compose(&mut self, p: &Perception, since_start: Duration) -> Option<RgbImage> {
        let scene = self.story.current_scene();
        let Some(background) = self.assets.background(&scene.background) else {
            debug!("frame skipped: no background for scene {}", self.story.position() + 1);
            return None;
        };
        let overlay = scene
            .overlay
            .as_deref()
            .and_then(|path| self.assets.overlay(path));

        Some(self.compositor.compose(&FrameInputs {
            background: &background,
            camera:     &p.frame,
            mask:       &p.mask,
            overlay:    overlay.as_deref(),
            text:       &scene.text,
            banner:     self.banner.at(since_start),
        }))
    }

    /// Classify this frame's hand and, if the cooldown allows, navigate.
    /// Returns the command that ran.
    pub fn observe_hand(&mut self, hand: Option<&HandLandmarks>, now: Instant) -> Option<StoryCommand> {
        let label = classify(hand);
        if label != self.seen {
            self.seen = label;
            self.update_status("watching");
        }

        let cmd = StoryCommand::for_gesture(label)?;
        if !self.debouncer.try_trigger(label, now) {
            debug!("gesture {} ignored during cooldown", label);
            return None;
        }
        self.navigate(cmd, &format!("gesture {}", label));
        Some(cmd)
    }

    /// Keyboard navigation; not subject to the gesture cooldown.
    pub fn handle_key(&mut self, cmd: StoryCommand) {
        self.navigate(cmd, "key");
    }

    fn navigate(&mut self, cmd: StoryCommand, via: &str) {
        let moved = self.story.apply(cmd);
        let action = if moved {
            format!("{} ({})", cmd.name(), via)
        } else {
            format!("{} ({}), no change", cmd.name(), via)
        };
        self.update_status(&action);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run(): the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// Loads the story (fatal on error), starts the simulated camera and
/// oracle on the perception thread, opens the window, and loops: composite
/// the newest frame, apply at most one debounced gesture, then keys.
pub fn run(cfg: AppConfig) -> Result<(), AppError> {
    let scenes = SceneStore::load(&cfg.story_path)?;

    // ── Perception thread ─────────────────────────────────────────────────
    let camera = match cfg.camera_image {
        Some(ref path) => SimCamera::still(story_compositor::assets::load_rgb(path)?),
        None           => SimCamera::procedural(640, 480),
    };
    let (pose_tx, pose_rx) = mpsc::channel();
    let perception_rx = spawn_perception(camera, SimOracle::new(pose_rx), cfg.mirror);

    // ── Window + state ────────────────────────────────────────────────────
    let mut app = AppState::new(scenes, &cfg);
    let win_h = cfg.display_width as usize * 9 / 16;
    let mut vis = Visualizer::new(&app.status, cfg.display_width as usize, win_h, pose_tx)?;

    let started = Instant::now();
    info!("story started; keys: N next, B back, S skip, R reset, Q quit, 1/2/3 poses");

    // ── Main loop ─────────────────────────────────────────────────────────
    while vis.is_open() {
        let newest = match latest(&perception_rx) {
            Ok(p)  => p,
            Err(_) => {
                warn!("camera stopped");
                break;
            }
        };

        match newest {
            Some(p) => {
                match app.compose(&p, started.elapsed()) {
                    Some(frame) => vis.present(&frame, &app.status)?,
                    None        => vis.idle(&app.status)?,
                }
                app.observe_hand(p.hand.as_ref(), Instant::now());
            }
            None => vis.idle(&app.status)?,
        }

        for action in vis.poll_input() {
            match action {
                KeyAction::Quit       => return Ok(()),
                KeyAction::Story(cmd) => app.handle_key(cmd),
            }
        }
    }

    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

//! Camera frames and the perception oracle, plus their simulators.
//!
//! The public interface is [`Perception`] delivered over a `mpsc` channel
//! by [`spawn_perception`]. The frame loop doesn't know whether frames and
//! detections came from real hardware or from the simulators here.
//!
//! Capture and inference run on their own thread. The frame loop drains the
//! channel and always composites the most recent bundle, so a slow oracle
//! lowers the frame rate instead of stalling the window.

use std::sync::mpsc::{self, Receiver, RecvError, TryRecvError};
use std::thread;
use std::time::Duration;

use image::{imageops, Luma, Rgb, RgbImage};
use log::debug;
use story_compositor::ProbabilityMap;
use story_scenes::GestureLabel;

use crate::gesture::HandLandmarks;

// ════════════════════════════════════════════════════════════════════════════
// Traits: the boundary to capture hardware and the perception library
// ════════════════════════════════════════════════════════════════════════════

/// Anything that yields camera frames. `None` ends the stream.
pub trait FrameSource: Send + 'static {
    fn next_frame(&mut self) -> Option<RgbImage>;
}

/// Hand tracking and person segmentation, treated as a black box.
pub trait PerceptionOracle: Send + 'static {
    /// Landmarks of at most one hand, or `None` if no hand is visible.
    fn detect_hand_landmarks(&mut self, frame: &RgbImage) -> Option<HandLandmarks>;

    /// Foreground probability per pixel, same size as `frame`.
    fn segment_person(&mut self, frame: &RgbImage) -> ProbabilityMap;
}

/// One captured frame and everything the oracle found in it.
#[derive(Clone, Debug)]
pub struct Perception {
    pub frame: RgbImage,
    pub hand:  Option<HandLandmarks>,
    pub mask:  ProbabilityMap,
}

// ════════════════════════════════════════════════════════════════════════════
// Worker thread
// ════════════════════════════════════════════════════════════════════════════

/// Spawn capture + inference on its own thread and return the receiving end.
///
/// With `mirror` set, frames are flipped horizontally before the oracle
/// sees them (selfie view). The thread exits when the source runs dry or
/// the receiver is dropped.
pub fn spawn_perception<S, O>(mut source: S, mut oracle: O, mirror: bool) -> Receiver<Perception>
where
    S: FrameSource,
    O: PerceptionOracle,
{
    let (tx, rx) = mpsc::sync_channel(2);
    thread::spawn(move || {
        while let Some(mut frame) = source.next_frame() {
            if mirror {
                imageops::flip_horizontal_in_place(&mut frame);
            }
            let hand = oracle.detect_hand_landmarks(&frame);
            let mask = oracle.segment_person(&frame);
            if tx.send(Perception { frame, hand, mask }).is_err() {
                return;
            }
        }
        debug!("[perception] frame source exhausted");
    });
    rx
}

/// Drain everything queued and keep only the newest bundle.
///
/// `Err` means the worker is gone and nothing was left to read.
pub fn latest(rx: &Receiver<Perception>) -> Result<Option<Perception>, RecvError> {
    let mut newest = None;
    loop {
        match rx.try_recv() {
            Ok(p) => newest = Some(p),
            Err(TryRecvError::Empty) => return Ok(newest),
            Err(TryRecvError::Disconnected) => {
                return if newest.is_some() { Ok(newest) } else { Err(RecvError) };
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Simulated person, shared by SimCamera and SimOracle
// ════════════════════════════════════════════════════════════════════════════

/// Probability that pixel `(x, y)` of a `w × h` frame belongs to the
/// simulated person: an upright ellipse, 1.0 in the core and fading to 0
/// across its rim.
pub fn silhouette(w: u32, h: u32, x: u32, y: u32) -> f32 {
    if w == 0 || h == 0 { return 0.0; }
    let nx = (x as f32 + 0.5) / w as f32;
    let ny = (y as f32 + 0.5) / h as f32;
    let dx = (nx - 0.5) / 0.17;
    let dy = (ny - 0.62) / 0.42;
    (1.5 - (dx * dx + dy * dy)).clamp(0.0, 1.0)
}

// ════════════════════════════════════════════════════════════════════════════
// SimCamera
// ════════════════════════════════════════════════════════════════════════════

/// Stand-in camera: repeats a still image, or draws a backdrop with a
/// person-shaped figure that the simulated oracle will segment.
pub struct SimCamera {
    still:    Option<RgbImage>,
    width:    u32,
    height:   u32,
    interval: Duration,
    tick:     u32,
}

impl SimCamera {
    pub fn procedural(width: u32, height: u32) -> Self {
        SimCamera {
            still: None,
            width,
            height,
            interval: Duration::from_millis(33),
            tick: 0,
        }
    }

    pub fn still(image: RgbImage) -> Self {
        let (width, height) = image.dimensions();
        SimCamera { still: Some(image), ..SimCamera::procedural(width, height) }
    }

    /// Delay between frames, mimicking a blocking capture.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    fn draw(&self) -> RgbImage {
        let (w, h) = (self.width, self.height);
        let shift = self.tick;
        RgbImage::from_fn(w, h, |x, y| {
            if silhouette(w, h, x, y) > 0.1 {
                return Rgb([214, 160, 120]);
            }
            // Slowly scrolling stripes so the feed visibly moves.
            let band = (x.wrapping_add(shift) / 24) % 2 == 0;
            let g = (40 + y * 60 / h.max(1)) as u8;
            if band { Rgb([30, g, 70]) } else { Rgb([24, g, 58]) }
        })
    }
}

impl FrameSource for SimCamera {
    fn next_frame(&mut self) -> Option<RgbImage> {
        if !self.interval.is_zero() {
            thread::sleep(self.interval);
        }
        self.tick = self.tick.wrapping_add(1);
        Some(match self.still {
            Some(ref img) => img.clone(),
            None          => self.draw(),
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SimOracle
// ════════════════════════════════════════════════════════════════════════════

/// Stand-in oracle driven by the keyboard.
///
/// The window sends the pose currently held (`1`/`2`/`3`, or `None` when
/// released) over `poses`; detection reports a synthetic hand in that pose.
/// Segmentation always reports the [`silhouette`].
pub struct SimOracle {
    poses:   Receiver<GestureLabel>,
    holding: GestureLabel,
}

impl SimOracle {
    pub fn new(poses: Receiver<GestureLabel>) -> Self {
        SimOracle { poses, holding: GestureLabel::None }
    }
}

impl PerceptionOracle for SimOracle {
    fn detect_hand_landmarks(&mut self, _frame: &RgbImage) -> Option<HandLandmarks> {
        while let Ok(pose) = self.poses.try_recv() {
            self.holding = pose;
        }
        if self.holding.is_none() {
            None
        } else {
            Some(HandLandmarks::posed(self.holding))
        }
    }

    fn segment_person(&mut self, frame: &RgbImage) -> ProbabilityMap {
        let (w, h) = frame.dimensions();
        ProbabilityMap::from_fn(w, h, |x, y| Luma([silhouette(w, h, x, y)]))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

//! # ar_story
//!
//! Gesture-driven AR storytelling. Each camera frame is segmented; the
//! person is cut out and placed into the current illustrated scene, with an
//! optional sprite, the scene caption, and a short-lived help banner. Hand
//! poses page through the story.
//!
//! ## Gesture → Action mapping
//!
//! | Gesture | Fingers up | Action |
//! |---|---|---|
//! | Open palm | index, middle, ring, pinky | next scene |
//! | Victory | index, middle | skip ahead two scenes |
//! | Index up | index | previous scene |
//!
//! At most one gesture acts per cooldown window (1.5 s by default).
//!
//! ## Keyboard
//!
//! | Key | Action |
//! |---|---|
//! | `N` | next |
//! | `B` | back |
//! | `S` | skip |
//! | `R` | reset to the first scene |
//! | `Q` | quit |
//! | `1` / `2` / `3` held | simulated open palm / victory / index up |
//!
//! Keys are never debounced.
//!
//! ## Simulation
//!
//! There is no camera driver or hand-tracking model in this crate. The
//! [`perception`] module defines the boundary traits and ships a simulated
//! camera (procedural figure or a still image) and an oracle that reports
//! whatever pose the number keys hold.

pub mod app;
pub mod error;
pub mod gesture;
pub mod perception;
pub mod visualizer;

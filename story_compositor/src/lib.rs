//! # story_compositor
//!
//! Builds the single image shown each frame of the AR story demo from:
//!
//! * a scene **background** `B`,
//! * a live **camera frame** `F`,
//! * a **foreground probability map** `M` from the segmentation oracle,
//! * an optional **overlay sprite** `O` with alpha,
//! * the scene **caption** and an optional **instruction banner**.
//!
//! ## Pipeline
//!
//! ```text
//!   B ──fit_to_width──┐
//!   F ──resize────────┼──► mask select ──► sprite "over" ──► caption ──► banner
//!   M ──threshold─────┘      (exact)        (at anchor)     (wrapped)
//! ```
//!
//! Mask selection is a hard per-pixel choice between `F` and `B`; there is
//! no feathering at the silhouette edge.

pub mod assets;
pub mod blend;
pub mod compositor;
pub mod font;
pub mod text;

pub use assets::{AssetCache, AssetError};
pub use blend::{blend_background, fit_to_width, overlay_image, threshold_mask, Mask, ProbabilityMap};
pub use compositor::{Compositor, CompositorConfig, FrameInputs, InstructionBanner};
pub use font::{BitmapFont, Font};
pub use text::{draw_wrapped_text, wrap_words};

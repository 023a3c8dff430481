//! # story_scenes
//!
//! The story half of the AR storytelling demo: an ordered list of immutable
//! [`Scene`]s and a [`StorySequencer`] cursor that walks over them.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use story_scenes::{SceneStore, StorySequencer};
//!
//! let store = SceneStore::load("stories/story_config.json").unwrap();
//! let mut story = StorySequencer::new(store);
//!
//! assert_eq!(story.position(), 0);
//! story.advance();
//! story.skip();
//! println!("{}", story.current_scene().text);
//! ```
//!
//! ## Navigation
//!
//! | Operation | Effect on cursor | Returns |
//! |---|---|---|
//! | `advance` | `+1` unless already on the last scene | moved? |
//! | `retreat` | `-1` unless already on the first scene | moved? |
//! | `skip` | `min(idx + 2, N - 1)` | nothing |
//! | `reset` | `0` | nothing |
//!
//! All clamping happens inside the sequencer; callers never bounds-check.

pub mod error;
pub mod scene;
pub mod sequencer;

pub use error::StoryError;
pub use scene::{GestureLabel, Scene, SceneStore};
pub use sequencer::{StoryCommand, StorySequencer};

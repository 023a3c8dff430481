//! Scene records and the ordered store that holds them.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

use crate::error::StoryError;

// ════════════════════════════════════════════════════════════════════════════
// GestureLabel
// ════════════════════════════════════════════════════════════════════════════

/// Discrete hand pose, as produced by the gesture classifier and as written
/// in story configs (`"open_palm"`, `"victory"`, `"index_up"`, `"none"`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureLabel {
    #[default]
    None,
    OpenPalm,
    Victory,
    IndexUp,
}

impl GestureLabel {
    /// Human-readable name for status lines and menus.
    pub fn name(self) -> &'static str {
        match self {
            GestureLabel::None     => "none",
            GestureLabel::OpenPalm => "open palm",
            GestureLabel::Victory  => "victory",
            GestureLabel::IndexUp  => "index up",
        }
    }

    pub fn is_none(self) -> bool { self == GestureLabel::None }
}

impl fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Scene
// ════════════════════════════════════════════════════════════════════════════

/// One step of the story. Never mutated after load.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Scene {
    /// Background image, path as written in the config.
    pub background: PathBuf,
    /// Optional sprite with an alpha channel drawn in the top-left corner.
    #[serde(default)]
    pub overlay:    Option<PathBuf>,
    pub text:       String,
    /// Advisory hint only; any navigation gesture works on any scene.
    #[serde(default)]
    pub gesture:    GestureLabel,
}

// ════════════════════════════════════════════════════════════════════════════
// SceneStore
// ════════════════════════════════════════════════════════════════════════════

#[derive(Deserialize)]
struct StoryFile {
    scenes: Vec<Scene>,
}

/// Ordered, non-empty list of scenes.
///
/// The only way to build one is through a constructor that rejects an empty
/// list, so `len() >= 1` holds for every live store.
#[derive(Clone, Debug)]
pub struct SceneStore {
    scenes: Vec<Scene>,
}

impl SceneStore {
    pub fn new(scenes: Vec<Scene>) -> Result<Self, StoryError> {
        if scenes.is_empty() {
            return Err(StoryError::Empty);
        }
        Ok(SceneStore { scenes })
    }

    /// Parse a `{ "scenes": [...] }` document.
    pub fn from_json_str(json: &str) -> Result<Self, StoryError> {
        let file: StoryFile = serde_json::from_str(json)?;
        SceneStore::new(file.scenes)
    }

    /// Read and parse a story config from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StoryError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| StoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store = SceneStore::from_json_str(&json)?;
        info!("loaded {} scenes from {}", store.len(), path.display());
        Ok(store)
    }

    pub fn get(&self, idx: usize) -> Option<&Scene> { self.scenes.get(idx) }
    pub fn len(&self) -> usize { self.scenes.len() }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool { self.scenes.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &Scene> { self.scenes.iter() }
    pub fn as_slice(&self) -> &[Scene] { &self.scenes }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

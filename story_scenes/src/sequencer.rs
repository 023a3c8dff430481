//! Bounded cursor over a [`SceneStore`].

use log::info;

use crate::scene::{GestureLabel, Scene, SceneStore};

// ════════════════════════════════════════════════════════════════════════════
// StoryCommand
// ════════════════════════════════════════════════════════════════════════════

/// A navigation request, whether it came from a gesture or a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoryCommand {
    Advance,
    Retreat,
    Skip,
    Reset,
}

impl StoryCommand {
    /// Gesture → navigation mapping. `None` triggers nothing.
    pub fn for_gesture(label: GestureLabel) -> Option<StoryCommand> {
        match label {
            GestureLabel::OpenPalm => Some(StoryCommand::Advance),
            GestureLabel::Victory  => Some(StoryCommand::Skip),
            GestureLabel::IndexUp  => Some(StoryCommand::Retreat),
            GestureLabel::None     => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StoryCommand::Advance => "next",
            StoryCommand::Retreat => "back",
            StoryCommand::Skip    => "skip",
            StoryCommand::Reset   => "reset",
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// StorySequencer
// ════════════════════════════════════════════════════════════════════════════

/// Owns the scenes and a cursor with `0 <= idx < len` at all times.
///
/// There is no terminal state: on the last scene `advance` simply returns
/// false.
#[derive(Clone, Debug)]
pub struct StorySequencer {
    scenes: SceneStore,
    idx:    usize,
}

impl StorySequencer {
    pub fn new(scenes: SceneStore) -> Self {
        StorySequencer { scenes, idx: 0 }
    }

    pub fn current_scene(&self) -> &Scene {
        // `idx < len` and `len >= 1` are both maintained by this type.
        &self.scenes.as_slice()[self.idx]
    }

    pub fn position(&self) -> usize { self.idx }
    pub fn len(&self) -> usize { self.scenes.len() }
    pub fn is_empty(&self) -> bool { self.scenes.is_empty() }
    pub fn is_at_end(&self) -> bool { self.idx + 1 == self.scenes.len() }
    pub fn scenes(&self) -> &SceneStore { &self.scenes }

    /// Move to the next scene. Returns false (and stays put) on the last one.
    pub fn advance(&mut self) -> bool {
        if self.idx + 1 < self.scenes.len() {
            self.idx += 1;
            true
        } else {
            false
        }
    }

    /// Move to the previous scene. Returns false (and stays put) on the first.
    pub fn retreat(&mut self) -> bool {
        if self.idx > 0 {
            self.idx -= 1;
            true
        } else {
            false
        }
    }

    /// Jump two scenes ahead, clamped to the last scene.
    pub fn skip(&mut self) {
        self.idx = (self.idx + 2).min(self.scenes.len() - 1);
    }

    pub fn reset(&mut self) {
        self.idx = 0;
    }

    /// Advisory gesture of the current scene.
    pub fn expected_gesture(&self) -> GestureLabel {
        self.current_scene().gesture
    }

    /// Run one command. Returns whether the cursor changed.
    pub fn apply(&mut self, cmd: StoryCommand) -> bool {
        let before = self.idx;
        match cmd {
            StoryCommand::Advance => { self.advance(); }
            StoryCommand::Retreat => { self.retreat(); }
            StoryCommand::Skip    => self.skip(),
            StoryCommand::Reset   => self.reset(),
        }
        let moved = self.idx != before;
        if moved {
            info!("{}: scene {} -> {}", cmd.name(), before + 1, self.idx + 1);
        }
        moved
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

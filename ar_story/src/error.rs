use thiserror::Error;

/// Anything that stops the application before or during the frame loop.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Story(#[from] story_scenes::StoryError),

    #[error(transparent)]
    Asset(#[from] story_compositor::AssetError),

    #[error("window: {0}")]
    Window(#[from] minifb::Error),
}

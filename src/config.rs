use crate::constants::{DEFAULT_ANIMATION_DELAY_MS, DEFAULT_FRAME_DIRECTORY, DEFAULT_PICTURE_DIMENSIONS};

/// Runtime settings for a render run. Defaults come from `constants`, the CLI overrides them.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub dimensions: (usize, usize),
    pub frame_directory: String,
    pub animation_delay_ms: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            dimensions: DEFAULT_PICTURE_DIMENSIONS,
            frame_directory: DEFAULT_FRAME_DIRECTORY.to_string(),
            animation_delay_ms: DEFAULT_ANIMATION_DELAY_MS,
        }
    }
}

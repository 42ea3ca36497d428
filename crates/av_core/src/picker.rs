use async_trait::async_trait;

use crate::types::ImageSelection;
use crate::Result;

/// Result of a picker interaction that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    Picked(ImageSelection),
    Cancelled,
}

#[async_trait]
pub trait ImagePicker: Send + Sync {
    /// Ask the user for an image. Platform failures are returned as `Err`.
    async fn pick_image(&self) -> Result<PickOutcome>;
}

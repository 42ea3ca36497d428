use async_trait::async_trait;

use crate::endpoint::Endpoint;
use crate::types::{ClassificationResult, ImageSelection};
use crate::Result;

#[async_trait]
pub trait InferenceClient: Send + Sync {
    fn name(&self) -> &str;

    /// Upload the image to the endpoint and map the response to a result.
    async fn classify(&self, image: &ImageSelection, endpoint: &Endpoint) -> Result<ClassificationResult>;
}

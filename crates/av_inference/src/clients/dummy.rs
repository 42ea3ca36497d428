use std::fmt;

use async_trait::async_trait;
use av_core::{ClassificationResult, Endpoint, ImageSelection, InferenceClient, ResponseSchema, Result};

use crate::Config;

/// Offline client: labels an image with its file stem. Useful for exercising
/// the request lifecycle without a running service.
pub struct DummyClient;

impl fmt::Debug for DummyClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyClient").finish()
    }
}

impl DummyClient {
    pub async fn new(_config: Option<Config>) -> Result<Self> {
        Ok(Self)
    }
}

#[async_trait]
impl InferenceClient for DummyClient {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn classify(&self, image: &ImageSelection, endpoint: &Endpoint) -> Result<ClassificationResult> {
        // Fail the same way the HTTP client would on an unreadable file.
        tokio::fs::metadata(image.path()).await?;

        let label = image
            .path()
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .filter(|stem| !stem.is_empty())
            .unwrap_or_else(|| "unknown".to_string());

        Ok(match endpoint.schema {
            ResponseSchema::Label { .. } => ClassificationResult::Label(label),
            ResponseSchema::Scored => ClassificationResult::Scored {
                label,
                confidence: 1.0,
            },
        })
    }
}

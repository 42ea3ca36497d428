use std::sync::Arc;
use std::time::Duration;

use av_core::{Endpoint, Error, InferenceClient, Result};
use url::Url;

pub mod clients;

pub use clients::create_client;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct InferenceConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

impl InferenceConfig {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout,
        })
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Client implementation: `http` (default) or `dummy`.
    pub client_name: Option<String>,
    pub inference_config: InferenceConfig,
}

impl Config {
    pub fn endpoint(&self, name: &str) -> Result<Endpoint> {
        Endpoint::by_name(name, &self.inference_config.base_url)
    }

    pub fn endpoints(&self) -> Result<Vec<Endpoint>> {
        Endpoint::presets(&self.inference_config.base_url)
    }
}

/// Parse a base URL, making sure it ends in `/` so endpoint paths are
/// appended rather than replacing the last segment.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw)?;
    if url.cannot_be_a_base() {
        return Err(Error::Config(format!("Not a usable base URL: {}", raw)));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

pub mod prelude {
    pub use super::clients::create_client;
    pub use super::{Config, InferenceConfig};
    pub use av_core::{ClassificationResult, Error, InferenceClient, Result};
}

pub type SharedClient = Arc<dyn InferenceClient>;

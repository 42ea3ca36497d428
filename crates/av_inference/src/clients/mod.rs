use std::sync::Arc;

use av_core::{Error, Result};
use tracing::info;

use crate::{Config, SharedClient};

pub mod dummy;
pub mod http;

pub use dummy::DummyClient;
pub use http::HttpClient;

pub const HTTP_CLIENT: &str = "http";
pub const DUMMY_CLIENT: &str = "dummy";

pub async fn create_client(config: Option<Config>) -> Result<SharedClient> {
    let config = config.unwrap_or_default();
    let client_name = config.client_name.as_deref().unwrap_or(HTTP_CLIENT).to_lowercase();

    let client: SharedClient = match client_name.as_str() {
        HTTP_CLIENT => Arc::new(HttpClient::new(&config.inference_config)?),
        DUMMY_CLIENT => Arc::new(DummyClient::new(Some(config.clone())).await?),
        other => {
            return Err(Error::Config(format!(
                "Unknown inference client: {}. Available clients: {}, {}",
                other, HTTP_CLIENT, DUMMY_CLIENT
            )))
        }
    };
    info!(
        client = client.name(),
        base_url = %config.inference_config.base_url,
        "Inference client initialized"
    );
    Ok(client)
}

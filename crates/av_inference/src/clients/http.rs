use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use av_core::{ClassificationResult, Endpoint, Error, ImageSelection, InferenceClient, ResponseSchema, Result};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::InferenceConfig;

pub const IMAGE_FIELD: &str = "image";
pub const IMAGE_MIME: &str = "image/jpeg";

/// Uploads the image as a multipart form and maps the JSON response
/// according to the endpoint's schema.
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(config: &InferenceConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            timeout: config.timeout,
        })
    }
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("client", &"<reqwest::Client>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[async_trait]
impl InferenceClient for HttpClient {
    fn name(&self) -> &str {
        "HTTP"
    }

    async fn classify(&self, image: &ImageSelection, endpoint: &Endpoint) -> Result<ClassificationResult> {
        let bytes = tokio::fs::read(image.path()).await?;
        debug!(url = %endpoint.url, bytes = bytes.len(), "Uploading image");

        let part = Part::bytes(bytes)
            .file_name(endpoint.upload_file_name.clone())
            .mime_str(IMAGE_MIME)?;
        let form = Form::new().part(IMAGE_FIELD, part);

        let body = self
            .client
            .post(endpoint.url.clone())
            .multipart(form)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        parse_response(&body, &endpoint.schema)
    }
}

pub fn parse_response(body: &Value, schema: &ResponseSchema) -> Result<ClassificationResult> {
    match schema {
        ResponseSchema::Label { field } => {
            let label = required_label(body, field)?;
            Ok(ClassificationResult::Label(label))
        }
        ResponseSchema::Scored => {
            let label = required_label(body, "class")?;
            let confidence = body
                .get("confidence")
                .and_then(Value::as_f64)
                .ok_or_else(|| Error::MalformedResponse("missing numeric field `confidence`".to_string()))?;
            if !(0.0..=1.0).contains(&confidence) {
                return Err(Error::MalformedResponse(format!(
                    "confidence {} outside [0, 1]",
                    confidence
                )));
            }
            Ok(ClassificationResult::Scored { label, confidence })
        }
    }
}

fn required_label(body: &Value, field: &str) -> Result<String> {
    let label = body
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| Error::MalformedResponse(format!("missing string field `{}`", field)))?;
    if label.trim().is_empty() {
        return Err(Error::MalformedResponse(format!("empty field `{}`", field)));
    }
    Ok(label.to_string())
}

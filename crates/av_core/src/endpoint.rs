use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Error, Result};

pub const CROP_ENDPOINT: &str = "crop";
pub const LAND_ENDPOINT: &str = "land";

/// Shape of the JSON body returned by an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseSchema {
    /// A single string field holding the label.
    Label { field: String },
    /// `{ "class": string, "confidence": number }`
    Scored,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub name: String,
    pub url: Url,
    pub schema: ResponseSchema,
    pub upload_file_name: String,
    /// Noun used in user-facing messages ("crop", "land").
    pub subject: String,
}

impl Endpoint {
    pub fn crop(base_url: &Url) -> Result<Self> {
        Ok(Self {
            name: CROP_ENDPOINT.to_string(),
            url: base_url.join("predict_crop_image")?,
            schema: ResponseSchema::Label {
                field: "predicted_crop".to_string(),
            },
            upload_file_name: "crop_image.jpg".to_string(),
            subject: "crop".to_string(),
        })
    }

    pub fn land(base_url: &Url) -> Result<Self> {
        Ok(Self {
            name: LAND_ENDPOINT.to_string(),
            url: base_url.join("predict_land")?,
            schema: ResponseSchema::Scored,
            upload_file_name: "land_image.jpg".to_string(),
            subject: "land".to_string(),
        })
    }

    pub fn by_name(name: &str, base_url: &Url) -> Result<Self> {
        match name.to_lowercase().as_str() {
            CROP_ENDPOINT => Self::crop(base_url),
            LAND_ENDPOINT => Self::land(base_url),
            other => Err(Error::Config(format!(
                "Unknown endpoint: {}. Available endpoints: {}, {}",
                other, CROP_ENDPOINT, LAND_ENDPOINT
            ))),
        }
    }

    pub fn presets(base_url: &Url) -> Result<Vec<Self>> {
        Ok(vec![Self::crop(base_url)?, Self::land(base_url)?])
    }

    pub fn failure_message(&self) -> String {
        format!("Failed to predict {} type. Please try again.", self.subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_join_base_url() {
        let base = Url::parse("http://127.0.0.1:5000/").unwrap();
        let crop = Endpoint::by_name("crop", &base).unwrap();
        assert_eq!(crop.url.as_str(), "http://127.0.0.1:5000/predict_crop_image");
        assert_eq!(crop.upload_file_name, "crop_image.jpg");

        let land = Endpoint::by_name("LAND", &base).unwrap();
        assert_eq!(land.url.as_str(), "http://127.0.0.1:5000/predict_land");
        assert_eq!(land.schema, ResponseSchema::Scored);
    }

    #[test]
    fn test_unknown_endpoint_is_config_error() {
        let base = Url::parse("http://127.0.0.1:5000/").unwrap();
        let err = Endpoint::by_name("weather", &base).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_failure_message_names_subject() {
        let base = Url::parse("http://localhost/").unwrap();
        let land = Endpoint::land(&base).unwrap();
        assert_eq!(land.failure_message(), "Failed to predict land type. Please try again.");
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Picker error: {0}")]
    Picker(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// User-facing failure kinds. Every collaborator failure is collapsed into
/// one of these before it reaches the presentation layer.
#[derive(Error, Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "message")]
pub enum ErrorKind {
    #[error("Error: {0}")]
    PickerError(String),

    #[error("Please select an image first.")]
    NoImageSelected,

    #[error("A classification request is already in progress.")]
    RequestInProgress,

    #[error("Classification failed. Please try again.")]
    ClassificationFailed,

    /// Returned to the awaiting caller when its request was cancelled or
    /// replaced before it completed. Never stored in `RequestState`.
    #[error("Classification request was superseded.")]
    Superseded,
}

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;

/// A user-chosen local image, valid for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSelection {
    path: PathBuf,
}

impl ImageSelection {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassificationResult {
    /// Scored form, e.g. a land-use class with its confidence in `[0.0, 1.0]`.
    Scored {
        #[serde(rename = "class")]
        label: String,
        confidence: f64,
    },
    /// Simple form, e.g. a crop name.
    Label(String),
}

impl ClassificationResult {
    pub fn label(&self) -> &str {
        match self {
            Self::Label(label) => label,
            Self::Scored { label, .. } => label,
        }
    }

    pub fn confidence(&self) -> Option<f64> {
        match self {
            Self::Label(_) => None,
            Self::Scored { confidence, .. } => Some(*confidence),
        }
    }

    /// Confidence as a percentage with two decimals, e.g. `87.34%`.
    pub fn confidence_percent(&self) -> Option<String> {
        self.confidence().map(|c| format!("{:.2}%", c * 100.0))
    }
}

/// Lifecycle of a classification request. The variants carry the image they
/// refer to, so a result or failure can never outlive its selection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RequestState {
    #[default]
    Idle,
    Selected {
        image: ImageSelection,
    },
    InFlight {
        image: ImageSelection,
    },
    Succeeded {
        image: ImageSelection,
        result: ClassificationResult,
    },
    Failed {
        image: Option<ImageSelection>,
        error: ErrorKind,
    },
}

impl RequestState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Selected { .. } => "selected",
            Self::InFlight { .. } => "in_flight",
            Self::Succeeded { .. } => "succeeded",
            Self::Failed { .. } => "failed",
        }
    }

    pub fn image(&self) -> Option<&ImageSelection> {
        match self {
            Self::Idle => None,
            Self::Selected { image } | Self::InFlight { image } => Some(image),
            Self::Succeeded { image, .. } => Some(image),
            Self::Failed { image, .. } => image.as_ref(),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight { .. })
    }

    pub fn result(&self) -> Option<&ClassificationResult> {
        match self {
            Self::Succeeded { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorKind> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}

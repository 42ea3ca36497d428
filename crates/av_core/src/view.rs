use serde::Serialize;

use crate::endpoint::{Endpoint, ResponseSchema};
use crate::error::ErrorKind;
use crate::types::{ClassificationResult, RequestState};

/// Read-only projection of a `RequestState` for presentation layers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub title: String,
    pub busy: bool,
    pub image: Option<String>,
    pub lines: Vec<String>,
    pub error: Option<String>,
}

impl ViewModel {
    pub fn from_state(state: &RequestState, endpoint: &Endpoint) -> Self {
        let subject = title_case(&endpoint.subject);
        Self {
            title: format!("{} Classification", subject),
            busy: state.is_in_flight(),
            image: state.image().map(|image| image.path().display().to_string()),
            lines: state
                .result()
                .map(|result| result_lines(result, endpoint, &subject))
                .unwrap_or_default(),
            error: state.error().map(|error| error_message(error, endpoint)),
        }
    }
}

pub fn error_message(error: &ErrorKind, endpoint: &Endpoint) -> String {
    match error {
        ErrorKind::ClassificationFailed => endpoint.failure_message(),
        other => other.to_string(),
    }
}

fn result_lines(result: &ClassificationResult, endpoint: &Endpoint, subject: &str) -> Vec<String> {
    match (result, &endpoint.schema) {
        (ClassificationResult::Label(label), ResponseSchema::Label { .. }) => {
            vec![format!("Predicted {}: {}", subject, label)]
        }
        _ => {
            let mut lines = vec![format!("Class: {}", result.label())];
            if let Some(percent) = result.confidence_percent() {
                lines.push(format!("Confidence: {}", percent));
            }
            lines
        }
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ImageSelection;
    use url::Url;

    fn base() -> Url {
        Url::parse("http://127.0.0.1:5000/").unwrap()
    }

    #[test]
    fn test_scored_result_view() {
        let endpoint = Endpoint::land(&base()).unwrap();
        let state = RequestState::Succeeded {
            image: ImageSelection::new("/images/field.jpg"),
            result: ClassificationResult::Scored {
                label: "Wheat".to_string(),
                confidence: 0.8734,
            },
        };
        let view = ViewModel::from_state(&state, &endpoint);
        assert_eq!(view.title, "Land Classification");
        assert_eq!(view.lines, vec!["Class: Wheat", "Confidence: 87.34%"]);
        assert_eq!(view.image.as_deref(), Some("/images/field.jpg"));
        assert!(!view.busy);
        assert_eq!(view.error, None);
    }

    #[test]
    fn test_label_result_view() {
        let endpoint = Endpoint::crop(&base()).unwrap();
        let state = RequestState::Succeeded {
            image: ImageSelection::new("/images/rice.jpg"),
            result: ClassificationResult::Label("Rice".to_string()),
        };
        let view = ViewModel::from_state(&state, &endpoint);
        assert_eq!(view.lines, vec!["Predicted Crop: Rice"]);
    }

    #[test]
    fn test_failure_views() {
        let endpoint = Endpoint::crop(&base()).unwrap();
        let failed = RequestState::Failed {
            image: Some(ImageSelection::new("/images/rice.jpg")),
            error: ErrorKind::ClassificationFailed,
        };
        let view = ViewModel::from_state(&failed, &endpoint);
        assert_eq!(view.error.as_deref(), Some("Failed to predict crop type. Please try again."));
        assert!(view.lines.is_empty());

        let empty = RequestState::Failed {
            image: None,
            error: ErrorKind::NoImageSelected,
        };
        let view = ViewModel::from_state(&empty, &endpoint);
        assert_eq!(view.error.as_deref(), Some("Please select an image first."));
        assert_eq!(view.image, None);
    }

    #[test]
    fn test_in_flight_view_is_busy() {
        let endpoint = Endpoint::crop(&base()).unwrap();
        let state = RequestState::InFlight {
            image: ImageSelection::new("/images/rice.jpg"),
        };
        let view = ViewModel::from_state(&state, &endpoint);
        assert!(view.busy);
        assert!(view.lines.is_empty());
        assert_eq!(view.error, None);
    }
}

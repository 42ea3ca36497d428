use av_core::ViewModel;

pub fn render(view: &ViewModel) -> String {
    let mut out = vec![format!("== {} ==", view.title)];
    if let Some(image) = &view.image {
        out.push(format!("Image: {}", image));
    }
    if view.busy {
        out.push("Classifying...".to_string());
    }
    out.extend(view.lines.iter().cloned());
    if let Some(error) = &view.error {
        out.push(error.clone());
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use av_core::{ClassificationResult, Endpoint, ImageSelection, RequestState};
    use url::Url;

    #[test]
    fn test_render_scored_result() {
        let endpoint = Endpoint::land(&Url::parse("http://127.0.0.1:5000/").unwrap()).unwrap();
        let state = RequestState::Succeeded {
            image: ImageSelection::new("field.jpg"),
            result: ClassificationResult::Scored {
                label: "Wheat".to_string(),
                confidence: 0.8734,
            },
        };
        let rendered = render(&ViewModel::from_state(&state, &endpoint));
        assert_eq!(
            rendered,
            "== Land Classification ==\nImage: field.jpg\nClass: Wheat\nConfidence: 87.34%"
        );
    }

    #[test]
    fn test_render_busy() {
        let endpoint = Endpoint::crop(&Url::parse("http://127.0.0.1:5000/").unwrap()).unwrap();
        let state = RequestState::InFlight {
            image: ImageSelection::new("rice.jpg"),
        };
        let rendered = render(&ViewModel::from_state(&state, &endpoint));
        assert!(rendered.ends_with("Classifying..."));
    }
}

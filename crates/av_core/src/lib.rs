pub mod controller;
pub mod endpoint;
pub mod error;
pub mod inference;
pub mod picker;
pub mod types;
pub mod view;

pub use controller::ClassificationController;
pub use endpoint::{Endpoint, ResponseSchema};
pub use error::{Error, ErrorKind, Result};
pub use inference::InferenceClient;
pub use picker::{ImagePicker, PickOutcome};
pub use types::{ClassificationResult, ImageSelection, RequestState};
pub use view::ViewModel;

pub mod prelude {
    pub use super::{
        ClassificationController, ClassificationResult, Endpoint, Error, ErrorKind, ImagePicker, ImageSelection,
        InferenceClient, PickOutcome, RequestState, Result, ViewModel,
    };
}

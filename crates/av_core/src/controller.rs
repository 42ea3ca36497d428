use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{watch, Notify};
use tracing::{debug, info, warn};

use crate::endpoint::Endpoint;
use crate::error::{Error, ErrorKind};
use crate::inference::InferenceClient;
use crate::picker::{ImagePicker, PickOutcome};
use crate::types::{ClassificationResult, ImageSelection, RequestState};

/// Returns the controller to `Selected` if a `submit()` future is dropped
/// while its request is still the current one.
struct InFlightGuard<'a> {
    controller: &'a ClassificationController,
    generation: u64,
    image: Option<ImageSelection>,
}

impl InFlightGuard<'_> {
    fn disarm(&mut self) {
        self.image = None;
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        let Some(image) = self.image.take() else { return };
        let controller = self.controller;
        let mut inner = controller.lock();
        if inner.generation != self.generation || !inner.state.is_in_flight() {
            return;
        }
        debug!(endpoint = %controller.endpoint.name, generation = self.generation, "Submit dropped before completion");
        controller.supersede(&mut inner);
        controller.transition(&mut inner, RequestState::Selected { image });
    }
}

struct Inner {
    state: RequestState,
    /// Bumped whenever the outstanding request (if any) stops being current.
    generation: u64,
}

/// Owns the single request slot for one endpoint and mediates between user
/// events (select, submit, cancel) and the collaborators.
pub struct ClassificationController {
    endpoint: Endpoint,
    picker: Arc<dyn ImagePicker>,
    client: Arc<dyn InferenceClient>,
    inner: Mutex<Inner>,
    state_tx: watch::Sender<RequestState>,
    superseded: Notify,
}

impl ClassificationController {
    pub fn new(endpoint: Endpoint, picker: Arc<dyn ImagePicker>, client: Arc<dyn InferenceClient>) -> Self {
        let (state_tx, _) = watch::channel(RequestState::Idle);
        Self {
            endpoint,
            picker,
            client,
            inner: Mutex::new(Inner {
                state: RequestState::Idle,
                generation: 0,
            }),
            state_tx,
            superseded: Notify::new(),
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn state(&self) -> RequestState {
        self.lock().state.clone()
    }

    pub fn selection(&self) -> Option<ImageSelection> {
        self.lock().state.image().cloned()
    }

    /// Receiver that observes every state transition.
    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.state_tx.subscribe()
    }

    /// Ask the picker for an image. `Ok(None)` means the user cancelled and
    /// the state was left untouched.
    pub async fn select_image(&self) -> Result<Option<ImageSelection>, ErrorKind> {
        match self.picker.pick_image().await {
            Ok(PickOutcome::Picked(image)) => {
                let mut inner = self.lock();
                if inner.state.is_in_flight() {
                    info!(endpoint = %self.endpoint.name, "New selection supersedes in-flight request");
                }
                self.supersede(&mut inner);
                self.transition(&mut inner, RequestState::Selected { image: image.clone() });
                Ok(Some(image))
            }
            Ok(PickOutcome::Cancelled) => {
                debug!(endpoint = %self.endpoint.name, "Image selection cancelled");
                Ok(None)
            }
            Err(err) => {
                warn!(endpoint = %self.endpoint.name, error = %err, "Image picker failed");
                let message = match err {
                    Error::Picker(message) => message,
                    other => other.to_string(),
                };
                Err(ErrorKind::PickerError(message))
            }
        }
    }

    /// Classify the current selection. At most one request is outstanding;
    /// a call made while one is in flight is rejected without a transition.
    pub async fn submit(&self) -> Result<ClassificationResult, ErrorKind> {
        let (image, generation, superseded) = {
            let mut inner = self.lock();
            if inner.state.is_in_flight() {
                debug!(endpoint = %self.endpoint.name, "Rejecting submit while a request is in flight");
                return Err(ErrorKind::RequestInProgress);
            }
            let Some(image) = inner.state.image().cloned() else {
                self.transition(
                    &mut inner,
                    RequestState::Failed {
                        image: None,
                        error: ErrorKind::NoImageSelected,
                    },
                );
                return Err(ErrorKind::NoImageSelected);
            };
            inner.generation += 1;
            let generation = inner.generation;
            // Registered before the lock is released so no supersede can slip past it.
            let superseded = self.superseded.notified();
            self.transition(&mut inner, RequestState::InFlight { image: image.clone() });
            (image, generation, superseded)
        };
        let mut guard = InFlightGuard {
            controller: self,
            generation,
            image: Some(image.clone()),
        };

        info!(
            endpoint = %self.endpoint.name,
            client = self.client.name(),
            image = %image.display_name(),
            "Submitting image for classification"
        );

        let outcome = tokio::select! {
            outcome = self.client.classify(&image, &self.endpoint) => outcome,
            _ = superseded => {
                debug!(endpoint = %self.endpoint.name, generation, "In-flight request abandoned");
                return Err(ErrorKind::Superseded);
            }
        };
        guard.disarm();

        let mut inner = self.lock();
        if inner.generation != generation {
            debug!(endpoint = %self.endpoint.name, generation, "Discarding stale completion");
            return Err(ErrorKind::Superseded);
        }
        match outcome {
            Ok(result) => {
                info!(endpoint = %self.endpoint.name, label = result.label(), "Classification succeeded");
                self.transition(
                    &mut inner,
                    RequestState::Succeeded {
                        image,
                        result: result.clone(),
                    },
                );
                Ok(result)
            }
            Err(err) => {
                warn!(endpoint = %self.endpoint.name, error = %err, "Classification failed");
                self.transition(
                    &mut inner,
                    RequestState::Failed {
                        image: Some(image),
                        error: ErrorKind::ClassificationFailed,
                    },
                );
                Err(ErrorKind::ClassificationFailed)
            }
        }
    }

    /// Abandon the in-flight request, returning to `Selected`. Returns whether
    /// there was anything to cancel.
    pub fn cancel(&self) -> bool {
        let mut inner = self.lock();
        let image = match &inner.state {
            RequestState::InFlight { image } => image.clone(),
            _ => return false,
        };
        info!(endpoint = %self.endpoint.name, "Cancelling in-flight request");
        self.supersede(&mut inner);
        self.transition(&mut inner, RequestState::Selected { image });
        true
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn supersede(&self, inner: &mut Inner) {
        inner.generation += 1;
        self.superseded.notify_waiters();
    }

    fn transition(&self, inner: &mut Inner, next: RequestState) {
        debug!(
            endpoint = %self.endpoint.name,
            from = inner.state.name(),
            to = next.name(),
            "State transition"
        );
        inner.state = next.clone();
        self.state_tx.send_replace(next);
    }
}

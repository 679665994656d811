//! Runs prediction requests off the UI thread.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use crate::domain::{PredictionRequest, PredictionService, SubmitError};

pub type SubmissionOutcome = Result<String, SubmitError>;

/// Sends requests to a [`PredictionService`] on a worker thread and hands
/// the outcomes back to the event loop.
///
/// Every dispatched request produces exactly one outcome, including when
/// the service panics, so the caller can always leave its busy state.
pub struct Dispatcher {
    service: Arc<dyn PredictionService>,
    sender: Sender<SubmissionOutcome>,
    receiver: Receiver<SubmissionOutcome>,
}

impl Dispatcher {
    pub fn new(service: Arc<dyn PredictionService>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            service,
            sender,
            receiver,
        }
    }

    pub fn dispatch(&self, request: PredictionRequest) {
        let service = Arc::clone(&self.service);
        let sender = self.sender.clone();

        thread::spawn(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| service.predict(&request)))
                .unwrap_or_else(|_| {
                    Err(SubmitError::Transport("prediction worker panicked".to_string()))
                });
            if sender.send(outcome).is_err() {
                tracing::debug!("prediction finished after the dispatcher was dropped");
            }
        });
    }

    /// A finished outcome, if one is ready. Never blocks.
    pub fn try_collect(&self) -> Option<SubmissionOutcome> {
        self.receiver.try_recv().ok()
    }
}

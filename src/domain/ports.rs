use super::errors::SubmitError;
use super::payload::PredictionRequest;

/// Something that turns a request into a prediction string.
///
/// Implementations block until the outcome is known; callers run them off
/// the UI thread.
pub trait PredictionService: Send + Sync {
    fn predict(&self, request: &PredictionRequest) -> Result<String, SubmitError>;
}

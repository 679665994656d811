use std::time::Duration;

use reqwest::blocking::Client;
use url::Url;

use crate::domain::{PredictionRequest, PredictionService, SubmitError, parse_prediction};

/// Prediction service reached over HTTP with a JSON body.
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    client: Client,
    endpoint: Url,
}

impl HttpPredictionClient {
    /// Creates a client for `endpoint`. With `timeout` of `None` the request
    /// waits for as long as the transport does.
    pub fn new(endpoint: Url, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl PredictionService for HttpPredictionClient {
    fn predict(&self, request: &PredictionRequest) -> Result<String, SubmitError> {
        tracing::debug!(endpoint = %self.endpoint, "posting prediction request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .map_err(|e| SubmitError::Transport(e.to_string()))?;
        parse_prediction(&body)
    }
}

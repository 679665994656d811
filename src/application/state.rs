//! Application state for the assessment form.
//!
//! This module holds the form, the submission state machine and the small
//! amount of UI state (focus, status line, spinner) the terminal needs.

use crate::domain::{
    Assessment, FieldId, FormState, PredictionRequest, SubmitError, SubmitRejected,
};

/// Message shown when the prediction service could not be reached or
/// refused the request.
pub const SUBMIT_FAILED_MESSAGE: &str = "Error processing your request";

/// Where the submission state machine currently is.
///
/// `Idle` and `Busy` keep the form on screen and editable. `ResultShown` and
/// `ErrorNotified` put an overlay over the form until the user closes it.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// Waiting for the user to submit
    Idle,
    /// A prediction request is in flight
    Busy,
    /// The overlay shows a prediction or an unreadable response
    ResultShown(Assessment),
    /// A blocking notification reports a failed request
    ErrorNotified(String),
}

/// What keyboard input currently acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(FieldId),
    /// The Predict button
    Submit,
}

/// Main application state.
///
/// # Examples
///
/// ```
/// use bcrisk::application::{App, Phase};
///
/// let app = App::default();
/// assert_eq!(app.phase, Phase::Idle);
/// assert!(!app.is_busy());
/// ```
#[derive(Debug)]
pub struct App {
    /// Values entered so far
    pub form: FormState,
    /// Submission state machine
    pub phase: Phase,
    /// Focused input
    pub focus: Focus,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Frame counter driving the busy spinner
    pub spinner_tick: usize,
}

impl Default for App {
    fn default() -> Self {
        Self {
            form: FormState::default(),
            phase: Phase::Idle,
            focus: Focus::Field(FieldId::Brca),
            status_message: None,
            spinner_tick: 0,
        }
    }
}

impl App {
    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Busy)
    }

    /// Whether an overlay currently covers the form.
    pub fn has_overlay(&self) -> bool {
        matches!(self.phase, Phase::ResultShown(_) | Phase::ErrorNotified(_))
    }

    /// The assessment on screen, if any.
    pub fn assessment(&self) -> Option<&Assessment> {
        match &self.phase {
            Phase::ResultShown(assessment) => Some(assessment),
            _ => None,
        }
    }

    /// Sets a field. Edits are allowed while a request is in flight; the
    /// request already holds its own copy of the form.
    pub fn update_field(&mut self, field: FieldId, value: &str) {
        self.form.update_field(field, value);
        self.keep_focus_visible();
    }

    pub fn update_province(&mut self, value: &str) {
        self.form.update_province(value);
        self.keep_focus_visible();
    }

    /// Cycles the option of the focused choice field.
    pub fn cycle_focused(&mut self, forward: bool) {
        if let Focus::Field(field) = self.focus {
            self.form.cycle_option(field, forward);
            self.keep_focus_visible();
        }
    }

    pub fn push_char(&mut self, c: char) {
        if let Focus::Field(field) = self.focus {
            self.form.push_char(field, c);
        }
    }

    pub fn pop_char(&mut self) {
        if let Focus::Field(field) = self.focus {
            self.form.pop_char(field);
        }
    }

    /// Moves focus down through the visible fields and the Predict button,
    /// wrapping around.
    pub fn focus_next(&mut self) {
        let order = self.focus_order();
        let index = self.focus_index(&order);
        self.focus = order[(index + 1) % order.len()];
    }

    pub fn focus_previous(&mut self) {
        let order = self.focus_order();
        let index = self.focus_index(&order);
        self.focus = order[(index + order.len() - 1) % order.len()];
    }

    fn focus_order(&self) -> Vec<Focus> {
        let mut order: Vec<Focus> = self
            .form
            .visible_fields()
            .into_iter()
            .map(Focus::Field)
            .collect();
        order.push(Focus::Submit);
        order
    }

    fn focus_index(&self, order: &[Focus]) -> usize {
        order.iter().position(|focus| *focus == self.focus).unwrap_or(0)
    }

    fn keep_focus_visible(&mut self) {
        if self.focus == Focus::Field(FieldId::OtherProvince)
            && !self.form.is_other_province_visible()
        {
            self.focus = Focus::Field(FieldId::Province);
        }
    }

    /// Starts a submission.
    ///
    /// On success the state machine is `Busy` and the returned request is a
    /// snapshot of the form for the caller to send. Nothing changes phase
    /// when the submission is rejected; an invalid form moves focus to the
    /// offending field.
    pub fn begin_submission(&mut self) -> Result<PredictionRequest, SubmitRejected> {
        match self.phase {
            Phase::Busy => {
                tracing::debug!("submission rejected: request already in flight");
                self.status_message = Some(SubmitRejected::InFlight.to_string());
                return Err(SubmitRejected::InFlight);
            }
            Phase::ResultShown(_) | Phase::ErrorNotified(_) => {
                return Err(SubmitRejected::OverlayOpen);
            }
            Phase::Idle => {}
        }

        let request = match PredictionRequest::from_form(&self.form) {
            Ok(request) => request,
            Err(error) => {
                tracing::debug!(field = ?error.field(), "submission rejected: {error}");
                self.focus = Focus::Field(error.field());
                self.status_message = Some(error.to_string());
                return Err(error.into());
            }
        };

        tracing::info!("submitting assessment");
        self.phase = Phase::Busy;
        self.status_message = None;
        self.spinner_tick = 0;
        Ok(request)
    }

    /// Applies the outcome of the request started by
    /// [`App::begin_submission`] and leaves `Busy`.
    pub fn complete_submission(&mut self, outcome: Result<String, SubmitError>) {
        if !self.is_busy() {
            tracing::warn!("ignoring prediction outcome outside of a submission");
            return;
        }

        self.status_message = None;
        self.phase = match outcome {
            Ok(prediction) => {
                tracing::info!(%prediction, "prediction received");
                Phase::ResultShown(Assessment::Prediction(prediction))
            }
            Err(SubmitError::MalformedResponse(detail)) => {
                tracing::error!("unexpected prediction response: {detail}");
                Phase::ResultShown(Assessment::UnexpectedResponse(detail))
            }
            Err(error) => {
                tracing::error!("Error: {error}");
                Phase::ErrorNotified(SUBMIT_FAILED_MESSAGE.to_string())
            }
        };
    }

    /// Closes the result overlay.
    pub fn dismiss(&mut self) {
        if matches!(self.phase, Phase::ResultShown(_)) {
            self.phase = Phase::Idle;
        }
    }

    /// Closes the error notification.
    pub fn acknowledge_error(&mut self) {
        if matches!(self.phase, Phase::ErrorNotified(_)) {
            self.phase = Phase::Idle;
        }
    }

    /// Advances the busy spinner by one frame.
    pub fn tick(&mut self) {
        if self.is_busy() {
            self.spinner_tick = self.spinner_tick.wrapping_add(1);
        }
    }
}

use crate::application::{App, Focus, Phase};
use crate::domain::{FieldKind, PredictionRequest};
use crossterm::event::{KeyCode, KeyModifiers};

/// What the event loop has to do after a key press.
#[derive(Debug, PartialEq)]
pub enum InputAction {
    None,
    /// Send this request to the prediction service
    Submit(PredictionRequest),
    Quit,
}

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) -> InputAction {
        if modifiers.contains(KeyModifiers::CONTROL) && key == KeyCode::Char('c') {
            return InputAction::Quit;
        }

        match app.phase {
            Phase::ResultShown(_) => {
                Self::handle_result_mode(app, key);
                InputAction::None
            }
            Phase::ErrorNotified(_) => {
                Self::handle_error_mode(app, key);
                InputAction::None
            }
            Phase::Idle | Phase::Busy => Self::handle_form_mode(app, key),
        }
    }

    fn handle_form_mode(app: &mut App, key: KeyCode) -> InputAction {
        let focused_kind = match app.focus {
            Focus::Field(field) => Some(field.kind()),
            Focus::Submit => None,
        };

        match key {
            KeyCode::Esc => return InputAction::Quit,
            KeyCode::Enter => {
                return match app.begin_submission() {
                    Ok(request) => InputAction::Submit(request),
                    Err(_) => InputAction::None,
                };
            }
            KeyCode::Tab | KeyCode::Down => app.focus_next(),
            KeyCode::BackTab | KeyCode::Up => app.focus_previous(),
            KeyCode::Left if focused_kind == Some(FieldKind::Choice) => {
                app.cycle_focused(false);
                app.status_message = None;
            }
            KeyCode::Right | KeyCode::Char(' ') if focused_kind == Some(FieldKind::Choice) => {
                app.cycle_focused(true);
                app.status_message = None;
            }
            KeyCode::Backspace => {
                app.pop_char();
                app.status_message = None;
            }
            KeyCode::Char(c) => {
                app.push_char(c);
                app.status_message = None;
            }
            _ => {}
        }
        InputAction::None
    }

    fn handle_result_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('x') => app.dismiss(),
            _ => {}
        }
    }

    fn handle_error_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Enter => app.acknowledge_error(),
            _ => {}
        }
    }
}

use crate::application::{App, Focus, Phase};
use crate::domain::{Assessment, FieldId, FieldKind, ResultCategory};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];
const LABEL_WIDTH: usize = 16;

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, chunks[0]);
    render_form(f, app, chunks[1]);
    render_status_bar(f, app, chunks[2]);

    match &app.phase {
        Phase::ResultShown(assessment) => render_result_popup(f, assessment),
        Phase::ErrorNotified(message) => render_error_popup(f, message),
        Phase::Idle | Phase::Busy => {}
    }
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("bcrisk - Breast Cancer Risk Self-Assessment")
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();

    for field in app.form.visible_fields() {
        lines.push(field_line(app, field));
    }
    lines.push(Line::from(""));
    lines.push(button_line(app));

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Self-Assessment for Breast Cancer Risk"),
    );
    f.render_widget(form, area);
}

fn field_line(app: &App, field: FieldId) -> Line<'static> {
    let focused = app.focus == Focus::Field(field);
    let value = app.form.display_value(field);

    let label_style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let label = Span::styled(
        format!("{:<width$}", format!("{}:", field.label()), width = LABEL_WIDTH),
        label_style,
    );

    let value_span = if value.is_empty() && !field.placeholder().is_empty() {
        Span::styled(field.placeholder(), Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(value.to_string())
    };

    let mut spans = vec![label];
    match (field.kind(), focused) {
        (FieldKind::Choice, true) => {
            spans.push(Span::styled("< ", Style::default().fg(Color::Cyan)));
            spans.push(value_span.style(Style::default().bg(Color::Blue).fg(Color::White)));
            spans.push(Span::styled(" >", Style::default().fg(Color::Cyan)));
        }
        (_, true) => {
            spans.push(value_span.style(Style::default().bg(Color::Blue).fg(Color::White)));
            spans.push(Span::styled("_", Style::default().fg(Color::White)));
        }
        (_, false) => spans.push(value_span),
    }
    Line::from(spans)
}

fn button_line(app: &App) -> Line<'static> {
    let style = if app.focus == Focus::Submit {
        Style::default().bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let mut spans = vec![Span::styled("[ Predict ]", style)];
    if app.is_busy() {
        let frame = SPINNER_FRAMES[app.spinner_tick % SPINNER_FRAMES.len()];
        spans.push(Span::styled(
            format!("  {frame} Predicting..."),
            Style::default().fg(Color::Magenta),
        ));
    }
    Line::from(spans)
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status_text = match (&app.phase, &app.status_message) {
        (Phase::ResultShown(_), _) => "Esc/Enter/x: close result".to_string(),
        (Phase::ErrorNotified(_), _) => "Enter/Esc: OK".to_string(),
        (_, Some(status)) => status.clone(),
        (Phase::Busy, None) => {
            "Waiting for the prediction service... (fields stay editable)".to_string()
        }
        (Phase::Idle, None) => {
            "Tab/↑↓: move | ←→/Space: choose | Enter: predict | Esc/Ctrl+C: quit".to_string()
        }
    };

    let style = match (&app.phase, &app.status_message) {
        (Phase::Idle | Phase::Busy, Some(_)) => Style::default().fg(Color::Red),
        (Phase::Busy, None) => Style::default().fg(Color::Magenta),
        _ => Style::default(),
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(style);
    f.render_widget(status, area);
}

/// Border colour standing in for the result's style class.
fn category_style(category: ResultCategory) -> Style {
    match category {
        ResultCategory::Healthy => Style::default().fg(Color::Green),
        ResultCategory::AtRisk => Style::default().fg(Color::Red),
        ResultCategory::Unexpected => Style::default().fg(Color::Yellow),
        ResultCategory::Neutral => Style::default(),
    }
}

fn popup_area(area: Rect) -> Rect {
    Rect {
        x: area.width / 10,
        y: area.height / 4,
        width: area.width * 4 / 5,
        height: area.height / 2,
    }
}

fn render_result_popup(f: &mut Frame, assessment: &Assessment) {
    let popup_area = popup_area(f.area());
    f.render_widget(Clear, popup_area);

    let style = category_style(assessment.category());
    let lines = vec![
        Line::from(Span::styled(
            assessment.headline().to_string(),
            style.add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(assessment.description()),
        Line::from(""),
        Line::from(Span::styled("[x] close", Style::default().fg(Color::DarkGray))),
    ];

    let popup = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Result")
                .border_style(style),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(popup, popup_area);
}

fn render_error_popup(f: &mut Frame, message: &str) {
    let popup_area = popup_area(f.area());
    f.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled("[Enter] OK", Style::default().fg(Color::DarkGray))),
    ];
    let popup = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Error")
                .border_style(Style::default().fg(Color::Red)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(popup, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OTHER_PROVINCE, SubmitError};
    use ratatui::{Terminal, backend::TestBackend};

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render_ui(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn submitted_app() -> App {
        let mut app = App::default();
        app.update_field(FieldId::Brca, "negative");
        app.update_field(FieldId::Weight, "60");
        app.update_field(FieldId::Height, "165");
        app.update_field(FieldId::Age, "30");
        app.update_province("สงขลา");
        app.update_field(FieldId::Gender, "Female");
        app.begin_submission().unwrap();
        app
    }

    #[test]
    fn test_form_shows_labels_and_button() {
        let screen = render(&App::default());
        assert!(screen.contains("Weight (kg):"));
        assert!(screen.contains("Height (cm):"));
        assert!(screen.contains("[ Predict ]"));
        assert!(!screen.contains("Other Province"));
        assert!(!screen.contains("Predicting"));
    }

    #[test]
    fn test_other_province_field_is_conditional() {
        let mut app = App::default();
        app.update_province(OTHER_PROVINCE);
        assert!(render(&app).contains("Other Province:"));
    }

    #[test]
    fn test_busy_shows_spinner() {
        let screen = render(&submitted_app());
        assert!(screen.contains("Predicting..."));
    }

    #[test]
    fn test_result_overlay_and_dismissal() {
        let mut app = submitted_app();
        app.complete_submission(Ok("Healthy".to_string()));

        let screen = render(&app);
        assert!(screen.contains("Result"));
        assert!(screen.contains("Healthy"));
        assert!(screen.contains("Based on your input"));

        app.dismiss();
        let screen = render(&app);
        assert!(!screen.contains("Based on your input"));
        assert!(!screen.contains("[x] close"));
    }

    #[test]
    fn test_unexpected_response_overlay() {
        let mut app = submitted_app();
        app.complete_submission(Err(SubmitError::MalformedResponse("missing".to_string())));
        assert!(render(&app).contains("Unexpected response"));
    }

    #[test]
    fn test_error_notification() {
        let mut app = submitted_app();
        app.complete_submission(Err(SubmitError::Status(500)));
        let screen = render(&app);
        assert!(screen.contains("Error processing your request"));
        assert!(screen.contains("[Enter] OK"));
    }
}

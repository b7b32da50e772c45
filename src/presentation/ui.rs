use crate::application::{App, AppMode, Focus, ResultMode, ViewState};
use crate::domain::{FieldId, ProgramId};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const BIO_ROWS: u16 = 5;

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_navigation_bar(f, app, chunks[0]);
    render_title(f, app, content_column(chunks[1]));
    render_body(f, app, content_column(chunks[2]));
    render_status_bar(f, app, chunks[3]);

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
    if app.requires_login() {
        render_login_modal(f);
    }
}

/// Middle column holding the page content, leaving side margins.
fn content_column(area: Rect) -> Rect {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(12),
            Constraint::Percentage(76),
            Constraint::Percentage(12),
        ])
        .split(area)[1]
}

fn render_navigation_bar(f: &mut Frame, app: &App, area: Rect) {
    let user = match &app.session {
        Some(session) => format!("Signed in as {}", session.display_name),
        None => "Not signed in".to_string(),
    };
    let line = Line::from(vec![
        Span::styled("← Esc: Home", Style::default().fg(Color::Yellow)),
        Span::raw(" | "),
        Span::styled("Mentorship", Style::default().fg(Color::Cyan)),
        Span::raw(" | "),
        Span::raw(user),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_title(f: &mut Frame, app: &App, area: Rect) {
    let title = format!("Mentor Application | {}", app.program_title);
    let mut spans = vec![Span::styled(
        title,
        dimmed(app, Style::default().add_modifier(Modifier::BOLD)),
    )];
    if app.is_loading {
        spans.push(Span::styled("  Loading...", Style::default().fg(Color::Yellow)));
    }
    let widget = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(widget, area);
}

fn dimmed(app: &App, style: Style) -> Style {
    if app.is_loading {
        style.add_modifier(Modifier::DIM)
    } else {
        style
    }
}

fn render_body(f: &mut Frame, app: &App, area: Rect) {
    match &app.view {
        ViewState::Success { program_id, mode } => render_result(f, program_id, *mode, area),
        ViewState::Loading | ViewState::Editing | ViewState::Submitting => {
            render_form(f, app, area);
            if app.is_loading {
                render_loading_overlay(f, area);
            }
        }
    }
}

fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(BIO_ROWS + 2),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    for (index, field) in FieldId::ALL.into_iter().enumerate() {
        render_field(f, app, field, rows[index]);
    }
    render_submit_button(f, app, rows[FieldId::ALL.len()]);
}

fn field_block(app: &App, field: FieldId) -> Block<'static> {
    let focused = app.focus == Focus::Field(field);
    let error = app.form.error(field);

    let border_style = if error.is_some() {
        Style::default().fg(Color::Red)
    } else if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(dimmed(app, border_style))
        .title(Line::from(vec![
            Span::styled("* ", Style::default().fg(Color::Red)),
            Span::raw(field.label()),
        ]));

    if let Some(max) = field.max_length() {
        let counter = format!(" {} / {} ", app.form.char_count(field), max);
        block = block.title_top(Line::from(counter).right_aligned());
    }
    if let Some(error) = error {
        block = block.title_bottom(Line::styled(
            format!(" {error} "),
            Style::default().fg(Color::Red),
        ));
    }
    block
}

fn render_field(f: &mut Frame, app: &App, field: FieldId, area: Rect) {
    let block = field_block(app, field);
    let inner = block.inner(area);
    let focused = app.focus == Focus::Field(field);

    let paragraph = match field {
        FieldId::Category => {
            let line = match app.form.category {
                Some(category) if focused => Line::from(format!("◀ {} ▶", category.label())),
                Some(category) => Line::from(category.label()),
                None => Line::styled(
                    "Select a category (←/→)",
                    Style::default().fg(Color::DarkGray),
                ),
            };
            Paragraph::new(line)
        }
        _ => {
            let text = app.form.text(field).unwrap_or_default();
            let (row, col) = if focused {
                cursor_row_col(text, app.cursor_position)
            } else {
                (0, 0)
            };
            let vertical = row.saturating_sub(inner.height.saturating_sub(1) as usize);
            let horizontal = col.saturating_sub(inner.width.saturating_sub(1) as usize);

            if focused && app.is_editable() && matches!(app.mode, AppMode::Normal) && !app.requires_login() {
                f.set_cursor_position((
                    inner.x + (col - horizontal) as u16,
                    inner.y + (row - vertical) as u16,
                ));
            }

            Paragraph::new(text.to_string()).scroll((vertical as u16, horizontal as u16))
        }
    };

    f.render_widget(paragraph.style(dimmed(app, Style::default())).block(block), area);
}

/// Line and column of a character cursor within possibly multi-line text.
fn cursor_row_col(text: &str, cursor: usize) -> (usize, usize) {
    let before: String = text.chars().take(cursor).collect();
    let row = before.matches('\n').count();
    let col = before
        .rsplit('\n')
        .next()
        .map(|line| line.chars().count())
        .unwrap_or(0);
    (row, col)
}

fn render_submit_button(f: &mut Frame, app: &App, area: Rect) {
    let style = if app.focus == Focus::Submit {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let button = Paragraph::new(Line::styled("[ Submit ]", dimmed(app, style)));
    let top_margin = if area.height >= 3 { 1 } else { 0 };
    let inner = Rect {
        x: area.x,
        y: area.y + top_margin,
        width: area.width,
        height: area.height.saturating_sub(top_margin).min(1),
    };
    f.render_widget(button, inner);
}

fn render_loading_overlay(f: &mut Frame, area: Rect) {
    let popup = centered_rect(area, 20, 3);
    f.render_widget(Clear, popup);
    let spinner = Paragraph::new("Loading...")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(spinner, popup);
}

fn render_result(f: &mut Frame, program_id: &ProgramId, mode: ResultMode, area: Rect) {
    let headline = match mode {
        ResultMode::Edit => "Mentor application updated!",
    };
    let lines = vec![
        Line::styled(
            format!("✓ {headline}"),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::raw(format!("Your changes for program {program_id} have been saved.")),
        Line::raw(""),
        Line::styled(
            "Press Enter or Esc to return home",
            Style::default().fg(Color::DarkGray),
        ),
    ];
    let card = centered_rect(area, 60, lines.len() as u16 + 2);
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Success"));
    f.render_widget(widget, card);
}

fn render_login_modal(f: &mut Frame) {
    let popup = centered_rect(f.area(), 56, 7);
    f.render_widget(Clear, popup);
    let text = vec![
        Line::raw("You need to sign in to edit your mentor application."),
        Line::raw(""),
        Line::raw("Sign in, then restart with a valid session file."),
        Line::styled("Ctrl+C: quit", Style::default().fg(Color::DarkGray)),
    ];
    let modal = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Sign in required")
                .style(Style::default().fg(Color::Yellow)),
        );
    f.render_widget(modal, popup);
}

/// A `width` x `height` rectangle centered in `area`, clipped to fit.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let text = match (&app.mode, &app.view) {
        (AppMode::Help, _) => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/F1: close help".to_string(),
        (_, ViewState::Loading) | (_, ViewState::Submitting) => "Loading... | Esc: home".to_string(),
        (_, ViewState::Success { .. }) => "Enter/Esc: home | Ctrl+C: quit".to_string(),
        (_, ViewState::Editing) => {
            let hint = match app.focus {
                Focus::Field(FieldId::Category) => "←/→: choose category",
                Focus::Field(FieldId::Bio) => "Enter: new line",
                Focus::Field(FieldId::Slots) => "↑/↓: adjust slots",
                Focus::Field(_) => "type to edit",
                Focus::Submit => "Enter: submit",
            };
            format!("{hint} | Tab/Shift+Tab: next/prev field | Ctrl+S: submit | F1: help | Esc: home")
        }
    };

    let style = match app.mode {
        AppMode::Help => Style::default().fg(Color::Cyan),
        AppMode::Normal => Style::default(),
    };
    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(style);
    f.render_widget(status, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("Mentor Application Help (Line {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

pub fn help_line_count() -> usize {
    get_help_text().lines().count()
}

fn get_help_text() -> &'static str {
    r#"MENTOR APPLICATION EDITOR

=== FIELDS ===
All fields are required. Missing values are flagged "Required".

Category                One of: Engineering, Computer Science,
                        Life Sciences, Data Science and AI,
                        Physical Science, Other
Expertise               Up to 255 characters
Institution             Up to 255 characters
Current Position        Up to 255 characters
Bio                     Free text, several lines
Number of Mentee Slots  Whole number, at least 1

=== MOVING AROUND ===
Tab / Shift+Tab         Next / previous field
↓ / ↑                   Next / previous field (single-line fields)
← / →                   Move the cursor (cycle options on Category)
Home / End              Jump to start / end of the field

=== EDITING ===
Enter                   New line in Bio, next field elsewhere
Backspace / Delete      Remove character before / under the cursor
↑ / ↓ on Slots          Increase / decrease the number of slots

=== SUBMITTING ===
Ctrl+S                  Submit from anywhere
Enter on [ Submit ]     Submit
                        Nothing is sent until every field is valid.

=== LEAVING ===
Esc                     Back to home
Ctrl+C                  Quit

=== HELP NAVIGATION ===
↑↓ or j/k               Scroll help text up/down one line
Page Up/Down            Scroll help text up/down 5 lines
Home                    Jump to top of help text
Esc/F1                  Close this help window"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{LoadOutcome, SubmitOutcome};
    use crate::domain::{Category, MentorApplication, Program, Session};
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &App) -> String {
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render_ui(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn app_with_session() -> App {
        let session = Session {
            user_id: "u1".to_string(),
            display_name: "Ada".to_string(),
            token: "t".to_string(),
        };
        App::new(ProgramId::new("p1"), Some(session))
    }

    fn loaded(application: Option<MentorApplication>) -> App {
        let mut app = app_with_session();
        app.mount();
        app.take_pending_task();
        let program = Program {
            id: ProgramId::new("p1"),
            title: "Spring Cohort".to_string(),
        };
        app.apply_load(match application {
            Some(application) => LoadOutcome::Prefilled {
                program,
                application,
            },
            None => LoadOutcome::Blank { program },
        });
        app
    }

    #[test]
    fn test_loading_indicator_shown_during_load() {
        let mut app = app_with_session();
        app.mount();
        let screen = render(&app);
        assert!(screen.contains("Loading..."));
        assert!(screen.contains("Signed in as Ada"));
    }

    #[test]
    fn test_form_shows_title_labels_and_counters() {
        let app = loaded(None);
        let screen = render(&app);
        assert!(screen.contains("Mentor Application | Spring Cohort"));
        for field in FieldId::ALL {
            assert!(screen.contains(field.label()), "{field:?}");
        }
        assert!(screen.contains("0 / 255"));
        assert!(screen.contains("[ Submit ]"));
        assert!(!screen.contains("Loading..."));
    }

    #[test]
    fn test_prefilled_values_are_rendered() {
        let app = loaded(Some(MentorApplication {
            category: Category::LifeSciences,
            expertise: "Neuroscience".to_string(),
            institution: "Institute".to_string(),
            position: "Postdoc".to_string(),
            bio: "First line\nSecond line".to_string(),
            slots: 7,
        }));
        let screen = render(&app);
        assert!(screen.contains("Life Sciences"));
        assert!(screen.contains("Neuroscience"));
        assert!(screen.contains("12 / 255"));
        assert!(screen.contains("Second line"));
    }

    #[test]
    fn test_required_messages_after_failed_submit() {
        let mut app = loaded(None);
        assert!(!render(&app).contains("Required"));
        app.request_submit();
        let screen = render(&app);
        assert_eq!(screen.matches("Required").count(), FieldId::ALL.len());
    }

    #[test]
    fn test_success_screen_replaces_form() {
        let mut app = loaded(Some(MentorApplication {
            category: Category::Other,
            expertise: "X".to_string(),
            institution: "Y".to_string(),
            position: "Z".to_string(),
            bio: "B".to_string(),
            slots: 3,
        }));
        app.request_submit();
        app.apply_submit(SubmitOutcome::Accepted);

        let screen = render(&app);
        assert!(screen.contains("Mentor application updated!"));
        assert!(screen.contains("program p1"));
        assert!(!screen.contains("[ Submit ]"));
        assert!(!screen.contains("Institution"));
    }

    #[test]
    fn test_login_modal_without_session() {
        let mut app = App::new(ProgramId::new("p1"), None);
        app.mount();
        let screen = render(&app);
        assert!(screen.contains("Sign in required"));
        assert!(screen.contains("Not signed in"));
    }

    #[test]
    fn test_help_popup() {
        let mut app = loaded(None);
        app.show_help();
        let screen = render(&app);
        assert!(screen.contains("Mentor Application Help"));
        assert!(screen.contains("MENTOR APPLICATION EDITOR"));
    }

    #[test]
    fn test_cursor_row_col() {
        assert_eq!(cursor_row_col("", 0), (0, 0));
        assert_eq!(cursor_row_col("abc", 2), (0, 2));
        assert_eq!(cursor_row_col("ab\ncd\nef", 4), (1, 1));
        assert_eq!(cursor_row_col("ab\n", 3), (1, 0));
    }

    #[test]
    fn test_centered_rect_clips_to_area() {
        let area = Rect::new(0, 0, 10, 4);
        assert_eq!(centered_rect(area, 20, 3), Rect::new(0, 0, 10, 3));
        assert_eq!(centered_rect(area, 4, 2), Rect::new(3, 1, 4, 2));
    }
}

use crate::application::{App, AppMode, Focus, ViewState};
use crate::domain::FieldId;
use crossterm::event::{KeyCode, KeyModifiers};

use super::ui::help_line_count;

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        // The login modal has no close action
        if app.requires_login() {
            return;
        }

        match app.mode {
            AppMode::Help => Self::handle_help_mode(app, key),
            AppMode::Normal => match app.view {
                ViewState::Editing => Self::handle_form_mode(app, key, modifiers),
                ViewState::Success { .. } => Self::handle_result_mode(app, key),
                ViewState::Loading | ViewState::Submitting => Self::handle_busy_mode(app, key),
            },
        }
    }

    fn handle_form_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('s') = key {
                app.request_submit();
            }
            return;
        }

        match key {
            KeyCode::Esc => {
                app.navigate_home();
            }
            KeyCode::F(1) => {
                app.show_help();
            }
            KeyCode::Tab => {
                app.focus_next();
            }
            KeyCode::BackTab => {
                app.focus_previous();
            }
            KeyCode::Enter => match app.focus {
                Focus::Submit => {
                    app.request_submit();
                }
                Focus::Field(field) if field.is_multiline() => {
                    app.insert_char('\n');
                }
                Focus::Field(_) => {
                    app.focus_next();
                }
            },
            KeyCode::Up => {
                if app.focus == Focus::Field(FieldId::Slots) {
                    app.step_slots(true);
                } else {
                    app.focus_previous();
                }
            }
            KeyCode::Down => {
                if app.focus == Focus::Field(FieldId::Slots) {
                    app.step_slots(false);
                } else {
                    app.focus_next();
                }
            }
            KeyCode::Left => {
                if app.focus == Focus::Field(FieldId::Category) {
                    app.cycle_category(false);
                } else {
                    app.move_cursor_left();
                }
            }
            KeyCode::Right => {
                if app.focus == Focus::Field(FieldId::Category) {
                    app.cycle_category(true);
                } else {
                    app.move_cursor_right();
                }
            }
            KeyCode::Home => {
                app.move_cursor_home();
            }
            KeyCode::End => {
                app.move_cursor_end();
            }
            KeyCode::Backspace => {
                app.backspace();
            }
            KeyCode::Delete => {
                app.delete();
            }
            KeyCode::Char(c) => match app.focus {
                Focus::Field(FieldId::Category) if c == ' ' => {
                    app.cycle_category(true);
                }
                Focus::Submit if c == ' ' => {
                    app.request_submit();
                }
                _ => {
                    app.insert_char(c);
                }
            },
            _ => {}
        }
    }

    fn handle_result_mode(app: &mut App, key: KeyCode) {
        if let KeyCode::Esc | KeyCode::Enter = key {
            app.navigate_home();
        }
    }

    fn handle_busy_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                app.navigate_home();
            }
            KeyCode::F(1) => {
                app.show_help();
            }
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        let last_line = help_line_count().saturating_sub(1);
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('q') => {
                app.close_help();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if app.help_scroll > 0 {
                    app.help_scroll -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll = (app.help_scroll + 1).min(last_line);
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll = (app.help_scroll + 5).min(last_line);
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }
}

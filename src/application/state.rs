//! Application state for the mentor application editor.
//!
//! `App` is the single owner of the view and form state. It never performs
//! I/O itself: loading and submitting are queued as a [`Task`] which the
//! workflow runner executes against the backend and feeds back through
//! [`App::apply_load`] and [`App::apply_submit`].

use crate::domain::{ApplicationForm, FieldId, MentorApplication, ProgramId, Session};

use super::workflow::{LoadOutcome, SubmitOutcome};

/// Represents the current input mode of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Form interaction
    Normal,
    /// Help screen is displayed
    Help,
}

/// The element of the form that receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(FieldId),
    Submit,
}

impl Focus {
    const ORDER: [Focus; 7] = [
        Focus::Field(FieldId::Category),
        Focus::Field(FieldId::Expertise),
        Focus::Field(FieldId::Institution),
        Focus::Field(FieldId::Position),
        Focus::Field(FieldId::Bio),
        Focus::Field(FieldId::Slots),
        Focus::Submit,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn previous(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.index() + len - 1) % len]
    }
}

/// Flavor of the confirmation screen. This editor only ever updates an
/// existing application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultMode {
    Edit,
}

/// Which screen is active. Exactly one at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Editing,
    Submitting,
    /// Terminal: the form is gone for the rest of the session.
    Success {
        program_id: ProgramId,
        mode: ResultMode,
    },
}

/// Work queued for the workflow runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    Load,
    Submit(MentorApplication),
}

/// Which branch the loader took. Not displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Prefilled,
    Blank,
    ProgramMissing,
    ProgramFailed,
    ApplicationFailed,
}

/// Why the last submit did not succeed. Not displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitFailure {
    Rejected { status: u16 },
    Failed(String),
}

/// Main application state for the editor screen.
///
/// # Examples
///
/// ```
/// use mentor_edit::application::{App, Task, ViewState};
/// use mentor_edit::domain::ProgramId;
///
/// let mut app = App::new(ProgramId::new("p1"), None);
/// assert!(app.mount());
/// assert!(app.is_loading);
/// assert_eq!(app.take_pending_task(), Some(Task::Load));
/// assert_eq!(app.view, ViewState::Loading);
/// ```
#[derive(Debug)]
pub struct App {
    /// Signed-in user, if any. Absent shows the login modal.
    pub session: Option<Session>,
    pub program_id: ProgramId,
    /// Blank until the program is loaded
    pub program_title: String,
    pub view: ViewState,
    /// Shared loading indicator for the title and form regions
    pub is_loading: bool,
    pub form: ApplicationForm,
    pub focus: Focus,
    /// Cursor position, in characters, within the focused text field
    pub cursor_position: usize,
    pub mode: AppMode,
    /// Scroll position in help text
    pub help_scroll: usize,
    pub load_status: Option<LoadStatus>,
    pub last_submit_failure: Option<SubmitFailure>,
    /// Set when the user navigates back to the home route
    pub exit_to_home: bool,
    pending: Option<Task>,
    mounted: bool,
}

impl App {
    /// Creates the editor for `program_id` on behalf of `session`.
    pub fn new(program_id: ProgramId, session: Option<Session>) -> Self {
        Self {
            session,
            program_id,
            program_title: String::new(),
            view: ViewState::Loading,
            is_loading: false,
            form: ApplicationForm::default(),
            focus: Focus::Field(FieldId::Category),
            cursor_position: 0,
            mode: AppMode::Normal,
            help_scroll: 0,
            load_status: None,
            last_submit_failure: None,
            exit_to_home: false,
            pending: None,
            mounted: false,
        }
    }

    /// Starts the one loader pass of this editor.
    ///
    /// Returns `false` if the editor was already mounted.
    pub fn mount(&mut self) -> bool {
        if self.mounted {
            return false;
        }
        self.mounted = true;
        self.view = ViewState::Loading;
        self.is_loading = true;
        self.pending = Some(Task::Load);
        true
    }

    /// Hands the queued task, if any, to the runner.
    pub fn take_pending_task(&mut self) -> Option<Task> {
        self.pending.take()
    }

    pub fn requires_login(&self) -> bool {
        self.session.is_none()
    }

    pub fn is_editable(&self) -> bool {
        self.view == ViewState::Editing
    }

    /// Applies the loader result and opens the form for editing.
    ///
    /// Failures leave the form blank without telling the user.
    pub fn apply_load(&mut self, outcome: LoadOutcome) {
        let status = match outcome {
            LoadOutcome::Prefilled {
                program,
                application,
            } => {
                self.program_title = program.title;
                self.form = ApplicationForm::from_application(&application);
                LoadStatus::Prefilled
            }
            LoadOutcome::Blank { program } => {
                self.program_title = program.title;
                LoadStatus::Blank
            }
            LoadOutcome::ApplicationFailed { program, .. } => {
                self.program_title = program.title;
                LoadStatus::ApplicationFailed
            }
            LoadOutcome::ProgramMissing => LoadStatus::ProgramMissing,
            LoadOutcome::ProgramFailed(_) => LoadStatus::ProgramFailed,
        };

        self.load_status = Some(status);
        self.is_loading = false;
        self.view = ViewState::Editing;
        self.set_focus(Focus::Field(FieldId::Category));
    }

    /// Validates the form and, if it passes, queues the update.
    ///
    /// On validation failure every offending field gets its message and
    /// nothing is queued. Returns whether a submit was queued.
    pub fn request_submit(&mut self) -> bool {
        if !self.is_editable() {
            return false;
        }

        match self.form.validate() {
            Ok(payload) => {
                self.view = ViewState::Submitting;
                self.is_loading = true;
                self.last_submit_failure = None;
                self.pending = Some(Task::Submit(payload));
                true
            }
            Err(errors) => {
                self.form.show_errors(errors);
                false
            }
        }
    }

    /// Applies the submitter result.
    ///
    /// Success is terminal. Anything else silently returns to the form with
    /// the entered values untouched so the user can resubmit.
    pub fn apply_submit(&mut self, outcome: SubmitOutcome) {
        match outcome {
            SubmitOutcome::Accepted => {
                self.view = ViewState::Success {
                    program_id: self.program_id.clone(),
                    mode: ResultMode::Edit,
                };
            }
            SubmitOutcome::Rejected { status } => {
                self.last_submit_failure = Some(SubmitFailure::Rejected { status });
                self.view = ViewState::Editing;
            }
            SubmitOutcome::Failed(error) => {
                self.last_submit_failure = Some(SubmitFailure::Failed(error.to_string()));
                self.view = ViewState::Editing;
            }
        }
        self.is_loading = false;
    }

    /// Back-navigation to the home route.
    pub fn navigate_home(&mut self) {
        self.exit_to_home = true;
    }

    pub fn show_help(&mut self) {
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }

    pub fn close_help(&mut self) {
        self.mode = AppMode::Normal;
    }

    /// Moves focus and places the cursor at the end of the new field.
    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.cursor_position = self.focused_text().map(|t| t.chars().count()).unwrap_or(0);
    }

    pub fn focus_next(&mut self) {
        self.set_focus(self.focus.next());
    }

    pub fn focus_previous(&mut self) {
        self.set_focus(self.focus.previous());
    }

    /// The focused field if it is edited by typing.
    pub fn focused_text_field(&self) -> Option<FieldId> {
        match self.focus {
            Focus::Field(field) if field.accepts_text() => Some(field),
            _ => None,
        }
    }

    fn focused_text(&self) -> Option<&str> {
        self.focused_text_field()
            .and_then(|field| self.form.text(field))
    }

    /// Types a character at the cursor of the focused text field.
    pub fn insert_char(&mut self, ch: char) {
        if !self.is_editable() {
            return;
        }
        if let Some(field) = self.focused_text_field() {
            if let Ok(true) = self.form.insert_char(field, self.cursor_position, ch) {
                self.cursor_position += 1;
            }
        }
    }

    /// Deletes the character before the cursor.
    pub fn backspace(&mut self) {
        if !self.is_editable() || self.cursor_position == 0 {
            return;
        }
        if let Some(field) = self.focused_text_field() {
            if let Ok(true) = self.form.remove_char(field, self.cursor_position - 1) {
                self.cursor_position -= 1;
            }
        }
    }

    /// Deletes the character under the cursor.
    pub fn delete(&mut self) {
        if !self.is_editable() {
            return;
        }
        if let Some(field) = self.focused_text_field() {
            let _ = self.form.remove_char(field, self.cursor_position);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        let len = self.focused_text().map(|t| t.chars().count()).unwrap_or(0);
        if self.cursor_position < len {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.focused_text().map(|t| t.chars().count()).unwrap_or(0);
    }

    /// Cycles the category selector when it has focus.
    pub fn cycle_category(&mut self, forward: bool) {
        if self.is_editable() && self.focus == Focus::Field(FieldId::Category) {
            self.form.cycle_category(forward);
        }
    }

    /// Steps the slots value when it has focus.
    pub fn step_slots(&mut self, up: bool) {
        if self.is_editable() && self.focus == Focus::Field(FieldId::Slots) {
            self.form.step_slots(up);
            self.move_cursor_end();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, FieldError, Program};
    use crate::infrastructure::ApiError;

    fn program() -> Program {
        Program {
            id: ProgramId::new("p1"),
            title: "Summer Mentorship".to_string(),
        }
    }

    fn existing() -> MentorApplication {
        MentorApplication {
            category: Category::Other,
            expertise: "X".to_string(),
            institution: "Y".to_string(),
            position: "Z".to_string(),
            bio: "B".to_string(),
            slots: 3,
        }
    }

    fn session() -> Session {
        Session {
            user_id: "u1".to_string(),
            display_name: "Ada".to_string(),
            token: "t".to_string(),
        }
    }

    fn editing_app() -> App {
        let mut app = App::new(ProgramId::new("p1"), Some(session()));
        app.mount();
        app.take_pending_task();
        app.apply_load(LoadOutcome::Blank { program: program() });
        app
    }

    #[test]
    fn test_app_new() {
        let app = App::new(ProgramId::new("p1"), None);
        assert_eq!(app.view, ViewState::Loading);
        assert!(!app.is_loading);
        assert!(app.program_title.is_empty());
        assert!(app.form.is_blank());
        assert!(app.requires_login());
        assert!(matches!(app.mode, AppMode::Normal));
        assert!(!app.exit_to_home);
    }

    #[test]
    fn test_mount_runs_once() {
        let mut app = App::new(ProgramId::new("p1"), Some(session()));
        assert!(app.mount());
        assert_eq!(app.take_pending_task(), Some(Task::Load));
        assert!(!app.mount());
        assert_eq!(app.take_pending_task(), None);
    }

    #[test]
    fn test_blank_load_leaves_fields_empty() {
        let app = editing_app();
        assert_eq!(app.view, ViewState::Editing);
        assert!(!app.is_loading);
        assert!(app.form.is_blank());
        assert_eq!(app.program_title, "Summer Mentorship");
        assert_eq!(app.load_status, Some(LoadStatus::Blank));
    }

    #[test]
    fn test_prefilled_load_copies_every_field() {
        let mut app = App::new(ProgramId::new("p1"), Some(session()));
        app.mount();
        app.apply_load(LoadOutcome::Prefilled {
            program: program(),
            application: existing(),
        });

        assert_eq!(app.form.category, Some(Category::Other));
        assert_eq!(app.form.expertise, "X");
        assert_eq!(app.form.institution, "Y");
        assert_eq!(app.form.position, "Z");
        assert_eq!(app.form.bio, "B");
        assert_eq!(app.form.slots, "3");
        assert_eq!(app.form.validate().unwrap(), existing());
    }

    #[test]
    fn test_missing_program_keeps_title_blank_but_editable() {
        let mut app = App::new(ProgramId::new("p1"), Some(session()));
        app.mount();
        app.apply_load(LoadOutcome::ProgramMissing);

        assert!(app.program_title.is_empty());
        assert!(app.is_editable());
        assert!(!app.is_loading);
        assert_eq!(app.load_status, Some(LoadStatus::ProgramMissing));
    }

    #[test]
    fn test_application_failure_keeps_title() {
        let mut app = App::new(ProgramId::new("p1"), Some(session()));
        app.mount();
        app.apply_load(LoadOutcome::ApplicationFailed {
            program: program(),
            error: ApiError::Status { status: 503 },
        });

        assert_eq!(app.program_title, "Summer Mentorship");
        assert!(app.form.is_blank());
        assert_eq!(app.load_status, Some(LoadStatus::ApplicationFailed));
    }

    #[test]
    fn test_invalid_submit_shows_required_and_queues_nothing() {
        let mut app = editing_app();
        assert!(!app.request_submit());

        assert_eq!(app.view, ViewState::Editing);
        assert!(app.take_pending_task().is_none());
        for field in FieldId::ALL {
            assert_eq!(app.form.error(field), Some(FieldError::Required));
        }
    }

    #[test]
    fn test_valid_submit_queues_payload() {
        let mut app = editing_app();
        app.form = ApplicationForm::from_application(&existing());

        assert!(app.request_submit());
        assert_eq!(app.view, ViewState::Submitting);
        assert!(app.is_loading);
        assert_eq!(app.take_pending_task(), Some(Task::Submit(existing())));

        // Only one submit may be outstanding
        assert!(!app.request_submit());
    }

    #[test]
    fn test_accepted_submit_is_terminal_success() {
        let mut app = editing_app();
        app.form = ApplicationForm::from_application(&existing());
        app.request_submit();
        app.apply_submit(SubmitOutcome::Accepted);

        assert_eq!(
            app.view,
            ViewState::Success {
                program_id: ProgramId::new("p1"),
                mode: ResultMode::Edit,
            }
        );
        assert!(!app.is_loading);
        assert!(!app.request_submit());
    }

    #[test]
    fn test_rejected_submit_returns_to_form_with_values() {
        let mut app = editing_app();
        app.form = ApplicationForm::from_application(&existing());
        app.request_submit();
        app.take_pending_task();
        app.apply_submit(SubmitOutcome::Rejected { status: 422 });

        assert_eq!(app.view, ViewState::Editing);
        assert!(!app.is_loading);
        assert_eq!(
            app.last_submit_failure,
            Some(SubmitFailure::Rejected { status: 422 })
        );
        assert_eq!(app.form.validate().unwrap(), existing());

        // Retry is possible
        assert!(app.request_submit());
        assert!(app.last_submit_failure.is_none());
    }

    #[test]
    fn test_typing_respects_cursor() {
        let mut app = editing_app();
        app.set_focus(Focus::Field(FieldId::Expertise));
        for ch in "AC".chars() {
            app.insert_char(ch);
        }
        app.move_cursor_left();
        app.insert_char('B');
        assert_eq!(app.form.expertise, "ABC");
        assert_eq!(app.cursor_position, 2);

        app.backspace();
        assert_eq!(app.form.expertise, "AC");
        app.move_cursor_home();
        app.delete();
        assert_eq!(app.form.expertise, "C");
        app.move_cursor_end();
        assert_eq!(app.cursor_position, 1);
    }

    #[test]
    fn test_no_editing_while_loading() {
        let mut app = App::new(ProgramId::new("p1"), Some(session()));
        app.mount();
        app.set_focus(Focus::Field(FieldId::Expertise));
        app.insert_char('A');
        assert!(app.form.expertise.is_empty());
    }

    #[test]
    fn test_focus_wraps_through_submit() {
        let mut app = editing_app();
        assert_eq!(app.focus, Focus::Field(FieldId::Category));
        app.focus_previous();
        assert_eq!(app.focus, Focus::Submit);
        app.focus_next();
        assert_eq!(app.focus, Focus::Field(FieldId::Category));
        assert!(app.focused_text_field().is_none());
    }

    #[test]
    fn test_category_and_slots_controls_need_focus() {
        let mut app = editing_app();
        app.step_slots(true);
        assert!(app.form.slots.is_empty());
        app.cycle_category(true);
        assert_eq!(app.form.category, Some(Category::Engineering));

        app.set_focus(Focus::Field(FieldId::Slots));
        app.step_slots(true);
        assert_eq!(app.form.slots, "1");
        assert_eq!(app.cursor_position, 1);
    }

    #[test]
    fn test_help_mode_transitions() {
        let mut app = editing_app();
        app.help_scroll = 4;
        app.show_help();
        assert_eq!(app.mode, AppMode::Help);
        assert_eq!(app.help_scroll, 0);
        app.close_help();
        assert_eq!(app.mode, AppMode::Normal);
    }
}

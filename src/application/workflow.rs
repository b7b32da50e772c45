//! Loader and submitter for the editor.
//!
//! Both run synchronously against a [`MentorshipApi`] and return a single
//! outcome value whose variants spell out every success and failure branch.
//! The user never sees the failure branches; they are logged and recorded
//! on the [`App`] instead.

use tracing::{info, warn};

use crate::domain::{MentorApplication, Program, ProgramId};
use crate::infrastructure::{ApiError, MentorshipApi};

use super::state::{App, Task};

/// HTTP status the backend answers a successful update with.
pub const SUBMIT_SUCCESS_STATUS: u16 = 200;

/// Result of the two-step load: program first, then the user's application.
#[derive(Debug)]
pub enum LoadOutcome {
    Prefilled {
        program: Program,
        application: MentorApplication,
    },
    Blank {
        program: Program,
    },
    ProgramMissing,
    ProgramFailed(ApiError),
    ApplicationFailed {
        program: Program,
        error: ApiError,
    },
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Accepted,
    Rejected { status: u16 },
    Failed(ApiError),
}

/// Fetches the program and, only if it exists, the user's application for it.
pub fn load_application_editor<A>(api: &A, program_id: &ProgramId) -> LoadOutcome
where
    A: MentorshipApi + ?Sized,
{
    let program = match api.fetch_program(program_id) {
        Ok(Some(program)) => program,
        Ok(None) => {
            warn!(program = %program_id, "program not found; leaving form blank");
            return LoadOutcome::ProgramMissing;
        }
        Err(error) => {
            warn!(program = %program_id, %error, "program fetch failed; leaving form blank");
            return LoadOutcome::ProgramFailed(error);
        }
    };

    match api.fetch_application(program_id) {
        Ok(Some(application)) => {
            info!(program = %program_id, "loaded existing mentor application");
            LoadOutcome::Prefilled {
                program,
                application,
            }
        }
        Ok(None) => {
            info!(program = %program_id, "no existing mentor application");
            LoadOutcome::Blank { program }
        }
        Err(error) => {
            warn!(program = %program_id, %error, "application fetch failed; leaving form blank");
            LoadOutcome::ApplicationFailed { program, error }
        }
    }
}

/// Sends the update. Only a 200 answer counts as success.
pub fn submit_mentor_application<A>(
    api: &A,
    program_id: &ProgramId,
    payload: &MentorApplication,
) -> SubmitOutcome
where
    A: MentorshipApi + ?Sized,
{
    match api.submit_application(program_id, payload) {
        Ok(SUBMIT_SUCCESS_STATUS) => {
            info!(program = %program_id, "mentor application updated");
            SubmitOutcome::Accepted
        }
        Ok(status) => {
            warn!(program = %program_id, status, "mentor application update rejected");
            SubmitOutcome::Rejected { status }
        }
        Err(error) => {
            warn!(program = %program_id, %error, "mentor application update failed");
            SubmitOutcome::Failed(error)
        }
    }
}

/// Executes the editor's queued task, if any, and applies its outcome.
///
/// Returns `true` when a task ran.
pub fn run_pending_task<A>(app: &mut App, api: &A) -> bool
where
    A: MentorshipApi + ?Sized,
{
    match app.take_pending_task() {
        Some(Task::Load) => {
            let outcome = load_application_editor(api, &app.program_id);
            app.apply_load(outcome);
            true
        }
        Some(Task::Submit(payload)) => {
            let outcome = submit_mentor_application(api, &app.program_id, &payload);
            app.apply_submit(outcome);
            true
        }
        None => false,
    }
}

//! Backend access for the mentor application editor.
//!
//! [`MentorshipApi`] is the seam between the editor workflow and the network;
//! [`HttpMentorshipApi`] is the production implementation on top of a blocking
//! `reqwest` client.

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::domain::{MentorApplication, Program, ProgramId, Session};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response status {status}")]
    Status { status: u16 },
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("cannot build request URL from {0}")]
    InvalidUrl(String),
}

/// Operations the editor needs from the mentorship backend.
///
/// Fetches return `Ok(None)` when the resource does not exist. The application
/// calls are scoped to whichever user the implementation authenticates as.
pub trait MentorshipApi {
    fn fetch_program(&self, program_id: &ProgramId) -> Result<Option<Program>, ApiError>;

    fn fetch_application(
        &self,
        program_id: &ProgramId,
    ) -> Result<Option<MentorApplication>, ApiError>;

    /// Sends the update payload and returns the HTTP status the backend answered with.
    fn submit_application(
        &self,
        program_id: &ProgramId,
        payload: &MentorApplication,
    ) -> Result<u16, ApiError>;
}

/// HTTP implementation of [`MentorshipApi`].
pub struct HttpMentorshipApi {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpMentorshipApi {
    /// Creates a client rooted at `base_url`, authenticating with the session's
    /// bearer token when a session is present.
    pub fn new(base_url: Url, session: Option<&Session>) -> Result<Self, ApiError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url,
            token: session.map(|session| session.token.clone()),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn application_url(&self, program_id: &ProgramId) -> Result<Url, ApiError> {
        self.endpoint(&["programs", program_id.as_str(), "mentor", "application"])
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn get_optional<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>, ApiError> {
        debug!(%url, "GET");
        let response = self.authorize(self.client.get(url)).send()?;
        decode_optional(response)
    }
}

/// Treats 404, an empty body and a JSON `null` as an absent resource.
fn decode_optional<T: DeserializeOwned>(response: Response) -> Result<Option<T>, ApiError> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
        });
    }

    let body = response.text()?;
    if body.trim().is_empty() {
        return Ok(None);
    }
    Ok(serde_json::from_str::<Option<T>>(&body)?)
}

impl MentorshipApi for HttpMentorshipApi {
    fn fetch_program(&self, program_id: &ProgramId) -> Result<Option<Program>, ApiError> {
        let url = self.endpoint(&["programs", program_id.as_str()])?;
        self.get_optional(url)
    }

    fn fetch_application(
        &self,
        program_id: &ProgramId,
    ) -> Result<Option<MentorApplication>, ApiError> {
        let url = self.application_url(program_id)?;
        self.get_optional(url)
    }

    fn submit_application(
        &self,
        program_id: &ProgramId,
        payload: &MentorApplication,
    ) -> Result<u16, ApiError> {
        let url = self.application_url(program_id)?;
        debug!(%url, "PUT");
        let body = serde_json::to_vec(payload)?;
        let response = self
            .authorize(self.client.put(url))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()?;
        Ok(response.status().as_u16())
    }
}

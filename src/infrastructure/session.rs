use crate::domain::Session;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("cannot read session file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid session file {path} - {source}")]
    Format {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Reads the signed-in user's session from a JSON file written by the login flow.
pub struct SessionRepository;

impl SessionRepository {
    /// Loads the session stored at `path`.
    ///
    /// A missing file means nobody is signed in and yields `Ok(None)`.
    pub fn load(path: &Path) -> Result<Option<Session>, SessionError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(SessionError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_str::<Session>(&content)
            .map(Some)
            .map_err(|source| SessionError::Format {
                path: path.to_path_buf(),
                source,
            })
    }
}

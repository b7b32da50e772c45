use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::DomainError;

/// External identifier of a mentorship program.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgramId(String);

impl ProgramId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Program metadata shown in the editor title. Read-only in this flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub id: ProgramId,
    pub title: String,
}

/// Field of expertise a mentor applies under.
///
/// The declaration order is the order options are offered in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "ENGINEERING")]
    Engineering,
    #[serde(rename = "COMPUTER_SCIENCE")]
    ComputerScience,
    #[serde(rename = "LIFE_SCIENCES")]
    LifeSciences,
    #[serde(rename = "DATASCIENCE_AND_AI")]
    DataScienceAndAi,
    #[serde(rename = "PHYSICAL_SCIENCE")]
    PhysicalScience,
    #[serde(rename = "OTHER")]
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Engineering,
        Category::ComputerScience,
        Category::LifeSciences,
        Category::DataScienceAndAi,
        Category::PhysicalScience,
        Category::Other,
    ];

    /// Wire value used by the backend.
    pub fn code(self) -> &'static str {
        match self {
            Category::Engineering => "ENGINEERING",
            Category::ComputerScience => "COMPUTER_SCIENCE",
            Category::LifeSciences => "LIFE_SCIENCES",
            Category::DataScienceAndAi => "DATASCIENCE_AND_AI",
            Category::PhysicalScience => "PHYSICAL_SCIENCE",
            Category::Other => "OTHER",
        }
    }

    /// Human-readable option label.
    pub fn label(self) -> &'static str {
        match self {
            Category::Engineering => "Engineering",
            Category::ComputerScience => "Computer Science",
            Category::LifeSciences => "Life Sciences",
            Category::DataScienceAndAi => "Data Science and AI",
            Category::PhysicalScience => "Physical Science",
            Category::Other => "Other",
        }
    }

    fn position(self) -> usize {
        Self::ALL
            .iter()
            .position(|candidate| *candidate == self)
            .unwrap_or(0)
    }

    /// The option after this one, wrapping around to the first.
    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    /// The option before this one, wrapping around to the last.
    pub fn previous(self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.position() + len - 1) % len]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.code() == s)
            .ok_or_else(|| DomainError::UnknownCategory(s.to_string()))
    }
}

/// A user's mentor application for a single program.
///
/// This is also the update payload: the six fields are sent verbatim when the
/// form is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentorApplication {
    pub category: Category,
    pub expertise: String,
    pub institution: String,
    pub position: String,
    pub bio: String,
    pub slots: u32,
}

/// The signed-in user on whose behalf requests are made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub display_name: String,
    pub token: String,
}

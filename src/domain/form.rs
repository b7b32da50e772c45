//! Editable form model for a mentor application.
//!
//! The form holds raw user input for each of the six application fields and
//! knows how to turn it into a [`MentorApplication`] once every field passes
//! validation. Input constraints (option-only category, length-limited text,
//! digit-only slots) are enforced as characters are typed, so validation only
//! has to deal with missing or out-of-range values.

use std::collections::BTreeMap;

use super::errors::{DomainError, DomainResult, FieldError};
use super::models::{Category, MentorApplication};

/// Maximum length, in characters, of the single-line text fields.
pub const MAX_TEXT_LENGTH: usize = 255;

/// Identifies one of the six application fields.
///
/// The declaration order is the on-screen order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldId {
    Category,
    Expertise,
    Institution,
    Position,
    Bio,
    Slots,
}

impl FieldId {
    pub const ALL: [FieldId; 6] = [
        FieldId::Category,
        FieldId::Expertise,
        FieldId::Institution,
        FieldId::Position,
        FieldId::Bio,
        FieldId::Slots,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FieldId::Category => "Category",
            FieldId::Expertise => "Expertise",
            FieldId::Institution => "Institution",
            FieldId::Position => "Current Position",
            FieldId::Bio => "Bio",
            FieldId::Slots => "Number of Mentee Slots",
        }
    }

    /// Character limit enforced while typing, if any.
    pub fn max_length(self) -> Option<usize> {
        match self {
            FieldId::Expertise | FieldId::Institution | FieldId::Position => Some(MAX_TEXT_LENGTH),
            FieldId::Category | FieldId::Bio | FieldId::Slots => None,
        }
    }

    pub fn is_multiline(self) -> bool {
        matches!(self, FieldId::Bio)
    }

    /// Whether the field is edited by typing (everything except the category selector).
    pub fn accepts_text(self) -> bool {
        !matches!(self, FieldId::Category)
    }
}

/// Field-local validation failures keyed by field.
pub type ValidationErrors = BTreeMap<FieldId, FieldError>;

/// Current values and validation state of the application form.
///
/// # Examples
///
/// ```
/// use mentor_edit::domain::{ApplicationForm, FieldError, FieldId};
///
/// let form = ApplicationForm::default();
/// let errors = form.validate().unwrap_err();
/// assert_eq!(errors.len(), 6);
/// assert_eq!(errors[&FieldId::Slots], FieldError::Required);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationForm {
    pub category: Option<Category>,
    pub expertise: String,
    pub institution: String,
    pub position: String,
    pub bio: String,
    /// Raw digits as typed; parsed at validation time.
    pub slots: String,
    errors: ValidationErrors,
}

impl ApplicationForm {
    /// Builds a form pre-populated with every field of an existing application.
    pub fn from_application(application: &MentorApplication) -> Self {
        Self {
            category: Some(application.category),
            expertise: application.expertise.clone(),
            institution: application.institution.clone(),
            position: application.position.clone(),
            bio: application.bio.clone(),
            slots: application.slots.to_string(),
            errors: ValidationErrors::new(),
        }
    }

    /// Returns the text value of a typed field, or `None` for the category selector.
    pub fn text(&self, field: FieldId) -> Option<&str> {
        match field {
            FieldId::Category => None,
            FieldId::Expertise => Some(&self.expertise),
            FieldId::Institution => Some(&self.institution),
            FieldId::Position => Some(&self.position),
            FieldId::Bio => Some(&self.bio),
            FieldId::Slots => Some(&self.slots),
        }
    }

    fn text_mut(&mut self, field: FieldId) -> DomainResult<&mut String> {
        match field {
            FieldId::Category => Err(DomainError::NotATextField(field)),
            FieldId::Expertise => Ok(&mut self.expertise),
            FieldId::Institution => Ok(&mut self.institution),
            FieldId::Position => Ok(&mut self.position),
            FieldId::Bio => Ok(&mut self.bio),
            FieldId::Slots => Ok(&mut self.slots),
        }
    }

    /// Number of characters in a typed field (0 for the category selector).
    pub fn char_count(&self, field: FieldId) -> usize {
        self.text(field).map(|text| text.chars().count()).unwrap_or(0)
    }

    /// True when no field holds a value.
    pub fn is_blank(&self) -> bool {
        self.category.is_none() && FieldId::ALL.iter().all(|field| self.char_count(*field) == 0)
    }

    /// Inserts `ch` at character index `index` of a typed field.
    ///
    /// Returns `Ok(false)` when the character is refused by the field's input
    /// constraint: a full single-line field, a newline outside the bio, or a
    /// non-digit in the slots field.
    pub fn insert_char(&mut self, field: FieldId, index: usize, ch: char) -> DomainResult<bool> {
        let allowed = match field {
            FieldId::Slots => ch.is_ascii_digit(),
            FieldId::Bio => ch == '\n' || !ch.is_control(),
            _ => !ch.is_control(),
        };
        if !allowed {
            return Ok(false);
        }
        if let Some(max) = field.max_length() {
            if self.char_count(field) >= max {
                return Ok(false);
            }
        }

        let text = self.text_mut(field)?;
        let byte_index = byte_offset(text, index);
        text.insert(byte_index, ch);
        self.mark_changed(field);
        Ok(true)
    }

    /// Removes the character at character index `index` of a typed field.
    ///
    /// Returns `Ok(false)` if the index is past the end.
    pub fn remove_char(&mut self, field: FieldId, index: usize) -> DomainResult<bool> {
        let text = self.text_mut(field)?;
        if index >= text.chars().count() {
            return Ok(false);
        }
        let byte_index = byte_offset(text, index);
        text.remove(byte_index);
        self.mark_changed(field);
        Ok(true)
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = Some(category);
        self.mark_changed(FieldId::Category);
    }

    /// Moves the category selection one option forward or backward.
    ///
    /// With nothing selected, forward picks the first option and backward the last.
    pub fn cycle_category(&mut self, forward: bool) {
        let category = match (self.category, forward) {
            (Some(current), true) => current.next(),
            (Some(current), false) => current.previous(),
            (None, true) => Category::ALL[0],
            (None, false) => Category::ALL[Category::ALL.len() - 1],
        };
        self.set_category(category);
    }

    /// Steps the slots value up or down, never going below 1.
    pub fn step_slots(&mut self, up: bool) {
        let next = match self.slots.parse::<u32>() {
            Ok(current) if up => current.saturating_add(1).max(1),
            Ok(current) => current.saturating_sub(1).max(1),
            Err(_) => 1,
        };
        self.slots = next.to_string();
        self.mark_changed(FieldId::Slots);
    }

    /// Checks a single field against its rules.
    pub fn validate_field(&self, field: FieldId) -> Option<FieldError> {
        match field {
            FieldId::Category => self.category.is_none().then_some(FieldError::Required),
            FieldId::Slots => match self.slots.parse::<u32>() {
                _ if self.slots.is_empty() => Some(FieldError::Required),
                Ok(0) => Some(FieldError::BelowMinimum),
                Ok(_) => None,
                Err(_) => Some(FieldError::NotANumber),
            },
            _ => {
                let count = self.char_count(field);
                match field.max_length() {
                    _ if count == 0 => Some(FieldError::Required),
                    Some(max) if count > max => Some(FieldError::TooLong { max }),
                    _ => None,
                }
            }
        }
    }

    /// Validates every field and, if all pass, produces the update payload.
    pub fn validate(&self) -> Result<MentorApplication, ValidationErrors> {
        let errors: ValidationErrors = FieldId::ALL
            .iter()
            .filter_map(|field| self.validate_field(*field).map(|error| (*field, error)))
            .collect();

        match (self.category, self.slots.parse::<u32>()) {
            (Some(category), Ok(slots)) if errors.is_empty() => Ok(MentorApplication {
                category,
                expertise: self.expertise.clone(),
                institution: self.institution.clone(),
                position: self.position.clone(),
                bio: self.bio.clone(),
                slots,
            }),
            _ => Err(errors),
        }
    }

    /// Replaces the displayed errors with the result of a submit-time validation.
    pub fn show_errors(&mut self, errors: ValidationErrors) {
        self.errors = errors;
    }

    pub fn error(&self, field: FieldId) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    // Edited fields are re-validated on every change.
    fn mark_changed(&mut self, field: FieldId) {
        match self.validate_field(field) {
            Some(error) => self.errors.insert(field, error),
            None => self.errors.remove(&field),
        };
    }
}

fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}

//! The three-field user form and its validation rules.

use regex::Regex;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::record::UserRecord;

/// Why a form could not be submitted.
///
/// The display text is the alert shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Invalid {
    /// One or more of name, phone, and age is empty.
    #[error("All fields are required")]
    MissingFields,
    /// The age field is not a whole number.
    #[error("Age must be a number")]
    AgeNotNumber,
    /// The phone field is empty.
    #[error("Phone number is required")]
    MissingPhone,
    /// The phone field does not match the configured rule.
    #[error("Phone number is invalid")]
    PhoneFormat,
}

/// Rule a phone number must satisfy before it is used as a key.
#[derive(Debug, Clone)]
pub struct PhoneRule {
    pattern: Regex,
}

impl PhoneRule {
    /// Compile a phone rule from a regex pattern.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigValidation`] if the pattern is not a valid regex.
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| Error::ConfigValidation {
            message: format!("invalid regex pattern: {e}"),
        })?;
        Ok(Self { pattern })
    }

    /// Check a phone number against the rule.
    #[must_use]
    pub fn accepts(&self, phone: &str) -> bool {
        self.pattern.is_match(phone)
    }
}

/// Validated form contents, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Display name.
    pub name: String,
    /// Phone number (document key).
    pub phone: String,
    /// Parsed age.
    pub age: u32,
}

/// The raw text of the three form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserForm {
    /// Name field.
    pub name: String,
    /// Phone number field.
    pub phone: String,
    /// Age field, as typed.
    pub age: String,
}

impl UserForm {
    /// Create a form with the given field contents.
    #[must_use]
    pub fn new(name: impl Into<String>, phone: impl Into<String>, age: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            age: age.into(),
        }
    }

    /// Validate the form for an insert.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule: missing fields, then a non-numeric
    /// age, then a phone number rejected by `rule`.
    pub fn validate_for_insert(
        &self,
        rule: &PhoneRule,
    ) -> std::result::Result<Submission, Invalid> {
        if self.name.is_empty() || self.phone.is_empty() || self.age.is_empty() {
            return Err(Invalid::MissingFields);
        }

        let age = parse_age(&self.age).ok_or(Invalid::AgeNotNumber)?;

        if !rule.accepts(&self.phone) {
            return Err(Invalid::PhoneFormat);
        }

        Ok(Submission {
            name: self.name.clone(),
            phone: self.phone.clone(),
            age,
        })
    }

    /// Validate the form for an update.
    ///
    /// An update writes the same fields as an insert, so the same rules apply.
    /// This is stricter than a bare patch: a non-numeric age or a malformed
    /// phone number never reaches the store.
    ///
    /// # Errors
    ///
    /// See [`UserForm::validate_for_insert`].
    pub fn validate_for_update(
        &self,
        rule: &PhoneRule,
    ) -> std::result::Result<Submission, Invalid> {
        self.validate_for_insert(rule)
    }

    /// Return the phone number, or an error if it is empty.
    ///
    /// # Errors
    ///
    /// Returns [`Invalid::MissingPhone`] if the phone field is empty.
    pub fn require_phone(&self) -> std::result::Result<&str, Invalid> {
        if self.phone.is_empty() {
            Err(Invalid::MissingPhone)
        } else {
            Ok(&self.phone)
        }
    }

    /// Reset all fields to empty.
    pub fn clear(&mut self) {
        self.name.clear();
        self.phone.clear();
        self.age.clear();
    }

    /// Load a stored record into the fields.
    pub fn fill_from(&mut self, record: &UserRecord) {
        self.name.clone_from(&record.name);
        self.phone.clone_from(&record.phone);
        self.age = record.age.to_string();
    }

    /// Check whether every field is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.phone.is_empty() && self.age.is_empty()
    }
}

/// Parse an age field: a whole, non-negative number, surrounding whitespace
/// ignored.
fn parse_age(text: &str) -> Option<u32> {
    text.trim().parse().ok()
}

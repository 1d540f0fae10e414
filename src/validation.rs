//! Request validation.
//!
//! Every request type with input rules implements [`Validate`]. Rules are
//! collected with [`Checks`], which evaluates all of them and reports every
//! failing field at once.

use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::error::ApiError;

/// One failed rule, as reported to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// An error not tied to a single input field
    pub fn general(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }
}

pub trait Validate {
    fn validate(&self) -> Result<(), ApiError>;
}

#[derive(Debug, Default)]
pub struct Checks {
    errors: Vec<FieldError>,
}

impl Checks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field must be present and not the empty string
    pub fn not_empty(self, field: &str, value: Option<&str>, message: &str) -> Self {
        let ok = value.is_some_and(|v| !v.is_empty());
        self.check(ok, field, message)
    }

    /// Well-formed address whose domain carries a top-level label
    pub fn email(self, field: &str, value: Option<&str>, message: &str) -> Self {
        let ok = value.is_some_and(|v| v.validate_email() && has_top_level_domain(v));
        self.check(ok, field, message)
    }

    /// Field must hold at least `min` characters
    pub fn min_chars(self, field: &str, value: Option<&str>, min: usize, message: &str) -> Self {
        let ok = value.is_some_and(|v| v.chars().count() >= min);
        self.check(ok, field, message)
    }

    pub fn check(mut self, ok: bool, field: &str, message: &str) -> Self {
        if !ok {
            self.errors.push(FieldError::new(field, message));
        }
        self
    }

    pub fn finish(self) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error(self.errors))
        }
    }
}

/// `a@localhost` is well-formed but not routable
fn has_top_level_domain(email: &str) -> bool {
    email
        .rsplit_once('@')
        .is_some_and(|(_, domain)| domain.contains('.') && domain.split('.').all(|label| !label.is_empty()))
}

/// Treats an explicit `null` like a missing field
pub fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

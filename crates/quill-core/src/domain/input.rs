//! Request input for creating or replacing a post, and its validation rules.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use super::PostDraft;

/// Untrusted `{title, body}` payload as it arrives from a client.
///
/// The same rule set guards both create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PostInput {
    #[validate(
        required(message = "The title field is required."),
        length(
            max = 255,
            message = "The title field must not be greater than 255 characters."
        )
    )]
    pub title: Option<String>,

    #[validate(required(message = "The body field is required."))]
    pub body: Option<String>,
}

impl PostInput {
    /// Field names in rule order; errors are reported in this order.
    pub const FIELDS: [&'static str; 2] = ["title", "body"];

    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            body: Some(body.into()),
        }
    }

    /// Trim both fields and treat blank strings as absent.
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            title: clean(self.title),
            body: clean(self.body),
        }
    }

    /// Normalize, check every rule and hand back a draft ready for persistence.
    pub fn validate_into_draft(self) -> Result<PostDraft, FieldErrors> {
        let input = self.normalized();
        input
            .validate()
            .map_err(|e| FieldErrors::from_validation(e, &Self::FIELDS))?;

        // `required` passed, so both are present.
        input
            .title
            .zip(input.body)
            .map(|(title, body)| PostDraft { title, body })
            .ok_or_else(FieldErrors::default)
    }
}

/// Per-field validation messages, in the order the fields were checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<(String, Vec<String>)>);

impl FieldErrors {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }

    /// Collect `validator` failures, listing `order` fields first and any others by name.
    pub fn from_validation(errors: ValidationErrors, order: &[&str]) -> Self {
        let mut failed: Vec<_> = errors.field_errors().into_iter().collect();
        failed.sort_by_key(|(field, _)| {
            let field: &str = field.as_ref();
            (
                order.iter().position(|o| *o == field).unwrap_or(order.len()),
                field.to_string(),
            )
        });

        let mut fields = Self::default();
        for (field, failures) in failed {
            for failure in failures {
                let message = failure
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("The {field} field is invalid ({}).", failure.code));
                fields.add(field.to_string(), message);
            }
        }
        fields
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        match self.0.iter_mut().find(|(name, _)| *name == field) {
            Some((_, messages)) => messages.push(message.into()),
            None => self.0.push((field, vec![message.into()])),
        }
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, messages)| messages.as_slice())
    }

    pub fn into_pairs(self) -> Vec<(String, Vec<String>)> {
        self.0
    }

    /// Total number of messages across all fields.
    pub fn count(&self) -> usize {
        self.0.iter().map(|(_, messages)| messages.len()).sum()
    }

    /// First message, followed by how many more there are.
    ///
    /// `"The title field is required. (and 1 more error)"`
    pub fn summary(&self) -> String {
        let Some(first) = self.0.iter().flat_map(|(_, messages)| messages).next() else {
            return "The given data was invalid.".to_string();
        };

        match self.count() - 1 {
            0 => first.clone(),
            1 => format!("{first} (and 1 more error)"),
            n => format!("{first} (and {n} more errors)"),
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

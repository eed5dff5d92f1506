//! The `{data, message, status}` envelope every posts endpoint answers with.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Successful response wrapper. `status` repeats the HTTP status code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub message: String,
    pub status: u16,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self::with_status(200, data, message)
    }

    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self::with_status(201, data, message)
    }

    pub fn with_status(status: u16, data: T, message: impl Into<String>) -> Self {
        Self {
            data: Some(data),
            message: message.into(),
            status,
        }
    }
}

impl ApiResponse<()> {
    /// An envelope with no `data` member, e.g. after a delete.
    pub fn message_only(status: u16, message: impl Into<String>) -> Self {
        Self {
            data: None,
            message: message.into(),
            status,
        }
    }
}

/// Validation messages keyed by field, kept in the order the fields were checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMessages(pub Vec<(String, Vec<String>)>);

impl From<Vec<(String, Vec<String>)>> for FieldMessages {
    fn from(pairs: Vec<(String, Vec<String>)>) -> Self {
        Self(pairs)
    }
}

impl Serialize for FieldMessages {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (field, messages) in &self.0 {
            map.serialize_entry(field, messages)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FieldMessages {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldMessagesVisitor;

        impl<'de> Visitor<'de> for FieldMessagesVisitor {
            type Value = FieldMessages;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of field names to message lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry()? {
                    pairs.push(entry);
                }
                Ok(FieldMessages(pairs))
            }
        }

        deserializer.deserialize_map(FieldMessagesVisitor)
    }
}

/// Failure envelope: `{message, status}` plus `errors` for validation failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldMessages>,
}

impl ErrorResponse {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status,
            errors: None,
        }
    }

    pub fn with_errors(mut self, errors: impl Into<FieldMessages>) -> Self {
        self.errors = Some(errors.into());
        self
    }

    // Common error constructors
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(404, message)
    }

    pub fn unprocessable(message: impl Into<String>, errors: impl Into<FieldMessages>) -> Self {
        Self::new(422, message).with_errors(errors)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(500, message)
    }
}

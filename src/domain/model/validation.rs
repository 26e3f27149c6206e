//! Field-level validation for request payloads.

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use std::fmt;
use utoipa::ToSchema;

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// One or more fields failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError::new(field, message)],
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "validation failed ({})", parts.join("; "))
    }
}

impl std::error::Error for ValidationError {}

/// Semantic checks that run after a payload has deserialized.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Collects field errors and turns them into a `Result` at the end.
#[derive(Debug, Default)]
pub struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn not_blank(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.errors.push(FieldError::new(field, "must not be blank"));
        }
        self
    }

    /// Postgres text and JSONB cannot store U+0000.
    pub fn text(&mut self, field: &str, value: &str) -> &mut Self {
        if value.contains('\0') {
            self.errors
                .push(FieldError::new(field, "must not contain NUL characters"));
        }
        self
    }

    /// Applies `text` to every key and string inside a JSON object.
    pub fn json_text(&mut self, field: &str, value: &Map<String, JsonValue>) -> &mut Self {
        let clean = value
            .iter()
            .all(|(k, v)| !k.contains('\0') && json_is_clean(v));
        self.check(clean, field, "must not contain NUL characters")
    }

    pub fn max_chars(&mut self, field: &str, value: &str, max: usize) -> &mut Self {
        if value.chars().count() > max {
            self.errors.push(FieldError::new(
                field,
                format!("must be at most {} characters", max),
            ));
        }
        self
    }

    pub fn check(&mut self, ok: bool, field: &str, message: &str) -> &mut Self {
        if !ok {
            self.errors.push(FieldError::new(field, message));
        }
        self
    }

    pub fn finish(&mut self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                errors: std::mem::take(&mut self.errors),
            })
        }
    }
}

fn json_is_clean(value: &JsonValue) -> bool {
    match value {
        JsonValue::String(s) => !s.contains('\0'),
        JsonValue::Array(items) => items.iter().all(json_is_clean),
        JsonValue::Object(map) => map.iter().all(|(k, v)| !k.contains('\0') && json_is_clean(v)),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checker_collects_every_failure() {
        let err = Checker::new()
            .not_blank("vin", "  ")
            .max_chars("phone_number", "123456", 5)
            .check(true, "year", "unused")
            .finish()
            .unwrap_err();

        assert_eq!(err.errors.len(), 2);
        assert_eq!(err.errors[0].field, "vin");
        assert_eq!(err.errors[1].field, "phone_number");
        assert!(err.to_string().contains("phone_number: must be at most 5 characters"));
    }

    #[test]
    fn max_chars_counts_characters_not_bytes() {
        assert!(Checker::new().max_chars("name", "ÄÖÜ", 3).finish().is_ok());
    }

    #[test]
    fn nul_characters_are_rejected() {
        let details = serde_json::json!({ "parts": ["pads", "ro\0tor"] });
        let clean = serde_json::json!({ "description": "ok", "n": 1 });
        let err = Checker::new()
            .text("make", "Fo\0rd")
            .text("owner_name", "Ann Lee")
            .json_text("work_details", details.as_object().unwrap())
            .finish()
            .unwrap_err();
        let fields: Vec<&str> = err.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["make", "work_details"]);
        assert!(Checker::new()
            .json_text("work_details", clean.as_object().unwrap())
            .finish()
            .is_ok());
    }
}

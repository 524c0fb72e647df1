// handlers/utils.rs - request parsing shared by the resource handlers

use uuid::Uuid;

use crate::error::{ApiError, FieldErrors};

/// Parse a path segment as a UUID; anything else is a 400
pub fn parse_id(raw: &str, resource: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ApiError::bad_request(format!("Invalid {} id: {}", resource, raw)))
}

/// Collects per-field problems in a request body and reports them together.
#[derive(Debug, Default)]
pub struct FieldValidator {
    errors: FieldErrors,
}

impl FieldValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A text field that must be present and non-blank. Returns the
    /// trimmed value (empty when it was rejected).
    pub fn required(&mut self, field: &str, value: Option<String>) -> String {
        match value.map(|v| v.trim().to_string()) {
            Some(v) if !v.is_empty() => v,
            _ => {
                self.reject(field, "This field is required");
                String::new()
            }
        }
    }

    /// A text field that may be absent, but not blank when given
    pub fn optional(&mut self, field: &str, value: Option<String>) -> Option<String> {
        let value = value.map(|v| v.trim().to_string())?;
        if value.is_empty() {
            self.reject(field, "This field must not be empty");
            return None;
        }
        Some(value)
    }

    /// Optional UUID carried in the body as a string
    pub fn optional_id(&mut self, field: &str, value: Option<String>) -> Option<Uuid> {
        let raw = value?;
        match Uuid::parse_str(raw.trim()) {
            Ok(id) => Some(id),
            Err(_) => {
                self.reject(field, format!("Invalid UUID format: {}", raw));
                None
            }
        }
    }

    pub fn check(&mut self, ok: bool, field: &str, message: impl Into<String>) {
        if !ok {
            self.reject(field, message);
        }
    }

    pub fn reject(&mut self, field: &str, message: impl Into<String>) {
        self.errors.entry(field.to_string()).or_insert_with(|| message.into());
    }

    pub fn finish(self) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error("Missing or invalid fields", Some(self.errors)))
        }
    }
}

pub fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_uuid_ids() {
        assert!(parse_id("123", "article").is_err());
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string(), "article").unwrap(), id);
    }

    #[test]
    fn collects_every_missing_field() {
        let mut v = FieldValidator::new();
        assert_eq!(v.required("title", Some("  Hello ".into())), "Hello");
        v.required("content", None);
        v.required("author", Some("   ".into()));
        let err = v.finish().unwrap_err();
        match err {
            ApiError::ValidationError { field_errors: Some(fields), .. } => {
                assert_eq!(fields.len(), 2);
                assert!(fields.contains_key("content"));
                assert!(fields.contains_key("author"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn optional_blank_is_rejected_but_absent_is_fine() {
        let mut v = FieldValidator::new();
        assert_eq!(v.optional("image", None), None);
        assert!(v.finish().is_ok());

        let mut v = FieldValidator::new();
        v.optional("image", Some(" ".into()));
        assert!(v.finish().is_err());
    }

    #[test]
    fn email_shape() {
        assert!(looks_like_email("panda@example.com"));
        assert!(!looks_like_email("panda"));
        assert!(!looks_like_email("@example.com"));
        assert!(!looks_like_email("pan da@example.com"));
    }
}

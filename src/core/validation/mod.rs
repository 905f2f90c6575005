//! Input validation
//!
//! Request bodies are explicit input structs deriving `validator::Validate`.
//! They are normalized through [`Sanitize`] and validated by the
//! [`ValidatedJson`] extractor before reaching controller logic.

pub mod extractor;

pub use extractor::ValidatedJson;

use std::borrow::Cow;
use validator::ValidationError;

/// Normalization applied to an input before its rules run
pub trait Sanitize {
    fn sanitize(&mut self) {}
}

/// Trim a string in place
pub fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

/// Trim an optional string, turning blanks into `None`
pub fn trim_optional(value: &mut Option<String>) {
    if let Some(inner) = value.as_mut() {
        trim_in_place(inner);
        if inner.is_empty() {
            *value = None;
        }
    }
}

/// Build a validation error with a readable message
pub fn rule_error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_in_place() {
        let mut value = "  hello  ".to_string();
        trim_in_place(&mut value);
        assert_eq!(value, "hello");
    }

    #[test]
    fn test_trim_optional_blank_becomes_none() {
        let mut value = Some("   ".to_string());
        trim_optional(&mut value);
        assert!(value.is_none());

        let mut value = Some(" note ".to_string());
        trim_optional(&mut value);
        assert_eq!(value.as_deref(), Some("note"));
    }

    #[test]
    fn test_rule_error_message() {
        let err = rule_error("status", "must be checkout");
        assert_eq!(err.code, "status");
        assert_eq!(err.message.as_deref(), Some("must be checkout"));
    }
}

//! Contact form outcomes
//!
//! The form never leaves the page: a submit with every field filled is
//! intercepted and acknowledged with a local notification. Any typed value
//! counts as filled; only blank fields are reported.

use thiserror::Error;

/// A contact form field that failed constraint validation
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{field} is required")]
    Required { field: String },
}

impl FormError {
    /// Map an `INVALID` event reason to an error for `field`
    pub fn from_reason(field: impl Into<String>, reason: &str) -> Option<Self> {
        let field = field.into();
        match reason {
            "value_missing" => Some(FormError::Required { field }),
            _ => None,
        }
    }

    pub fn field(&self) -> &str {
        match self {
            FormError::Required { field } => field,
        }
    }
}

/// Result of one submit attempt
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Submit intercepted; `message` was posted and the fields cleared
    Acknowledged {
        message: String,
        fields: Vec<(String, String)>,
    },
    /// Blocked before the submit event fired
    Rejected { errors: Vec<FormError> },
}

impl ContactOutcome {
    pub fn is_acknowledged(&self) -> bool {
        matches!(self, ContactOutcome::Acknowledged { .. })
    }

    pub fn errors(&self) -> &[FormError] {
        match self {
            ContactOutcome::Acknowledged { .. } => &[],
            ContactOutcome::Rejected { errors } => errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reasons_map_to_errors() {
        assert_eq!(
            FormError::from_reason("Name", "value_missing"),
            Some(FormError::Required {
                field: "Name".to_string()
            })
        );
        let err = FormError::from_reason("Email", "value_missing").unwrap();
        assert_eq!(err.field(), "Email");
        assert_eq!(err.to_string(), "Email is required");
        assert_eq!(FormError::from_reason("Email", "too_long"), None);
        assert_eq!(FormError::from_reason("Email", "valid"), None);
    }
}

//! Error types for the value objects.

use thiserror::Error;
use toolbelt_collection::Key;

/// Errors raised when building or using templates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// The template content is empty.
    #[error("template is empty, provide some content")]
    Empty,

    /// The content contains no `%name%` placeholder.
    #[error("template '{content}' contains no placeholders, use %name% to declare one")]
    NoPlaceholders { content: String },

    /// Placeholders of the template were given no value.
    #[error("missing values for placeholders {} of template '{content}'", .missing.join(", "))]
    MissingPlaceholders {
        content: String,
        missing: Vec<String>,
    },

    /// No template is stored under the index.
    #[error("template with index '{index}' was not found")]
    NotFound { index: Key },
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_interpolate_values() {
        let err = TemplateError::MissingPlaceholders {
            content: "%a% %b%".to_string(),
            missing: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "missing values for placeholders a, b of template '%a% %b%'"
        );

        let err = TemplateError::NotFound {
            index: Key::from("footer"),
        };
        assert_eq!(err.to_string(), "template with index 'footer' was not found");
    }
}

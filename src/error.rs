use crate::subprocess::ProcessError;
use std::fmt;
use thiserror::Error;

/// A single failed field check on the input configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
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

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ {} ] {}", self.field, self.message)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(
        "Template resolution error: undefined placeholder '{placeholder}' in '{input}'{}",
        describe_field(.field)
    )]
    TemplateResolution {
        placeholder: String,
        input: String,
        /// Configuration field the text came from, when known
        field: Option<String>,
    },

    #[error("Config decoration error: invalid boolean '{value}' for {variable}")]
    ConfigDecoration { variable: String, value: String },

    #[error("Command assembly error: {0}")]
    CommandAssembly(#[from] tera::Error),

    #[error("Validation error: {}", format_field_errors(.0))]
    Validation(Vec<FieldError>),

    #[error("Invalid input for {field}: {source}")]
    InvalidInput {
        field: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Process error: {0}")]
    Process(#[from] ProcessError),

    #[error("spark submit returned with the code: [ {code} ]")]
    SubmitFailed { code: i32 },
}

impl Error {
    /// Attach the configuration field a template resolution failure came from.
    pub fn in_field(self, field: &str) -> Self {
        match self {
            Error::TemplateResolution {
                placeholder, input, ..
            } => Error::TemplateResolution {
                placeholder,
                input,
                field: Some(field.to_string()),
            },
            other => other,
        }
    }
}

fn describe_field(field: &Option<String>) -> String {
    field
        .as_ref()
        .map(|field| format!(" (field: {field})"))
        .unwrap_or_default()
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_every_field() {
        let err = Error::Validation(vec![
            FieldError::new("submit_options", "key must not be empty"),
            FieldError::new("spark_config", "key must not be empty"),
        ]);

        let message = err.to_string();
        assert!(message.contains("[ submit_options ] key must not be empty"));
        assert!(message.contains("[ spark_config ] key must not be empty"));
    }

    #[test]
    fn test_template_error_names_placeholder_and_input() {
        let err = Error::TemplateResolution {
            placeholder: "MISSING".to_string(),
            input: "x {{ .MISSING }}".to_string(),
            field: None,
        };

        assert_eq!(
            err.to_string(),
            "Template resolution error: undefined placeholder 'MISSING' in 'x {{ .MISSING }}'"
        );
        assert_eq!(
            err.in_field("spark_config").to_string(),
            "Template resolution error: undefined placeholder 'MISSING' in 'x {{ .MISSING }}' (field: spark_config)"
        );
    }

    #[test]
    fn test_in_field_leaves_other_errors_alone() {
        let err = Error::SubmitFailed { code: 2 }.in_field("app_args");
        assert!(matches!(err, Error::SubmitFailed { code: 2 }));
    }
}

//! Error types for xmlbind
//!
//! Fatal model-construction and validation errors carry the qualified name
//! of the offending declaration so the build driver can report them as the
//! build's terminal failure. Recoverable conditions are logged, never
//! returned.

use std::fmt;
use thiserror::Error;

/// Result type alias using the xmlbind Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for xmlbind operations
#[derive(Error, Debug)]
pub enum Error {
    /// Fatal model-construction error
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// Target-format validation error
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Configuration document parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// A fatal error raised during model construction
#[derive(Debug, Clone)]
pub struct ModelError {
    /// Error message
    pub message: String,
    /// Qualified name of the declaration that caused the error
    pub subject: Option<String>,
    /// Qualified name of a related declaration (adapter, sibling package)
    pub related: Option<String>,
}

impl ModelError {
    /// Create a new model error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            subject: None,
            related: None,
        }
    }

    /// Set the offending declaration
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set a related declaration
    pub fn with_related(mut self, related: impl Into<String>) -> Self {
        self.related = Some(related.into());
        self
    }

    /// An interface carrying a complex-type annotation
    pub fn interface_as_complex_type(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(format!(
            "{}: an interface must not be annotated as a complex XML type",
            name
        ))
        .with_subject(name)
    }

    /// An adapter whose adapting type is not a reachable declared type
    pub fn unresolvable_adapter(name: impl Into<String>, adapting: impl Into<String>) -> Self {
        let name = name.into();
        let adapting = adapting.into();
        Self::new(format!(
            "class {} is being adapted by a type ({}) that doesn't seem to be on the classpath",
            name, adapting
        ))
        .with_subject(name)
        .with_related(adapting)
    }

    /// Conflicting explicit form-default declarations within one namespace
    pub fn inconsistent_form_default(
        attribute_form: bool,
        package: impl Into<String>,
        sibling: impl Into<String>,
    ) -> Self {
        let package = package.into();
        let sibling = sibling.into();
        let which = if attribute_form {
            "attributeFormDefault"
        } else {
            "elementFormDefault"
        };
        Self::new(format!(
            "{}: inconsistent {} declarations: {}",
            package, which, sibling
        ))
        .with_subject(package)
        .with_related(sibling)
    }
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(ref subject) = self.subject {
            write!(f, "\n\nDeclaration: {}", subject)?;
        }

        if let Some(ref related) = self.related {
            write!(f, "\n\nRelated: {}", related)?;
        }

        Ok(())
    }
}

impl std::error::Error for ModelError {}

/// A target-format validation failure
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Error message
    pub message: String,
    /// Qualified name of the declaration that failed validation
    pub subject: Option<String>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            subject: None,
        }
    }

    /// Set the declaration that failed validation
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(ref subject) = self.subject {
            write!(f, "\n\nDeclaration: {}", subject)?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_error_display() {
        let err = ModelError::new("inconsistent elementFormDefault declarations")
            .with_subject("com.example.pkg")
            .with_related("com.example.other");

        let msg = format!("{}", err);
        assert!(msg.contains("inconsistent elementFormDefault"));
        assert!(msg.contains("Declaration: com.example.pkg"));
        assert!(msg.contains("Related: com.example.other"));
    }

    #[test]
    fn test_unresolvable_adapter() {
        let err = ModelError::unresolvable_adapter("com.example.Money", "com.example.MoneyView");
        assert_eq!(err.subject.as_deref(), Some("com.example.Money"));
        assert_eq!(err.related.as_deref(), Some("com.example.MoneyView"));
    }

    #[test]
    fn test_error_conversion() {
        let model_err = ModelError::interface_as_complex_type("com.example.Shape");
        let err: Error = model_err.into();
        assert!(matches!(err, Error::Model(_)));
    }
}

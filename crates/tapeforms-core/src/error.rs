//! Core error types for tapeforms.
//!
//! [`TapeformsError`] covers the three failure families the renderer can hit:
//! configuration mistakes (a fieldset with neither `fields` nor `exclude`,
//! unparsable settings), template tag misuse (a tag handed the wrong kind of
//! object), and template engine failures. Lookups that simply miss an
//! override never produce an error; they fall through to the next tier.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// A single validation failure reported by a form field or a form-level cleaner.
///
/// # Examples
///
/// ```
/// use tapeforms_core::error::ValidationError;
///
/// let err = ValidationError::new("This field is required.", "required");
/// assert_eq!(err.to_string(), "This field is required.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The human readable message.
    pub message: String,
    /// A short code identifying the type of failure (e.g. "required", "invalid").
    pub code: String,
    /// Parameters used when formatting the message.
    pub params: HashMap<String, String>,
}

impl ValidationError {
    /// Creates a new `ValidationError` with a message and code.
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            params: HashMap::new(),
        }
    }

    /// Adds a parameter to this validation error.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

/// The primary error type for tapeforms.
#[derive(Error, Debug)]
pub enum TapeformsError {
    // ── Configuration ────────────────────────────────────────────────

    /// A form, fieldset, or helper was set up in a way that cannot work.
    #[error("Improperly configured: {0}")]
    ImproperlyConfigured(String),

    /// A settings or style document could not be parsed.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A field name was used that the form does not declare.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    // ── Templates ────────────────────────────────────────────────────

    /// A template tag received an argument of the wrong kind.
    #[error("{0}")]
    TemplateSyntaxError(String),

    /// The requested template is not registered with the engine.
    #[error("Template does not exist: {0}")]
    TemplateDoesNotExist(String),

    /// The template engine failed while rendering.
    #[error("Template render error: {0}")]
    TemplateRenderError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl TapeformsError {
    /// Returns `true` for errors caused by configuration rather than rendering.
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::ImproperlyConfigured(_) | Self::ConfigurationError(_) | Self::UnknownField(_)
        )
    }
}

/// A convenience type alias for `Result<T, TapeformsError>`.
pub type TapeformsResult<T> = Result<T, TapeformsError>;

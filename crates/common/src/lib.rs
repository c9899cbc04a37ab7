//! Common types and utilities for swagger-import
//!
//! This crate contains the canonical API definition model, the error
//! taxonomy surfaced by the import pipeline, and the YAML configuration
//! shared by the parser and CLI components.

mod config;
mod definition;

pub use config::{ImportConfig, RetrySettings, DEFAULT_ACCEPT};
pub use definition::*;

use std::fmt;
use thiserror::Error;

/// Field an import error is reported against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorField {
    /// The source locator or a remote document
    Url,
    /// A local document
    File,
    /// The aggregated definition
    Definition,
}

impl ErrorField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorField::Url => "url",
            ErrorField::File => "file",
            ErrorField::Definition => "definition",
        }
    }
}

impl fmt::Display for ErrorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while loading and translating a description
///
/// Lower-level causes are carried by message only, so callers only ever
/// deal with this one type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// The caller supplied an unusable source locator
    #[error("Input error ({field}): {message}")]
    Input { field: ErrorField, message: String },

    /// A listing or declaration could not be fetched or parsed
    #[error("Retrieval error ({field}): {message}")]
    Retrieval { field: ErrorField, message: String },

    /// The loaded documents could not be aggregated
    #[error("Translation error ({field}): {message}")]
    Translation { field: ErrorField, message: String },
}

impl ImportError {
    pub fn input(message: impl Into<String>) -> Self {
        ImportError::Input {
            field: ErrorField::Url,
            message: message.into(),
        }
    }

    pub fn retrieval(field: ErrorField, message: impl Into<String>) -> Self {
        ImportError::Retrieval {
            field,
            message: message.into(),
        }
    }

    pub fn translation(message: impl Into<String>) -> Self {
        ImportError::Translation {
            field: ErrorField::Definition,
            message: message.into(),
        }
    }

    /// Name of the field the error is reported against (`"url"`, `"file"`, ...)
    pub fn field(&self) -> &'static str {
        match self {
            ImportError::Input { field, .. }
            | ImportError::Retrieval { field, .. }
            | ImportError::Translation { field, .. } => field.as_str(),
        }
    }

    /// Human-readable description of the failure
    pub fn message(&self) -> &str {
        match self {
            ImportError::Input { message, .. }
            | ImportError::Retrieval { message, .. }
            | ImportError::Translation { message, .. } => message,
        }
    }

    pub fn is_retrieval(&self) -> bool {
        matches!(self, ImportError::Retrieval { .. })
    }
}

/// Result type for import operations
pub type Result<T> = std::result::Result<T, ImportError>;

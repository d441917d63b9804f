/*!
 * Error types for the xdocai application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions. The taxonomy keeps
 * three failure classes apart: configuration errors (fatal, rejected before any
 * work starts), document errors (per-item data errors), and provider errors
 * (per-job failures that never cancel sibling jobs).
 */

use thiserror::Error;

/// Errors raised while validating the application configuration.
///
/// All of these are fatal and reported before any translation job is dispatched.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required parameter was not provided
    #[error("Required parameter is not set: {0}")]
    MissingParameter(&'static str),

    /// A parameter was provided with an unusable value
    #[error("Invalid value for {name}: {reason}")]
    InvalidParameter {
        /// Name of the violated parameter
        name: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// A locale code could not be resolved to a known language
    #[error("Invalid locale name: {0}")]
    InvalidLocale(String),
}

/// Errors that can occur while reading, parsing or writing IntelliSense documents
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Error reading the source document from disk
    #[error("Failed to read document {path}: {reason}")]
    Read {
        /// Path of the document
        path: String,
        /// Underlying IO failure
        reason: String,
    },

    /// The source file is not a valid IntelliSense documentation file
    #[error("Invalid IntelliSense document {path}: {reason}")]
    InvalidDocument {
        /// Path of the document
        path: String,
        /// What made the container invalid
        reason: String,
    },

    /// Translated member content did not parse as well-formed XML
    #[error("Unable to parse translated content as XML ({reason}): {content}")]
    MalformedContent {
        /// Parser failure description
        reason: String,
        /// The offending text
        content: String,
    },

    /// Error writing an output document to disk
    #[error("Failed to write document {path}: {reason}")]
    Write {
        /// Path of the document
        path: String,
        /// Underlying IO failure
        reason: String,
    },
}

/// Errors that can occur when calling the chat completion API
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },
}

/// Errors that can occur during translation dispatch
#[derive(Error, Debug)]
pub enum TranslationError {
    /// The caller supplied no target languages; rejected before any job runs
    #[error("Target languages cannot be empty")]
    EmptyTargetLanguages,

    /// Error from the chat provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// One or more jobs failed after all jobs were allowed to finish
    #[error("Translation failed: {0}")]
    JobsFailed(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error in the application configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error handling an IntelliSense document
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Error from the chat provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from translation dispatch
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

//! Error types for Kindler operations.
//!
//! This module defines the main error type [`KindlerError`] which represents
//! everything that can go wrong while fetching an article, converting it and
//! mailing it, together with [`ErrorKind`], the coarse classification callers
//! use to decide how a failure is reported.
//!
//! # Example
//!
//! ```rust
//! use kindler_core::{ErrorKind, KindlerError};
//!
//! let err = KindlerError::InvalidUrl("ftp://example.com".to_string());
//! assert_eq!(err.kind(), ErrorKind::Validation);
//! ```

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Main error type for the fetch, convert and mail pipeline.
#[derive(Error, Debug)]
pub enum KindlerError {
    /// HTTP request errors from reqwest.
    ///
    /// Covers DNS failures, refused connections and non-success status codes.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    ///
    /// Returned when fetching a page exceeds the configured timeout duration.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    ///
    /// Returned when a URL cannot be parsed or does not use http(s).
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The converter ran but exited unsuccessfully.
    #[error("Conversion of {input} failed ({status}): {stderr}")]
    ConversionFailed {
        input: PathBuf,
        status: ExitStatus,
        stderr: String,
    },

    /// The converter program could not be started at all.
    #[error("Could not run converter `{program}`: {source}")]
    ConverterUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// A sender or recipient address did not parse.
    #[error("Invalid mail address: {0}")]
    MailAddress(#[from] lettre::address::AddressError),

    /// The attachment content type was rejected by the message builder.
    #[error("Invalid attachment content type: {0}")]
    AttachmentType(#[from] lettre::message::header::ContentTypeErr),

    /// The outbound message could not be assembled.
    #[error("Failed to build message: {0}")]
    MailBuild(#[from] lettre::error::Error),

    /// Submission to the SMTP server failed.
    #[error("SMTP delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// File I/O errors in the working directory.
    #[error("Failed to write to file: {0}")]
    WriteError(#[from] std::io::Error),

    /// Missing or malformed configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Which pipeline stage a [`KindlerError`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request itself was malformed.
    Validation,
    /// The article could not be downloaded.
    Fetch,
    /// The external converter failed.
    Conversion,
    /// The message could not be built or delivered.
    Mail,
    /// Local I/O or configuration problems.
    Internal,
}

impl KindlerError {
    /// Classifies this error by pipeline stage.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidUrl(_) => ErrorKind::Validation,
            Self::HttpError(_) | Self::Timeout { .. } => ErrorKind::Fetch,
            Self::ConversionFailed { .. } | Self::ConverterUnavailable { .. } => ErrorKind::Conversion,
            Self::MailAddress(_) | Self::AttachmentType(_) | Self::MailBuild(_) | Self::Smtp(_) => ErrorKind::Mail,
            Self::WriteError(_) | Self::ConfigError(_) => ErrorKind::Internal,
        }
    }
}

/// Result type alias for KindlerError.
pub type Result<T> = std::result::Result<T, KindlerError>;

//! Upload error taxonomy.
//!
//! Every failure path of an upload call is tagged so callers can tell a
//! local read error, a transport failure, and a backend rejection apart.

use reqwest::StatusCode;
use thiserror::Error;

/// Upload operation errors
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("failed to read source file {path}: {source}")]
    Source {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("policy serialization failed: {0}")]
    Policy(#[from] serde_json::Error),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upload rejected with status {status}: {body}")]
    Rejected { status: StatusCode, body: String },
}

/// Result type for upload operations
pub type UploadResult<T> = Result<T, UploadError>;

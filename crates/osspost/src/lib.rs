//! Direct-to-OSS upload client.
//!
//! This crate authorizes and executes single-object uploads against an
//! OSS-compatible storage endpoint without a server round-trip for credential
//! issuance: it builds a time-bounded POST policy, signs it with the account
//! secret (HMAC-SHA1), derives a collision-resistant object key, and sends one
//! multipart form to the configured host.
//!
//! # Object key format
//!
//! Keys are date-scoped: `App/{YYYYMMDD}/{epoch_millis}{random}.{ext}` where
//! `ext` is the last dot-delimited segment of the source path. Key generation
//! is centralized in the `keys` module.
//!
//! # Failure semantics
//!
//! One upload per call, no retries. A rejected form (bad signature, expired
//! policy, size-condition violation) surfaces as [`UploadError::Rejected`]
//! with the backend's status and body; a transport failure surfaces as
//! [`UploadError::Transport`].

pub mod client;
pub mod config;
pub mod error;
pub(crate) mod keys;
pub mod policy;
pub mod progress;

// Re-export commonly used types
pub use client::{UploadClient, UploadOutcome};
pub use config::OssConfig;
pub use error::{UploadError, UploadResult};
pub use policy::{SignedRequest, UploadPolicy};
pub use progress::UploadProgress;

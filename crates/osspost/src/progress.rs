//! Upload progress seam.
//!
//! The caller owns the indicator; the client only signals lifecycle edges.
//! Each upload call pairs one `started` with exactly one `finished`, on both
//! success and failure paths, so concurrent uploads cannot race on shared
//! indicator state.

/// Caller-owned hook signalling upload-in-progress to a UI or log.
pub trait UploadProgress: Send + Sync {
    /// Invoked immediately before the network call.
    fn started(&self);

    /// Invoked exactly once after the network call, whatever its outcome.
    fn finished(&self);
}

//! POST policy construction and signing.
//!
//! A policy is a time-bounded authorization descriptor: an ISO-8601 UTC
//! expiration plus a list of constraint tuples. The backend verifies the
//! base64-encoded policy against an HMAC-SHA1 signature computed with the
//! account secret, so the encoded form must be byte-stable: field order is
//! `expiration` then `conditions`, and conditions serialize as JSON arrays.

use base64::engine::general_purpose;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use sha1::Sha1;

/// Fixed policy lifetime: one hour from issuance, never renewed.
pub const POLICY_TTL_SECS: i64 = 3600;

/// Upper bound of the content-length-range condition (~1 GB). Uploads larger
/// than this are rejected by the backend, not by this client.
pub const MAX_CONTENT_LENGTH_BYTES: u64 = 1_048_576_000;

/// A single policy constraint tuple.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PolicyCondition {
    ContentLengthRange { min: u64, max: u64 },
}

impl Serialize for PolicyCondition {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PolicyCondition::ContentLengthRange { min, max } => {
                let mut seq = serializer.serialize_seq(Some(3))?;
                seq.serialize_element("content-length-range")?;
                seq.serialize_element(min)?;
                seq.serialize_element(max)?;
                seq.end()
            }
        }
    }
}

/// Time-bounded upload authorization descriptor.
#[derive(Clone, Debug, serde::Serialize)]
pub struct UploadPolicy {
    expiration: String,
    conditions: Vec<PolicyCondition>,
}

impl UploadPolicy {
    /// Build the standard single-upload policy: expiration one hour from
    /// `issued_at`, one content-length-range condition.
    pub fn issued_at(issued_at: DateTime<Utc>) -> Self {
        let expiration = (issued_at + Duration::seconds(POLICY_TTL_SECS))
            .format("%Y-%m-%dT%H:%M:%SZ")
            .to_string();
        UploadPolicy {
            expiration,
            conditions: vec![PolicyCondition::ContentLengthRange {
                min: 0,
                max: MAX_CONTENT_LENGTH_BYTES,
            }],
        }
    }

    pub fn new() -> Self {
        Self::issued_at(Utc::now())
    }

    pub fn expiration(&self) -> &str {
        &self.expiration
    }

    /// Base64 of the UTF-8 JSON serialization of the policy.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_string(self)?;
        Ok(general_purpose::STANDARD.encode(json))
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new()
    }
}

type HmacSha1 = Hmac<Sha1>;

/// Base64 of HMAC-SHA1 over the encoded policy text using the account
/// secret. Deterministic: same policy and secret always give the same
/// signature (no nonce is involved).
pub fn sign(policy_base64: &str, secret_key: &str) -> String {
    let mut mac =
        HmacSha1::new_from_slice(secret_key.as_bytes()).expect("HMAC can take key of any size");
    mac.update(policy_base64.as_bytes());
    general_purpose::STANDARD.encode(mac.finalize().into_bytes())
}

/// Encoded policy plus its signature, built fresh per upload call.
#[derive(Clone, Debug)]
pub struct SignedRequest {
    pub policy_base64: String,
    pub signature: String,
}

impl SignedRequest {
    pub fn build(policy: &UploadPolicy, secret_key: &str) -> Result<Self, serde_json::Error> {
        let policy_base64 = policy.encode()?;
        let signature = sign(&policy_base64, secret_key);
        Ok(SignedRequest {
            policy_base64,
            signature,
        })
    }
}

//! Shared object key generation.
//!
//! Key format: `App/{YYYYMMDD}/{epoch_millis}{random}.{ext}` where `ext` is
//! the last dot-delimited segment of the source path.

use chrono::{DateTime, Utc};
use rand::Rng;

/// Fixed prefix under which all uploads are stored.
pub const KEY_PREFIX: &str = "App";

/// Upper bound (exclusive) of the random key suffix.
const RANDOM_SUFFIX_BOUND: u32 = 1_000_000;

/// Derive an object key for the given source path at a fixed instant.
///
/// The extension is the last `.`-delimited segment of the path, verbatim and
/// unsanitized. A path with no dot contributes the whole path as its
/// "extension" (`"photo"` yields a key ending `.photo`); this mirrors the
/// backend's established key layout and must not be "corrected". The random
/// suffix is not zero-padded, so key length varies.
pub fn object_key_at(now: DateTime<Utc>, random: u32, source_path: &str) -> String {
    let date = now.format("%Y%m%d");
    let millis = now.timestamp_millis();
    // rsplit always yields at least one segment, the whole path when no dot
    // is present.
    let ext = source_path.rsplit('.').next().unwrap_or(source_path);
    format!("{}/{}/{}{}.{}", KEY_PREFIX, date, millis, random, ext)
}

/// Derive an object key for the given source path using the current clock
/// and thread RNG. Timestamp plus random suffix make collisions between
/// concurrent calls negligible.
pub fn object_key(source_path: &str) -> String {
    let random = rand::rng().random_range(0..RANDOM_SUFFIX_BOUND);
    object_key_at(Utc::now(), random, source_path)
}

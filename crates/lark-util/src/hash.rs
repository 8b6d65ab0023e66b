//! Content-addressed hashing.

use sha2::{Digest, Sha256};

/// Hex digest of `content`, truncated to `length` characters.
///
/// Used for cache-busting query strings; the full digest is never needed.
pub fn content_hash(content: impl AsRef<[u8]>, length: usize) -> String {
    let digest = Sha256::digest(content.as_ref());
    let mut encoded = hex::encode(digest);
    encoded.truncate(length);
    encoded
}

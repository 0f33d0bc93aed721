//! Canonical hashing helpers for stable fingerprints.
//!
//! A fingerprint identifies exactly which candidate text was reviewed for a
//! given baseline name, so an update can refuse to record anything else.

use base64::Engine;
use sha2::{Digest, Sha256};

/// Hashes a byte field with an explicit length prefix.
///
/// Length-prefixing avoids delimiter ambiguities (for example embedded `|` or
/// newlines) that can otherwise make distinct data serialize to identical byte
/// streams before hashing.
pub(crate) fn hash_field(hasher: &mut Sha256, bytes: &[u8]) {
    let len = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
    hasher.update(len.to_be_bytes());
    hasher.update(bytes);
}

/// Fingerprint of a (name, normalized candidate) pair.
///
/// Currently a Base64-encoded SHA-256, but callers should treat it as an
/// opaque token.
pub fn fingerprint(name: &str, content: &str) -> String {
    let mut hasher = Sha256::new();
    hash_field(&mut hasher, name.as_bytes());
    hash_field(&mut hasher, content.as_bytes());
    base64::engine::general_purpose::STANDARD.encode(hasher.finalize())
}

//! Content digests recorded in the import report.

use serde::Serialize;
use sha2::{Digest, Sha256};

/// A full 64-character SHA256 hash of a file's contents.
///
/// The hash is a lowercase hexadecimal string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentHash(pub String);

/// Hash arbitrary bytes.
pub fn hash_bytes(data: &[u8]) -> ContentHash {
  let mut hasher = Sha256::new();
  hasher.update(data);
  ContentHash(hex::encode(hasher.finalize()))
}

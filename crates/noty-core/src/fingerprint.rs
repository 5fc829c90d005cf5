//! Content fingerprints for cheap change detection.
//!
//! A [`Fingerprint`] is the `(hash, length)` pair of a document's last saved
//! content. Comparing against it tells whether a buffer was modified without
//! keeping a copy of the original text around.

use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use std::hash::Hasher;

/// Digest function used to fingerprint content.
///
/// Collision resistance is not a security requirement here, only the
/// avoidance of accidental matches between same-length edits.
pub trait ContentHasher {
    fn digest(&self, content: &str) -> String;
}

/// Default hasher: 64-bit FxHash over the UTF-8 bytes, rendered as hex.
#[derive(Debug, Default, Clone, Copy)]
pub struct FxContentHasher;

impl ContentHasher for FxContentHasher {
    fn digest(&self, content: &str) -> String {
        let mut hasher = FxHasher::default();
        hasher.write(content.as_bytes());
        format!("{:016x}", hasher.finish())
    }
}

/// Fingerprint of a piece of content.
///
/// `length` is the UTF-8 byte length, which is O(1) to read from a `String`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint {
    pub hash: String,
    pub length: usize,
}

impl Fingerprint {
    /// Fingerprints `content` with the default hasher.
    pub fn of(content: &str) -> Self {
        Self::with_hasher(&FxContentHasher, content)
    }

    pub fn with_hasher<H: ContentHasher + ?Sized>(hasher: &H, content: &str) -> Self {
        Self {
            hash: hasher.digest(content),
            length: content.len(),
        }
    }

    /// Whether `current` differs from the content this fingerprint was taken from.
    pub fn is_modified(&self, current: &str) -> bool {
        self.is_modified_with(&FxContentHasher, current)
    }

    /// Two-tier comparison: lengths first, and only on equal lengths the digest.
    ///
    /// Length changes are by far the common case on every keystroke, so the
    /// digest of a large buffer is only computed when a same-length edit
    /// (e.g. a selection replaced by a paste of equal size) is possible.
    pub fn is_modified_with<H: ContentHasher + ?Sized>(&self, hasher: &H, current: &str) -> bool {
        if current.len() != self.length {
            return true;
        }

        hasher.digest(current) != self.hash
    }
}

/// Shorthand for [`Fingerprint::of`].
pub fn fingerprint(content: &str) -> Fingerprint {
    Fingerprint::of(content)
}

/// Shorthand for [`Fingerprint::is_modified`].
pub fn is_modified(current: &str, original: &Fingerprint) -> bool {
    original.is_modified(current)
}

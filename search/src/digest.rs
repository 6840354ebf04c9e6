//! Content hashing with domain separation.
//!
//! Algorithm: SHA-256. Every hashed surface is prefixed with a
//! null-terminated domain tag so equal bytes under different domains never
//! collide.

use sha2::{Digest, Sha256};

/// A content-addressed hash with algorithm identifier.
///
/// Format: `"algorithm:hex_digest"` (e.g., `"sha256:abcdef..."`)
///
/// Invariant: the inner string always contains exactly one `:` separator,
/// with non-empty substrings on both sides (enforced by [`ContentHash::parse`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash {
    full: String,
    colon: usize,
}

impl ContentHash {
    /// Read back a stored `"algorithm:digest"` string, such as the contents
    /// of a run directory's digest file. `None` unless both halves are
    /// non-empty and there is exactly one colon.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let (algorithm, digest) = s.split_once(':')?;
        if algorithm.is_empty() || digest.is_empty() || digest.contains(':') {
            return None;
        }
        Some(Self {
            full: s.to_string(),
            colon: algorithm.len(),
        })
    }

    /// The algorithm portion (e.g., "sha256").
    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.full[..self.colon]
    }

    /// The hex digest portion.
    #[must_use]
    pub fn hex_digest(&self) -> &str {
        &self.full[self.colon + 1..]
    }

    /// The full string representation (`"algorithm:hex_digest"`).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.full
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full)
    }
}

/// Hashed surfaces produced by this workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashDomain {
    /// JSON form of a recorded [`crate::trace::TraceLog`].
    TraceLog,
    /// A run report.
    SearchReport,
    /// A rendered DOT graph.
    DotArtifact,
}

impl HashDomain {
    /// Null-terminated prefix bytes.
    #[must_use]
    pub fn prefix(self) -> &'static [u8] {
        match self {
            Self::TraceLog => b"LODESTAR::TRACE_LOG::V1\0",
            Self::SearchReport => b"LODESTAR::SEARCH_REPORT::V1\0",
            Self::DotArtifact => b"LODESTAR::DOT_ARTIFACT::V1\0",
        }
    }
}

/// Compute the canonical hash of a byte slice with domain separation.
///
/// Result format: `"sha256:<hex_digest>"`.
#[must_use]
pub fn canonical_hash(domain: HashDomain, data: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(domain.prefix());
    hasher.update(data);
    let hex_digest = hex::encode(hasher.finalize());
    ContentHash {
        colon: "sha256".len(),
        full: format!("sha256:{hex_digest}"),
    }
}

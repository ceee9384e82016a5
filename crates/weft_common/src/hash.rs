//! Content fingerprints for finalized board topologies.

use std::fmt;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::Xxh3;

/// A 128-bit XXH3 fingerprint.
///
/// Two platform graphs with the same fingerprint declare the same clocks,
/// subsystems, ports, and bindings. Engines use it to cache per-topology
/// state across runs.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHash(u128);

impl ContentHash {
    /// The raw 128-bit value.
    pub fn as_u128(self) -> u128 {
        self.0
    }

    /// The first eight hex digits, for log lines.
    pub fn short(self) -> String {
        format!("{:08x}", (self.0 >> 96) as u32)
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({}..)", self.short())
    }
}

/// Incremental hasher producing a [`ContentHash`].
///
/// Every field is written with a length prefix or a fixed width so that
/// `("ab", "c")` and `("a", "bc")` hash differently.
pub struct ContentHasher {
    state: Xxh3,
}

impl ContentHasher {
    /// Creates a hasher with the default seed.
    pub fn new() -> Self {
        Self { state: Xxh3::new() }
    }

    /// Feeds a length-prefixed string.
    pub fn write_str(&mut self, s: &str) -> &mut Self {
        self.write_u64(s.len() as u64);
        self.state.update(s.as_bytes());
        self
    }

    /// Feeds a fixed-width integer.
    pub fn write_u64(&mut self, v: u64) -> &mut Self {
        self.state.update(&v.to_le_bytes());
        self
    }

    /// Feeds a single tag byte.
    pub fn write_tag(&mut self, tag: u8) -> &mut Self {
        self.state.update(&[tag]);
        self
    }

    /// The fingerprint of everything written so far.
    pub fn finish(&self) -> ContentHash {
        ContentHash(self.state.digest128())
    }
}

impl Default for ContentHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash_of(parts: &[&str]) -> ContentHash {
        let mut h = ContentHasher::new();
        for p in parts {
            h.write_str(p);
        }
        h.finish()
    }

    #[test]
    fn same_input_same_hash() {
        let mut a = ContentHasher::new();
        a.write_str("hostd").write_u64(10_000_000);
        let mut b = ContentHasher::new();
        b.write_str("hostd").write_u64(10_000_000);
        assert_eq!(a.finish(), b.finish());
    }

    #[test]
    fn length_prefix_separates_fields() {
        assert_ne!(hash_of(&["ab", "c"]), hash_of(&["a", "bc"]));
    }

    #[test]
    fn tags_change_the_hash() {
        let mut a = ContentHasher::new();
        a.write_tag(1).write_str("soc");
        let mut b = ContentHasher::new();
        b.write_tag(2).write_str("soc");
        assert_ne!(a.finish(), b.finish());
    }

    #[test]
    fn hex_rendering() {
        let h = hash_of(&["carfield"]);
        let full = h.to_string();
        assert_eq!(full.len(), 32);
        assert!(full.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(full.starts_with(&h.short()));
        assert_eq!(format!("{h:?}"), format!("ContentHash({}..)", h.short()));
    }

    #[test]
    fn serializes_as_number() {
        let h = hash_of(&["serde"]);
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, h.as_u128().to_string());
        let back: ContentHash = serde_json::from_str(&json).unwrap();
        assert_eq!(h, back);
    }
}

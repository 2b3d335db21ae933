//! Cache Key Module
//!
//! Validated key type derived from the request path segment.

use std::fmt;
use std::str::FromStr;

use crate::error::{ProxyError, Result};

// == Cache Key ==
/// A validated cache key: the status-code path segment of the request URL.
///
/// The segment must parse as an integer, but the key keeps the original
/// string form since it also serves as the filename stem. Keys compare by
/// that canonical string, so `200` and `0200` are distinct entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    // == Parse ==
    /// Validates a raw path segment as a cache key.
    ///
    /// The segment must be non-empty and parse as an `i64` in full; partial
    /// numeric prefixes like `7abc` are rejected.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() || raw.parse::<i64>().is_err() {
            return Err(ProxyError::InvalidKey(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    /// Returns the canonical string form of the key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CacheKey {
    type Err = ProxyError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_status_code() {
        let key = CacheKey::parse("200").unwrap();
        assert_eq!(key.as_str(), "200");
        assert_eq!(key.to_string(), "200");
    }

    #[test]
    fn test_parse_keeps_original_form() {
        // Leading zeros stay part of the key and the filename stem.
        let key = CacheKey::parse("007").unwrap();
        assert_eq!(key.as_str(), "007");
    }

    #[test]
    fn test_parse_accepts_any_integer() {
        // No range restriction: any integer-looking segment is a key.
        assert!(CacheKey::parse("-5").is_ok());
        assert!(CacheKey::parse("99999").is_ok());
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(matches!(
            CacheKey::parse(""),
            Err(ProxyError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_parse_rejects_non_integer() {
        for raw in ["abc", "12abc", "1.5", "2 0 0", "favicon.ico"] {
            assert!(
                matches!(CacheKey::parse(raw), Err(ProxyError::InvalidKey(_))),
                "expected {raw:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_from_str() {
        let key: CacheKey = "418".parse().unwrap();
        assert_eq!(key.as_str(), "418");
        assert!("teapot".parse::<CacheKey>().is_err());
    }
}

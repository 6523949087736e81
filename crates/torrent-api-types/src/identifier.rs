use std::{fmt, str::FromStr};

use thiserror::Error;

/// Identifies a torrent either by its daemon-assigned id or by its info hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TorrentIdentifier {
    /// Numeric id assigned by the daemon. Not stable across daemon restarts.
    Id(i64),
    /// Info hash string.
    Hash(String),
}

/// Error returned when a path segment is not a valid torrent identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid torrent identifier: {0:?}")]
pub struct InvalidIdentifier(pub String);

impl FromStr for TorrentIdentifier {
    type Err = InvalidIdentifier;

    /// All-digit input that fits in an `i64` is always an id, even when it could also be read as
    /// a hash. Other ASCII-alphanumeric input is a hash.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(InvalidIdentifier(s.to_string()));
        }
        if s.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(id) = s.parse::<i64>() {
                return Ok(Self::Id(id));
            }
        }
        Ok(Self::Hash(s.to_string()))
    }
}

impl fmt::Display for TorrentIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Hash(hash) => f.write_str(hash),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_are_ids() {
        assert_eq!("42".parse(), Ok(TorrentIdentifier::Id(42)));
        assert_eq!("0".parse(), Ok(TorrentIdentifier::Id(0)));
    }

    #[test]
    fn alphanumerics_are_hashes() {
        let hash = "c9e15763f722f23e98a29decdfae341b98d53056";
        assert_eq!(hash.parse(), Ok(TorrentIdentifier::Hash(hash.into())));
        assert_eq!("abc".parse(), Ok(TorrentIdentifier::Hash("abc".into())));
    }

    #[test]
    fn digits_too_large_for_an_id_are_hashes() {
        let digits = "1234567890123456789012345678901234567890";
        assert_eq!(digits.parse(), Ok(TorrentIdentifier::Hash(digits.into())));
    }

    #[test]
    fn rejects_empty_and_non_alphanumeric() {
        for input in ["", "-1", "ab-cd", "a b", "42/start", "é"] {
            assert!(
                input.parse::<TorrentIdentifier>().is_err(),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn displays_raw_value() {
        assert_eq!(TorrentIdentifier::Id(3).to_string(), "3");
        assert_eq!(TorrentIdentifier::Hash("ff".into()).to_string(), "ff");
    }
}

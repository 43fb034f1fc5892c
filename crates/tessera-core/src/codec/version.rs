// ============================================
// File: crates/tessera-core/src/codec/version.rs
// ============================================
//! # Payload Codec Versions
//!
//! ## Creation Reason
//! Nodes of different releases exchange payloads. The codec used for a
//! peer depends on the oldest version that peer advertises.
//!
//! ## Main Functionality
//! - `EncodedPayloadCodec`: Codec tag with its minimum peer version
//! - `preferred`: Codec selection from advertised peer versions
//! - `parse_major_minor`: Lenient version string parsing
//!
//! ## Version History
//! | Codec  | Minimum peer version | Description                    |
//! |--------|----------------------|--------------------------------|
//! | LEGACY | 1.0                  | Length-prefixed binary fields  |
//! | CBOR   | 5.0                  | Keyed CBOR map                 |
//!
//! ## ⚠️ Important Note for Next Developer
//! - Never encode CBOR for a peer that has not advertised >= 5.0
//! - Document new codecs in the version history above
//!
//! ## Last Modified
//! v0.1.0 - Initial codec versions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use tessera_common::CommonError;

use crate::error::{CoreError, Result};

// ============================================
// Constants
// ============================================

/// Peer version from which CBOR payloads are understood.
pub const CBOR_MIN_VERSION: (u32, u32) = (5, 0);

// ============================================
// EncodedPayloadCodec
// ============================================

/// Wire format of an encoded payload.
///
/// # Example
/// ```
/// use tessera_core::codec::EncodedPayloadCodec;
///
/// assert_eq!(EncodedPayloadCodec::preferred(["4.0", "5.1"]), EncodedPayloadCodec::Cbor);
/// assert_eq!(EncodedPayloadCodec::preferred(["v2"]), EncodedPayloadCodec::Legacy);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodedPayloadCodec {
    /// Length-prefixed binary format understood by every peer.
    Legacy,
    /// CBOR map format.
    #[default]
    Cbor,
}

impl EncodedPayloadCodec {
    /// Returns the codec new nodes write by default.
    #[must_use]
    pub const fn current() -> Self {
        Self::Cbor
    }

    /// Returns the lowest peer version able to read this codec.
    #[must_use]
    pub const fn minimum_supported_version(self) -> &'static str {
        match self {
            Self::Legacy => "1.0",
            Self::Cbor => "5.0",
        }
    }

    /// Returns the configuration name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Cbor => "cbor",
        }
    }

    /// Picks the codec for a peer from the versions it advertises.
    ///
    /// CBOR is chosen when any advertised version is at least 5.0.
    /// Unparseable versions are ignored.
    #[must_use]
    pub fn preferred<I, S>(peer_versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let supports_cbor = peer_versions
            .into_iter()
            .filter_map(|v| parse_major_minor(v.as_ref()))
            .any(|v| v >= CBOR_MIN_VERSION);

        if supports_cbor {
            Self::Cbor
        } else {
            Self::Legacy
        }
    }
}

impl fmt::Display for EncodedPayloadCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EncodedPayloadCodec {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "cbor" => Ok(Self::Cbor),
            other => Err(CommonError::invalid_input(
                "codec",
                format!("unknown payload codec '{other}'"),
            )
            .into()),
        }
    }
}

/// Parses `"5"`, `"v5"`, `"5.0"` or `"5.0.1"` into `(major, minor)`.
#[must_use]
pub fn parse_major_minor(version: &str) -> Option<(u32, u32)> {
    let trimmed = version.trim();
    let trimmed = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);

    let mut parts = trimmed.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = match parts.next() {
        Some(minor) => minor.parse().ok()?,
        None => 0,
    };
    Some((major, minor))
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_codec() {
        assert_eq!(EncodedPayloadCodec::current(), EncodedPayloadCodec::Cbor);
        assert_eq!(EncodedPayloadCodec::default(), EncodedPayloadCodec::Cbor);
    }

    #[test]
    fn test_minimum_versions() {
        assert_eq!(EncodedPayloadCodec::Legacy.minimum_supported_version(), "1.0");
        assert_eq!(EncodedPayloadCodec::Cbor.minimum_supported_version(), "5.0");
    }

    #[test]
    fn test_version_parsing() {
        assert_eq!(parse_major_minor("5"), Some((5, 0)));
        assert_eq!(parse_major_minor("v5"), Some((5, 0)));
        assert_eq!(parse_major_minor("5.0.1"), Some((5, 0)));
        assert_eq!(parse_major_minor(" 4.12 "), Some((4, 12)));
        assert_eq!(parse_major_minor("abc"), None);
        assert_eq!(parse_major_minor(""), None);
    }

    #[test]
    fn test_preferred_codec() {
        assert_eq!(EncodedPayloadCodec::preferred(["5.0"]), EncodedPayloadCodec::Cbor);
        assert_eq!(EncodedPayloadCodec::preferred(["v6", "x"]), EncodedPayloadCodec::Cbor);
        assert_eq!(EncodedPayloadCodec::preferred(["4.9"]), EncodedPayloadCodec::Legacy);
        assert_eq!(
            EncodedPayloadCodec::preferred(Vec::<String>::new()),
            EncodedPayloadCodec::Legacy
        );
    }

    #[test]
    fn test_codec_names() {
        assert_eq!("LEGACY".parse::<EncodedPayloadCodec>().unwrap(), EncodedPayloadCodec::Legacy);
        assert_eq!(EncodedPayloadCodec::Cbor.to_string(), "cbor");
        assert!("json".parse::<EncodedPayloadCodec>().is_err());
    }
}

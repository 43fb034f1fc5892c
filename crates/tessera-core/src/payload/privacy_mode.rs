// ============================================
// File: crates/tessera-core/src/payload/privacy_mode.rs
// ============================================
//! # Privacy Modes
//!
//! ## Creation Reason
//! A transaction's privacy mode decides which optional payload fields
//! are mandatory and how a payload is stripped for one recipient.
//!
//! ## Wire Values
//! | Flag | Mode                       | Extra required field     |
//! |------|----------------------------|--------------------------|
//! | 0    | `StandardPrivate`          | none                     |
//! | 1    | `PartyProtection`          | none                     |
//! | 2    | `MandatoryRecipients`      | mandatory recipients     |
//! | 3    | `PrivateStateValidation`   | execution hash           |
//!
//! ## ⚠️ Important Note for Next Developer
//! - Flag values are wire-stable and must never change
//! - Unknown flags decode to `StandardPrivate`, not an error
//!
//! ## Last Modified
//! v0.1.0 - Initial privacy modes

use std::fmt;

use serde::{Deserialize, Serialize};

/// Visibility policy of a private transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrivacyMode {
    /// Plain private transaction.
    #[default]
    StandardPrivate,
    /// Affected contracts are checked for consistency.
    PartyProtection,
    /// Some recipients must be included.
    MandatoryRecipients,
    /// All recipients validate the resulting private state.
    PrivateStateValidation,
}

impl PrivacyMode {
    /// Returns the wire flag.
    #[must_use]
    pub const fn flag(self) -> u8 {
        match self {
            Self::StandardPrivate => 0,
            Self::PartyProtection => 1,
            Self::MandatoryRecipients => 2,
            Self::PrivateStateValidation => 3,
        }
    }

    /// Maps a wire flag to a mode. Unknown flags map to `StandardPrivate`.
    #[must_use]
    pub const fn from_flag(flag: u8) -> Self {
        match flag {
            1 => Self::PartyProtection,
            2 => Self::MandatoryRecipients,
            3 => Self::PrivateStateValidation,
            _ => Self::StandardPrivate,
        }
    }

    /// Maps a wide wire integer (CBOR) to a mode, leniently.
    #[must_use]
    pub fn from_wire(value: i128) -> Self {
        u8::try_from(value).map_or(Self::StandardPrivate, Self::from_flag)
    }

    /// Returns the upper-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::StandardPrivate => "STANDARD_PRIVATE",
            Self::PartyProtection => "PARTY_PROTECTION",
            Self::MandatoryRecipients => "MANDATORY_RECIPIENTS",
            Self::PrivateStateValidation => "PRIVATE_STATE_VALIDATION",
        }
    }
}

impl fmt::Display for PrivacyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_are_wire_stable() {
        assert_eq!(PrivacyMode::StandardPrivate.flag(), 0);
        assert_eq!(PrivacyMode::PartyProtection.flag(), 1);
        assert_eq!(PrivacyMode::MandatoryRecipients.flag(), 2);
        assert_eq!(PrivacyMode::PrivateStateValidation.flag(), 3);
    }

    #[test]
    fn test_flag_roundtrip() {
        for mode in [
            PrivacyMode::StandardPrivate,
            PrivacyMode::PartyProtection,
            PrivacyMode::MandatoryRecipients,
            PrivacyMode::PrivateStateValidation,
        ] {
            assert_eq!(PrivacyMode::from_flag(mode.flag()), mode);
        }
    }

    #[test]
    fn test_unknown_flag_is_standard_private() {
        assert_eq!(PrivacyMode::from_flag(4), PrivacyMode::StandardPrivate);
        assert_eq!(PrivacyMode::from_flag(0xFF), PrivacyMode::StandardPrivate);
        assert_eq!(PrivacyMode::from_wire(-1), PrivacyMode::StandardPrivate);
        assert_eq!(PrivacyMode::from_wire(1 << 40), PrivacyMode::StandardPrivate);
        assert_eq!(PrivacyMode::from_wire(3), PrivacyMode::PrivateStateValidation);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&PrivacyMode::MandatoryRecipients).unwrap();
        assert_eq!(json, "\"MANDATORY_RECIPIENTS\"");

        let mode: PrivacyMode = serde_json::from_str("\"PARTY_PROTECTION\"").unwrap();
        assert_eq!(mode, PrivacyMode::PartyProtection);
    }
}

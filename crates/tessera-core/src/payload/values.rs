// ============================================
// File: crates/tessera-core/src/payload/values.rs
// ============================================
//! # Payload Value Types
//!
//! ## Creation Reason
//! Transaction hashes, security hashes and recipient boxes are all plain
//! byte strings on the wire. Wrapping them keeps them from being mixed up
//! while still comparing by content.
//!
//! ## Main Functionality
//! - `TxHash`: Hash identifying a transaction
//! - `SecurityHash`: Consistency hash of an affected transaction
//! - `RecipientBox`: Master key sealed for one recipient
//!
//! ## Last Modified
//! v0.1.0 - Initial value types

/// Declares a byte-string newtype with value equality, ordering and
/// Base64 rendering.
macro_rules! byte_value {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name(Vec<u8>);

        impl $name {
            /// Wraps the given bytes.
            #[must_use]
            pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
                Self(bytes.into())
            }

            /// Parses Base64 text.
            ///
            /// # Errors
            /// Returns a decoding error for invalid Base64.
            pub fn from_base64(text: &str) -> $crate::error::Result<Self> {
                Ok(Self(::tessera_common::types::decode_base64(text)?))
            }

            /// Returns the wrapped bytes.
            #[must_use]
            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }

            /// Consumes the wrapper, returning the bytes.
            #[must_use]
            pub fn into_bytes(self) -> Vec<u8> {
                self.0
            }

            /// Returns the bytes as Base64 text.
            #[must_use]
            pub fn to_base64(&self) -> String {
                ::tessera_common::types::encode_base64(&self.0)
            }

            /// Returns `true` if no bytes are wrapped.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_base64())
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&self.to_base64())
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<Vec<u8>> for $name {
            fn from(bytes: Vec<u8>) -> Self {
                Self(bytes)
            }
        }

        impl From<&[u8]> for $name {
            fn from(bytes: &[u8]) -> Self {
                Self(bytes.to_vec())
            }
        }
    };
}

pub(crate) use byte_value;

byte_value! {
    /// Hash identifying a transaction, usually the digest of its cipher text.
    TxHash
}

byte_value! {
    /// `SHA3-512(cipher_text || affected_cipher_text || affected_master_key)`.
    SecurityHash
}

byte_value! {
    /// A master key sealed under a sender/recipient shared key.
    RecipientBox
}

// ============================================
// Tests
// ============================================

// ============================================
// File: crates/tessera-core/src/privacy_group/util.rs
// ============================================
//! # Privacy Group Identifiers and Encoding
//!
//! ## Creation Reason
//! Independent nodes must agree on a group's id without coordinating,
//! so the id is derived from the member set alone (plus a seed).
//!
//! ## Id Derivation
//! ```text
//! members ──► dedup + sort by bytes ──► [m1, m2, ..., (seed)]
//!                                              │
//!                                              ▼
//!                                   RLP list of byte strings
//!                                              │
//!                                              ▼
//!                                         Keccak-256 ──► id
//! ```
//!
//! ## Binary Layout
//! `name | description | members[] | seed | type name | state name`,
//! each a length-prefixed field (see [`crate::codec::binary`]).
//!
//! ## ⚠️ Important Note for Next Developer
//! - Id derivation is consensus-critical; it must match every peer
//! - `LOOKUP_SEED` is a fixed constant shared with other deployments
//! - Decode recomputes the id; an id is never read from the wire
//!
//! ## Last Modified
//! v0.1.0 - Initial privacy group utilities

use std::collections::BTreeSet;

use rlp::RlpStream;

use tessera_common::PublicKey;

use super::group::{GroupState, GroupType, PrivacyGroup, PrivacyGroupId};
use crate::codec::binary::{FieldReader, FieldWriter};
use crate::crypto::digest::keccak256;
use crate::error::{CoreError, Result};

/// Seed used for lookup ids (`5375ba871e5c3d0f1d055b5da0ac02ea035bed38`).
pub const LOOKUP_SEED: [u8; 20] = [
    0x53, 0x75, 0xba, 0x87, 0x1e, 0x5c, 0x3d, 0x0f, 0x1d, 0x05, 0x5b, 0x5d, 0xa0, 0xac, 0x02,
    0xea, 0x03, 0x5b, 0xed, 0x38,
];

// ============================================
// PrivacyGroupUtil Trait
// ============================================

/// Privacy group id derivation and binary encoding.
///
/// Every method has a provided implementation; implementors only need
/// to override what they change.
pub trait PrivacyGroupUtil: Send + Sync {
    /// Derives a group id from `members` and an optional `seed`.
    ///
    /// The result does not depend on member order or duplicates.
    fn generate_id(&self, members: &[PublicKey], seed: Option<&[u8]>) -> Vec<u8> {
        let sorted: BTreeSet<&PublicKey> = members.iter().collect();

        let mut stream = RlpStream::new_list(sorted.len() + usize::from(seed.is_some()));
        for member in sorted {
            stream.append(&member.as_bytes().to_vec());
        }
        if let Some(seed) = seed {
            stream.append(&seed.to_vec());
        }

        keccak256(&stream.out()).to_vec()
    }

    /// Derives the id used to look groups up by member set.
    fn generate_lookup_id(&self, members: &[PublicKey]) -> Vec<u8> {
        self.generate_id(members, Some(LOOKUP_SEED.as_slice()))
    }

    /// Returns the id a group of this type and membership must carry.
    fn derive_id(&self, group: &PrivacyGroup) -> PrivacyGroupId {
        let seed = match group.group_type() {
            GroupType::Legacy => None,
            GroupType::Pantheon | GroupType::Resident => Some(group.seed()),
        };
        PrivacyGroupId::new(self.generate_id(group.members(), seed))
    }

    /// Serializes `group`. The id is not written.
    fn encode(&self, group: &PrivacyGroup) -> Vec<u8> {
        let mut writer = FieldWriter::new();
        writer.put_field(group.name().as_bytes());
        writer.put_field(group.description().as_bytes());
        writer.put_array(group.members());
        writer.put_field(group.seed());
        writer.put_field(group.group_type().name().as_bytes());
        writer.put_field(group.state().name().as_bytes());
        writer.finish()
    }

    /// Parses bytes produced by [`PrivacyGroupUtil::encode`] and
    /// recomputes the id.
    ///
    /// # Errors
    /// `MalformedPayload` for truncated input, invalid member keys,
    /// non-UTF-8 text or unknown type/state names.
    fn decode(&self, bytes: &[u8]) -> Result<PrivacyGroup> {
        let mut reader = FieldReader::new(bytes);

        let name = utf8(reader.read_field("group name")?, "group name")?;
        let description = utf8(reader.read_field("group description")?, "group description")?;
        let members = reader
            .read_array("group members")?
            .iter()
            .map(|bytes| {
                PublicKey::from_bytes(bytes)
                    .map_err(|e| CoreError::malformed(format!("invalid group member: {e}")))
            })
            .collect::<Result<Vec<_>>>()?;
        let seed = reader.read_field("group seed")?;
        let group_type: GroupType = utf8(reader.read_field("group type")?, "group type")?.parse()?;
        let state: GroupState = utf8(reader.read_field("group state")?, "group state")?.parse()?;

        let group = PrivacyGroup::builder()
            .name(name)
            .description(description)
            .members(members)
            .seed(seed)
            .group_type(group_type)
            .state(state)
            .build();

        let id = self.derive_id(&group);
        Ok(group.to_builder().id(id).build())
    }
}

fn utf8(bytes: Vec<u8>, what: &str) -> Result<String> {
    String::from_utf8(bytes).map_err(|_| CoreError::malformed(format!("{what} is not UTF-8")))
}

/// Standard privacy group utilities.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultPrivacyGroupUtil;

impl PrivacyGroupUtil for DefaultPrivacyGroupUtil {}

// ============================================
// Tests
// ============================================

// ============================================
// File: crates/tessera-core/src/privacy_group/group.rs
// ============================================
//! # Privacy Groups
//!
//! ## Creation Reason
//! A privacy group names a set of members that jointly receive a class
//! of private transactions.
//!
//! ## Main Functionality
//! - `PrivacyGroupId`: Byte identifier, rendered as Base64
//! - `PrivacyGroup`: Group record with builder-style construction
//! - `GroupType` / `GroupState`: Encoded by upper-case name
//!
//! ## ⚠️ Important Note for Next Developer
//! - Ids of LEGACY and PANTHEON groups are derived from the members,
//!   never assigned
//!
//! ## Last Modified
//! v0.1.0 - Initial privacy group model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use tessera_common::PublicKey;

use crate::error::{CoreError, Result};
use crate::payload::values::byte_value;

byte_value! {
    /// Opaque privacy group identifier compared by bytes.
    PrivacyGroupId
}

// ============================================
// GroupType / GroupState
// ============================================

/// Origin of a privacy group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GroupType {
    /// Implicit group of a legacy transaction's participants.
    #[default]
    Legacy,
    /// Group created through the Pantheon-style API with a seed.
    Pantheon,
    /// Group of keys resident on the same node.
    Resident,
}

impl GroupType {
    /// Returns the wire name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Legacy => "LEGACY",
            Self::Pantheon => "PANTHEON",
            Self::Resident => "RESIDENT",
        }
    }
}

impl fmt::Display for GroupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GroupType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "LEGACY" => Ok(Self::Legacy),
            "PANTHEON" => Ok(Self::Pantheon),
            "RESIDENT" => Ok(Self::Resident),
            other => Err(CoreError::malformed(format!("unknown group type '{other}'"))),
        }
    }
}

/// Lifecycle state of a privacy group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GroupState {
    /// Group is in use.
    #[default]
    Active,
    /// Group was deleted.
    Deleted,
}

impl GroupState {
    /// Returns the wire name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Deleted => "DELETED",
        }
    }
}

impl fmt::Display for GroupState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GroupState {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "DELETED" => Ok(Self::Deleted),
            other => Err(CoreError::malformed(format!("unknown group state '{other}'"))),
        }
    }
}

// ============================================
// PrivacyGroup
// ============================================

/// A named set of members.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrivacyGroup {
    id: PrivacyGroupId,
    name: String,
    description: String,
    members: Vec<PublicKey>,
    seed: Vec<u8>,
    group_type: GroupType,
    state: GroupState,
}

impl PrivacyGroup {
    /// Starts a builder with default type and state.
    #[must_use]
    pub fn builder() -> PrivacyGroupBuilder {
        PrivacyGroupBuilder::default()
    }

    /// Starts a builder pre-filled with this group's fields.
    #[must_use]
    pub fn to_builder(&self) -> PrivacyGroupBuilder {
        PrivacyGroupBuilder {
            group: self.clone(),
        }
    }

    /// Group identifier.
    #[must_use]
    pub const fn id(&self) -> &PrivacyGroupId {
        &self.id
    }

    /// Human readable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-form description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Member keys in insertion order.
    #[must_use]
    pub fn members(&self) -> &[PublicKey] {
        &self.members
    }

    /// Seed mixed into the id of non-legacy groups.
    #[must_use]
    pub fn seed(&self) -> &[u8] {
        &self.seed
    }

    /// Group type.
    #[must_use]
    pub const fn group_type(&self) -> GroupType {
        self.group_type
    }

    /// Group state.
    #[must_use]
    pub const fn state(&self) -> GroupState {
        self.state
    }
}

/// Builder for [`PrivacyGroup`].
#[derive(Debug, Clone, Default)]
pub struct PrivacyGroupBuilder {
    group: PrivacyGroup,
}

impl PrivacyGroupBuilder {
    /// Sets the id.
    #[must_use]
    pub fn id(mut self, id: PrivacyGroupId) -> Self {
        self.group.id = id;
        self
    }

    /// Sets the name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.group.name = name.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.group.description = description.into();
        self
    }

    /// Sets the members.
    #[must_use]
    pub fn members(mut self, members: Vec<PublicKey>) -> Self {
        self.group.members = members;
        self
    }

    /// Sets the seed.
    #[must_use]
    pub fn seed(mut self, seed: impl Into<Vec<u8>>) -> Self {
        self.group.seed = seed.into();
        self
    }

    /// Sets the type.
    #[must_use]
    pub fn group_type(mut self, group_type: GroupType) -> Self {
        self.group.group_type = group_type;
        self
    }

    /// Sets the state.
    #[must_use]
    pub fn state(mut self, state: GroupState) -> Self {
        self.group.state = state;
        self
    }

    /// Returns the group.
    #[must_use]
    pub fn build(self) -> PrivacyGroup {
        self.group
    }
}

// ============================================
// Tests
// ============================================

// ============================================
// File: crates/tessera-core/src/privacy_group/mod.rs
// ============================================
//! # Privacy Groups
//!
//! ## Main Functionality
//! - [`group`]: `PrivacyGroup`, `PrivacyGroupId`, type and state
//! - [`util`]: Deterministic id derivation and binary encoding
//!
//! ## Last Modified
//! v0.1.0 - Initial privacy group module

pub mod group;
pub mod util;

pub use group::{GroupState, GroupType, PrivacyGroup, PrivacyGroupBuilder, PrivacyGroupId};
pub use util::{DefaultPrivacyGroupUtil, PrivacyGroupUtil, LOOKUP_SEED};

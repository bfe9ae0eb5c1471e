// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Mutation observation types.

use super::NodeId;

/// What changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationKind {
    /// Children were added to or removed from the target.
    ChildList,
    /// An attribute of the target was written.
    Attributes { name: String },
    /// The data of a text node changed.
    CharacterData,
}

/// One observed change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
    pub kind: MutationKind,
    pub target: NodeId,
}

/// Which changes an observer wants to hear about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ObserveOptions {
    pub child_list: bool,
    pub attributes: bool,
    pub character_data: bool,
    /// Observe the whole body subtree rather than the body alone.
    pub subtree: bool,
}

impl ObserveOptions {
    /// Everything beneath the body.
    pub fn all() -> Self {
        Self {
            child_list: true,
            attributes: true,
            character_data: true,
            subtree: true,
        }
    }

    pub(super) fn accepts(&self, kind: &MutationKind) -> bool {
        match kind {
            MutationKind::ChildList => self.child_list,
            MutationKind::Attributes { .. } => self.attributes,
            MutationKind::CharacterData => self.character_data,
        }
    }
}

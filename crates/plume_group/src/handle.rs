//! Group identity and generation-stamped particle handles.
//!
//! A [`ParticleHandle`] is a plain value `(group, index, generation)`. It owns
//! nothing; the owning [`Group`](crate::Group) checks it on every access and
//! rejects it once the group's generation has moved on.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unique identifier for a particle group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(pub Uuid);

impl GroupId {
    /// Allocate a fresh, random group id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GroupId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Group({})", self.0)
    }
}

/// A reference to one particle slot, valid for a single group generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticleHandle {
    group: GroupId,
    index: usize,
    generation: u64,
}

impl ParticleHandle {
    pub(crate) const fn new(group: GroupId, index: usize, generation: u64) -> Self {
        Self {
            group,
            index,
            generation,
        }
    }

    /// The group that issued this handle.
    #[must_use]
    pub const fn group(&self) -> GroupId {
        self.group
    }

    /// The slot this handle points at.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The group generation this handle was issued at.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

impl fmt::Display for ParticleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Particle {} of {} (generation {})",
            self.index, self.group, self.generation
        )
    }
}

//! Iteration over the alive particles of a group.
//!
//! Two flavours are provided. [`Iter`] borrows the group and is a normal
//! [`Iterator`]; the borrow keeps the group from being updated underneath it.
//! [`ParticleCursor`] holds no borrow, so it can be advanced between
//! mutations of the group, and is checked against the group's generation on
//! every step instead.

use std::iter::FusedIterator;

use crate::error::GroupError;
use crate::group::Group;
use crate::handle::{GroupId, ParticleHandle};

/// A forward-only position in a group's alive particles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticleCursor {
    group: GroupId,
    next: usize,
    generation: u64,
}

impl ParticleCursor {
    pub(crate) const fn new(group: GroupId, generation: u64) -> Self {
        Self {
            group,
            next: 0,
            generation,
        }
    }

    /// The group generation this cursor was issued at.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Step to the next alive particle of `group`.
    ///
    /// Returns `Ok(None)` once the incorporated region is exhausted.
    ///
    /// # Errors
    ///
    /// [`GroupError::TypeMismatch`] if `group` did not issue this cursor,
    /// [`GroupError::InvalidReference`] if it has been updated since.
    pub fn next_particle(&mut self, group: &Group) -> Result<Option<ParticleHandle>, GroupError> {
        group.check_reference(self.group, self.generation)?;
        let store = group.store();
        match store.next_alive(self.next) {
            Some(index) => {
                self.next = index + 1;
                Ok(Some(ParticleHandle::new(self.group, index, self.generation)))
            }
            None => {
                self.next = store.region_len();
                Ok(None)
            }
        }
    }
}

/// Borrowing iterator over handles of a group's alive particles.
#[derive(Debug)]
pub struct Iter<'g> {
    group: &'g Group,
    cursor: ParticleCursor,
}

impl<'g> Iter<'g> {
    pub(crate) fn new(group: &'g Group) -> Self {
        Self {
            group,
            cursor: group.cursor(),
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = ParticleHandle;

    fn next(&mut self) -> Option<Self::Item> {
        // The shared borrow of the group rules out a generation change, so
        // the cursor cannot fail here.
        self.cursor.next_particle(self.group).ok().flatten()
    }
}

impl FusedIterator for Iter<'_> {}

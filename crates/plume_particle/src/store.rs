//! Dense particle storage and the per-update compaction sweep.
//!
//! The store keeps one contiguous array laid out as
//!
//! ```text
//! [0, active)                 incorporated particles, alive or killed-but-unreclaimed
//! [active, active + new)      staged particles, invisible until the next compaction
//! ```
//!
//! Compaction pulls staged particles into dead incorporated slots, ages every
//! particle that stays alive, and trims dead records off the end. Alive
//! incorporated particles are never moved, so draw order is stable across
//! frames.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::ParticleError;
use crate::record::ParticleRecord;

/// Growth factors below this are raised to it so growth stays geometric.
const MIN_GROWTH_FACTOR: f32 = 1.5;

/// Sizing policy for a [`ParticleStore`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Slots allocated up front. Values below 1 are treated as 1.
    pub initial_capacity: usize,
    /// Multiplier applied to the capacity whenever the store is full.
    pub growth_factor: f32,
}

impl StoreConfig {
    /// Override the initial slot count.
    #[must_use]
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Override the growth multiplier.
    #[must_use]
    pub fn with_growth_factor(mut self, factor: f32) -> Self {
        self.growth_factor = factor;
        self
    }

    /// The capacity to grow to from a full store of `current` slots.
    #[must_use]
    pub fn next_capacity(&self, current: usize) -> usize {
        let factor = if self.growth_factor.is_finite() {
            self.growth_factor.max(MIN_GROWTH_FACTOR)
        } else {
            MIN_GROWTH_FACTOR
        };
        let grown = (current as f64 * f64::from(factor)).ceil() as usize;
        grown.max(current + 1).max(self.initial_capacity.max(1))
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 100,
            growth_factor: 2.0,
        }
    }
}

/// What a single compaction pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompactionReport {
    /// Staged particles considered by this pass.
    pub staged: usize,
    /// Staged particles moved into dead incorporated slots.
    pub holes_filled: usize,
    /// Slots released from the end of the array.
    pub released: usize,
    /// Alive particles after the pass.
    pub alive: usize,
    /// Dead records left inside the incorporated region.
    pub killed: usize,
}

/// A growable, contiguous array of [`ParticleRecord`]s.
#[derive(Debug, Clone)]
pub struct ParticleStore {
    /// Incorporated records followed by staged records.
    /// `records.len() == active + new_count` at all times.
    records: Vec<ParticleRecord>,
    /// End of the incorporated region.
    active: usize,
    /// Staged records at `[active, active + new_count)`.
    new_count: usize,
    /// Dead records inside `[0, active)` as of the last compaction.
    killed: usize,
    config: StoreConfig,
}

impl ParticleStore {
    /// Create an empty store with the default sizing policy.
    ///
    /// # Errors
    ///
    /// Returns [`ParticleError::OutOfMemory`] if the initial allocation fails.
    pub fn new() -> Result<Self, ParticleError> {
        Self::with_config(StoreConfig::default())
    }

    /// Create an empty store with `config.initial_capacity` slots reserved.
    ///
    /// # Errors
    ///
    /// Returns [`ParticleError::OutOfMemory`] if the initial allocation fails.
    pub fn with_config(config: StoreConfig) -> Result<Self, ParticleError> {
        let requested = config.initial_capacity.max(1);
        let mut records = Vec::new();
        records
            .try_reserve_exact(requested)
            .map_err(|_| ParticleError::OutOfMemory { requested })?;
        Ok(Self {
            records,
            active: 0,
            new_count: 0,
            killed: 0,
            config,
        })
    }

    /// The sizing policy in effect.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Stage one new particle slot, growing the array if it is full.
    ///
    /// The slot is initialised to [`ParticleRecord::NEW`] and its index is
    /// returned. Existing records are preserved across growth.
    ///
    /// # Errors
    ///
    /// Returns [`ParticleError::OutOfMemory`] if the array cannot grow.
    pub fn reserve_one(&mut self) -> Result<usize, ParticleError> {
        let len = self.records.len();
        let capacity = self.records.capacity();
        if len == capacity {
            let requested = self.config.next_capacity(capacity);
            self.records
                .try_reserve_exact(requested - len)
                .map_err(|_| ParticleError::OutOfMemory { requested })?;
            trace!(
                from = capacity,
                to = self.records.capacity(),
                "particle store grown"
            );
        }
        self.records.push(ParticleRecord::NEW);
        self.new_count += 1;
        Ok(len)
    }

    /// Mark the record at `index` dead. Out-of-range indices are ignored.
    pub fn mark_dead(&mut self, index: usize) {
        if let Some(record) = self.records.get_mut(index) {
            record.kill();
        }
    }

    /// Alive particles visible to iteration: the incorporated region minus
    /// the killed records it still holds.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active - self.killed
    }

    /// End of the incorporated region, dead records included.
    #[must_use]
    pub fn region_len(&self) -> usize {
        self.active
    }

    /// Particles staged since the last compaction.
    #[must_use]
    pub fn new_pending_count(&self) -> usize {
        self.new_count
    }

    /// Killed records left unreclaimed by the last compaction.
    #[must_use]
    pub fn killed_pending_count(&self) -> usize {
        self.killed
    }

    /// Slots currently allocated.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.records.capacity()
    }

    /// The record at `index`, staged records included.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ParticleRecord> {
        self.records.get(index)
    }

    /// The record at `index`, staged records included.
    #[must_use]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut ParticleRecord> {
        self.records.get_mut(index)
    }

    /// The first alive incorporated index at or after `from`.
    #[must_use]
    pub fn next_alive(&self, from: usize) -> Option<usize> {
        let end = self.active;
        (from..end).find(|&i| self.records[i].is_alive())
    }

    /// The incorporated region, dead records included.
    #[must_use]
    pub fn incorporated(&self) -> &[ParticleRecord] {
        &self.records[..self.active]
    }

    /// Incorporate staged particles, reclaim dead slots, and (if
    /// `apply_time_step`) advance every surviving particle by `dt`.
    ///
    /// Runs as one left-to-right sweep. A `head` cursor walks the array from
    /// the front; whenever it lands on a dead record and staged particles
    /// remain, the last staged record is pulled from `tail` into that hole.
    /// Alive records at `head` are advanced in place. Once the cursors meet,
    /// dead records at the end are trimmed.
    ///
    /// Interior dead records are only reclaimed when a staged particle is
    /// available to fill them; the remainder is reported by
    /// [`killed_pending_count`](Self::killed_pending_count) and skipped by
    /// iteration.
    pub fn compact_and_advance(&mut self, dt: f32, apply_time_step: bool) -> CompactionReport {
        let staged = self.new_count;
        let before = self.records.len();
        let records = &mut self.records;

        let mut remaining_new = staged;
        let mut head = 0;
        let mut tail = before;
        let mut alive = 0;
        let mut holes_filled = 0;

        while head < tail {
            if !records[head].is_alive() {
                if remaining_new > 0 {
                    remaining_new -= 1;
                    tail -= 1;
                    if records[tail].is_alive() {
                        records[head] = records[tail];
                        holes_filled += 1;
                    }
                } else {
                    head += 1;
                }
            }
            while head < tail && records[head].is_alive() {
                if apply_time_step {
                    records[head].advance(dt);
                }
                alive += 1;
                head += 1;
            }
        }

        while tail > 0 && !records[tail - 1].is_alive() {
            tail -= 1;
        }
        records.truncate(tail);

        self.active = tail;
        self.killed = tail - alive;
        self.new_count = 0;

        CompactionReport {
            staged,
            holes_filled,
            released: before - tail,
            alive,
            killed: self.killed,
        }
    }
}

//! # plume_particle
//!
//! The storage half of a particle group: what a particle is, how its fields
//! are addressed, and how a dense array of them is grown and compacted.
//!
//! This crate provides:
//!
//! - [`ParticleRecord`]: the fixed-layout per-particle simulation state.
//! - [`ParticleField`] / [`FieldValue`]: an enum-indexed accessor table over
//!   the record's fields.
//! - [`ParticleTemplate`]: template and per-field overrides used to populate
//!   freshly staged particles.
//! - [`ParticleStore`]: the growable record array with staged/killed
//!   bookkeeping and the single-pass compaction sweep.

pub mod error;
pub mod field;
pub mod record;
pub mod store;
pub mod template;

pub use error::ParticleError;
pub use field::{FieldKind, FieldValue, ParticleField};
pub use record::ParticleRecord;
pub use store::{CompactionReport, ParticleStore, StoreConfig};
pub use template::ParticleTemplate;

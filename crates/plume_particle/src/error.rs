//! Storage-layer error types.

use crate::field::{FieldKind, ParticleField};

/// Errors raised by particle records, templates, and the particle store.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParticleError {
    /// The backing array could not grow to hold another particle.
    #[error("out of memory growing particle store to {requested} slots")]
    OutOfMemory {
        /// The slot count the store attempted to reach.
        requested: usize,
    },

    /// More than one template was supplied for a single new particle.
    #[error("too many templates: expected at most 1, got {given}")]
    TooManyArguments {
        /// Number of templates supplied.
        given: usize,
    },

    /// A field name did not match any particle field.
    #[error("unknown particle field `{0}`")]
    UnknownField(String),

    /// A value of the wrong shape was assigned to a field.
    #[error("field `{field}` expects a {expected} value")]
    TypeMismatch {
        /// The field being assigned.
        field: ParticleField,
        /// The kind of value the field stores.
        expected: FieldKind,
    },
}

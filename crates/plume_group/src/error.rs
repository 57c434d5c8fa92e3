//! Group-layer error types.

use plume_particle::{ParticleError, ParticleField};

use crate::handle::GroupId;

/// Error type returned by controllers, renderers, and particle systems.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while operating on a [`Group`](crate::Group).
#[derive(Debug, thiserror::Error)]
pub enum GroupError {
    /// A handle, cursor, or view was used after the group it came from was
    /// updated. Fetch a fresh one.
    #[error("invalid particle reference: issued at generation {issued}, group is at {current}")]
    InvalidReference {
        /// Generation recorded when the reference was issued.
        issued: u64,
        /// The group's current generation.
        current: u64,
    },

    /// A reference issued by a different group was passed where a particle
    /// of this group was required.
    #[error("expected a particle of group {expected}, got one of group {found}")]
    TypeMismatch {
        /// The group that was asked.
        expected: GroupId,
        /// The group that issued the reference.
        found: GroupId,
    },

    /// `unbind_controller` was given a controller that is not bound.
    #[error("controller not bound")]
    NotBound,

    /// `clamp` was called with `min > max` (or a `NaN` bound).
    #[error("clamp: expected min <= max, got min={min} max={max}")]
    ValueError {
        /// Lower bound supplied.
        min: f32,
        /// Upper bound supplied.
        max: f32,
    },

    /// A vector component index past the end of the vector.
    #[error("index {index} out of range for vector of length {len}")]
    IndexOutOfRange {
        /// Index requested.
        index: usize,
        /// Components in the vector.
        len: usize,
    },

    /// An axis name that is not one of `x y z r g b a`, or `a` on a
    /// 3-component vector.
    #[error("unknown axis `{0}`")]
    UnknownAxis(String),

    /// A vector view was requested for a scalar field.
    #[error("field `{0}` is not a vector")]
    NotAVector(ParticleField),

    /// A storage-layer error.
    #[error(transparent)]
    Particle(#[from] ParticleError),

    /// A controller returned an error; later controllers were not run.
    #[error("controller failed")]
    Controller(#[source] BoxError),

    /// The renderer returned an error.
    #[error("renderer failed")]
    Renderer(#[source] BoxError),

    /// The particle system refused to register the group.
    #[error("failed to register group with particle system")]
    Registration(#[source] BoxError),

    /// A shared collaborator was already borrowed, e.g. a controller that
    /// updates the group it is being applied to.
    #[error("{0} is already in use")]
    Reentrant(&'static str),
}

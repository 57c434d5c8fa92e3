//! # plume_group
//!
//! Particle groups for the plume particle engine.
//!
//! A [`Group`] is a dense, growable collection of particles. Each call to
//! [`Group::update`] incorporates particles staged since the last frame,
//! reclaims the slots of killed particles in a single compaction sweep, and
//! applies the bound controllers. Particles are addressed through
//! [`ParticleHandle`]s and [`VectorView`]s, which are stamped with the
//! group's generation and refused once the group has moved on.
//!
//! This crate provides:
//!
//! - [`Group`] / [`GroupBuilder`]: lifecycle, dispatch, and particle access.
//! - [`Controller`], [`Renderer`], [`ParticleSystem`]: the collaborator
//!   seams, with closure implementations for the first two.
//! - [`ControllerRegistry`]: a ready-made particle system holding shared
//!   controllers.
//! - [`ParticleContext`]: the host-owned default system and configuration.
//!
//! ```
//! use plume_group::{Group, ParticleTemplate};
//! use plume_math::Vec3;
//!
//! let mut group = Group::builder().build()?;
//! group.new_particle(&ParticleTemplate::new().velocity(Vec3::X))?;
//! assert_eq!(group.len(), 0);
//! group.update(0.5)?;
//! assert_eq!(group.len(), 1);
//! # Ok::<(), plume_group::GroupError>(())
//! ```

pub mod config;
pub mod context;
pub mod controller;
pub mod error;
pub mod group;
pub mod handle;
pub mod iter;
pub mod renderer;
pub mod system;
pub mod view;

pub use config::GroupConfig;
pub use context::ParticleContext;
pub use controller::{Controller, SharedController, same_controller, shared_controller};
pub use error::{BoxError, GroupError};
pub use group::{Group, GroupBuilder};
pub use handle::{GroupId, ParticleHandle};
pub use iter::{Iter, ParticleCursor};
pub use renderer::{Renderer, SharedRenderer, shared_renderer};
pub use system::{ControllerRegistry, ParticleSystem, SharedSystem, shared_system};
pub use view::VectorView;

pub use plume_particle::{
    FieldKind, FieldValue, ParticleError, ParticleField, ParticleRecord, ParticleTemplate,
    StoreConfig,
};

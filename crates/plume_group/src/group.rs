//! Particle groups and their per-frame update.
//!
//! A [`Group`] owns one [`ParticleStore`]. Particles created with
//! [`Group::new_particle`] are staged and become visible on the next
//! [`Group::update`], which also compacts the store, bumps the group's
//! generation (invalidating every outstanding handle), and applies the
//! system's controllers followed by the group's own.

use std::fmt;
use std::rc::Rc;

use plume_particle::{FieldKind, FieldValue, ParticleField, ParticleRecord, ParticleStore, ParticleTemplate};
use tracing::{debug, info, warn};

use crate::config::GroupConfig;
use crate::controller::{SharedController, same_controller};
use crate::error::GroupError;
use crate::handle::{GroupId, ParticleHandle};
use crate::iter::{Iter, ParticleCursor};
use crate::renderer::SharedRenderer;
use crate::system::SharedSystem;
use crate::view::VectorView;

/// A collection of particles that share controllers and a renderer.
pub struct Group {
    id: GroupId,
    store: ParticleStore,
    /// Incremented once per `update`; handles from older generations are
    /// rejected.
    generation: u64,
    config: GroupConfig,
    controllers: Vec<SharedController>,
    renderer: Option<SharedRenderer>,
    system: Option<SharedSystem>,
}

impl Group {
    /// Start building a group. The builder is detached from any particle
    /// system; use [`ParticleContext::group`](crate::ParticleContext::group)
    /// to bind to a host's default system.
    pub fn builder() -> GroupBuilder {
        GroupBuilder::new()
    }

    /// This group's unique id.
    #[must_use]
    pub fn id(&self) -> GroupId {
        self.id
    }

    /// The current generation. Handles stamped with any other value are
    /// stale.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The configuration the group was built with.
    #[must_use]
    pub fn config(&self) -> &GroupConfig {
        &self.config
    }

    /// Number of alive, incorporated particles. Staged particles are not
    /// counted until the next update.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.active_count()
    }

    /// Returns `true` if no incorporated particle is alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Particles staged since the last update.
    #[must_use]
    pub fn new_count(&self) -> usize {
        self.store.new_pending_count()
    }

    /// Killed particles the last update left unreclaimed.
    #[must_use]
    pub fn killed_count(&self) -> usize {
        self.store.killed_pending_count()
    }

    /// Particle slots currently allocated.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    pub(crate) fn store(&self) -> &ParticleStore {
        &self.store
    }

    /// Stage a new particle initialised from `template`.
    ///
    /// The particle is not visible to [`len`](Self::len), iteration, or the
    /// renderer until the next [`update`](Self::update). The returned handle
    /// is valid for the current generation.
    ///
    /// # Errors
    ///
    /// - [`ParticleError::TooManyArguments`](plume_particle::ParticleError::TooManyArguments)
    ///   if the template carries more than one source record.
    /// - [`ParticleError::OutOfMemory`](plume_particle::ParticleError::OutOfMemory)
    ///   if the store cannot grow.
    pub fn new_particle(&mut self, template: &ParticleTemplate) -> Result<ParticleHandle, GroupError> {
        let record = template.resolve()?;
        let index = self.store.reserve_one()?;
        if let Some(slot) = self.store.get_mut(index) {
            *slot = record;
        }
        Ok(ParticleHandle::new(self.id, index, self.generation))
    }

    /// Mark a particle dead. Its slot is reclaimed by a later update.
    ///
    /// Killing an already dead particle through a current handle is a no-op.
    ///
    /// # Errors
    ///
    /// [`GroupError::TypeMismatch`] for a handle of another group,
    /// [`GroupError::InvalidReference`] for a stale handle.
    pub fn kill(&mut self, handle: ParticleHandle) -> Result<(), GroupError> {
        let index = self.resolve(handle)?;
        self.store.mark_dead(index);
        Ok(())
    }

    /// Advance the group by one frame of `dt` seconds.
    ///
    /// Invalidates every outstanding handle, cursor, and view; incorporates
    /// staged particles; reclaims dead slots; then applies the particle
    /// system's controllers followed by the group's own, in order.
    ///
    /// # Errors
    ///
    /// The first controller error stops dispatch and is returned as
    /// [`GroupError::Controller`]. Controllers already applied are not
    /// rolled back.
    pub fn update(&mut self, dt: f32) -> Result<(), GroupError> {
        self.generation = self.generation.wrapping_add(1);
        let report = self
            .store
            .compact_and_advance(dt, self.config.apply_time_step);

        debug!(
            group = %self.id,
            generation = self.generation,
            dt,
            staged = report.staged,
            holes_filled = report.holes_filled,
            released = report.released,
            alive = report.alive,
            killed = report.killed,
            "group compacted"
        );

        let system_controllers = match &self.system {
            Some(system) => system
                .try_borrow()
                .map_err(|_| GroupError::Reentrant("particle system"))?
                .controllers()
                .to_vec(),
            None => Vec::new(),
        };
        let own_controllers = self.controllers.clone();

        for controller in system_controllers.iter().chain(own_controllers.iter()) {
            let mut controller = controller
                .try_borrow_mut()
                .map_err(|_| GroupError::Reentrant("controller"))?;
            if let Err(source) = controller.apply(dt, self) {
                warn!(
                    group = %self.id,
                    generation = self.generation,
                    error = %source,
                    "controller failed, skipping remaining controllers"
                );
                return Err(GroupError::Controller(source));
            }
        }

        Ok(())
    }

    /// Append controllers to this group, preserving order. Duplicates are
    /// allowed and are applied once per occurrence.
    pub fn bind_controller<I>(&mut self, controllers: I)
    where
        I: IntoIterator<Item = SharedController>,
    {
        self.controllers.extend(controllers);
    }

    /// Remove the first binding of `controller`.
    ///
    /// # Errors
    ///
    /// [`GroupError::NotBound`] if the controller is not bound to this group.
    pub fn unbind_controller(&mut self, controller: &SharedController) -> Result<(), GroupError> {
        let pos = self
            .controllers
            .iter()
            .position(|c| same_controller(c, controller))
            .ok_or(GroupError::NotBound)?;
        self.controllers.remove(pos);
        Ok(())
    }

    /// Controllers bound directly to this group, in application order.
    #[must_use]
    pub fn controllers(&self) -> &[SharedController] {
        &self.controllers
    }

    /// The bound renderer, if any.
    #[must_use]
    pub fn renderer(&self) -> Option<&SharedRenderer> {
        self.renderer.as_ref()
    }

    /// Replace the bound renderer.
    pub fn set_renderer(&mut self, renderer: Option<SharedRenderer>) {
        self.renderer = renderer;
    }

    /// The particle system this group is registered with, if any.
    #[must_use]
    pub fn system(&self) -> Option<&SharedSystem> {
        self.system.as_ref()
    }

    /// Draw the group with its renderer. Without a renderer this does
    /// nothing.
    ///
    /// # Errors
    ///
    /// A renderer error is returned as [`GroupError::Renderer`].
    pub fn draw(&self) -> Result<(), GroupError> {
        if let Some(renderer) = &self.renderer {
            let mut renderer = renderer
                .try_borrow_mut()
                .map_err(|_| GroupError::Reentrant("renderer"))?;
            renderer.draw(self).map_err(|source| {
                warn!(group = %self.id, error = %source, "renderer failed");
                GroupError::Renderer(source)
            })?;
        }
        Ok(())
    }

    /// A restartable cursor over alive particles, stamped with the current
    /// generation.
    #[must_use]
    pub fn cursor(&self) -> ParticleCursor {
        ParticleCursor::new(self.id, self.generation)
    }

    /// Iterate handles of alive, incorporated particles in storage order.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// Iterate the records of alive, incorporated particles in storage order.
    pub fn alive_records(&self) -> impl Iterator<Item = &ParticleRecord> + '_ {
        self.store.incorporated().iter().filter(|r| r.is_alive())
    }

    /// Borrow the record behind `handle`.
    ///
    /// # Errors
    ///
    /// [`GroupError::TypeMismatch`] or [`GroupError::InvalidReference`].
    pub fn particle(&self, handle: ParticleHandle) -> Result<&ParticleRecord, GroupError> {
        let index = self.resolve(handle)?;
        self.store
            .get(index)
            .ok_or_else(|| self.stale(handle.generation()))
    }

    /// Mutably borrow the record behind `handle`.
    ///
    /// # Errors
    ///
    /// [`GroupError::TypeMismatch`] or [`GroupError::InvalidReference`].
    pub fn particle_mut(&mut self, handle: ParticleHandle) -> Result<&mut ParticleRecord, GroupError> {
        let index = self.resolve(handle)?;
        let stale = self.stale(handle.generation());
        self.store.get_mut(index).ok_or(stale)
    }

    /// Copy the record behind `handle`, e.g. to use as a template.
    ///
    /// # Errors
    ///
    /// [`GroupError::TypeMismatch`] or [`GroupError::InvalidReference`].
    pub fn snapshot(&self, handle: ParticleHandle) -> Result<ParticleRecord, GroupError> {
        self.particle(handle).copied()
    }

    /// Read one field of a particle.
    ///
    /// # Errors
    ///
    /// [`GroupError::TypeMismatch`] or [`GroupError::InvalidReference`].
    pub fn field(&self, handle: ParticleHandle, field: ParticleField) -> Result<FieldValue, GroupError> {
        Ok(self.particle(handle)?.get(field))
    }

    /// Assign one field of a particle.
    ///
    /// # Errors
    ///
    /// [`GroupError::TypeMismatch`] or [`GroupError::InvalidReference`] for
    /// the handle; [`ParticleError::TypeMismatch`](plume_particle::ParticleError::TypeMismatch)
    /// if `value` does not fit `field`.
    pub fn set_field(
        &mut self,
        handle: ParticleHandle,
        field: ParticleField,
        value: impl Into<FieldValue>,
    ) -> Result<(), GroupError> {
        self.particle_mut(handle)?.set(field, value.into())?;
        Ok(())
    }

    /// A view over one vector or colour field of a particle.
    ///
    /// # Errors
    ///
    /// [`GroupError::TypeMismatch`] or [`GroupError::InvalidReference`] for
    /// the handle; [`GroupError::NotAVector`] for `mass` and `age`.
    pub fn vector(&self, handle: ParticleHandle, field: ParticleField) -> Result<VectorView, GroupError> {
        self.resolve(handle)?;
        if field.kind() == FieldKind::Scalar {
            return Err(GroupError::NotAVector(field));
        }
        Ok(VectorView::new(handle, field))
    }

    /// Check that a reference issued at `generation` by `group` is usable.
    pub(crate) fn check_reference(&self, group: GroupId, generation: u64) -> Result<(), GroupError> {
        if group != self.id {
            return Err(GroupError::TypeMismatch {
                expected: self.id,
                found: group,
            });
        }
        if generation != self.generation {
            return Err(self.stale(generation));
        }
        Ok(())
    }

    fn resolve(&self, handle: ParticleHandle) -> Result<usize, GroupError> {
        self.check_reference(handle.group(), handle.generation())?;
        Ok(handle.index())
    }

    fn stale(&self, issued: u64) -> GroupError {
        GroupError::InvalidReference {
            issued,
            current: self.generation,
        }
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("id", &self.id)
            .field("generation", &self.generation)
            .field("len", &self.len())
            .field("new_count", &self.new_count())
            .field("killed_count", &self.killed_count())
            .field("controllers", &self.controllers.len())
            .field("renderer", &self.renderer.is_some())
            .field("system", &self.system.is_some())
            .finish()
    }
}

impl<'g> IntoIterator for &'g Group {
    type Item = ParticleHandle;
    type IntoIter = Iter<'g>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Builder for [`Group`].
#[must_use]
pub struct GroupBuilder {
    config: GroupConfig,
    controllers: Vec<SharedController>,
    renderer: Option<SharedRenderer>,
    system: Option<SharedSystem>,
}

impl GroupBuilder {
    /// A detached builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: GroupConfig::default(),
            controllers: Vec::new(),
            renderer: None,
            system: None,
        }
    }

    /// Override the group configuration.
    pub fn config(mut self, config: GroupConfig) -> Self {
        self.config = config;
        self
    }

    /// Bind one controller.
    pub fn controller(mut self, controller: SharedController) -> Self {
        self.controllers.push(controller);
        self
    }

    /// Bind controllers in order.
    pub fn controllers<I>(mut self, controllers: I) -> Self
    where
        I: IntoIterator<Item = SharedController>,
    {
        self.controllers.extend(controllers);
        self
    }

    /// Bind a renderer.
    pub fn renderer(mut self, renderer: SharedRenderer) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Register the group with `system` when built.
    pub fn system(mut self, system: SharedSystem) -> Self {
        self.system = Some(system);
        self
    }

    /// Do not register the group with any particle system.
    pub fn detached(mut self) -> Self {
        self.system = None;
        self
    }

    /// Allocate the store and, if bound to a system, register the group.
    ///
    /// # Errors
    ///
    /// [`ParticleError::OutOfMemory`](plume_particle::ParticleError::OutOfMemory)
    /// if the initial store allocation fails, [`GroupError::Registration`] if
    /// the system rejects the group. A failed build yields no group.
    pub fn build(self) -> Result<Group, GroupError> {
        let store = ParticleStore::with_config(self.config.store.clone())?;
        let group = Group {
            id: GroupId::new(),
            store,
            generation: 0,
            config: self.config,
            controllers: self.controllers,
            renderer: self.renderer,
            system: self.system,
        };

        if let Some(system) = group.system.as_ref().map(Rc::clone) {
            system
                .try_borrow_mut()
                .map_err(|_| GroupError::Reentrant("particle system"))?
                .add_group(&group)
                .map_err(GroupError::Registration)?;
        }

        info!(
            group = %group.id,
            capacity = group.capacity(),
            controllers = group.controllers.len(),
            registered = group.system.is_some(),
            "group created"
        );
        Ok(group)
    }
}

impl Default for GroupBuilder {
    fn default() -> Self {
        Self::new()
    }
}

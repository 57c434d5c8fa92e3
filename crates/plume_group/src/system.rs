//! Particle systems, the owners of system-wide controllers.
//!
//! A group registers itself with its particle system when it is built, and
//! consults the system's controllers on every update, before its own. The
//! system does not own the group; it only learns the group's id.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::controller::{SharedController, same_controller};
use crate::error::BoxError;
use crate::group::Group;
use crate::handle::GroupId;

/// The collaborator a group registers with and draws system-wide
/// controllers from.
pub trait ParticleSystem {
    /// Called once when `group` is built against this system.
    ///
    /// # Errors
    ///
    /// An error aborts group construction.
    fn add_group(&mut self, group: &Group) -> Result<(), BoxError>;

    /// Controllers applied to every registered group, before the group's
    /// own controllers.
    fn controllers(&self) -> &[SharedController];
}

/// A particle system shared between groups.
pub type SharedSystem = Rc<RefCell<dyn ParticleSystem>>;

/// Wrap a particle system for sharing.
pub fn shared_system<S: ParticleSystem + 'static>(system: S) -> SharedSystem {
    Rc::new(RefCell::new(system))
}

/// A plain [`ParticleSystem`]: an ordered list of system-wide controllers and
/// the ids of every group registered with it.
#[derive(Default)]
pub struct ControllerRegistry {
    /// System-wide controllers in application order.
    controllers: Vec<SharedController>,
    /// Registered groups in registration order.
    groups: Vec<GroupId>,
}

impl ControllerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            controllers: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Append a system-wide controller.
    pub fn add_controller(&mut self, controller: SharedController) {
        self.controllers.push(controller);
    }

    /// Remove the first occurrence of `controller`.
    ///
    /// Returns `true` if it was found and removed.
    pub fn remove_controller(&mut self, controller: &SharedController) -> bool {
        if let Some(pos) = self
            .controllers
            .iter()
            .position(|c| same_controller(c, controller))
        {
            self.controllers.remove(pos);
            return true;
        }
        false
    }

    /// Forget a group, e.g. after the host drops it.
    ///
    /// Returns `true` if the group was registered.
    pub fn remove_group(&mut self, id: GroupId) -> bool {
        if let Some(pos) = self.groups.iter().position(|&g| g == id) {
            self.groups.remove(pos);
            return true;
        }
        false
    }

    /// Returns `true` if the group is registered.
    #[must_use]
    pub fn contains_group(&self, id: GroupId) -> bool {
        self.groups.contains(&id)
    }

    /// Returns the number of registered groups.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

impl ParticleSystem for ControllerRegistry {
    fn add_group(&mut self, group: &Group) -> Result<(), BoxError> {
        let id = group.id();
        if !self.groups.contains(&id) {
            self.groups.push(id);
        }
        debug!(group = %id, groups = self.groups.len(), "group registered");
        Ok(())
    }

    fn controllers(&self) -> &[SharedController] {
        &self.controllers
    }
}

impl std::fmt::Debug for ControllerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerRegistry")
            .field("controllers", &self.controllers.len())
            .field("groups", &self.groups)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{Controller, shared_controller};

    struct Noop;

    impl Controller for Noop {
        fn apply(&mut self, _dt: f32, _group: &mut Group) -> Result<(), BoxError> {
            Ok(())
        }
    }

    #[test]
    fn test_register_group() {
        let mut registry = ControllerRegistry::new();
        let group = Group::builder().build().unwrap();
        registry.add_group(&group).unwrap();
        assert_eq!(registry.group_count(), 1);
        assert!(registry.contains_group(group.id()));
    }

    #[test]
    fn test_duplicate_group_not_added() {
        let mut registry = ControllerRegistry::new();
        let group = Group::builder().build().unwrap();
        registry.add_group(&group).unwrap();
        registry.add_group(&group).unwrap();
        assert_eq!(registry.group_count(), 1);
    }

    #[test]
    fn test_remove_group() {
        let mut registry = ControllerRegistry::new();
        let group = Group::builder().build().unwrap();
        registry.add_group(&group).unwrap();
        assert!(registry.remove_group(group.id()));
        assert!(!registry.remove_group(group.id()));
        assert_eq!(registry.group_count(), 0);
    }

    #[test]
    fn test_controllers_keep_order_and_duplicates() {
        let mut registry = ControllerRegistry::new();
        let a = shared_controller(Noop);
        let b = shared_controller(Noop);
        registry.add_controller(Rc::clone(&a));
        registry.add_controller(Rc::clone(&b));
        registry.add_controller(Rc::clone(&a));
        assert_eq!(registry.controllers().len(), 3);

        assert!(registry.remove_controller(&a));
        let remaining = registry.controllers();
        assert!(same_controller(&remaining[0], &b));
        assert!(same_controller(&remaining[1], &a));
    }
}

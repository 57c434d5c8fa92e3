//! Controllers: per-frame behaviour applied to a group.
//!
//! A controller is anything that can be applied to a group with the frame's
//! time step. Controllers are shared (`Rc<RefCell<_>>`) so the same instance
//! can be bound to several groups or to a particle system, and are compared
//! by identity when unbinding.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::BoxError;
use crate::group::Group;

/// Per-frame behaviour applied to a [`Group`] during
/// [`Group::update`](crate::Group::update).
pub trait Controller {
    /// Apply this controller for a frame of length `dt` seconds.
    ///
    /// # Errors
    ///
    /// An error aborts the remaining controllers of this update and is
    /// returned from `Group::update`.
    fn apply(&mut self, dt: f32, group: &mut Group) -> Result<(), BoxError>;
}

impl<F> Controller for F
where
    F: FnMut(f32, &mut Group) -> Result<(), BoxError>,
{
    fn apply(&mut self, dt: f32, group: &mut Group) -> Result<(), BoxError> {
        self(dt, group)
    }
}

/// A controller shared between groups and systems.
pub type SharedController = Rc<RefCell<dyn Controller>>;

/// Wrap a controller for binding.
pub fn shared_controller<C: Controller + 'static>(controller: C) -> SharedController {
    Rc::new(RefCell::new(controller))
}

/// Identity comparison between two shared controllers.
#[must_use]
pub fn same_controller(a: &SharedController, b: &SharedController) -> bool {
    Rc::ptr_eq(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop;

    impl Controller for Noop {
        fn apply(&mut self, _dt: f32, _group: &mut Group) -> Result<(), BoxError> {
            Ok(())
        }
    }

    #[test]
    fn test_identity_comparison() {
        let a = shared_controller(Noop);
        let b = shared_controller(Noop);
        let a2 = Rc::clone(&a);
        assert!(same_controller(&a, &a2));
        assert!(!same_controller(&a, &b));
    }

    #[test]
    fn test_closure_is_a_controller() {
        let mut calls = 0;
        let mut group = Group::builder().build().unwrap();
        {
            let mut bump = |_dt: f32, _group: &mut Group| -> Result<(), BoxError> {
                calls += 1;
                Ok(())
            };
            bump.apply(0.1, &mut group).unwrap();
            bump.apply(0.1, &mut group).unwrap();
        }
        assert_eq!(calls, 2);
    }
}

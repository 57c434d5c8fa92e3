//! The renderer collaborator invoked by [`Group::draw`](crate::Group::draw).

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::BoxError;
use crate::group::Group;

/// Draws a group. The group is borrowed immutably: renderers observe
/// particles, they do not simulate them.
pub trait Renderer {
    /// Draw every visible particle of `group`.
    ///
    /// # Errors
    ///
    /// Any error is returned unchanged from `Group::draw`.
    fn draw(&mut self, group: &Group) -> Result<(), BoxError>;
}

impl<F> Renderer for F
where
    F: FnMut(&Group) -> Result<(), BoxError>,
{
    fn draw(&mut self, group: &Group) -> Result<(), BoxError> {
        self(group)
    }
}

/// A renderer shared between groups. Groups hold a reference, not ownership.
pub type SharedRenderer = Rc<RefCell<dyn Renderer>>;

/// Wrap a renderer for binding.
pub fn shared_renderer<R: Renderer + 'static>(renderer: R) -> SharedRenderer {
    Rc::new(RefCell::new(renderer))
}

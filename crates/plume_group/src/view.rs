//! Component-wise access to a particle's vector and colour fields.
//!
//! A [`VectorView`] names one vector field of one particle. Like a
//! [`ParticleHandle`] it is a plain value stamped with the group generation,
//! and every read or write goes back through the group and is rejected once
//! the group has been updated.

use plume_math::{Axis, clamp_vec3, clamp_vec4};
use plume_particle::{FieldKind, FieldValue, ParticleField};

use crate::error::GroupError;
use crate::group::Group;
use crate::handle::ParticleHandle;

/// A view over a 3-component vector or RGBA colour field of one particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorView {
    handle: ParticleHandle,
    field: ParticleField,
}

impl VectorView {
    pub(crate) const fn new(handle: ParticleHandle, field: ParticleField) -> Self {
        Self { handle, field }
    }

    /// The particle this view reads from.
    #[must_use]
    pub const fn handle(&self) -> ParticleHandle {
        self.handle
    }

    /// The field this view exposes.
    #[must_use]
    pub const fn field(&self) -> ParticleField {
        self.field
    }

    /// Returns `true` for colour views, which have a fourth (alpha)
    /// component.
    #[must_use]
    pub fn is_color(&self) -> bool {
        self.field.kind() == FieldKind::Color
    }

    /// Number of components: 3 for vectors, 4 for colours.
    #[must_use]
    pub fn len(&self) -> usize {
        self.field.kind().width()
    }

    /// Views always have at least three components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Read component `index`.
    ///
    /// # Errors
    ///
    /// [`GroupError::InvalidReference`] for a stale view,
    /// [`GroupError::IndexOutOfRange`] past the last component.
    pub fn get(&self, group: &Group, index: usize) -> Result<f32, GroupError> {
        group.particle(self.handle)?;
        self.get_axis(group, self.axis_at(index)?)
    }

    /// Write component `index`.
    ///
    /// # Errors
    ///
    /// [`GroupError::InvalidReference`] for a stale view,
    /// [`GroupError::IndexOutOfRange`] past the last component.
    pub fn set(&self, group: &mut Group, index: usize, value: f32) -> Result<(), GroupError> {
        group.particle(self.handle)?;
        self.set_axis(group, self.axis_at(index)?, value)
    }

    /// Read one axis.
    ///
    /// # Errors
    ///
    /// As [`VectorView::get`]; [`Axis::W`] is out of range on 3-component
    /// views.
    pub fn get_axis(&self, group: &Group, axis: Axis) -> Result<f32, GroupError> {
        let record = group.particle(self.handle)?;
        record
            .component(self.field, axis.index())
            .ok_or_else(|| self.out_of_range(axis.index()))
    }

    /// Write one axis.
    ///
    /// # Errors
    ///
    /// As [`VectorView::set`].
    pub fn set_axis(&self, group: &mut Group, axis: Axis, value: f32) -> Result<(), GroupError> {
        let out_of_range = self.out_of_range(axis.index());
        let record = group.particle_mut(self.handle)?;
        if record.set_component(self.field, axis.index(), value) {
            Ok(())
        } else {
            Err(out_of_range)
        }
    }

    /// Read a component by name: `x`/`r`, `y`/`g`, `z`/`b`, or `a` on colours.
    ///
    /// # Errors
    ///
    /// [`GroupError::InvalidReference`] for a stale view,
    /// [`GroupError::UnknownAxis`] for any other name.
    pub fn get_named(&self, group: &Group, name: &str) -> Result<f32, GroupError> {
        group.particle(self.handle)?;
        let axis = self.named_axis(name)?;
        self.get_axis(group, axis)
    }

    /// Write a component by name.
    ///
    /// # Errors
    ///
    /// As [`VectorView::get_named`].
    pub fn set_named(&self, group: &mut Group, name: &str, value: f32) -> Result<(), GroupError> {
        group.particle(self.handle)?;
        let axis = self.named_axis(name)?;
        self.set_axis(group, axis, value)
    }

    /// Read the whole field.
    ///
    /// # Errors
    ///
    /// [`GroupError::InvalidReference`] for a stale view.
    pub fn read(&self, group: &Group) -> Result<FieldValue, GroupError> {
        group.field(self.handle, self.field)
    }

    /// Clamp every component (alpha included) into `[min, max]` in place
    /// and return the view for chaining.
    ///
    /// # Errors
    ///
    /// [`GroupError::InvalidReference`] for a stale view,
    /// [`GroupError::ValueError`] if `min > max` or either bound is `NaN`.
    pub fn clamp(self, group: &mut Group, min: f32, max: f32) -> Result<Self, GroupError> {
        let record = group.particle_mut(self.handle)?;
        if !(min <= max) {
            return Err(GroupError::ValueError { min, max });
        }
        if self.is_color() {
            record.color = clamp_vec4(record.color, min, max);
        } else if let Some(v) = record.vector_mut(self.field) {
            *v = clamp_vec3(*v, min, max);
        }
        Ok(self)
    }

    /// Render the current value as `Vector(x, y, z)` or `Color(r, g, b, a)`.
    ///
    /// # Errors
    ///
    /// [`GroupError::InvalidReference`] for a stale view.
    pub fn describe(&self, group: &Group) -> Result<String, GroupError> {
        let record = group.particle(self.handle)?;
        let components: Vec<String> = Axis::ALL[..self.len()]
            .iter()
            .filter_map(|axis| record.component(self.field, axis.index()))
            .map(|c| format!("{c:.1}"))
            .collect();
        let label = if self.is_color() { "Color" } else { "Vector" };
        Ok(format!("{label}({})", components.join(", ")))
    }

    fn axis_at(&self, index: usize) -> Result<Axis, GroupError> {
        Axis::from_index(index)
            .filter(|axis| axis.index() < self.len())
            .ok_or_else(|| self.out_of_range(index))
    }

    fn out_of_range(&self, index: usize) -> GroupError {
        GroupError::IndexOutOfRange {
            index,
            len: self.len(),
        }
    }

    fn named_axis(&self, name: &str) -> Result<Axis, GroupError> {
        match Axis::from_name(name) {
            Some(axis) if axis.index() < self.len() => Ok(axis),
            _ => Err(GroupError::UnknownAxis(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use plume_math::{Vec3, Vec4};
    use plume_particle::ParticleTemplate;

    use super::*;

    fn group_with(template: ParticleTemplate) -> (Group, ParticleHandle) {
        let mut group = Group::builder().build().unwrap();
        group.new_particle(&template).unwrap();
        group.update(0.0).unwrap();
        let handle = group.iter().next().unwrap();
        (group, handle)
    }

    #[test]
    fn test_indexed_access() {
        let (mut group, h) = group_with(ParticleTemplate::new().position(Vec3::new(1.0, 2.0, 3.0)));
        let view = group.vector(h, ParticleField::Position).unwrap();
        assert_eq!(view.len(), 3);
        assert_eq!(view.get(&group, 1).unwrap(), 2.0);
        view.set(&mut group, 2, 9.0).unwrap();
        assert_eq!(group.particle(h).unwrap().position.z, 9.0);
        assert!(matches!(
            view.get(&group, 3),
            Err(GroupError::IndexOutOfRange { index: 3, len: 3 })
        ));
        assert!(matches!(
            view.set(&mut group, 7, 1.0),
            Err(GroupError::IndexOutOfRange { index: 7, len: 3 })
        ));
    }

    #[test]
    fn test_colour_has_four_components() {
        let (mut group, h) = group_with(ParticleTemplate::new());
        let view = group.vector(h, ParticleField::Color).unwrap();
        assert_eq!(view.len(), 4);
        view.set(&mut group, 3, 0.75).unwrap();
        assert_eq!(view.get_axis(&group, Axis::W).unwrap(), 0.75);
        assert!(view.get(&group, 4).is_err());
    }

    #[test]
    fn test_named_axes_alias_storage() {
        let (mut group, h) = group_with(ParticleTemplate::new());
        let view = group.vector(h, ParticleField::Color).unwrap();
        view.set_named(&mut group, "r", 0.25).unwrap();
        assert_eq!(view.get_named(&group, "x").unwrap(), 0.25);
        view.set_named(&mut group, "a", 0.5).unwrap();
        assert_eq!(view.get(&group, 3).unwrap(), 0.5);
    }

    #[test]
    fn test_alpha_only_on_colours() {
        let (group, h) = group_with(ParticleTemplate::new());
        let view = group.vector(h, ParticleField::Velocity).unwrap();
        assert!(matches!(
            view.get_named(&group, "a"),
            Err(GroupError::UnknownAxis(name)) if name == "a"
        ));
        assert!(matches!(
            view.get_named(&group, "q"),
            Err(GroupError::UnknownAxis(_))
        ));
        assert!(matches!(
            view.get_axis(&group, Axis::W),
            Err(GroupError::IndexOutOfRange { index: 3, len: 3 })
        ));
    }

    #[test]
    fn test_clamp_colour() {
        let (mut group, h) =
            group_with(ParticleTemplate::new().color(Vec4::new(1.5, -0.2, 0.5, 2.0)));
        let view = group.vector(h, ParticleField::Color).unwrap();
        let view = view.clamp(&mut group, 0.0, 1.0).unwrap();
        assert_eq!(view.read(&group).unwrap(), FieldValue::Color(Vec4::new(1.0, 0.0, 0.5, 1.0)));
    }

    #[test]
    fn test_clamp_rejects_inverted_bounds() {
        let (mut group, h) =
            group_with(ParticleTemplate::new().color(Vec4::new(1.5, -0.2, 0.5, 2.0)));
        let view = group.vector(h, ParticleField::Color).unwrap();
        assert!(matches!(
            view.clamp(&mut group, 1.0, 0.0),
            Err(GroupError::ValueError { .. })
        ));
        assert!(view.clamp(&mut group, f32::NAN, 1.0).is_err());
        // Nothing was written.
        assert_eq!(group.particle(h).unwrap().color, Vec4::new(1.5, -0.2, 0.5, 2.0));
    }

    #[test]
    fn test_clamp_chains() {
        let (mut group, h) = group_with(ParticleTemplate::new().velocity(Vec3::new(-5.0, 0.5, 5.0)));
        let view = group.vector(h, ParticleField::Velocity).unwrap();
        let x = view
            .clamp(&mut group, -2.0, 2.0)
            .unwrap()
            .clamp(&mut group, 0.0, 1.0)
            .unwrap()
            .get(&group, 0)
            .unwrap();
        assert_eq!(x, 0.0);
        assert_eq!(group.particle(h).unwrap().velocity, Vec3::new(0.0, 0.5, 1.0));
    }

    #[test]
    fn test_stale_view_rejected() {
        let (mut group, h) = group_with(ParticleTemplate::new());
        let view = group.vector(h, ParticleField::Size).unwrap();
        group.update(0.0).unwrap();
        assert!(matches!(view.get(&group, 0), Err(GroupError::InvalidReference { .. })));
        assert!(matches!(
            view.set(&mut group, 0, 1.0),
            Err(GroupError::InvalidReference { .. })
        ));
        assert!(matches!(
            view.clamp(&mut group, 1.0, 0.0),
            Err(GroupError::InvalidReference { .. })
        ));
        assert!(matches!(
            view.get_named(&group, "nope"),
            Err(GroupError::InvalidReference { .. })
        ));
    }

    #[test]
    fn test_scalar_fields_have_no_view() {
        let (group, h) = group_with(ParticleTemplate::new());
        assert!(matches!(
            group.vector(h, ParticleField::Mass),
            Err(GroupError::NotAVector(ParticleField::Mass))
        ));
    }

    #[test]
    fn test_describe() {
        let (group, h) = group_with(
            ParticleTemplate::new()
                .position(Vec3::new(1.0, 2.0, 3.0))
                .color(Vec4::new(0.5, 0.5, 0.5, 1.0)),
        );
        let pos = group.vector(h, ParticleField::Position).unwrap();
        let color = group.vector(h, ParticleField::Color).unwrap();
        assert_eq!(pos.describe(&group).unwrap(), "Vector(1.0, 2.0, 3.0)");
        assert_eq!(color.describe(&group).unwrap(), "Color(0.5, 0.5, 0.5, 1.0)");
    }
}

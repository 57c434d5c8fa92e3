//! Enum-indexed field access for [`ParticleRecord`].
//!
//! Fields are addressed by [`ParticleField`] rather than by string so the
//! name lookup happens once (via [`FromStr`]) and every subsequent access is a
//! plain `match` on the record layout.

use std::fmt;
use std::str::FromStr;

use plume_math::{Vec3, Vec4};

use crate::error::ParticleError;
use crate::record::ParticleRecord;

/// The shape of value a field stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// A 3-component vector.
    Vector,
    /// A 4-component RGBA colour.
    Color,
    /// A single float.
    Scalar,
}

impl FieldKind {
    /// Number of float components in a value of this kind.
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            FieldKind::Vector => 3,
            FieldKind::Color => 4,
            FieldKind::Scalar => 1,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FieldKind::Vector => "vector",
            FieldKind::Color => "color",
            FieldKind::Scalar => "scalar",
        })
    }
}

/// Identifies one field of a [`ParticleRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleField {
    /// `position`, a 3-vector.
    Position,
    /// `velocity`, a 3-vector.
    Velocity,
    /// `size`, a 3-vector.
    Size,
    /// `up`, a 3-vector.
    Up,
    /// `rotation`, a 3-vector.
    Rotation,
    /// `last_position`, a 3-vector.
    LastPosition,
    /// `last_velocity`, a 3-vector.
    LastVelocity,
    /// `color`, RGBA.
    Color,
    /// `mass`, a scalar. Zero or below means dead.
    Mass,
    /// `age` in seconds, a scalar.
    Age,
}

impl ParticleField {
    /// Every field, in record order.
    pub const ALL: [ParticleField; 10] = [
        ParticleField::Position,
        ParticleField::Velocity,
        ParticleField::Size,
        ParticleField::Up,
        ParticleField::Rotation,
        ParticleField::LastPosition,
        ParticleField::LastVelocity,
        ParticleField::Color,
        ParticleField::Mass,
        ParticleField::Age,
    ];

    /// The field's attribute name (e.g. `"last_position"`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ParticleField::Position => "position",
            ParticleField::Velocity => "velocity",
            ParticleField::Size => "size",
            ParticleField::Up => "up",
            ParticleField::Rotation => "rotation",
            ParticleField::LastPosition => "last_position",
            ParticleField::LastVelocity => "last_velocity",
            ParticleField::Color => "color",
            ParticleField::Mass => "mass",
            ParticleField::Age => "age",
        }
    }

    /// The kind of value stored in this field.
    #[must_use]
    pub const fn kind(self) -> FieldKind {
        match self {
            ParticleField::Color => FieldKind::Color,
            ParticleField::Mass | ParticleField::Age => FieldKind::Scalar,
            _ => FieldKind::Vector,
        }
    }
}

impl fmt::Display for ParticleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParticleField {
    type Err = ParticleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| ParticleError::UnknownField(s.to_string()))
    }
}

/// A field value read from or written to a particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    /// A 3-component vector. Assigned to `color` it sets RGB and forces alpha
    /// to `1.0`.
    Vec3(Vec3),
    /// An RGBA colour.
    Color(Vec4),
    /// A single float.
    Scalar(f32),
}

impl From<Vec3> for FieldValue {
    fn from(v: Vec3) -> Self {
        FieldValue::Vec3(v)
    }
}

impl From<Vec4> for FieldValue {
    fn from(v: Vec4) -> Self {
        FieldValue::Color(v)
    }
}

impl From<f32> for FieldValue {
    fn from(v: f32) -> Self {
        FieldValue::Scalar(v)
    }
}

impl ParticleRecord {
    /// Borrow a 3-component vector field. Returns `None` for colour and
    /// scalar fields.
    #[must_use]
    pub fn vector(&self, field: ParticleField) -> Option<&Vec3> {
        match field {
            ParticleField::Position => Some(&self.position),
            ParticleField::Velocity => Some(&self.velocity),
            ParticleField::Size => Some(&self.size),
            ParticleField::Up => Some(&self.up),
            ParticleField::Rotation => Some(&self.rotation),
            ParticleField::LastPosition => Some(&self.last_position),
            ParticleField::LastVelocity => Some(&self.last_velocity),
            ParticleField::Color | ParticleField::Mass | ParticleField::Age => None,
        }
    }

    /// Mutably borrow a 3-component vector field.
    #[must_use]
    pub fn vector_mut(&mut self, field: ParticleField) -> Option<&mut Vec3> {
        match field {
            ParticleField::Position => Some(&mut self.position),
            ParticleField::Velocity => Some(&mut self.velocity),
            ParticleField::Size => Some(&mut self.size),
            ParticleField::Up => Some(&mut self.up),
            ParticleField::Rotation => Some(&mut self.rotation),
            ParticleField::LastPosition => Some(&mut self.last_position),
            ParticleField::LastVelocity => Some(&mut self.last_velocity),
            ParticleField::Color | ParticleField::Mass | ParticleField::Age => None,
        }
    }

    /// Read any field as a [`FieldValue`].
    #[must_use]
    pub fn get(&self, field: ParticleField) -> FieldValue {
        match field {
            ParticleField::Color => FieldValue::Color(self.color),
            ParticleField::Mass => FieldValue::Scalar(self.mass),
            ParticleField::Age => FieldValue::Scalar(self.age),
            _ => FieldValue::Vec3(self.vector(field).copied().unwrap_or(Vec3::ZERO)),
        }
    }

    /// Assign a field.
    ///
    /// # Errors
    ///
    /// Returns [`ParticleError::TypeMismatch`] if `value` does not fit the
    /// field's kind.
    pub fn set(&mut self, field: ParticleField, value: FieldValue) -> Result<(), ParticleError> {
        let mismatch = ParticleError::TypeMismatch {
            field,
            expected: field.kind(),
        };
        match (field.kind(), value) {
            (FieldKind::Vector, FieldValue::Vec3(v)) => {
                if let Some(slot) = self.vector_mut(field) {
                    *slot = v;
                }
            }
            (FieldKind::Color, FieldValue::Color(c)) => self.color = c,
            (FieldKind::Color, FieldValue::Vec3(rgb)) => self.color = rgb.extend(1.0),
            (FieldKind::Scalar, FieldValue::Scalar(s)) => match field {
                ParticleField::Mass => self.mass = s,
                _ => self.age = s,
            },
            _ => return Err(mismatch),
        }
        Ok(())
    }

    /// Read component `index` of a vector or colour field.
    ///
    /// Returns `None` for scalar fields or an out-of-range index.
    #[must_use]
    pub fn component(&self, field: ParticleField, index: usize) -> Option<f32> {
        match field.kind() {
            FieldKind::Vector if index < 3 => self.vector(field).map(|v| v[index]),
            FieldKind::Color if index < 4 => Some(self.color[index]),
            _ => None,
        }
    }

    /// Write component `index` of a vector or colour field.
    ///
    /// Returns `false` (and writes nothing) for scalar fields or an
    /// out-of-range index.
    pub fn set_component(&mut self, field: ParticleField, index: usize, value: f32) -> bool {
        match field.kind() {
            FieldKind::Vector if index < 3 => match self.vector_mut(field) {
                Some(v) => {
                    v[index] = value;
                    true
                }
                None => false,
            },
            FieldKind::Color if index < 4 => {
                self.color[index] = value;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_roundtrip() {
        for field in ParticleField::ALL {
            assert_eq!(field.name().parse::<ParticleField>().unwrap(), field);
        }
    }

    #[test]
    fn test_unknown_field() {
        let err = "spin".parse::<ParticleField>().unwrap_err();
        assert_eq!(err, ParticleError::UnknownField("spin".to_string()));
    }

    #[test]
    fn test_field_kinds() {
        assert_eq!(ParticleField::Position.kind(), FieldKind::Vector);
        assert_eq!(ParticleField::LastVelocity.kind(), FieldKind::Vector);
        assert_eq!(ParticleField::Color.kind(), FieldKind::Color);
        assert_eq!(ParticleField::Mass.kind(), FieldKind::Scalar);
        assert_eq!(FieldKind::Color.width(), 4);
    }

    #[test]
    fn test_get_and_set_vector() {
        let mut p = ParticleRecord::default();
        p.set(ParticleField::Velocity, Vec3::new(1.0, 2.0, 3.0).into())
            .unwrap();
        assert_eq!(p.velocity, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(
            p.get(ParticleField::Velocity),
            FieldValue::Vec3(Vec3::new(1.0, 2.0, 3.0))
        );
    }

    #[test]
    fn test_rgb_assignment_sets_opaque_alpha() {
        let mut p = ParticleRecord::default();
        p.set(ParticleField::Color, Vec3::new(0.2, 0.4, 0.6).into())
            .unwrap();
        assert_eq!(p.color, Vec4::new(0.2, 0.4, 0.6, 1.0));
    }

    #[test]
    fn test_scalar_fields() {
        let mut p = ParticleRecord::default();
        p.set(ParticleField::Mass, FieldValue::Scalar(2.5)).unwrap();
        p.set(ParticleField::Age, FieldValue::Scalar(4.0)).unwrap();
        assert_eq!(p.mass, 2.5);
        assert_eq!(p.age, 4.0);
    }

    #[test]
    fn test_set_rejects_wrong_kind() {
        let mut p = ParticleRecord::default();
        let err = p
            .set(ParticleField::Mass, Vec3::ONE.into())
            .unwrap_err();
        assert_eq!(
            err,
            ParticleError::TypeMismatch {
                field: ParticleField::Mass,
                expected: FieldKind::Scalar,
            }
        );
        assert!(p.set(ParticleField::Position, FieldValue::Scalar(1.0)).is_err());
        assert!(p.set(ParticleField::Up, Vec4::ONE.into()).is_err());
    }

    #[test]
    fn test_components() {
        let mut p = ParticleRecord::default();
        assert!(p.set_component(ParticleField::Size, 2, 7.0));
        assert_eq!(p.component(ParticleField::Size, 2), Some(7.0));
        assert!(!p.set_component(ParticleField::Size, 3, 1.0));
        assert!(p.set_component(ParticleField::Color, 3, 0.5));
        assert_eq!(p.color.w, 0.5);
        assert_eq!(p.component(ParticleField::Mass, 0), None);
    }
}

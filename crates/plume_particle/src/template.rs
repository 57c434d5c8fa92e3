//! Initial values for newly created particles.
//!
//! A [`ParticleTemplate`] combines at most one template record with any
//! number of per-field overrides. Resolution order is override, then
//! template, then [`ParticleRecord::NEW`].

use plume_math::{Vec3, Vec4};

use crate::error::ParticleError;
use crate::field::{FieldValue, ParticleField};
use crate::record::ParticleRecord;

/// The fields copied from a template record. `last_position` and
/// `last_velocity` are bookkeeping and always start zeroed.
const TEMPLATE_FIELDS: [ParticleField; 8] = [
    ParticleField::Position,
    ParticleField::Velocity,
    ParticleField::Size,
    ParticleField::Up,
    ParticleField::Rotation,
    ParticleField::Color,
    ParticleField::Age,
    ParticleField::Mass,
];

/// Describes how to populate a newly staged particle.
///
/// # Examples
///
/// ```rust
/// use plume_math::Vec3;
/// use plume_particle::ParticleTemplate;
///
/// let record = ParticleTemplate::new()
///     .position(Vec3::new(0.0, 1.0, 0.0))
///     .mass(2.0)
///     .resolve()
///     .unwrap();
/// assert_eq!(record.mass, 2.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleTemplate {
    templates: Vec<ParticleRecord>,
    overrides: Vec<(ParticleField, FieldValue)>,
}

impl ParticleTemplate {
    /// A template with no source record and no overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A template copying every field of `record`.
    #[must_use]
    pub fn from_record(record: ParticleRecord) -> Self {
        Self::new().template(record)
    }

    /// Add a source record. Only one may be supplied; extras are reported by
    /// [`ParticleTemplate::resolve`].
    #[must_use]
    pub fn template(mut self, record: ParticleRecord) -> Self {
        self.templates.push(record);
        self
    }

    /// Override a single field. Later overrides of the same field win.
    #[must_use]
    pub fn with(mut self, field: ParticleField, value: impl Into<FieldValue>) -> Self {
        self.overrides.push((field, value.into()));
        self
    }

    #[must_use]
    pub fn position(self, v: Vec3) -> Self {
        self.with(ParticleField::Position, v)
    }

    #[must_use]
    pub fn velocity(self, v: Vec3) -> Self {
        self.with(ParticleField::Velocity, v)
    }

    #[must_use]
    pub fn size(self, v: Vec3) -> Self {
        self.with(ParticleField::Size, v)
    }

    #[must_use]
    pub fn up(self, v: Vec3) -> Self {
        self.with(ParticleField::Up, v)
    }

    #[must_use]
    pub fn rotation(self, v: Vec3) -> Self {
        self.with(ParticleField::Rotation, v)
    }

    #[must_use]
    pub fn color(self, c: Vec4) -> Self {
        self.with(ParticleField::Color, c)
    }

    #[must_use]
    pub fn mass(self, mass: f32) -> Self {
        self.with(ParticleField::Mass, mass)
    }

    #[must_use]
    pub fn age(self, age: f32) -> Self {
        self.with(ParticleField::Age, age)
    }

    /// Produce the initial record.
    ///
    /// # Errors
    ///
    /// Returns [`ParticleError::TooManyArguments`] if more than one template
    /// record was supplied, or [`ParticleError::TypeMismatch`] if an override
    /// does not fit its field.
    pub fn resolve(&self) -> Result<ParticleRecord, ParticleError> {
        if self.templates.len() > 1 {
            return Err(ParticleError::TooManyArguments {
                given: self.templates.len(),
            });
        }

        let mut record = ParticleRecord::NEW;
        if let Some(source) = self.templates.first() {
            for field in TEMPLATE_FIELDS {
                record.set(field, source.get(field))?;
            }
        }
        for &(field, value) in &self.overrides {
            record.set(field, value)?;
        }
        Ok(record)
    }
}

impl From<ParticleRecord> for ParticleTemplate {
    fn from(record: ParticleRecord) -> Self {
        Self::from_record(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_template_is_alive_default() {
        let record = ParticleTemplate::new().resolve().unwrap();
        assert_eq!(record, ParticleRecord::NEW);
        assert!(record.is_alive());
    }

    #[test]
    fn test_template_copies_named_fields() {
        let source = ParticleRecord {
            position: Vec3::new(1.0, 2.0, 3.0),
            color: Vec4::new(0.1, 0.2, 0.3, 0.4),
            last_position: Vec3::splat(9.0),
            mass: 3.0,
            age: 1.5,
            ..ParticleRecord::NEW
        };
        let record = ParticleTemplate::from_record(source).resolve().unwrap();
        assert_eq!(record.position, source.position);
        assert_eq!(record.color, source.color);
        assert_eq!(record.mass, 3.0);
        assert_eq!(record.age, 1.5);
        assert_eq!(record.last_position, Vec3::ZERO);
    }

    #[test]
    fn test_override_beats_template() {
        let source = ParticleRecord {
            mass: 3.0,
            ..ParticleRecord::NEW
        };
        let record = ParticleTemplate::from(source).mass(0.5).resolve().unwrap();
        assert_eq!(record.mass, 0.5);
    }

    #[test]
    fn test_explicit_zero_mass_is_dead() {
        let record = ParticleTemplate::new().mass(0.0).resolve().unwrap();
        assert!(!record.is_alive());
    }

    #[test]
    fn test_too_many_templates() {
        let err = ParticleTemplate::new()
            .template(ParticleRecord::NEW)
            .template(ParticleRecord::NEW)
            .resolve()
            .unwrap_err();
        assert_eq!(err, ParticleError::TooManyArguments { given: 2 });
    }

    #[test]
    fn test_mismatched_override() {
        let result = ParticleTemplate::new()
            .with(ParticleField::Age, Vec3::ONE)
            .resolve();
        assert!(matches!(result, Err(ParticleError::TypeMismatch { .. })));
    }
}

//! The per-particle simulation record.
//!
//! A [`ParticleRecord`] has no identity of its own: it is addressed purely by
//! its position in a [`ParticleStore`](crate::ParticleStore), and that
//! position may change whenever the store is compacted.

use std::fmt;

use plume_math::{Vec3, Vec4};

/// The simulation state of a single particle.
///
/// A particle is alive while its `mass` is strictly positive. Killing a
/// particle sets its mass to zero; the slot is reclaimed by the next
/// compaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleRecord {
    /// World-space position.
    pub position: Vec3,
    /// Velocity in world units per second.
    pub velocity: Vec3,
    /// Per-axis size.
    pub size: Vec3,
    /// Up vector, used by oriented renderers.
    pub up: Vec3,
    /// Euler rotation.
    pub rotation: Vec3,
    /// `position` as it was at the start of the last update.
    pub last_position: Vec3,
    /// `velocity` as it was at the start of the last update.
    pub last_velocity: Vec3,
    /// RGBA colour.
    pub color: Vec4,
    /// Mass. Zero or below marks the particle dead.
    pub mass: f32,
    /// Seconds elapsed since the particle was incorporated.
    pub age: f32,
}

impl ParticleRecord {
    /// Mass given to particles that do not specify one.
    pub const DEFAULT_MASS: f32 = 1.0;

    /// A freshly created particle: zeroed vectors, zero age, unit mass.
    pub const NEW: Self = Self {
        position: Vec3::ZERO,
        velocity: Vec3::ZERO,
        size: Vec3::ZERO,
        up: Vec3::ZERO,
        rotation: Vec3::ZERO,
        last_position: Vec3::ZERO,
        last_velocity: Vec3::ZERO,
        color: Vec4::ZERO,
        mass: Self::DEFAULT_MASS,
        age: 0.0,
    };

    /// Returns `true` if the particle is alive (mass > 0).
    ///
    /// A `NaN` mass counts as dead.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.mass > 0.0
    }

    /// Mark the particle dead.
    pub fn kill(&mut self) {
        self.mass = 0.0;
    }

    /// Apply the universal per-frame bookkeeping: age the particle and
    /// snapshot its position and velocity.
    pub fn advance(&mut self, dt: f32) {
        self.age += dt;
        self.last_position = self.position;
        self.last_velocity = self.velocity;
    }
}

impl Default for ParticleRecord {
    fn default() -> Self {
        Self::NEW
    }
}

impl fmt::Display for ParticleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = |v: Vec3| format!("({:.1}, {:.1}, {:.1})", v.x, v.y, v.z);
        write!(
            f,
            "<Particle position={} velocity={} color=({:.1}, {:.1}, {:.1}, {:.1}) size={} \
             up={} rotation={} last_position={} last_velocity={} mass={:.1} age={:.1}>",
            v(self.position),
            v(self.velocity),
            self.color.x,
            self.color.y,
            self.color.z,
            self.color.w,
            v(self.size),
            v(self.up),
            v(self.rotation),
            v(self.last_position),
            v(self.last_velocity),
            self.mass,
            self.age,
        )
    }
}

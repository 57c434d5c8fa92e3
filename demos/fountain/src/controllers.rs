//! The fountain's controllers.

use plume_group::{BoxError, Controller, Group, ParticleField, ParticleTemplate};
use plume_math::{Vec3, Vec4};

/// Spawns particles at the origin at a steady rate, fanned around the
/// vertical axis.
#[derive(Debug)]
pub struct Emitter {
    rate: f32,
    speed: f32,
    /// Fractional particles carried over between frames.
    pending: f32,
    emitted: u64,
}

impl Emitter {
    #[must_use]
    pub fn new(rate: f32) -> Self {
        Self {
            rate,
            speed: 6.0,
            pending: 0.0,
            emitted: 0,
        }
    }

    fn direction(&self) -> Vec3 {
        // Golden-angle spiral keeps consecutive particles apart.
        let angle = self.emitted as f32 * 2.399_963;
        Vec3::new(angle.cos() * 0.3, 1.0, angle.sin() * 0.3).normalize()
    }
}

impl Controller for Emitter {
    fn apply(&mut self, dt: f32, group: &mut Group) -> Result<(), BoxError> {
        self.pending += self.rate * dt;
        while self.pending >= 1.0 {
            let template = ParticleTemplate::new()
                .velocity(self.direction() * self.speed)
                .size(Vec3::splat(0.1))
                .up(Vec3::Y)
                .color(Vec4::new(0.4, 0.7, 1.0, 1.0));
            group.new_particle(&template)?;
            self.pending -= 1.0;
            self.emitted += 1;
        }
        Ok(())
    }
}

/// Constant acceleration integrated into velocity and position.
#[derive(Debug)]
pub struct Gravity {
    acceleration: Vec3,
}

impl Default for Gravity {
    fn default() -> Self {
        Self {
            acceleration: Vec3::new(0.0, -9.81, 0.0),
        }
    }
}

impl Controller for Gravity {
    fn apply(&mut self, dt: f32, group: &mut Group) -> Result<(), BoxError> {
        let handles: Vec<_> = group.iter().collect();
        for handle in handles {
            let particle = group.particle_mut(handle)?;
            particle.velocity += self.acceleration * dt;
            particle.position += particle.velocity * dt;
        }
        Ok(())
    }
}

/// Kills particles older than `max_age` seconds or below the floor.
#[derive(Debug)]
pub struct Lifetime {
    max_age: f32,
}

impl Lifetime {
    #[must_use]
    pub fn new(max_age: f32) -> Self {
        Self { max_age }
    }
}

impl Controller for Lifetime {
    fn apply(&mut self, _dt: f32, group: &mut Group) -> Result<(), BoxError> {
        let expired: Vec<_> = group
            .iter()
            .filter(|&h| {
                group
                    .particle(h)
                    .is_ok_and(|p| p.age >= self.max_age || p.position.y < 0.0)
            })
            .collect();
        for handle in expired {
            group.kill(handle)?;
        }
        Ok(())
    }
}

/// Fades alpha linearly to zero over `max_age` seconds.
#[derive(Debug)]
pub struct Fade {
    max_age: f32,
}

impl Fade {
    #[must_use]
    pub fn new(max_age: f32) -> Self {
        Self { max_age }
    }
}

impl Controller for Fade {
    fn apply(&mut self, _dt: f32, group: &mut Group) -> Result<(), BoxError> {
        let handles: Vec<_> = group.iter().collect();
        for handle in handles {
            let age = group.particle(handle)?.age;
            let color = group.vector(handle, ParticleField::Color)?;
            color.set_named(group, "a", 1.0 - age / self.max_age)?;
            color.clamp(group, 0.0, 1.0)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_of(n: usize) -> Group {
        let mut group = Group::builder().build().unwrap();
        for _ in 0..n {
            group
                .new_particle(&ParticleTemplate::new().position(Vec3::Y))
                .unwrap();
        }
        group
    }

    #[test]
    fn test_emitter_accumulates_fractions() {
        let mut group = group_of(0);
        let mut emitter = Emitter::new(10.0);
        emitter.apply(0.05, &mut group).unwrap();
        assert_eq!(group.new_count(), 0);
        emitter.apply(0.05, &mut group).unwrap();
        assert_eq!(group.new_count(), 1);
        emitter.apply(0.25, &mut group).unwrap();
        assert_eq!(group.new_count(), 3);
    }

    #[test]
    fn test_gravity_pulls_down() {
        let mut group = group_of(1);
        group.update(0.0).unwrap();
        Gravity::default().apply(0.1, &mut group).unwrap();
        let particle = group.alive_records().next().unwrap();
        assert!(particle.velocity.y < 0.0);
        assert!(particle.position.y < 1.0);
    }

    #[test]
    fn test_lifetime_kills_expired() {
        let mut group = group_of(2);
        group.update(0.0).unwrap();
        let first = group.iter().next().unwrap();
        group.particle_mut(first).unwrap().age = 3.0;

        Lifetime::new(2.0).apply(0.0, &mut group).unwrap();
        assert_eq!(group.iter().count(), 1);
        group.update(0.0).unwrap();
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn test_fade_clamps_alpha() {
        let mut group = group_of(1);
        group.update(0.0).unwrap();
        let handle = group.iter().next().unwrap();
        group.particle_mut(handle).unwrap().age = 3.0;

        Fade::new(2.0).apply(0.0, &mut group).unwrap();
        assert_eq!(group.particle(handle).unwrap().color.w, 0.0);
    }
}

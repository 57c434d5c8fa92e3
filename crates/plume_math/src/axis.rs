//! Named-axis access for 3- and 4-component particle vectors.
//!
//! Position-like vectors name their components `x`, `y`, `z`; colours name the
//! same storage `r`, `g`, `b`, plus `a` for alpha. The aliasing is purely a
//! naming concern: `Axis::X` and `Axis::from_char('r')` address the same slot.

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// One component of a particle vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// First component (`x` or `r`).
    X,
    /// Second component (`y` or `g`).
    Y,
    /// Third component (`z` or `b`).
    Z,
    /// Fourth component, only present on colours (`a`).
    W,
}

impl Axis {
    /// All axes in storage order.
    pub const ALL: [Axis; 4] = [Axis::X, Axis::Y, Axis::Z, Axis::W];

    /// Resolve a single-letter axis name. Accepts `x/y/z`, `r/g/b` and `a`.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'x' | 'r' => Some(Axis::X),
            'y' | 'g' => Some(Axis::Y),
            'z' | 'b' => Some(Axis::Z),
            'a' => Some(Axis::W),
            _ => None,
        }
    }

    /// Resolve an axis from a name string. Only one-character names are valid.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
    }

    /// Resolve an axis from a component index (0..=3).
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Axis::X),
            1 => Some(Axis::Y),
            2 => Some(Axis::Z),
            3 => Some(Axis::W),
            _ => None,
        }
    }

    /// The storage index of this axis.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
            Axis::W => 3,
        }
    }
}

/// Clamp every component of `v` into `[min, max]`.
///
/// The caller must ensure `min <= max`.
#[must_use]
pub fn clamp_vec3(v: Vec3, min: f32, max: f32) -> Vec3 {
    v.clamp(Vec3::splat(min), Vec3::splat(max))
}

/// Clamp every component of `v` (alpha included) into `[min, max]`.
///
/// The caller must ensure `min <= max`.
#[must_use]
pub fn clamp_vec4(v: Vec4, min: f32, max: f32) -> Vec4 {
    v.clamp(Vec4::splat(min), Vec4::splat(max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spatial_and_colour_names_alias() {
        assert_eq!(Axis::from_char('x'), Axis::from_char('r'));
        assert_eq!(Axis::from_char('y'), Axis::from_char('g'));
        assert_eq!(Axis::from_char('z'), Axis::from_char('b'));
        assert_eq!(Axis::from_char('a'), Some(Axis::W));
        assert_eq!(Axis::from_char('w'), None);
    }

    #[test]
    fn test_from_name_rejects_long_names() {
        assert_eq!(Axis::from_name("x"), Some(Axis::X));
        assert_eq!(Axis::from_name("xy"), None);
        assert_eq!(Axis::from_name(""), None);
    }

    #[test]
    fn test_index_roundtrip() {
        for axis in Axis::ALL {
            assert_eq!(Axis::from_index(axis.index()), Some(axis));
        }
        assert_eq!(Axis::from_index(4), None);
    }

    #[test]
    fn test_clamp_vec4() {
        let c = clamp_vec4(Vec4::new(1.5, -0.2, 0.5, 2.0), 0.0, 1.0);
        assert_eq!(c, Vec4::new(1.0, 0.0, 0.5, 1.0));
    }

    #[test]
    fn test_clamp_vec3() {
        let v = clamp_vec3(Vec3::new(-4.0, 0.25, 9.0), -1.0, 1.0);
        assert_eq!(v, Vec3::new(-1.0, 0.25, 1.0));
    }

    #[test]
    fn test_clamp_to_a_point() {
        assert_eq!(clamp_vec3(Vec3::new(-4.0, 0.5, 9.0), 0.5, 0.5), Vec3::splat(0.5));
    }

    #[test]
    fn test_axis_serialization() {
        let json = serde_json::to_string(&Axis::Z).unwrap();
        let restored: Axis = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, Axis::Z);
    }
}

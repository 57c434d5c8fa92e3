//! # plume_math
//!
//! Math types for the plume particle engine. Re-exports [`glam`] for linear
//! algebra and defines the named-axis vocabulary used when particle vectors
//! are accessed by component (`x`/`r`, `y`/`g`, `z`/`b`, `a`).

pub mod axis;

// Re-export glam types for convenience.
pub use glam::{Vec3, Vec4};

pub use axis::{Axis, clamp_vec3, clamp_vec4};

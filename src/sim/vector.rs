//! Three-axis vector helpers
//!
//! Vectors are `glam::DVec3` with x = right, y = up, z = forward.

use glam::DVec3;

/// Three-component vector (right, up, forward)
pub type Vector = DVec3;

/// Zero vector
pub const ZERO: Vector = DVec3::ZERO;
/// Right axis
pub const RIGHT: Vector = DVec3::new(1.0, 0.0, 0.0);
/// Up axis
pub const UP: Vector = DVec3::new(0.0, 1.0, 0.0);
/// Forward axis
pub const FORWARD: Vector = DVec3::new(0.0, 0.0, 1.0);
/// Mask for the horizontal (right/forward) plane
pub const SIDEWAYS: Vector = DVec3::new(1.0, 0.0, 1.0);

/// Named axis access for simulation vectors
pub trait Axes {
    fn right(&self) -> f64;
    fn up(&self) -> f64;
    fn forward(&self) -> f64;

    /// Projection onto the sideways plane (up component zeroed)
    fn sideways(&self) -> Vector;

    /// Squared magnitude of the sideways projection
    fn sideways_length_squared(&self) -> f64 {
        self.sideways().length_squared()
    }
}

impl Axes for DVec3 {
    #[inline]
    fn right(&self) -> f64 {
        self.x
    }

    #[inline]
    fn up(&self) -> f64 {
        self.y
    }

    #[inline]
    fn forward(&self) -> f64 {
        self.z
    }

    #[inline]
    fn sideways(&self) -> Vector {
        *self * SIDEWAYS
    }
}

/// Build a vector from named axes
#[inline]
pub fn vector(right: f64, up: f64, forward: f64) -> Vector {
    DVec3::new(right, up, forward)
}

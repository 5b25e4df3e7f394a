//! Environment and body state
//!
//! All state the simulators read and mutate lives here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::vector::{Vector, ZERO, vector};
use crate::consts::GRAVITY_UP;

/// Errors raised while constructing bodies
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BodyError {
    #[error("body weight must be finite and greater than zero, got {0}")]
    InvalidWeight(f64),
}

/// A time-bounded force applied to a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpulseForce {
    /// Force vector [kg * m * s^-2]
    pub force: Vector,
    /// Remaining duration in seconds (inactive once <= 0)
    pub remaining: f64,
}

impl ImpulseForce {
    pub fn new(force: Vector, duration: f64) -> Self {
        Self {
            force,
            remaining: duration,
        }
    }

    /// Whether the impulse still contributes to the net force
    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }
}

/// A single point mass
#[derive(Debug, Clone)]
pub struct Body {
    /// Mass of the body. Named weight; divides force into acceleration.
    weight: f64,
    /// Set by the caller; nothing in the simulation derives it
    pub on_ground: bool,
    /// Position [m]
    pub position: Vector,
    /// Velocity [m * s^-1]
    pub velocity: Vector,
    /// Acceleration [m * s^-2], recomputed by the dynamics step
    pub acceleration: Vector,
    /// Constant forces [kg * m * s^-2]. Carried with the body, not applied by the dynamics step.
    pub constant_forces: Vec<Vector>,
    /// Impulse forces in insertion order
    pub impulses: Vec<ImpulseForce>,
}

impl Body {
    /// Create a body at rest at the origin
    pub fn new(weight: f64) -> Result<Self, BodyError> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(BodyError::InvalidWeight(weight));
        }
        Ok(Self {
            weight,
            on_ground: false,
            position: ZERO,
            velocity: ZERO,
            acceleration: ZERO,
            constant_forces: Vec::new(),
            impulses: Vec::new(),
        })
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn with_position(mut self, position: Vector) -> Self {
        self.position = position;
        self
    }

    pub fn with_velocity(mut self, velocity: Vector) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn grounded(mut self, on_ground: bool) -> Self {
        self.on_ground = on_ground;
        self
    }

    pub fn with_impulse(mut self, force: Vector, duration: f64) -> Self {
        self.add_impulse(force, duration);
        self
    }

    pub fn with_constant_force(mut self, force: Vector) -> Self {
        self.constant_forces.push(force);
        self
    }

    /// Queue an impulse force for the coming ticks
    pub fn add_impulse(&mut self, force: Vector, duration: f64) {
        self.impulses.push(ImpulseForce::new(force, duration));
    }

    /// Number of impulses that still contribute to the net force
    pub fn active_impulses(&self) -> usize {
        self.impulses.iter().filter(|i| i.is_active()).count()
    }
}

/// The world the simulators operate on
#[derive(Debug, Clone)]
pub struct Environment {
    /// Gravity acceleration [m * s^-2], shared by all bodies
    pub gravity: Vector,
    /// Wind acceleration [m * s^-2], shared by all bodies
    pub wind: Vector,
    bodies: Vec<Body>,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            gravity: vector(0.0, GRAVITY_UP, 0.0),
            wind: ZERO,
            bodies: Vec::new(),
        }
    }
}

impl Environment {
    pub fn new(gravity: Vector, wind: Vector) -> Self {
        Self {
            gravity,
            wind,
            bodies: Vec::new(),
        }
    }

    /// Append a body; returns its index. Bodies are never removed.
    pub fn add_body(&mut self, body: Body) -> usize {
        self.bodies.push(body);
        self.bodies.len() - 1
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn body(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn body_mut(&mut self, index: usize) -> Option<&mut Body> {
        self.bodies.get_mut(index)
    }

    /// Serializable view of every body
    pub fn snapshot(&self) -> Vec<BodySnapshot> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(index, body)| BodySnapshot::of(index, body))
            .collect()
    }
}

/// Reportable state of one body after a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub index: usize,
    pub weight: f64,
    pub on_ground: bool,
    pub position: Vector,
    pub velocity: Vector,
    pub acceleration: Vector,
    pub active_impulses: usize,
    pub impulses: usize,
}

impl BodySnapshot {
    pub fn of(index: usize, body: &Body) -> Self {
        Self {
            index,
            weight: body.weight,
            on_ground: body.on_ground,
            position: body.position,
            velocity: body.velocity,
            acceleration: body.acceleration,
            active_impulses: body.active_impulses(),
            impulses: body.impulses.len(),
        }
    }
}

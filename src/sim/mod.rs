//! Simulation module
//!
//! Single-body point-mass physics, advanced in fixed steps:
//! - Dynamics: gravity, wind, ground friction and impulses into acceleration
//! - Kinematics: acceleration into velocity into position
//! - No rendering, timing or I/O dependencies

pub mod dynamics;
pub mod kinematics;
pub mod state;
pub mod tick;
pub mod vector;

pub use dynamics::{BodyDynamicsSimulator, ImpulsePolicy, friction_force};
pub use kinematics::BodyKinematicsSimulator;
pub use state::{Body, BodyError, BodySnapshot, Environment, ImpulseForce};
pub use tick::{Simulator, step, step_with};
pub use vector::{Axes, FORWARD, RIGHT, SIDEWAYS, UP, Vector, ZERO, vector};

//! Body kinematics: semi-implicit Euler integration

use super::state::Environment;
use super::tick::Simulator;
use super::vector::{Axes, UP};
use crate::consts::REST_THRESHOLD;

/// Integrates acceleration into velocity and velocity into position
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyKinematicsSimulator;

impl Simulator for BodyKinematicsSimulator {
    fn tick(&self, environment: &mut Environment, dt: f64) {
        // A zero step must not trip the rest snap
        if dt == 0.0 {
            return;
        }

        for body in environment.bodies_mut() {
            body.velocity += body.acceleration * dt;

            // Snap slow horizontal motion to rest, airborne or not
            if body.velocity.sideways_length_squared() < REST_THRESHOLD
                && body.acceleration.sideways_length_squared() < REST_THRESHOLD
            {
                body.velocity *= UP;
            }

            body.position += body.velocity * dt;
        }
    }
}

//! Fixed timestep simulation tick
//!
//! Both simulators share one capability: advance an environment by `dt`.

use super::dynamics::BodyDynamicsSimulator;
use super::kinematics::BodyKinematicsSimulator;
use super::state::Environment;

/// A stage of the simulation that advances an environment by one step
pub trait Simulator {
    fn tick(&self, environment: &mut Environment, dt: f64);
}

/// Advance the environment by one tick: dynamics, then kinematics.
///
/// Uses the default dynamics settings, which retain expired impulses.
pub fn step(environment: &mut Environment, dt: f64) {
    step_with(&BodyDynamicsSimulator::default(), environment, dt);
}

/// [`step`] with a configured dynamics stage
pub fn step_with(dynamics: &BodyDynamicsSimulator, environment: &mut Environment, dt: f64) {
    dynamics.tick(environment, dt);
    BodyKinematicsSimulator.tick(environment, dt);
}

//! Body dynamics: net force and acceleration per tick

use serde::{Deserialize, Serialize};

use super::state::{Environment, ImpulseForce};
use super::tick::Simulator;
use super::vector::{Axes, SIDEWAYS, Vector, ZERO};
use crate::consts::{
    FRICTION_NUMERATOR, KINETIC_FRICTION_DIVISOR, KINETIC_FRICTION_THRESHOLD,
    STATIC_FRICTION_DIVISOR,
};

/// What happens to impulse entries once their duration runs out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpulsePolicy {
    /// Expired impulses stay on the body and contribute nothing
    #[default]
    Retain,
    /// Expired impulses are dropped after the tick that expires them
    Prune,
}

/// Friction force vector on the sideways plane derived from gravity
#[inline]
pub fn friction_force(gravity: Vector, divisor: f64) -> Vector {
    Vector::splat(gravity.up() * (FRICTION_NUMERATOR / divisor)) * SIDEWAYS
}

/// Recomputes each body's acceleration from the forces acting on it
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyDynamicsSimulator {
    pub impulse_policy: ImpulsePolicy,
}

impl BodyDynamicsSimulator {
    pub fn new(impulse_policy: ImpulsePolicy) -> Self {
        Self { impulse_policy }
    }
}

impl Simulator for BodyDynamicsSimulator {
    fn tick(&self, environment: &mut Environment, dt: f64) {
        let gravity = environment.gravity;
        let wind = environment.wind;

        let kinetic_friction = friction_force(gravity, KINETIC_FRICTION_DIVISOR);
        let static_friction = friction_force(gravity, STATIC_FRICTION_DIVISOR);

        for body in environment.bodies_mut() {
            let weight = body.weight();

            let sliding = body.on_ground
                && body.velocity.sideways_length_squared() > KINETIC_FRICTION_THRESHOLD;

            let mut force: Vector = [
                gravity * weight, // F = m*g
                wind * weight,
                if sliding { kinetic_friction } else { ZERO },
            ]
            .into_iter()
            .sum();

            // Every impulse is decremented, active or not
            for impulse in body.impulses.iter_mut() {
                if impulse.is_active() {
                    force += impulse.force;
                }
                impulse.remaining -= dt;
            }

            if self.impulse_policy == ImpulsePolicy::Prune {
                body.impulses.retain(ImpulseForce::is_active);
            }

            // A body at rest on the ground only moves once the force beats static friction
            if body.on_ground {
                if body.velocity.x == 0.0 && force.x + static_friction.x < 0.0 {
                    force.x = 0.0;
                }
                if body.velocity.z == 0.0 && force.z + static_friction.z < 0.0 {
                    force.z = 0.0;
                }
            }

            body.acceleration = force / weight;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Body;
    use crate::sim::vector::vector;
    use approx::assert_relative_eq;

    const DT: f64 = 1.0 / 128.0;

    fn still_env() -> Environment {
        Environment::new(ZERO, ZERO)
    }

    #[test]
    fn test_friction_forces_from_gravity() {
        let gravity = vector(0.0, -9.81, 0.0);
        let kinetic = friction_force(gravity, KINETIC_FRICTION_DIVISOR);
        let stat = friction_force(gravity, STATIC_FRICTION_DIVISOR);

        assert_relative_eq!(kinetic.x, -9.81 * 2.5);
        assert_eq!(kinetic.y, 0.0);
        assert_relative_eq!(kinetic.z, -9.81 * 2.5);
        assert_relative_eq!(stat.x, -9.81 * (0.5 / 0.35));
        assert_eq!(stat.y, 0.0);
    }

    #[test]
    fn test_no_forces_no_acceleration() {
        let mut env = still_env();
        env.add_body(Body::new(4.0).unwrap().with_velocity(vector(3.0, 0.0, 0.0)));

        for _ in 0..10 {
            BodyDynamicsSimulator::default().tick(&mut env, DT);
            assert_eq!(env.bodies()[0].acceleration, ZERO);
        }
    }

    #[test]
    fn test_gravity_and_wind_scale_with_weight() {
        let mut env = Environment::new(vector(0.0, -9.81, 0.0), vector(-20.0, 0.0, 0.0));
        env.add_body(Body::new(3.0).unwrap());

        BodyDynamicsSimulator::default().tick(&mut env, DT);

        // Weight cancels: acceleration equals gravity + wind
        let acc = env.bodies()[0].acceleration;
        assert_relative_eq!(acc.x, -20.0);
        assert_relative_eq!(acc.y, -9.81);
        assert_eq!(acc.z, 0.0);
    }

    #[test]
    fn test_impulse_divided_by_weight() {
        let mut env = still_env();
        env.add_body(Body::new(2.0).unwrap().with_impulse(vector(0.0, 8.0, -4.0), 1.0));

        BodyDynamicsSimulator::default().tick(&mut env, DT);

        assert_eq!(env.bodies()[0].acceleration, vector(0.0, 4.0, -2.0));
    }

    #[test]
    fn test_impulse_expires_but_is_retained() {
        let mut env = still_env();
        // 0.5 s is exactly 64 ticks at 1/128 s
        env.add_body(Body::new(1.0).unwrap().with_impulse(vector(0.0, 10.0, 0.0), 0.5));

        let sim = BodyDynamicsSimulator::default();
        for tick in 0..64 {
            sim.tick(&mut env, DT);
            assert_eq!(env.bodies()[0].acceleration.y, 10.0, "tick {tick}");
        }
        for _ in 0..16 {
            sim.tick(&mut env, DT);
            assert_eq!(env.bodies()[0].acceleration, ZERO);
            assert_eq!(env.bodies()[0].impulses.len(), 1);
        }
        assert!(env.bodies()[0].impulses[0].remaining < 0.0);
    }

    #[test]
    fn test_prune_policy_drops_expired_impulses() {
        let mut env = still_env();
        env.add_body(
            Body::new(1.0)
                .unwrap()
                .with_impulse(vector(1.0, 0.0, 0.0), 2.0 * DT)
                .with_impulse(vector(0.0, 1.0, 0.0), 1.0),
        );

        let sim = BodyDynamicsSimulator::new(ImpulsePolicy::Prune);
        sim.tick(&mut env, DT);
        assert_eq!(env.bodies()[0].impulses.len(), 2);
        sim.tick(&mut env, DT);
        // Second tick still applied the short impulse, then dropped it
        assert_eq!(env.bodies()[0].acceleration, vector(1.0, 1.0, 0.0));
        assert_eq!(env.bodies()[0].impulses.len(), 1);
        sim.tick(&mut env, DT);
        assert_eq!(env.bodies()[0].acceleration, vector(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_static_friction_holds_weak_force() {
        let mut env = Environment::default();
        env.add_body(
            Body::new(1.0)
                .unwrap()
                .grounded(true)
                .with_impulse(vector(5.0, 0.0, 5.0), 1.0),
        );

        BodyDynamicsSimulator::default().tick(&mut env, DT);

        // 5 N is below the ~14 N static friction threshold on both axes
        let acc = env.bodies()[0].acceleration;
        assert_eq!(acc.x, 0.0);
        assert_eq!(acc.z, 0.0);
        assert_relative_eq!(acc.y, -9.81);
    }

    #[test]
    fn test_static_friction_passes_strong_force() {
        let mut env = Environment::default();
        env.add_body(
            Body::new(1.0)
                .unwrap()
                .grounded(true)
                .with_impulse(vector(30.0, 0.0, 0.0), 1.0),
        );

        BodyDynamicsSimulator::default().tick(&mut env, DT);

        let acc = env.bodies()[0].acceleration;
        assert_eq!(acc.x, 30.0);
        assert_eq!(acc.z, 0.0);
    }

    #[test]
    fn test_static_friction_clamps_negative_force() {
        let sim = BodyDynamicsSimulator::default();

        // A large push toward -right/-forward is below the threshold, so it is held
        let mut pushed = Environment::default();
        pushed.add_body(
            Body::new(1.0)
                .unwrap()
                .grounded(true)
                .with_impulse(vector(-30.0, 0.0, -30.0), 1.0),
        );
        sim.tick(&mut pushed, DT);
        let acc = pushed.bodies()[0].acceleration;
        assert_eq!(acc.x, 0.0);
        assert_eq!(acc.z, 0.0);
        assert_relative_eq!(acc.y, -9.81);

        // Same for a headwind
        let mut windy = Environment::new(vector(0.0, -9.81, 0.0), vector(-20.0, 0.0, 0.0));
        windy.add_body(Body::new(1.0).unwrap().grounded(true));
        sim.tick(&mut windy, DT);
        assert_eq!(windy.bodies()[0].acceleration.x, 0.0);

        // Once moving on that axis the lock no longer applies
        let mut moving = Environment::default();
        moving.add_body(
            Body::new(1.0)
                .unwrap()
                .grounded(true)
                .with_velocity(vector(0.2, 0.0, 0.0))
                .with_impulse(vector(-30.0, 0.0, 0.0), 1.0),
        );
        sim.tick(&mut moving, DT);
        assert_eq!(moving.bodies()[0].acceleration.x, -30.0);
    }

    #[test]
    fn test_static_friction_ignored_when_airborne_or_moving() {
        let sim = BodyDynamicsSimulator::default();

        let mut airborne = Environment::default();
        airborne.add_body(Body::new(1.0).unwrap().with_impulse(vector(5.0, 0.0, 0.0), 1.0));
        sim.tick(&mut airborne, DT);
        assert_eq!(airborne.bodies()[0].acceleration.x, 5.0);

        // Moving slowly along forward only: right axis still locks, forward does not
        let mut moving = Environment::default();
        moving.add_body(
            Body::new(1.0)
                .unwrap()
                .grounded(true)
                .with_velocity(vector(0.0, 0.0, 0.2))
                .with_impulse(vector(5.0, 0.0, 5.0), 1.0),
        );
        sim.tick(&mut moving, DT);
        let acc = moving.bodies()[0].acceleration;
        assert_eq!(acc.x, 0.0);
        assert_eq!(acc.z, 5.0);
    }

    #[test]
    fn test_kinetic_friction_on_sliding_body() {
        let mut env = Environment::default();
        env.add_body(
            Body::new(2.0)
                .unwrap()
                .grounded(true)
                .with_velocity(vector(1.0, 0.0, 0.0)),
        );

        BodyDynamicsSimulator::default().tick(&mut env, DT);

        let acc = env.bodies()[0].acceleration;
        let kinetic = -9.81 * 2.5;
        assert_relative_eq!(acc.x, kinetic / 2.0);
        assert_relative_eq!(acc.y, -9.81);
        // Forward is still at rest, so the static lock cancels friction there
        assert_eq!(acc.z, 0.0);
    }

    #[test]
    fn test_slow_grounded_body_feels_no_kinetic_friction() {
        let mut env = Environment::default();
        env.add_body(
            Body::new(1.0)
                .unwrap()
                .grounded(true)
                .with_velocity(vector(0.2, 0.0, 0.0)),
        );

        BodyDynamicsSimulator::default().tick(&mut env, DT);

        let acc = env.bodies()[0].acceleration;
        assert_eq!(acc.x, 0.0);
        // Forward velocity is zero and net forward force is zero, so the lock applies
        assert_eq!(acc.z, 0.0);
    }
}

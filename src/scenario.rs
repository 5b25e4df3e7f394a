//! Data-driven environment setup
//!
//! A scenario describes the environment constants, the bodies dropped into
//! it and how long to run. Scenarios are JSON documents; every field except
//! a body's `weight` has a default.
//!
//! ```json
//! {
//!   "tick_rate": 128,
//!   "duration": 2.0,
//!   "gravity": [0.0, -9.81, 0.0],
//!   "wind": [-20.0, 0.0, 0.0],
//!   "impulse_policy": "retain",
//!   "bodies": [
//!     { "weight": 1.0, "position": [0.0, -25.0, 0.0],
//!       "impulses": [{ "force": [10.0, 0.0, 0.0], "duration": 0.5 }] }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DEFAULT_SPAWN_UP, GRAVITY_UP, TICK_RATE};
use crate::driver::Driver;
use crate::sim::{Body, BodyError, Environment, ImpulsePolicy, Vector, ZERO, vector};

/// Errors raised while loading or building a scenario
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scenario JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tick rate must be greater than zero")]
    InvalidTickRate,
    #[error("duration must be finite and non-negative, got {0}")]
    InvalidDuration(f64),
    #[error("body {index}: {source}")]
    Body {
        index: usize,
        #[source]
        source: BodyError,
    },
}

/// An impulse queued on a body at startup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpulseConfig {
    pub force: Vector,
    /// Seconds the force stays active
    pub duration: f64,
}

/// Initial state of one body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    pub weight: f64,
    #[serde(default)]
    pub on_ground: bool,
    #[serde(default)]
    pub position: Vector,
    #[serde(default)]
    pub velocity: Vector,
    #[serde(default)]
    pub constant_forces: Vec<Vector>,
    #[serde(default)]
    pub impulses: Vec<ImpulseConfig>,
}

impl BodyConfig {
    pub fn build(&self) -> Result<Body, BodyError> {
        let mut body = Body::new(self.weight)?
            .grounded(self.on_ground)
            .with_position(self.position)
            .with_velocity(self.velocity);
        body.constant_forces = self.constant_forces.clone();
        for impulse in &self.impulses {
            body.add_impulse(impulse.force, impulse.duration);
        }
        Ok(body)
    }
}

/// Complete description of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    /// Ticks per second
    pub tick_rate: u32,
    /// Simulated seconds to run
    pub duration: f64,
    pub gravity: Vector,
    pub wind: Vector,
    pub impulse_policy: ImpulsePolicy,
    pub bodies: Vec<BodyConfig>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,
            duration: 1.0,
            gravity: vector(0.0, GRAVITY_UP, 0.0),
            wind: ZERO,
            impulse_policy: ImpulsePolicy::Retain,
            bodies: Vec::new(),
        }
    }
}

impl Scenario {
    /// One body below the origin with an optional impulse, no wind
    pub fn single_body(weight: f64, impulse: Option<ImpulseConfig>) -> Self {
        Self {
            bodies: vec![BodyConfig {
                weight,
                on_ground: false,
                position: vector(0.0, DEFAULT_SPAWN_UP, 0.0),
                velocity: ZERO,
                constant_forces: Vec::new(),
                impulses: impulse.into_iter().collect(),
            }],
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scenario = Self::from_json(&json)?;
        log::info!(
            "Loaded scenario {}: {} bodies, {} Hz, {}s",
            path.display(),
            scenario.bodies.len(),
            scenario.tick_rate,
            scenario.duration
        );
        Ok(scenario)
    }

    /// Check run parameters without building bodies
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.tick_rate == 0 {
            return Err(ScenarioError::InvalidTickRate);
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(ScenarioError::InvalidDuration(self.duration));
        }
        Ok(())
    }

    pub fn build_environment(&self) -> Result<Environment, ScenarioError> {
        let mut environment = Environment::new(self.gravity, self.wind);
        for (index, config) in self.bodies.iter().enumerate() {
            let body = config
                .build()
                .map_err(|source| ScenarioError::Body { index, source })?;
            environment.add_body(body);
        }
        Ok(environment)
    }

    /// Validate and produce a driver ready to run
    pub fn build(&self) -> Result<Driver, ScenarioError> {
        self.validate()?;
        let environment = self.build_environment()?;
        Ok(Driver::new(environment, self.tick_rate).with_impulse_policy(self.impulse_policy))
    }
}

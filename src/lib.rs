//! Body Sandbox - a fixed-timestep rigid-body motion sandbox
//!
//! Core modules:
//! - `sim`: Environment, bodies and the dynamics/kinematics simulators
//! - `driver`: Fixed-rate tick loop around an environment
//! - `scenario`: Data-driven environment setup (JSON)
//! - `scene`: Camera and viewport value types for an external renderer

pub mod driver;
pub mod scenario;
pub mod scene;
pub mod sim;

pub use driver::{Driver, FixedTimestep};
pub use scenario::{Scenario, ScenarioError};
pub use sim::{Body, BodyError, Environment, ImpulseForce, ImpulsePolicy, Vector};

/// Simulation constants
pub mod consts {
    /// Fixed tick rate of the driver loop (ticks per second)
    pub const TICK_RATE: u32 = 128;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f64 = 1.0 / TICK_RATE as f64;
    /// Maximum substeps per pump to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest wall-clock gap fed into the accumulator at once (seconds)
    pub const MAX_FRAME_TIME: f64 = 0.1;

    /// Gravity acceleration on the up axis (m/s²)
    pub const GRAVITY_UP: f64 = -9.81;

    /// Friction heuristics: gravity.up * (NUMERATOR / DIVISOR)
    pub const FRICTION_NUMERATOR: f64 = 0.50;
    pub const KINETIC_FRICTION_DIVISOR: f64 = 0.20;
    pub const STATIC_FRICTION_DIVISOR: f64 = 0.35;

    /// Squared horizontal speed above which a grounded body feels kinetic friction
    pub const KINETIC_FRICTION_THRESHOLD: f64 = 0.1;
    /// Squared horizontal speed/acceleration below which horizontal motion snaps to rest
    pub const REST_THRESHOLD: f64 = 0.1;

    /// Spawn height of the body built from command line arguments
    pub const DEFAULT_SPAWN_UP: f64 = -25.0;
}

//! Fixed-rate driver loop
//!
//! Owns an environment and ticks dynamics then kinematics at a fixed rate.
//! Wall-clock pacing goes through [`FixedTimestep`], which turns real elapsed
//! time into a bounded number of fixed ticks.

use crate::consts::{MAX_FRAME_TIME, MAX_SUBSTEPS, TICK_RATE};
use crate::sim::{BodyDynamicsSimulator, Environment, ImpulsePolicy, step_with};

/// Slack allowed when a duration lands on a whole number of ticks
const TICK_ROUNDING_EPSILON: f64 = 1e-9;

/// Accumulates real time and hands out fixed-size ticks
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    dt: f64,
    accumulator: f64,
    pub max_substeps: u32,
}

impl FixedTimestep {
    pub fn new(tick_rate: u32) -> Self {
        Self {
            dt: 1.0 / tick_rate.max(1) as f64,
            accumulator: 0.0,
            max_substeps: MAX_SUBSTEPS,
        }
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Time carried over to the next call
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Feed elapsed wall-clock seconds; returns how many ticks are due now.
    /// Negative and non-finite inputs count as no time at all.
    pub fn advance(&mut self, elapsed: f64) -> u32 {
        if elapsed.is_finite() {
            self.accumulator += elapsed.clamp(0.0, MAX_FRAME_TIME);
        }

        let mut substeps = 0;
        while self.accumulator >= self.dt && substeps < self.max_substeps {
            self.accumulator -= self.dt;
            substeps += 1;
        }

        if self.accumulator >= self.dt {
            log::warn!(
                "Falling behind: {:.4}s of simulation time still pending",
                self.accumulator
            );
        }

        substeps
    }
}

/// Runs the simulators over an environment at a fixed tick rate
#[derive(Debug, Clone)]
pub struct Driver {
    environment: Environment,
    dynamics: BodyDynamicsSimulator,
    clock: FixedTimestep,
    tick_rate: u32,
    ticks: u64,
}

impl Driver {
    /// A tick rate of zero is treated as one tick per second
    pub fn new(environment: Environment, tick_rate: u32) -> Self {
        let tick_rate = tick_rate.max(1);
        Self {
            environment,
            dynamics: BodyDynamicsSimulator::default(),
            clock: FixedTimestep::new(tick_rate),
            tick_rate,
            ticks: 0,
        }
    }

    pub fn with_impulse_policy(mut self, policy: ImpulsePolicy) -> Self {
        self.dynamics.impulse_policy = policy;
        self
    }

    pub fn dt(&self) -> f64 {
        self.clock.dt()
    }

    pub fn tick_rate(&self) -> u32 {
        self.tick_rate
    }

    /// Ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulated time so far (seconds)
    pub fn elapsed(&self) -> f64 {
        self.ticks as f64 * self.dt()
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn environment_mut(&mut self) -> &mut Environment {
        &mut self.environment
    }

    pub fn into_environment(self) -> Environment {
        self.environment
    }

    /// Run one dynamics + kinematics pair
    pub fn tick(&mut self) {
        let dt = self.dt();
        step_with(&self.dynamics, &mut self.environment, dt);
        self.ticks += 1;
    }

    /// Run `count` ticks, calling `observer` after each with the tick number and state
    pub fn run_ticks<F>(&mut self, count: u64, mut observer: F)
    where
        F: FnMut(u64, &Environment),
    {
        log::debug!("Running {} ticks at {} Hz", count, self.tick_rate);
        for _ in 0..count {
            self.tick();
            observer(self.ticks, &self.environment);
        }
    }

    /// Number of ticks needed to cover `seconds` of simulated time.
    ///
    /// Durations within rounding error of a whole tick count map to that count,
    /// so 0.07s at 100 Hz is 7 ticks rather than 8.
    pub fn ticks_for(&self, seconds: f64) -> u64 {
        if !seconds.is_finite() || seconds <= 0.0 {
            return 0;
        }
        let exact = seconds * self.tick_rate as f64;
        let nearest = exact.round();
        if (exact - nearest).abs() <= TICK_ROUNDING_EPSILON * nearest.max(1.0) {
            nearest as u64
        } else {
            exact.ceil() as u64
        }
    }

    /// Run enough ticks to cover `seconds` of simulated time; returns the tick count
    pub fn run_for<F>(&mut self, seconds: f64, observer: F) -> u64
    where
        F: FnMut(u64, &Environment),
    {
        let count = self.ticks_for(seconds);
        self.run_ticks(count, observer);
        count
    }

    /// Feed wall-clock time and run whatever ticks are due; returns how many ran
    pub fn pump<F>(&mut self, elapsed: f64, observer: F) -> u32
    where
        F: FnMut(u64, &Environment),
    {
        self.pump_until(elapsed, u64::MAX, observer)
    }

    /// Like [`pump`](Self::pump), but never runs past `limit` total ticks
    pub fn pump_until<F>(&mut self, elapsed: f64, limit: u64, observer: F) -> u32
    where
        F: FnMut(u64, &Environment),
    {
        let due = self.clock.advance(elapsed);
        let count = (due as u64).min(limit.saturating_sub(self.ticks)) as u32;
        self.run_ticks(count as u64, observer);
        count
    }
}

impl Default for Driver {
    fn default() -> Self {
        Self::new(Environment::default(), TICK_RATE)
    }
}

//! Body Sandbox entry point
//!
//! Builds an environment from command line arguments or a scenario file and
//! runs the fixed-rate tick loop, headless.

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;
    use std::thread;
    use std::time::{Duration, Instant};

    use anyhow::{Context, Result, bail};
    use clap::Parser;

    use body_sandbox::scenario::ImpulseConfig;
    use body_sandbox::sim::{BodySnapshot, Environment, ImpulsePolicy, vector};
    use body_sandbox::{Driver, Scenario};

    #[derive(Parser, Debug)]
    #[command(name = "body-sandbox", about = "Drop a body into a gravity/wind field and watch it move")]
    pub struct Args {
        /// Body weight, then impulse force right/up/forward and its duration in seconds
        #[arg(
            num_args = 5,
            value_names = ["WEIGHT", "RIGHT", "UP", "FORWARD", "DURATION"],
            allow_negative_numbers = true,
            conflicts_with = "scenario"
        )]
        body: Vec<f64>,

        /// JSON scenario file
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// Number of ticks to run (overrides the scenario duration)
        #[arg(long, conflicts_with = "seconds")]
        ticks: Option<u64>,

        /// Simulated seconds to run (overrides the scenario duration)
        #[arg(long)]
        seconds: Option<f64>,

        /// Pace ticks to the wall clock instead of running flat out
        #[arg(long)]
        realtime: bool,

        /// Log body state every N ticks (0 = only at the end)
        #[arg(long, default_value_t = 0)]
        report_every: u64,

        /// Print the final body states as JSON on stdout
        #[arg(long)]
        json: bool,

        /// Drop expired impulses instead of keeping them on the body
        #[arg(long)]
        prune_impulses: bool,
    }

    fn scenario_from_args(args: &Args) -> Result<Scenario> {
        let mut scenario = match (&args.scenario, args.body.as_slice()) {
            (Some(path), _) => Scenario::load(path)?,
            (None, [weight, right, up, forward, duration]) => Scenario::single_body(
                *weight,
                Some(ImpulseConfig {
                    force: vector(*right, *up, *forward),
                    duration: *duration,
                }),
            ),
            (None, []) => {
                log::info!("No body arguments given, dropping a unit body");
                Scenario::single_body(1.0, None)
            }
            (None, values) => bail!("expected 5 body values, got {}", values.len()),
        };

        if args.prune_impulses {
            scenario.impulse_policy = ImpulsePolicy::Prune;
        }
        if let Some(seconds) = args.seconds {
            scenario.duration = seconds;
        }
        Ok(scenario)
    }

    fn describe(body: &BodySnapshot) -> String {
        format!(
            "body {}: pos=({:.3}, {:.3}, {:.3}) vel=({:.3}, {:.3}, {:.3}) acc=({:.3}, {:.3}, {:.3}) impulses={}/{}",
            body.index,
            body.position.x,
            body.position.y,
            body.position.z,
            body.velocity.x,
            body.velocity.y,
            body.velocity.z,
            body.acceleration.x,
            body.acceleration.y,
            body.acceleration.z,
            body.active_impulses,
            body.impulses,
        )
    }

    fn report(tick: u64, environment: &Environment) {
        for body in environment.snapshot() {
            log::info!("tick {:>6} {}", tick, describe(&body));
        }
    }

    /// Run `total` ticks paced by the wall clock
    fn run_realtime<F>(driver: &mut Driver, total: u64, mut observer: F)
    where
        F: FnMut(u64, &Environment),
    {
        let pause = Duration::from_secs_f64(driver.dt() / 2.0);
        let mut last = Instant::now();

        while driver.ticks() < total {
            let now = Instant::now();
            let elapsed = now.duration_since(last).as_secs_f64();
            let ran = driver.pump_until(elapsed, total, &mut observer);
            last = now;

            if ran == 0 {
                thread::sleep(pause);
            }
        }
    }

    pub fn run() -> Result<()> {
        env_logger::init();
        let args = Args::parse();

        let scenario = scenario_from_args(&args)?;
        let mut driver = scenario.build().context("invalid scenario")?;

        let total = args
            .ticks
            .unwrap_or_else(|| driver.ticks_for(scenario.duration));

        log::info!(
            "Body Sandbox starting: {} bodies, {} ticks at {} Hz{}",
            driver.environment().bodies().len(),
            total,
            driver.tick_rate(),
            if args.realtime { ", real time" } else { "" }
        );

        let every = args.report_every;
        let mut observer = |tick: u64, environment: &Environment| {
            if every > 0 && tick % every == 0 {
                report(tick, environment);
            }
        };

        if args.realtime {
            run_realtime(&mut driver, total, &mut observer);
        } else {
            driver.run_ticks(total, &mut observer);
        }

        log::info!("Finished after {:.3}s simulated", driver.elapsed());

        if args.json {
            let snapshot = driver.environment().snapshot();
            println!(
                "{}",
                serde_json::to_string_pretty(&snapshot).context("failed to encode snapshot")?
            );
        } else {
            for body in driver.environment().snapshot() {
                println!("{}", describe(&body));
            }
        }

        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    cli::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Headless driver is native only; the library builds for wasm
}

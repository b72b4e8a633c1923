//! Airspace Commander headless runner
//!
//! Plays one seeded round with a simple autopilot and prints a JSON summary.
//! Useful for balancing tuning files and checking determinism across builds.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use airspace_commander::Tuning;
use airspace_commander::sim::{Director, GamePhase, Snapshot};

#[derive(Parser, Debug)]
#[command(name = "airspace-commander")]
#[command(about = "Run a seeded Airspace Commander round headlessly")]
struct Cli {
    /// RNG seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,
    /// Maximum ticks to run
    #[arg(long, default_value_t = 25 * 60 * 5)]
    ticks: u64,
    /// Tuning JSON file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Autopilot fires once every this many ticks (0 disables firing)
    #[arg(long, default_value_t = 20)]
    fire_every: u64,
    /// Skip every resource check
    #[arg(long, default_value_t = false)]
    sandbox: bool,
}

#[derive(Serialize)]
struct Summary {
    seed: u64,
    ticks: u64,
    phase: GamePhase,
    score: i64,
    buildings_left: usize,
    shots_fired: u32,
    refused: u32,
    final_state: Snapshot,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut tuning = match &cli.config {
        Some(path) => {
            Tuning::load(path).with_context(|| format!("loading {}", path.display()))?
        }
        None => Tuning::default(),
    };
    if let Some(seed) = cli.seed {
        tuning.seed = seed;
    }
    tuning.sandbox |= cli.sandbox;

    let seed = tuning.seed;
    let mut director = Director::new(tuning).context("starting round")?;
    let mut pilot = Autopilot::default();

    for tick in 1..=cli.ticks {
        pilot.shop(&mut director);
        if cli.fire_every > 0 && tick % cli.fire_every == 0 {
            pilot.fire(&mut director);
        }
        if !director.tick() {
            break;
        }
    }

    let summary = Summary {
        seed,
        ticks: director.time_ticks(),
        phase: director.phase(),
        score: director.ledger().score(),
        buildings_left: director.buildings().len(),
        shots_fired: pilot.shots_fired,
        refused: pilot.refused,
        final_state: director.snapshot(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[derive(Default)]
struct Autopilot {
    shots_fired: u32,
    refused: u32,
}

impl Autopilot {
    /// Aim at the centre of the hostile closest to the ground
    fn fire(&mut self, director: &mut Director) {
        let target = director
            .movables()
            .iter()
            .filter(|m| m.is_hostile() && !m.is_destroyed())
            .max_by(|a, b| a.position().y.total_cmp(&b.position().y))
            .map(|m| m.position() + m.size() / 2.0);

        let Some(target) = target else {
            return;
        };
        match director.fire_player_rocket(target.x, target.y) {
            Ok(()) => self.shots_fired += 1,
            Err(err) => {
                log::debug!("Autopilot held fire: {err}");
                self.refused += 1;
            }
        }
    }

    /// Spend score on the cheapest useful upgrade, keeping the best
    /// conventional loadout selected
    fn shop(&mut self, director: &mut Director) {
        if director.buildings().iter().any(|b| b.cur_hp() < b.max_hp())
            && director.renovate_all().is_ok()
        {
            return;
        }

        let researched = director.research_warhead().is_ok() || director.research_engine().is_ok();
        if !researched {
            return;
        }

        let engines = director.armory().engines().len();
        let conventional = director
            .armory()
            .warheads()
            .iter()
            .rposition(|w| !w.is_nuclear());
        if let Err(err) = director.select_engine(engines.saturating_sub(1)) {
            log::debug!("Autopilot kept its engine: {err}");
        }
        if let Some(index) = conventional {
            if let Err(err) = director.select_warhead(index) {
                log::debug!("Autopilot kept its warhead: {err}");
            }
        }
    }
}

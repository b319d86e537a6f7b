//! Headless boss battle simulator.
//!
//! ```text
//! bossfight-sim --boss sugar_wraith --runs 500 --seed 42
//! bossfight-sim --catalog content.json --config engine.json --json
//! ```

mod cli;
mod runner;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use bossfight_core::{Catalog, EngineConfig, Player};
use tracing::info;

use runner::{Outcome, Scenario};

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => Catalog::from_json(&read(path)?)
            .with_context(|| format!("invalid catalog {}", path.display())),
        None => Ok(Catalog::builtin()),
    }
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_json(&read(path)?)
            .with_context(|| format!("invalid engine config {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

fn main() -> Result<()> {
    let args = cli::parse_args();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .with_writer(std::io::stderr)
        .init();

    let catalog = load_catalog(args.catalog.as_deref())?;
    let config = load_config(args.config.as_deref())?;
    let boss = catalog.boss(&args.boss).cloned().with_context(|| {
        let known: Vec<&str> = catalog.bosses.iter().map(|boss| boss.id.as_str()).collect();
        format!("unknown boss '{}' (known: {})", args.boss, known.join(", "))
    })?;

    let scenario = Scenario {
        boss,
        player: Player::new("Hero", args.player_health, args.player_energy, args.strength),
        abilities: catalog.player_abilities,
        config,
        max_turns: args.max_turns,
    };

    info!(boss = %args.boss, runs = args.runs, seed = args.seed, "starting batch");
    let report = runner::run_batch(&scenario, args.seed, args.runs);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for battle in &report.battles {
            let outcome = match battle.outcome {
                Outcome::Victory => "victory",
                Outcome::Defeat => "defeat",
                Outcome::Timeout => "timeout",
            };
            println!(
                "seed {:>6}: {:<8} after {:>3} turns (player {:>3} hp, boss {:>3} hp)",
                battle.seed, outcome, battle.turns, battle.player_health, battle.boss_health
            );
        }
        println!();
        println!("{}", report.summary);
    }

    Ok(())
}

//! Command-line interface for the batch simulator.

use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

/// Headless boss battle simulator
#[derive(Parser, Debug)]
#[command(name = "bossfight-sim")]
#[command(about = "Runs seeded boss battles with an automatic player and reports outcomes")]
#[command(version)]
pub struct Args {
    /// Boss id to fight
    #[arg(long, default_value = "couch_golem")]
    pub boss: String,

    /// Content catalog JSON (defaults to the built-in catalog)
    #[arg(long, value_name = "CATALOG_FILE")]
    pub catalog: Option<PathBuf>,

    /// Engine configuration JSON
    #[arg(long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// First seed; run `n` uses `seed + n`
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Number of battles to run
    #[arg(long, default_value_t = 100)]
    pub runs: u64,

    /// Boss turns after which a battle counts as a timeout
    #[arg(long, default_value_t = 200)]
    pub max_turns: u32,

    /// Player maximum health
    #[arg(long, default_value_t = 120)]
    pub player_health: u32,

    /// Player maximum energy
    #[arg(long, default_value_t = 60)]
    pub player_energy: u32,

    /// Player strength
    #[arg(long, default_value_t = 15)]
    pub strength: u32,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Tracing level for the requested verbosity.
    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

pub fn parse_args() -> Args {
    Args::parse()
}

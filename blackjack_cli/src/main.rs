use std::path::{Path, PathBuf};

use anyhow::Context;
use blackjack_cli::{init_logging, JsonEvents, TerminalConsole};
use blackjack_lib::prelude::*;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Blackjack table for practicing card counting next to counting agents.
#[derive(Debug, Parser)]
#[command(name = "blackjack", author, version, about)]
struct Cli {
    /// JSON game configuration. Skips the setup questions.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed for shuffling and agent arrivals.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Print events as JSON lines instead of card art.
    #[arg(long)]
    json: bool,
}

fn load_config(path: &Path) -> anyhow::Result<GameConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: GameConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

fn play<C: Console>(console: C, cli: &Cli) -> anyhow::Result<GameSummary> {
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut game = match &cli.config {
        Some(path) => BlackjackGame::new(load_config(path)?, console, rng)?,
        None => BlackjackGame::setup(console, rng)?,
    };
    Ok(game.run()?)
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let summary = if cli.json {
        play(JsonEvents::new(TerminalConsole::new()), &cli)?
    } else {
        play(TerminalConsole::new(), &cli)?
    };
    println!("{}", summary);
    Ok(())
}

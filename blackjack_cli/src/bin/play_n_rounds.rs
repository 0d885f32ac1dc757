use blackjack_cli::autopilot::parse_rounds;
use blackjack_cli::{init_logging, AutopilotConsole};
use blackjack_lib::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

const UNIT: u32 = 10;

fn main() {
    init_logging();
    let mut args = std::env::args().skip(1);
    let numb_rounds = match args.next().map(|n| parse_rounds(&n)) {
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
        None => {
            eprintln!("usage: play_n_rounds ROUNDS [SEED]");
            std::process::exit(1);
        }
    };
    let rng = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => StdRng::seed_from_u64(seed),
        Some(Err(e)) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
        None => StdRng::from_entropy(),
    };

    let config = GameConfig::new()
        .num_players(1)
        .starting_money(500)
        .show_count(true)
        .build();
    let console = AutopilotConsole::new(config, UNIT, numb_rounds)
        .verbose(std::env::var_os("VERBOSE").is_some());

    let mut game = match BlackjackGame::new(config, console, rng) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    match game.run() {
        Ok(summary) => println!("{}", summary),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

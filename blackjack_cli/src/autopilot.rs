//! A console that plays every human seat by itself, for unattended runs.

use crate::render;
use anyhow::Context;
use blackjack_lib::game::DEALER_STANDS_ON;
use blackjack_lib::prelude::*;
use std::collections::HashMap;

/// Bets a flat unit, hits below 17 like the dealer and asks to end after a set number of rounds.
#[derive(Debug)]
pub struct AutopilotConsole {
    config: GameConfig,
    unit: u32,
    rounds: u32,
    rounds_played: u32,
    verbose: bool,
    totals: HashMap<String, u32>,
}

impl AutopilotConsole {
    pub fn new(config: GameConfig, unit: u32, rounds: u32) -> Self {
        AutopilotConsole {
            config,
            unit,
            rounds,
            rounds_played: 0,
            verbose: false,
            totals: HashMap::new(),
        }
    }

    /// Prints every event as it would appear at the terminal.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }
}

/// Reads a round count for an unattended run. The engine always plays a round before asking
/// whether to stop, so zero is refused.
pub fn parse_rounds(arg: &str) -> anyhow::Result<u32> {
    let rounds: u32 = arg
        .trim()
        .parse()
        .with_context(|| format!("{:?} is not a round count", arg))?;
    if rounds == 0 {
        anyhow::bail!("at least one round must be played");
    }
    Ok(rounds)
}

/// Best total of the cards showing.
fn visible_total(snapshot: &HandSnapshot) -> u32 {
    snapshot
        .faces()
        .into_iter()
        .filter_map(|face| match face {
            CardFace::Up(card) => Some(card),
            CardFace::Down => None,
        })
        .collect::<Hand>()
        .best_count()
}

impl Console for AutopilotConsole {
    fn show(&mut self, event: &GameEvent) {
        if let GameEvent::Hand(snapshot) = event {
            self.totals
                .insert(snapshot.owner().to_string(), visible_total(snapshot));
        }
        if self.verbose {
            println!("{}", render::event(event));
        }
    }

    fn ask_yes_no(&mut self, question: Question) -> bool {
        match question {
            Question::ShowCountEachRound => self.config.show_count,
            Question::ShowDecksEachRound => self.config.show_decks,
            Question::KeepDeckCount => true,
            Question::AnyoneLeaving | Question::PlayerLeaving(_) => false,
            Question::EndGame => {
                self.rounds_played += 1;
                self.rounds_played >= self.rounds
            }
        }
    }

    fn ask_player_count(&mut self) -> u32 {
        self.config.num_players
    }

    fn ask_starting_money(&mut self) -> u32 {
        self.config.starting_money
    }

    fn ask_deck_count(&mut self) -> u32 {
        self.config.num_decks
    }

    fn ask_counting_scheme(&mut self) -> CountingScheme {
        self.config.counting_scheme
    }

    fn ask_move(&mut self, player: u32) -> PlayerCommand {
        let total = self
            .totals
            .get(&Seat::Player(player).to_string())
            .copied()
            .unwrap_or(0);
        if total < DEALER_STANDS_ON {
            PlayerCommand::Hit
        } else {
            PlayerCommand::Stand
        }
    }

    fn ask_bet(&mut self, _player: u32, balance: u32) -> Option<u32> {
        Some(self.unit.min(balance))
    }
}

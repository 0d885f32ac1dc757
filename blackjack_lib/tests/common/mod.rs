#![allow(dead_code)]

use blackjack_lib::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::VecDeque;

/// A console that answers from prepared scripts and records everything it is shown.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    pub bets: VecDeque<Option<u32>>,
    pub moves: VecDeque<PlayerCommand>,
    pub leaving: VecDeque<bool>,
    pub deck_counts: VecDeque<u32>,
    pub keep_deck_count: bool,
    pub end_game_after: Option<u32>,
    pub events: Vec<GameEvent>,
    pub questions: Vec<Question>,
    end_game_asked: u32,
}

impl ScriptedConsole {
    pub fn new() -> Self {
        ScriptedConsole {
            keep_deck_count: true,
            ..Default::default()
        }
    }

    pub fn bets<I: IntoIterator<Item = Option<u32>>>(mut self, bets: I) -> Self {
        self.bets.extend(bets);
        self
    }

    pub fn moves<I: IntoIterator<Item = PlayerCommand>>(mut self, moves: I) -> Self {
        self.moves.extend(moves);
        self
    }

    pub fn narratives(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                GameEvent::Narrative(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn said(&self, needle: &str) -> bool {
        self.narratives().iter().any(|s| s.contains(needle))
    }
}

impl Console for ScriptedConsole {
    fn show(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }

    fn ask_yes_no(&mut self, question: Question) -> bool {
        self.questions.push(question);
        match question {
            Question::ShowCountEachRound | Question::ShowDecksEachRound => false,
            Question::KeepDeckCount => self.keep_deck_count,
            Question::AnyoneLeaving | Question::PlayerLeaving(_) => {
                self.leaving.pop_front().unwrap_or(false)
            }
            Question::EndGame => {
                self.end_game_asked += 1;
                self.end_game_after
                    .map_or(false, |rounds| self.end_game_asked >= rounds)
            }
        }
    }

    fn ask_player_count(&mut self) -> u32 {
        1
    }

    fn ask_starting_money(&mut self) -> u32 {
        100
    }

    fn ask_deck_count(&mut self) -> u32 {
        self.deck_counts.pop_front().unwrap_or(6)
    }

    fn ask_counting_scheme(&mut self) -> CountingScheme {
        CountingScheme::HiLo
    }

    fn ask_move(&mut self, _player: u32) -> PlayerCommand {
        self.moves.pop_front().unwrap_or(PlayerCommand::Stand)
    }

    fn ask_bet(&mut self, _player: u32, _balance: u32) -> Option<u32> {
        self.bets.pop_front().unwrap_or(None)
    }
}

pub fn stacked(ranks: &[u8]) -> Shoe {
    Shoe::stacked(
        ranks
            .iter()
            .map(|&r| Card::new(r, Suit::Spades).expect("test ranks are valid")),
    )
}

pub fn quiet_config(players: u32, money: u32) -> GameConfig {
    GameConfig::new()
        .num_players(players)
        .starting_money(money)
        .agent_arrival_chance(0.0)
        .build()
}

/// One human with `money` against a shoe dealt in exactly the order of `ranks`.
pub fn table(
    ranks: &[u8],
    money: u32,
    console: ScriptedConsole,
) -> BlackjackGame<ScriptedConsole, StdRng> {
    BlackjackGame::with_shoe(
        quiet_config(1, money),
        stacked(ranks),
        console,
        StdRng::seed_from_u64(7),
    )
    .expect("valid test config")
}

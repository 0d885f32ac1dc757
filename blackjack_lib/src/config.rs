use crate::card::CountingScheme;
use crate::console::{Console, Question};
use crate::error::BlackjackGameError;
use crate::shoe::MAX_DECKS;
use serde::{Deserialize, Serialize};

pub const MAX_PLAYERS: u32 = 5;
pub const MAX_STARTING_MONEY: u32 = 1_000_000;

/// Struct for configuring a single game of blackjack
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub counting_scheme: CountingScheme,
    pub show_count: bool,
    pub show_decks: bool,
    pub num_players: u32,
    pub starting_money: u32,
    pub num_decks: u32,
    #[serde(default = "default_arrival_chance")]
    pub agent_arrival_chance: f64,
    #[serde(default = "default_max_agents")]
    pub max_agents: usize,
}

fn default_arrival_chance() -> f64 {
    0.2
}

fn default_max_agents() -> usize {
    3
}

impl GameConfig {
    /// Associated method for returning a new `GameConfigBuilder` object.
    pub fn new() -> GameConfigBuilder {
        GameConfigBuilder::default()
    }

    /// Collects the setup answers from `console`: counting scheme, whether to show the count and
    /// the decks left each round, number of players, starting money and number of decks.
    pub fn from_console<C: Console + ?Sized>(console: &mut C) -> GameConfig {
        let counting_scheme = console.ask_counting_scheme();
        let show_count = console.ask_yes_no(Question::ShowCountEachRound);
        let show_decks = console.ask_yes_no(Question::ShowDecksEachRound);
        let num_players = console.ask_player_count();
        let starting_money = console.ask_starting_money();
        let num_decks = console.ask_deck_count();
        GameConfig::new()
            .counting_scheme(counting_scheme)
            .show_count(show_count)
            .show_decks(show_decks)
            .num_players(num_players)
            .starting_money(starting_money)
            .num_decks(num_decks)
            .build()
    }

    /// Checks every field against the ranges the prompts allow.
    pub fn validate(&self) -> Result<(), BlackjackGameError> {
        if self.num_players > MAX_PLAYERS {
            return Err(BlackjackGameError::InvalidConfig(format!(
                "at most {} players may sit at the table",
                MAX_PLAYERS
            )));
        }
        if self.starting_money > MAX_STARTING_MONEY {
            return Err(BlackjackGameError::InvalidConfig(format!(
                "starting money may not exceed {}",
                MAX_STARTING_MONEY
            )));
        }
        if self.num_decks == 0 || self.num_decks > MAX_DECKS {
            return Err(BlackjackGameError::InvalidDeckCount {
                requested: self.num_decks,
                max: MAX_DECKS,
            });
        }
        if !(0.0..=1.0).contains(&self.agent_arrival_chance) {
            return Err(BlackjackGameError::InvalidConfig(
                "agent arrival chance must be a probability".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::new().build()
    }
}

/// Struct to implement builder pattern for `GameConfig`
#[derive(Debug, Clone, Copy, Default)]
pub struct GameConfigBuilder {
    counting_scheme: Option<CountingScheme>,
    show_count: Option<bool>,
    show_decks: Option<bool>,
    num_players: Option<u32>,
    starting_money: Option<u32>,
    num_decks: Option<u32>,
    agent_arrival_chance: Option<f64>,
    max_agents: Option<usize>,
}

impl GameConfigBuilder {
    pub fn counting_scheme(&mut self, scheme: CountingScheme) -> &mut Self {
        self.counting_scheme = Some(scheme);
        self
    }

    /// Method for setting whether the running count is shown before every round
    pub fn show_count(&mut self, show: bool) -> &mut Self {
        self.show_count = Some(show);
        self
    }

    /// Method for setting whether the decks remaining are shown before every round
    pub fn show_decks(&mut self, show: bool) -> &mut Self {
        self.show_decks = Some(show);
        self
    }

    pub fn num_players(&mut self, players: u32) -> &mut Self {
        self.num_players = Some(players);
        self
    }

    pub fn starting_money(&mut self, money: u32) -> &mut Self {
        self.starting_money = Some(money);
        self
    }

    /// Method for choosing the number of decks used in the shoe
    pub fn num_decks(&mut self, decks: u32) -> &mut Self {
        self.num_decks = Some(decks);
        self
    }

    /// Method for setting the chance, per round, that a waiting agent sits down
    pub fn agent_arrival_chance(&mut self, chance: f64) -> &mut Self {
        self.agent_arrival_chance = Some(chance);
        self
    }

    pub fn max_agents(&mut self, agents: usize) -> &mut Self {
        self.max_agents = Some(agents);
        self
    }

    /// Method for building a `GameConfig` object from the given `GameConfigBuilder` object.
    pub fn build(&mut self) -> GameConfig {
        GameConfig {
            counting_scheme: self.counting_scheme.unwrap_or(CountingScheme::HiLo),
            show_count: self.show_count.unwrap_or(false),
            show_decks: self.show_decks.unwrap_or(false),
            num_players: self.num_players.unwrap_or(1),
            starting_money: self.starting_money.unwrap_or(100),
            num_decks: self.num_decks.unwrap_or(6),
            agent_arrival_chance: self
                .agent_arrival_chance
                .unwrap_or_else(default_arrival_chance),
            max_agents: self.max_agents.unwrap_or_else(default_max_agents),
        }
    }
}

use crate::console::Balance;
use serde::Serialize;
use std::fmt::Display;

/// Simple struct for recording the interesting data points accumulated over a game
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GameSummary {
    pub rounds_played: u32,
    pub wins: u32,
    pub pushes: u32,
    pub losses: u32,
    pub player_blackjacks: u32,
    pub agent_arrivals: u32,
    pub agent_departures: u32,
    pub final_balances: Vec<Balance>,
}

impl GameSummary {
    pub fn hands_played(&self) -> u32 {
        self.wins + self.pushes + self.losses + self.player_blackjacks
    }
}

impl Display for GameSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const WIDTH: usize = 45;
        const TEXT_WIDTH: usize = "number of player blackjacks".len() + 5;
        const NUM_WIDTH: usize = WIDTH - TEXT_WIDTH;
        let total_hands = self.hands_played();
        let pct = |n: u32| {
            if total_hands == 0 {
                0.0
            } else {
                n as f32 / total_hands as f32
            }
        };
        writeln!(f, "{:-^WIDTH$}", "summary")?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "rounds played", self.rounds_played)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "hands won", self.wins)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "hands pushed", self.pushes)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "hands lost", self.losses)?;
        writeln!(
            f,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}",
            "number of player blackjacks", self.player_blackjacks
        )?;
        writeln!(
            f,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$.2}",
            "win percentage",
            pct(self.wins + self.player_blackjacks)
        )?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "agents arrived", self.agent_arrivals)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "agents tilted", self.agent_departures)?;
        for balance in &self.final_balances {
            writeln!(
                f,
                "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}",
                format!("player {} balance", balance.player),
                balance.money
            )?;
        }
        write!(f, "{}", "-".repeat(WIDTH))
    }
}

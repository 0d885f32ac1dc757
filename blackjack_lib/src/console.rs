//! The boundary between the round engine and whatever renders the table and reads answers.
//!
//! The engine only pushes structured [`GameEvent`]s and asks for already validated answers,
//! retrying on malformed input is the implementor's job.

use crate::card::{Card, CountingScheme};
use serde::{Deserialize, Serialize};

/// How a card is shown: face down for a hidden hole card, face up otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CardFace {
    Down,
    Up(Card),
}

/// The cards of one seat at the moment the snapshot was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandSnapshot {
    owner: String,
    cards: Vec<Card>,
    hole_card_hidden: bool,
}

impl HandSnapshot {
    pub fn new(owner: String, cards: Vec<Card>, hole_card_hidden: bool) -> Self {
        HandSnapshot {
            owner,
            cards,
            hole_card_hidden,
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn hole_card_hidden(&self) -> bool {
        self.hole_card_hidden
    }

    /// Every card in deal order, the first turned down when the hole card is hidden.
    pub fn faces(&self) -> Vec<CardFace> {
        self.cards
            .iter()
            .enumerate()
            .map(|(i, card)| {
                if i == 0 && self.hole_card_hidden {
                    CardFace::Down
                } else {
                    CardFace::Up(*card)
                }
            })
            .collect()
    }
}

impl Serialize for HandSnapshot {
    /// Serializes the visible faces only, so a hidden hole card never leaves the engine.
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("HandSnapshot", 3)?;
        state.serialize_field("owner", &self.owner)?;
        state.serialize_field("cards", &self.faces())?;
        state.serialize_field("hole_card_hidden", &self.hole_card_hidden)?;
        state.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub player: u32,
    pub money: u32,
}

/// Everything the engine tells the display layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum GameEvent {
    Hand(HandSnapshot),
    Narrative(String),
    Balances(Vec<Balance>),
    CardCount { scheme: CountingScheme, value: f32 },
    DecksRemaining(f32),
    AgentBet { name: String, amount: u32 },
    Divider,
}

/// Every yes or no question the engine asks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Question {
    ShowCountEachRound,
    ShowDecksEachRound,
    KeepDeckCount,
    AnyoneLeaving,
    PlayerLeaving(u32),
    EndGame,
}

impl Question {
    pub fn prompt(&self) -> String {
        match self {
            Question::ShowCountEachRound => {
                "Would you like us to show you the card-count before betting every round?"
                    .to_string()
            }
            Question::ShowDecksEachRound => {
                "Would you like us to show you the amount of decks left before betting every round?"
                    .to_string()
            }
            Question::KeepDeckCount => {
                "Would you like the original amount of decks in the card-shoe?".to_string()
            }
            Question::AnyoneLeaving => "Would any players like to leave the table?".to_string(),
            Question::PlayerLeaving(n) => format!("Would player {} like to leave?", n),
            Question::EndGame => "Would you like to end the game?".to_string(),
        }
    }
}

/// A human's in-turn command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    Hit,
    Stand,
    ShowCount,
}

/// The collaborator that renders events and answers prompts.
pub trait Console {
    fn show(&mut self, event: &GameEvent);
    fn ask_yes_no(&mut self, question: Question) -> bool;
    /// Number of human players, in `0..=5`.
    fn ask_player_count(&mut self) -> u32;
    /// Starting money for every player, in `0..=1_000_000`.
    fn ask_starting_money(&mut self) -> u32;
    /// Decks in the shoe, in `1..=15`.
    fn ask_deck_count(&mut self) -> u32;
    fn ask_counting_scheme(&mut self) -> CountingScheme;
    fn ask_move(&mut self, player: u32) -> PlayerCommand;
    /// `None` when the answer could not be read as a number. The engine plays that
    /// player with a zero bet.
    fn ask_bet(&mut self, player: u32, balance: u32) -> Option<u32>;

    fn narrate(&mut self, message: &str) {
        self.show(&GameEvent::Narrative(message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Suit;

    fn snapshot(hidden: bool) -> HandSnapshot {
        HandSnapshot::new(
            "Dealer".to_string(),
            vec![
                Card::new(14, Suit::Spades).unwrap(),
                Card::new(7, Suit::Hearts).unwrap(),
            ],
            hidden,
        )
    }

    #[test]
    fn test_faces_hide_only_the_hole_card() {
        let faces = snapshot(true).faces();
        assert_eq!(faces[0], CardFace::Down);
        assert_eq!(faces[1], CardFace::Up(Card::new(7, Suit::Hearts).unwrap()));
        assert!(snapshot(false)
            .faces()
            .iter()
            .all(|f| matches!(f, CardFace::Up(_))));
    }

    #[test]
    fn test_serialized_snapshot_redacts_hole_card() {
        let json = serde_json::to_string(&snapshot(true)).unwrap();
        assert!(json.contains("\"Down\""));
        assert!(!json.contains("Spades"));
        let json = serde_json::to_string(&snapshot(false)).unwrap();
        assert!(json.contains("Spades"));
    }
}

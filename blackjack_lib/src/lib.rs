//! Core of a multi-seat blackjack table with card counting instrumentation: the shoe and its
//! running counts, hands and payouts, the counting agents, and the round engine tying them
//! together. Rendering and input live behind the [`console::Console`] trait.

pub mod agent;
pub mod card;
pub mod config;
pub mod console;
pub mod error;
pub mod game;
pub mod hand;
pub mod participant;
pub mod shoe;
pub mod summary;

pub use agent::{AgentMove, AgentPolicy};
pub use card::{Card, CountingScheme, Suit};
pub use config::{GameConfig, GameConfigBuilder};
pub use error::BlackjackGameError;
pub use game::BlackjackGame;
pub use hand::Hand;
pub use participant::{Participant, Seat};
pub use shoe::Shoe;
pub use summary::GameSummary;

pub mod prelude {
    pub use super::console::{
        Balance, CardFace, Console, GameEvent, HandSnapshot, PlayerCommand, Question,
    };
    pub use super::{
        AgentMove, AgentPolicy, BlackjackGame, BlackjackGameError, Card, CountingScheme,
        GameConfig, GameSummary, Hand, Participant, Seat, Shoe, Suit,
    };
}

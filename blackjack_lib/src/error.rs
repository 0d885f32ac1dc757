use thiserror::Error;

/// Errors produced by the blackjack engine and its building blocks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlackjackGameError {
    #[error("rank {0} is not a valid card rank, expected 2 through 14")]
    InvalidRank(u8),
    #[error("a shoe must hold between 1 and {max} decks, got {requested}")]
    InvalidDeckCount { requested: u32, max: u32 },
    #[error("cannot bet {bet} with a balance of {balance}")]
    InsufficientFunds { balance: u32, bet: u32 },
    #[error("unknown counting scheme {0:?}, expected HI, HALF or ZEN")]
    InvalidScheme(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

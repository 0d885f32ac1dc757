//! Playing cards and the count weights each counting scheme assigns them.

use crate::error::BlackjackGameError;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

/// Lowest and highest rank a card may carry. Ranks 11 through 14 are Jack, Queen, King and Ace.
pub const MIN_RANK: u8 = 2;
pub const MAX_RANK: u8 = 14;
pub const ACE: u8 = 14;

/// Cards in a single deck.
pub const DECK_SIZE: usize = 52;

lazy_static! {
    static ref HI_LO_TABLE: HashMap<u8, f32> = {
        let mut table = HashMap::new();
        for rank in 2..7 {
            table.insert(rank, 1.0);
        }
        for rank in 7..10 {
            table.insert(rank, 0.0);
        }
        for rank in 10..=14 {
            table.insert(rank, -1.0);
        }
        table
    };
    static ref HALVES_TABLE: HashMap<u8, f32> = {
        let mut table = HashMap::new();
        table.insert(2, 0.5);
        table.insert(3, 1.0);
        table.insert(4, 1.0);
        table.insert(5, 1.5);
        table.insert(6, 1.0);
        table.insert(7, 0.5);
        table.insert(8, 0.0);
        table.insert(9, -0.5);
        for rank in 10..=14 {
            table.insert(rank, -1.0);
        }
        table
    };
    static ref ZEN_TABLE: HashMap<u8, f32> = {
        let mut table = HashMap::new();
        for rank in [2, 3, 7] {
            table.insert(rank, 1.0);
        }
        for rank in 4..=6 {
            table.insert(rank, 2.0);
        }
        table.insert(8, 0.0);
        table.insert(9, 0.0);
        for rank in 10..=13 {
            table.insert(rank, -2.0);
        }
        table.insert(ACE, -1.0);
        table
    };
}

/// The four suits, displayed by their symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Diamonds,
    Hearts,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Diamonds, Suit::Hearts, Suit::Clubs];

    pub fn symbol(&self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Clubs => '♣',
        }
    }
}

impl Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The card counting systems a table can track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CountingScheme {
    HiLo,
    Halves,
    Zen,
}

impl CountingScheme {
    /// Weight this scheme assigns to `card`.
    pub fn weight(&self, card: &Card) -> f32 {
        let table: &HashMap<u8, f32> = match self {
            CountingScheme::HiLo => &HI_LO_TABLE,
            CountingScheme::Halves => &HALVES_TABLE,
            CountingScheme::Zen => &ZEN_TABLE,
        };
        table[&card.rank]
    }
}

impl FromStr for CountingScheme {
    type Err = BlackjackGameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "HI" => Ok(CountingScheme::HiLo),
            "HALF" => Ok(CountingScheme::Halves),
            "ZEN" => Ok(CountingScheme::Zen),
            _ => Err(BlackjackGameError::InvalidScheme(s.to_string())),
        }
    }
}

impl Display for CountingScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CountingScheme::HiLo => write!(f, "Hi-Lo system"),
            CountingScheme::Halves => write!(f, "Halves system"),
            CountingScheme::Zen => write!(f, "Zen Count system"),
        }
    }
}

/// An immutable playing card. Blackjack value and count weights are derived from the rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    rank: u8,
    suit: Suit,
}

impl Card {
    /// Creates a new card, `rank` must lie in `2..=14`.
    pub fn new(rank: u8, suit: Suit) -> Result<Card, BlackjackGameError> {
        if !(MIN_RANK..=MAX_RANK).contains(&rank) {
            return Err(BlackjackGameError::InvalidRank(rank));
        }
        Ok(Card { rank, suit })
    }

    pub fn rank(&self) -> u8 {
        self.rank
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    pub fn is_ace(&self) -> bool {
        self.rank == ACE
    }

    /// Blackjack value: pip value for 2 through 10, 10 for faces, 11 for an ace.
    pub fn value(&self) -> u32 {
        match self.rank {
            2..=10 => self.rank as u32,
            11..=13 => 10,
            _ => 11,
        }
    }

    pub fn hi_lo(&self) -> f32 {
        CountingScheme::HiLo.weight(self)
    }

    pub fn halves(&self) -> f32 {
        CountingScheme::Halves.weight(self)
    }

    pub fn zen(&self) -> f32 {
        CountingScheme::Zen.weight(self)
    }

    /// Rank as printed on the card face.
    pub fn label(&self) -> String {
        match self.rank {
            11 => "J".to_string(),
            12 => "Q".to_string(),
            13 => "K".to_string(),
            ACE => "A".to_string(),
            r => r.to_string(),
        }
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.label(), self.suit)
    }
}

/// A standard 52 card deck, 13 ranks by 4 suits, in rank order.
pub fn standard_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for rank in MIN_RANK..=MAX_RANK {
        for suit in Suit::ALL {
            deck.push(Card { rank, suit });
        }
    }
    deck
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blackjack_values() {
        let values: Vec<u32> = (2..=14)
            .map(|r| Card::new(r, Suit::Hearts).unwrap().value())
            .collect();
        assert_eq!(values, vec![2, 3, 4, 5, 6, 7, 8, 9, 10, 10, 10, 10, 11]);
    }

    #[test]
    fn test_count_tables() {
        let hi_lo: Vec<f32> = (2..=14).map(|r| Card::new(r, Suit::Clubs).unwrap().hi_lo()).collect();
        let halves: Vec<f32> = (2..=14).map(|r| Card::new(r, Suit::Clubs).unwrap().halves()).collect();
        let zen: Vec<f32> = (2..=14).map(|r| Card::new(r, Suit::Clubs).unwrap().zen()).collect();

        assert_eq!(
            hi_lo,
            vec![1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, -1.0, -1.0, -1.0, -1.0, -1.0]
        );
        assert_eq!(
            halves,
            vec![0.5, 1.0, 1.0, 1.5, 1.0, 0.5, 0.0, -0.5, -1.0, -1.0, -1.0, -1.0, -1.0]
        );
        assert_eq!(
            zen,
            vec![1.0, 1.0, 2.0, 2.0, 2.0, 1.0, 0.0, 0.0, -2.0, -2.0, -2.0, -2.0, -1.0]
        );
    }

    #[test]
    fn test_balanced_schemes_sum_to_zero_over_a_deck() {
        let deck = standard_deck();
        for scheme in [CountingScheme::HiLo, CountingScheme::Halves, CountingScheme::Zen] {
            let total: f32 = deck.iter().map(|c| scheme.weight(c)).sum();
            assert_eq!(total, 0.0, "{scheme} is not balanced");
        }
    }

    #[test]
    fn test_invalid_rank() {
        assert_eq!(
            Card::new(1, Suit::Spades),
            Err(BlackjackGameError::InvalidRank(1))
        );
        assert!(Card::new(15, Suit::Spades).is_err());
    }

    #[test]
    fn test_labels_and_scheme_parsing() {
        let labels: Vec<String> = (2..=14)
            .map(|r| Card::new(r, Suit::Spades).unwrap().label())
            .collect();
        assert_eq!(labels[8], "10");
        assert_eq!(&labels[9..], &["J", "Q", "K", "A"]);
        assert_eq!(Card::new(14, Suit::Hearts).unwrap().to_string(), "A♥");

        assert_eq!("hi".parse::<CountingScheme>(), Ok(CountingScheme::HiLo));
        assert_eq!(" Half ".parse::<CountingScheme>(), Ok(CountingScheme::Halves));
        assert_eq!("ZEN".parse::<CountingScheme>(), Ok(CountingScheme::Zen));
        assert!("omega".parse::<CountingScheme>().is_err());
    }
}

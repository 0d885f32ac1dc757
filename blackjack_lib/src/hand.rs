use crate::card::Card;
use serde::{Deserialize, Serialize};

/// Hand totals above this are bust.
pub const BLACKJACK: u32 = 21;

/// The cards a participant currently holds, in the order they were dealt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Hand { cards: Vec::new() }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub(crate) fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Sum of blackjack values with every ace counted as 11.
    pub fn pip_total(&self) -> u32 {
        self.cards.iter().map(Card::value).sum()
    }

    /// Highest total that does not bust, demoting soft aces from 11 to 1 one at a time
    /// while the total is over 21. Returns the bust total if no demotion can save the hand.
    pub fn best_count(&self) -> u32 {
        let mut soft_aces = self.cards.iter().filter(|c| c.is_ace()).count();
        let mut total = self.pip_total();
        while total > BLACKJACK && soft_aces > 0 {
            total -= 10;
            soft_aces -= 1;
        }
        total
    }

    pub fn is_bust(&self) -> bool {
        self.best_count() > BLACKJACK
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Hand {
            cards: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Suit;

    fn hand(ranks: &[u8]) -> Hand {
        ranks
            .iter()
            .map(|&r| Card::new(r, Suit::Spades).unwrap())
            .collect()
    }

    #[test]
    fn test_two_aces_and_nine() {
        let h = hand(&[14, 14, 9]);
        assert_eq!(h.pip_total(), 31);
        assert_eq!(h.best_count(), 21);
        assert!(!h.is_bust());
    }

    #[test]
    fn test_three_aces_and_eight() {
        let h = hand(&[14, 14, 14, 8]);
        assert_eq!(h.pip_total(), 41);
        assert_eq!(h.best_count(), 21);
    }

    #[test]
    fn test_soft_total_kept_when_under_21() {
        assert_eq!(hand(&[14, 6]).best_count(), 17);
        assert_eq!(hand(&[14, 13]).best_count(), 21);
    }

    #[test]
    fn test_bust_without_aces() {
        let h = hand(&[13, 12, 2]);
        assert_eq!(h.best_count(), 22);
        assert!(h.is_bust());
    }

    #[test]
    fn test_recomputed_as_cards_are_added() {
        let mut h = hand(&[14, 5]);
        assert_eq!(h.best_count(), 16);
        h.push(Card::new(10, Suit::Hearts).unwrap());
        assert_eq!(h.best_count(), 16);
        h.push(Card::new(9, Suit::Hearts).unwrap());
        assert_eq!(h.best_count(), 25);
    }
}

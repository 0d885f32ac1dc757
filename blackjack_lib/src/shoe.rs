//! The dealing shoe: live cards in draw order plus the discard pile every count is computed from.

use crate::card::{standard_deck, Card, CountingScheme, DECK_SIZE};
use crate::error::BlackjackGameError;
use crate::hand::Hand;
use log::trace;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;

/// Largest number of decks a shoe may be built from.
pub const MAX_DECKS: u32 = 15;

#[derive(Debug, Clone, Default)]
pub struct Shoe {
    live: VecDeque<Card>,
    discard: Vec<Card>,
}

impl Shoe {
    /// Creates an empty shoe.
    pub fn new() -> Self {
        Shoe {
            live: VecDeque::new(),
            discard: Vec::new(),
        }
    }

    /// Creates a shoe that deals `cards` front to back without shuffling.
    pub fn stacked<I: IntoIterator<Item = Card>>(cards: I) -> Self {
        Shoe {
            live: cards.into_iter().collect(),
            discard: Vec::new(),
        }
    }

    /// Clears the shoe and fills it with `deck_count` freshly shuffled decks.
    pub fn build<R: Rng + ?Sized>(
        &mut self,
        deck_count: u32,
        rng: &mut R,
    ) -> Result<(), BlackjackGameError> {
        if deck_count == 0 || deck_count > MAX_DECKS {
            return Err(BlackjackGameError::InvalidDeckCount {
                requested: deck_count,
                max: MAX_DECKS,
            });
        }
        self.clear();
        let mut cards: Vec<Card> = (0..deck_count).flat_map(|_| standard_deck()).collect();
        cards.shuffle(rng);
        self.live.extend(cards);
        Ok(())
    }

    /// Moves the first `n` live cards into `hand`, recording each one on the discard pile.
    ///
    /// # Panics
    /// Panics if fewer than `n` live cards remain. The engine checks the shoe before every
    /// round, so an underflow here means that check was skipped.
    pub fn draw(&mut self, n: usize, hand: &mut Hand) {
        assert!(
            self.live.len() >= n,
            "shoe underflow: drew {} cards with only {} left",
            n,
            self.live.len()
        );
        for card in self.live.drain(..n) {
            trace!("drew {}", card);
            hand.push(card);
            self.discard.push(card);
        }
    }

    /// Sum of `scheme` weights over the whole discard pile, recomputed on every call.
    pub fn count_since(&self, scheme: CountingScheme) -> f32 {
        self.discard.iter().map(|card| scheme.weight(card)).sum()
    }

    pub fn live_len(&self) -> usize {
        self.live.len()
    }

    pub fn discard_len(&self) -> usize {
        self.discard.len()
    }

    pub fn discards(&self) -> &[Card] {
        &self.discard
    }

    /// Live cards measured in decks.
    pub fn decks_remaining(&self) -> f32 {
        self.live.len() as f32 / DECK_SIZE as f32
    }

    /// Empties both the live cards and the discard pile, which resets every count.
    pub fn clear(&mut self) {
        self.live.clear();
        self.discard.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.live.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Suit;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn multiset<'a, I: IntoIterator<Item = &'a Card>>(cards: I) -> HashMap<Card, usize> {
        let mut counts = HashMap::new();
        for card in cards {
            *counts.entry(*card).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn test_build_fills_every_rank_and_suit() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut shoe = Shoe::new();
        shoe.build(6, &mut rng).unwrap();

        assert_eq!(shoe.live_len(), 6 * 52);
        assert_eq!(shoe.discard_len(), 0);
        let counts = multiset(shoe.iter());
        assert_eq!(counts.len(), 52);
        assert!(counts.values().all(|&n| n == 6));
    }

    #[test]
    fn test_build_shuffles() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut shoe = Shoe::new();
        shoe.build(1, &mut rng).unwrap();
        let order: Vec<Card> = shoe.iter().copied().collect();
        assert_ne!(order, standard_deck());
        assert_eq!(multiset(&order), multiset(&standard_deck()));
    }

    #[test]
    fn test_build_rejects_bad_deck_counts() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut shoe = Shoe::new();
        assert_eq!(
            shoe.build(0, &mut rng),
            Err(BlackjackGameError::InvalidDeckCount { requested: 0, max: 15 })
        );
        assert!(shoe.build(16, &mut rng).is_err());
        assert!(shoe.build(15, &mut rng).is_ok());
    }

    #[test]
    fn test_rebuild_resets_discards() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut shoe = Shoe::new();
        shoe.build(2, &mut rng).unwrap();
        shoe.draw(30, &mut Hand::new());
        shoe.build(2, &mut rng).unwrap();
        assert_eq!(shoe.discard_len(), 0);
        assert_eq!(shoe.count_since(CountingScheme::HiLo), 0.0);
        assert_eq!(shoe.live_len(), 104);
    }

    #[test]
    fn test_draw_moves_cards_in_order() {
        let cards: Vec<Card> = [5, 9, 14, 2]
            .iter()
            .map(|&r| Card::new(r, Suit::Diamonds).unwrap())
            .collect();
        let mut shoe = Shoe::stacked(cards.clone());
        let mut hand = Hand::new();

        shoe.draw(3, &mut hand);

        assert_eq!(hand.cards(), &cards[..3]);
        assert_eq!(shoe.discards(), &cards[..3]);
        assert_eq!(shoe.live_len(), 1);
        assert_eq!(shoe.live_len() + shoe.discard_len(), cards.len());
    }

    #[test]
    fn test_count_since_tracks_discards() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut shoe = Shoe::new();
        shoe.build(4, &mut rng).unwrap();

        for batch in [2, 1, 7, 3, 11, 1, 19] {
            let mut hand = Hand::new();
            shoe.draw(batch, &mut hand);
            for scheme in [CountingScheme::HiLo, CountingScheme::Halves, CountingScheme::Zen] {
                let expected: f32 = shoe.discards().iter().map(|c| scheme.weight(c)).sum();
                assert_eq!(shoe.count_since(scheme), expected);
            }
            assert_eq!(shoe.live_len() + shoe.discard_len(), 4 * 52);
        }
    }

    #[test]
    fn test_decks_remaining() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut shoe = Shoe::new();
        shoe.build(3, &mut rng).unwrap();
        shoe.draw(26, &mut Hand::new());
        assert_eq!(shoe.decks_remaining(), 2.5);
    }

    #[test]
    #[should_panic(expected = "shoe underflow")]
    fn test_draw_past_end_panics() {
        let mut shoe = Shoe::stacked(vec![Card::new(2, Suit::Clubs).unwrap()]);
        shoe.draw(2, &mut Hand::new());
    }
}

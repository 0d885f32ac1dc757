//! Decision making for the autonomous counters that drift in and out of the table.

use crate::card::CountingScheme;
use crate::hand::Hand;
use crate::shoe::Shoe;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// Agents stop drawing once their hand reaches this total plus their risk offset.
pub const STAND_THRESHOLD: i32 = 17;

lazy_static! {
    /// The agents waiting on the casino floor when a game starts.
    pub static ref DEFAULT_ROSTER: Vec<AgentPolicy> = vec![
        AgentPolicy::new("Cercei Lannister", 5, -1, 50, 5),
        AgentPolicy::new("Margaery Tyrell", 5, -4, 25, 5),
        AgentPolicy::new("Tyrion Lannister", 5, -2, 10, 5),
        AgentPolicy::new("Tywin Lannister", 10, -2, 50, 6),
        AgentPolicy::new("Joffrey Baratheon", -30, 3, 1000, 1),
        AgentPolicy::new("Littlefinger", 5, -5, 10, 4),
        AgentPolicy::new("Renley Baratheon", 10, -2, 420, 3),
        AgentPolicy::new("Obyeryn Martell", 15, 1, 5, 3),
        AgentPolicy::new("Varys", 1, -5, 10, 4),
        AgentPolicy::new("John Snow", 20, 0, 1, 10),
        AgentPolicy::new("Sansa Stark", -5, -1, 10, 4),
    ];
}

/// What an agent does on its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentMove {
    Hit,
    Stand,
}

/// Betting, playing and tilt state of one agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentPolicy {
    name: String,
    accuracy: i32,
    risk: i32,
    unit: u32,
    leave_condition: u32,
    #[serde(default)]
    loss_streak: u32,
}

impl AgentPolicy {
    /// `accuracy` is how far off the agent's Hi-Lo count runs, `risk` shifts the stand threshold
    /// away from 17, `unit` is the betting unit and `leave_condition` the number of consecutive
    /// losses the agent tolerates before leaving.
    pub fn new(name: &str, accuracy: i32, risk: i32, unit: u32, leave_condition: u32) -> Self {
        AgentPolicy {
            name: name.to_string(),
            accuracy,
            risk,
            unit,
            leave_condition,
            loss_streak: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit(&self) -> u32 {
        self.unit
    }

    pub fn loss_streak(&self) -> u32 {
        self.loss_streak
    }

    /// Bet sized from the agent's distorted Hi-Lo reading of `shoe`, never below one unit.
    pub fn decide_bet_size(&self, shoe: &Shoe) -> u32 {
        let decks_remaining = shoe.decks_remaining();
        let count = shoe.count_since(CountingScheme::HiLo);
        let biased = if count >= 0.0 {
            count + self.accuracy as f32
        } else {
            count - self.accuracy as f32
        };
        if biased <= 0.0 {
            return self.unit;
        }
        let true_count = decks_remaining / biased;
        (true_count * self.unit as f32).floor() as u32
    }

    /// Stands once the raw pip total, aces counted as 11, reaches `17 + risk`.
    pub fn decide_next_action(&self, hand: &Hand) -> AgentMove {
        let stop_value = STAND_THRESHOLD + self.risk;
        if hand.pip_total() as i32 >= stop_value {
            AgentMove::Stand
        } else {
            AgentMove::Hit
        }
    }

    pub fn should_leave(&self) -> bool {
        self.loss_streak >= self.leave_condition
    }

    /// Losses, ties against the dealer and busts.
    pub fn record_loss(&mut self) {
        self.loss_streak += 1;
    }

    /// Wins and naturals walk the streak back toward zero.
    pub fn record_win(&mut self) {
        self.loss_streak = self.loss_streak.saturating_sub(1);
    }

    pub fn reset_streak(&mut self) {
        self.loss_streak = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Card, Suit};

    fn cards(ranks: &[u8]) -> Vec<Card> {
        ranks
            .iter()
            .map(|&r| Card::new(r, Suit::Spades).unwrap())
            .collect()
    }

    /// A shoe with `discarded` already dealt and `live` cards left.
    fn shoe_after(discarded: &[u8], live: usize) -> Shoe {
        let mut all = cards(discarded);
        all.extend(std::iter::repeat(Card::new(8, Suit::Clubs).unwrap()).take(live));
        let mut shoe = Shoe::stacked(all);
        shoe.draw(discarded.len(), &mut Hand::new());
        shoe
    }

    #[test]
    fn test_bet_floors_at_one_unit() {
        // running count -3, biased further down
        let shoe = shoe_after(&[10, 11, 12], 104);
        let agent = AgentPolicy::new("a", 2, 0, 25, 3);
        assert_eq!(agent.decide_bet_size(&shoe), 25);

        // negative accuracy drags a positive count to zero
        let shoe = shoe_after(&[2, 3], 52);
        let agent = AgentPolicy::new("b", -2, 0, 25, 3);
        assert_eq!(agent.decide_bet_size(&shoe), 25);
    }

    #[test]
    fn test_bet_uses_decks_over_biased_count() {
        // running count +2, accuracy +2, 104 cards left: 2 decks / 4 = 0.5
        let shoe = shoe_after(&[2, 3], 104);
        let agent = AgentPolicy::new("a", 2, 0, 50, 3);
        assert_eq!(agent.decide_bet_size(&shoe), 25);

        // running count -6, accuracy -10: biased +4, 156 cards left: 3 / 4 * 10
        let shoe = shoe_after(&[10, 10, 10, 11, 12, 13], 156);
        let agent = AgentPolicy::new("b", -10, 0, 10, 3);
        assert_eq!(agent.decide_bet_size(&shoe), 7);
    }

    #[test]
    fn test_bet_is_deterministic() {
        let shoe = shoe_after(&[4, 5, 6, 9], 200);
        let agent = AgentPolicy::new("a", 1, 0, 10, 3);
        assert_eq!(agent.decide_bet_size(&shoe), agent.decide_bet_size(&shoe));
    }

    #[test]
    fn test_next_action_uses_pip_total() {
        let agent = AgentPolicy::new("a", 0, 0, 10, 3);
        let soft_seventeen: Hand = cards(&[14, 6]).into_iter().collect();
        assert_eq!(agent.decide_next_action(&soft_seventeen), AgentMove::Stand);

        // best count is 12 but the pip total of 22 already clears the threshold
        let two_aces: Hand = cards(&[14, 14]).into_iter().collect();
        assert_eq!(agent.decide_next_action(&two_aces), AgentMove::Stand);

        let sixteen: Hand = cards(&[10, 6]).into_iter().collect();
        assert_eq!(agent.decide_next_action(&sixteen), AgentMove::Hit);
    }

    #[test]
    fn test_risk_moves_threshold() {
        let cautious = AgentPolicy::new("a", 0, -4, 10, 3);
        let reckless = AgentPolicy::new("b", 0, 3, 10, 3);
        let thirteen: Hand = cards(&[10, 3]).into_iter().collect();
        let nineteen: Hand = cards(&[10, 9]).into_iter().collect();
        assert_eq!(cautious.decide_next_action(&thirteen), AgentMove::Stand);
        assert_eq!(reckless.decide_next_action(&nineteen), AgentMove::Hit);
    }

    #[test]
    fn test_leave_after_consecutive_losses() {
        let mut agent = AgentPolicy::new("a", 0, 0, 10, 3);
        agent.record_loss();
        agent.record_loss();
        assert!(!agent.should_leave());
        agent.record_loss();
        assert!(agent.should_leave());
    }

    #[test]
    fn test_streak_never_negative() {
        let mut agent = AgentPolicy::new("a", 0, 0, 10, 2);
        agent.record_win();
        assert_eq!(agent.loss_streak(), 0);
        agent.record_loss();
        agent.record_win();
        agent.record_win();
        assert_eq!(agent.loss_streak(), 0);
    }

    #[test]
    fn test_default_roster() {
        assert_eq!(DEFAULT_ROSTER.len(), 11);
        assert!(DEFAULT_ROSTER.iter().all(|a| a.loss_streak() == 0));
    }
}

//! Seats at the table. The dealer, human players and agents share one record; agents carry
//! an [`AgentPolicy`] on top of it.

use crate::agent::AgentPolicy;
use crate::console::HandSnapshot;
use crate::error::BlackjackGameError;
use crate::hand::Hand;
use crate::shoe::Shoe;
use std::fmt::Display;

/// Who occupies a seat.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Seat {
    Dealer,
    Player(u32),
    Agent(String),
}

impl Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Seat::Dealer => write!(f, "Dealer"),
            Seat::Player(n) => write!(f, "Player {}", n),
            Seat::Agent(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Participant {
    seat: Seat,
    money: u32,
    pot: u32,
    count: u32,
    hole_card_hidden: bool,
    hand: Hand,
    policy: Option<AgentPolicy>,
}

impl Participant {
    /// The dealer starts with no money and its hole card hidden.
    pub fn dealer() -> Self {
        Participant {
            seat: Seat::Dealer,
            money: 0,
            pot: 0,
            count: 0,
            hole_card_hidden: true,
            hand: Hand::new(),
            policy: None,
        }
    }

    pub fn player(number: u32, money: u32) -> Self {
        Participant {
            seat: Seat::Player(number),
            money,
            pot: 0,
            count: 0,
            hole_card_hidden: false,
            hand: Hand::new(),
            policy: None,
        }
    }

    /// Agents hold no real money, their bets are for show.
    pub fn agent(policy: AgentPolicy) -> Self {
        Participant {
            seat: Seat::Agent(policy.name().to_string()),
            money: 0,
            pot: 0,
            count: 0,
            hole_card_hidden: false,
            hand: Hand::new(),
            policy: Some(policy),
        }
    }

    pub fn seat(&self) -> &Seat {
        &self.seat
    }

    pub fn money(&self) -> u32 {
        self.money
    }

    pub fn pot(&self) -> u32 {
        self.pot
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn policy(&self) -> Option<&AgentPolicy> {
        self.policy.as_ref()
    }

    pub fn policy_mut(&mut self) -> Option<&mut AgentPolicy> {
        self.policy.as_mut()
    }

    pub fn is_agent(&self) -> bool {
        self.policy.is_some()
    }

    pub fn hole_card_hidden(&self) -> bool {
        self.hole_card_hidden
    }

    pub fn hide_hole_card(&mut self) {
        self.hole_card_hidden = true;
    }

    pub fn reveal_hole_card(&mut self) {
        self.hole_card_hidden = false;
    }

    /// Deals the two opening cards.
    pub fn deal_initial(&mut self, shoe: &mut Shoe) {
        shoe.draw(2, &mut self.hand);
    }

    pub fn hit(&mut self, shoe: &mut Shoe) {
        shoe.draw(1, &mut self.hand);
    }

    /// Recomputes the ace-adjusted total of the current hand.
    pub fn best_count(&mut self) -> u32 {
        self.count = self.hand.best_count();
        self.count
    }

    /// The total from the most recent [`Participant::best_count`] call.
    pub fn last_count(&self) -> u32 {
        self.count
    }

    /// Moves `amount` from money into the pot.
    pub fn place_bet(&mut self, amount: u32) -> Result<(), BlackjackGameError> {
        let remaining = self
            .money
            .checked_sub(amount)
            .ok_or(BlackjackGameError::InsufficientFunds {
                balance: self.money,
                bet: amount,
            })?;
        self.money = remaining;
        self.pot += amount;
        Ok(())
    }

    /// Returns the pot untouched, used when a hand pushes.
    pub fn settle_push(&mut self) {
        self.money = self.money.saturating_add(self.pot);
        self.pot = 0;
        self.count = 0;
    }

    /// Pays out a winning hand: 2.5 times the pot for a natural (truncated), twice the pot otherwise.
    pub fn payout(&mut self, natural: bool) {
        let pot = u64::from(self.pot);
        let winnings = if natural { pot * 5 / 2 } else { pot * 2 };
        let winnings = u32::try_from(winnings).unwrap_or(u32::MAX);
        self.money = self.money.saturating_add(winnings);
        self.pot = 0;
        self.count = 0;
    }

    /// The bet is lost to the house.
    pub fn forfeit(&mut self) {
        self.pot = 0;
        self.count = 0;
    }

    /// Empties the hand, money and pot are untouched.
    pub fn clear_hand(&mut self) {
        self.hand.clear();
    }

    pub fn snapshot(&self) -> HandSnapshot {
        HandSnapshot::new(
            self.seat.to_string(),
            self.hand.cards().to_vec(),
            self.hole_card_hidden,
        )
    }
}

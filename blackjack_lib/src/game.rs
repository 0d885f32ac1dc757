//! Module that runs a full game of blackjack at one table: the dealer, every human player and
//! whichever agents are seated, one round at a time until nobody is left or the table quits.

pub mod phase;

use crate::agent::{AgentMove, AgentPolicy, DEFAULT_ROSTER};
use crate::card::CountingScheme;
use crate::config::GameConfig;
use crate::console::{Balance, Console, GameEvent, PlayerCommand, Question};
use crate::error::BlackjackGameError;
use crate::hand::BLACKJACK;
use crate::participant::{Participant, Seat};
use crate::shoe::{Shoe, MAX_DECKS};
use crate::summary::GameSummary;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Ordering;

pub use phase::Phase;

/// The dealer draws while below this total and stands on any 17.
pub const DEALER_STANDS_ON: u32 = 17;

/// Cards held back per seated participant, plus a flat margin, before the shoe is rebuilt.
pub const CARDS_PER_SEAT: usize = 5;
pub const SHOE_MARGIN: usize = 5;

const ARRIVAL_LINES: [&str; 6] = [
    "Someone wanders over from the roulette wheel.",
    "The dealer nods at a newcomer pulling up a stool.",
    "A pit boss escorts someone to the table.",
    "Someone drops a stack of chips in front of the empty seat.",
    "A familiar face from the bar takes a seat.",
    "You look up from your cards to find someone new beside you.",
];

/// Struct that owns the table: shoe, dealer, seated humans and agents, and the console
/// every prompt and event goes through.
pub struct BlackjackGame<C: Console, R: Rng = StdRng> {
    config: GameConfig,
    console: C,
    rng: R,
    shoe: Shoe,
    deck_count: u32,
    dealer: Participant,
    players: Vec<Participant>,
    agents: Vec<Participant>,
    sat_out: Vec<Participant>,
    agent_pool: Vec<Participant>,
    in_play: Vec<usize>,
    game_over: bool,
    summary: GameSummary,
}

impl<C: Console, R: Rng> BlackjackGame<C, R> {
    /// Greets the table, asks `console` for the setup answers and opens the table.
    pub fn setup(mut console: C, rng: R) -> Result<Self, BlackjackGameError> {
        console.narrate("Hello Player. Welcome to blackjack.");
        console.show(&GameEvent::Divider);
        let config = GameConfig::from_console(&mut console);
        BlackjackGame::new(config, console, rng)
    }

    /// Opens a table for `config` with a freshly shuffled shoe and the default agent roster.
    pub fn new(config: GameConfig, console: C, mut rng: R) -> Result<Self, BlackjackGameError> {
        config.validate()?;
        let mut shoe = Shoe::new();
        shoe.build(config.num_decks, &mut rng)?;
        BlackjackGame::with_shoe(config, shoe, console, rng)
    }

    /// Opens a table that deals from `shoe` as given.
    pub fn with_shoe(
        config: GameConfig,
        shoe: Shoe,
        console: C,
        rng: R,
    ) -> Result<Self, BlackjackGameError> {
        config.validate()?;
        let players = (1..=config.num_players)
            .map(|n| Participant::player(n, config.starting_money))
            .collect();
        let agent_pool = DEFAULT_ROSTER
            .iter()
            .cloned()
            .map(Participant::agent)
            .collect();
        Ok(BlackjackGame {
            deck_count: config.num_decks,
            config,
            console,
            rng,
            shoe,
            dealer: Participant::dealer(),
            players,
            agents: Vec::new(),
            sat_out: Vec::new(),
            agent_pool,
            in_play: Vec::new(),
            game_over: false,
            summary: GameSummary::default(),
        })
    }

    /// Replaces the agents waiting to join the table.
    pub fn with_roster(mut self, roster: Vec<AgentPolicy>) -> Self {
        self.agent_pool = roster.into_iter().map(Participant::agent).collect();
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    pub fn dealer(&self) -> &Participant {
        &self.dealer
    }

    pub fn players(&self) -> &[Participant] {
        &self.players
    }

    /// Agents seated at the table.
    pub fn agents(&self) -> &[Participant] {
        &self.agents
    }

    /// Agents waiting on the casino floor.
    pub fn agent_pool(&self) -> &[Participant] {
        &self.agent_pool
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    pub fn summary(&self) -> &GameSummary {
        &self.summary
    }

    /// Plays rounds until every human has left or the table asks to stop, then reports the
    /// final balances.
    pub fn run(&mut self) -> Result<GameSummary, BlackjackGameError> {
        while !self.game_over {
            if self.players.is_empty() {
                self.console.narrate("There is no one left.");
                self.console.narrate("The casino now closes.");
                self.game_over = true;
                break;
            }
            self.play_round()?;
        }
        let balances = self.balances();
        self.console.show(&GameEvent::Balances(balances.clone()));
        // departed players are recorded as they leave, seated ones are replaced on every call
        self.summary
            .final_balances
            .retain(|b| !balances.iter().any(|seated| seated.player == b.player));
        self.summary.final_balances.extend(balances);
        self.summary.final_balances.sort_by_key(|b| b.player);
        Ok(self.summary.clone())
    }

    /// Runs one round from the shoe check through cleanup.
    pub fn play_round(&mut self) -> Result<(), BlackjackGameError> {
        let round = self.summary.rounds_played + 1;
        let mut phase = Phase::ShoeCheck;
        while !phase.is_terminal() {
            debug!("round {}: {:?}", round, phase);
            phase = self.advance(phase)?;
        }
        debug!("round {}: {:?}", round, phase);
        self.cleanup();
        self.summary.rounds_played = round;
        Ok(())
    }

    /// Runs `phase` and returns the phase that follows it.
    fn advance(&mut self, phase: Phase) -> Result<Phase, BlackjackGameError> {
        let next = match phase {
            Phase::ShoeCheck => {
                self.check_shoe()?;
                Phase::AgentArrival
            }
            Phase::AgentArrival => {
                self.agent_arrival();
                Phase::BetCollection
            }
            Phase::BetCollection => {
                self.collect_bets();
                Phase::Deal
            }
            Phase::Deal => {
                self.deal();
                Phase::NaturalCheck
            }
            Phase::NaturalCheck => self.natural_check(),
            Phase::PlayerActions => {
                self.player_actions();
                Phase::AgentActions
            }
            Phase::AgentActions => self.agent_actions(),
            Phase::DealerDraw => {
                self.dealer_draw();
                Phase::Showdown
            }
            Phase::Showdown => {
                self.showdown();
                Phase::Cleanup
            }
            Phase::Cleanup => Phase::Cleanup,
        };
        Ok(next)
    }

    fn low_water_mark(&self) -> usize {
        (self.players.len() + self.agents.len()) * CARDS_PER_SEAT + SHOE_MARGIN
    }

    /// Rebuilds the shoe once too few cards remain to finish a round, which resets every count.
    fn check_shoe(&mut self) -> Result<(), BlackjackGameError> {
        if self.shoe.live_len() >= self.low_water_mark() {
            return Ok(());
        }
        self.console
            .narrate("The card-shoe is becoming too low to continue playing with.");
        self.console
            .narrate("We will therefore replace it, this will reset the card count.");
        self.console.show(&GameEvent::Divider);
        if !self.console.ask_yes_no(Question::KeepDeckCount) {
            let requested = self.console.ask_deck_count();
            if (1..=MAX_DECKS).contains(&requested) {
                self.deck_count = requested;
            } else {
                warn!("ignoring deck count {}, keeping {}", requested, self.deck_count);
                self.console.narrate(&format!(
                    "A shoe needs between 1 and {} decks, keeping {}.",
                    MAX_DECKS, self.deck_count
                ));
            }
        }
        self.shoe.build(self.deck_count, &mut self.rng)?;
        info!("rebuilt shoe with {} decks", self.deck_count);
        self.console.narrate("Card-shoe changed");
        Ok(())
    }

    fn agent_arrival(&mut self) {
        let arrives = self.rng.gen_bool(self.config.agent_arrival_chance);
        if !arrives || self.agents.len() >= self.config.max_agents || self.agent_pool.is_empty() {
            self.console.narrate("No one new joins the table.");
            return;
        }
        let idx = self.rng.gen_range(0..self.agent_pool.len());
        let agent = self.agent_pool.remove(idx);
        if let Some(line) = ARRIVAL_LINES.choose(&mut self.rng) {
            self.console.narrate(line);
        }
        info!("{} joined the table", agent.seat());
        self.console
            .narrate(&format!("{} has joined the table.", agent.seat()));
        self.agents.push(agent);
        self.summary.agent_arrivals += 1;
    }

    /// Shows the optional count and deck readouts, then takes a bet from every human and
    /// announces what each agent wagers.
    fn collect_bets(&mut self) {
        if self.config.show_count {
            let event = count_event(&self.shoe, self.config.counting_scheme);
            self.console.show(&event);
        }
        if self.config.show_decks {
            let decks = (self.shoe.decks_remaining() * 10.0).round() / 10.0;
            self.console.show(&GameEvent::DecksRemaining(decks));
        }
        self.console.narrate("Starting round:");

        for player in self.players.iter_mut() {
            self.console.show(&GameEvent::Divider);
            let number = seat_number(player);
            match self.console.ask_bet(number, player.money()) {
                Some(bet) => {
                    if let Err(e) = player.place_bet(bet) {
                        warn!("player {}: {}", number, e);
                        self.console
                            .narrate("You do not have enough money to bet that much.");
                        self.console.narrate(&format!(
                            "Your current balance is: {}. You play this round without a bet.",
                            player.money()
                        ));
                    }
                }
                None => {
                    warn!("player {}: unreadable bet, playing for nothing", number);
                    self.console
                        .narrate("Invalid input, you play this round without a bet.");
                }
            }
        }

        for agent in self.agents.iter() {
            if let Some(policy) = agent.policy() {
                self.console.show(&GameEvent::AgentBet {
                    name: policy.name().to_string(),
                    amount: policy.decide_bet_size(&self.shoe),
                });
            }
        }
    }

    /// Clears every hand and deals two cards each: dealer first, then humans, then agents.
    fn deal(&mut self) {
        self.dealer.clear_hand();
        self.dealer.hide_hole_card();
        self.dealer.deal_initial(&mut self.shoe);
        self.console.show(&GameEvent::Hand(self.dealer.snapshot()));

        for player in self.players.iter_mut() {
            player.clear_hand();
            player.deal_initial(&mut self.shoe);
            self.console.show(&GameEvent::Hand(player.snapshot()));
        }

        for agent in self.agents.iter_mut() {
            agent.clear_hand();
            agent.deal_initial(&mut self.shoe);
            self.console.show(&GameEvent::Hand(agent.snapshot()));
        }
        self.console.show(&GameEvent::Divider);
        self.in_play = (0..self.players.len()).collect();
    }

    /// A dealer natural settles every hand on the spot. Otherwise naturals are paid out and
    /// leave the round, which ends early when nobody is left.
    fn natural_check(&mut self) -> Phase {
        if self.dealer.best_count() == BLACKJACK {
            self.dealer.reveal_hole_card();
            self.console.narrate("The dealer has blackjack.");
            self.console.show(&GameEvent::Hand(self.dealer.snapshot()));

            for player in self.players.iter_mut() {
                self.console.show(&GameEvent::Hand(player.snapshot()));
                if player.best_count() == BLACKJACK {
                    player.settle_push();
                    self.summary.pushes += 1;
                    self.console.narrate(&format!(
                        "Both {} and the dealer have blackjack, the bet is returned. Balance: {}",
                        player.seat(),
                        player.money()
                    ));
                } else {
                    player.forfeit();
                    self.summary.losses += 1;
                    self.console.narrate(&format!(
                        "Dealer takes the bet, current balance {}: {}",
                        player.seat(),
                        player.money()
                    ));
                }
            }

            for agent in self.agents.iter_mut() {
                self.console.show(&GameEvent::Hand(agent.snapshot()));
                if agent.best_count() == BLACKJACK {
                    self.console.narrate(&format!(
                        "{} and the dealer have blackjack, their bet is returned.",
                        agent.seat()
                    ));
                } else {
                    if let Some(policy) = agent.policy_mut() {
                        policy.record_loss();
                    }
                    self.console.narrate(&format!(
                        "The dealer has blackjack, {} does not. Their bet is taken.",
                        agent.seat()
                    ));
                }
            }
            self.console.show(&GameEvent::Divider);
            return Phase::Cleanup;
        }

        let mut paid = Vec::new();
        for &i in self.in_play.iter() {
            let player = &mut self.players[i];
            if player.best_count() == BLACKJACK {
                player.payout(true);
                self.summary.player_blackjacks += 1;
                self.console.narrate(&format!(
                    "{} got Blackjack! New balance: {}",
                    player.seat(),
                    player.money()
                ));
                paid.push(i);
            }
        }
        self.in_play.retain(|i| !paid.contains(i));

        let naturals: Vec<usize> = self
            .agents
            .iter()
            .enumerate()
            .filter(|(_, agent)| agent.hand().best_count() == BLACKJACK)
            .map(|(i, _)| i)
            .collect();
        for mut agent in split_off_marked(&mut self.agents, &naturals) {
            if let Some(policy) = agent.policy_mut() {
                policy.record_win();
            }
            self.console
                .narrate(&format!("{} has Blackjack.", agent.seat()));
            self.sat_out.push(agent);
        }

        if self.in_play.is_empty() && self.agents.is_empty() {
            Phase::Cleanup
        } else {
            Phase::PlayerActions
        }
    }

    /// Each human still in the round hits, stands or asks for the count until they stand or bust.
    fn player_actions(&mut self) {
        let mut busted = Vec::new();
        for &i in self.in_play.iter() {
            let player = &mut self.players[i];
            let number = seat_number(player);
            loop {
                self.console.show(&GameEvent::Divider);
                self.console
                    .narrate(&format!("{} is playing", player.seat()));
                self.console.show(&GameEvent::Hand(player.snapshot()));
                match self.console.ask_move(number) {
                    PlayerCommand::ShowCount => {
                        let event = count_event(&self.shoe, self.config.counting_scheme);
                        self.console.show(&event);
                    }
                    PlayerCommand::Stand => {
                        let total = player.best_count();
                        self.console.narrate(&format!(
                            "This is {}'s final hand, worth {}.",
                            player.seat(),
                            total
                        ));
                        break;
                    }
                    PlayerCommand::Hit => {
                        player.hit(&mut self.shoe);
                        self.console.show(&GameEvent::Hand(player.snapshot()));
                        if player.best_count() > BLACKJACK {
                            player.forfeit();
                            player.clear_hand();
                            self.summary.losses += 1;
                            self.console.narrate(&format!(
                                "{} went bust and has {} left.",
                                player.seat(),
                                player.money()
                            ));
                            busted.push(i);
                            break;
                        }
                    }
                }
            }
        }
        self.in_play.retain(|i| !busted.contains(i));
    }

    /// Each seated agent plays its threshold until it stands or busts. Busted agents sit out
    /// the rest of the round. Returns `Cleanup` when nobody is left for the dealer to play.
    fn agent_actions(&mut self) -> Phase {
        let mut busted = Vec::new();
        for (i, agent) in self.agents.iter_mut().enumerate() {
            self.console
                .narrate(&format!("{} is playing:", agent.seat()));
            self.console.show(&GameEvent::Hand(agent.snapshot()));
            loop {
                let next = agent
                    .policy()
                    .map(|policy| policy.decide_next_action(agent.hand()))
                    .unwrap_or(AgentMove::Stand);
                match next {
                    AgentMove::Stand => {
                        self.console.narrate(&format!("{} stood.", agent.seat()));
                        break;
                    }
                    AgentMove::Hit => {
                        agent.hit(&mut self.shoe);
                        self.console.narrate(&format!("{} hit.", agent.seat()));
                        self.console.show(&GameEvent::Hand(agent.snapshot()));
                        if agent.best_count() > BLACKJACK {
                            if let Some(policy) = agent.policy_mut() {
                                policy.record_loss();
                            }
                            self.console
                                .narrate(&format!("{} went bust.", agent.seat()));
                            busted.push(i);
                            break;
                        }
                    }
                }
            }
        }
        let mut out = split_off_marked(&mut self.agents, &busted);
        self.sat_out.append(&mut out);

        if self.in_play.is_empty() && self.agents.is_empty() {
            self.console.narrate("No one is left for the dealer to play against.");
            Phase::Cleanup
        } else {
            Phase::DealerDraw
        }
    }

    /// Reveals the hole card and draws until the dealer reaches 17.
    fn dealer_draw(&mut self) {
        self.console.narrate("The dealer will now draw cards:");
        self.dealer.reveal_hole_card();
        self.console.show(&GameEvent::Hand(self.dealer.snapshot()));
        while self.dealer.best_count() < DEALER_STANDS_ON {
            self.console.narrate("Dealer pulls a card:");
            self.dealer.hit(&mut self.shoe);
            self.console.show(&GameEvent::Hand(self.dealer.snapshot()));
        }
        self.console.narrate("Dealer has enough cards.");
        self.console.show(&GameEvent::Divider);
    }

    fn showdown(&mut self) {
        let dealer_count = self.dealer.best_count();
        self.console.narrate("Dealer and players compare hands.");

        if dealer_count > BLACKJACK {
            self.console.narrate("The dealer went bust.");
            for &i in self.in_play.iter() {
                let player = &mut self.players[i];
                let pot = player.pot();
                player.payout(false);
                self.summary.wins += 1;
                self.console.narrate(&format!(
                    "{} is paid {}, current balance: {}",
                    player.seat(),
                    pot * 2,
                    player.money()
                ));
            }
            for agent in self.agents.iter_mut() {
                if let Some(policy) = agent.policy_mut() {
                    policy.record_win();
                }
                self.console.narrate(&format!("{} is paid.", agent.seat()));
            }
            return;
        }

        for &i in self.in_play.iter() {
            let player = &mut self.players[i];
            let count = player.best_count();
            self.console.show(&GameEvent::Hand(player.snapshot()));
            match count.cmp(&dealer_count) {
                Ordering::Greater => {
                    player.payout(false);
                    self.summary.wins += 1;
                    self.console.narrate(&format!(
                        "{} wins by {}. Current balance: {}",
                        player.seat(),
                        count - dealer_count,
                        player.money()
                    ));
                }
                Ordering::Equal => {
                    player.settle_push();
                    self.summary.pushes += 1;
                    self.console.narrate(&format!(
                        "{} ties the dealer, the bet is returned. Current balance: {}",
                        player.seat(),
                        player.money()
                    ));
                }
                Ordering::Less => {
                    player.forfeit();
                    self.summary.losses += 1;
                    self.console.narrate(&format!(
                        "{} loses by {}. Current balance: {}",
                        player.seat(),
                        dealer_count - count,
                        player.money()
                    ));
                }
            }
        }

        for agent in self.agents.iter_mut() {
            let count = agent.best_count();
            self.console.show(&GameEvent::Hand(agent.snapshot()));
            let won = count > dealer_count;
            if let Some(policy) = agent.policy_mut() {
                if won {
                    policy.record_win();
                } else {
                    policy.record_loss();
                }
            }
            let message = match count.cmp(&dealer_count) {
                Ordering::Greater => format!("{} wins by {}.", agent.seat(), count - dealer_count),
                Ordering::Equal => format!("{} loses by tie.", agent.seat()),
                Ordering::Less => format!("{} loses by {}.", agent.seat(), dealer_count - count),
            };
            self.console.narrate(&message);
        }
    }

    /// Clears the table, sends tilted agents back to the floor, lets humans leave and decides
    /// whether another round is played.
    fn cleanup(&mut self) {
        self.dealer.clear_hand();
        self.agents.append(&mut self.sat_out);
        for participant in self.players.iter_mut().chain(self.agents.iter_mut()) {
            participant.clear_hand();
        }
        self.in_play.clear();

        let tilted: Vec<usize> = self
            .agents
            .iter()
            .enumerate()
            .filter(|(_, agent)| agent.policy().map_or(false, AgentPolicy::should_leave))
            .map(|(i, _)| i)
            .collect();
        for mut agent in split_off_marked(&mut self.agents, &tilted) {
            info!("{} left the table", agent.seat());
            self.console.narrate(&format!(
                "Tilted out of their mind, {} leaves.",
                agent.seat()
            ));
            if let Some(policy) = agent.policy_mut() {
                policy.reset_streak();
            }
            self.agent_pool.push(agent);
            self.summary.agent_departures += 1;
        }

        self.console.show(&GameEvent::Divider);
        let balances = self.balances();
        self.console.show(&GameEvent::Balances(balances));

        if !self.game_over {
            self.ask_players_to_leave();
        }
        if !self.game_over && self.console.ask_yes_no(Question::EndGame) {
            self.game_over = true;
        }
        self.remove_broke_players();
    }

    fn ask_players_to_leave(&mut self) {
        let mut leaving = Vec::new();
        if self.console.ask_yes_no(Question::AnyoneLeaving) {
            for (i, player) in self.players.iter().enumerate() {
                if self
                    .console
                    .ask_yes_no(Question::PlayerLeaving(seat_number(player)))
                {
                    leaving.push(i);
                }
            }
        }
        for player in split_off_marked(&mut self.players, &leaving) {
            info!("{} left with {}", player.seat(), player.money());
            self.summary.final_balances.push(Balance {
                player: seat_number(&player),
                money: player.money(),
            });
        }
        if self.players.is_empty() {
            self.game_over = true;
        }
    }

    fn remove_broke_players(&mut self) {
        let broke: Vec<usize> = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, player)| player.money() == 0)
            .map(|(i, _)| i)
            .collect();
        for player in split_off_marked(&mut self.players, &broke) {
            info!("{} is out of money", player.seat());
            self.console.narrate(&format!(
                "{} has no funds and will therefore be ejected from the Casino.",
                player.seat()
            ));
            self.summary.final_balances.push(Balance {
                player: seat_number(&player),
                money: 0,
            });
        }
        if self.players.is_empty() {
            self.console.narrate("There is no one left.");
            self.console.narrate("The casino now closes.");
            self.game_over = true;
        }
    }

    fn balances(&self) -> Vec<Balance> {
        self.players
            .iter()
            .map(|p| Balance {
                player: seat_number(p),
                money: p.money(),
            })
            .collect()
    }
}

fn seat_number(participant: &Participant) -> u32 {
    match participant.seat() {
        Seat::Player(n) => *n,
        _ => 0,
    }
}

fn count_event(shoe: &Shoe, scheme: CountingScheme) -> GameEvent {
    GameEvent::CardCount {
        scheme,
        value: shoe.count_since(scheme),
    }
}

/// Removes the entries at `marked` from `list` once the scan that chose them is over,
/// returning them in their original order.
fn split_off_marked(list: &mut Vec<Participant>, marked: &[usize]) -> Vec<Participant> {
    if marked.is_empty() {
        return Vec::new();
    }
    let (out, keep): (Vec<_>, Vec<_>) = list
        .drain(..)
        .enumerate()
        .partition(|(i, _)| marked.contains(i));
    *list = keep.into_iter().map(|(_, p)| p).collect();
    out.into_iter().map(|(_, p)| p).collect()
}

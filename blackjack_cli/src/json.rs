//! Event stream as JSON lines, with prompts still answered by the wrapped console.

use blackjack_lib::prelude::*;
use log::error;

#[derive(Debug)]
pub struct JsonEvents<C: Console> {
    inner: C,
}

impl<C: Console> JsonEvents<C> {
    pub fn new(inner: C) -> Self {
        JsonEvents { inner }
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

/// One event as a single line of JSON.
pub fn line(event: &GameEvent) -> serde_json::Result<String> {
    serde_json::to_string(event)
}

impl<C: Console> Console for JsonEvents<C> {
    fn show(&mut self, event: &GameEvent) {
        match line(event) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("could not encode {:?}: {}", event, e),
        }
    }

    fn ask_yes_no(&mut self, question: Question) -> bool {
        self.inner.ask_yes_no(question)
    }

    fn ask_player_count(&mut self) -> u32 {
        self.inner.ask_player_count()
    }

    fn ask_starting_money(&mut self) -> u32 {
        self.inner.ask_starting_money()
    }

    fn ask_deck_count(&mut self) -> u32 {
        self.inner.ask_deck_count()
    }

    fn ask_counting_scheme(&mut self) -> CountingScheme {
        self.inner.ask_counting_scheme()
    }

    fn ask_move(&mut self, player: u32) -> PlayerCommand {
        self.inner.ask_move(player)
    }

    fn ask_bet(&mut self, player: u32, balance: u32) -> Option<u32> {
        self.inner.ask_bet(player, balance)
    }
}

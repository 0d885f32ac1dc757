//! Interactive console reading answers from the terminal.

use crate::render;
use blackjack_lib::config::{MAX_PLAYERS, MAX_STARTING_MONEY};
use blackjack_lib::prelude::*;
use blackjack_lib::shoe::MAX_DECKS;
use dialoguer::{Confirm, Input, Select};
use log::warn;

const SCHEME_PROMPT: &str = "Which card counting system would you like to use? \
    (HI for Hi-Lo, HALF for Halves, ZEN for Zen Count)";

/// Prints every event to stdout and prompts through `dialoguer`, which re-asks until an answer
/// validates. Prompt text goes to stderr, so stdout carries events only.
#[derive(Debug, Default)]
pub struct TerminalConsole;

impl TerminalConsole {
    pub fn new() -> Self {
        TerminalConsole
    }

    fn number_in(prompt: &str, min: u32, max: u32, fallback: u32) -> u32 {
        Input::<u32>::new()
            .with_prompt(prompt)
            .validate_with(|n: &u32| -> Result<(), String> {
                if (min..=max).contains(n) {
                    Ok(())
                } else {
                    Err(format!("Enter a number between {} and {}", min, max))
                }
            })
            .interact_text()
            .unwrap_or_else(|e| {
                warn!("could not read {:?}: {}, using {}", prompt, e, fallback);
                fallback
            })
    }
}

impl Console for TerminalConsole {
    fn show(&mut self, event: &GameEvent) {
        println!("{}", render::event(event));
    }

    fn ask_yes_no(&mut self, question: Question) -> bool {
        Confirm::new()
            .with_prompt(question.prompt())
            .interact()
            .unwrap_or_else(|e| {
                // with no terminal left, only agree to stop the game
                warn!("could not read an answer: {}", e);
                matches!(question, Question::EndGame)
            })
    }

    fn ask_player_count(&mut self) -> u32 {
        let prompt = format!("How many players would like to play? (max {})", MAX_PLAYERS);
        Self::number_in(&prompt, 0, MAX_PLAYERS, 1)
    }

    fn ask_starting_money(&mut self) -> u32 {
        Self::number_in(
            "How much money would each player like to start with?",
            0,
            MAX_STARTING_MONEY,
            100,
        )
    }

    fn ask_deck_count(&mut self) -> u32 {
        let prompt = format!("How many decks would you like in the card-shoe? (max {})", MAX_DECKS);
        Self::number_in(&prompt, 1, MAX_DECKS, 6)
    }

    fn ask_counting_scheme(&mut self) -> CountingScheme {
        Input::<String>::new()
            .with_prompt(SCHEME_PROMPT)
            .validate_with(|answer: &String| -> Result<(), String> {
                answer
                    .parse::<CountingScheme>()
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            })
            .interact_text()
            .ok()
            .and_then(|answer| answer.parse().ok())
            .unwrap_or_else(|| {
                warn!("could not read a counting system, using Hi-Lo");
                CountingScheme::HiLo
            })
    }

    fn ask_move(&mut self, player: u32) -> PlayerCommand {
        let commands = [
            PlayerCommand::Hit,
            PlayerCommand::Stand,
            PlayerCommand::ShowCount,
        ];
        let choice = Select::new()
            .with_prompt(format!("Player {}, what would you like to do?", player))
            .items(&["Hit", "Stand", "Show card count"])
            .default(1)
            .interact()
            .unwrap_or_else(|e| {
                warn!("could not read a move: {}", e);
                1
            });
        commands[choice]
    }

    fn ask_bet(&mut self, player: u32, balance: u32) -> Option<u32> {
        let prompt = format!(
            "Player {}, you have {}. How much would you like to bet?",
            player, balance
        );
        let answer: String = match Input::new().with_prompt(prompt).interact_text() {
            Ok(answer) => answer,
            Err(e) => {
                warn!("could not read a bet: {}", e);
                return None;
            }
        };
        answer.trim().parse().ok()
    }
}

//! Plain text rendering of engine events: ASCII card boxes for hands, one line for the rest.

use blackjack_lib::prelude::*;

/// Width of the divider printed between sections of a round.
pub const DIVIDER_WIDTH: usize = 45;

const CARD_HEIGHT: usize = 9;

/// The nine rows of a single card box.
pub fn card_lines(face: &CardFace) -> [String; CARD_HEIGHT] {
    match face {
        CardFace::Down => {
            let back = format!("│{}│", "░".repeat(9));
            [
                "┌─────────┐".to_string(),
                back.clone(),
                back.clone(),
                back.clone(),
                back.clone(),
                back.clone(),
                back.clone(),
                back,
                "└─────────┘".to_string(),
            ]
        }
        CardFace::Up(card) => {
            let label = card.label();
            let blank = "│         │".to_string();
            [
                "┌─────────┐".to_string(),
                format!("│{:<2}       │", label),
                blank.clone(),
                blank.clone(),
                format!("│    {}    │", card.suit()),
                blank.clone(),
                blank,
                format!("│       {:>2}│", label),
                "└─────────┘".to_string(),
            ]
        }
    }
}

/// The cards of a hand side by side, under a heading naming the owner.
pub fn hand(snapshot: &HandSnapshot) -> String {
    let faces = snapshot.faces();
    let mut rows = vec![String::new(); CARD_HEIGHT];
    for face in faces.iter() {
        for (row, line) in rows.iter_mut().zip(card_lines(face)) {
            row.push_str(&line);
        }
    }
    format!("{}'s hand:\n{}", snapshot.owner(), rows.join("\n"))
}

pub fn event(event: &GameEvent) -> String {
    match event {
        GameEvent::Hand(snapshot) => hand(snapshot),
        GameEvent::Narrative(message) => message.clone(),
        GameEvent::Balances(balances) => balances
            .iter()
            .map(|b| format!("Player {} has a balance of: {}", b.player, b.money))
            .collect::<Vec<_>>()
            .join("\n"),
        GameEvent::CardCount { scheme, value } => {
            format!("The current card count using the {} is: {}", scheme, value)
        }
        GameEvent::DecksRemaining(decks) => {
            format!("There are {} decks left in the card-shoe.", decks)
        }
        GameEvent::AgentBet { name, amount } => format!("{} bets {}.", name, amount),
        GameEvent::Divider => "-".repeat(DIVIDER_WIDTH),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(rank: u8, suit: Suit) -> Card {
        Card::new(rank, suit).unwrap()
    }

    #[test]
    fn test_card_box_is_eleven_wide() {
        for face in [
            CardFace::Down,
            CardFace::Up(card(10, Suit::Hearts)),
            CardFace::Up(card(14, Suit::Clubs)),
        ] {
            for line in card_lines(&face) {
                assert_eq!(line.chars().count(), 11, "{}", line);
            }
        }
    }

    #[test]
    fn test_face_up_labels() {
        let lines = card_lines(&CardFace::Up(card(12, Suit::Spades)));
        assert_eq!(lines[1], "│Q        │");
        assert_eq!(lines[4], "│    ♠    │");
        assert_eq!(lines[7], "│        Q│");
        let lines = card_lines(&CardFace::Up(card(10, Suit::Diamonds)));
        assert_eq!(lines[1], "│10       │");
        assert_eq!(lines[7], "│       10│");
    }

    #[test]
    fn test_hidden_hole_card_shows_back() {
        let snapshot = HandSnapshot::new(
            "Dealer".to_string(),
            vec![card(14, Suit::Spades), card(7, Suit::Hearts)],
            true,
        );
        let text = hand(&snapshot);
        assert!(text.starts_with("Dealer's hand:"));
        assert!(text.contains("░"));
        assert!(!text.contains("♠"));
        assert!(text.contains("♥"));
        assert_eq!(text.lines().count(), 1 + CARD_HEIGHT);
    }

    #[test]
    fn test_event_lines() {
        assert_eq!(event(&GameEvent::Divider).len(), DIVIDER_WIDTH);
        assert_eq!(
            event(&GameEvent::CardCount {
                scheme: CountingScheme::Halves,
                value: 1.5
            }),
            "The current card count using the Halves system is: 1.5"
        );
        assert_eq!(
            event(&GameEvent::Balances(vec![
                Balance { player: 1, money: 90 },
                Balance { player: 2, money: 115 },
            ])),
            "Player 1 has a balance of: 90\nPlayer 2 has a balance of: 115"
        );
    }
}

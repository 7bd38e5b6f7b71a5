use flashdeck_lib::flashcards::{Deck, Progress, StudySession};

/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const GREEN: &str = "\x1b[32m";
    pub const CYAN: &str = "\x1b[36m";
}

/// Deck title with its card count
pub fn render_title(deck: &Deck, use_color: bool) -> String {
    let header = format!("{} ({} cards)", deck.title, deck.card_count());
    if use_color {
        format!("{}{}{}", Color::BOLD, header, Color::RESET)
    } else {
        header
    }
}

pub fn render_progress(progress: &Progress, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", Color::DIM, progress, Color::RESET)
    } else {
        progress.to_string()
    }
}

/// The side of the current card facing the user
pub fn render_face(session: &StudySession, use_color: bool) -> String {
    match session.face() {
        None => "All done! [r] restart  [q] quit".to_string(),
        Some(text) if session.is_showing_answer() => {
            if use_color {
                format!("  A: {}{}{}", Color::GREEN, text, Color::RESET)
            } else {
                format!("  A: {}", text)
            }
        }
        Some(text) => {
            if use_color {
                format!("  Q: {}{}{}", Color::CYAN, text, Color::RESET)
            } else {
                format!("  Q: {}", text)
            }
        }
    }
}

/// Render a deck as a numbered list of question/answer pairs
pub fn render_deck(deck: &Deck, use_color: bool) -> String {
    let mut lines = Vec::with_capacity(deck.cards.len() * 2 + 1);

    lines.push(render_title(deck, use_color));

    for (i, card) in deck.cards.iter().enumerate() {
        lines.push(format!("  {}. {}", i + 1, card.question));
        if use_color {
            lines.push(format!("     {}{}{}", Color::GREEN, card.answer, Color::RESET));
        } else {
            lines.push(format!("     {}", card.answer));
        }
    }

    if use_color {
        lines.push(format!("  {}id {}{}", Color::DIM, deck.id, Color::RESET));
    } else {
        lines.push(format!("  id {}", deck.id));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use flashdeck_lib::flashcards::Card;

    #[test]
    fn test_render_deck_plain() {
        let deck = Deck::new(
            "Capitals".to_string(),
            vec![Card::new("France?", "Paris"), Card::new("Peru?", "Lima")],
        );
        let rendered = render_deck(&deck, false);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "Capitals (2 cards)");
        assert_eq!(lines[1], "  1. France?");
        assert_eq!(lines[2], "     Paris");
        assert_eq!(lines[3], "  2. Peru?");
        assert_eq!(lines[5], format!("  id {}", deck.id));
        assert!(!rendered.contains('\x1b'));
    }

    #[test]
    fn test_render_deck_color() {
        let deck = Deck::new("T".to_string(), vec![Card::new("Q", "A")]);
        let rendered = render_deck(&deck, true);
        assert!(rendered.starts_with(Color::BOLD));
        assert!(rendered.contains(&format!("{}A{}", Color::GREEN, Color::RESET)));
    }

    #[test]
    fn test_render_face() {
        let mut session = StudySession::new(vec![Card::new("Q", "A")], true);
        assert_eq!(render_face(&session, false), "  Q: Q");

        session.flip();
        assert_eq!(render_face(&session, false), "  A: A");

        session.grade(flashdeck_lib::flashcards::Grade::GotIt);
        assert!(render_face(&session, false).starts_with("All done!"));
        assert_eq!(
            render_progress(&session.progress(), false),
            "Session complete. 1 / 1 learned."
        );
    }
}

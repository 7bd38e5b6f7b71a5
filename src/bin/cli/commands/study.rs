use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};

use flashdeck_lib::flashcards::{import_yaml, Deck, Grade, StudySession};

use crate::render::terminal;

const HELP: &str = "[Enter] flip  [g] got it  [a] again  [r] restart  [q] quit";

pub fn run(file: &Path, deck_name: Option<&str>, keep_on_got_it: bool, use_color: bool) -> Result<()> {
    let bytes = std::fs::read(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let decks = import_yaml(&bytes)
        .with_context(|| format!("{} is not a valid deck file", file.display()))?;

    let deck = select_deck(decks, deck_name)?;
    println!("{}", terminal::render_title(&deck, use_color));
    println!("{}", HELP);

    let mut session = StudySession::new(deck.cards, !keep_on_got_it);
    let stdin = io::stdin();
    drive(&mut session, stdin.lock(), io::stdout().lock(), use_color)
        .context("Study session I/O failed")?;
    Ok(())
}

/// Pick a deck by title (case-insensitive, exact match first, then prefix), or the first deck
fn select_deck(mut decks: Vec<Deck>, name: Option<&str>) -> Result<Deck> {
    let Some(name) = name else {
        return decks.into_iter().next().context("File contains no decks");
    };
    let name_lower = name.to_lowercase();

    if let Some(pos) = decks.iter().position(|d| d.title.to_lowercase() == name_lower) {
        return Ok(decks.swap_remove(pos));
    }

    let mut matches: Vec<Deck> = decks
        .iter()
        .filter(|d| d.title.to_lowercase().starts_with(&name_lower))
        .cloned()
        .collect();

    match matches.len() {
        0 => bail!("No deck matching '{}'. Available decks:\n{}", name,
            decks.iter().map(|d| format!("  - {}", d.title)).collect::<Vec<_>>().join("\n")),
        1 => Ok(matches.remove(0)),
        _ => bail!("Ambiguous deck name '{}'. Matches:\n{}", name,
            matches.iter().map(|d| format!("  - {}", d.title)).collect::<Vec<_>>().join("\n")),
    }
}

/// Run the session loop, one command per input line, until quit or end of input
fn drive<R: BufRead, W: Write>(
    session: &mut StudySession,
    mut input: R,
    mut output: W,
    use_color: bool,
) -> io::Result<()> {
    loop {
        writeln!(output, "{}", terminal::render_progress(&session.progress(), use_color))?;
        writeln!(output, "{}", terminal::render_face(session, use_color))?;
        write!(output, "> ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(());
        }

        match line.trim().to_lowercase().as_str() {
            "" | "f" => session.flip(),
            "g" | "a" if !session.is_showing_answer() && !session.is_complete() => {
                writeln!(output, "Flip the card first.")?;
            }
            "g" => session.grade(Grade::GotIt),
            "a" => session.grade(Grade::Again),
            "r" => session.restart(),
            "q" => return Ok(()),
            other => writeln!(output, "Unknown command '{}'. {}", other, HELP)?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flashdeck_lib::flashcards::Card;

    fn deck(title: &str) -> Deck {
        Deck::new(title.to_string(), vec![Card::new("Q", "A")])
    }

    fn run_session(cards: Vec<Card>, remove_on_got_it: bool, input: &str) -> (StudySession, String) {
        let mut session = StudySession::new(cards, remove_on_got_it);
        let mut output = Vec::new();
        drive(&mut session, input.as_bytes(), &mut output, false).unwrap();
        (session, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_session_runs_to_completion() {
        let cards = vec![Card::new("Q1", "A1"), Card::new("Q2", "A2")];
        let (session, output) = run_session(cards, true, "\ng\n\na\n\ng\nq\n");

        assert!(session.is_complete());
        assert!(output.contains("Card 1 of 2, 2 remaining"));
        assert!(output.contains("A1"));
        assert!(output.contains("Session complete. 2 / 2 learned."));
    }

    #[test]
    fn test_grading_requires_flip() {
        let (session, output) = run_session(vec![Card::new("Q1", "A1")], true, "g\n");

        assert!(output.contains("Flip the card first."));
        assert!(!session.is_complete());
    }

    #[test]
    fn test_keep_mode_and_restart() {
        let cards = vec![Card::new("Q1", "A1"), Card::new("Q2", "A2")];
        let (session, _) = run_session(cards, false, "\ng\n\ng\nr\n");

        assert!(!session.is_complete());
        assert_eq!(session.progress().remaining, 2);
        assert_eq!(session.face(), Some("Q1"));
    }

    #[test]
    fn test_select_deck() {
        let decks = vec![deck("Capitals"), deck("Capital letters"), deck("Rivers")];

        assert_eq!(select_deck(decks.clone(), None).unwrap().title, "Capitals");
        assert_eq!(select_deck(decks.clone(), Some("capitals")).unwrap().title, "Capitals");
        assert_eq!(select_deck(decks.clone(), Some("riv")).unwrap().title, "Rivers");
        assert!(select_deck(decks.clone(), Some("cap")).is_err());
        assert!(select_deck(decks, Some("lakes")).is_err());
    }
}

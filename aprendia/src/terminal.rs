//! Plain-text rendering of a study session and parsing of the learner's typed commands.

use std::{fmt::Write, str::FromStr};

use aprendia_study::{CardFace, ReviewSignal, SessionView, UnavailableReason};
use thiserror::Error;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyCommand {
    RevealText,
    Flip,
    Review(ReviewSignal),
    ReplayAudio,
    Back,
    Help,
}


#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown command \"{}\", type \"h\" for help", .input)]
pub struct UnknownStudyCommand {
    pub input: String,
}

impl FromStr for StudyCommand {
    type Err = UnknownStudyCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();

        let command = match normalized.as_str() {
            "r" | "reveal" => StudyCommand::RevealText,
            "f" | "flip" => StudyCommand::Flip,
            "1" => StudyCommand::Review(ReviewSignal::Again),
            "2" => StudyCommand::Review(ReviewSignal::Hard),
            "3" => StudyCommand::Review(ReviewSignal::Good),
            "4" => StudyCommand::Review(ReviewSignal::Easy),
            "p" | "play" => StudyCommand::ReplayAudio,
            "b" | "back" | "q" | "quit" => StudyCommand::Back,
            "h" | "help" | "?" => StudyCommand::Help,
            other => other
                .parse::<ReviewSignal>()
                .map(StudyCommand::Review)
                .map_err(|_| UnknownStudyCommand {
                    input: s.trim().to_string(),
                })?,
        };

        Ok(command)
    }
}


pub const HELP_TEXT: &str = "\
Commands:
  r, reveal                   show the text on the front of the card
  f, flip                     turn the card over
  1-4, again/hard/good/easy   review the card (only on the back)
  p, play                     play the audio of the visible side again
  b, back                     leave the session
  h, help                     show this help";


/// Renders the current session state as a block of text for stdout.
pub fn render_view(view: &SessionView<'_>) -> String {
    let mut output = String::new();

    // Writing into a `String` can't fail, so the results below are ignored.
    match view {
        SessionView::Pending {
            studiable_id,
            attempts_made,
        } => {
            let _ = write!(
                output,
                "Studiable {} is still being generated (checked {} time{}). Type \"b\" to leave.",
                studiable_id,
                attempts_made,
                if *attempts_made == 1 { "" } else { "s" }
            );
        }
        SessionView::Studying {
            card,
            face,
            position,
            total,
        } => {
            let _ = writeln!(output, "[card {}/{}]", position, total);

            match face {
                CardFace::FrontHidden => {
                    let _ = write!(
                        output,
                        "Front: (text hidden)\n  r = reveal text, f = flip, p = play audio"
                    );
                }
                CardFace::FrontRevealed => {
                    let _ = write!(
                        output,
                        "Front: {}\n  f = flip, p = play audio",
                        card.target_text
                    );
                }
                CardFace::Back => {
                    let _ = write!(
                        output,
                        "Front: {}\nBack:  {}\n  1 = again, 2 = hard, 3 = good, 4 = easy, p = play audio",
                        card.target_text, card.source_text
                    );
                }
                CardFace::Applying(signal) => {
                    let _ = write!(output, "Applying review \"{}\"...", signal);
                }
            }
        }
        SessionView::Unavailable(UnavailableReason::EmptyDeck) => {
            output.push_str("No sentences available yet. Type \"b\" to go back.");
        }
        SessionView::Unavailable(UnavailableReason::GenerationTimedOut { attempts }) => {
            let _ = write!(
                output,
                "Generation did not finish after {} checks. Type \"b\" to go back and try again later.",
                attempts
            );
        }
        SessionView::Closed => {
            output.push_str("Session closed.");
        }
    }

    output
}

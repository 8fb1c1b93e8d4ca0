use std::{fmt::Display, str::FromStr};

use thiserror::Error;


/// The learner's self-assessment after seeing the back of a card.
///
/// The only scheduling policy currently in use treats all four the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewSignal {
    Again,
    Hard,
    Good,
    Easy,
}

impl ReviewSignal {
    pub const ALL: [ReviewSignal; 4] = [
        ReviewSignal::Again,
        ReviewSignal::Hard,
        ReviewSignal::Good,
        ReviewSignal::Easy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewSignal::Again => "again",
            ReviewSignal::Hard => "hard",
            ReviewSignal::Good => "good",
            ReviewSignal::Easy => "easy",
        }
    }
}

impl Display for ReviewSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}


#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unrecognized review signal: \"{}\"", .input)]
pub struct InvalidReviewSignal {
    pub input: String,
}

impl FromStr for ReviewSignal {
    type Err = InvalidReviewSignal;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();

        Self::ALL
            .into_iter()
            .find(|signal| signal.as_str() == normalized)
            .ok_or_else(|| InvalidReviewSignal {
                input: s.to_string(),
            })
    }
}



/// Which side of the card is shown, and whether a review is in the middle of being applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardFace {
    /// Target-language side, text hidden behind a "show text" affordance.
    FrontHidden,

    /// Target-language side with its text revealed.
    FrontRevealed,

    /// Source-language side.
    Back,

    /// A review was accepted and the deck is being rescheduled.
    /// Every input is rejected until this resolves.
    Applying(ReviewSignal),
}

impl CardFace {
    #[inline]
    pub fn is_front(&self) -> bool {
        matches!(self, CardFace::FrontHidden | CardFace::FrontRevealed)
    }

    /// The side of the card that has audio associated with entering this face, if any.
    pub fn audio_side(&self) -> Option<CardSide> {
        match self {
            CardFace::FrontHidden => Some(CardSide::Target),
            CardFace::Back => Some(CardSide::Source),
            CardFace::FrontRevealed | CardFace::Applying(_) => None,
        }
    }

    /// The side of the card currently on screen. `None` while a review is being applied.
    pub fn visible_side(&self) -> Option<CardSide> {
        match self {
            CardFace::FrontHidden | CardFace::FrontRevealed => Some(CardSide::Target),
            CardFace::Back => Some(CardSide::Source),
            CardFace::Applying(_) => None,
        }
    }
}


/// Which language of a sentence pair an audio cue belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardSide {
    Source,
    Target,
}



#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ReviewError {
    #[error("the card must be flipped before it can be reviewed")]
    NotFlipped,

    #[error("a review is still being applied")]
    Busy,

    #[error("no review is being applied")]
    NotApplying,
}


/// Result of feeding an input into the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The face changed; the new face is included.
    Entered(CardFace),

    /// The input was valid but had no effect (e.g. revealing already-revealed text).
    Unchanged,
}

impl Transition {
    #[inline]
    pub fn entered_face(&self) -> Option<CardFace> {
        match self {
            Transition::Entered(face) => Some(*face),
            Transition::Unchanged => None,
        }
    }
}



/// Front/back state of the card currently at the deck cursor.
///
/// ```text
///   FrontHidden --reveal_text--> FrontRevealed
///   FrontHidden | FrontRevealed --flip--> Back
///   Back --begin_review(signal)--> Applying(signal) --finish_review--> FrontHidden
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewStateMachine {
    face: CardFace,
}

impl ReviewStateMachine {
    pub fn new() -> Self {
        Self {
            face: CardFace::FrontHidden,
        }
    }

    #[inline]
    pub fn face(&self) -> CardFace {
        self.face
    }

    fn ensure_not_applying(&self) -> Result<(), ReviewError> {
        if matches!(self.face, CardFace::Applying(_)) {
            return Err(ReviewError::Busy);
        }

        Ok(())
    }

    fn enter(&mut self, face: CardFace) -> Transition {
        self.face = face;
        Transition::Entered(face)
    }

    pub fn reveal_text(&mut self) -> Result<Transition, ReviewError> {
        self.ensure_not_applying()?;

        match self.face {
            CardFace::FrontHidden => Ok(self.enter(CardFace::FrontRevealed)),
            _ => Ok(Transition::Unchanged),
        }
    }

    pub fn flip(&mut self) -> Result<Transition, ReviewError> {
        self.ensure_not_applying()?;

        match self.face {
            CardFace::FrontHidden | CardFace::FrontRevealed => Ok(self.enter(CardFace::Back)),
            _ => Ok(Transition::Unchanged),
        }
    }

    pub fn begin_review(&mut self, signal: ReviewSignal) -> Result<Transition, ReviewError> {
        self.ensure_not_applying()?;

        match self.face {
            CardFace::Back => Ok(self.enter(CardFace::Applying(signal))),
            _ => Err(ReviewError::NotFlipped),
        }
    }

    /// Completes a review started with [`Self::begin_review`];
    /// the next card is always shown front side first, text hidden.
    pub fn finish_review(&mut self) -> Result<Transition, ReviewError> {
        match self.face {
            CardFace::Applying(_) => Ok(self.enter(CardFace::FrontHidden)),
            _ => Err(ReviewError::NotApplying),
        }
    }
}

impl Default for ReviewStateMachine {
    fn default() -> Self {
        Self::new()
    }
}



#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn starts_on_hidden_front() {
        let machine = ReviewStateMachine::new();

        assert_eq!(machine.face(), CardFace::FrontHidden);
        assert_eq!(machine.face().audio_side(), Some(CardSide::Target));
    }

    #[test]
    fn visible_side_follows_face() {
        assert_eq!(CardFace::FrontHidden.visible_side(), Some(CardSide::Target));
        assert_eq!(CardFace::FrontRevealed.visible_side(), Some(CardSide::Target));
        assert_eq!(CardFace::Back.visible_side(), Some(CardSide::Source));
        assert_eq!(
            CardFace::Applying(ReviewSignal::Good).visible_side(),
            None
        );

        for face in [CardFace::FrontHidden, CardFace::Back] {
            assert_eq!(face.audio_side(), face.visible_side());
        }
    }

    #[test]
    fn reveal_only_changes_hidden_front() {
        let mut machine = ReviewStateMachine::new();

        assert_eq!(
            machine.reveal_text(),
            Ok(Transition::Entered(CardFace::FrontRevealed))
        );
        assert_eq!(machine.reveal_text(), Ok(Transition::Unchanged));
        assert_eq!(machine.face(), CardFace::FrontRevealed);

        machine.flip().unwrap();
        assert_eq!(machine.reveal_text(), Ok(Transition::Unchanged));
        assert_eq!(machine.face(), CardFace::Back);
    }

    #[test]
    fn flip_from_either_front_face() {
        let mut hidden = ReviewStateMachine::new();
        assert_eq!(hidden.flip(), Ok(Transition::Entered(CardFace::Back)));

        let mut revealed = ReviewStateMachine::new();
        revealed.reveal_text().unwrap();
        assert_eq!(revealed.flip(), Ok(Transition::Entered(CardFace::Back)));

        assert_eq!(revealed.flip(), Ok(Transition::Unchanged));
        assert_eq!(revealed.face().audio_side(), Some(CardSide::Source));
    }

    #[test]
    fn review_requires_back_face() {
        let mut machine = ReviewStateMachine::new();
        assert_eq!(
            machine.begin_review(ReviewSignal::Good),
            Err(ReviewError::NotFlipped)
        );

        machine.reveal_text().unwrap();
        assert_eq!(
            machine.begin_review(ReviewSignal::Good),
            Err(ReviewError::NotFlipped)
        );
        assert_eq!(machine.face(), CardFace::FrontRevealed);
    }

    #[test]
    fn applying_rejects_every_input_until_finished() {
        let mut machine = ReviewStateMachine::new();
        machine.flip().unwrap();

        assert_eq!(
            machine.begin_review(ReviewSignal::Hard),
            Ok(Transition::Entered(CardFace::Applying(ReviewSignal::Hard)))
        );

        assert_eq!(machine.reveal_text(), Err(ReviewError::Busy));
        assert_eq!(machine.flip(), Err(ReviewError::Busy));
        assert_eq!(
            machine.begin_review(ReviewSignal::Easy),
            Err(ReviewError::Busy)
        );
        assert_eq!(machine.face(), CardFace::Applying(ReviewSignal::Hard));

        assert_eq!(
            machine.finish_review(),
            Ok(Transition::Entered(CardFace::FrontHidden))
        );
        assert_eq!(machine.finish_review(), Err(ReviewError::NotApplying));
    }

    #[test]
    fn review_signals_parse_case_insensitively() {
        assert_eq!("again".parse::<ReviewSignal>(), Ok(ReviewSignal::Again));
        assert_eq!(" Hard ".parse::<ReviewSignal>(), Ok(ReviewSignal::Hard));
        assert_eq!("GOOD".parse::<ReviewSignal>(), Ok(ReviewSignal::Good));
        assert_eq!("easy".parse::<ReviewSignal>(), Ok(ReviewSignal::Easy));

        assert!("perfect".parse::<ReviewSignal>().is_err());
    }
}

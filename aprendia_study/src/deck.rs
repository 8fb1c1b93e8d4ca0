use aprendia_core::api_models::SentencePair;
use thiserror::Error;


#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("the deck has no sentences")]
pub struct EmptyDeckError;


/// The in-session, reorderable working set of sentence cards of one studiable.
///
/// Cards have no identity beyond their position; reordering only ever happens
/// in memory and is lost when the deck is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<SentencePair>,

    /// Always `< cards.len()` when the deck is non-empty, `0` otherwise.
    current_index: usize,
}

impl Deck {
    pub fn materialize(sentences: Vec<SentencePair>) -> Self {
        Self {
            cards: sentences,
            current_index: 0,
        }
    }

    pub fn current(&self) -> Result<&SentencePair, EmptyDeckError> {
        self.cards.get(self.current_index).ok_or(EmptyDeckError)
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[inline]
    pub fn cards(&self) -> &[SentencePair] {
        &self.cards
    }

    /// Moves the current card to the end of the deck and points the cursor back at the start.
    ///
    /// The relative order of every other card is preserved. On a single-card deck
    /// this changes nothing; on an empty deck it is a no-op.
    pub fn requeue_current(&mut self) {
        if self.current_index < self.cards.len() {
            let reviewed_card = self.cards.remove(self.current_index);
            self.cards.push(reviewed_card);
        }

        self.current_index = 0;
    }

    /// Pulls the cursor back to the first card if it no longer points inside the deck.
    pub fn clamp_cursor(&mut self) {
        if self.current_index >= self.cards.len() {
            self.current_index = 0;
        }
    }
}

use std::time::Duration;

use aprendia_core::{api_models::SentencePair, ids::StudiableId};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    audio::AudioOutput,
    deck::Deck,
    review::{CardFace, ReviewError, ReviewSignal, ReviewStateMachine, Transition},
    scheduling::{RequeueToTail, SchedulingPolicy},
    tracker::{GenerationTracker, PollStatus, StudiableSource},
};


/// Why a session ended up with nothing to study.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnavailableReason {
    /// The studiable was ready but had no sentences to build a deck from.
    EmptyDeck,

    /// Polling gave up before the studiable became ready.
    GenerationTimedOut { attempts: u32 },
}


#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("there is no card to study right now")]
    NotStudying,

    #[error(transparent)]
    Review(#[from] ReviewError),
}


/// What the learner should currently be looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionView<'s> {
    Pending {
        studiable_id: StudiableId,
        attempts_made: u32,
    },

    Studying {
        card: &'s SentencePair,
        face: CardFace,

        /// 1-based position of `card` in the deck.
        position: usize,

        total: usize,
    },

    Unavailable(UnavailableReason),

    Closed,
}


enum SessionPhase<S>
where
    S: StudiableSource,
{
    Pending(GenerationTracker<S>),

    Studying {
        deck: Deck,
        review: ReviewStateMachine,
    },

    Unavailable(UnavailableReason),

    Closed,
}

impl<S> SessionPhase<S>
where
    S: StudiableSource,
{
    fn from_sentences(studiable_id: StudiableId, sentences: Vec<SentencePair>) -> Self {
        let deck = Deck::materialize(sentences);

        if deck.is_empty() {
            warn!(
                studiable_id = %studiable_id,
                "Studiable has no sentences, nothing to study."
            );

            return Self::Unavailable(UnavailableReason::EmptyDeck);
        }

        info!(
            studiable_id = %studiable_id,
            cards = deck.len(),
            "Deck materialized, starting review."
        );

        Self::Studying {
            deck,
            review: ReviewStateMachine::new(),
        }
    }
}


/// Plays the audio cue for entering a new face on the card at the deck cursor.
fn play_entered_face(audio: &AudioOutput, deck: &Deck, transition: Transition) {
    let Some(face) = transition.entered_face() else {
        return;
    };

    if let Ok(card) = deck.current() {
        audio.play_face(card, face);
    }
}



/// One study session over one studiable: waits for it to be generated,
/// then drives the learner through its deck until they leave.
///
/// Nothing is persisted; leaving discards the deck and position.
pub struct StudySession<S>
where
    S: StudiableSource,
{
    studiable_id: StudiableId,

    phase: SessionPhase<S>,

    policy: Box<dyn SchedulingPolicy>,

    audio: AudioOutput,

    reviews_applied: u32,
}

impl<S> StudySession<S>
where
    S: StudiableSource,
{
    /// Starts a session on a studiable that may still be generating.
    /// The first readiness check is due immediately (see [`Self::next_poll_delay`]).
    pub fn new(tracker: GenerationTracker<S>, audio: AudioOutput) -> Self {
        Self {
            studiable_id: tracker.studiable_id(),
            phase: SessionPhase::Pending(tracker),
            policy: Box::new(RequeueToTail),
            audio,
            reviews_applied: 0,
        }
    }

    /// Starts a session on sentences that were already fetched.
    pub fn from_sentences(
        studiable_id: StudiableId,
        sentences: Vec<SentencePair>,
        audio: AudioOutput,
    ) -> Self {
        let session = Self {
            studiable_id,
            phase: SessionPhase::from_sentences(studiable_id, sentences),
            policy: Box::new(RequeueToTail),
            audio,
            reviews_applied: 0,
        };

        session.play_initial_face();
        session
    }

    pub fn with_policy<P>(mut self, policy: P) -> Self
    where
        P: SchedulingPolicy + 'static,
    {
        self.policy = Box::new(policy);
        self
    }

    #[inline]
    pub fn studiable_id(&self) -> StudiableId {
        self.studiable_id
    }

    #[inline]
    pub fn reviews_applied(&self) -> u32 {
        self.reviews_applied
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        matches!(self.phase, SessionPhase::Closed)
    }

    pub fn deck(&self) -> Option<&Deck> {
        match &self.phase {
            SessionPhase::Studying { deck, .. } => Some(deck),
            _ => None,
        }
    }

    pub fn view(&self) -> SessionView<'_> {
        match &self.phase {
            SessionPhase::Pending(tracker) => SessionView::Pending {
                studiable_id: tracker.studiable_id(),
                attempts_made: tracker.attempts_made(),
            },
            SessionPhase::Studying { deck, review } => match deck.current() {
                Ok(card) => SessionView::Studying {
                    card,
                    face: review.face(),
                    position: deck.current_index() + 1,
                    total: deck.len(),
                },
                Err(_) => SessionView::Unavailable(UnavailableReason::EmptyDeck),
            },
            SessionPhase::Unavailable(reason) => SessionView::Unavailable(*reason),
            SessionPhase::Closed => SessionView::Closed,
        }
    }

    /// `(position, total)` of the current card, with a 1-based position.
    pub fn progress(&self) -> Option<(usize, usize)> {
        match &self.phase {
            SessionPhase::Studying { deck, .. } if !deck.is_empty() => {
                Some((deck.current_index() + 1, deck.len()))
            }
            _ => None,
        }
    }

    /// How long until [`Self::on_poll_tick`] should be called next.
    /// `None` unless the session is waiting on generation.
    pub fn next_poll_delay(&self) -> Option<Duration> {
        match &self.phase {
            SessionPhase::Pending(tracker) => tracker.next_delay(),
            _ => None,
        }
    }

    fn play_initial_face(&self) {
        if let SessionPhase::Studying { deck, review } = &self.phase {
            play_entered_face(&self.audio, deck, Transition::Entered(review.face()));
        }
    }

    /// Checks once whether the studiable is ready. Does nothing unless the session is pending.
    pub async fn on_poll_tick(&mut self) {
        let SessionPhase::Pending(tracker) = &mut self.phase else {
            return;
        };

        let next_phase = match tracker.poll().await {
            PollStatus::Pending | PollStatus::Cancelled => return,
            PollStatus::Ready => {
                let sentences = tracker
                    .take_ready_studiable()
                    .map(|studiable| studiable.sentences)
                    .unwrap_or_default();

                SessionPhase::from_sentences(self.studiable_id, sentences)
            }
            PollStatus::Exhausted => SessionPhase::Unavailable(
                UnavailableReason::GenerationTimedOut {
                    attempts: tracker.attempts_made(),
                },
            ),
        };

        self.phase = next_phase;
        self.play_initial_face();
    }

    fn apply_review_input<F>(&mut self, input: F) -> Result<Transition, SessionError>
    where
        F: FnOnce(&mut ReviewStateMachine) -> Result<Transition, ReviewError>,
    {
        let SessionPhase::Studying { deck, review } = &mut self.phase else {
            return Err(SessionError::NotStudying);
        };

        let transition = input(review)?;
        play_entered_face(&self.audio, deck, transition);

        Ok(transition)
    }

    pub fn reveal_text(&mut self) -> Result<Transition, SessionError> {
        self.apply_review_input(ReviewStateMachine::reveal_text)
    }

    pub fn flip(&mut self) -> Result<Transition, SessionError> {
        self.apply_review_input(ReviewStateMachine::flip)
    }

    /// Applies a review decision: the deck is rescheduled and the next card is shown front side first.
    pub fn review(&mut self, signal: ReviewSignal) -> Result<Transition, SessionError> {
        let SessionPhase::Studying { deck, review } = &mut self.phase else {
            return Err(SessionError::NotStudying);
        };

        review.begin_review(signal)?;

        self.policy.schedule(deck, signal);
        deck.clamp_cursor();

        let transition = review.finish_review()?;
        self.reviews_applied += 1;

        debug!(
            signal = %signal,
            reviews_applied = self.reviews_applied,
            "Review applied."
        );

        play_entered_face(&self.audio, deck, transition);

        Ok(transition)
    }

    /// Plays the audio of the currently visible side again.
    /// Returns whether playback was attempted.
    pub fn replay_audio(&self) -> Result<bool, SessionError> {
        let SessionPhase::Studying { deck, review } = &self.phase else {
            return Err(SessionError::NotStudying);
        };

        let Some(side) = review.face().visible_side() else {
            return Err(ReviewError::Busy.into());
        };

        let card = deck.current().map_err(|_| SessionError::NotStudying)?;

        Ok(self.audio.play_side(card, side))
    }

    /// Tears the session down: polling stops and the deck is discarded.
    pub fn leave(&mut self) {
        if let SessionPhase::Pending(tracker) = &mut self.phase {
            tracker.cancel();
        }

        if !self.is_closed() {
            info!(
                studiable_id = %self.studiable_id,
                reviews_applied = self.reviews_applied,
                "Leaving study session."
            );
        }

        self.phase = SessionPhase::Closed;
    }
}



#[cfg(test)]
mod test {
    use std::rc::Rc;

    use super::*;
    use crate::{
        audio::test_util::{audio_base_url, RecordingPlayer},
        tracker::{test_util::*, PollingSchedule},
    };

    const STUDIABLE: StudiableId = StudiableId::new(3);

    struct Harness {
        source: Rc<ScriptedSource>,
        player: Rc<RecordingPlayer>,
        session: StudySession<Rc<ScriptedSource>>,
    }

    fn harness(source: ScriptedSource, schedule: PollingSchedule) -> Harness {
        let source = Rc::new(source);
        let player = Rc::new(RecordingPlayer::default());

        let tracker = GenerationTracker::new(source.clone(), STUDIABLE, schedule);
        let session = StudySession::new(
            tracker,
            AudioOutput::new(player.clone(), audio_base_url()),
        );

        Harness {
            source,
            player,
            session,
        }
    }

    fn ready_after_one_pending_poll(sentences: &[&str]) -> Harness {
        harness(
            ScriptedSource::new([
                Ok(studiable_with(STUDIABLE, &[])),
                Ok(studiable_with(STUDIABLE, sentences)),
            ]),
            test_schedule(None),
        )
    }

    fn deck_order(session: &StudySession<Rc<ScriptedSource>>) -> Vec<String> {
        session
            .deck()
            .unwrap()
            .cards()
            .iter()
            .map(|card| card.source_text.clone())
            .collect()
    }

    #[tokio::test]
    async fn pending_then_ready_materializes_deck() {
        let mut harness = ready_after_one_pending_poll(&["s1", "s2"]);

        assert_eq!(harness.session.next_poll_delay(), Some(Duration::ZERO));

        harness.session.on_poll_tick().await;
        assert_eq!(harness.session.view(), SessionView::Pending {
            studiable_id: STUDIABLE,
            attempts_made: 1
        });
        assert!(harness.player.played.borrow().is_empty());

        harness.session.on_poll_tick().await;

        let SessionView::Studying {
            card,
            face,
            position,
            total,
        } = harness.session.view()
        else {
            panic!("expected the session to be studying");
        };

        assert_eq!(card.source_text, "s1");
        assert_eq!(face, CardFace::FrontHidden);
        assert_eq!((position, total), (1, 2));
        assert_eq!(harness.session.deck().unwrap().current_index(), 0);
        assert_eq!(harness.session.next_poll_delay(), None);

        assert_eq!(harness.player.played_paths(), vec!["/audio/s1_target.mp3"]);
    }

    #[tokio::test]
    async fn every_face_transition_plays_exactly_the_expected_audio() {
        let mut harness = ready_after_one_pending_poll(&["s1", "s2"]);
        harness.session.on_poll_tick().await;
        harness.session.on_poll_tick().await;

        assert_eq!(
            harness.session.reveal_text(),
            Ok(Transition::Entered(CardFace::FrontRevealed))
        );
        assert_eq!(harness.session.reveal_text(), Ok(Transition::Unchanged));
        assert_eq!(harness.player.played.borrow().len(), 1);

        harness.session.flip().unwrap();
        assert_eq!(harness.session.flip(), Ok(Transition::Unchanged));

        harness.session.review(ReviewSignal::Good).unwrap();

        assert_eq!(harness.player.played_paths(), vec![
            "/audio/s1_target.mp3",
            "/audio/s1_source.mp3",
            "/audio/s2_target.mp3",
        ]);
    }

    #[test]
    fn cards_without_audio_play_nothing() {
        let player = Rc::new(RecordingPlayer::default());
        let mut session = StudySession::<ScriptedSource>::from_sentences(
            STUDIABLE,
            vec![
                SentencePair::new("Hello.", "Hola."),
                SentencePair::new("Bye.", "Adiós."),
            ],
            AudioOutput::new(player.clone(), audio_base_url()),
        );

        session.flip().unwrap();
        session.review(ReviewSignal::Again).unwrap();
        session.flip().unwrap();

        assert_eq!(session.replay_audio(), Ok(false));
        assert!(player.played.borrow().is_empty());
    }

    #[tokio::test]
    async fn four_mixed_reviews_restore_original_order() {
        let mut harness = ready_after_one_pending_poll(&["a", "b", "c", "d"]);
        harness.session.on_poll_tick().await;
        harness.session.on_poll_tick().await;

        let original_order = deck_order(&harness.session);

        for signal in [
            ReviewSignal::Easy,
            ReviewSignal::Again,
            ReviewSignal::Hard,
            ReviewSignal::Good,
        ] {
            harness.session.flip().unwrap();
            harness.session.review(signal).unwrap();

            assert_eq!(harness.session.progress(), Some((1, 4)));
        }

        assert_eq!(deck_order(&harness.session), original_order);
        assert_eq!(harness.session.reviews_applied(), 4);
    }

    #[tokio::test]
    async fn review_before_flip_is_rejected() {
        let mut harness = ready_after_one_pending_poll(&["a", "b"]);
        harness.session.on_poll_tick().await;
        harness.session.on_poll_tick().await;

        assert_eq!(
            harness.session.review(ReviewSignal::Good),
            Err(SessionError::Review(ReviewError::NotFlipped))
        );

        assert_eq!(deck_order(&harness.session), vec!["a", "b"]);
        assert_eq!(harness.session.reviews_applied(), 0);
    }

    #[tokio::test]
    async fn inputs_are_rejected_while_pending() {
        let mut harness = harness(ScriptedSource::always_pending(), test_schedule(None));

        assert_eq!(harness.session.flip(), Err(SessionError::NotStudying));
        assert_eq!(
            harness.session.review(ReviewSignal::Easy),
            Err(SessionError::NotStudying)
        );
        assert_eq!(harness.session.replay_audio(), Err(SessionError::NotStudying));
        assert_eq!(harness.session.progress(), None);
    }

    #[tokio::test]
    async fn leaving_a_pending_session_stops_polling() {
        let mut harness = harness(ScriptedSource::always_pending(), test_schedule(None));

        harness.session.on_poll_tick().await;
        assert_eq!(harness.source.fetches.get(), 1);

        harness.session.leave();

        assert_eq!(harness.session.next_poll_delay(), None);
        harness.session.on_poll_tick().await;
        harness.session.on_poll_tick().await;

        assert_eq!(harness.source.fetches.get(), 1);
        assert_eq!(harness.session.view(), SessionView::Closed);
    }

    #[tokio::test]
    async fn leaving_a_studying_session_discards_the_deck() {
        let mut harness = ready_after_one_pending_poll(&["a"]);
        harness.session.on_poll_tick().await;
        harness.session.on_poll_tick().await;

        harness.session.leave();

        assert!(harness.session.deck().is_none());
        assert!(harness.session.is_closed());
        assert_eq!(harness.session.flip(), Err(SessionError::NotStudying));
    }

    #[tokio::test]
    async fn exhausted_polling_becomes_timed_out_view() {
        let mut harness = harness(ScriptedSource::always_pending(), test_schedule(Some(2)));

        harness.session.on_poll_tick().await;
        harness.session.on_poll_tick().await;

        assert_eq!(
            harness.session.view(),
            SessionView::Unavailable(UnavailableReason::GenerationTimedOut { attempts: 2 })
        );
        assert_eq!(harness.session.next_poll_delay(), None);

        harness.session.on_poll_tick().await;
        assert_eq!(harness.source.fetches.get(), 2);
    }

    #[test]
    fn empty_sentences_become_empty_deck_view() {
        let player = Rc::new(RecordingPlayer::default());
        let session = StudySession::<ScriptedSource>::from_sentences(
            STUDIABLE,
            Vec::new(),
            AudioOutput::new(player.clone(), audio_base_url()),
        );

        assert_eq!(
            session.view(),
            SessionView::Unavailable(UnavailableReason::EmptyDeck)
        );
        assert!(player.played.borrow().is_empty());
    }

    #[tokio::test]
    async fn replay_follows_visible_side() {
        let mut harness = ready_after_one_pending_poll(&["a", "b"]);
        harness.session.on_poll_tick().await;
        harness.session.on_poll_tick().await;

        harness.session.reveal_text().unwrap();
        assert_eq!(harness.session.replay_audio(), Ok(true));

        harness.session.flip().unwrap();
        assert_eq!(harness.session.replay_audio(), Ok(true));

        assert_eq!(harness.player.played_paths(), vec![
            "/audio/a_target.mp3",
            "/audio/a_target.mp3",
            "/audio/a_source.mp3",
            "/audio/a_source.mp3",
        ]);
    }

    struct KeepInPlace;

    impl SchedulingPolicy for KeepInPlace {
        fn schedule(&self, _deck: &mut Deck, _signal: ReviewSignal) {}
    }

    #[test]
    fn scheduling_policy_is_swappable() {
        let mut session = StudySession::<ScriptedSource>::from_sentences(
            STUDIABLE,
            vec![SentencePair::new("a", "A"), SentencePair::new("b", "B")],
            AudioOutput::new(RecordingPlayer::default(), audio_base_url()),
        )
        .with_policy(KeepInPlace);

        session.flip().unwrap();
        session.review(ReviewSignal::Good).unwrap();

        let SessionView::Studying { card, face, .. } = session.view() else {
            panic!("expected the session to be studying");
        };

        assert_eq!(card.source_text, "a");
        assert_eq!(face, CardFace::FrontHidden);
    }
}

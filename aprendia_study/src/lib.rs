//! The studiable lifecycle and study-session engine.
//!
//! - [`tracker`] observes a studiable's generation from "requested" to "ready" by polling.
//! - [`deck`] holds the working set of sentence cards of one ready studiable.
//! - [`review`] is the per-card front/back state machine.
//! - [`scheduling`] decides where a reviewed card goes.
//! - [`audio`] turns card faces into playback attempts.
//! - [`session`] ties all of the above together for one study session.
//!
//! Everything here is single-threaded: state transitions run to completion
//! before the next input is looked at, and nothing is shared between sessions.

pub mod audio;
pub mod deck;
pub mod review;
pub mod scheduling;
pub mod session;
pub mod tracker;

pub use audio::{AudioOutput, AudioPlaybackError, AudioPlayer};
pub use deck::{Deck, EmptyDeckError};
pub use review::{
    CardFace,
    CardSide,
    InvalidReviewSignal,
    ReviewError,
    ReviewSignal,
    ReviewStateMachine,
    Transition,
};
pub use scheduling::{RequeueToTail, SchedulingPolicy};
pub use session::{SessionError, SessionView, StudySession, UnavailableReason};
pub use tracker::{GenerationTracker, PollStatus, PollingSchedule, StudiableSource};

use std::{future::Future, ops::Deref, rc::Rc, time::Duration};

use aprendia_api_client::{api::StudiableFetchingError, Client};
use aprendia_configuration::PollingConfiguration;
use aprendia_core::{api_models::Studiable, ids::StudiableId};
use tracing::{debug, info, warn};


/// Anything that can fetch the current state of a studiable.
#[allow(async_fn_in_trait)]
pub trait StudiableSource {
    type Error: std::error::Error;

    async fn fetch_studiable(&self, studiable_id: StudiableId) -> Result<Studiable, Self::Error>;
}

impl StudiableSource for Client {
    type Error = StudiableFetchingError;

    async fn fetch_studiable(&self, studiable_id: StudiableId) -> Result<Studiable, Self::Error> {
        self.studiables().get_studiable_by_id(studiable_id).await
    }
}

impl<S> StudiableSource for Rc<S>
where
    S: StudiableSource,
{
    type Error = S::Error;

    async fn fetch_studiable(&self, studiable_id: StudiableId) -> Result<Studiable, Self::Error> {
        self.deref().fetch_studiable(studiable_id).await
    }
}



/// Delays between readiness checks: exponential backoff with an upper bound,
/// optionally limited to a number of attempts.
#[derive(Debug, Clone, PartialEq)]
pub struct PollingSchedule {
    pub initial_interval: Duration,
    pub backoff_multiplier: f64,
    pub max_interval: Duration,
    pub max_attempts: Option<u32>,
}

impl PollingSchedule {
    /// Delay to wait after `attempts_made` fetches before making the next one.
    ///
    /// The very first fetch happens immediately, so zero attempts means zero delay.
    pub fn delay_after(&self, attempts_made: u32) -> Duration {
        if attempts_made == 0 {
            return Duration::ZERO;
        }

        let exponent = i32::try_from(attempts_made - 1).unwrap_or(i32::MAX);
        let scaled_seconds =
            self.initial_interval.as_secs_f64() * self.backoff_multiplier.powi(exponent);

        // A very large exponent overflows to infinity, which `try_from_secs_f64` rejects.
        Duration::try_from_secs_f64(scaled_seconds)
            .map(|delay| delay.min(self.max_interval))
            .unwrap_or(self.max_interval)
    }

    #[inline]
    pub fn allows_another_attempt(&self, attempts_made: u32) -> bool {
        match self.max_attempts {
            Some(max_attempts) => attempts_made < max_attempts,
            None => true,
        }
    }
}

impl From<&PollingConfiguration> for PollingSchedule {
    fn from(configuration: &PollingConfiguration) -> Self {
        Self {
            initial_interval: configuration.initial_interval,
            backoff_multiplier: configuration.backoff_multiplier,
            max_interval: configuration.max_interval,
            max_attempts: configuration.max_attempts,
        }
    }
}

impl Default for PollingSchedule {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_secs(3),
            backoff_multiplier: 1.5,
            max_interval: Duration::from_secs(30),
            max_attempts: Some(100),
        }
    }
}



#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStatus {
    /// Not ready yet, more fetches will follow.
    Pending,

    /// The last fetch returned at least one sentence.
    Ready,

    /// The attempt limit was reached without the studiable becoming ready.
    Exhausted,

    /// Polling was stopped from the outside.
    Cancelled,
}

impl PollStatus {
    #[inline]
    pub fn is_settled(&self) -> bool {
        !matches!(self, PollStatus::Pending)
    }
}



/// Observes one studiable from "requested" to "ready" by repeatedly fetching it.
///
/// A studiable counts as ready as soon as it has at least one sentence.
/// Failed fetches are logged and otherwise ignored; the next scheduled fetch
/// simply tries again.
pub struct GenerationTracker<S>
where
    S: StudiableSource,
{
    source: S,

    studiable_id: StudiableId,

    schedule: PollingSchedule,

    attempts_made: u32,

    status: PollStatus,

    /// The most recently fetched studiable, whether ready or not.
    latest_studiable: Option<Studiable>,
}

impl<S> GenerationTracker<S>
where
    S: StudiableSource,
{
    pub fn new(source: S, studiable_id: StudiableId, schedule: PollingSchedule) -> Self {
        Self {
            source,
            studiable_id,
            schedule,
            attempts_made: 0,
            status: PollStatus::Pending,
            latest_studiable: None,
        }
    }

    #[inline]
    pub fn studiable_id(&self) -> StudiableId {
        self.studiable_id
    }

    #[inline]
    pub fn status(&self) -> PollStatus {
        self.status
    }

    #[inline]
    pub fn attempts_made(&self) -> u32 {
        self.attempts_made
    }

    #[inline]
    pub fn latest_studiable(&self) -> Option<&Studiable> {
        self.latest_studiable.as_ref()
    }

    /// Takes the fetched studiable out of the tracker once it is ready.
    pub fn take_ready_studiable(&mut self) -> Option<Studiable> {
        if self.status != PollStatus::Ready {
            return None;
        }

        self.latest_studiable.take()
    }

    /// How long to wait before the next [`Self::poll`], or `None` if polling is over.
    pub fn next_delay(&self) -> Option<Duration> {
        if self.status.is_settled() {
            return None;
        }

        Some(self.schedule.delay_after(self.attempts_made))
    }

    /// Stops polling for good. Any later [`Self::poll`] returns without fetching.
    pub fn cancel(&mut self) {
        if self.status == PollStatus::Pending {
            debug!(
                studiable_id = %self.studiable_id,
                attempts_made = self.attempts_made,
                "Generation polling cancelled."
            );

            self.status = PollStatus::Cancelled;
        }
    }

    /// Performs a single fetch and updates the tracker's status accordingly.
    ///
    /// Does nothing once the tracker has settled.
    pub async fn poll(&mut self) -> PollStatus {
        if self.status.is_settled() {
            return self.status;
        }

        // Counted only once the fetch completes, so dropping this future mid-fetch changes nothing.
        let fetch_result = self.source.fetch_studiable(self.studiable_id).await;
        self.attempts_made += 1;

        match fetch_result {
            Ok(studiable) => {
                if let Some(generation_error) = studiable.generation_error() {
                    warn!(
                        studiable_id = %self.studiable_id,
                        generation_error,
                        "Backend reported a generation error, studiable will stay pending."
                    );
                }

                if studiable.is_ready() {
                    info!(
                        studiable_id = %self.studiable_id,
                        sentences = studiable.sentences.len(),
                        attempts_made = self.attempts_made,
                        "Studiable is ready."
                    );

                    self.status = PollStatus::Ready;
                } else {
                    debug!(
                        studiable_id = %self.studiable_id,
                        attempts_made = self.attempts_made,
                        "Studiable is still being generated."
                    );
                }

                self.latest_studiable = Some(studiable);
            }
            Err(error) => {
                warn!(
                    studiable_id = %self.studiable_id,
                    attempts_made = self.attempts_made,
                    error = %error,
                    "Failed to fetch studiable, will retry on next poll."
                );
            }
        }

        if self.status == PollStatus::Pending
            && !self.schedule.allows_another_attempt(self.attempts_made)
        {
            warn!(
                studiable_id = %self.studiable_id,
                attempts_made = self.attempts_made,
                "Studiable did not become ready within the attempt limit."
            );

            self.status = PollStatus::Exhausted;
        }

        self.status
    }

    /// Polls on schedule until the studiable is ready, the attempt limit
    /// is hit, or `cancellation` completes.
    ///
    /// An in-flight fetch is dropped on cancellation, so its outcome is never applied.
    pub async fn run_until_settled<C>(&mut self, cancellation: C) -> PollStatus
    where
        C: Future<Output = ()>,
    {
        tokio::pin!(cancellation);

        loop {
            let Some(delay) = self.next_delay() else {
                return self.status;
            };

            let cancelled = tokio::select! {
                _ = &mut cancellation => true,
                _ = async {
                    tokio::time::sleep(delay).await;
                    self.poll().await
                } => false,
            };

            if cancelled {
                self.cancel();
                return self.status;
            }
        }
    }
}



#[cfg(test)]
pub(crate) mod test_util {
    use std::{
        cell::{Cell, RefCell},
        collections::VecDeque,
    };

    use aprendia_core::{
        api_models::{SentencePair, StudiableKind, StudiableMetadata},
        ids::StoryId,
    };
    use thiserror::Error;

    use super::*;


    #[derive(Debug, Error)]
    #[error("backend unreachable")]
    pub(crate) struct UnreachableBackend;


    /// Serves queued fetch results in order; once the queue runs dry, keeps
    /// answering with a studiable that has no sentences.
    pub(crate) struct ScriptedSource {
        responses: RefCell<VecDeque<Result<Studiable, UnreachableBackend>>>,
        pub(crate) fetches: Cell<u32>,
    }

    impl ScriptedSource {
        pub(crate) fn new<I>(responses: I) -> Self
        where
            I: IntoIterator<Item = Result<Studiable, UnreachableBackend>>,
        {
            Self {
                responses: RefCell::new(responses.into_iter().collect()),
                fetches: Cell::new(0),
            }
        }

        pub(crate) fn always_pending() -> Self {
            Self::new([])
        }
    }

    impl StudiableSource for ScriptedSource {
        type Error = UnreachableBackend;

        async fn fetch_studiable(
            &self,
            studiable_id: StudiableId,
        ) -> Result<Studiable, Self::Error> {
            self.fetches.set(self.fetches.get() + 1);

            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Ok(studiable_with(studiable_id, &[])))
        }
    }


    /// A backend that never answers.
    #[derive(Default)]
    pub(crate) struct HangingSource {
        pub(crate) fetches: Cell<u32>,
    }

    impl StudiableSource for HangingSource {
        type Error = UnreachableBackend;

        async fn fetch_studiable(
            &self,
            _studiable_id: StudiableId,
        ) -> Result<Studiable, Self::Error> {
            self.fetches.set(self.fetches.get() + 1);
            std::future::pending().await
        }
    }


    pub(crate) fn studiable_with(studiable_id: StudiableId, sentences: &[&str]) -> Studiable {
        Studiable {
            id: studiable_id,
            story_id: StoryId::new(1),
            title: "Chapter 1".to_string(),
            metadata: StudiableMetadata::new(StudiableKind::Chapter),
            sentences: sentences
                .iter()
                .enumerate()
                .map(|(index, text)| {
                    let mut sentence = SentencePair::new(*text, text.to_uppercase())
                        .with_audio(
                            Some(format!("/audio/{}_source.mp3", text)),
                            Some(format!("/audio/{}_target.mp3", text)),
                        );
                    sentence.order = index as u32;
                    sentence
                })
                .collect(),
        }
    }

    pub(crate) fn test_schedule(max_attempts: Option<u32>) -> PollingSchedule {
        PollingSchedule {
            initial_interval: Duration::from_secs(3),
            backoff_multiplier: 1.5,
            max_interval: Duration::from_secs(30),
            max_attempts,
        }
    }
}

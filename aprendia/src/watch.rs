use std::{fmt::Display, future::Future};

use aprendia_core::api_models::Studiable;
use tokio::time::{sleep, Duration};
use tracing::{debug, warn};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchOutcome {
    /// Every studiable finished generating.
    Settled,

    Cancelled,
}


/// Whether a listing still has anything worth refreshing for.
pub fn any_generating(studiables: &[Studiable]) -> bool {
    studiables.iter().any(|studiable| !studiable.is_ready())
}


/// Re-fetches a studiable listing every `refresh_interval` until nothing is generating
/// any more or `cancellation` completes. Every successful listing is handed to `on_listing`.
///
/// A failed refresh is logged and retried on the next interval; it never ends the watch.
pub async fn watch_studiables<F, Fut, E, C, L>(
    mut fetch_listing: F,
    refresh_interval: Duration,
    cancellation: C,
    mut on_listing: L,
) -> WatchOutcome
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Vec<Studiable>, E>>,
    E: Display,
    C: Future<Output = ()>,
    L: FnMut(&[Studiable]),
{
    tokio::pin!(cancellation);

    let mut failed_refreshes: u32 = 0;

    loop {
        tokio::select! {
            _ = sleep(refresh_interval) => {}
            _ = &mut cancellation => {
                return WatchOutcome::Cancelled;
            }
        }

        let listing = tokio::select! {
            listing = fetch_listing() => listing,
            _ = &mut cancellation => {
                return WatchOutcome::Cancelled;
            }
        };

        let studiables = match listing {
            Ok(studiables) => studiables,
            Err(error) => {
                failed_refreshes += 1;

                warn!(
                    error = %error,
                    failed_refreshes,
                    "Failed to refresh studiables, will retry."
                );
                continue;
            }
        };

        on_listing(&studiables);

        if !any_generating(&studiables) {
            debug!("No studiable is generating any more, stopping watch.");
            return WatchOutcome::Settled;
        }
    }
}



#[cfg(test)]
mod test {
    use std::{cell::RefCell, collections::VecDeque};

    use aprendia_core::{
        api_models::{SentencePair, StudiableKind, StudiableMetadata},
        ids::{StoryId, StudiableId},
    };
    use thiserror::Error;
    use tokio::time::Instant;

    use super::*;

    #[derive(Debug, Error)]
    #[error("connection refused")]
    struct ConnectionRefused;

    fn chapter(ready: bool) -> Studiable {
        let sentences = if ready {
            vec![SentencePair::new("Hello.", "Hola.")]
        } else {
            Vec::new()
        };

        Studiable {
            id: StudiableId::new(1),
            story_id: StoryId::new(1),
            title: "Chapter 1".to_string(),
            metadata: StudiableMetadata::new(StudiableKind::Chapter),
            sentences,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn failed_refresh_does_not_end_watch() {
        let started = Instant::now();
        let responses = RefCell::new(VecDeque::from([
            Ok(vec![chapter(false)]),
            Err(ConnectionRefused),
            Ok(vec![chapter(true)]),
        ]));
        let fetched_at = RefCell::new(Vec::new());
        let mut listings = Vec::new();

        let outcome = watch_studiables(
            || {
                fetched_at.borrow_mut().push(started.elapsed());
                let response = responses
                    .borrow_mut()
                    .pop_front()
                    .expect("watch should have stopped by now");

                async move { response }
            },
            Duration::from_secs(3),
            std::future::pending(),
            |studiables| listings.push(any_generating(studiables)),
        )
        .await;

        assert_eq!(outcome, WatchOutcome::Settled);
        assert_eq!(*fetched_at.borrow(), vec![
            Duration::from_secs(3),
            Duration::from_secs(6),
            Duration::from_secs(9),
        ]);
        assert_eq!(listings, vec![true, false]);
    }

    #[tokio::test(start_paused = true)]
    async fn failing_backend_is_retried_until_cancelled() {
        let fetches = RefCell::new(0u32);

        let outcome = watch_studiables(
            || {
                *fetches.borrow_mut() += 1;
                async { Err::<Vec<Studiable>, _>(ConnectionRefused) }
            },
            Duration::from_secs(3),
            sleep(Duration::from_secs(10)),
            |_| panic!("no listing should have been fetched"),
        )
        .await;

        assert_eq!(outcome, WatchOutcome::Cancelled);
        assert_eq!(*fetches.borrow(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_interrupts_in_flight_refresh() {
        let outcome = watch_studiables(
            || std::future::pending::<Result<Vec<Studiable>, ConnectionRefused>>(),
            Duration::from_secs(3),
            sleep(Duration::from_secs(5)),
            |_| {},
        )
        .await;

        assert_eq!(outcome, WatchOutcome::Cancelled);
    }

    #[test]
    fn listing_with_only_ready_studiables_is_settled() {
        assert!(!any_generating(&[chapter(true)]));
        assert!(any_generating(&[chapter(true), chapter(false)]));
        assert!(!any_generating(&[]));
    }
}

use std::rc::Rc;

use aprendia::watch::{any_generating, watch_studiables};
use aprendia_api_client::{api::StudiableToCreate, Client};
use aprendia_configuration::Configuration;
use aprendia_core::{
    api_models::{Studiable, StudiableKind},
    ids::{StoryId, StudiableId},
};
use aprendia_study::{GenerationTracker, PollStatus, PollingSchedule};
use miette::{miette, IntoDiagnostic, Result, WrapErr};
use tracing::{debug, info};

use super::ctrl_c_pressed;
use crate::cli::GenerationArgs;


pub(super) fn print_studiable_summary(studiable: &Studiable) {
    let status = if studiable.is_ready() {
        format!("{} sentences", studiable.sentences.len())
    } else if let Some(generation_error) = studiable.generation_error() {
        format!("generation error: {}", generation_error)
    } else {
        "generating...".to_string()
    };

    let origin = match (studiable.kind(), studiable.metadata.parent_studiable_id) {
        (StudiableKind::Quiz, Some(parent_id)) => format!(" (from #{})", parent_id),
        _ => String::new(),
    };

    println!(
        "  #{:<5} {:<7} {}{}  [{}]",
        studiable.id,
        studiable.kind(),
        studiable.title,
        origin,
        status
    );
}


fn print_studiable_listing(story_id: StoryId, studiables: &[Studiable]) {
    if studiables.is_empty() {
        println!("Story {} has no chapters or quizzes yet.", story_id);
    }

    for studiable in studiables {
        print_studiable_summary(studiable);
    }
}


/// Lists the studiables of a story. With `watch`, keeps refreshing the listing
/// while anything is still generating; only the first fetch has to succeed.
pub async fn list_studiables(
    client: &Client,
    configuration: &Configuration,
    story_id: StoryId,
    watch: bool,
) -> Result<()> {
    let studiables = client
        .studiables()
        .get_studiables_for_story(story_id)
        .await
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to fetch studiables of story {}.", story_id))?;

    print_studiable_listing(story_id, &studiables);

    if !watch || !any_generating(&studiables) {
        return Ok(());
    }

    let outcome = watch_studiables(
        || async move {
            client
                .studiables()
                .get_studiables_for_story(story_id)
                .await
        },
        configuration.polling.initial_interval,
        ctrl_c_pressed(),
        |studiables| {
            println!();
            print_studiable_listing(story_id, studiables);
        },
    )
    .await;

    debug!(story_id = %story_id, outcome = ?outcome, "Stopped watching studiables.");

    Ok(())
}


pub async fn create_chapter(
    client: &Client,
    story_id: StoryId,
    generation: GenerationArgs,
) -> Result<()> {
    let studiable_id = client
        .studiables()
        .create_studiable(story_id, StudiableToCreate::Chapter {
            generation: generation.into(),
        })
        .await
        .into_diagnostic()
        .wrap_err("Failed to create chapter.")?;

    info!(story_id = %story_id, studiable_id = %studiable_id, "Chapter requested.");
    println!("Chapter #{} is being generated.", studiable_id);

    Ok(())
}


pub async fn create_quiz(
    client: &Client,
    story_id: StoryId,
    parent_chapter_id: StudiableId,
) -> Result<()> {
    let studiable_id = client
        .studiables()
        .create_studiable(story_id, StudiableToCreate::Quiz { parent_chapter_id })
        .await
        .into_diagnostic()
        .wrap_err("Failed to create quiz.")?;

    info!(
        story_id = %story_id,
        parent_chapter_id = %parent_chapter_id,
        studiable_id = %studiable_id,
        "Quiz requested."
    );
    println!("Quiz #{} is being generated.", studiable_id);

    Ok(())
}


pub async fn wait_for_studiable(
    client: Rc<Client>,
    configuration: &Configuration,
    studiable_id: StudiableId,
) -> Result<()> {
    let mut tracker = GenerationTracker::new(
        client,
        studiable_id,
        PollingSchedule::from(&configuration.polling),
    );

    println!("Waiting for studiable {} to be generated...", studiable_id);

    match tracker.run_until_settled(ctrl_c_pressed()).await {
        PollStatus::Ready => {
            let sentence_count = tracker
                .take_ready_studiable()
                .map(|studiable| studiable.sentences.len())
                .unwrap_or_default();

            println!(
                "Studiable {} is ready with {} sentences.",
                studiable_id, sentence_count
            );
            Ok(())
        }
        PollStatus::Exhausted => Err(miette!(
            "Studiable {} was still not ready after {} checks.",
            studiable_id,
            tracker.attempts_made()
        )),
        PollStatus::Cancelled | PollStatus::Pending => {
            println!("Stopped waiting.");
            Ok(())
        }
    }
}


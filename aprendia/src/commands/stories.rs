use aprendia_api_client::{api::StoryToCreate, Client};
use aprendia_core::{api_models::Story, ids::StoryId};
use miette::{IntoDiagnostic, Result, WrapErr};
use tracing::info;

use crate::{cli::StoryCreationArgs, commands::studiables::print_studiable_summary};


fn print_story_summary(story: &Story) {
    let title = if story.title.is_empty() {
        "(untitled)"
    } else {
        story.title.as_str()
    };

    println!(
        "#{:<5} {}  [{} -> {}]",
        story.id, title, story.source_locale, story.target_locale
    );
}


pub async fn list_stories(client: &Client) -> Result<()> {
    let stories = client
        .stories()
        .get_stories()
        .await
        .into_diagnostic()
        .wrap_err("Failed to fetch stories.")?;

    if stories.is_empty() {
        println!("No stories yet.");
    }

    for story in &stories {
        print_story_summary(story);
    }

    Ok(())
}


pub async fn show_story(client: &Client, story_id: StoryId) -> Result<()> {
    let story = client
        .stories()
        .get_story_by_id(story_id)
        .await
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to fetch story {}.", story_id))?;

    print_story_summary(&story);

    let metadata = &story.metadata;
    if let Some(language_level) = metadata.language_level {
        println!("  level: {} ({})", language_level, language_level.description());
    }
    if let Some(age_level) = &metadata.age_level {
        println!("  age level: {}", age_level);
    }
    if let Some(topic) = &metadata.topic {
        println!("  topic: {}", topic);
    }

    let studiables = client
        .studiables()
        .get_studiables_for_story(story_id)
        .await
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to fetch studiables of story {}.", story_id))?;

    for studiable in &studiables {
        print_studiable_summary(studiable);
    }

    Ok(())
}


pub async fn create_story(client: &Client, arguments: StoryCreationArgs) -> Result<()> {
    let story = StoryToCreate {
        title: arguments.title,
        source_locale: arguments.source_locale,
        target_locale: arguments.target_locale,
        generation: arguments.generation.into(),
    };

    let creation = client
        .stories()
        .create_story(story)
        .await
        .into_diagnostic()
        .wrap_err("Failed to create story.")?;

    info!(
        story_id = %creation.story.id,
        chapter_id = %creation.chapter_id,
        "Story created."
    );

    print_story_summary(&creation.story);
    println!(
        "First chapter is being generated as studiable #{}. Run `aprendia study {}` to start as soon as it's ready.",
        creation.chapter_id, creation.chapter_id
    );

    Ok(())
}

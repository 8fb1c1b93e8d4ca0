use std::rc::Rc;

use aprendia::logging::initialize_tracing;
use aprendia_configuration::Configuration;
use clap::Parser;
use miette::{Context, IntoDiagnostic, Result};
use tracing::info;

mod cli;
mod commands;

use crate::cli::{CLIArgs, CLICommand, StoriesCommand, StudiablesCommand};



#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Parse CLI arguments.
    let arguments = CLIArgs::parse();

    // Load configuration.
    let configuration = match arguments.configuration_file_path.as_ref() {
        Some(path) => Configuration::load_from_path(path),
        None => Configuration::load_from_default_path(),
    }
    .into_diagnostic()
    .wrap_err("Failed to load configuration file.")?;


    configuration
        .logging
        .create_log_file_output_directory_if_missing()
        .into_diagnostic()
        .wrap_err("Failed to prepare log file directory.")?;

    let guard = initialize_tracing(
        configuration.logging.console_output_level_filter(),
        configuration.logging.log_file_output_level_filter(),
        &configuration.logging.log_file_output_directory,
        "aprendia.log",
    )
    .wrap_err("Failed to initialize tracing.")?;

    info!(
        file_path = %configuration.configuration_file_path.display(),
        api_base_url = %configuration.backend.api_base_url,
        "Configuration loaded."
    );


    let client = Rc::new(commands::build_api_client(&configuration)?);

    match arguments.command {
        CLICommand::Health => commands::run_health_check(&client).await?,
        CLICommand::Stories(StoriesCommand::List) => commands::list_stories(&client).await?,
        CLICommand::Stories(StoriesCommand::Show { story_id }) => {
            commands::show_story(&client, story_id).await?
        }
        CLICommand::Stories(StoriesCommand::Create(story)) => {
            commands::create_story(&client, story).await?
        }
        CLICommand::Studiables(StudiablesCommand::List { story_id, watch }) => {
            commands::list_studiables(&client, &configuration, story_id, watch).await?
        }
        CLICommand::Studiables(StudiablesCommand::CreateChapter {
            story_id,
            generation,
        }) => commands::create_chapter(&client, story_id, generation).await?,
        CLICommand::Studiables(StudiablesCommand::CreateQuiz {
            story_id,
            parent_chapter_id,
        }) => commands::create_quiz(&client, story_id, parent_chapter_id).await?,
        CLICommand::Studiables(StudiablesCommand::Wait { studiable_id }) => {
            commands::wait_for_studiable(client.clone(), &configuration, studiable_id).await?
        }
        CLICommand::Study { studiable_id } => {
            commands::run_study_session(client.clone(), &configuration, studiable_id).await?
        }
    }


    drop(guard);

    Ok(())
}

use std::rc::Rc;

use aprendia_api_client::{ApiServer, Client};
use aprendia_configuration::Configuration;
use miette::{IntoDiagnostic, Result, WrapErr};

mod health;
mod stories;
mod studiables;
mod study;

pub use health::run_health_check;
pub use stories::{create_story, list_stories, show_story};
pub use studiables::{create_chapter, create_quiz, list_studiables, wait_for_studiable};
pub use study::run_study_session;


/// Completes when Ctrl-C is pressed. If the signal handler can't be installed, never completes.
pub(crate) async fn ctrl_c_pressed() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %error, "Unable to listen for Ctrl-C.");
        std::future::pending::<()>().await;
    }
}


pub fn build_api_client(configuration: &Configuration) -> Result<Client> {
    let server = ApiServer::from_base_url(&configuration.backend.api_base_url);

    Client::new(Rc::new(server))
        .into_diagnostic()
        .wrap_err("Failed to initialize backend API client.")
}

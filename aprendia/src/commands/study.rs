use std::{io::BufRead, rc::Rc};

use aprendia::{
    audio::audio_player_from_configuration,
    driver::drive_study_session,
    terminal::{render_view, HELP_TEXT},
};
use aprendia_api_client::Client;
use aprendia_configuration::Configuration;
use aprendia_core::ids::StudiableId;
use aprendia_study::{AudioOutput, GenerationTracker, PollingSchedule, StudySession};
use tokio::sync::mpsc;

use super::ctrl_c_pressed;


/// Reads stdin lines on a plain thread and forwards them to the event loop.
///
/// A blocking stdin read can't be cancelled, so it is kept off the runtime
/// entirely; the thread simply dies with the process.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (line_sender, line_receiver) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        let stdin = std::io::stdin();

        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };

            if line_sender.send(line).is_err() {
                break;
            }
        }
    });

    line_receiver
}


/// Runs one interactive study session until the learner leaves, stdin closes or Ctrl-C is pressed.
pub async fn run_study_session(
    client: Rc<Client>,
    configuration: &Configuration,
    studiable_id: StudiableId,
) -> miette::Result<()> {
    let tracker = GenerationTracker::new(
        client,
        studiable_id,
        PollingSchedule::from(&configuration.polling),
    );
    let audio_output = AudioOutput::new(
        audio_player_from_configuration(&configuration.audio),
        configuration.backend.audio_base_url.clone(),
    );

    let mut session = StudySession::new(tracker, audio_output);
    let mut input_lines = spawn_stdin_reader();

    println!("{}\n", HELP_TEXT);

    drive_study_session(&mut session, &mut input_lines, ctrl_c_pressed()).await;

    println!("{}", render_view(&session.view()));
    Ok(())
}

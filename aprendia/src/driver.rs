use std::future::Future;

use aprendia_study::{SessionError, SessionView, StudiableSource, StudySession};
use tokio::{
    sync::mpsc,
    time::{sleep, Duration, Instant},
};
use tracing::debug;

use crate::terminal::{render_view, StudyCommand, HELP_TEXT};


fn print_view<S>(session: &StudySession<S>)
where
    S: StudiableSource,
{
    println!("{}\n", render_view(&session.view()));
}


fn handle_command<S>(session: &mut StudySession<S>, command: StudyCommand)
where
    S: StudiableSource,
{
    let result = match command {
        StudyCommand::RevealText => session.reveal_text().map(|_| ()),
        StudyCommand::Flip => session.flip().map(|_| ()),
        StudyCommand::Review(signal) => session.review(signal).map(|_| ()),
        StudyCommand::ReplayAudio => session.replay_audio().map(|attempted| {
            if !attempted {
                println!("This side of the card has no audio.");
            }
        }),
        StudyCommand::Back => {
            session.leave();
            Ok(())
        }
        StudyCommand::Help => {
            println!("{}\n", HELP_TEXT);
            return;
        }
    };

    match result {
        Ok(()) => {
            if !session.is_closed() {
                print_view(session);
            }
        }
        Err(SessionError::NotStudying) => {
            println!("There is no card to work with right now.\n");
        }
        Err(error) => {
            println!("{}\n", error);
        }
    }
}


/// Drives `session` until the learner leaves, `input_lines` closes or `cancellation` completes.
///
/// Readiness checks follow the session's own schedule, measured from the end of the previous
/// check; input lines don't move it. Input and cancellation are handled even while a check
/// is in flight: the check is dropped and retried on the next turn of the loop.
pub async fn drive_study_session<S, C>(
    session: &mut StudySession<S>,
    input_lines: &mut mpsc::UnboundedReceiver<String>,
    cancellation: C,
) where
    S: StudiableSource,
    C: Future<Output = ()>,
{
    tokio::pin!(cancellation);

    let poll_timer = sleep(Duration::ZERO);
    tokio::pin!(poll_timer);

    while !session.is_closed() {
        tokio::select! {
            line = input_lines.recv() => {
                let Some(line) = line else {
                    debug!("Standard input closed, leaving study session.");
                    session.leave();
                    break;
                };

                if line.trim().is_empty() {
                    continue;
                }

                match line.parse::<StudyCommand>() {
                    Ok(command) => handle_command(session, command),
                    Err(error) => println!("{}\n", error),
                }
            }
            _ = async {
                poll_timer.as_mut().await;
                session.on_poll_tick().await;
            }, if session.next_poll_delay().is_some() => {
                if let Some(delay) = session.next_poll_delay() {
                    poll_timer.as_mut().reset(Instant::now() + delay);
                }

                // Only re-render while pending on the first check, to avoid
                // spamming the terminal on every poll.
                match session.view() {
                    SessionView::Pending { attempts_made, .. } if attempts_made > 1 => {
                        debug!(attempts_made, "Studiable still pending.");
                    }
                    _ => print_view(session),
                }
            }
            _ = &mut cancellation => {
                session.leave();
            }
        }
    }
}

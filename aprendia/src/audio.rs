use std::{cell::RefCell, process::Stdio};

use aprendia_configuration::{AudioConfiguration, AudioPlayerCommand};
use aprendia_study::{AudioPlaybackError, AudioPlayer};
use tokio::process::Child;
use tracing::{debug, info, warn};
use url::Url;


/// Plays audio by running an external program with the audio URL as its last argument.
///
/// Only one cue plays at a time: starting a new one stops the player that is still running.
pub struct CommandAudioPlayer {
    command: AudioPlayerCommand,

    current_playback: RefCell<Option<Child>>,
}

impl CommandAudioPlayer {
    pub fn new(command: AudioPlayerCommand) -> Self {
        Self {
            command,
            current_playback: RefCell::new(None),
        }
    }

    fn build_command(&self, url: &Url) -> tokio::process::Command {
        let mut command = tokio::process::Command::new(&self.command.program);

        command
            .args(&self.command.arguments)
            .arg(url.as_str())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        command
    }

    /// Stops the player started by the previous cue, if it is still running.
    fn stop_current_playback(&self) -> Option<Child> {
        let mut child = self.current_playback.borrow_mut().take()?;

        match child.try_wait() {
            Ok(Some(status)) if !status.success() => {
                warn!(status = %status, "Audio player exited unsuccessfully.");
            }
            Ok(Some(_)) => {}
            Ok(None) => {
                debug!("Stopping previous audio cue.");

                if let Err(error) = child.start_kill() {
                    warn!(error = %error, "Unable to stop previous audio player.");
                }
            }
            Err(error) => warn!(error = %error, "Failed to check audio player status."),
        }

        Some(child)
    }

    /// Starts playing `url` and returns the player process that was replaced, if any.
    fn start_playback(&self, url: &Url) -> Result<Option<Child>, AudioPlaybackError> {
        let previous_playback = self.stop_current_playback();

        let child = self.build_command(url).spawn().map_err(|error| {
            AudioPlaybackError::UnableToStartPlayer {
                program: self.command.program.clone(),
                error,
            }
        })?;

        debug!(audio_url = %url, "Started audio player.");

        *self.current_playback.borrow_mut() = Some(child);

        Ok(previous_playback)
    }
}

impl AudioPlayer for CommandAudioPlayer {
    fn play(&self, url: &Url) -> Result<(), AudioPlaybackError> {
        self.start_playback(url).map(|_| ())
    }
}


/// Used when no player is configured: every cue is logged instead of played.
pub struct LoggingAudioPlayer;

impl AudioPlayer for LoggingAudioPlayer {
    fn play(&self, url: &Url) -> Result<(), AudioPlaybackError> {
        info!(audio_url = %url, "Audio cue (no player configured).");
        Ok(())
    }
}


pub fn audio_player_from_configuration(configuration: &AudioConfiguration) -> Box<dyn AudioPlayer> {
    match &configuration.player_command {
        Some(command) => Box::new(CommandAudioPlayer::new(command.clone())),
        None => Box::new(LoggingAudioPlayer),
    }
}



#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn audio_url_is_passed_as_last_argument() {
        let player = CommandAudioPlayer::new(AudioPlayerCommand {
            program: "mpv".to_string(),
            arguments: vec!["--no-video".to_string(), "--really-quiet".to_string()],
        });

        let url = Url::parse("http://localhost:8000/audio/1_target.mp3").unwrap();
        let command = player.build_command(&url);
        let command = command.as_std();

        assert_eq!(command.get_program(), "mpv");
        assert_eq!(command.get_args().collect::<Vec<_>>(), vec![
            "--no-video",
            "--really-quiet",
            "http://localhost:8000/audio/1_target.mp3"
        ]);
    }

    #[tokio::test]
    async fn missing_player_program_is_a_playback_error() {
        let player = CommandAudioPlayer::new(AudioPlayerCommand {
            program: "aprendia-this-player-does-not-exist".to_string(),
            arguments: Vec::new(),
        });

        let url = Url::parse("http://localhost:8000/audio/1_target.mp3").unwrap();

        assert!(matches!(
            player.play(&url),
            Err(AudioPlaybackError::UnableToStartPlayer { .. })
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn new_cue_stops_previous_player() {
        let player = CommandAudioPlayer::new(AudioPlayerCommand {
            program: "sh".to_string(),
            arguments: vec!["-c".to_string(), "sleep 30".to_string(), "player".to_string()],
        });

        let first_url = Url::parse("http://localhost:8000/audio/1_target.mp3").unwrap();
        let second_url = Url::parse("http://localhost:8000/audio/1_source.mp3").unwrap();

        assert!(player.start_playback(&first_url).unwrap().is_none());

        let mut first_playback = player
            .start_playback(&second_url)
            .unwrap()
            .expect("first player should have been replaced");

        let status = first_playback.wait().await.unwrap();
        assert!(!status.success());

        let mut second_playback = player.stop_current_playback().unwrap();
        second_playback.wait().await.unwrap();
    }

    #[test]
    fn logging_player_never_fails() {
        let player = audio_player_from_configuration(&AudioConfiguration {
            player_command: None,
        });

        let url = Url::parse("http://localhost:8000/audio/1_source.mp3").unwrap();
        assert!(player.play(&url).is_ok());
    }
}

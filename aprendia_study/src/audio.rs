use std::{ops::Deref, rc::Rc};

use aprendia_core::api_models::SentencePair;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::review::{CardFace, CardSide};


#[derive(Debug, Error)]
pub enum AudioPlaybackError {
    #[error("unable to start audio player \"{}\"", .program)]
    UnableToStartPlayer {
        program: String,

        #[source]
        error: std::io::Error,
    },

    #[error("audio playback failed: {}", .reason)]
    Other { reason: String },
}


/// Something that can play one audio resource.
///
/// Playback is fire-and-forget: a successful return only means playback was started.
pub trait AudioPlayer {
    fn play(&self, url: &Url) -> Result<(), AudioPlaybackError>;
}

impl<P> AudioPlayer for Rc<P>
where
    P: AudioPlayer + ?Sized,
{
    fn play(&self, url: &Url) -> Result<(), AudioPlaybackError> {
        self.deref().play(url)
    }
}

impl<P> AudioPlayer for Box<P>
where
    P: AudioPlayer + ?Sized,
{
    fn play(&self, url: &Url) -> Result<(), AudioPlaybackError> {
        self.deref().play(url)
    }
}



/// Resolves the audio paths of a card against the backend origin and hands them to a player.
///
/// Playback failures never propagate: they are logged and the study flow continues.
pub struct AudioOutput {
    player: Box<dyn AudioPlayer>,
    audio_base_url: Url,
}

impl AudioOutput {
    pub fn new<P>(player: P, audio_base_url: Url) -> Self
    where
        P: AudioPlayer + 'static,
    {
        Self {
            player: Box::new(player),
            audio_base_url,
        }
    }

    /// Plays whatever audio belongs to entering `face` of `card`.
    ///
    /// Returns `true` when playback was attempted (regardless of whether it succeeded).
    pub fn play_face(&self, card: &SentencePair, face: CardFace) -> bool {
        match face.audio_side() {
            Some(side) => self.play_side(card, side),
            None => false,
        }
    }

    /// Plays the audio of one side of `card`, if it has any.
    pub fn play_side(&self, card: &SentencePair, side: CardSide) -> bool {
        let audio_path = match side {
            CardSide::Source => card.source_audio.as_deref(),
            CardSide::Target => card.target_audio.as_deref(),
        };

        let Some(audio_path) = audio_path else {
            debug!(
                side = ?side,
                text = %card.target_text,
                "Sentence has no audio for this side, skipping playback."
            );
            return false;
        };

        let audio_url = match resolve_audio_url(&self.audio_base_url, audio_path) {
            Ok(url) => url,
            Err(error) => {
                warn!(
                    error = %error,
                    audio_path,
                    "Unable to build audio URL, skipping playback."
                );
                return true;
            }
        };

        if let Err(error) = self.player.play(&audio_url) {
            warn!(
                error = %error,
                audio_url = %audio_url,
                "Audio playback failed, continuing without it."
            );
        }

        true
    }
}

/// Absolute audio URLs are used as-is; paths are appended to the base URL,
/// keeping any path prefix the backend is mounted under.
fn resolve_audio_url(audio_base_url: &Url, audio_path: &str) -> Result<Url, url::ParseError> {
    if let Ok(absolute_url) = Url::parse(audio_path) {
        return Ok(absolute_url);
    }

    Url::parse(&format!(
        "{}/{}",
        audio_base_url.as_str().trim_end_matches('/'),
        audio_path.trim_start_matches('/')
    ))
}



#[cfg(test)]
pub(crate) mod test_util {
    use std::cell::RefCell;

    use super::*;

    /// Records every URL it is asked to play; optionally fails each time.
    #[derive(Default)]
    pub(crate) struct RecordingPlayer {
        pub(crate) played: RefCell<Vec<Url>>,
        pub(crate) fail: bool,
    }

    impl RecordingPlayer {
        pub(crate) fn failing() -> Self {
            Self {
                played: RefCell::new(Vec::new()),
                fail: true,
            }
        }

        pub(crate) fn played_paths(&self) -> Vec<String> {
            self.played
                .borrow()
                .iter()
                .map(|url| url.path().to_string())
                .collect()
        }
    }

    impl AudioPlayer for RecordingPlayer {
        fn play(&self, url: &Url) -> Result<(), AudioPlaybackError> {
            self.played.borrow_mut().push(url.clone());

            if self.fail {
                return Err(AudioPlaybackError::Other {
                    reason: "device unavailable".to_string(),
                });
            }

            Ok(())
        }
    }

    pub(crate) fn audio_base_url() -> Url {
        Url::parse("http://localhost:8000").unwrap()
    }
}

use serde::Deserialize;

use crate::{traits::TryResolve, AudioConfigurationError};


#[derive(Deserialize, Clone, Debug, Default)]
pub(super) struct UnresolvedAudioConfiguration {
    player_command: Option<Vec<String>>,
}


/// An external program that plays one audio URL and exits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AudioPlayerCommand {
    pub program: String,

    /// Arguments placed before the audio URL.
    pub arguments: Vec<String>,
}


#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AudioConfiguration {
    /// `None` disables playback; audio cues are then only logged.
    pub player_command: Option<AudioPlayerCommand>,
}


impl TryResolve for UnresolvedAudioConfiguration {
    type Resolved = AudioConfiguration;
    type Error = AudioConfigurationError;

    fn try_resolve(self) -> Result<Self::Resolved, Self::Error> {
        let Some(player_command) = self.player_command else {
            return Ok(AudioConfiguration {
                player_command: None,
            });
        };

        let mut command_parts = player_command.into_iter();

        let program = command_parts
            .next()
            .filter(|program| !program.trim().is_empty())
            .ok_or(AudioConfigurationError::EmptyPlayerCommand)?;

        Ok(AudioConfiguration {
            player_command: Some(AudioPlayerCommand {
                program,
                arguments: command_parts.collect(),
            }),
        })
    }
}

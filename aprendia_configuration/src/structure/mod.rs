use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

mod audio;
mod backend;
mod logging;
mod polling;

pub use audio::*;
pub use backend::*;
pub use logging::*;
pub use polling::*;

use crate::traits::{TryResolve, TryResolveWithContext};
use crate::utilities::get_default_configuration_file_path;
use crate::{ConfigurationLoadingError, ConfigurationResolutionError};



#[derive(Deserialize, Debug)]
pub(crate) struct UnresolvedConfiguration {
    /// Logging-related configuration.
    logging: UnresolvedLoggingConfiguration,

    /// Location of the content-generation backend.
    backend: UnresolvedBackendConfiguration,

    /// Readiness polling of pending studiables.
    #[serde(default)]
    polling: UnresolvedPollingConfiguration,

    /// Audio playback.
    #[serde(default)]
    audio: UnresolvedAudioConfiguration,
}


/// The entire Aprendia client configuration.
#[derive(Debug, Clone)]
pub struct Configuration {
    /// This is the file path this [`Configuration`] instance was loaded from.
    pub configuration_file_path: PathBuf,

    /// Logging-related configuration.
    pub logging: LoggingConfiguration,

    /// Location of the content-generation backend.
    pub backend: BackendConfiguration,

    /// Readiness polling of pending studiables.
    pub polling: PollingConfiguration,

    /// Audio playback.
    pub audio: AudioConfiguration,
}



pub(crate) struct ConfigurationResolutionContext {
    configuration_file_path: PathBuf,
}


impl TryResolveWithContext for UnresolvedConfiguration {
    type Resolved = Configuration;
    type Context = ConfigurationResolutionContext;
    type Error = ConfigurationResolutionError;

    fn try_resolve_with_context(
        self,
        context: Self::Context,
    ) -> Result<Self::Resolved, Self::Error> {
        let logging = self.logging.try_resolve()?;
        let backend = self.backend.try_resolve()?;
        let polling = self.polling.try_resolve()?;
        let audio = self.audio.try_resolve()?;

        Ok(Configuration {
            configuration_file_path: context.configuration_file_path,
            logging,
            backend,
            polling,
            audio,
        })
    }
}


impl Configuration {
    /// Load the configuration from a specific file path.
    pub fn load_from_path<S: AsRef<Path>>(
        configuration_file_path: S,
    ) -> Result<Self, ConfigurationLoadingError> {
        // Read the configuration file into memory as a string.
        let configuration_string =
            fs::read_to_string(configuration_file_path.as_ref()).map_err(|error| {
                ConfigurationLoadingError::UnableToReadConfigurationFile {
                    path: configuration_file_path.as_ref().to_path_buf(),
                    error,
                }
            })?;

        let canonical_configuration_file_path = dunce::canonicalize(&configuration_file_path)
            .unwrap_or_else(|_| configuration_file_path.as_ref().to_path_buf());

        Self::load_from_str(
            &configuration_string,
            canonical_configuration_file_path,
        )
    }

    /// Load the configuration from the default path (`./data/configuration.toml`).
    pub fn load_from_default_path() -> Result<Self, ConfigurationLoadingError> {
        Configuration::load_from_path(get_default_configuration_file_path()?)
    }

    /// Parse and resolve configuration contents that were already read into memory.
    /// `configuration_file_path` is only recorded, never read.
    pub fn load_from_str(
        configuration_string: &str,
        configuration_file_path: PathBuf,
    ) -> Result<Self, ConfigurationLoadingError> {
        // Parse the string into the [`UnresolvedConfiguration`] structure and then resolve it.
        let unresolved_configuration =
            toml::from_str::<UnresolvedConfiguration>(configuration_string)
                .map_err(|error| ConfigurationLoadingError::ParsingError { error })?;

        let resolved_configuration =
            unresolved_configuration.try_resolve_with_context(ConfigurationResolutionContext {
                configuration_file_path,
            })?;

        Ok(resolved_configuration)
    }
}

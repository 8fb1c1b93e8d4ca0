use std::{borrow::Cow, io, path::PathBuf};

use thiserror::Error;


#[derive(Debug, Error)]
pub enum MissingLoggingDirectoryCreationError {
    #[error("{} exists, but is not a directory", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("unable to create directory {} due to IO error", .directory_path.display())]
    UnableToCreateDirectory {
        directory_path: PathBuf,

        #[source]
        error: io::Error,
    },
}


#[derive(Debug, Error)]
pub enum LoggingConfigurationError {
    #[error(
        "invalid tracing filter of type {} (doesn't parse with EnvFilter): {}",
        .kind,
        .invalid_filter
    )]
    InvalidTracingFilter {
        invalid_filter: String,

        kind: Cow<'static, str>,

        #[source]
        error: tracing_subscriber::filter::ParseError,
    },
}


#[derive(Debug, Error)]
pub enum BackendConfigurationError {
    #[error("field {} is not a valid URL: {}", .field, .invalid_url)]
    InvalidUrl {
        field: &'static str,

        invalid_url: String,

        #[source]
        error: url::ParseError,
    },

    #[error(
        "field {} must use the http or https scheme, got \"{}\"",
        .field,
        .scheme
    )]
    UnsupportedScheme { field: &'static str, scheme: String },
}


#[derive(Debug, Error)]
pub enum PollingConfigurationError {
    #[error("field {} must be a positive, finite number of seconds (got {})", .field, .value)]
    InvalidInterval { field: &'static str, value: f64 },

    #[error(
        "max_interval_seconds ({}) must not be smaller than initial_interval_seconds ({})",
        .max_interval_seconds,
        .initial_interval_seconds
    )]
    MaxIntervalBelowInitialInterval {
        initial_interval_seconds: f64,
        max_interval_seconds: f64,
    },

    #[error("backoff_multiplier must be a finite number of at least 1.0 (got {})", .value)]
    InvalidBackoffMultiplier { value: f64 },

    #[error("max_attempts must be at least 1 when specified")]
    ZeroMaxAttempts,
}


#[derive(Debug, Error)]
pub enum AudioConfigurationError {
    #[error("player_command must contain at least the program to run")]
    EmptyPlayerCommand,
}


#[derive(Debug, Error)]
pub enum ConfigurationResolutionError {
    #[error("error while resolving \"logging\" table")]
    LoggingConfigurationError {
        #[from]
        #[source]
        error: LoggingConfigurationError,
    },

    #[error("error while resolving \"backend\" table")]
    BackendConfigurationError {
        #[from]
        #[source]
        error: BackendConfigurationError,
    },

    #[error("error while resolving \"polling\" table")]
    PollingConfigurationError {
        #[from]
        #[source]
        error: PollingConfigurationError,
    },

    #[error("error while resolving \"audio\" table")]
    AudioConfigurationError {
        #[from]
        #[source]
        error: AudioConfigurationError,
    },
}


#[derive(Debug, Error)]
pub enum ConfigurationLoadingError {
    #[error("unable to determine the current directory")]
    UnableToGetCurrentDirectory {
        #[source]
        error: io::Error,
    },

    #[error("unable to read configuration file at {}", .path.display())]
    UnableToReadConfigurationFile {
        path: PathBuf,

        #[source]
        error: io::Error,
    },

    #[error("failed to parse the contents of the configuration file as TOML")]
    ParsingError {
        #[from]
        #[source]
        error: toml::de::Error,
    },

    #[error("failed to resolve and validate the contents of the configuration")]
    ResolutionError {
        #[from]
        #[source]
        error: ConfigurationResolutionError,
    },
}

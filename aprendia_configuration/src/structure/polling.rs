use std::time::Duration;

use serde::Deserialize;

use crate::{traits::TryResolve, PollingConfigurationError};


#[derive(Deserialize, Clone, Debug)]
pub(super) struct UnresolvedPollingConfiguration {
    #[serde(default = "default_initial_interval_seconds")]
    initial_interval_seconds: f64,

    #[serde(default = "default_backoff_multiplier")]
    backoff_multiplier: f64,

    #[serde(default = "default_max_interval_seconds")]
    max_interval_seconds: f64,

    #[serde(default = "default_max_attempts")]
    max_attempts: Option<u32>,
}

impl Default for UnresolvedPollingConfiguration {
    fn default() -> Self {
        Self {
            initial_interval_seconds: default_initial_interval_seconds(),
            backoff_multiplier: default_backoff_multiplier(),
            max_interval_seconds: default_max_interval_seconds(),
            max_attempts: default_max_attempts(),
        }
    }
}

fn default_initial_interval_seconds() -> f64 {
    3.0
}

fn default_backoff_multiplier() -> f64 {
    1.5
}

fn default_max_interval_seconds() -> f64 {
    30.0
}

fn default_max_attempts() -> Option<u32> {
    Some(100)
}


/// How a pending studiable is polled for readiness.
#[derive(Clone, Debug, PartialEq)]
pub struct PollingConfiguration {
    /// Delay before the second fetch (the first one happens immediately).
    pub initial_interval: Duration,

    /// Each subsequent delay is the previous one multiplied by this.
    pub backoff_multiplier: f64,

    /// Upper bound for any single delay.
    pub max_interval: Duration,

    /// `None` means poll until ready or abandoned.
    pub max_attempts: Option<u32>,
}


fn parse_interval(field: &'static str, seconds: f64) -> Result<Duration, PollingConfigurationError> {
    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(PollingConfigurationError::InvalidInterval {
            field,
            value: seconds,
        });
    }

    Duration::try_from_secs_f64(seconds).map_err(|_| PollingConfigurationError::InvalidInterval {
        field,
        value: seconds,
    })
}


impl TryResolve for UnresolvedPollingConfiguration {
    type Resolved = PollingConfiguration;
    type Error = PollingConfigurationError;

    fn try_resolve(self) -> Result<Self::Resolved, Self::Error> {
        let initial_interval =
            parse_interval("initial_interval_seconds", self.initial_interval_seconds)?;
        let max_interval = parse_interval("max_interval_seconds", self.max_interval_seconds)?;

        if max_interval < initial_interval {
            return Err(
                PollingConfigurationError::MaxIntervalBelowInitialInterval {
                    initial_interval_seconds: self.initial_interval_seconds,
                    max_interval_seconds: self.max_interval_seconds,
                },
            );
        }

        if !self.backoff_multiplier.is_finite() || self.backoff_multiplier < 1.0 {
            return Err(PollingConfigurationError::InvalidBackoffMultiplier {
                value: self.backoff_multiplier,
            });
        }

        if self.max_attempts == Some(0) {
            return Err(PollingConfigurationError::ZeroMaxAttempts);
        }

        Ok(PollingConfiguration {
            initial_interval,
            backoff_multiplier: self.backoff_multiplier,
            max_interval,
            max_attempts: self.max_attempts,
        })
    }
}

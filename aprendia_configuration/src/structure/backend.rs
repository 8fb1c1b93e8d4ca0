use serde::Deserialize;
use url::Url;

use crate::{traits::TryResolve, BackendConfigurationError};


#[derive(Deserialize, Clone, Debug)]
pub(super) struct UnresolvedBackendConfiguration {
    api_base_url: String,

    audio_base_url: Option<String>,
}


/// Where the content-generation backend lives.
#[derive(Clone, Debug)]
pub struct BackendConfiguration {
    /// Base URL all REST endpoints are relative to, e.g. `http://localhost:8000`.
    pub api_base_url: Url,

    /// Origin relative audio paths are resolved against.
    /// Falls back to `api_base_url` when unspecified.
    pub audio_base_url: Url,
}


fn parse_http_url(field: &'static str, raw_url: &str) -> Result<Url, BackendConfigurationError> {
    let url = Url::parse(raw_url).map_err(|error| BackendConfigurationError::InvalidUrl {
        field,
        invalid_url: raw_url.to_string(),
        error,
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(BackendConfigurationError::UnsupportedScheme {
            field,
            scheme: url.scheme().to_string(),
        });
    }

    Ok(url)
}


impl TryResolve for UnresolvedBackendConfiguration {
    type Resolved = BackendConfiguration;
    type Error = BackendConfigurationError;

    fn try_resolve(self) -> Result<Self::Resolved, Self::Error> {
        let api_base_url = parse_http_url("api_base_url", &self.api_base_url)?;

        let audio_base_url = match self.audio_base_url {
            Some(audio_base_url) => parse_http_url("audio_base_url", &audio_base_url)?,
            None => api_base_url.clone(),
        };

        Ok(BackendConfiguration {
            api_base_url,
            audio_base_url,
        })
    }
}

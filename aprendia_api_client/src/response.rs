use aprendia_core::api_models::ErrorResponse;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::errors::{ClientError, ClientResult};

pub struct ServerResponse {
    http_response: reqwest::Response,
}

impl ServerResponse {
    pub(crate) fn from_reqwest_response(response: reqwest::Response) -> Self {
        Self {
            http_response: response,
        }
    }

    pub(crate) fn status(&self) -> StatusCode {
        self.http_response.status()
    }

    pub(crate) async fn json<V>(self) -> ClientResult<V>
    where
        V: DeserializeOwned,
    {
        let body_data = self
            .http_response
            .bytes()
            .await
            .map_err(|error| ClientError::RequestExecutionError { error })?;

        serde_json::from_slice(&body_data)
            .map_err(|error| ClientError::ResponseJsonBodyError { error })
    }

    /// Parses the `{"detail": ...}` body the backend attaches to error responses.
    pub(crate) async fn error_response(self) -> ClientResult<ErrorResponse> {
        self.json::<ErrorResponse>().await
    }
}

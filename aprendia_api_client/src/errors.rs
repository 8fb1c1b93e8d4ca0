use std::borrow::Cow;

use aprendia_core::api_models::ErrorResponse;
use reqwest::StatusCode;
use thiserror::Error;



#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to prepare a URL")]
    UrlPreparationError {
        #[from]
        #[source]
        error: url::ParseError,
    },

    #[error("failed to serialize body data as JSON")]
    RequestBodySerializationError {
        #[source]
        error: serde_json::Error,
    },

    #[error("failed while executing HTTP request")]
    RequestExecutionError {
        #[source]
        error: reqwest::Error,
    },

    #[error(
        "failed to extract JSON body from response \
        (either invalid JSON syntax or mismatching content schema)"
    )]
    ResponseJsonBodyError {
        #[source]
        error: serde_json::Error,
    },

    #[error("server returned a 500 Internal Server Error")]
    InternalServerError,

    /// Indicates that the server responded in a way this client does not know how to handle.
    #[error(
        "server sent an unexpected and unhandled {} response \
        (may indicate this client being out of date with the API): {}",
        .status_code,
        .reason
    )]
    UnexpectedResponse {
        status_code: StatusCode,
        reason: Cow<'static, str>,
    },
}

impl ClientError {
    #[inline]
    pub(crate) const fn internal_server_error() -> Self {
        Self::InternalServerError
    }

    #[inline]
    pub(crate) fn unexpected_error_detail(
        unexpected_error_response: ErrorResponse,
        status_code: StatusCode,
    ) -> Self {
        Self::UnexpectedResponse {
            status_code,
            reason: Cow::Owned(format!(
                "unexpected error detail in the response: {}",
                unexpected_error_response.detail
            )),
        }
    }

    #[inline]
    pub(crate) const fn unexpected_status_code(status_code: StatusCode) -> Self {
        Self::UnexpectedResponse {
            status_code,
            reason: Cow::Borrowed("unexpected response status code"),
        }
    }
}


#[derive(Debug, Error)]
pub enum ClientInitializationError {
    #[error("unable to initialize reqwest HTTP client")]
    UnableToInitializeReqwestClient {
        #[from]
        #[source]
        error: reqwest::Error,
    },
}


pub type ClientResult<V, E = ClientError> = Result<V, E>;

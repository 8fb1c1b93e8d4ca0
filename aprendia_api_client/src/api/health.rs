use aprendia_core::api_models::HealthResponse;
use reqwest::StatusCode;

use crate::{
    macros::unexpected_status_code,
    request::RequestBuilder,
    Client,
    ClientResult,
};

pub struct HealthApi<'c> {
    client: &'c Client,
}

impl<'c> HealthApi<'c> {
    pub(crate) fn new(client: &'c Client) -> Self {
        Self { client }
    }

    /// Returns `true` if the backend reports itself as healthy.
    pub async fn check(&self) -> ClientResult<bool> {
        let response = RequestBuilder::get(self.client)
            .endpoint_url("/health")
            .send()
            .await?;

        let response_status = response.status();

        if response_status != StatusCode::OK {
            unexpected_status_code!(response_status);
        }

        let response_body: HealthResponse = response.json().await?;

        Ok(response_body.is_healthy())
    }
}

use std::rc::Rc;

use reqwest::header;

use crate::{
    api::{HealthApi, StoriesApi, StudiablesApi},
    errors::{ClientError, ClientInitializationError, ClientResult},
    request::PreparedRequest,
    response::ServerResponse,
    ApiServer,
};

pub(crate) trait HttpClient {
    fn server(&self) -> &ApiServer;

    async fn execute(&self, request: PreparedRequest) -> ClientResult<ServerResponse>;
}



fn build_client_user_agent() -> String {
    format!(
        "aprendia_api_client / v{}",
        env!("CARGO_PKG_VERSION")
    )
}

pub struct Client {
    server: Rc<ApiServer>,
    http_client: reqwest::Client,
}

impl Client {
    pub fn new(server: Rc<ApiServer>) -> Result<Self, ClientInitializationError> {
        let http_client = reqwest::Client::builder()
            .zstd(true)
            .user_agent(build_client_user_agent())
            .build()
            .map_err(|error| ClientInitializationError::UnableToInitializeReqwestClient { error })?;

        Ok(Self {
            server,
            http_client,
        })
    }

    pub fn health(&self) -> HealthApi<'_> {
        HealthApi::new(self)
    }

    pub fn stories(&self) -> StoriesApi<'_> {
        StoriesApi::new(self)
    }

    pub fn studiables(&self) -> StudiablesApi<'_> {
        StudiablesApi::new(self)
    }
}

impl HttpClient for Client {
    fn server(&self) -> &ApiServer {
        &self.server
    }

    async fn execute(&self, request: PreparedRequest) -> ClientResult<ServerResponse> {
        let mut request_builder = self.http_client.request(request.method, request.url);

        if let Some(json_body) = request.json_body {
            request_builder = request_builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(json_body);
        }

        request_builder
            .send()
            .await
            .map(ServerResponse::from_reqwest_response)
            .map_err(|error| ClientError::RequestExecutionError { error })
    }
}

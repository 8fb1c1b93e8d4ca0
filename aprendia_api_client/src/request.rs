use reqwest::Method;
use serde::Serialize;
use url::Url;

use crate::{server::ApiServer, ClientError, ClientResult, HttpClient, ServerResponse};


/// A fully validated request, ready to be handed to an [`HttpClient`].
///
/// The backend only ever accepts JSON bodies, so a body is always sent as `application/json`.
#[derive(Debug)]
pub(crate) struct PreparedRequest {
    pub(crate) method: Method,
    pub(crate) url: Url,
    pub(crate) json_body: Option<Vec<u8>>,
}


/// Builds a request to one backend endpoint.
///
/// `HAS_URL` tracks whether [`Self::endpoint_url`] was called; only then can the request be sent.
/// URL and body errors are deferred until [`Self::send`], so call chains stay flat.
pub(crate) struct RequestBuilder<'c, HC, const HAS_URL: bool>
where
    HC: HttpClient,
{
    client: &'c HC,

    method: Method,

    url: Option<Result<Url, url::ParseError>>,

    json_body: Option<Result<Vec<u8>, serde_json::Error>>,
}

impl<'c, HC> RequestBuilder<'c, HC, false>
where
    HC: HttpClient,
{
    fn new(client: &'c HC, method: Method) -> Self {
        Self {
            client,
            method,
            url: None,
            json_body: None,
        }
    }

    pub(crate) fn get(client: &'c HC) -> Self {
        Self::new(client, Method::GET)
    }

    pub(crate) fn post(client: &'c HC) -> Self {
        Self::new(client, Method::POST)
    }

    pub(crate) fn endpoint_url<U>(self, relative_endpoint_url: U) -> RequestBuilder<'c, HC, true>
    where
        U: AsRef<str>,
    {
        RequestBuilder {
            client: self.client,
            method: self.method,
            url: Some(build_request_url(
                self.client.server(),
                relative_endpoint_url.as_ref(),
            )),
            json_body: self.json_body,
        }
    }
}

impl<'c, HC, const HAS_URL: bool> RequestBuilder<'c, HC, HAS_URL>
where
    HC: HttpClient,
{
    pub(crate) fn json<V>(mut self, data: &V) -> Self
    where
        V: Serialize,
    {
        self.json_body = Some(serde_json::to_vec(data));
        self
    }
}

impl<'c, HC> RequestBuilder<'c, HC, true>
where
    HC: HttpClient,
{
    fn prepare(self) -> ClientResult<PreparedRequest> {
        let url = match self.url {
            Some(url) => url?,
            // PANIC SAFETY: `endpoint_url` is the only way to get a builder with `HAS_URL == true`,
            // and it always sets the URL.
            None => unreachable!("request builder has no URL despite HAS_URL"),
        };

        let json_body = self
            .json_body
            .transpose()
            .map_err(|error| ClientError::RequestBodySerializationError { error })?;

        Ok(PreparedRequest {
            method: self.method,
            url,
            json_body,
        })
    }

    pub(crate) async fn send(self) -> ClientResult<ServerResponse> {
        let client = self.client;
        let request = self.prepare()?;

        client.execute(request).await
    }
}


fn build_request_url(server: &ApiServer, endpoint: &str) -> Result<Url, url::ParseError> {
    if !endpoint.starts_with('/') {
        Url::parse(&format!("{}/{}", server.base_url(), endpoint))
    } else {
        Url::parse(&format!("{}{}", server.base_url(), endpoint))
    }
}

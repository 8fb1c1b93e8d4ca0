use aprendia_core::{
    api_models::{error_details, Story, StoryCreationRequest, StoryCreationResponse},
    generation::GenerationParameters,
    ids::StoryId,
};
use reqwest::StatusCode;
use thiserror::Error;
use tracing::debug;

use crate::{
    errors::{ClientError, ClientResult},
    macros::{internal_server_error, unexpected_error_detail, unexpected_status_code},
    request::RequestBuilder,
    Client,
    HttpClient,
};



pub struct StoryToCreate {
    /// The backend accepts an empty title; `None` is sent as one.
    pub title: Option<String>,

    pub source_locale: String,

    pub target_locale: String,

    pub generation: GenerationParameters,
}



#[derive(Debug, Error)]
pub enum StoryCreationError {
    #[error("the backend rejected the story parameters: {}", .detail)]
    InvalidRequest { detail: String },

    #[error(transparent)]
    ClientError {
        #[from]
        error: ClientError,
    },
}


#[derive(Debug, Error)]
pub enum StoryFetchingError {
    #[error("story does not exist")]
    NotFound,

    #[error(transparent)]
    ClientError {
        #[from]
        error: ClientError,
    },
}



async fn get_stories<C>(client: &C) -> ClientResult<Vec<Story>>
where
    C: HttpClient,
{
    let response = RequestBuilder::get(client)
        .endpoint_url("/stories")
        .send()
        .await?;

    let response_status = response.status();


    if response_status == StatusCode::OK {
        response.json::<Vec<Story>>().await
    } else if response_status == StatusCode::INTERNAL_SERVER_ERROR {
        internal_server_error!()
    } else {
        unexpected_status_code!(response_status)
    }
}


async fn get_story_by_id<C>(client: &C, story_id: StoryId) -> ClientResult<Story, StoryFetchingError>
where
    C: HttpClient,
{
    let response = RequestBuilder::get(client)
        .endpoint_url(format!("/stories/{}", story_id))
        .send()
        .await?;

    let response_status = response.status();


    if response_status == StatusCode::OK {
        Ok(response.json::<Story>().await?)
    } else if response_status == StatusCode::NOT_FOUND {
        let error_response = response.error_response().await?;

        if error_response.detail_is(error_details::STORY_NOT_FOUND) {
            Err(StoryFetchingError::NotFound)
        } else {
            unexpected_error_detail!(error_response, response_status)
        }
    } else if response_status == StatusCode::INTERNAL_SERVER_ERROR {
        internal_server_error!()
    } else {
        unexpected_status_code!(response_status)
    }
}


async fn create_story<C>(
    client: &C,
    story: StoryToCreate,
) -> ClientResult<StoryCreationResponse, StoryCreationError>
where
    C: HttpClient,
{
    let response = RequestBuilder::post(client)
        .endpoint_url("/stories")
        .json(&StoryCreationRequest {
            title: story.title.unwrap_or_default(),
            source_locale: story.source_locale,
            target_locale: story.target_locale,
            generation: story.generation,
        })
        .send()
        .await?;

    let response_status = response.status();


    if response_status == StatusCode::OK {
        let response_data = response.json::<StoryCreationResponse>().await?;

        debug!(
            story_id = %response_data.story.id,
            chapter_id = %response_data.chapter_id,
            "Story created, first chapter queued for generation."
        );

        Ok(response_data)
    } else if response_status == StatusCode::UNPROCESSABLE_ENTITY {
        let error_response = response.error_response().await?;

        Err(StoryCreationError::InvalidRequest {
            detail: error_response.detail.to_string(),
        })
    } else if response_status == StatusCode::INTERNAL_SERVER_ERROR {
        internal_server_error!()
    } else {
        unexpected_status_code!(response_status)
    }
}



pub struct StoriesApi<'c> {
    client: &'c Client,
}

impl<'c> StoriesApi<'c> {
    pub(crate) fn new(client: &'c Client) -> Self {
        Self { client }
    }

    pub async fn get_stories(&self) -> ClientResult<Vec<Story>> {
        get_stories(self.client).await
    }

    pub async fn get_story_by_id(&self, story_id: StoryId) -> ClientResult<Story, StoryFetchingError> {
        get_story_by_id(self.client, story_id).await
    }

    /// Creates a story; the backend immediately starts generating its first chapter,
    /// whose id is part of the response.
    pub async fn create_story(
        &self,
        story: StoryToCreate,
    ) -> ClientResult<StoryCreationResponse, StoryCreationError> {
        create_story(self.client, story).await
    }
}

use aprendia_core::{
    api_models::{
        error_details,
        Studiable,
        StudiableCreationRequest,
        StudiableCreationResponse,
    },
    generation::GenerationParameters,
    ids::{StoryId, StudiableId},
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



pub enum StudiableToCreate {
    /// The next chapter of the story; the backend numbers it and continues the narrative.
    Chapter { generation: GenerationParameters },

    /// A quiz generated from an existing, ready chapter.
    Quiz { parent_chapter_id: StudiableId },
}



#[derive(Debug, Error)]
pub enum StudiableListingError {
    #[error("story does not exist")]
    StoryNotFound,

    #[error(transparent)]
    ClientError {
        #[from]
        error: ClientError,
    },
}


#[derive(Debug, Error)]
pub enum StudiableFetchingError {
    #[error("studiable does not exist")]
    NotFound,

    #[error(transparent)]
    ClientError {
        #[from]
        error: ClientError,
    },
}


#[derive(Debug, Error)]
pub enum StudiableCreationError {
    #[error("story does not exist")]
    StoryNotFound,

    #[error("parent chapter does not exist")]
    ParentChapterNotFound,

    #[error("the backend rejected the studiable parameters: {}", .detail)]
    InvalidRequest { detail: String },

    #[error(transparent)]
    ClientError {
        #[from]
        error: ClientError,
    },
}



async fn get_studiables_for_story<C>(
    client: &C,
    story_id: StoryId,
) -> ClientResult<Vec<Studiable>, StudiableListingError>
where
    C: HttpClient,
{
    let response = RequestBuilder::get(client)
        .endpoint_url(format!("/stories/{}/studiables", story_id))
        .send()
        .await?;

    let response_status = response.status();


    if response_status == StatusCode::OK {
        Ok(response.json::<Vec<Studiable>>().await?)
    } else if response_status == StatusCode::NOT_FOUND {
        let error_response = response.error_response().await?;

        if error_response.detail_is(error_details::STORY_NOT_FOUND) {
            Err(StudiableListingError::StoryNotFound)
        } else {
            unexpected_error_detail!(error_response, response_status)
        }
    } else if response_status == StatusCode::INTERNAL_SERVER_ERROR {
        internal_server_error!()
    } else {
        unexpected_status_code!(response_status)
    }
}


async fn get_studiable_by_id<C>(
    client: &C,
    studiable_id: StudiableId,
) -> ClientResult<Studiable, StudiableFetchingError>
where
    C: HttpClient,
{
    let response = RequestBuilder::get(client)
        .endpoint_url(format!("/studiables/{}", studiable_id))
        .send()
        .await?;

    let response_status = response.status();


    if response_status == StatusCode::OK {
        Ok(response.json::<Studiable>().await?)
    } else if response_status == StatusCode::NOT_FOUND {
        let error_response = response.error_response().await?;

        if error_response.detail_is(error_details::STUDIABLE_NOT_FOUND) {
            Err(StudiableFetchingError::NotFound)
        } else {
            unexpected_error_detail!(error_response, response_status)
        }
    } else if response_status == StatusCode::INTERNAL_SERVER_ERROR {
        internal_server_error!()
    } else {
        unexpected_status_code!(response_status)
    }
}


async fn create_studiable<C>(
    client: &C,
    story_id: StoryId,
    studiable: StudiableToCreate,
) -> ClientResult<StudiableId, StudiableCreationError>
where
    C: HttpClient,
{
    let creation_request = match studiable {
        StudiableToCreate::Chapter { generation } => StudiableCreationRequest::Chapter(generation),
        StudiableToCreate::Quiz { parent_chapter_id } => StudiableCreationRequest::Quiz {
            parent_studiable_id: parent_chapter_id,
        },
    };

    let response = RequestBuilder::post(client)
        .endpoint_url(format!("/stories/{}/studiables", story_id))
        .json(&creation_request)
        .send()
        .await?;

    let response_status = response.status();


    if response_status == StatusCode::OK {
        let response_data = response.json::<StudiableCreationResponse>().await?;

        debug!(
            story_id = %story_id,
            studiable_id = %response_data.studiable_id,
            "Studiable queued for generation."
        );

        Ok(response_data.studiable_id)
    } else if response_status == StatusCode::NOT_FOUND {
        let error_response = response.error_response().await?;

        if error_response.detail_is(error_details::STORY_NOT_FOUND) {
            Err(StudiableCreationError::StoryNotFound)
        } else if error_response.detail_is(error_details::PARENT_CHAPTER_NOT_FOUND) {
            Err(StudiableCreationError::ParentChapterNotFound)
        } else {
            unexpected_error_detail!(error_response, response_status)
        }
    } else if response_status == StatusCode::BAD_REQUEST
        || response_status == StatusCode::UNPROCESSABLE_ENTITY
    {
        let error_response = response.error_response().await?;

        Err(StudiableCreationError::InvalidRequest {
            detail: error_response
                .detail_message()
                .map(str::to_string)
                .unwrap_or_else(|| error_response.detail.to_string()),
        })
    } else if response_status == StatusCode::INTERNAL_SERVER_ERROR {
        internal_server_error!()
    } else {
        unexpected_status_code!(response_status)
    }
}



pub struct StudiablesApi<'c> {
    client: &'c Client,
}

impl<'c> StudiablesApi<'c> {
    pub(crate) fn new(client: &'c Client) -> Self {
        Self { client }
    }

    /// Lists every chapter and quiz of a story, including ones still being generated
    /// (those have no sentences yet).
    pub async fn get_studiables_for_story(
        &self,
        story_id: StoryId,
    ) -> ClientResult<Vec<Studiable>, StudiableListingError> {
        get_studiables_for_story(self.client, story_id).await
    }

    pub async fn get_studiable_by_id(
        &self,
        studiable_id: StudiableId,
    ) -> ClientResult<Studiable, StudiableFetchingError> {
        get_studiable_by_id(self.client, studiable_id).await
    }

    /// Queues generation of a new studiable and returns its id right away.
    /// Its sentences stay empty until generation finishes.
    pub async fn create_studiable(
        &self,
        story_id: StoryId,
        studiable: StudiableToCreate,
    ) -> ClientResult<StudiableId, StudiableCreationError> {
        create_studiable(self.client, story_id, studiable).await
    }
}

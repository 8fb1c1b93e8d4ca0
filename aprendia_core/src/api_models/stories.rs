use serde::{Deserialize, Serialize};

use crate::{
    generation::{GenerationParameters, LanguageLevel},
    ids::{StoryId, StudiableId},
};


/// Generation settings remembered on a story; used as defaults for later chapters.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug, Default)]
pub struct StoryMetadata {
    pub language_level: Option<LanguageLevel>,

    pub age_level: Option<String>,

    pub topic: Option<String>,
}


/// A paired source/target-language narrative. Owns zero or more studiables.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct Story {
    pub id: StoryId,

    pub title: String,

    /// Locale of the language the learner already knows, e.g. `en-US`.
    pub source_locale: String,

    /// Locale of the language being learned, e.g. `es-ES`.
    pub target_locale: String,

    #[serde(default)]
    pub metadata: StoryMetadata,
}



#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct StoryCreationRequest {
    pub title: String,

    pub source_locale: String,

    pub target_locale: String,

    #[serde(flatten)]
    pub generation: GenerationParameters,
}


/// Generation state reported by creation endpoints. The backend only ever
/// reports that work has been queued; readiness is observed by polling.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    Processing,
}


/// Creating a story also queues generation of its first chapter.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct StoryCreationResponse {
    pub story: Story,

    pub chapter_id: StudiableId,

    pub status: GenerationStatus,
}

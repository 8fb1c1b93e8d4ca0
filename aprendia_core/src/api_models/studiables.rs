use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull, NoneAsEmptyString};

use crate::{
    generation::{GenerationParameters, LanguageLevel},
    ids::{SentenceId, StoryId, StudiableId},
};


#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[serde(rename_all = "lowercase")]
pub enum StudiableKind {
    Chapter,
    Quiz,
}

impl Display for StudiableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StudiableKind::Chapter => f.pad("chapter"),
            StudiableKind::Quiz => f.pad("quiz"),
        }
    }
}



/// One card worth of content: a sentence in both languages, plus optional audio.
///
/// Audio paths are relative to the backend origin. The backend encodes
/// "no audio" as an empty string; both that and `null` become `None` here.
#[serde_as]
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct SentencePair {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SentenceId>,

    pub source_text: String,

    pub target_text: String,

    #[serde_as(as = "DefaultOnNull<NoneAsEmptyString>")]
    #[serde(default)]
    pub source_audio: Option<String>,

    #[serde_as(as = "DefaultOnNull<NoneAsEmptyString>")]
    #[serde(default)]
    pub target_audio: Option<String>,

    #[serde(default)]
    pub order: u32,
}

impl SentencePair {
    pub fn new<S, T>(source_text: S, target_text: T) -> Self
    where
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            id: None,
            source_text: source_text.into(),
            target_text: target_text.into(),
            source_audio: None,
            target_audio: None,
            order: 0,
        }
    }

    pub fn with_audio<S, T>(mut self, source_audio: Option<S>, target_audio: Option<T>) -> Self
    where
        S: Into<String>,
        T: Into<String>,
    {
        self.source_audio = source_audio.map(Into::into);
        self.target_audio = target_audio.map(Into::into);
        self
    }
}



#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct StudiableMetadata {
    #[serde(rename = "type")]
    pub kind: StudiableKind,

    pub chapter_number: Option<u32>,

    /// The chapter a quiz was generated from.
    pub parent_studiable_id: Option<StudiableId>,

    pub language_level: Option<LanguageLevel>,

    pub age_level: Option<String>,

    pub topic: Option<String>,

    pub conversation_type: Option<String>,

    pub min_sentence_length: Option<u8>,

    pub max_sentence_length: Option<u8>,

    /// Set by the backend when generation raised an error. An errored studiable
    /// still has no sentences, so it looks exactly like one that is pending.
    pub error: Option<String>,
}

impl StudiableMetadata {
    pub fn new(kind: StudiableKind) -> Self {
        Self {
            kind,
            chapter_number: None,
            parent_studiable_id: None,
            language_level: None,
            age_level: None,
            topic: None,
            conversation_type: None,
            min_sentence_length: None,
            max_sentence_length: None,
            error: None,
        }
    }
}


/// A generated unit of study content (chapter or quiz).
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct Studiable {
    pub id: StudiableId,

    pub story_id: StoryId,

    pub title: String,

    pub metadata: StudiableMetadata,

    #[serde(default)]
    pub sentences: Vec<SentencePair>,
}

impl Studiable {
    #[inline]
    pub fn kind(&self) -> StudiableKind {
        self.metadata.kind
    }

    /// A studiable is ready once it has at least one sentence.
    /// This cannot tell "still generating" apart from "generation produced nothing".
    #[inline]
    pub fn is_ready(&self) -> bool {
        !self.sentences.is_empty()
    }

    #[inline]
    pub fn generation_error(&self) -> Option<&str> {
        self.metadata.error.as_deref()
    }
}



#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StudiableCreationRequest {
    Chapter(GenerationParameters),

    Quiz {
        parent_studiable_id: StudiableId,
    },
}


#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct StudiableCreationResponse {
    pub studiable_id: StudiableId,

    pub status: super::GenerationStatus,
}



#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn deserializes_pending_studiable_from_listing() {
        let studiable: Studiable = serde_json::from_value(json!({
            "id": 3,
            "story_id": 1,
            "title": "Chapter 2",
            "raw_text": "",
            "metadata": {
                "type": "chapter",
                "chapter_number": 2,
                "language_level": "A2",
                "age_level": "college",
                "topic": "travel",
                "conversation_type": "dialogue",
                "min_sentence_length": 5,
                "max_sentence_length": 15
            },
            "sentences": []
        }))
        .unwrap();

        assert_eq!(studiable.kind(), StudiableKind::Chapter);
        assert_eq!(studiable.metadata.chapter_number, Some(2));
        assert_eq!(
            studiable.metadata.language_level,
            Some(LanguageLevel::A2)
        );
        assert!(!studiable.is_ready());
        assert_eq!(studiable.generation_error(), None);
    }

    #[test]
    fn empty_and_null_audio_paths_are_absent() {
        let sentences: Vec<SentencePair> = serde_json::from_value(json!([
            {
                "id": 1,
                "source_text": "Hello.",
                "target_text": "Hola.",
                "source_audio": "",
                "target_audio": "/audio/es-ES/es-ES_0a1b.mp3",
                "order": 0
            },
            {
                "source_text": "Goodbye.",
                "target_text": "Adiós.",
                "source_audio": null
            }
        ]))
        .unwrap();

        assert_eq!(sentences[0].source_audio, None);
        assert_eq!(
            sentences[0].target_audio.as_deref(),
            Some("/audio/es-ES/es-ES_0a1b.mp3")
        );
        assert_eq!(sentences[1].source_audio, None);
        assert_eq!(sentences[1].target_audio, None);
        assert_eq!(sentences[1].id, None);
    }

    #[test]
    fn errored_quiz_exposes_generation_error() {
        let studiable: Studiable = serde_json::from_value(json!({
            "id": 9,
            "story_id": 1,
            "title": "Quiz for Chapter 1",
            "metadata": {
                "type": "quiz",
                "parent_studiable_id": 2,
                "language_level": null,
                "error": "Parent chapter has no sentences"
            }
        }))
        .unwrap();

        assert_eq!(studiable.kind(), StudiableKind::Quiz);
        assert_eq!(
            studiable.metadata.parent_studiable_id,
            Some(StudiableId::new(2))
        );
        assert_eq!(
            studiable.generation_error(),
            Some("Parent chapter has no sentences")
        );
        assert!(!studiable.is_ready());
    }

    #[test]
    fn creation_requests_are_tagged_by_type() {
        let quiz_request = StudiableCreationRequest::Quiz {
            parent_studiable_id: StudiableId::new(4),
        };

        assert_eq!(
            serde_json::to_value(&quiz_request).unwrap(),
            json!({ "type": "quiz", "parent_studiable_id": 4 })
        );

        let chapter_request = StudiableCreationRequest::Chapter(GenerationParameters {
            language_level: LanguageLevel::B1,
            age_level: "adult".to_string(),
            topic: "cooking".to_string(),
            conversation_type: "narrative".to_string(),
            min_sentence_length: 4,
            max_sentence_length: 12,
        });

        assert_eq!(
            serde_json::to_value(&chapter_request).unwrap(),
            json!({
                "type": "chapter",
                "language_level": "B1",
                "age_level": "adult",
                "topic": "cooking",
                "conversation_type": "narrative",
                "min_sentence_length": 4,
                "max_sentence_length": 12
            })
        );
    }
}

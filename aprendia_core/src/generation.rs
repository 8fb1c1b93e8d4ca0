//! Parameters the content-generation backend accepts when asked for a new story or chapter.
//!
//! The limits declared here are advisory: the backend uses them to steer generation,
//! and only input layers (e.g. the command-line frontend) enforce them.

use std::{fmt::Display, ops::RangeInclusive, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;


/// Accepted range for the minimum number of words per generated sentence.
pub const MIN_SENTENCE_LENGTH_RANGE: RangeInclusive<u8> = 3..=7;

/// Accepted range for the maximum number of words per generated sentence.
pub const MAX_SENTENCE_LENGTH_RANGE: RangeInclusive<u8> = 5..=20;



/// CEFR language level of generated content.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum LanguageLevel {
    A1,
    A2,
    B1,
    B2,
}

impl LanguageLevel {
    pub const ALL: [LanguageLevel; 4] = [Self::A1, Self::A2, Self::B1, Self::B2];

    pub const fn as_str(&self) -> &'static str {
        match self {
            LanguageLevel::A1 => "A1",
            LanguageLevel::A2 => "A2",
            LanguageLevel::B1 => "B1",
            LanguageLevel::B2 => "B2",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            LanguageLevel::A1 => "beginner",
            LanguageLevel::A2 => "elementary",
            LanguageLevel::B1 => "intermediate",
            LanguageLevel::B2 => "upper intermediate",
        }
    }
}

impl Display for LanguageLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}


#[derive(Debug, Error, PartialEq, Eq)]
#[error("\"{}\" is not a supported language level (expected one of A1, A2, B1, B2)", .input)]
pub struct InvalidLanguageLevel {
    pub input: String,
}

impl FromStr for LanguageLevel {
    type Err = InvalidLanguageLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized_input = s.trim();

        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(normalized_input))
            .ok_or_else(|| InvalidLanguageLevel {
                input: s.to_string(),
            })
    }
}



/// Generation settings shared by story creation and chapter creation.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct GenerationParameters {
    pub language_level: LanguageLevel,

    /// Free-form audience hint, e.g. `"college"`.
    pub age_level: String,

    pub topic: String,

    /// Free-form style hint, e.g. `"dialogue"` or `"narrative"`.
    pub conversation_type: String,

    pub min_sentence_length: u8,

    pub max_sentence_length: u8,
}

impl GenerationParameters {
    /// Returns `true` if the sentence length bounds fall inside the ranges
    /// the backend documents. Nothing in the core rejects parameters
    /// for which this is `false`.
    pub fn sentence_lengths_within_advisory_limits(&self) -> bool {
        MIN_SENTENCE_LENGTH_RANGE.contains(&self.min_sentence_length)
            && MAX_SENTENCE_LENGTH_RANGE.contains(&self.max_sentence_length)
            && self.min_sentence_length <= self.max_sentence_length
    }
}

//! Command-line interface definitions.

use std::path::PathBuf;

use aprendia_core::{
    generation::{
        GenerationParameters,
        LanguageLevel,
        MAX_SENTENCE_LENGTH_RANGE,
        MIN_SENTENCE_LENGTH_RANGE,
    },
    ids::{StoryId, StudiableId},
};
use clap::{Args, Parser, Subcommand};


#[derive(Parser)]
#[command(
    name = "aprendia",
    author,
    about = "Create language-learning stories and study their sentences as audio flashcards.",
    version
)]
pub struct CLIArgs {
    /// This is the path to the configuration file to use.
    /// If unspecified, this defaults to `./data/configuration.toml`.
    #[arg(
        short = 'c',
        long = "configurationFilePath",
        global = true,
        help = "Path to the configuration file to use. Defaults to ./data/configuration.toml"
    )]
    pub configuration_file_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CLICommand,
}


#[derive(Subcommand)]
pub enum CLICommand {
    /// Check whether the backend is up.
    Health,

    /// List, inspect and create stories.
    #[command(subcommand)]
    Stories(StoriesCommand),

    /// List and create chapters and quizzes of a story.
    #[command(subcommand)]
    Studiables(StudiablesCommand),

    /// Study a chapter or quiz as flashcards, waiting for it to be generated if needed.
    Study {
        studiable_id: StudiableId,
    },
}


#[derive(Subcommand)]
pub enum StoriesCommand {
    List,

    Show {
        story_id: StoryId,
    },

    /// Create a new story. Its first chapter starts generating right away.
    Create(StoryCreationArgs),
}


#[derive(Subcommand)]
pub enum StudiablesCommand {
    List {
        story_id: StoryId,

        /// Keep refreshing until none of the story's studiables are still generating.
        #[arg(long)]
        watch: bool,
    },

    /// Generate the next chapter of a story.
    CreateChapter {
        story_id: StoryId,

        #[command(flatten)]
        generation: GenerationArgs,
    },

    /// Generate a quiz from an existing chapter.
    CreateQuiz {
        story_id: StoryId,

        #[arg(long = "chapter")]
        parent_chapter_id: StudiableId,
    },

    /// Wait until a studiable has finished generating.
    Wait {
        studiable_id: StudiableId,
    },
}


#[derive(Args)]
pub struct StoryCreationArgs {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long, default_value = "en-US")]
    pub source_locale: String,

    #[arg(long, default_value = "es-ES")]
    pub target_locale: String,

    #[command(flatten)]
    pub generation: GenerationArgs,
}


#[derive(Args)]
pub struct GenerationArgs {
    /// CEFR level: A1, A2, B1 or B2.
    #[arg(long, default_value = "A1")]
    pub language_level: LanguageLevel,

    #[arg(long, default_value = "college")]
    pub age_level: String,

    #[arg(long, default_value = "travel")]
    pub topic: String,

    #[arg(long, default_value = "dialogue")]
    pub conversation_type: String,

    /// Shortest sentence to generate, in words (3 to 7).
    #[arg(long, default_value_t = 5, value_parser = parse_min_sentence_length)]
    pub min_sentence_length: u8,

    /// Longest sentence to generate, in words (5 to 20).
    #[arg(long, default_value_t = 15, value_parser = parse_max_sentence_length)]
    pub max_sentence_length: u8,
}

impl From<GenerationArgs> for GenerationParameters {
    fn from(arguments: GenerationArgs) -> Self {
        Self {
            language_level: arguments.language_level,
            age_level: arguments.age_level,
            topic: arguments.topic,
            conversation_type: arguments.conversation_type,
            min_sentence_length: arguments.min_sentence_length,
            max_sentence_length: arguments.max_sentence_length,
        }
    }
}


fn parse_sentence_length(
    input: &str,
    allowed_range: std::ops::RangeInclusive<u8>,
) -> Result<u8, String> {
    let length = input
        .trim()
        .parse::<u8>()
        .map_err(|error| format!("not a valid length: {}", error))?;

    if !allowed_range.contains(&length) {
        return Err(format!(
            "must be between {} and {}",
            allowed_range.start(),
            allowed_range.end()
        ));
    }

    Ok(length)
}

fn parse_min_sentence_length(input: &str) -> Result<u8, String> {
    parse_sentence_length(input, MIN_SENTENCE_LENGTH_RANGE)
}

fn parse_max_sentence_length(input: &str) -> Result<u8, String> {
    parse_sentence_length(input, MAX_SENTENCE_LENGTH_RANGE)
}



#[cfg(test)]
mod test {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        CLIArgs::command().debug_assert();
    }

    #[test]
    fn story_creation_uses_defaults() {
        let arguments = CLIArgs::try_parse_from(["aprendia", "stories", "create"]).unwrap();

        let CLICommand::Stories(StoriesCommand::Create(story)) = arguments.command else {
            panic!("expected stories create");
        };

        assert_eq!(story.source_locale, "en-US");
        assert_eq!(story.target_locale, "es-ES");

        let generation = GenerationParameters::from(story.generation);
        assert_eq!(generation.language_level, LanguageLevel::A1);
        assert_eq!(generation.min_sentence_length, 5);
        assert_eq!(generation.max_sentence_length, 15);
    }

    #[test]
    fn sentence_lengths_outside_advisory_limits_are_rejected() {
        assert!(CLIArgs::try_parse_from([
            "aprendia",
            "studiables",
            "create-chapter",
            "1",
            "--min-sentence-length",
            "2",
        ])
        .is_err());

        assert!(CLIArgs::try_parse_from([
            "aprendia",
            "studiables",
            "create-chapter",
            "1",
            "--max-sentence-length",
            "21",
        ])
        .is_err());
    }

    #[test]
    fn unknown_language_level_is_rejected() {
        assert!(CLIArgs::try_parse_from([
            "aprendia",
            "stories",
            "create",
            "--language-level",
            "C2",
        ])
        .is_err());
    }

    #[test]
    fn configuration_path_is_global() {
        let arguments =
            CLIArgs::try_parse_from(["aprendia", "study", "7", "-c", "./other.toml"]).unwrap();

        assert_eq!(
            arguments.configuration_file_path,
            Some(PathBuf::from("./other.toml"))
        );
        assert!(matches!(
            arguments.command,
            CLICommand::Study { studiable_id } if studiable_id == StudiableId::new(7)
        ));
    }
}

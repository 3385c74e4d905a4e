use serde::{Deserialize, Serialize};

/// Preference axis a question belongs to.
///
/// The set is closed: every category has a dedicated scorer and a fixed
/// weight, so adding a variant without handling it is a compile error rather
/// than a silent fall-through to a neutral score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    Genre,
    Mood,
    Era,
    Length,
    Rating,
    Platform,
    /// Retired axis. Older answer data may still reference it, so it stays
    /// deserializable, but it carries no weight and emits no filter keys.
    Language,
}

impl QuestionCategory {
    /// Parses the wire/database representation of a category
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "genre" => Some(Self::Genre),
            "mood" => Some(Self::Mood),
            "era" => Some(Self::Era),
            "length" => Some(Self::Length),
            "rating" => Some(Self::Rating),
            "platform" => Some(Self::Platform),
            "language" => Some(Self::Language),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Genre => "genre",
            Self::Mood => "mood",
            Self::Era => "era",
            Self::Length => "length",
            Self::Rating => "rating",
            Self::Platform => "platform",
            Self::Language => "language",
        }
    }
}

/// How a question is presented and answered
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    SingleChoice,
    MultiChoice,
    Slider,
}

impl QuestionType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "single_choice" => Some(Self::SingleChoice),
            "multi_choice" => Some(Self::MultiChoice),
            "slider" => Some(Self::Slider),
            _ => None,
        }
    }
}

/// One selectable value within a question
///
/// `value` is the wire-level selection key stored in answers. Genre options
/// map to a TMDB genre id and platform options to a TMDB watch-provider id;
/// options of other categories are resolved through fixed internal tables
/// and carry no mapping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuestionOption {
    pub value: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmdb_genre_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<u32>,
}

/// A catalog question: immutable reference data seeded once and never
/// mutated by the engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Question {
    pub id: i32,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub category: QuestionCategory,
    pub options: Vec<QuestionOption>,
    pub display_order: i32,
}

impl Question {
    /// Resolves selected option values to TMDB genre ids
    pub fn genre_ids_for(&self, values: &[String]) -> Vec<u32> {
        self.options
            .iter()
            .filter(|opt| values.contains(&opt.value))
            .filter_map(|opt| opt.tmdb_genre_id)
            .collect()
    }

    /// Resolves selected option values to TMDB watch-provider ids
    pub fn provider_ids_for(&self, values: &[String]) -> Vec<u32> {
        self.options
            .iter()
            .filter(|opt| values.contains(&opt.value))
            .filter_map(|opt| opt.provider_id)
            .collect()
    }
}

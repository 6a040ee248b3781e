//! Core data model types for pairmatch.
//!
//! These are the types that travel inside a share code: questions, the two
//! participants' profiles and answers, and the narrative bands used to phrase
//! the final score.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Chosen option per question id.
///
/// A `BTreeMap` keeps the encoded form deterministic regardless of the order
/// in which answers were recorded.
pub type Answers = BTreeMap<u32, String>;

/// Serde adapter for [`Answers`] that reads question ids from string keys.
///
/// JSON object keys are always strings, and a flattened struct buffers them
/// before the map visitor sees them, so the integer conversion happens here.
pub mod answer_keys {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;

    use super::Answers;

    pub fn serialize<S: Serializer>(answers: &Answers, serializer: S) -> Result<S::Ok, S::Error> {
        answers.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Answers, D::Error> {
        let raw = BTreeMap::<String, String>::deserialize(deserializer)?;
        raw.into_iter()
            .map(|(k, v)| {
                k.trim()
                    .parse::<u32>()
                    .map(|id| (id, v))
                    .map_err(|_| D::Error::custom(format!("invalid question id key: {k}")))
            })
            .collect()
    }
}

/// A single quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Identifier, unique within a question list.
    pub id: u32,
    /// Category label (e.g. "Lifestyle").
    #[serde(default)]
    pub category: String,
    /// Prompt text shown to both participants.
    pub text: String,
    /// Ordered answer options.
    pub options: Vec<String>,
    /// Inactive questions are skipped by the questionnaire and by scoring.
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

impl Question {
    pub fn new(id: u32, category: &str, text: &str, options: &[&str]) -> Self {
        Self {
            id,
            category: category.to_string(),
            text: text.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            active: true,
        }
    }
}

/// Relationship type a participant describes themselves in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipType {
    Dating,
    Engaged,
    Married,
    Friends,
    Other,
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationshipType::Dating => write!(f, "dating"),
            RelationshipType::Engaged => write!(f, "engaged"),
            RelationshipType::Married => write!(f, "married"),
            RelationshipType::Friends => write!(f, "friends"),
            RelationshipType::Other => write!(f, "other"),
        }
    }
}

impl FromStr for RelationshipType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dating" | "couple" => Ok(RelationshipType::Dating),
            "engaged" => Ok(RelationshipType::Engaged),
            "married" => Ok(RelationshipType::Married),
            "friends" | "friendship" => Ok(RelationshipType::Friends),
            "other" => Ok(RelationshipType::Other),
            other => Err(format!("unknown relationship type: {other}")),
        }
    }
}

/// A participant's self-description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: String,
    pub relationship_type: RelationshipType,
    /// Free-text answers to the profile's open prompts.
    #[serde(default)]
    pub reflections: Vec<String>,
}

/// Which fixed band a percentage falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    #[serde(rename = "range0_25")]
    Range0To25,
    #[serde(rename = "range26_50")]
    Range26To50,
    #[serde(rename = "range51_75")]
    Range51To75,
    #[serde(rename = "range76_100")]
    Range76To100,
}

impl Band {
    /// Band containing `percentage`. Values above 100 land in the top band.
    pub fn for_percentage(percentage: u8) -> Self {
        match percentage {
            0..=25 => Band::Range0To25,
            26..=50 => Band::Range26To50,
            51..=75 => Band::Range51To75,
            _ => Band::Range76To100,
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Band::Range0To25 => write!(f, "0-25%"),
            Band::Range26To50 => write!(f, "26-50%"),
            Band::Range51To75 => write!(f, "51-75%"),
            Band::Range76To100 => write!(f, "76-100%"),
        }
    }
}

/// Feedback text for each of the four fixed percentage ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeBands {
    #[serde(rename = "range0_25")]
    pub range_0_25: String,
    #[serde(rename = "range26_50")]
    pub range_26_50: String,
    #[serde(rename = "range51_75")]
    pub range_51_75: String,
    #[serde(rename = "range76_100")]
    pub range_76_100: String,
}

impl NarrativeBands {
    pub fn text(&self, band: Band) -> &str {
        match band {
            Band::Range0To25 => &self.range_0_25,
            Band::Range26To50 => &self.range_26_50,
            Band::Range51To75 => &self.range_51_75,
            Band::Range76To100 => &self.range_76_100,
        }
    }
}

impl Default for NarrativeBands {
    fn default() -> Self {
        Self {
            range_0_25: "You see the world very differently. Plenty to talk about!".into(),
            range_26_50: "Some common ground, and a lot still to discover about each other.".into(),
            range_51_75: "A solid match. You agree on most of what matters.".into(),
            range_76_100: "Remarkably in sync. You know each other well.".into(),
        }
    }
}

/// The question set, title and bands a creator is about to answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSetup {
    pub title: String,
    pub questions: Vec<Question>,
    pub bands: NarrativeBands,
    #[serde(default)]
    pub template_id: Option<String>,
}

impl QuizSetup {
    /// Freeze the setup with the creator's half into a shareable session.
    pub fn into_session(
        self,
        creator_profile: Profile,
        creator_answers: Answers,
        created_at: Option<DateTime<Utc>>,
    ) -> SessionData {
        SessionData {
            creator_profile,
            creator_answers,
            questions: self.questions,
            quiz_title: self.title,
            narrative_bands: self.bands,
            template_id: self.template_id,
            created_at,
        }
    }

    pub fn active_questions(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(|q| q.active)
    }
}

/// The creator's finished half of a quiz, shared with the partner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub creator_profile: Profile,
    #[serde(with = "answer_keys")]
    pub creator_answers: Answers,
    pub questions: Vec<Question>,
    pub quiz_title: String,
    pub narrative_bands: NarrativeBands,
    /// Template the question list came from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl SessionData {
    /// Questions that take part in the quiz.
    pub fn active_questions(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(|q| q.active)
    }

    /// Combine with the partner's half into a terminal result.
    pub fn into_result(self, partner_profile: Profile, partner_answers: Answers) -> ResultData {
        ResultData {
            session: self,
            partner_profile,
            partner_answers,
            is_second_attempt: false,
        }
    }
}

/// A session plus the partner's answers. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultData {
    #[serde(flatten)]
    pub session: SessionData,
    pub partner_profile: Profile,
    #[serde(with = "answer_keys")]
    pub partner_answers: Answers,
    #[serde(default)]
    pub is_second_attempt: bool,
}

//! Participant answer files.
//!
//! ```toml
//! [profile]
//! name = "Ana"
//! age = 29
//! relationship_type = "dating"
//!
//! [answers]
//! 1 = "At home together"
//! 2 = "Night owl"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use pairmatch_core::model::{Answers, Profile, Question, RelationshipType};

#[derive(Debug, Deserialize)]
struct TomlAnswersFile {
    profile: TomlProfile,
    #[serde(default)]
    answers: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct TomlProfile {
    name: String,
    #[serde(default)]
    age: Option<u32>,
    #[serde(default)]
    gender: String,
    #[serde(default = "default_relationship")]
    relationship_type: String,
    #[serde(default)]
    reflections: Vec<String>,
}

fn default_relationship() -> String {
    "dating".to_string()
}

/// One participant's half, read from disk.
#[derive(Debug)]
pub struct Participant {
    pub profile: Profile,
    pub answers: Answers,
}

pub fn load(path: &Path) -> Result<Participant> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers file: {}", path.display()))?;
    parse_str(&content, path)
}

pub fn parse_str(content: &str, source_path: &Path) -> Result<Participant> {
    let parsed: TomlAnswersFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    anyhow::ensure!(!parsed.profile.name.trim().is_empty(), "profile name is empty");

    let relationship_type: RelationshipType = parsed
        .profile
        .relationship_type
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{}", e))?;

    let answers = parsed
        .answers
        .into_iter()
        .map(|(k, v)| {
            k.trim()
                .parse::<u32>()
                .map(|id| (id, v))
                .map_err(|_| anyhow::anyhow!("answer key '{k}' is not a question id"))
        })
        .collect::<Result<Answers>>()?;

    Ok(Participant {
        profile: Profile {
            name: parsed.profile.name,
            age: parsed.profile.age,
            gender: parsed.profile.gender,
            relationship_type,
            reflections: parsed.profile.reflections,
        },
        answers,
    })
}

/// Check answers against the active questions they are meant for.
///
/// Every answer must name an active question and one of its options.
/// Unanswered questions are allowed; they are logged and score as misses.
pub fn check_against(answers: &Answers, questions: &[Question]) -> Result<()> {
    for (id, answer) in answers {
        let question = questions
            .iter()
            .find(|q| q.id == *id && q.active)
            .ok_or_else(|| anyhow::anyhow!("question {id} is not part of this quiz"))?;
        anyhow::ensure!(
            question.options.contains(answer),
            "answer '{answer}' for question {id} is not one of: {}",
            question.options.join(", ")
        );
    }

    let unanswered: Vec<u32> = questions
        .iter()
        .filter(|q| q.active && !answers.contains_key(&q.id))
        .map(|q| q.id)
        .collect();
    if !unanswered.is_empty() {
        tracing::warn!("unanswered questions: {unanswered:?}");
    }
    Ok(())
}

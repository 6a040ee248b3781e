//! Predefined quiz templates and the in-memory registry.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{NarrativeBands, Question, QuizSetup};
use crate::traits::TemplateRegistry;

/// Id of the official quiz shipped with the binary.
pub const CLASSIC_TEMPLATE_ID: &str = "classic";

/// A named question set that sessions can reference by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizTemplate {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub questions: Vec<Question>,
    #[serde(default)]
    pub bands: NarrativeBands,
}

impl QuizTemplate {
    /// A fresh setup for a creator starting this template.
    pub fn setup(&self) -> QuizSetup {
        QuizSetup {
            title: self.title.clone(),
            questions: self.questions.clone(),
            bands: self.bands.clone(),
            template_id: Some(self.id.clone()),
        }
    }
}

/// Registry backed by a map, ordered by template id.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    templates: BTreeMap<String, QuizTemplate>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding only the built-in templates.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.insert(classic_template());
        registry
    }

    /// Add or replace a template. Returns the template it replaced, if any.
    pub fn insert(&mut self, template: QuizTemplate) -> Option<QuizTemplate> {
        self.templates.insert(template.id.clone(), template)
    }

    pub fn extend(&mut self, templates: impl IntoIterator<Item = QuizTemplate>) {
        for t in templates {
            if let Some(old) = self.insert(t) {
                tracing::debug!("template '{}' overridden", old.id);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl TemplateRegistry for StaticRegistry {
    fn resolve(&self, id: &str) -> Option<&QuizTemplate> {
        self.templates.get(id)
    }

    fn templates(&self) -> Vec<&QuizTemplate> {
        self.templates.values().collect()
    }
}

/// The official quiz.
pub fn classic_template() -> QuizTemplate {
    let questions = vec![
        Question::new(
            1,
            "Lifestyle",
            "What does a perfect weekend look like?",
            &["Out with friends", "At home together", "Travelling somewhere new", "A bit of everything"],
        ),
        Question::new(
            2,
            "Lifestyle",
            "Morning person or night owl?",
            &["Morning person", "Night owl", "Depends on the day"],
        ),
        Question::new(
            3,
            "Communication",
            "How do you prefer to settle a disagreement?",
            &["Talk it out right away", "Take space, then talk", "Write it down", "Let it go"],
        ),
        Question::new(
            4,
            "Communication",
            "Which love language matters most to you?",
            &["Words of affirmation", "Quality time", "Acts of service", "Gifts", "Physical touch"],
        ),
        Question::new(
            5,
            "Finances",
            "How should a couple handle money?",
            &["Fully shared", "Partly shared", "Completely separate"],
        ),
        Question::new(
            6,
            "Finances",
            "Save or spend?",
            &["Save first", "Spend on experiences", "Balance both"],
        ),
        Question::new(
            7,
            "Future",
            "Where would you like to live in ten years?",
            &["Big city", "Small town", "Countryside", "Abroad"],
        ),
        Question::new(
            8,
            "Future",
            "How do you feel about having children?",
            &["Definitely yes", "Maybe someday", "Not for me", "Undecided"],
        ),
        Question::new(
            9,
            "Home",
            "How tidy should home be?",
            &["Spotless", "Organised chaos", "Lived-in"],
        ),
        Question::new(
            10,
            "Home",
            "Pets?",
            &["Dogs", "Cats", "Both", "None"],
        ),
    ];

    QuizTemplate {
        id: CLASSIC_TEMPLATE_ID.to_string(),
        title: "How well do you match?".to_string(),
        description: "The original ten-question compatibility quiz.".to_string(),
        questions,
        bands: NarrativeBands::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_resolves_classic() {
        let registry = StaticRegistry::builtin();
        let classic = registry.resolve(CLASSIC_TEMPLATE_ID).unwrap();
        assert_eq!(classic.questions.len(), 10);
        assert!(classic.questions.iter().all(|q| q.options.len() >= 2));
        assert!(registry.resolve("unknown-id").is_none());
    }

    #[test]
    fn classic_ids_are_unique() {
        let classic = classic_template();
        let mut ids: Vec<u32> = classic.questions.iter().map(|q| q.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), classic.questions.len());
    }

    #[test]
    fn insert_replaces_existing_id() {
        let mut registry = StaticRegistry::builtin();
        let mut custom = classic_template();
        custom.title = "Custom".into();
        let old = registry.insert(custom);
        assert!(old.is_some());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.resolve(CLASSIC_TEMPLATE_ID).unwrap().title, "Custom");
    }
}

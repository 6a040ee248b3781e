//! Admin settings persisted through a [`KeyValueStore`].

use std::collections::HashMap;
use std::convert::Infallible;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::model::{NarrativeBands, Question, QuizSetup};
use crate::templates::QuizTemplate;
use crate::traits::KeyValueStore;

/// Keys under which settings are stored.
pub mod keys {
    pub const QUIZ_TITLE: &str = "pairmatch.quizTitle";
    pub const QUESTIONS: &str = "pairmatch.questions";
    pub const NARRATIVE_BANDS: &str = "pairmatch.narrativeBands";
}

/// In-memory store, used by tests and as a scratch store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    type Error = Infallible;

    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), Self::Error> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Errors from writing settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError<E: std::error::Error + 'static> {
    #[error("failed to serialize setting {key}: {source}")]
    Serialize {
        key: &'static str,
        source: serde_json::Error,
    },

    #[error("store write failed: {0}")]
    Store(#[source] E),

    #[error("no question with id {0}")]
    UnknownQuestion(u32),
}

/// Quiz configuration edited from the admin view.
///
/// Every setting falls back to the base template when it has never been
/// written or the stored value cannot be read.
pub struct SettingsRepo<S> {
    store: S,
    base: QuizTemplate,
}

impl<S: KeyValueStore> SettingsRepo<S> {
    pub fn new(store: S, base: QuizTemplate) -> Self {
        Self { store, base }
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn quiz_title(&self) -> String {
        self.store
            .get(keys::QUIZ_TITLE)
            .unwrap_or_else(|| self.base.title.clone())
    }

    pub fn questions(&self) -> Vec<Question> {
        self.read_json(keys::QUESTIONS)
            .unwrap_or_else(|| self.base.questions.clone())
    }

    pub fn narrative_bands(&self) -> NarrativeBands {
        self.read_json(keys::NARRATIVE_BANDS)
            .unwrap_or_else(|| self.base.bands.clone())
    }

    /// `true` if any setting differs from the base template.
    pub fn is_customized(&self) -> bool {
        [keys::QUIZ_TITLE, keys::QUESTIONS, keys::NARRATIVE_BANDS]
            .iter()
            .any(|k| self.store.get(k).is_some())
    }

    /// The setup a creator starts from.
    ///
    /// Keeps the base template id only while the question list is untouched,
    /// so a compact share code never points at questions it does not use.
    pub fn quiz_setup(&self) -> QuizSetup {
        let questions = self.questions();
        let template_id = (questions == self.base.questions).then(|| self.base.id.clone());
        QuizSetup {
            title: self.quiz_title(),
            questions,
            bands: self.narrative_bands(),
            template_id,
        }
    }

    pub fn set_quiz_title(&mut self, title: &str) -> Result<(), SettingsError<S::Error>> {
        self.store
            .set(keys::QUIZ_TITLE, title)
            .map_err(SettingsError::Store)
    }

    pub fn set_questions(&mut self, questions: &[Question]) -> Result<(), SettingsError<S::Error>> {
        self.write_json(keys::QUESTIONS, questions)
    }

    pub fn set_narrative_bands(
        &mut self,
        bands: &NarrativeBands,
    ) -> Result<(), SettingsError<S::Error>> {
        self.write_json(keys::NARRATIVE_BANDS, bands)
    }

    /// Toggle whether a question takes part in new quizzes.
    pub fn set_question_active(
        &mut self,
        id: u32,
        active: bool,
    ) -> Result<(), SettingsError<S::Error>> {
        let mut questions = self.questions();
        let question = questions
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or(SettingsError::<S::Error>::UnknownQuestion(id))?;
        question.active = active;
        self.set_questions(&questions)
    }

    /// Drop all stored settings.
    pub fn reset(&mut self) -> Result<(), SettingsError<S::Error>> {
        for key in [keys::QUIZ_TITLE, keys::QUESTIONS, keys::NARRATIVE_BANDS] {
            self.store.remove(key).map_err(SettingsError::Store)?;
        }
        Ok(())
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.store.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("ignoring unreadable setting {key}: {e}");
                None
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), SettingsError<S::Error>> {
        let json = serde_json::to_string(value)
            .map_err(|source| SettingsError::Serialize { key, source })?;
        self.store.set(key, &json).map_err(SettingsError::Store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::{classic_template, CLASSIC_TEMPLATE_ID};

    fn repo() -> SettingsRepo<MemoryStore> {
        SettingsRepo::new(MemoryStore::new(), classic_template())
    }

    #[test]
    fn defaults_come_from_base_template() {
        let repo = repo();
        let classic = classic_template();
        assert_eq!(repo.quiz_title(), classic.title);
        assert_eq!(repo.questions(), classic.questions);
        assert!(!repo.is_customized());

        let setup = repo.quiz_setup();
        assert_eq!(setup.template_id.as_deref(), Some(CLASSIC_TEMPLATE_ID));
    }

    #[test]
    fn title_and_bands_persist() {
        let mut repo = repo();
        repo.set_quiz_title("Date night").unwrap();
        let mut bands = NarrativeBands::default();
        bands.range_0_25 = "Opposites attract.".into();
        repo.set_narrative_bands(&bands).unwrap();

        let store = repo.into_store();
        let repo = SettingsRepo::new(store, classic_template());
        assert_eq!(repo.quiz_title(), "Date night");
        assert_eq!(repo.narrative_bands().range_0_25, "Opposites attract.");
        assert!(repo.is_customized());
        // Questions untouched, so the template reference survives.
        assert!(repo.quiz_setup().template_id.is_some());
    }

    #[test]
    fn deactivating_question_drops_template_reference() {
        let mut repo = repo();
        repo.set_question_active(4, false).unwrap();

        let setup = repo.quiz_setup();
        assert!(setup.template_id.is_none());
        assert_eq!(setup.active_questions().count(), 9);
    }

    #[test]
    fn unknown_question_is_an_error() {
        let mut repo = repo();
        let err = repo.set_question_active(99, false).unwrap_err();
        assert!(matches!(err, SettingsError::UnknownQuestion(99)));
    }

    #[test]
    fn corrupt_value_falls_back_to_default() {
        let mut store = MemoryStore::new();
        store.set(keys::QUESTIONS, "{not json").unwrap();
        let repo = SettingsRepo::new(store, classic_template());
        assert_eq!(repo.questions(), classic_template().questions);
    }

    #[test]
    fn reset_clears_everything() {
        let mut repo = repo();
        repo.set_quiz_title("Temp").unwrap();
        repo.set_question_active(1, false).unwrap();
        repo.reset().unwrap();
        assert!(!repo.is_customized());
        assert_eq!(repo.quiz_title(), classic_template().title);
    }
}

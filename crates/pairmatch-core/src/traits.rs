//! Seams between the core and its callers.
//!
//! The codec resolves template ids through a [`TemplateRegistry`], and admin
//! settings persist through a [`KeyValueStore`]. Both are injected so the
//! core never reaches for ambient global state.

use crate::templates::QuizTemplate;

// ---------------------------------------------------------------------------
// Template registry
// ---------------------------------------------------------------------------

/// A source of predefined question sets addressable by id.
pub trait TemplateRegistry: Send + Sync {
    /// Look up a template by id.
    fn resolve(&self, id: &str) -> Option<&QuizTemplate>;

    /// All templates, in a stable order.
    fn templates(&self) -> Vec<&QuizTemplate>;
}

// ---------------------------------------------------------------------------
// Key-value persistence
// ---------------------------------------------------------------------------

/// Minimal string key-value store, the shape of browser local storage.
///
/// Reads and writes are synchronous; a single writer is assumed.
pub trait KeyValueStore {
    /// Error returned by writes.
    type Error: std::error::Error + Send + Sync + 'static;

    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;

    fn remove(&mut self, key: &str) -> Result<(), Self::Error>;
}

//! URL fragment routing.
//!
//! Share codes travel in the fragment of a link: `#/session/<code>` starts the
//! partner's half, `#/result/<code>` shows a finished comparison. Routing only
//! splits the fragment; decoding is left to the codec.

use std::fmt;

/// A parsed fragment address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Session(String),
    Result(String),
    Admin,
    Page(String),
}

impl Route {
    /// Parse a fragment with or without the leading `#`. A full URL is also
    /// accepted; everything before the first `#` is ignored. Unknown or
    /// empty addresses map to `Home`.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let fragment = match input.find('#') {
            Some(i) => &input[i + 1..],
            None => input,
        };
        let path = fragment.trim_start_matches('/');

        let (head, rest) = match path.split_once('/') {
            Some((head, rest)) => (head, rest.trim_end_matches('/')),
            None => (path, ""),
        };

        match (head, rest) {
            ("session", code) if !code.is_empty() => Route::Session(code.to_string()),
            ("result", code) if !code.is_empty() => Route::Result(code.to_string()),
            ("admin", "") => Route::Admin,
            ("page", slug) if !slug.is_empty() => Route::Page(slug.to_string()),
            _ => Route::Home,
        }
    }

    /// Render back to a fragment, including the leading `#`.
    pub fn to_fragment(&self) -> String {
        match self {
            Route::Home => "#/".to_string(),
            Route::Session(code) => format!("#/session/{code}"),
            Route::Result(code) => format!("#/result/{code}"),
            Route::Admin => "#/admin".to_string(),
            Route::Page(slug) => format!("#/page/{slug}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fragment())
    }
}

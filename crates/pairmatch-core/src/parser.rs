//! TOML quiz template parser.
//!
//! Loads templates from TOML files and directories, and validates them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{NarrativeBands, Question};
use crate::templates::QuizTemplate;

/// Intermediate TOML structure for parsing template files.
#[derive(Debug, Deserialize)]
struct TomlTemplateFile {
    template: TomlTemplateHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
    #[serde(default)]
    bands: Option<TomlBands>,
}

#[derive(Debug, Deserialize)]
struct TomlTemplateHeader {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: u32,
    #[serde(default)]
    category: String,
    text: String,
    options: Vec<String>,
    #[serde(default = "default_true")]
    active: bool,
}

fn default_true() -> bool {
    true
}

/// Bands may be partially given; missing ranges keep the stock text.
#[derive(Debug, Deserialize)]
struct TomlBands {
    #[serde(default, rename = "range0_25")]
    range_0_25: Option<String>,
    #[serde(default, rename = "range26_50")]
    range_26_50: Option<String>,
    #[serde(default, rename = "range51_75")]
    range_51_75: Option<String>,
    #[serde(default, rename = "range76_100")]
    range_76_100: Option<String>,
}

impl TomlBands {
    fn into_bands(self) -> NarrativeBands {
        let defaults = NarrativeBands::default();
        NarrativeBands {
            range_0_25: self.range_0_25.unwrap_or(defaults.range_0_25),
            range_26_50: self.range_26_50.unwrap_or(defaults.range_26_50),
            range_51_75: self.range_51_75.unwrap_or(defaults.range_51_75),
            range_76_100: self.range_76_100.unwrap_or(defaults.range_76_100),
        }
    }
}

/// Parse a single TOML file into a `QuizTemplate`.
pub fn parse_template(path: &Path) -> Result<QuizTemplate> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read template file: {}", path.display()))?;

    parse_template_str(&content, path)
}

/// Parse a TOML string into a `QuizTemplate` (useful for testing).
pub fn parse_template_str(content: &str, source_path: &Path) -> Result<QuizTemplate> {
    let parsed: TomlTemplateFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| Question {
            id: q.id,
            category: q.category,
            text: q.text,
            options: q.options,
            active: q.active,
        })
        .collect();

    Ok(QuizTemplate {
        id: parsed.template.id,
        title: parsed.template.title,
        description: parsed.template.description,
        questions,
        bands: parsed
            .bands
            .map(TomlBands::into_bands)
            .unwrap_or_default(),
    })
}

/// Recursively load all `.toml` template files from a directory.
pub fn load_template_directory(dir: &Path) -> Result<Vec<QuizTemplate>> {
    let mut templates = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            templates.extend(load_template_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_template(&path) {
                Ok(t) => templates.push(t),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(templates)
}

/// A warning from template validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question id (if applicable).
    pub question_id: Option<u32>,
    /// Warning message.
    pub message: String,
}

/// Validate a template for common authoring mistakes.
pub fn validate_template(template: &QuizTemplate) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_ids = HashSet::new();
    for q in &template.questions {
        if !seen_ids.insert(q.id) {
            warnings.push(ValidationWarning {
                question_id: Some(q.id),
                message: format!("duplicate question ID: {}", q.id),
            });
        }
    }

    for q in &template.questions {
        if q.text.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(q.id),
                message: "question text is empty".into(),
            });
        }

        if q.options.len() < 2 {
            warnings.push(ValidationWarning {
                question_id: Some(q.id),
                message: format!("needs at least 2 options, found {}", q.options.len()),
            });
        }

        let mut seen_options = HashSet::new();
        for option in &q.options {
            if !seen_options.insert(option.as_str()) {
                warnings.push(ValidationWarning {
                    question_id: Some(q.id),
                    message: format!("duplicate option: {option}"),
                });
            }
        }
    }

    if !template.questions.iter().any(|q| q.active) {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "no active questions".into(),
        });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[template]
id = "weekend"
title = "Weekend plans"
description = "Short quiz about free time"

[[questions]]
id = 1
category = "Leisure"
text = "Beach or mountains?"
options = ["Beach", "Mountains"]

[[questions]]
id = 2
category = "Leisure"
text = "Cook or order in?"
options = ["Cook", "Order in", "Eat out"]
active = false

[bands]
range76_100 = "Pack your bags together."
"#;

    #[test]
    fn parse_valid_toml() {
        let t = parse_template_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(t.id, "weekend");
        assert_eq!(t.title, "Weekend plans");
        assert_eq!(t.questions.len(), 2);
        assert!(t.questions[0].active);
        assert!(!t.questions[1].active);
        assert_eq!(t.bands.range_76_100, "Pack your bags together.");
        assert_eq!(t.bands.range_0_25, NarrativeBands::default().range_0_25);
    }

    #[test]
    fn parse_without_bands_uses_defaults() {
        let toml = r#"
[template]
id = "minimal"
title = "Minimal"

[[questions]]
id = 1
text = "Yes or no?"
options = ["Yes", "No"]
"#;
        let t = parse_template_str(toml, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(t.bands, NarrativeBands::default());
        assert!(t.description.is_empty());
    }

    #[test]
    fn validate_duplicate_ids() {
        let toml = r#"
[template]
id = "dupes"
title = "Dupes"

[[questions]]
id = 1
text = "First"
options = ["A", "B"]

[[questions]]
id = 1
text = "Second"
options = ["A", "B"]
"#;
        let t = parse_template_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_template(&t);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate question ID")));
    }

    #[test]
    fn validate_short_options_and_no_active() {
        let toml = r#"
[template]
id = "thin"
title = "Thin"

[[questions]]
id = 1
text = "Only one way"
options = ["A"]
active = false
"#;
        let t = parse_template_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_template(&t);
        assert!(warnings.iter().any(|w| w.message.contains("at least 2 options")));
        assert!(warnings.iter().any(|w| w.message == "no active questions"));
    }

    #[test]
    fn builtin_template_has_no_warnings() {
        let warnings = validate_template(&crate::templates::classic_template());
        assert!(warnings.is_empty(), "{warnings:?}");
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        let result = parse_template_str(bad, &PathBuf::from("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn load_directory_skips_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("good.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("broken.toml"), "[template").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a template").unwrap();

        let templates = load_template_directory(dir.path()).unwrap();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].id, "weekend");
    }
}

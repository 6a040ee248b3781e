//! Subcommand implementations and the plumbing they share.

use std::path::Path;

use anyhow::Result;

use pairmatch_core::parser::load_template_directory;
use pairmatch_core::templates::{classic_template, QuizTemplate, StaticRegistry};
use pairmatch_core::traits::TemplateRegistry;
use pairmatch_core::CodecError;
use pairmatch_storage::PairmatchConfig;

pub mod admin;
pub mod create;
pub mod init;
pub mod respond;
pub mod show;
pub mod templates;
pub mod validate;

/// Built-in templates plus those from the configured and given directories.
pub fn load_registry(config: &PairmatchConfig, extra_dir: Option<&Path>) -> Result<StaticRegistry> {
    let mut registry = StaticRegistry::builtin();
    for dir in [config.templates_dir.as_deref(), extra_dir].into_iter().flatten() {
        if dir.is_dir() {
            registry.extend(load_template_directory(dir)?);
        } else {
            tracing::warn!("template directory {} not found", dir.display());
        }
    }
    Ok(registry)
}

/// The template admin settings are layered on.
pub fn base_template(config: &PairmatchConfig, registry: &StaticRegistry) -> QuizTemplate {
    match registry.resolve(&config.default_template) {
        Some(t) => t.clone(),
        None => {
            tracing::warn!(
                "default template '{}' not found, using the built-in quiz",
                config.default_template
            );
            classic_template()
        }
    }
}

/// Collapse a codec failure into what the user gets told.
pub fn link_error(e: CodecError) -> anyhow::Error {
    tracing::debug!("share code rejected: {e}");
    anyhow::anyhow!("{}", e.user_message())
}

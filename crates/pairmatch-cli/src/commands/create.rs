//! The `pairmatch create` command.

use std::path::PathBuf;

use anyhow::Result;

use pairmatch_core::codec::{encode_session, encode_session_compact};
use pairmatch_core::route::Route;
use pairmatch_core::store::SettingsRepo;
use pairmatch_core::traits::TemplateRegistry;
use pairmatch_storage::config::load_config_from;
use pairmatch_storage::FileStore;

use super::{base_template, link_error, load_registry};
use crate::answers_file;

pub async fn execute(
    config_path: Option<PathBuf>,
    answers_path: PathBuf,
    template_id: Option<String>,
    templates_dir: Option<PathBuf>,
    full: bool,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let registry = load_registry(&config, templates_dir.as_deref())?;

    let setup = match &template_id {
        Some(id) => registry
            .resolve(id)
            .ok_or_else(|| anyhow::anyhow!("unknown template: {id}"))?
            .setup(),
        None => {
            let store = FileStore::open(&config.store_path)?;
            SettingsRepo::new(store, base_template(&config, &registry)).quiz_setup()
        }
    };

    let creator = answers_file::load(&answers_path)?;
    answers_file::check_against(&creator.answers, &setup.questions)?;
    anyhow::ensure!(
        !creator.answers.is_empty(),
        "answer at least one question before sharing"
    );

    let title = setup.title.clone();
    let session = setup.into_session(
        creator.profile,
        creator.answers,
        Some(chrono::Utc::now()),
    );

    let code = if full {
        encode_session(&session).await
    } else {
        encode_session_compact(&session, &registry).await
    }
    .map_err(link_error)?;

    eprintln!(
        "Created \"{}\" for {} ({} of {} questions answered).",
        title,
        session.creator_profile.name,
        session.creator_answers.len(),
        session.active_questions().count()
    );
    eprintln!("Send this link to your partner:");
    println!("{}", Route::Session(code).to_fragment());

    Ok(())
}

//! The `pairmatch admin` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use pairmatch_core::store::SettingsRepo;
use pairmatch_core::traits::KeyValueStore;
use pairmatch_storage::config::load_config_from;
use pairmatch_storage::FileStore;

use super::{base_template, load_registry};

pub struct AdminArgs {
    pub user: String,
    pub password: String,
    pub title: Option<String>,
    pub activate: Vec<u32>,
    pub deactivate: Vec<u32>,
    pub reset: bool,
}

pub fn execute(config_path: Option<PathBuf>, args: AdminArgs) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    anyhow::ensure!(
        config.admin.verify(&args.user, &args.password),
        "admin credentials rejected"
    );

    let registry = load_registry(&config, None)?;
    let store = FileStore::open(&config.store_path)?;
    let mut repo = SettingsRepo::new(store, base_template(&config, &registry));

    if args.reset {
        repo.reset().context("failed to reset settings")?;
        println!("Settings reset.");
    }
    if let Some(title) = &args.title {
        repo.set_quiz_title(title).context("failed to save title")?;
    }
    for id in &args.activate {
        repo.set_question_active(*id, true)
            .with_context(|| format!("failed to activate question {id}"))?;
    }
    for id in &args.deactivate {
        repo.set_question_active(*id, false)
            .with_context(|| format!("failed to deactivate question {id}"))?;
    }

    print_settings(&repo);
    Ok(())
}

fn print_settings<S: KeyValueStore>(repo: &SettingsRepo<S>) {
    println!("Quiz title: {}", repo.quiz_title());

    let mut table = Table::new();
    table.set_header(vec!["#", "Category", "Question", "Options", "Active"]);
    for q in repo.questions() {
        table.add_row(vec![
            Cell::new(q.id),
            Cell::new(&q.category),
            Cell::new(&q.text),
            Cell::new(q.options.len()),
            Cell::new(if q.active { "yes" } else { "no" }),
        ]);
    }
    println!("{table}");

    if repo.is_customized() {
        println!("(customized; --reset restores the defaults)");
    }
}

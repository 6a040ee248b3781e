//! The `pairmatch templates` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use pairmatch_core::traits::TemplateRegistry;
use pairmatch_storage::config::load_config_from;

use super::load_registry;

pub fn execute(config_path: Option<PathBuf>, templates_dir: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let registry = load_registry(&config, templates_dir.as_deref())?;

    let mut table = Table::new();
    table.set_header(vec!["Id", "Title", "Questions", "Description"]);

    for t in registry.templates() {
        let active = t.questions.iter().filter(|q| q.active).count();
        let marker = if t.id == config.default_template {
            format!("{} (default)", t.id)
        } else {
            t.id.clone()
        };
        table.add_row(vec![
            Cell::new(marker),
            Cell::new(&t.title),
            Cell::new(format!("{active}/{}", t.questions.len())),
            Cell::new(&t.description),
        ]);
    }

    println!("{table}");
    Ok(())
}

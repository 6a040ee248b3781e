//! The `pairmatch validate` command.

use std::path::PathBuf;

use anyhow::Result;

use pairmatch_core::parser;

pub fn execute(templates_path: PathBuf) -> Result<()> {
    let templates = if templates_path.is_dir() {
        parser::load_template_directory(&templates_path)?
    } else {
        vec![parser::parse_template(&templates_path)?]
    };

    let mut total_warnings = 0;

    for template in &templates {
        println!(
            "Template: {} ({} questions)",
            template.title,
            template.questions.len()
        );

        let warnings = parser::validate_template(template);
        for w in &warnings {
            let prefix = w
                .question_id
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All templates valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}

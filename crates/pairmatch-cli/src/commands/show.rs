//! The `pairmatch show` command.

use std::path::PathBuf;

use anyhow::Result;
use clap::ValueEnum;
use comfy_table::{Cell, Table};

use pairmatch_core::codec::{decode_result, decode_session};
use pairmatch_core::model::SessionData;
use pairmatch_core::route::Route;
use pairmatch_core::scoring::{score_result, CompatibilityScore};
use pairmatch_storage::config::load_config_from;

use super::{link_error, load_registry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub async fn execute(
    config_path: Option<PathBuf>,
    link: String,
    format: OutputFormat,
    templates_dir: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let registry = load_registry(&config, templates_dir.as_deref())?;

    match Route::parse(&link) {
        Route::Session(code) => {
            let session = decode_session(&code, &registry).await.map_err(link_error)?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&session)?),
                OutputFormat::Text => print_session(&session),
            }
        }
        Route::Result(code) => {
            let result = decode_result(&code, &registry).await.map_err(link_error)?;
            let score = score_result(&result);
            match format {
                OutputFormat::Json => {
                    let out = serde_json::json!({ "result": result, "score": score });
                    println!("{}", serde_json::to_string_pretty(&out)?);
                }
                OutputFormat::Text => {
                    println!(
                        "{}: {} & {}",
                        result.session.quiz_title,
                        result.session.creator_profile.name,
                        result.partner_profile.name
                    );
                    print_score(&score);
                }
            }
        }
        _ => anyhow::bail!("not a share link; expected #/session/<code> or #/result/<code>"),
    }

    Ok(())
}

fn print_session(session: &SessionData) {
    println!("Quiz: {}", session.quiz_title);
    println!(
        "Created by: {} ({})",
        session.creator_profile.name, session.creator_profile.relationship_type
    );
    if let Some(id) = &session.template_id {
        println!("Template: {id}");
    }
    println!(
        "{} questions, {} answered by the creator",
        session.active_questions().count(),
        session.creator_answers.len()
    );
}

fn print_score(score: &CompatibilityScore) {
    let mut table = Table::new();
    table.set_header(vec!["#", "Category", "Question", "Creator", "Partner", "Match"]);

    for c in &score.breakdown {
        table.add_row(vec![
            Cell::new(c.question_id),
            Cell::new(&c.category),
            Cell::new(&c.text),
            Cell::new(c.creator_answer.as_deref().unwrap_or("-")),
            Cell::new(c.partner_answer.as_deref().unwrap_or("-")),
            Cell::new(if c.matched { "yes" } else { "no" }),
        ]);
    }

    println!("{table}");
    println!(
        "Match: {}% ({}/{}) [{}]",
        score.percentage, score.matches, score.total, score.band
    );
    println!("{}", score.narrative);
}

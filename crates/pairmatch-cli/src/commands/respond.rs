//! The `pairmatch respond` command.

use std::path::PathBuf;

use anyhow::Result;

use pairmatch_core::codec::{decode_session, encode_result};
use pairmatch_core::route::Route;
use pairmatch_core::scoring::score_result;
use pairmatch_storage::config::load_config_from;

use super::{link_error, load_registry};
use crate::answers_file;

pub async fn execute(
    config_path: Option<PathBuf>,
    link: String,
    answers_path: PathBuf,
    templates_dir: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let registry = load_registry(&config, templates_dir.as_deref())?;

    let Route::Session(code) = Route::parse(&link) else {
        anyhow::bail!("not a session link; expected #/session/<code>");
    };
    let session = decode_session(&code, &registry).await.map_err(link_error)?;

    let partner = answers_file::load(&answers_path)?;
    answers_file::check_against(&partner.answers, &session.questions)?;

    let result = session.into_result(partner.profile, partner.answers);
    let score = score_result(&result);
    let code = encode_result(&result).await.map_err(link_error)?;

    println!(
        "{} & {}: {}% match ({}/{})",
        result.session.creator_profile.name,
        result.partner_profile.name,
        score.percentage,
        score.matches,
        score.total
    );
    println!("{}", score.narrative);
    println!("{}", Route::Result(code).to_fragment());

    Ok(())
}

//! pairmatch CLI: create, answer and compare compatibility quizzes.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod answers_file;
mod commands;

use commands::show::OutputFormat;

#[derive(Parser)]
#[command(name = "pairmatch", version, about = "Two-person compatibility quiz")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a session link from the creator's answers
    Create {
        /// TOML file with the creator's profile and answers
        #[arg(long)]
        answers: PathBuf,

        /// Use this template instead of the saved quiz settings
        #[arg(long)]
        template: Option<String>,

        /// Extra template directory
        #[arg(long)]
        templates: Option<PathBuf>,

        /// Embed the full question list even for unmodified templates
        #[arg(long)]
        full: bool,
    },

    /// Answer a session link as the partner and produce a result link
    Respond {
        /// Session link or fragment (#/session/...)
        #[arg(long)]
        link: String,

        /// TOML file with the partner's profile and answers
        #[arg(long)]
        answers: PathBuf,

        /// Extra template directory
        #[arg(long)]
        templates: Option<PathBuf>,
    },

    /// Show the contents of a session or result link
    Show {
        /// Session or result link or fragment
        #[arg(long)]
        link: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Extra template directory
        #[arg(long)]
        templates: Option<PathBuf>,
    },

    /// List available quiz templates
    Templates {
        /// Extra template directory
        #[arg(long)]
        templates: Option<PathBuf>,
    },

    /// Validate quiz template TOML files
    Validate {
        /// Path to template file or directory
        #[arg(long)]
        templates: PathBuf,
    },

    /// Edit saved quiz settings
    Admin {
        #[arg(long)]
        user: String,

        #[arg(long)]
        password: String,

        /// New quiz title
        #[arg(long)]
        title: Option<String>,

        /// Question ids to include in new quizzes
        #[arg(long, value_delimiter = ',')]
        activate: Vec<u32>,

        /// Question ids to leave out of new quizzes
        #[arg(long, value_delimiter = ',')]
        deactivate: Vec<u32>,

        /// Discard all saved settings
        #[arg(long)]
        reset: bool,
    },

    /// Create starter config, template and answers file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pairmatch=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Create {
            answers,
            template,
            templates,
            full,
        } => commands::create::execute(config, answers, template, templates, full).await,
        Commands::Respond {
            link,
            answers,
            templates,
        } => commands::respond::execute(config, link, answers, templates).await,
        Commands::Show {
            link,
            format,
            templates,
        } => commands::show::execute(config, link, format, templates).await,
        Commands::Templates { templates } => commands::templates::execute(config, templates),
        Commands::Validate { templates } => commands::validate::execute(templates),
        Commands::Admin {
            user,
            password,
            title,
            activate,
            deactivate,
            reset,
        } => commands::admin::execute(
            config,
            commands::admin::AdminArgs {
                user,
                password,
                title,
                activate,
                deactivate,
                reset,
            },
        ),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

// Entrypoint for the CLI application.
// - Keeps `main` small: parse arguments, set up logging, build the config
//   once, and hand off to the UI layer.
// - Returns `anyhow::Result`, so any fatal error prints a message and the
//   process exits with a non-zero status.

mod cli;

use std::path::Path;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tweet_labeler::{api::ApiClient, ui};

use cli::{Cli, Command, DEFAULT_LABELED_OUT, DEFAULT_SEARCH_OUT};

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    // Logs go to stderr; stdout carries the operator prompts.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_level(true)
        .init();

    let config = args.config();
    tracing::debug!(?config, "configuration loaded");

    match args.command {
        Some(Command::Search {
            query,
            out,
            format,
            preview,
        }) => {
            let mut api = ApiClient::new(config)?;
            ui::run_search(&mut api, &query, &out, format, preview)
        }
        Some(Command::Label { source, dest }) => ui::run_label(&source, &dest),
        None => ui::main_menu(
            ApiClient::new(config)?,
            Path::new(DEFAULT_SEARCH_OUT),
            Path::new(DEFAULT_LABELED_OUT),
        ),
    }
}

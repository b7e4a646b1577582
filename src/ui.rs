// UI layer: the terminal flows. `main` calls `run_search` / `run_label`
// directly for subcommands, or `main_menu` for the interactive loop.
// Every failure propagates so the process exits non-zero.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::style::Stylize;
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};

use crate::api::ApiClient;
use crate::export::{self, Separator};
use crate::labeler;

/// Main interactive menu. Runs a select loop until the user chooses "Exit".
pub fn main_menu(
    mut api: ApiClient,
    default_search_out: &Path,
    default_labeled_out: &Path,
) -> Result<()> {
    let items = ["Search tweets", "Label a file", "Exit"];
    loop {
        let selection = Select::new().items(&items).default(0).interact()?;
        match selection {
            0 => {
                let query: String = Input::new().with_prompt("Search query").interact_text()?;
                let formats = ["tsv (,\\t)", "csv (,)"];
                let sep = match Select::new()
                    .with_prompt("Format")
                    .items(&formats)
                    .default(0)
                    .interact()?
                {
                    1 => Separator::Csv,
                    _ => Separator::Tsv,
                };
                let out = prompt_path("Output file", default_search_out)?;
                run_search(&mut api, &query, &out, sep, false)?;
            }
            1 => {
                let source = prompt_path("Source file", default_search_out)?;
                let dest = prompt_path("Labeled output file", default_labeled_out)?;
                run_label(&source, &dest)?;
            }
            _ => break,
        }
    }
    Ok(())
}

/// Acquire a token if needed, search, and save the results to `out`.
pub fn run_search(
    api: &mut ApiClient,
    query: &str,
    out: &Path,
    sep: Separator,
    preview: bool,
) -> Result<()> {
    // The token is fetched once per process and reused for every search.
    if !api.has_token() {
        let spinner = start_spinner("Authenticating...")?;
        let res = api.acquire_token();
        spinner.finish_and_clear();
        res.context("acquire bearer token")?;
    }

    let spinner = start_spinner("Searching...")?;
    let res = api.search(query);
    spinner.finish_and_clear();
    let response = res.with_context(|| format!("search for {query:?}"))?;

    if preview {
        export::preview(&response, io::stdout().lock()).context("print preview")?;
    }
    let written = export::save(&response, out, sep)
        .with_context(|| format!("write results to {}", out.display()))?;
    println!(
        "{}",
        format!("Saved {written} results to {}", out.display()).green()
    );
    Ok(())
}

/// Label `source` into `dest`, reading answers line by line from stdin.
pub fn run_label(source: &Path, dest: &Path) -> Result<()> {
    let summary = labeler::label_file(source, dest, io::stdin().lock(), io::stdout())
        .with_context(|| format!("label {}", source.display()))?;
    println!(
        "{}",
        format!(
            "Labeled {} of {} records ({} dropped, {} near-duplicates skipped) into {}",
            summary.accepted,
            summary.read,
            summary.dropped,
            summary.duplicates,
            dest.display()
        )
        .green()
    );
    Ok(())
}

fn prompt_path(prompt: &str, default: &Path) -> Result<PathBuf> {
    let raw: String = Input::new()
        .with_prompt(prompt)
        .default(default.display().to_string())
        .interact_text()?;
    Ok(PathBuf::from(raw))
}

fn start_spinner(msg: &'static str) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message(msg);
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use tweet_labeler::config::DEFAULT_API_BASE;
use tweet_labeler::export::Separator;
use tweet_labeler::{Config, Endpoints};

pub const DEFAULT_SEARCH_OUT: &str = "data/tweets.tsv";
pub const DEFAULT_LABELED_OUT: &str = "data/labeled.csv";

/// Collect tweets for a query and label their sentiment by hand.
///
/// Without a subcommand an interactive menu is shown.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// API consumer key.
    #[arg(long, env = "TWITTER_CONSUMER_KEY", hide_env_values = true, default_value = "")]
    pub consumer_key: String,

    /// API consumer secret.
    #[arg(long, env = "TWITTER_SECRET", hide_env_values = true, default_value = "")]
    pub consumer_secret: String,

    /// Base URL for the token and search endpoints.
    #[arg(long, env = "TWITTER_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Search recent tweets and write them as a delimited record file.
    Search {
        /// Search query, e.g. `"rust lang" -RT`.
        query: String,

        /// Output file (created or truncated).
        #[arg(long, default_value = DEFAULT_SEARCH_OUT)]
        out: PathBuf,

        /// Field separator variant.
        #[arg(long, value_enum, default_value_t = Separator::Tsv)]
        format: Separator,

        /// Also print created_at / id / text / author id to stdout.
        #[arg(long)]
        preview: bool,
    },

    /// Label each record of a search file as positive, flat or negative.
    Label {
        /// Tab-separated record file produced by `search --format tsv`.
        #[arg(long, default_value = DEFAULT_SEARCH_OUT)]
        source: PathBuf,

        /// Labeled output (created or truncated).
        #[arg(long, default_value = DEFAULT_LABELED_OUT)]
        dest: PathBuf,
    },
}

impl Cli {
    pub fn config(&self) -> Config {
        Config::new(self.consumer_key.clone(), self.consumer_secret.clone())
            .with_endpoints(Endpoints::from_base(&self.api_base))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn search_defaults() {
        let cli = Cli::try_parse_from(["tweet-labeler", "search", "rust"]).unwrap();
        match cli.command {
            Some(Command::Search {
                query,
                out,
                format,
                preview,
            }) => {
                assert_eq!(query, "rust");
                assert_eq!(out, PathBuf::from(DEFAULT_SEARCH_OUT));
                assert_eq!(format, Separator::Tsv);
                assert!(!preview);
            }
            _ => panic!("expected search subcommand"),
        }
    }

    #[test]
    fn csv_format_and_api_base() {
        let cli = Cli::try_parse_from([
            "tweet-labeler",
            "--consumer-key",
            "k",
            "--consumer-secret",
            "s",
            "--api-base",
            "http://127.0.0.1:8080",
            "search",
            "q",
            "--format",
            "csv",
        ])
        .unwrap();
        let config = cli.config();
        assert_eq!(config.consumer_key, "k");
        assert_eq!(config.endpoints.token_url, "http://127.0.0.1:8080/oauth2/token");
        assert!(matches!(
            cli.command,
            Some(Command::Search {
                format: Separator::Csv,
                ..
            })
        ));
    }

    #[test]
    fn label_paths() {
        let cli = Cli::try_parse_from([
            "tweet-labeler",
            "label",
            "--source",
            "in.tsv",
            "--dest",
            "out.csv",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Label { source, dest }) => {
                assert_eq!(source, PathBuf::from("in.tsv"));
                assert_eq!(dest, PathBuf::from("out.csv"));
            }
            _ => panic!("expected label subcommand"),
        }
    }
}

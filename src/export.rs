//! Delimited record files produced from a search.
//!
//! Each result becomes one line of three quoted fields: identifier, an empty
//! placeholder for a label, and the text with newlines flattened to spaces.
//! No header row. The separator is not escaped when it appears inside text.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::api::SearchResponse;

/// Field separator variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Separator {
    /// Plain comma.
    Csv,
    /// Comma followed by a tab, which the labeler splits on.
    #[default]
    Tsv,
}

impl Separator {
    pub fn as_str(self) -> &'static str {
        match self {
            Separator::Csv => ",",
            Separator::Tsv => ",\t",
        }
    }
}

pub fn quote(s: &str) -> String {
    format!("\"{s}\"")
}

/// Render a single result line, without the trailing newline.
pub fn format_record(id: &str, text: &str, sep: Separator) -> String {
    [quote(id), quote(""), quote(&text.replace('\n', " "))].join(sep.as_str())
}

pub fn write_records<W: Write>(
    response: &SearchResponse,
    mut w: W,
    sep: Separator,
) -> io::Result<usize> {
    for tweet in &response.statuses {
        writeln!(w, "{}", format_record(&tweet.id_str, &tweet.text, sep))?;
    }
    w.flush()?;
    Ok(response.statuses.len())
}

/// Create (or truncate) `path`, creating parent directories as needed, and
/// write every result to it.
pub fn save(response: &SearchResponse, path: &Path, sep: Separator) -> io::Result<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let written = write_records(response, BufWriter::new(file), sep)?;
    info!(path = %path.display(), records = written, ?sep, "wrote search results");
    Ok(written)
}

/// Human-readable listing: created_at, id, text, author id, tab separated.
pub fn preview<W: Write>(response: &SearchResponse, mut w: W) -> io::Result<()> {
    for t in &response.statuses {
        writeln!(w, "{}\t{}\t{}\t{}", t.created_at, t.id_str, t.text, t.user.id_str)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Tweet, User};

    fn response(items: &[(&str, &str)]) -> SearchResponse {
        SearchResponse {
            statuses: items
                .iter()
                .map(|(id, text)| Tweet {
                    created_at: "Mon Jan 01 00:00:00 +0000 2024".into(),
                    id_str: (*id).into(),
                    text: (*text).into(),
                    user: User {
                        id_str: format!("u{id}"),
                        screen_name: String::new(),
                    },
                })
                .collect(),
            search_metadata: Default::default(),
        }
    }

    #[test]
    fn csv_lines() {
        let mut out = Vec::new();
        let n = write_records(&response(&[("1", "hello"), ("2", "a\nb")]), &mut out, Separator::Csv)
            .unwrap();
        assert_eq!(n, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\"1\",\"\",\"hello\"\n\"2\",\"\",\"a b\"\n"
        );
    }

    #[test]
    fn tsv_lines_split_into_three_tab_fields() {
        let line = format_record("42", "multi\nline\ntext", Separator::Tsv);
        assert_eq!(line, "\"42\",\t\"\",\t\"multi line text\"");
        assert_eq!(line.split('\t').count(), 3);
    }

    #[test]
    fn separator_inside_text_is_not_escaped() {
        let line = format_record("7", "a, b", Separator::Csv);
        assert_eq!(line, "\"7\",\"\",\"a, b\"");
    }

    #[test]
    fn empty_response_writes_nothing() {
        let mut out = Vec::new();
        assert_eq!(write_records(&response(&[]), &mut out, Separator::Tsv).unwrap(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("out.tsv");
        save(&response(&[("9", "hi")]), &path, Separator::Tsv).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "\"9\",\t\"\",\t\"hi\"\n");
    }

    #[test]
    fn preview_lists_author() {
        let mut out = Vec::new();
        preview(&response(&[("3", "yo")]), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Mon Jan 01 00:00:00 +0000 2024\t3\tyo\tu3\n"
        );
    }
}

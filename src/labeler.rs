//! Interactive sentiment labeling of a delimited record file.
//!
//! Reads one source record at a time, skips records whose text starts like
//! one already seen, asks the operator for a single-letter label, and writes
//! accepted records to the destination as `"<Label>","<text>"`.
//!
//! The loop is synchronous: each record blocks on one line of operator
//! input. Any answer outside `p`/`f`/`n`/`d` stops the run.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::LabelError;
use crate::export::quote;

/// Number of leading characters of the text used as the dedup key.
pub const DEDUP_PREFIX_CHARS: usize = 10;

pub const PROMPT: &str = "(p)Positive (f)Flat (n)Negative (d)Drop";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Positive,
    Flat,
    Negative,
}

impl Label {
    pub fn as_str(self) -> &'static str {
        match self {
            Label::Positive => "Positive",
            Label::Flat => "Flat",
            Label::Negative => "Negative",
        }
    }
}

/// What the operator decided for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Keep(Label),
    Drop,
}

impl Choice {
    /// Parse one line of operator input (line terminator already removed).
    pub fn parse(input: &str) -> Result<Self, LabelError> {
        match input {
            "p" => Ok(Choice::Keep(Label::Positive)),
            "f" => Ok(Choice::Keep(Label::Flat)),
            "n" => Ok(Choice::Keep(Label::Negative)),
            "d" => Ok(Choice::Drop),
            other => Err(LabelError::UnrecognizedLabel {
                input: other.to_owned(),
            }),
        }
    }
}

/// Counters for one labeling run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelSummary {
    pub read: usize,
    pub duplicates: usize,
    pub prompted: usize,
    pub accepted: usize,
    pub dropped: usize,
}

/// First [`DEDUP_PREFIX_CHARS`] characters of the raw text field, or the
/// whole field when shorter.
pub fn dedup_key(text: &str) -> String {
    text.chars().take(DEDUP_PREFIX_CHARS).collect()
}

/// Extract the text field (third tab-separated column) from a source line.
/// Tabs after the second one stay inside the text.
pub fn text_field(line: &str, line_no: usize) -> Result<&str, LabelError> {
    let fields: Vec<&str> = line.splitn(3, '\t').collect();
    match fields.as_slice() {
        [_, _, text] => Ok(*text),
        _ => Err(LabelError::MalformedRecord {
            line: line_no,
            found: fields.len(),
        }),
    }
}

/// Dedup memo plus run counters. One instance per labeling run.
#[derive(Debug, Default)]
pub struct Labeler {
    seen: HashSet<String>,
    summary: LabelSummary,
}

impl Labeler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the loop until the source is exhausted, the operator stream ends,
    /// or a fatal error occurs. `dest` is flushed on every exit path.
    pub fn run<S, I, P, D>(
        &mut self,
        source: S,
        operator: I,
        prompt: P,
        mut dest: D,
    ) -> Result<LabelSummary, LabelError>
    where
        S: BufRead,
        I: BufRead,
        P: Write,
        D: Write,
    {
        let outcome = self.label_all(source, operator, prompt, &mut dest);
        let flushed = dest.flush();
        outcome?;
        flushed?;
        info!(
            read = self.summary.read,
            prompted = self.summary.prompted,
            accepted = self.summary.accepted,
            dropped = self.summary.dropped,
            duplicates = self.summary.duplicates,
            "labeling finished"
        );
        Ok(self.summary)
    }

    fn label_all<S, I, P, D>(
        &mut self,
        source: S,
        mut operator: I,
        mut prompt: P,
        dest: &mut D,
    ) -> Result<(), LabelError>
    where
        S: BufRead,
        I: BufRead,
        P: Write,
        D: Write,
    {
        let mut answer = String::new();
        for (idx, line) in source.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;
            self.summary.read += 1;

            let raw = text_field(&line, line_no)?;
            if !self.seen.insert(dedup_key(raw)) {
                debug!(line = line_no, "skipping near-duplicate text");
                self.summary.duplicates += 1;
                continue;
            }

            let text = quote(&raw.replace('"', ""));
            writeln!(prompt, "{PROMPT}: {text}")?;
            prompt.flush()?;
            self.summary.prompted += 1;

            answer.clear();
            if operator.read_line(&mut answer)? == 0 {
                warn!(line = line_no, "operator input closed, stopping");
                return Ok(());
            }

            match Choice::parse(answer.trim_end_matches(['\r', '\n']))? {
                Choice::Keep(label) => {
                    // One write per record so a failure never leaves half a line.
                    dest.write_all(format!("{},{}\n", quote(label.as_str()), text).as_bytes())?;
                    self.summary.accepted += 1;
                }
                Choice::Drop => self.summary.dropped += 1,
            }
        }
        Ok(())
    }
}

/// Label `source_path` into `dest_path` (created or truncated), reading
/// operator answers from `operator` and writing prompts to `prompt`.
pub fn label_file<I, P>(
    source_path: &Path,
    dest_path: &Path,
    operator: I,
    prompt: P,
) -> Result<LabelSummary, LabelError>
where
    I: BufRead,
    P: Write,
{
    let source = BufReader::new(File::open(source_path)?);
    if let Some(parent) = dest_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let dest = BufWriter::new(File::create(dest_path)?);
    info!(
        source = %source_path.display(),
        dest = %dest_path.display(),
        "labeling started"
    );
    Labeler::new().run(source, operator, prompt, dest)
}

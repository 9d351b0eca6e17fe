// ABOUTME: Per-URL persistence of raw extracted text under date-stamped file names.
// ABOUTME: File names derive deterministically from the URL and the current date.

use std::path::PathBuf;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::HarvestError;

static PROTOCOL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(https?://)").unwrap());
static FORBIDDEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[:?<>|"*\r\n/]"#).unwrap());

/// Derive the per-URL file name for a given date.
///
/// Strips the protocol, replaces characters that are unsafe in file names
/// with `_`, truncates to 20 characters, and appends `_YYYY-MM-DD.txt`.
/// Distinct URLs sharing a 20-character prefix collide on the same name;
/// an accepted naming risk.
pub fn saved_file_name(url: &str, date: NaiveDate) -> String {
    let stripped = PROTOCOL_RE.replace(url, "");
    let cleaned = FORBIDDEN_RE.replace_all(&stripped, "_");
    let truncated: String = cleaned.chars().take(20).collect();
    format!("{}_{}.txt", truncated, date.format("%Y-%m-%d"))
}

/// Today's local date, used for the file-name suffix.
pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Persists raw extracted content to per-URL, per-date files.
#[derive(Debug, Clone)]
pub struct Saver {
    output_dir: PathBuf,
}

impl Saver {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Path of the file a URL's content is saved to on the given date.
    pub fn path_for(&self, url: &str, date: NaiveDate) -> PathBuf {
        self.output_dir.join(saved_file_name(url, date))
    }

    /// Write the non-blank lines of `text` to the URL's file, overwriting
    /// any previous content. The output directory must already exist.
    pub async fn save(&self, url: &str, text: &str) -> Result<PathBuf, HarvestError> {
        let path = self.path_for(url, today());
        tokio::fs::write(&path, non_blank_lines(text))
            .await
            .map_err(|e| {
                HarvestError::io(
                    url,
                    "Save",
                    Some(anyhow::anyhow!("write {}: {}", path.display(), e)),
                )
            })?;
        debug!(url, path = %path.display(), "saved extracted content");
        Ok(path)
    }
}

/// Drop blank lines and rejoin with single newlines.
fn non_blank_lines(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

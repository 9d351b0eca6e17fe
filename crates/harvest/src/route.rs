// ABOUTME: Routing of classified content into the shared aggregate file.
// ABOUTME: Unrecognized content deletes the per-URL file and prunes the URL list.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::info;

use crate::classify::Classification;
use crate::error::HarvestError;

/// What the router did with one URL's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routed {
    Appended,
    Discarded,
}

/// Routes classified content into the shared files.
///
/// Base64 payloads are decoded and appended to the aggregate file,
/// formatted links are appended as-is, and unrecognized content deletes the
/// URL's saved file and prunes the URL from the list file. Each shared file
/// is guarded by its own mutex so concurrent workers cannot interleave
/// appends or lose list rewrites.
#[derive(Debug)]
pub struct Router {
    rest_file: PathBuf,
    urls_file: PathBuf,
    rest_lock: Mutex<()>,
    urls_lock: Mutex<()>,
}

impl Router {
    pub fn new(rest_file: impl Into<PathBuf>, urls_file: impl Into<PathBuf>) -> Self {
        Self {
            rest_file: rest_file.into(),
            urls_file: urls_file.into(),
            rest_lock: Mutex::new(()),
            urls_lock: Mutex::new(()),
        }
    }

    /// Route one URL's extracted text according to its classification.
    ///
    /// `saved_file` is the per-URL file written by the save stage; the
    /// unrecognized path removes it again.
    pub async fn route(
        &self,
        url: &str,
        text: &str,
        classification: Classification,
        saved_file: &Path,
    ) -> Result<Routed, HarvestError> {
        match classification {
            Classification::Base64 => {
                let decoded = STANDARD.decode(text.trim()).map_err(|e| {
                    HarvestError::decode(url, "Route", Some(anyhow::anyhow!("base64: {}", e)))
                })?;
                let decoded = String::from_utf8(decoded).map_err(|e| {
                    HarvestError::decode(
                        url,
                        "Route",
                        Some(anyhow::anyhow!("decoded payload is not UTF-8: {}", e)),
                    )
                })?;
                self.append(url, &decoded).await?;
                Ok(Routed::Appended)
            }
            Classification::FormattedLink => {
                self.append(url, text).await?;
                Ok(Routed::Appended)
            }
            Classification::Unrecognized => {
                self.delete_saved(url, saved_file).await?;
                self.prune(url).await?;
                Ok(Routed::Discarded)
            }
        }
    }

    /// Append one content block plus a trailing newline to the aggregate file.
    async fn append(&self, url: &str, block: &str) -> Result<(), HarvestError> {
        let _guard = self.rest_lock.lock().await;

        let io_err = |e: std::io::Error| {
            HarvestError::io(
                url,
                "Append",
                Some(anyhow::anyhow!("{}: {}", self.rest_file.display(), e)),
            )
        };

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.rest_file)
            .await
            .map_err(io_err)?;
        file.write_all(format!("{}\n", block).as_bytes())
            .await
            .map_err(io_err)?;
        file.flush().await.map_err(io_err)
    }

    /// Delete the per-URL saved file. Missing files are not an error.
    async fn delete_saved(&self, url: &str, saved_file: &Path) -> Result<(), HarvestError> {
        match tokio::fs::remove_file(saved_file).await {
            Ok(()) => {
                info!(url, path = %saved_file.display(), "deleted unmatched content file");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(HarvestError::io(
                url,
                "Route",
                Some(anyhow::anyhow!("remove {}: {}", saved_file.display(), e)),
            )),
        }
    }

    /// Rewrite the URL-list file with this URL's line removed.
    ///
    /// Lines are compared trimmed and by exact match; a URL already absent
    /// makes the rewrite a no-op.
    async fn prune(&self, url: &str) -> Result<(), HarvestError> {
        let _guard = self.urls_lock.lock().await;

        let io_err = |e: std::io::Error| {
            HarvestError::io(
                url,
                "Prune",
                Some(anyhow::anyhow!("{}: {}", self.urls_file.display(), e)),
            )
        };

        let contents = tokio::fs::read_to_string(&self.urls_file)
            .await
            .map_err(io_err)?;
        let kept: Vec<&str> = contents
            .lines()
            .map(str::trim)
            .filter(|line| *line != url)
            .collect();
        tokio::fs::write(&self.urls_file, kept.join("\n"))
            .await
            .map_err(io_err)
    }
}

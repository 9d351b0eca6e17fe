// ABOUTME: The Harvester: a shared HTTP client plus the bounded worker pool.
// ABOUTME: Each URL runs fetch, extract, save, classify, route under a per-task timeout.

use std::fmt;
use std::path::PathBuf;

use futures::stream::{self, Stream, StreamExt};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

use crate::classify::classify;
use crate::error::HarvestError;
use crate::extract::page_text;
use crate::options::{HarvesterBuilder, Options};
use crate::resource::fetch;
use crate::route::Router;
use crate::save::Saver;

/// Status of one URL's task, reported exactly once per URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Success,
    Timeout,
    NoContent,
    Failed(String),
}

/// Outcome of processing a single URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlOutcome {
    pub url: String,
    pub status: TaskStatus,
}

impl fmt::Display for UrlOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            TaskStatus::Success => write!(f, "processed {} successfully", self.url),
            TaskStatus::Timeout => write!(f, "processing {} timed out", self.url),
            TaskStatus::NoContent => {
                write!(f, "processing {} failed: no content extracted", self.url)
            }
            TaskStatus::Failed(msg) => write!(f, "processing {} failed: {}", self.url, msg),
        }
    }
}

/// The harvester: fetches each URL, extracts its visible text, and routes
/// recognized content into the aggregate file.
pub struct Harvester {
    opts: Options,
    http: reqwest::Client,
    saver: Saver,
    router: Router,
}

impl Harvester {
    /// Create a new HarvesterBuilder over the three working files.
    pub fn builder(
        urls_file: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        rest_file: impl Into<PathBuf>,
    ) -> HarvesterBuilder {
        HarvesterBuilder::new(urls_file, output_dir, rest_file)
    }

    /// Create a new Harvester with the given options and working files.
    pub fn new(opts: Options, urls_file: PathBuf, output_dir: PathBuf, rest_file: PathBuf) -> Self {
        let http = opts.http_client.clone().unwrap_or_else(|| {
            let mut headers = HeaderMap::new();
            for (key, value) in &opts.headers {
                match (
                    HeaderName::from_bytes(key.as_bytes()),
                    HeaderValue::from_str(value),
                ) {
                    (Ok(name), Ok(value)) => {
                        headers.insert(name, value);
                    }
                    _ => debug!(header = %key, "skipping unusable header"),
                }
            }

            reqwest::Client::builder()
                .user_agent(&opts.user_agent)
                .timeout(opts.http_timeout)
                .default_headers(headers)
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
                .expect("failed to build HTTP client")
        });

        Self {
            opts,
            http,
            saver: Saver::new(output_dir),
            router: Router::new(rest_file, urls_file),
        }
    }

    /// Fetch a URL and extract its visible text, under the task budget.
    ///
    /// Expiry drops the inner future, which also cancels the in-flight
    /// request.
    async fn extract(&self, url: &str) -> Result<String, HarvestError> {
        let fetch_and_parse = async {
            let fetched = fetch(&self.http, url).await?;
            Ok(page_text(&fetched.text()))
        };
        tokio::time::timeout(self.opts.task_timeout, fetch_and_parse)
            .await
            .map_err(|_| HarvestError::timeout(url, "Extract", None))?
    }

    /// Process one URL through the full pipeline, catching every error at
    /// the task boundary.
    pub async fn process(&self, url: &str) -> UrlOutcome {
        let status = match self.process_inner(url).await {
            Ok(status) => status,
            Err(e) => TaskStatus::Failed(e.to_string()),
        };
        UrlOutcome {
            url: url.to_string(),
            status,
        }
    }

    async fn process_inner(&self, url: &str) -> Result<TaskStatus, HarvestError> {
        // Only fetch-and-extract runs under the budget; classification and
        // routing are untimed.
        let text = match self.extract(url).await {
            Ok(text) => text,
            Err(e) if e.is_timeout() => return Ok(TaskStatus::Timeout),
            Err(e) => return Err(e),
        };

        if text.is_empty() {
            return Ok(TaskStatus::NoContent);
        }

        let saved = self.saver.save(url, &text).await?;
        let classification = classify(&text);
        self.router.route(url, &text, classification, &saved).await?;
        Ok(TaskStatus::Success)
    }

    /// Process all URLs under the bounded worker pool.
    ///
    /// Outcomes are yielded in completion order, not submission order. One
    /// URL's failure never blocks or aborts the others.
    pub fn run<'a>(&'a self, urls: Vec<String>) -> impl Stream<Item = UrlOutcome> + 'a {
        let limit = self.opts.concurrency.max(1);
        stream::iter(urls)
            .map(move |url| async move { self.process(&url).await })
            .buffer_unordered(limit)
    }
}

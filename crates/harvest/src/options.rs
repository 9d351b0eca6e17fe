// ABOUTME: Configuration options for the harvester including Options and HarvesterBuilder.
// ABOUTME: HarvesterBuilder provides a fluent API for constructing Harvester instances.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::client::Harvester;

/// Configuration options for the harvester.
#[derive(Debug, Clone)]
pub struct Options {
    /// Upper bound on concurrently processed URLs. Must be at least 1; the
    /// worker pool clamps lower values.
    pub concurrency: usize,
    /// Wall-clock budget for one URL's fetch-and-extract step.
    pub task_timeout: Duration,
    /// Timeout applied to individual HTTP requests.
    pub http_timeout: Duration,
    pub user_agent: String,
    pub headers: HashMap<String, String>,
    pub http_client: Option<reqwest::Client>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            concurrency: 4,
            task_timeout: Duration::from_secs(600),
            http_timeout: Duration::from_secs(30),
            user_agent: "subreap/0.1".to_string(),
            headers: HashMap::new(),
            http_client: None,
        }
    }
}

/// Builder for constructing Harvester instances with custom configuration.
///
/// The three paths are the harvester's working files: the URL list (pruned in
/// place), the directory for per-URL content files, and the aggregate file
/// receiving matched content.
#[derive(Debug, Clone)]
pub struct HarvesterBuilder {
    opts: Options,
    urls_file: PathBuf,
    output_dir: PathBuf,
    rest_file: PathBuf,
}

impl HarvesterBuilder {
    /// Create a new HarvesterBuilder with default options.
    pub fn new(
        urls_file: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        rest_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            opts: Options::default(),
            urls_file: urls_file.into(),
            output_dir: output_dir.into(),
            rest_file: rest_file.into(),
        }
    }

    /// Set the concurrency limit of the worker pool.
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.opts.concurrency = concurrency;
        self
    }

    /// Set the per-URL fetch-and-extract budget.
    pub fn task_timeout(mut self, timeout: Duration) -> Self {
        self.opts.task_timeout = timeout;
        self
    }

    /// Set the HTTP request timeout.
    pub fn http_timeout(mut self, timeout: Duration) -> Self {
        self.opts.http_timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Add a custom header to all requests.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.opts.headers.insert(key.into(), value.into());
        self
    }

    /// Use a custom HTTP client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Build the Harvester with the configured options.
    pub fn build(self) -> Harvester {
        Harvester::new(self.opts, self.urls_file, self.output_dir, self.rest_file)
    }
}

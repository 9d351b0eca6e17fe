// ABOUTME: Main library entry point for the subreap link harvester.
// ABOUTME: Re-exports the public API: Harvester, HarvesterBuilder, Options, UrlOutcome, HarvestError.

//! subreap - a batch harvester for proxy subscription links.
//!
//! This crate fetches a list of URLs concurrently, extracts the visible text
//! from each page, classifies it as a base64 payload or a recognized
//! proxy-link format, and routes matches into a shared aggregate file while
//! pruning unmatched URLs from the input list.
//!
//! # Example
//!
//! ```no_run
//! use futures::StreamExt;
//! use subreap_harvest::Harvester;
//!
//! #[tokio::main]
//! async fn main() {
//!     let harvester = Harvester::builder("urls.txt", "data", "rest.txt").build();
//!     let mut outcomes = harvester.run(vec!["https://example.com".to_string()]);
//!     while let Some(outcome) = outcomes.next().await {
//!         println!("{}", outcome);
//!     }
//! }
//! ```

pub mod classify;
pub mod client;
pub mod error;
pub mod extract;
pub mod options;
pub mod resource;
pub mod route;
pub mod save;

pub use crate::classify::{classify, Classification};
pub use crate::client::{Harvester, TaskStatus, UrlOutcome};
pub use crate::error::{ErrorCode, HarvestError};
pub use crate::options::{HarvesterBuilder, Options};
pub use crate::route::{Routed, Router};
pub use crate::save::{saved_file_name, Saver};

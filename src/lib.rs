// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # JSON Output Format
//!
//! An output format for batch pipelines that aggregates each output
//! partition into a single JSON document instead of a line per record.
//!
//! ## Features
//!
//! - **One document per partition**: records accumulate in memory and hit
//!   storage as one JSON object when the partition finishes
//! - **Pluggable conversion**: trait or closure hooks decide field names,
//!   values, and what a field collision means
//! - **Rename-based commit**: per-attempt `_temporary` staging, safe under
//!   speculative execution, `_SUCCESS` marker on job commit
//! - **Any destination**: local filesystem, S3, R2, GCS, Azure
//! - **Insertion-ordered output**: fields serialize in first-write order
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use json_output_format::{
//!     FnConverter, JobConfig, JobId, JsonOutputFormat, OutputDestination,
//!     Result, TaskAttemptContext,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let destination = OutputDestination::parse("s3://reports/daily/")?;
//!     let format = JsonOutputFormat::new(FnConverter::identity(), destination);
//!
//!     let config = JobConfig::new().with_property("jof.file", "totals");
//!     let ctx = TaskAttemptContext::new(JobId::new(1), 0, config);
//!
//!     let mut writer = format.record_writer(&ctx)?;
//!     writer.write("clicks".to_string(), serde_json::json!(412))?;
//!     writer.write("visits".to_string(), serde_json::json!(9033))?;
//!     writer.close().await?;
//!
//!     format.committer().commit_task(&ctx).await?;
//!     format.committer().commit_job().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       JsonOutputFormat                       │
//! │     record_writer(ctx) → JsonOutputWriter     committer()    │
//! └──────────────────────────────────────────────────────────────┘
//!                 │                               │
//! ┌───────────────┴──────────────┐ ┌──────────────┴──────────────┐
//! │       JsonOutputWriter       │ │     FileOutputCommitter     │
//! │  write(key, value) → merge   │ │  work_path    commit_task   │
//! │  close() → one JSON object   │ │  abort_task   commit_job    │
//! └───────────────┬──────────────┘ └──────────────┬──────────────┘
//!                 │                               │
//! ┌───────────────┴───────────────────────────────┴──────────────┐
//! │                      OutputDestination                       │
//! │       local │ s3 │ r2 │ gs │ az    (create-new puts)         │
//! └──────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Common types and type aliases
pub mod types;

/// Job configuration properties
pub mod config;

/// Job and task-attempt identity
pub mod task;

/// Accumulating JSON output: format, writer, committer, destinations
pub mod output;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::JobConfig;
pub use output::{
    collect_into_array, FileOutputCommitter, FnConverter, JsonOutputFormat, JsonOutputWriter,
    OutputDestination, RecordConverter,
};
pub use task::{JobId, TaskAttemptContext};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

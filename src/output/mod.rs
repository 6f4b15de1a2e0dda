//! Output module
//!
//! Accumulates partition records into a single JSON document and commits
//! it through rename-based staging.
//!
//! # Overview
//!
//! This module provides:
//! - Conversion hooks from record key/value pairs to JSON fields
//! - An accumulating writer emitting one JSON object per partition
//! - A rename-based task/job committer with `_temporary` staging
//! - Output destinations (local filesystem, S3, R2, GCS, Azure)

mod committer;
mod converter;
mod destination;
mod format;
mod writer;

pub use committer::{FileOutputCommitter, SUCCESS_MARKER, TEMP_DIR};
pub use converter::{collect_into_array, FnConverter, RecordConverter};
pub use destination::OutputDestination;
pub use format::JsonOutputFormat;
pub use writer::JsonOutputWriter;

//! Output format entry point
//!
//! Wires the conversion hooks, the destination and the committer together
//! and hands out one record writer per partition attempt.

use crate::error::Result;
use crate::output::committer::FileOutputCommitter;
use crate::output::converter::RecordConverter;
use crate::output::destination::OutputDestination;
use crate::output::writer::JsonOutputWriter;
use crate::task::TaskAttemptContext;
use std::sync::Arc;
use tracing::debug;

/// Output format producing one aggregated JSON document per partition
///
/// The counterpart of a line-per-record output format: instead of appending
/// records as they arrive, each partition's records accumulate into a single
/// JSON object that hits storage only when the partition finishes.
#[derive(Debug)]
pub struct JsonOutputFormat<C: RecordConverter> {
    /// Conversion hooks shared across all writers of the job
    converter: Arc<C>,
    /// Staging and promotion for attempt output
    committer: FileOutputCommitter,
}

impl<C: RecordConverter> JsonOutputFormat<C> {
    /// Create a format writing through the given converter to a destination
    pub fn new(converter: C, destination: OutputDestination) -> Self {
        Self {
            converter: Arc::new(converter),
            committer: FileOutputCommitter::new(destination),
        }
    }

    /// The committer staging and promoting this format's output
    pub fn committer(&self) -> &FileOutputCommitter {
        &self.committer
    }

    /// Create the record writer for one partition attempt
    ///
    /// Resolves the file name from `jof.file` and `jof.ext` in the job
    /// config, uniquified by partition, and stages it under the attempt's
    /// work directory. Path resolution only; no I/O happens here.
    pub fn record_writer(&self, ctx: &TaskAttemptContext) -> Result<JsonOutputWriter<C>> {
        let config = ctx.config();
        let file = ctx.unique_file(config.file_name_stem(), config.file_extension());
        let path = format!("{}/{file}", self.committer.work_path(ctx));

        debug!("Record writer for {} staging at {}", ctx.attempt_id(), path);
        Ok(JsonOutputWriter::new(
            Arc::clone(&self.converter),
            self.committer.destination().clone(),
            path,
        ))
    }
}

impl<C: RecordConverter> Clone for JsonOutputFormat<C> {
    fn clone(&self) -> Self {
        Self {
            converter: Arc::clone(&self.converter),
            committer: self.committer.clone(),
        }
    }
}

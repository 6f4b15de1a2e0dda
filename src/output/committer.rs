//! Task and job commit protocol
//!
//! Output written by a task attempt stays invisible under a per-attempt
//! staging directory until the attempt commits. Commit promotes the staged
//! objects to the destination root by rename; abort discards them. Which
//! attempt gets to commit is the framework's call; this committer only
//! provides the staging paths and the promotion.

use crate::error::Result;
use crate::output::destination::OutputDestination;
use crate::task::TaskAttemptContext;
use bytes::Bytes;
use tracing::{debug, info};

/// Directory under the destination root holding all in-flight attempt output
pub const TEMP_DIR: &str = "_temporary";

/// Marker object written to the destination root when the job commits
pub const SUCCESS_MARKER: &str = "_SUCCESS";

/// Rename-based committer staging attempt output under `_temporary`
#[derive(Debug, Clone)]
pub struct FileOutputCommitter {
    destination: OutputDestination,
}

impl FileOutputCommitter {
    /// Create a committer over the given destination
    pub fn new(destination: OutputDestination) -> Self {
        Self { destination }
    }

    /// The destination this committer promotes into
    pub fn destination(&self) -> &OutputDestination {
        &self.destination
    }

    /// Staging directory for one attempt: `_temporary/{attempt_id}`
    ///
    /// Concurrent attempts of the same partition get distinct directories,
    /// so their identically-named output files never collide.
    pub fn work_path(&self, ctx: &TaskAttemptContext) -> String {
        format!("{TEMP_DIR}/{}", ctx.attempt_id())
    }

    /// Promote everything the attempt staged to the destination root
    ///
    /// Returns the promoted destination-relative paths.
    pub async fn commit_task(&self, ctx: &TaskAttemptContext) -> Result<Vec<String>> {
        let work = self.work_path(ctx);
        let staged = self.destination.list_prefix(&work).await?;

        let work_prefix = format!("{work}/");
        let mut promoted = Vec::with_capacity(staged.len());
        for path in staged {
            if let Some(target) = path.strip_prefix(&work_prefix) {
                self.destination.rename(&path, target).await?;
                promoted.push(target.to_string());
            }
        }

        info!(
            "Committed task attempt {}: {} file(s) promoted",
            ctx.attempt_id(),
            promoted.len()
        );
        Ok(promoted)
    }

    /// Discard everything the attempt staged
    pub async fn abort_task(&self, ctx: &TaskAttemptContext) -> Result<()> {
        let removed = self.destination.delete_prefix(&self.work_path(ctx)).await?;
        debug!(
            "Aborted task attempt {}: {} staged file(s) removed",
            ctx.attempt_id(),
            removed
        );
        Ok(())
    }

    /// Finalize the job: clear `_temporary` and write the `_SUCCESS` marker
    ///
    /// Uncommitted attempts (aborted or still staged) are dropped here. The
    /// marker is created with no-overwrite semantics, so committing a job
    /// twice into the same destination fails.
    pub async fn commit_job(&self) -> Result<()> {
        let dropped = self.destination.delete_prefix(TEMP_DIR).await?;
        if dropped > 0 {
            debug!("Dropped {} uncommitted staged file(s)", dropped);
        }

        let marker = self
            .destination
            .put_create(SUCCESS_MARKER, Bytes::new())
            .await?;
        info!("Committed job: {}", marker);
        Ok(())
    }
}

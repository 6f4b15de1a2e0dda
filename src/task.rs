//! Job and task-attempt identity
//!
//! A batch job run is identified by a timestamped id; each output partition
//! is processed by one or more task attempts (speculative execution may run
//! several concurrently). The attempt id keys the per-attempt staging
//! directory, so concurrent attempts of one partition never share a path.

use crate::config::JobConfig;
use chrono::Utc;

// ============================================================================
// Job identity
// ============================================================================

/// Identifier for one batch job run, e.g. `job_20240101120000_0001`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobId {
    stamp: String,
    seq: u32,
}

impl JobId {
    /// Create a job id stamped with the current UTC time
    pub fn new(seq: u32) -> Self {
        Self::with_stamp(Utc::now().format("%Y%m%d%H%M%S").to_string(), seq)
    }

    /// Create a job id with an explicit timestamp component
    pub fn with_stamp(stamp: impl Into<String>, seq: u32) -> Self {
        Self {
            stamp: stamp.into(),
            seq,
        }
    }

    /// The `{stamp}_{seq}` suffix shared by the job id and its attempt ids
    pub fn suffix(&self) -> String {
        format!("{}_{:04}", self.stamp, self.seq)
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "job_{}", self.suffix())
    }
}

// ============================================================================
// Task attempt context
// ============================================================================

/// Execution context handed to the output format for one partition attempt
#[derive(Debug, Clone)]
pub struct TaskAttemptContext {
    job_id: JobId,
    partition: u32,
    attempt: u32,
    config: JobConfig,
}

impl TaskAttemptContext {
    /// Create a context for the first attempt of a partition
    pub fn new(job_id: JobId, partition: u32, config: JobConfig) -> Self {
        Self {
            job_id,
            partition,
            attempt: 0,
            config,
        }
    }

    /// Override the attempt number (speculative or retried attempts)
    #[must_use]
    pub fn with_attempt(mut self, attempt: u32) -> Self {
        self.attempt = attempt;
        self
    }

    /// The job this attempt belongs to
    pub fn job_id(&self) -> &JobId {
        &self.job_id
    }

    /// Zero-based output partition index
    pub fn partition(&self) -> u32 {
        self.partition
    }

    /// Attempt number within the partition, 0 for the first attempt
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Job configuration visible to this attempt
    pub fn config(&self) -> &JobConfig {
        &self.config
    }

    /// Unique attempt identifier, e.g. `attempt_20240101120000_0001_00003_0`
    pub fn attempt_id(&self) -> String {
        format!(
            "attempt_{}_{:05}_{}",
            self.job_id.suffix(),
            self.partition,
            self.attempt
        )
    }

    /// File name unique to this partition, e.g. `json_output-00003.json`
    ///
    /// Concurrent attempts of the same partition produce the same name; the
    /// committer keeps them apart by staging each attempt in its own work
    /// directory.
    pub fn unique_file(&self, stem: &str, extension: &str) -> String {
        format!("{}-{:05}{}", stem, self.partition, extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn fixed_job() -> JobId {
        JobId::with_stamp("20240101120000", 1)
    }

    #[test]
    fn test_job_id_display() {
        assert_eq!(fixed_job().to_string(), "job_20240101120000_0001");
    }

    #[test]
    fn test_job_id_new_uses_numeric_stamp() {
        let id = JobId::new(7).to_string();
        assert!(id.starts_with("job_"));
        assert!(id.ends_with("_0007"));
        // job_ + 14 digit stamp + _ + 4 digit seq
        assert_eq!(id.len(), 4 + 14 + 1 + 4);
    }

    #[test]
    fn test_attempt_id_format() {
        let ctx = TaskAttemptContext::new(fixed_job(), 3, JobConfig::new());
        assert_eq!(ctx.attempt_id(), "attempt_20240101120000_0001_00003_0");

        let retry = ctx.with_attempt(2);
        assert_eq!(retry.attempt_id(), "attempt_20240101120000_0001_00003_2");
    }

    #[test_case(0, "json_output", ".json", "json_output-00000.json" ; "defaults")]
    #[test_case(3, "totals", ".out", "totals-00003.out" ; "custom stem and extension")]
    #[test_case(123_456, "wide", ".json", "wide-123456.json" ; "partition wider than padding")]
    fn test_unique_file_composition(partition: u32, stem: &str, ext: &str, expected: &str) {
        let ctx = TaskAttemptContext::new(fixed_job(), partition, JobConfig::new());
        assert_eq!(ctx.unique_file(stem, ext), expected);
    }

    #[test]
    fn test_speculative_attempts_share_file_name_not_attempt_id() {
        let first = TaskAttemptContext::new(fixed_job(), 5, JobConfig::new());
        let second = first.clone().with_attempt(1);

        assert_eq!(
            first.unique_file("json_output", ".json"),
            second.unique_file("json_output", ".json")
        );
        assert_ne!(first.attempt_id(), second.attempt_id());
    }
}

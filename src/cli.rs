//! Command-line interface
//!
//! A single-partition driver for the output format: reads tab-separated
//! key/value records, accumulates them through the format with identity
//! conversions, then commits the attempt and the job.

use crate::config::JobConfig;
use crate::error::Result;
use crate::output::{collect_into_array, FnConverter, JsonOutputFormat, OutputDestination};
use crate::task::{JobId, TaskAttemptContext};
use crate::types::JsonValue;
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use tracing::debug;

/// Aggregate key/value records into a single JSON document
#[derive(Parser, Debug)]
#[command(name = "json-output-format")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file with one key<TAB>value record per line (- for stdin)
    #[arg(short, long, default_value = "-")]
    pub input: String,

    /// Output destination (local path or cloud URL)
    /// Supports: /path, s3://bucket/path, r2://bucket/path, gs://bucket/path, az://container/path
    #[arg(short, long)]
    pub output: String,

    /// Job configuration file (YAML mapping of string properties)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Partition index this run stands in for
    #[arg(short, long, default_value = "0")]
    pub partition: u32,

    /// What a field-name collision means
    #[arg(short, long, default_value = "last-wins")]
    pub merge: MergePolicy,
}

/// Collision policy for records mapping to the same field name
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum MergePolicy {
    /// Later records replace earlier ones
    LastWins,
    /// Colliding values accumulate into an array
    Collect,
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run one partition attempt end to end and commit the job
    ///
    /// Prints the promoted output path on success.
    pub async fn run(&self) -> Result<()> {
        let config = match &self.cli.config {
            Some(path) => JobConfig::from_file(path)?,
            None => JobConfig::new(),
        };

        let destination = OutputDestination::parse(&self.cli.output)?;
        let converter = match self.cli.merge {
            MergePolicy::LastWins => FnConverter::identity(),
            MergePolicy::Collect => FnConverter::identity().with_merge(collect_into_array),
        };
        let format = JsonOutputFormat::new(converter, destination);

        let ctx = TaskAttemptContext::new(JobId::new(1), self.cli.partition, config);
        let mut writer = format.record_writer(&ctx)?;

        let records = self.read_records()?;
        debug!("Read {} record(s) from {}", records.len(), self.cli.input);
        for (key, value) in records {
            writer.write(key, value)?;
        }
        writer.close().await?;

        let promoted = format.committer().commit_task(&ctx).await?;
        format.committer().commit_job().await?;

        for path in promoted {
            println!("{path}");
        }
        Ok(())
    }

    /// Read `key<TAB>value` records from the input
    ///
    /// Splits each line on the first tab; a line without one is a key with
    /// an empty value. Blank lines are skipped.
    fn read_records(&self) -> Result<Vec<(String, JsonValue)>> {
        let raw = if self.cli.input == "-" {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        } else {
            std::fs::read_to_string(&self.cli.input)?
        };

        let mut records = Vec::new();
        for line in raw.lines() {
            if line.is_empty() {
                continue;
            }
            let (key, value) = match line.split_once('\t') {
                Some((key, value)) => (key, value),
                None => (line, ""),
            };
            records.push((key.to_string(), parse_value(value)));
        }
        Ok(records)
    }
}

/// Parse a record value: JSON when it parses, a bare string otherwise
fn parse_value(raw: &str) -> JsonValue {
    serde_json::from_str(raw).unwrap_or_else(|_| JsonValue::String(raw.to_string()))
}

//! Accumulating JSON record writer
//!
//! One writer per partition attempt. Records accumulate into an in-memory
//! JSON object keyed by converted field name; the serialized object is
//! written to the staged path in a single create-new put when the writer
//! closes.

use crate::error::{Error, Result};
use crate::output::converter::RecordConverter;
use crate::output::destination::OutputDestination;
use crate::types::{JsonDocument, JsonValue};
use bytes::Bytes;
use std::sync::Arc;
use tracing::info;

/// Writer lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriterState {
    Open,
    Closed,
}

/// Accumulating JSON writer for one partition attempt
///
/// Exclusive owner of the accumulated document: nothing is visible outside
/// until `close` serializes it, and the framework's commit step makes the
/// staged file visible at the destination root.
pub struct JsonOutputWriter<C: RecordConverter> {
    /// Conversion hooks shared with the owning format
    converter: Arc<C>,
    /// Where the serialized document goes on close
    destination: OutputDestination,
    /// Destination-relative staged file path
    path: String,
    /// Accumulated document; field order is first-insertion order
    document: JsonDocument,
    /// Number of records accepted
    records_written: u64,
    state: WriterState,
}

impl<C: RecordConverter> JsonOutputWriter<C> {
    /// Create a writer staging its output at the given path
    pub fn new(
        converter: Arc<C>,
        destination: OutputDestination,
        path: impl Into<String>,
    ) -> Self {
        Self {
            converter,
            destination,
            path: path.into(),
            document: JsonDocument::new(),
            records_written: 0,
            state: WriterState::Open,
        }
    }

    /// Accept one record into the accumulated document
    ///
    /// The key is converted to a field name and the value to JSON; on a
    /// field collision the converter's `merge` decides the stored value.
    /// Purely in-memory. A failing hook returns [`Error::Callback`] and
    /// leaves the document exactly as it was.
    pub fn write(&mut self, key: C::Key, value: C::Value) -> Result<()> {
        if self.state == WriterState::Closed {
            return Err(Error::WriterClosed);
        }

        let field = self
            .converter
            .field_name(&key)
            .map_err(|e| Error::callback("field_name", e))?;
        let converted = self
            .converter
            .to_json(value)
            .map_err(|e| Error::callback("to_json", e))?;

        let entry = match self.document.get(&field) {
            Some(existing) => self
                .converter
                .merge(existing, converted)
                .map_err(|e| Error::callback("merge", e))?,
            None => converted,
        };

        self.document.insert(field, entry);
        self.records_written += 1;
        Ok(())
    }

    /// Serialize the document and write it to the staged path
    ///
    /// Exactly one JSON object is written, `{}` when no records arrived.
    /// Terminal: any later `write` or `close` is rejected with
    /// [`Error::WriterClosed`]. Returns the number of bytes written.
    pub async fn close(&mut self) -> Result<u64> {
        if self.state == WriterState::Closed {
            return Err(Error::WriterClosed);
        }
        // Terminal even when the put fails; a failed close never reopens
        self.state = WriterState::Closed;

        let document = std::mem::take(&mut self.document);
        let field_count = document.len();
        let bytes = serde_json::to_vec(&JsonValue::Object(document))?;
        let len = bytes.len() as u64;

        let full_path = self
            .destination
            .put_create(&self.path, Bytes::from(bytes))
            .await?;
        info!(
            "Wrote {} record(s) as {} field(s), {} bytes: {}",
            self.records_written, field_count, len, full_path
        );
        Ok(len)
    }

    /// Number of records accepted so far
    #[must_use]
    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Number of fields currently accumulated
    ///
    /// Lower than `records_written` once any field has collided; zero again
    /// after `close` hands the document off.
    #[must_use]
    pub fn fields(&self) -> usize {
        self.document.len()
    }

    /// Destination-relative path the document is staged at
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl<C: RecordConverter> std::fmt::Debug for JsonOutputWriter<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonOutputWriter")
            .field("path", &self.path)
            .field("records_written", &self.records_written)
            .field("fields", &self.document.len())
            .field("state", &self.state)
            .finish()
    }
}

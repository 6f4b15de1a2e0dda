//! Common types used throughout the JSON output format
//!
//! Shared type aliases for the JSON tree model. The accumulated document is
//! a `serde_json` object map; the crate enables the `preserve_order` feature
//! so field order is the insertion order of the first occurrence of each
//! field name.

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// The in-memory JSON object built by one record writer across its lifetime
pub type JsonDocument = serde_json::Map<String, JsonValue>;

/// String key used to place a value inside the accumulated JSON object
pub type FieldName = String;

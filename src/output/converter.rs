//! Record conversion hooks
//!
//! Callers plug conversion behavior in through [`RecordConverter`]: how a
//! record key becomes a JSON field name, how a record value becomes a JSON
//! value, and what happens when two records land on the same field name.

use crate::types::JsonValue;

/// Conversion hooks applied to every record of a partition
///
/// `field_name` and `to_json` run once per record. `merge` runs only when a
/// record's field name is already present in the accumulated document; the
/// provided implementation keeps the incoming value, so the last record
/// written wins. Any hook error aborts the surrounding write without
/// touching the document.
pub trait RecordConverter: Send + Sync {
    /// Record key type
    type Key;
    /// Record value type
    type Value;

    /// Convert a record key into the JSON field name to file it under
    fn field_name(&self, key: &Self::Key) -> anyhow::Result<String>;

    /// Convert a record value into the JSON value to store
    fn to_json(&self, value: Self::Value) -> anyhow::Result<JsonValue>;

    /// Combine an existing entry with an incoming one on field collision
    fn merge(&self, existing: &JsonValue, incoming: JsonValue) -> anyhow::Result<JsonValue> {
        // Last write wins
        let _ = existing;
        Ok(incoming)
    }
}

/// Merge hook that accumulates colliding values into an array
///
/// The first collision turns the entry into a two-element array; later
/// collisions append. An entry that is already an array is extended, not
/// nested. Plug in via [`FnConverter::with_merge`] or call from a custom
/// [`RecordConverter::merge`].
pub fn collect_into_array(existing: &JsonValue, incoming: JsonValue) -> anyhow::Result<JsonValue> {
    match existing {
        JsonValue::Array(items) => {
            let mut items = items.clone();
            items.push(incoming);
            Ok(JsonValue::Array(items))
        }
        other => Ok(JsonValue::Array(vec![other.clone(), incoming])),
    }
}

// ============================================================================
// Function-based converter
// ============================================================================

type FieldNameFn<K> = dyn Fn(&K) -> anyhow::Result<String> + Send + Sync;
type ToJsonFn<V> = dyn Fn(V) -> anyhow::Result<JsonValue> + Send + Sync;
type MergeFn = dyn Fn(&JsonValue, JsonValue) -> anyhow::Result<JsonValue> + Send + Sync;

/// [`RecordConverter`] assembled from plain functions
///
/// Covers the case where the conversion hooks are closures rather than a
/// dedicated type.
pub struct FnConverter<K, V> {
    field_name: Box<FieldNameFn<K>>,
    to_json: Box<ToJsonFn<V>>,
    merge: Option<Box<MergeFn>>,
}

impl<K, V> FnConverter<K, V> {
    /// Build a converter from the two required hooks
    pub fn new(
        field_name: impl Fn(&K) -> anyhow::Result<String> + Send + Sync + 'static,
        to_json: impl Fn(V) -> anyhow::Result<JsonValue> + Send + Sync + 'static,
    ) -> Self {
        Self {
            field_name: Box::new(field_name),
            to_json: Box::new(to_json),
            merge: None,
        }
    }

    /// Replace the default last-write-wins collision behavior
    #[must_use]
    pub fn with_merge(
        mut self,
        merge: impl Fn(&JsonValue, JsonValue) -> anyhow::Result<JsonValue> + Send + Sync + 'static,
    ) -> Self {
        self.merge = Some(Box::new(merge));
        self
    }
}

impl FnConverter<String, JsonValue> {
    /// String keys become field names unchanged, values are stored as-is
    pub fn identity() -> Self {
        Self::new(|key| Ok(key.clone()), Ok)
    }
}

impl<K, V> RecordConverter for FnConverter<K, V>
where
    K: Send + Sync,
    V: Send + Sync,
{
    type Key = K;
    type Value = V;

    fn field_name(&self, key: &K) -> anyhow::Result<String> {
        (self.field_name)(key)
    }

    fn to_json(&self, value: V) -> anyhow::Result<JsonValue> {
        (self.to_json)(value)
    }

    fn merge(&self, existing: &JsonValue, incoming: JsonValue) -> anyhow::Result<JsonValue> {
        match &self.merge {
            Some(merge) => merge(existing, incoming),
            None => Ok(incoming),
        }
    }
}

impl<K, V> std::fmt::Debug for FnConverter<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnConverter")
            .field("custom_merge", &self.merge.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_identity_converter() {
        let converter = FnConverter::identity();
        assert_eq!(converter.field_name(&"count".to_string()).unwrap(), "count");
        assert_eq!(converter.to_json(json!(42)).unwrap(), json!(42));
    }

    #[test]
    fn test_default_merge_is_last_write_wins() {
        let converter = FnConverter::identity();
        let merged = converter.merge(&json!(1), json!(2)).unwrap();
        assert_eq!(merged, json!(2));
    }

    #[test]
    fn test_with_merge_overrides_collision_behavior() {
        let converter = FnConverter::identity().with_merge(collect_into_array);
        let merged = converter.merge(&json!(1), json!(2)).unwrap();
        assert_eq!(merged, json!([1, 2]));
    }

    #[test]
    fn test_collect_into_array_extends_existing_array() {
        let first = collect_into_array(&json!("a"), json!("b")).unwrap();
        assert_eq!(first, json!(["a", "b"]));

        let second = collect_into_array(&first, json!("c")).unwrap();
        assert_eq!(second, json!(["a", "b", "c"]));
    }

    #[test]
    fn test_hook_errors_surface() {
        let converter: FnConverter<String, JsonValue> = FnConverter::new(
            |_key| anyhow::bail!("bad key"),
            Ok,
        );

        let err = converter.field_name(&"k".to_string()).unwrap_err();
        assert!(err.to_string().contains("bad key"));
    }
}

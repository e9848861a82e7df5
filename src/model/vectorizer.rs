//! Feature vectorization.
//!
//! Maps untyped feature records (JSON objects) into fixed-width numeric
//! vectors: numeric and boolean values pass through under their own key,
//! string values become one-hot `"key=value"` features. The vocabulary is
//! learned once at training time and frozen thereafter; unknown keys and
//! unseen categorical values are silently ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One individual's survey responses. No required fields.
pub type FeatureRecord = serde_json::Map<String, Value>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictVectorizer {
    /// Learned feature names, sorted. Index in this list is the column index.
    pub feature_names: Vec<String>,
}

impl DictVectorizer {
    /// Learn the vocabulary from a set of training records.
    pub fn fit(records: &[FeatureRecord]) -> Self {
        let mut names = std::collections::BTreeSet::new();

        for record in records {
            for (key, value) in record {
                if let Some(name) = feature_name(key, value) {
                    names.insert(name);
                }
            }
        }

        Self {
            feature_names: names.into_iter().collect(),
        }
    }

    /// Number of columns in the output vector.
    pub fn width(&self) -> usize {
        self.feature_names.len()
    }

    /// Column index for a learned feature name.
    pub fn feature_index(&self, name: &str) -> Option<usize> {
        self.feature_names
            .binary_search_by(|n| n.as_str().cmp(name))
            .ok()
    }

    /// Encode a record into a fixed-width vector.
    ///
    /// Never fails: missing keys contribute 0.0, unknown keys and unseen
    /// categorical values contribute nothing.
    pub fn transform(&self, record: &FeatureRecord) -> Vec<f64> {
        let mut x = vec![0.0; self.width()];

        for (key, value) in record {
            match value {
                Value::Number(n) => {
                    if let (Some(i), Some(v)) = (self.feature_index(key), n.as_f64()) {
                        x[i] = v;
                    }
                }
                Value::Bool(b) => {
                    if let Some(i) = self.feature_index(key) {
                        x[i] = if *b { 1.0 } else { 0.0 };
                    }
                }
                Value::String(s) => {
                    if let Some(i) = self.feature_index(&format!("{key}={s}")) {
                        x[i] = 1.0;
                    }
                }
                // Nested values carry no vectorizable signal
                _ => {}
            }
        }

        x
    }
}

fn feature_name(key: &str, value: &Value) -> Option<String> {
    match value {
        Value::Number(_) | Value::Bool(_) => Some(key.to_string()),
        Value::String(s) => Some(format!("{key}={s}")),
        _ => None,
    }
}

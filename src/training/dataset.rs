//! Training dataset ingestion.

use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use crate::model::FeatureRecord;

pub const TARGET_COLUMN: &str = "Has_Mental_Health_Issue";

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("target column '{0}' not found")]
    MissingTarget(&'static str),

    #[error("row {row}: target value '{value}' is not numeric")]
    BadTarget { row: usize, value: String },
}

#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<FeatureRecord>,
    pub targets: Vec<u8>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Load a CSV into feature records plus the binary target vector.
///
/// Cells parse as numbers when possible, otherwise stay categorical
/// strings; empty cells become 0 (the original pipeline's fillna(0)).
pub fn load_csv(path: &Path) -> Result<Dataset, DatasetError> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    let target_col = headers
        .iter()
        .position(|h| h == TARGET_COLUMN)
        .ok_or(DatasetError::MissingTarget(TARGET_COLUMN))?;

    let mut records = Vec::new();
    let mut targets = Vec::new();

    for (row, result) in reader.records().enumerate() {
        let record = result?;

        let raw_target = record.get(target_col).unwrap_or("").trim();
        let target: f64 = raw_target.parse().map_err(|_| DatasetError::BadTarget {
            row,
            value: raw_target.to_string(),
        })?;
        targets.push(u8::from(target != 0.0));

        let mut features = FeatureRecord::new();
        for (col, cell) in record.iter().enumerate() {
            if col == target_col {
                continue;
            }
            let key = headers.get(col).unwrap_or_default().to_string();
            features.insert(key, parse_cell(cell.trim()));
        }
        records.push(features);
    }

    Ok(Dataset { records, targets })
}

fn parse_cell(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::from(0);
    }
    if let Ok(n) = raw.parse::<i64>() {
        return Value::from(n);
    }
    if let Ok(f) = raw.parse::<f64>() {
        return Value::from(f);
    }
    Value::from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_csv() {
        let file = write_csv(
            "Age,Smoking,Sleep_Hours_Night,Has_Mental_Health_Issue\n\
             34,Yes,6.5,1\n\
             28,No,8.0,0\n",
        );

        let ds = load_csv(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.targets, vec![1, 0]);

        assert_eq!(ds.records[0]["Age"], Value::from(34));
        assert_eq!(ds.records[0]["Smoking"], Value::from("Yes"));
        assert_eq!(ds.records[0]["Sleep_Hours_Night"], Value::from(6.5));
        assert!(!ds.records[0].contains_key(TARGET_COLUMN));
    }

    #[test]
    fn test_empty_cell_becomes_zero() {
        let file = write_csv("Age,Smoking,Has_Mental_Health_Issue\n,Yes,0\n");

        let ds = load_csv(file.path()).unwrap();
        assert_eq!(ds.records[0]["Age"], Value::from(0));
    }

    #[test]
    fn test_missing_target_column() {
        let file = write_csv("Age,Smoking\n34,Yes\n");

        let err = load_csv(file.path()).unwrap_err();
        assert!(matches!(err, DatasetError::MissingTarget(_)));
    }

    #[test]
    fn test_bad_target_value() {
        let file = write_csv("Age,Has_Mental_Health_Issue\n34,maybe\n");

        let err = load_csv(file.path()).unwrap_err();
        assert!(matches!(err, DatasetError::BadTarget { row: 0, .. }));
    }
}

//! Model artifact: the serialized bundle produced by training.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logistic::{Hyperparams, LogisticModel};
use super::vectorizer::{DictVectorizer, FeatureRecord};
use crate::training::metrics::EvalMetrics;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("model artifact {path} is corrupt: {source}")]
    Format {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Immutable bundle of everything the serving side needs, plus the training
/// record (hyperparameters, metrics, seed) for provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub model: LogisticModel,
    pub vectorizer: DictVectorizer,
    pub best_params: Hyperparams,
    pub validation_metrics: EvalMetrics,
    pub test_metrics: EvalMetrics,
    pub random_state: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Positive-class probability in [0, 1]
    pub probability: f64,
    /// 1 iff probability >= 0.5
    pub prediction: u8,
}

impl ModelArtifact {
    /// Score one feature record.
    pub fn predict(&self, record: &FeatureRecord) -> Prediction {
        let x = self.vectorizer.transform(record);
        let probability = self.model.predict_proba(&x);

        Prediction {
            probability,
            prediction: u8::from(probability >= 0.5),
        }
    }

    /// Atomic write: serialize next to the target, then rename over it.
    pub fn save(&self, path: &Path) -> Result<(), ArtifactError> {
        let bytes = serde_json::to_vec(self).map_err(|source| ArtifactError::Format {
            path: path.display().to_string(),
            source,
        })?;

        let tmp = path.with_extension("tmp");
        fs::write(&tmp, bytes).map_err(|source| ArtifactError::Io {
            path: tmp.display().to_string(),
            source,
        })?;
        fs::rename(&tmp, path).map_err(|source| ArtifactError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let bytes = fs::read(path).map_err(|source| ArtifactError::Io {
            path: path.display().to_string(),
            source,
        })?;

        serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Format {
            path: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixture() -> ModelArtifact {
        let records: Vec<FeatureRecord> = vec![json!({"Age": 34, "Smoking": "Yes"})
            .as_object()
            .cloned()
            .unwrap()];
        let vectorizer = DictVectorizer::fit(&records);
        let model = LogisticModel {
            weights: vec![0.0; vectorizer.width()],
            intercept: -1.0,
        };

        ModelArtifact {
            model,
            vectorizer,
            best_params: Hyperparams {
                c: 1.0,
                balanced: false,
            },
            validation_metrics: EvalMetrics::default(),
            test_metrics: EvalMetrics::default(),
            random_state: 42,
        }
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.bin");

        let artifact = fixture();
        artifact.save(&path).unwrap();
        let loaded = ModelArtifact::load(&path).unwrap();

        assert_eq!(loaded.model.weights, artifact.model.weights);
        assert_eq!(loaded.vectorizer.feature_names, artifact.vectorizer.feature_names);
        assert_eq!(loaded.random_state, 42);
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.bin");

        fixture().save(&path).unwrap();
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_load_missing_file() {
        let err = ModelArtifact::load(Path::new("/nonexistent/model.bin")).unwrap_err();
        assert!(matches!(err, ArtifactError::Io { .. }));
    }

    #[test]
    fn test_load_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.bin");
        std::fs::write(&path, b"not json").unwrap();

        let err = ModelArtifact::load(&path).unwrap_err();
        assert!(matches!(err, ArtifactError::Format { .. }));
    }

    #[test]
    fn test_predict_deterministic() {
        let artifact = fixture();
        let record = json!({"Age": 34, "Smoking": "Yes"})
            .as_object()
            .cloned()
            .unwrap();

        let a = artifact.predict(&record);
        let b = artifact.predict(&record);
        assert_eq!(a, b);
        assert!((0.0..=1.0).contains(&a.probability));
    }
}

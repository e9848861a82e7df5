//! Lazy, load-once artifact cache.
//!
//! Two states only: not loaded, then loaded. The transition happens on the
//! first prediction request and is never reversed; a concurrent first load
//! is benign (idempotent, same artifact).

use std::path::Path;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use super::artifact::{ArtifactError, ModelArtifact};

#[derive(Clone, Default)]
pub struct ModelRegistry {
    cell: Arc<OnceCell<ModelArtifact>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load on first use, then return the cached artifact for the rest of
    /// the process lifetime. A failed load is not cached.
    pub fn get_or_load(&self, path: &Path) -> Result<&ModelArtifact, ArtifactError> {
        self.cell.get_or_try_init(|| {
            tracing::info!("Loading model artifact from {}", path.display());
            ModelArtifact::load(path)
        })
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DictVectorizer, Hyperparams, LogisticModel};
    use crate::training::metrics::EvalMetrics;

    fn artifact() -> ModelArtifact {
        ModelArtifact {
            model: LogisticModel {
                weights: vec![],
                intercept: 0.0,
            },
            vectorizer: DictVectorizer::fit(&[]),
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
    fn test_loads_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.bin");
        artifact().save(&path).unwrap();

        let registry = ModelRegistry::new();
        assert!(!registry.is_loaded());

        registry.get_or_load(&path).unwrap();
        assert!(registry.is_loaded());

        // Deleting the file no longer matters; the artifact is cached.
        std::fs::remove_file(&path).unwrap();
        assert!(registry.get_or_load(&path).is_ok());
    }

    #[test]
    fn test_failed_load_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.bin");

        let registry = ModelRegistry::new();
        assert!(registry.get_or_load(&path).is_err());
        assert!(!registry.is_loaded());

        artifact().save(&path).unwrap();
        assert!(registry.get_or_load(&path).is_ok());
    }
}

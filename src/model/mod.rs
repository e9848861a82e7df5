//! Model artifact, feature vectorization and scoring.

pub mod artifact;
pub mod logistic;
pub mod registry;
pub mod vectorizer;

pub use artifact::{ArtifactError, ModelArtifact, Prediction};
pub use logistic::{FitError, Hyperparams, LogisticModel};
pub use registry::ModelRegistry;
pub use vectorizer::{DictVectorizer, FeatureRecord};

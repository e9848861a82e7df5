//! Training pipeline: CSV ingestion, stratified splits, evaluation metrics
//! and randomized hyperparameter search. Driven by the `train` binary.

pub mod dataset;
pub mod metrics;
pub mod search;
pub mod split;

pub use dataset::{Dataset, DatasetError, TARGET_COLUMN};
pub use metrics::{evaluate, EvalMetrics};
pub use search::{randomized_search, SearchResult};
pub use split::{stratified_kfold, stratified_split};

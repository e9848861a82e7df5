//! Training pipeline entry point.
//!
//! Loads the survey CSV, runs a stratified 60/20/20 split, fits the
//! vectorizer on the training part, picks hyperparameters by randomized
//! search with cross-validated ROC-AUC, retrains on train+validation and
//! writes the model artifact.

use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;

use mental_health_api::config::Config;
use mental_health_api::model::{DictVectorizer, LogisticModel, ModelArtifact};
use mental_health_api::training::{
    dataset, evaluate, randomized_search, stratified_split,
};

const RANDOM_STATE: u64 = 42;
const SEARCH_ITERATIONS: usize = 20;
const CV_FOLDS: usize = 5;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "train=info,mental_health_api=info".into()),
        )
        .init();

    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // Load & split
    let ds = dataset::load_csv(&config.data_path)
        .with_context(|| format!("loading dataset from {}", config.data_path.display()))?;
    tracing::info!(rows = ds.len(), "Dataset loaded");

    let mut rng = StdRng::seed_from_u64(RANDOM_STATE);

    let (full_train_idx, test_idx) = stratified_split(&ds.targets, 0.2, &mut rng);
    let full_train_y = subset(&ds.targets, &full_train_idx);
    // 25% of the remaining 80% -> 60/20/20 overall
    let (train_rel, val_rel) = stratified_split(&full_train_y, 0.25, &mut rng);

    let train_idx: Vec<usize> = train_rel.iter().map(|&i| full_train_idx[i]).collect();
    let val_idx: Vec<usize> = val_rel.iter().map(|&i| full_train_idx[i]).collect();

    let train_records = subset(&ds.records, &train_idx);
    let vectorizer = DictVectorizer::fit(&train_records);
    tracing::info!(features = vectorizer.width(), "Vectorizer fitted");

    let x_train: Vec<Vec<f64>> = train_records.iter().map(|r| vectorizer.transform(r)).collect();
    let x_val: Vec<Vec<f64>> = val_idx.iter().map(|&i| vectorizer.transform(&ds.records[i])).collect();
    let x_test: Vec<Vec<f64>> = test_idx.iter().map(|&i| vectorizer.transform(&ds.records[i])).collect();

    let y_train = subset(&ds.targets, &train_idx);
    let y_val = subset(&ds.targets, &val_idx);
    let y_test = subset(&ds.targets, &test_idx);

    tracing::info!(
        train = x_train.len(),
        val = x_val.len(),
        test = x_test.len(),
        "Train / val / test split"
    );

    // Hyperparameter tuning
    tracing::info!("Hyperparameter tuning: logistic regression");
    let search = randomized_search(&x_train, &y_train, SEARCH_ITERATIONS, CV_FOLDS, &mut rng)?;
    tracing::info!(
        c = search.params.c,
        balanced = search.params.balanced,
        cv_roc_auc = search.cv_score,
        "Best candidate"
    );

    let model = LogisticModel::fit(&x_train, &y_train, &search.params)?;
    let validation_metrics = evaluate(&model, &x_val, &y_val);
    tracing::info!(?validation_metrics, "Validation metrics");

    // Final retrain on train + validation
    tracing::info!("Final retrain on train + validation");
    let mut x_full = x_train;
    x_full.extend(x_val);
    let mut y_full = y_train;
    y_full.extend(y_val);

    let model = LogisticModel::fit(&x_full, &y_full, &search.params)?;
    let test_metrics = evaluate(&model, &x_test, &y_test);
    tracing::info!(?test_metrics, "Final test metrics");

    // Save artifact
    let artifact = ModelArtifact {
        model,
        vectorizer,
        best_params: search.params,
        validation_metrics,
        test_metrics,
        random_state: RANDOM_STATE,
    };
    artifact
        .save(&config.model_path)
        .with_context(|| format!("saving artifact to {}", config.model_path.display()))?;

    tracing::info!("Model saved to {}", config.model_path.display());
    Ok(())
}

fn subset<T: Clone>(items: &[T], idx: &[usize]) -> Vec<T> {
    idx.iter().map(|&i| items[i].clone()).collect()
}

//! Toy danceability classifier.
//!
//! [`train`] splits the samples 80/20 with a fixed seed, fits a [`RandomForest`]
//! on the training rows and scores it on the held-out rows. The model lives only
//! as long as the request that built it.

mod forest;
mod split;
mod tree;

pub use forest::{ForestParams, RandomForest};
pub use split::{Split, train_test_split};
pub use tree::DecisionTree;

use crate::{error::TrainingError, types::FeatureVector};

/// Seed for both the evaluation split and the forest's bootstrap sampling.
pub const SEED: u64 = 42;

/// Share of the samples held out for evaluation, in percent.
pub const TEST_PERCENT: usize = 20;

#[derive(Debug, Clone)]
pub struct TrainedModel {
    pub forest: RandomForest,
    pub report: ModelReport,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelReport {
    pub accuracy: f64,
    pub train_size: usize,
    pub test_size: usize,
}

/// Trains the default forest on `features` and `labels`.
///
/// Shorthand for [`train_with`] with [`ForestParams::default`].
pub fn train(features: &[FeatureVector], labels: &[u8]) -> Result<TrainedModel, TrainingError> {
    train_with(features, labels, ForestParams::default())
}

/// Splits the samples, fits a forest on the training partition and scores it on
/// the held-out partition.
///
/// # Arguments
///
/// * `features` - One `[danceability, energy, tempo]` row per track
/// * `labels` - Parallel `0`/`1` labels, one per row
/// * `params` - Forest size, features searched per split and bootstrap seed
///
/// # Split
///
/// The row indices are shuffled with [`SEED`] and the first
/// `ceil(n * TEST_PERCENT / 100)` are held out, so the same rows always produce
/// the same partition.
///
/// # Errors
///
/// - [`TrainingError::LengthMismatch`] when the slices differ in length
/// - [`TrainingError::NoSamples`] for empty input
/// - [`TrainingError::TooFewSamples`] when nothing is left to train on after the
///   split (a single sample)
/// - [`TrainingError::SingleClass`] when the training partition has one label
///
/// # Example
///
/// ```
/// let trained = model::train_with(&rows, &labels, ForestParams { n_trees: 10, ..Default::default() })?;
/// println!("accuracy {:.4}", trained.report.accuracy);
/// ```
pub fn train_with(
    features: &[FeatureVector],
    labels: &[u8],
    params: ForestParams,
) -> Result<TrainedModel, TrainingError> {
    if features.len() != labels.len() {
        return Err(TrainingError::LengthMismatch {
            features: features.len(),
            labels: labels.len(),
        });
    }
    if features.is_empty() {
        return Err(TrainingError::NoSamples);
    }

    let split = train_test_split(features.len(), TEST_PERCENT, SEED);
    if split.train.is_empty() {
        return Err(TrainingError::TooFewSamples(features.len()));
    }

    let (train_rows, train_labels) = select(features, labels, &split.train);
    let (test_rows, test_labels) = select(features, labels, &split.test);

    let forest = RandomForest::fit(&train_rows, &train_labels, params)?;
    let predictions = forest.predict_all(&test_rows);

    Ok(TrainedModel {
        forest,
        report: ModelReport {
            accuracy: accuracy(&test_labels, &predictions),
            train_size: split.train.len(),
            test_size: split.test.len(),
        },
    })
}

/// Fraction of positions where `expected` and `predicted` agree. Empty input
/// scores `0.0`.
pub fn accuracy(expected: &[u8], predicted: &[u8]) -> f64 {
    if expected.is_empty() {
        return 0.0;
    }
    let correct = expected
        .iter()
        .zip(predicted)
        .filter(|(a, b)| a == b)
        .count();
    correct as f64 / expected.len() as f64
}

fn select(features: &[FeatureVector], labels: &[u8], indices: &[usize]) -> (Vec<FeatureVector>, Vec<u8>) {
    indices.iter().map(|&i| (features[i], labels[i])).unzip()
}

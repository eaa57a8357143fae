use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    error::TrainingError,
    types::{FEATURE_COUNT, FeatureVector},
};

use super::tree::DecisionTree;

#[derive(Debug, Clone, Copy)]
pub struct ForestParams {
    pub n_trees: usize,
    /// Features searched per split; `floor(sqrt(FEATURE_COUNT))` by default.
    pub max_features: usize,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_features: (FEATURE_COUNT as f64).sqrt().floor() as usize,
            seed: super::SEED,
        }
    }
}

/// Bagged ensemble of [`DecisionTree`]s voting on a binary label.
#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Fits `params.n_trees` trees, each on a bootstrap sample of the rows.
    ///
    /// # Errors
    ///
    /// - [`TrainingError::NoSamples`] for empty input
    /// - [`TrainingError::LengthMismatch`] when rows and labels differ in length
    /// - [`TrainingError::SingleClass`] when every label is the same
    pub fn fit(
        rows: &[FeatureVector],
        labels: &[u8],
        params: ForestParams,
    ) -> Result<Self, TrainingError> {
        if rows.len() != labels.len() {
            return Err(TrainingError::LengthMismatch {
                features: rows.len(),
                labels: labels.len(),
            });
        }
        let Some(&first) = labels.first() else {
            return Err(TrainingError::NoSamples);
        };
        if labels.iter().all(|&label| label == first) {
            return Err(TrainingError::SingleClass(first));
        }

        let n = rows.len();
        let mut rng = StdRng::seed_from_u64(params.seed);
        let trees = (0..params.n_trees.max(1))
            .map(|_| {
                let sample: Vec<usize> = (0..n).map(|_| rng.random_range(0..n)).collect();
                DecisionTree::fit(rows, labels, sample, params.max_features, &mut rng)
            })
            .collect();

        Ok(Self { trees })
    }

    /// Predicts the label of one row.
    ///
    /// Every tree votes and the majority wins; ties go to class `0`.
    pub fn predict(&self, row: &FeatureVector) -> u8 {
        let ones = self.trees.iter().filter(|tree| tree.predict(row) == 1).count();
        if ones * 2 > self.trees.len() { 1 } else { 0 }
    }

    /// Predicts a label for each row, in order.
    pub fn predict_all(&self, rows: &[FeatureVector]) -> Vec<u8> {
        rows.iter().map(|row| self.predict(row)).collect()
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Depth of the deepest tree, `0` if every tree is a single leaf.
    pub fn max_depth(&self) -> usize {
        self.trees.iter().map(DecisionTree::depth).max().unwrap_or(0)
    }
}

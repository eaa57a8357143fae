use rand::{rngs::StdRng, seq::SliceRandom};

use crate::types::{FEATURE_COUNT, FeatureVector};

/// Nodes with fewer samples than this become leaves.
const MIN_SAMPLES_SPLIT: usize = 2;

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        class: u8,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// Binary classification tree grown with Gini impurity until every leaf is pure
/// or too small to split.
#[derive(Debug, Clone)]
pub struct DecisionTree {
    root: Node,
}

impl DecisionTree {
    /// Grows a tree on the rows selected by `indices` (duplicates allowed, as
    /// produced by bootstrap sampling). At each node `max_features` randomly
    /// chosen features are searched for the best threshold.
    pub fn fit(
        rows: &[FeatureVector],
        labels: &[u8],
        indices: Vec<usize>,
        max_features: usize,
        rng: &mut StdRng,
    ) -> Self {
        let max_features = max_features.clamp(1, FEATURE_COUNT);
        Self {
            root: build(rows, labels, indices, max_features, rng),
        }
    }

    pub fn predict(&self, row: &FeatureVector) -> u8 {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { class } => return *class,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }

    pub fn depth(&self) -> usize {
        fn walk(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(left).max(walk(right)),
            }
        }
        walk(&self.root)
    }
}

fn build(
    rows: &[FeatureVector],
    labels: &[u8],
    indices: Vec<usize>,
    max_features: usize,
    rng: &mut StdRng,
) -> Node {
    let (zeros, ones) = class_counts(labels, &indices);
    let majority = if ones > zeros { 1 } else { 0 };

    if zeros == 0 || ones == 0 || indices.len() < MIN_SAMPLES_SPLIT {
        return Node::Leaf { class: majority };
    }

    // Keep drawing features past max_features while every one seen so far is
    // constant on this node.
    let mut candidates: Vec<usize> = (0..FEATURE_COUNT).collect();
    candidates.shuffle(rng);

    let mut best: Option<(usize, f64, f64)> = None;
    let mut searched = 0;
    for feature in candidates {
        if searched >= max_features && best.is_some() {
            break;
        }
        searched += 1;
        if let Some((threshold, impurity)) = best_threshold(rows, labels, &indices, feature) {
            if best.is_none_or(|(_, _, current)| impurity < current) {
                best = Some((feature, threshold, impurity));
            }
        }
    }

    let Some((feature, threshold, _)) = best else {
        return Node::Leaf { class: majority };
    };

    let (left, right): (Vec<usize>, Vec<usize>) = indices
        .into_iter()
        .partition(|&i| rows[i][feature] <= threshold);

    if left.is_empty() || right.is_empty() {
        return Node::Leaf { class: majority };
    }

    Node::Split {
        feature,
        threshold,
        left: Box::new(build(rows, labels, left, max_features, rng)),
        right: Box::new(build(rows, labels, right, max_features, rng)),
    }
}

/// Best midpoint threshold on one feature and its weighted Gini impurity.
/// `None` when the feature is constant over `indices`.
fn best_threshold(
    rows: &[FeatureVector],
    labels: &[u8],
    indices: &[usize],
    feature: usize,
) -> Option<(f64, f64)> {
    let mut sorted: Vec<(f64, u8)> = indices
        .iter()
        .map(|&i| (rows[i][feature], labels[i]))
        .collect();
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

    let total = sorted.len();
    let total_ones = sorted.iter().filter(|(_, label)| *label == 1).count();

    let mut best: Option<(f64, f64)> = None;
    let mut left_ones = 0;
    for i in 1..total {
        if sorted[i - 1].1 == 1 {
            left_ones += 1;
        }
        if sorted[i - 1].0 == sorted[i].0 {
            continue;
        }

        let left_len = i;
        let right_len = total - i;
        let impurity = (left_len as f64 * gini(left_len - left_ones, left_ones)
            + right_len as f64 * gini(right_len - (total_ones - left_ones), total_ones - left_ones))
            / total as f64;

        if best.is_none_or(|(_, current)| impurity < current) {
            best = Some(((sorted[i - 1].0 + sorted[i].0) / 2.0, impurity));
        }
    }
    best
}

fn gini(zeros: usize, ones: usize) -> f64 {
    let n = (zeros + ones) as f64;
    if n == 0.0 {
        return 0.0;
    }
    let p0 = zeros as f64 / n;
    let p1 = ones as f64 / n;
    1.0 - p0 * p0 - p1 * p1
}

fn class_counts(labels: &[u8], indices: &[usize]) -> (usize, usize) {
    let ones = indices.iter().filter(|&&i| labels[i] == 1).count();
    (indices.len() - ones, ones)
}

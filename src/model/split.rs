use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

/// Row indices assigned to each partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffles `0..n` with a seeded generator and holds out `ceil(n * test_percent / 100)`
/// rows for evaluation. The same `n` and `seed` always produce the same split.
pub fn train_test_split(n: usize, test_percent: usize, seed: u64) -> Split {
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test_len = (n * test_percent).div_ceil(100).min(n);
    let train = indices.split_off(test_len);

    Split {
        train,
        test: indices,
    }
}

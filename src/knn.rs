//! Majority-vote k-nearest-neighbour classification.

use linfa_nn::distance::L2Dist;
use linfa_nn::{LinearSearch, NearestNeighbour};
use ndarray::Array2;

use crate::dataset::Gender;
use crate::error::{Error, Result};

/// Predicts a label for every row of `test` by majority vote among the `k`
/// nearest training rows under Euclidean distance. The search is a linear
/// scan, which is fine at the dataset sizes this experiment runs on.
///
/// A male/female tie votes FEMALE, for any `k`.
pub fn knn_predict(
    train: &Array2<f64>,
    labels: &[Gender],
    test: &Array2<f64>,
    k: usize,
) -> Result<Vec<Gender>> {
    let k = k.min(train.nrows());
    let index = LinearSearch::new()
        .from_batch(train, L2Dist)
        .map_err(|e| Error::NeighbourSearch(e.to_string()))?;

    let mut predictions = Vec::with_capacity(test.nrows());
    for row in test.rows() {
        let neighbours = index
            .k_nearest(row, k)
            .map_err(|e| Error::NeighbourSearch(e.to_string()))?;

        let males = neighbours
            .iter()
            .filter(|(_, i)| labels[*i] == Gender::Male)
            .count();
        let females = neighbours.len() - males;

        predictions.push(if males > females {
            Gender::Male
        } else {
            Gender::Female
        });
    }

    Ok(predictions)
}

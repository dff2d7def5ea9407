//! A small feed-forward network: one tanh hidden layer, sigmoid output.
//!
//! Trained with full-batch gradient descent on the binary cross-entropy
//! loss. The linfa family carries no perceptron, so this driver owns its
//! training loop; weights are seeded so a run reproduces.

use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::dataset::Gender;

/// Hyperparameters for the perceptron driver.
#[derive(Debug, Clone)]
pub struct MlpParams {
    pub hidden: usize,
    pub epochs: usize,
    pub learning_rate: f64,
    pub seed: u64,
}

impl Default for MlpParams {
    fn default() -> Self {
        Self {
            hidden: 32,
            epochs: 500,
            learning_rate: 0.5,
            seed: 42,
        }
    }
}

/// Trained network. MALE maps to 1, FEMALE to 0.
pub struct Mlp {
    w1: Array2<f64>,
    b1: Array1<f64>,
    w2: Array1<f64>,
    b2: f64,
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl Mlp {
    /// Fits the network on a feature matrix and its aligned labels.
    pub fn fit(x: &Array2<f64>, labels: &[Gender], params: &MlpParams) -> Self {
        let n = x.nrows() as f64;
        let dim = x.ncols();
        let mut rng = StdRng::seed_from_u64(params.seed);

        let input_scale = 1.0 / (dim as f64).sqrt();
        let hidden_scale = 1.0 / (params.hidden as f64).sqrt();

        let mut w1 = Array2::from_shape_simple_fn((dim, params.hidden), || {
            rng.gen_range(-input_scale..input_scale)
        });
        let mut b1: Array1<f64> = Array1::zeros(params.hidden);
        let mut w2 =
            Array1::from_shape_simple_fn(params.hidden, || rng.gen_range(-hidden_scale..hidden_scale));
        let mut b2 = 0.0;

        let y = Array1::from_iter(
            labels
                .iter()
                .map(|g| if *g == Gender::Male { 1.0 } else { 0.0 }),
        );

        for _ in 0..params.epochs {
            let a1 = (x.dot(&w1) + &b1).mapv(f64::tanh);
            let p = (a1.dot(&w2) + b2).mapv(sigmoid);

            // Cross-entropy gradient through the sigmoid collapses to p - y.
            let dz2 = &p - &y;
            let dw2 = a1.t().dot(&dz2) / n;
            let db2 = dz2.sum() / n;

            let da1 = dz2
                .view()
                .insert_axis(Axis(1))
                .dot(&w2.view().insert_axis(Axis(0)));
            let dz1 = &da1 * &a1.mapv(|v| 1.0 - v * v);
            let dw1 = x.t().dot(&dz1) / n;
            let db1 = dz1.sum_axis(Axis(0)) / n;

            w1 = w1 - dw1 * params.learning_rate;
            b1 = b1 - db1 * params.learning_rate;
            w2 = w2 - dw2 * params.learning_rate;
            b2 -= db2 * params.learning_rate;
        }

        Self { w1, b1, w2, b2 }
    }

    /// Predicts a label per row; the decision threshold is 0.5.
    pub fn predict(&self, x: &Array2<f64>) -> Vec<Gender> {
        let a1 = (x.dot(&self.w1) + &self.b1).mapv(f64::tanh);
        let p = (a1.dot(&self.w2) + self.b2).mapv(sigmoid);

        p.iter()
            .map(|&v| if v >= 0.5 { Gender::Male } else { Gender::Female })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn learns_a_separable_problem() {
        let x = array![
            [0.0, 0.0],
            [0.1, -0.1],
            [-0.1, 0.1],
            [0.0, 0.1],
            [1.0, 1.0],
            [0.9, 1.1],
            [1.1, 0.9],
            [1.0, 0.9],
        ];
        let labels = vec![
            Gender::Female,
            Gender::Female,
            Gender::Female,
            Gender::Female,
            Gender::Male,
            Gender::Male,
            Gender::Male,
            Gender::Male,
        ];

        let params = MlpParams {
            hidden: 8,
            epochs: 2000,
            learning_rate: 0.5,
            seed: 42,
        };
        let model = Mlp::fit(&x, &labels, &params);

        assert_eq!(model.predict(&x), labels);
    }

    #[test]
    fn fit_is_deterministic_for_a_fixed_seed() {
        let x = array![[0.0, 0.0], [1.0, 1.0]];
        let labels = vec![Gender::Female, Gender::Male];
        let params = MlpParams::default();

        let first = Mlp::fit(&x, &labels, &params);
        let second = Mlp::fit(&x, &labels, &params);

        let probe = array![[0.2, 0.7], [0.8, 0.1]];
        assert_eq!(first.predict(&probe), second.predict(&probe));
    }
}

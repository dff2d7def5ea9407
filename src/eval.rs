//! Evaluation drivers: fit one classifier, predict the test set, tally.

use linfa::prelude::*;
use linfa_svm::Svm;
use linfa_trees::DecisionTree;
use ndarray::{Array1, Array2};

use crate::dataset::{Gender, Sample};
use crate::error::{Error, Result};
use crate::knn::knn_predict;
use crate::mlp::{Mlp, MlpParams};

/// C parameter of the linear SVM, matching the experiment's setting.
const SVM_C: f64 = 100.0;

/// Which model the evaluation driver fits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierKind {
    Knn,
    LinearSvm,
    Mlp,
    DecisionTree,
}

/// Driver knobs for the classifiers that take any.
#[derive(Debug, Clone)]
pub struct EvalOptions {
    pub k: usize,
    pub mlp: MlpParams,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            k: 10,
            mlp: MlpParams::default(),
        }
    }
}

impl EvalOptions {
    pub fn with_k(k: usize) -> Self {
        Self {
            k,
            ..Self::default()
        }
    }
}

/// Accuracy tally for one train/predict round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub total: usize,
    pub correct: usize,
    pub failed: usize,
    pub male_predicted: usize,
    pub female_predicted: usize,
}

impl Evaluation {
    /// Exact-match accuracy as a percentage of the test set.
    pub fn accuracy(&self) -> f64 {
        self.correct as f64 * 100.0 / self.total as f64
    }
}

/// Tallies predictions against the test records they are aligned with.
/// The two slices must line up index for index.
pub fn evaluate(test: &[Sample], predictions: &[Gender]) -> Result<Evaluation> {
    if test.is_empty() {
        return Err(Error::EmptySet("test"));
    }
    if test.len() != predictions.len() {
        return Err(Error::PredictionMismatch {
            predictions: predictions.len(),
            test: test.len(),
        });
    }

    let mut eval = Evaluation {
        total: test.len(),
        correct: 0,
        failed: 0,
        male_predicted: 0,
        female_predicted: 0,
    };

    for (sample, predicted) in test.iter().zip(predictions) {
        match predicted {
            Gender::Male => eval.male_predicted += 1,
            Gender::Female => eval.female_predicted += 1,
        }
        if sample.gender == *predicted {
            eval.correct += 1;
        } else {
            eval.failed += 1;
        }
    }

    Ok(eval)
}

/// Fits the selected classifier on the training samples, predicts the test
/// samples and tallies accuracy. Every classifier follows this one contract.
pub fn train_and_evaluate(
    kind: ClassifierKind,
    train: &[Sample],
    test: &[Sample],
    opts: &EvalOptions,
) -> Result<Evaluation> {
    let train_x = feature_matrix(train, "training")?;
    let test_x = feature_matrix(test, "test")?;
    let train_y: Vec<Gender> = train.iter().map(|s| s.gender).collect();

    let predictions = match kind {
        ClassifierKind::Knn => knn_predict(&train_x, &train_y, &test_x, opts.k)?,
        ClassifierKind::LinearSvm => svm_predict(train_x, &train_y, &test_x)?,
        ClassifierKind::Mlp => Mlp::fit(&train_x, &train_y, &opts.mlp).predict(&test_x),
        ClassifierKind::DecisionTree => tree_predict(train_x, &train_y, &test_x)?,
    };

    evaluate(test, &predictions)
}

/// Stacks sample feature vectors into one row-per-sample matrix.
fn feature_matrix(samples: &[Sample], which: &'static str) -> Result<Array2<f64>> {
    if samples.is_empty() {
        return Err(Error::EmptySet(which));
    }

    let dim = samples[0].features.len();
    let mut flat = Vec::with_capacity(samples.len() * dim);
    for sample in samples {
        flat.extend_from_slice(&sample.features);
    }

    Array2::from_shape_vec((samples.len(), dim), flat)
        .map_err(|e| Error::Training(e.to_string()))
}

fn svm_predict(
    train_x: Array2<f64>,
    train_y: &[Gender],
    test_x: &Array2<f64>,
) -> Result<Vec<Gender>> {
    let targets = Array1::from_iter(train_y.iter().map(|g| *g == Gender::Male));
    let dataset = Dataset::new(train_x, targets);

    let model = Svm::<f64, bool>::params()
        .linear_kernel()
        .pos_neg_weights(SVM_C, SVM_C)
        .fit(&dataset)
        .map_err(|e| Error::Training(e.to_string()))?;

    let predicted = model.predict(test_x);
    Ok(predicted
        .iter()
        .map(|&male| if male { Gender::Male } else { Gender::Female })
        .collect())
}

fn tree_predict(
    train_x: Array2<f64>,
    train_y: &[Gender],
    test_x: &Array2<f64>,
) -> Result<Vec<Gender>> {
    let targets = Array1::from_iter(train_y.iter().map(|g| (*g == Gender::Male) as usize));
    let dataset = Dataset::new(train_x, targets);

    let model = DecisionTree::params()
        .fit(&dataset)
        .map_err(|e| Error::Training(e.to_string()))?;

    let predicted = model.predict(test_x);
    Ok(predicted
        .iter()
        .map(|&class| if class == 1 { Gender::Male } else { Gender::Female })
        .collect())
}

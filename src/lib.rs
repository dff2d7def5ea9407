//! # face2gender
//!
//! Binary gender classification of face images.
//!
//! The crate reads a `name; LABEL` table, loads each referenced image as
//! 8-bit grayscale, computes a texture feature vector per image (uniform
//! [LBP](features::lbp_histogram) histogram or flattened raw pixels), splits
//! the samples into train/test sets with a seeded shuffle and evaluates one
//! of four classifiers: k-NN, linear SVM, a small MLP, or a decision tree.
//!
//! ## Features
//! - Uniform LBP histograms and resize-and-flatten pixel features
//! - Class-balanced dataset loading with a per-class cap
//! - Reproducible train/test splits for a fixed seed
//! - linfa-backed SVM, decision tree and nearest-neighbour search
//! - Label-list merging for building the table in the first place
//!
//! ## Example
//! ```no_run
//! use std::path::Path;
//! use face2gender::{
//!     load_samples, read_label_table, train_and_evaluate, train_test_split,
//!     ClassifierKind, EvalOptions, FeatureKind,
//! };
//!
//! # fn main() -> face2gender::Result<()> {
//! let records = read_label_table(Path::new("labels.txt"), 2000)?;
//! let features = FeatureKind::LbpHistogram { points: 24, radius: 8.0 };
//! let (samples, _skipped) = load_samples(&records, Path::new("datasets/facesInTheWild"), &features);
//!
//! let split = train_test_split(&samples, 0.8, 42);
//! let eval = train_and_evaluate(
//!     ClassifierKind::DecisionTree,
//!     &split.train,
//!     &split.test,
//!     &EvalOptions::default(),
//! )?;
//! println!("Accuracy: {:.2}%", eval.accuracy());
//! # Ok(())
//! # }
//! ```

pub mod dataset;
pub mod error;
pub mod eval;
pub mod features;
pub mod knn;
pub mod merge;
pub mod mlp;

pub use dataset::{
    load_samples, read_label_table, train_test_split, DatasetSplit, Gender, LabelRecord, Sample,
};
pub use error::{Error, Result};
pub use eval::{evaluate, train_and_evaluate, ClassifierKind, EvalOptions, Evaluation};
pub use features::FeatureKind;
pub use knn::knn_predict;
pub use merge::{merge_label_files, MergeSummary};
pub use mlp::{Mlp, MlpParams};

//! Trains one classifier on labelled face images and reports test accuracy.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use face2gender::{
    load_samples, read_label_table, train_and_evaluate, train_test_split, ClassifierKind,
    EvalOptions, FeatureKind,
};
use log::info;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ClassifierArg {
    Knn,
    LinearSvm,
    Mlp,
    DecisionTree,
}

impl From<ClassifierArg> for ClassifierKind {
    fn from(arg: ClassifierArg) -> Self {
        match arg {
            ClassifierArg::Knn => ClassifierKind::Knn,
            ClassifierArg::LinearSvm => ClassifierKind::LinearSvm,
            ClassifierArg::Mlp => ClassifierKind::Mlp,
            ClassifierArg::DecisionTree => ClassifierKind::DecisionTree,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FeatureArg {
    /// Uniform LBP histogram
    Lbp,
    /// Resize and flatten raw pixels
    Pixels,
}

#[derive(Parser, Debug)]
#[command(name = "classify")]
#[command(version, about = "Evaluate a gender classifier on labelled face images")]
struct Args {
    /// Label table, one `file; LABEL` row per image
    #[arg(short, long)]
    input: PathBuf,

    /// Directory holding the face images
    #[arg(long, default_value = "datasets/facesInTheWild")]
    dataset_dir: PathBuf,

    /// Classifier to fit
    #[arg(long, value_enum, default_value_t = ClassifierArg::DecisionTree)]
    classifier: ClassifierArg,

    /// Feature extractor
    #[arg(long, value_enum, default_value_t = FeatureArg::Lbp)]
    features: FeatureArg,

    /// LBP sample points
    #[arg(long, default_value_t = 24)]
    points: u32,

    /// LBP radius in pixels
    #[arg(long, default_value_t = 8.0)]
    radius: f64,

    /// Resize target edge for pixel features
    #[arg(long, default_value_t = 150)]
    size: u32,

    /// Per-class record cap
    #[arg(long, default_value_t = 2000)]
    cap: usize,

    /// Training proportion of the split
    #[arg(long, default_value_t = 0.8)]
    train_prop: f64,

    /// Shuffle seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Neighbours for k-NN
    #[arg(short, default_value_t = 10)]
    k: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let started = Instant::now();

    info!("reading label table {}", args.input.display());
    let records = read_label_table(&args.input, args.cap)?;
    info!("kept {} records", records.len());

    let features = match args.features {
        FeatureArg::Lbp => FeatureKind::LbpHistogram {
            points: args.points,
            radius: args.radius,
        },
        FeatureArg::Pixels => FeatureKind::ResizeFlatten {
            width: args.size,
            height: args.size,
        },
    };

    let (samples, skipped) = load_samples(&records, &args.dataset_dir, &features);
    if samples.is_empty() {
        bail!("no readable images under {}", args.dataset_dir.display());
    }

    let split = train_test_split(&samples, args.train_prop, args.seed);
    info!(
        "split into {} training and {} test samples",
        split.train.len(),
        split.test.len()
    );

    let evaluation = train_and_evaluate(
        args.classifier.into(),
        &split.train,
        &split.test,
        &EvalOptions::with_k(args.k),
    )?;

    println!(
        "Samples: {} ({} train / {} test, {} unreadable)",
        samples.len(),
        split.train.len(),
        split.test.len(),
        skipped
    );
    println!("OK {}", evaluation.correct);
    println!("Fail {}", evaluation.failed);
    println!("Male predicted {}", evaluation.male_predicted);
    println!("Female predicted {}", evaluation.female_predicted);
    println!("Accuracy: {:.2}%", evaluation.accuracy());
    println!("Elapsed time: {:.2?}", started.elapsed());

    Ok(())
}

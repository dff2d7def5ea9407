//! Label table reading, image loading and the train/test split.

use std::fmt;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Deserialize;

use crate::error::Result;
use crate::features::FeatureKind;

/// Class label for a face image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the label table: an image filename and its class.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelRecord {
    pub file: String,
    pub gender: Gender,
}

/// A label record joined with its computed feature vector. Every sample in a
/// run carries a vector of the same length.
#[derive(Debug, Clone)]
pub struct Sample {
    pub file: String,
    pub gender: Gender,
    pub features: Vec<f64>,
}

/// Reads the `;`-delimited label table, keeping at most `cap` records per
/// class and stopping early once both classes are full.
pub fn read_label_table(path: &Path, cap: usize) -> Result<Vec<LabelRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b';')
        .trim(Trim::All)
        .from_path(path)?;

    let mut records = Vec::new();
    let mut male = 0usize;
    let mut female = 0usize;

    for row in reader.deserialize() {
        let record: LabelRecord = row?;
        match record.gender {
            Gender::Male if male < cap => {
                male += 1;
                records.push(record);
            }
            Gender::Female if female < cap => {
                female += 1;
                records.push(record);
            }
            _ => {}
        }
        if male >= cap && female >= cap {
            break;
        }
    }

    debug!("kept {male} male and {female} female records (cap {cap})");
    Ok(records)
}

/// Loads every referenced image as 8-bit grayscale and attaches its feature
/// vector. Unreadable images are skipped by building a new list instead of
/// deleting by position afterwards, so one bad file never shifts the indices
/// of the rest. Returns the kept samples and the skipped count.
pub fn load_samples(
    records: &[LabelRecord],
    dataset_dir: &Path,
    features: &FeatureKind,
) -> (Vec<Sample>, usize) {
    if !dataset_dir.is_dir() {
        warn!(
            "dataset directory {} does not exist, nothing readable",
            dataset_dir.display()
        );
        return (Vec::new(), records.len());
    }

    let mut samples = Vec::with_capacity(records.len());
    let mut skipped = 0usize;

    for record in records {
        let path = dataset_dir.join(&record.file);
        match image::open(&path) {
            Ok(img) => {
                let gray = img.to_luma8();
                samples.push(Sample {
                    file: record.file.clone(),
                    gender: record.gender,
                    features: features.extract(&gray),
                });
            }
            Err(err) => {
                warn!("could not read {}: {err}", path.display());
                skipped += 1;
            }
        }
    }

    (samples, skipped)
}

/// A train/test partition of the sample list.
#[derive(Debug)]
pub struct DatasetSplit {
    pub train: Vec<Sample>,
    pub test: Vec<Sample>,
}

/// Splits samples into train and test sets with a seeded shuffle followed by
/// index slicing, so split sizes are exact and a run reproduces.
///
/// `train_prop` is clamped to `0.0..=1.0`; out-of-range values yield an empty
/// test or train set rather than a failure.
pub fn train_test_split(samples: &[Sample], train_prop: f64, seed: u64) -> DatasetSplit {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut samples = samples.to_vec();
    samples.shuffle(&mut rng);

    let len = samples.len() as f64;
    let train_size = (len * train_prop.clamp(0.0, 1.0)).round() as usize;
    let train = samples[..train_size].to_vec();
    let test = samples[train_size..].to_vec();

    DatasetSplit { train, test }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sample(file: &str, gender: Gender) -> Sample {
        Sample {
            file: file.to_string(),
            gender,
            features: vec![0.0; 4],
        }
    }

    #[test]
    fn split_is_disjoint_and_covers_input() {
        let samples: Vec<Sample> = (0..20)
            .map(|i| sample(&format!("img_{i}.jpg"), Gender::Male))
            .collect();

        let split = train_test_split(&samples, 0.8, 42);

        assert_eq!(split.train.len(), 16);
        assert_eq!(split.test.len(), 4);

        let mut files: Vec<&str> = split
            .train
            .iter()
            .chain(split.test.iter())
            .map(|s| s.file.as_str())
            .collect();
        files.sort_unstable();
        files.dedup();
        assert_eq!(files.len(), 20);
    }

    #[test]
    fn split_clamps_out_of_range_proportions() {
        let samples: Vec<Sample> = (0..10)
            .map(|i| sample(&format!("img_{i}.jpg"), Gender::Male))
            .collect();

        let all_train = train_test_split(&samples, 1.2, 42);
        assert_eq!(all_train.train.len(), 10);
        assert!(all_train.test.is_empty());

        let all_test = train_test_split(&samples, -0.5, 42);
        assert!(all_test.train.is_empty());
        assert_eq!(all_test.test.len(), 10);
    }

    #[test]
    fn split_reproduces_for_fixed_seed() {
        let samples: Vec<Sample> = (0..10)
            .map(|i| sample(&format!("img_{i}.jpg"), Gender::Female))
            .collect();

        let first = train_test_split(&samples, 0.7, 7);
        let second = train_test_split(&samples, 0.7, 7);

        let names = |part: &[Sample]| part.iter().map(|s| s.file.clone()).collect::<Vec<_>>();
        assert_eq!(names(&first.train), names(&second.train));
        assert_eq!(names(&first.test), names(&second.test));
    }

    #[test]
    fn label_table_respects_per_class_cap() {
        let dir = std::env::temp_dir().join(format!("face2gender-labels-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("labels.txt");

        let mut contents = String::new();
        for i in 0..5 {
            contents.push_str(&format!("male_{i}.jpg; MALE\n"));
        }
        for i in 0..5 {
            contents.push_str(&format!("female_{i}.jpg; FEMALE\n"));
        }
        fs::write(&path, contents).unwrap();

        let records = read_label_table(&path, 3).unwrap();
        fs::remove_dir_all(&dir).unwrap();

        assert_eq!(records.len(), 6);
        let males = records.iter().filter(|r| r.gender == Gender::Male).count();
        assert_eq!(males, 3);
    }

    #[test]
    fn missing_dataset_dir_yields_no_samples() {
        let records = vec![LabelRecord {
            file: "anyone.jpg".to_string(),
            gender: Gender::Male,
        }];
        let features = FeatureKind::ResizeFlatten {
            width: 4,
            height: 4,
        };

        let (samples, skipped) =
            load_samples(&records, Path::new("does/not/exist"), &features);

        assert!(samples.is_empty());
        assert_eq!(skipped, 1);
    }
}

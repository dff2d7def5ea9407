//! Merges gendered name lists into the single label file the pipeline reads.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::info;

use crate::dataset::Gender;
use crate::error::Result;

/// Line counts contributed by each input list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeSummary {
    pub female: usize,
    pub male: usize,
}

impl MergeSummary {
    pub fn total(&self) -> usize {
        self.female + self.male
    }
}

/// Reads one name per line and appends the label suffix.
fn read_labelled_lines(path: &Path, gender: Gender) -> Result<Vec<String>> {
    let file = File::open(path)?;
    let mut lines = Vec::new();
    for line in BufReader::new(file).lines() {
        lines.push(format!("{}; {gender}", line?));
    }
    Ok(lines)
}

/// Merges a female and a male name list into a single `name; LABEL` file,
/// female entries first. Names are copied as-is; nothing is deduplicated or
/// validated. Returns how many lines each list contributed.
pub fn merge_label_files(female: &Path, male: &Path, out: &Path) -> Result<MergeSummary> {
    let female_lines = read_labelled_lines(female, Gender::Female)?;
    let male_lines = read_labelled_lines(male, Gender::Male)?;

    let mut writer = BufWriter::new(File::create(out)?);
    for line in female_lines.iter().chain(male_lines.iter()) {
        writeln!(writer, "{line}")?;
    }
    writer.flush()?;

    info!(
        "merged {} female and {} male labels into {}",
        female_lines.len(),
        male_lines.len(),
        out.display()
    );

    Ok(MergeSummary {
        female: female_lines.len(),
        male: male_lines.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn tmp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("face2gender-{tag}-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn merged_file_has_all_lines_female_first() {
        let dir = tmp_dir("merge");
        let female = dir.join("female_names.txt");
        let male = dir.join("male_names.txt");
        let out = dir.join("labels.txt");

        fs::write(&female, "Ada_Lovelace_0001.jpg\nGrace_Hopper_0001.jpg\n").unwrap();
        fs::write(&male, "Alan_Turing_0001.jpg\n").unwrap();

        let summary = merge_label_files(&female, &male, &out).unwrap();
        assert_eq!(summary.female, 2);
        assert_eq!(summary.male, 1);
        assert_eq!(summary.total(), 3);

        let merged = fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = merged.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Ada_Lovelace_0001.jpg; FEMALE",
                "Grace_Hopper_0001.jpg; FEMALE",
                "Alan_Turing_0001.jpg; MALE",
            ]
        );

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_input_is_an_error() {
        let dir = tmp_dir("merge-missing");
        let out = dir.join("labels.txt");

        let result = merge_label_files(
            &dir.join("no_such_file.txt"),
            &dir.join("also_missing.txt"),
            &out,
        );
        assert!(result.is_err());
        assert!(!out.exists());

        fs::remove_dir_all(&dir).unwrap();
    }
}

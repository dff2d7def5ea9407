//! Merges a female and a male name list into a single `name; LABEL` file.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use face2gender::merge_label_files;

#[derive(Parser, Debug)]
#[command(name = "merge-labels")]
#[command(version, about = "Merge gendered name lists into a single label file")]
struct Args {
    /// Female name list, one name per line
    #[arg(long, default_value = "datasets/female_names.txt")]
    female: PathBuf,

    /// Male name list, one name per line
    #[arg(long, default_value = "datasets/male_names.txt")]
    male: PathBuf,

    /// Merged output file
    #[arg(short, long, default_value = "labels.txt")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let summary = merge_label_files(&args.female, &args.male, &args.output)?;
    println!(
        "Merged {} labels ({} female, {} male) into {}",
        summary.total(),
        summary.female,
        summary.male,
        args.output.display()
    );

    Ok(())
}

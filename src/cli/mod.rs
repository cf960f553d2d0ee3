//! Command-line interface for hirgc-decompress.
//!
//! ## Usage
//!
//! ```text
//! # Reconstruct into ./reconstructed_sequence.txt
//! hirgc-decompress -r hg38_chr21.fa -t chr21.hirgc
//!
//! # Write to stdout and print a JSON summary to stderr
//! hirgc-decompress -r hg38_chr21.fa -t chr21.hirgc -o - --summary --format json
//! ```

use clap::Parser;

pub mod decompress;

#[derive(Parser)]
#[command(name = "hirgc-decompress")]
#[command(version)]
#[command(about = "Reconstruct a genome sequence from a HIRGC reference-based compressed file")]
#[command(
    long_about = "hirgc-decompress rebuilds a target sequence from a reference sequence and a HIRGC compressed file.\n\nThe compressed file encodes the target as reference copies and literal bases, plus overlays for non-ACGT characters, runs of N and lowercase. The output reproduces the original header and line layout exactly."
)]
pub struct Cli {
    #[command(flatten)]
    pub args: decompress::DecompressArgs,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Format of the run summary
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

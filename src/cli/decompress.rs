use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::cli::OutputFormat;
use crate::output::writer::write_sequence_to_path;
use crate::reconstruct::session::reconstruct_files;
use crate::reconstruct::{ReconstructionConfig, ReconstructionSummary};
use crate::utils::validation::DEFAULT_MAX_SEQUENCE_LENGTH;

#[derive(Args)]
pub struct DecompressArgs {
    /// Reference sequence (FASTA or plain text, optionally gzipped)
    #[arg(short = 'r', long = "reference", required = true)]
    pub reference: PathBuf,

    /// HIRGC compressed target file
    #[arg(short = 't', long = "target", required = true)]
    pub target: PathBuf,

    /// Output file, or '-' for stdout
    #[arg(short, long, default_value = "reconstructed_sequence.txt")]
    pub output: PathBuf,

    /// Maximum reference and target length in bases
    #[arg(long, default_value_t = DEFAULT_MAX_SEQUENCE_LENGTH)]
    pub max_length: usize,

    /// Print a summary of the reconstruction (to stderr when writing to stdout)
    #[arg(long)]
    pub summary: bool,
}

/// Execute a decompression
///
/// # Errors
///
/// Returns an error if either input cannot be parsed, the target cannot be
/// reconstructed against the reference, or the output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: DecompressArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = ReconstructionConfig {
        max_sequence_length: args.max_length,
    };

    let reconstruction = reconstruct_files(&args.reference, &args.target, config)?;

    write_sequence_to_path(
        &args.output,
        &reconstruction.header,
        &reconstruction.sequence,
        &reconstruction.line_layout,
    )
    .with_context(|| format!("Failed to write {}", args.output.display()))?;
    info!(
        "Wrote {} characters to {}",
        reconstruction.summary.final_length,
        args.output.display()
    );

    if verbose {
        eprintln!("Finished in {:.2?}", start.elapsed());
    }

    if args.summary {
        let to_stderr = args.output.as_os_str() == "-";
        print_summary(&reconstruction.summary, format, to_stderr)?;
    }

    Ok(())
}

fn print_summary(
    summary: &ReconstructionSummary,
    format: OutputFormat,
    to_stderr: bool,
) -> anyhow::Result<()> {
    let text = match format {
        OutputFormat::Text => format_text_summary(summary),
        OutputFormat::Json => serde_json::to_string_pretty(summary)?,
        OutputFormat::Tsv => format_tsv_summary(summary),
    };

    if to_stderr {
        eprintln!("{text}");
    } else {
        println!("{text}");
    }
    Ok(())
}

fn format_text_summary(summary: &ReconstructionSummary) -> String {
    [
        "Reconstruction Summary".to_string(),
        "=".repeat(60),
        format!("Header: {}", summary.header),
        format!("Reference length: {}", summary.reference_length),
        format!("Edit records: {}", summary.mismatch_records),
        format!("Literal bases: {}", summary.literal_bases),
        format!("Raw length: {}", summary.raw_length),
        format!("Special characters: {}", summary.special_chars),
        format!("N bases: {}", summary.n_bases),
        format!("Lowercase bases: {}", summary.lowercase_bases),
        format!("Final length: {}", summary.final_length),
        format!("MD5: {}", summary.md5),
    ]
    .join("\n")
}

fn format_tsv_summary(summary: &ReconstructionSummary) -> String {
    format!(
        "reference_length\tmismatch_records\tliteral_bases\traw_length\tspecial_chars\tn_bases\tlowercase_bases\tfinal_length\tmd5\n\
         {}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
        summary.reference_length,
        summary.mismatch_records,
        summary.literal_bases,
        summary.raw_length,
        summary.special_chars,
        summary.n_bases,
        summary.lowercase_bases,
        summary.final_length,
        summary.md5,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> ReconstructionSummary {
        ReconstructionSummary {
            header: ">chr1".to_string(),
            reference_length: 24,
            mismatch_records: 1,
            literal_bases: 1,
            raw_length: 41,
            special_chars: 0,
            n_bases: 2,
            lowercase_bases: 3,
            final_length: 43,
            md5: "0123456789abcdef0123456789abcdef".to_string(),
        }
    }

    #[test]
    fn test_text_summary() {
        let text = format_text_summary(&summary());
        assert!(text.contains("Header: >chr1"));
        assert!(text.contains("Final length: 43"));
        assert!(text.contains("MD5: 0123456789abcdef0123456789abcdef"));
    }

    #[test]
    fn test_tsv_summary() {
        let tsv = format_tsv_summary(&summary());
        let rows: Vec<&str> = tsv.lines().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].split('\t').count(), rows[1].split('\t').count());
        assert!(rows[1].starts_with("24\t1\t1\t41\t"));
    }
}

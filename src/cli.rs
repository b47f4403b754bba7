//! CLI argument parsing for pdfbench.

use clap::Parser;
use std::path::PathBuf;

use crate::panel::MERGE_TOOL;

/// Merge PDF files into a single downloadable document.
///
/// pdfbench collects the given files in order, skips anything that is not a
/// PDF with a warning, and concatenates the pages of the rest into one
/// output document.
#[derive(Parser, Debug)]
#[command(name = "pdfbench")]
#[command(version)]
#[command(about = "Merge PDF files into a single document", long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Input files to merge (in order)
    ///
    /// Specify multiple files or use glob patterns.
    /// Files are merged in the order provided.
    ///
    /// Examples:
    ///   pdfbench file1.pdf file2.pdf
    ///   pdfbench chapter*.pdf -o book.pdf
    #[arg(required = true, value_name = "FILE")]
    pub inputs: Vec<String>,

    /// Output file path
    ///
    /// The merged PDF will be written to this location.
    #[arg(short, long, value_name = "FILE", default_value = "merged.pdf")]
    pub output: PathBuf,

    /// Tool panel to activate
    ///
    /// Identifiers other than "merge" are accepted and ignored,
    /// matching the panel switcher's silent no-op contract.
    #[arg(long, value_name = "ID", default_value = MERGE_TOOL)]
    pub tool: String,

    /// Dry run - show the merge plan without creating output
    ///
    /// Reads and parses every input to count its pages, then displays
    /// what the merge would produce without writing anything.
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Verbose output - show per-file detail while merging
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Emit the session view and merge summary as JSON
    #[arg(long)]
    pub json: bool,
}

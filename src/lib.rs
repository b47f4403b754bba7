//! pdfbench - Merge PDF files through an in-memory session.
//!
//! This library models a small PDF workbench: a panel switcher that maps a
//! tool identifier to the single active tool, and a merge session that owns
//! an ordered collection of selected files and concatenates their pages
//! into one downloadable document. All PDF parsing and serialization is
//! delegated to `lopdf`; the session contributes intake screening, ordered
//! list state, and sequential merge orchestration.
//!
//! # Examples
//!
//! ```no_run
//! use pdfbench::{MergeSession, SelectedFile};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = MergeSession::new();
//! session.intake([
//!     SelectedFile::from_path(Path::new("a.pdf")).await?,
//!     SelectedFile::from_path(Path::new("b.pdf")).await?,
//! ])?;
//!
//! let summary = session.merge().await?;
//! println!("Merged {} pages", summary.total_pages);
//!
//! let result = session.result().expect("merge succeeded");
//! pdfbench::io::trigger_download(result.bytes(), Path::new("merged.pdf"))?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod cli;
pub mod error;
pub mod intake;
pub mod io;
pub mod merge;
pub mod panel;
pub mod session;
pub mod walker;

pub use error::{PdfBenchError, Result};
pub use intake::SelectedFile;
pub use merge::MergeResult;
pub use panel::Workbench;
pub use session::MergeSession;

use clap::Parser;

use crate::cli::Cli;
use crate::session::SessionView;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Run the CLI front-end.
///
/// Parses arguments, activates the requested tool panel, and drives the
/// merge session: intake with warnings for rejected files, list rendering,
/// then either a dry-run plan or a merge plus download of the result.
///
/// # Errors
///
/// Returns an error for any failed session operation or output write; the
/// matching user-facing alert is printed before the error propagates.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut workbench = Workbench::new();
    if !workbench.select_tool(&cli.tool) {
        // Unknown tool identifiers are a silent no-op.
        return Ok(());
    }

    let paths = walker::resolve_paths(&cli.inputs)?;

    let mut candidates = Vec::with_capacity(paths.len());
    for path in &paths {
        candidates.push(SelectedFile::from_path(path).await?);
    }

    let session = workbench.session_mut();

    let report = surface(session.intake(candidates))?;
    if !report.rejected.is_empty() {
        eprintln!(
            "⚠ {} Skipped: {}",
            error::ALERT_PDF_ONLY,
            report.rejected.join(", ")
        );
    }

    if !cli.quiet && !cli.json {
        print_file_list(&session.view());
    }

    if cli.dry_run {
        if !cli.quiet && !cli.json {
            println!("\n🔍 DRY RUN MODE - No files will be created");
        }
        let plan = surface(session.plan().await)?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&plan)?);
        } else if !cli.quiet {
            println!("\n📋 Merge plan:");
            for (index, entry) in plan.entries.iter().enumerate() {
                println!("  {}. {} ({} pages)", index + 1, entry.name, entry.pages);
            }
            println!("\n  Total pages in merged document: {}", plan.total_pages);
            println!("  Run without --dry-run to create the merged PDF");
        }
        return Ok(());
    }

    if !cli.quiet && !cli.json {
        println!("\nMerging {} PDF files...", session.files().len());
    }
    if cli.verbose {
        for (index, file) in session.files().iter().enumerate() {
            println!(
                "  [{}/{}] {} ({})",
                index + 1,
                session.files().len(),
                file.name(),
                file.size_label()
            );
        }
    }

    let summary = surface(session.merge().await)?;
    let result = session
        .result()
        .ok_or_else(|| anyhow::anyhow!("merge reported success but produced no result"))?;

    io::trigger_download(result.bytes(), &cli.output)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else if !cli.quiet {
        println!("  Total pages: {}", summary.total_pages);
        println!("\n✓ Successfully created {}", cli.output.display());
    }

    Ok(())
}

/// Print the user-facing alert for a failed session operation, then let the
/// detailed error propagate.
fn surface<T>(result: Result<T>) -> anyhow::Result<T> {
    result.map_err(|err| {
        if let Some(message) = err.user_message() {
            eprintln!("✗ {message}");
        }
        err.into()
    })
}

fn print_file_list(view: &SessionView) {
    println!("\nSelected files:");
    for (index, row) in view.rows.iter().enumerate() {
        println!("  {}. {} ({})", index + 1, row.name, row.size_label);
    }
}

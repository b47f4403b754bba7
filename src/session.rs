//! The merge session: an owned state object with a command interface.
//!
//! [`MergeSession`] holds the ordered file collection and the last merge
//! result, and exposes the operations a front-end wires to its controls:
//! [`intake`](MergeSession::intake), [`remove`](MergeSession::remove),
//! [`clear`](MergeSession::clear), and [`merge`](MergeSession::merge).
//! No UI toolkit leaks in; a front-end renders [`SessionView`] snapshots
//! and maps errors to alerts via
//! [`PdfBenchError::user_message`](crate::PdfBenchError::user_message).
//!
//! All mutation happens through these discrete calls and the merge loop is
//! strictly sequential, so the session needs no internal locking; the
//! in-progress flag is the sole guard against re-entrant merges.

use lopdf::Document;
use serde::Serialize;

use crate::error::{PdfBenchError, Result};
use crate::intake::SelectedFile;
use crate::merge::{DocumentMerger, MergeResult};

/// Merge action label while idle.
pub const MERGE_LABEL_IDLE: &str = "Merge PDFs";

/// Merge action label while a merge is running.
pub const MERGE_LABEL_BUSY: &str = "Merging...";

/// One rendered row of the file list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRow {
    /// Display name of the file.
    pub name: String,

    /// Size formatted in mebibytes, e.g. `"1.50 MB"`.
    pub size_label: String,
}

/// Snapshot of everything a front-end renders.
///
/// Rebuilt from the collection on every call, so it always reflects the
/// exact current order and contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    /// One row per collected file, in merge order.
    pub rows: Vec<FileRow>,

    /// Whether the merge action is currently enabled.
    pub merge_enabled: bool,

    /// Current label of the merge action.
    pub merge_label: &'static str,

    /// Whether a result is available for download.
    pub result_visible: bool,
}

/// Outcome of an intake call that accepted at least one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeReport {
    /// Number of files appended to the collection.
    pub accepted: usize,

    /// Names of candidates rejected for not declaring a PDF content type.
    /// Non-empty means the front-end owes the user a warning.
    pub rejected: Vec<String>,
}

/// Summary of a completed merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeSummary {
    /// Number of files merged.
    pub files_merged: usize,

    /// Total pages in the merged document.
    pub total_pages: usize,

    /// Size of the serialized output in bytes.
    pub output_size: usize,
}

/// Planned contribution of one file to a merge (dry run).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanEntry {
    /// Display name of the file.
    pub name: String,

    /// Number of pages the file contributes.
    pub pages: usize,
}

/// Merge plan produced by a dry run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergePlan {
    /// Per-file contributions in merge order.
    pub entries: Vec<PlanEntry>,

    /// Total pages the merged document would have.
    pub total_pages: usize,
}

/// Owned state of the merge tool.
#[derive(Debug, Default)]
pub struct MergeSession {
    files: Vec<SelectedFile>,
    result: Option<MergeResult>,
    merging: bool,
}

impl MergeSession {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)initialize the merge tool.
    ///
    /// Idempotent: re-renders the view from the current in-memory collection
    /// and changes nothing else. Called whenever the merge panel is
    /// activated.
    pub fn init(&self) -> SessionView {
        self.view()
    }

    /// The ordered file collection, insertion order being merge order.
    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    /// The result of the last successful merge, if any.
    pub fn result(&self) -> Option<&MergeResult> {
        self.result.as_ref()
    }

    /// Render the current view: one row per file plus action state.
    pub fn view(&self) -> SessionView {
        SessionView {
            rows: self
                .files
                .iter()
                .map(|file| FileRow {
                    name: file.name().to_string(),
                    size_label: file.size_label(),
                })
                .collect(),
            merge_enabled: self.files.len() >= 2 && !self.merging,
            merge_label: if self.merging {
                MERGE_LABEL_BUSY
            } else {
                MERGE_LABEL_IDLE
            },
            result_visible: self.result.is_some(),
        }
    }

    /// Accept candidate files into the collection.
    ///
    /// Candidates that do not declare the PDF content type are rejected and
    /// reported by name; the rest append after existing entries, preserving
    /// their relative order. Duplicates are allowed as independent entries.
    ///
    /// # Errors
    ///
    /// Returns [`PdfBenchError::NoPdfFiles`] if nothing survives the filter;
    /// the collection is left untouched in that case.
    pub fn intake(
        &mut self,
        candidates: impl IntoIterator<Item = SelectedFile>,
    ) -> Result<IntakeReport> {
        let mut accepted = Vec::new();
        let mut rejected = Vec::new();

        for candidate in candidates {
            if candidate.is_pdf() {
                accepted.push(candidate);
            } else {
                rejected.push(candidate.name().to_string());
            }
        }

        if accepted.is_empty() {
            return Err(PdfBenchError::NoPdfFiles);
        }

        let count = accepted.len();
        self.files.extend(accepted);

        Ok(IntakeReport {
            accepted: count,
            rejected,
        })
    }

    /// Remove the entry at the given zero-based position.
    ///
    /// Later entries shift down by one; the removed file is returned.
    ///
    /// # Errors
    ///
    /// Returns [`PdfBenchError::IndexOutOfRange`] if the position does not
    /// exist; the collection is left untouched.
    pub fn remove(&mut self, index: usize) -> Result<SelectedFile> {
        if index >= self.files.len() {
            return Err(PdfBenchError::IndexOutOfRange {
                index,
                len: self.files.len(),
            });
        }
        Ok(self.files.remove(index))
    }

    /// Empty the collection and drop any previous result.
    ///
    /// A subsequent intake/merge cycle behaves identically to a fresh
    /// session.
    pub fn clear(&mut self) {
        self.files.clear();
        self.result = None;
    }

    /// Merge the collected files, in collection order, into a single
    /// document.
    ///
    /// Requires at least two files; fails immediately without any I/O
    /// otherwise. Each file is read, parsed, and appended to the output
    /// before the next one is touched. On success the result replaces any
    /// previous one; on failure the collection and any previous result stay
    /// untouched. The in-progress flag is reset on both paths.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two files are collected, a merge is
    /// already running, or any read/parse/splice/serialize step fails.
    pub async fn merge(&mut self) -> Result<MergeSummary> {
        if self.files.len() < 2 {
            return Err(PdfBenchError::TooFewFiles {
                count: self.files.len(),
            });
        }
        if self.merging {
            return Err(PdfBenchError::MergeInProgress);
        }

        self.merging = true;
        let outcome = self.run_merge().await;
        self.merging = false;

        let result = outcome?;
        let summary = MergeSummary {
            files_merged: self.files.len(),
            total_pages: result.page_count(),
            output_size: result.len(),
        };
        self.result = Some(result);

        Ok(summary)
    }

    /// Compute the merge plan without producing output.
    ///
    /// Reads and parses each file sequentially to count its pages; the same
    /// precondition and failure semantics as [`merge`](Self::merge) apply,
    /// but no document is accumulated and no result is stored.
    pub async fn plan(&self) -> Result<MergePlan> {
        if self.files.len() < 2 {
            return Err(PdfBenchError::TooFewFiles {
                count: self.files.len(),
            });
        }

        let mut entries = Vec::with_capacity(self.files.len());
        let mut total_pages = 0;

        for file in &self.files {
            let doc = self.load_document(file).await?;
            let pages = doc.get_pages().len();
            total_pages += pages;
            entries.push(PlanEntry {
                name: file.name().to_string(),
                pages,
            });
        }

        Ok(MergePlan {
            entries,
            total_pages,
        })
    }

    async fn run_merge(&self) -> Result<MergeResult> {
        let mut merger = DocumentMerger::new();

        for file in &self.files {
            let doc = self.load_document(file).await?;
            merger.append(doc)?;
        }

        let (bytes, page_count) = merger.finish()?;
        Ok(MergeResult::new(bytes, page_count))
    }

    async fn load_document(&self, file: &SelectedFile) -> Result<Document> {
        let bytes = file.read().await?;
        Document::load_mem(&bytes)
            .map_err(|e| PdfBenchError::failed_to_parse(file.name(), e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::PDF_CONTENT_TYPE;
    use crate::merge::test_pdf_bytes;

    fn pdf_file(name: &str, widths: &[i64]) -> SelectedFile {
        SelectedFile::from_bytes(name, PDF_CONTENT_TYPE, test_pdf_bytes(widths))
    }

    fn text_file(name: &str) -> SelectedFile {
        SelectedFile::from_bytes(name, "text/plain", b"not a pdf".to_vec())
    }

    fn corrupt_pdf(name: &str) -> SelectedFile {
        SelectedFile::from_bytes(name, PDF_CONTENT_TYPE, b"%PDF-1.5 garbage".to_vec())
    }

    #[test]
    fn test_fresh_session_view() {
        let session = MergeSession::new();
        let view = session.view();

        assert!(view.rows.is_empty());
        assert!(!view.merge_enabled);
        assert_eq!(view.merge_label, MERGE_LABEL_IDLE);
        assert!(!view.result_visible);
    }

    #[test]
    fn test_intake_appends_in_given_order() {
        let mut session = MergeSession::new();
        session
            .intake([pdf_file("a.pdf", &[100]), pdf_file("b.pdf", &[200])])
            .unwrap();
        let report = session
            .intake([pdf_file("c.pdf", &[300]), pdf_file("d.pdf", &[400])])
            .unwrap();

        assert_eq!(report.accepted, 2);
        assert!(report.rejected.is_empty());

        let names: Vec<&str> = session.files().iter().map(|f| f.name()).collect();
        assert_eq!(names, ["a.pdf", "b.pdf", "c.pdf", "d.pdf"]);
    }

    #[test]
    fn test_intake_rejects_non_pdf_by_name() {
        let mut session = MergeSession::new();
        let report = session
            .intake([
                pdf_file("a.pdf", &[100]),
                text_file("notes.txt"),
                pdf_file("b.pdf", &[200]),
            ])
            .unwrap();

        assert_eq!(report.accepted, 2);
        assert_eq!(report.rejected, vec!["notes.txt"]);
        assert_eq!(session.files().len(), 2);
    }

    #[test]
    fn test_intake_all_rejected_leaves_state_untouched() {
        let mut session = MergeSession::new();
        let result = session.intake([text_file("a.txt"), text_file("b.txt")]);

        assert!(matches!(result.unwrap_err(), PdfBenchError::NoPdfFiles));
        assert!(session.files().is_empty());
    }

    #[test]
    fn test_intake_empty_selection_is_an_error() {
        let mut session = MergeSession::new();
        let result = session.intake([]);
        assert!(matches!(result.unwrap_err(), PdfBenchError::NoPdfFiles));
    }

    #[test]
    fn test_intake_allows_duplicates() {
        let mut session = MergeSession::new();
        session
            .intake([pdf_file("same.pdf", &[100]), pdf_file("same.pdf", &[100])])
            .unwrap();
        assert_eq!(session.files().len(), 2);
    }

    #[test]
    fn test_view_mirrors_collection() {
        let mut session = MergeSession::new();
        session
            .intake([pdf_file("a.pdf", &[100]), pdf_file("b.pdf", &[200])])
            .unwrap();

        let view = session.view();
        assert_eq!(view.rows.len(), session.files().len());
        assert_eq!(view.rows[0].name, "a.pdf");
        assert_eq!(view.rows[1].name, "b.pdf");

        session.remove(0).unwrap();
        let view = session.view();
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].name, "b.pdf");
    }

    #[test]
    fn test_merge_enabled_iff_at_least_two() {
        let mut session = MergeSession::new();
        assert!(!session.view().merge_enabled);

        session.intake([pdf_file("a.pdf", &[100])]).unwrap();
        assert!(!session.view().merge_enabled);

        session.intake([pdf_file("b.pdf", &[200])]).unwrap();
        assert!(session.view().merge_enabled);

        session.remove(1).unwrap();
        assert!(!session.view().merge_enabled);
    }

    #[test]
    fn test_remove_shifts_later_entries() {
        let mut session = MergeSession::new();
        session
            .intake([
                pdf_file("a.pdf", &[100]),
                pdf_file("b.pdf", &[200]),
                pdf_file("c.pdf", &[300]),
            ])
            .unwrap();

        let removed = session.remove(1).unwrap();
        assert_eq!(removed.name(), "b.pdf");

        let names: Vec<&str> = session.files().iter().map(|f| f.name()).collect();
        assert_eq!(names, ["a.pdf", "c.pdf"]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut session = MergeSession::new();
        session.intake([pdf_file("a.pdf", &[100])]).unwrap();

        let result = session.remove(1);
        assert!(matches!(
            result.unwrap_err(),
            PdfBenchError::IndexOutOfRange { index: 1, len: 1 }
        ));
        assert_eq!(session.files().len(), 1);
    }

    #[tokio::test]
    async fn test_merge_requires_two_files() {
        let mut session = MergeSession::new();
        session.intake([pdf_file("a.pdf", &[100])]).unwrap();

        let result = session.merge().await;
        assert!(matches!(
            result.unwrap_err(),
            PdfBenchError::TooFewFiles { count: 1 }
        ));
        assert!(session.result().is_none());
    }

    #[tokio::test]
    async fn test_merge_page_count_is_sum_in_order() {
        let mut session = MergeSession::new();
        session
            .intake([
                pdf_file("a.pdf", &[100, 101, 102]),
                pdf_file("b.pdf", &[200, 201]),
            ])
            .unwrap();

        let summary = session.merge().await.unwrap();
        assert_eq!(summary.files_merged, 2);
        assert_eq!(summary.total_pages, 5);

        let result = session.result().unwrap();
        assert_eq!(result.page_count(), 5);
        assert_eq!(summary.output_size, result.len());

        let merged = Document::load_mem(result.bytes()).unwrap();
        assert_eq!(merged.get_pages().len(), 5);

        assert!(session.view().result_visible);
        assert_eq!(session.view().merge_label, MERGE_LABEL_IDLE);
    }

    #[tokio::test]
    async fn test_merge_aborts_on_corrupt_file_keeping_state() {
        let mut session = MergeSession::new();
        session
            .intake([
                pdf_file("a.pdf", &[100]),
                corrupt_pdf("broken.pdf"),
                pdf_file("c.pdf", &[300]),
            ])
            .unwrap();

        let result = session.merge().await;
        let err = result.unwrap_err();
        assert!(matches!(err, PdfBenchError::FailedToParsePdf { .. }));
        assert_eq!(
            err.user_message(),
            Some(crate::error::ALERT_MERGE_FAILED)
        );

        // Collection not partially consumed, no result exposed, action idle.
        assert_eq!(session.files().len(), 3);
        assert!(session.result().is_none());
        let view = session.view();
        assert!(view.merge_enabled);
        assert_eq!(view.merge_label, MERGE_LABEL_IDLE);
    }

    #[tokio::test]
    async fn test_failed_merge_keeps_previous_result() {
        let mut session = MergeSession::new();
        session
            .intake([pdf_file("a.pdf", &[100]), pdf_file("b.pdf", &[200])])
            .unwrap();
        session.merge().await.unwrap();
        let previous_len = session.result().unwrap().len();

        session.intake([corrupt_pdf("broken.pdf")]).unwrap();
        assert!(session.merge().await.is_err());

        assert_eq!(session.result().unwrap().len(), previous_len);
        assert!(session.view().result_visible);
    }

    #[tokio::test]
    async fn test_clear_resets_to_fresh_session() {
        let mut session = MergeSession::new();
        session
            .intake([pdf_file("a.pdf", &[100]), pdf_file("b.pdf", &[200])])
            .unwrap();
        session.merge().await.unwrap();

        session.clear();
        assert!(session.files().is_empty());
        assert!(session.result().is_none());
        assert_eq!(session.view(), MergeSession::new().view());

        // A fresh cycle behaves like a fresh session.
        session
            .intake([pdf_file("x.pdf", &[100]), pdf_file("y.pdf", &[200, 201])])
            .unwrap();
        let summary = session.merge().await.unwrap();
        assert_eq!(summary.total_pages, 3);
    }

    #[tokio::test]
    async fn test_plan_counts_pages_without_result() {
        let mut session = MergeSession::new();
        session
            .intake([
                pdf_file("a.pdf", &[100, 101]),
                pdf_file("b.pdf", &[200, 201, 202]),
            ])
            .unwrap();

        let plan = session.plan().await.unwrap();
        assert_eq!(plan.total_pages, 5);
        assert_eq!(plan.entries.len(), 2);
        assert_eq!(plan.entries[0].pages, 2);
        assert_eq!(plan.entries[1].pages, 3);

        assert!(session.result().is_none());
    }

    #[test]
    fn test_init_is_idempotent() {
        let mut session = MergeSession::new();
        session
            .intake([pdf_file("a.pdf", &[100]), pdf_file("b.pdf", &[200])])
            .unwrap();

        let first = session.init();
        let second = session.init();
        assert_eq!(first, second);
        assert_eq!(first, session.view());
    }

    #[test]
    fn test_view_serializes_to_camel_case() {
        let session = MergeSession::new();
        let json = serde_json::to_value(session.view()).unwrap();
        assert_eq!(json["mergeEnabled"], false);
        assert_eq!(json["mergeLabel"], MERGE_LABEL_IDLE);
        assert_eq!(json["resultVisible"], false);
    }
}
